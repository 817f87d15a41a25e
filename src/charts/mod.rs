//! 발표용 그림 렌더러 (PNG)
//!
//! 각 그림은 순수 함수로 데이터를 먼저 만들고(`build`) 그 다음에 그린다.
//! 렌더링은 스냅샷을 읽기만 한다.

pub mod cost_comparison;
pub mod efficiency;

use once_cell::sync::OnceCell;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontFamily, FontStyle};

use crate::config::FigureConfig;
use crate::types::{AnalysisError, AnalysisResult};

pub use cost_comparison::{render_cost_comparison, CostComparisonData};
pub use efficiency::{render_efficiency, EfficiencyData};

static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static DEJAVU_SANS_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

static FONTS: OnceCell<Result<(), String>> = OnceCell::new();

/// 번들 폰트를 sans-serif 패밀리로 한 번만 등록
pub fn ensure_fonts() -> AnalysisResult<()> {
    FONTS
        .get_or_init(|| {
            register_font("sans-serif", FontStyle::Normal, DEJAVU_SANS)
                .map_err(|_| "invalid bundled font (regular)".to_string())?;
            register_font("sans-serif", FontStyle::Bold, DEJAVU_SANS_BOLD)
                .map_err(|_| "invalid bundled font (bold)".to_string())?;
            Ok(())
        })
        .clone()
        .map_err(AnalysisError::Render)
}

pub(crate) fn render_err<E: std::fmt::Display>(e: E) -> AnalysisError {
    AnalysisError::Render(e.to_string())
}

// 팔레트
pub(crate) const COST_PALETTE: [RGBColor; 4] = [
    RGBColor(0x2E, 0x86, 0xAB),
    RGBColor(0xA2, 0x3B, 0x72),
    RGBColor(0xF1, 0x8F, 0x01),
    RGBColor(0xC7, 0x3E, 0x1D),
];
pub(crate) const EFFICIENCY_PALETTE: [RGBColor; 4] = [
    RGBColor(0x59, 0x2E, 0x83),
    RGBColor(0x2E, 0xCC, 0x71),
    RGBColor(0xE7, 0x4C, 0x3C),
    RGBColor(0xF3, 0x9C, 0x12),
];
pub(crate) const ANNOTATION_GREEN: RGBColor = RGBColor(0x00, 0x80, 0x00);
pub(crate) const SUBTITLE_GRAY: RGBColor = RGBColor(0x80, 0x80, 0x80);
pub(crate) const LIGHT_BLUE: RGBColor = RGBColor(0xAD, 0xD8, 0xE6);

pub(crate) const BAR_ALPHA: f64 = 0.8;

/// DPI를 반영한 픽셀 캔버스
#[derive(Debug, Clone, Copy)]
pub(crate) struct Canvas {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
}

impl Canvas {
    pub fn from_config(config: &FigureConfig) -> Self {
        let (width, height) = config.pixel_size();
        Self { width, height, dpi: config.dpi }
    }

    /// 포인트 → 픽셀
    pub fn pt(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    pub fn px(&self, points: f64) -> u32 {
        self.pt(points).round().max(1.0) as u32
    }

    pub fn font(&self, points: f64) -> FontDesc<'static> {
        FontDesc::new(FontFamily::SansSerif, self.pt(points), FontStyle::Normal)
    }

    pub fn bold(&self, points: f64) -> FontDesc<'static> {
        FontDesc::new(FontFamily::SansSerif, self.pt(points), FontStyle::Bold)
    }
}

/// 제목/부제목을 그리고 나머지 영역을 돌려준다
pub(crate) fn draw_header<'a>(
    root: &DrawingArea<BitMapBackend<'a>, Shift>,
    canvas: &Canvas,
    title: &str,
    subtitle: &str,
) -> AnalysisResult<DrawingArea<BitMapBackend<'a>, Shift>> {
    let header_height = canvas.px(44.0);
    let (header, body) = root.split_vertically(header_height);
    let center_x = (canvas.width / 2) as i32;

    let title_style = TextStyle::from(canvas.font(14.0)).pos(Pos::new(HPos::Center, VPos::Top));
    header
        .draw_text(title, &title_style, (center_x, canvas.px(6.0) as i32))
        .map_err(render_err)?;

    let subtitle_style = TextStyle::from(canvas.font(11.0))
        .color(&SUBTITLE_GRAY)
        .pos(Pos::new(HPos::Center, VPos::Top));
    header
        .draw_text(subtitle, &subtitle_style, (center_x, canvas.px(26.0) as i32))
        .map_err(render_err)?;

    Ok(body)
}

/// 로그 축 범위: 값들을 감싸는 10의 거듭제곱 경계
pub(crate) fn log_bounds(values: impl IntoIterator<Item = f64>, headroom: f64) -> (f64, f64) {
    let positive: Vec<f64> = values.into_iter().filter(|v| v.is_finite() && *v > 0.0).collect();
    if positive.is_empty() {
        return (0.01, 1.0);
    }

    let min = positive.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = positive.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let lo = 10f64.powi((min * 0.8).log10().floor() as i32);
    let hi = 10f64.powi((max * headroom).log10().ceil() as i32);
    if hi > lo { (lo, hi) } else { (lo, lo * 10.0) }
}

/// 축 눈금용 달러 표기
pub(crate) fn format_usd_tick(value: f64) -> String {
    if value >= 1.0 {
        format!("${:.0}", value)
    } else if value >= 0.01 {
        format!("${:.2}", value)
    } else {
        format!("${:.0e}", value)
    }
}

/// 축 라벨용 줄바꿈 (공백마다 한 줄)
pub(crate) fn wrap_label(name: &str) -> Vec<String> {
    name.split_whitespace().map(str::to_string).collect()
}

/// 카테고리 눈금 라벨
///
/// `anchors`는 각 카테고리 중심의 백엔드 좌표 (x, 플롯 하단 y).
/// `wrap`이면 단어마다 줄을 바꿔 아래로 쌓는다.
pub(crate) fn draw_category_labels(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    canvas: &Canvas,
    anchors: &[(i32, i32)],
    names: &[String],
    points: f64,
    wrap: bool,
) -> AnalysisResult<()> {
    ensure_fonts()?;
    let style = TextStyle::from(canvas.font(points)).pos(Pos::new(HPos::Center, VPos::Top));
    let line_height = canvas.pt(points * 1.2).round() as i32;
    let pad = canvas.px(4.0) as i32;

    for (&(x, y), name) in anchors.iter().zip(names) {
        let lines = if wrap { wrap_label(name) } else { vec![name.clone()] };
        for (i, line) in lines.iter().enumerate() {
            root.draw_text(line, &style, (x, y + pad + line_height * i as i32))
                .map_err(render_err)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_bounds() {
        assert_eq!(log_bounds(vec![2.7, 28.7], 3.0), (1.0, 100.0));
        assert_eq!(log_bounds(vec![0.05, 0.5], 3.0), (0.01, 10.0));
        // 음수/0은 무시
        assert_eq!(log_bounds(vec![-1.0, 0.0, 5.0], 1.0), (1.0, 10.0));
        assert_eq!(log_bounds(Vec::<f64>::new(), 1.0), (0.01, 1.0));
    }

    #[test]
    fn test_wrap_label() {
        assert_eq!(wrap_label("PnR DAO (Ours)"), vec!["PnR", "DAO", "(Ours)"]);
        assert_eq!(wrap_label("Compound DAO"), vec!["Compound", "DAO"]);
        assert_eq!(wrap_label("Join"), vec!["Join"]);
    }

    #[test]
    fn test_category_labels_reach_the_bitmap() {
        let (width, height) = (200u32, 80u32);
        let mut buffer = vec![255u8; (width * height * 3) as usize];
        let canvas = Canvas { width, height, dpi: 72 };
        let names = vec!["Cast Vote".to_string()];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            draw_category_labels(&root, &canvas, &[(100, 10)], &names, 12.0, true).unwrap();
            root.present().unwrap();
        }

        // 두 줄 모두 글리프가 찍혀야 한다
        let row_has_ink = |y0: u32, y1: u32| {
            (y0..y1).any(|y| {
                (0..width).any(|x| buffer[((y * width + x) * 3) as usize] < 128)
            })
        };
        assert!(row_has_ink(12, 27));
        assert!(row_has_ink(28, 48));
    }

    #[test]
    fn test_canvas_scaling() {
        let canvas = Canvas::from_config(&FigureConfig {
            output_dir: ".".into(),
            width_in: 16.0,
            height_in: 8.0,
            dpi: 300,
        });
        assert_eq!((canvas.width, canvas.height), (4800, 2400));
        assert_eq!(canvas.px(12.0), 50);
    }

    #[test]
    fn test_bundled_fonts_register() {
        assert!(ensure_fonts().is_ok());
        assert!(ensure_fonts().is_ok());
    }
}
