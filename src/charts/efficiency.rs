use std::path::PathBuf;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::info;

use super::{draw_category_labels, draw_header, ensure_fonts, render_err, Canvas, BAR_ALPHA, EFFICIENCY_PALETTE};
use crate::analysis::efficiency::{LAYER2_DAO_LABEL, PNR_DAO_LABEL, TRADITIONAL_DAO_LABEL};
use crate::analysis::{batch_efficiency_curve, BatchPoint, PerformanceComparison};
use crate::config::FigureConfig;
use crate::types::AnalysisResult;

const GROUP_BAR_WIDTH: f64 = 0.25;

const BATCH_PANEL_CAPTION: &str = "Batch Operation Efficiency Model (ERC-1155 Mathematical Analysis)";
const SCORE_PANEL_CAPTION: &str = "Performance Metrics Comparison (Normalized Scores)";
const SCORE_AXIS_LABEL: &str = "Performance Score (%)";

/// Figure 2 데이터: 배치 효율 곡선 + 성능 점수
#[derive(Debug, Clone, PartialEq)]
pub struct EfficiencyData {
    pub curve: Vec<BatchPoint>,
    pub scores: PerformanceComparison,
    pub improvements: [f64; 4],
}

impl EfficiencyData {
    pub fn build() -> Self {
        let scores = PerformanceComparison::fixed();
        Self {
            curve: batch_efficiency_curve(),
            improvements: scores.improvements(),
            scores,
        }
    }
}

/// Figure 2: 배치 효율 + 성능 비교
pub fn render_efficiency(data: &EfficiencyData, config: &FigureConfig) -> AnalysisResult<PathBuf> {
    info!("📊 Generating Figure 2: Efficiency and Performance Analysis...");
    ensure_fonts()?;

    let path = config.efficiency_path();
    let canvas = Canvas::from_config(config);

    {
        let root = BitMapBackend::new(&path, (canvas.width, canvas.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let body = draw_header(
            &root,
            &canvas,
            "PnR DAO Efficiency and Performance Analysis",
            "Mathematical Models and Empirical Validation",
        )?;
        let (left, right) = body.split_horizontally(canvas.width / 2);

        draw_batch_panel(&left, &canvas, &data.curve)?;
        draw_score_panel(&root, &right, &canvas, data)?;

        root.present().map_err(render_err)?;
    }

    info!("✓ Figure 2 saved: {}", path.display());
    Ok(path)
}

fn draw_batch_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    canvas: &Canvas,
    curve: &[BatchPoint],
) -> AnalysisResult<()> {
    let color = EFFICIENCY_PALETTE[0];
    let max_size = curve.iter().map(|p| p.batch_size).max().unwrap_or(1).max(2) as f64;
    let max_efficiency = curve.iter().map(|p| p.efficiency_pct).fold(0.0, f64::max);
    let y_max = if max_efficiency > 0.0 { max_efficiency * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(BATCH_PANEL_CAPTION, canvas.font(12.0))
        .margin(canvas.px(12.0))
        .x_label_area_size(canvas.px(32.0))
        .y_label_area_size(canvas.px(40.0))
        .build_cartesian_2d(1f64..max_size, 0f64..y_max)
        .map_err(render_err)?;

    let x_fmt = |x: &f64| format!("{:.0}", x);
    let y_fmt = |y: &f64| format!("{:.0}", y);
    chart
        .configure_mesh()
        .bold_line_style(BLACK.mix(0.3).stroke_width(1))
        .light_line_style(BLACK.mix(0.08).stroke_width(1))
        .x_labels(curve.len().max(2))
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .x_label_style(canvas.font(10.0))
        .y_label_style(canvas.font(10.0))
        .x_desc("Batch Size (Number of Operations)")
        .y_desc("Gas Efficiency Improvement (%)")
        .axis_desc_style(canvas.bold(11.0))
        .draw()
        .map_err(render_err)?;

    let points: Vec<(f64, f64)> = curve.iter().map(|p| (p.batch_size as f64, p.efficiency_pct)).collect();

    chart
        .draw_series(AreaSeries::new(points.iter().cloned(), 0.0, color.mix(0.3)))
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(points.iter().cloned(), color.stroke_width(canvas.px(2.5))))
        .map_err(render_err)?;

    let marker = canvas.px(4.0);
    chart
        .draw_series(points.iter().map(|&p| Circle::new(p, marker, color.filled())))
        .map_err(render_err)?;

    Ok(())
}

fn draw_score_panel(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    canvas: &Canvas,
    data: &EfficiencyData,
) -> AnalysisResult<()> {
    let scores = &data.scores;
    let names: Vec<String> = scores.metrics.iter().map(|m| m.to_string()).collect();
    let n = names.len();

    let mut chart = ChartBuilder::on(area)
        .caption(SCORE_PANEL_CAPTION, canvas.font(12.0))
        .margin(canvas.px(12.0))
        .x_label_area_size(canvas.px(32.0))
        .y_label_area_size(canvas.px(40.0))
        .build_cartesian_2d(
            -0.5f64..n as f64 - 0.5,
            0f64..105f64,
        )
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(BLACK.mix(0.3).stroke_width(1))
        .light_line_style(BLACK.mix(0.08).stroke_width(1))
        .x_labels(0)
        .y_label_style(canvas.font(10.0))
        .y_desc(SCORE_AXIS_LABEL)
        .axis_desc_style(canvas.bold(11.0))
        .draw()
        .map_err(render_err)?;

    let bottom = chart.plotting_area().get_pixel_range().1.end;
    let anchors: Vec<(i32, i32)> = (0..n).map(|i| (chart.backend_coord(&(i as f64, 0.0)).0, bottom)).collect();
    draw_category_labels(root, canvas, &anchors, &names, 10.0, false)?;

    let groups: [(&str, &[f64; 4], RGBColor, f64); 3] = [
        (TRADITIONAL_DAO_LABEL, &scores.traditional, EFFICIENCY_PALETTE[1], -GROUP_BAR_WIDTH),
        (LAYER2_DAO_LABEL, &scores.layer2, EFFICIENCY_PALETTE[2], 0.0),
        (PNR_DAO_LABEL, &scores.pnr, EFFICIENCY_PALETTE[3], GROUP_BAR_WIDTH),
    ];

    let legend_px = canvas.px(6.0) as i32;
    for (label, values, color, offset) in groups {
        chart
            .draw_series(values.iter().enumerate().map(|(i, v)| {
                let x = i as f64 + offset;
                Rectangle::new(
                    [(x - GROUP_BAR_WIDTH / 2.0, 0.0), (x + GROUP_BAR_WIDTH / 2.0, *v)],
                    color.mix(BAR_ALPHA).filled(),
                )
            }))
            .map_err(render_err)?
            .label(label)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - legend_px), (x + 2 * legend_px, y + legend_px)], color.mix(BAR_ALPHA).filled())
            });
    }

    let annotation = TextStyle::from(canvas.bold(9.0)).pos(Pos::new(HPos::Center, VPos::Bottom));
    chart
        .draw_series(
            data.improvements
                .iter()
                .enumerate()
                .filter(|(_, improvement)| **improvement > 0.0)
                .map(|(i, improvement)| {
                    Text::new(
                        format!("+{:.0}%", improvement),
                        (i as f64 + GROUP_BAR_WIDTH, scores.pnr[i] + 2.0),
                        annotation.clone(),
                    )
                }),
        )
        .map_err(render_err)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(canvas.font(10.0))
        .background_style(WHITE.mix(0.8).filled())
        .border_style(BLACK.mix(0.3).stroke_width(1))
        .draw()
        .map_err(render_err)?;

    Ok(())
}
