use std::path::PathBuf;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::info;

use super::{
    draw_category_labels, draw_header, ensure_fonts, format_usd_tick, log_bounds, render_err, Canvas,
    ANNOTATION_GREEN, BAR_ALPHA, COST_PALETTE, LIGHT_BLUE,
};
use crate::analysis::{savings_percentage, CostCalculator};
use crate::config::FigureConfig;
use crate::constants::{DATE_ONLY, TIMESTAMP_MINUTES};
use crate::dataset::{
    own_operation, verified_dao_transactions, CAST_VOTE, CREATE_PRIVATE_DEAL, CREATE_PROPOSAL, JOIN_DAO,
};
use crate::types::{AnalysisResult, CostEstimate, Network};

const OWN_DAO_LABEL: &str = "PnR DAO (Ours)";
const PAIR_BAR_WIDTH: f64 = 0.35;

/// (차트 라벨, 데이터셋 연산 이름)
const LAYER_OPERATIONS: [(&str, &str); 4] = [
    (JOIN_DAO, JOIN_DAO),
    (CAST_VOTE, CAST_VOTE),
    (CREATE_PROPOSAL, CREATE_PROPOSAL),
    ("Private Deal", CREATE_PRIVATE_DEAL),
];

/// DAO 하나의 투표/제안 비용 (Ethereum 기준)
#[derive(Debug, Clone, PartialEq)]
pub struct DaoCostBar {
    pub name: String,
    pub vote: CostEstimate,
    pub proposal: CostEstimate,
}

/// 연산 하나의 L1/L2 비용 비교
#[derive(Debug, Clone, PartialEq)]
pub struct LayerCostBar {
    pub operation: String,
    pub ethereum: CostEstimate,
    pub polygon: CostEstimate,
    pub savings_pct: f64,
}

/// Figure 1 데이터
#[derive(Debug, Clone, PartialEq)]
pub struct CostComparisonData {
    pub daos: Vec<DaoCostBar>,
    pub layers: Vec<LayerCostBar>,
    pub verification_lines: Vec<String>,
    pub subtitle: String,
}

impl CostComparisonData {
    pub fn build(calculator: &CostCalculator<'_>) -> Self {
        let snapshot = calculator.snapshot();

        let mut daos: Vec<DaoCostBar> = verified_dao_transactions()
            .iter()
            .map(|dao| DaoCostBar {
                name: dao.name.to_string(),
                vote: calculator.estimate(dao.vote_gas, Network::Ethereum),
                proposal: calculator.estimate(dao.proposal_gas, Network::Ethereum),
            })
            .collect();

        if let (Some(vote), Some(proposal)) = (own_operation(CAST_VOTE), own_operation(CREATE_PROPOSAL)) {
            daos.push(DaoCostBar {
                name: OWN_DAO_LABEL.to_string(),
                vote: calculator.estimate(vote.gas, Network::Ethereum),
                proposal: calculator.estimate(proposal.gas, Network::Ethereum),
            });
        }

        let layers = LAYER_OPERATIONS
            .iter()
            .filter_map(|(label, name)| {
                let op = own_operation(name)?;
                let ethereum = calculator.estimate(op.gas, Network::Ethereum);
                let polygon = calculator.estimate(op.gas, Network::Polygon);
                Some(LayerCostBar {
                    operation: label.to_string(),
                    savings_pct: savings_percentage(ethereum.cost_usd, polygon.cost_usd),
                    ethereum,
                    polygon,
                })
            })
            .collect();

        let verification_lines = vec![
            "Verification Sources:".to_string(),
            "• Etherscan.io transaction analysis".to_string(),
            format!("• Gas prices: {}", snapshot.timestamp.format(TIMESTAMP_MINUTES)),
            format!("• ETH: ${:.0}", snapshot.eth_price_usd),
        ];

        let subtitle = format!(
            "Data Sources: Etherscan, Polygonscan, CoinGecko | Analysis Date: {}",
            snapshot.timestamp.format(DATE_ONLY)
        );

        Self {
            daos,
            layers,
            verification_lines,
            subtitle,
        }
    }
}

/// Figure 1: DAO 비용 비교 + L1/L2 비교
pub fn render_cost_comparison(data: &CostComparisonData, config: &FigureConfig) -> AnalysisResult<PathBuf> {
    info!("📊 Generating Figure 1: Real DAO Cost Comparison...");
    ensure_fonts()?;

    let path = config.cost_comparison_path();
    let canvas = Canvas::from_config(config);

    {
        let root = BitMapBackend::new(&path, (canvas.width, canvas.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let body = draw_header(
            &root,
            &canvas,
            "PnR DAO Cost Analysis: Blockchain-Verified Performance",
            &data.subtitle,
        )?;
        let (left, right) = body.split_horizontally(canvas.width / 2);

        draw_dao_panel(&root, &left, &canvas, data)?;
        draw_layer_panel(&root, &right, &canvas, data)?;

        root.present().map_err(render_err)?;
    }
    info!("✓ Figure 1 saved: {}", path.display());
    Ok(path)
}

/// 왼쪽 패널: 투표/제안 비용 (로그 축, 95% CI 에러바)
fn draw_dao_panel(
    root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    canvas: &Canvas,
    data: &CostComparisonData,
) -> AnalysisResult<()> {
    let names: Vec<String> = data.daos.iter().map(|d| d.name.clone()).collect();
    let n = names.len();

    let (y_min, y_max) = log_bounds(
        data.daos
            .iter()
            .flat_map(|d| [d.vote.lower_bound, d.vote.upper_bound, d.proposal.lower_bound, d.proposal.upper_bound]),
        3.0,
    );

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Real DAO Transaction Costs Comparison (Verified Blockchain Data with 95% CI)",
            canvas.font(12.0),
        )
        .margin(canvas.px(12.0))
        .x_label_area_size(canvas.px(52.0))
        .y_label_area_size(canvas.px(48.0))
        .build_cartesian_2d(
            -0.5f64..n as f64 - 0.5,
            (y_min..y_max).log_scale(),
        )
        .map_err(render_err)?;

    let y_fmt = |y: &f64| format_usd_tick(*y);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(BLACK.mix(0.3).stroke_width(1))
        .light_line_style(BLACK.mix(0.08).stroke_width(1))
        .x_labels(0)
        .y_label_formatter(&y_fmt)
        .y_label_style(canvas.font(10.0))
        .y_desc("Cost (USD)")
        .axis_desc_style(canvas.bold(11.0))
        .draw()
        .map_err(render_err)?;

    // 이름은 단어마다 줄바꿈
    let bottom = chart.plotting_area().get_pixel_range().1.end;
    let anchors: Vec<(i32, i32)> = (0..n).map(|i| (chart.backend_coord(&(i as f64, y_min)).0, bottom)).collect();
    draw_category_labels(root, canvas, &anchors, &names, 11.0, true)?;

    let series: [(&str, RGBColor, f64, fn(&DaoCostBar) -> CostEstimate); 2] = [
        ("Vote Cost", COST_PALETTE[0], -PAIR_BAR_WIDTH / 2.0, |d: &DaoCostBar| d.vote),
        ("Proposal Cost", COST_PALETTE[1], PAIR_BAR_WIDTH / 2.0, |d: &DaoCostBar| d.proposal),
    ];

    let legend_px = canvas.px(6.0) as i32;
    let cap_px = canvas.px(8.0);
    for (label, color, offset, pick) in series {
        chart
            .draw_series(data.daos.iter().enumerate().map(|(i, d)| {
                let x = i as f64 + offset;
                let cost = pick(d).cost_usd.max(y_min);
                Rectangle::new(
                    [(x - PAIR_BAR_WIDTH / 2.0, y_min), (x + PAIR_BAR_WIDTH / 2.0, cost)],
                    color.mix(BAR_ALPHA).filled(),
                )
            }))
            .map_err(render_err)?
            .label(label)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - legend_px), (x + 2 * legend_px, y + legend_px)], color.mix(BAR_ALPHA).filled())
            });

        chart
            .draw_series(data.daos.iter().enumerate().map(|(i, d)| {
                let estimate = pick(d);
                ErrorBar::new_vertical(
                    i as f64 + offset,
                    estimate.lower_bound.max(y_min),
                    estimate.cost_usd.max(y_min),
                    estimate.upper_bound.max(y_min),
                    BLACK.stroke_width(canvas.px(1.0)),
                    cap_px,
                )
            }))
            .map_err(render_err)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(canvas.font(10.0))
        .background_style(WHITE.mix(0.8).filled())
        .border_style(BLACK.mix(0.3).stroke_width(1))
        .draw()
        .map_err(render_err)?;

    // 검증 출처 텍스트 박스 (플롯 좌상단)
    let (x_range, y_range) = chart.plotting_area().get_pixel_range();
    let pad = canvas.px(4.0) as i32;
    let line_height = canvas.px(12.0) as i32;
    let box_left = x_range.start + pad;
    let box_top = y_range.start + pad;
    let box_width = canvas.px(190.0) as i32;
    let box_height = line_height * data.verification_lines.len() as i32 + pad * 2;

    root.draw(&Rectangle::new(
        [(box_left, box_top), (box_left + box_width, box_top + box_height)],
        LIGHT_BLUE.mix(0.7).filled(),
    ))
    .map_err(render_err)?;

    let text_style = TextStyle::from(canvas.font(9.0)).pos(Pos::new(HPos::Left, VPos::Top));
    for (i, line) in data.verification_lines.iter().enumerate() {
        root.draw_text(line, &text_style, (box_left + pad, box_top + pad + line_height * i as i32))
            .map_err(render_err)?;
    }

    Ok(())
}

/// 오른쪽 패널: L1 vs L2 비용과 절감률
fn draw_layer_panel(
    root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    canvas: &Canvas,
    data: &CostComparisonData,
) -> AnalysisResult<()> {
    let names: Vec<String> = data.layers.iter().map(|l| l.operation.clone()).collect();
    let n = names.len();

    let (y_min, y_max) = log_bounds(
        data.layers
            .iter()
            .flat_map(|l| [l.ethereum.cost_usd, l.polygon.cost_usd, l.ethereum.cost_usd.max(l.polygon.cost_usd) * 2.5]),
        1.0,
    );

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Layer 1 vs Layer 2 Cost Analysis (Real-time Network Conditions)",
            canvas.font(12.0),
        )
        .margin(canvas.px(12.0))
        .x_label_area_size(canvas.px(40.0))
        .y_label_area_size(canvas.px(48.0))
        .build_cartesian_2d(
            -0.5f64..n as f64 - 0.5,
            (y_min..y_max).log_scale(),
        )
        .map_err(render_err)?;

    let y_fmt = |y: &f64| format_usd_tick(*y);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(BLACK.mix(0.3).stroke_width(1))
        .light_line_style(BLACK.mix(0.08).stroke_width(1))
        .x_labels(0)
        .y_label_formatter(&y_fmt)
        .y_label_style(canvas.font(10.0))
        .y_desc("Cost (USD)")
        .axis_desc_style(canvas.bold(11.0))
        .draw()
        .map_err(render_err)?;

    // 비트맵 텍스트는 직각 회전만 가능해서 기울이는 대신 줄바꿈
    let bottom = chart.plotting_area().get_pixel_range().1.end;
    let anchors: Vec<(i32, i32)> = (0..n).map(|i| (chart.backend_coord(&(i as f64, y_min)).0, bottom)).collect();
    draw_category_labels(root, canvas, &anchors, &names, 10.0, true)?;

    let series: [(Network, RGBColor, f64); 2] = [
        (Network::Ethereum, COST_PALETTE[2], -PAIR_BAR_WIDTH / 2.0),
        (Network::Polygon, COST_PALETTE[3], PAIR_BAR_WIDTH / 2.0),
    ];

    let legend_px = canvas.px(6.0) as i32;
    for (network, color, offset) in series {
        chart
            .draw_series(data.layers.iter().enumerate().map(|(i, l)| {
                let x = i as f64 + offset;
                let cost = match network {
                    Network::Ethereum => l.ethereum.cost_usd,
                    Network::Polygon => l.polygon.cost_usd,
                };
                Rectangle::new(
                    [(x - PAIR_BAR_WIDTH / 2.0, y_min), (x + PAIR_BAR_WIDTH / 2.0, cost.max(y_min))],
                    color.mix(BAR_ALPHA).filled(),
                )
            }))
            .map_err(render_err)?
            .label(network.layer_label())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - legend_px), (x + 2 * legend_px, y + legend_px)], color.mix(BAR_ALPHA).filled())
            });
    }

    let annotation = TextStyle::from(canvas.bold(10.0))
        .color(&ANNOTATION_GREEN)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    let line_gap = canvas.px(12.0) as i32;
    chart
        .draw_series(data.layers.iter().enumerate().filter(|(_, l)| l.savings_pct > 0.0).map(|(i, l)| {
            let y = l.ethereum.cost_usd.max(l.polygon.cost_usd) * 1.5;
            EmptyElement::at((i as f64, y))
                + Text::new(format!("{:.0}%", l.savings_pct), (0, 0), annotation.clone())
                + Text::new("savings".to_string(), (0, line_gap), annotation.clone())
        }))
        .map_err(render_err)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(canvas.font(10.0))
        .background_style(WHITE.mix(0.8).filled())
        .border_style(BLACK.mix(0.3).stroke_width(1))
        .draw()
        .map_err(render_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::types::NetworkSnapshot;

    fn snapshot() -> NetworkSnapshot {
        NetworkSnapshot::fallback(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap())
    }

    #[test]
    fn test_build_dao_rows() {
        let snapshot = snapshot();
        let calculator = CostCalculator::new(&snapshot);
        let data = CostComparisonData::build(&calculator);

        let names: Vec<_> = data.daos.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Compound DAO", "Uniswap DAO", "Aragon DAO", "PnR DAO (Ours)"]);

        let ours = &data.daos[3];
        assert_eq!(ours.vote, calculator.estimate(31_000, Network::Ethereum));
        assert_eq!(ours.proposal, calculator.estimate(161_000, Network::Ethereum));
        assert!(ours.vote.cost_usd < data.daos[0].vote.cost_usd);
    }

    #[test]
    fn test_build_layer_rows() {
        let snapshot = snapshot();
        let calculator = CostCalculator::new(&snapshot);
        let data = CostComparisonData::build(&calculator);

        let ops: Vec<_> = data.layers.iter().map(|l| l.operation.as_str()).collect();
        assert_eq!(ops, vec!["Join DAO", "Cast Vote", "Create Proposal", "Private Deal"]);

        let private_deal = &data.layers[3];
        assert_eq!(private_deal.ethereum, calculator.estimate(185_000, Network::Ethereum));

        // 25 gwei vs 1.5 gwei → 94% 절감
        for layer in &data.layers {
            assert!((layer.savings_pct - 94.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_verification_text() {
        let snapshot = snapshot();
        let data = CostComparisonData::build(&CostCalculator::new(&snapshot));

        assert_eq!(data.verification_lines[2], "• Gas prices: 2024-03-01 09:30");
        assert_eq!(data.verification_lines[3], "• ETH: $3500");
        assert!(data.subtitle.ends_with("Analysis Date: 2024-03-01"));
    }

    #[test]
    fn test_render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let config = FigureConfig {
            output_dir: dir.path().to_path_buf(),
            width_in: 16.0,
            height_in: 8.0,
            dpi: 50,
        };

        let snapshot = snapshot();
        let data = CostComparisonData::build(&CostCalculator::new(&snapshot));
        let path = render_cost_comparison(&data, &config).unwrap();

        assert_eq!(path, dir.path().join("figure1_pnr_cost_analysis.png"));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
