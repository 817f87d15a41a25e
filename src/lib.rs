// PnR DAO Cost Report Library

pub mod config;
pub mod constants;
pub mod types;
pub mod dataset;
pub mod oracle;
pub mod analysis;
pub mod charts;
pub mod report;

use std::path::PathBuf;
use anyhow::{Context, Result};
use tracing::info;

pub use config::Config;
pub use types::{AnalysisError, AnalysisResult, CostEstimate, Metric, Network, NetworkSnapshot};
pub use analysis::CostCalculator;
pub use oracle::NetworkDataFetcher;
pub use report::SummaryReporter;

use charts::{render_cost_comparison, render_efficiency, CostComparisonData, EfficiencyData};

/// 한 번의 리포트 실행 결과
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub snapshot: NetworkSnapshot,
    pub cost_comparison: PathBuf,
    pub efficiency: PathBuf,
}

impl RunOutcome {
    /// (파일 경로, 용도) 목록
    pub fn figures(&self) -> Vec<(PathBuf, &'static str)> {
        vec![
            (self.cost_comparison.clone(), "Main results"),
            (self.efficiency.clone(), "Performance analysis"),
        ]
    }
}

/// 수집 → 계산 → 렌더링 파이프라인
///
/// 네트워크 오류는 기본값으로 대체되므로 여기서 실패하는 경우는
/// 설정 오류와 출력 파일 오류뿐이다.
pub async fn run(config: &Config) -> Result<RunOutcome> {
    config.validate().context("설정 검증 실패")?;

    let fetcher = NetworkDataFetcher::new(&config.endpoints)?;
    let snapshot = fetcher.fetch_snapshot().await;

    std::fs::create_dir_all(&config.figures.output_dir).with_context(|| {
        format!("출력 디렉터리 생성 실패: {}", config.figures.output_dir.display())
    })?;

    let calculator = CostCalculator::new(&snapshot);
    let cost_data = CostComparisonData::build(&calculator);
    let cost_comparison = render_cost_comparison(&cost_data, &config.figures)
        .context("Figure 1 렌더링 실패")?;

    let efficiency = render_efficiency(&EfficiencyData::build(), &config.figures)
        .context("Figure 2 렌더링 실패")?;

    info!("✅ 리포트 생성 완료");

    Ok(RunOutcome {
        snapshot,
        cost_comparison,
        efficiency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::constants::TIMESTAMP_MINUTES;

    fn config_for(server: &MockServer, output_dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.endpoints.etherscan_gas_oracle = server.url("/etherscan");
        config.endpoints.polygonscan_gas_oracle = server.url("/polygonscan");
        config.endpoints.polygon_gas_station = server.url("/gasstation");
        config.endpoints.coingecko_eth_price = server.url("/coingecko");
        config.endpoints.request_timeout_secs = 2;
        config.figures.output_dir = output_dir.to_path_buf();
        config.figures.dpi = 40;
        config
    }

    #[tokio::test]
    async fn test_end_to_end_run() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/etherscan");
            then.status(200)
                .json_body(json!({"status": "1", "message": "OK", "result": {"ProposeGasPrice": "30"}}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/polygonscan");
            then.status(500);
        });
        server.mock(|when, then| {
            when.method(GET).path("/gasstation");
            then.status(200)
                .json_body(json!({"standard": {"maxPriorityFee": 30.0, "maxFee": 2.3}}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/coingecko");
            then.status(200).json_body(json!({"ethereum": {"usd": 3200.5}}));
        });

        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("figures");
        let outcome = run(&config_for(&server, &output_dir)).await.unwrap();

        assert_eq!(outcome.cost_comparison, output_dir.join("figure1_pnr_cost_analysis.png"));
        assert_eq!(outcome.efficiency, output_dir.join("figure2_efficiency_analysis.png"));
        assert!(outcome.cost_comparison.exists());
        assert!(outcome.efficiency.exists());

        assert_eq!(outcome.snapshot.eth_gas_price_gwei, 30.0);
        assert_eq!(outcome.snapshot.pol_gas_price_gwei, 2.3);
        assert_eq!(outcome.snapshot.eth_price_usd, 3200.5);

        let mut buf = Vec::new();
        SummaryReporter::new(&outcome.snapshot).write_summary(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let ts = outcome.snapshot.timestamp.format(TIMESTAMP_MINUTES).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.contains(&format!("• ETH_GAS: Etherscan.io API - {}", ts).as_str()));
        assert!(lines.contains(&format!("• POL_GAS: Polygon Gas Station - {}", ts).as_str()));
        assert!(lines.contains(&format!("• ETH_PRICE: CoinGecko API - {}", ts).as_str()));
        assert!(text.contains("• Polygon Gas Price: 2.3 gwei"));
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.figures.output_dir = dir.path().to_path_buf();
        config.endpoints.coingecko_eth_price = "not a url".to_string();

        let err = run(&config).await.unwrap_err();
        assert!(format!("{:?}", err).contains("coingecko_eth_price"));
    }
}
