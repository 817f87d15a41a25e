use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dao_cost_report::{run, Config, SummaryReporter};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    print_banner();

    let config = Config::default();
    info!("📁 출력 디렉터리: {}", config.figures.output_dir.display());

    let outcome = match run(&config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("❌ 분석 실패: {:?}", e);
            eprintln!("Error during analysis: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = SummaryReporter::new(&outcome.snapshot).print(&outcome.figures()) {
        error!("❌ 리포트 출력 실패: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn print_banner() {
    println!(r#"
    ╔══════════════════════════════════════════════════════════════╗
    ║                                                              ║
    ║  📊 PnR DAO Cost Report                                      ║
    ║                                                              ║
    ║  Initializing Scientific PnR DAO Analysis...                 ║
    ║  Focus: Publication-quality figures with verifiable data     ║
    ║                                                              ║
    ║  • Etherscan / Polygonscan / Gas Station / CoinGecko         ║
    ║  • 95% 신뢰구간 비용 모델                                    ║
    ║  • Figure 1: DAO 비용 비교, Figure 2: 효율 분석              ║
    ║                                                              ║
    ╚══════════════════════════════════════════════════════════════╝
    "#);
}
