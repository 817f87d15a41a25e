use std::collections::BTreeMap;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{info, warn};

use super::coingecko::CoinGeckoSource;
use super::gas_oracle::GasOracleSource;
use super::gas_station::GasStationSource;
use super::metric_source::MetricReading;
use super::source_chain::SourceChain;
use crate::config::EndpointConfig;
use crate::types::{Metric, NetworkSnapshot};

/// 네트워크 데이터 수집기
///
/// 지표마다 독립된 소스 체인을 순서대로 조회한다. 한 지표의 실패는 다른
/// 지표에 영향을 주지 않으며, 값이 없으면 기본값과 "Fallback" 출처를 기록한다.
pub struct NetworkDataFetcher {
    client: Client,
    chains: Vec<SourceChain>,
}

impl NetworkDataFetcher {
    /// 설정된 엔드포인트로 수집기 생성
    pub fn new(endpoints: &EndpointConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(endpoints.request_timeout())
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        let chains = vec![
            SourceChain::new(Metric::EthGas)
                .with_source(GasOracleSource::etherscan(&endpoints.etherscan_gas_oracle)),
            SourceChain::new(Metric::PolGas)
                .with_source(GasOracleSource::polygonscan(&endpoints.polygonscan_gas_oracle))
                .with_source(GasStationSource::new(&endpoints.polygon_gas_station)),
            SourceChain::new(Metric::EthPrice)
                .with_source(CoinGeckoSource::new(&endpoints.coingecko_eth_price)),
        ];

        Ok(Self::with_chains(client, chains))
    }

    pub fn with_chains(client: Client, chains: Vec<SourceChain>) -> Self {
        Self { client, chains }
    }

    /// 모든 지표를 조회해 스냅샷 생성
    pub async fn fetch_snapshot(&self) -> NetworkSnapshot {
        info!("📡 Fetching real-time blockchain data for scientific analysis...");

        let timestamp = Utc::now();
        let mut readings: BTreeMap<Metric, MetricReading> = BTreeMap::new();

        for chain in &self.chains {
            if let Some(reading) = chain.first_success(&self.client, &timestamp).await {
                info!("✓ {} ({} verified)", describe(reading.metric, reading.value), reading.verified_by);
                readings.insert(reading.metric, reading);
            }
        }

        assemble_snapshot(readings, timestamp)
    }
}

/// 읽기 결과를 스냅샷으로 합치고 빠진 지표는 기본값으로 채운다
pub fn assemble_snapshot(
    mut readings: BTreeMap<Metric, MetricReading>,
    timestamp: DateTime<Utc>,
) -> NetworkSnapshot {
    let mut sources = BTreeMap::new();
    let mut values = BTreeMap::new();

    for metric in Metric::ALL {
        match readings.remove(&metric) {
            Some(reading) => {
                values.insert(metric, reading.value);
                sources.insert(metric, reading.provenance);
            }
            None => {
                let value = metric.fallback_value();
                warn!("⚠ Using scientific fallback - {}", describe(metric, value));
                values.insert(metric, value);
                sources.insert(metric, metric.fallback_source().to_string());
            }
        }
    }

    NetworkSnapshot {
        eth_gas_price_gwei: values[&Metric::EthGas],
        pol_gas_price_gwei: values[&Metric::PolGas],
        eth_price_usd: values[&Metric::EthPrice],
        sources,
        timestamp,
    }
}

fn describe(metric: Metric, value: f64) -> String {
    match metric {
        Metric::EthGas => format!("Ethereum gas price: {:?} gwei", value),
        Metric::PolGas => format!("Polygon gas price: {:?} gwei", value),
        Metric::EthPrice => format!("ETH price: ${:?}", value),
    }
}
