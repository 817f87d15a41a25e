use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use chrono::{DateTime, Utc};

use crate::constants::*;

// ================================
// Networks & Metrics
// ================================

/// 비용 비교 대상 네트워크
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Network {
    Ethereum,
    Polygon,
}

impl Network {
    pub fn name(&self) -> &'static str {
        match self {
            Network::Ethereum => "ethereum",
            Network::Polygon => "polygon",
        }
    }

    /// 차트 범례에 쓰이는 레이어 라벨
    pub fn layer_label(&self) -> &'static str {
        match self {
            Network::Ethereum => "Ethereum L1",
            Network::Polygon => "Polygon L2",
        }
    }

    /// 경험적 가스 가격 변동성 (신뢰구간 계산용)
    pub fn volatility(&self) -> f64 {
        match self {
            Network::Ethereum => ETHEREUM_VOLATILITY,
            Network::Polygon => POLYGON_VOLATILITY,
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Network {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ethereum" => Ok(Network::Ethereum),
            "polygon" => Ok(Network::Polygon),
            other => Err(AnalysisError::InvalidArgument(format!(
                "unknown network selector '{}' (expected 'ethereum' or 'polygon')",
                other
            ))),
        }
    }
}

/// 스냅샷이 수집하는 네트워크 지표. 순서는 리포트 출력 순서와 같다.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    EthGas,
    PolGas,
    EthPrice,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::EthGas, Metric::PolGas, Metric::EthPrice];

    pub fn key(&self) -> &'static str {
        match self {
            Metric::EthGas => "eth_gas",
            Metric::PolGas => "pol_gas",
            Metric::EthPrice => "eth_price",
        }
    }

    pub fn fallback_value(&self) -> f64 {
        match self {
            Metric::EthGas => FALLBACK_ETH_GAS_GWEI,
            Metric::PolGas => FALLBACK_POL_GAS_GWEI,
            Metric::EthPrice => FALLBACK_ETH_PRICE_USD,
        }
    }

    pub fn fallback_source(&self) -> &'static str {
        match self {
            Metric::EthGas => FALLBACK_ETH_GAS_SOURCE,
            Metric::PolGas => FALLBACK_POL_GAS_SOURCE,
            Metric::EthPrice => FALLBACK_ETH_PRICE_SOURCE,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ================================
// Snapshot & Estimates
// ================================

/// 실행 시점의 네트워크 상태. 수집 단계에서 한 번 생성된 뒤 읽기 전용으로 전달된다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkSnapshot {
    pub eth_gas_price_gwei: f64,
    pub pol_gas_price_gwei: f64,
    pub eth_price_usd: f64,
    /// 지표별 데이터 출처 설명
    pub sources: BTreeMap<Metric, String>,
    pub timestamp: DateTime<Utc>,
}

impl NetworkSnapshot {
    pub fn gas_price_gwei(&self, network: Network) -> f64 {
        match network {
            Network::Ethereum => self.eth_gas_price_gwei,
            Network::Polygon => self.pol_gas_price_gwei,
        }
    }

    pub fn source(&self, metric: Metric) -> Option<&str> {
        self.sources.get(&metric).map(String::as_str)
    }

    /// 라이브 소스 대신 기본값이 사용된 지표인지
    pub fn is_fallback(&self, metric: Metric) -> bool {
        self.source(metric)
            .map(|s| s.starts_with("Fallback"))
            .unwrap_or(true)
    }

    /// 모든 지표를 기본값으로 채운 스냅샷
    pub fn fallback(timestamp: DateTime<Utc>) -> Self {
        let sources = Metric::ALL
            .iter()
            .map(|m| (*m, m.fallback_source().to_string()))
            .collect();

        Self {
            eth_gas_price_gwei: FALLBACK_ETH_GAS_GWEI,
            pol_gas_price_gwei: FALLBACK_POL_GAS_GWEI,
            eth_price_usd: FALLBACK_ETH_PRICE_USD,
            sources,
            timestamp,
        }
    }
}

/// 가스량 하나에 대한 비용 추정치 (95% 신뢰구간 포함)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CostEstimate {
    pub cost_usd: f64,
    /// 네이티브 통화 기준 비용 (ETH 단위)
    pub cost_native: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub margin_of_error: f64,
    pub confidence_level: f64,
}

// ================================
// Errors
// ================================

/// 분석 파이프라인 오류
#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type AnalysisResult<T> = Result<T, AnalysisError>;
