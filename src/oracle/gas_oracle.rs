use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::metric_source::{lenient_f64, FetchError, MetricSource};
use crate::types::Metric;

/// Etherscan 계열 gastracker 응답
///
/// `{"status":"1","message":"OK","result":{"ProposeGasPrice":"25", ...}}`
#[derive(Debug, Deserialize)]
struct GasOracleResponse {
    #[serde(default)]
    status: Value,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: Value,
}

/// Etherscan / Polygonscan gastracker 소스
pub struct GasOracleSource {
    metric: Metric,
    endpoint: String,
    label: &'static str,
    verified_by: &'static str,
}

impl GasOracleSource {
    /// Ethereum 가스 가격 (Etherscan)
    pub fn etherscan(endpoint: impl Into<String>) -> Self {
        Self {
            metric: Metric::EthGas,
            endpoint: endpoint.into(),
            label: "Etherscan.io API",
            verified_by: "Etherscan",
        }
    }

    /// Polygon 가스 가격 (Polygonscan)
    pub fn polygonscan(endpoint: impl Into<String>) -> Self {
        Self {
            metric: Metric::PolGas,
            endpoint: endpoint.into(),
            label: "Polygonscan.com API",
            verified_by: "Polygonscan",
        }
    }
}

#[async_trait]
impl MetricSource for GasOracleSource {
    fn metric(&self) -> Metric {
        self.metric
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn label(&self) -> &'static str {
        self.label
    }

    fn verified_by(&self) -> &'static str {
        self.verified_by
    }

    fn parse(&self, body: Value) -> Result<f64, FetchError> {
        let response: GasOracleResponse = serde_json::from_value(body)?;

        if response.status.as_str() != Some("1") {
            return Err(FetchError::Unsuccessful {
                status: response.status.to_string(),
                message: response.message,
            });
        }

        lenient_f64(response.result.get("ProposeGasPrice"), "result.ProposeGasPrice")
    }
}
