use async_trait::async_trait;
use serde_json::Value;

use super::metric_source::{lenient_f64, FetchError, MetricSource};
use crate::types::Metric;

/// Polygon Gas Station v2 소스
///
/// 응답 형식: `{"standard": {"maxPriorityFee": .., "maxFee": ..}, ...}`
pub struct GasStationSource {
    endpoint: String,
}

impl GasStationSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }
}

#[async_trait]
impl MetricSource for GasStationSource {
    fn metric(&self) -> Metric {
        Metric::PolGas
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn label(&self) -> &'static str {
        "Polygon Gas Station"
    }

    fn verified_by(&self) -> &'static str {
        "Gas Station"
    }

    fn parse(&self, body: Value) -> Result<f64, FetchError> {
        let standard = body.get("standard").ok_or(FetchError::MissingField("standard"))?;
        lenient_f64(standard.get("maxFee"), "standard.maxFee")
    }
}
