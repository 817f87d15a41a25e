use std::collections::HashMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::metric_source::{FetchError, MetricSource};
use crate::types::Metric;

const COIN_ID: &str = "ethereum";
const VS_CURRENCY: &str = "usd";

/// CoinGecko simple/price 응답: `{"ethereum": {"usd": 3512.4}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CoinGeckoPriceResponse {
    #[serde(flatten)]
    prices: HashMap<String, HashMap<String, f64>>,
}

impl CoinGeckoPriceResponse {
    fn get_price(&self, id: &str, currency: &str) -> Option<f64> {
        self.prices.get(id).and_then(|price| price.get(currency)).copied()
    }
}

/// CoinGecko ETH/USD 가격 소스
pub struct CoinGeckoSource {
    endpoint: String,
}

impl CoinGeckoSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }
}

#[async_trait]
impl MetricSource for CoinGeckoSource {
    fn metric(&self) -> Metric {
        Metric::EthPrice
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn label(&self) -> &'static str {
        "CoinGecko API"
    }

    fn verified_by(&self) -> &'static str {
        "CoinGecko"
    }

    fn parse(&self, body: Value) -> Result<f64, FetchError> {
        let response: CoinGeckoPriceResponse = serde_json::from_value(body)?;
        response
            .get_price(COIN_ID, VS_CURRENCY)
            .ok_or(FetchError::MissingField("ethereum.usd"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_eth_price() {
        let source = CoinGeckoSource::new("http://localhost/api/v3/simple/price");
        assert_eq!(source.parse(json!({ "ethereum": { "usd": 3012.55 } })).unwrap(), 3012.55);
    }

    #[test]
    fn test_parse_missing_currency() {
        let source = CoinGeckoSource::new("http://localhost/api/v3/simple/price");
        assert!(matches!(
            source.parse(json!({ "ethereum": { "eur": 2800.0 } })),
            Err(FetchError::MissingField(_))
        ));
        assert!(source.parse(json!({ "status": { "error_code": 429 } })).is_err());
    }
}
