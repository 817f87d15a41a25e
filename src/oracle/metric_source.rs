use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::constants::TIMESTAMP_MINUTES;
use crate::types::Metric;

/// 단일 소스 조회 실패 원인
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("API reported failure (status={status}, message={message})")]
    Unsuccessful { status: String, message: String },

    #[error("missing field '{0}' in response")]
    MissingField(&'static str),

    #[error("invalid numeric value '{0}'")]
    InvalidNumber(String),
}

/// 소스에서 읽어온 지표 값
#[derive(Debug, Clone, PartialEq)]
pub struct MetricReading {
    pub metric: Metric,
    pub value: f64,
    /// 스냅샷에 기록되는 출처 설명 (예: "Etherscan.io API - 2024-01-01 12:00")
    pub provenance: String,
    /// 로그용 짧은 소스 이름
    pub verified_by: &'static str,
}

/// 네트워크 지표 소스 트레이트
///
/// 하나의 엔드포인트와 그 응답 형식에 맞는 파서를 묶는다.
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// 이 소스가 제공하는 지표
    fn metric(&self) -> Metric;

    /// 조회할 URL
    fn endpoint(&self) -> &str;

    /// 출처 라벨 (타임스탬프 앞부분)
    fn label(&self) -> &'static str;

    /// 로그에 표시되는 검증 소스 이름
    fn verified_by(&self) -> &'static str;

    /// 응답 본문에서 값을 추출
    fn parse(&self, body: Value) -> Result<f64, FetchError>;

    /// 요청 한 번 보내고 파싱. 재시도 없음.
    async fn fetch(&self, client: &Client, timestamp: &DateTime<Utc>) -> Result<MetricReading, FetchError> {
        debug!("🔄 Requesting {} from {}", self.metric(), self.endpoint());

        let response = client.get(self.endpoint()).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;
        let value = self.parse(body)?;

        Ok(MetricReading {
            metric: self.metric(),
            value,
            provenance: format!("{} - {}", self.label(), timestamp.format(TIMESTAMP_MINUTES)),
            verified_by: self.verified_by(),
        })
    }
}

/// 숫자 또는 숫자 문자열을 f64로 변환 (Etherscan은 가격을 문자열로 준다)
pub(crate) fn lenient_f64(value: Option<&Value>, field: &'static str) -> Result<f64, FetchError> {
    let parsed = match value {
        None | Some(Value::Null) => return Err(FetchError::MissingField(field)),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| FetchError::InvalidNumber(n.to_string()))?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| FetchError::InvalidNumber(s.clone()))?,
        Some(other) => return Err(FetchError::InvalidNumber(other.to_string())),
    };

    if !parsed.is_finite() {
        return Err(FetchError::InvalidNumber(parsed.to_string()));
    }

    Ok(parsed)
}
