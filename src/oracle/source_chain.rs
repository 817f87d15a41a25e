use std::sync::Arc;
use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{debug, warn};

use super::metric_source::{MetricReading, MetricSource};
use crate::types::Metric;

/// 우선순위가 붙은 소스
#[derive(Clone)]
pub struct SourceEntry {
    pub source: Arc<dyn MetricSource>,
    pub priority: u8, // 낮을수록 먼저 시도
}

/// 한 지표에 대한 순서 있는 폴백 체인
///
/// 소스를 우선순위 순서로 한 번씩 시도하고 첫 번째 성공 값을 돌려준다.
/// 모두 실패하면 `None`이며 기본값 대체는 호출자 몫이다.
#[derive(Clone)]
pub struct SourceChain {
    metric: Metric,
    entries: Vec<SourceEntry>,
}

impl SourceChain {
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            entries: Vec::new(),
        }
    }

    /// 소스 추가
    pub fn add_source(&mut self, source: Arc<dyn MetricSource>, priority: u8) {
        debug_assert_eq!(source.metric(), self.metric);
        self.entries.push(SourceEntry { source, priority });

        // 우선순위로 정렬 (안정 정렬이라 같은 우선순위는 추가 순서 유지)
        self.entries.sort_by_key(|e| e.priority);
    }

    /// 현재 가장 낮은 우선순위 뒤에 추가
    pub fn with_source(mut self, source: impl MetricSource + 'static) -> Self {
        let priority = self
            .entries
            .last()
            .map(|e| e.priority.saturating_add(1))
            .unwrap_or(0);
        self.add_source(Arc::new(source), priority);
        self
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 첫 번째 성공한 읽기 결과
    pub async fn first_success(&self, client: &Client, timestamp: &DateTime<Utc>) -> Option<MetricReading> {
        for entry in &self.entries {
            match entry.source.fetch(client, timestamp).await {
                Ok(reading) => return Some(reading),
                Err(e) => {
                    warn!("⚠ {} API error ({}): {}", entry.source.verified_by(), self.metric, e);
                }
            }
        }

        debug!("No live source available for {}", self.metric);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::oracle::FetchError;

    struct StubSource {
        name: &'static str,
        value: Option<f64>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MetricSource for StubSource {
        fn metric(&self) -> Metric {
            Metric::PolGas
        }

        fn endpoint(&self) -> &str {
            "http://stub.invalid"
        }

        fn label(&self) -> &'static str {
            self.name
        }

        fn verified_by(&self) -> &'static str {
            self.name
        }

        fn parse(&self, _body: Value) -> Result<f64, FetchError> {
            self.value.ok_or(FetchError::MissingField("value"))
        }

        async fn fetch(&self, _client: &Client, _timestamp: &DateTime<Utc>) -> Result<MetricReading, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let value = self.parse(Value::Null)?;
            Ok(MetricReading {
                metric: self.metric(),
                value,
                provenance: self.name.to_string(),
                verified_by: self.name,
            })
        }
    }

    fn stub(name: &'static str, value: Option<f64>) -> (StubSource, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (StubSource { name, value, calls: calls.clone() }, calls)
    }

    #[tokio::test]
    async fn test_first_success_in_priority_order() {
        let (failing, failing_calls) = stub("primary", None);
        let (working, working_calls) = stub("secondary", Some(2.3));
        let (unused, unused_calls) = stub("tertiary", Some(9.9));

        let mut chain = SourceChain::new(Metric::PolGas);
        chain.add_source(Arc::new(unused), 5);
        chain.add_source(Arc::new(working), 1);
        chain.add_source(Arc::new(failing), 0);
        assert_eq!(chain.len(), 3);

        let reading = chain.first_success(&Client::new(), &Utc::now()).await.unwrap();

        assert_eq!(reading.value, 2.3);
        assert_eq!(reading.provenance, "secondary");
        assert_eq!(failing_calls.load(Ordering::SeqCst), 1);
        assert_eq!(working_calls.load(Ordering::SeqCst), 1);
        assert_eq!(unused_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_with_source_goes_after_explicit_priorities() {
        let (explicit, explicit_calls) = stub("explicit", Some(1.0));
        let (appended, appended_calls) = stub("appended", Some(2.0));

        let mut chain = SourceChain::new(Metric::PolGas);
        chain.add_source(Arc::new(explicit), 7);
        let chain = chain.with_source(appended);

        let reading = chain.first_success(&Client::new(), &Utc::now()).await.unwrap();

        assert_eq!(reading.provenance, "explicit");
        assert_eq!(explicit_calls.load(Ordering::SeqCst), 1);
        assert_eq!(appended_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_all_failed_is_none() {
        let (a, _) = stub("a", None);
        let (b, b_calls) = stub("b", None);
        let chain = SourceChain::new(Metric::PolGas).with_source(a).with_source(b);

        assert!(chain.first_success(&Client::new(), &Utc::now()).await.is_none());
        assert_eq!(b_calls.load(Ordering::SeqCst), 1);
        assert!(SourceChain::new(Metric::EthGas).is_empty());
    }
}
