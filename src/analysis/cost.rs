use crate::constants::{CONFIDENCE_LEVEL, GWEI_TO_NATIVE, Z_SCORE_95};
use crate::types::{AnalysisResult, CostEstimate, Network, NetworkSnapshot};

/// 가스 → 비용 계산기
///
/// 스냅샷을 빌려 읽기만 한다. 같은 스냅샷과 입력이면 결과는 항상 같다.
#[derive(Debug, Clone, Copy)]
pub struct CostCalculator<'a> {
    snapshot: &'a NetworkSnapshot,
}

impl<'a> CostCalculator<'a> {
    pub fn new(snapshot: &'a NetworkSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &NetworkSnapshot {
        self.snapshot
    }

    /// 비용과 95% 신뢰구간 계산
    ///
    /// 하한은 클램핑하지 않는다. 변동성 모델상 음수가 나올 수 있다.
    pub fn estimate(&self, gas_amount: u64, network: Network) -> CostEstimate {
        let gas_price = self.snapshot.gas_price_gwei(network);

        let cost_native = gas_amount as f64 * gas_price * GWEI_TO_NATIVE;
        let cost_usd = cost_native * self.snapshot.eth_price_usd;

        let margin_of_error = Z_SCORE_95 * network.volatility() * cost_usd;

        CostEstimate {
            cost_usd,
            cost_native,
            lower_bound: cost_usd - margin_of_error,
            upper_bound: cost_usd + margin_of_error,
            margin_of_error,
            confidence_level: CONFIDENCE_LEVEL,
        }
    }

    /// 문자열 네트워크 선택자 버전. 알 수 없는 선택자는 `InvalidArgument`.
    pub fn estimate_for(&self, gas_amount: u64, network: &str) -> AnalysisResult<CostEstimate> {
        let network: Network = network.parse()?;
        Ok(self.estimate(gas_amount, network))
    }
}

/// L1 대비 L2 절감률 (%). L1 비용이 0 이하면 0.
pub fn savings_percentage(eth_cost: f64, pol_cost: f64) -> f64 {
    if eth_cost > 0.0 {
        (eth_cost - pol_cost) / eth_cost * 100.0
    } else {
        0.0
    }
}
