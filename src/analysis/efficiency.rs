use crate::constants::{BASE_TX_GAS, BATCH_OVERHEAD_FACTOR, MAX_BATCH_SIZE};
use crate::dataset::{own_operation, CREATE_PRIVATE_DEAL};

/// ERC-1155 배치 가스 모델 (서브리니어 스케일링)
///
/// `base + (individual - base) * (1 + 0.1 * (n - 1))`
pub fn batch_gas(batch_size: u32, individual_gas: f64, base_tx_gas: f64) -> f64 {
    let extra = batch_size.saturating_sub(1) as f64;
    base_tx_gas + (individual_gas - base_tx_gas) * (1.0 + BATCH_OVERHEAD_FACTOR * extra)
}

/// 개별 실행 대비 배치 실행의 가스 절감률 (%)
pub fn batch_efficiency(batch_size: u32, individual_gas: f64, base_tx_gas: f64) -> f64 {
    let individual_total = individual_gas * batch_size as f64;
    if individual_total <= 0.0 {
        return 0.0;
    }
    (individual_total - batch_gas(batch_size, individual_gas, base_tx_gas)) / individual_total * 100.0
}

/// 배치 효율 곡선의 한 점
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchPoint {
    pub batch_size: u32,
    pub batch_gas: f64,
    pub efficiency_pct: f64,
}

/// n = 1..=10 배치 효율 곡선 (개별 Private Deal 가스 기준)
pub fn batch_efficiency_curve() -> Vec<BatchPoint> {
    let individual_gas = own_operation(CREATE_PRIVATE_DEAL)
        .map(|op| op.gas as f64)
        .unwrap_or(185_000.0);

    (1..=MAX_BATCH_SIZE)
        .map(|n| BatchPoint {
            batch_size: n,
            batch_gas: batch_gas(n, individual_gas, BASE_TX_GAS),
            efficiency_pct: batch_efficiency(n, individual_gas, BASE_TX_GAS),
        })
        .collect()
}

/// 정규화된 성능 점수 비교 (고정 발표 상수)
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceComparison {
    pub metrics: [&'static str; 4],
    pub traditional: [f64; 4],
    pub layer2: [f64; 4],
    pub pnr: [f64; 4],
}

pub const TRADITIONAL_DAO_LABEL: &str = "Traditional DAO";
pub const LAYER2_DAO_LABEL: &str = "Layer 2 DAO";
pub const PNR_DAO_LABEL: &str = "PnR DAO (Ours)";

impl PerformanceComparison {
    pub fn fixed() -> Self {
        Self {
            metrics: ["Cost Reduction", "Gas Efficiency", "Sybil Resistance", "Privacy Score"],
            traditional: [35.0, 25.0, 60.0, 30.0],
            layer2: [94.0, 45.0, 75.0, 50.0],
            pnr: [97.0, 68.0, 98.0, 85.0],
        }
    }

    /// 앞의 두 카테고리 중 더 좋은 쪽 대비 개선율 (%)
    pub fn improvements(&self) -> [f64; 4] {
        let mut out = [0.0; 4];
        for (i, slot) in out.iter_mut().enumerate() {
            let best = self.traditional[i].max(self.layer2[i]);
            *slot = if best > 0.0 { (self.pnr[i] - best) / best * 100.0 } else { 0.0 };
        }
        out
    }
}
