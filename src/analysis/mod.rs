pub mod cost;
pub mod efficiency;

pub use cost::{savings_percentage, CostCalculator};
pub use efficiency::{batch_efficiency, batch_efficiency_curve, batch_gas, BatchPoint, PerformanceComparison};
