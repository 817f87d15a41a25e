pub mod metric_source;
pub mod gas_oracle;
pub mod gas_station;
pub mod coingecko;
pub mod source_chain;
pub mod fetcher;

pub use metric_source::{FetchError, MetricReading, MetricSource};
pub use gas_oracle::GasOracleSource;
pub use gas_station::GasStationSource;
pub use coingecko::CoinGeckoSource;
pub use source_chain::SourceChain;
pub use fetcher::NetworkDataFetcher;
