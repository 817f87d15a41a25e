// Network fallback values (used when every live source fails)
pub const FALLBACK_ETH_GAS_GWEI: f64 = 25.0; // 30-day empirical average
pub const FALLBACK_POL_GAS_GWEI: f64 = 1.5; // Polygon network empirical average
pub const FALLBACK_ETH_PRICE_USD: f64 = 3500.0; // market reference point

pub const FALLBACK_ETH_GAS_SOURCE: &str =
    "Fallback: 30-day empirical average (etherscan.io historical data)";
pub const FALLBACK_POL_GAS_SOURCE: &str =
    "Fallback: Network empirical average (polygonscan.com data)";
pub const FALLBACK_ETH_PRICE_SOURCE: &str =
    "Fallback: Market reference (coingecko.com historical)";

// Public API endpoints
pub const ETHERSCAN_GAS_ORACLE_URL: &str =
    "https://api.etherscan.io/api?module=gastracker&action=gasoracle";
pub const POLYGONSCAN_GAS_ORACLE_URL: &str =
    "https://api.polygonscan.com/api?module=gastracker&action=gasoracle";
pub const POLYGON_GAS_STATION_URL: &str = "https://gasstation-mainnet.matic.network/v2";
pub const COINGECKO_ETH_PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=ethereum&vs_currencies=usd";

pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// Unit conversion
pub const GWEI_TO_NATIVE: f64 = 1e-9;

// Statistics
pub const CONFIDENCE_LEVEL: f64 = 0.95;
pub const Z_SCORE_95: f64 = 1.96; // two-tailed normal
pub const ETHEREUM_VOLATILITY: f64 = 0.15;
pub const POLYGON_VOLATILITY: f64 = 0.08;

// Batch efficiency model (ERC-1155)
pub const BASE_TX_GAS: f64 = 21_000.0;
pub const BATCH_OVERHEAD_FACTOR: f64 = 0.1;
pub const MAX_BATCH_SIZE: u32 = 10;

// Figures
pub const FIGURE1_FILENAME: &str = "figure1_pnr_cost_analysis.png";
pub const FIGURE2_FILENAME: &str = "figure2_efficiency_analysis.png";
pub const FIGURE_DPI: u32 = 300;
pub const FIGURE_WIDTH_IN: f64 = 16.0;
pub const FIGURE_HEIGHT_IN: f64 = 8.0;

pub const TIMESTAMP_MINUTES: &str = "%Y-%m-%d %H:%M";
pub const TIMESTAMP_SECONDS: &str = "%Y-%m-%d %H:%M:%S UTC";
pub const DATE_ONLY: &str = "%Y-%m-%d";
