use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use anyhow::{anyhow, Result};
use url::Url;

use crate::constants::*;

/// 외부 API 엔드포인트 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub etherscan_gas_oracle: String,
    /// Polygon 가스 소스 (우선순위 순서: Polygonscan → Gas Station)
    pub polygonscan_gas_oracle: String,
    pub polygon_gas_station: String,
    pub coingecko_eth_price: String,
    pub request_timeout_secs: u64,
}

/// 그림 출력 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureConfig {
    pub output_dir: PathBuf,
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub endpoints: EndpointConfig,
    pub figures: FigureConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: EndpointConfig {
                etherscan_gas_oracle: ETHERSCAN_GAS_ORACLE_URL.to_string(),
                polygonscan_gas_oracle: POLYGONSCAN_GAS_ORACLE_URL.to_string(),
                polygon_gas_station: POLYGON_GAS_STATION_URL.to_string(),
                coingecko_eth_price: COINGECKO_ETH_PRICE_URL.to_string(),
                request_timeout_secs: REQUEST_TIMEOUT_SECS,
            },
            figures: FigureConfig {
                output_dir: PathBuf::from("."),
                width_in: FIGURE_WIDTH_IN,
                height_in: FIGURE_HEIGHT_IN,
                dpi: FIGURE_DPI,
            },
        }
    }
}

impl EndpointConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl FigureConfig {
    /// 픽셀 단위 그림 크기
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f64).round() as u32,
            (self.height_in * self.dpi as f64).round() as u32,
        )
    }

    pub fn cost_comparison_path(&self) -> PathBuf {
        self.output_dir.join(FIGURE1_FILENAME)
    }

    pub fn efficiency_path(&self) -> PathBuf {
        self.output_dir.join(FIGURE2_FILENAME)
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let endpoints = [
            ("etherscan_gas_oracle", &self.endpoints.etherscan_gas_oracle),
            ("polygonscan_gas_oracle", &self.endpoints.polygonscan_gas_oracle),
            ("polygon_gas_station", &self.endpoints.polygon_gas_station),
            ("coingecko_eth_price", &self.endpoints.coingecko_eth_price),
        ];
        for (name, url) in endpoints {
            Url::parse(url).map_err(|e| anyhow!("{} is not a valid URL ({}): {}", name, url, e))?;
        }

        if self.endpoints.request_timeout_secs == 0 {
            return Err(anyhow!("request_timeout_secs must be greater than 0"));
        }

        if self.figures.dpi == 0 {
            return Err(anyhow!("figure dpi must be greater than 0"));
        }

        if self.figures.width_in <= 0.0 || self.figures.height_in <= 0.0 {
            return Err(anyhow!(
                "figure size must be positive: {}x{} in",
                self.figures.width_in,
                self.figures.height_in
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.endpoints.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.figures.pixel_size(), (4800, 2400));
        assert_eq!(
            config.figures.cost_comparison_path(),
            PathBuf::from("./figure1_pnr_cost_analysis.png")
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.endpoints.coingecko_eth_price = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.endpoints.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.figures.dpi = 0;
        assert!(config.validate().is_err());
    }
}
