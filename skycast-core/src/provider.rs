use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::Config;
use crate::error::NetworkError;
use crate::model::{Coordinate, CurrentWeatherResponse, ForecastResponse};
use crate::provider::weatherapi::WeatherApiClient;

pub mod weatherapi;

/// Seam to the weather API: two independent operations, issued
/// concurrently by the pipeline.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(
        &self,
        coordinate: Coordinate,
    ) -> Result<CurrentWeatherResponse, NetworkError>;

    async fn forecast(
        &self,
        coordinate: Coordinate,
        days: u8,
    ) -> Result<ForecastResponse, NetworkError>;
}

/// Construct the weatherapi.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    let client = WeatherApiClient::new(config.base_url.clone(), api_key.to_owned())?;

    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();

        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_key_is_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(provider_from_config(&cfg).is_ok());
    }
}
