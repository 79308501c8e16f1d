use crate::{
    Config, FetchError, WeatherResult,
    config::API_KEY_ENV,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Anything that can answer "what is the weather in `city` right now".
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self, city: &str) -> Result<WeatherResult, FetchError>;
}

/// Construct the OpenWeather client from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.resolve_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
                 Hint: run `skyview configure` or set {API_KEY_ENV}."
        )
    })?;

    Ok(OpenWeatherClient::with_base_url(api_key, config.base_url.clone()))
}
