use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{
    error::FetchError,
    model::{CurrentPayload, WeatherResult},
};

use super::WeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Measurement system appended to every request.
pub const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at another API root, e.g. a local mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let endpoint = format!("{}/weather", base_url.trim_end_matches('/'));
        Self { api_key, endpoint, http: Client::new() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherResult, FetchError> {
        debug!(city, endpoint = %self.endpoint, "requesting current weather");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", UNITS)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Http { status: status.as_u16(), body: truncate_body(&body) });
        }

        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        // A literal `null` body decodes to `None`.
        let parsed: Option<CurrentPayload> = serde_json::from_str(&body)?;
        let payload = parsed.ok_or(FetchError::EmptyBody)?;

        debug!(city, %status, "current weather received");
        Ok(WeatherResult::from_payload(payload))
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch(&self, city: &str) -> Result<WeatherResult, FetchError> {
        self.fetch_current(city).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
