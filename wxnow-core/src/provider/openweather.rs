use async_trait::async_trait;
use reqwest::Client;
use std::fmt;

use crate::{
    error::{Result, WeatherError},
    http::read_ok_body,
    model::WeatherReport,
};

use super::WeatherProvider;

/// Client for the OpenWeatherMap current-weather endpoint.
///
/// No `units` parameter is sent, so temperatures come back in Kelvin.
#[derive(Clone)]
pub struct OpenWeatherProvider {
    url: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            http: Client::new(),
        }
    }
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, location: &str) -> Result<WeatherReport> {
        // The key travels in the query string, log the bare endpoint only.
        tracing::debug!(url = %self.url, location, "requesting current weather");

        let res = self
            .http
            .get(&self.url)
            .query(&[("q", location), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|err| WeatherError::Transport(err.without_url()))?;

        let body = read_ok_body(res, "weather").await?;
        let report: WeatherReport = serde_json::from_str(&body)?;

        tracing::debug!(name = %report.name, "weather report decoded");
        Ok(report)
    }
}
