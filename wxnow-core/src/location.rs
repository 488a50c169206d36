//! Approximate location of the caller, derived from their public IP address.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt::Debug;

use crate::{
    error::{Result, WeatherError},
    http::read_ok_body,
};

#[async_trait]
pub trait LocationResolver: Send + Sync + Debug {
    /// Name of the city the caller appears to be in.
    async fn resolve(&self) -> Result<String>;
}

/// Resolver backed by an ipapi.co compatible endpoint: a plain GET returning a
/// JSON object with a `city` string.
#[derive(Debug, Clone)]
pub struct IpApiResolver {
    url: String,
    http: Client,
}

impl IpApiResolver {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl LocationResolver for IpApiResolver {
    async fn resolve(&self) -> Result<String> {
        tracing::debug!(url = %self.url, "looking up location by IP");

        let res = self.http.get(&self.url).send().await?;
        let body = match read_ok_body(res, "geolocation").await {
            Ok(body) => body,
            Err(err) => {
                if err.status().is_some() {
                    tracing::warn!(
                        "Error fetching user location. Please enter a location manually."
                    );
                }
                return Err(err);
            }
        };

        let value: Value = serde_json::from_str(&body)?;
        let city = city_from_value(&value)?;

        tracing::info!(city = %city, "resolved location from IP");
        Ok(city)
    }
}

/// Extract the `city` field from a geolocation payload.
pub fn city_from_value(value: &Value) -> Result<String> {
    value
        .get("city")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .map(str::to_string)
        .ok_or(WeatherError::FieldMissing("city"))
}
