use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Settings, WeatherReport, error::Result, provider::openweather::OpenWeatherProvider};

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a free-form place name.
    async fn current(&self, location: &str) -> Result<WeatherReport>;
}

/// Construct the weather provider described by the settings.
pub fn provider_from_settings(settings: &Settings) -> Box<dyn WeatherProvider> {
    Box::new(OpenWeatherProvider::new(
        settings.weather_url.clone(),
        settings.api_key.clone(),
    ))
}
