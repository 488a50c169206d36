//! Core library for the `wxnow` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - IP-based location lookup
//! - The OpenWeatherMap current-weather client and its response model
//! - Rendering of a report in Celsius
//!
//! It never reads stdin or exits the process; errors are returned as
//! [`WeatherError`] and the binary decides what to do with them.

pub mod config;
pub mod error;
mod http;
pub mod location;
pub mod model;
pub mod provider;
pub mod render;

pub use config::{API_KEY_ENV, Config, Settings};
pub use error::WeatherError;
pub use location::{IpApiResolver, LocationResolver};
pub use model::{WeatherReport, kelvin_to_celsius};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_settings};
pub use render::{render, render_details};

/// Construct the location resolver described by the settings.
pub fn resolver_from_settings(settings: &Settings) -> Box<dyn LocationResolver> {
    Box::new(IpApiResolver::new(settings.geolocation_url.clone()))
}
