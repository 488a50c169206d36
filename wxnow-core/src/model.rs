use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Current-weather response from the OpenWeatherMap `weather` endpoint.
///
/// Absent fields fall back to their defaults, the upstream routinely omits
/// some of them (`wind.gust`, `visibility`). Fields of the wrong type are
/// still rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherReport {
    pub coord: Coord,
    pub weather: Vec<Condition>,
    pub base: String,
    pub main: Measurements,
    pub visibility: u32,
    pub wind: Wind,
    pub clouds: Clouds,
    pub dt: i64,
    pub sys: Sys,
    /// Shift in seconds from UTC.
    pub timezone: i32,
    pub id: i64,
    pub name: String,
    pub cod: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Temperatures are in Kelvin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Measurements {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// hPa
    pub pressure: u32,
    /// Percent.
    pub humidity: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    /// m/s
    pub speed: f64,
    pub deg: u16,
    pub gust: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clouds {
    pub all: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sys {
    #[serde(rename = "type")]
    pub kind: i32,
    pub id: i64,
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

impl WeatherReport {
    /// First weather condition; the report is unusable without one.
    pub fn condition(&self) -> Result<&Condition, WeatherError> {
        self.weather.first().ok_or(WeatherError::IncompleteData)
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.timezone)
    }

    /// Unix timestamp converted to the location's local time.
    pub fn local_time(&self, ts: i64) -> Option<DateTime<FixedOffset>> {
        let offset = self.offset()?;
        DateTime::<Utc>::from_timestamp(ts, 0)
            .map(|utc| utc.with_timezone(&offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_kelvin_to_celsius() {
        assert_eq!(format!("{:.2}", kelvin_to_celsius(300.0)), "26.85");
        assert_eq!(format!("{:.2}", kelvin_to_celsius(273.15)), "0.00");
        assert_eq!(format!("{:.2}", kelvin_to_celsius(0.0)), "-273.15");
    }

    #[test]
    fn partial_payload_decodes_with_defaults() {
        let json = r#"{"name":"London","sys":{"country":"GB"},
            "weather":[{"description":"clear sky"}],
            "main":{"temp":288.15,"pressure":1012,"humidity":60}}"#;
        let report: WeatherReport = serde_json::from_str(json).expect("decode");
        let condition = report.condition().expect("condition");

        assert_eq!(report.name, "London");
        assert_eq!(report.sys.country, "GB");
        assert_eq!(report.main.pressure, 1012);
        assert_eq!(report.wind.gust, 0.0);
        assert_eq!(condition.description, "clear sky");
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let result = serde_json::from_str::<WeatherReport>(r#"{"main":{"temp":"hot"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn sys_type_is_renamed() {
        let json = r#"{"sys":{"type":2,"id":2075535}}"#;
        let report: WeatherReport = serde_json::from_str(json).expect("decode");
        assert_eq!(report.sys.kind, 2);
        assert_eq!(report.sys.id, 2075535);
    }

    #[test]
    fn empty_weather_list_is_incomplete() {
        let report = WeatherReport::default();
        assert!(matches!(report.condition(), Err(WeatherError::IncompleteData)));
    }

    #[test]
    fn local_time_applies_timezone_offset() {
        let report = WeatherReport {
            timezone: 3600,
            ..WeatherReport::default()
        };
        let local = report.local_time(0).expect("valid timestamp");
        assert_eq!(local.format("%H:%M").to_string(), "01:00");
    }
}
