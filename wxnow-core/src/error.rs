use thiserror::Error;

/// Failures surfaced by the core crate. None of them are recovered locally;
/// the binary decides how to report them.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(
        "OpenWeatherMap API key not set.\n\
         Hint: export OPENWEATHERMAP_API_KEY or run `wxnow configure`."
    )]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed with status code {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("Field '{0}' not found in response")]
    FieldMissing(&'static str),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Incomplete weather data: response has no weather conditions")]
    IncompleteData,

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl WeatherError {
    /// HTTP status carried by an `ApiStatus` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
