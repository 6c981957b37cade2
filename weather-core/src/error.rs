//! Error kinds for the HTTP adapter and the view state.

use reqwest::StatusCode;
use thiserror::Error;

/// Place search failed.
#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("Failed to send geocoding request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Geocoding request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse geocoding JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Current weather lookup failed.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Failed to send forecast request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Forecast request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse forecast JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

/// User-visible error held in the view state. The display text is shown as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ViewError {
    /// Search succeeded but matched nothing.
    #[error("No matching places found.")]
    EmptyResults,

    #[error("Could not search places.")]
    Search,

    #[error("Could not load weather.")]
    Weather,
}

impl From<&GeocodingError> for ViewError {
    fn from(_: &GeocodingError) -> Self {
        ViewError::Search
    }
}

impl From<&WeatherError> for ViewError {
    fn from(_: &WeatherError) -> Self {
        ViewError::Weather
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_error_messages() {
        assert_eq!(ViewError::EmptyResults.to_string(), "No matching places found.");
        assert_eq!(ViewError::Search.to_string(), "Could not search places.");
        assert_eq!(ViewError::Weather.to_string(), "Could not load weather.");
    }

    #[test]
    fn adapter_errors_map_to_view_errors() {
        let geo = GeocodingError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".into(),
        };
        assert_eq!(ViewError::from(&geo), ViewError::Search);
        assert!(geo.to_string().contains("500"));

        let wx = WeatherError::Status { status: StatusCode::BAD_REQUEST, body: String::new() };
        assert_eq!(ViewError::from(&wx), ViewError::Weather);
    }
}
