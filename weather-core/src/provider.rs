use crate::{GeocodingError, Place, WeatherError, WeatherSnapshot};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;

/// The two remote lookups the app depends on.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Find candidate places for a free-text name, in provider order.
    async fn search_places(&self, name: &str) -> Result<Vec<Place>, GeocodingError>;

    /// Fetch current conditions at the place's coordinates.
    async fn current_weather(&self, place: &Place) -> Result<WeatherSnapshot, WeatherError>;
}

pub(crate) fn truncate_body(body: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn long_body_is_cut_on_char_boundary() {
        let body = "é".repeat(150);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert!(cut.len() <= 203);
    }
}
