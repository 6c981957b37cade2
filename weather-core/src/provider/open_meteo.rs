use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::{
    Config, GeocodingError, Place, WeatherError, WeatherSnapshot,
    model::GeoSearchResponse,
    provider::truncate_body,
};

use super::WeatherProvider;

/// Fields requested from the forecast endpoint's `current` block.
pub const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,is_day,precipitation,weather_code,wind_speed_10m,wind_direction_10m";

/// Open-Meteo geocoding + forecast client. No API key needed.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
    language: String,
    count: u8,
}

impl OpenMeteoProvider {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            language: config.language.clone(),
            count: config.result_count,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    #[instrument(skip(self), level = "debug")]
    async fn search_places(&self, name: &str) -> Result<Vec<Place>, GeocodingError> {
        let count = self.count.to_string();

        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[
                ("name", name),
                ("count", count.as_str()),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(GeocodingError::Request)?;

        let status = res.status();
        let body = res.text().await.map_err(GeocodingError::Request)?;

        if !status.is_success() {
            warn!(%status, "geocoding request failed");
            return Err(GeocodingError::Status { status, body: truncate_body(&body) });
        }

        let parsed: GeoSearchResponse =
            serde_json::from_str(&body).map_err(GeocodingError::Decode)?;

        let places: Vec<Place> = parsed.results.into_iter().map(Place::from).collect();
        debug!(count = places.len(), "geocoding returned places");

        Ok(places)
    }

    #[instrument(skip(self, place), fields(place = %place.id), level = "debug")]
    async fn current_weather(&self, place: &Place) -> Result<WeatherSnapshot, WeatherError> {
        let latitude = place.latitude.to_string();
        let longitude = place.longitude.to_string();

        let res = self
            .http
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("timezone", "auto"),
                ("current", CURRENT_FIELDS),
            ])
            .send()
            .await
            .map_err(WeatherError::Request)?;

        let status = res.status();
        let body = res.text().await.map_err(WeatherError::Request)?;

        if !status.is_success() {
            warn!(%status, "forecast request failed");
            return Err(WeatherError::Status { status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(WeatherError::Decode)
    }
}
