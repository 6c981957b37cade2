use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// A geocoded candidate location.
///
/// Optional provider fields are resolved once, when the record is built from
/// a geocoding result; nothing downstream re-checks them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub country: String,
    /// Region (state, province). Empty when the provider has none.
    pub admin1: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

impl Place {
    /// Row label used in result lists, e.g. `Paris, Île-de-France (France)`.
    pub fn label(&self) -> String {
        if self.admin1.is_empty() {
            format!("{} ({})", self.name, self.country)
        } else {
            format!("{}, {} ({})", self.name, self.admin1, self.country)
        }
    }
}

impl From<GeoResult> for Place {
    fn from(r: GeoResult) -> Self {
        let id = match r.id {
            Some(serde_json::Value::String(id)) => id,
            Some(id) => id.to_string(),
            None => format!("{}-{}-{}", r.name, r.latitude, r.longitude),
        };

        Self {
            id,
            name: r.name,
            country: r.country.unwrap_or_default(),
            admin1: r.admin1.unwrap_or_default(),
            latitude: r.latitude,
            longitude: r.longitude,
            timezone: r.timezone.unwrap_or_default(),
        }
    }
}

/// Raw geocoding search response.
#[derive(Debug, Deserialize)]
pub(crate) struct GeoSearchResponse {
    #[serde(default)]
    pub results: Vec<GeoResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeoResult {
    pub id: Option<serde_json::Value>,
    pub name: String,
    pub country: Option<String>,
    pub admin1: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
}

/// Current conditions for one coordinate pair, as returned by the forecast
/// endpoint. Values are passed through in the units of the source
/// (°C, %, mm, km/h, degrees).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Local time of the reading, `YYYY-MM-DDTHH:MM`.
    pub time: Option<String>,
    pub interval: Option<u32>,
    pub temperature_2m: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub is_day: Option<u8>,
    pub precipitation: Option<f64>,
    pub weather_code: Option<i32>,
    pub wind_speed_10m: Option<f64>,
    pub wind_direction_10m: Option<f64>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A forecast response for one place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub timezone_abbreviation: Option<String>,
    pub utc_offset_seconds: Option<i32>,
    #[serde(default)]
    pub current_units: HashMap<String, String>,
    #[serde(default)]
    pub current: CurrentConditions,
}

impl WeatherSnapshot {
    /// Reading time resolved against the place's UTC offset.
    pub fn observed_at(&self) -> Option<DateTime<FixedOffset>> {
        let time = self.current.time.as_deref()?;
        let naive = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M").ok()?;
        let offset = FixedOffset::east_opt(self.utc_offset_seconds.unwrap_or(0))?;
        offset.from_local_datetime(&naive).single()
    }

    pub fn condition(&self) -> Option<WeatherCondition> {
        self.current.weather_code.map(WeatherCondition::from_wmo_code)
    }

    pub fn is_day(&self) -> Option<bool> {
        self.current.is_day.map(|flag| flag != 0)
    }
}

/// Condition categories mapped from WMO weather codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    FreezingDrizzle,
    Rain,
    FreezingRain,
    Snow,
    RainShowers,
    SnowShowers,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// See <https://open-meteo.com/en/docs#weathervariables>.
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 => Self::MainlyClear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            56 | 57 => Self::FreezingDrizzle,
            61 | 63 | 65 => Self::Rain,
            66 | 67 => Self::FreezingRain,
            71 | 73 | 75 | 77 => Self::Snow,
            80..=82 => Self::RainShowers,
            85 | 86 => Self::SnowShowers,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear sky",
            Self::MainlyClear => "Mainly clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::FreezingDrizzle => "Freezing drizzle",
            Self::Rain => "Rain",
            Self::FreezingRain => "Freezing rain",
            Self::Snow => "Snow",
            Self::RainShowers => "Rain showers",
            Self::SnowShowers => "Snow showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }
}
