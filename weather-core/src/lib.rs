//! Core library for the `weather-now` app.
//!
//! This crate defines:
//! - Place search and current weather lookup over Open-Meteo
//! - Shared domain models (places, weather snapshots)
//! - The view state machine and the controller that drives it
//! - Configuration handling
//!
//! It is used by `weather-now`, but the controller can be driven by any
//! front end that renders [`SearchState`].

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod provider;
pub mod state;

pub use config::Config;
pub use controller::{Controller, StateObserver};
pub use error::{GeocodingError, ViewError, WeatherError};
pub use model::{CurrentConditions, Place, WeatherCondition, WeatherSnapshot};
pub use provider::{OpenMeteoProvider, WeatherProvider};
pub use state::{Phase, SearchState};
