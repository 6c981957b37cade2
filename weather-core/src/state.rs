//! View state and its transitions.
//!
//! Every user action is split into a `begin_*` step, applied before the
//! remote call, and a `finish_*` step that applies the call's outcome. Both
//! leave the state consistent: `loading` is set by the first and cleared by
//! the second, whether the call succeeded or not.

use crate::{GeocodingError, Place, ViewError, WeatherError, WeatherSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Searching,
    Results,
    Selecting,
    Ready,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    query: String,
    places: Vec<Place>,
    selected: Option<Place>,
    weather: Option<WeatherSnapshot>,
    loading: bool,
    error: Option<ViewError>,
    phase: Phase,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn selected(&self) -> Option<&Place> {
        self.selected.as_ref()
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<ViewError> {
        self.error
    }

    /// User-visible error text, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Start a search. Returns the trimmed name to look up, or `None` when the
    /// query is blank, in which case the state is left untouched.
    pub fn begin_search(&mut self, query: &str) -> Option<String> {
        let name = query.trim();
        if name.is_empty() {
            return None;
        }

        self.query = query.to_string();
        self.places.clear();
        self.selected = None;
        self.weather = None;
        self.error = None;
        self.loading = true;
        self.phase = Phase::Searching;

        Some(name.to_string())
    }

    pub fn finish_search(&mut self, result: Result<Vec<Place>, GeocodingError>) {
        self.loading = false;

        match result {
            Ok(places) if places.is_empty() => {
                self.places.clear();
                self.error = Some(ViewError::EmptyResults);
                self.phase = Phase::Error;
            }
            Ok(places) => {
                self.places = places;
                self.error = None;
                self.phase = Phase::Results;
            }
            Err(e) => {
                self.places.clear();
                self.weather = None;
                self.error = Some(ViewError::from(&e));
                self.phase = Phase::Error;
            }
        }
    }

    /// Start loading weather for the result at `index`. Returns the place to
    /// fetch, or `None` (state untouched) when `index` is not a current result.
    pub fn begin_pick(&mut self, index: usize) -> Option<Place> {
        let place = self.places.get(index)?.clone();

        self.selected = Some(place.clone());
        self.weather = None;
        self.error = None;
        self.loading = true;
        self.phase = Phase::Selecting;

        Some(place)
    }

    /// Apply a weather lookup outcome for `place_id`. Returns `false`, leaving
    /// the state untouched, if the selection has moved on to another place.
    pub fn finish_pick(
        &mut self,
        place_id: &str,
        result: Result<WeatherSnapshot, WeatherError>,
    ) -> bool {
        if self.selected.as_ref().map(|p| p.id.as_str()) != Some(place_id) {
            return false;
        }

        self.loading = false;

        match result {
            Ok(snapshot) => {
                self.weather = Some(snapshot);
                self.error = None;
                self.phase = Phase::Ready;
            }
            Err(e) => {
                self.weather = None;
                self.error = Some(ViewError::from(&e));
                self.phase = Phase::Error;
            }
        }
        true
    }
}
