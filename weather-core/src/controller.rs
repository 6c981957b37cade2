//! Drives [`SearchState`] from user actions and publishes each change.

use tracing::{info, warn};

use crate::{SearchState, WeatherProvider};

/// Receives the state after every published transition.
pub trait StateObserver: Send {
    fn state_changed(&mut self, state: &SearchState);
}

impl<F> StateObserver for F
where
    F: FnMut(&SearchState) + Send,
{
    fn state_changed(&mut self, state: &SearchState) {
        self(state)
    }
}

/// Owns the single [`SearchState`] and the provider used to fill it.
///
/// Actions take `&mut self`, so a search and a weather lookup are never in
/// flight at the same time. Provider failures end up in the state and are
/// never returned to the caller.
pub struct Controller<P> {
    provider: P,
    state: SearchState,
    observers: Vec<Box<dyn StateObserver>>,
}

impl<P: WeatherProvider> Controller<P> {
    pub fn new(provider: P) -> Self {
        Self { provider, state: SearchState::new(), observers: Vec::new() }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Search for places matching `query`. A blank query does nothing.
    pub async fn submit_search(&mut self, query: &str) {
        let Some(name) = self.state.begin_search(query) else {
            return;
        };
        self.publish();

        let result = self.provider.search_places(&name).await;
        match &result {
            Ok(places) => info!(query = %name, count = places.len(), "place search finished"),
            Err(e) => warn!(query = %name, error = %e, "place search failed"),
        }

        self.state.finish_search(result);
        self.publish();
    }

    /// Load weather for the current result at `index`. Returns `false` if
    /// there is no such result.
    pub async fn pick_place(&mut self, index: usize) -> bool {
        let Some(place) = self.state.begin_pick(index) else {
            warn!(index, available = self.state.places().len(), "pick ignored: no such place");
            return false;
        };
        self.publish();

        let result = self.provider.current_weather(&place).await;
        if let Err(e) = &result {
            warn!(place = %place.id, error = %e, "weather lookup failed");
        } else {
            info!(place = %place.id, "weather lookup finished");
        }

        self.state.finish_pick(&place.id, result);
        self.publish();
        true
    }

    /// Same as [`Controller::pick_place`], addressing the place by id.
    pub async fn pick_place_by_id(&mut self, id: &str) -> bool {
        match self.state.places().iter().position(|p| p.id == id) {
            Some(index) => self.pick_place(index).await,
            None => {
                warn!(id, "pick ignored: not a current result");
                false
            }
        }
    }

    fn publish(&mut self) {
        for observer in &mut self.observers {
            observer.state_changed(&self.state);
        }
    }
}
