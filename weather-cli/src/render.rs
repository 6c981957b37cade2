//! Text rendering of the view state.

use std::fmt::Write;

use weather_now_core::{Place, SearchState, WeatherSnapshot};

pub const TITLE: &str = "Weather Now";
pub const SEARCH_PLACEHOLDER: &str = "Search city...";
pub const PICK_ACTION: &str = "See Weather";

/// Label of the submit control for the current state.
pub fn submit_label(state: &SearchState) -> &'static str {
    if state.is_loading() { "Loading..." } else { "Search" }
}

/// Whole screen: title, status, error line, results and weather panel.
pub fn render(state: &SearchState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{TITLE}");
    if state.is_loading() {
        let _ = writeln!(out, "{}", submit_label(state));
    }

    if let Some(message) = state.error_message() {
        let _ = writeln!(out, "{message}");
    }

    for (i, place) in state.places().iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}  [{PICK_ACTION}]", i + 1, place.label());
    }

    if let (Some(place), Some(weather)) = (state.selected(), state.weather()) {
        out.push('\n');
        for line in weather_panel(place, weather) {
            let _ = writeln!(out, "{line}");
        }
    }

    out
}

/// Summary panel for a place's current conditions.
pub fn weather_panel(place: &Place, weather: &WeatherSnapshot) -> Vec<String> {
    let current = &weather.current;

    let mut lines = vec![
        format!("{}, {}", place.name, place.country),
        format!("Temperature: {}°C", value(current.temperature_2m)),
        format!("Feels Like: {}°C", value(current.apparent_temperature)),
        format!("Humidity: {}%", value(current.relative_humidity_2m)),
        format!("Wind: {} km/h", value(current.wind_speed_10m)),
    ];

    if let Some(condition) = weather.condition() {
        let time_of_day = match weather.is_day() {
            Some(true) => " (day)",
            Some(false) => " (night)",
            None => "",
        };
        lines.push(format!("Conditions: {}{time_of_day}", condition.description()));
    }
    if let Some(precipitation) = current.precipitation {
        lines.push(format!("Precipitation: {precipitation} mm"));
    }
    if let Some(direction) = current.wind_direction_10m {
        lines.push(format!("Wind Direction: {direction}°"));
    }
    if let Some(observed) = weather.observed_at() {
        let zone = weather.timezone_abbreviation.as_deref().unwrap_or("");
        let line = format!("Observed: {} {zone}", observed.format("%Y-%m-%d %H:%M"));
        lines.push(line.trim_end().to_string());
    }

    lines
}

fn value(v: Option<f64>) -> String {
    v.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use weather_now_core::{Controller, GeocodingError, WeatherError, WeatherProvider};

    fn paris() -> Place {
        Place {
            id: "Paris-48.85-2.35".into(),
            name: "Paris".into(),
            country: "France".into(),
            admin1: "Île-de-France".into(),
            latitude: 48.85,
            longitude: 2.35,
            timezone: "Europe/Paris".into(),
        }
    }

    fn snapshot(json: serde_json::Value) -> WeatherSnapshot {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn panel_shows_core_lines() {
        let weather = snapshot(serde_json::json!({
            "current": {
                "temperature_2m": 18.2,
                "apparent_temperature": 17.5,
                "relative_humidity_2m": 60,
                "wind_speed_10m": 12
            }
        }));

        let lines = weather_panel(&paris(), &weather);

        assert_eq!(
            lines,
            vec![
                "Paris, France",
                "Temperature: 18.2°C",
                "Feels Like: 17.5°C",
                "Humidity: 60%",
                "Wind: 12 km/h",
            ]
        );
    }

    #[test]
    fn panel_adds_optional_lines() {
        let weather = snapshot(serde_json::json!({
            "timezone_abbreviation": "CEST",
            "utc_offset_seconds": 7200,
            "current": {
                "time": "2024-06-01T14:15",
                "temperature_2m": 18.2,
                "is_day": 0,
                "precipitation": 0.4,
                "weather_code": 61,
                "wind_direction_10m": 250
            }
        }));

        let lines = weather_panel(&paris(), &weather);

        assert!(lines.contains(&"Wind: n/a km/h".to_string()));
        assert!(lines.contains(&"Conditions: Rain (night)".to_string()));
        assert!(lines.contains(&"Precipitation: 0.4 mm".to_string()));
        assert!(lines.contains(&"Wind Direction: 250°".to_string()));
        assert!(lines.contains(&"Observed: 2024-06-01 14:15 CEST".to_string()));
    }

    #[derive(Debug)]
    struct ScriptedProvider;

    #[async_trait]
    impl WeatherProvider for ScriptedProvider {
        async fn search_places(&self, _name: &str) -> Result<Vec<Place>, GeocodingError> {
            Ok(vec![paris()])
        }

        async fn current_weather(&self, _place: &Place) -> Result<WeatherSnapshot, WeatherError> {
            Ok(snapshot(serde_json::json!({
                "current": {
                    "temperature_2m": 18.2,
                    "apparent_temperature": 17.5,
                    "relative_humidity_2m": 60,
                    "wind_speed_10m": 12
                }
            })))
        }
    }

    #[tokio::test]
    async fn search_and_pick_paris() {
        let mut controller = Controller::new(ScriptedProvider);

        controller.submit_search("Paris").await;
        let screen = render(controller.state());
        assert!(screen.contains("Paris, Île-de-France (France)  [See Weather]"));

        controller.pick_place(0).await;
        let screen = render(controller.state());
        for line in [
            "Paris, France",
            "Temperature: 18.2°C",
            "Feels Like: 17.5°C",
            "Humidity: 60%",
            "Wind: 12 km/h",
        ] {
            assert!(screen.contains(line), "missing {line:?} in:\n{screen}");
        }
    }

    #[test]
    fn empty_state_renders_title_only() {
        let state = SearchState::new();

        assert_eq!(render(&state), "Weather Now\n");
        assert_eq!(submit_label(&state), "Search");
    }
}
