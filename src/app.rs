//! Application state for Wikipedia Places CLI
//!
//! This module holds the loaded places, the outcome of the last load, and the
//! rendering of the place list for the terminal.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::Arc;

use crate::cli::OutputFormat;
use crate::data::{Place, Places};
use crate::network::{NetworkError, PlacesServing};

/// One rendered row of the place list
#[derive(Debug, Serialize)]
struct PlaceRow<'a> {
    name: &'a str,
    latitude: f64,
    longitude: f64,
    wikipedia_link: Option<String>,
}

/// Main application struct managing loaded places
pub struct App {
    /// Places from the last successful load
    pub places: Vec<Place>,
    /// Error from the last load, if it failed
    pub last_error: Option<NetworkError>,
    /// Timestamp of the last load attempt
    pub last_refresh: Option<DateTime<Local>>,
    /// Source of places
    places_service: Arc<dyn PlacesServing>,
    /// Prefix for Wikipedia deep links, if configured
    schema_url: Option<String>,
}

impl App {
    /// Creates a new App with no places loaded
    ///
    /// # Arguments
    /// * `places_service` - Where places are fetched from
    /// * `schema_url` - Deep link prefix; rows have no link when `None`
    pub fn new(places_service: Arc<dyn PlacesServing>, schema_url: Option<String>) -> Self {
        Self {
            places: Vec::new(),
            last_error: None,
            last_refresh: None,
            places_service,
            schema_url,
        }
    }

    /// Fetches places from the service and records the outcome
    pub async fn load_places(&mut self) {
        let result = self.places_service.get_places().await;
        self.apply_result(result);
    }

    /// Records the outcome of a load
    ///
    /// On failure the list is cleared and the error is kept for display.
    pub fn apply_result(&mut self, result: Result<Places, NetworkError>) {
        self.last_refresh = Some(Local::now());
        match result {
            Ok(places) => {
                self.places = places.into_list();
                self.last_error = None;
            }
            Err(error) => {
                tracing::warn!(error = error.code(), "Failed to load places");
                self.places.clear();
                self.last_error = Some(error);
            }
        }
    }

    /// Returns the user-facing message for the last failure, if any
    pub fn error_message(&self) -> Option<String> {
        self.last_error.map(|e| e.message())
    }

    /// Renders the current place list
    ///
    /// Text output is one line per place: name, `lat,long`, and the
    /// Wikipedia link (or `-`), separated by tabs.
    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        let rows: Vec<PlaceRow<'_>> = self
            .places
            .iter()
            .map(|place| PlaceRow {
                name: place.display_name(),
                latitude: place.latitude,
                longitude: place.longitude,
                wikipedia_link: self
                    .schema_url
                    .as_deref()
                    .and_then(|schema| place.wikipedia_link(schema)),
            })
            .collect();

        match format {
            OutputFormat::Json => serde_json::to_string_pretty(&rows),
            OutputFormat::Text => Ok(rows
                .iter()
                .map(|row| {
                    format!(
                        "{}\t{},{}\t{}",
                        row.name,
                        row.latitude,
                        row.longitude,
                        row.wikipedia_link.as_deref().unwrap_or("-")
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PlaceDetail;
    use async_trait::async_trait;
    use std::sync::Mutex;

    const SCHEMA: &str = "wikipedia://places?WMFArticleURL=https://en.wikipedia.org/wiki/";

    struct MockPlacesService {
        result: Mutex<Result<Places, NetworkError>>,
    }

    #[async_trait]
    impl PlacesServing for MockPlacesService {
        async fn get_places(&self) -> Result<Places, NetworkError> {
            self.result.lock().unwrap().clone()
        }
    }

    fn app_with(result: Result<Places, NetworkError>) -> App {
        let service = MockPlacesService {
            result: Mutex::new(result),
        };
        App::new(Arc::new(service), Some(SCHEMA.to_string()))
    }

    fn sample_places() -> Places {
        Places {
            places: Some(vec![
                PlaceDetail {
                    name: Some("Amsterdam".to_string()),
                    latitude: 52.3547498,
                    longitude: 4.8339215,
                },
                PlaceDetail {
                    name: None,
                    latitude: 40.4380638,
                    longitude: -3.7495758,
                },
            ]),
        }
    }

    #[tokio::test]
    async fn test_load_places_success() {
        let mut app = app_with(Ok(sample_places()));

        app.load_places().await;

        assert_eq!(app.places.len(), 2);
        assert!(app.last_error.is_none());
        assert!(app.last_refresh.is_some());
        assert!(app.error_message().is_none());
    }

    #[tokio::test]
    async fn test_load_places_missing_locations_is_empty() {
        let mut app = app_with(Ok(Places { places: None }));

        app.load_places().await;

        assert!(app.places.is_empty());
        assert!(app.last_error.is_none());
    }

    #[tokio::test]
    async fn test_load_places_failure_clears_list() {
        let mut app = app_with(Ok(sample_places()));
        app.load_places().await;
        assert_eq!(app.places.len(), 2);

        app.apply_result(Err(NetworkError::GenericError));

        assert!(app.places.is_empty());
        assert_eq!(app.last_error, Some(NetworkError::GenericError));
        assert_eq!(
            app.error_message().as_deref(),
            Some("Oops! Looks like there are problems, try again later. GENERICERROR")
        );
    }

    #[tokio::test]
    async fn test_render_text() {
        let mut app = app_with(Ok(sample_places()));
        app.load_places().await;

        let output = app.render(OutputFormat::Text).expect("Render should succeed");
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Amsterdam\t52.3547498,4.8339215\twikipedia://places?WMFArticleURL=https://en.wikipedia.org/wiki/Amsterdam"
        );
        assert_eq!(lines[1], "Unknown Place\t40.4380638,-3.7495758\t-");
    }

    #[tokio::test]
    async fn test_render_json() {
        let mut app = app_with(Ok(sample_places()));
        app.load_places().await;

        let output = app.render(OutputFormat::Json).expect("Render should succeed");
        let value: serde_json::Value = serde_json::from_str(&output).expect("Output should be JSON");

        assert_eq!(value[0]["name"], "Amsterdam");
        assert_eq!(value[1]["name"], "Unknown Place");
        assert!(value[1]["wikipedia_link"].is_null());
    }

    #[tokio::test]
    async fn test_render_without_schema_has_no_links() {
        let service = MockPlacesService {
            result: Mutex::new(Ok(sample_places())),
        };
        let mut app = App::new(Arc::new(service), None);
        app.load_places().await;

        let output = app.render(OutputFormat::Text).expect("Render should succeed");

        assert!(output.lines().all(|line| line.ends_with("\t-")));
    }
}
