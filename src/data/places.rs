//! Places document
//!
//! The decoded form of the remote JSON document. Wire field names differ from
//! the in-memory names: `locations` → `places`, `lat` → `latitude`,
//! `long` → `longitude`.

use serde::{Deserialize, Serialize};

/// Label used for places that have no name
pub const UNKNOWN_PLACE_NAME: &str = "Unknown Place";

/// A single named location
pub type Place = PlaceDetail;

/// The full places document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Places {
    /// Places in document order; `None` when the document has no `locations` key
    #[serde(rename = "locations")]
    pub places: Option<Vec<PlaceDetail>>,
}

impl Places {
    /// Returns the places, or an empty list when the document had none
    pub fn into_list(self) -> Vec<PlaceDetail> {
        self.places.unwrap_or_default()
    }
}

/// A place with its coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    /// Human-readable name, if the document provides one
    pub name: Option<String>,
    /// Latitude coordinate
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude coordinate
    #[serde(rename = "long")]
    pub longitude: f64,
}

impl PlaceDetail {
    /// Returns the name, or a placeholder for unnamed places
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_PLACE_NAME)
    }

    /// Builds the Wikipedia deep link for this place
    ///
    /// # Arguments
    /// * `schema_url` - Link prefix, e.g. `wikipedia://places?WMFArticleURL=https://en.wikipedia.org/wiki/`
    ///
    /// # Returns
    /// * `Some(String)` - The prefix followed by the percent-encoded name
    /// * `None` - If the place has no name
    pub fn wikipedia_link(&self, schema_url: &str) -> Option<String> {
        let name = self.name.as_deref()?;
        Some(format!("{}{}", schema_url, urlencoding::encode(name)))
    }
}
