//! Places endpoint and service
//!
//! `PlacesService` is the presentation-facing entry point: one call, no
//! arguments, bound to the fixed places route.

use async_trait::async_trait;
use std::sync::Arc;

use super::{BaseDomain, NetworkError, NetworkManager, Route};
use crate::cache::CacheConfig;
use crate::data::Places;

/// Path of the places document relative to the places base URL
const PLACES_PATH: &str = "main/locations.json";

/// Endpoints served by the places domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacesRoute {
    /// Fetch the full list of places
    GetPlaces,
}

impl PlacesRoute {
    /// Returns the route descriptor for this endpoint
    pub fn route(&self) -> Route {
        match self {
            PlacesRoute::GetPlaces => Route::new(PLACES_PATH, BaseDomain::Places),
        }
    }
}

/// Source of places for the presentation layer
#[async_trait]
pub trait PlacesServing: Send + Sync {
    /// Fetches the places document
    async fn get_places(&self) -> Result<Places, NetworkError>;
}

/// [`PlacesServing`] implementation backed by a [`NetworkManager`]
#[derive(Clone)]
pub struct PlacesService {
    network_manager: Arc<NetworkManager>,
    cache_config: CacheConfig,
}

impl PlacesService {
    /// Creates a service that caches responses for the default TTL
    pub fn new(network_manager: Arc<NetworkManager>) -> Self {
        Self {
            network_manager,
            cache_config: CacheConfig::active(),
        }
    }

    /// Overrides the cache policy used for every request
    pub fn with_cache_config(mut self, cache_config: CacheConfig) -> Self {
        self.cache_config = cache_config;
        self
    }
}

#[async_trait]
impl PlacesServing for PlacesService {
    async fn get_places(&self) -> Result<Places, NetworkError> {
        let route = PlacesRoute::GetPlaces.route();
        self.network_manager
            .send::<Places>(&route, self.cache_config)
            .await
    }
}
