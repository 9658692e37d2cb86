//! Endpoint URL composition
//!
//! Joins a base URL with a route's path and query items and validates the
//! result. Building is pure: no I/O, no shared state.

use url::Url;

use super::{NetworkError, Route};

/// Builds absolute endpoint URLs for routes
pub trait EndpointUrlProvider: Send + Sync {
    /// Composes `base_url` with the route's path and query
    ///
    /// # Returns
    /// * `Ok(Url)` - An absolute URL
    /// * `Err(NetworkError::InvalidUrl)` - If the base cannot be parsed or cannot be a base
    fn endpoint_url(&self, base_url: &str, route: &Route) -> Result<Url, NetworkError>;
}

/// Default [`EndpointUrlProvider`]
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlBuilder;

impl UrlBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl EndpointUrlProvider for UrlBuilder {
    fn endpoint_url(&self, base_url: &str, route: &Route) -> Result<Url, NetworkError> {
        let mut url = Url::parse(base_url).map_err(|_| NetworkError::InvalidUrl)?;

        if url.cannot_be_a_base() {
            return Err(NetworkError::InvalidUrl);
        }

        let path = route.path.trim_start_matches('/');
        if !path.is_empty() {
            let joined = format!("{}/{}", url.path().trim_end_matches('/'), path);
            url.set_path(&joined);
        }

        if route.query_items.is_empty() {
            url.set_query(None);
        } else {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            pairs.extend_pairs(route.query_items.iter());
        }

        Ok(url)
    }
}
