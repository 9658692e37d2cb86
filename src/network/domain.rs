//! Logical base domains
//!
//! Routes name a domain instead of a URL; the concrete base URL is looked up
//! in the [`Configuration`] when a request is sent.

use crate::config::{ConfigKey, Configuration};

/// Named targets a route can be sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseDomain {
    /// The host serving the places document
    Places,
    /// No base; only useful for routes whose path fails URL validation anyway
    None,
}

impl BaseDomain {
    /// Resolves the domain to a base URL string
    ///
    /// # Returns
    /// * `Some(String)` with the configured base (empty for `BaseDomain::None`)
    /// * `None` if the configuration has no entry for the domain
    pub fn base_path(&self, config: &Configuration) -> Option<String> {
        match self {
            BaseDomain::Places => config.value(ConfigKey::BaseUrlPlaces).map(str::to_string),
            BaseDomain::None => Some(String::new()),
        }
    }
}
