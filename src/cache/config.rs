//! Per-request cache policy

/// TTL used when caching is enabled without an explicit value
pub const DEFAULT_TTL_SECONDS: f64 = 90.0;

/// Controls whether a request reads from and writes to the cache
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CacheConfig {
    /// Always go to the network and never store the result
    Disabled,
    /// Serve live entries from the cache and store fresh results for `ttl_seconds`
    Active { ttl_seconds: f64 },
}

impl CacheConfig {
    /// Caching with the default 90 second TTL
    pub fn active() -> Self {
        Self::with_ttl(DEFAULT_TTL_SECONDS)
    }

    /// Caching with a custom TTL in seconds
    pub fn with_ttl(ttl_seconds: f64) -> Self {
        CacheConfig::Active { ttl_seconds }
    }

    /// Returns the TTL when caching is active
    pub fn ttl_seconds(&self) -> Option<f64> {
        match self {
            CacheConfig::Disabled => None,
            CacheConfig::Active { ttl_seconds } => Some(*ttl_seconds),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_active_with_90_seconds() {
        assert_eq!(CacheConfig::default(), CacheConfig::Active { ttl_seconds: 90.0 });
        assert_eq!(CacheConfig::active().ttl_seconds(), Some(DEFAULT_TTL_SECONDS));
    }

    #[test]
    fn test_disabled_has_no_ttl() {
        assert_eq!(CacheConfig::Disabled.ttl_seconds(), None);
    }

    #[test]
    fn test_custom_ttl() {
        assert_eq!(CacheConfig::with_ttl(5.5).ttl_seconds(), Some(5.5));
    }
}
