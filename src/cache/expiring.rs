//! In-memory cache with per-entry expiry
//!
//! Provides an `ExpiringCache` that stores values of any type behind a string
//! key, each with an optional expiry timestamp. Expiry is checked lazily when
//! an entry is read; there is no background sweep.

use chrono::{DateTime, Duration, Utc};
use std::any::Any;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A stored value and the moment it stops being valid
struct CacheEntry {
    /// The cached value, type-erased
    value: Arc<dyn Any + Send + Sync>,
    /// When the entry expires; `None` never expires
    expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if now >= expires_at)
    }
}

/// Concurrency-safe key/value cache with time-boxed entries
///
/// Entries of different types can live side by side. Reads name the type they
/// expect and get `None` back when the stored value has a different type.
/// All operations go through an async `RwLock`: concurrent reads proceed
/// together, writes are exclusive, and no caller observes a partial update.
pub struct ExpiringCache<K = String> {
    entries: RwLock<HashMap<K, CacheEntry>>,
}

impl<K> Default for ExpiringCache<K> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K> fmt::Debug for ExpiringCache<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringCache").finish_non_exhaustive()
    }
}

impl<K: Eq + Hash> ExpiringCache<K> {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value that expires `ttl_seconds` from now
    ///
    /// A zero or negative TTL stores an entry that is already expired.
    /// Any existing entry for the key is replaced.
    pub async fn insert<T>(&self, key: K, value: T, ttl_seconds: f64)
    where
        T: Any + Send + Sync,
    {
        let expires_at = expiry_after(Utc::now(), ttl_seconds);
        self.store(key, value, Some(expires_at)).await;
    }

    /// Stores a value that never expires
    pub async fn insert_without_expiry<T>(&self, key: K, value: T)
    where
        T: Any + Send + Sync,
    {
        self.store(key, value, None).await;
    }

    async fn store<T>(&self, key: K, value: T, expires_at: Option<DateTime<Utc>>)
    where
        T: Any + Send + Sync,
    {
        let entry = CacheEntry {
            value: Arc::new(value),
            expires_at,
        };
        self.entries.write().await.insert(key, entry);
    }

    /// Reads a value of type `T`
    ///
    /// # Returns
    /// * `Some(T)` if a live entry exists and holds a `T`
    /// * `None` if the key is missing, the entry expired (it is evicted), or
    ///   the stored value has another type
    pub async fn get<T, Q>(&self, key: &Q) -> Option<T>
    where
        T: Any + Clone,
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Utc::now();
        {
            let entries = self.entries.read().await;
            let entry = entries.get(key)?;
            if !entry.is_expired(now) {
                return entry.value.downcast_ref::<T>().cloned();
            }
        }

        // Another caller may have replaced the entry since the read lock was released
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }
        None
    }

    /// Removes the entry for `key`, if any
    pub async fn remove<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.write().await.remove(key);
    }

    /// Removes every entry
    pub async fn reset_all(&self) {
        self.entries.write().await.clear();
    }

    /// Number of stored entries, including expired ones not yet read
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Computes the expiry timestamp for a TTL in (fractional) seconds
fn expiry_after(now: DateTime<Utc>, ttl_seconds: f64) -> DateTime<Utc> {
    // `as` saturates on overflow and maps NaN to zero
    let micros = (ttl_seconds * 1_000_000.0) as i64;
    now.checked_add_signed(Duration::microseconds(micros))
        .unwrap_or(if micros > 0 {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        })
}
