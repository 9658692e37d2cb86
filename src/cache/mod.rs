//! Cache module for keeping decoded responses in memory
//!
//! This module provides a generic, concurrency-safe cache whose entries expire
//! after a configurable TTL (time-to-live), and the per-request policy that
//! decides whether the network manager uses it.

mod config;
mod expiring;

pub use config::{CacheConfig, DEFAULT_TTL_SECONDS};
pub use expiring::ExpiringCache;
