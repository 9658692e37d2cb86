//! Wikipedia Places Library
//!
//! Fetches a remote JSON document of named places through a cached request
//! pipeline. Modules are exposed for the binary and for integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod network;
pub mod refresh;
