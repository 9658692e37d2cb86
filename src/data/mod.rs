//! Core data models for Wikipedia Places CLI
//!
//! This module contains the decoded form of the places document served by the
//! places endpoint.

pub mod places;

pub use places::{Place, PlaceDetail, Places, UNKNOWN_PLACE_NAME};
