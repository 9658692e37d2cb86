//! HTTP status classification
//!
//! Maps transport status codes onto the [`NetworkError`] taxonomy. Success is
//! decided here too, so the orchestrator never has to special-case 200 on
//! its own.

use super::NetworkError;

/// Status codes the pipeline knows by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownStatus {
    Success,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    Timeout,
    Conflict,
    RateLimit,
    InternalServerError,
}

impl KnownStatus {
    /// Looks up a status code, returning `None` for codes outside the table
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            200 => Some(KnownStatus::Success),
            400 => Some(KnownStatus::BadRequest),
            401 => Some(KnownStatus::Unauthorized),
            403 => Some(KnownStatus::Forbidden),
            404 => Some(KnownStatus::NotFound),
            405 => Some(KnownStatus::MethodNotAllowed),
            408 => Some(KnownStatus::Timeout),
            409 => Some(KnownStatus::Conflict),
            429 => Some(KnownStatus::RateLimit),
            500 => Some(KnownStatus::InternalServerError),
            _ => None,
        }
    }

    /// Returns the numeric status code
    pub fn code(&self) -> u16 {
        match self {
            KnownStatus::Success => 200,
            KnownStatus::BadRequest => 400,
            KnownStatus::Unauthorized => 401,
            KnownStatus::Forbidden => 403,
            KnownStatus::NotFound => 404,
            KnownStatus::MethodNotAllowed => 405,
            KnownStatus::Timeout => 408,
            KnownStatus::Conflict => 409,
            KnownStatus::RateLimit => 429,
            KnownStatus::InternalServerError => 500,
        }
    }
}

/// Classifies an HTTP status code
///
/// # Returns
/// * `Ok(())` for 200, the only status treated as success
/// * `Err(NetworkError)` with the tag for every other code; unknown codes
///   map to `GenericError`
pub fn classify(code: u16) -> Result<(), NetworkError> {
    match KnownStatus::from_code(code) {
        Some(KnownStatus::Success) => Ok(()),
        Some(KnownStatus::NotFound) => Err(NetworkError::InvalidStatusCode),
        Some(
            KnownStatus::BadRequest
            | KnownStatus::Unauthorized
            | KnownStatus::Forbidden
            | KnownStatus::MethodNotAllowed
            | KnownStatus::Timeout
            | KnownStatus::Conflict,
        ) => Err(NetworkError::InvalidUrl),
        Some(KnownStatus::InternalServerError) => Err(NetworkError::InternalError),
        Some(KnownStatus::RateLimit) => Err(NetworkError::RateLimit),
        None => Err(NetworkError::GenericError),
    }
}
