//! Error taxonomy surfaced by the request pipeline
//!
//! Every failure in the network layer collapses into one of these tags. The
//! set is closed and carries no payload, so callers can match on it without
//! worrying about transport-specific detail leaking through.

use thiserror::Error;

/// Errors that can occur when sending a request through the network manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum NetworkError {
    /// The endpoint URL could not be built, or the server rejected the request shape
    #[error("invalid URL")]
    InvalidUrl,

    /// The transport did not yield an HTTP response
    #[error("invalid response")]
    InvalidResponse,

    /// The server answered with a status code that marks the resource as missing
    #[error("invalid status code")]
    InvalidStatusCode,

    /// The request could not be encoded
    #[error("encoding error")]
    EncodingError,

    /// The response body could not be decoded into the expected type
    #[error("decoding error")]
    DecodingError,

    /// The server reported an internal failure
    #[error("internal error")]
    InternalError,

    /// Any failure that has no more specific tag
    #[error("generic error")]
    GenericError,

    #[error("server error")]
    ServerError,

    /// The server is throttling requests
    #[error("rate limit exceeded")]
    RateLimit,

    #[error("invalid parameters")]
    InvalidParameters,

    #[error("no data found")]
    NoDataFound,
}

impl NetworkError {
    /// Returns the canonical tag name for this error (e.g. `"invalidURL"`)
    pub fn code(&self) -> &'static str {
        match self {
            NetworkError::InvalidUrl => "invalidURL",
            NetworkError::InvalidResponse => "invalidResponse",
            NetworkError::InvalidStatusCode => "invalidStatusCode",
            NetworkError::EncodingError => "encodingError",
            NetworkError::DecodingError => "decodingError",
            NetworkError::InternalError => "internalError",
            NetworkError::GenericError => "genericError",
            NetworkError::ServerError => "serverError",
            NetworkError::RateLimit => "rateLimit",
            NetworkError::InvalidParameters => "invalidParameters",
            NetworkError::NoDataFound => "noDataFound",
        }
    }

    /// Returns the message shown to users when a request fails
    ///
    /// The text is derived purely from the tag, so two errors with the same
    /// tag always render the same message.
    pub fn message(&self) -> String {
        format!(
            "Oops! Looks like there are problems, try again later. {}",
            self.code().to_uppercase()
        )
    }
}
