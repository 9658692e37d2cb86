//! Transport collaborator
//!
//! The network manager only needs "send this request, give me bytes and
//! response metadata". Anything implementing [`Transport`] can stand in for
//! the real HTTP client, which is how the tests substitute stubs.

use async_trait::async_trait;
use reqwest::{Client, Request};
use thiserror::Error;

/// Errors raised by a transport while performing a request
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Transport-specific failure
    #[error("Transport failed: {0}")]
    Other(String),
}

/// Metadata describing how the transport answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMetadata {
    /// An HTTP response with its status code
    Http { status: u16 },
    /// The transport answered with something that is not HTTP
    Other,
}

/// Raw transport response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// Response body bytes
    pub body: Vec<u8>,
    /// Response metadata
    pub metadata: ResponseMetadata,
}

impl TransportResponse {
    /// Creates an HTTP response with the given status and body
    pub fn http(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            metadata: ResponseMetadata::Http { status },
        }
    }
}

/// Capability to perform a request asynchronously
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs `request` and returns the body with its metadata
    async fn perform(&self, request: Request) -> Result<TransportResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest::Client`
///
/// Non-success status codes are returned as data rather than errors so the
/// network manager can classify them.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestTransport {
    /// Create a new ReqwestTransport with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new ReqwestTransport with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn perform(&self, request: Request) -> Result<TransportResponse, TransportError> {
        let response = self.client.execute(request).await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(TransportResponse::http(status, body.to_vec()))
    }
}
