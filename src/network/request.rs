//! Transport-level request construction
//!
//! Turns a validated endpoint URL and a [`Route`] into a `reqwest::Request`
//! carrying the method, media-type headers, timeout and body.

use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Body, Request};
use url::Url;

use super::{NetworkError, Route, RouteParameters};

/// Client-side timeout applied to every request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds transport requests for routes
pub trait RequestProvider: Send + Sync {
    /// Creates the request for `url` as described by `route`
    fn create_request(&self, url: Url, route: &Route) -> Result<Request, NetworkError>;
}

/// Default [`RequestProvider`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBuilder;

impl RequestBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl RequestProvider for RequestBuilder {
    /// Creates the request for `url` as described by `route`
    ///
    /// Fails with `EncodingError` only when a media type cannot be expressed
    /// as a header value (e.g. a multipart boundary containing control characters).
    fn create_request(&self, url: Url, route: &Route) -> Result<Request, NetworkError> {
        let mut request = Request::new(route.http_method.into(), url);

        let content_type = header_value(&route.content_type.value())?;
        let accept = header_value(&route.accept.value())?;
        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, content_type);
        headers.insert(ACCEPT, accept);

        *request.timeout_mut() = Some(REQUEST_TIMEOUT);

        if let Some(RouteParameters::Data(data)) = &route.parameters {
            *request.body_mut() = Some(Body::from(data.clone()));
        }

        Ok(request)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, NetworkError> {
    HeaderValue::from_str(value).map_err(|_| NetworkError::EncodingError)
}
