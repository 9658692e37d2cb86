//! Declarative endpoint descriptors
//!
//! A [`Route`] describes one logical HTTP endpoint: where it lives, how it is
//! called and what it sends. Routes are plain values built at the call site
//! and never mutated once handed to the network manager.

use super::BaseDomain;

/// HTTP methods supported by routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }
}

/// Media types used for the `Content-Type` and `Accept` headers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContentType {
    /// JSON payloads
    #[default]
    Json,
    /// Key-value pairs encoded as a query string
    FormUrlEncoded,
    /// Multipart form data; the boundary separates the parts
    MultipartFormData { boundary: String },
}

impl ContentType {
    /// Returns the header value for this media type
    pub fn value(&self) -> String {
        match self {
            ContentType::Json => "application/json".to_string(),
            ContentType::FormUrlEncoded => "application/x-www-form-urlencoded".to_string(),
            ContentType::MultipartFormData { boundary } => {
                format!("multipart/form-data; boundary=\"{}\"", boundary)
            }
        }
    }
}

/// Request payload attached to a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteParameters {
    /// Raw bytes sent as the request body
    Data(Vec<u8>),
}

/// Descriptor for a single logical endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Path appended to the base URL (e.g. `"main/locations.json"`)
    pub path: String,
    /// Logical domain resolved to a base URL at request time
    pub base_domain: BaseDomain,
    /// Query parameters, in order; duplicates are kept
    pub query_items: Vec<(String, String)>,
    /// HTTP method
    pub http_method: HttpMethod,
    /// Optional request body
    pub parameters: Option<RouteParameters>,
    /// Value for the `Content-Type` header
    pub content_type: ContentType,
    /// Value for the `Accept` header
    pub accept: ContentType,
}

impl Route {
    /// Creates a GET route exchanging JSON with no query and no body
    pub fn new(path: impl Into<String>, base_domain: BaseDomain) -> Self {
        Self {
            path: path.into(),
            base_domain,
            query_items: Vec::new(),
            http_method: HttpMethod::Get,
            parameters: None,
            content_type: ContentType::Json,
            accept: ContentType::Json,
        }
    }

    /// Appends a query parameter
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_items.push((name.into(), value.into()));
        self
    }

    /// Sets the HTTP method
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.http_method = method;
        self
    }

    /// Sets a raw request body
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.parameters = Some(RouteParameters::Data(body.into()));
        self
    }

    /// Sets the `Content-Type` of the request
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Sets the `Accept` media type
    pub fn with_accept(mut self, accept: ContentType) -> Self {
        self.accept = accept;
        self
    }
}
