//! Request orchestration
//!
//! `NetworkManager` ties the pipeline together: resolve the base domain, build
//! the endpoint URL and request, consult the cache, call the transport on a
//! miss, classify the status, decode the body and populate the cache.
//!
//! Every failure surfaces as exactly one [`NetworkError`] tag. Nothing is
//! retried, and concurrent cold-cache calls for the same route are not
//! coalesced: each may fetch and write back independently.

use reqwest::Request;
use serde::de::DeserializeOwned;
use std::any::Any;
use std::sync::Arc;

use super::status;
use super::{
    EndpointUrlProvider, NetworkError, ReqwestTransport, RequestBuilder, RequestProvider,
    ResponseMetadata, Route, Transport, UrlBuilder,
};
use crate::cache::{CacheConfig, ExpiringCache};
use crate::config::Configuration;

/// Sends routes through the transport with response caching
///
/// Collaborators are injected explicitly; [`NetworkManager::new`] wires the
/// production defaults and the `with_*` methods swap individual pieces
/// (typically for tests).
#[derive(Clone)]
pub struct NetworkManager {
    config: Arc<Configuration>,
    transport: Arc<dyn Transport>,
    url_provider: Arc<dyn EndpointUrlProvider>,
    request_provider: Arc<dyn RequestProvider>,
    cache: Arc<ExpiringCache>,
}

impl NetworkManager {
    /// Creates a manager using reqwest, the default builders and an empty cache
    pub fn new(config: Arc<Configuration>) -> Self {
        Self {
            config,
            transport: Arc::new(ReqwestTransport::new()),
            url_provider: Arc::new(UrlBuilder::new()),
            request_provider: Arc::new(RequestBuilder::new()),
            cache: Arc::new(ExpiringCache::new()),
        }
    }

    /// Replaces the transport
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replaces the endpoint URL provider
    pub fn with_url_provider(mut self, url_provider: Arc<dyn EndpointUrlProvider>) -> Self {
        self.url_provider = url_provider;
        self
    }

    /// Replaces the request provider
    pub fn with_request_provider(mut self, request_provider: Arc<dyn RequestProvider>) -> Self {
        self.request_provider = request_provider;
        self
    }

    /// Replaces the response cache
    pub fn with_cache(mut self, cache: Arc<ExpiringCache>) -> Self {
        self.cache = cache;
        self
    }

    /// The response cache shared by every request sent through this manager
    pub fn cache(&self) -> &Arc<ExpiringCache> {
        &self.cache
    }

    /// Sends a request for `route` and decodes the response into `T`
    ///
    /// # Arguments
    /// * `route` - The endpoint to call
    /// * `cache_config` - Whether to read from and write to the cache
    ///
    /// # Returns
    /// * `Ok(T)` - The cached value on a hit, otherwise the decoded response
    /// * `Err(NetworkError)` - The tag of the first step that failed
    ///
    /// # Behavior
    /// - The cache key is the absolute endpoint URL
    /// - A cache hit skips the transport and the cache write entirely
    /// - Only successfully decoded responses are written back, and only when
    ///   `cache_config` is active
    pub async fn send<T>(&self, route: &Route, cache_config: CacheConfig) -> Result<T, NetworkError>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let base_path = route
            .base_domain
            .base_path(&self.config)
            .ok_or(NetworkError::InvalidUrl)?;

        let endpoint_url = self.url_provider.endpoint_url(&base_path, route)?;
        let cache_key = endpoint_url.as_str().to_string();
        let request = self.request_provider.create_request(endpoint_url, route)?;

        tracing::debug!(method = %request.method(), url = %request.url(), "Sending request");

        if let Some(cached) = self.cached_response::<T>(cache_config, &cache_key).await {
            tracing::debug!(key = %cache_key, "Response served from cache");
            return Ok(cached);
        }

        let response: T = self.perform_request(request).await?;
        self.insert_response(cache_config, cache_key, &response).await;

        Ok(response)
    }

    /// Performs the transport call, classifies the status and decodes the body
    async fn perform_request<T>(&self, request: Request) -> Result<T, NetworkError>
    where
        T: DeserializeOwned,
    {
        let response = self.transport.perform(request).await.map_err(|e| {
            tracing::warn!(error = %e, "Transport failed");
            NetworkError::GenericError
        })?;

        let status = match response.metadata {
            ResponseMetadata::Http { status } => status,
            ResponseMetadata::Other => {
                tracing::warn!("Transport returned a non-HTTP response");
                return Err(NetworkError::InvalidResponse);
            }
        };

        tracing::debug!(status, "Response received");

        if let Err(error) = status::classify(status) {
            tracing::warn!(status, error = error.code(), "Request failed");
            return Err(error);
        }

        tracing::debug!(body = %String::from_utf8_lossy(&response.body), "Raw response data");

        serde_json::from_slice(&response.body).map_err(|e| {
            tracing::warn!(error = %e, "Failed to decode response");
            NetworkError::DecodingError
        })
    }

    async fn cached_response<T>(&self, cache_config: CacheConfig, key: &str) -> Option<T>
    where
        T: Any + Clone,
    {
        if cache_config.ttl_seconds().is_none() {
            return None;
        }

        tracing::debug!(key, "Cache lookup");
        self.cache.get::<T, str>(key).await
    }

    async fn insert_response<T>(&self, cache_config: CacheConfig, key: String, response: &T)
    where
        T: Any + Clone + Send + Sync,
    {
        let Some(ttl_seconds) = cache_config.ttl_seconds() else {
            return;
        };
        if key.is_empty() {
            return;
        }

        tracing::debug!(key = %key, ttl_seconds, "Cache insert");
        self.cache.insert(key, response.clone(), ttl_seconds).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigKey;
    use crate::network::{BaseDomain, TransportError, TransportResponse};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Transport stub that replays one canned outcome and counts calls
    struct StubTransport {
        outcome: Mutex<Option<Result<TransportResponse, TransportError>>>,
        fallback: TransportResponse,
        calls: AtomicUsize,
        last_url: Mutex<Option<String>>,
    }

    impl StubTransport {
        fn responding(response: TransportResponse) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(None),
                fallback: response,
                calls: AtomicUsize::new(0),
                last_url: Mutex::new(None),
            })
        }

        fn failing(error: TransportError) -> Arc<Self> {
            let stub = Self::responding(TransportResponse::http(200, "{}"));
            *stub.outcome.lock().unwrap() = Some(Err(error));
            stub
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn perform(&self, request: Request) -> Result<TransportResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_url.lock().unwrap() = Some(request.url().to_string());
            match self.outcome.lock().unwrap().take() {
                Some(outcome) => outcome,
                None => Ok(self.fallback.clone()),
            }
        }
    }

    fn config() -> Arc<Configuration> {
        Arc::new(Configuration::empty().with_value(ConfigKey::BaseUrlPlaces, "https://example.com"))
    }

    fn manager(transport: Arc<StubTransport>) -> NetworkManager {
        NetworkManager::new(config()).with_transport(transport)
    }

    fn route() -> Route {
        Route::new("test/path", BaseDomain::Places)
    }

    #[tokio::test]
    async fn test_cache_hit_skips_transport() {
        let transport = StubTransport::responding(TransportResponse::http(200, "\"network\""));
        let manager = manager(transport.clone());
        manager
            .cache()
            .insert("https://example.com/test/path".to_string(), "cached".to_string(), 60.0)
            .await;

        let result: Result<String, _> = manager.send(&route(), CacheConfig::active()).await;

        assert_eq!(result.as_deref(), Ok("cached"));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_disabled_cache_ignores_entry_and_skips_write() {
        let transport = StubTransport::responding(TransportResponse::http(200, "\"network\""));
        let manager = manager(transport.clone());

        let result: Result<String, _> = manager.send(&route(), CacheConfig::Disabled).await;

        assert_eq!(result.as_deref(), Ok("network"));
        assert_eq!(transport.calls(), 1);
        assert!(manager.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_success_populates_cache_under_url_key() {
        let transport = StubTransport::responding(TransportResponse::http(200, "[1,2,3]"));
        let manager = manager(transport.clone());
        let route = route().with_query("key", "value");

        let result: Result<Vec<u8>, _> = manager.send(&route, CacheConfig::active()).await;

        assert_eq!(result, Ok(vec![1, 2, 3]));
        assert_eq!(
            transport.last_url.lock().unwrap().as_deref(),
            Some("https://example.com/test/path?key=value")
        );
        let cached: Option<Vec<u8>> = manager
            .cache()
            .get("https://example.com/test/path?key=value")
            .await;
        assert_eq!(cached, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_missing_base_url_is_invalid_url() {
        let transport = StubTransport::responding(TransportResponse::http(200, "\"x\""));
        let manager = NetworkManager::new(Arc::new(Configuration::empty()))
            .with_transport(transport.clone());

        let result: Result<String, _> = manager.send(&route(), CacheConfig::active()).await;

        assert_eq!(result, Err(NetworkError::InvalidUrl));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_none_domain_is_invalid_url() {
        let transport = StubTransport::responding(TransportResponse::http(200, "\"x\""));
        let manager = manager(transport.clone());
        let route = Route::new("test/path", BaseDomain::None);

        let result: Result<String, _> = manager.send(&route, CacheConfig::active()).await;

        assert_eq!(result, Err(NetworkError::InvalidUrl));
    }

    #[tokio::test]
    async fn test_status_errors_are_classified() {
        for (status, expected) in [
            (500, NetworkError::InternalError),
            (404, NetworkError::InvalidStatusCode),
            (401, NetworkError::InvalidUrl),
            (429, NetworkError::RateLimit),
            (302, NetworkError::GenericError),
        ] {
            let transport = StubTransport::responding(TransportResponse::http(status, "\"x\""));
            let manager = manager(transport);

            let result: Result<String, _> = manager.send(&route(), CacheConfig::active()).await;

            assert_eq!(result, Err(expected), "status {}", status);
            assert!(manager.cache().is_empty().await);
        }
    }

    #[tokio::test]
    async fn test_non_http_response_is_invalid_response() {
        let transport = StubTransport::responding(TransportResponse {
            body: b"\"x\"".to_vec(),
            metadata: ResponseMetadata::Other,
        });
        let manager = manager(transport);

        let result: Result<String, _> = manager.send(&route(), CacheConfig::active()).await;

        assert_eq!(result, Err(NetworkError::InvalidResponse));
    }

    #[tokio::test]
    async fn test_transport_error_is_generic() {
        let transport = StubTransport::failing(TransportError::Other("offline".to_string()));
        let manager = manager(transport);

        let result: Result<String, _> = manager.send(&route(), CacheConfig::active()).await;

        assert_eq!(result, Err(NetworkError::GenericError));
    }

    #[tokio::test]
    async fn test_invalid_body_is_decoding_error() {
        let transport = StubTransport::responding(TransportResponse::http(200, "invalid"));
        let manager = manager(transport);

        let result: Result<String, _> = manager.send(&route(), CacheConfig::active()).await;

        assert_eq!(result, Err(NetworkError::DecodingError));
        assert!(manager.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_cached_value_of_other_type_is_a_miss() {
        let transport = StubTransport::responding(TransportResponse::http(200, "\"fresh\""));
        let manager = manager(transport.clone());
        manager
            .cache()
            .insert("https://example.com/test/path".to_string(), 5_i32, 60.0)
            .await;

        let result: Result<String, _> = manager.send(&route(), CacheConfig::active()).await;

        assert_eq!(result.as_deref(), Ok("fresh"));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_writes_an_already_expired_entry() {
        let transport = StubTransport::responding(TransportResponse::http(200, "\"x\""));
        let manager = manager(transport.clone());

        let first: Result<String, _> = manager.send(&route(), CacheConfig::with_ttl(0.0)).await;
        let second: Result<String, _> = manager.send(&route(), CacheConfig::with_ttl(0.0)).await;

        assert_eq!(first.as_deref(), Ok("x"));
        assert_eq!(second.as_deref(), Ok("x"));
        assert_eq!(transport.calls(), 2);
    }
}
