//! Network layer
//!
//! Routes describe endpoints, the builders turn them into transport requests,
//! and the [`NetworkManager`] runs the full fetch pipeline with caching and
//! error classification. [`PlacesService`] is the one concrete consumer.

pub mod domain;
pub mod error;
pub mod manager;
pub mod places;
pub mod request;
pub mod route;
pub mod status;
pub mod transport;
pub mod url_builder;

pub use domain::BaseDomain;
pub use error::NetworkError;
pub use manager::NetworkManager;
pub use places::{PlacesRoute, PlacesService, PlacesServing};
pub use request::{RequestBuilder, RequestProvider, REQUEST_TIMEOUT};
pub use route::{ContentType, HttpMethod, Route, RouteParameters};
pub use status::{classify, KnownStatus};
pub use transport::{
    ReqwestTransport, ResponseMetadata, Transport, TransportError, TransportResponse,
};
pub use url_builder::{EndpointUrlProvider, UrlBuilder};
