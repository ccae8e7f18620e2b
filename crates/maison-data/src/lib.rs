//! Backend API client for the Maison storefront.
//!
//! A thin, typed wrapper over outbound HTTP: base URL handling, the session
//! cookie, JSON bodies, `{ "data": T }` envelope unwrapping and `message`
//! error bodies.
//!
//! # Example
//!
//! ```rust,ignore
//! use maison_data::FetchClient;
//!
//! let client = FetchClient::new()
//!     .with_base_url("https://api.maison.example")
//!     .with_cookie("sid=abc123");
//!
//! let product: Product = client
//!     .get("/products/linen-shirt")
//!     .send_data()
//!     .await?;
//!
//! let order: Order = client
//!     .post("/orders")
//!     .json(&place_order)?
//!     .send_data()
//!     .await?;
//! ```

mod error;
mod request;
mod response;
mod state;
mod transport;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use state::{RequestState, UploadProgress};
pub use transport::{default_transport, Transport, UnavailableTransport};

#[cfg(all(target_arch = "wasm32", feature = "spin"))]
pub use transport::SpinTransport;

#[cfg(any(test, feature = "testing"))]
pub use transport::MockTransport;

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

/// HTTP client for the backend API.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers.keys())
            .finish()
    }
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a client using the platform's default transport.
    pub fn new() -> Self {
        Self::with_transport(default_transport())
    }

    /// Create a client over an explicit transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport,
        }
    }

    /// Prefix for relative request paths, usually the backend API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Header sent with every request from this client.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Forward the shopper's session cookie on every request.
    pub fn with_cookie(self, cookie: impl Into<String>) -> Self {
        let cookie = cookie.into();
        if cookie.is_empty() {
            return self;
        }
        self.with_default_header("Cookie", cookie)
    }

    /// The configured base URL.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Put, url)
    }

    pub fn patch(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Patch, url)
    }

    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Delete, url)
    }

    /// Request against `url`, resolved relative to the base URL unless absolute.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(method, full_url).accept("application/json");
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            builder,
            transport: Arc::clone(&self.transport),
        }
    }
}

/// Request builder that sends through its client's transport.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Append several query parameters.
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.builder = self.builder.query_pairs(pairs);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// JSON body with a matching `Content-Type`.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// The request as it will be sent.
    pub fn request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and return the raw response, whatever its status.
    pub async fn send(self) -> Result<Response, FetchError> {
        let method = self.builder.method().as_str();
        let path = self.builder.path().to_string();
        tracing::debug!(method, path = %path, "sending request");

        let result = self.transport.execute(self.builder).await;
        match &result {
            Ok(response) => {
                tracing::debug!(method, path = %path, status = response.status, "response received")
            }
            Err(e) => tracing::warn!(method, path = %path, error = %e, "request failed"),
        }
        result
    }

    /// Send, reject non-2xx responses, and decode the (possibly enveloped) body.
    pub async fn send_data<T: DeserializeOwned>(self) -> Result<T, FetchError> {
        self.send().await?.error_for_status()?.data()
    }

    /// Like [`send_data`](Self::send_data), updating `state` around the call.
    pub async fn send_tracked<T: DeserializeOwned>(
        self,
        state: &mut RequestState,
    ) -> Result<T, FetchError> {
        state.begin(self.builder.body_bytes().map(<[u8]>::len));
        let response = self.send().await;
        state.body_sent();
        let result = response.and_then(|r| r.error_for_status()).and_then(|r| r.data());
        state.finish(&result);
        result
    }
}

/// Common imports for service modules.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, RequestState, Response};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
    }

    fn client(mock: &Arc<MockTransport>) -> FetchClient {
        FetchClient::with_transport(mock.clone()).with_base_url("https://api.example.com/")
    }

    #[test]
    fn test_base_url_joining() {
        let mock = Arc::new(MockTransport::new());
        let req = client(&mock).get("/products");
        assert_eq!(req.request().url(), "https://api.example.com/products");

        let req = client(&mock).get("https://cdn.example.com/feed");
        assert_eq!(req.request().url(), "https://cdn.example.com/feed");
    }

    #[test]
    fn test_cookie_forwarded() {
        let mock = Arc::new(MockTransport::new());
        let req = client(&mock).with_cookie("sid=xyz").get("/auth/me");
        assert_eq!(req.request().header_value("cookie"), Some("sid=xyz"));

        let req = client(&mock).with_cookie("").get("/auth/me");
        assert_eq!(req.request().header_value("cookie"), None);
    }

    #[tokio::test]
    async fn test_send_data_unwraps_envelope() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, serde_json::json!({"data": {"id": 3}}));

        let item: Item = client(&mock).get("/items/3").send_data().await.unwrap();
        assert_eq!(item, Item { id: 3 });
        assert_eq!(
            mock.last_request().unwrap().url(),
            "https://api.example.com/items/3"
        );
    }

    #[tokio::test]
    async fn test_send_data_surfaces_message() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(404, serde_json::json!({"message": "Item not found"}));

        let err = client(&mock)
            .get("/items/9")
            .send_data::<Item>()
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), "Item not found");
    }

    #[tokio::test]
    async fn test_send_tracked_updates_state() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(500, serde_json::json!({"message": "Upload failed"}));

        let mut state = RequestState::new();
        let result = client(&mock)
            .post("/uploads")
            .body(vec![0u8; 64])
            .send_tracked::<Item>(&mut state)
            .await;

        assert!(result.is_err());
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Upload failed"));
        assert_eq!(state.progress.unwrap().total, 64);
        assert!(state.progress.unwrap().is_complete());
    }

    #[tokio::test]
    async fn test_unavailable_transport() {
        let client = FetchClient::with_transport(Arc::new(UnavailableTransport));
        let err = client.get("/anything").send().await.unwrap_err();
        assert!(matches!(err, FetchError::RequestError(_)));
    }
}
