//! Pluggable request execution.
//!
//! The storefront's server functions run inside Spin, so the production
//! transport uses Spin's outbound HTTP. Native builds get a transport that
//! refuses to send, and tests script responses with [`MockTransport`].

use crate::{FetchError, RequestBuilder, Response};
use async_trait::async_trait;

/// Executes a request and returns the raw response.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport: Send + Sync {
    /// Send the request.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Spin outbound HTTP.
#[cfg(all(target_arch = "wasm32", feature = "spin"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinTransport;

#[cfg(all(target_arch = "wasm32", feature = "spin"))]
#[async_trait(?Send)]
impl Transport for SpinTransport {
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        use crate::Method;
        use spin_sdk::http::{Method as SpinMethod, Request};

        let method = match request.method() {
            Method::Get => SpinMethod::Get,
            Method::Post => SpinMethod::Post,
            Method::Put => SpinMethod::Put,
            Method::Patch => SpinMethod::Patch,
            Method::Delete => SpinMethod::Delete,
        };

        let mut builder = Request::builder();
        builder.method(method);
        builder.uri(request.url());
        for (key, value) in request.headers() {
            builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body_bytes() {
            builder.body(body.to_vec());
        }

        let response: spin_sdk::http::Response = spin_sdk::http::send(builder.build())
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = *response.status();
        let headers = response
            .headers()
            .map(|(k, v)| (k.to_string(), v.as_str().unwrap_or("").to_string()))
            .collect();

        Ok(Response::new(status, headers, response.into_body()))
    }
}

/// Transport for native builds, where no outbound HTTP runtime is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableTransport;

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for UnavailableTransport {
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        Err(FetchError::RequestError(format!(
            "no HTTP transport available for {} {}",
            request.method().as_str(),
            request.path()
        )))
    }
}

/// The transport used when none is configured explicitly.
pub fn default_transport() -> std::sync::Arc<dyn Transport> {
    #[cfg(all(target_arch = "wasm32", feature = "spin"))]
    {
        std::sync::Arc::new(SpinTransport)
    }

    #[cfg(not(all(target_arch = "wasm32", feature = "spin")))]
    {
        std::sync::Arc::new(UnavailableTransport)
    }
}

#[cfg(any(test, feature = "testing"))]
pub use mock::MockTransport;

#[cfg(any(test, feature = "testing"))]
mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted transport: replays queued responses in order and records
    /// every request it receives.
    #[derive(Debug, Default)]
    pub struct MockTransport {
        responses: Mutex<VecDeque<Result<Response, FetchError>>>,
        requests: Mutex<Vec<RequestBuilder>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a JSON response.
        pub fn push_json(&self, status: u16, body: serde_json::Value) -> &Self {
            self.push(Ok(Response::json_body(status, &body)))
        }

        /// Queue an empty `204 No Content`.
        pub fn push_empty(&self) -> &Self {
            self.push(Ok(Response::new(204, Default::default(), Vec::new())))
        }

        /// Queue an arbitrary outcome.
        pub fn push(&self, outcome: Result<Response, FetchError>) -> &Self {
            self.responses
                .lock()
                .expect("mock transport poisoned")
                .push_back(outcome);
            self
        }

        /// Requests received so far.
        pub fn requests(&self) -> Vec<RequestBuilder> {
            self.requests
                .lock()
                .expect("mock transport poisoned")
                .clone()
        }

        /// The most recent request.
        pub fn last_request(&self) -> Option<RequestBuilder> {
            self.requests().pop()
        }
    }

    #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
    #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
    impl Transport for MockTransport {
        async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            self.requests
                .lock()
                .expect("mock transport poisoned")
                .push(request.clone());
            self.responses
                .lock()
                .expect("mock transport poisoned")
                .pop_front()
                .unwrap_or_else(|| {
                    Err(FetchError::RequestError(format!(
                        "unexpected request {} {}",
                        request.method().as_str(),
                        request.url()
                    )))
                })
        }
    }
}
