//! Request-scoped access to the commerce backend (server only).

use leptos::prelude::*;
use leptos::server_fn::error::ServerFnError;
use leptos_wasi::prelude::StatusCode;
use leptos_wasi::response::ResponseOptions;
use maison_cache::{Cache, SessionId};
use maison_data::FetchClient;
use maison_services::{ServiceError, ServiceResult, StorefrontConfig};
use maison_store::{AppStore, StoreError};
use std::future::Future;

/// Backend client carrying the shopper's cookie, plus site configuration.
pub struct Backend {
    pub client: FetchClient,
    pub config: StorefrontConfig,
    /// From the `maison_sid` cookie, when the browser sent one.
    session: Option<SessionId>,
}

impl Backend {
    pub fn from_request() -> Result<Self, ServerFnError> {
        let config = StorefrontConfig::from_env().map_err(|e| {
            tracing::error!(error = %format!("{e:#}"), "invalid storefront configuration");
            ServerFnError::new("Storefront is misconfigured")
        })?;
        let cookie = incoming_cookie();
        let session = cookie.as_deref().and_then(SessionId::from_cookie_header);
        let client = match cookie {
            Some(cookie) => config.client().with_cookie(cookie),
            None => config.client(),
        };
        Ok(Self {
            client,
            config,
            session,
        })
    }

    /// Drive a service call to completion on Spin's executor.
    pub fn run<T>(&self, call: impl Future<Output = ServiceResult<T>>) -> Result<T, ServerFnError> {
        spin_sdk::http::run(call).map_err(into_server_error)
    }

    /// Like [`Backend::run`] for content the page can render without.
    pub fn run_or_default<T: Default>(&self, what: &str, call: impl Future<Output = ServiceResult<T>>) -> T {
        spin_sdk::http::run(call).unwrap_or_else(|error| {
            tracing::warn!(%error, what, "optional content unavailable");
            T::default()
        })
    }
}

impl Backend {
    /// The server's copy of a shopper's cart and wishlist, kept in the
    /// Spin Key-Value Store named by `store_name`.
    fn shopper_state(&self, session: SessionId) -> Option<AppStore> {
        let cache = Cache::open(&self.config.store_name)
            .map_err(|e| tracing::warn!(error = %e, "shopper store unavailable"))
            .ok()?;
        AppStore::hydrate(cache, session)
            .map_err(|e| tracing::warn!(error = %e, "shopper state unreadable"))
            .ok()
    }

    /// Record a backend answer for this shopper. The first record issues
    /// the session cookie.
    pub fn remember(&self, apply: impl FnOnce(&mut AppStore) -> Result<(), StoreError>) {
        let session = match &self.session {
            Some(session) => session.clone(),
            None => {
                let session = SessionId::generate();
                set_cookie(&session.to_set_cookie());
                session
            }
        };
        let Some(mut state) = self.shopper_state(session) else {
            return;
        };
        if let Err(e) = apply(&mut state) {
            tracing::warn!(error = %e, "could not record shopper state");
        }
    }

    /// Drop whatever was recorded for this shopper.
    pub fn forget(&self) {
        let Some(mut state) = self.session.clone().and_then(|s| self.shopper_state(s)) else {
            return;
        };
        if let Err(e) = state.logout() {
            tracing::warn!(error = %e, "could not clear shopper state");
        }
    }

    /// Like [`Backend::run`], answering from the recorded copy when the
    /// backend is down. Auth failures are never masked.
    pub fn run_or_recall<T>(
        &self,
        call: impl Future<Output = ServiceResult<T>>,
        recall: impl FnOnce(&AppStore) -> Option<T>,
    ) -> Result<T, ServerFnError> {
        let error = match spin_sdk::http::run(call) {
            Ok(value) => return Ok(value),
            Err(error) if error.is_unauthorized() => return Err(into_server_error(error)),
            Err(error) => error,
        };
        let recalled = self
            .session
            .clone()
            .and_then(|s| self.shopper_state(s))
            .and_then(|state| recall(&state));
        match recalled {
            Some(value) => {
                tracing::warn!(%error, "backend unavailable, serving recorded shopper state");
                Ok(value)
            }
            None => Err(into_server_error(error)),
        }
    }
}

fn incoming_cookie() -> Option<String> {
    let parts = use_context::<http::request::Parts>()?;
    parts
        .headers
        .get(http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn into_server_error(error: ServiceError) -> ServerFnError {
    if error.is_unauthorized() {
        set_status(StatusCode::UNAUTHORIZED);
    } else if error.is_not_found() {
        set_status(StatusCode::NOT_FOUND);
    }
    tracing::warn!(%error, "backend call failed");
    ServerFnError::new(error.user_message())
}

pub fn set_status(status: StatusCode) {
    if let Some(response) = use_context::<ResponseOptions>() {
        response.set_status(status);
    }
}

/// Pass the backend's `Set-Cookie` through to the browser.
pub fn relay_cookie(set_cookie: Option<String>) {
    if let Some(cookie) = set_cookie {
        set_cookie(&cookie);
    }
}

fn set_cookie(cookie: &str) {
    let Some(response) = use_context::<ResponseOptions>() else {
        return;
    };
    match http::HeaderValue::from_str(cookie) {
        Ok(value) => response.insert_header(http::header::SET_COOKIE, value),
        Err(e) => tracing::warn!(error = %e, "dropping malformed Set-Cookie"),
    }
}
