//! Authenticated request gateway
//!
//! Every outbound API call funnels through [`ApiClient::send`], which attaches
//! the current access token, detects authorization failures, coordinates a
//! single-flight token refresh, and replays the failed call exactly once.

mod admin;
mod auth;
mod matches;
mod request;
mod tournaments;
mod users;

pub use request::ApiRequest;

use crate::error::ClientError;
use crate::session::{NoopSessionEvents, SessionEvents, SessionStore};
use crate::types::TokenPair;
use reqwest::{header, Client, ClientBuilder, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const REFRESH_PATH: &str = "/users/refresh-token";

/// API client for the Courtside service
///
/// Cheap to clone; all clones share the same session store and refresh
/// coordination.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    events: Arc<dyn SessionEvents>,
    /// Guards the refresh protocol: while one task exchanges the refresh
    /// token, every other authorization victim waits here and then adopts
    /// the outcome instead of issuing its own exchange.
    refresh_gate: tokio::sync::Mutex<()>,
    /// Serializes forced-logout teardown so the event fires once per session.
    logout_gate: std::sync::Mutex<()>,
}

impl ApiClient {
    /// Create a new client builder
    #[must_use]
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Whether a session is currently stored
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.store.load().is_some()
    }

    /// Issue a request through the gateway
    ///
    /// Success returns the response unchanged. An authorization failure
    /// (401/403) triggers the refresh protocol and exactly one resubmission;
    /// any other error status comes back verbatim as [`ClientError::Http`]
    /// with the session untouched.
    pub async fn send(&self, request: ApiRequest) -> Result<Response, ClientError> {
        let token = self.inner.store.load().map(|s| s.access_token);
        let response = match self.dispatch(&request, token.as_deref()).await {
            Ok(response) => response,
            Err(err) => {
                warn!(path = request.path(), %err, "no response from server");
                self.force_logout();
                return Err(ClientError::Network(err));
            }
        };
        if !is_auth_failure(response.status()) {
            return finish(response).await;
        }

        let failed_token = match token {
            Some(token) => token,
            None => {
                // Unauthenticated call rejected; nothing to refresh with.
                self.force_logout();
                return Err(ClientError::AuthExpired);
            }
        };
        let fresh = self.refresh_access_token(&failed_token).await?;

        debug!(path = request.path(), "retrying with refreshed access token");
        let retry = match self.dispatch(&request, Some(&fresh)).await {
            Ok(response) => response,
            Err(err) => {
                self.force_logout();
                return Err(ClientError::Network(err));
            }
        };
        if is_auth_failure(retry.status()) {
            // Already retried once; give up rather than loop.
            self.force_logout();
            return Err(ClientError::AuthExpired);
        }
        finish(retry).await
    }

    /// Issue a request and deserialize the JSON response body
    pub async fn json<T: serde::de::DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        let body = self.text(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Issue a request and return the raw response body as text
    pub async fn text(&self, request: ApiRequest) -> Result<String, ClientError> {
        let response = self.send(request).await?;
        response.text().await.map_err(ClientError::Network)
    }

    /// Build and send one attempt, attaching the given bearer token if any
    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.inner.base_url, request.path());
        let mut builder = self.inner.http.request(request.method().clone(), url);
        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.send().await
    }

    /// Exchange the refresh token for a new pair, single-flight
    ///
    /// Returns the access token to retry with. The first task to observe an
    /// expired access token performs the exchange; tasks that arrive while it
    /// is in flight wait on the gate and then re-read the store, which either
    /// holds a newer token (exchange succeeded) or nothing (it failed).
    async fn refresh_access_token(&self, failed_token: &str) -> Result<String, ClientError> {
        let _flight = self.inner.refresh_gate.lock().await;

        let session = match self.inner.store.load() {
            Some(session) => session,
            None => {
                self.force_logout();
                return Err(ClientError::AuthExpired);
            }
        };
        if session.access_token != failed_token {
            // Someone else already refreshed while we waited.
            return Ok(session.access_token);
        }
        if session.refresh_token.is_empty() {
            self.force_logout();
            return Err(ClientError::AuthExpired);
        }

        debug!("access token rejected, exchanging refresh token");
        let request = ApiRequest::post(REFRESH_PATH);
        let response = match self.dispatch(&request, Some(&session.refresh_token)).await {
            Ok(response) => response,
            Err(err) => {
                warn!(%err, "refresh call got no response");
                self.force_logout();
                return Err(ClientError::AuthExpired);
            }
        };
        if !response.status().is_success() {
            // The refresh call itself was rejected; never refresh twice.
            warn!(status = response.status().as_u16(), "refresh token rejected");
            self.force_logout();
            return Err(ClientError::AuthExpired);
        }
        let tokens: TokenPair = match response.json().await {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!(%err, "refresh response was unreadable");
                self.force_logout();
                return Err(ClientError::AuthExpired);
            }
        };
        self.inner
            .store
            .save(&session.with_tokens(&tokens));
        Ok(tokens.access_token)
    }

    /// Tear down the session after an unrecoverable failure
    ///
    /// Serialized so concurrent failures observe one transition: the first
    /// caller clears the store and notifies, later callers find it gone.
    fn force_logout(&self) {
        let _gate = self.inner.logout_gate.lock().expect("logout gate poisoned");
        if self.inner.store.load().is_some() {
            self.inner.store.clear();
            debug!("session cleared, signalling forced logout");
            self.inner.events.forced_logout();
        }
    }
}

async fn finish(response: Response) -> Result<Response, ClientError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ClientError::from_response(response).await)
    }
}

fn is_auth_failure(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    store: Option<Arc<dyn SessionStore>>,
    events: Option<Arc<dyn SessionEvents>>,
}

impl ApiClientBuilder {
    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the session store the gateway reads and writes
    #[must_use]
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the observer notified on forced logout
    #[must_use]
    pub fn session_events(mut self, events: Arc<dyn SessionEvents>) -> Self {
        self.events = Some(events);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let base_url = base_url.trim_end_matches('/').to_string();
        let store = self
            .store
            .ok_or_else(|| ClientError::Configuration("session store is required".into()))?;
        let events = self
            .events
            .unwrap_or_else(|| Arc::new(NoopSessionEvents));

        let mut builder = ClientBuilder::new().user_agent(
            self.user_agent
                .unwrap_or_else(|| "courtside-client/0.1.0".into()),
        );
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| ClientError::Configuration(err.to_string()))?;

        Ok(ApiClient {
            inner: Arc::new(Inner {
                http,
                base_url,
                store,
                events,
                refresh_gate: tokio::sync::Mutex::new(()),
                logout_gate: std::sync::Mutex::new(()),
            }),
        })
    }
}
