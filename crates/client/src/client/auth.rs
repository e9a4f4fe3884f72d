//! Authentication client methods

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::session::Session;
use crate::types::{AuthResponse, Role};
use tracing::debug;

impl ApiClient {
    /// Log in with username and password and persist the resulting session
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let request = ApiRequest::post("/users/login")
            .query("username", username)
            .query("password", password);
        let auth: AuthResponse = self.json(request).await?;
        self.inner.store.save(&Session::from_auth(&auth));
        debug!(username = %auth.username, "logged in");
        Ok(auth)
    }

    /// Register a new account and persist the resulting session
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<AuthResponse, ClientError> {
        let request = ApiRequest::post("/users/register")
            .query("username", username)
            .query("email", email)
            .query("password", password)
            .query("role", role);
        let auth: AuthResponse = self.json(request).await?;
        self.inner.store.save(&Session::from_auth(&auth));
        debug!(username = %auth.username, "registered");
        Ok(auth)
    }

    /// Log out: tell the server, then drop the local session
    ///
    /// The server call is a single best-effort attempt; the session is
    /// cleared whatever it returns. The forced-logout observer is not
    /// notified, since the caller initiated this transition.
    pub async fn logout(&self) {
        let token = self.inner.store.load().map(|s| s.access_token);
        let request = ApiRequest::post("/users/logout");
        if let Err(err) = self.dispatch(&request, token.as_deref()).await {
            debug!(%err, "logout call got no response");
        }
        self.inner.store.clear();
        debug!("logged out");
    }
}
