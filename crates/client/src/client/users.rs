//! User account client methods

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::{User, UserUpdate};

impl ApiClient {
    /// Fetch a single user by id
    pub async fn user(&self, id: i64) -> Result<User, ClientError> {
        self.json(ApiRequest::get(format!("/users/{id}"))).await
    }

    /// List every user
    pub async fn users(&self) -> Result<Vec<User>, ClientError> {
        self.json(ApiRequest::get("/users/all")).await
    }

    /// Update account fields; `None` fields are left unchanged
    ///
    /// When the updated account is the one logged in, the stored session's
    /// identity is replaced along with it, keeping the token pair.
    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<User, ClientError> {
        let request = ApiRequest::put(format!("/users/{id}"))
            .query_opt("newUsername", update.new_username.as_deref())
            .query_opt("newEmail", update.new_email.as_deref())
            .query_opt("newPassword", update.new_password.as_deref());
        let user: User = self.json(request).await?;
        if let Some(session) = self.inner.store.load() {
            if session.user.id == user.id {
                let mut session = session;
                session.user = user.clone();
                self.inner.store.save(&session);
            }
        }
        Ok(user)
    }

    /// Players matching the given filters, for referees building a program
    pub async fn filter_players(
        &self,
        username: Option<&str>,
        tournament_id: Option<i64>,
    ) -> Result<Vec<User>, ClientError> {
        let request = ApiRequest::get("/referee/players")
            .query_opt("username", username)
            .query_opt("tournamentId", tournament_id);
        self.json(request).await
    }
}
