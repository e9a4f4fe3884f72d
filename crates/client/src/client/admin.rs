//! Administrative client methods

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::{ExportFormat, User};

impl ApiClient {
    /// List every user (admin only, enforced server-side)
    pub async fn admin_users(&self, current_user_id: i64) -> Result<Vec<User>, ClientError> {
        let request = ApiRequest::get("/admin/users").query("currentUserId", current_user_id);
        self.json(request).await
    }

    /// Delete a user by id (admin only, enforced server-side)
    pub async fn delete_user(&self, id: i64, current_user_id: i64) -> Result<(), ClientError> {
        let request =
            ApiRequest::delete(format!("/admin/users/{id}")).query("currentUserId", current_user_id);
        self.send(request).await.map(|_| ())
    }

    /// Export a tournament's matches as a csv or txt blob
    pub async fn export_matches(
        &self,
        format: ExportFormat,
        tournament_id: i64,
        current_user_id: i64,
    ) -> Result<String, ClientError> {
        let request = ApiRequest::get("/admin/export")
            .query("format", format)
            .query("tournamentId", tournament_id)
            .query("currentUserId", current_user_id);
        self.text(request).await
    }
}
