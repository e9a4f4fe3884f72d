//! Tournament client methods

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::{NewTournament, RegistrationRequest, Tournament};

impl ApiClient {
    /// List every tournament
    pub async fn tournaments(&self) -> Result<Vec<Tournament>, ClientError> {
        self.json(ApiRequest::get("/tournaments/all")).await
    }

    /// Tournaments the given player has an approved registration for
    pub async fn approved_tournaments(
        &self,
        player_id: i64,
    ) -> Result<Vec<Tournament>, ClientError> {
        let request = ApiRequest::get("/tournaments/approved").query("playerId", player_id);
        self.json(request).await
    }

    /// Create a tournament (admin only, enforced server-side)
    pub async fn create_tournament(
        &self,
        params: &NewTournament,
    ) -> Result<Tournament, ClientError> {
        let request = ApiRequest::post("/tournaments/create")
            .query("name", &params.name)
            .query("startDate", params.start_date)
            .query("endDate", params.end_date)
            .query("registrationDeadline", params.registration_deadline)
            .query("maxPlayers", params.max_players)
            .query("minPlayers", params.min_players)
            .query("currentUserId", params.current_user_id);
        self.json(request).await
    }

    /// Ask to join a tournament; the server answers with the pending request
    pub async fn register_for_tournament(
        &self,
        tournament_id: i64,
        player_id: i64,
    ) -> Result<RegistrationRequest, ClientError> {
        let request = ApiRequest::post(format!("/tournaments/{tournament_id}/register"))
            .query("playerId", player_id);
        self.json(request).await
    }
}
