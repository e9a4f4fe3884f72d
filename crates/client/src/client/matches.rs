//! Match client methods

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::{NewMatch, TennisMatch};

impl ApiClient {
    /// Matches scheduled in the given tournament
    pub async fn matches_by_tournament(
        &self,
        tournament_id: i64,
    ) -> Result<Vec<TennisMatch>, ClientError> {
        self.json(ApiRequest::get(format!("/matches/tournament/{tournament_id}")))
            .await
    }

    /// Matches the given referee officiates
    pub async fn matches_by_referee(
        &self,
        referee_id: i64,
    ) -> Result<Vec<TennisMatch>, ClientError> {
        self.json(ApiRequest::get(format!("/matches/referee/{referee_id}")))
            .await
    }

    /// Schedule a match (admin only, enforced server-side)
    pub async fn create_match(&self, params: &NewMatch) -> Result<TennisMatch, ClientError> {
        let request = ApiRequest::post("/matches/create")
            .query("tournamentId", params.tournament_id)
            .query("player1Id", params.player1_id)
            .query("player2Id", params.player2_id)
            .query("refereeId", params.referee_id)
            // the server parses ISO-8601, which NaiveDateTime's Display is not
            .query("startTime", params.start_time.format("%Y-%m-%dT%H:%M:%S"))
            .query("endTime", params.end_time.format("%Y-%m-%dT%H:%M:%S"))
            .query("currentUserId", params.current_user_id);
        self.json(request).await
    }

    /// Record a score, e.g. `6-4,3-6,7-5`
    pub async fn update_score(
        &self,
        match_id: i64,
        new_score: &str,
        current_user_id: i64,
    ) -> Result<TennisMatch, ClientError> {
        let request = ApiRequest::put(format!("/matches/{match_id}/score"))
            .query("newScore", new_score)
            .query("currentUserId", current_user_id);
        self.json(request).await
    }
}
