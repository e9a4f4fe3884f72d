//! Data transfer types for the Courtside API
//!
//! Field names follow the server's camelCase JSON. The server owns all
//! business validation; these types only give the wire format a shape.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// User role as returned by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Player,
    Referee,
    Admin,
}

/// Failed to parse a role string
#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    // The server is not consistent about casing, so parse case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PLAYER" => Ok(Self::Player),
            "REFEREE" => Ok(Self::Referee),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Player => "PLAYER",
            Self::Referee => "REFEREE",
            Self::Admin => "ADMIN",
        };
        f.write_str(s)
    }
}

/// Minimal user representation returned by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Response to a successful login or registration: a token pair plus the
/// identity it belongs to, as one flat record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl AuthResponse {
    /// The identity fields of the response
    #[must_use]
    pub fn user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Fresh token pair minted by the refresh endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Tournament as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub registration_deadline: NaiveDate,
    pub max_players: u32,
    pub min_players: u32,
    pub cancelled: bool,
}

/// Parameters for creating a tournament
#[derive(Debug, Clone)]
pub struct NewTournament {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub registration_deadline: NaiveDate,
    pub max_players: u32,
    pub min_players: u32,
    pub current_user_id: i64,
}

/// Match as returned by the API, flattened to one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TennisMatch {
    pub id: i64,
    pub tournament_id: i64,
    pub tournament_name: String,
    pub player1_id: i64,
    pub player1_username: String,
    pub player2_id: i64,
    pub player2_username: String,
    pub referee_id: i64,
    pub referee_username: Option<String>,
    pub score: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
}

/// Parameters for scheduling a match
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub tournament_id: i64,
    pub player1_id: i64,
    pub player2_id: i64,
    pub referee_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub current_user_id: i64,
}

/// State of a player's registration request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Denied,
}

/// A player's request to join a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub id: i64,
    pub player_id: i64,
    pub player_username: String,
    pub tournament_id: i64,
    pub tournament_name: String,
    pub status: RequestStatus,
    pub created_at: NaiveDateTime,
}

/// Fields of an account update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub new_username: Option<String>,
    pub new_email: Option<String>,
    pub new_password: Option<String>,
}

/// Export file format for match data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Txt,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "csv",
            Self::Txt => "txt",
        })
    }
}
