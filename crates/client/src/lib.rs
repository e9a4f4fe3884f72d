//! Courtside API client
//!
//! Session-layer library for the Courtside tennis-tournament service. It owns
//! the persisted access/refresh token pair ([`session`]) and the authenticated
//! request gateway ([`client`]) that attaches bearer credentials to every
//! outbound call, exchanges the refresh token once when the server rejects an
//! access token, and forces logout when recovery is impossible. View code sits
//! on top of this crate and renders whatever the typed endpoint methods
//! return.

pub mod client;
pub mod error;
pub mod session;
pub mod types;

pub use client::{ApiClient, ApiClientBuilder, ApiRequest};
pub use error::ClientError;
pub use session::{
    FileSessionStore, MemorySessionStore, NoopSessionEvents, Session, SessionEvents, SessionStore,
};
