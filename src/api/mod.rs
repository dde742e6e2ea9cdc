//! REST contract consumed by the board.
//!
//! The state reducers only talk to a [`UserBackend`]. [`HttpBackend`] is the
//! production implementation; tests plug in an in-memory one.
pub mod http;

use serde::{Deserialize, Serialize};

pub use http::HttpBackend;

/// A persisted user as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Request body for create and update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

impl UserPayload {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Any failed request. Callers treat every variant the same way.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid user id {0:?}")]
    InvalidId(String),
}

/// Operations of the users endpoint, scoped by backend variant.
pub trait UserBackend {
    /// `GET /api/{backend}/users`
    fn list_users(&self, backend: &str) -> Result<Vec<UserRecord>, ApiError>;
    /// `GET /api/{backend}/users/{id}`
    fn fetch_user(&self, backend: &str, id: i64) -> Result<UserRecord, ApiError>;
    /// `POST /api/{backend}/users`
    fn create_user(&self, backend: &str, payload: &UserPayload) -> Result<UserRecord, ApiError>;
    /// `PUT /api/{backend}/users/{id}`
    fn update_user(
        &self,
        backend: &str,
        id: i64,
        payload: &UserPayload,
    ) -> Result<UserRecord, ApiError>;
    /// `DELETE /api/{backend}/users/{id}`; the response body is ignored.
    fn delete_user(&self, backend: &str, id: i64) -> Result<(), ApiError>;
}

/// Collection URL for a backend variant.
pub fn users_url(api_url: &str, backend: &str) -> String {
    format!("{}/api/{}/users", api_url.trim_end_matches('/'), backend)
}

/// Item URL for a single user.
pub fn user_url(api_url: &str, backend: &str, id: i64) -> String {
    format!("{}/{}", users_url(api_url, backend), id)
}
