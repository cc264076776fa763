//! Data types exchanged with the mail.gw API.

use serde::{Deserialize, Serialize};

/// Key under which the API wraps every collection response.
pub(crate) const MEMBER_KEY: &str = "hydra:member";

/// A mail domain offered by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct Domain {
    /// Domain name, e.g. `example.org`.
    pub domain: String,
}

/// Credentials of the throwaway account registered for this run.
///
/// Also the JSON body of both `POST /accounts` and `POST /token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Full address, `local-part@domain`.
    pub address: String,
    /// Generated password.
    pub password: String,
}

/// Bearer token obtained from `POST /token`.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) token: String,
}

impl Session {
    /// The raw bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Sender of a message.
#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of the inbox listing.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageSummary {
    pub id: String,
    pub from: Sender,
    #[serde(default)]
    pub subject: Option<String>,
    /// ISO-8601 creation time as sent by the server.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Full content of a single message.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDetail {
    #[serde(default)]
    pub id: Option<String>,
    pub from: Sender,
    #[serde(default)]
    pub subject: Option<String>,
    /// Plain-text body.
    #[serde(default)]
    pub text: Option<String>,
}
