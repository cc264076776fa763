//! Error types for mail.gw operations.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by the client and the interactive loop.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure, or a failure building the HTTP client.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not the JSON shape we expected.
    #[error("invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a status the operation does not accept.
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),

    /// The configured API base URL cannot be used.
    #[error("invalid base URL `{0}`")]
    InvalidBaseUrl(String),

    /// The configured user agent is not a valid header value.
    #[error("invalid user agent `{0}`")]
    InvalidUserAgent(String),

    /// Domain discovery came back empty or failed.
    #[error("no domains available")]
    NoDomain,

    /// Login was requested before an account was created.
    #[error("no account credentials available")]
    NoAccount,

    /// A message operation was requested without a session token.
    #[error("not logged in")]
    NotLoggedIn,

    /// A required field was missing from an otherwise valid response.
    #[error("response is missing `{0}`")]
    ResponseParse(&'static str),

    /// Reading the menu input or writing to the terminal failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
