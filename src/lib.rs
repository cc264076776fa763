//! # mail.gw Client
//! Async wrapper around the mail.gw disposable email HTTP API, plus the interactive terminal session built on it: provision a throwaway inbox with random credentials, log in, list what arrives, and read single messages using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For developers who need a short-lived address for sign-up flows, integration tests, or demos without running mail infrastructure: build a [`Client`], call [`Client::create_account`] and [`Client::login`], then poll with [`Client::list_messages`] and read with [`Client::fetch_message`].
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. Requests are issued one at a time and awaited before the next one starts.
//!
//! ## Out of scope
//! No retries, rate-limit handling, pagination, caching, or token refresh. An expired session simply makes the inbox look empty.
//!
//! ## Errors
//! Account setup surfaces failures as [`Error`]. Message operations return an [`Outcome`], which separates "the server had nothing" from "the request failed" even though the terminal shows both the same way. The crate-wide [`Result`] alias wraps [`Error`].
//!
//! ## Example
//! ```no_run
//! use mailgw_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailgw_client::Error> {
//!     let mut client = Client::new()?;
//!     let account = client.create_account().await?;
//!     println!("Created: {}", account.address);
//!
//!     client.login().await?;
//!     if let Some(messages) = client.list_messages().await.found() {
//!         for msg in messages {
//!             println!("{}: {:?}", msg.from.address, msg.subject);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod app;
mod client;
pub mod credentials;
mod error;
mod models;
mod outcome;
pub mod render;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL};
pub use error::Error;
pub use models::{Account, Domain, MessageDetail, MessageSummary, Sender, Session};
pub use outcome::Outcome;

/// Result type alias for mail.gw operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
