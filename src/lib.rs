//! Fakemailgenerator Rust Client
//!
//! An async client for the fakemailgenerator.com disposable email site.
//! The site exposes no API, so every operation scrapes an HTML page:
//! the front page for the domain catalog, the inbox page for message
//! listings, and each message's rendering frame for its body text.
//!
//! Messages are deduplicated by a `to`/`from`/`subject` fingerprint, so
//! polling the same inbox repeatedly never accumulates duplicates.
//!
//! # Example
//! ```no_run
//! use fakemailgen_client::{Client, Inbox};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fakemailgen_client::Error> {
//!     let client = Client::builder().name("myalias").build()?;
//!     let email = client.generate_email().await?;
//!
//!     let mut inbox = Inbox::new();
//!     let cancel = CancellationToken::new();
//!     client.watch(&email, &mut inbox, cancel).await?;
//!
//!     for msg in inbox.messages() {
//!         println!("From: {}, Subject: {}", msg.from, msg.subject);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;
mod parse;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use models::{Inbox, Message};

/// Result type alias for fakemailgenerator operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
