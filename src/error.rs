//! Error types for the fakemailgenerator client.

use thiserror::Error;

/// Errors that can occur during fakemailgenerator operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed or the server returned a non-success status.
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Expected markup structure was missing from a fetched page.
    #[error("failed to parse page: {msg}")]
    Parse { msg: String },

    /// The domain catalog came back empty while generating an address.
    #[error("no domains available")]
    NoDomains,

    /// The watched address's domain is not offered by the site.
    #[error("the provided email domain ({domain}) is not among the fetched domains")]
    UnsupportedDomain { domain: String },
}
