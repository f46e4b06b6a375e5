// src/error.rs
//! Hard failures only. Anything that is merely *absent* in a source document
//! is represented in-band (empty string, `None`, empty list) and never shows
//! up here.

use thiserror::Error;

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The fetched text is not an HTML document at all.
    #[error("could not process source document: {0}")]
    DocumentUnparseable(String),

    /// The fetched text is not JSON.
    #[error("could not process source payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("invalid identifier {input:?}: {reason}")]
    InvalidIdentifier { input: String, reason: &'static str },

    #[error("source not configured: {0}")]
    NotConfigured(&'static str),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Fetch-boundary failures. Messages deliberately omit the upstream URL.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("external source request timeout")]
    Timeout,

    #[error("could not connect to the external source")]
    Connect,

    #[error("record not found")]
    NotFound,

    #[error("external source returned status code {0}")]
    Status(u16),

    #[error("unreadable response body: {0}")]
    Body(String),
}

impl FetchError {
    /// Only these are worth a second attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::Connect => true,
            FetchError::Status(code) => *code >= 500,
            FetchError::NotFound | FetchError::Body(_) => false,
        }
    }
}
