//! Error types for swapi.
//!
//! This module provides a unified error type with explicit variants for
//! fetch, reference resolution, cache, decoding, and input validation errors.

use thiserror::Error;

/// The unified error type for swapi operations.
///
/// Every failure in the client surfaces as one of these variants and is
/// propagated to the nearest caller. Nothing is retried internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Fetching a URL failed (network, status, or body).
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A reference field could not be resolved.
    #[error("reference error: {0}")]
    Reference(#[from] ReferenceError),

    /// The response cache could not be read or written.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// Input validation errors (API root, kind name, reference path, page).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A raw record could not be converted into its typed form.
    #[error("cannot decode {kind} record: {message}")]
    Decode { kind: String, message: String },
}

/// Errors raised while fetching a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network connection failed.
    #[error("connection to {url} failed: {message}")]
    Connection { url: String, message: String },

    /// Request timed out.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Generic HTTP error.
    #[error("HTTP error for {url}: {message}")]
    Http { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body is not valid JSON.
    #[error("{url} did not return JSON: {message}")]
    InvalidJson { url: String, message: String },
}

impl FetchError {
    /// Returns the URL the failed request was addressed to.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Connection { url, .. }
            | FetchError::Timeout { url }
            | FetchError::Http { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::InvalidJson { url, .. } => url,
        }
    }

    /// Check if this is a not-found response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status: 404, .. })
    }
}

/// Errors raised while resolving reference fields.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// The field holds neither a URL nor a list of URLs.
    #[error("field '{field}' is not a reference: found {found}")]
    Malformed { field: String, found: String },

    /// A path passes through a field that still holds URLs.
    #[error("field '{field}' must be populated before it can be traversed")]
    Unresolved { field: String },
}

/// Cache storage errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading or writing the backing store failed.
    #[error("IO error: {message}")]
    Io { message: String },

    /// The backing store holds data that cannot be read back.
    #[error("corrupt cache store: {message}")]
    Corrupt { message: String },
}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        CacheError::Io {
            message: err.to_string(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API root URL.
    #[error("invalid API root '{value}': {reason}")]
    ApiRoot { value: String, reason: String },

    /// Unknown resource kind.
    #[error("unknown resource kind '{value}'")]
    Kind { value: String },

    /// Invalid reference path.
    #[error("invalid reference path '{value}': {reason}")]
    Path { value: String, reason: String },

    /// Page numbers start at 1.
    #[error("invalid page number {page}: pages start at 1")]
    Page { page: u32 },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
