//! Error types, one per component.
//!
//! # Design
//! Nothing here classifies or recovers: transport failures travel up to the
//! caller inside `ApiError::Transport` / `LoadError::Fetch` untouched, and a
//! non-2xx response only surfaces as an error if its body is not JSON.

use std::io;

use thiserror::Error;

/// Failure reported by a [`crate::Transport`] implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// DNS, connect, or I/O failure while talking to the server.
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors returned by `ApiClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport failed; the inner error is passed through as-is.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A method string outside GET/POST/PUT/PATCH/DELETE.
    #[error("unknown HTTP method: {0}")]
    UnknownMethod(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body was not JSON of the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),
}

/// Errors returned by `ScriptLoader::import_url`.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("script download failed: {0}")]
    Fetch(#[from] TransportError),

    #[error("script storage failed: {0}")]
    Storage(#[from] io::Error),
}
