//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` and `BadRequest` get dedicated variants because callers act on
//! them differently from server faults. Both carry the message from the
//! server's `{"error": ...}` body. Any other non-2xx response lands in
//! `HttpError` with the raw status and body.

use std::fmt;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug)]
pub enum ClientError {
    /// The server returned 404.
    NotFound(String),

    /// The server returned 400; the request was rejected as malformed.
    BadRequest(String),

    /// The server returned a non-2xx status other than 400 or 404.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::NotFound(msg) => write!(f, "not found: {msg}"),
            ClientError::BadRequest(msg) => write!(f, "bad request: {msg}"),
            ClientError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ClientError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ClientError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ClientError {}
