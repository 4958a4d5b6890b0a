//! Plain-data requests and responses exchanged with whoever owns the socket.
//!
//! `path` on a request is the full URL including any query string. Responses
//! carry the body as text since every todo endpoint speaks JSON.

use serde::Serialize;

use crate::error::ClientError;
use crate::types::ErrorBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Request with no body and no headers.
    pub fn bodyless(method: HttpMethod, path: String) -> Self {
        Self {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Request whose body is `payload` encoded as JSON.
    pub fn json<T: Serialize>(
        method: HttpMethod,
        path: String,
        payload: &T,
    ) -> Result<Self, ClientError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ClientError::Serialization(e.to_string()))?;
        Ok(Self {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Message from an `{"error": ...}` body, or the raw body when the server
    /// sent something else.
    pub fn error_message(&self) -> String {
        serde_json::from_str::<ErrorBody>(&self.body)
            .map(|b| b.error)
            .unwrap_or_else(|_| self.body.clone())
    }
}
