//! Client for the todo service that never opens a socket itself.
//!
//! [`TodoClient`] turns each operation into an [`HttpRequest`] and reads the
//! matching [`HttpResponse`] back into typed values. Sending the request is
//! left to the caller, so any HTTP stack (or none, in tests) can drive it.
//!
//! Wire types are declared here rather than shared with the server crate; the
//! integration test runs both sides together to catch drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ClientError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{ListQuery, NewTodo, Todo, UpdateTodo, UpdatedTodo};
