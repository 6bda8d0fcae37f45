//! HTTP capability the client issues its calls through.
//!
//! The client only needs "send this JSON request, give me status + JSON
//! body back". Anything below that (TLS, pooling, redirects, timeouts) belongs
//! to the implementation; `reqwest::Client` is the default one.

use std::collections::BTreeMap;
use std::future::Future;

use http::{Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

pub mod http_client;

/// Fully resolved outgoing request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: StatusCode,
    /// Decoded JSON; non-JSON text is kept as a string, an empty body is `null`
    pub body: Value,
}

/// Failure below HTTP: nothing usable came back
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("invalid request: {0}")]
    Request(String),
    #[error("transport error: {0}")]
    Other(String),
}

pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Decode a raw response body the way the client expects it
pub fn decode_body(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}
