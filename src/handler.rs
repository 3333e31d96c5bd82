//! Request and response types shared by handlers and middleware.

use std::sync::Arc;

use http::Method;
use serde::Serialize;
use serde_json::{json, Value};

use crate::ids::RequestId;
use crate::validator::RequestPart;

/// A terminal request handler.
///
/// Handlers receive a mutable request (middleware may have replaced validated
/// parts with their normalized values) and either produce a response or an
/// error. Errors propagate out of the composed chain to the host's generic
/// error-handling path.
pub type Handler = Arc<dyn HandlerFn>;

/// Trait alias for the handler function signature; blanket-implemented for
/// every matching closure so `Arc::new(|req| ...)` coerces to [`Handler`].
pub trait HandlerFn:
    Fn(&mut HandlerRequest) -> anyhow::Result<HandlerResponse> + Send + Sync
{
}

impl<F> HandlerFn for F where
    F: Fn(&mut HandlerRequest) -> anyhow::Result<HandlerResponse> + Send + Sync
{
}

impl std::fmt::Debug for dyn HandlerFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Handler")
    }
}

/// Request data passed through a middleware chain to a handler.
///
/// The three request parts (`params`, `query`, `body`) are plain JSON values
/// so schema validation can inspect and replace them wholesale. `body` is
/// `Value::Null` when the request carried none.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// Unique request ID for log correlation
    pub request_id: RequestId,
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path as received by the host
    pub path: String,
    /// Path parameters as a JSON object (e.g. `{"id": "123"}`)
    pub params: Value,
    /// Query string parameters as a JSON object
    pub query: Value,
    /// Request body parsed as JSON, `Null` if absent
    pub body: Value,
}

impl HandlerRequest {
    /// Create a request with empty parts.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        HandlerRequest {
            request_id: RequestId::new(),
            method,
            path: path.into(),
            params: json!({}),
            query: json!({}),
            body: Value::Null,
        }
    }

    /// Borrow one request part.
    #[inline]
    #[must_use]
    pub fn part(&self, part: RequestPart) -> &Value {
        match part {
            RequestPart::Body => &self.body,
            RequestPart::Params => &self.params,
            RequestPart::Query => &self.query,
        }
    }

    /// Mutably borrow one request part.
    ///
    /// Used by the validation middleware to replace a part with the
    /// validator's normalized value.
    #[inline]
    pub fn part_mut(&mut self, part: RequestPart) -> &mut Value {
        match part {
            RequestPart::Body => &mut self.body,
            RequestPart::Params => &mut self.params,
            RequestPart::Query => &mut self.query,
        }
    }
}

/// Response data produced by a handler or a short-circuiting middleware.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerResponse {
    /// HTTP status code (200, 400, etc.)
    pub status: u16,
    /// HTTP response headers
    #[serde(skip_serializing)]
    pub headers: Vec<(String, String)>,
    /// JSON response body
    pub body: Value,
}

impl HandlerResponse {
    #[must_use]
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Value) -> Self {
        HandlerResponse {
            status,
            headers,
            body,
        }
    }

    /// A `200 OK` response with a JSON body.
    #[must_use]
    pub fn ok_json(body: Value) -> Self {
        Self::new(200, Vec::new(), body)
    }

    /// An error response with the standard `{"error": "<message>"}` body.
    #[must_use]
    pub fn error_json(status: u16, message: &str) -> Self {
        Self::new(status, Vec::new(), json!({ "error": message }))
    }

    /// Set a header, replacing any existing header with the same name
    /// (case-insensitive).
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value));
    }
}
