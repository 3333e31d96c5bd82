use std::fmt;

use http::Method;

use crate::validator::RequestPart;

/// Route configuration error
///
/// Returned by [`RouteBuilder`](crate::route::RouteBuilder) operations when a
/// module wires itself up inconsistently. Configuration errors surface
/// synchronously while the module constructor runs and abort only that
/// module's load; sibling modules are unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A handler is already registered for this method on this route
    DuplicateMethod {
        /// The HTTP method registered twice
        method: Method,
    },
    /// A validation schema is already defined for this method on this route
    DuplicateSchema {
        /// The HTTP method whose schema was defined twice
        method: Method,
    },
    /// No handler is registered for this method, so no terminal handler can
    /// be composed for it
    UnregisteredMethod {
        /// The HTTP method that was never registered
        method: Method,
    },
    /// A request-part schema failed to compile
    InvalidSchema {
        /// The request part the schema was attached to
        part: RequestPart,
        /// The compiler's error message
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DuplicateMethod { method } => {
                write!(f, "handler for {method} already registered on this route")
            }
            ConfigError::DuplicateSchema { method } => {
                write!(f, "validation schema for {method} already defined on this route")
            }
            ConfigError::UnregisteredMethod { method } => {
                write!(f, "no handler registered for {method} on this route")
            }
            ConfigError::InvalidSchema { part, message } => {
                write!(f, "invalid {part} schema: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Request validation failure
///
/// Produced when a request part does not satisfy its schema. Carried back to
/// the client as `400 {"error": "<message>"}`; never forwarded to the host's
/// generic error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The request part that failed validation
    pub part: RequestPart,
    /// The first schema violation reported by the validator
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.part, self.message)
    }
}

impl std::error::Error for ValidationError {}
