//! Per-method, per-request-part JSON Schema validation.
//!
//! A route defines at most one [`ValidationSchema`] per HTTP method; the
//! schema maps request parts (body, params, query) to compiled JSON Schemas.
//! Validators are compiled once at module-build time and shared across
//! requests behind `Arc`, so no compilation happens on the request path.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use jsonschema::JSONSchema;
use serde_json::Value;

use crate::error::{ConfigError, ValidationError};

/// The validatable parts of an HTTP request.
///
/// Doubles as the key within a method's [`ValidationSchema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestPart {
    Body,
    Params,
    Query,
}

impl RequestPart {
    /// All parts, in the order the validation middleware visits them.
    pub const ALL: [RequestPart; 3] = [RequestPart::Body, RequestPart::Params, RequestPart::Query];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RequestPart::Body => "body",
            RequestPart::Params => "params",
            RequestPart::Query => "query",
        }
    }
}

impl fmt::Display for RequestPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JSON Schema compiled for one request part.
#[derive(Clone)]
struct CompiledSchema {
    compiled: Arc<JSONSchema>,
}

impl CompiledSchema {
    fn compile(part: RequestPart, schema: &Value) -> Result<Self, ConfigError> {
        let compiled = JSONSchema::compile(schema).map_err(|e| ConfigError::InvalidSchema {
            part,
            message: e.to_string(),
        })?;
        Ok(CompiledSchema {
            compiled: Arc::new(compiled),
        })
    }

    /// Validate a raw part value, returning the normalized value on success
    /// and the first schema violation otherwise.
    fn validate(&self, value: &Value) -> Result<Value, String> {
        match self.compiled.validate(value) {
            Ok(()) => Ok(value.clone()),
            Err(errors) => {
                let message = errors
                    .map(|e| e.to_string())
                    .next()
                    .unwrap_or_else(|| "schema violation".to_string());
                Err(message)
            }
        }
    }
}

/// Validation specification for one HTTP method: request part → compiled
/// schema. Parts without a validator are skipped at request time.
#[derive(Clone, Default)]
pub struct ValidationSchema {
    validators: HashMap<RequestPart, CompiledSchema>,
}

impl ValidationSchema {
    /// Whether a validator is configured for this part.
    #[must_use]
    pub fn has(&self, part: RequestPart) -> bool {
        self.validators.contains_key(&part)
    }

    /// Validate one part's raw value.
    ///
    /// Returns the normalized value on success (the input value unchanged:
    /// JSON Schema validation does not coerce). A part with no validator
    /// passes through untouched.
    pub fn validate_part(&self, part: RequestPart, value: &Value) -> Result<Value, ValidationError> {
        match self.validators.get(&part) {
            None => Ok(value.clone()),
            Some(validator) => validator
                .validate(value)
                .map_err(|message| ValidationError { part, message }),
        }
    }
}

/// Builder capability handed to a route's `schema` closure.
///
/// Collects raw JSON Schemas per request part; compilation happens in one
/// shot when the builder is finished, so an invalid schema fails the module's
/// construction rather than its first request.
///
/// ```
/// use fsrouter::SchemaBuilder;
/// use serde_json::json;
///
/// # fn define(s: SchemaBuilder) -> SchemaBuilder {
/// s.body(json!({
///     "type": "object",
///     "required": ["name"],
///     "properties": { "name": { "type": "string" } }
/// }))
/// # }
/// ```
#[derive(Default)]
pub struct SchemaBuilder {
    parts: Vec<(RequestPart, Value)>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a schema for the request body.
    #[must_use]
    pub fn body(self, schema: Value) -> Self {
        self.part(RequestPart::Body, schema)
    }

    /// Attach a schema for the path parameters object.
    #[must_use]
    pub fn params(self, schema: Value) -> Self {
        self.part(RequestPart::Params, schema)
    }

    /// Attach a schema for the query parameters object.
    #[must_use]
    pub fn query(self, schema: Value) -> Self {
        self.part(RequestPart::Query, schema)
    }

    /// Attach a schema for an arbitrary part. A later schema for the same
    /// part replaces the earlier one.
    #[must_use]
    pub fn part(mut self, part: RequestPart, schema: Value) -> Self {
        self.parts.push((part, schema));
        self
    }

    /// Compile every collected schema.
    pub(crate) fn finish(self) -> Result<ValidationSchema, ConfigError> {
        let mut validators = HashMap::new();
        for (part, schema) in &self.parts {
            validators.insert(*part, CompiledSchema::compile(*part, schema)?);
        }
        Ok(ValidationSchema { validators })
    }
}
