use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use http::Method;
use tracing::debug;

use crate::handler::{HandlerRequest, HandlerResponse};
use crate::middleware::{Middleware, Step};
use crate::validator::{RequestPart, ValidationSchema};

/// Shared per-route schema table, read by validation middleware at request
/// time. Written only while the route's module constructor runs.
pub(crate) type SharedSchemas = Arc<RwLock<HashMap<Method, ValidationSchema>>>;

/// Validation middleware auto-attached by `RouteBuilder::on`.
///
/// Looks up its method's schema at request time, so a schema defined after
/// the handler was registered is still honored. With no schema configured
/// the middleware is a pass-through no-op.
///
/// Each configured request part is validated in turn; the first failure
/// answers `400 {"error": "<message>"}` immediately and the real handler
/// never runs. On success the part's value is replaced with the validator's
/// normalized output.
pub struct SchemaMiddleware {
    method: Method,
    schemas: SharedSchemas,
}

impl SchemaMiddleware {
    pub(crate) fn new(method: Method, schemas: SharedSchemas) -> Self {
        SchemaMiddleware { method, schemas }
    }
}

impl Middleware for SchemaMiddleware {
    fn call(&self, req: &mut HandlerRequest) -> anyhow::Result<Step> {
        let table = self.schemas.read().unwrap();
        let Some(schema) = table.get(&self.method) else {
            return Ok(Step::Continue);
        };

        for part in RequestPart::ALL {
            if !schema.has(part) {
                continue;
            }
            match schema.validate_part(part, req.part(part)) {
                Ok(normalized) => {
                    *req.part_mut(part) = normalized;
                }
                Err(err) => {
                    debug!(
                        request_id = %req.request_id,
                        method = %self.method,
                        part = %part,
                        error = %err.message,
                        "Request validation failed"
                    );
                    return Ok(Step::Respond(HandlerResponse::error_json(
                        400,
                        &err.to_string(),
                    )));
                }
            }
        }

        Ok(Step::Continue)
    }
}
