//! The per-route registration builder.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use http::Method;
use tracing::debug;

use crate::error::ConfigError;
use crate::handler::{Handler, HandlerRequest, HandlerResponse};
use crate::middleware::{Middleware, MiddlewareChain, SchemaMiddleware, SharedSchemas};
use crate::validator::SchemaBuilder;

/// Declarative builder binding HTTP-method handlers to one endpoint.
///
/// A route module constructs one `RouteBuilder`, registers a handler per
/// supported method with [`on`](Self::on), and optionally defines a
/// validation schema per method with [`schema`](Self::schema). Each method
/// moves `unregistered → registered` exactly once; a second `on` or `schema`
/// for the same method is a configuration error that aborts that module's
/// load only.
///
/// Method dispatch is an explicit method → single-handler map. Registration
/// order is preserved in [`supported_methods`](Self::supported_methods) and
/// drives the order the loader mounts verbs with the host.
///
/// Builder operations return `Result<&mut Self, ConfigError>` so a module
/// constructor chains them with `?`:
///
/// ```
/// use fsrouter::{HandlerResponse, RouteBuilder};
/// use http::Method;
/// use serde_json::json;
///
/// # fn build() -> anyhow::Result<RouteBuilder> {
/// let mut route = RouteBuilder::new();
/// route
///     .schema(Method::POST, |s| {
///         s.body(json!({ "type": "object", "required": ["name"] }))
///     })?
///     .on(Method::POST, |req| {
///         Ok(HandlerResponse::new(201, Vec::new(), req.body.clone()))
///     })?;
/// # Ok(route)
/// # }
/// ```
pub struct RouteBuilder {
    /// Ordered middleware per method; `on` appends the validation middleware
    middleware: HashMap<Method, Vec<Arc<dyn Middleware>>>,
    /// Schema table shared with the validation middleware
    schemas: SharedSchemas,
    /// The single-subscriber handler table
    handlers: HashMap<Method, Handler>,
    /// Methods in first-registration order
    supported: Vec<Method>,
}

impl std::fmt::Debug for RouteBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteBuilder")
            .field("supported", &self.supported)
            .finish_non_exhaustive()
    }
}

impl Default for RouteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteBuilder {
    #[must_use]
    pub fn new() -> Self {
        RouteBuilder {
            middleware: HashMap::new(),
            schemas: Arc::new(RwLock::new(HashMap::new())),
            handlers: HashMap::new(),
            supported: Vec::new(),
        }
    }

    /// Append a middleware to one method's chain.
    ///
    /// Middleware added before [`on`](Self::on) runs ahead of the
    /// auto-attached validation middleware, which always sits last before
    /// the terminal handler.
    pub fn middleware(&mut self, method: Method, mw: Arc<dyn Middleware>) -> &mut Self {
        self.middleware.entry(method).or_default().push(mw);
        self
    }

    /// Define validation schemas for one method.
    ///
    /// The closure receives the [`SchemaBuilder`] capability and attaches
    /// raw JSON Schemas per request part; they are compiled here, so an
    /// invalid schema fails module construction rather than a request.
    /// May run before or after `on` for the same method: validation reads
    /// the schema table at request time.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DuplicateSchema`] if a schema for `method` already
    /// exists; [`ConfigError::InvalidSchema`] if a part schema does not
    /// compile.
    pub fn schema<F>(&mut self, method: Method, define: F) -> Result<&mut Self, ConfigError>
    where
        F: FnOnce(SchemaBuilder) -> SchemaBuilder,
    {
        let mut table = self.schemas.write().unwrap();
        if table.contains_key(&method) {
            return Err(ConfigError::DuplicateSchema { method });
        }
        let schema = define(SchemaBuilder::new()).finish()?;
        table.insert(method, schema);
        drop(table);
        Ok(self)
    }

    /// Register the handler for one method.
    ///
    /// Appends the validation middleware to that method's chain, records the
    /// method in registration order, and installs the handler in the
    /// single-subscriber table.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DuplicateMethod`] if a handler for `method` is already
    /// registered; the first registration stays intact.
    pub fn on<F>(&mut self, method: Method, handler: F) -> Result<&mut Self, ConfigError>
    where
        F: Fn(&mut HandlerRequest) -> anyhow::Result<HandlerResponse> + Send + Sync + 'static,
    {
        if self.handlers.contains_key(&method) {
            return Err(ConfigError::DuplicateMethod { method });
        }

        self.middleware
            .entry(method.clone())
            .or_default()
            .push(Arc::new(SchemaMiddleware::new(
                method.clone(),
                Arc::clone(&self.schemas),
            )));

        debug!(method = %method, "Route handler registered");
        self.handlers.insert(method.clone(), Arc::new(handler));
        self.supported.push(method);
        Ok(self)
    }

    /// Methods with a registered handler, in first-registration order.
    #[must_use]
    pub fn supported_methods(&self) -> &[Method] {
        &self.supported
    }

    /// The request-time terminal handler for one method, without its
    /// middleware chain.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnregisteredMethod`] if no handler was registered for
    /// `method`. This is the fail-fast configuration check, raised before any
    /// request is served.
    pub fn emit(&self, method: &Method) -> Result<Handler, ConfigError> {
        self.handlers
            .get(method)
            .cloned()
            .ok_or_else(|| ConfigError::UnregisteredMethod {
                method: method.clone(),
            })
    }

    /// One method's full middleware chain composed over its terminal
    /// handler, which is what the loader registers with the host.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnregisteredMethod`] if no handler was registered for
    /// `method`.
    pub fn compose(&self, method: &Method) -> Result<Handler, ConfigError> {
        let terminal = self.emit(method)?;
        let chain = MiddlewareChain::new(self.middleware.get(method).cloned().unwrap_or_default());
        Ok(chain.build(terminal))
    }
}
