//! # fsrouter
//!
//! **fsrouter** is a file-system-driven HTTP route registration layer. Route
//! modules are keyed by their location under a route directory; each module's
//! path is turned into a canonical URL endpoint, and a declarative builder
//! binds one or more HTTP-method handlers to that endpoint with per-method
//! middleware chains and schema-based request validation.
//!
//! ## Overview
//!
//! fsrouter is not an HTTP server. It owns registration: deriving endpoints,
//! composing middleware with terminal handlers, and validating requests
//! against JSON Schemas. The hosting server is a collaborator reached through
//! the [`host::Host`] trait, and module discovery is an explicit
//! [`registry::RouteRegistry`] rather than runtime file-system reflection.
//!
//! ## Architecture
//!
//! - **[`endpoint`]** - pure derivation of URL endpoints from module paths
//! - **[`route`]** - the [`route::RouteBuilder`] per-method registration state machine
//! - **[`middleware`]** - the [`middleware::Middleware`] trait and sequential chain composition
//! - **[`validator`]** - per-method, per-request-part JSON Schema validation
//! - **[`registry`]** - the explicit module registration table
//! - **[`loader`]** - concurrent, failure-isolated batch mounting onto a host
//! - **[`handler`]** - request/response types shared by handlers and middleware
//!
//! ## Quick Start
//!
//! ```no_run
//! use fsrouter::{load_routes, RouteBuilder, RouteModule, RouteRegistry};
//! use http::Method;
//!
//! let mut registry = RouteRegistry::new();
//! registry.register("/routes/users/_id.ts", || {
//!     let mut route = RouteBuilder::new();
//!     route
//!         .schema(Method::GET, |s| {
//!             s.params(serde_json::json!({
//!                 "type": "object",
//!                 "required": ["id"],
//!             }))
//!         })?
//!         .on(Method::GET, |req| {
//!             Ok(fsrouter::HandlerResponse::ok_json(req.params.clone()))
//!         })?;
//!     Ok(RouteModule::Route(route))
//! });
//!
//! // let report = load_routes(&registry, "/routes", &mut host);
//! // host starts listening only after the whole batch has settled
//! ```
//!
//! ## Concurrency Model
//!
//! The loader evaluates every registered module constructor in its own `may`
//! coroutine; one module's failure (error or panic) is isolated and logged
//! while siblings proceed. Per request, a middleware chain runs strictly
//! sequentially and short-circuits on the first error or early response.
//! Builder state is immutable once a module has been mounted.

pub mod endpoint;
pub mod error;
pub mod handler;
pub mod host;
pub mod ids;
pub mod loader;
pub mod middleware;
pub mod registry;
pub mod route;
pub mod validator;

pub use endpoint::derive_endpoint;
pub use error::{ConfigError, ValidationError};
pub use handler::{Handler, HandlerRequest, HandlerResponse};
pub use host::Host;
pub use loader::{load_routes, mount_point, LoadReport};
pub use middleware::{Middleware, MiddlewareChain, Step};
pub use registry::{RouteModule, RouteRegistry};
pub use route::RouteBuilder;
pub use validator::{RequestPart, SchemaBuilder, ValidationSchema};
