//! Pre-handler middleware and sequential chain composition.

mod chain;
mod core;
mod schema;

pub use chain::MiddlewareChain;
pub use core::{Middleware, Step};
pub use schema::SchemaMiddleware;

pub(crate) use chain::panic_message;
pub(crate) use schema::SharedSchemas;
