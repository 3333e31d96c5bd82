//! Explicit route-module registration table.
//!
//! In place of runtime module discovery by file path, every route module is
//! entered here up front: the file-path key the endpoint is derived from,
//! plus a constructor evaluated by the loader. The table is typically built
//! once at startup, by hand or by a build-time generation step.

use std::sync::Arc;

use crate::handler::Handler;
use crate::route::RouteBuilder;

/// What a route module's constructor produces: the two default-export
/// shapes a module may take.
pub enum RouteModule {
    /// A raw sub-router, mounted directly at the module's endpoint.
    Router(Handler),
    /// A route definition; each supported method is registered individually.
    Route(RouteBuilder),
}

/// Constructor evaluated when the module is loaded.
pub type ModuleInit = Arc<dyn Fn() -> anyhow::Result<RouteModule> + Send + Sync>;

/// One registered route module.
pub struct RouteEntry {
    /// File-path key the endpoint is derived from (e.g. `/routes/users/_id.ts`)
    pub path: String,
    /// Module constructor
    pub init: ModuleInit,
}

/// Ordered table of route modules.
#[derive(Default)]
pub struct RouteRegistry {
    entries: Vec<RouteEntry>,
}

impl RouteRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module constructor under a file-path key.
    ///
    /// Entries keep registration order; the loader mounts them in that
    /// order once the load batch settles.
    pub fn register<F>(&mut self, path: impl Into<String>, init: F) -> &mut Self
    where
        F: Fn() -> anyhow::Result<RouteModule> + Send + Sync + 'static,
    {
        self.entries.push(RouteEntry {
            path: path.into(),
            init: Arc::new(init),
        });
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
