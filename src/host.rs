//! The host-server collaborator capability.

use http::Method;

use crate::handler::Handler;

/// Registration surface of the hosting HTTP server.
///
/// The loader drives this trait and nothing else: one registration call per
/// `(method, path)` pair, plus a generic mount for raw sub-routers. Socket
/// lifecycle stays with the host; it should begin listening only after
/// [`load_routes`](crate::loader::load_routes) has returned.
pub trait Host {
    /// Register a composed handler for one HTTP method at a path.
    fn route(&mut self, method: Method, path: &str, handler: Handler);

    /// Mount a raw sub-router at a path.
    fn mount(&mut self, path: &str, router: Handler);
}
