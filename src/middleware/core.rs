use crate::handler::{HandlerRequest, HandlerResponse};

/// What a middleware decided about the request it just saw.
#[derive(Debug)]
pub enum Step {
    /// Hand the request to the next middleware, or to the terminal handler
    /// if this was the last one.
    Continue,
    /// Stop the chain and send this response. Later middleware and the
    /// terminal handler never run.
    Respond(HandlerResponse),
}

/// A pre-handler step in a route's middleware chain.
///
/// Middleware runs strictly sequentially per request. Returning `Err` aborts
/// the chain and forwards the error to the host's generic error path;
/// returning [`Step::Respond`] short-circuits with a response of the
/// middleware's own (how validation answers `400` before the real handler).
pub trait Middleware: Send + Sync {
    fn call(&self, req: &mut HandlerRequest) -> anyhow::Result<Step>;
}
