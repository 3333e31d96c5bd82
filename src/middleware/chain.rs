use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::anyhow;
use tracing::debug;

use crate::handler::{Handler, HandlerRequest, HandlerResponse};
use crate::middleware::{Middleware, Step};

/// Best-effort extraction of a human-readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Run one chain step with panic isolation.
///
/// A panic in a middleware or the terminal handler is forwarded as if the
/// step had returned that error, so a broken step fails one request instead
/// of the process.
fn run_step<T>(f: impl FnOnce() -> anyhow::Result<T>) -> anyhow::Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(anyhow!("chain step panicked: {}", panic_message(payload.as_ref()))),
    }
}

/// An ordered sequence of middleware composed with a terminal handler.
///
/// `build` collapses the chain into a single [`Handler`]: at request time
/// each middleware runs in order, exactly one at a time; the first `Err`
/// or [`Step::Respond`] stops the chain, and only if every middleware
/// continues does the terminal handler run. An empty chain behaves exactly
/// like invoking the handler directly.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    steps: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    #[must_use]
    pub fn new(steps: Vec<Arc<dyn Middleware>>) -> Self {
        MiddlewareChain { steps }
    }

    /// Append a middleware to the end of the chain.
    pub fn push(&mut self, mw: Arc<dyn Middleware>) {
        self.steps.push(mw);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Compose the chain with a terminal handler into one handler.
    #[must_use]
    pub fn build(&self, handler: Handler) -> Handler {
        let steps = self.steps.clone();
        Arc::new(move |req: &mut HandlerRequest| -> anyhow::Result<HandlerResponse> {
            for (idx, mw) in steps.iter().enumerate() {
                match run_step(|| mw.call(req))? {
                    Step::Continue => {}
                    Step::Respond(response) => {
                        debug!(
                            request_id = %req.request_id,
                            middleware_idx = idx,
                            status = response.status,
                            "Middleware short-circuited chain"
                        );
                        return Ok(response);
                    }
                }
            }
            run_step(|| handler(req))
        })
    }
}
