//! Batch loading of route modules onto a host server.
//!
//! Every registered module constructor runs in its own `may` coroutine; one
//! module's failure (an error or a panic) is isolated and logged while its
//! siblings proceed. Mounting happens sequentially in registration order once
//! the whole batch has settled, so the caller can start listening as soon as
//! [`load_routes`] returns.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::anyhow;
use may::coroutine;
use may::sync::mpsc;
use serde::Serialize;
use tracing::{error, info};

use crate::endpoint::derive_endpoint;
use crate::host::Host;
use crate::middleware::panic_message;
use crate::registry::{RouteModule, RouteRegistry};

/// Stack size for loader coroutines. Module constructors compile schemas and
/// build middleware chains, so give them the same headroom as a handler.
const LOADER_STACK_SIZE: usize = 0x10000;

/// Outcome of one load batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Raw sub-routers mounted
    pub mounted: usize,
    /// Individual `(method, endpoint)` registrations made
    pub registered: usize,
    /// Modules whose load or registration failed and was skipped
    pub failed: usize,
}

/// Remap the literal `/root` endpoint to `/`.
///
/// A module named `root.<ext>` at the top of the route tree derives to
/// `/root` but stands for the tree's root; the remap is deliberately a
/// caller-level step, separate from derivation.
#[must_use]
pub fn mount_point(endpoint: &str) -> &str {
    if endpoint == "/root" {
        "/"
    } else {
        endpoint
    }
}

/// Load every registered module and mount the successes on `host`.
///
/// Constructors are evaluated concurrently; failures are logged per module
/// and counted in the report, never aborting the batch. The function returns
/// only after every module has settled (success or failure), which is the
/// host's signal that it may begin listening.
pub fn load_routes<H: Host>(registry: &RouteRegistry, base_dir: &str, host: &mut H) -> LoadReport {
    let total = registry.len();
    let (tx, rx) = mpsc::channel::<(usize, anyhow::Result<RouteModule>)>();
    let mut handles = Vec::with_capacity(total);

    for (idx, entry) in registry.entries().iter().enumerate() {
        let init = Arc::clone(&entry.init);
        let key = entry.path.clone();
        let result_tx = tx.clone();

        // SAFETY: may::coroutine::Builder::spawn() is marked unsafe by the
        // may runtime. The closure owns everything it touches (Arc'd
        // constructor, its key, a channel sender), and every outcome is
        // reported over the channel, panics included.
        let spawned = unsafe {
            coroutine::Builder::new()
                .stack_size(LOADER_STACK_SIZE)
                .spawn(move || {
                    let outcome = match panic::catch_unwind(AssertUnwindSafe(|| init())) {
                        Ok(result) => result,
                        Err(payload) => Err(anyhow!(
                            "route module '{}' panicked during load: {}",
                            key,
                            panic_message(payload.as_ref())
                        )),
                    };
                    let _ = result_tx.send((idx, outcome));
                })
        };

        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                let _ = tx.send((idx, Err(anyhow!("failed to spawn loader coroutine: {e}"))));
            }
        }
    }
    drop(tx);

    // The batch settles here: the channel closes only once every module has
    // reported an outcome.
    let mut outcomes: Vec<Option<anyhow::Result<RouteModule>>> = (0..total).map(|_| None).collect();
    for (idx, outcome) in rx.iter() {
        outcomes[idx] = Some(outcome);
    }
    for handle in handles {
        let _ = handle.join();
    }

    let mut report = LoadReport::default();
    for (entry, outcome) in registry.entries().iter().zip(outcomes) {
        let endpoint = derive_endpoint(&entry.path, base_dir);
        let mount = mount_point(&endpoint);

        match outcome {
            Some(Ok(RouteModule::Router(router))) => {
                host.mount(mount, router);
                info!(module = %entry.path, endpoint = %mount, "Registered router");
                report.mounted += 1;
            }
            Some(Ok(RouteModule::Route(route))) => {
                let mut broken = false;
                for method in route.supported_methods() {
                    match route.compose(method) {
                        Ok(handler) => {
                            host.route(method.clone(), mount, handler);
                            info!(method = %method, endpoint = %mount, "Registered route");
                            report.registered += 1;
                        }
                        Err(e) => {
                            error!(
                                module = %entry.path,
                                method = %method,
                                error = %e,
                                "Failed to compose route handler"
                            );
                            broken = true;
                        }
                    }
                }
                if broken {
                    report.failed += 1;
                }
            }
            Some(Err(e)) => {
                error!(module = %entry.path, error = %e, "Error loading route module");
                report.failed += 1;
            }
            None => {
                error!(module = %entry.path, "Route module reported no outcome");
                report.failed += 1;
            }
        }
    }

    info!(
        total = total,
        mounted = report.mounted,
        registered = report.registered,
        failed = report.failed,
        "Route loading settled"
    );
    report
}
