use tracing_subscriber::EnvFilter;

/// Installs a thread-default subscriber for the duration of a test so
/// `RUST_LOG=fsrouter=debug cargo test` shows the crate's log lines.
pub struct TestTracing {
    _guard: tracing::subscriber::DefaultGuard,
}

impl TestTracing {
    pub fn init() -> Self {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .finish();
        Self {
            _guard: tracing::subscriber::set_default(subscriber),
        }
    }
}
