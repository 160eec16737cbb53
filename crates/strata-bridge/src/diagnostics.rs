/// Install the process-wide log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the config's debug flag picks the
/// default level. Later calls are no-ops, so tests may call this freely.
pub fn init_diagnostics(debug: bool) {
    let fallback = if debug { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .try_init();
}
