use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize tracing with an env-filtered compact console layer.
///
/// `try_init` makes a second call a no-op, so test binaries that already
/// installed a subscriber are unaffected.
pub fn init_telemetry() {
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "lexia_api=debug,lexia_db=debug,lexia_ai=debug,tower_http=debug".into()
        }))
        .with(console_fmt)
        .try_init();
}
