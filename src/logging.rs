use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. Logs at `info` unless debug logging
/// is enabled, in which case `RUST_LOG` may override the `debug` default.
/// Logs go to stderr so command output stays clean. Calling it again is
/// harmless.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
