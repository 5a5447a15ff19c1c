use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber on stderr.
///
/// Reads `RUST_LOG` (or `LIZZY_LOG`) for the filter and falls back to
/// `default_level`. `LIZZY_LOG_JSON=1` switches to JSON lines. Calling this
/// twice is harmless.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_from_env("LIZZY_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let json = std::env::var("LIZZY_LOG_JSON")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(true);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
