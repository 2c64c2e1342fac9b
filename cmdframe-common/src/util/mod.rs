use time::macros::format_description;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter` when it is set. Calling this more than once
/// is harmless; later calls are ignored.
pub fn tracing_init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::new(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        )))
        .with_target(false)
        .try_init();
}
