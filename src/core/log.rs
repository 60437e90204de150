// Define a new module for logging initialization
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Level cap for this crate, applied only when `RUST_LOG` is not set.
fn app_filter(verbose: bool, env_configured: bool) -> Option<Targets> {
    if env_configured {
        return None;
    }
    let level_filter = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    Some(
        Targets::new()
            .with_target("ratesheet", level_filter)
            .with_default(LevelFilter::WARN),
    )
}

/// Installs the global subscriber. A set `RUST_LOG` decides all filtering;
/// otherwise `--verbose` enables debug output for this crate.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().ok();
    let app_filter = app_filter(verbose, env_filter.is_some());
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = env_filter.unwrap_or_else(|| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(app_filter)
        .with(env_filter)
        .init();
}
