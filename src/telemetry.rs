//! Log output for the command-line front end.
//!
//! `RUST_LOG` wins when set; otherwise `-v` counts pick the level for this
//! crate (warn, info, debug, trace).

use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub fn filter_for(verbosity: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::new(format!("warn,bookshelf={level}"))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbosity: u8) {
    let _ = tracing_subscriber::registry()
        .with(filter_for(verbosity))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
