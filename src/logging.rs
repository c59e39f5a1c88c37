//! Diagnostic logging to stderr.
//!
//! Results always go to stdout via [`crate::output`]; tracing events are for
//! following what the tool did (git invocations, pruned directories, matched
//! files). The level comes from `-v`/`-q` and can be overridden per target
//! with `RAW_IMAGE_URLS_LOG`, e.g. `RAW_IMAGE_URLS_LOG=raw_image_urls::scan=debug`.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_ENV_VAR: &str = "RAW_IMAGE_URLS_LOG";

pub fn setup_logger(level: LevelFilter) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let fmt = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time();

    // A second init (e.g. from tests) is harmless; keep the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(fmt)
        .with(env_filter)
        .try_init();
}
