//! Tracing initialization.
//!
//! The engine logs through `tracing` everywhere; this module wires up a
//! subscriber when the embedding layer asks for one. Output goes to a log
//! file via a non-blocking appender — the host owns stdout, and blocking
//! the frame callback on log IO is not acceptable.
//!
//! Logging is strictly optional: no configured log directory means no
//! subscriber, and any failure while setting one up leaves the engine
//! running unlogged rather than failing initialization.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::Config;

/// Initializes the tracing subscriber with file output.
///
/// Returns the appender's worker guard, which the embedding layer must keep
/// alive for the lifetime of the process — dropping it stops the background
/// writer and loses buffered log lines. Returns `None` when logging is not
/// configured, the log directory cannot be created, or a global subscriber
/// is already installed.
///
/// Idempotent: only the first successful call installs a subscriber.
#[must_use]
pub fn init_tracing(config: &Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let directory = config.log_dir.as_ref()?;
    std::fs::create_dir_all(directory).ok()?;

    let level = config.log_level.clone().unwrap_or_else(|| "info".to_string());
    let appender = tracing_appender::rolling::never(directory, "saynav.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let subscriber = tracing_subscriber::registry().with(EnvFilter::new(level)).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true),
    );
    subscriber.try_init().ok()?;
    Some(guard)
}
