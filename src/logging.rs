use std::io;
use tracing_appender::rolling;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_STDERR_FILTER: &str = "info,llm_request=info,dataset=info,web_request=warn";
const DEFAULT_FILE_FILTER: &str = "info,llm_request=debug,dataset=debug,web_request=info";

/// Sets up a stderr log and a daily rolling file log under `logs/`.
///
/// Stdout is left to the command output. `RUST_LOG` replaces the stderr
/// filter when set.
pub fn configure_logging(app_name: &str) {
    let stderr_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_STDERR_FILTER));

    let stderr_log = fmt::layer()
        .with_writer(io::stderr)
        .with_filter(stderr_filter);

    let file_appender = rolling::daily("logs", format!("{}.log", app_name));
    let file_log = fmt::layer()
        .with_ansi(false)
        .with_writer(file_appender)
        .with_filter(EnvFilter::new(DEFAULT_FILE_FILTER));

    tracing_subscriber::Registry::default()
        .with(stderr_log)
        .with(file_log)
        .init();
}
