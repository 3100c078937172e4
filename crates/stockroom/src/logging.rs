use color_eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{self, LOG_ENV, LOG_FILE};

/// Log to `<data_dir>/stockroom.log`; the terminal belongs to the UI.
///
/// The filter comes from `STOCKROOM_LOG_LEVEL`, then `RUST_LOG`, then
/// `info` for this workspace's crates. The returned guard must outlive the
/// app or buffered lines are lost.
pub fn init() -> Result<WorkerGuard> {
    let directory = config::get_data_dir();
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::never(&directory, LOG_FILE.as_str());
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let directive = std::env::var(LOG_ENV.as_str())
        .or_else(|_| std::env::var(EnvFilter::DEFAULT_ENV))
        .unwrap_or_else(|_| format!("{}=info,inventory=info", env!("CARGO_CRATE_NAME")));
    let env_filter = EnvFilter::try_new(directive)?;

    let file_layer = fmt::Layer::default()
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(guard)
}
