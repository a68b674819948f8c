use std::{fs, io, path::Path};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Use `RUST_LOG` if it's set, otherwise this.
fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Send logs to a daily file in `dir`, since the terminal is busy showing the
/// form. Logs are flushed when the returned guard is dropped, so hold on to it
/// until exit.
pub fn init_file(dir: &Path) -> io::Result<WorkerGuard> {
    fs::create_dir_all(dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("login")
        .filename_suffix("log")
        .build(dir)
        .map_err(io::Error::other)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter("info"))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    Ok(guard)
}

/// Send logs to stderr, keeping stdout clean for command output.
pub fn init_stderr() {
    tracing_subscriber::registry()
        .with(filter("warn"))
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}
