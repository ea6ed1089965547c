//! Tracing setup: console layer on stderr (pretty or JSON) plus an optional
//! JSON-lines file sink.

use crate::cli::FILE_GUARD;
use eyre::WrapErr;
use growplan_config::Logging;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directives: `RUST_LOG` first, then the command line, then the config.
fn env_filter(cli_level: Option<&str>, cfg: &Logging) -> eyre::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let level = cli_level.or(cfg.level.as_deref()).unwrap_or("info");
    EnvFilter::try_new(level).wrap_err_with(|| format!("invalid log level {level:?}"))
}

fn file_writer(
    file: &str,
    rotation: Option<&str>,
) -> eyre::Result<tracing_appender::non_blocking::NonBlocking> {
    let path = Path::new(file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| eyre::eyre!("logging.file {file:?} has no file name"))?;
    std::fs::create_dir_all(dir).wrap_err_with(|| format!("create log dir {dir:?}"))?;

    let appender = match rotation.unwrap_or("never") {
        "daily" => tracing_appender::rolling::daily(dir, name),
        "hourly" => tracing_appender::rolling::hourly(dir, name),
        _ => tracing_appender::rolling::never(dir, name),
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);
    FILE_GUARD
        .set(guard)
        .map_err(|_| eyre::eyre!("file logging already initialized"))?;
    Ok(writer)
}

pub fn init_tracing(cli_level: Option<&str>, json: bool, cfg: &Logging) -> eyre::Result<()> {
    let filter = env_filter(cli_level, cfg)?;

    let file_layer = match cfg.file.as_deref() {
        Some(file) => Some(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_target(true)
                .with_writer(file_writer(file, cfg.rotation.as_deref())?),
        ),
        None => None,
    };
    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .with_target(false)
            .with_writer(std::io::stderr)
    });
    let pretty_layer = (!json).then(|| {
        fmt::layer()
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .map_err(|e| eyre::eyre!("init tracing: {e}"))
}
