//! Process-wide logging setup.
//!
//! # Invariants
//! - The logger starts at most once; repeating the same configuration is a no-op.
//! - A second call with another level or target fails instead of reconfiguring.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{info, LevelFilter};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "contacts";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: LevelFilter,
    log_dir: Option<PathBuf>,
    _handle: LoggerHandle,
}

/// Starts the `flexi_logger` backend.
///
/// `log_dir` selects rolling files in that absolute directory; `None` logs
/// to stderr.
///
/// # Errors
/// - `level` is not one of `trace|debug|info|warn|error`.
/// - `log_dir` is blank, relative, or cannot be created.
/// - Logging is already running with a different level or target.
pub fn init_logging(level: &str, log_dir: Option<&str>) -> Result<(), String> {
    let level = parse_level(level)?;
    let log_dir = log_dir.map(parse_log_dir).transpose()?;

    let active = ACTIVE.get_or_try_init(|| -> Result<ActiveLogger, String> {
        let handle = start(level, log_dir.as_deref())?;
        info!(
            "event=core_init module=core status=ok version={} level={} target={}",
            env!("CARGO_PKG_VERSION"),
            level,
            target_name(log_dir.as_deref())
        );
        Ok(ActiveLogger {
            level,
            log_dir: log_dir.clone(),
            _handle: handle,
        })
    })?;

    if active.level != level || active.log_dir != log_dir {
        return Err(format!(
            "logging already running at level {} to {}; refusing to switch to level {} to {}",
            active.level,
            target_name(active.log_dir.as_deref()),
            level,
            target_name(log_dir.as_deref())
        ));
    }
    Ok(())
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(level: LevelFilter, log_dir: Option<&Path>) -> Result<LoggerHandle, String> {
    let logger = Logger::with(LogSpecification::builder().default(level).build());
    let logger = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", dir.display())
            })?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
        None => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::detailed_format),
    };
    logger
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    match raw.trim().parse::<LevelFilter>() {
        Ok(LevelFilter::Off) | Err(_) => Err(format!(
            "unsupported log level `{raw}`; expected trace|debug|info|warn|error"
        )),
        Ok(level) => Ok(level),
    }
}

fn parse_log_dir(raw: &str) -> Result<PathBuf, String> {
    let path = Path::new(raw.trim());
    if path.as_os_str().is_empty() {
        return Err("log directory cannot be empty".to_string());
    }
    if !path.is_absolute() {
        return Err(format!("log directory must be absolute, got `{}`", path.display()));
    }
    Ok(path.to_path_buf())
}

fn target_name(log_dir: Option<&Path>) -> String {
    log_dir.map_or_else(|| "stderr".to_string(), |dir| dir.display().to_string())
}
