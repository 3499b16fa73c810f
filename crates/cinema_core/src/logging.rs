//! Process logger for the API: rotating files under a directory, or stderr.
//!
//! The first successful `init_logging` call fixes level and destination for
//! the life of the process. Repeating it with the same arguments is a no-op;
//! asking for anything else is an error, never a panic.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

const LOG_FILE_BASENAME: &str = "cinema";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 5;
const PANIC_PAYLOAD_MAX_CHARS: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq)]
enum Destination {
    Stderr,
    Directory(PathBuf),
}

impl Destination {
    fn parse(log_dir: Option<&str>) -> Result<Self, String> {
        let Some(raw) = log_dir else {
            return Ok(Self::Stderr);
        };
        let dir = PathBuf::from(raw.trim());
        if dir.as_os_str().is_empty() || !dir.is_absolute() {
            return Err(format!("log directory must be an absolute path, got `{raw}`"));
        }
        Ok(Self::Directory(dir))
    }
}

impl Display for Destination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stderr => f.write_str("stderr"),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

struct ActiveLogger {
    level: LevelFilter,
    destination: Destination,
    _handle: LoggerHandle,
}

/// Starts the process logger.
///
/// `log_dir = None` logs to stderr; `Some(dir)` writes size-rotated files
/// under the absolute directory `dir`, creating it when missing.
///
/// # Errors
/// Unknown levels, relative directories, an unwritable directory, or a
/// second call with a different level or destination.
pub fn init_logging(level: &str, log_dir: Option<&str>) -> Result<(), String> {
    let level = LevelFilter::from_str(level.trim())
        .map_err(|_| format!("unsupported log level `{}`", level.trim()))?;
    let destination = Destination::parse(log_dir)?;

    let active = ACTIVE.get_or_try_init(|| start(level, destination.clone()))?;
    if active.level != level || active.destination != destination {
        return Err(format!(
            "logger already running at level={} destination={}; cannot switch to level={} destination={}",
            active.level, active.destination, level, destination
        ));
    }
    Ok(())
}

/// Level and log directory of the running logger (`None` directory means
/// stderr), or `None` before `init_logging` succeeded.
pub fn logging_status() -> Option<(&'static str, Option<PathBuf>)> {
    ACTIVE.get().map(|active| {
        let dir = match &active.destination {
            Destination::Stderr => None,
            Destination::Directory(dir) => Some(dir.clone()),
        };
        (level_name(active.level), dir)
    })
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(level: LevelFilter, destination: Destination) -> Result<ActiveLogger, String> {
    let logger = Logger::try_with_str(level_name(level))
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?;
    let logger = match &destination {
        Destination::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::detailed_format),
        Destination::Directory(dir) => {
            std::fs::create_dir_all(dir)
                .map_err(|err| format!("cannot create log directory `{}`: {err}", dir.display()))?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(ROTATE_AT_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(KEEP_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
    };
    let handle = logger
        .start()
        .map_err(|err| format!("cannot start logger: {err}"))?;

    chain_panic_hook();
    info!(
        "event=logger_start module=core status=ok level={} destination={} version={}",
        level_name(level),
        destination,
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        level,
        destination,
        _handle: handle,
    })
}

fn level_name(level: LevelFilter) -> &'static str {
    match level {
        LevelFilter::Off => "off",
        LevelFilter::Error => "error",
        LevelFilter::Warn => "warn",
        LevelFilter::Info => "info",
        LevelFilter::Debug => "debug",
        LevelFilter::Trace => "trace",
    }
}

// Runs once: `start` is only reached from inside `ACTIVE.get_or_try_init`.
fn chain_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map_or_else(|| "unknown".to_string(), |loc| format!("{}:{}", loc.file(), loc.line()));
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string panic payload");
        error!(
            "event=panic module=core status=error location={} payload={}",
            location,
            one_line(payload, PANIC_PAYLOAD_MAX_CHARS)
        );
        previous(info);
    }));
}

/// Flattens `text` onto one line and caps it at `max_chars`.
fn one_line(text: &str, max_chars: usize) -> String {
    let mut line: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .take(max_chars)
        .collect();
    if text.chars().count() > max_chars {
        line.push_str("...");
    }
    line
}
