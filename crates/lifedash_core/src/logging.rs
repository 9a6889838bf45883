//! Core logging bootstrap.
//!
//! # Responsibility
//! - Start size-rotated file logging once per process.
//! - Route panics into the log as a single sanitized line.
//!
//! # Invariants
//! - Initialization is idempotent for an identical level and directory.
//! - A second initialization with a different level or directory fails.
//! - Initialization never panics.
//! - Log lines carry ids, counts and enums only; titles and XP reasons stay
//!   out of the log.
//!
//! # See also
//! - `crate::config`

use crate::config::DashboardConfig;
use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, LogSpecification, Logger, LoggerHandle,
    Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "lifedash";
const ROTATE_AT_BYTES: u64 = 5 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 3;
const PANIC_PREVIEW_CHARS: usize = 160;

static LOGGER: OnceCell<RunningLogger> = OnceCell::new();
static PANIC_HOOK_SET: OnceCell<()> = OnceCell::new();

pub type LoggingResult<T> = Result<T, LoggingError>;

/// Errors from logging bootstrap.
#[derive(Debug)]
pub enum LoggingError {
    UnsupportedLevel(String),
    EmptyLogDir,
    RelativeLogDir(String),
    CreateLogDir {
        path: PathBuf,
        source: std::io::Error,
    },
    Backend(FlexiLoggerError),
    /// Logging runs with another level or directory.
    AlreadyActive {
        level: LevelFilter,
        log_dir: PathBuf,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyLogDir => write!(f, "log_dir cannot be empty"),
            Self::RelativeLogDir(value) => {
                write!(f, "log_dir must be an absolute path, got `{value}`")
            }
            Self::CreateLogDir { path, source } => {
                write!(f, "cannot create log directory `{}`: {source}", path.display())
            }
            Self::Backend(err) => write!(f, "logger backend failed to start: {err}"),
            Self::AlreadyActive { level, log_dir } => write!(
                f,
                "logging already active (level={}, dir=`{}`); refusing to reconfigure",
                level_name(*level),
                log_dir.display()
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateLogDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FlexiLoggerError> for LoggingError {
    fn from(value: FlexiLoggerError) -> Self {
        Self::Backend(value)
    }
}

struct RunningLogger {
    level: LevelFilter,
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

impl RunningLogger {
    fn ensure_same(&self, level: LevelFilter, log_dir: &Path) -> LoggingResult<()> {
        if self.level == level && self.log_dir == log_dir {
            return Ok(());
        }
        Err(LoggingError::AlreadyActive {
            level: self.level,
            log_dir: self.log_dir.clone(),
        })
    }
}

/// Starts file logging at `level` under the absolute directory `log_dir`.
///
/// # Errors
/// - `UnsupportedLevel` for unknown level names.
/// - `EmptyLogDir` / `RelativeLogDir` for unusable paths.
/// - `CreateLogDir` / `Backend` when the logger cannot start.
/// - `AlreadyActive` when logging runs with another level or directory.
pub fn init_logging(level: &str, log_dir: &str) -> LoggingResult<()> {
    let level = parse_level(level)?;
    let log_dir = absolute_log_dir(log_dir)?;

    // Re-checked after init: a concurrent caller may have won with other settings.
    LOGGER
        .get_or_try_init(|| start(level, &log_dir))?
        .ensure_same(level, &log_dir)
}

/// [`init_logging`] using the level carried by a host config.
pub fn init_logging_with_config(config: &DashboardConfig, log_dir: &str) -> LoggingResult<()> {
    init_logging(&config.log_level, log_dir)
}

/// Running `(level, log_dir)`, or `None` before initialization.
pub fn logging_status() -> Option<(LevelFilter, PathBuf)> {
    LOGGER
        .get()
        .map(|running| (running.level, running.log_dir.clone()))
}

/// Level used when a host does not pick one: verbose in debug builds.
pub fn default_log_level() -> &'static str {
    level_name(if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    })
}

/// Parses a level name, case-insensitively; `warning` is accepted for `warn`.
pub(crate) fn parse_level(raw: &str) -> LoggingResult<LevelFilter> {
    let level = match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" | "warning" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => return Err(LoggingError::UnsupportedLevel(raw.trim().to_string())),
    };
    Ok(level)
}

/// Canonical lowercase name of a level.
pub(crate) fn level_name(level: LevelFilter) -> &'static str {
    match level {
        LevelFilter::Off => "off",
        LevelFilter::Error => "error",
        LevelFilter::Warn => "warn",
        LevelFilter::Info => "info",
        LevelFilter::Debug => "debug",
        LevelFilter::Trace => "trace",
    }
}

fn absolute_log_dir(raw: &str) -> LoggingResult<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LoggingError::EmptyLogDir);
    }
    let dir = PathBuf::from(raw);
    if dir.is_relative() {
        return Err(LoggingError::RelativeLogDir(raw.to_string()));
    }
    Ok(dir)
}

fn start(level: LevelFilter, log_dir: &Path) -> LoggingResult<RunningLogger> {
    std::fs::create_dir_all(log_dir).map_err(|source| LoggingError::CreateLogDir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let spec = LogSpecification::builder().default(level).build();
    let handle = Logger::with(spec)
        .log_to_file(FileSpec::default().directory(log_dir).basename(LOG_BASENAME))
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    set_panic_hook();
    info!(
        "event=core_init module=logging status=ok level={} os={} version={}",
        level_name(level),
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    );

    Ok(RunningLogger {
        level,
        log_dir: log_dir.to_path_buf(),
        _handle: handle,
    })
}

fn set_panic_hook() {
    if PANIC_HOOK_SET.set(()).is_err() {
        return;
    }
    let chained = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let at = panic.location().map_or_else(
            || "unknown".to_string(),
            |loc| format!("{}:{}", loc.file(), loc.line()),
        );
        error!(
            "event=panic module=core status=error at={} payload={}",
            at,
            panic_preview(panic.payload())
        );
        chained(panic);
    }));
}

fn panic_preview(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .map_or_else(
            || "<non-string payload>".to_string(),
            |message| one_line_preview(message, PANIC_PREVIEW_CHARS),
        )
}

/// Joins lines and caps length so one panic stays one log line.
fn one_line_preview(value: &str, max_chars: usize) -> String {
    let mut preview: String = value
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r') { ' ' } else { ch })
        .take(max_chars)
        .collect();
    if value.chars().nth(max_chars).is_some() {
        preview.push_str("...");
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::{
        absolute_log_dir, default_log_level, init_logging, init_logging_with_config, level_name,
        logging_status, one_line_preview, panic_preview, parse_level, LoggingError,
    };
    use crate::config::DashboardConfig;
    use log::LevelFilter;

    #[test]
    fn parse_level_is_case_insensitive_and_accepts_warning() {
        assert_eq!(parse_level("DEBUG").expect("DEBUG parses"), LevelFilter::Debug);
        assert_eq!(parse_level(" warning ").expect("alias parses"), LevelFilter::Warn);
        assert!(matches!(
            parse_level("verbose"),
            Err(LoggingError::UnsupportedLevel(value)) if value == "verbose"
        ));
    }

    #[test]
    fn default_level_round_trips_through_parser() {
        let level = parse_level(default_log_level()).expect("default is valid");
        assert_eq!(level_name(level), default_log_level());
    }

    #[test]
    fn log_dir_must_be_absolute() {
        assert!(matches!(absolute_log_dir("  "), Err(LoggingError::EmptyLogDir)));
        assert!(matches!(
            absolute_log_dir("logs/dev"),
            Err(LoggingError::RelativeLogDir(_))
        ));
    }

    #[test]
    fn preview_flattens_and_truncates() {
        assert_eq!(one_line_preview("a\nb\rcdefghij", 6), "a b cd...");
        assert_eq!(one_line_preview("short", 6), "short");
        assert_eq!(panic_preview(&42_u8), "<non-string payload>");
        assert_eq!(panic_preview(&"boom"), "boom");
    }

    #[test]
    fn init_is_idempotent_and_rejects_reconfiguration() {
        // Kept on disk: the logger outlives this test.
        let first = tempfile::tempdir().expect("temp dir").keep();
        let second = tempfile::tempdir().expect("temp dir").keep();
        let first_dir = first.to_str().expect("utf-8 path").to_string();
        let second_dir = second.to_str().expect("utf-8 path").to_string();

        let config = DashboardConfig {
            log_level: "info".to_string(),
            ..DashboardConfig::default()
        };
        init_logging_with_config(&config, &first_dir).expect("first init succeeds");
        init_logging("INFO", &first_dir).expect("same settings are idempotent");

        assert!(matches!(
            init_logging("debug", &first_dir),
            Err(LoggingError::AlreadyActive { .. })
        ));
        assert!(matches!(
            init_logging("info", &second_dir),
            Err(LoggingError::AlreadyActive { .. })
        ));

        let (level, dir) = logging_status().expect("logging is running");
        assert_eq!(level, LevelFilter::Info);
        assert_eq!(dir, first);
    }
}
