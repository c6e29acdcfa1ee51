//! Logger factory.
//!
//! Release builds log at info and above, either colored to stderr or plain to
//! `<logPath>/deej-latest-run.log`. Every other build type logs at debug and
//! above to stderr, colored, and ignores the file settings.

use once_cell::sync::OnceCell;
use std::{
    fs::{self, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};
use thiserror::Error;
use tracing::{Dispatch, level_filters::LevelFilter};
use tracing_subscriber::fmt;

pub(crate) mod format;

pub(crate) use format::FATAL_TARGET;
use format::LineFormat;

pub const LOG_FILENAME: &str = "deej-latest-run.log";

static INSTALLED: OnceCell<()> = OnceCell::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildType {
    None,
    Dev,
    Release,
}

impl BuildType {
    /// Anything other than `""` or `"release"` is treated as a dev build.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "" => BuildType::None,
            "release" => BuildType::Release,
            _ => BuildType::Dev,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stderr,
    File(PathBuf),
}

/// Encoding and output decisions derived from build type and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub max_level: LevelFilter,
    pub destination: Destination,
    pub ansi: bool,
}

impl LoggerConfig {
    pub fn resolve(build_type: BuildType, file_enabled: bool, log_path: &Path) -> Self {
        match build_type {
            BuildType::Release if file_enabled => Self {
                max_level: LevelFilter::INFO,
                destination: Destination::File(log_path.join(LOG_FILENAME)),
                ansi: false,
            },
            BuildType::Release => Self {
                max_level: LevelFilter::INFO,
                destination: Destination::Stderr,
                ansi: true,
            },
            BuildType::Dev | BuildType::None => Self {
                max_level: LevelFilter::DEBUG,
                destination: Destination::Stderr,
                ansi: true,
            },
        }
    }
}

/// What collaborators need to know about file logging once the logger exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingState {
    pub file_logging_enabled: bool,
    pub log_directory: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("ensure log directory {} exists: {source}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("create logger: {0}")]
    Build(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub struct Logger {
    config: LoggerConfig,
    state: LoggingState,
    dispatch: Dispatch,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Logger {
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn state(&self) -> &LoggingState {
        &self.state
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    pub fn log_file(&self) -> Option<&Path> {
        match &self.config.destination {
            Destination::File(path) => Some(path),
            Destination::Stderr => None,
        }
    }

    /// Makes this logger the process-wide default. Later calls are no-ops.
    pub fn install(&self) -> Result<(), LoggerError> {
        INSTALLED
            .get_or_try_init(|| {
                tracing::dispatcher::set_global_default(self.dispatch().clone())
                    .map_err(|e| LoggerError::Build(Box::new(e)))
            })
            .map(|_| ())
    }
}

pub fn build_logger(
    build_type: BuildType,
    file_enabled: bool,
    log_path: &Path,
) -> Result<Logger, LoggerError> {
    let config = LoggerConfig::resolve(build_type, file_enabled, log_path);

    let mut state = LoggingState::default();
    if build_type == BuildType::Release && file_enabled {
        if log_path.as_os_str().is_empty() {
            return Err(LoggerError::DirectoryCreation {
                path: log_path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "log path is empty"),
            });
        }
        fs::create_dir_all(log_path).map_err(|source| LoggerError::DirectoryCreation {
            path: log_path.to_path_buf(),
            source,
        })?;
        state = LoggingState {
            file_logging_enabled: true,
            log_directory: Some(log_path.to_path_buf()),
        };
    }

    let builder = fmt::Subscriber::builder()
        .with_max_level(config.max_level)
        .with_ansi(config.ansi)
        .event_format(LineFormat);

    let dispatch = match &config.destination {
        Destination::Stderr => Dispatch::new(builder.with_writer(io::stderr).finish()),
        Destination::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LoggerError::Build(Box::new(e)))?;
            Dispatch::new(builder.with_writer(Mutex::new(file)).finish())
        }
    };

    Ok(Logger {
        config,
        state,
        dispatch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn build_type_from_raw() {
        assert_eq!(BuildType::from_raw(""), BuildType::None);
        assert_eq!(BuildType::from_raw("dev"), BuildType::Dev);
        assert_eq!(BuildType::from_raw("release"), BuildType::Release);
        assert_eq!(BuildType::from_raw("nightly"), BuildType::Dev);
    }

    #[test]
    fn non_release_builds_ignore_file_settings() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("never-created");
        for build_type in [BuildType::None, BuildType::Dev] {
            for file_enabled in [false, true] {
                let logger = build_logger(build_type, file_enabled, &target).unwrap();
                assert_eq!(logger.config().max_level, LevelFilter::DEBUG);
                assert_eq!(logger.config().destination, Destination::Stderr);
                assert!(logger.config().ansi);
                assert_eq!(logger.state(), &LoggingState::default());
            }
        }
        assert!(!target.exists());
    }

    #[test]
    fn release_without_file_logs_to_stderr() {
        let logger = build_logger(BuildType::Release, false, Path::new("unused")).unwrap();
        assert_eq!(logger.config().max_level, LevelFilter::INFO);
        assert_eq!(logger.config().destination, Destination::Stderr);
        assert!(logger.config().ansi);
        assert!(logger.log_file().is_none());
        assert!(!logger.state().file_logging_enabled);
        assert!(logger.state().log_directory.is_none());
    }

    #[test]
    fn release_with_file_creates_directory_and_records_state() {
        let dir = TempDir::new().unwrap();
        let log_path = dir.path().join("nested").join("logs");
        let logger = build_logger(BuildType::Release, true, &log_path).unwrap();

        assert!(log_path.is_dir());
        assert_eq!(logger.config().max_level, LevelFilter::INFO);
        assert_eq!(
            logger.config().destination,
            Destination::File(log_path.join(LOG_FILENAME))
        );
        assert!(!logger.config().ansi);
        assert_eq!(
            logger.state(),
            &LoggingState {
                file_logging_enabled: true,
                log_directory: Some(log_path.clone()),
            }
        );
        assert_eq!(logger.log_file(), Some(log_path.join(LOG_FILENAME).as_path()));
    }

    #[test]
    fn file_logger_writes_plain_lines_and_filters_debug() {
        let dir = TempDir::new().unwrap();
        let logger = build_logger(BuildType::Release, true, dir.path()).unwrap();
        tracing::dispatcher::with_default(logger.dispatch(), || {
            tracing::debug!("hidden");
            tracing::info!(answer = 42, "shown");
        });

        let written = fs::read_to_string(dir.path().join(LOG_FILENAME)).unwrap();
        assert!(!written.contains("hidden"), "{written}");
        assert!(written.contains("\tINFO\tshown answer=42"), "{written}");
        assert!(!written.contains('\x1b'), "{written}");
        assert!(!written.contains("mod.rs"), "{written}");
    }

    #[test]
    fn uncreatable_directory_fails_without_logger() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("plain-file");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = build_logger(BuildType::Release, true, &blocker.join("logs")).unwrap_err();
        assert!(matches!(err, LoggerError::DirectoryCreation { .. }), "{err:?}");
    }

    #[test]
    fn empty_log_path_is_rejected() {
        let err = build_logger(BuildType::Release, true, Path::new("")).unwrap_err();
        match err {
            LoggerError::DirectoryCreation { path, source } => {
                assert!(path.as_os_str().is_empty());
                assert_eq!(source.kind(), io::ErrorKind::InvalidInput);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unopenable_log_file_fails_build() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(LOG_FILENAME)).unwrap();

        let err = build_logger(BuildType::Release, true, dir.path()).unwrap_err();
        assert!(matches!(err, LoggerError::Build(_)), "{err:?}");
        assert!(err.to_string().starts_with("create logger: "), "{err}");
    }

    #[test]
    fn identical_inputs_give_identical_configuration() {
        let dir = TempDir::new().unwrap();
        for (build_type, file_enabled) in [
            (BuildType::None, false),
            (BuildType::Release, false),
            (BuildType::Release, true),
        ] {
            let first = build_logger(build_type, file_enabled, dir.path()).unwrap();
            let second = build_logger(build_type, file_enabled, dir.path()).unwrap();
            assert_eq!(first.config(), second.config());
            assert_eq!(first.state(), second.state());
        }
    }

    #[test]
    fn install_is_idempotent() {
        let logger = build_logger(BuildType::Dev, false, Path::new("unused")).unwrap();
        logger.install().unwrap();
        logger.install().unwrap();
    }
}
