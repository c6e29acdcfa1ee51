//! Startup sequencing.
//!
//! Logger first, then the application object, then its version string, then
//! its run loop. Every failure ends the process: before the logger exists the
//! message goes straight to stderr, afterwards it is logged as fatal.

use std::{path::Path, process};
use thiserror::Error;
use tracing::{Span, debug, error, info, info_span};

use crate::{
    cli::InvocationOptions,
    deej::Deej,
    logging::{BuildType, FATAL_TARGET, Logger, build_logger},
    version::VersionInfo,
};

/// The long-running collaborator started once logging is ready.
pub trait Application {
    fn set_version(&mut self, version: String);
    /// Runs until shutdown; `Ok` means the run loop ended cleanly.
    fn initialize(self) -> anyhow::Result<()>;
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to create deej object")]
    AppConstruction(#[source] anyhow::Error),
    #[error("Failed to initialize deej")]
    AppInitialization(#[source] anyhow::Error),
}

impl StartupError {
    fn cause(&self) -> &anyhow::Error {
        match self {
            StartupError::AppConstruction(e) | StartupError::AppInitialization(e) => e,
        }
    }
}

pub fn run(options: &InvocationOptions, version: &VersionInfo) {
    let build_type = BuildType::from_raw(version.build_type);
    let logger = match build_logger(build_type, options.enable_log_file, &options.log_path)
        .and_then(|logger| logger.install().map(|()| logger))
    {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("Failed to create logger: {err}");
            process::exit(1);
        }
    };

    let main = info_span!("main");
    if let Err(err) = launch(&logger, &main, options, version, Deej::new) {
        fatal(&main, &err);
    }
}

pub fn launch<A, F>(
    logger: &Logger,
    scope: &Span,
    options: &InvocationOptions,
    version: &VersionInfo,
    construct: F,
) -> Result<(), StartupError>
where
    A: Application,
    F: FnOnce(&Logger, bool, &Path) -> anyhow::Result<A>,
{
    scope.in_scope(|| {
        debug!(
            level = %logger.config().max_level,
            log_file = ?logger.log_file(),
            "Created logger"
        );
        info!(
            git_commit = version.git_commit,
            version_tag = version.version_tag,
            build_type = version.build_type,
            "Version info"
        );
        if options.verbose {
            debug!("Verbose flag provided, all log messages will be shown");
        }
    });

    let mut app = construct(logger, options.verbose, &options.config_path)
        .map_err(StartupError::AppConstruction)?;

    if let Some(display) = version.display_string() {
        app.set_version(display);
    }

    app.initialize().map_err(StartupError::AppInitialization)
}

/// Logs `err` at fatal severity inside `scope` and exits with status 1.
pub(crate) fn fatal(scope: &Span, err: &StartupError) -> ! {
    let cause = format!("{:#}", err.cause());
    scope.in_scope(|| error!(target: FATAL_TARGET, error = %cause, "{err}"));
    process::exit(1)
}
