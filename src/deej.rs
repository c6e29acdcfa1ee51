//! Minimal stand-in for the mixer application the daemon hands off to.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span};

use crate::{
    bootstrap::Application,
    logging::{LOG_FILENAME, Logger, LoggingState},
    platform::ShutdownListener,
};

pub const CONFIG_FILENAME: &str = "config.yaml";

#[derive(Debug)]
pub struct Deej {
    verbose: bool,
    config_file: PathBuf,
    logging: LoggingState,
    version: Option<String>,
}

impl Deej {
    pub fn new(logger: &Logger, verbose: bool, config_dir: &Path) -> Result<Self> {
        if !config_dir.is_dir() {
            bail!("config directory {} does not exist", config_dir.display());
        }
        Ok(Self {
            verbose,
            config_file: config_dir.join(CONFIG_FILENAME),
            logging: logger.state().clone(),
            version: None,
        })
    }
}

impl Application for Deej {
    fn set_version(&mut self, version: String) {
        self.version = Some(version);
    }

    fn initialize(self) -> Result<()> {
        let _scope = info_span!("deej").entered();

        let meta = std::fs::metadata(&self.config_file)
            .with_context(|| format!("read config file {}", self.config_file.display()))?;
        if !meta.is_file() {
            bail!("{} is not a file", self.config_file.display());
        }
        info!(path = %self.config_file.display(), "Using config file");

        if let Some(version) = &self.version {
            info!(version = %version, "Version set");
        }
        if self.logging.file_logging_enabled
            && let Some(dir) = &self.logging.log_directory
        {
            info!(path = %dir.join(LOG_FILENAME).display(), "Writing logs to file");
        }
        if self.verbose {
            debug!("Verbose diagnostics enabled");
        }

        let listener = ShutdownListener::new()?;
        info!("Waiting for shutdown signal");
        let signal = listener.wait()?;
        info!(signal, "Received shutdown signal, exiting");
        Ok(())
    }
}
