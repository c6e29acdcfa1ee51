use clap::Parser;
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

/// Directory name used under the user config home.
pub(crate) const APP_NAME: &str = "deej";

const DEFAULT_LOG_PATH: &str = "./logs";
const DEFAULT_CONFIG_PATH: &str = ".";

/// Only Linux rebases defaults under `XDG_CONFIG_HOME`.
const USES_CONFIG_HOME: bool = cfg!(target_os = "linux");

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Show verbose logs (useful for debugging serial)
    #[arg(short = 'v', long)]
    pub verbose: bool,
    /// Enable output of a log file (release builds only)
    #[arg(long = "enableLogFile", visible_alias = "enableLogging")]
    pub enable_log_file: bool,
    /// Folder in which the log file is created; created if missing
    #[arg(long = "logPath", value_name = "DIR")]
    pub log_path: Option<PathBuf>,
    /// Directory containing config.yaml
    #[arg(short = 'c', long = "config", value_name = "DIR")]
    pub config: Option<PathBuf>,
}

/// Fully resolved invocation, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationOptions {
    pub verbose: bool,
    pub enable_log_file: bool,
    pub log_path: PathBuf,
    pub config_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Defaults {
    log_path: PathBuf,
    config_path: PathBuf,
}

impl Defaults {
    fn for_platform(config_home: Option<&OsStr>) -> Self {
        match config_home.filter(|home| USES_CONFIG_HOME && !home.is_empty()) {
            Some(home) => {
                let root = Path::new(home).join(APP_NAME);
                Self {
                    log_path: root.join("logs"),
                    config_path: root,
                }
            }
            None => Self {
                log_path: PathBuf::from(DEFAULT_LOG_PATH),
                config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            },
        }
    }
}

impl InvocationOptions {
    /// Reads the process arguments and environment.
    pub fn from_env() -> Self {
        let config_home = std::env::var_os("XDG_CONFIG_HOME");
        Self::resolve(Cli::parse(), config_home.as_deref())
    }

    pub fn resolve(cli: Cli, config_home: Option<&OsStr>) -> Self {
        let defaults = Defaults::for_platform(config_home);
        Self {
            verbose: cli.verbose,
            enable_log_file: cli.enable_log_file,
            log_path: cli.log_path.unwrap_or(defaults.log_path),
            config_path: cli.config.unwrap_or(defaults.config_path),
        }
    }
}
