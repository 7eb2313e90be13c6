//! Runtime file locations.
//!
//! # Responsibility
//! - Resolve the per-user base directory once at startup.
//! - Derive store, indicator and log paths from it.
//!
//! # Invariants
//! - `base_dir` is always absolute.
//! - Resolution order: explicit override, `GOALS_DIR`, `~/.goals`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable overriding the base directory.
pub const DIR_ENV: &str = "GOALS_DIR";
/// Environment variable selecting the log level.
pub const LOG_LEVEL_ENV: &str = "GOALS_LOG";

const DEFAULT_DIR_NAME: &str = ".goals";
const STORE_FILE_NAME: &str = "goals.json";
const INDICATOR_FILE_NAME: &str = "current_goal.txt";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    /// No override given and the home directory is unknown.
    HomeDirUnavailable,
    /// The configured directory cannot be made absolute.
    InvalidDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HomeDirUnavailable => write!(
                f,
                "cannot locate home directory; set {DIR_ENV} or pass --dir"
            ),
            Self::InvalidDir { path, source } => {
                write!(f, "invalid goals directory `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::HomeDirUnavailable => None,
            Self::InvalidDir { source, .. } => Some(source),
        }
    }
}

/// File layout for one user's goal stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalsConfig {
    base_dir: PathBuf,
}

impl GoalsConfig {
    /// Uses `base_dir` as is, made absolute against the working directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let base_dir = base_dir.into();
        let absolute = std::path::absolute(&base_dir).map_err(|source| ConfigError::InvalidDir {
            path: base_dir.clone(),
            source,
        })?;
        Ok(Self { base_dir: absolute })
    }

    /// Resolves the base directory from an override, the environment, or home.
    pub fn resolve(override_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let env_dir = std::env::var(DIR_ENV).ok().map(PathBuf::from);
        Self::resolve_with(override_dir, env_dir, dirs::home_dir())
    }

    fn resolve_with(
        override_dir: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        home_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let base_dir = override_dir
            .filter(|dir| !dir.as_os_str().is_empty())
            .or_else(|| env_dir.filter(|dir| !dir.as_os_str().is_empty()))
            .or_else(|| home_dir.map(|home| home.join(DEFAULT_DIR_NAME)))
            .ok_or(ConfigError::HomeDirUnavailable)?;
        Self::new(base_dir)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn store_path(&self) -> PathBuf {
        self.base_dir.join(STORE_FILE_NAME)
    }

    pub fn indicator_path(&self) -> PathBuf {
        self.base_dir.join(INDICATOR_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join(LOG_DIR_NAME)
    }
}
