//! Errors raised while preparing the dashboard: config directory and log file setup.
//!
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

#[derive(Debug)]
pub enum SetupError {
    /// Something other than a directory sits where the config directory should be.
    NotADirectory(PathBuf),
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for SetupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::NotADirectory(path) => write!(f, "{} is not a directory", path.display()),
            SetupError::Io { action, path, source } => {
                write!(f, "{} {}: {}", action, path.display(), source)
            }
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Io { source, .. } => Some(source),
            SetupError::NotADirectory(_) => None,
        }
    }
}

/// Tag an I/O failure with what was being done and to which path.
pub trait IoContext<T> {
    fn at_path(self, action: &'static str, path: &Path) -> std::result::Result<T, SetupError>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at_path(self, action: &'static str, path: &Path) -> std::result::Result<T, SetupError> {
        self.map_err(|source| SetupError::Io {
            action,
            path: path.to_path_buf(),
            source,
        })
    }
}
