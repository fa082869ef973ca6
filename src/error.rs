//! Error types for installer and packaging operations.
//!
//! Every fallible operation in the crate returns [`Result`]. Filesystem
//! failures carry the action and path through [`ErrorExt::fs_context`] so the
//! top-level report names what was being touched.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for installer operations
pub type Result<T> = std::result::Result<T, InstallerError>;

/// Main error type for all installer operations
#[derive(Error, Debug)]
pub enum InstallerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors without path context
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// IO errors with the action and path that failed
    #[error("failed {action} {}: {source}", path.display())]
    Fs {
        /// What was being done
        action: String,
        /// Path being operated on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization errors (install receipt)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors (build descriptor)
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Directory traversal errors
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Version parsing errors
    #[error("Version error: {0}")]
    Version(#[from] semver::Error),

    /// Template rendering errors
    #[error("Template error: {0}")]
    Template(String),

    /// Invalid or inconsistent build descriptor
    #[error("Invalid build descriptor: {reason}")]
    Descriptor {
        /// Reason for the error
        reason: String,
    },

    /// The operation requires root / administrator privileges
    #[error("{operation} requires root privileges (try: sudo {operation})")]
    PrivilegeRequired {
        /// Operation that was refused
        operation: String,
    },

    /// An installed version newer than the one being installed was found
    #[error("installed version {installed} is newer than {incoming}")]
    Downgrade {
        /// Version recorded in the receipt
        installed: String,
        /// Version being installed
        incoming: String,
    },

    /// External tool missing or failed
    #[error("{tool}: {reason}")]
    Tool {
        /// Tool name
        tool: String,
        /// Reason for the error
        reason: String,
    },

    /// Generic errors
    #[error("{0}")]
    Generic(String),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Conflicting arguments
    #[error("Conflicting arguments: {arguments:?}")]
    ConflictingArguments {
        /// Arguments that conflict
        arguments: Vec<String>,
    },
}

impl InstallerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            InstallerError::PrivilegeRequired { .. } => vec![
                "Re-run the command with sudo".to_string(),
                "Or pass --root <DIR> to stage the install into a directory you own".to_string(),
            ],
            InstallerError::Downgrade { .. } => vec![
                "Uninstall the newer version first".to_string(),
                "Or pass --force to overwrite it".to_string(),
            ],
            InstallerError::Descriptor { .. } | InstallerError::Toml(_) => {
                vec!["Check nexus.toml (or the file given with --descriptor)".to_string()]
            }
            InstallerError::Tool { tool, .. } => {
                vec![format!("Make sure {tool} is installed and on PATH")]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            InstallerError::Cli(_) => 2,
            InstallerError::PrivilegeRequired { .. } => 3,
            _ => 1,
        }
    }
}

/// Attach filesystem context (action + path) to IO results.
pub trait ErrorExt<T> {
    /// Wrap the error with a description of the action and the path.
    fn fs_context(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|source| InstallerError::Fs {
            action: action.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Convert `None` into a generic error with a message.
pub trait Context<T> {
    /// Attach a message used when the value is missing.
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| InstallerError::Generic(msg.to_string()))
    }
}

/// Return early with a formatted [`InstallerError::Generic`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::error::InstallerError::Generic(format!($($arg)*)))
    };
}
