//! Per-user application data.

use serde::Deserialize;
use std::path::PathBuf;

/// Where the application keeps its per-user state.
///
/// Only touched by `uninstall --purge`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DataSettings {
    /// Data directory. A leading `~` expands to the home directory.
    pub user_dir: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            user_dir: PathBuf::from("~/.osint-nexus"),
        }
    }
}
