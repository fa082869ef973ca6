//! Linux platform-specific settings.

use serde::Deserialize;
use std::path::PathBuf;

/// Linux install configuration.
///
/// # Configuration
///
/// ```toml
/// [linux]
/// install_dir = "/opt/osint-nexus"
/// bin_dir = "/usr/local/bin"
/// applications_dir = "/usr/share/applications"
/// categories = ["Network", "Security"]
/// ```
///
/// # Desktop Integration
///
/// A freedesktop.org entry named `<binary>.desktop` is written into
/// `applications_dir`. Its `Icon=` points at the icon copied into the install
/// directory, when one is available.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LinuxSettings {
    /// Directory receiving the binary, assets and icon.
    pub install_dir: PathBuf,

    /// Directory on the command search path receiving the symlink.
    pub bin_dir: PathBuf,

    /// Desktop-menu entry directory.
    pub applications_dir: PathBuf,

    /// freedesktop.org categories for the menu entry.
    pub categories: Vec<String>,

    /// PNG icon, relative to the source directory.
    ///
    /// Default: None (discovered as `assets/icon.png`)
    pub icon: Option<PathBuf>,

    /// Launch in a terminal.
    ///
    /// Default: false
    pub terminal: bool,
}

impl Default for LinuxSettings {
    fn default() -> Self {
        Self {
            install_dir: PathBuf::from("/opt/osint-nexus"),
            bin_dir: PathBuf::from("/usr/local/bin"),
            applications_dir: PathBuf::from("/usr/share/applications"),
            categories: vec!["Network".to_string(), "Security".to_string()],
            icon: None,
            terminal: false,
        }
    }
}
