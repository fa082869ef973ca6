//! Windows platform-specific settings.

use serde::Deserialize;
use std::path::PathBuf;

/// Windows install configuration.
///
/// # Configuration
///
/// ```toml
/// [windows]
/// install_dir = 'C:\Program Files\OSINT-Nexus'
/// start_menu_shortcut = true
/// desktop_shortcut = true
/// add_to_path = true
/// ```
///
/// When `install_dir` is unset the folder is `%ProgramFiles%\<product name>`.
/// Shortcuts are created for all users: the Start Menu entry under
/// `%ProgramData%\Microsoft\Windows\Start Menu\Programs` and the Desktop
/// entry under `%PUBLIC%\Desktop`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WindowsSettings {
    /// Install directory.
    ///
    /// Default: None (`%ProgramFiles%\<product name>`)
    pub install_dir: Option<PathBuf>,

    /// Create a Start Menu shortcut.
    pub start_menu_shortcut: bool,

    /// Create a Desktop shortcut.
    pub desktop_shortcut: bool,

    /// Append the install directory to the machine `PATH`.
    pub add_to_path: bool,

    /// ICO icon used by the shortcuts, relative to the source directory.
    ///
    /// Default: None (discovered as `assets/icon.ico`)
    pub icon: Option<PathBuf>,
}

impl Default for WindowsSettings {
    fn default() -> Self {
        Self {
            install_dir: None,
            start_menu_shortcut: true,
            desktop_shortcut: true,
            add_to_path: true,
            icon: None,
        }
    }
}
