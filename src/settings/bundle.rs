//! Build descriptor settings for the packaged executable.

use serde::Deserialize;
use std::path::PathBuf;

/// Libraries the frozen executable must carry even though static analysis
/// of the entry point cannot see them.
pub const DEFAULT_HIDDEN_IMPORTS: &[&str] = &[
    "PyQt6.QtCore",
    "PyQt6.QtGui",
    "PyQt6.QtWidgets",
    "aiohttp",
    "asyncio",
    "bs4",
    "dns.resolver",
    "dns.exception",
    "networkx",
    "phonenumbers",
    "shodan",
    "whois",
    "sqlite3",
    "xml.etree.ElementTree",
];

/// Single-file executable configuration.
///
/// # Configuration
///
/// ```toml
/// [bundle]
/// entry_point = "src/main.py"
/// assets = "assets"
/// icon = "assets/icon.ico"
/// hidden_imports = ["PyQt6.QtCore", "aiohttp"]
/// console = false
/// ```
///
/// All paths are relative to the source directory.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BundleSettings {
    /// Script the packaged executable starts from.
    pub entry_point: PathBuf,

    /// Directory of runtime assets shipped next to the executable.
    pub assets: PathBuf,

    /// Output directory of the packager.
    pub dist_dir: PathBuf,

    /// Work directory of the packager.
    pub build_dir: PathBuf,

    /// Icon resource embedded in the executable.
    ///
    /// Default: None (discovered under `assets/` when present)
    pub icon: Option<PathBuf>,

    /// Bundled library names.
    pub hidden_imports: Vec<String>,

    /// Keep a console window attached to the executable.
    ///
    /// Default: false (windowed GUI application)
    pub console: bool,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            entry_point: PathBuf::from("src").join("main.py"),
            assets: PathBuf::from("assets"),
            dist_dir: PathBuf::from("dist"),
            build_dir: PathBuf::from("build"),
            icon: None,
            hidden_imports: DEFAULT_HIDDEN_IMPORTS.iter().map(|s| s.to_string()).collect(),
            console: false,
        }
    }
}
