//! Package metadata.

use serde::Deserialize;

/// Package metadata shared by every platform.
///
/// Maps from the `[package]` table of the build descriptor.
///
/// # Examples
///
/// ```no_run
/// use osint_nexus_installer::settings::PackageSettings;
///
/// let settings = PackageSettings {
///     product_name: "OSINT-Nexus".into(),
///     binary_name: "osint-nexus".into(),
///     version: "1.0.0".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PackageSettings {
    /// Product name displayed to users.
    ///
    /// Used for the Windows install folder, shortcut names, the desktop entry
    /// `Name=` and the packaged Windows executable.
    #[serde(rename = "name")]
    pub product_name: String,

    /// Lower-case command name.
    ///
    /// The packaged and installed Linux binary, the symlink on `PATH` and the
    /// desktop entry file are all named after it.
    #[serde(rename = "binary")]
    pub binary_name: String,

    /// Version string in semantic versioning format.
    pub version: String,

    /// Brief description of the application.
    pub description: String,

    /// Publisher shown in shortcut descriptions.
    ///
    /// Default: None
    pub publisher: Option<String>,

    /// Homepage URL for the application.
    ///
    /// Default: None
    pub homepage: Option<String>,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            product_name: "OSINT-Nexus".to_string(),
            binary_name: "osint-nexus".to_string(),
            version: "1.0.0".to_string(),
            description: "Cross-platform OSINT gathering and visualization".to_string(),
            publisher: Some("OSINT-Nexus".to_string()),
            homepage: None,
        }
    }
}
