//! Builder for constructing Settings.

use super::{BundleSettings, DataSettings, LinuxSettings, PackageSettings, Settings, WindowsSettings};
use crate::error::{InstallerError, Result};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Every section defaults to the stock OSINT-Nexus configuration; `build`
/// validates the combination.
///
/// # Examples
///
/// ```no_run
/// use osint_nexus_installer::settings::{LinuxSettings, SettingsBuilder};
///
/// # fn example() -> osint_nexus_installer::Result<()> {
/// let settings = SettingsBuilder::new()
///     .source_dir("/tmp/release")
///     .linux_settings(LinuxSettings {
///         install_dir: "/opt/nexus".into(),
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    source_dir: Option<PathBuf>,
    package: PackageSettings,
    bundle: BundleSettings,
    linux: LinuxSettings,
    windows: WindowsSettings,
    data: DataSettings,
    install_dir_override: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the source directory holding `dist/` and `assets/`.
    ///
    /// Default: current directory
    pub fn source_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets package metadata.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package = settings;
        self
    }

    /// Sets bundle configuration.
    pub fn bundle_settings(mut self, settings: BundleSettings) -> Self {
        self.bundle = settings;
        self
    }

    /// Sets Linux install configuration.
    pub fn linux_settings(mut self, settings: LinuxSettings) -> Self {
        self.linux = settings;
        self
    }

    /// Sets Windows install configuration.
    pub fn windows_settings(mut self, settings: WindowsSettings) -> Self {
        self.windows = settings;
        self
    }

    /// Sets per-user data configuration.
    pub fn data_settings(mut self, settings: DataSettings) -> Self {
        self.data = settings;
        self
    }

    /// Overrides the install directory on every platform.
    pub fn install_dir_override(mut self, path: Option<PathBuf>) -> Self {
        self.install_dir_override = path;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::Descriptor`] when names are empty or contain
    /// path separators, metadata contains line breaks, the version is not
    /// semver, or a Linux target directory is relative.
    pub fn build(self) -> Result<Settings> {
        let invalid = |reason: String| InstallerError::Descriptor { reason };

        for (field, value) in [
            ("package.name", &self.package.product_name),
            ("package.binary", &self.package.binary_name),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(format!("{field} is empty")));
            }
            if value.contains(['/', '\\']) {
                return Err(invalid(format!("{field} must not contain path separators: {value}")));
            }
        }

        // Rendered into single-line fields of the spec file and desktop entry
        for (field, value) in [
            ("package.name", Some(self.package.product_name.as_str())),
            ("package.description", Some(self.package.description.as_str())),
            ("package.publisher", self.package.publisher.as_deref()),
            ("package.homepage", self.package.homepage.as_deref()),
        ] {
            if value.is_some_and(|v| v.contains(char::is_control)) {
                return Err(invalid(format!("{field} must be a single line")));
            }
        }

        semver::Version::parse(&self.package.version).map_err(|e| {
            invalid(format!("package.version {:?} is not semver: {e}", self.package.version))
        })?;

        for (field, dir) in [
            ("linux.install_dir", &self.linux.install_dir),
            ("linux.bin_dir", &self.linux.bin_dir),
            ("linux.applications_dir", &self.linux.applications_dir),
        ] {
            if !dir.has_root() {
                return Err(invalid(format!("{field} must be absolute: {}", dir.display())));
            }
        }

        if let Some(name) = self.bundle.hidden_imports.iter().find(|n| n.trim().is_empty()) {
            return Err(invalid(format!("bundle.hidden_imports contains an empty name: {name:?}")));
        }

        let source_dir = self.source_dir.unwrap_or_else(|| PathBuf::from("."));

        Ok(Settings::new(
            self.package,
            self.bundle,
            self.linux,
            self.windows,
            self.data,
            source_dir,
            self.install_dir_override,
        ))
    }
}
