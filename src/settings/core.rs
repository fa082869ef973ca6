//! Core Settings struct and implementations.

use super::{BundleSettings, DataSettings, LinuxSettings, PackageSettings, Platform, WindowsSettings};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Resolved settings for install and packaging operations.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Relative
/// paths from the build descriptor are resolved against the source directory,
/// which holds the packager output (`dist/`) and the `assets/` tree.
///
/// # Examples
///
/// ```no_run
/// use osint_nexus_installer::settings::{SettingsBuilder, PackageSettings};
///
/// # fn example() -> osint_nexus_installer::Result<()> {
/// let settings = SettingsBuilder::new()
///     .source_dir(".")
///     .package_settings(PackageSettings::default())
///     .build()?;
/// assert_eq!(settings.binary_name(), "osint-nexus");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    package: PackageSettings,
    bundle: BundleSettings,
    linux: LinuxSettings,
    windows: WindowsSettings,
    data: DataSettings,

    /// Directory containing `dist/`, `assets/` and the entry point.
    source_dir: PathBuf,

    /// Install directory given on the command line.
    install_dir_override: Option<PathBuf>,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the command name.
    pub fn binary_name(&self) -> &str {
        &self.package.binary_name
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.package.version
    }

    /// Returns the parsed version.
    pub fn version(&self) -> Result<semver::Version> {
        Ok(semver::Version::parse(&self.package.version)?)
    }

    /// Returns the package description.
    pub fn description(&self) -> &str {
        &self.package.description
    }

    /// Returns the publisher, if any.
    pub fn publisher(&self) -> Option<&str> {
        self.package.publisher.as_deref()
    }

    /// Returns the package homepage URL.
    pub fn homepage(&self) -> Option<&str> {
        self.package.homepage.as_deref()
    }

    /// Returns the source directory.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Returns the bundle settings.
    pub fn bundle(&self) -> &BundleSettings {
        &self.bundle
    }

    /// Returns the Linux settings.
    pub fn linux(&self) -> &LinuxSettings {
        &self.linux
    }

    /// Returns the Windows settings.
    pub fn windows(&self) -> &WindowsSettings {
        &self.windows
    }

    /// Returns the per-user data settings.
    pub fn data(&self) -> &DataSettings {
        &self.data
    }

    /// Returns the install directory given on the command line.
    pub fn install_dir_override(&self) -> Option<&Path> {
        self.install_dir_override.as_deref()
    }

    /// Name the packager gives the single-file executable, without extension.
    ///
    /// Linux builds are named after the command, Windows builds after the
    /// product.
    pub fn packaged_stem(&self, platform: Platform) -> &str {
        match platform {
            Platform::Windows => self.product_name(),
            Platform::Linux => self.binary_name(),
        }
    }

    /// File name the packager gives the single-file executable.
    pub fn packaged_executable_name(&self, platform: Platform) -> String {
        match platform {
            Platform::Windows => format!("{}.exe", self.packaged_stem(platform)),
            Platform::Linux => self.packaged_stem(platform).to_string(),
        }
    }

    /// File name of the executable inside the install directory.
    pub fn installed_executable_name(&self, platform: Platform) -> String {
        match platform {
            Platform::Windows => format!("{}.exe", self.product_name()),
            Platform::Linux => self.binary_name().to_string(),
        }
    }

    /// Prebuilt executable in the packager output directory.
    pub fn source_binary(&self, platform: Platform) -> PathBuf {
        self.resolve(&self.bundle.dist_dir)
            .join(self.packaged_executable_name(platform))
    }

    /// Assets directory in the source tree.
    pub fn assets_source(&self) -> PathBuf {
        self.resolve(&self.bundle.assets)
    }

    /// Entry point script in the source tree.
    pub fn entry_point(&self) -> PathBuf {
        self.resolve(&self.bundle.entry_point)
    }

    /// Packager output directory.
    pub fn dist_dir(&self) -> PathBuf {
        self.resolve(&self.bundle.dist_dir)
    }

    /// Packager work directory.
    pub fn build_dir(&self) -> PathBuf {
        self.resolve(&self.bundle.build_dir)
    }

    /// Icon used for desktop integration on `platform`.
    pub fn desktop_icon(&self, platform: Platform) -> Option<PathBuf> {
        let icon = match platform {
            Platform::Linux => self.linux.icon.as_ref(),
            Platform::Windows => self.windows.icon.as_ref(),
        };
        icon.map(|p| self.resolve(p))
    }

    /// Resolves a descriptor path against the source directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.source_dir.join(path)
        }
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        bundle: BundleSettings,
        linux: LinuxSettings,
        windows: WindowsSettings,
        data: DataSettings,
        source_dir: PathBuf,
        install_dir_override: Option<PathBuf>,
    ) -> Self {
        Self {
            package,
            bundle,
            linux,
            windows,
            data,
            source_dir,
            install_dir_override,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::SettingsBuilder;
    use super::*;

    #[test]
    fn packaged_binary_is_named_per_platform() {
        let settings = SettingsBuilder::new().source_dir("/src").build().unwrap();
        assert_eq!(
            settings.source_binary(Platform::Linux),
            PathBuf::from("/src/dist/osint-nexus")
        );
        assert_eq!(
            settings.source_binary(Platform::Windows),
            PathBuf::from("/src/dist/OSINT-Nexus.exe")
        );
    }
}
