//! Packaging the application into a single-file executable.
//!
//! [`Packager`] validates the sources named by the build descriptor, renders
//! the PyInstaller spec, runs PyInstaller when it is available and records a
//! checksum (and optionally a distributable archive) for the result.
//!
//! # Example
//!
//! ```no_run
//! use osint_nexus_installer::package::{PackageOptions, Packager};
//! use osint_nexus_installer::settings::SettingsBuilder;
//!
//! # async fn example() -> osint_nexus_installer::Result<()> {
//! let settings = SettingsBuilder::new().source_dir(".").build()?;
//! let report = Packager::new(settings, None)
//!     .package(PackageOptions { spec_only: true, archive: false })
//!     .await?;
//! println!("spec: {}", report.spec.display());
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod build;
pub mod checksum;
pub mod spec;
pub mod template;
pub mod tool_detection;

use crate::bail;
use crate::error::{InstallerError, Result};
use crate::settings::{Platform, Settings};
use std::path::PathBuf;

/// Switches for [`Packager::package`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackageOptions {
    /// Stop after writing the spec file
    pub spec_only: bool,
    /// Also write a `.tar.gz` with the executable, assets and descriptor
    pub archive: bool,
}

/// What a packaging run produced.
#[derive(Debug, Clone, Default)]
pub struct PackageReport {
    /// Generated spec file
    pub spec: PathBuf,
    /// Packaged executable
    pub artifact: Option<PathBuf>,
    /// Hex SHA-256 of the executable
    pub checksum: Option<String>,
    /// `<artifact>.sha256` sidecar
    pub checksum_file: Option<PathBuf>,
    /// Distributable archive
    pub archive: Option<PathBuf>,
    /// Non-fatal problems
    pub warnings: Vec<String>,
}

/// Builds the packaged executable from resolved settings.
#[derive(Debug)]
pub struct Packager {
    settings: Settings,
    descriptor: Option<PathBuf>,
}

impl Packager {
    /// `descriptor` is the file the settings came from, if any.
    pub fn new(settings: Settings, descriptor: Option<PathBuf>) -> Self {
        Self {
            settings,
            descriptor,
        }
    }

    /// Run the packaging pipeline.
    pub async fn package(&self, options: PackageOptions) -> Result<PackageReport> {
        let mut report = PackageReport::default();

        let entry_point = self.settings.entry_point();
        if !entry_point.is_file() {
            bail!("entry point not found: {}", entry_point.display());
        }
        let assets = self.settings.assets_source();
        if !assets.is_dir() {
            bail!("assets directory not found: {}", assets.display());
        }

        let icon = match self.settings.bundle().icon.as_ref() {
            Some(icon) if self.settings.resolve(icon).is_file() => Some(icon.clone()),
            Some(icon) => {
                let warning = format!("icon not found, packaging without one: {}", icon.display());
                log::warn!("{warning}");
                report.warnings.push(warning);
                None
            }
            None => None,
        };

        report.spec = spec::write_spec(&self.settings, icon.as_deref()).await?;
        if options.spec_only {
            return Ok(report);
        }

        let Some(pyinstaller) = tool_detection::PYINSTALLER.as_deref() else {
            return Err(InstallerError::Tool {
                tool: "pyinstaller".to_string(),
                reason: "not found on PATH".to_string(),
            });
        };
        build::run_pyinstaller(pyinstaller, &self.settings, &report.spec).await?;

        let artifact = self.settings.source_binary(Platform::current());
        if !artifact.is_file() {
            return Err(InstallerError::Tool {
                tool: "pyinstaller".to_string(),
                reason: format!("expected output {} was not produced", artifact.display()),
            });
        }

        let checksum = checksum::calculate_sha256(&artifact).await?;
        log::info!("SHA256 {}: {checksum}", artifact.display());
        report.checksum_file = Some(checksum::write_checksum_file(&artifact, &checksum).await?);
        report.checksum = Some(checksum);

        if options.archive {
            report.archive = Some(
                archive::create_archive(&self.settings, &artifact, self.descriptor.as_deref())
                    .await?,
            );
        }
        report.artifact = Some(artifact);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsBuilder;

    #[tokio::test]
    async fn missing_entry_point_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("assets")).unwrap();
        let settings = SettingsBuilder::new().source_dir(tmp.path()).build().unwrap();

        let err = Packager::new(settings, None)
            .package(PackageOptions {
                spec_only: true,
                archive: false,
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("entry point not found"));
    }

    #[tokio::test]
    async fn spec_only_writes_spec_and_stops() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("src")).unwrap();
        std::fs::create_dir_all(tmp.path().join("assets")).unwrap();
        std::fs::write(tmp.path().join("src").join("main.py"), "print('hi')\n").unwrap();
        let settings = SettingsBuilder::new().source_dir(tmp.path()).build().unwrap();

        let report = Packager::new(settings, None)
            .package(PackageOptions {
                spec_only: true,
                archive: false,
            })
            .await
            .unwrap();
        assert_eq!(report.spec, tmp.path().join("OSINT-Nexus.spec"));
        assert!(report.spec.is_file());
        assert!(report.artifact.is_none());
    }
}
