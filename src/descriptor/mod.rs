//! Build descriptor loading and asset discovery.
//!
//! The descriptor (`nexus.toml`) is the single declarative input shared by the
//! packager and the installers. Every table is optional: a missing file or an
//! empty one yields the stock OSINT-Nexus configuration.

use crate::error::{ErrorExt, InstallerError, Result};
use crate::settings::{
    BundleSettings, DataSettings, LinuxSettings, PackageSettings, Settings, SettingsBuilder,
    WindowsSettings,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default descriptor file name, looked up in the source directory.
pub const DESCRIPTOR_FILE_NAME: &str = "nexus.toml";

/// Parsed contents of a build descriptor.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildDescriptor {
    /// `[package]` table
    pub package: PackageSettings,

    /// `[bundle]` table
    pub bundle: BundleSettings,

    /// `[linux]` table
    pub linux: LinuxSettings,

    /// `[windows]` table
    pub windows: WindowsSettings,

    /// `[data]` table
    pub data: DataSettings,
}

impl BuildDescriptor {
    /// Parse a descriptor from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a descriptor file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).fs_context("reading build descriptor", path)?;
        Self::parse(&text)
    }
}

/// Find the descriptor to use.
///
/// An explicitly given path must exist. Otherwise `nexus.toml` in the source
/// directory is used when present, and `None` means built-in defaults.
pub fn locate(source_dir: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(InstallerError::Descriptor {
                reason: format!("descriptor not found: {}", path.display()),
            });
        }
        return Ok(Some(path.to_path_buf()));
    }

    let default = source_dir.join(DESCRIPTOR_FILE_NAME);
    Ok(default.is_file().then_some(default))
}

/// Load the descriptor for `source_dir` and resolve it into [`Settings`].
pub fn load_settings(
    source_dir: &Path,
    explicit: Option<&Path>,
    install_dir_override: Option<PathBuf>,
) -> Result<Settings> {
    let mut descriptor = match locate(source_dir, explicit)? {
        Some(path) => {
            log::info!("Using build descriptor {}", path.display());
            BuildDescriptor::load(&path)?
        }
        None => {
            log::debug!(
                "No {} in {}, using built-in defaults",
                DESCRIPTOR_FILE_NAME,
                source_dir.display()
            );
            BuildDescriptor::default()
        }
    };

    discover_icons(source_dir, &mut descriptor);

    SettingsBuilder::new()
        .source_dir(source_dir)
        .package_settings(descriptor.package)
        .bundle_settings(descriptor.bundle)
        .linux_settings(descriptor.linux)
        .windows_settings(descriptor.windows)
        .data_settings(descriptor.data)
        .install_dir_override(install_dir_override)
        .build()
}

/// Fill unset icon fields from the conventional assets layout.
///
/// Looks for `icon.png` (Linux menu entry) and `icon.ico` (Windows shortcuts
/// and the executable resource) directly under the assets directory. Missing
/// icons are not an error; the installers warn and continue without them.
fn discover_icons(source_dir: &Path, descriptor: &mut BuildDescriptor) {
    let assets = &descriptor.bundle.assets;
    let png = assets.join("icon.png");
    let ico = assets.join("icon.ico");
    let png_found = source_dir.join(&png).is_file();
    let ico_found = source_dir.join(&ico).is_file();

    if descriptor.linux.icon.is_none() {
        if png_found {
            log::debug!("Found Linux icon: {}", png.display());
            descriptor.linux.icon = Some(png.clone());
        } else {
            log::debug!("Linux icon not found: {}", png.display());
        }
    }

    if descriptor.windows.icon.is_none() {
        if ico_found {
            log::debug!("Found Windows icon: {}", ico.display());
            descriptor.windows.icon = Some(ico.clone());
        } else {
            log::debug!("Windows icon not found: {}", ico.display());
        }
    }

    if descriptor.bundle.icon.is_none() {
        descriptor.bundle.icon = if ico_found {
            Some(ico)
        } else if png_found {
            Some(png)
        } else {
            None
        };
    }
}
