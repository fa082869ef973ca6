//! PyInstaller invocation.

use crate::error::{ErrorExt, InstallerError, Result};
use crate::settings::Settings;
use std::path::{Path, PathBuf};

/// Run PyInstaller against `spec_path` from the source directory.
///
/// Output goes to the configured `dist` and `build` directories.
pub async fn run_pyinstaller(pyinstaller: &Path, settings: &Settings, spec_path: &Path) -> Result<()> {
    log::info!("Running pyinstaller...");

    // PyInstaller runs from the source directory; pass it absolute paths
    let dist_dir = absolute(&settings.dist_dir())?;
    let build_dir = absolute(&settings.build_dir())?;
    let spec_path = absolute(spec_path)?;
    tokio::fs::create_dir_all(&dist_dir)
        .await
        .fs_context("creating packager output directory", &dist_dir)?;

    let status = tokio::process::Command::new(pyinstaller)
        .current_dir(settings.source_dir())
        .arg("--noconfirm")
        .arg("--clean")
        .arg("--distpath")
        .arg(&dist_dir)
        .arg("--workpath")
        .arg(&build_dir)
        .arg(&spec_path)
        .status()
        .await
        .map_err(|e| InstallerError::Tool {
            tool: "pyinstaller".to_string(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(InstallerError::Tool {
            tool: "pyinstaller".to_string(),
            reason: format!("packaging failed (exit code: {:?})", status.code()),
        });
    }

    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).fs_context("resolving", path)
}
