//! Distributable `.tar.gz` archive.
//!
//! The archive unpacks to `<binary>-<version>/` with the executable and the
//! assets at the paths the bundled descriptor names, so
//! `install --source <dir>` works directly on the unpacked tree.

use crate::descriptor::DESCRIPTOR_FILE_NAME;
use crate::error::{Context, ErrorExt, InstallerError, Result};
use crate::settings::{Arch, Platform, Settings};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::path::{Component, Path, PathBuf};

/// Archive file name: `<binary>-<version>-<os>-<arch>.tar.gz`.
pub fn archive_name(settings: &Settings, platform: Platform, arch: Arch) -> String {
    format!(
        "{}-{}-{}-{}.tar.gz",
        settings.binary_name(),
        settings.version_string(),
        platform.as_str(),
        arch.as_str()
    )
}

/// Write the archive into the dist directory and return its path.
///
/// `artifact` is the packaged executable; `descriptor` is included when the
/// build used one.
pub async fn create_archive(
    settings: &Settings,
    artifact: &Path,
    descriptor: Option<&Path>,
) -> Result<PathBuf> {
    let output = settings
        .dist_dir()
        .join(archive_name(settings, Platform::current(), Arch::current()));
    let prefix = PathBuf::from(format!(
        "{}-{}",
        settings.binary_name(),
        settings.version_string()
    ));
    let bundle = settings.bundle();
    let dist_dir = path_in_archive(&bundle.dist_dir, "dist");
    let artifact_name = artifact
        .file_name()
        .map(PathBuf::from)
        .context("packaged executable path has no file name")?;

    let mut entries = vec![(artifact.to_path_buf(), prefix.join(dist_dir).join(artifact_name))];
    let assets = settings.assets_source();
    if assets.is_dir() {
        entries.push((assets, prefix.join(path_in_archive(&bundle.assets, "assets"))));
    }
    if let Some(descriptor) = descriptor {
        entries.push((descriptor.to_path_buf(), prefix.join(DESCRIPTOR_FILE_NAME)));
    }

    let archive_path = output.clone();
    tokio::task::spawn_blocking(move || write_tar_gz(&archive_path, &entries))
        .await
        .map_err(|e| InstallerError::Generic(format!("Archive task panicked: {e}")))??;

    log::info!("Wrote archive {}", output.display());
    Ok(output)
}

/// Where a descriptor directory lands inside the archive.
///
/// Relative paths are kept as written so the bundled descriptor still points
/// at them. Absolute paths and paths leaving the source directory cannot be
/// mirrored and fall back to `fallback`.
fn path_in_archive(configured: &Path, fallback: &str) -> PathBuf {
    let contained = configured
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    let relative: PathBuf = configured
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();
    if contained && !relative.as_os_str().is_empty() {
        return relative;
    }
    log::warn!(
        "{} cannot be mirrored inside the archive; storing it as {fallback}/",
        configured.display()
    );
    PathBuf::from(fallback)
}

fn write_tar_gz(output: &Path, entries: &[(PathBuf, PathBuf)]) -> Result<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent).fs_context("creating directory", parent)?;
    }
    let file = std::fs::File::create(output).fs_context("creating archive", output)?;
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    builder.mode(tar::HeaderMode::Deterministic);

    for (source, name) in entries {
        if source.is_dir() {
            builder
                .append_dir_all(name, source)
                .fs_context("archiving", source)?;
        } else {
            builder
                .append_path_with_name(source, name)
                .fs_context("archiving", source)?;
        }
    }

    builder
        .into_inner()
        .fs_context("finishing archive", output)?
        .finish()
        .fs_context("compressing archive", output)?;
    Ok(())
}
