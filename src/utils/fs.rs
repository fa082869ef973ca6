//! File system utilities for install steps.
//!
//! Every removal treats `NotFound` as success so install and uninstall can be
//! re-run on a partially applied system.

use crate::error::{ErrorExt, InstallerError, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Removes a file or symlink if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Removes a directory only if it is empty. Returns true if it was removed.
pub async fn remove_dir_if_empty(path: &Path) -> Result<bool> {
    let mut entries = match fs::read_dir(path).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e).fs_context("reading directory", path),
    };
    if entries
        .next_entry()
        .await
        .fs_context("reading directory", path)?
        .is_some()
    {
        return Ok(false);
    }
    fs::remove_dir(path)
        .await
        .fs_context("removing directory", path)?;
    Ok(true)
}

/// Returns true if something (including a dangling symlink) exists at `path`.
pub async fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).await.is_ok()
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
pub async fn symlink_file(src: &Path, dst: &Path) -> Result<()> {
    fs::symlink(src, dst).await.fs_context("creating symlink", dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
pub async fn symlink_file(src: &Path, dst: &Path) -> Result<()> {
    fs::symlink_file(src, dst)
        .await
        .fs_context("creating symlink", dst)
}

/// Marks a file as executable (0755).
#[cfg(unix)]
pub async fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .await
        .fs_context("setting permissions on", path)
}

/// Marks a file as executable. Nothing to do outside Unix.
#[cfg(not(unix))]
pub async fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// True if the file carries exactly the 0755 mode [`set_executable`] gives it.
#[cfg(unix)]
pub async fn is_executable(path: &Path) -> Result<bool> {
    use std::os::unix::fs::PermissionsExt;
    let metadata = fs::metadata(path)
        .await
        .fs_context("reading metadata of", path)?;
    Ok(metadata.permissions().mode() & 0o777 == 0o755)
}

/// Outside Unix every file counts as executable.
#[cfg(not(unix))]
pub async fn is_executable(_path: &Path) -> Result<bool> {
    Ok(true)
}

/// Writes `contents` to `path`, creating parent directories as needed.
pub async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .fs_context("creating directory", parent)?;
    }
    fs::write(path, contents).await.fs_context("writing", path)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(InstallerError::Generic(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(InstallerError::Generic(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying to", to)?;
    Ok(())
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Symlinks inside the tree are followed and copied as regular files so the
/// installed tree does not point back into the source directory.
/// Fails if the source path is not a directory or doesn't exist.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(InstallerError::Generic(format!("{from:?} does not exist")));
    }
    if !from.is_dir() {
        return Err(InstallerError::Generic(format!("{from:?} is not a Directory")));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    // Offload blocking work to dedicated thread pool
    tokio::task::spawn_blocking(move || -> Result<()> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).fs_context("creating directory", parent)?;
        }

        for entry in walkdir::WalkDir::new(&from).follow_links(true) {
            let entry = entry?;
            let rel_path = entry
                .path()
                .strip_prefix(&from)
                .map_err(|e| InstallerError::Generic(e.to_string()))?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path).fs_context("copying to", &dest_path)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| InstallerError::Generic(format!("Directory copy task panicked: {}", e)))?
}
