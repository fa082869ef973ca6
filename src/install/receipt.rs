//! Install receipt: what an install created, for a precise uninstall.

use super::env_path::{self, PathStore};
use crate::error::{ErrorExt, Result};
use crate::settings::Platform;
use crate::utils::fs;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Something an install put on the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artifact {
    /// Directory install created, removed recursively
    Directory { path: PathBuf },
    /// Copied file
    File { path: PathBuf },
    /// Copied directory tree
    Tree { path: PathBuf },
    /// Symlink, removed only while it still points at `target`
    Symlink { path: PathBuf, target: PathBuf },
    /// Desktop-menu entry
    DesktopEntry { path: PathBuf },
    /// Windows shortcut
    Shortcut { path: PathBuf },
    /// Machine PATH entry
    PathEntry { dir: PathBuf },
}

/// Result of removing one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// The artifact was there and is gone now
    Removed,
    /// Nothing to remove
    Absent,
    /// Left in place, with the reason
    Kept(String),
}

impl Artifact {
    /// Human-readable description.
    pub fn describe(&self) -> String {
        match self {
            Artifact::Directory { path } => format!("directory {}", path.display()),
            Artifact::File { path } => format!("file {}", path.display()),
            Artifact::Tree { path } => format!("directory tree {}", path.display()),
            Artifact::Symlink { path, .. } => format!("symlink {}", path.display()),
            Artifact::DesktopEntry { path } => format!("desktop entry {}", path.display()),
            Artifact::Shortcut { path } => format!("shortcut {}", path.display()),
            Artifact::PathEntry { dir } => format!("PATH entry {}", dir.display()),
        }
    }

    /// True if the artifact is still on the system.
    pub async fn is_present(&self, machine_path: &dyn PathStore) -> Result<bool> {
        match self {
            Artifact::PathEntry { dir } => {
                Ok(env_path::contains_entry(&machine_path.read()?, dir))
            }
            Artifact::Directory { path }
            | Artifact::Tree { path }
            | Artifact::File { path }
            | Artifact::Symlink { path, .. }
            | Artifact::DesktopEntry { path }
            | Artifact::Shortcut { path } => Ok(fs::entry_exists(path).await),
        }
    }

    /// Remove the artifact. Missing artifacts are not an error.
    pub async fn remove(&self, machine_path: &dyn PathStore) -> Result<Removal> {
        match self {
            Artifact::Directory { path } | Artifact::Tree { path } => {
                if !fs::entry_exists(path).await {
                    return Ok(Removal::Absent);
                }
                fs::remove_dir_all(path).await?;
                Ok(Removal::Removed)
            }
            Artifact::File { path }
            | Artifact::DesktopEntry { path }
            | Artifact::Shortcut { path } => {
                if !fs::entry_exists(path).await {
                    return Ok(Removal::Absent);
                }
                fs::remove_file(path).await?;
                Ok(Removal::Removed)
            }
            Artifact::Symlink { path, target } => {
                if !fs::entry_exists(path).await {
                    return Ok(Removal::Absent);
                }
                match tokio::fs::read_link(path).await {
                    Ok(current) if current == *target => {
                        fs::remove_file(path).await?;
                        Ok(Removal::Removed)
                    }
                    Ok(current) => Ok(Removal::Kept(format!(
                        "points at {} instead of {}",
                        current.display(),
                        target.display()
                    ))),
                    Err(_) => Ok(Removal::Kept("not a symlink".to_string())),
                }
            }
            Artifact::PathEntry { dir } => {
                if env_path::remove_from_store(machine_path, dir)? {
                    Ok(Removal::Removed)
                } else {
                    Ok(Removal::Absent)
                }
            }
        }
    }
}

/// Record of one install, stored as JSON inside the install directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallReceipt {
    /// Product name
    pub product: String,
    /// Installed version
    pub version: String,
    /// Platform the install targeted
    pub platform: Platform,
    /// Time of the first install of this version
    pub installed_at: DateTime<Utc>,
    /// Artifacts in creation order
    pub artifacts: Vec<Artifact>,
}

impl InstallReceipt {
    /// Read a receipt, or `None` if there is none.
    pub async fn read(path: &Path) -> Result<Option<Self>> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).fs_context("reading install receipt", path),
        }
    }

    /// Write the receipt as pretty JSON.
    pub async fn write(&self, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        fs::write_file(path, json.as_bytes()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::env_path::MemoryPathStore;

    #[test]
    fn artifacts_serialize_with_kind_tag() {
        let json = serde_json::to_string(&Artifact::File {
            path: PathBuf::from("/opt/osint-nexus/osint-nexus"),
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"file","path":"/opt/osint-nexus/osint-nexus"}"#);
    }

    #[tokio::test]
    async fn receipt_round_trips_through_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("receipt.json");
        let receipt = InstallReceipt {
            product: "OSINT-Nexus".to_string(),
            version: "1.0.0".to_string(),
            platform: Platform::Linux,
            installed_at: Utc::now(),
            artifacts: vec![Artifact::Directory {
                path: tmp.path().join("opt"),
            }],
        };
        receipt.write(&path).await.unwrap();
        assert_eq!(InstallReceipt::read(&path).await.unwrap(), Some(receipt));
        assert_eq!(InstallReceipt::read(&tmp.path().join("none")).await.unwrap(), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn foreign_symlink_is_kept() {
        let tmp = tempfile::tempdir().unwrap();
        let link = tmp.path().join("osint-nexus");
        std::os::unix::fs::symlink("/usr/bin/true", &link).unwrap();

        let artifact = Artifact::Symlink {
            path: link.clone(),
            target: tmp.path().join("opt/osint-nexus"),
        };
        let removal = artifact.remove(&MemoryPathStore::default()).await.unwrap();
        assert!(matches!(removal, Removal::Kept(_)));
        assert!(std::fs::symlink_metadata(&link).is_ok());
    }
}
