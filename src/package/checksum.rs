//! SHA-256 checksums for packaged artifacts and installed trees.
//!
//! Works on single files and on directory trees; the install steps use the
//! tree form to tell whether an installed assets directory has drifted.

use crate::{
    bail,
    error::{ErrorExt, Result},
};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Calculates the hex-encoded SHA-256 of a file or directory tree.
///
/// Directory hashes cover each file's relative path and content in sorted
/// order, so two trees with the same files hash the same wherever they live.
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading metadata of", path)?;

    if metadata.is_file() {
        let mut hasher = Sha256::new();
        hash_file_into(&mut hasher, path).await?;
        Ok(format!("{:x}", hasher.finalize()))
    } else if metadata.is_dir() {
        calculate_directory_sha256(path).await
    } else {
        bail!("Path is neither file nor directory: {}", path.display())
    }
}

async fn hash_file_into(hasher: &mut Sha256, file_path: &Path) -> Result<()> {
    let mut file = tokio::fs::File::open(file_path)
        .await
        .fs_context("opening file for hashing", file_path)?;
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", file_path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(())
}

async fn calculate_directory_sha256(dir_path: &Path) -> Result<String> {
    // Links are followed to match how the tree is copied on install
    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(dir_path).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_file() {
            entries.push(entry.into_path());
        }
    }
    entries.sort();

    let mut hasher = Sha256::new();
    for path in entries {
        if let Ok(rel_path) = path.strip_prefix(dir_path) {
            // Always joined with `/`
            let rel: Vec<_> = rel_path
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            hasher.update(rel.join("/").as_bytes());
        }
        hash_file_into(&mut hasher, &path).await?;
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Writes `<artifact>.sha256` in `sha256sum` format and returns its path.
pub async fn write_checksum_file(artifact: &Path, checksum: &str) -> Result<std::path::PathBuf> {
    let file_name = artifact
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut sidecar = artifact.as_os_str().to_owned();
    sidecar.push(".sha256");
    let sidecar = std::path::PathBuf::from(sidecar);

    crate::utils::fs::write_file(&sidecar, format!("{checksum}  {file_name}\n").as_bytes())
        .await?;
    Ok(sidecar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_hash_matches_known_digest() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("abc.txt");
        std::fs::write(&file, "abc").unwrap();
        assert_eq!(
            calculate_sha256(&file).await.unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn identical_trees_hash_the_same() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["a", "b"] {
            let dir = tmp.path().join(name);
            std::fs::create_dir_all(dir.join("img")).unwrap();
            std::fs::write(dir.join("img").join("logo.png"), "png").unwrap();
            std::fs::write(dir.join("style.qss"), "qss").unwrap();
        }
        let a = calculate_sha256(&tmp.path().join("a")).await.unwrap();
        let b = calculate_sha256(&tmp.path().join("b")).await.unwrap();
        assert_eq!(a, b);

        std::fs::write(tmp.path().join("b").join("style.qss"), "changed").unwrap();
        let b = calculate_sha256(&tmp.path().join("b")).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn checksum_file_uses_sha256sum_format() {
        let tmp = tempfile::tempdir().unwrap();
        let artifact = tmp.path().join("OSINT-Nexus");
        std::fs::write(&artifact, "abc").unwrap();
        let sidecar = write_checksum_file(&artifact, "deadbeef").await.unwrap();
        assert_eq!(sidecar, tmp.path().join("OSINT-Nexus.sha256"));
        assert_eq!(std::fs::read_to_string(sidecar).unwrap(), "deadbeef  OSINT-Nexus\n");
    }
}
