//! External packager detection.

use std::path::PathBuf;
use std::sync::LazyLock;

/// Location of a working `pyinstaller` on `PATH`.
///
/// Resolved once per process; `None` when it is missing or `--version` fails.
pub static PYINSTALLER: LazyLock<Option<PathBuf>> =
    LazyLock::new(|| match which::which("pyinstaller") {
        Ok(path) => {
            log::debug!("Found pyinstaller at: {}", path.display());

            match std::process::Command::new(&path).arg("--version").output() {
                Ok(output) if output.status.success() => {
                    let version = String::from_utf8_lossy(&output.stdout);
                    log::info!("pyinstaller available: {}", version.trim());
                    Some(path)
                }
                Ok(output) => {
                    log::warn!(
                        "pyinstaller found at {} but --version failed (exit code: {:?}). \
                         Stderr: {}",
                        path.display(),
                        output.status.code(),
                        String::from_utf8_lossy(&output.stderr)
                    );
                    None
                }
                Err(e) => {
                    log::warn!(
                        "pyinstaller found at {} but failed to execute: {}. \
                         Check file permissions.",
                        path.display(),
                        e
                    );
                    None
                }
            }
        }
        Err(e) => {
            log::debug!("pyinstaller not found in PATH: {}", e);
            None
        }
    });
