//! Installer and packager for the OSINT-Nexus desktop application.
//!
//! This library provides:
//! - system-wide install and uninstall on Linux (`/opt`, symlink, desktop
//!   entry) and Windows (Program Files, shortcuts, machine PATH)
//! - an install receipt so uninstall removes exactly what install created
//! - PyInstaller spec generation and packaging from a build descriptor
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod descriptor;
pub mod error;
pub mod install;
pub mod package;
pub mod settings;
pub mod utils;

// Re-export commonly used types
pub use error::{CliError, InstallerError, Result};
