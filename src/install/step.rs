//! Idempotent install steps.
//!
//! Each step can report its current state, bring the system to the desired
//! state, and name the [`Artifact`] it leaves behind. Applying a step that is
//! already satisfied changes nothing, so repeated installs converge.

use super::env_path::{self, PathStore};
use super::receipt::Artifact;
use super::shortcut::{ShortcutSpec, ShortcutWriter};
use crate::package::checksum::calculate_sha256;
use crate::error::Result;
use crate::utils::fs;
use std::path::{Path, PathBuf};

/// Integrations a step may need besides the filesystem.
pub struct StepContext<'a> {
    /// Machine PATH storage
    pub machine_path: &'a dyn PathStore,
    /// Shortcut creation
    pub shortcuts: &'a dyn ShortcutWriter,
}

/// One OS operation of an install plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Create a directory
    CreateDir { path: PathBuf },
    /// Copy a single file; a missing optional source is skipped with a warning
    CopyFile {
        what: &'static str,
        from: PathBuf,
        to: PathBuf,
        executable: bool,
        optional: bool,
    },
    /// Replace a directory tree with a copy of `from`
    CopyTree {
        what: &'static str,
        from: PathBuf,
        to: PathBuf,
        optional: bool,
    },
    /// Point `link` at `target`
    Symlink { link: PathBuf, target: PathBuf },
    /// Write a desktop-menu entry
    DesktopEntry { path: PathBuf, contents: String },
    /// Create a Windows shortcut
    Shortcut(ShortcutSpec),
    /// Append a directory to the machine PATH
    PathEntry { dir: PathBuf },
}

/// Observed state of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepState {
    /// Already in the desired state
    Present,
    /// Not there at all
    Missing,
    /// There, but different from what install would produce
    Drifted,
    /// Cannot be applied: the source does not exist
    SourceMissing,
}

/// What applying a step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The system changed
    Applied,
    /// The step was already satisfied
    Unchanged,
    /// The step was skipped; the message says why
    Skipped(String),
}

impl Step {
    /// Human-readable description.
    pub fn describe(&self) -> String {
        match self {
            Step::CreateDir { path } => format!("create directory {}", path.display()),
            Step::CopyFile { what, to, .. } | Step::CopyTree { what, to, .. } => {
                format!("install {what} to {}", to.display())
            }
            Step::Symlink { link, target } => {
                format!("link {} -> {}", link.display(), target.display())
            }
            Step::DesktopEntry { path, .. } => format!("write desktop entry {}", path.display()),
            Step::Shortcut(spec) => format!("create shortcut {}", spec.link.display()),
            Step::PathEntry { dir } => format!("add {} to the machine PATH", dir.display()),
        }
    }

    /// The artifact this step leaves behind.
    pub fn artifact(&self) -> Artifact {
        match self {
            Step::CreateDir { path } => Artifact::Directory { path: path.clone() },
            Step::CopyFile { to, .. } => Artifact::File { path: to.clone() },
            Step::CopyTree { to, .. } => Artifact::Tree { path: to.clone() },
            Step::Symlink { link, target } => Artifact::Symlink {
                path: link.clone(),
                target: target.clone(),
            },
            Step::DesktopEntry { path, .. } => Artifact::DesktopEntry { path: path.clone() },
            Step::Shortcut(spec) => Artifact::Shortcut {
                path: spec.link.clone(),
            },
            Step::PathEntry { dir } => Artifact::PathEntry { dir: dir.clone() },
        }
    }

    /// Inspect the system without changing it.
    pub async fn check(&self, ctx: &StepContext<'_>) -> Result<StepState> {
        match self {
            Step::CreateDir { path } => Ok(if path.is_dir() {
                StepState::Present
            } else if fs::entry_exists(path).await {
                StepState::Drifted
            } else {
                StepState::Missing
            }),
            Step::CopyFile {
                from,
                to,
                executable,
                ..
            } => {
                if !from.is_file() {
                    return Ok(StepState::SourceMissing);
                }
                if !to.is_file() {
                    return Ok(StepState::Missing);
                }
                let mode_ok = !*executable || fs::is_executable(to).await?;
                Ok(if mode_ok && same_contents(from, to).await? {
                    StepState::Present
                } else {
                    StepState::Drifted
                })
            }
            Step::CopyTree { from, to, .. } => {
                if !from.is_dir() {
                    return Ok(StepState::SourceMissing);
                }
                if !to.is_dir() {
                    return Ok(StepState::Missing);
                }
                Ok(if calculate_sha256(from).await? == calculate_sha256(to).await? {
                    StepState::Present
                } else {
                    StepState::Drifted
                })
            }
            Step::Symlink { link, target } => {
                if !fs::entry_exists(link).await {
                    return Ok(StepState::Missing);
                }
                Ok(match tokio::fs::read_link(link).await {
                    Ok(current) if current == *target => StepState::Present,
                    _ => StepState::Drifted,
                })
            }
            Step::DesktopEntry { path, contents } => match tokio::fs::read_to_string(path).await {
                Ok(current) if current == *contents => Ok(StepState::Present),
                Ok(_) => Ok(StepState::Drifted),
                Err(_) => Ok(StepState::Missing),
            },
            Step::Shortcut(spec) => Ok(if spec.link.is_file() {
                StepState::Present
            } else {
                StepState::Missing
            }),
            Step::PathEntry { dir } => {
                let current = ctx.machine_path.read()?;
                Ok(if env_path::contains_entry(&current, dir) {
                    StepState::Present
                } else {
                    StepState::Missing
                })
            }
        }
    }

    /// Bring the system to the state this step describes.
    ///
    /// Missing optional sources, shortcut failures and PATH failures are
    /// reported as [`StepOutcome::Skipped`]; everything else is an error.
    pub async fn apply(&self, ctx: &StepContext<'_>) -> Result<StepOutcome> {
        match self {
            Step::CreateDir { path } => {
                if path.is_dir() {
                    return Ok(StepOutcome::Unchanged);
                }
                fs::create_dir_all(path, false).await?;
                Ok(StepOutcome::Applied)
            }
            Step::CopyFile {
                what,
                from,
                to,
                executable,
                optional,
            } => {
                if !from.is_file() && *optional {
                    return Ok(StepOutcome::Skipped(format!(
                        "{what} not found at {}",
                        from.display()
                    )));
                }
                if to.is_file() && same_contents(from, to).await? {
                    if !*executable || fs::is_executable(to).await? {
                        return Ok(StepOutcome::Unchanged);
                    }
                    fs::set_executable(to).await?;
                    return Ok(StepOutcome::Applied);
                }
                fs::copy_file(from, to).await?;
                if *executable {
                    fs::set_executable(to).await?;
                }
                Ok(StepOutcome::Applied)
            }
            Step::CopyTree {
                what,
                from,
                to,
                optional,
            } => {
                if !from.is_dir() && *optional {
                    return Ok(StepOutcome::Skipped(format!(
                        "{what} not found at {}",
                        from.display()
                    )));
                }
                if to.is_dir() && calculate_sha256(from).await? == calculate_sha256(to).await? {
                    return Ok(StepOutcome::Unchanged);
                }
                fs::remove_dir_all(to).await?;
                fs::copy_dir(from, to).await?;
                Ok(StepOutcome::Applied)
            }
            Step::Symlink { link, target } => {
                if let Ok(current) = tokio::fs::read_link(link).await {
                    if current == *target {
                        return Ok(StepOutcome::Unchanged);
                    }
                }
                if let Some(parent) = link.parent() {
                    fs::create_dir_all(parent, false).await?;
                }
                if fs::entry_exists(link).await {
                    fs::remove_file(link).await?;
                }
                fs::symlink_file(target, link).await?;
                Ok(StepOutcome::Applied)
            }
            Step::DesktopEntry { path, contents } => {
                if let Ok(current) = tokio::fs::read_to_string(path).await {
                    if current == *contents {
                        return Ok(StepOutcome::Unchanged);
                    }
                }
                fs::write_file(path, contents.as_bytes()).await?;
                Ok(StepOutcome::Applied)
            }
            Step::Shortcut(spec) => match ctx.shortcuts.create(spec) {
                Ok(()) => Ok(StepOutcome::Applied),
                Err(e) => Ok(StepOutcome::Skipped(format!(
                    "could not create shortcut {}: {e}",
                    spec.link.display()
                ))),
            },
            Step::PathEntry { dir } => match env_path::add_to_store(ctx.machine_path, dir) {
                Ok(true) => Ok(StepOutcome::Applied),
                Ok(false) => Ok(StepOutcome::Unchanged),
                Err(e) => Ok(StepOutcome::Skipped(format!(
                    "could not update the machine PATH: {e}"
                ))),
            },
        }
    }
}

async fn same_contents(a: &Path, b: &Path) -> Result<bool> {
    let (meta_a, meta_b) = (tokio::fs::metadata(a).await?, tokio::fs::metadata(b).await?);
    if meta_a.len() != meta_b.len() {
        return Ok(false);
    }
    Ok(calculate_sha256(a).await? == calculate_sha256(b).await?)
}
