//! Installing the packaged application onto a machine.
//!
//! An install is an ordered [`plan::build_plan`] of idempotent [`step::Step`]s
//! run by the [`Installer`]. Everything it creates is written to an
//! [`InstallReceipt`] so `uninstall` can remove exactly that.

pub mod desktop;
pub mod env_path;
pub mod layout;
mod orchestrator;
pub mod plan;
pub mod privilege;
pub mod receipt;
pub mod shortcut;
pub mod step;

pub use env_path::{MemoryPathStore, PathStore, RegistryPathStore};
pub use layout::InstallLayout;
pub use orchestrator::{
    InstallOptions, InstallReport, Installer, Integrations, StatusReport, StepReport,
    UninstallReport,
};
pub use privilege::{FixedPrivilege, PrivilegePolicy, PrivilegeProbe, SystemPrivilege};
pub use receipt::{Artifact, InstallReceipt, Removal};
pub use shortcut::{PowerShellShortcuts, ShortcutSpec, ShortcutWriter};
pub use step::{Step, StepOutcome, StepState};
