//! Subcommand execution.

mod install;
mod package;
mod status;
mod uninstall;

pub use install::execute_install;
pub use package::execute_package;
pub use status::execute_status;
pub use uninstall::execute_uninstall;

use crate::install::{InstallLayout, InstallOptions, Installer, Integrations};
use crate::settings::{Platform, Settings};
use std::path::Path;

/// Installer for the running platform, re-rooted under `root` if given.
fn build_installer(
    settings: Settings,
    root: Option<&Path>,
    integrations: Integrations,
    options: InstallOptions,
) -> Installer {
    let layout = InstallLayout::resolve(&settings, Platform::current(), root);
    Installer::new(settings, layout, integrations, options)
}
