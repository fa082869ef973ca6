//! `uninstall` subcommand.

use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;
use crate::install::{InstallOptions, Integrations, Removal};
use crate::settings::Settings;

/// Remove the application; with `purge` also the per-user data.
pub async fn execute_uninstall(
    args: &Args,
    settings: Settings,
    integrations: Integrations,
    purge: bool,
    dry_run: bool,
    config: &RuntimeConfig,
) -> Result<i32> {
    let product = settings.product_name().to_string();
    let options = InstallOptions {
        force: false,
        dry_run,
    };
    let installer = super::build_installer(settings, args.root.as_deref(), integrations, options);

    if dry_run {
        config.section(&format!("Dry run: uninstall {product}"))?;
    } else {
        config.progress(&format!("Uninstalling {product}"))?;
    }

    let report = installer.uninstall(purge).await?;

    if report.not_installed {
        config.success(&format!("{product} is not installed; nothing to do"))?;
        return Ok(0);
    }

    for (description, removal) in &report.removals {
        match (removal, dry_run) {
            (Removal::Removed, true) => config.indent(&format!("would remove {description}"))?,
            (Removal::Removed, false) => config.success(&format!("removed {description}"))?,
            (Removal::Absent, _) => config.verbose_println(&format!("   {description} (absent)"))?,
            (Removal::Kept(reason), _) => config.warn(&format!("kept {description}: {reason}"))?,
        }
    }
    for warning in &report.warnings {
        config.warn(warning)?;
    }

    if !dry_run {
        config.success(&format!("{product} uninstalled"))?;
    }
    Ok(0)
}
