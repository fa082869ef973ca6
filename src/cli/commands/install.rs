//! `install` subcommand.

use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;
use crate::install::{InstallOptions, Integrations, StepOutcome};
use crate::settings::Settings;

/// Install the application and print a per-step summary.
pub async fn execute_install(
    args: &Args,
    settings: Settings,
    integrations: Integrations,
    options: InstallOptions,
    config: &RuntimeConfig,
) -> Result<i32> {
    let product = format!("{} {}", settings.product_name(), settings.version_string());
    let installer = super::build_installer(settings, args.root.as_deref(), integrations, options);

    if options.dry_run {
        config.section(&format!("Dry run: install {product}"))?;
    } else {
        config.progress(&format!(
            "Installing {product} to {}",
            installer.layout().install_dir.display()
        ))?;
    }

    let report = installer.install().await?;

    for step in &report.steps {
        match (&step.outcome, options.dry_run) {
            (StepOutcome::Applied, true) => config.indent(&format!("would {}", step.description))?,
            (StepOutcome::Applied, false) => config.success(&step.description)?,
            (StepOutcome::Unchanged, _) => {
                config.verbose_println(&format!("   {} (already done)", step.description))?
            }
            (StepOutcome::Skipped(_), _) => {}
        }
    }
    for warning in &report.warnings {
        config.warn(warning)?;
    }

    if !options.dry_run {
        config.success(&format!("{product} installed"))?;
    }
    Ok(0)
}
