//! `status` subcommand.

use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;
use crate::install::{InstallOptions, Integrations, StepState};
use crate::settings::Settings;

/// Print each install step's state and the receipt summary. Never writes.
pub async fn execute_status(
    args: &Args,
    settings: Settings,
    integrations: Integrations,
    config: &RuntimeConfig,
) -> Result<i32> {
    let product = settings.product_name().to_string();
    let installer = super::build_installer(
        settings,
        args.root.as_deref(),
        integrations,
        InstallOptions::default(),
    );
    let report = installer.status().await?;

    config.section(&format!("{product} status"))?;
    match &report.receipt {
        Some(receipt) => config.indent(&format!(
            "installed: {} {} on {} ({} artifacts)",
            receipt.product,
            receipt.version,
            receipt.installed_at.format("%Y-%m-%d %H:%M:%S UTC"),
            receipt.artifacts.len()
        ))?,
        None => config.indent("installed: no receipt found")?,
    }

    for (description, state) in &report.steps {
        let label = match state {
            StepState::Present => "present",
            StepState::Missing => "missing",
            StepState::Drifted => "drifted",
            StepState::SourceMissing => "source missing",
        };
        config.indent(&format!("[{label:>14}] {description}"))?;
    }

    if report.is_complete() {
        config.success("installation is complete")?;
    }
    Ok(0)
}
