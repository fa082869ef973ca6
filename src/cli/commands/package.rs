//! `package` subcommand.

use crate::cli::{Args, RuntimeConfig};
use crate::descriptor;
use crate::error::Result;
use crate::package::{PackageOptions, Packager};
use crate::settings::Settings;

/// Render the PyInstaller spec and, unless `spec_only`, build the executable.
pub async fn execute_package(
    args: &Args,
    settings: Settings,
    options: PackageOptions,
    config: &RuntimeConfig,
) -> Result<i32> {
    let descriptor = descriptor::locate(&args.source, args.descriptor.as_deref())?;
    config.progress(&format!(
        "Packaging {} {}",
        settings.product_name(),
        settings.version_string()
    ))?;

    let report = Packager::new(settings, descriptor).package(options).await?;

    for warning in &report.warnings {
        config.warn(warning)?;
    }
    config.success(&format!("wrote {}", report.spec.display()))?;
    if let (Some(artifact), Some(checksum)) = (&report.artifact, &report.checksum) {
        config.success(&format!("built {}", artifact.display()))?;
        config.indent(&format!("sha256 {checksum}"))?;
    }
    if let Some(archive) = &report.archive {
        config.success(&format!("wrote {}", archive.display()))?;
    }
    Ok(0)
}
