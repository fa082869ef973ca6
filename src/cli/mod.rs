//! Command line interface.
//!
//! Parses arguments, loads the build descriptor and dispatches to the
//! subcommand handlers in [`commands`].

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, RuntimeConfig};
pub use output::OutputManager;

use crate::descriptor;
use crate::error::Result;
use crate::install::{InstallOptions, Integrations};
use crate::package::PackageOptions;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    run_with(&args, Integrations::system()).await
}

/// Run already-parsed arguments against the given OS integrations.
pub async fn run_with(args: &Args, integrations: Integrations) -> Result<i32> {
    args.validate()?;
    let config = RuntimeConfig::from(args);

    let settings = descriptor::load_settings(
        &args.source,
        args.descriptor.as_deref(),
        args.install_dir.clone(),
    )?;
    config.verbose_println(&format!("Source directory: {}", args.source.display()))?;

    match args.selected_command() {
        Command::Install { force, dry_run } => {
            commands::execute_install(
                args,
                settings,
                integrations,
                InstallOptions { force, dry_run },
                &config,
            )
            .await
        }
        Command::Uninstall { purge, dry_run } => {
            commands::execute_uninstall(args, settings, integrations, purge, dry_run, &config)
                .await
        }
        Command::Status => commands::execute_status(args, settings, integrations, &config).await,
        Command::Package { spec_only, archive } => {
            commands::execute_package(
                args,
                settings,
                PackageOptions { spec_only, archive },
                &config,
            )
            .await
        }
    }
}
