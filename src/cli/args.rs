//! Command line argument parsing and validation.

use crate::error::CliError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Installer and packager for the OSINT-Nexus desktop application
#[derive(Parser, Debug)]
#[command(
    name = "osint-nexus-installer",
    version,
    about = "Installer and packager for the OSINT-Nexus desktop application",
    long_about = "Installs the packaged OSINT-Nexus executable system-wide, removes it again, \
reports what is installed, and builds the single-file executable with PyInstaller.

Usage:
  sudo osint-nexus-installer                      # install from ./dist and ./assets
  sudo osint-nexus-installer uninstall --purge
  osint-nexus-installer --root /tmp/stage install # staged install, no root needed
  osint-nexus-installer package --archive

Exit codes: 0 success, 1 failure, 2 usage error, 3 missing privileges."
)]
pub struct Args {
    /// Operation to run (default: install)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory containing dist/, assets/ and nexus.toml
    #[arg(short = 's', long, value_name = "DIR", default_value = ".", global = true)]
    pub source: PathBuf,

    /// Build descriptor to use instead of <source>/nexus.toml
    #[arg(
        short = 'd',
        long,
        value_name = "FILE",
        env = "OSINT_NEXUS_DESCRIPTOR",
        global = true
    )]
    pub descriptor: Option<PathBuf>,

    /// Install beneath an alternate filesystem root
    #[arg(long, value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Override the install directory
    #[arg(long, value_name = "DIR", visible_alias = "install-path", global = true)]
    pub install_dir: Option<PathBuf>,

    /// Show detailed output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Install the application (default)
    Install {
        /// Replace a newer installed version
        #[arg(long)]
        force: bool,

        /// Show what would be done without changing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove the application
    Uninstall {
        /// Also remove the per-user data directory
        #[arg(long)]
        purge: bool,

        /// Show what would be removed without changing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Show what is installed
    Status,

    /// Build the single-file executable with PyInstaller
    Package {
        /// Only write the PyInstaller spec file
        #[arg(long)]
        spec_only: bool,

        /// Also write a distributable .tar.gz
        #[arg(long)]
        archive: bool,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The subcommand to run; install when none was given.
    pub fn selected_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Install {
            force: false,
            dry_run: false,
        })
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), CliError> {
        if !self.source.is_dir() {
            return Err(CliError::InvalidArguments {
                reason: format!("source directory not found: {}", self.source.display()),
            });
        }

        if let Some(dir) = &self.install_dir {
            if !dir.is_absolute() {
                return Err(CliError::InvalidArguments {
                    reason: format!("--install-dir must be absolute: {}", dir.display()),
                });
            }
        }

        match self.selected_command() {
            Command::Package {
                spec_only: true,
                archive: true,
            } => Err(CliError::ConflictingArguments {
                arguments: vec!["--spec-only".to_string(), "--archive".to_string()],
            }),
            Command::Package { .. } if self.root.is_some() || self.install_dir.is_some() => {
                Err(CliError::InvalidArguments {
                    reason: "--root and --install-dir only apply to install, uninstall and status"
                        .to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
