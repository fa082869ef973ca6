//! Colored terminal output.

use console::{Term, style};
use std::io;

/// Writes user-facing messages, honoring `--verbose` and `--quiet`.
///
/// Messages go to stdout except warnings and errors, which go to stderr.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    stdout: Term,
    stderr: Term,
}

impl OutputManager {
    /// Create an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            stdout: Term::stdout(),
            stderr: Term::stderr(),
        }
    }

    /// Detail shown only with `--verbose`.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose || self.quiet {
            return Ok(());
        }
        self.stdout.write_line(&style(message).dim().to_string())
    }

    /// Step in progress.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout
            .write_line(&format!("{} {}", style("→").cyan().bold(), message))
    }

    /// Completed action.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout
            .write_line(&format!("{} {}", style("✓").green().bold(), message))
    }

    /// Recoverable problem; shown even with `--quiet`.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.stderr.write_line(&format!(
            "{} {}",
            style("warning:").yellow().bold(),
            message
        ))
    }

    /// Fatal problem.
    pub fn error(&self, message: &str) -> io::Result<()> {
        self.stderr
            .write_line(&format!("{} {}", style("Error:").red().bold(), message))
    }

    /// Section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout.write_line("")?;
        self.stdout.write_line(&style(title).bold().underlined().to_string())
    }

    /// Indented detail line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout.write_line(&format!("   {message}"))
    }
}
