//! OSINT-Nexus installer - installs, removes and packages the OSINT-Nexus
//! desktop application.

use osint_nexus_installer::cli::{self, OutputManager};
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            let _ = OutputManager::new(false, false).error(&e.to_string());
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {suggestion}");
            }
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
