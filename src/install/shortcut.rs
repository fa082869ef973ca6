//! Windows `.lnk` shortcuts.

use crate::error::{InstallerError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// One shortcut to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutSpec {
    /// Location of the `.lnk` file
    pub link: PathBuf,
    /// Executable the shortcut launches
    pub target: PathBuf,
    /// Working directory for the launched process
    pub working_dir: PathBuf,
    /// Icon file
    pub icon: Option<PathBuf>,
    /// Tooltip text
    pub description: String,
}

/// Creates shortcut files.
pub trait ShortcutWriter: Send + Sync {
    /// Create (or overwrite) the shortcut described by `spec`.
    fn create(&self, spec: &ShortcutSpec) -> Result<()>;
}

/// Writes shortcuts through the `WScript.Shell` COM object via PowerShell.
#[derive(Debug, Default, Clone, Copy)]
pub struct PowerShellShortcuts;

impl ShortcutWriter for PowerShellShortcuts {
    fn create(&self, spec: &ShortcutSpec) -> Result<()> {
        if let Some(parent) = spec.link.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let status = Command::new("powershell")
            .arg("-NoProfile")
            .arg("-NonInteractive")
            .arg("-Command")
            .arg(render_script(spec))
            .status()
            .map_err(|e| InstallerError::Tool {
                tool: "powershell".to_string(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(InstallerError::Tool {
                tool: "powershell".to_string(),
                reason: format!("failed to create shortcut (exit {:?})", status.code()),
            });
        }
        Ok(())
    }
}

/// PowerShell snippet that saves the shortcut.
pub fn render_script(spec: &ShortcutSpec) -> String {
    let mut script = format!(
        "$WshShell = New-Object -ComObject WScript.Shell; \
         $Shortcut = $WshShell.CreateShortcut({}); \
         $Shortcut.TargetPath = {}; \
         $Shortcut.WorkingDirectory = {}; \
         $Shortcut.Description = {}; ",
        ps_quote(&spec.link),
        ps_quote(&spec.target),
        ps_quote(&spec.working_dir),
        ps_quote_str(&spec.description),
    );
    if let Some(icon) = &spec.icon {
        script.push_str(&format!("$Shortcut.IconLocation = {}; ", ps_quote(icon)));
    }
    script.push_str("$Shortcut.Save();");
    script
}

fn ps_quote(path: &Path) -> String {
    ps_quote_str(&path.display().to_string())
}

fn ps_quote_str(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ShortcutSpec {
        ShortcutSpec {
            link: PathBuf::from(r"C:\Users\Public\Desktop\OSINT-Nexus.lnk"),
            target: PathBuf::from(r"C:\Program Files\OSINT-Nexus\OSINT-Nexus.exe"),
            working_dir: PathBuf::from(r"C:\Program Files\OSINT-Nexus"),
            icon: None,
            description: "OSINT gathering".to_string(),
        }
    }

    #[test]
    fn script_sets_target_and_saves() {
        let script = render_script(&spec());
        assert!(script.contains(r"$Shortcut.TargetPath = 'C:\Program Files\OSINT-Nexus\OSINT-Nexus.exe';"));
        assert!(script.ends_with("$Shortcut.Save();"));
        assert!(!script.contains("IconLocation"));
    }

    #[test]
    fn single_quotes_are_doubled() {
        let mut spec = spec();
        spec.description = "Nexus 'beta'".to_string();
        assert!(render_script(&spec).contains("'Nexus ''beta'''"));
    }
}
