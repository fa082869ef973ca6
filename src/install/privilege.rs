//! Root / administrator detection.

use crate::error::{InstallerError, Result};
use crate::settings::Platform;

/// Answers whether the current process may write system locations.
pub trait PrivilegeProbe: Send + Sync {
    /// True when running as root (Unix) or elevated (Windows).
    fn is_elevated(&self) -> bool;
}

/// Probe backed by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPrivilege;

impl PrivilegeProbe for SystemPrivilege {
    #[cfg(unix)]
    fn is_elevated(&self) -> bool {
        users::get_effective_uid() == 0
    }

    /// `net session` only succeeds from an elevated token.
    #[cfg(windows)]
    fn is_elevated(&self) -> bool {
        std::process::Command::new("net")
            .arg("session")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    #[cfg(not(any(unix, windows)))]
    fn is_elevated(&self) -> bool {
        false
    }
}

/// Probe with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedPrivilege(pub bool);

impl PrivilegeProbe for FixedPrivilege {
    fn is_elevated(&self) -> bool {
        self.0
    }
}

/// What to do when the process lacks privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegePolicy {
    /// Refuse before touching the filesystem
    Required,
    /// Print a warning and carry on
    Advisory,
    /// Staged installs write only beneath the alternate root
    NotRequired,
}

impl PrivilegePolicy {
    /// Linux refuses, Windows warns, staged installs never check.
    pub fn for_target(platform: Platform, staged: bool) -> Self {
        match (platform, staged) {
            (_, true) => PrivilegePolicy::NotRequired,
            (Platform::Linux, false) => PrivilegePolicy::Required,
            (Platform::Windows, false) => PrivilegePolicy::Advisory,
        }
    }

    /// Apply the policy for `operation`.
    ///
    /// Returns the warning to show for [`PrivilegePolicy::Advisory`].
    pub fn enforce(&self, probe: &dyn PrivilegeProbe, operation: &str) -> Result<Option<String>> {
        match self {
            PrivilegePolicy::NotRequired => Ok(None),
            _ if probe.is_elevated() => Ok(None),
            PrivilegePolicy::Required => Err(InstallerError::PrivilegeRequired {
                operation: operation.to_string(),
            }),
            PrivilegePolicy::Advisory => Ok(Some(format!(
                "not running as Administrator; {operation} may fail to write Program Files, \
                 all-users shortcuts or the machine PATH"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_requires_root() {
        let policy = PrivilegePolicy::for_target(Platform::Linux, false);
        let err = policy.enforce(&FixedPrivilege(false), "install").unwrap_err();
        assert!(matches!(err, InstallerError::PrivilegeRequired { .. }));
        assert_eq!(policy.enforce(&FixedPrivilege(true), "install").unwrap(), None);
    }

    #[test]
    fn windows_only_warns() {
        let policy = PrivilegePolicy::for_target(Platform::Windows, false);
        let warning = policy.enforce(&FixedPrivilege(false), "install").unwrap();
        assert!(warning.unwrap().contains("Administrator"));
    }

    #[test]
    fn staged_installs_skip_the_check() {
        let policy = PrivilegePolicy::for_target(Platform::Linux, true);
        assert_eq!(policy.enforce(&FixedPrivilege(false), "install").unwrap(), None);
    }
}
