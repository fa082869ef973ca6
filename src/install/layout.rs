//! Concrete target paths for one platform.

use crate::settings::{Platform, Settings};
use std::path::{Component, Path, PathBuf};

/// File name of the install receipt inside the install directory.
pub const RECEIPT_FILE_NAME: &str = ".install-receipt.json";

/// Every path an install touches, resolved for one platform.
///
/// With an alternate root every absolute path is re-rooted beneath it, so
/// `/opt/osint-nexus` becomes `<root>/opt/osint-nexus` and
/// `C:\Program Files\OSINT-Nexus` becomes `<root>/Program Files/OSINT-Nexus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    /// Platform the layout was resolved for
    pub platform: Platform,
    /// Alternate filesystem root, if staging
    pub root: Option<PathBuf>,
    /// Install directory
    pub install_dir: PathBuf,
    /// Installed executable
    pub executable: PathBuf,
    /// Installed assets tree
    pub assets_dir: PathBuf,
    /// Installed icon
    pub icon: PathBuf,
    /// Install receipt
    pub receipt: PathBuf,
    /// Linux: symlink on the command search path
    pub symlink: Option<PathBuf>,
    /// Linux: desktop-menu entry
    pub desktop_entry: Option<PathBuf>,
    /// Windows: Start Menu shortcut
    pub start_menu_shortcut: Option<PathBuf>,
    /// Windows: Desktop shortcut
    pub desktop_shortcut: Option<PathBuf>,
    /// Windows: directory appended to the machine PATH (never re-rooted;
    /// `None` when staging)
    pub path_entry: Option<PathBuf>,
    /// Per-user data directory, removed by `uninstall --purge`
    pub user_data_dir: Option<PathBuf>,
}

impl InstallLayout {
    /// Resolve the layout from the process environment.
    pub fn resolve(settings: &Settings, platform: Platform, root: Option<&Path>) -> Self {
        Self::resolve_with_env(settings, platform, root, |key| std::env::var(key).ok())
    }

    /// Resolve the layout with an explicit environment lookup.
    pub fn resolve_with_env(
        settings: &Settings,
        platform: Platform,
        root: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        match platform {
            Platform::Linux => Self::linux(settings, root, env),
            Platform::Windows => Self::windows(settings, root, env),
        }
    }

    fn linux(
        settings: &Settings,
        root: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let linux = settings.linux();
        let real_install_dir = settings
            .install_dir_override()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| linux.install_dir.clone());
        let install_dir = reroot(root, &real_install_dir);
        let binary = settings.installed_executable_name(Platform::Linux);

        Self {
            platform: Platform::Linux,
            root: root.map(Path::to_path_buf),
            executable: install_dir.join(&binary),
            assets_dir: install_dir.join("assets"),
            icon: install_dir.join("icon.png"),
            receipt: install_dir.join(RECEIPT_FILE_NAME),
            symlink: Some(reroot(root, &linux.bin_dir.join(&binary))),
            desktop_entry: Some(reroot(
                root,
                &linux
                    .applications_dir
                    .join(format!("{}.desktop", settings.binary_name())),
            )),
            start_menu_shortcut: None,
            desktop_shortcut: None,
            path_entry: None,
            user_data_dir: user_data_dir(settings, root, invoking_user_home(&env, account_home)),
            install_dir,
        }
    }

    fn windows(
        settings: &Settings,
        root: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let windows = settings.windows();
        let program_files = env("ProgramFiles").unwrap_or_else(|| r"C:\Program Files".to_string());
        let program_data = env("ProgramData").unwrap_or_else(|| r"C:\ProgramData".to_string());
        let public = env("PUBLIC").unwrap_or_else(|| r"C:\Users\Public".to_string());

        let real_install_dir = settings
            .install_dir_override()
            .map(Path::to_path_buf)
            .or_else(|| windows.install_dir.clone())
            .unwrap_or_else(|| PathBuf::from(program_files).join(settings.product_name()));
        let install_dir = reroot(root, &real_install_dir);
        let shortcut_name = format!("{}.lnk", settings.product_name());

        let start_menu_shortcut = windows.start_menu_shortcut.then(|| {
            reroot(
                root,
                &PathBuf::from(&program_data)
                    .join("Microsoft")
                    .join("Windows")
                    .join("Start Menu")
                    .join("Programs")
                    .join(&shortcut_name),
            )
        });
        let desktop_shortcut = windows
            .desktop_shortcut
            .then(|| reroot(root, &PathBuf::from(&public).join("Desktop").join(&shortcut_name)));
        let path_entry = (windows.add_to_path && root.is_none()).then(|| real_install_dir.clone());

        Self {
            platform: Platform::Windows,
            root: root.map(Path::to_path_buf),
            executable: install_dir.join(settings.installed_executable_name(Platform::Windows)),
            assets_dir: install_dir.join("assets"),
            icon: install_dir.join("icon.ico"),
            receipt: install_dir.join(RECEIPT_FILE_NAME),
            symlink: None,
            desktop_entry: None,
            start_menu_shortcut,
            desktop_shortcut,
            path_entry,
            user_data_dir: user_data_dir(settings, root, dirs::home_dir()),
            install_dir,
        }
    }

    /// True when installing beneath an alternate root.
    pub fn is_staged(&self) -> bool {
        self.root.is_some()
    }
}

/// Re-root an absolute path beneath `root`, dropping any drive prefix.
pub fn reroot(root: Option<&Path>, path: &Path) -> PathBuf {
    let Some(root) = root else {
        return path.to_path_buf();
    };
    let relative: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect();
    root.join(relative)
}

fn user_data_dir(settings: &Settings, root: Option<&Path>, home: Option<PathBuf>) -> Option<PathBuf> {
    let configured = &settings.data().user_dir;
    let expanded = match configured.strip_prefix("~") {
        Ok(rest) => home?.join(rest),
        Err(_) => configured.clone(),
    };
    Some(reroot(root, &expanded))
}

/// Home directory of the user who ran the installer.
///
/// Under `sudo`, `$HOME` is usually root's, so the account named by
/// `SUDO_USER` is looked up instead.
fn invoking_user_home(
    env: &impl Fn(&str) -> Option<String>,
    lookup: impl Fn(&str) -> Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(user) = env("SUDO_USER").filter(|user| !user.is_empty()) {
        match lookup(&user) {
            Some(home) => return Some(home),
            None => log::warn!("no home directory found for SUDO_USER {user:?}"),
        }
    }
    env("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

#[cfg(unix)]
fn account_home(name: &str) -> Option<PathBuf> {
    use users::os::unix::UserExt;
    users::get_user_by_name(name).map(|user| user.home_dir().to_path_buf())
}

#[cfg(not(unix))]
fn account_home(_name: &str) -> Option<PathBuf> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsBuilder;

    #[test]
    fn linux_layout_uses_fixed_system_paths() {
        let settings = SettingsBuilder::new().build().unwrap();
        let layout = InstallLayout::resolve(&settings, Platform::Linux, None);
        assert_eq!(layout.install_dir, PathBuf::from("/opt/osint-nexus"));
        assert_eq!(layout.executable, PathBuf::from("/opt/osint-nexus/osint-nexus"));
        assert_eq!(layout.symlink, Some(PathBuf::from("/usr/local/bin/osint-nexus")));
        assert_eq!(
            layout.desktop_entry,
            Some(PathBuf::from("/usr/share/applications/osint-nexus.desktop"))
        );
    }

    #[test]
    fn staged_linux_layout_is_rerooted() {
        let settings = SettingsBuilder::new().build().unwrap();
        let root = PathBuf::from("/tmp/stage");
        let layout = InstallLayout::resolve(&settings, Platform::Linux, Some(&root));
        assert_eq!(layout.install_dir, root.join("opt/osint-nexus"));
        assert_eq!(layout.symlink, Some(root.join("usr/local/bin/osint-nexus")));
    }

    #[test]
    fn windows_layout_follows_environment() {
        let settings = SettingsBuilder::new().build().unwrap();
        let layout = InstallLayout::resolve_with_env(&settings, Platform::Windows, None, |key| {
            match key {
                "ProgramFiles" => Some("D:/Apps".to_string()),
                "PUBLIC" => Some("D:/Users/Public".to_string()),
                _ => None,
            }
        });
        assert_eq!(layout.install_dir, PathBuf::from("D:/Apps").join("OSINT-Nexus"));
        assert_eq!(
            layout.desktop_shortcut,
            Some(PathBuf::from("D:/Users/Public").join("Desktop").join("OSINT-Nexus.lnk"))
        );
        assert_eq!(layout.path_entry, Some(layout.install_dir.clone()));
    }

    #[test]
    fn staged_windows_layout_skips_machine_path() {
        let settings = SettingsBuilder::new().build().unwrap();
        let root = PathBuf::from("/tmp/stage");
        let layout = InstallLayout::resolve(&settings, Platform::Windows, Some(&root));
        assert!(layout.install_dir.starts_with(&root));
        assert_eq!(layout.path_entry, None);
    }

    #[test]
    fn sudo_user_home_wins_over_home() {
        let env = |key: &str| match key {
            "SUDO_USER" => Some("analyst".to_string()),
            "HOME" => Some("/root".to_string()),
            _ => None,
        };
        let home = invoking_user_home(&env, |name| {
            (name == "analyst").then(|| PathBuf::from("/home/analyst"))
        });
        assert_eq!(home, Some(PathBuf::from("/home/analyst")));
    }

    #[test]
    fn home_is_used_without_sudo() {
        let env = |key: &str| (key == "HOME").then(|| "/home/solo".to_string());
        let home = invoking_user_home(&env, |_| None);
        assert_eq!(home, Some(PathBuf::from("/home/solo")));
    }

    #[cfg(unix)]
    #[test]
    fn purge_target_follows_sudo_user() {
        let settings = SettingsBuilder::new().build().unwrap();
        let root = PathBuf::from("/tmp/stage");
        let layout = InstallLayout::resolve_with_env(&settings, Platform::Linux, Some(&root), |key| {
            match key {
                "SUDO_USER" => Some("root".to_string()),
                "HOME" => Some("/home/elsewhere".to_string()),
                _ => None,
            }
        });
        let data_dir = layout.user_data_dir.unwrap();
        assert!(data_dir.starts_with(&root));
        assert!(data_dir.ends_with(".osint-nexus"));
        assert!(!data_dir.starts_with(root.join("home/elsewhere")));
    }

    #[test]
    fn install_dir_override_wins() {
        let settings = SettingsBuilder::new()
            .install_dir_override(Some(PathBuf::from("/srv/nexus")))
            .build()
            .unwrap();
        let layout = InstallLayout::resolve(&settings, Platform::Linux, None);
        assert_eq!(layout.executable, PathBuf::from("/srv/nexus/osint-nexus"));
    }
}
