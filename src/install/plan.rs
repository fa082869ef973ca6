//! Ordered install plans per platform.

use super::desktop::render_desktop_entry;
use super::layout::InstallLayout;
use super::shortcut::ShortcutSpec;
use super::step::Step;
use crate::settings::{Platform, Settings};
use std::path::PathBuf;

/// Build the ordered list of steps that installs the application.
///
/// The order matters: the install directory comes first, and the desktop
/// integration comes after everything it points at.
pub fn build_plan(settings: &Settings, layout: &InstallLayout) -> Vec<Step> {
    let mut steps = vec![
        Step::CreateDir {
            path: layout.install_dir.clone(),
        },
        Step::CopyFile {
            what: "application executable",
            from: settings.source_binary(layout.platform),
            to: layout.executable.clone(),
            executable: true,
            optional: true,
        },
        Step::CopyTree {
            what: "assets",
            from: settings.assets_source(),
            to: layout.assets_dir.clone(),
            optional: true,
        },
    ];

    let icon_source = icon_source(settings, layout.platform);
    let icon_available = icon_source.is_file();
    steps.push(Step::CopyFile {
        what: "icon",
        from: icon_source,
        to: layout.icon.clone(),
        executable: false,
        optional: true,
    });

    match layout.platform {
        Platform::Linux => {
            if let Some(link) = &layout.symlink {
                steps.push(Step::Symlink {
                    link: link.clone(),
                    target: layout.executable.clone(),
                });
            }
            if let Some(path) = &layout.desktop_entry {
                let icon = icon_available.then_some(layout.icon.as_path());
                steps.push(Step::DesktopEntry {
                    path: path.clone(),
                    contents: render_desktop_entry(
                        settings,
                        &layout.executable,
                        &layout.install_dir,
                        icon,
                    ),
                });
            }
        }
        Platform::Windows => {
            let icon = icon_available.then(|| layout.icon.clone());
            for link in [&layout.start_menu_shortcut, &layout.desktop_shortcut]
                .into_iter()
                .flatten()
            {
                steps.push(Step::Shortcut(ShortcutSpec {
                    link: link.clone(),
                    target: layout.executable.clone(),
                    working_dir: layout.install_dir.clone(),
                    icon: icon.clone(),
                    description: settings.description().to_string(),
                }));
            }
            if let Some(dir) = &layout.path_entry {
                steps.push(Step::PathEntry { dir: dir.clone() });
            }
        }
    }

    steps
}

/// Icon to install: the configured one, else the conventional asset.
fn icon_source(settings: &Settings, platform: Platform) -> PathBuf {
    settings.desktop_icon(platform).unwrap_or_else(|| {
        let name = match platform {
            Platform::Linux => "icon.png",
            Platform::Windows => "icon.ico",
        };
        settings.assets_source().join(name)
    })
}
