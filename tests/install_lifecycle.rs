//! Install / uninstall lifecycle against a staged root.
#![cfg(unix)]

mod common;

use common::{FileShortcuts, SharedPath, fake_integrations, snapshot, source_tree};
use osint_nexus_installer::InstallerError;
use osint_nexus_installer::descriptor::load_settings;
use osint_nexus_installer::install::{
    InstallLayout, InstallOptions, Installer, Removal, StepOutcome, StepState,
};
use osint_nexus_installer::settings::Platform;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

fn staged_installer(source: &Path, root: &Path, options: InstallOptions) -> Installer {
    staged_installer_into(source, root, None, options)
}

fn staged_installer_into(
    source: &Path,
    root: &Path,
    install_dir: Option<&str>,
    options: InstallOptions,
) -> Installer {
    let settings = load_settings(source, None, install_dir.map(PathBuf::from)).unwrap();
    let layout = InstallLayout::resolve(&settings, Platform::Linux, Some(root));
    let integrations =
        fake_integrations(false, &SharedPath::default(), &FileShortcuts::default());
    Installer::new(settings, layout, integrations, options)
}

#[tokio::test]
async fn install_places_binary_assets_icon_symlink_and_menu_entry() {
    let tmp = tempfile::tempdir().unwrap();
    let (source, root) = (tmp.path().join("src"), tmp.path().join("stage"));
    source_tree(&source);

    let report = staged_installer(&source, &root, InstallOptions::default())
        .install()
        .await
        .unwrap();
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);

    let install_dir = root.join("opt/osint-nexus");
    let binary = install_dir.join("osint-nexus");
    assert!(binary.is_file());
    let mode = std::fs::metadata(&binary).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
    assert!(install_dir.join("assets/img/logo.svg").is_file());
    assert!(install_dir.join("icon.png").is_file());
    assert_eq!(
        std::fs::read_link(root.join("usr/local/bin/osint-nexus")).unwrap(),
        binary
    );

    let entry =
        std::fs::read_to_string(root.join("usr/share/applications/osint-nexus.desktop")).unwrap();
    assert!(entry.contains(&format!("Exec={}", binary.display())));
    assert!(entry.contains(&format!("Icon={}", install_dir.join("icon.png").display())));

    let receipt = report.receipt.unwrap();
    assert_eq!(receipt.version, "1.0.0");
    assert_eq!(receipt.artifacts.len(), 6);
}

#[tokio::test]
async fn installing_twice_leaves_the_same_tree() {
    let tmp = tempfile::tempdir().unwrap();
    let (source, root) = (tmp.path().join("src"), tmp.path().join("stage"));
    source_tree(&source);

    let installer = staged_installer(&source, &root, InstallOptions::default());
    installer.install().await.unwrap();
    let first = snapshot(&root);

    let second_report = installer.install().await.unwrap();
    assert_eq!(snapshot(&root), first);
    assert!(
        second_report
            .steps
            .iter()
            .all(|step| step.outcome == StepOutcome::Unchanged),
        "{:?}",
        second_report.steps
    );
}

#[tokio::test]
async fn changed_assets_are_replaced_on_reinstall() {
    let tmp = tempfile::tempdir().unwrap();
    let (source, root) = (tmp.path().join("src"), tmp.path().join("stage"));
    source_tree(&source);

    let installer = staged_installer(&source, &root, InstallOptions::default());
    installer.install().await.unwrap();
    std::fs::write(root.join("opt/osint-nexus/assets/stale.txt"), "old").unwrap();

    installer.install().await.unwrap();
    assert!(!root.join("opt/osint-nexus/assets/stale.txt").exists());
    assert!(root.join("opt/osint-nexus/assets/img/logo.svg").is_file());
}

#[tokio::test]
async fn missing_binary_is_a_warning_not_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let (source, root) = (tmp.path().join("src"), tmp.path().join("stage"));
    source_tree(&source);
    std::fs::remove_file(source.join("dist/osint-nexus")).unwrap();

    let report = staged_installer(&source, &root, InstallOptions::default())
        .install()
        .await
        .unwrap();
    assert!(report.warnings.iter().any(|w| w.contains("application executable")));
    assert!(root.join("opt/osint-nexus/assets").is_dir());
}

#[tokio::test]
async fn uninstall_removes_everything_install_created() {
    let tmp = tempfile::tempdir().unwrap();
    let (source, root) = (tmp.path().join("src"), tmp.path().join("stage"));
    source_tree(&source);

    let installer = staged_installer(&source, &root, InstallOptions::default());
    installer.install().await.unwrap();
    let report = installer.uninstall(false).await.unwrap();
    assert!(!report.not_installed);

    assert!(!root.join("opt/osint-nexus").exists());
    assert!(std::fs::symlink_metadata(root.join("usr/local/bin/osint-nexus")).is_err());
    assert!(!root.join("usr/share/applications/osint-nexus.desktop").exists());

    let again = installer.uninstall(false).await.unwrap();
    assert!(again.not_installed);
}

#[tokio::test]
async fn reinstall_restores_executable_mode() {
    let tmp = tempfile::tempdir().unwrap();
    let (source, root) = (tmp.path().join("src"), tmp.path().join("stage"));
    source_tree(&source);

    let installer = staged_installer(&source, &root, InstallOptions::default());
    installer.install().await.unwrap();
    let binary = root.join("opt/osint-nexus/osint-nexus");
    std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o644)).unwrap();

    let status = installer.status().await.unwrap();
    assert!(
        status
            .steps
            .iter()
            .any(|(description, state)| description.contains("application executable")
                && *state == StepState::Drifted),
        "{:?}",
        status.steps
    );

    let report = installer.install().await.unwrap();
    assert_eq!(report.steps[1].outcome, StepOutcome::Applied);
    let mode = std::fs::metadata(&binary).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
    assert!(installer.status().await.unwrap().is_complete());
}

#[tokio::test]
async fn uninstall_keeps_files_in_a_preexisting_install_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let (source, root) = (tmp.path().join("src"), tmp.path().join("stage"));
    source_tree(&source);
    let shared = root.join("srv/shared");
    std::fs::create_dir_all(&shared).unwrap();
    std::fs::write(shared.join("user-notes.txt"), "mine").unwrap();

    let installer =
        staged_installer_into(&source, &root, Some("/srv/shared"), InstallOptions::default());
    installer.install().await.unwrap();
    assert!(shared.join("osint-nexus").is_file());
    installer.install().await.unwrap();

    let report = installer.uninstall(false).await.unwrap();
    assert!(!report.not_installed);
    assert_eq!(
        std::fs::read_to_string(shared.join("user-notes.txt")).unwrap(),
        "mine"
    );
    assert!(!shared.join("osint-nexus").exists());
    assert!(!shared.join("assets").exists());
    assert!(!shared.join(".install-receipt.json").exists());
}

#[tokio::test]
async fn created_install_dir_is_still_owned_after_reinstall() {
    let tmp = tempfile::tempdir().unwrap();
    let (source, root) = (tmp.path().join("src"), tmp.path().join("stage"));
    source_tree(&source);

    let installer = staged_installer(&source, &root, InstallOptions::default());
    installer.install().await.unwrap();
    installer.install().await.unwrap();
    std::fs::write(root.join("opt/osint-nexus/settings.json"), "{}").unwrap();

    installer.uninstall(false).await.unwrap();
    assert!(!root.join("opt/osint-nexus").exists());
}

#[tokio::test]
async fn uninstall_dry_run_touches_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let (source, root) = (tmp.path().join("src"), tmp.path().join("stage"));
    source_tree(&source);
    staged_installer(&source, &root, InstallOptions::default())
        .install()
        .await
        .unwrap();
    let before = snapshot(&root);

    let options = InstallOptions {
        force: false,
        dry_run: true,
    };
    let report = staged_installer(&source, &root, options)
        .uninstall(true)
        .await
        .unwrap();
    assert!(!report.not_installed);
    assert!(
        report
            .removals
            .iter()
            .any(|(_, removal)| *removal == Removal::Removed)
    );
    assert_eq!(snapshot(&root), before);
}

#[tokio::test]
async fn uninstall_keeps_a_symlink_it_does_not_own() {
    let tmp = tempfile::tempdir().unwrap();
    let (source, root) = (tmp.path().join("src"), tmp.path().join("stage"));
    source_tree(&source);

    let installer = staged_installer(&source, &root, InstallOptions::default());
    installer.install().await.unwrap();
    let link = root.join("usr/local/bin/osint-nexus");
    std::fs::remove_file(&link).unwrap();
    std::os::unix::fs::symlink("/usr/bin/env", &link).unwrap();

    let report = installer.uninstall(false).await.unwrap();
    assert!(
        report
            .removals
            .iter()
            .any(|(_, removal)| matches!(removal, Removal::Kept(_)))
    );
    assert_eq!(std::fs::read_link(&link).unwrap(), Path::new("/usr/bin/env"));
}

#[tokio::test]
async fn purge_removes_user_data() {
    let tmp = tempfile::tempdir().unwrap();
    let (source, root) = (tmp.path().join("src"), tmp.path().join("stage"));
    source_tree(&source);
    std::fs::write(
        source.join("nexus.toml"),
        "[data]\nuser_dir = \"/home/analyst/.osint-nexus\"\n",
    )
    .unwrap();

    let installer = staged_installer(&source, &root, InstallOptions::default());
    installer.install().await.unwrap();
    let data_dir = root.join("home/analyst/.osint-nexus");
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(data_dir.join("osint_nexus.db"), "sqlite").unwrap();

    installer.uninstall(true).await.unwrap();
    assert!(!data_dir.exists());
}

#[tokio::test]
async fn dry_run_touches_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let (source, root) = (tmp.path().join("src"), tmp.path().join("stage"));
    source_tree(&source);

    let options = InstallOptions {
        force: false,
        dry_run: true,
    };
    let report = staged_installer(&source, &root, options)
        .install()
        .await
        .unwrap();
    assert!(report.receipt.is_none());
    assert!(report.steps.iter().all(|s| s.outcome == StepOutcome::Applied));
    assert!(!root.exists());
}

#[tokio::test]
async fn install_without_root_is_refused_before_any_write() {
    let tmp = tempfile::tempdir().unwrap();
    let (source, target) = (tmp.path().join("src"), tmp.path().join("target"));
    source_tree(&source);

    let settings = load_settings(&source, None, None).unwrap();
    // Paths inside the temp dir, but treated as a real system install
    let mut layout = InstallLayout::resolve(&settings, Platform::Linux, Some(&target));
    layout.root = None;
    let integrations =
        fake_integrations(false, &SharedPath::default(), &FileShortcuts::default());
    let installer = Installer::new(settings, layout, integrations, InstallOptions::default());

    let err = installer.install().await.unwrap_err();
    assert!(matches!(err, InstallerError::PrivilegeRequired { .. }));
    assert_eq!(err.exit_code(), 3);
    assert!(!target.exists());
}

#[tokio::test]
async fn newer_install_is_not_downgraded_without_force() {
    let tmp = tempfile::tempdir().unwrap();
    let (source, root) = (tmp.path().join("src"), tmp.path().join("stage"));
    source_tree(&source);
    std::fs::write(source.join("nexus.toml"), "[package]\nversion = \"2.0.0\"\n").unwrap();
    staged_installer(&source, &root, InstallOptions::default())
        .install()
        .await
        .unwrap();

    std::fs::remove_file(source.join("nexus.toml")).unwrap();
    let err = staged_installer(&source, &root, InstallOptions::default())
        .install()
        .await
        .unwrap_err();
    assert!(matches!(err, InstallerError::Downgrade { .. }));

    let forced = InstallOptions {
        force: true,
        dry_run: false,
    };
    let report = staged_installer(&source, &root, forced)
        .install()
        .await
        .unwrap();
    assert_eq!(report.receipt.unwrap().version, "1.0.0");
}
