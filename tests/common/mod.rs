//! Shared fixtures for integration tests.
#![allow(dead_code)]

use osint_nexus_installer::install::{
    FixedPrivilege, Integrations, MemoryPathStore, PathStore, ShortcutSpec, ShortcutWriter,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Source tree as left behind by a packaging run.
pub fn source_tree(dir: &Path) {
    std::fs::create_dir_all(dir.join("dist")).unwrap();
    std::fs::create_dir_all(dir.join("assets").join("img")).unwrap();
    std::fs::write(dir.join("dist").join("osint-nexus"), "#!/bin/sh\necho nexus\n").unwrap();
    std::fs::write(dir.join("dist").join("OSINT-Nexus.exe"), "MZ").unwrap();
    std::fs::write(dir.join("assets").join("icon.png"), "png").unwrap();
    std::fs::write(dir.join("assets").join("icon.ico"), "ico").unwrap();
    std::fs::write(dir.join("assets").join("img").join("logo.svg"), "<svg/>").unwrap();
}

/// Sorted listing of everything under `root`: path, kind and content.
pub fn snapshot(root: &Path) -> Vec<String> {
    let mut entries: Vec<String> = walkdir::WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            let rel = entry.path().strip_prefix(root).unwrap().display().to_string();
            let kind = entry.file_type();
            if kind.is_symlink() {
                format!("{rel} -> {}", std::fs::read_link(entry.path()).unwrap().display())
            } else if kind.is_dir() {
                format!("{rel}/")
            } else {
                format!("{rel}: {}", std::fs::read_to_string(entry.path()).unwrap())
            }
        })
        .collect();
    entries.sort();
    entries
}

/// PATH store the test can inspect after handing it to the installer.
#[derive(Clone, Default)]
pub struct SharedPath(pub Arc<MemoryPathStore>);

impl PathStore for SharedPath {
    fn read(&self) -> osint_nexus_installer::Result<String> {
        self.0.read()
    }

    fn write(&self, value: &str) -> osint_nexus_installer::Result<()> {
        self.0.write(value)
    }
}

/// Shortcut writer that drops a marker file at each link.
#[derive(Clone, Default)]
pub struct FileShortcuts(pub Arc<Mutex<Vec<PathBuf>>>);

impl ShortcutWriter for FileShortcuts {
    fn create(&self, spec: &ShortcutSpec) -> osint_nexus_installer::Result<()> {
        std::fs::create_dir_all(spec.link.parent().unwrap())?;
        std::fs::write(&spec.link, spec.target.display().to_string())?;
        self.0.lock().unwrap().push(spec.link.clone());
        Ok(())
    }
}

/// Integrations with fixed privilege and in-memory PATH / shortcuts.
pub fn fake_integrations(elevated: bool, path: &SharedPath, shortcuts: &FileShortcuts) -> Integrations {
    Integrations {
        privilege: Box::new(FixedPrivilege(elevated)),
        machine_path: Box::new(path.clone()),
        shortcuts: Box::new(shortcuts.clone()),
    }
}
