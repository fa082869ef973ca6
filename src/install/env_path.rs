//! Machine-wide `PATH` editing.
//!
//! Entries compare case-insensitively and ignore trailing separators, the way
//! Windows resolves them. Adding an entry that is already present and
//! removing one that is absent are both no-ops.

use crate::error::Result;
use std::path::Path;
use std::sync::Mutex;

const SEPARATOR: &str = ";";

fn normalize(entry: &str) -> String {
    entry
        .trim()
        .trim_end_matches(['\\', '/'])
        .to_lowercase()
}

/// Returns true if `dir` is one of the entries of `path_value`.
pub fn contains_entry(path_value: &str, dir: &Path) -> bool {
    let wanted = normalize(&dir.to_string_lossy());
    path_value
        .split(SEPARATOR)
        .any(|entry| normalize(entry) == wanted)
}

/// Returns `path_value` with `dir` appended, or `None` if already present.
pub fn with_entry(path_value: &str, dir: &Path) -> Option<String> {
    if contains_entry(path_value, dir) {
        return None;
    }
    let dir = dir.to_string_lossy();
    let base = path_value.trim_end_matches(SEPARATOR);
    if base.is_empty() {
        Some(dir.into_owned())
    } else {
        Some(format!("{base}{SEPARATOR}{dir}"))
    }
}

/// Returns `path_value` without any entry matching `dir`, or `None` if absent.
pub fn without_entry(path_value: &str, dir: &Path) -> Option<String> {
    if !contains_entry(path_value, dir) {
        return None;
    }
    let wanted = normalize(&dir.to_string_lossy());
    let kept: Vec<&str> = path_value
        .split(SEPARATOR)
        .filter(|entry| normalize(entry) != wanted)
        .collect();
    Some(kept.join(SEPARATOR))
}

/// Storage for the machine `PATH` value.
pub trait PathStore: Send + Sync {
    /// Read the current value.
    fn read(&self) -> Result<String>;

    /// Replace the value.
    fn write(&self, value: &str) -> Result<()>;
}

/// Append `dir` to the stored PATH. Returns true if the value changed.
pub fn add_to_store(store: &dyn PathStore, dir: &Path) -> Result<bool> {
    let current = store.read()?;
    match with_entry(&current, dir) {
        Some(updated) => {
            store.write(&updated)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Remove `dir` from the stored PATH. Returns true if the value changed.
pub fn remove_from_store(store: &dyn PathStore, dir: &Path) -> Result<bool> {
    let current = store.read()?;
    match without_entry(&current, dir) {
        Some(updated) => {
            store.write(&updated)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// In-memory PATH value.
#[derive(Debug, Default)]
pub struct MemoryPathStore {
    value: Mutex<String>,
}

impl MemoryPathStore {
    /// Store starting with `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(value.into()),
        }
    }

    /// Current value.
    pub fn value(&self) -> String {
        self.value
            .lock()
            .map(|v| v.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl PathStore for MemoryPathStore {
    fn read(&self) -> Result<String> {
        Ok(self.value())
    }

    fn write(&self, value: &str) -> Result<()> {
        let mut guard = self
            .value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = value.to_string();
        Ok(())
    }
}

/// The machine `PATH` in
/// `HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Environment`.
///
/// Written back as `REG_EXPAND_SZ` so `%SystemRoot%`-style entries keep
/// expanding. Running processes keep their old environment; new sessions
/// pick the change up.
#[cfg(windows)]
#[derive(Debug, Default)]
pub struct RegistryPathStore;

#[cfg(windows)]
const ENVIRONMENT_KEY: &str = r"SYSTEM\CurrentControlSet\Control\Session Manager\Environment";

#[cfg(windows)]
impl PathStore for RegistryPathStore {
    fn read(&self) -> Result<String> {
        use winreg::RegKey;
        use winreg::enums::*;

        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        let key = hklm.open_subkey_with_flags(ENVIRONMENT_KEY, KEY_READ)?;
        Ok(key.get_value::<String, _>("Path")?)
    }

    fn write(&self, value: &str) -> Result<()> {
        use winreg::enums::*;
        use winreg::{RegKey, RegValue};

        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        let key = hklm.open_subkey_with_flags(ENVIRONMENT_KEY, KEY_SET_VALUE)?;
        let bytes: Vec<u8> = value
            .encode_utf16()
            .chain(std::iter::once(0))
            .flat_map(|unit| unit.to_le_bytes())
            .collect();
        key.set_raw_value(
            "Path",
            &RegValue {
                bytes,
                vtype: REG_EXPAND_SZ,
            },
        )?;
        Ok(())
    }
}

/// Machine PATH is only managed on Windows.
#[cfg(not(windows))]
#[derive(Debug, Default)]
pub struct RegistryPathStore;

#[cfg(not(windows))]
impl PathStore for RegistryPathStore {
    fn read(&self) -> Result<String> {
        Err(crate::error::InstallerError::Generic(
            "the machine PATH registry value only exists on Windows".to_string(),
        ))
    }

    fn write(&self, _value: &str) -> Result<()> {
        self.read().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn with_entry_appends_once() {
        let dir = PathBuf::from(r"C:\Program Files\OSINT-Nexus");
        let value = r"C:\Windows;C:\Windows\System32";
        let added = with_entry(value, &dir).unwrap();
        assert_eq!(added, r"C:\Windows;C:\Windows\System32;C:\Program Files\OSINT-Nexus");
        assert_eq!(with_entry(&added, &dir), None);
    }

    #[test]
    fn matching_ignores_case_and_trailing_separator() {
        let dir = PathBuf::from(r"C:\Program Files\OSINT-Nexus");
        assert!(contains_entry(r"C:\Windows;c:\program files\osint-nexus\", &dir));
    }

    #[test]
    fn without_entry_is_inverse_of_with_entry() {
        let dir = PathBuf::from(r"C:\Program Files\OSINT-Nexus");
        let value = r"C:\Windows;%SystemRoot%\System32";
        let added = with_entry(value, &dir).unwrap();
        assert_eq!(without_entry(&added, &dir).unwrap(), value);
        assert_eq!(without_entry(value, &dir), None);
    }

    #[test]
    fn with_entry_handles_empty_and_trailing_separator() {
        let dir = PathBuf::from(r"C:\Tools");
        assert_eq!(with_entry("", &dir).unwrap(), r"C:\Tools");
        assert_eq!(with_entry(r"C:\Windows;", &dir).unwrap(), r"C:\Windows;C:\Tools");
    }

    #[test]
    fn store_helpers_report_changes() {
        let store = MemoryPathStore::new(r"C:\Windows");
        let dir = PathBuf::from(r"C:\Tools");
        assert!(add_to_store(&store, &dir).unwrap());
        assert!(!add_to_store(&store, &dir).unwrap());
        assert!(remove_from_store(&store, &dir).unwrap());
        assert_eq!(store.value(), r"C:\Windows");
    }
}
