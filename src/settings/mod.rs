//! Configuration structures for install and packaging operations.
//!
//! Each build descriptor table maps onto one settings type; [`Settings`]
//! combines them with the source directory.

mod arch;
mod builder;
mod bundle;
mod core;
mod data;
mod linux;
mod package;
mod windows;

pub use arch::{Arch, Platform};
pub use builder::SettingsBuilder;
pub use bundle::{BundleSettings, DEFAULT_HIDDEN_IMPORTS};
pub use self::core::Settings;
pub use data::DataSettings;
pub use linux::LinuxSettings;
pub use package::PackageSettings;
pub use windows::WindowsSettings;
