//! Target platform and CPU architecture.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating system family an install plan is built for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux and other Unix-likes: `/opt`, symlink, desktop entry
    Linux,
    /// Windows: Program Files, shortcuts, machine PATH
    Windows,
}

impl Platform {
    /// Platform of the running process.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Short lower-case identifier used in archive names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architecture of the packaged executable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arch {
    /// x86_64 / AMD64
    X86_64,
    /// x86 / i686
    X86,
    /// AArch64 / ARM64
    AArch64,
    /// Anything else, named as reported by the compiler
    Other(&'static str),
}

impl Arch {
    /// Architecture of the running process.
    pub fn current() -> Self {
        match std::env::consts::ARCH {
            "x86_64" => Arch::X86_64,
            "x86" => Arch::X86,
            "aarch64" => Arch::AArch64,
            other => Arch::Other(other),
        }
    }

    /// Identifier used in archive names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::X86 => "i386",
            Arch::AArch64 => "aarch64",
            Arch::Other(name) => name,
        }
    }
}
