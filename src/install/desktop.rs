//! freedesktop.org desktop-menu entry.

use crate::settings::Settings;
use std::fmt::Write;
use std::path::Path;

/// Render the `.desktop` entry for the installed executable.
///
/// `Path=` points at the install directory because the application resolves
/// its settings file relative to the working directory.
pub fn render_desktop_entry(
    settings: &Settings,
    executable: &Path,
    install_dir: &Path,
    icon: Option<&Path>,
) -> String {
    let linux = settings.linux();
    let mut entry = String::from("[Desktop Entry]\n");

    // Writing to a String cannot fail
    let _ = writeln!(entry, "Version=1.0");
    let _ = writeln!(entry, "Type=Application");
    let _ = writeln!(entry, "Name={}", settings.product_name());
    if !settings.description().is_empty() {
        let _ = writeln!(entry, "Comment={}", settings.description());
    }
    let _ = writeln!(entry, "Exec={}", quote_exec_arg(&executable.to_string_lossy()));
    let _ = writeln!(entry, "Path={}", install_dir.display());
    if let Some(icon) = icon {
        let _ = writeln!(entry, "Icon={}", icon.display());
    }
    let _ = writeln!(entry, "Terminal={}", linux.terminal);
    if !linux.categories.is_empty() {
        let _ = writeln!(entry, "Categories={};", linux.categories.join(";"));
    }
    let _ = writeln!(entry, "StartupWMClass={}", settings.product_name());

    entry
}

/// Quote an `Exec=` argument when it contains reserved characters.
///
/// A literal `%` is doubled so it is not read as a field code.
fn quote_exec_arg(arg: &str) -> String {
    let arg = arg.replace('%', "%%");
    let arg = arg.as_str();
    const RESERVED: &[char] = &[
        ' ', '\t', '\n', '"', '\'', '\\', '>', '<', '~', '|', '&', ';', '$', '*', '?', '#', '(',
        ')', '`',
    ];
    if !arg.contains(RESERVED) {
        return arg.to_string();
    }
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for ch in arg.chars() {
        if matches!(ch, '"' | '`' | '$' | '\\') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}
