//! PyInstaller spec generation.
//!
//! Renders [`PYINSTALLER_SPEC_TEMPLATE`] with Handlebars from the resolved
//! settings and writes `<product>.spec` into the source directory, where
//! PyInstaller resolves the relative paths it contains.

use super::template::PYINSTALLER_SPEC_TEMPLATE;
use crate::error::{InstallerError, Result};
use crate::settings::{Platform, Settings};
use crate::utils::fs;
use handlebars::Handlebars;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Render the spec file contents.
///
/// `platform` decides the executable name PyInstaller writes into `dist/`;
/// `icon` is the icon path to embed, already checked to exist.
pub fn render_spec(settings: &Settings, platform: Platform, icon: Option<&Path>) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    let bundle = settings.bundle();
    let hidden_imports: Vec<String> = bundle.hidden_imports.iter().map(|s| py_str(s)).collect();

    let mut data = json!({
        "product_name": settings.product_name(),
        "version": settings.version_string(),
        "entry_point": py_path(&bundle.entry_point),
        "assets": py_path(&bundle.assets),
        "hidden_imports": hidden_imports,
        "name": py_str(settings.packaged_stem(platform)),
        "console": if bundle.console { "True" } else { "False" },
    });
    if let Some(publisher) = settings.publisher() {
        data["publisher"] = json!(publisher);
    }
    if let Some(homepage) = settings.homepage() {
        data["homepage"] = json!(homepage);
    }
    if let Some(icon) = icon {
        data["icon"] = json!(py_path(icon));
    }

    handlebars
        .register_template_string("pyinstaller.spec", PYINSTALLER_SPEC_TEMPLATE)
        .map_err(|e| InstallerError::Template(format!("failed to register spec template: {e}")))?;
    handlebars
        .render("pyinstaller.spec", &data)
        .map_err(|e| InstallerError::Template(format!("failed to render spec template: {e}")))
}

/// Render the spec and write it to `<source>/<product>.spec`.
pub async fn write_spec(settings: &Settings, icon: Option<&Path>) -> Result<PathBuf> {
    let contents = render_spec(settings, Platform::current(), icon)?;
    let path = spec_path(settings);
    fs::write_file(&path, contents.as_bytes()).await?;
    log::info!("Wrote PyInstaller spec {}", path.display());
    Ok(path)
}

/// Location of the generated spec file.
pub fn spec_path(settings: &Settings) -> PathBuf {
    settings
        .source_dir()
        .join(format!("{}.spec", settings.product_name()))
}

/// Python single-quoted string literal.
fn py_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Paths are written with forward slashes, which PyInstaller accepts everywhere.
fn py_path(path: &Path) -> String {
    py_str(&path.to_string_lossy().replace('\\', "/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsBuilder;

    #[test]
    fn spec_lists_entry_point_assets_and_hidden_imports() {
        let settings = SettingsBuilder::new().build().unwrap();
        let spec = render_spec(&settings, Platform::Linux, None).unwrap();

        assert!(spec.contains("# OSINT-Nexus 1.0.0 by OSINT-Nexus\n"));
        assert!(spec.contains("    ['src/main.py'],\n"));
        assert!(spec.contains("datas=[('assets', 'assets')],"));
        assert!(spec.contains("        'PyQt6.QtWidgets',\n"));
        assert!(spec.contains("        'xml.etree.ElementTree',\n"));
        assert!(spec.contains("name='osint-nexus',"));
        assert!(spec.contains("console=False,"));
        assert!(!spec.contains("icon="));
    }

    #[test]
    fn spec_embeds_icon_when_given() {
        let settings = SettingsBuilder::new().build().unwrap();
        let spec =
            render_spec(&settings, Platform::Windows, Some(Path::new("assets/icon.ico"))).unwrap();
        assert!(spec.contains("    icon=['assets/icon.ico'],\n)"));
        assert!(spec.contains("name='OSINT-Nexus',"));
    }

    #[test]
    fn python_literals_are_escaped() {
        assert_eq!(py_str("it's"), r"'it\'s'");
        assert_eq!(py_path(Path::new(r"C:\src\main.py")), "'C:/src/main.py'");
    }
}
