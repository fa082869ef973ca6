//! PyInstaller spec template.

/// Single-file PyInstaller spec.
///
/// Python values are inserted already quoted as literals; rendering uses
/// no HTML escaping.
pub const PYINSTALLER_SPEC_TEMPLATE: &str = r#"# -*- mode: python ; coding: utf-8 -*-
# {{product_name}} {{version}}{{#if publisher}} by {{publisher}}{{/if}}
{{#if homepage}}# {{homepage}}
{{/if}}# Generated by osint-nexus-installer from the build descriptor.

a = Analysis(
    [{{entry_point}}],
    pathex=[],
    binaries=[],
    datas=[({{assets}}, 'assets')],
    hiddenimports=[
{{#each hidden_imports}}        {{this}},
{{/each}}    ],
    hookspath=[],
    hooksconfig={},
    runtime_hooks=[],
    excludes=[],
    noarchive=False,
)
pyz = PYZ(a.pure)

exe = EXE(
    pyz,
    a.scripts,
    a.binaries,
    a.datas,
    [],
    name={{name}},
    debug=False,
    bootloader_ignore_signals=False,
    strip=False,
    upx=True,
    upx_exclude=[],
    runtime_tmpdir=None,
    console={{console}},
    disable_windowed_traceback=False,
    argv_emulation=False,
    target_arch=None,
    codesign_identity=None,
    entitlements_file=None,
{{#if icon}}    icon=[{{icon}}],
{{/if}})
"#;
