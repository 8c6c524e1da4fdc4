//! Standalone preset files for sharing.
//!
//! Same fields as a preset entry in the settings file plus `name`. Custom
//! images are referenced by path only, never bundled.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::settings::PresetRecord;
use crate::model::constants::IMPORTED_PRESET_NAME;
use crate::model::CrosshairConfig;

#[derive(Serialize, Debug)]
struct PresetFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(flatten)]
    preset: PresetRecord,
}

/// A preset read back from a file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedPreset {
    pub name: String,
    pub config: CrosshairConfig,
}

/// Write one preset to `path` as pretty JSON.
pub fn export_preset(name: &str, config: &CrosshairConfig, path: &Path) -> Result<()> {
    let file = PresetFile {
        name: Some(name.to_string()),
        preset: PresetRecord::from_config(config),
    };
    let json = serde_json::to_string_pretty(&file).context("Failed to serialize preset")?;
    fs::write(path, json).with_context(|| format!("Failed to write preset to {:?}", path))?;
    info!(preset = name, path = %path.display(), "Exported preset");
    Ok(())
}

/// Read a preset file. The name comes from the embedded `name` field, or
/// the file stem when that is missing or blank. Missing fields take defaults.
pub fn import_preset(path: &Path) -> Result<ImportedPreset> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read preset {:?}", path))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse preset {:?}", path))?;
    let object = value
        .as_object()
        .with_context(|| format!("Preset {:?} is not a JSON object", path))?;

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| IMPORTED_PRESET_NAME.to_string());

    info!(preset = %name, path = %path.display(), "Imported preset");
    Ok(ImportedPreset {
        name,
        config: PresetRecord::from_json_object(object).to_config(),
    })
}

/// File name offered when exporting `name`. Characters Windows does not
/// allow in file names become `_`, and trailing dots and spaces are dropped.
pub fn suggested_file_name(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim_end_matches(['.', ' ']);
    if stem.is_empty() {
        format!("{IMPORTED_PRESET_NAME}.json")
    } else {
        format!("{stem}.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CrosshairStyle;

    #[test]
    fn name_falls_back_to_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sniper dot.json");
        fs::write(&path, r#"{"style": "Dot", "dot": 9}"#).unwrap();

        let imported = import_preset(&path).unwrap();
        assert_eq!(imported.name, "sniper dot");
        assert_eq!(imported.config.style, CrosshairStyle::Dot);
        assert_eq!(imported.config.dot_size, 9);
        assert_eq!(imported.config.size, crate::model::DEFAULT_SIZE);
    }

    #[test]
    fn blank_embedded_name_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fallback.json");
        fs::write(&path, r#"{"name": "  "}"#).unwrap();
        assert_eq!(import_preset(&path).unwrap().name, "fallback");
    }

    #[test]
    fn exported_file_carries_name_and_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        export_preset("准心", &CrosshairConfig::default(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("准心"), "non-ASCII names are written verbatim");
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["name"], "准心");
        assert_eq!(value["size"], 20);
        assert_eq!(value["image_path"], "");
    }

    #[test]
    fn mistyped_field_keeps_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.json");
        fs::write(&path, r#"{"name": "old", "size": "30", "dot": 8, "style": "Dot"}"#).unwrap();

        let imported = import_preset(&path).unwrap();
        assert_eq!(imported.config.size, crate::model::DEFAULT_SIZE);
        assert_eq!(imported.config.dot_size, 8);
        assert_eq!(imported.config.style, CrosshairStyle::Dot);
    }

    #[test]
    fn nameless_preset_gets_fallback_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("  .json");
        fs::write(&path, "{}").unwrap();
        assert_eq!(import_preset(&path).unwrap().name, IMPORTED_PRESET_NAME);
    }

    #[test]
    fn suggested_file_name_replaces_reserved_characters() {
        assert_eq!(suggested_file_name("red dot"), "red dot.json");
        assert_eq!(suggested_file_name("a/b\\c:d?"), "a_b_c_d_.json");
        assert_eq!(suggested_file_name("<*>|\"x\""), "_____x_.json");
        assert_eq!(suggested_file_name("long range. "), "long range.json");
        assert_eq!(suggested_file_name(" .. "), "Imported.json");
        assert_eq!(suggested_file_name("准心"), "准心.json");
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(import_preset(&dir.path().join("missing.json")).is_err());
    }
}
