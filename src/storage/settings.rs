//! JSON settings file.
//!
//! Stores settings in %LOCALAPPDATA%/Reticle/config.json
//!
//! The file is read once at startup and written on normal exit and right
//! before an elevation relaunch, never on every edit.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::model::constants::*;
use crate::model::{CrosshairConfig, CrosshairStyle, Position, Presets, Rgb};

/// On-disk shape of a crosshair config: one preset entry, or the top-level
/// crosshair fields of the settings file.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PresetRecord {
    pub size: i32,
    pub thickness: i32,
    pub color: String,
    pub dot: i32,
    pub style: String,
    pub image_path: String,
}

impl Default for PresetRecord {
    fn default() -> Self {
        Self::from_config(&CrosshairConfig::default())
    }
}

impl PresetRecord {
    /// Read the record fields of a JSON object. Each missing or mistyped
    /// field keeps its default; the others are used as found.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            size: int_field(object, "size").unwrap_or(defaults.size),
            thickness: int_field(object, "thickness").unwrap_or(defaults.thickness),
            color: string_field(object, "color").unwrap_or(defaults.color),
            dot: int_field(object, "dot").unwrap_or(defaults.dot),
            style: string_field(object, "style").unwrap_or(defaults.style),
            image_path: string_field(object, "image_path").unwrap_or(defaults.image_path),
        }
    }

    pub fn from_config(config: &CrosshairConfig) -> Self {
        Self {
            size: config.size,
            thickness: config.thickness,
            color: config.color.to_hex(),
            dot: config.dot_size,
            style: config.style.label().to_string(),
            image_path: config
                .image_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    /// Convert to a validated config. Unknown labels and bad colors fall back
    /// to defaults individually.
    pub fn to_config(&self) -> CrosshairConfig {
        let style = CrosshairStyle::from_label(&self.style).unwrap_or_else(|| {
            warn!(style = %self.style, "Unknown crosshair style, using default");
            CrosshairStyle::default()
        });
        let color = Rgb::parse_hex(&self.color).unwrap_or_else(|| {
            warn!(color = %self.color, "Invalid color hex, using default");
            DEFAULT_COLOR
        });
        let image_path = match self.image_path.trim() {
            "" => None,
            p => Some(PathBuf::from(p)),
        };
        CrosshairConfig {
            style,
            size: self.size,
            thickness: self.thickness,
            dot_size: self.dot,
            color,
            image_path,
        }
        .validated()
    }
}

/// Settings file structure as written.
#[derive(Serialize, Debug, Clone)]
struct SettingsFile {
    pos_x: i32,
    pos_y: i32,
    #[serde(flatten)]
    crosshair: PresetRecord,
    force_admin: bool,
    presets: BTreeMap<String, PresetRecord>,
}

/// Everything that survives a restart.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedSettings {
    pub position: Position,
    pub crosshair: CrosshairConfig,
    pub force_admin: bool,
    pub presets: Presets,
}

impl PersistedSettings {
    /// Fresh settings with the crosshair at `screen_center`.
    pub fn defaults(screen_center: Position) -> Self {
        Self {
            position: screen_center,
            crosshair: CrosshairConfig::default(),
            force_admin: false,
            presets: Presets::new(),
        }
    }

    /// Parse settings JSON. Only malformed JSON or a non-object document is
    /// an error; bad fields and bad presets are dropped one at a time.
    /// Missing position components default to `screen_center`.
    pub fn from_json(json: &str, screen_center: Position) -> Result<Self> {
        let value: Value = serde_json::from_str(json).context("Failed to parse settings")?;
        let object = value
            .as_object()
            .context("Settings file is not a JSON object")?;
        Ok(Self {
            position: Position::new(
                int_field(object, "pos_x").unwrap_or(screen_center.x),
                int_field(object, "pos_y").unwrap_or(screen_center.y),
            ),
            crosshair: PresetRecord::from_json_object(object).to_config(),
            force_admin: bool_field(object, "force_admin").unwrap_or(false),
            presets: presets_field(object),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        let file = SettingsFile {
            pos_x: self.position.x,
            pos_y: self.position.y,
            crosshair: PresetRecord::from_config(&self.crosshair),
            force_admin: self.force_admin,
            presets: self
                .presets
                .iter()
                .map(|(name, config)| (name.to_string(), PresetRecord::from_config(config)))
                .collect(),
        };
        serde_json::to_string_pretty(&file).context("Failed to serialize settings")
    }

    /// Load settings, returning defaults if the file is missing or invalid.
    pub fn load_or_default(path: &Path, screen_center: Position) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                info!(path = %path.display(), error = %e, "No settings file, using defaults");
                return Self::defaults(screen_center);
            }
        };
        match Self::from_json(&contents, screen_center) {
            Ok(settings) => {
                info!(path = %path.display(), presets = settings.presets.len(), "Loaded settings");
                settings
            }
            Err(e) => {
                warn!(path = %path.display(), error = %format!("{e:#}"), "Invalid settings file, using defaults");
                Self::defaults(screen_center)
            }
        }
    }

    /// Write settings, creating the parent directory when needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }
        let json = self.to_json()?;
        fs::write(path, json).with_context(|| format!("Failed to write settings to {:?}", path))?;
        info!(path = %path.display(), "Saved settings");
        Ok(())
    }

    /// Read only the `force_admin` flag. Anything unreadable counts as `false`.
    ///
    /// Used before any UI exists, to decide whether to relaunch elevated.
    pub fn read_force_admin(path: &Path) -> bool {
        #[derive(Deserialize, Default)]
        #[serde(default)]
        struct Flag {
            force_admin: bool,
        }

        fs::read_to_string(path)
            .ok()
            .and_then(|contents| serde_json::from_str::<Flag>(&contents).ok())
            .map(|flag| flag.force_admin)
            .unwrap_or(false)
    }
}

fn mistyped(key: &str, value: &Value) {
    warn!(field = key, %value, "Mistyped settings value, using default");
}

/// Integer field. Decimals are truncated toward zero; anything else that is
/// not a number counts as missing.
fn int_field(object: &Map<String, Value>, key: &str) -> Option<i32> {
    let value = object.get(key).filter(|v| !v.is_null())?;
    let number = value
        .as_i64()
        .map(|n| n.clamp(i32::MIN.into(), i32::MAX.into()) as i32)
        .or_else(|| value.as_f64().map(|f| f as i32));
    if number.is_none() {
        mistyped(key, value);
    }
    number
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    let value = object.get(key).filter(|v| !v.is_null())?;
    let text = value.as_str().map(str::to_string);
    if text.is_none() {
        mistyped(key, value);
    }
    text
}

fn bool_field(object: &Map<String, Value>, key: &str) -> Option<bool> {
    let value = object.get(key).filter(|v| !v.is_null())?;
    let flag = value.as_bool();
    if flag.is_none() {
        mistyped(key, value);
    }
    flag
}

/// Presets keyed by name. An entry that is not an object is skipped.
fn presets_field(object: &Map<String, Value>) -> Presets {
    let Some(value) = object.get("presets").filter(|v| !v.is_null()) else {
        return Presets::new();
    };
    let Some(entries) = value.as_object() else {
        mistyped("presets", value);
        return Presets::new();
    };
    entries
        .iter()
        .filter_map(|(name, entry)| match entry.as_object() {
            Some(fields) => Some((name.clone(), PresetRecord::from_json_object(fields).to_config())),
            None => {
                warn!(preset = %name, "Preset entry is not an object, skipping");
                None
            }
        })
        .collect()
}

/// Settings directory: `$RETICLE_CONFIG_DIR`, else the per-user local
/// application-data directory, else the home directory, else `.`.
pub fn settings_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Full path of the settings file.
pub fn settings_path() -> PathBuf {
    settings_dir().join(CONFIG_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Position = Position::new(960, 540);

    #[test]
    fn empty_object_gives_defaults() {
        let settings = PersistedSettings::from_json("{}", CENTER).unwrap();
        assert_eq!(settings, PersistedSettings::defaults(CENTER));
    }

    #[test]
    fn legacy_chinese_style_label_is_read() {
        let json = r##"{"style": "混合", "color": "#ff0000", "pos_x": 10}"##;
        let settings = PersistedSettings::from_json(json, CENTER).unwrap();
        assert_eq!(settings.crosshair.style, CrosshairStyle::Both);
        assert_eq!(settings.crosshair.color, Rgb::new(255, 0, 0));
        assert_eq!(settings.position, Position::new(10, 540));
    }

    #[test]
    fn bad_fields_fall_back_individually() {
        let json = r#"{"style": "Star", "color": "green", "size": 500, "dot": 7}"#;
        let settings = PersistedSettings::from_json(json, CENTER).unwrap();
        assert_eq!(settings.crosshair.style, CrosshairStyle::Cross);
        assert_eq!(settings.crosshair.color, DEFAULT_COLOR);
        assert_eq!(settings.crosshair.size, MAX_SIZE);
        assert_eq!(settings.crosshair.dot_size, 7);
    }

    #[test]
    fn file_uses_documented_field_names() {
        let json = PersistedSettings::defaults(CENTER).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for key in [
            "pos_x",
            "pos_y",
            "size",
            "thickness",
            "color",
            "dot",
            "style",
            "image_path",
            "force_admin",
            "presets",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["style"], "Cross");
        assert_eq!(value["color"], "#00FF00");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(PersistedSettings::from_json("{not json", CENTER).is_err());
        assert!(PersistedSettings::from_json("[1, 2]", CENTER).is_err());
    }

    #[test]
    fn decimals_are_truncated() {
        let json = r#"{"pos_x": 960.0, "pos_y": -12.7, "thickness": 2.5}"#;
        let settings = PersistedSettings::from_json(json, CENTER).unwrap();
        assert_eq!(settings.position, Position::new(960, -12));
        assert_eq!(settings.crosshair.thickness, 2);
    }
}
