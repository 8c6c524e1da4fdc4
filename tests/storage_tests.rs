//! Settings file tests against real files in a temp directory.

use std::fs;

use reticle::model::constants::*;
use reticle::model::{CrosshairConfig, CrosshairStyle, Position, Rgb};
use reticle::storage::{settings_path, PersistedSettings};

const CENTER: Position = Position::new(1280, 720);

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = PersistedSettings::load_or_default(&dir.path().join("config.json"), CENTER);
    assert_eq!(settings, PersistedSettings::defaults(CENTER));
    assert_eq!(settings.position, CENTER);
}

#[test]
fn corrupt_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{\"size\": ").unwrap();
    assert_eq!(
        PersistedSettings::load_or_default(&path, CENTER),
        PersistedSettings::defaults(CENTER)
    );
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Reticle").join("config.json");

    let mut settings = PersistedSettings::defaults(CENTER);
    settings.position = Position::new(-100, 2000);
    settings.crosshair = CrosshairConfig {
        style: CrosshairStyle::Custom,
        size: 64,
        thickness: 4,
        dot_size: 9,
        color: Rgb::new(0x12, 0xAB, 0xEF),
        image_path: Some("C:\\crosshairs\\scope.png".into()),
    };
    settings.force_admin = true;
    let ring = CrosshairConfig {
        style: CrosshairStyle::Circle,
        ..Default::default()
    };
    settings.presets.insert("ring", ring);

    settings.save(&path).unwrap();
    assert_eq!(PersistedSettings::load_or_default(&path, CENTER), settings);
}

#[test]
fn force_admin_flag_is_read_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    assert!(!PersistedSettings::read_force_admin(&path));

    fs::write(&path, r#"{"force_admin": true, "style": "not a style"}"#).unwrap();
    assert!(PersistedSettings::read_force_admin(&path));

    fs::write(&path, r#"{"force_admin": "yes"}"#).unwrap();
    assert!(!PersistedSettings::read_force_admin(&path));

    fs::write(&path, "garbage").unwrap();
    assert!(!PersistedSettings::read_force_admin(&path));
}

#[test]
fn older_files_with_chinese_labels_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let json = r##"{
        "pos_x": 300,
        "pos_y": 400,
        "size": 30,
        "thickness": 3,
        "color": "#ff0000",
        "dot": 5,
        "style": "圆圈",
        "image_path": "",
        "presets": {
            "默认": {"size": 20, "thickness": 2, "color": "#00ff00", "dot": 4, "style": "十字", "image_path": ""}
        }
    }"##;
    fs::write(&path, json).unwrap();

    let settings = PersistedSettings::load_or_default(&path, CENTER);
    assert_eq!(settings.position, Position::new(300, 400));
    assert_eq!(settings.crosshair.style, CrosshairStyle::Circle);
    assert_eq!(settings.crosshair.color, Rgb::new(255, 0, 0));
    assert!(settings.crosshair.image_path.is_none());
    assert!(!settings.force_admin);

    let preset = settings.presets.get("默认").unwrap();
    assert_eq!(preset.style, CrosshairStyle::Cross);

    // Written back with the canonical English label
    settings.save(&path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["style"], "Circle");
    assert_eq!(value["presets"]["默认"]["style"], "Cross");
}

#[test]
fn out_of_range_values_are_clamped_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"size": 0, "thickness": 50, "dot": -2}"#).unwrap();

    let config = PersistedSettings::load_or_default(&path, CENTER).crosshair;
    assert_eq!(config.size, MIN_SIZE);
    assert_eq!(config.thickness, MAX_THICKNESS);
    assert_eq!(config.dot_size, MIN_DOT_SIZE);
}

#[test]
fn mistyped_fields_cost_only_themselves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let json = r##"{
        "pos_x": 300,
        "pos_y": "top",
        "size": 40,
        "thickness": 2.5,
        "color": 255,
        "style": "Circle",
        "force_admin": "yes",
        "presets": {
            "mine": {"size": 30, "style": "Dot", "color": "#FF0000"},
            "shared": {"size": "30", "dot": 6},
            "broken": "not a preset"
        }
    }"##;
    fs::write(&path, json).unwrap();

    let settings = PersistedSettings::load_or_default(&path, CENTER);
    assert_eq!(settings.position, Position::new(300, CENTER.y));
    assert_eq!(settings.crosshair.size, 40);
    assert_eq!(settings.crosshair.thickness, 2);
    assert_eq!(settings.crosshair.color, DEFAULT_COLOR);
    assert_eq!(settings.crosshair.style, CrosshairStyle::Circle);
    assert!(!settings.force_admin);

    let mine = settings.presets.get("mine").unwrap();
    assert_eq!(mine.size, 30);
    assert_eq!(mine.style, CrosshairStyle::Dot);
    assert_eq!(mine.color, Rgb::new(255, 0, 0));

    let shared = settings.presets.get("shared").unwrap();
    assert_eq!(shared.size, DEFAULT_SIZE);
    assert_eq!(shared.dot_size, 6);

    assert!(!settings.presets.contains("broken"));
    assert_eq!(settings.presets.len(), 2);
}

#[test]
fn settings_file_name() {
    // Only the file name is fixed; the directory depends on the environment.
    assert!(settings_path().ends_with(CONFIG_FILENAME));
}
