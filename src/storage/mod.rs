//! Persistence: the settings file and shareable preset files.

pub mod preset_file;
pub mod settings;

pub use preset_file::{export_preset, import_preset, suggested_file_name, ImportedPreset};
pub use settings::{settings_dir, settings_path, PersistedSettings, PresetRecord};
