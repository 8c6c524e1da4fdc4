//! Configuration constants and default values.
//!
//! This module contains all application constants including visual defaults,
//! validation limits, and the names used for files and registry entries.

use super::color::Rgb;

// === Application identity ===

/// Display name, settings directory name and autostart value name.
pub const APP_NAME: &str = "Reticle";

/// Settings file name inside the settings directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Log file name inside the settings directory.
pub const LOG_FILENAME: &str = "reticle.log";

/// Name given to an imported preset whose file carries no usable name.
pub const IMPORTED_PRESET_NAME: &str = "Imported";

/// Environment variable overriding the settings directory.
pub const CONFIG_DIR_ENV: &str = "RETICLE_CONFIG_DIR";

// === Visual Defaults ===

/// Default crosshair size (arm length / ring diameter) in pixels.
pub const DEFAULT_SIZE: i32 = 20;

/// Default line thickness in pixels.
pub const DEFAULT_THICKNESS: i32 = 2;

/// Default dot diameter in pixels.
pub const DEFAULT_DOT_SIZE: i32 = 4;

/// Default crosshair color - green.
pub const DEFAULT_COLOR: Rgb = Rgb::new(0x00, 0xFF, 0x00);

// === Validation Limits ===

/// Minimum crosshair size in pixels.
pub const MIN_SIZE: i32 = 5;

/// Maximum crosshair size in pixels.
pub const MAX_SIZE: i32 = 100;

/// Minimum line thickness in pixels.
pub const MIN_THICKNESS: i32 = 1;

/// Maximum line thickness in pixels.
pub const MAX_THICKNESS: i32 = 10;

/// Minimum dot diameter in pixels.
pub const MIN_DOT_SIZE: i32 = 1;

/// Maximum dot diameter in pixels.
pub const MAX_DOT_SIZE: i32 = 20;

// === Overlay ===

/// Width and height of the overlay drawing surface in pixels.
pub const CANVAS_SIZE: i32 = 200;

/// Pixels moved per arrow-key press.
pub const NUDGE_STEP: i32 = 1;

/// Delay before click-through is applied a second time after window creation.
pub const CLICK_THROUGH_REAPPLY_MS: u32 = 100;

/// Image extensions offered by the custom image picker.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "gif", "ppm", "pnm", "jpg", "jpeg", "bmp"];
