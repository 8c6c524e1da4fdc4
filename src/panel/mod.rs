//! Control panel state: the single owner of the crosshair configuration.
//!
//! Every edit goes through a [`ControlPanel`] method which mutates the
//! configuration and then explicitly asks the overlay to redraw and/or move.
//! The platform window only translates UI notifications into these calls and
//! shows whatever dialogs an outcome asks for.

use std::path::Path;

use anyhow::{anyhow, Result};
use tracing::{debug, info, warn};

use crate::model::constants::NUDGE_STEP;
use crate::model::{
    parse_coordinate, CrosshairConfig, CrosshairStyle, Nudge, Position, Presets, Rgb,
};
use crate::storage::{self, PersistedSettings};

/// The overlay as seen by the control panel.
pub trait OverlaySurface {
    /// Re-render using `config`. Must not fail; problems are logged.
    fn redraw(&mut self, config: &CrosshairConfig);

    /// Center the overlay canvas on `position` (absolute screen pixels).
    fn set_position(&mut self, position: Position);
}

/// Why a style change is happening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Restoring saved state at startup: never prompt.
    Startup,
    /// The user picked a style.
    User,
    /// A preset was applied.
    PresetLoad,
}

/// What the UI should do after a style change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleOutcome {
    /// Custom was picked with no image: open the image picker.
    pub prompt_for_image: bool,
}

#[derive(Debug, Clone, Copy)]
struct DragAnchor {
    pointer: Position,
    position: Position,
}

/// Owns configuration, position and presets, and drives the overlay.
pub struct ControlPanel<O> {
    overlay: O,
    config: CrosshairConfig,
    position: Position,
    presets: Presets,
    force_admin: bool,
    screen_center: Position,
    drag: Option<DragAnchor>,
}

impl<O: OverlaySurface> ControlPanel<O> {
    /// Take ownership of restored settings and bring the overlay up to date.
    pub fn new(settings: PersistedSettings, screen_center: Position, overlay: O) -> Self {
        let mut panel = Self {
            overlay,
            config: settings.crosshair.validated(),
            position: settings.position,
            presets: settings.presets,
            force_admin: settings.force_admin,
            screen_center,
            drag: None,
        };
        panel.overlay.redraw(&panel.config);
        panel.overlay.set_position(panel.position);
        panel.select_style(panel.config.style, Trigger::Startup);
        panel
    }

    pub fn config(&self) -> &CrosshairConfig {
        &self.config
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn presets(&self) -> &Presets {
        &self.presets
    }

    pub fn force_admin(&self) -> bool {
        self.force_admin
    }

    pub fn screen_center(&self) -> Position {
        self.screen_center
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut O {
        &mut self.overlay
    }

    fn redraw(&mut self) {
        self.overlay.redraw(&self.config);
    }

    fn move_to(&mut self, position: Position) {
        self.position = position;
        self.overlay.set_position(position);
    }

    // === Appearance ===

    /// Switch style. Landing on Custom without an image asks for one, except
    /// while restoring saved state.
    pub fn select_style(&mut self, style: CrosshairStyle, trigger: Trigger) -> StyleOutcome {
        self.config.style = style;
        self.redraw();
        let prompt_for_image = style == CrosshairStyle::Custom
            && !self.config.has_image()
            && trigger != Trigger::Startup;
        debug!(%style, ?trigger, prompt_for_image, "Style selected");
        StyleOutcome { prompt_for_image }
    }

    /// Use `path` as the custom image; this also switches the style to Custom.
    pub fn choose_image(&mut self, path: &Path) {
        info!(path = %path.display(), "Custom image chosen");
        self.config.image_path = Some(path.to_path_buf());
        self.config.style = CrosshairStyle::Custom;
        self.redraw();
    }

    pub fn set_size(&mut self, size: i32) {
        self.config.size = size;
        self.config.validate();
        self.redraw();
    }

    pub fn set_thickness(&mut self, thickness: i32) {
        self.config.thickness = thickness;
        self.config.validate();
        self.redraw();
    }

    pub fn set_dot_size(&mut self, dot_size: i32) {
        self.config.dot_size = dot_size;
        self.config.validate();
        self.redraw();
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.config.color = color.selectable();
        self.redraw();
    }

    // === Position ===

    pub fn set_position(&mut self, position: Position) {
        self.move_to(position);
    }

    /// Apply the text of the X and Y fields. A field that does not parse
    /// keeps its last good value. Returns the resulting position.
    pub fn set_position_text(&mut self, x: &str, y: &str) -> Position {
        let next = Position::new(
            parse_coordinate(x).unwrap_or(self.position.x),
            parse_coordinate(y).unwrap_or(self.position.y),
        );
        self.move_to(next);
        next
    }

    /// Move to the center of the primary screen.
    pub fn center(&mut self) {
        self.move_to(self.screen_center);
    }

    /// Record a new screen size (display settings changed).
    pub fn set_screen_center(&mut self, center: Position) {
        self.screen_center = center;
    }

    /// One arrow-key step.
    pub fn nudge(&mut self, direction: Nudge) {
        let (dx, dy) = direction.delta(NUDGE_STEP);
        self.move_to(self.position.offset(dx, dy));
    }

    /// Start a press-and-drag at screen pointer `pointer`.
    pub fn begin_drag(&mut self, pointer: Position) {
        self.drag = Some(DragAnchor {
            pointer,
            position: self.position,
        });
    }

    /// Pointer moved during a drag: the crosshair follows the pointer delta.
    /// Ignored when no drag is active.
    pub fn drag_to(&mut self, pointer: Position) -> Option<Position> {
        let anchor = self.drag?;
        let (dx, dy) = pointer.delta_from(anchor.pointer);
        let next = anchor.position.offset(dx, dy);
        self.move_to(next);
        Some(next)
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // === Presets ===

    /// Store the current appearance (never the position) under `name`.
    pub fn save_preset(&mut self, name: &str) -> Option<String> {
        let saved = self.presets.insert(name, self.config.clone());
        match &saved {
            Some(name) => info!(preset = %name, "Saved preset"),
            None => debug!("Ignoring preset save with blank name"),
        }
        saved
    }

    /// Apply a preset's appearance. Position is unchanged. `None` when no
    /// preset has that name.
    pub fn load_preset(&mut self, name: &str) -> Option<StyleOutcome> {
        let Some(preset) = self.presets.get(name).cloned() else {
            debug!(preset = name, "No such preset");
            return None;
        };
        self.config = preset;
        let outcome = self.select_style(self.config.style, Trigger::PresetLoad);
        info!(preset = name, "Loaded preset");
        Some(outcome)
    }

    pub fn delete_preset(&mut self, name: &str) -> bool {
        let removed = self.presets.remove(name).is_some();
        if removed {
            info!(preset = name, "Deleted preset");
        }
        removed
    }

    /// Exporting this preset would leave its custom image behind.
    pub fn preset_references_image(&self, name: &str) -> bool {
        self.presets
            .get(name)
            .is_some_and(|p| p.style == CrosshairStyle::Custom)
    }

    pub fn export_preset(&self, name: &str, path: &Path) -> Result<()> {
        let preset = self
            .presets
            .get(name)
            .ok_or_else(|| anyhow!("No preset named {name:?}"))?;
        storage::export_preset(name.trim(), preset, path)
    }

    /// Merge a preset file into the mapping (replacing a same-named entry)
    /// and apply it. Returns the name it was stored under.
    pub fn import_preset(&mut self, path: &Path) -> Result<(String, StyleOutcome)> {
        let imported = storage::import_preset(path)?;
        let name = self
            .presets
            .insert(&imported.name, imported.config)
            .ok_or_else(|| anyhow!("Preset file {:?} has no usable name", path))?;
        let outcome = self.load_preset(&name).unwrap_or_default();
        Ok((name, outcome))
    }

    // === Persistence ===

    pub fn set_force_admin(&mut self, force_admin: bool) {
        self.force_admin = force_admin;
    }

    /// Everything that should survive a restart.
    pub fn snapshot(&self) -> PersistedSettings {
        PersistedSettings {
            position: self.position,
            crosshair: self.config.clone(),
            force_admin: self.force_admin,
            presets: self.presets.clone(),
        }
    }

    /// Write settings to `path`. Failures are logged, never raised.
    pub fn save_settings(&self, path: &Path) -> bool {
        match self.snapshot().save(path) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Failed to save settings");
                false
            }
        }
    }

    /// Swap in a freshly created overlay and bring it up to date.
    pub fn replace_overlay(&mut self, overlay: O) -> O {
        let old = std::mem::replace(&mut self.overlay, overlay);
        self.redraw();
        self.overlay.set_position(self.position);
        old
    }
}
