//! Tests for the control panel: every edit must reach the overlay.

use std::cell::Cell;
use std::path::Path;

use anyhow::{anyhow, Result};
use reticle::launch::{perform_relaunch, ProcessLauncher, Relaunch};
use reticle::model::constants::*;
use reticle::model::{CrosshairConfig, CrosshairStyle, Nudge, Position, Rgb};
use reticle::storage::PersistedSettings;
use reticle::{ControlPanel, OverlaySurface, StyleOutcome, Trigger};

const CENTER: Position = Position::new(960, 540);

/// Overlay fake that remembers what it was told.
#[derive(Default)]
struct RecordingOverlay {
    redraws: Vec<CrosshairConfig>,
    moves: Vec<Position>,
}

impl RecordingOverlay {
    fn last_config(&self) -> &CrosshairConfig {
        self.redraws.last().expect("at least one redraw")
    }

    fn last_position(&self) -> Position {
        *self.moves.last().expect("at least one move")
    }
}

impl OverlaySurface for RecordingOverlay {
    fn redraw(&mut self, config: &CrosshairConfig) {
        self.redraws.push(config.clone());
    }

    fn set_position(&mut self, position: Position) {
        self.moves.push(position);
    }
}

fn panel() -> ControlPanel<RecordingOverlay> {
    ControlPanel::new(
        PersistedSettings::defaults(CENTER),
        CENTER,
        RecordingOverlay::default(),
    )
}

fn panel_with(settings: PersistedSettings) -> ControlPanel<RecordingOverlay> {
    ControlPanel::new(settings, CENTER, RecordingOverlay::default())
}

// === Startup ===

#[test]
fn startup_draws_and_places_overlay() {
    let mut settings = PersistedSettings::defaults(CENTER);
    settings.position = Position::new(100, 200);
    settings.crosshair.style = CrosshairStyle::Circle;
    let panel = panel_with(settings);

    assert_eq!(panel.overlay().last_position(), Position::new(100, 200));
    assert_eq!(panel.overlay().last_config().style, CrosshairStyle::Circle);
}

#[test]
fn startup_with_custom_style_and_no_image_does_not_prompt() {
    let mut settings = PersistedSettings::defaults(CENTER);
    settings.crosshair.style = CrosshairStyle::Custom;
    let mut panel = panel_with(settings);
    // Restoring again the way startup does it
    let outcome = panel.select_style(CrosshairStyle::Custom, Trigger::Startup);
    assert!(!outcome.prompt_for_image);
}

// === Appearance ===

#[test]
fn custom_without_image_prompts_unless_restoring() {
    let mut panel = panel();
    assert!(
        panel
            .select_style(CrosshairStyle::Custom, Trigger::User)
            .prompt_for_image
    );
    assert!(
        panel
            .select_style(CrosshairStyle::Custom, Trigger::PresetLoad)
            .prompt_for_image
    );

    panel.choose_image(Path::new("scope.png"));
    assert!(
        !panel
            .select_style(CrosshairStyle::Custom, Trigger::User)
            .prompt_for_image
    );
}

#[test]
fn style_change_redraws() {
    let mut panel = panel();
    let before = panel.overlay().redraws.len();
    panel.select_style(CrosshairStyle::Dot, Trigger::User);
    assert_eq!(panel.overlay().redraws.len(), before + 1);
    assert_eq!(panel.overlay().last_config().style, CrosshairStyle::Dot);
}

#[test]
fn choosing_image_switches_to_custom() {
    let mut panel = panel();
    panel.choose_image(Path::new("C:/images/scope.png"));
    let config = panel.overlay().last_config();
    assert_eq!(config.style, CrosshairStyle::Custom);
    assert_eq!(
        config.image_path.as_deref(),
        Some(Path::new("C:/images/scope.png"))
    );
}

#[test]
fn sliders_clamp_to_ranges() {
    let mut panel = panel();
    panel.set_size(500);
    panel.set_thickness(-3);
    panel.set_dot_size(15);
    let config = panel.overlay().last_config();
    assert_eq!(config.size, MAX_SIZE);
    assert_eq!(config.thickness, MIN_THICKNESS);
    assert_eq!(config.dot_size, 15);
}

#[test]
fn transparent_key_color_is_never_drawn() {
    let mut panel = panel();
    panel.set_color(Rgb::TRANSPARENT_KEY);
    assert_eq!(panel.config().color, Rgb::new(0, 0, 0));

    panel.set_color(Rgb::new(255, 0, 255));
    assert_eq!(panel.overlay().last_config().color, Rgb::new(255, 0, 255));
}

// === Position ===

#[test]
fn nudge_right_then_left_restores_position() {
    let mut panel = panel();
    let start = panel.position();
    panel.nudge(Nudge::Right);
    assert_eq!(panel.position(), start.offset(NUDGE_STEP, 0));
    panel.nudge(Nudge::Left);
    assert_eq!(panel.position(), start);
    assert_eq!(panel.overlay().last_position(), start);
}

#[test]
fn nudge_may_leave_the_screen() {
    let mut settings = PersistedSettings::defaults(CENTER);
    settings.position = Position::new(0, 0);
    let mut panel = panel_with(settings);
    panel.nudge(Nudge::Up);
    assert_eq!(panel.position(), Position::new(0, -1));
}

#[test]
fn drag_follows_pointer_delta() {
    let mut panel = panel();
    let start = panel.position();
    panel.begin_drag(Position::new(10, 10));
    assert!(panel.is_dragging());

    assert_eq!(
        panel.drag_to(Position::new(25, 5)),
        Some(start.offset(15, -5))
    );
    assert_eq!(
        panel.drag_to(Position::new(30, 30)),
        Some(start.offset(20, 20))
    );

    panel.end_drag();
    assert!(!panel.is_dragging());
    assert_eq!(panel.drag_to(Position::new(500, 500)), None);
    assert_eq!(panel.position(), start.offset(20, 20));
}

#[test]
fn position_text_keeps_last_good_values() {
    let mut panel = panel();
    assert_eq!(
        panel.set_position_text("100", "200"),
        Position::new(100, 200)
    );
    assert_eq!(panel.set_position_text("abc", "250.7"), Position::new(100, 250));
    assert_eq!(panel.set_position_text("", ""), Position::new(100, 250));
    assert_eq!(panel.overlay().last_position(), Position::new(100, 250));
}

#[test]
fn center_uses_screen_center() {
    let mut panel = panel();
    panel.set_position(Position::new(5, 5));
    panel.center();
    assert_eq!(panel.position(), CENTER);

    panel.set_screen_center(Position::new(1280, 720));
    panel.center();
    assert_eq!(panel.overlay().last_position(), Position::new(1280, 720));
}

// === Presets ===

#[test]
fn preset_round_trip_restores_appearance_not_position() {
    let mut panel = panel();
    panel.select_style(CrosshairStyle::Both, Trigger::User);
    panel.set_size(42);
    panel.set_thickness(3);
    panel.set_dot_size(6);
    panel.set_color(Rgb::new(1, 2, 3));
    let saved = panel.config().clone();
    assert_eq!(panel.save_preset(" sniper "), Some("sniper".to_string()));

    panel.select_style(CrosshairStyle::Circle, Trigger::User);
    panel.set_size(10);
    panel.set_color(Rgb::new(200, 200, 200));
    panel.set_position(Position::new(12, 34));

    assert_eq!(panel.load_preset("sniper"), Some(StyleOutcome::default()));
    assert_eq!(panel.config(), &saved);
    assert_eq!(panel.overlay().last_config(), &saved);
    assert_eq!(panel.position(), Position::new(12, 34));
}

#[test]
fn loading_custom_preset_without_image_asks_for_one() {
    let mut panel = panel();
    panel.select_style(CrosshairStyle::Custom, Trigger::User);
    panel.save_preset("empty scope");
    panel.choose_image(Path::new("scope.png"));
    panel.save_preset("scope");

    let outcome = panel.load_preset("empty scope").unwrap();
    assert!(outcome.prompt_for_image);
    assert!(!panel.load_preset("scope").unwrap().prompt_for_image);
}

#[test]
fn importing_custom_preset_without_image_asks_for_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bare.json");
    std::fs::write(&path, r#"{"name": "bare", "style": "Custom"}"#).unwrap();

    let mut panel = panel();
    let (name, outcome) = panel.import_preset(&path).unwrap();
    assert_eq!(name, "bare");
    assert!(outcome.prompt_for_image);
    assert_eq!(panel.config().style, CrosshairStyle::Custom);
}

#[test]
fn blank_preset_name_is_ignored() {
    let mut panel = panel();
    assert_eq!(panel.save_preset("   "), None);
    assert!(panel.presets().is_empty());
}

#[test]
fn loading_missing_preset_changes_nothing() {
    let mut panel = panel();
    let before = panel.config().clone();
    assert_eq!(panel.load_preset("nope"), None);
    assert_eq!(panel.config(), &before);
}

#[test]
fn delete_removes_only_that_preset() {
    let mut panel = panel();
    panel.save_preset("a");
    panel.save_preset("b");
    assert!(panel.delete_preset("a"));
    assert!(!panel.delete_preset("a"));
    let names: Vec<&str> = panel.presets().names().collect();
    assert_eq!(names, vec!["b"]);
}

#[test]
fn custom_presets_are_flagged_before_export() {
    let mut panel = panel();
    panel.save_preset("plain");
    panel.choose_image(Path::new("scope.png"));
    panel.save_preset("image");
    assert!(!panel.preset_references_image("plain"));
    assert!(panel.preset_references_image("image"));
}

#[test]
fn export_then_import_into_another_panel() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.json");

    let mut source = panel();
    source.select_style(CrosshairStyle::Dot, Trigger::User);
    source.set_dot_size(11);
    source.set_color(Rgb::new(255, 0, 0));
    source.save_preset("red dot");
    source.export_preset("red dot", &path).unwrap();

    let mut target = panel();
    let (name, outcome) = target.import_preset(&path).unwrap();
    assert_eq!(name, "red dot");
    assert!(!outcome.prompt_for_image);
    assert!(target.presets().contains("red dot"));
    assert_eq!(target.config().style, CrosshairStyle::Dot);
    assert_eq!(target.config().dot_size, 11);
    assert_eq!(target.config().color, Rgb::new(255, 0, 0));
    assert_eq!(target.overlay().last_config().dot_size, 11);
}

#[test]
fn exporting_unknown_preset_fails() {
    let dir = tempfile::tempdir().unwrap();
    let panel = panel();
    assert!(panel
        .export_preset("ghost", &dir.path().join("ghost.json"))
        .is_err());
}

#[test]
fn import_of_invalid_file_leaves_presets_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "not json").unwrap();

    let mut panel = panel();
    assert!(panel.import_preset(&path).is_err());
    assert!(panel.presets().is_empty());
}

// === Persistence ===

#[test]
fn snapshot_captures_everything() {
    let mut panel = panel();
    panel.set_size(33);
    panel.set_position(Position::new(7, 8));
    panel.save_preset("p");
    panel.set_force_admin(true);

    let snapshot = panel.snapshot();
    assert_eq!(snapshot.position, Position::new(7, 8));
    assert_eq!(snapshot.crosshair.size, 33);
    assert!(snapshot.force_admin);
    assert!(snapshot.presets.contains("p"));
}

#[test]
fn saved_settings_restore_the_same_panel() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut panel = panel();
    panel.select_style(CrosshairStyle::Circle, Trigger::User);
    panel.set_position(Position::new(-40, 1300));
    panel.save_preset("ring");
    assert!(panel.save_settings(&path));

    let restored = PersistedSettings::load_or_default(&path, CENTER);
    assert_eq!(restored, panel.snapshot());
}

#[test]
fn save_failure_is_reported_not_raised() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be
    let path = dir.path().join("config.json");
    std::fs::create_dir(&path).unwrap();
    assert!(!panel().save_settings(&path));
}

// === Relaunch ===

struct FakeLauncher {
    fail: bool,
    calls: Cell<usize>,
}

impl FakeLauncher {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            calls: Cell::new(0),
        }
    }
}

impl ProcessLauncher for FakeLauncher {
    fn launch(&self, _target: Relaunch) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            Err(anyhow!("user declined"))
        } else {
            Ok(())
        }
    }
}

#[test]
fn relaunch_persists_flag_before_launching() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let launcher = FakeLauncher::new(false);

    let mut panel = panel();
    perform_relaunch(&mut panel, Relaunch::Elevated, &path, &launcher).unwrap();

    assert_eq!(launcher.calls.get(), 1);
    assert!(panel.force_admin());
    assert!(PersistedSettings::read_force_admin(&path));
}

#[test]
fn failed_relaunch_reverts_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let launcher = FakeLauncher::new(true);

    let mut panel = panel();
    assert!(perform_relaunch(&mut panel, Relaunch::Elevated, &path, &launcher).is_err());

    assert!(!panel.force_admin());
    assert!(!PersistedSettings::read_force_admin(&path));
}

#[test]
fn relaunch_goes_ahead_when_settings_cannot_be_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::create_dir(&path).unwrap();

    let launcher = FakeLauncher::new(false);
    let mut accepted = panel();
    perform_relaunch(&mut accepted, Relaunch::Elevated, &path, &launcher).unwrap();
    assert_eq!(launcher.calls.get(), 1);
    assert!(accepted.force_admin());

    let declined = FakeLauncher::new(true);
    let mut kept = panel();
    assert!(perform_relaunch(&mut kept, Relaunch::Elevated, &path, &declined).is_err());
    assert_eq!(declined.calls.get(), 1);
    assert!(!kept.force_admin());
}

#[test]
fn unelevated_relaunch_clears_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut settings = PersistedSettings::defaults(CENTER);
    settings.force_admin = true;
    let mut panel = panel_with(settings);

    perform_relaunch(
        &mut panel,
        Relaunch::Unelevated,
        &path,
        &FakeLauncher::new(false),
    )
    .unwrap();
    assert!(!PersistedSettings::read_force_admin(&path));
}
