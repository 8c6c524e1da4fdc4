//! Control panel window for Windows.
//!
//! Translates control notifications into [`ControlPanel`] calls and keeps
//! the controls in sync with the resulting state. All dialogs are shown
//! from here; the `ControlPanel` borrow is never held across one.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Direct2D::ID2D1Factory;
use windows::Win32::Graphics::Gdi::{COLOR_BTNFACE, HBRUSH};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    ReleaseCapture, SetCapture, VK_DOWN, VK_LEFT, VK_RIGHT, VK_UP,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRect, CreateWindowExW, DefWindowProcW, DestroyWindow, GetCursorPos, GetDlgCtrlID,
    GetParent, GetWindowLongPtrW, GetWindowRect, IsChild, LoadCursorW, PostMessageW,
    PostQuitMessage, RegisterClassW, SetForegroundWindow, SetWindowLongPtrW, ShowWindow,
    CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, GWLP_USERDATA, IDC_ARROW, MSG, SW_HIDE, SW_SHOW,
    WINDOW_EX_STYLE, WM_APP, WM_CAPTURECHANGED, WM_CLOSE, WM_COMMAND, WM_DESTROY,
    WM_DISPLAYCHANGE, WM_HSCROLL, WM_KEYDOWN, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE,
    WM_NCDESTROY, WNDCLASSW, WS_CAPTION, WS_MINIMIZEBOX, WS_OVERLAPPED, WS_SYSMENU,
};

use super::controls::{
    combo_add, combo_clear, combo_item_text, combo_select, combo_selection, combo_text,
    init_slider, link_value_label, set_slider_pos, set_value_text, slider_pos, ControlBuilder,
    CBN_SELCHANGE, EN_CHANGE,
};
use crate::events::EventBus;
use crate::launch::{perform_relaunch, Relaunch};
use crate::model::constants::*;
use crate::model::{CrosshairStyle, Nudge, Position};
use crate::panel::{ControlPanel, StyleOutcome, Trigger};
use crate::platform::windows::ffi::{
    class_name, hiword, hwnd_from_lparam, loword, set_window_text, to_wide, window_text,
};
use crate::platform::windows::system::{autostart, primary_screen_center, ShellLauncher};
use crate::platform::windows::ui::dialogs::{
    choose_color, confirm_warning, default_custom_colors, open_file, save_file, show_error,
    CustomColors, FileFilter,
};
use crate::platform::windows::ui::overlay::OverlayWindow;
use crate::platform::windows::ui::tray::{TrayHandle, WM_TRAY_EVENT};
use crate::storage::suggested_file_name;
use crate::{style_label, tr_key, window_title, AppEvent, Language};

// Control IDs
const ID_STYLE_COMBO: i32 = 101;
const ID_IMAGE_BUTTON: i32 = 102;
const ID_COLOR_SWATCH: i32 = 103;
const ID_COLOR_BUTTON: i32 = 104;
const ID_SIZE_SLIDER: i32 = 110;
const ID_SIZE_VALUE: i32 = 111;
const ID_THICKNESS_SLIDER: i32 = 112;
const ID_THICKNESS_VALUE: i32 = 113;
const ID_DOT_SLIDER: i32 = 114;
const ID_DOT_VALUE: i32 = 115;
const ID_X_EDIT: i32 = 120;
const ID_Y_EDIT: i32 = 121;
const ID_CENTER_BUTTON: i32 = 122;
const ID_DRAG_PAD: i32 = 123;
const ID_PRESET_COMBO: i32 = 130;
const ID_SAVE_PRESET: i32 = 131;
const ID_DELETE_PRESET: i32 = 132;
const ID_IMPORT_PRESET: i32 = 133;
const ID_EXPORT_PRESET: i32 = 134;
const ID_HIDE_TO_TRAY: i32 = 140;
const ID_AUTOSTART: i32 = 141;
const ID_ELEVATION: i32 = 142;

/// Deferred "pick a custom image" request, handled after the combo
/// notification that caused it has returned.
const WM_APP_PICK_IMAGE: u32 = WM_APP + 10;

const CLASS_NAME: PCWSTR = w!("ReticlePanel");

// Window dimensions (client area)
const CLIENT_WIDTH: i32 = 380;
const CLIENT_HEIGHT: i32 = 480;

// Layout constants
const MARGIN: i32 = 12;
const GROUP_WIDTH: i32 = CLIENT_WIDTH - 2 * MARGIN;
const INNER_LEFT: i32 = MARGIN + 12;
const INNER_RIGHT: i32 = MARGIN + GROUP_WIDTH - 12;

/// Control handles the window reads from or writes to after creation.
struct Controls {
    style_combo: HWND,
    color_swatch: HWND,
    size_slider: HWND,
    size_value: HWND,
    thickness_slider: HWND,
    thickness_value: HWND,
    dot_slider: HWND,
    dot_value: HWND,
    x_edit: HWND,
    y_edit: HWND,
    drag_pad: HWND,
    preset_combo: HWND,
    autostart_button: HWND,
}

/// Startup facts the window needs besides the panel itself.
pub struct PanelOptions {
    pub settings_path: PathBuf,
    pub lang: Language,
    pub elevated: bool,
}

pub struct PanelWindow {
    hwnd: HWND,
    controls: Controls,
    panel: RefCell<ControlPanel<OverlayWindow>>,
    factory: ID2D1Factory,
    options: PanelOptions,
    /// Set while controls are updated from code, so their notifications
    /// are not treated as user edits.
    syncing: Cell<bool>,
    /// A relaunch already saved the settings.
    skip_save: Cell<bool>,
    events: EventBus,
    tray: RefCell<Option<TrayHandle>>,
    custom_colors: Cell<CustomColors>,
}

impl PanelWindow {
    /// Create and show the control panel for `panel`.
    pub fn create(
        panel: ControlPanel<OverlayWindow>,
        factory: ID2D1Factory,
        options: PanelOptions,
    ) -> Result<Rc<Self>> {
        unsafe {
            let hinstance = GetModuleHandleW(None).context("Failed to get module handle")?;

            let wc = WNDCLASSW {
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(panel_wndproc),
                hInstance: hinstance.into(),
                hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
                hbrBackground: HBRUSH((COLOR_BTNFACE.0 + 1) as isize as *mut _),
                lpszClassName: CLASS_NAME,
                ..Default::default()
            };
            RegisterClassW(&wc);

            let style = WS_OVERLAPPED | WS_CAPTION | WS_SYSMENU | WS_MINIMIZEBOX;
            let mut frame = RECT {
                left: 0,
                top: 0,
                right: CLIENT_WIDTH,
                bottom: CLIENT_HEIGHT,
            };
            let _ = AdjustWindowRect(&mut frame, style, false);

            let title = to_wide(&window_title(options.elevated, options.lang));
            let hwnd = CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                CLASS_NAME,
                PCWSTR(title.as_ptr()),
                style,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                frame.right - frame.left,
                frame.bottom - frame.top,
                None,
                None,
                Some(hinstance.into()),
                None,
            )
            .context("Failed to create control panel window")?;

            let builder = ControlBuilder::new(hwnd, hinstance.into());
            let controls = create_controls(&builder, options.lang, options.elevated);

            let window = Rc::new(Self {
                hwnd,
                controls,
                panel: RefCell::new(panel),
                factory,
                options,
                syncing: Cell::new(false),
                skip_save: Cell::new(false),
                events: EventBus::new(),
                tray: RefCell::new(None),
                custom_colors: Cell::new(default_custom_colors()),
            });

            // The window keeps one strong reference until WM_NCDESTROY
            SetWindowLongPtrW(
                hwnd,
                GWLP_USERDATA,
                Rc::into_raw(Rc::clone(&window)) as isize,
            );

            window.sync_appearance();
            window.sync_position_fields();
            window.refresh_presets(None);
            window.refresh_autostart_label();

            let _ = ShowWindow(hwnd, SW_SHOW);
            info!("Control panel shown");
            Ok(window)
        }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    fn tr(&self, key: &str) -> String {
        tr_key(key, self.options.lang).into_owned()
    }

    /// Run `f` on the panel unless a re-entrant message already holds it.
    fn with_panel<R>(&self, f: impl FnOnce(&mut ControlPanel<OverlayWindow>) -> R) -> Option<R> {
        match self.panel.try_borrow_mut() {
            Ok(mut panel) => Some(f(&mut panel)),
            Err(_) => {
                debug!("Control panel busy, ignoring re-entrant message");
                None
            }
        }
    }

    fn syncing<R>(&self, f: impl FnOnce() -> R) -> R {
        let previous = self.syncing.replace(true);
        let result = f();
        self.syncing.set(previous);
        result
    }

    // === Keeping controls in sync ===

    fn sync_appearance(&self) {
        let Some(config) = self.with_panel(|p| p.config().clone()) else {
            return;
        };
        let c = &self.controls;
        self.syncing(|| {
            combo_select(c.style_combo, Some(config.style.index()));
            set_window_text(c.color_swatch, &config.color.to_hex());
            for (slider, value_label, value) in [
                (c.size_slider, c.size_value, config.size),
                (c.thickness_slider, c.thickness_value, config.thickness),
                (c.dot_slider, c.dot_value, config.dot_size),
            ] {
                set_slider_pos(slider, value);
                set_value_text(value_label, value);
            }
        });
    }

    fn sync_position_fields(&self) {
        let Some(position) = self.with_panel(|p| p.position()) else {
            return;
        };
        self.syncing(|| {
            set_window_text(self.controls.x_edit, &position.x.to_string());
            set_window_text(self.controls.y_edit, &position.y.to_string());
        });
    }

    /// Rebuild the preset list. Shows `selected`, or the placeholder.
    fn refresh_presets(&self, selected: Option<&str>) {
        let Some(names) = self.with_panel(|p| {
            p.presets()
                .names()
                .map(str::to_string)
                .collect::<Vec<_>>()
        }) else {
            return;
        };
        let combo = self.controls.preset_combo;
        self.syncing(|| {
            combo_clear(combo);
            for name in &names {
                combo_add(combo, name);
            }
            match selected.and_then(|s| names.iter().position(|n| n == s)) {
                Some(index) => combo_select(combo, Some(index)),
                None => set_window_text(combo, &self.tr("<-- select a preset -->")),
            }
        });
    }

    fn refresh_autostart_label(&self) {
        let key = if autostart::is_enabled() {
            "Autostart: on"
        } else {
            "Autostart: off"
        };
        set_window_text(self.controls.autostart_button, &self.tr(key));
    }

    /// Name typed or selected in the preset box, ignoring the placeholder.
    fn typed_preset_name(&self) -> Option<String> {
        let text = combo_text(self.controls.preset_combo);
        let name = text.trim();
        (!name.is_empty() && name != self.tr("<-- select a preset -->")).then(|| name.to_string())
    }

    // === Appearance ===

    fn on_style_selected(&self) {
        let Some(style) =
            combo_selection(self.controls.style_combo).and_then(CrosshairStyle::from_index)
        else {
            return;
        };
        if let Some(outcome) = self.with_panel(|p| p.select_style(style, Trigger::User)) {
            self.follow_up(outcome);
        }
    }

    /// Open the image picker once the current notification has returned.
    fn follow_up(&self, outcome: StyleOutcome) {
        if outcome.prompt_for_image {
            unsafe {
                let _ = PostMessageW(Some(self.hwnd), WM_APP_PICK_IMAGE, WPARAM(0), LPARAM(0));
            }
        }
    }

    fn pick_image(&self) {
        let image_files = self.tr("Image Files");
        let filters = [FileFilter {
            description: &image_files,
            extensions: IMAGE_EXTENSIONS,
        }];
        let Some(path) = open_file(self.hwnd, &self.tr("Select image"), &filters) else {
            return;
        };
        self.with_panel(|p| {
            // Picking the same file again re-reads it
            p.overlay_mut().forget_images();
            p.choose_image(&path);
        });
        self.sync_appearance();
    }

    fn pick_color(&self) {
        let Some(initial) = self.with_panel(|p| p.config().color) else {
            return;
        };
        let mut custom = self.custom_colors.get();
        let picked = choose_color(self.hwnd, initial, &mut custom);
        self.custom_colors.set(custom);

        if let Some(color) = picked {
            self.with_panel(|p| p.set_color(color));
            self.sync_appearance();
        }
    }

    fn on_slider(&self, slider: HWND) {
        let id = unsafe { GetDlgCtrlID(slider) };
        let pos = slider_pos(slider);
        let value_label = HWND(unsafe { GetWindowLongPtrW(slider, GWLP_USERDATA) } as *mut _);
        if !value_label.is_invalid() {
            set_value_text(value_label, pos);
        }

        self.with_panel(|p| match id {
            ID_SIZE_SLIDER => p.set_size(pos),
            ID_THICKNESS_SLIDER => p.set_thickness(pos),
            ID_DOT_SLIDER => p.set_dot_size(pos),
            _ => {}
        });
    }

    // === Position ===

    fn on_position_edited(&self) {
        if self.syncing.get() {
            return;
        }
        let x = window_text(self.controls.x_edit);
        let y = window_text(self.controls.y_edit);
        // Fields are left as typed; a bad value just keeps the last good one
        self.with_panel(|p| p.set_position_text(&x, &y));
    }

    fn center(&self) {
        self.with_panel(|p| p.center());
        self.sync_position_fields();
    }

    /// Arrow keys anywhere in the panel nudge the crosshair, except inside
    /// combo boxes where they pick items.
    pub fn handle_key(&self, msg: &MSG) -> bool {
        if msg.message != WM_KEYDOWN {
            return false;
        }
        let in_panel = msg.hwnd == self.hwnd || unsafe { IsChild(self.hwnd, msg.hwnd) }.as_bool();
        if !in_panel || is_combo_part(msg.hwnd) {
            return false;
        }

        let key = msg.wParam.0 as u16;
        let direction = match key {
            k if k == VK_UP.0 => Nudge::Up,
            k if k == VK_DOWN.0 => Nudge::Down,
            k if k == VK_LEFT.0 => Nudge::Left,
            k if k == VK_RIGHT.0 => Nudge::Right,
            _ => return false,
        };
        self.with_panel(|p| p.nudge(direction));
        self.sync_position_fields();
        true
    }

    fn cursor_pos() -> Position {
        let mut pt = POINT::default();
        unsafe {
            let _ = GetCursorPos(&mut pt);
        }
        Position::new(pt.x, pt.y)
    }

    fn on_mouse_down(&self) {
        let cursor = Self::cursor_pos();
        let mut pad = RECT::default();
        unsafe {
            let _ = GetWindowRect(self.controls.drag_pad, &mut pad);
        }
        let inside = cursor.x >= pad.left
            && cursor.x < pad.right
            && cursor.y >= pad.top
            && cursor.y < pad.bottom;
        if !inside {
            return;
        }
        unsafe {
            SetCapture(self.hwnd);
        }
        self.with_panel(|p| p.begin_drag(cursor));
    }

    fn on_mouse_move(&self) {
        let cursor = Self::cursor_pos();
        if let Some(Some(_)) = self.with_panel(|p| p.drag_to(cursor)) {
            self.sync_position_fields();
        }
    }

    fn on_mouse_up(&self) {
        let was_dragging = self
            .with_panel(|p| {
                let dragging = p.is_dragging();
                p.end_drag();
                dragging
            })
            .unwrap_or(false);
        if was_dragging {
            unsafe {
                let _ = ReleaseCapture();
            }
        }
    }

    // === Presets ===

    fn on_preset_selected(&self) {
        let combo = self.controls.preset_combo;
        let Some(name) = combo_selection(combo).and_then(|i| combo_item_text(combo, i)) else {
            return;
        };
        if let Some(Some(outcome)) = self.with_panel(|p| p.load_preset(&name)) {
            self.sync_appearance();
            self.follow_up(outcome);
        }
    }

    fn save_preset(&self) {
        let Some(name) = self.typed_preset_name() else {
            return;
        };
        if let Some(Some(saved)) = self.with_panel(|p| p.save_preset(&name)) {
            self.refresh_presets(Some(saved.as_str()));
        }
    }

    fn delete_preset(&self) {
        let Some(name) = self.typed_preset_name() else {
            return;
        };
        if self.with_panel(|p| p.delete_preset(&name)) == Some(true) {
            self.refresh_presets(None);
            self.syncing(|| set_window_text(self.controls.preset_combo, ""));
        }
    }

    fn json_filter(&self) -> String {
        self.tr("JSON Files")
    }

    fn import_preset(&self) {
        let json_files = self.json_filter();
        let filters = [FileFilter {
            description: &json_files,
            extensions: &["json"],
        }];
        let Some(path) = open_file(self.hwnd, &self.tr("Import preset"), &filters) else {
            return;
        };
        match self.with_panel(|p| p.import_preset(&path)) {
            Some(Ok((name, outcome))) => {
                self.refresh_presets(Some(name.as_str()));
                self.sync_appearance();
                self.follow_up(outcome);
            }
            Some(Err(e)) => warn!(error = %format!("{e:#}"), "Preset import failed"),
            None => {}
        }
    }

    fn export_preset(&self) {
        let Some(name) = self.typed_preset_name() else {
            return;
        };
        let Some((exists, has_image)) =
            self.with_panel(|p| (p.presets().contains(&name), p.preset_references_image(&name)))
        else {
            return;
        };
        if !exists {
            return;
        }
        if has_image
            && !confirm_warning(
                self.hwnd,
                &self.tr("Share warning"),
                &self.tr("custom image export warning"),
            )
        {
            return;
        }

        let json_files = self.json_filter();
        let filters = [FileFilter {
            description: &json_files,
            extensions: &["json"],
        }];
        let Some(path) = save_file(
            self.hwnd,
            &self.tr("Share preset"),
            &filters,
            &suggested_file_name(&name),
            "json",
        ) else {
            return;
        };
        if let Some(Err(e)) = self.with_panel(|p| p.export_preset(&name, &path)) {
            warn!(error = %format!("{e:#}"), "Preset export failed");
        }
    }

    // === System ===

    fn toggle_autostart(&self) {
        match autostart::toggle() {
            Ok(enabled) => info!(enabled, "Autostart toggled"),
            Err(e) => {
                error!(error = %format!("{e:#}"), "Autostart toggle failed");
                show_error(
                    self.hwnd,
                    &self.tr("Error"),
                    &self.tr("Could not change the autostart setting"),
                    &format!("{e:#}"),
                );
            }
        }
        self.refresh_autostart_label();
    }

    fn relaunch(&self) {
        let (target, failure) = if self.options.elevated {
            (Relaunch::Unelevated, "Could not restart")
        } else {
            (Relaunch::Elevated, "Could not restart as administrator")
        };
        let path = self.options.settings_path.clone();
        let Some(result) =
            self.with_panel(|p| perform_relaunch(p, target, &path, &ShellLauncher))
        else {
            return;
        };

        match result {
            Ok(()) => {
                self.skip_save.set(true);
                unsafe {
                    let _ = DestroyWindow(self.hwnd);
                }
            }
            Err(e) => {
                error!(error = %format!("{e:#}"), ?target, "Relaunch failed");
                show_error(
                    self.hwnd,
                    &self.tr("Error"),
                    &self.tr(failure),
                    &format!("{e:#}"),
                );
            }
        }
    }

    fn hide_to_tray(&self) {
        let running = self
            .tray
            .borrow()
            .as_ref()
            .is_some_and(|t| !t.is_finished());
        if !running {
            match TrayHandle::spawn(self.hwnd, self.events.publisher(), self.options.lang) {
                Ok(tray) => *self.tray.borrow_mut() = Some(tray),
                Err(e) => {
                    warn!(error = %format!("{e:#}"), "Cannot hide to tray");
                    return;
                }
            }
        }
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_HIDE);
        }
    }

    fn stop_tray(&self) {
        if let Some(tray) = self.tray.borrow_mut().take() {
            tray.stop();
        }
    }

    fn drain_tray_events(&self) {
        for event in self.events.drain() {
            debug!(event = event.description(), "Handling tray event");
            self.stop_tray();
            match event {
                AppEvent::RestorePanel => unsafe {
                    let _ = ShowWindow(self.hwnd, SW_SHOW);
                    let _ = SetForegroundWindow(self.hwnd);
                },
                AppEvent::Quit => unsafe {
                    let _ = PostMessageW(Some(self.hwnd), WM_CLOSE, WPARAM(0), LPARAM(0));
                },
            }
            if event.is_terminal() {
                break;
            }
        }
    }

    /// Display settings changed: re-center reference and rebuild the overlay.
    fn rebuild_overlay(&self) {
        let center = primary_screen_center();
        let factory = &self.factory;
        self.with_panel(|p| {
            p.set_screen_center(center);
            match OverlayWindow::create(factory, p.position()) {
                Ok(overlay) => {
                    drop(p.replace_overlay(overlay));
                    info!("Overlay rebuilt after display change");
                }
                Err(e) => warn!(error = %format!("{e:#}"), "Failed to rebuild overlay"),
            }
        });
    }

    fn close(&self) {
        if !self.skip_save.get() {
            let path = &self.options.settings_path;
            self.with_panel(|p| p.save_settings(path));
        }
        self.stop_tray();
        unsafe {
            let _ = DestroyWindow(self.hwnd);
        }
    }

    fn on_command(&self, id: i32, code: u32) {
        match (id, code) {
            (ID_STYLE_COMBO, CBN_SELCHANGE) => self.on_style_selected(),
            (ID_IMAGE_BUTTON, _) => self.pick_image(),
            (ID_COLOR_BUTTON, _) => self.pick_color(),
            (ID_X_EDIT | ID_Y_EDIT, EN_CHANGE) => self.on_position_edited(),
            (ID_CENTER_BUTTON, _) => self.center(),
            (ID_PRESET_COMBO, CBN_SELCHANGE) => self.on_preset_selected(),
            (ID_SAVE_PRESET, _) => self.save_preset(),
            (ID_DELETE_PRESET, _) => self.delete_preset(),
            (ID_IMPORT_PRESET, _) => self.import_preset(),
            (ID_EXPORT_PRESET, _) => self.export_preset(),
            (ID_HIDE_TO_TRAY, _) => self.hide_to_tray(),
            (ID_AUTOSTART, _) => self.toggle_autostart(),
            (ID_ELEVATION, _) => self.relaunch(),
            _ => {}
        }
    }
}

/// Combo boxes, and the edit field inside an editable combo.
fn is_combo_part(hwnd: HWND) -> bool {
    let is_combo = |h: HWND| class_name(h).eq_ignore_ascii_case("ComboBox");
    is_combo(hwnd) || unsafe { GetParent(hwnd) }.is_ok_and(is_combo)
}

fn create_controls(b: &ControlBuilder, lang: Language, elevated: bool) -> Controls {
    let tr = |key: &str| tr_key(key, lang);
    let third = (INNER_RIGHT - INNER_LEFT - 8) / 3;

    // Style
    let mut y = MARGIN;
    b.group(MARGIN, y, GROUP_WIDTH, 86, &tr("Style"));
    b.label(INNER_LEFT, y + 20, 60, &tr("Type:"));
    let style_combo = b.dropdown_list(INNER_LEFT + 64, y + 20, 130, ID_STYLE_COMBO);
    for style in CrosshairStyle::ALL {
        combo_add(style_combo, style_label(style, lang));
    }
    let side_width = INNER_RIGHT - INNER_LEFT - 202;
    b.button(
        INNER_LEFT + 202,
        y + 20,
        side_width,
        &tr("Choose image..."),
        ID_IMAGE_BUTTON,
    );
    b.label(INNER_LEFT, y + 52, 60, &tr("Color:"));
    let color_swatch = b.swatch(INNER_LEFT + 64, y + 52, 130, ID_COLOR_SWATCH);
    b.button(
        INNER_LEFT + 202,
        y + 52,
        side_width,
        &tr("Choose..."),
        ID_COLOR_BUTTON,
    );

    // Size
    y += 94;
    b.group(MARGIN, y, GROUP_WIDTH, 124, &tr("Size"));
    let slider_row = |row: i32, key: &str, ids: (i32, i32), range: (i32, i32)| {
        let row_y = y + 20 + row * 34;
        b.label(INNER_LEFT, row_y, 84, &tr(key));
        let value = b.value_label(INNER_LEFT + 84, row_y, 36, ids.1);
        let slider = b.slider(
            INNER_LEFT + 124,
            row_y,
            INNER_RIGHT - INNER_LEFT - 124,
            ids.0,
        );
        init_slider(slider, range.0, range.1, range.0);
        link_value_label(slider, value);
        (slider, value)
    };
    let (size_slider, size_value) = slider_row(
        0,
        "Length",
        (ID_SIZE_SLIDER, ID_SIZE_VALUE),
        (MIN_SIZE, MAX_SIZE),
    );
    let (thickness_slider, thickness_value) = slider_row(
        1,
        "Thickness",
        (ID_THICKNESS_SLIDER, ID_THICKNESS_VALUE),
        (MIN_THICKNESS, MAX_THICKNESS),
    );
    let (dot_slider, dot_value) = slider_row(
        2,
        "Dot size",
        (ID_DOT_SLIDER, ID_DOT_VALUE),
        (MIN_DOT_SIZE, MAX_DOT_SIZE),
    );

    // Position
    y += 132;
    b.group(MARGIN, y, GROUP_WIDTH, 96, &tr("Position (arrow keys nudge)"));
    b.label(INNER_LEFT, y + 20, 20, "X:");
    let x_edit = b.edit(INNER_LEFT + 20, y + 20, 80, ID_X_EDIT);
    b.label(INNER_LEFT + 112, y + 20, 20, "Y:");
    let y_edit = b.edit(INNER_LEFT + 132, y + 20, 80, ID_Y_EDIT);
    b.button(
        INNER_LEFT + 224,
        y + 20,
        INNER_RIGHT - INNER_LEFT - 224,
        &tr("Center"),
        ID_CENTER_BUTTON,
    );
    let drag_pad = b.drag_pad(
        INNER_LEFT,
        y + 54,
        INNER_RIGHT - INNER_LEFT,
        30,
        &tr("Hold here and drag"),
        ID_DRAG_PAD,
    );

    // Presets
    y += 104;
    b.group(MARGIN, y, GROUP_WIDTH, 90, &tr("Presets"));
    b.label(INNER_LEFT, y + 20, 60, &tr("Preset:"));
    let preset_combo = b.editable_combo(
        INNER_LEFT + 64,
        y + 20,
        INNER_RIGHT - INNER_LEFT - 64,
        ID_PRESET_COMBO,
    );
    let quarter = (INNER_RIGHT - INNER_LEFT - 12) / 4;
    for (i, (key, id)) in [
        ("Save", ID_SAVE_PRESET),
        ("Delete", ID_DELETE_PRESET),
        ("Import", ID_IMPORT_PRESET),
        ("Share", ID_EXPORT_PRESET),
    ]
    .into_iter()
    .enumerate()
    {
        b.button(INNER_LEFT + i as i32 * (quarter + 4), y + 54, quarter, &tr(key), id);
    }

    // System
    y += 102;
    b.button(INNER_LEFT, y, third, &tr("Hide to tray"), ID_HIDE_TO_TRAY);
    let autostart_button = b.button(
        INNER_LEFT + third + 4,
        y,
        third,
        &tr("Autostart: off"),
        ID_AUTOSTART,
    );
    let elevation_key = if elevated {
        "Run unelevated"
    } else {
        "Run as administrator"
    };
    b.button(
        INNER_LEFT + 2 * (third + 4),
        y,
        third,
        &tr(elevation_key),
        ID_ELEVATION,
    );

    Controls {
        style_combo,
        color_swatch,
        size_slider,
        size_value,
        thickness_slider,
        thickness_value,
        dot_slider,
        dot_value,
        x_edit,
        y_edit,
        drag_pad,
        preset_combo,
        autostart_button,
    }
}

/// Strong reference to the window state stored in GWLP_USERDATA, if any.
unsafe fn window_state(hwnd: HWND) -> Option<Rc<PanelWindow>> {
    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const PanelWindow;
    if ptr.is_null() {
        return None;
    }
    // The window's own reference stays; this frame gets another one
    Rc::increment_strong_count(ptr);
    Some(Rc::from_raw(ptr))
}

unsafe extern "system" fn panel_wndproc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_NCDESTROY {
        let ptr = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) as *const PanelWindow;
        if !ptr.is_null() {
            drop(Rc::from_raw(ptr));
        }
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    }

    let Some(window) = window_state(hwnd) else {
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    };

    match msg {
        WM_COMMAND => {
            window.on_command(loword(wparam) as i32, hiword(wparam));
            LRESULT(0)
        }

        WM_HSCROLL => {
            let slider = hwnd_from_lparam(lparam);
            if !slider.is_invalid() {
                window.on_slider(slider);
            }
            LRESULT(0)
        }

        WM_LBUTTONDOWN => {
            window.on_mouse_down();
            LRESULT(0)
        }

        WM_MOUSEMOVE => {
            window.on_mouse_move();
            LRESULT(0)
        }

        WM_LBUTTONUP => {
            window.on_mouse_up();
            LRESULT(0)
        }

        WM_CAPTURECHANGED => {
            window.with_panel(|p| p.end_drag());
            LRESULT(0)
        }

        WM_APP_PICK_IMAGE => {
            window.pick_image();
            LRESULT(0)
        }

        WM_TRAY_EVENT => {
            window.drain_tray_events();
            LRESULT(0)
        }

        WM_DISPLAYCHANGE => {
            window.rebuild_overlay();
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }

        WM_CLOSE => {
            window.close();
            LRESULT(0)
        }

        WM_DESTROY => {
            PostQuitMessage(0);
            LRESULT(0)
        }

        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
