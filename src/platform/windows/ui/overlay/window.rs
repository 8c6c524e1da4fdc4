//! The click-through overlay window.
//!
//! A borderless, topmost, layered tool window exactly one canvas in size.
//! It never takes focus and never receives mouse input.

use anyhow::{Context, Result};
use tracing::{debug, info};
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Direct2D::ID2D1Factory;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, GetWindowLongPtrW, KillTimer, RegisterClassW,
    SetTimer, SetWindowLongPtrW, SetWindowPos, ShowWindow, GWL_EXSTYLE, HWND_TOPMOST,
    SWP_NOACTIVATE, SWP_NOSIZE, SW_SHOWNOACTIVATE, WM_NCHITTEST, WM_TIMER, WNDCLASSW,
    WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_EX_TRANSPARENT,
    WS_POPUP,
};

use super::renderer::Renderer;
use crate::model::constants::CLICK_THROUGH_REAPPLY_MS;
use crate::model::{CrosshairConfig, Position};
use crate::panel::OverlaySurface;
use crate::render::CanvasBounds;

const CLASS_NAME: PCWSTR = w!("ReticleOverlay");
const TIMER_CLICK_THROUGH: usize = 1;

/// Mark `hwnd` layered and transparent to mouse input.
///
/// Some window managers drop extended styles set during creation, so this
/// runs again shortly after the window first appears.
pub fn apply_click_through(hwnd: HWND) {
    unsafe {
        let ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
        SetWindowLongPtrW(
            hwnd,
            GWL_EXSTYLE,
            ex_style | (WS_EX_LAYERED.0 | WS_EX_TRANSPARENT.0) as isize,
        );
    }
}

/// Whether `hwnd` currently lets clicks through.
pub fn is_click_through(hwnd: HWND) -> bool {
    let required = (WS_EX_LAYERED.0 | WS_EX_TRANSPARENT.0) as isize;
    unsafe { GetWindowLongPtrW(hwnd, GWL_EXSTYLE) & required == required }
}

pub struct OverlayWindow {
    hwnd: HWND,
    renderer: Renderer,
    bounds: CanvasBounds,
}

impl OverlayWindow {
    /// Create and show the overlay centered on `position`. Nothing is drawn
    /// until the first [`OverlaySurface::redraw`].
    pub fn create(factory: &ID2D1Factory, position: Position) -> Result<Self> {
        unsafe {
            let instance = GetModuleHandleW(None).context("Failed to get module handle")?;

            let wc = WNDCLASSW {
                lpfnWndProc: Some(overlay_wndproc),
                hInstance: instance.into(),
                lpszClassName: CLASS_NAME,
                ..Default::default()
            };
            // Fails harmlessly when an earlier overlay already registered it
            RegisterClassW(&wc);

            let bounds = CanvasBounds::centered_on(position);
            let ex_style = WS_EX_LAYERED
                | WS_EX_TRANSPARENT
                | WS_EX_TOPMOST
                | WS_EX_TOOLWINDOW
                | WS_EX_NOACTIVATE;

            let hwnd = CreateWindowExW(
                ex_style,
                CLASS_NAME,
                w!("Reticle Overlay"),
                WS_POPUP,
                bounds.left,
                bounds.top,
                bounds.width,
                bounds.height,
                None,
                None,
                Some(instance.into()),
                None,
            )
            .context("Failed to create overlay window")?;

            apply_click_through(hwnd);
            SetTimer(Some(hwnd), TIMER_CLICK_THROUGH, CLICK_THROUGH_REAPPLY_MS, None);
            let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);

            info!(x = position.x, y = position.y, "Overlay window created");
            Ok(Self {
                hwnd,
                renderer: Renderer::new(factory.clone()),
                bounds,
            })
        }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Screen rectangle last requested for the window.
    pub fn bounds(&self) -> CanvasBounds {
        self.bounds
    }

    /// Drop decoded custom images; the next redraw reads them from disk.
    pub fn forget_images(&mut self) {
        self.renderer.forget_images();
    }
}

impl OverlaySurface for OverlayWindow {
    fn redraw(&mut self, config: &CrosshairConfig) {
        self.renderer.render(self.hwnd, config);
    }

    fn set_position(&mut self, position: Position) {
        self.bounds = CanvasBounds::centered_on(position);
        debug!(x = position.x, y = position.y, "Overlay moved");
        unsafe {
            // Re-assert topmost on every move, other topmost windows may have come up
            let _ = SetWindowPos(
                self.hwnd,
                Some(HWND_TOPMOST),
                self.bounds.left,
                self.bounds.top,
                0,
                0,
                SWP_NOSIZE | SWP_NOACTIVATE,
            );
        }
    }
}

impl Drop for OverlayWindow {
    fn drop(&mut self) {
        unsafe {
            let _ = DestroyWindow(self.hwnd);
        }
    }
}

extern "system" fn overlay_wndproc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe {
        match msg {
            // HTTRANSPARENT: hit-testing falls through to whatever is underneath
            WM_NCHITTEST => LRESULT(-1),

            WM_TIMER if wparam.0 == TIMER_CLICK_THROUGH => {
                apply_click_through(hwnd);
                let _ = KillTimer(Some(hwnd), TIMER_CLICK_THROUGH);
                debug!("Click-through reapplied");
                LRESULT(0)
            }

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}
