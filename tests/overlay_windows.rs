//! Overlay window behaviour against the real window manager.
#![cfg(target_os = "windows")]

use reticle::model::constants::CANVAS_SIZE;
use reticle::model::{CrosshairConfig, CrosshairStyle, Position};
use reticle::platform::windows::ui::{is_click_through, OverlayWindow};
use reticle::OverlaySurface;
use windows::Win32::Foundation::RECT;
use windows::Win32::Graphics::Direct2D::{
    D2D1CreateFactory, ID2D1Factory, D2D1_FACTORY_TYPE_SINGLE_THREADED,
};
use windows::Win32::UI::WindowsAndMessaging::GetWindowRect;

fn factory() -> ID2D1Factory {
    unsafe { D2D1CreateFactory(D2D1_FACTORY_TYPE_SINGLE_THREADED, None) }
        .expect("Direct2D factory")
}

fn window_rect(overlay: &OverlayWindow) -> RECT {
    let mut rect = RECT::default();
    unsafe { GetWindowRect(overlay.hwnd(), &mut rect) }.expect("window rect");
    rect
}

#[test]
fn overlay_is_click_through_from_creation() {
    let overlay = OverlayWindow::create(&factory(), Position::new(400, 300)).unwrap();
    assert!(is_click_through(overlay.hwnd()));
}

#[test]
fn overlay_is_centered_on_position() {
    let mut overlay = OverlayWindow::create(&factory(), Position::new(400, 300)).unwrap();
    overlay.redraw(&CrosshairConfig {
        style: CrosshairStyle::Both,
        ..Default::default()
    });

    let rect = window_rect(&overlay);
    assert_eq!(rect.right - rect.left, CANVAS_SIZE);
    assert_eq!(rect.left, 400 - CANVAS_SIZE / 2);
    assert_eq!(rect.top, 300 - CANVAS_SIZE / 2);

    overlay.set_position(Position::new(-50, 700));
    let rect = window_rect(&overlay);
    assert_eq!(rect.left, -50 - CANVAS_SIZE / 2);
    assert_eq!(rect.top, 700 - CANVAS_SIZE / 2);
    assert_eq!(overlay.bounds().center(), Position::new(-50, 700));

    // Redrawing must not move the window
    overlay.redraw(&CrosshairConfig::default());
    assert_eq!(window_rect(&overlay).left, -50 - CANVAS_SIZE / 2);
}
