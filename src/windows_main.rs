//! Windows entry point.
//!
//! Startup order matters: the elevation gate runs before any window exists,
//! so a forced-admin run never flashes an unelevated panel.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use windows::Win32::Graphics::Direct2D::{
    D2D1CreateFactory, ID2D1Factory, D2D1_FACTORY_TYPE_SINGLE_THREADED,
};
use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, TranslateMessage, MSG,
};

use reticle::launch::{decide_launch, LaunchDecision, ProcessLauncher, Relaunch};
use reticle::logging;
use reticle::model::CONFIG_FILENAME;
use reticle::platform::windows::system::{
    is_elevated, primary_screen_center, ui_language, ShellLauncher,
};
use reticle::platform::windows::ui::{
    init_common_controls, OverlayWindow, PanelOptions, PanelWindow,
};
use reticle::storage::{settings_dir, PersistedSettings};
use reticle::ControlPanel;

/// Main entry point for Windows.
pub fn run() {
    let dir = settings_dir();
    logging::init(&dir);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting Reticle");

    if let Err(e) = run_app(dir.join(CONFIG_FILENAME)) {
        error!(error = %format!("{e:#}"), "Reticle failed to start");
        std::process::exit(1);
    }
}

fn run_app(settings_path: PathBuf) -> Result<()> {
    let elevated = is_elevated();
    let force_admin = PersistedSettings::read_force_admin(&settings_path);
    if decide_launch(force_admin, elevated) == LaunchDecision::RelaunchElevated {
        // Whether the user accepts the prompt or not, this process is done
        match ShellLauncher.launch(Relaunch::Elevated) {
            Ok(()) => info!("Elevated instance requested, exiting"),
            Err(e) => warn!(error = %format!("{e:#}"), "Elevated relaunch did not start"),
        }
        return Ok(());
    }

    unsafe {
        CoInitializeEx(None, COINIT_APARTMENTTHREADED)
            .ok()
            .context("Failed to initialize COM")?;
    }
    init_common_controls();

    let result = run_ui(settings_path, elevated);

    unsafe { CoUninitialize() };
    info!("Reticle exited");
    result
}

fn run_ui(settings_path: PathBuf, elevated: bool) -> Result<()> {
    let factory: ID2D1Factory =
        unsafe { D2D1CreateFactory(D2D1_FACTORY_TYPE_SINGLE_THREADED, None) }
            .context("Failed to create Direct2D factory")?;

    let center = primary_screen_center();
    let settings = PersistedSettings::load_or_default(&settings_path, center);
    let overlay = OverlayWindow::create(&factory, settings.position)?;
    let panel = ControlPanel::new(settings, center, overlay);

    let window = PanelWindow::create(
        panel,
        factory,
        PanelOptions {
            settings_path,
            lang: ui_language(),
            elevated,
        },
    )?;

    unsafe {
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            if window.handle_key(&msg) {
                continue;
            }
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    // Last reference: drops the overlay window with it
    drop(window);
    Ok(())
}
