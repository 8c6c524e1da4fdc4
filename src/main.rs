// No console window in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(target_os = "windows")]
mod windows_main;

fn main() {
    #[cfg(target_os = "windows")]
    windows_main::run();

    #[cfg(not(target_os = "windows"))]
    {
        reticle::logging::init_stderr_only();
        tracing::error!("Reticle runs on Windows only: the overlay is a Win32 layered window");
        std::process::exit(1);
    }
}
