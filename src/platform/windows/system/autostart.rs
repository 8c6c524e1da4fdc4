//! Launch-at-login through the per-user `Run` registry key.
//!
//! The value is named after the app and holds the quoted path of the
//! running executable.

use std::ffi::c_void;

use anyhow::{Context, Result};
use tracing::info;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::ERROR_FILE_NOT_FOUND;
use windows::Win32::System::Registry::{
    RegDeleteKeyValueW, RegGetValueW, RegSetKeyValueW, HKEY_CURRENT_USER, REG_SZ, RRF_RT_REG_SZ,
};

use crate::model::APP_NAME;
use crate::platform::windows::ffi::{pcwstr, to_wide};

const RUN_KEY: PCWSTR = w!("Software\\Microsoft\\Windows\\CurrentVersion\\Run");

/// Whether the autostart value exists.
pub fn is_enabled() -> bool {
    let name = to_wide(APP_NAME);
    unsafe {
        RegGetValueW(
            HKEY_CURRENT_USER,
            RUN_KEY,
            pcwstr(&name),
            RRF_RT_REG_SZ,
            None,
            None,
            None,
        )
        .is_ok()
    }
}

/// Register the current executable to run at login.
pub fn enable() -> Result<()> {
    let exe = std::env::current_exe().context("Failed to resolve executable path")?;
    let data = to_wide(&format!("\"{}\"", exe.display()));
    let name = to_wide(APP_NAME);
    unsafe {
        RegSetKeyValueW(
            HKEY_CURRENT_USER,
            RUN_KEY,
            pcwstr(&name),
            REG_SZ.0,
            Some(data.as_ptr() as *const c_void),
            (data.len() * std::mem::size_of::<u16>()) as u32,
        )
        .ok()
        .context("Failed to write autostart registry value")?;
    }
    info!(exe = %exe.display(), "Autostart enabled");
    Ok(())
}

/// Remove the autostart value. Already absent counts as success.
pub fn disable() -> Result<()> {
    let name = to_wide(APP_NAME);
    let status = unsafe { RegDeleteKeyValueW(HKEY_CURRENT_USER, RUN_KEY, pcwstr(&name)) };
    if status != ERROR_FILE_NOT_FOUND {
        status
            .ok()
            .context("Failed to delete autostart registry value")?;
    }
    info!("Autostart disabled");
    Ok(())
}

/// Flip the registration. Returns the new state.
pub fn toggle() -> Result<bool> {
    if is_enabled() {
        disable()?;
        Ok(false)
    } else {
        enable()?;
        Ok(true)
    }
}
