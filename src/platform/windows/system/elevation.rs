//! Privilege level and self-relaunch.

use anyhow::{bail, Context, Result};
use tracing::info;
use windows::core::{w, PCWSTR};
use windows::Win32::UI::Shell::{IsUserAnAdmin, ShellExecuteW};
use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;

use crate::launch::{ProcessLauncher, Relaunch};
use crate::platform::windows::ffi::{pcwstr, to_wide};

pub fn is_elevated() -> bool {
    unsafe { IsUserAnAdmin().as_bool() }
}

/// Relaunches through the shell: `runas` for an elevated copy, and
/// `explorer.exe` as the unprivileged launcher for a standard one.
pub struct ShellLauncher;

/// Arguments of this process, quoted for a command line.
fn current_args() -> String {
    std::env::args()
        .skip(1)
        .map(|a| {
            if a.is_empty() || a.contains([' ', '\t', '"']) {
                format!("\"{}\"", a.replace('"', "\\\""))
            } else {
                a
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_execute(verb: PCWSTR, file: &str, params: &str) -> Result<()> {
    let file_w = to_wide(file);
    let params_w = to_wide(params);
    let result = unsafe {
        ShellExecuteW(
            None,
            verb,
            pcwstr(&file_w),
            if params.is_empty() {
                PCWSTR::null()
            } else {
                pcwstr(&params_w)
            },
            PCWSTR::null(),
            SW_SHOWNORMAL,
        )
    };
    // Values above 32 mean success
    let code = result.0 as isize;
    if code <= 32 {
        bail!("ShellExecute failed for {:?} (code {})", file, code);
    }
    Ok(())
}

impl ProcessLauncher for ShellLauncher {
    fn launch(&self, target: Relaunch) -> Result<()> {
        let exe = std::env::current_exe().context("Failed to resolve executable path")?;
        let exe = exe.display().to_string();
        info!(?target, exe = %exe, "Starting replacement process");
        match target {
            Relaunch::Elevated => shell_execute(w!("runas"), &exe, &current_args()),
            Relaunch::Unelevated => {
                shell_execute(w!("open"), "explorer.exe", &format!("\"{}\"", exe))
            }
        }
    }
}
