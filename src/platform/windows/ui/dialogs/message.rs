//! Blocking message boxes.

use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    MessageBoxW, IDOK, MB_ICONERROR, MB_ICONWARNING, MB_OK, MB_OKCANCEL,
};

use crate::platform::windows::ffi::{pcwstr, to_wide};

/// Show an error with `detail` appended on its own line.
pub fn show_error(owner: HWND, title: &str, message: &str, detail: &str) {
    let text = if detail.is_empty() {
        message.to_string()
    } else {
        format!("{message}:\n{detail}")
    };
    let title_wide = to_wide(title);
    let text_wide = to_wide(&text);

    unsafe {
        MessageBoxW(
            Some(owner),
            pcwstr(&text_wide),
            pcwstr(&title_wide),
            MB_OK | MB_ICONERROR,
        );
    }
}

/// OK / Cancel warning. Returns true on OK.
pub fn confirm_warning(owner: HWND, title: &str, message: &str) -> bool {
    let title_wide = to_wide(title);
    let text_wide = to_wide(message);

    unsafe {
        MessageBoxW(
            Some(owner),
            pcwstr(&text_wide),
            pcwstr(&title_wide),
            MB_OKCANCEL | MB_ICONWARNING,
        ) == IDOK
    }
}
