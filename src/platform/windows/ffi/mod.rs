//! Small helpers around Win32 string and message conventions.

use windows::core::PCWSTR;
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    GetClassNameW, GetWindowTextLengthW, GetWindowTextW, SetWindowTextW,
};

/// NUL-terminated UTF-16 copy of `s`.
pub fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// UTF-16 buffer up to the first NUL, lossily decoded.
pub fn from_wide(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

/// Pointer view of a NUL-terminated wide buffer. `buf` must outlive the use.
pub fn pcwstr(buf: &[u16]) -> PCWSTR {
    PCWSTR(buf.as_ptr())
}

pub fn loword(wparam: WPARAM) -> u32 {
    (wparam.0 & 0xFFFF) as u32
}

pub fn hiword(wparam: WPARAM) -> u32 {
    ((wparam.0 >> 16) & 0xFFFF) as u32
}

/// Child window handle carried in a notification's LPARAM.
pub fn hwnd_from_lparam(lparam: LPARAM) -> HWND {
    HWND(lparam.0 as *mut _)
}

pub fn window_text(hwnd: HWND) -> String {
    unsafe {
        let len = GetWindowTextLengthW(hwnd);
        if len <= 0 {
            return String::new();
        }
        let mut buf = vec![0u16; len as usize + 1];
        let copied = GetWindowTextW(hwnd, &mut buf);
        String::from_utf16_lossy(&buf[..copied.max(0) as usize])
    }
}

pub fn set_window_text(hwnd: HWND, text: &str) {
    let wide = to_wide(text);
    unsafe {
        let _ = SetWindowTextW(hwnd, pcwstr(&wide));
    }
}

pub fn class_name(hwnd: HWND) -> String {
    let mut buf = [0u16; 64];
    let len = unsafe { GetClassNameW(hwnd, &mut buf) };
    String::from_utf16_lossy(&buf[..len.max(0) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_strings_are_nul_terminated() {
        assert_eq!(to_wide("ab"), vec![0x61, 0x62, 0]);
        assert_eq!(from_wide(&to_wide("准心")), "准心");
    }

    #[test]
    fn words_split_wparam() {
        let wparam = WPARAM((3 << 16) | 1042);
        assert_eq!(loword(wparam), 1042);
        assert_eq!(hiword(wparam), 3);
    }
}
