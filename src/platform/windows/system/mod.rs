//! OS integration outside the windows themselves.

pub mod autostart;
pub mod elevation;

use windows::Win32::Globalization::GetUserDefaultUILanguage;
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

use crate::model::Position;
use crate::Language;

pub use elevation::{is_elevated, ShellLauncher};

/// Center of the primary monitor in screen pixels.
pub fn primary_screen_center() -> Position {
    unsafe { Position::center_of(GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) }
}

/// UI language from the user's display language.
pub fn ui_language() -> Language {
    Language::from_langid(unsafe { GetUserDefaultUILanguage() })
}
