//! Windows-specific implementation using Win32 API and Direct2D.
//!
//! This module contains all Windows-specific code:
//! - Small FFI helpers (wide strings, window text)
//! - UI components (click-through overlay, control panel, tray icon, dialogs)
//! - System integration (autostart registry value, elevation relaunch)

pub mod ffi;
pub mod system;
pub mod ui;

// Re-export commonly used items
pub use system::*;
pub use ui::*;
