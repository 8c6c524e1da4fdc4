//! UI components for Windows.

pub mod dialogs;
pub mod overlay;
pub mod panel;
pub mod tray;

pub use overlay::*;
pub use panel::*;
pub use tray::*;
