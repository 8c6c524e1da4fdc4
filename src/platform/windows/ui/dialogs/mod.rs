//! Common dialogs used by the control panel.

mod color_dialog;
mod file_dialog;
mod message;

pub use color_dialog::*;
pub use file_dialog::*;
pub use message::*;
