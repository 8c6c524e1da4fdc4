//! Control panel window.

mod controls;
pub mod window;

pub use controls::init_common_controls;
pub use window::{PanelOptions, PanelWindow};
