//! Overlay window and its Direct2D renderer.

pub mod renderer;
pub mod window;

pub use renderer::Renderer;
pub use window::{apply_click_through, is_click_through, OverlayWindow};
