//! Platform-specific implementations.
//!
//! Only Windows has an overlay and control panel implementation; the rest
//! of the crate is platform independent.

#[cfg(target_os = "windows")]
pub mod windows;

// Re-export the current platform's modules for convenience
#[cfg(target_os = "windows")]
pub use windows::*;
