//! Application domain model.
//!
//! This module contains pure business logic (no FFI dependencies)
//! including the crosshair configuration, position, presets and constants.
//!
//! Persistence lives in [`crate::storage`], drawing in [`crate::render`].

pub mod color;
pub mod constants;
pub mod crosshair;
pub mod position;
pub mod preset;

pub use color::Rgb;
pub use constants::*;
pub use crosshair::{CrosshairConfig, CrosshairStyle};
pub use position::{parse_coordinate, Nudge, Position};
pub use preset::Presets;
