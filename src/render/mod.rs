//! Rendering plan and custom image decoding (pure Rust, no FFI).

pub mod image;
pub mod shapes;

pub use self::image::{load_image, DecodedImage, ImageCache};
pub use shapes::{canvas_center, image_origin, plan, CanvasBounds, Point, Shape};
