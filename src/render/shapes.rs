//! What the overlay draws, independent of the graphics API.
//!
//! A [`CrosshairConfig`] becomes a list of [`Shape`]s in canvas coordinates;
//! the platform renderer only has to draw each shape as given.

use std::path::PathBuf;

use crate::model::constants::CANVAS_SIZE;
use crate::model::{CrosshairConfig, CrosshairStyle, Position};

/// Point in canvas pixels (origin at the canvas top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Straight stroke with flat ends.
    Line { from: Point, to: Point, width: f32 },
    /// Filled circle.
    Disc { center: Point, diameter: f32 },
    /// Unfilled circle.
    Ring {
        center: Point,
        diameter: f32,
        width: f32,
    },
    /// Image drawn at native size, centered on `center`.
    Image { path: PathBuf, center: Point },
}

/// Center of the overlay canvas.
pub fn canvas_center() -> Point {
    let half = (CANVAS_SIZE / 2) as f32;
    Point::new(half, half)
}

/// Shapes for `config`, in drawing order.
///
/// A custom style without an image path yields nothing.
pub fn plan(config: &CrosshairConfig) -> Vec<Shape> {
    let c = canvas_center();
    let mut shapes = Vec::new();

    if config.style.draws_cross() {
        let half = config.size as f32 / 2.0;
        let width = config.thickness as f32;
        shapes.push(Shape::Line {
            from: Point::new(c.x - half, c.y),
            to: Point::new(c.x + half, c.y),
            width,
        });
        shapes.push(Shape::Line {
            from: Point::new(c.x, c.y - half),
            to: Point::new(c.x, c.y + half),
            width,
        });
    }

    if config.style.draws_dot() {
        shapes.push(Shape::Disc {
            center: c,
            diameter: config.dot_size as f32,
        });
    }

    match config.style {
        CrosshairStyle::Circle => shapes.push(Shape::Ring {
            center: c,
            diameter: config.size as f32,
            width: config.thickness as f32,
        }),
        CrosshairStyle::Custom => {
            if let Some(path) = &config.image_path {
                shapes.push(Shape::Image {
                    path: path.clone(),
                    center: c,
                });
            }
        }
        _ => {}
    }

    shapes
}

/// Screen rectangle of the overlay window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasBounds {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl CanvasBounds {
    /// Bounds that put the canvas center on `center`.
    pub fn centered_on(center: Position) -> Self {
        let half = CANVAS_SIZE / 2;
        Self {
            left: center.x.saturating_sub(half),
            top: center.y.saturating_sub(half),
            width: CANVAS_SIZE,
            height: CANVAS_SIZE,
        }
    }

    pub fn center(&self) -> Position {
        Position::new(self.left + self.width / 2, self.top + self.height / 2)
    }
}

/// Top-left pixel of a `width` x `height` image centered on `center`.
pub fn image_origin(center: Point, width: u32, height: u32) -> Point {
    Point::new(
        center.x - (width / 2) as f32,
        center.y - (height / 2) as f32,
    )
}
