//! Geometric primitives for annotating diagrams.
//!
//! These are plain values in data coordinates. They know how to move and rotate;
//! drawing them is the renderer's concern.

mod arc;
mod point;
mod segment;

pub use arc::Arc;
pub use point::Point;
pub use segment::{Arrow, Segment};

/// Shapes that can be rotated by an angle in radians (counter-clockwise).
pub trait Rotatable {
    /// A copy of the shape rotated by `angle`
    fn rotated(&self, angle: f64) -> Self;
}
