use super::{Point, Rotatable, Segment};
use crate::grid::linspace;

/// A circular arc around a vertex, typically marking an angle between two segments
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    /// The center of the arc
    pub vertex: Point,
    /// Where the arc starts, in radians
    pub start_angle: f64,
    /// Where the arc ends, in radians
    pub end_angle: f64,
    /// The radius the arc is drawn at
    pub radius: f64,
    /// The radius its label is placed at
    pub label_radius: f64,
}

impl Arc {
    /// The default drawing radius
    pub const RADIUS: f64 = 0.4;
    /// The default label radius
    pub const LABEL_RADIUS: f64 = 0.55;
    /// The default number of samples when drawing
    pub const SAMPLES: usize = 50;

    /// An arc with the default radii
    pub fn new(vertex: Point, start_angle: f64, end_angle: f64) -> Self {
        Self {
            vertex,
            start_angle,
            end_angle,
            radius: Self::RADIUS,
            label_radius: Self::LABEL_RADIUS,
        }
    }

    /// The arc at `vertex` sweeping from the direction of `start` to that of `end`
    pub fn from_vertex_start_end(vertex: Point, start: Point, end: Point) -> Self {
        Self::new(
            vertex,
            Segment::new(vertex, start).angle(),
            Segment::new(vertex, end).angle(),
        )
    }

    /// Replace both radii
    pub fn with_radii(self, radius: f64, label_radius: f64) -> Self {
        Self {
            radius,
            label_radius,
            ..self
        }
    }

    /// The label anchor: halfway along the arc, at the label radius
    pub fn mid(&self) -> Point {
        let angle = (self.start_angle + self.end_angle) / 2.0;
        Point::new(
            self.vertex.x + self.label_radius * angle.cos(),
            self.vertex.y + self.label_radius * angle.sin(),
        )
    }

    /// `n` evenly spaced angles from start to end
    pub fn angles(&self, n: usize) -> Vec<f64> {
        linspace(self.start_angle, self.end_angle, n)
    }

    /// `n` points along the arc at the drawing radius
    pub fn points(&self, n: usize) -> Vec<Point> {
        self.angles(n)
            .into_iter()
            .map(|angle| {
                Point::new(
                    self.vertex.x + self.radius * angle.cos(),
                    self.vertex.y + self.radius * angle.sin(),
                )
            })
            .collect()
    }
}

impl Rotatable for Arc {
    fn rotated(&self, angle: f64) -> Self {
        Self {
            start_angle: self.start_angle + angle,
            end_angle: self.end_angle + angle,
            ..*self
        }
    }
}
