use super::{Point, Rotatable};

/// A straight line between two points
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Where the segment starts; rotations pivot here
    pub start: Point,
    /// Where the segment ends
    pub end: Point,
}

impl Segment {
    /// Create a segment between two points
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// A segment of `length` leaving `origin` at `angle` radians
    pub fn from_polar(origin: Point, length: f64, angle: f64) -> Self {
        Self {
            start: origin,
            end: Point::new(
                origin.x + length * angle.cos(),
                origin.y + length * angle.sin(),
            ),
        }
    }

    /// A horizontal segment at height `y` from `x1` to `x2`
    pub fn horizontal(y: f64, x1: f64, x2: f64) -> Self {
        Self::new((x1, y), (x2, y))
    }

    /// A vertical segment at `x` from `y1` to `y2`
    pub fn vertical(x: f64, y1: f64, y2: f64) -> Self {
        Self::new((x, y1), (x, y2))
    }

    /// The Euclidean length
    pub fn length(&self) -> f64 {
        self.dx().hypot(self.dy())
    }

    /// The direction from start to end, in radians
    pub fn angle(&self) -> f64 {
        self.dy().atan2(self.dx())
    }

    /// The midpoint
    pub fn mid(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    fn dx(&self) -> f64 {
        self.end.x - self.start.x
    }

    fn dy(&self) -> f64 {
        self.end.y - self.start.y
    }
}

impl Rotatable for Segment {
    /// Rotate the end about the start
    fn rotated(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            start: self.start,
            end: Point::new(
                self.start.x + self.dx() * cos - self.dy() * sin,
                self.start.y + self.dy() * cos + self.dx() * sin,
            ),
        }
    }
}

/// A segment drawn with an arrow head at its end.
///
/// Axes are drawn as arrows, and arrows are otherwise used to point at parts of
/// a diagram.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Arrow(pub Segment);

impl Arrow {
    /// Create an arrow from `start` pointing at `end`
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self(Segment::new(start, end))
    }

    /// An arrow of `length` leaving `origin` at `angle` radians
    pub fn from_polar(origin: Point, length: f64, angle: f64) -> Self {
        Self(Segment::from_polar(origin, length, angle))
    }

    /// A horizontal arrow at height `y` from `x1` to `x2`
    pub fn horizontal(y: f64, x1: f64, x2: f64) -> Self {
        Self(Segment::horizontal(y, x1, x2))
    }

    /// A vertical arrow at `x` from `y1` to `y2`
    pub fn vertical(x: f64, y1: f64, y2: f64) -> Self {
        Self(Segment::vertical(x, y1, y2))
    }

    /// The underlying segment
    pub fn segment(&self) -> &Segment {
        &self.0
    }

    /// The tail of the arrow
    pub fn start(&self) -> Point {
        self.0.start
    }

    /// The tip of the arrow
    pub fn end(&self) -> Point {
        self.0.end
    }
}

impl Rotatable for Arrow {
    fn rotated(&self, angle: f64) -> Self {
        Self(self.0.rotated(angle))
    }
}
