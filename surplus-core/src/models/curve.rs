mod interpolation;
mod point;
mod side;

pub use interpolation::Interpolation;
pub use point::Point;
pub use side::Side;

use crate::{
    grid::arange_closed,
    models::{Color, LineStyle},
};

/// A supply or demand schedule: an ordered list of `(quantity, price)` samples
/// together with the metadata needed to draw it.
///
/// Curves must be:
/// - Non-empty
/// - Finite (no NaN or infinite coordinates)
/// - Ordered by non-decreasing quantity (equal quantities encode a vertical jump)
///
/// Prices are unconstrained: aggregation ranks the increments by price anyway.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "CurveDto", into = "CurveDto")
)]
pub struct Curve {
    side: Side,
    points: Vec<Point>,
    name: String,
    integral_name: String,
    color: Color,
    line: LineStyle,
    interpolation: Interpolation,
}

impl Curve {
    /// Creates a new curve with the defaults of `side`, validating the points
    pub fn new(side: Side, points: Vec<Point>) -> Result<Self, CurveError> {
        validate(&points)?;
        Ok(Self {
            side,
            points,
            name: side.name().to_owned(),
            integral_name: side.integral_name().to_owned(),
            color: side.color(),
            line: LineStyle::Solid,
            interpolation: Interpolation::Step,
        })
    }

    /// Creates a new supply curve
    pub fn supply(points: Vec<Point>) -> Result<Self, CurveError> {
        Self::new(Side::Supply, points)
    }

    /// Creates a new demand curve
    pub fn demand(points: Vec<Point>) -> Result<Self, CurveError> {
        Self::new(Side::Demand, points)
    }

    /// Replace the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the integral label. The placeholder `{name}` is substituted
    /// with the curve's name when the label is read.
    pub fn with_integral_name(mut self, integral_name: impl Into<String>) -> Self {
        self.integral_name = integral_name.into();
        self
    }

    /// Replace the color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Replace the line style
    pub fn with_line(mut self, line: LineStyle) -> Self {
        self.line = line;
        self
    }

    /// Replace the interpolation
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Replace the samples, keeping all metadata
    pub fn with_points(self, points: Vec<Point>) -> Result<Self, CurveError> {
        validate(&points)?;
        Ok(Self { points, ..self })
    }

    /// The side of the market
    pub fn side(&self) -> Side {
        self.side
    }

    /// The samples
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The label of the integral, with `{name}` substituted
    pub fn integral_name(&self) -> String {
        self.integral_name.replace("{name}", &self.name)
    }

    /// The color
    pub fn color(&self) -> Color {
        self.color
    }

    /// The line style
    pub fn line(&self) -> LineStyle {
        self.line
    }

    /// The interpolation
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Whether the curve is a step function
    pub fn is_stepped(&self) -> bool {
        self.interpolation == Interpolation::Step
    }

    /// The quantity coordinates
    pub fn quantities(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|point| point.quantity)
    }

    /// The price coordinates
    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|point| point.price)
    }

    /// Returns the quantity interval over which the curve is defined
    pub fn domain(&self) -> (f64, f64) {
        // Validation guarantees at least one point, sorted by quantity
        (
            self.points[0].quantity,
            self.points[self.points.len() - 1].quantity,
        )
    }

    /// The price at quantity `q`, or `None` outside the domain
    pub fn evaluate(&self, q: f64) -> Option<f64> {
        self.interpolation.evaluate(&self.points, q)
    }

    /// Resample the curve every `step` across its domain.
    ///
    /// Each sample takes the interpolated price, so a step curve stays a step
    /// curve, but each of its units is now split into increments of `step`.
    /// Returns a clone if `step` is not a positive number.
    pub fn upsampled(&self, step: f64) -> Self {
        let (lo, hi) = self.domain();
        let points = arange_closed(lo, hi, step)
            .into_iter()
            .filter_map(|q| self.evaluate(q).map(|price| Point::new(q, price)))
            .collect::<Vec<_>>();

        if points.is_empty() {
            self.clone()
        } else {
            Self {
                points,
                ..self.clone()
            }
        }
    }
}

fn validate(points: &[Point]) -> Result<(), CurveError> {
    if points.is_empty() {
        return Err(CurveError::Empty);
    }

    let mut prev = f64::NEG_INFINITY;
    for point in points {
        if point.quantity.is_nan() || point.price.is_nan() {
            return Err(CurveError::NaN);
        }
        if point.quantity.is_infinite() || point.price.is_infinite() {
            return Err(CurveError::Infinity);
        }
        if point.quantity < prev {
            return Err(CurveError::NonMonotone);
        }
        prev = point.quantity;
    }

    Ok(())
}

/// DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug)]
pub struct CurveDto {
    /// The side of the market
    pub side: Side,
    /// The samples
    pub points: Vec<Point>,
    /// The display name, defaulting to the side's name
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// The integral label, defaulting to the side's label
    #[cfg_attr(feature = "serde", serde(default))]
    pub integral_name: Option<String>,
    /// The color, defaulting to the side's color
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Option<Color>,
    /// The line style, defaulting to solid
    #[cfg_attr(feature = "serde", serde(default))]
    pub line: Option<LineStyle>,
    /// The interpolation, defaulting to steps
    #[cfg_attr(feature = "serde", serde(default))]
    pub interpolation: Option<Interpolation>,
}

impl TryFrom<CurveDto> for Curve {
    type Error = CurveError;

    fn try_from(value: CurveDto) -> Result<Self, Self::Error> {
        let mut curve = Curve::new(value.side, value.points)?;
        if let Some(name) = value.name {
            curve = curve.with_name(name);
        }
        if let Some(integral_name) = value.integral_name {
            curve = curve.with_integral_name(integral_name);
        }
        if let Some(color) = value.color {
            curve = curve.with_color(color);
        }
        if let Some(line) = value.line {
            curve = curve.with_line(line);
        }
        if let Some(interpolation) = value.interpolation {
            curve = curve.with_interpolation(interpolation);
        }
        Ok(curve)
    }
}

impl From<Curve> for CurveDto {
    fn from(value: Curve) -> Self {
        CurveDto {
            side: value.side,
            points: value.points,
            name: Some(value.name),
            integral_name: Some(value.integral_name),
            color: Some(value.color),
            line: Some(value.line),
            interpolation: Some(value.interpolation),
        }
    }
}

/// Errors that can occur when creating or validating a Curve
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// Error when no points are provided
    #[error("No points provided")]
    Empty,
    /// Error when any coordinate value is NaN
    #[error("NaN value encountered")]
    NaN,
    /// Error when a point has infinite quantity or price
    #[error("Quantities and prices cannot be infinite")]
    Infinity,
    /// Error when quantities decrease
    #[error("Points are not ordered by ascending quantity")]
    NonMonotone,
}
