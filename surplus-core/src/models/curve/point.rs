/// A representation of a sample on a supply or demand schedule
///
/// Each point consists of:
/// - A quantity (cumulative units offered or demanded)
/// - A price (value per unit)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// The quantity coordinate
    pub quantity: f64,
    /// The price coordinate
    pub price: f64,
}

impl Point {
    /// Create a new sample
    pub const fn new(quantity: f64, price: f64) -> Self {
        Self { quantity, price }
    }
}

impl From<(f64, f64)> for Point {
    fn from((quantity, price): (f64, f64)) -> Self {
        Self { quantity, price }
    }
}

impl From<Point> for crate::models::geometry::Point {
    fn from(value: Point) -> Self {
        Self::new(value.quantity, value.price)
    }
}
