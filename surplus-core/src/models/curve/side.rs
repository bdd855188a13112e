use crate::models::{Color, Colors, Labels};
use std::fmt;

/// Which side of the market a curve describes.
///
/// The side decides how curves are merged: supply is ranked by ascending price
/// (cheapest units are produced first), demand by descending price (units with
/// the highest willingness to pay are served first).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Side {
    /// Sellers; the integral of a supply curve is a cost
    Supply,
    /// Buyers; the integral of a demand curve is a utility
    Demand,
}

impl Side {
    /// The default display name of a curve on this side
    pub fn name(&self) -> &'static str {
        match self {
            Self::Supply => "Supply Curve",
            Self::Demand => "Demand Curve",
        }
    }

    /// The default label of the integral of a curve on this side
    pub fn integral_name(&self) -> &'static str {
        match self {
            Self::Supply => Labels::COST,
            Self::Demand => Labels::UTILITY,
        }
    }

    /// The default color of a curve on this side
    pub fn color(&self) -> Color {
        match self {
            Self::Supply => Colors::SUPPLY,
            Self::Demand => Colors::DEMAND,
        }
    }

    /// Whether increments are merged in ascending price order
    pub fn ascending(&self) -> bool {
        matches!(self, Self::Supply)
    }

    /// The price at zero quantity of an aggregate of curves starting at `prices`.
    ///
    /// Supply starts at the cheapest first price, demand at the dearest one.
    /// Returns `None` if there are no prices.
    pub fn zero_price(&self, prices: impl IntoIterator<Item = f64>) -> Option<f64> {
        let prices = prices.into_iter();
        match self {
            Self::Supply => prices.reduce(f64::min),
            Self::Demand => prices.reduce(f64::max),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supply => f.write_str("supply"),
            Self::Demand => f.write_str("demand"),
        }
    }
}
