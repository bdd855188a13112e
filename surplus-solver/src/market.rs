use crate::{CompositeError, Integral, Welfare, composite::merge};
use surplus_core::{
    grid::arange,
    models::{Curve, Point, SamplingConfig, Side},
};

/// A market: the supply curves and demand curves of its participants.
///
/// The market aggregates each side into a composite curve, integrates the
/// composites into total cost and total utility, and finds the quantity that
/// maximizes welfare (utility minus cost).
///
/// Participants are identified by their curve names, which must be unique for
/// the per-participant operations (`mask`) to be well defined.
#[derive(Clone, Debug, PartialEq)]
pub struct SupplyDemand {
    supply_curves: Vec<Curve>,
    demand_curves: Vec<Curve>,
    equilibrium_price: Option<f64>,
    sampling: SamplingConfig,
}

impl SupplyDemand {
    /// Creates a new market, checking that each curve is on the side it is given for
    pub fn new(supply_curves: Vec<Curve>, demand_curves: Vec<Curve>) -> Result<Self, MarketError> {
        for (curves, expected) in [(&supply_curves, Side::Supply), (&demand_curves, Side::Demand)] {
            if let Some(curve) = curves.iter().find(|curve| curve.side() != expected) {
                return Err(MarketError::WrongSide {
                    name: curve.name().to_owned(),
                    expected,
                });
            }
        }

        Ok(Self {
            supply_curves,
            demand_curves,
            equilibrium_price: None,
            sampling: SamplingConfig::default(),
        })
    }

    /// Set the price at which the market is drawn clearing.
    ///
    /// The welfare optimum determines the equilibrium quantity, but with step
    /// curves any price inside the crossing step clears the market, so the
    /// price to annotate is given rather than computed.
    pub fn with_equilibrium_price(mut self, price: f64) -> Self {
        self.equilibrium_price = Some(price);
        self
    }

    /// Replace the sampling configuration
    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// The supply curves, in input order
    pub fn supply_curves(&self) -> &[Curve] {
        &self.supply_curves
    }

    /// The demand curves, in input order
    pub fn demand_curves(&self) -> &[Curve] {
        &self.demand_curves
    }

    /// The curves of one side
    pub fn curves_of(&self, side: Side) -> &[Curve] {
        match side {
            Side::Supply => &self.supply_curves,
            Side::Demand => &self.demand_curves,
        }
    }

    /// All curves, supply first
    pub fn curves(&self) -> impl Iterator<Item = &Curve> {
        self.supply_curves.iter().chain(self.demand_curves.iter())
    }

    /// The annotated equilibrium price, if any
    pub fn equilibrium_price(&self) -> Option<f64> {
        self.equilibrium_price
    }

    /// The sampling configuration
    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    /// Every curve resampled at the sampling step
    pub fn upsampled(&self) -> Self {
        let step = self.sampling.step;
        Self {
            supply_curves: self.supply_curves.iter().map(|c| c.upsampled(step)).collect(),
            demand_curves: self.demand_curves.iter().map(|c| c.upsampled(step)).collect(),
            ..self.clone()
        }
    }

    /// The composite of one side, optionally masked to a single participant.
    ///
    /// The mask may name a participant of either side. Masking a side to a
    /// participant of the other side zeroes every increment, keeping the
    /// quantity axis and the participant's name and style.
    pub fn composite_curve(&self, side: Side, mask: Option<&str>) -> Result<Curve, MarketError> {
        let curves = self.non_empty(side)?;
        let template = mask.map(|name| self.find(name)).transpose()?;
        Ok(merge(curves, template, false)?)
    }

    /// The composite of one side mapping aggregate quantities to the masked
    /// participant's own quantities
    pub fn composite_quantities(&self, side: Side, mask: &str) -> Result<Curve, MarketError> {
        let curves = self.non_empty(side)?;
        Ok(merge(curves, Some(self.find(mask)?), true)?)
    }

    /// The total cost (or, with a mask, one seller's cost) as a function of
    /// the aggregate quantity supplied
    pub fn cost(&self, mask: Option<&str>) -> Result<Integral, MarketError> {
        Ok(Integral::of(
            &self.composite_curve(Side::Supply, mask)?,
            self.sampling.step,
        ))
    }

    /// The total utility (or, with a mask, one buyer's utility) as a function
    /// of the aggregate quantity demanded
    pub fn utility(&self, mask: Option<&str>) -> Result<Integral, MarketError> {
        Ok(Integral::of(
            &self.composite_curve(Side::Demand, mask)?,
            self.sampling.step,
        ))
    }

    /// Utility minus cost.
    ///
    /// With a mask, the participant's own side contributes its share and the
    /// other side contributes nothing: a seller's welfare is minus its cost,
    /// a buyer's is its utility.
    pub fn welfare(&self, mask: Option<&str>) -> Result<Welfare, MarketError> {
        Ok(Welfare {
            utility: self.utility(mask)?,
            cost: self.cost(mask)?,
        })
    }

    /// The largest quantity the sellers can supply together
    pub fn max_total_quantity(&self) -> f64 {
        self.supply_curves.iter().map(|curve| curve.domain().1).sum()
    }

    /// The quantity maximizing total welfare.
    ///
    /// Welfare is evaluated every sampling step from zero to the maximum
    /// total supply; quantities where it is undefined (beyond the demand) are
    /// skipped and the first quantity attaining the maximum is returned.
    ///
    /// With a mask, the aggregate optimum is translated into the named
    /// participant's own traded quantity.
    pub fn equilibrium_quantity(&self, mask: Option<&str>) -> Result<f64, MarketError> {
        let (quantity, _) = self.optimum()?;
        match mask {
            None => Ok(quantity),
            Some(name) => self.upsampled().allocation(name, quantity),
        }
    }

    /// The equilibrium point, if an equilibrium price is set
    pub fn equilibrium(&self) -> Result<Option<Point>, MarketError> {
        match self.equilibrium_price {
            Some(price) => Ok(Some(Point::new(self.equilibrium_quantity(None)?, price))),
            None => Ok(None),
        }
    }

    /// The welfare-maximizing quantity and the welfare attained there
    pub fn optimum(&self) -> Result<(f64, f64), MarketError> {
        let welfare = self.welfare(None)?;
        let grid = arange(0.0, self.max_total_quantity(), self.sampling.step);
        tracing::debug!(
            points = grid.len(),
            step = self.sampling.step,
            "searching welfare grid"
        );

        let mut best: Option<(f64, f64)> = None;
        for q in grid {
            if let Some(value) = welfare.evaluate(q) {
                // strict comparison keeps the first of equal maxima
                if best.is_none_or(|(_, max)| value > max) {
                    best = Some((q, value));
                }
            }
        }

        let (quantity, value) = best.ok_or(MarketError::NoWelfare)?;
        tracing::info!(Q_opt = quantity, welfare = value, "found welfare optimum");
        Ok((quantity, value))
    }

    /// The side a participant trades on
    pub fn side_of(&self, name: &str) -> Result<Side, MarketError> {
        Ok(self.find(name)?.side())
    }

    // The quantity participant `name` trades when the market trades `total`.
    // Meant to be called on an upsampled market, so that partially filled
    // units are resolved at the sampling step.
    pub(crate) fn allocation(&self, name: &str, total: f64) -> Result<f64, MarketError> {
        let side = self.side_of(name)?;
        let individual = self.composite_quantities(side, name)?;
        Ok(individual
            .points()
            .iter()
            .filter(|point| point.quantity <= total)
            .map(|point| point.price)
            .fold(f64::NEG_INFINITY, f64::max))
    }

    // The unique curve called `name`, on either side
    fn find(&self, name: &str) -> Result<&Curve, MarketError> {
        let mut matches = self.curves().filter(|curve| curve.name() == name);
        let curve = matches
            .next()
            .ok_or_else(|| MarketError::UnknownCurve(name.to_owned()))?;
        if matches.next().is_some() {
            Err(MarketError::AmbiguousCurve(name.to_owned()))
        } else {
            Ok(curve)
        }
    }

    fn non_empty(&self, side: Side) -> Result<&[Curve], MarketError> {
        let curves = self.curves_of(side);
        if curves.is_empty() {
            Err(MarketError::MissingSide(side))
        } else {
            Ok(curves)
        }
    }
}

/// Errors that can occur when analysing a market
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum MarketError {
    /// One side of the market has no curves
    #[error("the market has no {0} curves")]
    MissingSide(Side),
    /// A curve was given for the wrong side of the market
    #[error("curve {name:?} is not a {expected} curve")]
    WrongSide {
        /// The name of the offending curve
        name: String,
        /// The side it was given for
        expected: Side,
    },
    /// No curve has the requested name
    #[error("unknown curve {0:?}")]
    UnknownCurve(String),
    /// Several curves have the requested name
    #[error("curve name {0:?} is not unique")]
    AmbiguousCurve(String),
    /// Welfare is undefined at every grid quantity
    #[error("welfare is undefined on the whole quantity grid")]
    NoWelfare,
    /// A side could not be aggregated
    #[error(transparent)]
    Composite(#[from] CompositeError),
}
