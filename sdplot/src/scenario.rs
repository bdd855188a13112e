use serde::{Deserialize, Serialize};
use surplus_core::models::{Color, CurveError, Interpolation, LineStyle};
use surplus_render::AxesSpec;
use surplus_solver::{Curve, MarketError, Point, SamplingConfig, Side, SupplyDemand};

/// A market as read from a scenario file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// The sellers
    pub supply: Vec<CurveSpec>,
    /// The buyers
    pub demand: Vec<CurveSpec>,
    /// A price to annotate on the diagram
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equilibrium_price: Option<f64>,
    /// How to lay out the axes, defaulting to a 10 by 10 view
    #[serde(default)]
    pub axes: AxesSpec,
}

/// One participant's schedule. The side is implied by the list it appears in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integral_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    /// Step (next-value hold) or linear reading between the points
    #[serde(default = "stepped")]
    pub stepped: bool,
    pub points: Vec<Point>,
}

fn stepped() -> bool {
    true
}

impl CurveSpec {
    pub fn into_curve(self, side: Side) -> Result<Curve, CurveError> {
        let mut curve = Curve::new(side, self.points)?;
        if let Some(name) = self.name {
            curve = curve.with_name(name);
        }
        if let Some(integral_name) = self.integral_name {
            curve = curve.with_integral_name(integral_name);
        }
        if let Some(color) = self.color {
            curve = curve.with_color(color);
        }
        if let Some(line) = self.line {
            curve = curve.with_line(line);
        }
        if !self.stepped {
            curve = curve.with_interpolation(Interpolation::Linear);
        }
        Ok(curve)
    }
}

impl Scenario {
    /// Validate every curve and assemble the market, keeping the axes for plotting
    pub fn into_market(
        self,
        sampling: SamplingConfig,
    ) -> Result<(SupplyDemand, AxesSpec), ScenarioError> {
        let supply = curves(self.supply, Side::Supply)?;
        let demand = curves(self.demand, Side::Demand)?;

        let mut market = SupplyDemand::new(supply, demand)?.with_sampling(sampling);
        if let Some(price) = self.equilibrium_price {
            market = market.with_equilibrium_price(price);
        }
        tracing::debug!(
            supply = market.supply_curves().len(),
            demand = market.demand_curves().len(),
            "loaded scenario"
        );
        Ok((market, self.axes))
    }
}

fn curves(specs: Vec<CurveSpec>, side: Side) -> Result<Vec<Curve>, ScenarioError> {
    specs
        .into_iter()
        .enumerate()
        .map(|(index, spec)| {
            spec.into_curve(side)
                .map_err(|source| ScenarioError::Curve {
                    side,
                    index,
                    source,
                })
        })
        .collect()
}

/// Errors that can occur when turning a scenario into a market
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("{side} curve #{index} is invalid: {source}")]
    Curve {
        side: Side,
        index: usize,
        #[source]
        source: CurveError,
    },
    #[error(transparent)]
    Market(#[from] MarketError),
}
