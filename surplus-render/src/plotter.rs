use crate::{AxesSpec, Drawable, Figure, Fill, Line, Mark, RenderError};
use surplus_core::models::{
    Colors, Curve, Labels, SamplingConfig, Side,
    geometry::Point,
    label::roman,
};
use surplus_solver::{Integral, SupplyDemand, aggregate, composite};

/// Opacity of the areas under the curves
const FILL_ALPHA: f64 = 0.2;
/// Radius of the optimum marker, in pixels
const OPTIMUM_RADIUS: f64 = 3.0;

/// What a diagram shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum PlotMode {
    /// Price against quantity: the aggregate curves and the areas under them
    #[default]
    SupplyAndDemand,
    /// Money against quantity: each participant's cost or utility, and welfare
    CostAndUtility,
}

/// Draw a whole market in one call.
///
/// `total` adds the aggregate cost and utility to a cost and utility diagram;
/// `legend` keeps or drops the legend.
pub fn plot(
    market: &SupplyDemand,
    spec: &AxesSpec,
    mode: PlotMode,
    total: bool,
    legend: bool,
) -> Result<Figure, RenderError> {
    let mut figure = match mode {
        PlotMode::SupplyAndDemand => {
            let mut plotter = SupplyDemandPlotter::new(spec, market.sampling());
            plotter.plot_all(market)?;
            plotter.into_figure()
        }
        PlotMode::CostAndUtility => {
            let mut plotter = CostUtilityPlotter::new(spec, market.sampling());
            plotter.plot_all(market, total)?;
            plotter.into_figure()
        }
    };
    if !legend {
        figure.hide_legend();
    }
    Ok(figure)
}

/// Supply and demand curves in the price/quantity plane.
#[derive(Clone, Debug)]
pub struct SupplyDemandPlotter {
    figure: Figure,
    x_vals: Vec<f64>,
}

impl SupplyDemandPlotter {
    /// Set up price/quantity axes
    pub fn new(spec: &AxesSpec, sampling: &SamplingConfig) -> Self {
        Self {
            figure: Figure::new(spec, Labels::PRICE_AXIS),
            x_vals: spec.x_samples(sampling.plot_samples),
        }
    }

    /// Draw a curve. Given the equilibrium quantity, also shade the area
    /// under the curve up to it (the cost or utility of what is traded).
    pub fn plot(&mut self, curve: &Curve, equilibrium_quantity: Option<f64>) {
        let mut line = Line::new(
            curve.points().iter().copied().map(Point::from).collect(),
            curve.color(),
        );
        line.steps = curve.is_stepped();
        line.markers = curve.is_stepped();
        line.label = Some(roman(curve.name()));
        self.figure.push(Mark::Line(line));

        let Some(quantity) = equilibrium_quantity else {
            return;
        };
        let top = self
            .x_vals
            .iter()
            .filter(|&&x| x <= quantity)
            .filter_map(|&x| curve.evaluate(x).map(|y| Point::new(x, y)))
            .collect::<Vec<_>>();
        if let Some(mut fill) = Fill::under(&top, curve.is_stepped(), curve.color(), FILL_ALPHA) {
            fill.label = Some(roman(&curve.integral_name()));
            self.figure.push(Mark::Fill(fill));
        }
    }

    /// Draw both aggregate curves and shade the traded areas. The equilibrium
    /// is marked only if the market has an equilibrium price.
    pub fn plot_all(&mut self, market: &SupplyDemand) -> Result<(), RenderError> {
        let quantity = market.equilibrium_quantity(None)?;
        for side in [Side::Supply, Side::Demand] {
            self.plot(&market.composite_curve(side, None)?, Some(quantity));
        }
        if let Some(price) = market.equilibrium_price() {
            Point::new(quantity, price).drawn(&mut self.figure);
        }
        self.figure.legend();
        Ok(())
    }

    /// The figure drawn so far
    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Finish drawing
    pub fn into_figure(self) -> Figure {
        self.figure
    }
}

/// Cost, utility and welfare in the money/quantity plane.
#[derive(Clone, Debug)]
pub struct CostUtilityPlotter {
    figure: Figure,
    x_vals: Vec<f64>,
    step: f64,
}

impl CostUtilityPlotter {
    /// Set up money/quantity axes
    pub fn new(spec: &AxesSpec, sampling: &SamplingConfig) -> Self {
        Self {
            figure: Figure::new(spec, Labels::MONEY_AXIS),
            x_vals: spec.x_samples(sampling.plot_samples),
            step: sampling.step,
        }
    }

    /// Draw the integral of a curve in the curve's color and line style
    pub fn plot_cost_or_utility(&mut self, curve: &Curve) {
        let integral = Integral::of(curve, self.step);
        let mut line = Line::new(self.sample(|q| integral.evaluate(q)), curve.color());
        line.style = curve.line();
        line.label = Some(roman(&curve.integral_name()));
        self.figure.push(Mark::Line(line));
    }

    /// Draw welfare and the optimum on it
    pub fn plot_welfare(&mut self, market: &SupplyDemand) -> Result<(), RenderError> {
        let welfare = market.welfare(None)?;
        let quantity = market.equilibrium_quantity(None)?;
        let points = self.sample(|q| welfare.evaluate(q));
        let peak = points
            .iter()
            .map(|point| point.y)
            .fold(f64::NEG_INFINITY, f64::max);

        let mut line = Line::new(points, Colors::WELFARE);
        line.label = Some(roman(Labels::WELFARE));
        self.figure.push(Mark::Line(line));

        // The marker sits on the highest plotted welfare
        if peak.is_finite() {
            self.figure.push(Mark::Marker {
                at: Point::new(quantity, peak),
                color: Colors::BLACK,
                radius: OPTIMUM_RADIUS,
                label: Some(roman(Labels::OPTIMUM)),
            });
        }
        self.figure.legend();
        Ok(())
    }

    /// Draw each participant's share of the side's cost or utility, and
    /// optionally the total
    pub fn plot_multiple(&mut self, curves: &[Curve], total: bool) -> Result<(), RenderError> {
        for curve in curves {
            self.plot_cost_or_utility(&composite(curves, Some(curve.name()), false)?);
        }
        if total {
            self.plot_cost_or_utility(&aggregate(curves)?);
        }
        self.figure.legend();
        Ok(())
    }

    /// Both sides, then welfare
    pub fn plot_all(&mut self, market: &SupplyDemand, total: bool) -> Result<(), RenderError> {
        for curves in [market.supply_curves(), market.demand_curves()] {
            self.plot_multiple(curves, total)?;
        }
        self.plot_welfare(market)
    }

    /// The figure drawn so far
    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Finish drawing
    pub fn into_figure(self) -> Figure {
        self.figure
    }

    // Quantities where `f` is undefined are left out. Integrals are defined
    // on an interval, so what remains is one unbroken run.
    fn sample(&self, f: impl Fn(f64) -> Option<f64>) -> Vec<Point> {
        self.x_vals
            .iter()
            .filter_map(|&x| f(x).map(|y| Point::new(x, y)))
            .collect()
    }
}
