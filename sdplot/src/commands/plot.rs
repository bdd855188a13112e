use crate::{AppConfig, Scenario};
use clap::ValueEnum;
use surplus_render::{PlotMode, SvgRenderer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Price against quantity, with the areas under each curve
    SupplyAndDemand,
    /// Each participant's cost or utility, and the welfare curve
    CostAndUtility,
}

impl From<Mode> for PlotMode {
    fn from(value: Mode) -> Self {
        match value {
            Mode::SupplyAndDemand => PlotMode::SupplyAndDemand,
            Mode::CostAndUtility => PlotMode::CostAndUtility,
        }
    }
}

/// Render a scenario to an SVG document
pub fn plot(
    scenario: Scenario,
    config: &AppConfig,
    mode: Mode,
    total: bool,
    legend: bool,
) -> anyhow::Result<String> {
    let (market, axes) = scenario.into_market(config.sampling.clone())?;
    let figure = surplus_render::plot(&market, &axes, mode.into(), total, legend)?;
    let svg = SvgRenderer::new(config.render.clone()).render(&figure)?;
    Ok(svg)
}
