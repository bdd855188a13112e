use crate::{AppConfig, Scenario};
use surplus_solver::EquilibriumReport;

/// Solve a scenario for its welfare optimum
pub fn equilibrium(scenario: Scenario, config: &AppConfig) -> anyhow::Result<EquilibriumReport> {
    let (market, _) = scenario.into_market(config.sampling.clone())?;
    let report = market.report()?;
    tracing::info!(
        quantity = report.quantity,
        welfare = report.welfare,
        "found equilibrium"
    );
    Ok(report)
}
