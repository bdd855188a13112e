use crate::{MarketError, SupplyDemand};
use surplus_core::models::{Map, Side};

/// The welfare optimum of a market, together with how it is shared out.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquilibriumReport {
    /// The welfare-maximizing aggregate quantity
    pub quantity: f64,
    /// The annotated equilibrium price, if one was given
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub price: Option<f64>,
    /// Total utility minus total cost at `quantity`
    pub welfare: f64,
    /// Total cost at `quantity`
    pub cost: f64,
    /// Total utility at `quantity`
    pub utility: f64,
    /// The quantity each seller supplies, keyed by curve name
    pub supply: Map<String>,
    /// The quantity each buyer receives, keyed by curve name
    pub demand: Map<String>,
}

impl SupplyDemand {
    /// Compute the optimum and each participant's traded quantity.
    ///
    /// Per-participant quantities need unique curve names; a name shared by
    /// several curves is reported as an error rather than silently merged.
    pub fn report(&self) -> Result<EquilibriumReport, MarketError> {
        let (quantity, welfare) = self.optimum()?;
        let cost = self.cost(None)?.evaluate(quantity).unwrap_or_default();
        let utility = self.utility(None)?.evaluate(quantity).unwrap_or_default();

        // One resampled market serves every participant
        let upsampled = self.upsampled();
        let shares = |side: Side| -> Result<Map<String>, MarketError> {
            self.curves_of(side)
                .iter()
                .map(|curve| {
                    let name = curve.name().to_owned();
                    let share = upsampled.allocation(&name, quantity)?;
                    Ok((name, share))
                })
                .collect()
        };
        let supply = shares(Side::Supply)?;
        let demand = shares(Side::Demand)?;

        Ok(EquilibriumReport {
            quantity,
            price: self.equilibrium_price(),
            welfare,
            cost,
            utility,
            supply,
            demand,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use surplus_core::models::{Curve, Point};

    fn steps(side: Side, name: &str, points: &[(f64, f64)]) -> Curve {
        Curve::new(side, points.iter().copied().map(Point::from).collect())
            .unwrap()
            .with_name(name)
    }

    #[test]
    fn shares_add_up() {
        let market = SupplyDemand::new(
            vec![
                steps(Side::Supply, "A", &[(0.0, 1.0), (1.0, 1.0), (2.0, 4.0)]),
                steps(Side::Supply, "B", &[(0.0, 2.0), (1.0, 2.0), (2.0, 5.0)]),
            ],
            vec![steps(Side::Demand, "X", &[(0.0, 3.0), (3.0, 3.0)])],
        )
        .unwrap()
        .with_equilibrium_price(3.0);

        let report = market.report().unwrap();
        // A's and B's cheap units are bought; the 4 and 5 units are not
        assert_abs_diff_eq!(report.quantity, 2.0, epsilon = 1e-9);
        assert_eq!(report.price, Some(3.0));
        assert_abs_diff_eq!(report.cost, 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(report.utility, 6.0, epsilon = 1e-6);
        assert_abs_diff_eq!(report.welfare, 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(report.supply["A"], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(report.supply["B"], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(report.demand["X"], 2.0, epsilon = 1e-9);
        assert_eq!(report.supply.keys().collect::<Vec<_>>(), ["A", "B"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let seller = steps(Side::Supply, "A", &[(0.0, 1.0), (1.0, 1.0)]);
        let market = SupplyDemand::new(
            vec![seller.clone(), seller],
            vec![steps(Side::Demand, "X", &[(0.0, 3.0), (3.0, 3.0)])],
        )
        .unwrap();
        assert_eq!(
            market.report().unwrap_err(),
            MarketError::AmbiguousCurve("A".into())
        );
    }
}
