use surplus_core::{
    DECIMALS,
    grid::arange_closed,
    models::{Curve, Interpolation, Point},
    round_to,
};

/// The running integral of a curve: total cost of a supply curve, total
/// utility of a demand curve.
///
/// The integral is tabulated on the grid `q_0, q_0 + step, ..., q_max` spanning
/// the curve's domain (the last interval is shorter when the domain is not a
/// multiple of `step`) and read back by linear interpolation between the
/// tabulated values. Each grid interval `(q_i, q_{i+1}]` of width `h` contributes:
/// - `f(q_{i+1}) * h` for a step curve, matching its next-value hold
/// - `(f(q_i) + f(q_{i+1})) / 2 * h` for a linear curve (trapezoid rule)
#[derive(Clone, Debug, PartialEq)]
pub struct Integral {
    /// Tabulated `(quantity, cumulative amount)` pairs; the amount is stored as the point's price
    table: Vec<Point>,
}

impl Integral {
    /// Tabulate the integral of `curve` every `step`
    pub fn of(curve: &Curve, step: f64) -> Self {
        let (lo, hi) = curve.domain();
        let grid = arange_closed(lo, hi, step);
        let values = grid.iter().map(|&q| curve.evaluate(q)).collect::<Vec<_>>();

        let mut table = Vec::with_capacity(grid.len());
        let mut total = 0.0;
        if let Some(&q0) = grid.first() {
            table.push(Point::new(q0, total));
        }

        for (i, pair) in grid.windows(2).enumerate() {
            // `step`, except for a shorter last interval
            let width = round_to(pair[1] - pair[0], DECIMALS);
            let area = match curve.interpolation() {
                Interpolation::Step => values[i + 1].map(|right| right * width),
                Interpolation::Linear => values[i]
                    .zip(values[i + 1])
                    .map(|(left, right)| (left + right) / 2.0 * width),
            };
            // An undefined sample adds nothing rather than poisoning the rest
            total += area.unwrap_or(0.0);
            table.push(Point::new(pair[1], total));
        }

        Self { table }
    }

    /// The integral from the start of the curve up to `q`, or `None` outside the domain
    pub fn evaluate(&self, q: f64) -> Option<f64> {
        Interpolation::Linear.evaluate(&self.table, q)
    }

    /// The tabulated `(quantity, cumulative amount)` pairs
    pub fn table(&self) -> &[Point] {
        &self.table
    }

    /// The integral over the whole domain
    pub fn total(&self) -> f64 {
        self.table.last().map_or(0.0, |point| point.price)
    }
}

/// Welfare: utility minus cost, both read off their integrals.
#[derive(Clone, Debug, PartialEq)]
pub struct Welfare {
    /// The integral of demand
    pub utility: Integral,
    /// The integral of supply
    pub cost: Integral,
}

impl Welfare {
    /// Utility minus cost at `q`, or `None` where either is undefined
    pub fn evaluate(&self, q: f64) -> Option<f64> {
        Some(self.utility.evaluate(q)? - self.cost.evaluate(q)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn step_integral_is_exact_on_units() {
        // Two units: the first at price 1, the second at price 3
        let curve = Curve::supply(vec![
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 3.0),
        ])
        .unwrap();
        let integral = Integral::of(&curve, 1e-3);

        assert_eq!(integral.evaluate(0.0), Some(0.0));
        assert_abs_diff_eq!(integral.evaluate(1.0).unwrap(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(integral.evaluate(1.5).unwrap(), 2.5, epsilon = 1e-9);
        assert_abs_diff_eq!(integral.total(), 4.0, epsilon = 1e-9);
        assert_eq!(integral.evaluate(2.5), None);
        assert_eq!(integral.evaluate(-0.5), None);
    }

    #[test]
    fn step_integral_charges_the_next_unit() {
        // Just past a step, the integral already grows at the new price
        let curve = Curve::supply(vec![
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 3.0),
        ])
        .unwrap();
        let integral = Integral::of(&curve, 0.5);
        let amounts = integral.table().iter().map(|p| p.price).collect::<Vec<_>>();
        assert_eq!(amounts, vec![0.0, 0.5, 1.0, 2.5, 4.0]);
    }

    #[test]
    fn linear_integral_uses_trapezoids() {
        let curve = Curve::demand(vec![Point::new(0.0, 4.0), Point::new(2.0, 0.0)])
            .unwrap()
            .with_interpolation(Interpolation::Linear);
        let integral = Integral::of(&curve, 1e-3);

        // The area under 4 - 2q is 4q - q^2
        assert_abs_diff_eq!(integral.evaluate(1.0).unwrap(), 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(integral.evaluate(0.25).unwrap(), 0.9375, epsilon = 1e-9);
        assert_abs_diff_eq!(integral.total(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn integral_between_grid_points_interpolates() {
        let curve = Curve::supply(vec![Point::new(0.0, 2.0), Point::new(1.0, 2.0)]).unwrap();
        let integral = Integral::of(&curve, 0.5);
        assert_abs_diff_eq!(integral.evaluate(0.25).unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn integral_covers_a_partial_last_step() {
        let curve = Curve::supply(vec![Point::new(0.0, 2.0), Point::new(0.25, 2.0)]).unwrap();
        let integral = Integral::of(&curve, 0.1);
        let quantities = integral.table().iter().map(|p| p.quantity).collect::<Vec<_>>();
        assert_eq!(quantities, vec![0.0, 0.1, 0.2, 0.25]);
        assert_abs_diff_eq!(integral.evaluate(0.25).unwrap(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(integral.evaluate(0.22).unwrap(), 0.44, epsilon = 1e-12);
    }

    #[test]
    fn welfare_requires_both_sides() {
        let demand = Curve::demand(vec![Point::new(0.0, 5.0), Point::new(2.0, 5.0)]).unwrap();
        let supply = Curve::supply(vec![Point::new(0.0, 1.0), Point::new(1.0, 1.0)]).unwrap();
        let welfare = Welfare {
            utility: Integral::of(&demand, 1e-3),
            cost: Integral::of(&supply, 1e-3),
        };
        assert_abs_diff_eq!(welfare.evaluate(1.0).unwrap(), 4.0, epsilon = 1e-9);
        assert_eq!(welfare.evaluate(1.5), None);
    }
}
