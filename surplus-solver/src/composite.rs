use surplus_core::{
    DECIMALS,
    models::{Curve, CurveError, LineStyle, Point},
    round_to,
};

/// Merge several curves of the same side into one composite curve.
///
/// Each curve is cut into its increments: every point after the first
/// contributes the quantity it adds over its predecessor, at its own price.
/// The increments of all curves are ranked by price (ascending for supply,
/// descending for demand; ties keep the input order) and stacked, so the
/// composite's quantity is the running total of the ranked increments.
///
/// With a `mask`, the increments of every other curve keep their place on the
/// quantity axis but are zeroed, which isolates one participant inside the
/// aggregate: integrating the masked curve gives that participant's share of
/// the total cost or utility.
///
/// With `individual`, each point reports the masked participant's own
/// cumulative quantity instead of the price, mapping aggregate quantities to
/// individual ones.
///
/// The composite starts at quantity zero, at the cheapest first price (supply)
/// or the dearest one (demand).
pub fn composite(
    curves: &[Curve],
    mask: Option<&str>,
    individual: bool,
) -> Result<Curve, CompositeError> {
    let template = mask.map(|name| find(curves, name)).transpose()?;
    merge(curves, template, individual)
}

// `composite` masked to `template`, which need not be one of `curves`: a
// participant from the other side zeroes every increment.
pub(crate) fn merge(
    curves: &[Curve],
    template: Option<&Curve>,
    individual: bool,
) -> Result<Curve, CompositeError> {
    let first = curves.first().ok_or(CompositeError::Empty)?;
    let side = first.side();
    let interpolation = first.interpolation();

    for curve in curves {
        if curve.side() != side {
            return Err(CompositeError::MixedSides);
        }
        if curve.interpolation() != interpolation {
            return Err(CompositeError::MixedInterpolation);
        }
    }

    let mask = template.map(Curve::name);

    let mut rows = curves
        .iter()
        .flat_map(|curve| {
            curve.points().windows(2).map(|pair| Row {
                name: curve.name(),
                individual_quantity: pair[1].quantity,
                price: pair[1].price,
                delta: round_to(pair[1].quantity - pair[0].quantity, DECIMALS),
            })
        })
        .collect::<Vec<_>>();

    // `sort_by` is stable, which keeps ties in input order
    rows.sort_by(|a, b| {
        let ord = a.price.total_cmp(&b.price);
        if side.ascending() { ord } else { ord.reverse() }
    });

    let zero_price = side
        .zero_price(curves.iter().map(|curve| curve.points()[0].price))
        .ok_or(CompositeError::Empty)?;

    let mut points = Vec::with_capacity(rows.len() + 1);
    points.push(Point::new(0.0, if individual { 0.0 } else { zero_price }));

    let mut total = 0.0;
    for row in rows {
        total += row.delta;
        let (individual_quantity, price) = match mask {
            Some(name) if row.name != name => (0.0, 0.0),
            _ => (row.individual_quantity, row.price),
        };
        points.push(Point::new(
            round_to(total, DECIMALS),
            if individual { individual_quantity } else { price },
        ));
    }

    let curve = Curve::new(side, points)?.with_interpolation(interpolation);

    Ok(match template {
        Some(template) => curve
            .with_name(template.name())
            .with_integral_name(template.integral_name())
            .with_color(template.color())
            .with_line(template.line()),
        None => curve
            .with_name(format!("{} (Total)", side.name()))
            .with_integral_name(format!("Total {}", side.integral_name()))
            .with_line(LineStyle::Solid),
    })
}

/// Merge several curves of the same side into their total
pub fn aggregate(curves: &[Curve]) -> Result<Curve, CompositeError> {
    composite(curves, None, false)
}

/// Find the unique curve called `name`
pub(crate) fn find<'a>(curves: &'a [Curve], name: &str) -> Result<&'a Curve, CompositeError> {
    let mut matches = curves.iter().filter(|curve| curve.name() == name);
    let curve = matches
        .next()
        .ok_or_else(|| CompositeError::UnknownCurve(name.to_owned()))?;
    if matches.next().is_some() {
        Err(CompositeError::AmbiguousCurve(name.to_owned()))
    } else {
        Ok(curve)
    }
}

// One increment of one curve
#[derive(Debug)]
struct Row<'a> {
    name: &'a str,
    individual_quantity: f64,
    price: f64,
    delta: f64,
}

/// Errors that can occur when merging curves
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CompositeError {
    /// There are no curves to merge
    #[error("no curves to merge")]
    Empty,
    /// Supply and demand curves cannot be merged together
    #[error("cannot merge supply curves with demand curves")]
    MixedSides,
    /// Step and linear curves cannot be merged together
    #[error("cannot merge step curves with linear curves")]
    MixedInterpolation,
    /// The mask does not name any curve
    #[error("unknown curve {0:?}")]
    UnknownCurve(String),
    /// The mask names several curves
    #[error("curve name {0:?} is not unique")]
    AmbiguousCurve(String),
    /// The merged points do not form a valid curve
    #[error("invalid composite curve: {0}")]
    Curve(#[from] CurveError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use surplus_core::models::{Colors, Interpolation, Side};

    fn curve(side: Side, name: &str, points: &[(f64, f64)]) -> Curve {
        Curve::new(side, points.iter().copied().map(Point::from).collect())
            .unwrap()
            .with_name(name)
    }

    fn sellers() -> Vec<Curve> {
        vec![
            curve(Side::Supply, "A", &[(0.0, 1.0), (1.0, 1.0), (2.0, 3.0)]),
            curve(Side::Supply, "B", &[(0.0, 2.0), (1.0, 2.0), (2.0, 4.0)]),
        ]
    }

    fn pairs(curve: &Curve) -> Vec<(f64, f64)> {
        curve
            .points()
            .iter()
            .map(|point| (point.quantity, point.price))
            .collect()
    }

    #[test]
    fn supply_ranks_ascending() {
        let total = aggregate(&sellers()).unwrap();
        assert_eq!(
            pairs(&total),
            vec![(0.0, 1.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0)]
        );
        assert_eq!(total.name(), "Supply Curve (Total)");
        assert_eq!(total.integral_name(), "Total Cost, $C$");
        assert_eq!(total.color(), Colors::SUPPLY);
    }

    #[test]
    fn demand_ranks_descending() {
        let buyers = vec![
            curve(Side::Demand, "X", &[(0.0, 5.0), (1.0, 5.0), (2.0, 2.0)]),
            curve(Side::Demand, "Y", &[(0.0, 4.0), (0.5, 4.0), (1.0, 3.0)]),
        ];
        let total = aggregate(&buyers).unwrap();
        assert_eq!(
            pairs(&total),
            vec![(0.0, 5.0), (1.0, 5.0), (1.5, 4.0), (2.0, 3.0), (3.0, 2.0)]
        );
        assert_eq!(total.name(), "Demand Curve (Total)");
    }

    #[test]
    fn ties_keep_input_order() {
        let curves = vec![
            curve(Side::Supply, "A", &[(0.0, 1.0), (1.0, 2.0)]),
            curve(Side::Supply, "B", &[(0.0, 1.0), (3.0, 2.0)]),
        ];
        let individual = composite(&curves, Some("B"), true).unwrap();
        // A's unit comes first, so B's three units are stacked on top of it
        assert_eq!(pairs(&individual), vec![(0.0, 0.0), (1.0, 0.0), (4.0, 3.0)]);
    }

    #[test]
    fn mask_zeroes_other_curves() {
        let masked = composite(&sellers(), Some("B"), false).unwrap();
        assert_eq!(
            pairs(&masked),
            vec![(0.0, 1.0), (1.0, 0.0), (2.0, 2.0), (3.0, 0.0), (4.0, 4.0)]
        );
        assert_eq!(masked.name(), "B");
        assert_eq!(masked.integral_name(), "Cost, $C$");
    }

    #[test]
    fn individual_quantities() {
        let individual = composite(&sellers(), Some("A"), true).unwrap();
        assert_eq!(
            pairs(&individual),
            vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 2.0), (4.0, 0.0)]
        );
    }

    #[test]
    fn deltas_are_rounded() {
        let curves = vec![curve(
            Side::Supply,
            "A",
            &[(0.0, 1.0), (0.1, 1.0), (0.3, 2.0), (0.6, 3.0)],
        )];
        let total = aggregate(&curves).unwrap();
        assert_eq!(
            total.quantities().collect::<Vec<_>>(),
            vec![0.0, 0.1, 0.3, 0.6]
        );
    }

    #[test]
    fn single_point_curves() {
        let curves = vec![curve(Side::Demand, "A", &[(0.0, 3.0)])];
        assert_eq!(pairs(&aggregate(&curves).unwrap()), vec![(0.0, 3.0)]);
    }

    #[test]
    fn errors() {
        assert_eq!(aggregate(&[]).unwrap_err(), CompositeError::Empty);

        let mixed_sides = vec![
            curve(Side::Supply, "A", &[(0.0, 1.0)]),
            curve(Side::Demand, "B", &[(0.0, 1.0)]),
        ];
        assert_eq!(
            aggregate(&mixed_sides).unwrap_err(),
            CompositeError::MixedSides
        );

        let mut mixed_interpolation = sellers();
        mixed_interpolation[1] = mixed_interpolation[1]
            .clone()
            .with_interpolation(Interpolation::Linear);
        assert_eq!(
            aggregate(&mixed_interpolation).unwrap_err(),
            CompositeError::MixedInterpolation
        );

        assert_eq!(
            composite(&sellers(), Some("C"), false).unwrap_err(),
            CompositeError::UnknownCurve("C".into())
        );

        let duplicated = vec![sellers()[0].clone(), sellers()[0].clone()];
        assert_eq!(
            composite(&duplicated, Some("A"), false).unwrap_err(),
            CompositeError::AmbiguousCurve("A".into())
        );
    }

    #[test]
    fn linear_curves_stay_linear() {
        let curves = vec![
            curve(Side::Demand, "A", &[(0.0, 4.0), (2.0, 0.0)])
                .with_interpolation(Interpolation::Linear),
        ];
        assert_eq!(
            aggregate(&curves).unwrap().interpolation(),
            Interpolation::Linear
        );
    }
}
