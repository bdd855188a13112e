use super::Point;

/// How a curve is read between its samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Interpolation {
    /// Next-value hold: on `(q_{i-1}, q_i]` the curve takes the price of sample `i`.
    ///
    /// This is the natural reading of a schedule of discrete units: the i-th
    /// unit, occupying the quantities up to `q_i`, trades at `p_i`.
    #[default]
    Step,
    /// Straight lines between consecutive samples.
    Linear,
}

impl Interpolation {
    /// Evaluate the curve through `points` at quantity `q`.
    ///
    /// `points` must be ordered by non-decreasing quantity. Returns `None`
    /// outside `[q_first, q_last]` (curves are not extrapolated), for a NaN
    /// quantity, or if there are no points.
    pub fn evaluate(&self, points: &[Point], q: f64) -> Option<f64> {
        let first = points.first()?;
        let last = points.last()?;
        if !(first.quantity <= q && q <= last.quantity) {
            return None;
        }

        // The first sample at or beyond q; it exists since q <= last.quantity
        let idx = points.partition_point(|point| point.quantity < q);

        match self {
            Self::Step => Some(points[idx].price),
            Self::Linear => {
                if points.len() == 1 {
                    return Some(first.price);
                }
                let hi = &points[idx.max(1)];
                let lo = &points[idx.max(1) - 1];
                let span = hi.quantity - lo.quantity;
                if q == hi.quantity {
                    // exact on the sample, without rounding through the slope
                    Some(hi.price)
                } else if span == 0.0 {
                    Some(lo.price)
                } else {
                    Some(lo.price + (hi.price - lo.price) * (q - lo.quantity) / span)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn schedule() -> Vec<Point> {
        vec![
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 3.0),
            Point::new(2.0, 4.0),
            Point::new(4.0, 5.0),
        ]
    }

    #[rstest]
    #[case(0.0, Some(1.0))]
    #[case(0.5, Some(1.0))]
    #[case(1.0, Some(1.0))]
    #[case(1.001, Some(3.0))]
    #[case(2.0, Some(3.0))]
    #[case(3.0, Some(5.0))]
    #[case(4.0, Some(5.0))]
    #[case(-0.1, None)]
    #[case(4.1, None)]
    #[case(f64::NAN, None)]
    fn test_step(#[case] q: f64, #[case] expected: Option<f64>) {
        assert_eq!(Interpolation::Step.evaluate(&schedule(), q), expected);
    }

    #[rstest]
    #[case(0.0, Some(1.0))]
    #[case(1.5, Some(2.0))]
    #[case(2.0, Some(3.0))]
    #[case(3.0, Some(4.5))]
    #[case(4.0, Some(5.0))]
    #[case(4.5, None)]
    fn test_linear(#[case] q: f64, #[case] expected: Option<f64>) {
        assert_eq!(Interpolation::Linear.evaluate(&schedule(), q), expected);
    }

    #[test]
    fn test_single_point() {
        let points = [Point::new(1.0, 7.0)];
        assert_eq!(Interpolation::Linear.evaluate(&points, 1.0), Some(7.0));
        assert_eq!(Interpolation::Step.evaluate(&points, 1.0), Some(7.0));
        assert_eq!(Interpolation::Step.evaluate(&[], 1.0), None);
    }
}
