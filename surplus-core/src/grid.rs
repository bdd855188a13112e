/// The number of decimals quantities are rounded to after arithmetic.
///
/// Quantities are accumulated from many small increments; rounding keeps
/// values such as `0.1 + 0.2` comparable with `0.3`.
pub const DECIMALS: i32 = 10;

/// Round a value to `decimals` decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// The inclusive grid `start, start + step, ..., stop`, rounded to [`DECIMALS`].
///
/// The number of points is derived from the span rather than by repeated
/// addition, so the last value is `stop` (up to rounding) and never overshoots.
/// An empty vector is returned when `step` is not positive and finite, or when
/// `stop < start`.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0 && step.is_finite()) || !(start <= stop) {
        return Vec::new();
    }

    let count = round_to((stop - start) / step, DECIMALS).floor() as usize + 1;
    (0..count)
        .map(|i| round_to(start + i as f64 * step, DECIMALS))
        .collect()
}

/// [`arange`], closed with `stop` itself when the span is not a multiple of `step`.
///
/// Used where the grid has to cover a whole domain: the last interval is then
/// shorter than `step`.
pub fn arange_closed(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let mut grid = arange(start, stop, step);
    if grid.last().is_some_and(|&last| last < round_to(stop, DECIMALS)) {
        grid.push(stop);
    }
    grid
}

/// `n` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        stop
                    } else {
                        start + i as f64 * delta
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.1 + 0.2, DECIMALS), 0.3);
        assert_eq!(round_to(1.23456, 2), 1.23);
    }

    #[test]
    fn test_arange_inclusive() {
        let grid = arange(0.0, 1.0, 0.1);
        assert_eq!(grid.len(), 11);
        assert_eq!(grid[3], 0.3);
        assert_eq!(grid.last().copied(), Some(1.0));
    }

    #[test]
    fn test_arange_fine_step() {
        let grid = arange(0.0, 3.0, 1e-3);
        assert_eq!(grid.len(), 3001);
        assert_eq!(grid[1234], 1.234);
        assert_eq!(grid.last().copied(), Some(3.0));
    }

    #[test]
    fn test_arange_partial_step() {
        // 0.25 is not a multiple of 0.1; the grid stops at the last full step
        assert_eq!(arange(0.0, 0.25, 0.1), vec![0.0, 0.1, 0.2]);
    }

    #[test]
    fn test_arange_closed() {
        assert_eq!(arange_closed(0.0, 0.25, 0.1), vec![0.0, 0.1, 0.2, 0.25]);
        assert_eq!(arange_closed(0.0, 1.0, 0.5), vec![0.0, 0.5, 1.0]);
        assert!(arange_closed(1.0, 0.0, 0.5).is_empty());
    }

    #[test]
    fn test_arange_degenerate() {
        assert_eq!(arange(2.0, 2.0, 0.5), vec![2.0]);
        assert!(arange(1.0, 0.0, 0.5).is_empty());
        assert!(arange(0.0, 1.0, 0.0).is_empty());
        assert!(arange(0.0, 1.0, f64::NAN).is_empty());
    }

    #[test]
    fn test_linspace() {
        let values = linspace(0.0, 10.0, 501);
        assert_eq!(values.len(), 501);
        assert_eq!(values[0], 0.0);
        assert_abs_diff_eq!(values[250], 5.0, epsilon = 1e-12);
        assert_eq!(values[500], 10.0);
        assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
        assert!(linspace(3.0, 4.0, 0).is_empty());
    }
}
