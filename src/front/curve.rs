//! Piecewise-linear support → confidence curves.

/// A curve through points sorted by `x`, one point per distinct `x`.
///
/// Points sharing an `x` (a zero-width vertical run) collapse to the
/// largest `y` of the run. Outside `[x_min, x_max]` the curve is extended
/// flat at its endpoint values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Polyline {
    /// Builds a curve from `(x, y)` points in any order.
    ///
    /// Points with a non-finite coordinate are dropped.
    pub fn from_points<T: IntoIterator<Item = (f64, f64)>>(points: T) -> Self {
        let mut pts: Vec<(f64, f64)> = points
            .into_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();
        pts.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut xs: Vec<f64> = Vec::with_capacity(pts.len());
        let mut ys: Vec<f64> = Vec::with_capacity(pts.len());
        for (x, y) in pts {
            if xs.last() == Some(&x) {
                let last = ys.len() - 1;
                ys[last] = ys[last].max(y);
            } else {
                xs.push(x);
                ys.push(y);
            }
        }
        Self { xs, ys }
    }

    /// Number of distinct `x` breakpoints.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Smallest and largest `x`, if any.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        Some((*self.xs.first()?, *self.xs.last()?))
    }

    /// Curve value at `x`; 0 for an empty curve.
    pub fn y_at(&self, x: f64) -> f64 {
        let n = self.xs.len();
        if n == 0 {
            return 0.0;
        }
        if x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[n - 1] {
            return self.ys[n - 1];
        }
        // First index with xs[i] > x; 1 <= i <= n-1 here.
        let i = self.xs.partition_point(|&v| v <= x);
        let (x0, y0) = (self.xs[i - 1], self.ys[i - 1]);
        let (x1, y1) = (self.xs[i], self.ys[i]);
        y0 + (x - x0) * (y1 - y0) / (x1 - x0)
    }

    /// Trapezoidal area under the curve between its first and last breakpoint.
    pub fn area(&self) -> f64 {
        self.xs
            .windows(2)
            .zip(self.ys.windows(2))
            .map(|(x, y)| (x[1] - x[0]) * (y[0] + y[1]) * 0.5)
            .sum()
    }
}

/// The support range fronts are compared over.
///
/// Supports outside `[min, max]` are discarded; the rest are normalized to
/// `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupportWindow {
    pub min: f64,
    pub max: f64,
}

impl SupportWindow {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, support: f64) -> bool {
        support >= self.min && support <= self.max
    }

    /// Maps `support` into `[0, 1]`; a degenerate window maps everything to 0.
    pub fn normalize(&self, support: f64) -> f64 {
        let range = self.max - self.min;
        if range > 0.0 {
            (support - self.min) / range
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_vertical_run() {
        let p = Polyline::from_points([(2.0, 0.1), (1.0, 0.5), (2.0, 0.7), (3.0, 0.2)]);
        assert_eq!(p.xs(), &[1.0, 2.0, 3.0]);
        assert_eq!(p.ys(), &[0.5, 0.7, 0.2]);
    }

    #[test]
    fn test_y_at_interpolates_and_extends() {
        let p = Polyline::from_points([(0.0, 1.0), (2.0, 0.0)]);
        assert_eq!(p.y_at(-5.0), 1.0);
        assert_eq!(p.y_at(5.0), 0.0);
        assert!((p.y_at(0.5) - 0.75).abs() < 1e-12);
        assert_eq!(p.y_at(2.0), 0.0);
    }

    #[test]
    fn test_y_at_empty_and_single() {
        assert_eq!(Polyline::default().y_at(1.0), 0.0);
        let p = Polyline::from_points([(3.0, 0.4)]);
        assert_eq!(p.y_at(0.0), 0.4);
        assert_eq!(p.y_at(9.0), 0.4);
        assert_eq!(p.area(), 0.0);
    }

    #[test]
    fn test_area() {
        let p = Polyline::from_points([(0.0, 1.0), (0.5, 1.0), (1.0, 0.0)]);
        assert!((p.area() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_drops_non_finite() {
        let p = Polyline::from_points([(f64::NEG_INFINITY, 0.0), (1.0, f64::NAN), (2.0, 0.5)]);
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_window() {
        let w = SupportWindow::new(10.0, 110.0);
        assert!(w.contains(10.0));
        assert!(!w.contains(9.0));
        assert_eq!(w.normalize(60.0), 0.5);
        assert_eq!(SupportWindow::new(5.0, 5.0).normalize(5.0), 0.0);
    }
}
