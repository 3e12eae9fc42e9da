//! Front comparison metrics.
//!
//! Both metrics read a front as a confidence-vs-support curve (see
//! [`Polyline`]). [`front_distance`] measures how much area a child front
//! gains over its parent and drives tree pruning; [`average_vertical_distance`]
//! measures how far a group of rules rises above a reference front and
//! drives attribute ranking.

use super::curve::{Polyline, SupportWindow};
use crate::ga::Individual;

/// Gaps at or below this are treated as "not above the reference".
const EPS: f64 = 1e-12;

/// The front as a curve over normalized support, points outside the window
/// dropped, plus the number of in-window points before equal supports merge.
fn normalized_curve<I: Individual>(front: &[I], window: SupportWindow) -> (Polyline, usize) {
    let points: Vec<(f64, f64)> = front
        .iter()
        .filter_map(|ind| {
            let [support, confidence] = ind.objectives_or_worst();
            window
                .contains(support)
                .then(|| (window.normalize(support), confidence))
        })
        .collect();
    let count = points.len();
    (Polyline::from_points(points), count)
}

/// Signed area between the child and parent curves.
///
/// Supports outside `window` are discarded and the rest normalized to
/// `[0, 1]`. A front with fewer than two in-window points has no curve;
/// members sharing a support still count separately:
///
/// - child without a curve: 0
/// - parent without a curve: area under the child curve
/// - otherwise: `∫(child − parent)` over the overlap of their support
///   ranges, by trapezoids on the merged breakpoints; 0 when the ranges
///   do not overlap
///
/// # Examples
///
/// ```
/// use u_qarm::front::{front_distance, SupportWindow};
///
/// let window = SupportWindow::new(0.0, 10.0);
/// let parent: Vec<[f64; 2]> = vec![];
/// let child = vec![[0.0, 1.0], [10.0, 0.0]];
/// let area = front_distance(&parent, &child, window);
/// assert!((area - 0.5).abs() < 1e-12);
/// assert_eq!(front_distance(&child, &child, window), 0.0);
/// ```
pub fn front_distance<I: Individual>(parent: &[I], child: &[I], window: SupportWindow) -> f64 {
    let (child, child_points) = normalized_curve(child, window);
    if child_points < 2 {
        return 0.0;
    }
    let (parent, parent_points) = normalized_curve(parent, window);
    if parent_points < 2 {
        return child.area();
    }

    let (Some((p_lo, p_hi)), Some((c_lo, c_hi))) = (parent.x_range(), child.x_range()) else {
        return 0.0;
    };
    let left = p_lo.max(c_lo);
    let right = p_hi.min(c_hi);
    if left >= right {
        return 0.0;
    }

    let mut breakpoints: Vec<f64> = parent
        .xs()
        .iter()
        .chain(child.xs())
        .copied()
        .filter(|&x| x > left && x < right)
        .collect();
    breakpoints.push(left);
    breakpoints.push(right);
    breakpoints.sort_by(f64::total_cmp);
    breakpoints.dedup();

    breakpoints
        .windows(2)
        .map(|w| {
            let (a, b) = (w[0], w[1]);
            let width = b - a;
            let child_area = width * (child.y_at(a) + child.y_at(b)) * 0.5;
            let parent_area = width * (parent.y_at(a) + parent.y_at(b)) * 0.5;
            child_area - parent_area
        })
        .sum()
}

/// Mean height of `group` above the `reference` curve, over raw support.
///
/// Only strictly positive gaps are averaged. The reference is extended
/// flat beyond its endpoints. Returns 0 when either input is empty or no
/// member of `group` lies above the reference.
///
/// # Examples
///
/// ```
/// use u_qarm::front::average_vertical_distance;
///
/// let reference = vec![[10.0, 0.5], [20.0, 0.3]];
/// let group = vec![[15.0, 0.6], [30.0, 0.1]];
/// // Only the first point is above the reference (0.6 - 0.4).
/// let d = average_vertical_distance(&group, &reference);
/// assert!((d - 0.2).abs() < 1e-12);
/// ```
pub fn average_vertical_distance<A: Individual, B: Individual>(group: &[A], reference: &[B]) -> f64 {
    if group.is_empty() || reference.is_empty() {
        return 0.0;
    }
    let curve = Polyline::from_points(reference.iter().map(|ind| {
        let [x, y] = ind.objectives_or_worst();
        (x, y)
    }));
    if curve.is_empty() {
        return 0.0;
    }

    let mut sum = 0.0;
    let mut count = 0usize;
    for ind in group {
        let [support, confidence] = ind.objectives_or_worst();
        let gap = confidence - curve.y_at(support);
        if gap > EPS {
            sum += gap;
            count += 1;
        }
    }

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
