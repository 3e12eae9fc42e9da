//! Two-objective Pareto utilities.
//!
//! NSGA-II building blocks over `[f64; 2]` objective vectors where both
//! objectives are **maximized** (here: rule support and confidence).
//!
//! # Algorithms
//!
//! - [`non_dominated_sort`]: Fast non-dominated sorting (Deb et al., 2002)
//! - [`crowding_distance`]: Crowding distance assignment for diversity preservation
//! - [`nsga2_select`]: Rank-then-crowding truncation selection
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

use std::cmp::Ordering;

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the solution
/// at the same index. Rank 0 is the Pareto front (non-dominated solutions).
#[derive(Debug, Clone, Default)]
pub struct NondominatedSortResult {
    /// Pareto rank for each solution (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Dominance comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other.
    Neither,
}

/// Compares two objective vectors for Pareto dominance (maximization).
///
/// `a` dominates `b` when it is no worse in both objectives and strictly
/// better in at least one. Equal vectors dominate neither way.
pub fn dominance(a: &[f64; 2], b: &[f64; 2]) -> Dominance {
    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va > vb {
            a_better_in_some = true;
        } else if vb > va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Fast non-dominated sorting.
///
/// Assigns a Pareto rank to each solution. Identical vectors share a rank.
///
/// # Complexity
///
/// O(n²) for two objectives.
///
/// # Example
///
/// ```
/// use u_qarm::ga::multi_objective::non_dominated_sort;
///
/// let objectives = vec![
///     [10.0, 0.2], // A
///     [5.0, 0.5],  // B
///     [1.0, 0.9],  // C
///     [4.0, 0.4],  // D, dominated by B
/// ];
///
/// let result = non_dominated_sort(&objectives);
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// ```
pub fn non_dominated_sort(objectives: &[[f64; 2]]) -> NondominatedSortResult {
    let n = objectives.len();
    if n == 0 {
        return NondominatedSortResult::default();
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            match dominance(&objectives[i], &objectives[j]) {
                Dominance::Left => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Right => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::Neither => {}
            }
        }
    }

    let front_0: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    let mut fronts = vec![front_0];
    loop {
        let current = fronts
            .last()
            .expect("fronts is initialized with front_0; never empty");
        let mut next_front = Vec::new();

        for &i in current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = fronts.len();
                    next_front.push(j);
                }
            }
        }

        if next_front.is_empty() {
            break;
        }
        next_front.sort_unstable();
        fronts.push(next_front);
    }

    NondominatedSortResult { ranks, fronts }
}

/// Crowding distance assignment for diversity preservation.
///
/// Boundary solutions of either objective receive `f64::INFINITY`; interior
/// solutions accumulate the normalized gap between their neighbours.
///
/// # Example
///
/// ```
/// use u_qarm::ga::multi_objective::crowding_distance;
///
/// let distances = crowding_distance(&[[1.0, 0.9], [3.0, 0.5], [5.0, 0.1]]);
/// assert!(distances[0].is_infinite());
/// assert!(distances[1].is_finite());
/// assert!(distances[2].is_infinite());
/// ```
pub fn crowding_distance(objectives: &[[f64; 2]]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let mut distances = vec![0.0f64; n];

    for obj_idx in 0..2 {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| {
            objectives[a][obj_idx]
                .partial_cmp(&objectives[b][obj_idx])
                .unwrap_or(Ordering::Equal)
        });

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let min_val = objectives[indices[0]][obj_idx];
        let max_val = objectives[indices[n - 1]][obj_idx];
        let range = max_val - min_val;

        if range > 0.0 {
            for i in 1..(n - 1) {
                let prev = objectives[indices[i - 1]][obj_idx];
                let next = objectives[indices[i + 1]][obj_idx];
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}

/// NSGA-II truncation selection.
///
/// Orders solutions by Pareto rank (ascending) and, within a rank, by
/// crowding distance computed inside that front (descending), then takes
/// the first `count`. When `count` exceeds the population, the ordering is
/// cycled so the best solutions are repeated.
///
/// Returns indices into `objectives`.
///
/// # Example
///
/// ```
/// use u_qarm::ga::multi_objective::nsga2_select;
///
/// let objs = vec![[1.0, 0.1], [5.0, 0.5], [4.0, 0.4]];
/// let picked = nsga2_select(&objs, 1);
/// assert_eq!(picked, vec![1]);
/// ```
pub fn nsga2_select(objectives: &[[f64; 2]], count: usize) -> Vec<usize> {
    if objectives.is_empty() || count == 0 {
        return Vec::new();
    }

    let sorted = non_dominated_sort(objectives);
    let mut order: Vec<usize> = Vec::with_capacity(objectives.len());

    for front in &sorted.fronts {
        let front_objs: Vec<[f64; 2]> = front.iter().map(|&i| objectives[i]).collect();
        let crowding = crowding_distance(&front_objs);

        let mut ranked: Vec<(usize, f64)> = front.iter().copied().zip(crowding).collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        order.extend(ranked.into_iter().map(|(i, _)| i));
    }

    order.iter().copied().cycle().take(count).collect()
}

// ============================================================================
// Tests
// ============================================================================
