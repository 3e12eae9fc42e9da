//! Quantitative association rule mining.
//!
//! Discovers rules of the form `A ∈ [a₁, a₂] AND B ∈ [b₁, b₂] ⇒ Y ∈ [y₁, y₂]`
//! over numeric tables. Antecedent intervals are searched with a
//! two-objective evolutionary algorithm maximizing support and confidence;
//! rules are grown attribute by attribute in a depth-first tree search that
//! commits an addition only when it moves the Pareto front far enough.
//!
//! - **Data** ([`data`]): immutable numeric dataset with per-column
//!   percentile lookups, and the resolved rule consequent.
//! - **Rules** ([`rule`]): interval genes, candidates, fitness evaluation,
//!   the support constraint and Gaussian mutation.
//! - **Evolution** ([`ga`]): a generic NSGA-II loop over two maximized
//!   objectives.
//! - **Fronts** ([`front`]): Pareto front extraction and the area-based
//!   comparisons that drive pruning.
//! - **Search** ([`search`]): attribute ranking, range refinement and the
//!   rule-tree session.
//!
//! # Example
//!
//! ```
//! use u_qarm::data::{Dataset, TargetSpec};
//! use u_qarm::search::{SearchParams, SearchSession};
//!
//! let rows: Vec<Vec<f64>> = (0..80)
//!     .map(|i| {
//!         let x = i as f64;
//!         let noise = ((i * 37) % 80) as f64;
//!         vec![x, noise, if x >= 60.0 { 1.0 } else { 0.0 }]
//!     })
//!     .collect();
//! let dataset = Dataset::new(vec!["x".into(), "noise".into(), "y".into()], rows).unwrap();
//! let target = TargetSpec::range("y", Some(1.0), None).resolve(&dataset).unwrap();
//!
//! let params = SearchParams::fast().with_max_depth(1).with_seed(7);
//! let mut session = SearchSession::new(&dataset, target, params).unwrap();
//! let tree = session.run().unwrap();
//! for rule in tree.rules() {
//!     assert_eq!(rule.len(), 1);
//! }
//! ```
//!
//! # Architecture
//!
//! The evolutionary engine knows nothing about rules: the rule layer plugs
//! in through [`ga::MoeaProblem`]. Only setup is fallible; a search that
//! finds nothing returns an empty tree.

pub mod data;
pub mod error;
pub mod front;
pub mod ga;
pub mod random;
pub mod rule;
pub mod search;

pub use data::{Dataset, Interval, Target, TargetSpec};
pub use error::{QarmError, Result};
pub use search::{RuleTree, SearchParams, SearchSession};
