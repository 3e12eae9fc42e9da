//! Rule-tree search.
//!
//! Chains evolutionary runs into a depth-first search over rule
//! antecedents. At each node an attribute-ranking run proposes the next
//! attribute, a range-refinement run fixes its interval, and the
//! [`front_distance`](crate::front::front_distance) between the new front
//! and the parent front decides whether the addition is committed.
//!
//! # Key Types
//!
//! - [`SearchParams`]: population sizes, generation counts, support window,
//!   depth/width limits and the improvement threshold
//! - [`SearchContext`]: dataset, target and parameters shared by every run
//! - [`RuleProblem`]: the rule operators behind [`MoeaProblem`](crate::ga::MoeaProblem)
//! - [`top_attribute`] / [`top_range`]: the two search primitives
//! - [`SearchSession`]: the depth-first driver
//! - [`RuleTree`]: committed additions, their fronts and improvements

mod context;
mod params;
mod problem;
mod ranker;
mod refiner;
mod session;
mod tree;

pub use context::SearchContext;
pub use params::SearchParams;
pub use problem::RuleProblem;
pub use ranker::{top_attribute, AttributeRanking};
pub use refiner::{top_range, RangeSelection};
pub use session::SearchSession;
pub use tree::{NodeId, RuleStep, RuleTree, RuleTreeNode};
