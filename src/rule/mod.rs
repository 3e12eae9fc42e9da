//! Rule representation and operators.
//!
//! A rule antecedent is a [`RuleCandidate`]: a list of [`AttributeGene`]s,
//! each a closed interval over one attribute. The consequent is the fixed
//! [`Target`](crate::data::Target) of the session.
//!
//! # Key Types
//!
//! - [`SearchConfig`] / [`ChromosomeMode`]: what one evolutionary run may build
//! - [`CandidateFactory`]: random valid candidates (pool or full mode)
//! - [`FitnessEvaluator`]: `(support, confidence)`, lift, confusion counts
//! - [`SupportConstraint`]: support window test and repair-by-resampling
//! - [`GaussianMutator`]: Gaussian interval translation

mod candidate;
mod config;
mod constraint;
mod factory;
mod fitness;
mod gene;
mod mutation;

pub use candidate::RuleCandidate;
pub use config::{ChromosomeMode, SearchConfig};
pub use constraint::{gap_to_range, SupportConstraint};
pub use factory::{CandidateFactory, IndexPool};
pub use fitness::{ConfusionMatrix, FitnessEvaluator, RuleFitness};
pub use gene::AttributeGene;
pub use mutation::GaussianMutator;
