//! Multi-objective evolutionary engine.
//!
//! A generic, domain-agnostic NSGA-II loop over two maximized objectives.
//! The rule-mining layer defines its problem by implementing
//! [`MoeaProblem`], which specifies how to create, evaluate, mutate and
//! repair individuals.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution with a cached fitness
//! - [`MoeaProblem`]: Problem definition: initialization, evaluation, operators, constraint
//!
//! # Key Types
//!
//! - [`EvolutionConfig`]: Algorithm parameters (population size, generations, mutation)
//! - [`EvolutionEngine`]: Executes the evolutionary loop
//! - [`EvolutionResult`]: Final population with run statistics
//!
//! # Submodules
//!
//! - [`multi_objective`]: Pareto non-dominated sorting, crowding distance and truncation selection
//!
//! # References
//!
//! - Deb et al. (2002), *A Fast and Elitist Multiobjective GA: NSGA-II*

mod config;
pub mod multi_objective;
mod runner;
mod types;

pub use config::EvolutionConfig;
pub use runner::{EvolutionEngine, EvolutionResult};
pub use types::{Fitness, Individual, MoeaProblem};
