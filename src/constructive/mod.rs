//! Constructive heuristics for building the initial route set.
//!
//! - [`nearest_feasible_insertion`] — Per-vehicle greedy nearest-feasible append, O(V·D²)

mod nearest_feasible;

pub use nearest_feasible::nearest_feasible_insertion;
