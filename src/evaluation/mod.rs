//! Route cost and feasibility evaluation.

mod evaluator;

pub use evaluator::{RouteEvaluator, Violation, ViolationType};
