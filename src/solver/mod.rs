//! Solve pipeline.
//!
//! - [`Pipeline`] — Explicit `Built → Constructed → Improved → Extracted` state machine
//! - [`Solver`] — One-call facade over the pipeline
//! - [`extract`] — Route set to reported result

mod extract;
mod pipeline;

pub use extract::extract;
pub use pipeline::{Pipeline, PipelineState, SolveOutcome, Solver, SolverConfig};
