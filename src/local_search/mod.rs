//! Local search for improving a feasible route set.
//!
//! - [`two_opt_improve`] — Intra-route 2-opt segment reversal
//! - [`relocate_pass`] — Inter-route delivery relocation
//! - [`LocalSearch`] — Round driver with round, time and cancellation budgets

mod config;
mod improver;
mod relocate;
mod two_opt;

pub use config::{CancelFlag, SearchConfig};
pub use improver::{LocalSearch, SearchReport, StopReason};
pub use relocate::relocate_pass;
pub use two_opt::{two_opt_delta, two_opt_improve};
