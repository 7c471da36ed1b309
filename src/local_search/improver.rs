//! Round-based local search driver.

use std::time::{Duration, Instant};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::evaluation::RouteEvaluator;
use crate::models::{ProblemInstance, RouteSet};

use super::{relocate_pass, two_opt_improve, CancelFlag, SearchConfig};

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// A full round found no improving move.
    Converged,
    /// The configured number of rounds was used up.
    RoundLimit,
    /// The wall-clock budget ran out.
    TimeLimit,
    /// The caller raised the cancel flag.
    Cancelled,
}

/// Statistics from one local search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Rounds started.
    pub rounds: usize,
    /// Improving moves applied.
    pub moves: usize,
    /// Total cost before the search, in metres.
    pub initial_cost: i64,
    /// Total cost after the search, in metres.
    pub final_cost: i64,
    /// Why the search stopped.
    pub stop_reason: StopReason,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

impl SearchReport {
    /// Returns `true` if the search stopped before reaching a local optimum.
    ///
    /// The route set is still feasible; only its quality may be lower.
    pub fn budget_exceeded(&self) -> bool {
        self.stop_reason != StopReason::Converged
    }
}

/// Improves a route set with 2-opt and relocation until no move helps or
/// the budget runs out.
///
/// Each round first 2-opts every route in vehicle order, then runs one
/// relocation pass. Only strictly improving moves are applied, so cost
/// never increases and feasibility is kept throughout.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Delivery, GeoPoint, ProblemInstance, Vehicle};
/// use u_dispatch::constructive::nearest_feasible_insertion;
/// use u_dispatch::local_search::{LocalSearch, SearchConfig, StopReason};
///
/// let instance = ProblemInstance::new(
///     GeoPoint::ORIGIN,
///     vec![
///         Delivery::new("a", GeoPoint::new(0.01, 0.0)),
///         Delivery::new("b", GeoPoint::new(0.0, 0.01)),
///         Delivery::new("c", GeoPoint::new(-0.01, 0.0)),
///     ],
///     vec![Vehicle::new("v", 2), Vehicle::new("w", 2)],
///     1.0,
/// )
/// .unwrap();
///
/// let mut routes = nearest_feasible_insertion(&instance).unwrap();
/// let report = LocalSearch::new(SearchConfig::default()).improve(&instance, &mut routes);
/// assert_eq!(report.stop_reason, StopReason::Converged);
/// assert!(report.final_cost <= report.initial_cost);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalSearch {
    config: SearchConfig,
    cancel: Option<CancelFlag>,
}

impl LocalSearch {
    /// Creates a driver with the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Attaches a cancellation flag checked at every round boundary.
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the search in place and reports what happened.
    pub fn improve(&self, instance: &ProblemInstance, routes: &mut RouteSet) -> SearchReport {
        let start = Instant::now();
        let evaluator = RouteEvaluator::new(instance);
        let initial_cost = evaluator.total_cost(routes);
        let mut cost = initial_cost;
        let mut rounds = 0;
        let mut moves = 0;

        let stop_reason = if routes.num_served() == 0 {
            StopReason::Converged
        } else {
            loop {
                if let Some(reason) = self.budget_stop(rounds, start) {
                    break reason;
                }
                rounds += 1;

                let round_moves = self.run_round(instance, routes);
                moves += round_moves;
                let round_cost = evaluator.total_cost(routes);
                debug_assert!(round_cost <= cost, "local search worsened the solution");
                cost = round_cost;
                debug!("round {rounds}: {round_moves} moves, cost {cost}");

                if round_moves == 0 {
                    break StopReason::Converged;
                }
            }
        };

        let report = SearchReport {
            rounds,
            moves,
            initial_cost,
            final_cost: cost,
            stop_reason,
            elapsed: start.elapsed(),
        };
        debug!(
            "local search stopped ({:?}) after {} rounds, cost {} -> {}",
            report.stop_reason, report.rounds, report.initial_cost, report.final_cost
        );
        report
    }

    /// Returns a reason to stop before starting the next round, if any.
    fn budget_stop(&self, rounds: usize, start: Instant) -> Option<StopReason> {
        if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
            return Some(StopReason::Cancelled);
        }
        if self.config.time_limit.is_some_and(|limit| start.elapsed() >= limit) {
            return Some(StopReason::TimeLimit);
        }
        if rounds >= self.config.max_rounds {
            return Some(StopReason::RoundLimit);
        }
        None
    }

    fn run_round(&self, instance: &ProblemInstance, routes: &mut RouteSet) -> usize {
        let mut moves = 0;
        if self.config.two_opt {
            for vehicle in 0..routes.num_routes() {
                moves += two_opt_improve(routes.route_mut(vehicle).nodes_mut(), instance.costs());
            }
        }
        if self.config.relocate {
            moves += relocate_pass(routes, instance);
        }
        moves
    }
}
