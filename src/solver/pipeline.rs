//! Staged solve pipeline.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::constructive::nearest_feasible_insertion;
use crate::error::SolveError;
use crate::evaluation::RouteEvaluator;
use crate::local_search::{CancelFlag, LocalSearch, SearchConfig, SearchReport};
use crate::models::{OptimizationResult, ProblemInstance, RouteSet};

use super::extract;

/// Lifecycle of one solve.
///
/// `Built → Constructed → Improved → Extracted`, or `Built → Infeasible`
/// when construction cannot place every delivery. No stage runs twice and
/// there are no backward transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    /// Instance ready, nothing computed.
    Built,
    /// Initial feasible route set exists.
    Constructed,
    /// Local search has finished (converged or out of budget).
    Improved,
    /// Result handed out; terminal.
    Extracted,
    /// Fleet capacity insufficient; terminal.
    Infeasible,
}

/// Settings for a full solve.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Local search budget and operators.
    pub search: SearchConfig,
    /// Optional external stop signal.
    pub cancel: Option<CancelFlag>,
}

impl SolverConfig {
    /// Replaces the local search settings.
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Attaches a cancellation flag.
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn local_search(&self) -> LocalSearch {
        let search = LocalSearch::new(self.search.clone());
        match &self.cancel {
            Some(flag) => search.with_cancel_flag(flag.clone()),
            None => search,
        }
    }
}

/// Reported result together with search statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    /// Per-vehicle routes and total distance.
    pub result: OptimizationResult,
    /// How the improvement phase ended.
    pub search: SearchReport,
}

impl SolveOutcome {
    /// Returns `true` if local search stopped before converging.
    pub fn budget_exceeded(&self) -> bool {
        self.search.budget_exceeded()
    }
}

/// Drives one instance through construction, improvement and extraction.
///
/// The pipeline owns the route set while it is being optimized; callers
/// only get shared views of it.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Delivery, GeoPoint, ProblemInstance, Vehicle};
/// use u_dispatch::solver::{Pipeline, PipelineState, SolverConfig};
///
/// let instance = ProblemInstance::new(
///     GeoPoint::ORIGIN,
///     vec![Delivery::new("a", GeoPoint::new(0.01, 0.0))],
///     vec![Vehicle::new("v", 1)],
///     1.0,
/// )
/// .unwrap();
///
/// let mut pipeline = Pipeline::new(&instance, SolverConfig::default());
/// pipeline.construct().unwrap();
/// pipeline.improve().unwrap();
/// let outcome = pipeline.extract().unwrap();
/// assert_eq!(pipeline.state(), PipelineState::Extracted);
/// assert_eq!(outcome.result.num_served(), 1);
/// ```
#[derive(Debug)]
pub struct Pipeline<'a> {
    instance: &'a ProblemInstance,
    config: SolverConfig,
    state: PipelineState,
    routes: RouteSet,
    report: Option<SearchReport>,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline in the `Built` state.
    pub fn new(instance: &'a ProblemInstance, config: SolverConfig) -> Self {
        Self {
            instance,
            config,
            state: PipelineState::Built,
            routes: RouteSet::new(instance.vehicles().len()),
            report: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Current route set (empty routes before construction).
    pub fn routes(&self) -> &RouteSet {
        &self.routes
    }

    /// Builds the initial route set.
    ///
    /// Moves to `Infeasible` and returns [`SolveError::Infeasible`] if the
    /// fleet cannot take every delivery.
    pub fn construct(&mut self) -> Result<&RouteSet, SolveError> {
        self.expect_state(PipelineState::Built, PipelineState::Constructed)?;
        match nearest_feasible_insertion(self.instance) {
            Ok(routes) => {
                debug_assert!(
                    RouteEvaluator::new(self.instance).violations(&routes).is_empty(),
                    "construction produced an invalid route set"
                );
                self.routes = routes;
                self.transition(PipelineState::Constructed);
                Ok(&self.routes)
            }
            Err(e) => {
                self.transition(PipelineState::Infeasible);
                Err(e.into())
            }
        }
    }

    /// Runs local search on the constructed routes.
    pub fn improve(&mut self) -> Result<&SearchReport, SolveError> {
        self.expect_state(PipelineState::Constructed, PipelineState::Improved)?;
        let report = self
            .config
            .local_search()
            .improve(self.instance, &mut self.routes);
        self.transition(PipelineState::Improved);
        Ok(&*self.report.insert(report))
    }

    /// Produces the reported result; terminal.
    pub fn extract(&mut self) -> Result<SolveOutcome, SolveError> {
        self.expect_state(PipelineState::Improved, PipelineState::Extracted)?;
        let search = match self.report.take() {
            Some(report) => report,
            None => {
                return Err(SolveError::InvalidTransition {
                    from: self.state,
                    to: PipelineState::Extracted,
                })
            }
        };
        let result = extract(self.instance, &self.routes);
        self.transition(PipelineState::Extracted);
        Ok(SolveOutcome { result, search })
    }

    fn expect_state(&self, expected: PipelineState, to: PipelineState) -> Result<(), SolveError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SolveError::InvalidTransition {
                from: self.state,
                to,
            })
        }
    }

    fn transition(&mut self, to: PipelineState) {
        debug!("pipeline {:?} -> {:?}", self.state, to);
        self.state = to;
    }
}

/// One-call solver: construct, improve, extract.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Delivery, GeoPoint, ProblemInstance, Vehicle};
/// use u_dispatch::solver::{Solver, SolverConfig};
///
/// let instance = ProblemInstance::new(
///     GeoPoint::ORIGIN,
///     vec![
///         Delivery::new("a", GeoPoint::new(0.01, 0.0)),
///         Delivery::new("b", GeoPoint::new(0.0, 0.01)),
///     ],
///     vec![Vehicle::new("v", 2)],
///     1.0,
/// )
/// .unwrap();
///
/// let outcome = Solver::new(SolverConfig::default()).solve(&instance).unwrap();
/// assert_eq!(outcome.result.routes()[0].delivery_sequence.len(), 2);
/// assert!((outcome.result.total_distance() - 3.797).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves an instance end to end.
    pub fn solve(&self, instance: &ProblemInstance) -> Result<SolveOutcome, SolveError> {
        let mut pipeline = Pipeline::new(instance, self.config.clone());
        pipeline.construct()?;
        pipeline.improve()?;
        let outcome = pipeline.extract()?;
        info!(
            "solved {} deliveries with {} vehicles: {:.3} km ({:?}, {} rounds)",
            instance.num_deliveries(),
            instance.vehicles().len(),
            outcome.result.total_distance(),
            outcome.search.stop_reason,
            outcome.search.rounds
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::StopReason;
    use crate::models::{Delivery, GeoPoint, Vehicle};

    fn instance(capacity: i32) -> ProblemInstance {
        ProblemInstance::new(
            GeoPoint::ORIGIN,
            vec![
                Delivery::new("a", GeoPoint::new(0.01, 0.0)),
                Delivery::new("b", GeoPoint::new(0.0, 0.01)),
                Delivery::new("c", GeoPoint::new(0.02, 0.01)),
            ],
            vec![Vehicle::new("v", capacity), Vehicle::new("w", capacity)],
            1.0,
        )
        .expect("valid")
    }

    #[test]
    fn test_pipeline_happy_path() {
        let _ = env_logger::builder().is_test(true).try_init();
        let p = instance(2);
        let mut pipeline = Pipeline::new(&p, SolverConfig::default());
        assert_eq!(pipeline.state(), PipelineState::Built);
        pipeline.construct().expect("feasible");
        assert_eq!(pipeline.state(), PipelineState::Constructed);
        let initial = pipeline.improve().expect("improves").initial_cost;
        assert_eq!(pipeline.state(), PipelineState::Improved);
        let outcome = pipeline.extract().expect("extracts");
        assert_eq!(pipeline.state(), PipelineState::Extracted);
        assert_eq!(outcome.result.num_served(), 3);
        assert!(outcome.search.final_cost <= initial);
    }

    #[test]
    fn test_pipeline_infeasible_is_terminal() {
        let p = instance(1);
        let mut pipeline = Pipeline::new(&p, SolverConfig::default());
        let err = pipeline.construct().expect_err("infeasible");
        assert!(matches!(err, SolveError::Infeasible(_)));
        assert_eq!(pipeline.state(), PipelineState::Infeasible);
        assert_eq!(
            pipeline.improve().expect_err("terminal"),
            SolveError::InvalidTransition {
                from: PipelineState::Infeasible,
                to: PipelineState::Improved,
            }
        );
    }

    #[test]
    fn test_pipeline_rejects_out_of_order() {
        let p = instance(2);
        let mut pipeline = Pipeline::new(&p, SolverConfig::default());
        assert!(matches!(
            pipeline.extract(),
            Err(SolveError::InvalidTransition { .. })
        ));
        pipeline.construct().expect("feasible");
        assert!(matches!(
            pipeline.construct(),
            Err(SolveError::InvalidTransition { .. })
        ));
        assert_eq!(pipeline.state(), PipelineState::Constructed);
    }

    #[test]
    fn test_solver_cancelled_keeps_construction() {
        let p = instance(2);
        let flag = CancelFlag::new();
        flag.cancel();
        let config = SolverConfig::default().with_cancel_flag(flag);

        let mut pipeline = Pipeline::new(&p, config.clone());
        let constructed = pipeline.construct().expect("feasible").clone();

        let outcome = Solver::new(config).solve(&p).expect("solves");
        assert_eq!(outcome.search.stop_reason, StopReason::Cancelled);
        assert!(outcome.budget_exceeded());
        let sequences: Vec<Vec<usize>> = outcome
            .result
            .routes()
            .iter()
            .map(|r| r.delivery_sequence.iter().map(|i| i + 1).collect())
            .collect();
        assert_eq!(sequences, constructed.sequences());
    }

    #[test]
    fn test_solver_deterministic() {
        let p = instance(2);
        let solver = Solver::default();
        let a = solver.solve(&p).expect("solves");
        let b = solver.solve(&p).expect("solves");
        assert_eq!(a.result, b.result);
    }
}
