//! Error types.
//!
//! Infeasibility and bad input are ordinary outcomes of a solve and are
//! returned as values. Running out of search budget is not an error at
//! all; see [`SearchReport`](crate::local_search::SearchReport).

use std::fmt;

use crate::solver::PipelineState;

/// Malformed problem input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// The fleet is empty.
    NoVehicles,
    /// A node has a NaN or infinite coordinate (node 0 = depot).
    NonFiniteCoordinate {
        /// Matrix node index.
        node: usize,
    },
    /// A delivery location does not hold exactly two coordinates.
    MalformedLocation {
        /// Delivery index (0-based).
        delivery: usize,
        /// Number of coordinates received.
        len: usize,
    },
    /// A vehicle reports a negative capacity.
    NegativeCapacity {
        /// Vehicle identifier.
        vehicle: String,
    },
    /// The traffic multiplier is negative, not finite, or too large for
    /// integer route costs.
    InvalidTrafficFactor(f64),
    /// Two vehicles share an identifier.
    DuplicateVehicleId(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NoVehicles => write!(f, "no vehicles provided"),
            InputError::NonFiniteCoordinate { node } => {
                write!(f, "node {node} has a non-finite coordinate")
            }
            InputError::MalformedLocation { delivery, len } => write!(
                f,
                "delivery {delivery} location has {len} coordinates, expected 2"
            ),
            InputError::NegativeCapacity { vehicle } => {
                write!(f, "vehicle {vehicle} has a negative capacity")
            }
            InputError::InvalidTrafficFactor(factor) => write!(
                f,
                "traffic factor {factor} must be finite, >= 0 and keep route costs within i64"
            ),
            InputError::DuplicateVehicleId(id) => write!(f, "duplicate vehicle id {id}"),
        }
    }
}

impl std::error::Error for InputError {}

/// Total demand exceeds what the fleet can carry.
///
/// Lists every delivery (0-based, ascending) that construction could not
/// place on any vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfeasibleError {
    unplaced: Vec<usize>,
}

impl InfeasibleError {
    /// Creates the error; indices are sorted ascending.
    pub fn new(mut unplaced: Vec<usize>) -> Self {
        unplaced.sort_unstable();
        Self { unplaced }
    }

    /// Deliveries left without a vehicle.
    pub fn unplaced(&self) -> &[usize] {
        &self.unplaced
    }
}

impl fmt::Display for InfeasibleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fleet capacity exhausted, {} deliveries unplaced: {:?}",
            self.unplaced.len(),
            self.unplaced
        )
    }
}

impl std::error::Error for InfeasibleError {}

/// Any failure of a solve.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The input could not be turned into a problem instance.
    Input(InputError),
    /// Not every delivery fits in the fleet.
    Infeasible(InfeasibleError),
    /// A pipeline stage was invoked out of order.
    InvalidTransition {
        /// State the pipeline was in.
        from: PipelineState,
        /// State the caller tried to reach.
        to: PipelineState,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Input(e) => write!(f, "invalid input: {e}"),
            SolveError::Infeasible(e) => write!(f, "infeasible: {e}"),
            SolveError::InvalidTransition { from, to } => {
                write!(f, "cannot move pipeline from {from:?} to {to:?}")
            }
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::Input(e) => Some(e),
            SolveError::Infeasible(e) => Some(e),
            SolveError::InvalidTransition { .. } => None,
        }
    }
}

impl From<InputError> for SolveError {
    fn from(e: InputError) -> Self {
        SolveError::Input(e)
    }
}

impl From<InfeasibleError> for SolveError {
    fn from(e: InfeasibleError) -> Self {
        SolveError::Infeasible(e)
    }
}
