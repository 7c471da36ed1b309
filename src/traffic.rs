//! Traffic multiplier estimation from time of day.
//!
//! Produces the scalar that scales every leg of the cost matrix. The base
//! estimate depends only on hour, weekday and how many stops are planned;
//! an optional random disturbance models weather and incidents and takes
//! a caller-supplied RNG so results stay reproducible under a fixed seed.
//! A reported incident is applied last, on top of the capped estimate.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::request::TrafficData;

/// Upper bound on the time-of-day estimate, before any incident.
pub const MAX_MULTIPLIER: f64 = 2.5;

/// Extra factor applied when an incident is reported.
pub const INCIDENT_MULTIPLIER: f64 = 1.5;

const INCIDENT_ADVISORY: &str = "Traffic incident detected - expect delays";

/// A reported disruption in the delivery area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Incident {
    /// Road works.
    Construction,
    /// Collision or breakdown.
    Accident,
    /// Crowds from a public event.
    Event,
}

/// When and how much is being delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficConditions {
    /// Hour of day, 0–23 (taken modulo 24).
    pub hour: u8,
    /// Day of week, 0 = Sunday … 6 = Saturday (taken modulo 7).
    pub weekday: u8,
    /// Number of planned deliveries.
    pub deliveries: usize,
    /// Incident reported for the area, if any.
    #[serde(default)]
    pub incident: Option<Incident>,
}

impl TrafficConditions {
    /// Creates a set of conditions.
    pub fn new(hour: u8, weekday: u8, deliveries: usize) -> Self {
        Self {
            hour,
            weekday,
            deliveries,
            incident: None,
        }
    }

    /// Marks an incident in the delivery area.
    pub fn with_incident(mut self, incident: Incident) -> Self {
        self.incident = Some(incident);
        self
    }

    fn is_weekend(&self) -> bool {
        matches!(self.weekday % 7, 0 | 6)
    }
}

/// An estimated multiplier with its explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficEstimate {
    /// Multiplier to apply to every distance. The time-of-day part is
    /// capped at [`MAX_MULTIPLIER`]; an incident scales it further.
    pub multiplier: f64,
    /// Human-readable cause.
    pub reason: String,
    /// Advice for dispatchers.
    pub recommendations: Vec<String>,
}

impl From<&TrafficEstimate> for TrafficData {
    fn from(estimate: &TrafficEstimate) -> Self {
        TrafficData {
            multiplier: estimate.multiplier,
        }
    }
}

/// Rule-based traffic estimator.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_dispatch::traffic::{TrafficConditions, TrafficEstimator};
///
/// // Tuesday 08:00, three stops: morning rush.
/// let conditions = TrafficConditions::new(8, 2, 3);
/// let estimate = TrafficEstimator.estimate(conditions);
/// assert!((estimate.multiplier - 1.75).abs() < 1e-9);
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let disturbed = TrafficEstimator.estimate_with_disturbance(conditions, &mut rng);
/// assert!(disturbed.multiplier >= estimate.multiplier);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TrafficEstimator;

impl TrafficEstimator {
    /// Deterministic estimate from the time-of-day rules.
    pub fn estimate(&self, conditions: TrafficConditions) -> TrafficEstimate {
        let (multiplier, reason) = base_multiplier(conditions);
        finish(multiplier, reason, conditions.incident)
    }

    /// Estimate with a random weather/incident disturbance drawn from `rng`.
    ///
    /// With draw `r` in `[0, 1)`: `r > 0.85` scales by 1.4, `r > 0.7` by 1.1.
    pub fn estimate_with_disturbance<R: Rng>(
        &self,
        conditions: TrafficConditions,
        rng: &mut R,
    ) -> TrafficEstimate {
        let (mut multiplier, mut reason) = base_multiplier(conditions);
        let r: f64 = rng.random();
        if r > 0.85 {
            multiplier *= 1.4;
            reason.push_str(" + weather/incident impact");
        } else if r > 0.7 {
            multiplier *= 1.1;
            reason.push_str(" + minor delays");
        }
        finish(multiplier, reason, conditions.incident)
    }
}

fn base_multiplier(conditions: TrafficConditions) -> (f64, String) {
    let hour = conditions.hour % 24;
    let n = conditions.deliveries as f64;

    let (mut multiplier, reason) = if conditions.is_weekend() {
        match hour {
            11..=15 => (1.1 + n * 0.02, "Weekend shopping hours"),
            19..=21 => (1.2, "Weekend evening activities"),
            _ => (0.8, "Weekend off-peak hours"),
        }
    } else {
        match hour {
            7..=9 => (1.6 + n * 0.05, "Morning rush hour - heavy congestion"),
            17..=19 => (1.8 + n * 0.06, "Evening rush hour - peak traffic"),
            12..=14 => (1.2 + n * 0.03, "Lunch hour - moderate traffic"),
            22..=23 | 0..=5 => (0.6, "Night hours - minimal traffic"),
            10..=11 => (1.1, "Mid-morning - light traffic"),
            15..=16 => (1.3, "Afternoon - building traffic"),
            _ => (1.0, "Normal traffic conditions"),
        }
    };

    let mut reason = reason.to_string();
    if conditions.deliveries > 5 {
        multiplier += 0.1;
        reason.push_str(" + high delivery density");
    }
    (multiplier, reason)
}

fn finish(multiplier: f64, reason: String, incident: Option<Incident>) -> TrafficEstimate {
    let mut multiplier = multiplier.min(MAX_MULTIPLIER);
    let mut recommendations = if multiplier > 1.5 {
        vec![
            "Consider alternative routes during peak hours".to_string(),
            "Allow extra time for deliveries".to_string(),
        ]
    } else if multiplier < 0.9 {
        vec!["Optimal time for fast deliveries".to_string()]
    } else {
        Vec::new()
    };
    if incident.is_some() {
        multiplier *= INCIDENT_MULTIPLIER;
        recommendations.push(INCIDENT_ADVISORY.to_string());
    }
    TrafficEstimate {
        multiplier,
        reason,
        recommendations,
    }
}
