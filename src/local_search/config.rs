//! Search budget and cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables for the local search driver.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_dispatch::local_search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_max_rounds(50)
///     .with_time_limit(Duration::from_millis(200))
///     .with_relocate(false);
/// assert_eq!(config.max_rounds, 50);
/// assert_eq!(config.time_limit, Some(Duration::from_millis(200)));
/// assert!(config.two_opt);
/// assert!(!config.relocate);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Upper bound on improvement rounds.
    pub max_rounds: usize,
    /// Wall-clock budget, checked at the start of every round.
    pub time_limit: Option<Duration>,
    /// Enable intra-route 2-opt.
    pub two_opt: bool,
    /// Enable inter-route relocation.
    pub relocate: bool,
}

impl SearchConfig {
    /// Default round cap.
    pub const DEFAULT_MAX_ROUNDS: usize = 1000;

    /// Sets the round cap.
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Enables or disables 2-opt.
    pub fn with_two_opt(mut self, enabled: bool) -> Self {
        self.two_opt = enabled;
        self
    }

    /// Enables or disables relocation.
    pub fn with_relocate(mut self, enabled: bool) -> Self {
        self.relocate = enabled;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            time_limit: None,
            two_opt: true,
            relocate: true,
        }
    }
}

/// Cooperative cancellation handle shared between a solve and its caller.
///
/// Cloning yields another handle to the same flag.
///
/// # Examples
///
/// ```
/// use u_dispatch::local_search::CancelFlag;
///
/// let flag = CancelFlag::new();
/// let remote = flag.clone();
/// assert!(!flag.is_cancelled());
/// remote.cancel();
/// assert!(flag.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the search stop at the next round boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let c = SearchConfig::default();
        assert_eq!(c.max_rounds, SearchConfig::DEFAULT_MAX_ROUNDS);
        assert!(c.time_limit.is_none());
        assert!(c.two_opt && c.relocate);
    }

    #[test]
    fn test_config_serde_defaults() {
        let c: SearchConfig = serde_json::from_str(r#"{"max_rounds": 7}"#).expect("valid json");
        assert_eq!(c.max_rounds, 7);
        assert!(c.two_opt);
    }

    #[test]
    fn test_cancel_flag_across_threads() {
        let flag = CancelFlag::new();
        let remote = flag.clone();
        std::thread::spawn(move || remote.cancel())
            .join()
            .expect("thread finished");
        assert!(flag.is_cancelled());
    }
}
