//! Advisory configuration.

use serde::{Deserialize, Serialize};

use crate::datetime::Instant;
use crate::rule::{is_near_dst_transition, TransitionProximity};

/// Default number of days before a transition during which reservations carry a warning
pub const DEFAULT_THRESHOLD_DAYS: u32 = 7;

/// Configuration of the Daylight Saving Time advisories shown to users
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    /// Number of days before a transition during which an instant is considered near it
    pub threshold_days: u32,
}

impl AdvisoryConfig {
    /// Construct an advisory configuration
    pub const fn new(threshold_days: u32) -> Self {
        Self { threshold_days }
    }

    /// Find the nearest upcoming transition, using the configured threshold
    pub fn proximity(&self, instant: Instant) -> TransitionProximity {
        is_near_dst_transition(instant, self.threshold_days)
    }
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_DAYS)
    }
}
