//! Urgency scoring factors and weights.
//!
//! A task's urgency is a weighted sum of three factors:
//! - a static priority factor from the owning project's priority level
//! - a deadline factor that grows as the effective deadline approaches
//! - a workload factor measuring project-wide remaining effort pressure
//!
//! All knobs live in plain config structs so the engine can be exercised
//! under alternate weighting schemes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Priority;

/// Score contribution per priority level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityFactors {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl PriorityFactors {
    /// Factor for a given priority level.
    pub fn factor(&self, priority: Priority) -> f64 {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

impl Default for PriorityFactors {
    fn default() -> Self {
        Self {
            high: 1.5,
            medium: 1.0,
            low: 0.5,
        }
    }
}

/// Weights combining the three urgency factors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct UrgencyWeights {
    /// Weight of the static priority factor.
    pub priority: f64,
    /// Weight of the deadline-pressure factor.
    pub deadline: f64,
    /// Weight of the project-workload factor.
    pub workload: f64,
}

impl Default for UrgencyWeights {
    fn default() -> Self {
        Self {
            priority: 2.0,
            deadline: 3.0,
            workload: 1.5,
        }
    }
}

/// Whole days until `deadline`, clamped to at least one.
///
/// The clamp caps the deadline factor at 1.0 even for already-due tasks;
/// lateness beyond that is the overdue queue's job, not the scorer's.
fn clamped_days_until(deadline: DateTime<Utc>, current: DateTime<Utc>) -> f64 {
    (deadline - current).num_days().max(1) as f64
}

/// Deadline-pressure factor: `1 / max(1, days_until_deadline)`.
pub fn deadline_factor(deadline: DateTime<Utc>, current: DateTime<Utc>) -> f64 {
    1.0 / clamped_days_until(deadline, current)
}

/// Project-workload factor: remaining pending hours in the project spread
/// over the days left until its deadline.
pub fn workload_factor(
    pending_remaining_hours: f64,
    project_deadline: DateTime<Utc>,
    current: DateTime<Utc>,
) -> f64 {
    pending_remaining_hours / clamped_days_until(project_deadline, current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn deadline_factor_grows_as_deadline_approaches() {
        let current = date(2024, 1, 10);
        let far = deadline_factor(date(2024, 1, 20), current);
        let near = deadline_factor(date(2024, 1, 12), current);
        assert!(near > far);
        assert!((near - 0.5).abs() < 1e-9);
    }

    #[test]
    fn deadline_factor_is_clamped_at_one_for_due_work() {
        let current = date(2024, 1, 10);
        // Due today and a month overdue score the same; the overdue queue
        // handles lateness.
        assert_eq!(deadline_factor(date(2024, 1, 10), current), 1.0);
        assert_eq!(deadline_factor(date(2023, 12, 10), current), 1.0);
    }

    #[test]
    fn workload_factor_spreads_hours_over_remaining_days() {
        let current = date(2024, 1, 10);
        let factor = workload_factor(20.0, date(2024, 1, 20), current);
        assert!((factor - 2.0).abs() < 1e-9);
    }

    #[test]
    fn priority_factors_use_configured_table() {
        let factors = PriorityFactors::default();
        assert_eq!(factors.factor(Priority::High), 1.5);
        assert_eq!(factors.factor(Priority::Medium), 1.0);
        assert_eq!(factors.factor(Priority::Low), 0.5);

        let flat = PriorityFactors {
            high: 1.0,
            medium: 1.0,
            low: 1.0,
        };
        assert_eq!(flat.factor(Priority::Low), 1.0);
    }
}
