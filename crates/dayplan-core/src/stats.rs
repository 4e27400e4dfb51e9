//! Read-side aggregation over a finished schedule.
//!
//! Pure functions of the scheduler's current state; callable any number of
//! times after a run without mutating anything.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::schedule::ScheduleEntry;
use crate::scheduler::TaskScheduler;
use crate::task::{Project, Task};

/// Aggregate statistics for a produced schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Days that received at least one allocation.
    pub total_days_scheduled: usize,
    /// Total number of schedule entries.
    pub total_tasks_scheduled: usize,
    /// Total allocated hours across the schedule.
    pub total_hours_scheduled: f64,
    /// Allocated hours per project category.
    pub category_distribution: BTreeMap<String, f64>,
    /// Tasks still pending after the run.
    pub pending_tasks_remaining: usize,
    /// Tasks still sitting in the overdue queue.
    pub overdue_tasks: usize,
    /// Projects marked delayed by the run.
    pub delayed_projects: usize,
}

/// Serializable snapshot of a run: the schedule keyed by ISO date, the
/// summary, and flat dumps of the entity maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanExport {
    pub schedule: BTreeMap<String, Vec<ScheduleEntry>>,
    pub summary: ScheduleSummary,
    pub projects: BTreeMap<String, Project>,
    pub tasks: BTreeMap<String, Task>,
}

/// Compute summary statistics for the scheduler's last run.
pub fn summarize(scheduler: &TaskScheduler) -> ScheduleSummary {
    let mut total_tasks_scheduled = 0;
    let mut total_hours_scheduled = 0.0;
    let mut category_distribution: BTreeMap<String, f64> = BTreeMap::new();

    for entries in scheduler.schedule().values() {
        for entry in entries {
            total_tasks_scheduled += 1;
            total_hours_scheduled += entry.allocated_hours;

            let category = scheduler
                .tasks()
                .get(&entry.task_id)
                .and_then(|task| scheduler.project(&task.project_id))
                .map(|project| project.category.clone());
            if let Some(category) = category {
                *category_distribution.entry(category).or_insert(0.0) += entry.allocated_hours;
            }
        }
    }

    ScheduleSummary {
        total_days_scheduled: scheduler.schedule().len(),
        total_tasks_scheduled,
        total_hours_scheduled,
        category_distribution,
        pending_tasks_remaining: scheduler.pending_tasks().len(),
        overdue_tasks: scheduler.overdue_queue().len(),
        delayed_projects: scheduler.delayed_projects().len(),
    }
}

/// Build the full serializable snapshot for the scheduler's last run.
pub fn export(scheduler: &TaskScheduler) -> PlanExport {
    let schedule = scheduler
        .schedule()
        .iter()
        .map(|(date, entries)| (date.format("%Y-%m-%d").to_string(), entries.clone()))
        .collect();

    PlanExport {
        schedule,
        summary: summarize(scheduler),
        projects: scheduler.projects().clone(),
        tasks: scheduler.tasks().clone(),
    }
}
