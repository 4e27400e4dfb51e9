//! Schedule output types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One committed allocation of hours to a task on a given day.
///
/// Entries are immutable once created. `allocated_hours` is always a
/// positive multiple of half an hour; the start/end markers are
/// display-only and carry no scheduling meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub task_id: String,
    pub task_name: String,
    pub allocated_hours: f64,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl ScheduleEntry {
    /// Create a new entry without display markers.
    pub fn new(task_id: impl Into<String>, task_name: impl Into<String>, allocated_hours: f64) -> Self {
        Self {
            task_id: task_id.into(),
            task_name: task_name.into(),
            allocated_hours,
            start_time: None,
            end_time: None,
        }
    }
}

/// A full plan: calendar date to the entries allocated on that day, in
/// allocation order. Days with no allocations are absent.
pub type Schedule = BTreeMap<NaiveDate, Vec<ScheduleEntry>>;
