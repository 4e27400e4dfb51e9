//! Project and task types with their status state machines.
//!
//! Status transitions are one-way: a project only moves Active → Delayed or
//! Active → Completed, and a task only moves Pending → Overdue → Completed
//! (Overdue never returns to Pending; Completed is terminal). The
//! `can_transition_to` helpers document these rules for tests; the
//! scheduler itself only ever performs valid transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// Project priority level.
///
/// Serialized as its underlying numeric value (1 = high, 3 = low) so
/// exported snapshots stay stable regardless of variant naming.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::High),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::Low),
            other => Err(format!("invalid priority value: {other}")),
        }
    }
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Project is active and its tasks are schedulable.
    Active,
    /// Project missed its deadline with pending work remaining (terminal).
    Delayed,
    /// All project work is done (terminal).
    Completed,
}

impl ProjectStatus {
    /// Check if a transition is valid.
    pub fn can_transition_to(&self, to: &ProjectStatus) -> bool {
        match self {
            ProjectStatus::Active => {
                matches!(to, ProjectStatus::Delayed | ProjectStatus::Completed)
            }
            ProjectStatus::Delayed | ProjectStatus::Completed => false,
        }
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Active
    }
}

/// Task status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task has remaining effort and its deadline has not passed.
    Pending,
    /// Task deadline passed with effort remaining; stays flagged while
    /// being drained with priority.
    Overdue,
    /// Remaining effort reached zero (terminal).
    Completed,
}

impl TaskStatus {
    /// Check if a transition is valid.
    pub fn can_transition_to(&self, to: &TaskStatus) -> bool {
        match self {
            TaskStatus::Pending => {
                matches!(to, TaskStatus::Overdue | TaskStatus::Completed)
            }
            TaskStatus::Overdue => matches!(to, TaskStatus::Completed),
            TaskStatus::Completed => false,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// A project that groups related tasks.
///
/// The category string is free-form and only used by the diversity rule to
/// group work; the scheduler never interprets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub category: String,
    pub priority: Priority,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub status: ProjectStatus,
}

impl Project {
    /// Create a new active project.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        priority: Priority,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            priority,
            deadline,
            status: ProjectStatus::Active,
        }
    }
}

/// A unit of schedulable work belonging to a project.
///
/// `project_id` is a foreign reference, not ownership: the project is looked
/// up by id at scoring time, and a dangling reference makes the task
/// unschedulable rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub name: String,
    /// Effort estimate in hours. Immutable after creation.
    pub estimated_hours: f64,
    /// Hours still to allocate. Starts at `estimated_hours`, never
    /// increases, and never drops below zero.
    pub remaining_hours: f64,
    #[serde(default)]
    pub status: TaskStatus,
    /// Per-task due date; when absent the project deadline applies.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new pending task with its full estimate remaining.
    ///
    /// Fails when the estimate is not a positive number of hours.
    pub fn new(
        id: impl Into<String>,
        project_id: impl Into<String>,
        name: impl Into<String>,
        estimated_hours: f64,
    ) -> Result<Self> {
        let id = id.into();
        if estimated_hours <= 0.0 {
            return Err(SchedulerError::NonPositiveEstimate {
                task_id: id,
                hours: estimated_hours,
            });
        }
        Ok(Self {
            id,
            project_id: project_id.into(),
            name: name.into(),
            estimated_hours,
            remaining_hours: estimated_hours,
            status: TaskStatus::Pending,
            due_date: None,
        })
    }

    /// Set a per-task due date overriding the project deadline.
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// The deadline that applies to this task: its own due date if set,
    /// otherwise the owning project's deadline.
    pub fn effective_deadline(&self, project: &Project) -> DateTime<Utc> {
        self.due_date.unwrap_or(project.deadline)
    }
}
