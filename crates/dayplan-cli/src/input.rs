//! Plan file loading.
//!
//! A plan file is a JSON document with optional scheduler config plus the
//! project and task pools:
//!
//! ```json
//! {
//!   "config": { "daily_work_hours": 6.0 },
//!   "projects": [
//!     { "id": "web", "name": "Website", "category": "dev",
//!       "priority": 1, "deadline": "2024-01-15T00:00:00Z" }
//!   ],
//!   "tasks": [
//!     { "id": "t1", "project_id": "web", "name": "Frontend",
//!       "estimated_hours": 8.0 }
//!   ]
//! }
//! ```
//!
//! Task `remaining_hours` and `status` are optional; a fresh task needs
//! only its estimate, while partially-consumed state can be fed back in
//! to re-plan after progress.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::error::Error;
use std::path::Path;

use dayplan_core::{Project, SchedulerConfig, Task, TaskScheduler, TaskStatus};

/// Parsed plan file.
#[derive(Debug, Deserialize)]
pub struct PlanFile {
    #[serde(default)]
    pub config: Option<SchedulerConfig>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<TaskSpec>,
}

/// Task as written in a plan file; `remaining_hours` and `due_date` are
/// optional.
#[derive(Debug, Deserialize)]
pub struct TaskSpec {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub estimated_hours: f64,
    #[serde(default)]
    pub remaining_hours: Option<f64>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskSpec {
    fn into_task(self) -> Result<Task, Box<dyn Error>> {
        let mut task = Task::new(self.id, self.project_id, self.name, self.estimated_hours)?;
        if let Some(remaining) = self.remaining_hours {
            task.remaining_hours = remaining;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        task.due_date = self.due_date;
        Ok(task)
    }
}

/// Read and parse a plan file.
pub fn load_plan(path: &Path) -> Result<PlanFile, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read plan file {}: {e}", path.display()))?;
    let plan: PlanFile = serde_json::from_str(&raw)
        .map_err(|e| format!("invalid plan file {}: {e}", path.display()))?;
    Ok(plan)
}

/// Read a scheduler configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SchedulerConfig, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read config file {}: {e}", path.display()))?;
    let config: SchedulerConfig = toml::from_str(&raw)
        .map_err(|e| format!("invalid config file {}: {e}", path.display()))?;
    Ok(config)
}

/// Build a populated scheduler from a plan file, with an optional config
/// taking precedence over the plan's embedded one.
pub fn build_scheduler(
    plan: PlanFile,
    config_override: Option<SchedulerConfig>,
) -> Result<TaskScheduler, Box<dyn Error>> {
    let config = config_override
        .or(plan.config)
        .unwrap_or_default();

    let mut scheduler = TaskScheduler::with_config(config);
    for project in plan.projects {
        scheduler.add_project(project);
    }
    for spec in plan.tasks {
        scheduler.add_task(spec.into_task()?);
    }
    Ok(scheduler)
}
