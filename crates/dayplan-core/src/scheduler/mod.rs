//! Urgency-driven schedule engine.
//!
//! This module provides the day-by-day allocation simulation:
//! - Reclassifies overdue work at the start of each simulated day
//! - Drains the overdue queue before any regular allocation
//! - Ranks pending tasks by urgency and applies the diversity rule
//! - Marks projects that missed their deadline as delayed after the run
//!
//! One `TaskScheduler` instance exclusively owns its project/task/schedule
//! maps; a `generate_schedule` call is a closed-world simulation over that
//! state and is deterministic for unchanged inputs. Re-running after tasks
//! have consumed hours is the supported re-plan mechanism.

pub mod diversity;
pub mod urgency;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::{Result, SchedulerError};
use crate::schedule::{Schedule, ScheduleEntry};
use crate::stats::{self, PlanExport, ScheduleSummary};
use crate::task::{Project, ProjectStatus, Task, TaskStatus};
use diversity::{Candidate, DiversityConfig};
use urgency::{PriorityFactors, UrgencyWeights};

/// Default scheduling horizon in days.
pub const DEFAULT_MAX_DAYS: u32 = 30;

/// Scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Allocatable hours per simulated day.
    pub daily_work_hours: f64,
    /// Weights combining the urgency factors.
    pub weights: UrgencyWeights,
    /// Score contribution per priority level.
    pub priority_factors: PriorityFactors,
    /// Category-diversity knobs.
    pub diversity: DiversityConfig,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            daily_work_hours: 8.0,
            weights: UrgencyWeights::default(),
            priority_factors: PriorityFactors::default(),
            diversity: DiversityConfig::default(),
        }
    }
}

/// Round an allocation to the nearest half hour without exceeding it.
///
/// Rounds half-to-even, then steps down one increment when rounding up
/// would overshoot the allocatable amount, so neither the day's capacity
/// nor a task's remaining hours can be exceeded.
fn quantize_allocation(hours: f64) -> f64 {
    let rounded = (hours * 2.0).round_ties_even() / 2.0;
    if rounded > hours {
        rounded - 0.5
    } else {
        rounded
    }
}

/// Deadline-and-workload-driven task scheduler.
pub struct TaskScheduler {
    projects: BTreeMap<String, Project>,
    tasks: BTreeMap<String, Task>,
    schedule: Schedule,
    overdue_queue: Vec<String>,
    delayed_projects: Vec<String>,
    config: SchedulerConfig,
}

impl TaskScheduler {
    /// Create a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    /// Create a scheduler with a custom configuration.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            projects: BTreeMap::new(),
            tasks: BTreeMap::new(),
            schedule: Schedule::new(),
            overdue_queue: Vec::new(),
            delayed_projects: Vec::new(),
            config,
        }
    }

    /// Insert a project, replacing any existing project with the same id
    /// (upsert semantics).
    pub fn add_project(&mut self, project: Project) {
        self.projects.insert(project.id.clone(), project);
    }

    /// Insert a task, replacing any existing task with the same id
    /// (upsert semantics).
    pub fn add_task(&mut self, task: Task) {
        self.tasks.insert(task.id.clone(), task);
    }

    /// Look up a project by id.
    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.projects.get(project_id)
    }

    /// Look up a task by id.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    /// All projects, keyed by id.
    pub fn projects(&self) -> &BTreeMap<String, Project> {
        &self.projects
    }

    /// All tasks, keyed by id.
    pub fn tasks(&self) -> &BTreeMap<String, Task> {
        &self.tasks
    }

    /// All tasks belonging to a project.
    pub fn tasks_by_project(&self, project_id: &str) -> Vec<&Task> {
        self.tasks
            .values()
            .filter(|task| task.project_id == project_id)
            .collect()
    }

    /// Pending tasks whose owning project exists and is still active.
    pub fn pending_tasks(&self) -> Vec<&Task> {
        self.tasks
            .values()
            .filter(|task| task.status == TaskStatus::Pending)
            .filter(|task| {
                self.projects
                    .get(&task.project_id)
                    .is_some_and(|project| project.status == ProjectStatus::Active)
            })
            .collect()
    }

    /// Task ids currently queued as overdue, in drain order.
    pub fn overdue_queue(&self) -> &[String] {
        &self.overdue_queue
    }

    /// Ids of projects marked delayed by the last run.
    pub fn delayed_projects(&self) -> &[String] {
        &self.delayed_projects
    }

    /// The schedule produced by the last `generate_schedule` run.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// The active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Urgency score of a task at the given simulated date.
    ///
    /// Weighted sum of the priority, deadline-pressure, and
    /// project-workload factors. A task whose project reference does not
    /// resolve scores 0.0 and is effectively unschedulable.
    pub fn urgency_score(&self, task: &Task, current_date: DateTime<Utc>) -> f64 {
        let Some(project) = self.projects.get(&task.project_id) else {
            return 0.0;
        };

        let pending_remaining: f64 = self
            .tasks_by_project(&task.project_id)
            .into_iter()
            .filter(|sibling| sibling.status == TaskStatus::Pending)
            .map(|sibling| sibling.remaining_hours)
            .sum();

        let priority_factor = self.config.priority_factors.factor(project.priority);
        let deadline_factor =
            urgency::deadline_factor(task.effective_deadline(project), current_date);
        let workload_factor =
            urgency::workload_factor(pending_remaining, project.deadline, current_date);

        self.config.weights.priority * priority_factor
            + self.config.weights.deadline * deadline_factor
            + self.config.weights.workload * workload_factor
    }

    /// Generate the full schedule over a bounded horizon of calendar days.
    ///
    /// Starts from a fresh schedule every call. Each simulated day runs
    /// the overdue reclassification, stops early when no overdue or
    /// pending work remains, allocates the day's capacity, and advances
    /// the clock by one day. After the loop, active projects whose
    /// deadline passed with pending tasks left are marked delayed.
    pub fn generate_schedule(
        &mut self,
        start_date: DateTime<Utc>,
        max_days: u32,
    ) -> Result<&Schedule> {
        if self.config.daily_work_hours <= 0.0 {
            return Err(SchedulerError::NonPositiveCapacity(
                self.config.daily_work_hours,
            ));
        }
        if max_days == 0 {
            return Err(SchedulerError::EmptyHorizon);
        }

        self.schedule.clear();
        let mut current_date = start_date;

        for _ in 0..max_days {
            self.update_overdue_tasks(current_date);

            if self.overdue_queue.is_empty() && self.pending_tasks().is_empty() {
                break;
            }

            let entries = self.allocate_day(current_date, self.config.daily_work_hours);
            if !entries.is_empty() {
                self.schedule.insert(current_date.date_naive(), entries);
            }

            current_date += Duration::days(1);
        }

        self.mark_delayed_projects(current_date);

        Ok(&self.schedule)
    }

    /// Summary statistics over the last run.
    pub fn summary(&self) -> ScheduleSummary {
        stats::summarize(self)
    }

    /// Serializable snapshot of the schedule, summary, and entity maps.
    pub fn export(&self) -> PlanExport {
        stats::export(self)
    }

    /// Rebuild the overdue queue for the start of a simulated day.
    ///
    /// Cleared and repopulated from scratch: every pending task of an
    /// active project whose effective deadline lies strictly before the
    /// current date flips to Overdue and joins the queue, and tasks still
    /// flagged Overdue with work remaining re-enter it, so overdue work
    /// keeps draining across days until it completes.
    fn update_overdue_tasks(&mut self, current_date: DateTime<Utc>) {
        self.overdue_queue.clear();

        for (task_id, task) in self.tasks.iter_mut() {
            let Some(project) = self.projects.get(&task.project_id) else {
                continue;
            };
            if project.status != ProjectStatus::Active {
                continue;
            }
            match task.status {
                TaskStatus::Pending => {
                    if task.effective_deadline(project) < current_date {
                        task.status = TaskStatus::Overdue;
                        self.overdue_queue.push(task_id.clone());
                    }
                }
                TaskStatus::Overdue => self.overdue_queue.push(task_id.clone()),
                TaskStatus::Completed => {}
            }
        }
    }

    /// Allocate one day's capacity: overdue queue first, then pending
    /// tasks by urgency under the diversity rule. Returns the day's
    /// entries in allocation order.
    fn allocate_day(
        &mut self,
        current_date: DateTime<Utc>,
        capacity_hours: f64,
    ) -> Vec<ScheduleEntry> {
        let mut entries = Vec::new();
        let mut categories_today: HashSet<String> = HashSet::new();
        let mut remaining_capacity = capacity_hours;

        // Overdue pass, in queue order. Iterates a snapshot so completed
        // tasks can be removed from the live queue mid-pass.
        for task_id in self.overdue_queue.clone() {
            if remaining_capacity <= 0.0 {
                break;
            }
            let Some(task) = self.tasks.get_mut(&task_id) else {
                continue;
            };
            let Some(project) = self.projects.get(&task.project_id) else {
                continue;
            };

            let allocation = quantize_allocation(remaining_capacity.min(task.remaining_hours));
            if allocation <= 0.0 {
                continue;
            }

            entries.push(ScheduleEntry::new(
                task.id.clone(),
                task.name.clone(),
                allocation,
            ));
            task.remaining_hours -= allocation;
            if task.remaining_hours <= 0.0 {
                task.remaining_hours = 0.0;
                task.status = TaskStatus::Completed;
                self.overdue_queue.retain(|id| id != &task_id);
            }
            remaining_capacity -= allocation;
            categories_today.insert(project.category.clone());
        }

        // Regular pass: the ranking is computed once per day; a selected
        // candidate leaves the list whether or not it completed.
        let mut candidates = self.rank_pending_tasks(current_date);

        while remaining_capacity > 0.0 && !candidates.is_empty() {
            let Some(index) =
                diversity::select(&candidates, &categories_today, &self.config.diversity)
            else {
                break;
            };
            let candidate = candidates.remove(index);

            let Some(task) = self.tasks.get_mut(&candidate.task_id) else {
                continue;
            };
            let Some(project) = self.projects.get(&task.project_id) else {
                continue;
            };

            let allocation = quantize_allocation(remaining_capacity.min(task.remaining_hours));
            if allocation <= 0.0 {
                continue;
            }

            entries.push(ScheduleEntry::new(
                task.id.clone(),
                task.name.clone(),
                allocation,
            ));
            task.remaining_hours -= allocation;
            if task.remaining_hours <= 0.0 {
                task.remaining_hours = 0.0;
                task.status = TaskStatus::Completed;
            }
            remaining_capacity -= allocation;
            categories_today.insert(project.category.clone());
        }

        entries
    }

    /// Pending tasks ranked by urgency, best first. The sort is stable,
    /// so equal scores keep the deterministic id order of the task map.
    fn rank_pending_tasks(&self, current_date: DateTime<Utc>) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = self
            .pending_tasks()
            .into_iter()
            .map(|task| Candidate {
                task_id: task.id.clone(),
                category: self
                    .projects
                    .get(&task.project_id)
                    .map(|project| project.category.clone()),
                score: self.urgency_score(task, current_date),
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates
    }

    /// Terminal pass after the horizon: an active project whose deadline
    /// lies before the final simulated date and which still has pending
    /// tasks is labeled delayed. Completed tasks are untouched.
    fn mark_delayed_projects(&mut self, final_date: DateTime<Utc>) {
        self.delayed_projects.clear();

        for (project_id, project) in self.projects.iter_mut() {
            if project.status != ProjectStatus::Active {
                continue;
            }
            if project.deadline >= final_date {
                continue;
            }
            let has_pending = self
                .tasks
                .values()
                .any(|task| task.project_id == *project_id && task.status == TaskStatus::Pending);
            if has_pending {
                project.status = ProjectStatus::Delayed;
                self.delayed_projects.push(project_id.clone());
            }
        }
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}
