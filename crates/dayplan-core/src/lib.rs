//! # Dayplan Core Library
//!
//! This library provides the core business logic for Dayplan, an
//! urgency-driven task scheduler. Given a pool of projects and tasks with
//! deadlines, priorities, and remaining effort, it produces a day-by-day
//! allocation plan under a fixed daily capacity, while reacting to overdue
//! work and preserving variety across work categories. It implements a
//! CLI-first philosophy where all operations are available via a standalone
//! CLI binary layered over the same core library.
//!
//! ## Architecture
//!
//! - **Scheduler Engine**: A single-owner simulation over in-memory
//!   project/task maps; each call to `generate_schedule` replays the
//!   horizon day by day
//! - **Urgency Scoring**: Weighted priority, deadline-pressure, and
//!   project-workload factors
//! - **Diversity Rule**: Near-tie selection that trades a bounded amount
//!   of urgency for category variety within a day
//! - **Summary/Export**: Read-side aggregation into a serializable snapshot
//!
//! ## Key Components
//!
//! - [`TaskScheduler`]: Owns the entity maps and drives the simulation
//! - [`SchedulerConfig`]: Capacity, urgency weights, and diversity knobs
//! - [`ScheduleSummary`] / [`PlanExport`]: Aggregates over a finished run

pub mod error;
pub mod schedule;
pub mod scheduler;
pub mod stats;
pub mod task;

pub use error::{Result, SchedulerError};
pub use schedule::{Schedule, ScheduleEntry};
pub use scheduler::diversity::DiversityConfig;
pub use scheduler::urgency::{PriorityFactors, UrgencyWeights};
pub use scheduler::{SchedulerConfig, TaskScheduler, DEFAULT_MAX_DAYS};
pub use stats::{PlanExport, ScheduleSummary};
pub use task::{Priority, Project, ProjectStatus, Task, TaskStatus};
