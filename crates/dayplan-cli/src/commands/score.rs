use chrono::{NaiveDate, Utc};
use clap::Args;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;

use crate::input;

#[derive(Args)]
pub struct ScoreArgs {
    /// Plan file (JSON) with projects and tasks
    #[arg(long, short)]
    pub input: PathBuf,
    /// Date to score urgency at (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Scheduler configuration file (TOML), overrides the plan's config
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Print scores as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ScoreRow {
    task_id: String,
    task_name: String,
    project_id: String,
    category: String,
    remaining_hours: f64,
    urgency_score: f64,
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn Error>> {
    let plan = input::load_plan(&args.input)?;
    let config = args.config.as_deref().map(input::load_config).transpose()?;
    let scheduler = input::build_scheduler(plan, config)?;

    let at = match args.date {
        Some(date) => date
            .and_hms_opt(0, 0, 0)
            .ok_or("invalid date")?
            .and_utc(),
        None => Utc::now(),
    };

    let mut rows: Vec<ScoreRow> = scheduler
        .pending_tasks()
        .into_iter()
        .map(|task| ScoreRow {
            task_id: task.id.clone(),
            task_name: task.name.clone(),
            project_id: task.project_id.clone(),
            category: scheduler
                .project(&task.project_id)
                .map(|project| project.category.clone())
                .unwrap_or_default(),
            remaining_hours: task.remaining_hours,
            urgency_score: scheduler.urgency_score(task, at),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.urgency_score
            .partial_cmp(&a.urgency_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("urgency at {}:", at.date_naive());
    for row in &rows {
        println!(
            "  {:8.3}  {} ({}) - {}h remaining",
            row.urgency_score, row.task_name, row.category, row.remaining_hours
        );
    }

    Ok(())
}
