use chrono::{NaiveDate, Utc};
use clap::Args;
use std::error::Error;
use std::path::PathBuf;

use dayplan_core::DEFAULT_MAX_DAYS;

use crate::input;

#[derive(Args)]
pub struct PlanArgs {
    /// Plan file (JSON) with projects and tasks
    #[arg(long, short)]
    pub input: PathBuf,
    /// Simulation start date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// Maximum number of days to schedule
    #[arg(long, default_value_t = DEFAULT_MAX_DAYS)]
    pub max_days: u32,
    /// Scheduler configuration file (TOML), overrides the plan's config
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Print the full export snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn Error>> {
    let plan = input::load_plan(&args.input)?;
    let config = args.config.as_deref().map(input::load_config).transpose()?;
    let mut scheduler = input::build_scheduler(plan, config)?;

    let start_date = match args.start {
        Some(date) => date
            .and_hms_opt(0, 0, 0)
            .ok_or("invalid start date")?
            .and_utc(),
        None => Utc::now(),
    };

    scheduler.generate_schedule(start_date, args.max_days)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scheduler.export())?);
        return Ok(());
    }

    println!("=== Schedule ===");
    for (date, entries) in scheduler.schedule() {
        println!("\n{date}:");
        let mut day_total = 0.0;
        for entry in entries {
            let category = scheduler
                .task(&entry.task_id)
                .and_then(|task| scheduler.project(&task.project_id))
                .map(|project| project.category.as_str())
                .unwrap_or("unknown");
            println!("  - {} ({category}): {}h", entry.task_name, entry.allocated_hours);
            day_total += entry.allocated_hours;
        }
        println!("  total: {day_total}h");
    }

    let summary = scheduler.summary();
    println!("\n=== Summary ===");
    println!("days scheduled:   {}", summary.total_days_scheduled);
    println!("entries:          {}", summary.total_tasks_scheduled);
    println!("hours scheduled:  {}", summary.total_hours_scheduled);
    println!("pending left:     {}", summary.pending_tasks_remaining);
    println!("overdue left:     {}", summary.overdue_tasks);
    println!("delayed projects: {}", summary.delayed_projects);

    if !summary.category_distribution.is_empty() {
        println!("\nby category:");
        for (category, hours) in &summary.category_distribution {
            println!("  {category}: {hours}h");
        }
    }

    Ok(())
}
