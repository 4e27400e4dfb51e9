use clap::{Parser, Subcommand};

mod commands;
mod input;

#[derive(Parser)]
#[command(name = "dayplan", version, about = "Dayplan task scheduler CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a day-by-day schedule from a plan file
    Plan(commands::plan::PlanArgs),
    /// Inspect urgency scores for pending tasks
    Score(commands::score::ScoreArgs),
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Score(args) => commands::score::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
