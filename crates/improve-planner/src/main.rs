use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use improve_core::{HabitEntry, PomodoroTimer, TimerSettings};
use improve_planner::config::{default_timer_state_path, PlannerConfig};
use improve_planner::timer::TimerAction;
use improve_planner::{schema, HabitPlanGenerator};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "improve", about = "Habit-change planner and focus timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a habit-change plan and print it as JSON
    Plan {
        /// What the user wants to change, in their own words
        #[arg(long)]
        intent: String,
        /// JSON file with the current habits: [{"id": ..., "data": {...}}]
        #[arg(long)]
        habits: Option<PathBuf>,
        #[command(flatten)]
        config: PlannerConfig,
    },
    /// Print the prompt that would be sent, without calling the model
    Prompt {
        #[arg(long)]
        intent: String,
        #[arg(long)]
        habits: Option<PathBuf>,
    },
    /// Print the response schema sent with every request
    Schema,
    /// Drive the Pomodoro timer
    Timer {
        #[command(subcommand)]
        action: TimerAction,
        /// State file (defaults to $XDG_DATA_HOME/improve/pomodoro.json)
        #[arg(long, env = "IMPROVE_TIMER_STATE", global = true)]
        state: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            intent,
            habits,
            config,
        } => {
            let habits = load_habits(habits.as_deref())?;
            let generator = HabitPlanGenerator::new(config.backend());
            let report = generator.generate_report(&intent, &habits).await;
            if report.is_error() {
                warn!("no plan produced; the error is in the report");
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Prompt { intent, habits } => {
            let habits = load_habits(habits.as_deref())?;
            println!("{}", improve_prompts::assemble_prompt(&intent, &habits));
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&schema::response_schema())?);
        }
        Commands::Timer { action, state } => {
            let path = state.unwrap_or_else(default_timer_state_path);
            run_timer(action, &path)?;
        }
    }

    Ok(())
}

fn load_habits(path: Option<&Path>) -> Result<Vec<HabitEntry>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read habits file {}", path.display()))?;
    let habits = HabitEntry::parse_list(&raw)
        .with_context(|| format!("invalid habits file {}", path.display()))?;
    info!("loaded {} habits from {}", habits.len(), path.display());
    Ok(habits)
}

fn run_timer(action: TimerAction, path: &Path) -> Result<()> {
    let now = Utc::now();
    let mut timer = PomodoroTimer::restore(path, TimerSettings::default(), now)
        .with_context(|| format!("failed to load timer state {}", path.display()))?;

    action.apply(&mut timer, now);

    timer
        .save(path)
        .with_context(|| format!("failed to save timer state {}", path.display()))?;
    println!("{timer}");
    Ok(())
}
