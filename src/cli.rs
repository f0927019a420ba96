use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::models::MealType;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the JSON/HTTP API
    Serve {
        /// Address to listen on (overrides NUTRITION_BIND_ADDR)
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
    /// Print daily nutritional needs for a profile
    Needs {
        /// Path to a UserProfile JSON file
        #[arg(short, long)]
        profile: PathBuf,
    },
    /// Generate a full day of meals
    Plan {
        /// Path to a UserProfile JSON file
        #[arg(short, long)]
        profile: PathBuf,
        /// Plan date as YYYY-MM-DD; today (UTC) when omitted
        #[arg(short, long)]
        date: Option<chrono::NaiveDate>,
    },
    /// Compare a photo analysis result against a meal's targets
    AnalyzePhoto {
        /// Path to a UserProfile JSON file
        #[arg(short, long)]
        profile: PathBuf,
        /// Path to a PhotoAnalysis JSON file
        #[arg(short, long)]
        analysis: PathBuf,
        /// breakfast, lunch, dinner or snack
        #[arg(short, long)]
        meal_type: MealType,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
