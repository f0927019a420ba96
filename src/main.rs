use anyhow::{Context, Result};
use nutrition_engine::analysis::reconcile;
use nutrition_engine::cli::{parse_args, Command};
use nutrition_engine::config::EngineConfig;
use nutrition_engine::logging::init_tracing;
use nutrition_engine::models::{PhotoAnalysis, UserProfile};
use nutrition_engine::planner::calculate_needs;
use nutrition_engine::server::{serve, AppState};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tracing::info;

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON in '{}'", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;
    let cli = parse_args();
    let config = EngineConfig::from_env().context("Invalid configuration")?;

    match cli.command {
        Command::Serve { bind } => {
            let addr = bind.unwrap_or(config.bind_addr);
            let state = AppState::from_config(&config).context("Failed to set up content generator")?;
            info!(model = %config.model, "Starting nutrition engine");
            serve(state, addr).await?;
        }
        Command::Needs { profile } => {
            let profile: UserProfile = read_json(&profile).await?;
            print_json(&calculate_needs(&profile)?)?;
        }
        Command::Plan { profile, date } => {
            let profile: UserProfile = read_json(&profile).await?;
            let date = date.unwrap_or_else(|| chrono::Utc::now().date_naive());
            let state = AppState::from_config(&config).context("Failed to set up content generator")?;
            let plan = state.orchestrator.build_daily_plan(&profile, date).await?;
            print_json(&plan)?;
        }
        Command::AnalyzePhoto {
            profile,
            analysis,
            meal_type,
        } => {
            let profile: UserProfile = read_json(&profile).await?;
            let analysis: PhotoAnalysis = read_json(&analysis).await?;
            print_json(&reconcile(&analysis, &profile, meal_type)?)?;
        }
    }

    Ok(())
}
