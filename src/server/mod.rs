//! JSON/HTTP surface of the engine.

pub mod dto;
pub mod handlers;
pub mod routes;

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::EngineConfig;
use crate::generation::{
    ContentGenerator, GenerationError, GenerativeMealProvider, LlmMealProvider, OpenRouterGenerator,
};
use crate::planner::MealPlanOrchestrator;
use crate::preferences::{FoodSuggester, PreferenceLearner};

pub use routes::router;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: MealPlanOrchestrator,
    pub preference_learner: PreferenceLearner,
    pub food_suggester: FoodSuggester,
}

impl AppState {
    pub fn with_generators(
        meal_provider: Arc<dyn GenerativeMealProvider>,
        content_generator: Arc<dyn ContentGenerator>,
    ) -> Self {
        Self {
            orchestrator: MealPlanOrchestrator::new(meal_provider),
            preference_learner: PreferenceLearner::new(content_generator.clone()),
            food_suggester: FoodSuggester::new(content_generator),
        }
    }

    /// Every capability backed by the same content generator.
    pub fn new(content_generator: Arc<dyn ContentGenerator>) -> Self {
        let meal_provider = Arc::new(LlmMealProvider::new(content_generator.clone()));
        Self::with_generators(meal_provider, content_generator)
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, GenerationError> {
        let generator = OpenRouterGenerator::from_config(config)?;
        Ok(Self::new(Arc::new(generator)))
    }
}

pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Nutrition engine listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
