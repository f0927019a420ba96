use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers::{
    feedback, food_suggestions, health, meal_plan, meal_recommendation, nutritional_analysis,
    nutritional_needs, photo_analysis,
};
use super::AppState;

/// Routes:
/// - `POST /dietary/nutritional-needs`
/// - `POST /dietary/meal-plan`
/// - `POST /dietary/meal-recommendation`
/// - `POST /dietary/nutritional-analysis`
/// - `POST /dietary/feedback`
/// - `POST /dietary/food-suggestions`
/// - `POST /dietary/photo-analysis`
/// - `GET /health`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dietary/nutritional-needs", post(nutritional_needs))
        .route("/dietary/meal-plan", post(meal_plan))
        .route("/dietary/meal-recommendation", post(meal_recommendation))
        .route("/dietary/nutritional-analysis", post(nutritional_analysis))
        .route("/dietary/feedback", post(feedback))
        .route("/dietary/food-suggestions", post(food_suggestions))
        .route("/dietary/photo-analysis", post(photo_analysis))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
