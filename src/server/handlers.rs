//! HTTP handlers for the dietary endpoints.
//!
//! Handlers validate the profile, call into the planner, analysis and
//! preference modules, and wrap results in `{ success: true, .. }` bodies.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::{error, info};

use super::dto::{
    previous_food_names, ErrorResponse, FeedbackRequest, FeedbackResponse, FoodSuggestionsRequest,
    FoodSuggestionsResponse, HealthResponse, MealPlanRequest, MealPlanResponse,
    MealRecommendationRequest, MealRecommendationResponse, NutritionalAnalysisRequest,
    NutritionalAnalysisResponse, NutritionalNeedsRequest, NutritionalNeedsResponse,
    PhotoAnalysisRequest, PhotoAnalysisResponse,
};
use super::AppState;
use crate::analysis::{analyze_gaps, improvement_areas, overall_score, reconcile};
use crate::error::EngineError;
use crate::planner::calculate_needs;

// ════════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub enum ApiError {
    BadRequest {
        message: String,
        missing_fields: Vec<String>,
    },
    Internal,
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation {
                message,
                missing_fields,
            } => ApiError::BadRequest {
                message,
                missing_fields,
            },
            other => {
                error!(error = %other, "Request failed");
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            message: format!("Invalid request body: {}", rejection.body_text()),
            missing_fields: Vec::new(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::BadRequest {
                message,
                missing_fields,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    success: false,
                    message,
                    missing_fields,
                },
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("An internal error occurred"),
            ),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

pub async fn nutritional_needs(
    payload: Result<Json<NutritionalNeedsRequest>, JsonRejection>,
) -> ApiResult<NutritionalNeedsResponse> {
    let Json(request) = payload?;
    let profile = request.user_profile.into_profile()?;
    let nutritional_needs = calculate_needs(&profile)?;

    Ok(Json(NutritionalNeedsResponse {
        success: true,
        nutritional_needs,
    }))
}

pub async fn meal_plan(
    State(state): State<AppState>,
    payload: Result<Json<MealPlanRequest>, JsonRejection>,
) -> ApiResult<MealPlanResponse> {
    let Json(request) = payload?;
    let profile = request.user_profile.into_profile()?;
    let nutritional_needs = calculate_needs(&profile)?;
    let date = request
        .date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    let meal_plan = state
        .orchestrator
        .build_daily_plan_with_needs(&profile, &nutritional_needs, date)
        .await;

    Ok(Json(MealPlanResponse {
        success: true,
        meal_plan,
        nutritional_needs,
    }))
}

pub async fn meal_recommendation(
    State(state): State<AppState>,
    payload: Result<Json<MealRecommendationRequest>, JsonRejection>,
) -> ApiResult<MealRecommendationResponse> {
    let Json(request) = payload?;
    let profile = request.user_profile.into_profile()?;
    let nutritional_needs = calculate_needs(&profile)?;
    let previous = previous_food_names(&request.previous_meals);

    let recommendation = state
        .orchestrator
        .recommend_meal(&profile, &nutritional_needs, request.meal_type, &previous)
        .await;

    Ok(Json(MealRecommendationResponse {
        success: true,
        recommendation,
        nutritional_needs,
    }))
}

pub async fn nutritional_analysis(
    payload: Result<Json<NutritionalAnalysisRequest>, JsonRejection>,
) -> ApiResult<NutritionalAnalysisResponse> {
    let Json(request) = payload?;
    let profile = request.user_profile.into_profile()?;
    for (i, meal) in request.meals.iter().enumerate() {
        meal.check_amounts(&format!("meals[{i}]")).map_err(EngineError::invalid)?;
    }
    let needs = calculate_needs(&profile)?;

    let nutritional_gaps = analyze_gaps(&request.meals, &needs);
    let improvements = improvement_areas(&nutritional_gaps);
    let overall_score = overall_score(&nutritional_gaps);

    Ok(Json(NutritionalAnalysisResponse {
        success: true,
        nutritional_gaps,
        improvements,
        overall_score,
    }))
}

pub async fn feedback(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> ApiResult<FeedbackResponse> {
    let Json(request) = payload?;
    info!(user_id = %request.user_id, entries = request.meal_feedback.len(), "Processing meal feedback");

    let updated_preferences = state
        .preference_learner
        .update_preferences(&request.meal_feedback)
        .await;

    Ok(Json(FeedbackResponse {
        success: true,
        updated_preferences,
        message: "Feedback processed successfully".to_string(),
    }))
}

pub async fn food_suggestions(
    State(state): State<AppState>,
    payload: Result<Json<FoodSuggestionsRequest>, JsonRejection>,
) -> ApiResult<FoodSuggestionsResponse> {
    let Json(request) = payload?;
    let suggestions = state
        .food_suggester
        .suggest(
            &request.health_goals,
            &request.dietary_restrictions,
            &request.allergies,
        )
        .await;

    Ok(Json(FoodSuggestionsResponse {
        success: true,
        suggestions,
        health_goals: request.health_goals,
    }))
}

pub async fn photo_analysis(
    payload: Result<Json<PhotoAnalysisRequest>, JsonRejection>,
) -> ApiResult<PhotoAnalysisResponse> {
    let Json(request) = payload?;
    let profile = request.user_profile.into_profile()?;
    let result = reconcile(&request.photo_analysis, &profile, request.meal_type)?;

    Ok(Json(PhotoAnalysisResponse {
        success: true,
        meal_recommendation: result.meal_recommendation,
        nutritional_comparison: result.nutritional_comparison,
        suggestions: result.suggestions,
    }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
