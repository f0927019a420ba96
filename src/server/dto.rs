//! Request and response bodies. Field names are camelCase on the wire.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::analysis::{ImprovementArea, NutritionalComparison, NutritionalGaps};
use crate::error::EngineError;
use crate::models::{
    ActivityLevel, DailyMealPlan, Gender, MealFeedback, MealRecommendation, MealType,
    NutritionalNeeds, PhotoAnalysis, UserProfile,
};
use crate::preferences::FoodSuggestion;

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// A profile as submitted by a client. Required fields are optional here so a
/// missing one is reported by name instead of as a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    #[serde(default)]
    pub health_goals: Vec<String>,
    #[serde(default)]
    pub medical_conditions: BTreeSet<String>,
    #[serde(default)]
    pub dietary_restrictions: BTreeSet<String>,
    #[serde(default)]
    pub food_preferences: BTreeSet<String>,
    #[serde(default)]
    pub allergies: BTreeSet<String>,
}

impl ProfileInput {
    pub fn into_profile(self) -> Result<UserProfile, EngineError> {
        match (self.age, self.gender, self.activity_level, self.weight, self.height) {
            (Some(age), Some(gender), Some(activity_level), Some(weight), Some(height)) => {
                Ok(UserProfile {
                    age,
                    gender,
                    activity_level,
                    weight,
                    height,
                    health_goals: self.health_goals,
                    medical_conditions: self.medical_conditions,
                    dietary_restrictions: self.dietary_restrictions,
                    food_preferences: self.food_preferences,
                    allergies: self.allergies,
                })
            }
            _ => {
                let missing = [
                    ("age", self.age.is_none()),
                    ("gender", self.gender.is_none()),
                    ("activityLevel", self.activity_level.is_none()),
                    ("weight", self.weight.is_none()),
                    ("height", self.height.is_none()),
                ]
                .into_iter()
                .filter(|(_, absent)| *absent)
                .map(|(name, _)| name.to_string())
                .collect();
                Err(EngineError::missing_fields(missing))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionalNeedsRequest {
    #[serde(default)]
    pub user_profile: ProfileInput,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    #[serde(default)]
    pub user_profile: ProfileInput,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Earlier meals of the day, either as bare food names or full meal objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PreviousMeal {
    FoodName(String),
    Meal(MealRecommendation),
}

pub fn previous_food_names(previous: &[PreviousMeal]) -> Vec<String> {
    previous
        .iter()
        .flat_map(|entry| match entry {
            PreviousMeal::FoodName(name) => vec![name.clone()],
            PreviousMeal::Meal(meal) => meal.food_names().map(str::to_string).collect(),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRecommendationRequest {
    #[serde(default)]
    pub user_profile: ProfileInput,
    pub meal_type: MealType,
    #[serde(default)]
    pub previous_meals: Vec<PreviousMeal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionalAnalysisRequest {
    #[serde(default)]
    pub meals: Vec<MealRecommendation>,
    #[serde(default)]
    pub user_profile: ProfileInput,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub user_id: String,
    #[serde(default)]
    pub meal_feedback: Vec<MealFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSuggestionsRequest {
    #[serde(default)]
    pub health_goals: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoAnalysisRequest {
    #[serde(default)]
    pub photo_analysis: PhotoAnalysis,
    #[serde(default)]
    pub user_profile: ProfileInput,
    pub meal_type: MealType,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionalNeedsResponse {
    pub success: bool,
    pub nutritional_needs: NutritionalNeeds,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    pub success: bool,
    pub meal_plan: DailyMealPlan,
    pub nutritional_needs: NutritionalNeeds,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRecommendationResponse {
    pub success: bool,
    pub recommendation: MealRecommendation,
    pub nutritional_needs: NutritionalNeeds,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionalAnalysisResponse {
    pub success: bool,
    pub nutritional_gaps: NutritionalGaps,
    pub improvements: Vec<ImprovementArea>,
    pub overall_score: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub success: bool,
    pub updated_preferences: Vec<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSuggestionsResponse {
    pub success: bool,
    pub suggestions: Vec<FoodSuggestion>,
    pub health_goals: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoAnalysisResponse {
    pub success: bool,
    pub meal_recommendation: MealRecommendation,
    pub nutritional_comparison: NutritionalComparison,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            missing_fields: Vec::new(),
        }
    }
}
