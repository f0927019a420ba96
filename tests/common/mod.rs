#![allow(dead_code)]

use async_trait::async_trait;
use nutrition_engine::generation::{ContentGenerator, ContentRequest, GenerationError};
use nutrition_engine::models::{ActivityLevel, Gender, UserProfile};
use serde_json::{json, Value};
use std::sync::Mutex;

pub fn reference_profile() -> UserProfile {
    UserProfile::new(30, Gender::Female, ActivityLevel::ModeratelyActive, 65.0, 165.0)
}

pub fn reference_profile_json() -> Value {
    json!({
        "age": 30,
        "gender": "female",
        "activityLevel": "moderately_active",
        "weight": 65,
        "height": 165
    })
}

fn meal_type_from_prompt(prompt: &str) -> String {
    prompt
        .lines()
        .find_map(|line| line.strip_prefix("Meal: "))
        .unwrap_or("meal")
        .trim()
        .to_string()
}

/// Answers each request according to the schema it asks for and records
/// every request it sees.
pub struct ScriptedGenerator {
    pub requests: Mutex<Vec<ContentRequest>>,
    /// Meal types (as prompted) that should fail.
    pub failing_meals: Vec<&'static str>,
    pub fail_everything: bool,
}

impl ScriptedGenerator {
    pub fn healthy() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            failing_meals: Vec::new(),
            fail_everything: false,
        }
    }

    pub fn failing_meals(meals: Vec<&'static str>) -> Self {
        Self {
            failing_meals: meals,
            ..Self::healthy()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            fail_everything: true,
            ..Self::healthy()
        }
    }

    pub fn recorded(&self) -> Vec<ContentRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn meal_reply(meal_type: &str) -> Value {
        json!({
            "foods": [{
                "name": format!("{meal_type} grain bowl"),
                "category": "mixed",
                "calories": 400, "protein": 25, "carbs": 45, "fat": 12, "fiber": 7,
                "vitamins": { "vitaminC": 20 },
                "minerals": { "iron": 4 },
                "healthScore": 86,
                "tags": ["whole-food"]
            }],
            "totalCalories": 400,
            "macroBreakdown": { "protein": 25, "carbs": 45, "fat": 12, "fiber": 7 },
            "healthScore": 86,
            "reasoning": "Balanced and filling.",
            "preparationTime": 20,
            "difficulty": "medium"
        })
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate_json(&self, request: ContentRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail_everything {
            return Err(GenerationError::Timeout(std::time::Duration::from_secs(30)));
        }

        let reply = match request.schema.name.as_str() {
            "meal_recommendation" => {
                let meal_type = meal_type_from_prompt(&request.user_prompt);
                if self.failing_meals.iter().any(|m| *m == meal_type) {
                    return Err(GenerationError::EmptyResponse);
                }
                Self::meal_reply(&meal_type)
            }
            "preference_update" => json!({
                "preferredIngredients": ["lentils"],
                "avoidedIngredients": ["cilantro"],
                "preparationInsights": ["Enjoys one-pot meals"]
            }),
            "food_suggestions" => json!({
                "suggestions": [
                    { "name": "Oats", "category": "grain", "benefits": "Soluble fiber" },
                    { "name": "Almonds", "category": "fat", "benefits": "Vitamin E" }
                ]
            }),
            other => return Err(GenerationError::Invalid(format!("unexpected schema {other}"))),
        };
        // Wrapped the way models often answer.
        Ok(format!("```json\n{reply}\n```"))
    }
}
