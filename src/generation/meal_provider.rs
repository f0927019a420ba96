use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::prompts::{meal_system_prompt, meal_user_prompt};
use super::{parse_json_content, ContentGenerator, ContentRequest, GenerationError};
use crate::api_connection::{JsonSchema, JsonSchemaDefinition};
use crate::models::{
    check_amount, Difficulty, FoodCategory, FoodItem, MacroBreakdown, MealRecommendation, MealType,
    NutritionalNeeds, UserProfile,
};
use crate::planner::targets::MealTargets;

const MEAL_MAX_TOKENS: u32 = 2048;

/// Everything the generator needs to produce one meal of the day.
#[derive(Debug, Clone, Copy)]
pub struct MealGenerationRequest<'a> {
    pub profile: &'a UserProfile,
    pub needs: &'a NutritionalNeeds,
    pub meal_type: MealType,
    pub targets: MealTargets,
    /// Names of foods already chosen earlier the same day.
    pub previous_food_names: &'a [String],
}

/// Produces a validated [`MealRecommendation`] or fails. Never invents data:
/// fallbacks are the caller's decision.
#[async_trait]
pub trait GenerativeMealProvider: Send + Sync {
    async fn generate(
        &self,
        request: MealGenerationRequest<'_>,
    ) -> Result<MealRecommendation, GenerationError>;
}

/// [`GenerativeMealProvider`] that prompts a [`ContentGenerator`] and
/// validates its JSON against the meal schema.
#[derive(Clone)]
pub struct LlmMealProvider {
    generator: Arc<dyn ContentGenerator>,
}

impl LlmMealProvider {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { generator }
    }

    pub fn content_request(request: &MealGenerationRequest<'_>) -> ContentRequest {
        ContentRequest {
            system_prompt: meal_system_prompt(),
            user_prompt: meal_user_prompt(request),
            schema: meal_response_schema(),
            max_tokens: MEAL_MAX_TOKENS,
        }
    }
}

#[async_trait]
impl GenerativeMealProvider for LlmMealProvider {
    async fn generate(
        &self,
        request: MealGenerationRequest<'_>,
    ) -> Result<MealRecommendation, GenerationError> {
        let raw = self
            .generator
            .generate_json(Self::content_request(&request))
            .await?;
        let generated: GeneratedMeal = parse_json_content(&raw)?;
        generated.into_recommendation(request.meal_type)
    }
}

pub fn meal_response_schema() -> JsonSchemaDefinition {
    let category_values: Vec<&str> = FoodCategory::ALL.iter().map(|c| c.as_str()).collect();

    let food_schema = JsonSchema::object(
        vec![
            ("name", JsonSchema::string("Name of the food, e.g. 'grilled salmon'.")),
            ("category", JsonSchema::string_enum(&category_values, "Food group.")),
            ("calories", JsonSchema::number("Energy in kcal.")),
            ("protein", JsonSchema::number("Protein in grams.")),
            ("carbs", JsonSchema::number("Carbohydrates in grams.")),
            ("fat", JsonSchema::number("Fat in grams.")),
            ("fiber", JsonSchema::number("Fiber in grams.")),
            ("vitamins", JsonSchema::number_map("Vitamin amounts keyed by vitamin name.")),
            ("minerals", JsonSchema::number_map("Mineral amounts keyed by mineral name.")),
            ("healthScore", JsonSchema::integer("Healthiness from 0 to 100.")),
            ("tags", JsonSchema::array(JsonSchema::string(""), "Short descriptive tags.")),
        ],
        &["name", "category", "calories", "protein", "carbs", "fat", "fiber", "healthScore"],
    );

    let macro_schema = JsonSchema::object(
        vec![
            ("protein", JsonSchema::number("grams")),
            ("carbs", JsonSchema::number("grams")),
            ("fat", JsonSchema::number("grams")),
            ("fiber", JsonSchema::number("grams")),
        ],
        &["protein", "carbs", "fat", "fiber"],
    );

    JsonSchemaDefinition {
        name: "meal_recommendation".to_string(),
        strict: Some(false),
        schema: JsonSchema::object(
            vec![
                ("foods", JsonSchema::array(food_schema, "Foods in presentation order.")),
                ("totalCalories", JsonSchema::number("Sum of food calories.")),
                ("macroBreakdown", macro_schema),
                ("healthScore", JsonSchema::integer("Overall healthiness from 0 to 100.")),
                ("reasoning", JsonSchema::string("Why this meal fits the user.")),
                ("preparationTime", JsonSchema::integer("Minutes to prepare.")),
                (
                    "difficulty",
                    JsonSchema::string_enum(&["easy", "medium", "hard"], "Cooking difficulty."),
                ),
                ("recipe", JsonSchema::string("Short preparation instructions.")),
            ],
            &[
                "foods",
                "totalCalories",
                "macroBreakdown",
                "healthScore",
                "reasoning",
                "preparationTime",
                "difficulty",
            ],
        ),
    }
}

// --- Response shape expected back from the service ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedFood {
    name: String,
    category: FoodCategory,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    fiber: f64,
    #[serde(default)]
    vitamins: BTreeMap<String, f64>,
    #[serde(default)]
    minerals: BTreeMap<String, f64>,
    health_score: f64,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedMeal {
    foods: Vec<GeneratedFood>,
    total_calories: f64,
    macro_breakdown: MacroBreakdown,
    health_score: f64,
    reasoning: String,
    preparation_time: u32,
    difficulty: Difficulty,
    #[serde(default)]
    recipe: Option<String>,
}

fn amount(field: &str, value: f64) -> Result<f64, GenerationError> {
    check_amount(field, value).map_err(GenerationError::Invalid)
}

fn score(field: &str, value: f64) -> Result<u8, GenerationError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value.round() as u8)
    } else {
        Err(GenerationError::Invalid(format!(
            "{field} must be between 0 and 100, got {value}"
        )))
    }
}

fn amounts(field: &str, map: BTreeMap<String, f64>) -> Result<BTreeMap<String, f64>, GenerationError> {
    map.into_iter()
        .map(|(key, value)| {
            let checked = amount(&format!("{field}.{key}"), value)?;
            Ok((key, checked))
        })
        .collect()
}

impl GeneratedFood {
    fn into_food_item(self, index: usize) -> Result<FoodItem, GenerationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(GenerationError::Invalid(format!("foods[{index}].name is empty")));
        }
        let prefix = format!("foods[{index}]");
        Ok(FoodItem {
            calories: amount(&format!("{prefix}.calories"), self.calories)?,
            protein: amount(&format!("{prefix}.protein"), self.protein)?,
            carbs: amount(&format!("{prefix}.carbs"), self.carbs)?,
            fat: amount(&format!("{prefix}.fat"), self.fat)?,
            fiber: amount(&format!("{prefix}.fiber"), self.fiber)?,
            vitamins: amounts(&format!("{prefix}.vitamins"), self.vitamins)?,
            minerals: amounts(&format!("{prefix}.minerals"), self.minerals)?,
            health_score: score(&format!("{prefix}.healthScore"), self.health_score)?,
            name,
            category: self.category,
            tags: self.tags,
        })
    }
}

impl GeneratedMeal {
    /// The requested meal type is authoritative; the service never picks it.
    fn into_recommendation(self, meal_type: MealType) -> Result<MealRecommendation, GenerationError> {
        if self.foods.is_empty() {
            return Err(GenerationError::Invalid("meal contains no foods".to_string()));
        }

        let foods = self
            .foods
            .into_iter()
            .enumerate()
            .map(|(i, food)| food.into_food_item(i))
            .collect::<Result<Vec<_>, _>>()?;

        let macro_breakdown = MacroBreakdown {
            protein: amount("macroBreakdown.protein", self.macro_breakdown.protein)?,
            carbs: amount("macroBreakdown.carbs", self.macro_breakdown.carbs)?,
            fat: amount("macroBreakdown.fat", self.macro_breakdown.fat)?,
            fiber: amount("macroBreakdown.fiber", self.macro_breakdown.fiber)?,
        };

        Ok(MealRecommendation {
            meal_type,
            foods,
            total_calories: amount("totalCalories", self.total_calories)?,
            macro_breakdown,
            health_score: score("healthScore", self.health_score)?,
            reasoning: self.reasoning,
            preparation_time: self.preparation_time,
            difficulty: self.difficulty,
            recipe: self.recipe.filter(|r| !r.trim().is_empty()),
        })
    }
}
