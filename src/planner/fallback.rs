//! Deterministic content used when generation is unavailable.

use crate::models::{
    Difficulty, FoodCategory, FoodItem, MacroBreakdown, MealRecommendation, MealType,
};
use crate::planner::targets::MealTargets;

pub const FALLBACK_FOOD_NAME: &str = "Balanced meal option";
pub const FALLBACK_TAG: &str = "balanced";
pub const FALLBACK_HEALTH_SCORE: u8 = 75;
pub const FALLBACK_PREPARATION_MINUTES: u32 = 15;
/// Share of each of the meal's own targets given to the synthetic food.
pub const FALLBACK_TARGET_SHARE: f64 = 0.25;

pub const FALLBACK_REASONING: &str = "A balanced default meal built from your nutritional targets. \
Personalized suggestions are temporarily unavailable.";

pub const FALLBACK_RECIPE: &str = "Fill half the plate with vegetables, a quarter with lean protein \
and a quarter with whole grains. Add a small portion of healthy fat such as olive oil or nuts.";

pub const PERSONALIZED_INSIGHTS: [&str; 4] = [
    "Stay hydrated by drinking water consistently throughout the day.",
    "Eat at regular times to keep your energy levels steady.",
    "Vary your protein sources and vegetables across the week.",
    "Plan and prep meals ahead to make healthy choices easier.",
];

pub fn personalized_insights() -> Vec<String> {
    PERSONALIZED_INSIGHTS.iter().map(|s| s.to_string()).collect()
}

pub fn fallback_meal(meal_type: MealType, targets: &MealTargets) -> MealRecommendation {
    let share = |target: u32| f64::from(target) * FALLBACK_TARGET_SHARE;
    let food = FoodItem {
        name: FALLBACK_FOOD_NAME.to_string(),
        category: FoodCategory::Mixed,
        calories: share(targets.calories),
        protein: share(targets.protein),
        carbs: share(targets.carbs),
        fat: share(targets.fat),
        fiber: share(targets.fiber),
        vitamins: Default::default(),
        minerals: Default::default(),
        health_score: FALLBACK_HEALTH_SCORE,
        tags: vec![FALLBACK_TAG.to_string()],
    };

    MealRecommendation {
        meal_type,
        total_calories: food.calories,
        macro_breakdown: MacroBreakdown {
            protein: food.protein,
            carbs: food.carbs,
            fat: food.fat,
            fiber: food.fiber,
        },
        foods: vec![food],
        health_score: FALLBACK_HEALTH_SCORE,
        reasoning: FALLBACK_REASONING.to_string(),
        preparation_time: FALLBACK_PREPARATION_MINUTES,
        difficulty: Difficulty::Easy,
        recipe: Some(FALLBACK_RECIPE.to_string()),
    }
}

pub fn is_fallback(meal: &MealRecommendation) -> bool {
    matches!(meal.foods.as_slice(), [only] if only.name == FALLBACK_FOOD_NAME)
}
