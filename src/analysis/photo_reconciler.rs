//! Compares a photographed meal against the user's per-meal targets.

use serde::Serialize;

use super::gaps::percentage_of;
use crate::error::{EngineError, Result};
use crate::models::{
    Difficulty, FoodCategory, FoodItem, MacroBreakdown, MealRecommendation, MealType,
    NutritionalNeeds, PhotoAnalysis, UserProfile,
};
use crate::planner::{calculate_needs, calorie_fraction};

pub const PHOTO_TAG: &str = "analyzed-photo";
const DEFAULT_MEAL_NAME: &str = "Analyzed meal";
const DEFAULT_REASONING: &str = "Nutrition estimated from a photo of your meal.";

const LOW_CALORIE_PCT: i64 = 80;
const HIGH_CALORIE_PCT: i64 = 120;
const LOW_PROTEIN_PCT: i64 = 80;
const MIN_FIBER_G: f64 = 5.0;
const MIN_HEALTH_SCORE: f64 = 75.0;

pub const AFFIRMATION: &str = "Great choice! This meal aligns well with your nutritional goals.";
pub const PROTEIN_SUGGESTION: &str = "Add more protein sources like lean meats, fish, eggs, or legumes";
pub const FIBER_SUGGESTION: &str = "Include more fiber-rich foods like vegetables, fruits, or whole grains";
pub const WHOLE_FOODS_SUGGESTION: &str = "Try to include more nutrient-dense whole foods";

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct NutrientComparison {
    pub actual: f64,
    pub target: f64,
    pub percentage: i64,
}

impl NutrientComparison {
    fn new(actual: f64, target: f64) -> Self {
        Self {
            actual,
            target,
            percentage: percentage_of(actual, target),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct NutritionalComparison {
    pub calories: NutrientComparison,
    pub protein: NutrientComparison,
    pub carbs: NutrientComparison,
    pub fat: NutrientComparison,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoReconciliation {
    pub meal_recommendation: MealRecommendation,
    pub nutritional_comparison: NutritionalComparison,
    pub suggestions: Vec<String>,
}

pub fn reconcile(
    analysis: &PhotoAnalysis,
    profile: &UserProfile,
    meal_type: MealType,
) -> Result<PhotoReconciliation> {
    analysis.check_amounts().map_err(EngineError::invalid)?;
    let needs = calculate_needs(profile)?;
    Ok(reconcile_with_needs(analysis, &needs, meal_type))
}

pub fn reconcile_with_needs(
    analysis: &PhotoAnalysis,
    needs: &NutritionalNeeds,
    meal_type: MealType,
) -> PhotoReconciliation {
    let nutrition = &analysis.nutrition;
    // Unrounded: these targets are only used for comparison.
    let fraction = calorie_fraction(meal_type);
    let target = |daily: u32| f64::from(daily) * fraction;

    let comparison = NutritionalComparison {
        calories: NutrientComparison::new(nutrition.calories, target(needs.daily_calories)),
        protein: NutrientComparison::new(nutrition.protein, target(needs.protein)),
        carbs: NutrientComparison::new(nutrition.carbs, target(needs.carbohydrates)),
        fat: NutrientComparison::new(nutrition.fat, target(needs.fat)),
    };

    PhotoReconciliation {
        meal_recommendation: photo_meal(analysis, meal_type),
        suggestions: suggestions(analysis, &comparison),
        nutritional_comparison: comparison,
    }
}

fn photo_meal(analysis: &PhotoAnalysis, meal_type: MealType) -> MealRecommendation {
    let nutrition = &analysis.nutrition;
    let health_score = analysis.health_score.clamp(0.0, 100.0).round() as u8;
    let name = analysis
        .meal_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_MEAL_NAME);

    let mut tags = vec![PHOTO_TAG.to_string()];
    tags.extend(analysis.identified_foods.iter().cloned());

    MealRecommendation {
        meal_type,
        foods: vec![FoodItem {
            name: name.to_string(),
            category: FoodCategory::Mixed,
            calories: nutrition.calories,
            protein: nutrition.protein,
            carbs: nutrition.carbs,
            fat: nutrition.fat,
            fiber: nutrition.fiber,
            vitamins: analysis.vitamins.clone(),
            minerals: analysis.minerals.clone(),
            health_score,
            tags,
        }],
        total_calories: nutrition.calories,
        macro_breakdown: MacroBreakdown {
            protein: nutrition.protein,
            carbs: nutrition.carbs,
            fat: nutrition.fat,
            fiber: nutrition.fiber,
        },
        health_score,
        reasoning: analysis
            .description
            .clone()
            .unwrap_or_else(|| DEFAULT_REASONING.to_string()),
        preparation_time: 0,
        difficulty: Difficulty::Easy,
        recipe: None,
    }
}

fn suggestions(analysis: &PhotoAnalysis, comparison: &NutritionalComparison) -> Vec<String> {
    let mut out = Vec::new();
    let calories_pct = comparison.calories.percentage;

    if calories_pct < LOW_CALORIE_PCT {
        out.push(format!(
            "Add more calories to this meal - you're {}% below your target",
            100i64.saturating_sub(calories_pct)
        ));
    }
    if calories_pct > HIGH_CALORIE_PCT {
        out.push(format!(
            "This meal is {}% above your calorie target - consider smaller portions",
            calories_pct.saturating_sub(100)
        ));
    }
    if comparison.protein.percentage < LOW_PROTEIN_PCT {
        out.push(PROTEIN_SUGGESTION.to_string());
    }
    if analysis.nutrition.fiber < MIN_FIBER_G {
        out.push(FIBER_SUGGESTION.to_string());
    }
    if analysis.health_score < MIN_HEALTH_SCORE {
        out.push(WHOLE_FOODS_SUGGESTION.to_string());
    }

    if out.is_empty() {
        out.push(AFFIRMATION.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Gender, NutrientBreakdown};

    fn needs() -> NutritionalNeeds {
        let profile = UserProfile::new(30, Gender::Female, ActivityLevel::ModeratelyActive, 65.0, 165.0);
        calculate_needs(&profile).unwrap()
    }

    fn analysis(calories: f64, protein: f64, fiber: f64, health_score: f64) -> PhotoAnalysis {
        PhotoAnalysis {
            meal_name: Some("Chicken salad".to_string()),
            identified_foods: vec!["chicken".to_string(), "lettuce".to_string()],
            nutrition: NutrientBreakdown {
                calories,
                protein,
                carbs: 60.0,
                fat: 20.0,
                fiber,
            },
            health_score,
            ..Default::default()
        }
    }

    #[test]
    fn test_on_target_meal_gets_affirmation() {
        // Lunch targets: 775.6 kcal, 48.65 g protein.
        let result = reconcile_with_needs(&analysis(780.0, 50.0, 8.0, 85.0), &needs(), MealType::Lunch);
        assert_eq!(result.suggestions, vec![AFFIRMATION.to_string()]);
        assert_eq!(result.nutritional_comparison.calories.percentage, 101);
    }

    #[test]
    fn test_all_rules_accumulate() {
        // Breakfast targets: 554 kcal, 34.75 g protein.
        let result = reconcile_with_needs(&analysis(277.0, 10.0, 2.0, 60.0), &needs(), MealType::Breakfast);
        assert_eq!(
            result.suggestions,
            vec![
                "Add more calories to this meal - you're 50% below your target".to_string(),
                PROTEIN_SUGGESTION.to_string(),
                FIBER_SUGGESTION.to_string(),
                WHOLE_FOODS_SUGGESTION.to_string(),
            ]
        );
    }

    #[test]
    fn test_over_target_calories() {
        // Snack target: 221.6 kcal -> 150%.
        let result = reconcile_with_needs(&analysis(332.4, 40.0, 6.0, 90.0), &needs(), MealType::Snack);
        assert_eq!(
            result.suggestions,
            vec!["This meal is 50% above your calorie target - consider smaller portions".to_string()]
        );
    }

    #[test]
    fn test_photo_becomes_single_mixed_food() {
        let result = reconcile_with_needs(&analysis(500.0, 30.0, 6.0, 82.4), &needs(), MealType::Dinner);
        let meal = &result.meal_recommendation;
        assert_eq!(meal.meal_type, MealType::Dinner);
        assert_eq!(meal.foods.len(), 1);
        assert_eq!(meal.foods[0].name, "Chicken salad");
        assert_eq!(meal.foods[0].category, FoodCategory::Mixed);
        assert_eq!(meal.foods[0].tags[0], PHOTO_TAG);
        assert_eq!(meal.preparation_time, 0);
        assert_eq!(meal.difficulty, Difficulty::Easy);
        assert_eq!(meal.health_score, 82);
        assert_eq!(meal.total_calories, 500.0);
    }

    #[test]
    fn test_empty_analysis_defaults_to_zero() {
        let result = reconcile_with_needs(&PhotoAnalysis::default(), &needs(), MealType::Lunch);
        assert_eq!(result.meal_recommendation.foods[0].name, "Analyzed meal");
        assert_eq!(result.nutritional_comparison.calories.percentage, 0);
        assert_eq!(result.suggestions.len(), 4);
    }

    #[test]
    fn test_negative_nutrition_is_rejected() {
        let profile = UserProfile::new(30, Gender::Female, ActivityLevel::ModeratelyActive, 65.0, 165.0);
        let result = reconcile(&analysis(-1e300, 30.0, 6.0, 80.0), &profile, MealType::Lunch);
        assert!(matches!(result, Err(EngineError::Validation { .. })));
    }

    #[test]
    fn test_extreme_calorie_percentage_does_not_overflow() {
        let mut low = needs();
        low.daily_calories = 1;
        let result = reconcile_with_needs(&analysis(f64::MAX, 40.0, 6.0, 90.0), &low, MealType::Snack);
        assert_eq!(result.nutritional_comparison.calories.percentage, i64::MAX);
        assert!(result.suggestions[0].starts_with(&format!("This meal is {}%", i64::MAX - 100)));
    }
}
