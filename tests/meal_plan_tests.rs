mod common;

use chrono::NaiveDate;
use common::{reference_profile, ScriptedGenerator};
use nutrition_engine::generation::LlmMealProvider;
use nutrition_engine::models::MealType;
use nutrition_engine::planner::fallback::{FALLBACK_FOOD_NAME, PERSONALIZED_INSIGHTS};
use nutrition_engine::planner::{calculate_needs, MealPlanOrchestrator};
use std::sync::Arc;

fn orchestrator(generator: Arc<ScriptedGenerator>) -> MealPlanOrchestrator {
    MealPlanOrchestrator::new(Arc::new(LlmMealProvider::new(generator)))
}

fn plan_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

#[tokio::test]
async fn test_plan_prompts_carry_foods_chosen_earlier() {
    let generator = Arc::new(ScriptedGenerator::healthy());
    let plan = orchestrator(generator.clone())
        .build_daily_plan(&reference_profile(), plan_date())
        .await
        .unwrap();

    assert_eq!(plan.meals.len(), 4);
    assert_eq!(plan.total_calories, 1600.0);
    // 1600 / 2216
    assert_eq!(plan.nutritional_goals_net, 72);

    let prompts: Vec<String> = generator.recorded().into_iter().map(|r| r.user_prompt).collect();
    assert_eq!(prompts.len(), 4);
    assert!(prompts[0].starts_with("Meal: breakfast"));
    assert!(prompts[0].contains("none (this is the first meal)"));
    assert!(prompts[1].starts_with("Meal: lunch"));
    assert!(prompts[1].contains("breakfast grain bowl"));
    assert!(prompts[3].starts_with("Meal: snack"));
    assert!(prompts[3].contains("breakfast grain bowl, lunch grain bowl, dinner grain bowl"));
}

#[tokio::test]
async fn test_unavailable_service_still_yields_complete_plan() {
    let generator = Arc::new(ScriptedGenerator::unavailable());
    let profile = reference_profile();
    let plan = orchestrator(generator.clone())
        .build_daily_plan(&profile, plan_date())
        .await
        .unwrap();

    let needs = calculate_needs(&profile).unwrap();
    let order: Vec<MealType> = plan.meals.iter().map(|m| m.meal_type).collect();
    assert_eq!(order, MealType::DAILY_ORDER.to_vec());
    for meal in &plan.meals {
        assert_eq!(meal.foods.len(), 1);
        assert_eq!(meal.foods[0].name, FALLBACK_FOOD_NAME);
        assert_eq!(meal.foods[0].tags, vec!["balanced".to_string()]);
        assert_eq!(meal.health_score, 75);
    }
    // 25% of 554 + 776 + 665 + 222
    assert_eq!(plan.total_calories, 554.25);
    assert_eq!(
        plan.nutritional_goals_net,
        (554.25 / f64::from(needs.daily_calories) * 100.0).round() as u32
    );
    assert_eq!(plan.personalized_insights.len(), PERSONALIZED_INSIGHTS.len());
    assert_eq!(generator.recorded().len(), 4);
}

#[tokio::test]
async fn test_single_failure_is_contained() {
    let generator = Arc::new(ScriptedGenerator::failing_meals(vec!["dinner"]));
    let plan = orchestrator(generator.clone())
        .build_daily_plan(&reference_profile(), plan_date())
        .await
        .unwrap();

    let names: Vec<&str> = plan.meals.iter().map(|m| m.foods[0].name.as_str()).collect();
    assert_eq!(
        names,
        vec!["breakfast grain bowl", "lunch grain bowl", FALLBACK_FOOD_NAME, "snack grain bowl"]
    );
    let snack_prompt = &generator.recorded()[3].user_prompt;
    assert!(snack_prompt.contains(FALLBACK_FOOD_NAME));
}

#[tokio::test]
async fn test_recommend_meal_uses_given_history() {
    let generator = Arc::new(ScriptedGenerator::healthy());
    let profile = reference_profile();
    let needs = calculate_needs(&profile).unwrap();
    let previous = vec!["Scrambled eggs".to_string(), "Rye toast".to_string()];

    let meal = orchestrator(generator.clone())
        .recommend_meal(&profile, &needs, MealType::Lunch, &previous)
        .await;

    assert_eq!(meal.meal_type, MealType::Lunch);
    assert_eq!(meal.foods[0].name, "lunch grain bowl");
    assert!(generator.recorded()[0]
        .user_prompt
        .contains("(do not repeat any of them): Scrambled eggs, Rye toast"));
}
