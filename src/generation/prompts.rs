use super::meal_provider::MealGenerationRequest;
use crate::models::FoodCategory;
use crate::planner::needs_calculator::{MINERAL_TARGETS, VITAMIN_TARGETS};

fn key_list(table: &[(&str, f64, &str)]) -> String {
    table
        .iter()
        .map(|(name, _, unit)| format!("{name} ({unit})"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    let joined = items
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined
    }
}

pub fn meal_system_prompt() -> String {
    let categories = FoodCategory::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are a registered dietitian designing a single meal for a health-coaching app.
Return ONLY a JSON object that follows the provided schema. Do not include markdown formatting (like ```json) or any text before or after the JSON object.

Rules:
- Never include an ingredient the user is allergic to or that breaks one of their dietary restrictions.
- Respect medical conditions (for example limit sodium for hypertension, limit added sugar for diabetes).
- Keep the meal's total calories within 10% of the calorie target and the macros as close to their targets as practical.
- Do NOT reuse any food that was already served earlier the same day.
- Each food's \"category\" must be one of: {categories}.
- Report vitamins only with these keys: {vitamins}.
- Report minerals only with these keys: {minerals}.
- Micronutrient amounts use the units shown next to each key; omit ones you cannot estimate.
- \"healthScore\" values are whole numbers from 0 to 100.
- \"difficulty\" is easy, medium or hard; \"preparationTime\" is whole minutes.
- \"totalCalories\" and \"macroBreakdown\" must equal the sum over \"foods\".
- \"reasoning\" explains in one or two sentences why the meal suits this user.",
        vitamins = key_list(&VITAMIN_TARGETS),
        minerals = key_list(&MINERAL_TARGETS),
    )
}

pub fn meal_user_prompt(request: &MealGenerationRequest<'_>) -> String {
    let profile = request.profile;
    let targets = &request.targets;

    let previous = if request.previous_food_names.is_empty() {
        "Foods already used earlier today: none (this is the first meal).".to_string()
    } else {
        format!(
            "Foods already used earlier today (do not repeat any of them): {}",
            describe(request.previous_food_names)
        )
    };

    let lines = [
        format!("Meal: {}", request.meal_type),
        String::new(),
        "Targets for this meal:".to_string(),
        format!("- Calories: {} kcal", targets.calories),
        format!("- Protein: {} g", targets.protein),
        format!("- Carbohydrates: {} g", targets.carbs),
        format!("- Fat: {} g", targets.fat),
        format!("- Fiber: {} g", targets.fiber),
        String::new(),
        "User profile:".to_string(),
        format!(
            "- Age: {}, gender: {}, activity level: {}",
            profile.age, profile.gender, profile.activity_level
        ),
        format!("- Weight: {:.1} kg, height: {:.1} cm", profile.weight, profile.height),
        format!("- Daily calorie target: {} kcal", request.needs.daily_calories),
        format!("- Health goals: {}", describe(&profile.health_goals)),
        format!("- Medical conditions: {}", describe(&profile.medical_conditions)),
        format!("- Dietary restrictions: {}", describe(&profile.dietary_restrictions)),
        format!("- Food preferences: {}", describe(&profile.food_preferences)),
        format!("- Allergies: {}", describe(&profile.allergies)),
        String::new(),
        previous,
    ];

    let mut prompt = lines.join("\n");
    prompt.push('\n');
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Gender, MealType, UserProfile};
    use crate::planner::needs_calculator::calculate_needs;
    use crate::planner::targets::MealTargets;

    fn profile() -> UserProfile {
        let mut profile = UserProfile::new(30, Gender::Female, ActivityLevel::ModeratelyActive, 65.0, 165.0);
        profile.health_goals = vec!["weight_loss".to_string()];
        profile.allergies.insert("shellfish".to_string());
        profile.dietary_restrictions.insert("vegetarian".to_string());
        profile
    }

    #[test]
    fn test_user_prompt_embeds_constraints_targets_and_previous_foods() {
        let profile = profile();
        let needs = calculate_needs(&profile).unwrap();
        let targets = MealTargets::for_meal(&needs, MealType::Lunch);
        let previous = vec!["Oatmeal".to_string(), "Blueberries".to_string()];
        let request = MealGenerationRequest {
            profile: &profile,
            needs: &needs,
            meal_type: MealType::Lunch,
            targets,
            previous_food_names: &previous,
        };

        let prompt = meal_user_prompt(&request);
        assert!(prompt.contains("Meal: lunch"));
        assert!(prompt.contains(&format!("- Calories: {} kcal", targets.calories)));
        assert!(prompt.contains("- Allergies: shellfish"));
        assert!(prompt.contains("- Dietary restrictions: vegetarian"));
        assert!(prompt.contains("- Health goals: weight_loss"));
        assert!(prompt.contains("- Medical conditions: none"));
        assert!(prompt.contains("(do not repeat any of them): Oatmeal, Blueberries"));
    }

    #[test]
    fn test_first_meal_prompt_says_nothing_used_yet() {
        let profile = profile();
        let needs = calculate_needs(&profile).unwrap();
        let request = MealGenerationRequest {
            profile: &profile,
            needs: &needs,
            meal_type: MealType::Breakfast,
            targets: MealTargets::for_meal(&needs, MealType::Breakfast),
            previous_food_names: &[],
        };
        let prompt = meal_user_prompt(&request);
        assert!(prompt.starts_with("Meal: breakfast\n\nTargets for this meal:\n"));
        assert!(prompt.ends_with("none (this is the first meal).\n"));
        assert!(prompt.contains("- Allergies: shellfish\n\nFoods already used"));
    }

    #[test]
    fn test_system_prompt_lists_micronutrient_keys() {
        let prompt = meal_system_prompt();
        assert!(prompt.contains("vitaminC (mg)"));
        assert!(prompt.contains("iron (mg)"));
        assert!(prompt.contains("protein, vegetable, grain, fruit, dairy, fat, mixed"));
    }
}
