use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::fallback::{fallback_meal, personalized_insights};
use super::needs_calculator::calculate_needs;
use super::targets::MealTargets;
use crate::error::Result;
use crate::generation::{GenerativeMealProvider, MealGenerationRequest};
use crate::models::{DailyMealPlan, MealRecommendation, MealType, NutritionalNeeds, UserProfile};

/// Builds daily plans one meal at a time. Each meal is generated with the
/// names of every food already chosen that day, so the four calls run in
/// order and never concurrently.
#[derive(Clone)]
pub struct MealPlanOrchestrator {
    provider: Arc<dyn GenerativeMealProvider>,
}

impl MealPlanOrchestrator {
    pub fn new(provider: Arc<dyn GenerativeMealProvider>) -> Self {
        Self { provider }
    }

    /// Computes needs for `profile` and builds the plan for `date`.
    ///
    /// Only an invalid profile fails. Generation failures become fallback meals.
    pub async fn build_daily_plan(&self, profile: &UserProfile, date: NaiveDate) -> Result<DailyMealPlan> {
        let needs = calculate_needs(profile)?;
        Ok(self.build_daily_plan_with_needs(profile, &needs, date).await)
    }

    pub async fn build_daily_plan_with_needs(
        &self,
        profile: &UserProfile,
        needs: &NutritionalNeeds,
        date: NaiveDate,
    ) -> DailyMealPlan {
        info!(%date, daily_calories = needs.daily_calories, "Building daily meal plan");

        let mut meals = Vec::with_capacity(MealType::DAILY_ORDER.len());
        let mut chosen_foods: Vec<String> = Vec::new();

        for meal_type in MealType::DAILY_ORDER {
            let meal = self.recommend_meal(profile, needs, meal_type, &chosen_foods).await;
            chosen_foods.extend(meal.food_names().map(str::to_string));
            meals.push(meal);
        }

        let total_calories: f64 = meals.iter().map(|meal| meal.total_calories).sum();
        let nutritional_goals_net = if needs.daily_calories == 0 {
            0
        } else {
            (total_calories / f64::from(needs.daily_calories) * 100.0).round().max(0.0) as u32
        };

        DailyMealPlan {
            date,
            meals,
            total_calories,
            nutritional_goals_net,
            personalized_insights: personalized_insights(),
        }
    }

    /// One meal against its share of the day. Falls back to the synthetic
    /// balanced meal when the provider fails.
    pub async fn recommend_meal(
        &self,
        profile: &UserProfile,
        needs: &NutritionalNeeds,
        meal_type: MealType,
        previous_food_names: &[String],
    ) -> MealRecommendation {
        let targets = MealTargets::for_meal(needs, meal_type);
        let request = MealGenerationRequest {
            profile,
            needs,
            meal_type,
            targets,
            previous_food_names,
        };

        match self.provider.generate(request).await {
            Ok(meal) => {
                debug!(%meal_type, foods = meal.foods.len(), "Generated meal");
                meal
            }
            Err(e) => {
                warn!(%meal_type, error = %e, "Meal generation failed, using fallback meal");
                fallback_meal(meal_type, &targets)
            }
        }
    }
}
