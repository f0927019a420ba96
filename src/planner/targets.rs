use serde::Serialize;

use crate::models::{MealType, NutritionalNeeds};

/// Share of the daily calorie target assigned to each meal. Sums to 1.0.
pub fn calorie_fraction(meal_type: MealType) -> f64 {
    match meal_type {
        MealType::Breakfast => 0.25,
        MealType::Lunch => 0.35,
        MealType::Dinner => 0.30,
        MealType::Snack => 0.10,
    }
}

/// Rounded numeric targets for one meal of the day.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MealTargets {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub fiber: u32,
}

impl MealTargets {
    /// Calories are `dailyCalories x fraction`; each macro is scaled by the
    /// meal's rounded calorie target over the daily total.
    pub fn for_meal(needs: &NutritionalNeeds, meal_type: MealType) -> Self {
        let fraction = calorie_fraction(meal_type);
        let calories = (f64::from(needs.daily_calories) * fraction).round();
        let share = if needs.daily_calories == 0 {
            fraction
        } else {
            calories / f64::from(needs.daily_calories)
        };
        let scale = |grams: u32| (f64::from(grams) * share).round() as u32;

        Self {
            calories: calories as u32,
            protein: scale(needs.protein),
            carbs: scale(needs.carbohydrates),
            fat: scale(needs.fat),
            fiber: scale(needs.fiber),
        }
    }
}
