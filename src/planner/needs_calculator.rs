//! Daily nutritional needs from a user profile.
//!
//! Energy uses the revised Harris-Benedict equation (Roza & Shizgal, 1984)
//! scaled by the standard activity multipliers. Micronutrient targets are
//! the fixed adult RDA table and do not depend on the profile.

use std::collections::BTreeMap;

use crate::error::{EngineError, Result};
use crate::models::{ActivityLevel, Gender, NutritionalNeeds, UserProfile};

pub const PROTEIN_CALORIE_SHARE: f64 = 0.25;
pub const CARB_CALORIE_SHARE: f64 = 0.45;
pub const FAT_CALORIE_SHARE: f64 = 0.30;

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARB: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

pub const MAX_WEIGHT_KG: f64 = 650.0;
pub const MAX_HEIGHT_CM: f64 = 300.0;

pub const FIBER_UNDER_50_G: u32 = 25;
pub const FIBER_50_AND_OVER_G: u32 = 21;

/// (key, amount, unit)
pub const VITAMIN_TARGETS: [(&str, f64, &str); 11] = [
    ("vitaminA", 700.0, "mcg"),
    ("vitaminC", 75.0, "mg"),
    ("vitaminD", 15.0, "mcg"),
    ("vitaminE", 15.0, "mg"),
    ("vitaminK", 90.0, "mcg"),
    ("thiamin", 1.1, "mg"),
    ("riboflavin", 1.3, "mg"),
    ("niacin", 14.0, "mg"),
    ("vitaminB6", 1.3, "mg"),
    ("folate", 400.0, "mcg"),
    ("vitaminB12", 2.4, "mcg"),
];

/// (key, amount, unit). Sodium is an upper limit rather than a target.
pub const MINERAL_TARGETS: [(&str, f64, &str); 7] = [
    ("iron", 18.0, "mg"),
    ("calcium", 1000.0, "mg"),
    ("potassium", 2600.0, "mg"),
    ("magnesium", 310.0, "mg"),
    ("zinc", 8.0, "mg"),
    ("phosphorus", 700.0, "mg"),
    ("sodium", 2300.0, "mg"),
];

pub fn activity_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::LightlyActive => 1.375,
        ActivityLevel::ModeratelyActive => 1.55,
        ActivityLevel::VeryActive => 1.725,
        ActivityLevel::ExtraActive => 1.9,
    }
}

/// Revised Harris-Benedict BMR in kcal/day.
///
/// - female: 447.593 + 9.247 x weight + 3.098 x height - 4.330 x age
/// - male/other: 88.362 + 13.397 x weight + 4.799 x height - 5.677 x age
pub fn basal_metabolic_rate(gender: Gender, weight_kg: f64, height_cm: f64, age: u32) -> f64 {
    let age = f64::from(age);
    match gender {
        Gender::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
        Gender::Male | Gender::Other => {
            88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age
        }
    }
}

fn macro_grams(daily_calories: u32, share: f64, kcal_per_gram: f64) -> u32 {
    (f64::from(daily_calories) * share / kcal_per_gram).round() as u32
}

fn table_to_map(table: &[(&str, f64, &str)]) -> BTreeMap<String, f64> {
    table
        .iter()
        .map(|(key, amount, _)| (key.to_string(), *amount))
        .collect()
}

/// Computes daily targets for `profile`.
///
/// # Errors
///
/// Returns a validation error if weight or height is not a positive number
/// within human range.
pub fn calculate_needs(profile: &UserProfile) -> Result<NutritionalNeeds> {
    if !(profile.weight > 0.0 && profile.weight <= MAX_WEIGHT_KG) {
        return Err(EngineError::invalid(format!(
            "Weight must be between 0 and {MAX_WEIGHT_KG} kilograms"
        )));
    }
    if !(profile.height > 0.0 && profile.height <= MAX_HEIGHT_CM) {
        return Err(EngineError::invalid(format!(
            "Height must be between 0 and {MAX_HEIGHT_CM} centimeters"
        )));
    }

    let bmr = basal_metabolic_rate(profile.gender, profile.weight, profile.height, profile.age);
    let tdee = bmr * activity_factor(profile.activity_level);
    // Extreme ages can push the formula below zero.
    let daily_calories = tdee.round().max(0.0) as u32;

    let fiber = if profile.age < 50 {
        FIBER_UNDER_50_G
    } else {
        FIBER_50_AND_OVER_G
    };

    Ok(NutritionalNeeds {
        daily_calories,
        protein: macro_grams(daily_calories, PROTEIN_CALORIE_SHARE, KCAL_PER_GRAM_PROTEIN),
        carbohydrates: macro_grams(daily_calories, CARB_CALORIE_SHARE, KCAL_PER_GRAM_CARB),
        fat: macro_grams(daily_calories, FAT_CALORIE_SHARE, KCAL_PER_GRAM_FAT),
        fiber,
        vitamins: table_to_map(&VITAMIN_TARGETS),
        minerals: table_to_map(&MINERAL_TARGETS),
    })
}
