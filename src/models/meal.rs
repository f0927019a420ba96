use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::amounts::{check_amount, check_amounts};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Generation order for a day. Later meals see the foods chosen for earlier ones.
    pub const DAILY_ORDER: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown meal type '{0}' (expected breakfast, lunch, dinner or snack)")]
pub struct ParseMealTypeError(pub String);

impl FromStr for MealType {
    type Err = ParseMealTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => Err(ParseMealTypeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Protein,
    Vegetable,
    Grain,
    Fruit,
    Dairy,
    Fat,
    Mixed,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 7] = [
        FoodCategory::Protein,
        FoodCategory::Vegetable,
        FoodCategory::Grain,
        FoodCategory::Fruit,
        FoodCategory::Dairy,
        FoodCategory::Fat,
        FoodCategory::Mixed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FoodCategory::Protein => "protein",
            FoodCategory::Vegetable => "vegetable",
            FoodCategory::Grain => "grain",
            FoodCategory::Fruit => "fruit",
            FoodCategory::Dairy => "dairy",
            FoodCategory::Fat => "fat",
            FoodCategory::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One food inside a meal. Amounts are grams except `calories` (kcal).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub name: String,
    pub category: FoodCategory,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    #[serde(default)]
    pub vitamins: BTreeMap<String, f64>,
    #[serde(default)]
    pub minerals: BTreeMap<String, f64>,
    /// 0-100
    pub health_score: u8,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct MacroBreakdown {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealRecommendation {
    pub meal_type: MealType,
    /// Presentation order.
    pub foods: Vec<FoodItem>,
    pub total_calories: f64,
    pub macro_breakdown: MacroBreakdown,
    /// 0-100
    pub health_score: u8,
    pub reasoning: String,
    /// minutes
    pub preparation_time: u32,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<String>,
}

impl FoodItem {
    /// Errors name the offending field under `prefix`, e.g. `foods[1].fat`.
    pub fn check_amounts(&self, prefix: &str) -> Result<(), String> {
        for (field, value) in [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
            ("fiber", self.fiber),
        ] {
            check_amount(&format!("{prefix}.{field}"), value)?;
        }
        check_amounts(&format!("{prefix}.vitamins"), &self.vitamins)?;
        check_amounts(&format!("{prefix}.minerals"), &self.minerals)
    }
}

impl MealRecommendation {
    pub fn food_names(&self) -> impl Iterator<Item = &str> {
        self.foods.iter().map(|food| food.name.as_str())
    }

    pub fn check_amounts(&self, prefix: &str) -> Result<(), String> {
        for (i, food) in self.foods.iter().enumerate() {
            food.check_amounts(&format!("{prefix}.foods[{i}]"))?;
        }
        let macros = &self.macro_breakdown;
        for (field, value) in [
            ("totalCalories", self.total_calories),
            ("macroBreakdown.protein", macros.protein),
            ("macroBreakdown.carbs", macros.carbs),
            ("macroBreakdown.fat", macros.fat),
            ("macroBreakdown.fiber", macros.fiber),
        ] {
            check_amount(&format!("{prefix}.{field}"), value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyMealPlan {
    pub date: NaiveDate,
    /// Always breakfast, lunch, dinner, snack.
    pub meals: Vec<MealRecommendation>,
    pub total_calories: f64,
    /// Percentage of the daily calorie target covered by `total_calories`.
    pub nutritional_goals_net: u32,
    pub personalized_insights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_parse_is_case_insensitive() {
        assert_eq!("Dinner".parse::<MealType>(), Ok(MealType::Dinner));
        assert_eq!(" snack ".parse::<MealType>(), Ok(MealType::Snack));
        assert!("brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn test_daily_order_is_fixed() {
        let names: Vec<&str> = MealType::DAILY_ORDER.iter().map(|m| m.as_str()).collect();
        assert_eq!(names, vec!["breakfast", "lunch", "dinner", "snack"]);
    }

    #[test]
    fn test_recipe_omitted_when_absent() {
        let meal = MealRecommendation {
            meal_type: MealType::Snack,
            foods: vec![],
            total_calories: 0.0,
            macro_breakdown: MacroBreakdown::default(),
            health_score: 50,
            reasoning: String::new(),
            preparation_time: 0,
            difficulty: Difficulty::Easy,
            recipe: None,
        };
        let value = serde_json::to_value(&meal).unwrap();
        assert!(value.get("recipe").is_none());
        assert_eq!(value["mealType"], "snack");
        assert_eq!(value["difficulty"], "easy");
    }

    #[test]
    fn test_check_amounts_names_nested_food_field() {
        let food = FoodItem {
            name: "Lentils".to_string(),
            category: FoodCategory::Protein,
            calories: 230.0,
            protein: -1e300,
            carbs: 40.0,
            fat: 0.8,
            fiber: 15.6,
            vitamins: BTreeMap::new(),
            minerals: BTreeMap::new(),
            health_score: 85,
            tags: vec![],
        };
        let mut meal = MealRecommendation {
            meal_type: MealType::Lunch,
            foods: vec![food],
            total_calories: 230.0,
            macro_breakdown: MacroBreakdown::default(),
            health_score: 80,
            reasoning: String::new(),
            preparation_time: 20,
            difficulty: Difficulty::Easy,
            recipe: None,
        };
        let err = meal.check_amounts("meals[0]").unwrap_err();
        assert!(err.contains("meals[0].foods[0].protein"), "{err}");

        meal.foods[0].protein = 18.0;
        assert!(meal.check_amounts("meals[0]").is_ok());
        meal.macro_breakdown.fat = f64::NAN;
        let err = meal.check_amounts("meals[0]").unwrap_err();
        assert!(err.contains("macroBreakdown.fat"), "{err}");
    }
}
