use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::amounts::{check_amount, check_amounts};

/// Nutrient totals estimated for a photographed meal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NutrientBreakdown {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

/// Structured output of the external photo analysis service. Every field is
/// optional on the wire; absent values read as zero or empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PhotoAnalysis {
    pub meal_name: Option<String>,
    pub description: Option<String>,
    pub identified_foods: Vec<String>,
    #[serde(alias = "nutrients")]
    pub nutrition: NutrientBreakdown,
    pub vitamins: BTreeMap<String, f64>,
    pub minerals: BTreeMap<String, f64>,
    pub health_score: f64,
}

impl PhotoAnalysis {
    pub fn check_amounts(&self) -> Result<(), String> {
        let nutrition = &self.nutrition;
        for (field, value) in [
            ("calories", nutrition.calories),
            ("protein", nutrition.protein),
            ("carbs", nutrition.carbs),
            ("fat", nutrition.fat),
            ("fiber", nutrition.fiber),
        ] {
            check_amount(&format!("photoAnalysis.nutrition.{field}"), value)?;
        }
        check_amounts("photoAnalysis.vitamins", &self.vitamins)?;
        check_amounts("photoAnalysis.minerals", &self.minerals)?;
        if !self.health_score.is_finite() {
            return Err(format!("photoAnalysis.healthScore must be a number, got {}", self.health_score));
        }
        Ok(())
    }
}
