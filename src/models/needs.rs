use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Daily nutritional targets derived from a [`crate::models::UserProfile`].
///
/// Always recomputed from the profile; never cached across profile edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutritionalNeeds {
    pub daily_calories: u32,
    /// grams
    pub protein: u32,
    /// grams
    pub carbohydrates: u32,
    /// grams
    pub fat: u32,
    /// grams
    pub fiber: u32,
    pub vitamins: BTreeMap<String, f64>,
    pub minerals: BTreeMap<String, f64>,
}

impl NutritionalNeeds {
    /// Calories implied by the macro targets at 4/4/9 kcal per gram.
    pub fn macro_calories(&self) -> u64 {
        u64::from(self.protein) * 4 + u64::from(self.carbohydrates) * 4 + u64::from(self.fat) * 9
    }
}
