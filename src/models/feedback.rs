use serde::{Deserialize, Serialize};

/// A user's rating of a previously recommended meal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealFeedback {
    pub meal_id: String,
    pub rating: f64,
    #[serde(default)]
    pub feedback: String,
}
