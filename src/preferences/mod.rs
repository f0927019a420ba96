pub mod food_suggestions;
pub mod learner;

pub use food_suggestions::{FoodSuggester, FoodSuggestion};
pub use learner::{PreferenceLearner, FALLBACK_PREFERENCE_SUGGESTION};
