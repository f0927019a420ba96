pub mod amounts;
pub mod feedback;
pub mod meal;
pub mod needs;
pub mod photo;
pub mod profile;

pub use amounts::{check_amount, check_amounts};
pub use feedback::MealFeedback;
pub use meal::{
    DailyMealPlan, Difficulty, FoodCategory, FoodItem, MacroBreakdown, MealRecommendation,
    MealType, ParseMealTypeError,
};
pub use needs::NutritionalNeeds;
pub use photo::{NutrientBreakdown, PhotoAnalysis};
pub use profile::{ActivityLevel, Gender, UserProfile};
