pub mod fallback;
pub mod needs_calculator;
pub mod orchestrator;
pub mod targets;

pub use needs_calculator::calculate_needs;
pub use orchestrator::MealPlanOrchestrator;
pub use targets::{calorie_fraction, MealTargets};
