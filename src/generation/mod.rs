//! Adapters to the external generative content service.
//!
//! [`ContentGenerator`] is the raw capability (structured prompt in, JSON text
//! out). [`GenerativeMealProvider`] sits on top of it and owns the meal
//! prompt and response contract.

pub mod content;
pub mod error;
pub mod meal_provider;
pub mod prompts;
pub mod response;

pub use content::{ContentGenerator, ContentRequest, OpenRouterGenerator};
pub use error::GenerationError;
pub use meal_provider::{GenerativeMealProvider, LlmMealProvider, MealGenerationRequest};
pub use response::{parse_json_content, strip_code_fences};
