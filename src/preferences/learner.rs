use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api_connection::{JsonSchema, JsonSchemaDefinition};
use crate::generation::{parse_json_content, ContentGenerator, ContentRequest, GenerationError};
use crate::models::MealFeedback;

pub const FALLBACK_PREFERENCE_SUGGESTION: &str =
    "Continue tracking your meal preferences for better personalized recommendations";

const PREFERENCE_MAX_TOKENS: u32 = 1024;

const PREFERENCE_SYSTEM_PROMPT: &str = "You analyze meal feedback for a nutrition coaching app.
Return ONLY a JSON object that follows the provided schema, with no markdown and no extra text.
- \"preferredIngredients\": ingredients the user clearly enjoys (high ratings, positive comments).
- \"avoidedIngredients\": ingredients the user dislikes or reacts badly to.
- \"preparationInsights\": short, actionable sentences about cooking styles, portion sizes or timing the user prefers.
Leave a list empty rather than guessing.";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ExtractedPreferences {
    preferred_ingredients: Vec<String>,
    avoided_ingredients: Vec<String>,
    preparation_insights: Vec<String>,
}

impl ExtractedPreferences {
    fn into_suggestions(self) -> Vec<String> {
        let clean = |items: Vec<String>| -> Vec<String> {
            items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        };
        let preferred = clean(self.preferred_ingredients);
        let avoided = clean(self.avoided_ingredients);
        let insights = clean(self.preparation_insights);

        let mut suggestions = Vec::new();
        if !preferred.is_empty() {
            suggestions.push(format!("Include more meals with: {}", preferred.join(", ")));
        }
        if !avoided.is_empty() {
            suggestions.push(format!("Avoid or limit: {}", avoided.join(", ")));
        }
        suggestions.extend(insights);
        suggestions
    }
}

/// Turns meal ratings into advisory preference text. Never edits a profile.
#[derive(Clone)]
pub struct PreferenceLearner {
    generator: Arc<dyn ContentGenerator>,
}

impl PreferenceLearner {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { generator }
    }

    /// Always returns at least one suggestion.
    pub async fn update_preferences(&self, feedback: &[MealFeedback]) -> Vec<String> {
        if feedback.is_empty() {
            return vec![FALLBACK_PREFERENCE_SUGGESTION.to_string()];
        }

        match self.extract(feedback).await {
            Ok(suggestions) if !suggestions.is_empty() => {
                debug!(count = suggestions.len(), "Extracted preference suggestions");
                suggestions
            }
            Ok(_) => vec![FALLBACK_PREFERENCE_SUGGESTION.to_string()],
            Err(e) => {
                warn!(error = %e, "Preference extraction failed, using fallback suggestion");
                vec![FALLBACK_PREFERENCE_SUGGESTION.to_string()]
            }
        }
    }

    async fn extract(&self, feedback: &[MealFeedback]) -> Result<Vec<String>, GenerationError> {
        let request = ContentRequest {
            system_prompt: PREFERENCE_SYSTEM_PROMPT.to_string(),
            user_prompt: feedback_prompt(feedback),
            schema: preference_schema(),
            max_tokens: PREFERENCE_MAX_TOKENS,
        };
        let raw = self.generator.generate_json(request).await?;
        let extracted: ExtractedPreferences = parse_json_content(&raw)?;
        Ok(extracted.into_suggestions())
    }
}

fn feedback_prompt(feedback: &[MealFeedback]) -> String {
    let lines: String = feedback
        .iter()
        .map(|item| {
            let comment = item.feedback.trim();
            if comment.is_empty() {
                format!("- Meal {}: rated {}/5\n", item.meal_id, item.rating)
            } else {
                format!("- Meal {}: rated {}/5, comment: \"{comment}\"\n", item.meal_id, item.rating)
            }
        })
        .collect();
    format!("Meal feedback from the user:\n{lines}")
}

pub fn preference_schema() -> JsonSchemaDefinition {
    let string_list = |description: &str| JsonSchema::array(JsonSchema::string(""), description);
    JsonSchemaDefinition {
        name: "preference_update".to_string(),
        strict: Some(false),
        schema: JsonSchema::object(
            vec![
                ("preferredIngredients", string_list("Ingredients the user enjoys.")),
                ("avoidedIngredients", string_list("Ingredients the user dislikes.")),
                ("preparationInsights", string_list("Preparation or timing insights.")),
            ],
            &["preferredIngredients", "avoidedIngredients", "preparationInsights"],
        ),
    }
}
