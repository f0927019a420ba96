use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::api_connection::{JsonSchema, JsonSchemaDefinition};
use crate::generation::{parse_json_content, ContentGenerator, ContentRequest, GenerationError};

const SUGGESTION_MAX_TOKENS: u32 = 1024;
const SUGGESTION_COUNT: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodSuggestion {
    pub name: String,
    pub category: String,
    pub benefits: String,
}

struct Staple {
    name: &'static str,
    category: &'static str,
    benefits: &'static str,
    allergens: &'static [&'static str],
    excluded_for: &'static [&'static str],
}

const STAPLES: [Staple; 5] = [
    Staple {
        name: "Spinach",
        category: "vegetable",
        benefits: "Rich in iron, folate and vitamin K",
        allergens: &[],
        excluded_for: &[],
    },
    Staple {
        name: "Salmon",
        category: "protein",
        benefits: "High-quality protein and omega-3 fats for heart health",
        allergens: &["fish", "salmon"],
        excluded_for: &["vegan", "vegetarian"],
    },
    Staple {
        name: "Quinoa",
        category: "grain",
        benefits: "Complete plant protein with fiber and magnesium",
        allergens: &[],
        excluded_for: &[],
    },
    Staple {
        name: "Blueberries",
        category: "fruit",
        benefits: "Antioxidants, vitamin C and fiber",
        allergens: &["berries"],
        excluded_for: &[],
    },
    Staple {
        name: "Greek yogurt",
        category: "dairy",
        benefits: "Protein, calcium and probiotics for gut health",
        allergens: &["dairy", "milk", "lactose"],
        excluded_for: &["vegan", "dairy-free", "lactose-free"],
    },
];

const SUGGESTION_SYSTEM_PROMPT: &str = "You recommend whole foods that support a user's health goals.
Return ONLY a JSON object that follows the provided schema, with no markdown and no extra text.
Never suggest a food that contains one of the user's allergens or breaks a dietary restriction.
\"benefits\" is one short sentence tying the food to the user's goals.";

#[derive(Debug, Deserialize)]
struct SuggestionList {
    suggestions: Vec<FoodSuggestion>,
}

fn lowercase_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

fn mentions_allergen(name: &str, allergies: &[String]) -> bool {
    let name = name.to_lowercase();
    allergies.iter().any(|allergy| name.contains(allergy.as_str()))
}

/// The fixed staples, minus anything the user is allergic to or excludes.
pub fn fallback_suggestions(dietary_restrictions: &[String], allergies: &[String]) -> Vec<FoodSuggestion> {
    let restrictions = lowercase_terms(dietary_restrictions);
    let allergies = lowercase_terms(allergies);

    STAPLES
        .iter()
        .filter(|staple| !mentions_allergen(staple.name, &allergies))
        .filter(|staple| !staple.allergens.iter().any(|a| allergies.iter().any(|x| x == a)))
        .filter(|staple| !staple.excluded_for.iter().any(|r| restrictions.iter().any(|x| x == r)))
        .map(|staple| FoodSuggestion {
            name: staple.name.to_string(),
            category: staple.category.to_string(),
            benefits: staple.benefits.to_string(),
        })
        .collect()
}

/// Goal-driven food ideas from the content service, with a static fallback.
#[derive(Clone)]
pub struct FoodSuggester {
    generator: Arc<dyn ContentGenerator>,
}

impl FoodSuggester {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { generator }
    }

    pub async fn suggest(
        &self,
        health_goals: &[String],
        dietary_restrictions: &[String],
        allergies: &[String],
    ) -> Vec<FoodSuggestion> {
        match self.generate(health_goals, dietary_restrictions, allergies).await {
            Ok(suggestions) if !suggestions.is_empty() => suggestions,
            Ok(_) => {
                warn!("Food suggestion service returned nothing usable, using staples");
                fallback_suggestions(dietary_restrictions, allergies)
            }
            Err(e) => {
                warn!(error = %e, "Food suggestion generation failed, using staples");
                fallback_suggestions(dietary_restrictions, allergies)
            }
        }
    }

    async fn generate(
        &self,
        health_goals: &[String],
        dietary_restrictions: &[String],
        allergies: &[String],
    ) -> Result<Vec<FoodSuggestion>, GenerationError> {
        let request = ContentRequest {
            system_prompt: SUGGESTION_SYSTEM_PROMPT.to_string(),
            user_prompt: suggestion_prompt(health_goals, dietary_restrictions, allergies),
            schema: suggestion_schema(),
            max_tokens: SUGGESTION_MAX_TOKENS,
        };
        let raw = self.generator.generate_json(request).await?;
        let list: SuggestionList = parse_json_content(&raw)?;

        let allergy_terms = lowercase_terms(allergies);
        Ok(list
            .suggestions
            .into_iter()
            .filter(|s| !s.name.trim().is_empty())
            .filter(|s| !mentions_allergen(&s.name, &allergy_terms))
            .collect())
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn suggestion_prompt(health_goals: &[String], dietary_restrictions: &[String], allergies: &[String]) -> String {
    format!(
        "Suggest {SUGGESTION_COUNT} foods.\n- Health goals: {}\n- Dietary restrictions: {}\n- Allergies: {}\n",
        list_or_none(health_goals),
        list_or_none(dietary_restrictions),
        list_or_none(allergies),
    )
}

pub fn suggestion_schema() -> JsonSchemaDefinition {
    let suggestion = JsonSchema::object(
        vec![
            ("name", JsonSchema::string("Food name.")),
            ("category", JsonSchema::string("Food group, e.g. vegetable or protein.")),
            ("benefits", JsonSchema::string("Why it helps with the user's goals.")),
        ],
        &["name", "category", "benefits"],
    );
    JsonSchemaDefinition {
        name: "food_suggestions".to_string(),
        strict: Some(false),
        schema: JsonSchema::object(
            vec![("suggestions", JsonSchema::array(suggestion, "Suggested foods."))],
            &["suggestions"],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedGenerator(Option<String>);

    #[async_trait]
    impl ContentGenerator for FixedGenerator {
        async fn generate_json(&self, request: ContentRequest) -> Result<String, GenerationError> {
            assert!(request.user_prompt.contains("- Health goals: heart health"));
            self.0.clone().ok_or(GenerationError::EmptyResponse)
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn names(suggestions: &[FoodSuggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_fallback_without_constraints_lists_all_staples() {
        let all = fallback_suggestions(&[], &[]);
        assert_eq!(names(&all), vec!["Spinach", "Salmon", "Quinoa", "Blueberries", "Greek yogurt"]);
    }

    #[test]
    fn test_fallback_respects_allergies_and_restrictions() {
        let filtered = fallback_suggestions(&strings(&["Vegan"]), &strings(&["Blueberries"]));
        assert_eq!(names(&filtered), vec!["Spinach", "Quinoa"]);

        let no_dairy = fallback_suggestions(&[], &strings(&["milk"]));
        assert!(!names(&no_dairy).contains(&"Greek yogurt"));
    }

    #[test]
    fn test_suggestion_prompt_marks_empty_lists() {
        let prompt = suggestion_prompt(&strings(&["energy"]), &[], &strings(&["peanuts", "soy"]));
        assert_eq!(
            prompt,
            format!(
                "Suggest {SUGGESTION_COUNT} foods.\n- Health goals: energy\n- Dietary restrictions: none\n- Allergies: peanuts, soy\n"
            )
        );
    }

    #[tokio::test]
    async fn test_generated_suggestions_drop_allergens() {
        let reply = json!({
            "suggestions": [
                { "name": "Walnuts", "category": "fat", "benefits": "Omega-3 fats" },
                { "name": "Oats", "category": "grain", "benefits": "Soluble fiber lowers LDL" }
            ]
        })
        .to_string();
        let suggester = FoodSuggester::new(Arc::new(FixedGenerator(Some(reply))));

        let result = suggester
            .suggest(&strings(&["heart health"]), &[], &strings(&["walnut"]))
            .await;

        assert_eq!(names(&result), vec!["Oats"]);
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_staples() {
        let suggester = FoodSuggester::new(Arc::new(FixedGenerator(None)));
        let result = suggester.suggest(&strings(&["heart health"]), &[], &[]).await;
        assert_eq!(result.len(), 5);
    }
}
