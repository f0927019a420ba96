use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
}

/// Self-reported activity level, used to scale BMR into daily energy expenditure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Physical job or training twice a day
    ExtraActive,
}

impl ActivityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtraActive => "extra_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Other => "other",
        };
        f.write_str(s)
    }
}

/// Biometric and goal profile of one user. Owned by the caller and never
/// mutated by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub age: u32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    /// Body weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    #[serde(default)]
    pub health_goals: Vec<String>,
    #[serde(default)]
    pub medical_conditions: BTreeSet<String>,
    #[serde(default)]
    pub dietary_restrictions: BTreeSet<String>,
    #[serde(default)]
    pub food_preferences: BTreeSet<String>,
    #[serde(default)]
    pub allergies: BTreeSet<String>,
}

impl UserProfile {
    pub fn new(
        age: u32,
        gender: Gender,
        activity_level: ActivityLevel,
        weight: f64,
        height: f64,
    ) -> Self {
        Self {
            age,
            gender,
            activity_level,
            weight,
            height,
            health_goals: Vec::new(),
            medical_conditions: BTreeSet::new(),
            dietary_restrictions: BTreeSet::new(),
            food_preferences: BTreeSet::new(),
            allergies: BTreeSet::new(),
        }
    }
}
