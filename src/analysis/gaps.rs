use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{MealRecommendation, NutritionalNeeds};

/// Below this share of target a nutrient is flagged for improvement.
pub const IMPROVEMENT_THRESHOLD_PCT: i64 = 80;

/// Nutrient name -> percent of the daily target consumed. Not clamped.
pub type NutritionalGaps = BTreeMap<String, i64>;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementArea {
    pub nutrient: String,
    pub percentage: i64,
    pub deficit: i64,
}

/// `round(consumed / target x 100)`, or 0 when there is no target.
pub fn percentage_of(consumed: f64, target: f64) -> i64 {
    if target <= 0.0 || !consumed.is_finite() {
        return 0;
    }
    (consumed / target * 100.0).round() as i64
}

fn add_all(totals: &mut BTreeMap<String, f64>, amounts: &BTreeMap<String, f64>) {
    for (name, amount) in amounts {
        *totals.entry(name.clone()).or_insert(0.0) += amount;
    }
}

/// Percent of each macro, vitamin and mineral target covered by `meals`.
///
/// Only nutrients with a target in `needs` are reported. Foods without an
/// entry for a micronutrient contribute nothing to it.
pub fn analyze_gaps(meals: &[MealRecommendation], needs: &NutritionalNeeds) -> NutritionalGaps {
    let foods = || meals.iter().flat_map(|meal| meal.foods.iter());

    let protein: f64 = foods().map(|f| f.protein).sum();
    let carbs: f64 = foods().map(|f| f.carbs).sum();
    let fat: f64 = foods().map(|f| f.fat).sum();
    let fiber: f64 = foods().map(|f| f.fiber).sum();

    let mut vitamins = BTreeMap::new();
    let mut minerals = BTreeMap::new();
    for food in foods() {
        add_all(&mut vitamins, &food.vitamins);
        add_all(&mut minerals, &food.minerals);
    }

    let mut gaps = NutritionalGaps::new();
    gaps.insert("protein".to_string(), percentage_of(protein, f64::from(needs.protein)));
    gaps.insert("carbs".to_string(), percentage_of(carbs, f64::from(needs.carbohydrates)));
    gaps.insert("fat".to_string(), percentage_of(fat, f64::from(needs.fat)));
    gaps.insert("fiber".to_string(), percentage_of(fiber, f64::from(needs.fiber)));

    for (targets, consumed) in [(&needs.vitamins, &vitamins), (&needs.minerals, &minerals)] {
        for (name, target) in targets {
            let amount = consumed.get(name).copied().unwrap_or(0.0);
            gaps.insert(name.clone(), percentage_of(amount, *target));
        }
    }

    gaps
}

/// Nutrients under the threshold, largest deficit first.
pub fn improvement_areas(gaps: &NutritionalGaps) -> Vec<ImprovementArea> {
    let mut areas: Vec<ImprovementArea> = gaps
        .iter()
        .filter(|(_, pct)| **pct < IMPROVEMENT_THRESHOLD_PCT)
        .map(|(name, pct)| ImprovementArea {
            nutrient: name.clone(),
            percentage: *pct,
            deficit: 100i64.saturating_sub(*pct),
        })
        .collect();
    areas.sort_by(|a, b| b.deficit.cmp(&a.deficit).then_with(|| a.nutrient.cmp(&b.nutrient)));
    areas
}

/// Mean of the percentages with each capped at 100, rounded. 0 when empty.
pub fn overall_score(gaps: &NutritionalGaps) -> i64 {
    if gaps.is_empty() {
        return 0;
    }
    let capped_sum = gaps
        .values()
        .fold(0i64, |sum, pct| sum.saturating_add((*pct).min(100)));
    (capped_sum as f64 / gaps.len() as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ActivityLevel, Difficulty, FoodCategory, FoodItem, Gender, MacroBreakdown, MealType,
        UserProfile,
    };
    use crate::planner::needs_calculator::calculate_needs;

    fn food(protein: f64, carbs: f64, fat: f64, fiber: f64) -> FoodItem {
        FoodItem {
            name: "test food".to_string(),
            category: FoodCategory::Mixed,
            calories: 0.0,
            protein,
            carbs,
            fat,
            fiber,
            vitamins: BTreeMap::new(),
            minerals: BTreeMap::new(),
            health_score: 70,
            tags: vec![],
        }
    }

    fn meal(foods: Vec<FoodItem>) -> MealRecommendation {
        MealRecommendation {
            meal_type: MealType::Lunch,
            foods,
            total_calories: 0.0,
            macro_breakdown: MacroBreakdown::default(),
            health_score: 70,
            reasoning: String::new(),
            preparation_time: 0,
            difficulty: Difficulty::Easy,
            recipe: None,
        }
    }

    fn needs() -> NutritionalNeeds {
        NutritionalNeeds {
            daily_calories: 2000,
            protein: 100,
            carbohydrates: 200,
            fat: 50,
            fiber: 25,
            vitamins: BTreeMap::from([("vitaminC".to_string(), 75.0)]),
            minerals: BTreeMap::from([("iron".to_string(), 18.0)]),
        }
    }

    #[test]
    fn test_sums_across_meals_and_foods() {
        let mut rich = food(30.0, 50.0, 20.0, 5.0);
        rich.vitamins.insert("vitaminC".to_string(), 60.0);
        let meals = vec![
            meal(vec![rich, food(20.0, 50.0, 10.0, 5.0)]),
            meal(vec![food(10.0, 0.0, 0.0, 0.0)]),
        ];

        let gaps = analyze_gaps(&meals, &needs());

        assert_eq!(gaps["protein"], 60);
        assert_eq!(gaps["carbs"], 50);
        assert_eq!(gaps["fat"], 60);
        assert_eq!(gaps["fiber"], 40);
        assert_eq!(gaps["vitaminC"], 80);
        assert_eq!(gaps["iron"], 0);
        assert_eq!(gaps.len(), 6);
    }

    #[test]
    fn test_percentages_are_not_clamped() {
        let meals = vec![meal(vec![food(250.0, 0.0, 0.0, 0.0)])];
        assert_eq!(analyze_gaps(&meals, &needs())["protein"], 250);
    }

    #[test]
    fn test_zero_target_reads_as_zero() {
        assert_eq!(percentage_of(10.0, 0.0), 0);
        assert_eq!(percentage_of(1.0, 3.0), 33);
    }

    #[test]
    fn test_improvement_areas_threshold_and_order() {
        let gaps = NutritionalGaps::from([
            ("protein".to_string(), 80),
            ("fiber".to_string(), 40),
            ("iron".to_string(), 79),
            ("calcium".to_string(), 40),
            ("fat".to_string(), 130),
        ]);
        let areas = improvement_areas(&gaps);
        let names: Vec<&str> = areas.iter().map(|a| a.nutrient.as_str()).collect();
        assert_eq!(names, vec!["calcium", "fiber", "iron"]);
        assert_eq!(areas[0].deficit, 60);
        assert_eq!(areas[2].deficit, 21);
    }

    #[test]
    fn test_overall_score_caps_each_value() {
        let gaps = NutritionalGaps::from([
            ("protein".to_string(), 150),
            ("fiber".to_string(), 50),
            ("iron".to_string(), 75),
        ]);
        // (100 + 50 + 75) / 3 = 75
        assert_eq!(overall_score(&gaps), 75);
        assert_eq!(overall_score(&NutritionalGaps::new()), 0);
    }

    #[test]
    fn test_extreme_percentages_do_not_overflow() {
        let gaps = NutritionalGaps::from([
            ("protein".to_string(), i64::MIN),
            ("fat".to_string(), i64::MIN),
        ]);
        let areas = improvement_areas(&gaps);
        assert_eq!(areas.len(), 2);
        assert!(areas.iter().all(|a| a.deficit == i64::MAX));
        assert!(overall_score(&gaps) < 0);
    }

    #[test]
    fn test_empty_meals_report_zero_everywhere() {
        let profile = UserProfile::new(30, Gender::Female, ActivityLevel::ModeratelyActive, 65.0, 165.0);
        let needs = calculate_needs(&profile).unwrap();

        let gaps = analyze_gaps(&[], &needs);

        assert_eq!(gaps.len(), 22);
        assert!(gaps.values().all(|pct| *pct == 0), "{gaps:?}");
        assert_eq!(overall_score(&gaps), 0);

        let areas = improvement_areas(&gaps);
        assert_eq!(areas.len(), 22);
        assert!(areas.iter().all(|a| a.percentage == 0 && a.deficit == 100));
        for name in gaps.keys() {
            assert!(areas.iter().any(|a| &a.nutrient == name), "missing {name}");
        }
    }
}
