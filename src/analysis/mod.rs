pub mod gaps;
pub mod photo_reconciler;

pub use gaps::{analyze_gaps, improvement_areas, overall_score, percentage_of, ImprovementArea, NutritionalGaps};
pub use photo_reconciler::{
    reconcile, reconcile_with_needs, NutrientComparison, NutritionalComparison, PhotoReconciliation,
};
