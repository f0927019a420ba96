use std::collections::BTreeMap;

/// Nutrient amounts are finite and never negative.
pub fn check_amount(field: &str, value: f64) -> Result<f64, String> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{field} must be a non-negative number, got {value}"))
    }
}

pub fn check_amounts(field: &str, amounts: &BTreeMap<String, f64>) -> Result<(), String> {
    for (key, value) in amounts {
        check_amount(&format!("{field}.{key}"), *value)?;
    }
    Ok(())
}
