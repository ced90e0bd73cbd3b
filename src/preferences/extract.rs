use serde_json::Value;

use super::model::{Allergen, Allergies, DietaryPreferences, UserPreferences, DEFAULT_LANGUAGE};
use crate::error::DiscoveryError;

/// Builds complete preferences from a raw onboarding record.
///
/// Every field falls back to its default when missing or not of the expected
/// shape. Only an absent record is an error; null, `false`, `""` and `0` count
/// as absent.
pub fn extract_preferences(record: Option<&Value>) -> Result<UserPreferences, DiscoveryError> {
    let record = record
        .filter(|v| !is_blank(v))
        .ok_or(DiscoveryError::PreferencesMissing)?;

    let mut allergies = Allergies::default();
    for allergen in Allergen::ALL {
        allergies.set(allergen, flag(record, "allergies", allergen.key()));
    }

    let dietary_preferences = DietaryPreferences {
        gluten_free: flag(record, "dietaryPreferences", "glutenFree"),
        vegan: flag(record, "dietaryPreferences", "vegan"),
        vegetarian: flag(record, "dietaryPreferences", "vegetarian"),
    };

    let language = record
        .get("preferences")
        .and_then(|p| p.get("language"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_string();

    Ok(UserPreferences {
        allergies,
        dietary_preferences,
        language,
    })
}

fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn flag(record: &Value, section: &str, key: &str) -> bool {
    record
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
