use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Provider literal stamped on every normalized recipe.
pub const SOURCE: &str = "Spoonacular API";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub servings: u32,
    pub source: &'static str,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<RecipeInstruction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInstruction {
    pub step_number: u32,
    pub instruction: String,
}

// ---- upstream payload shapes ----
//
// Every field is optional and any field of the wrong type reads as absent, so
// deserializing a recipe object never fails.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamRecipe {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub servings: Option<f64>,
    #[serde(default, deserialize_with = "lenient_objects")]
    pub extended_ingredients: Option<Vec<UpstreamIngredient>>,
    #[serde(default, deserialize_with = "lenient_positional")]
    pub analyzed_instructions: Option<Vec<Option<UpstreamInstructionGroup>>>,
    #[serde(default, deserialize_with = "lenient")]
    pub instructions: Option<String>,
}

impl UpstreamRecipe {
    /// Reads a raw upstream value; anything that is not an object yields an empty payload.
    pub fn from_value(raw: Value) -> Self {
        serde_json::from_value(raw).unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamIngredient {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub original_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub unit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamInstructionGroup {
    #[serde(default, deserialize_with = "lenient_objects")]
    pub steps: Option<Vec<UpstreamStep>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamStep {
    #[serde(default, deserialize_with = "lenient")]
    pub number: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub step: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Array of objects; non-object entries are dropped, a non-array reads as absent.
fn lenient_objects<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(None),
    };
    Ok(Some(
        items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
    ))
}

/// Array whose positions matter; a non-object entry stays in place as `None`.
fn lenient_positional<'de, D, T>(deserializer: D) -> Result<Option<Vec<Option<T>>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(None),
    };
    Ok(Some(
        items
            .into_iter()
            .map(|item| match item {
                Value::Object(_) => serde_json::from_value(item).ok(),
                _ => None,
            })
            .collect(),
    ))
}
