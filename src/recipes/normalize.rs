use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::model::{
    Recipe, RecipeIngredient, RecipeInstruction, UpstreamIngredient, UpstreamRecipe,
    UpstreamStep, SOURCE,
};

pub const INSTRUCTIONS_UNAVAILABLE: &str = "Instructions not available for this recipe.";

lazy_static! {
    static ref HTML_TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref HTML_ENTITY_RE: Regex = Regex::new(r"&[^;]+;").unwrap();
    static ref STEP_SPLIT_RE: Regex = Regex::new(r"\d+\.|\n").unwrap();
}

/// Maps one raw upstream payload into a [`Recipe`]. Never fails.
pub fn normalize(raw: Value) -> Recipe {
    Recipe::from(UpstreamRecipe::from_value(raw))
}

impl From<UpstreamRecipe> for Recipe {
    fn from(up: UpstreamRecipe) -> Self {
        let instructions = map_instructions(&up);
        Self {
            recipe_id: up.id,
            title: up.title.unwrap_or_default(),
            description: up.summary.as_deref().map(strip_html).unwrap_or_default(),
            image_url: up.image.unwrap_or_default(),
            servings: up
                .servings
                .filter(|s| s.is_finite() && *s >= 1.0)
                .map(|s| s.round() as u32)
                .unwrap_or(1),
            source: SOURCE,
            ingredients: up
                .extended_ingredients
                .unwrap_or_default()
                .into_iter()
                .map(RecipeIngredient::from)
                .collect(),
            instructions,
        }
    }
}

impl From<UpstreamIngredient> for RecipeIngredient {
    fn from(ing: UpstreamIngredient) -> Self {
        let name = non_empty(ing.name)
            .or_else(|| non_empty(ing.original_name))
            .unwrap_or_default();
        Self {
            name,
            quantity: ing.amount.filter(|a| a.is_finite()).unwrap_or(0.0),
            unit: ing.unit.unwrap_or_default(),
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

/// Structured steps first, then the free-text field, then a single placeholder.
fn map_instructions(up: &UpstreamRecipe) -> Vec<RecipeInstruction> {
    let structured = up
        .analyzed_instructions
        .as_deref()
        .and_then(|groups| groups.first())
        .and_then(Option::as_ref)
        .and_then(|group| group.steps.as_deref())
        .filter(|steps| !steps.is_empty());

    if let Some(steps) = structured {
        return steps
            .iter()
            .enumerate()
            .map(|(idx, step)| structured_step(idx, step))
            .collect();
    }

    if let Some(text) = up.instructions.as_deref().filter(|t| !t.trim().is_empty()) {
        let steps = split_instructions(text);
        if !steps.is_empty() {
            return steps;
        }
    }

    vec![RecipeInstruction {
        step_number: 1,
        instruction: INSTRUCTIONS_UNAVAILABLE.to_string(),
    }]
}

fn structured_step(idx: usize, step: &UpstreamStep) -> RecipeInstruction {
    let step_number = step
        .number
        .filter(|n| *n >= 1)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(idx as u32 + 1);
    RecipeInstruction {
        step_number,
        instruction: step.step.clone().unwrap_or_default(),
    }
}

/// Splits free text on `<digits>.` markers and newlines, renumbering from 1.
fn split_instructions(text: &str) -> Vec<RecipeInstruction> {
    STEP_SPLIT_RE
        .split(text)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .enumerate()
        .map(|(idx, fragment)| RecipeInstruction {
            step_number: idx as u32 + 1,
            instruction: fragment.to_string(),
        })
        .collect()
}

/// Removes `<...>` tags, replaces `&...;` entities with a single space, then trims.
pub fn strip_html(html: &str) -> String {
    let without_tags = HTML_TAG_RE.replace_all(html, "");
    HTML_ENTITY_RE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}
