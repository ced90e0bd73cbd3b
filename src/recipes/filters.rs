use std::fmt;

use crate::preferences::model::{Allergen, UserPreferences};

/// Upstream query parameters, in the order they are sent.
pub type QueryParams = Vec<(&'static str, String)>;

/// Upstream query vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Random recipes, no keyword.
    Discovery,
    /// Keyword search; the query string itself travels separately.
    Search,
}

/// Fallback level, from most to least restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierLevel {
    DietaryAndAllergies,
    DietaryOnly,
    Unfiltered,
}

impl TierLevel {
    pub const ORDER: [TierLevel; 3] = [
        TierLevel::DietaryAndAllergies,
        TierLevel::DietaryOnly,
        TierLevel::Unfiltered,
    ];
}

impl fmt::Display for TierLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TierLevel::DietaryAndAllergies => "dietary+allergies",
            TierLevel::DietaryOnly => "dietary-only",
            TierLevel::Unfiltered => "unfiltered",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Diet {
    Vegan,
    Vegetarian,
}

/// Semantic constraints of one tier, independent of query mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Constraints {
    diet: Option<Diet>,
    gluten_free: bool,
    allergens: Vec<Allergen>,
}

impl Constraints {
    fn for_tier(prefs: &UserPreferences, level: TierLevel) -> Self {
        let dietary = &prefs.dietary_preferences;
        // vegan wins over vegetarian; they are never combined
        let diet = if dietary.vegan {
            Some(Diet::Vegan)
        } else if dietary.vegetarian {
            Some(Diet::Vegetarian)
        } else {
            None
        };

        match level {
            TierLevel::DietaryAndAllergies => Self {
                diet,
                gluten_free: dietary.gluten_free,
                allergens: prefs.allergies.active(),
            },
            TierLevel::DietaryOnly => Self {
                diet,
                gluten_free: dietary.gluten_free,
                allergens: Vec::new(),
            },
            TierLevel::Unfiltered => Self::default(),
        }
    }
}

/// One fallback level rendered for a specific query mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilterTier {
    pub level: TierLevel,
    pub params: QueryParams,
}

/// Parameter keys that carry filtering constraints (as opposed to paging and shape).
const CONSTRAINT_KEYS: [&str; 4] = ["includeTags", "excludeTags", "diet", "intolerances"];

impl SearchFilterTier {
    /// Every individual constraint term across the constraint-bearing parameters.
    pub fn constraint_terms(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(key, _)| CONSTRAINT_KEYS.contains(key))
            .flat_map(|(_, value)| value.split(','))
            .collect()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraint_terms().len()
    }
}

/// Builds the three fallback tiers for `mode`, most restrictive first.
///
/// Tiers are not deduplicated: with no flags set all three carry identical parameters.
pub fn build_tiers(prefs: &UserPreferences, mode: QueryMode, results: u32) -> Vec<SearchFilterTier> {
    TierLevel::ORDER
        .into_iter()
        .map(|level| SearchFilterTier {
            level,
            params: render(&Constraints::for_tier(prefs, level), mode, results),
        })
        .collect()
}

fn render(constraints: &Constraints, mode: QueryMode, results: u32) -> QueryParams {
    match mode {
        QueryMode::Discovery => render_discovery(constraints, results),
        QueryMode::Search => render_search(constraints, results),
    }
}

fn render_discovery(c: &Constraints, results: u32) -> QueryParams {
    let mut params: QueryParams = vec![
        ("includeNutrition", "false".into()),
        ("number", results.to_string()),
    ];

    let mut include = Vec::new();
    match c.diet {
        Some(Diet::Vegan) => include.push("vegan"),
        Some(Diet::Vegetarian) => include.push("vegetarian"),
        None => {}
    }
    if c.gluten_free {
        include.push("gluten free");
    }
    push_joined(&mut params, "includeTags", &include);

    let exclude: Vec<&str> = c
        .allergens
        .iter()
        .flat_map(|a| discovery_exclusions(*a).iter().copied())
        .collect();
    push_joined(&mut params, "excludeTags", &exclude);

    params
}

fn render_search(c: &Constraints, results: u32) -> QueryParams {
    let mut params: QueryParams = vec![
        ("addRecipeInformation", "true".into()),
        ("addRecipeNutrition", "false".into()),
        ("instructionsRequired", "true".into()),
        ("fillIngredients", "false".into()),
        ("number", results.to_string()),
        ("offset", "0".into()),
        ("sort", "popularity".into()),
        ("sortDirection", "desc".into()),
    ];

    match c.diet {
        Some(Diet::Vegan) => params.push(("diet", "vegan".into())),
        Some(Diet::Vegetarian) => params.push(("diet", "vegetarian".into())),
        None => {}
    }

    let mut intolerances = Vec::new();
    if c.gluten_free {
        intolerances.push("gluten");
    }
    intolerances.extend(
        c.allergens
            .iter()
            .flat_map(|a| search_intolerances(*a).iter().copied()),
    );
    push_joined(&mut params, "intolerances", &intolerances);

    params
}

fn push_joined(params: &mut QueryParams, key: &'static str, terms: &[&str]) {
    if !terms.is_empty() {
        params.push((key, terms.join(",")));
    }
}

fn discovery_exclusions(allergen: Allergen) -> &'static [&'static str] {
    match allergen {
        Allergen::Dairy => &["dairy"],
        Allergen::Eggs => &["egg"],
        Allergen::Nuts => &["tree nuts", "peanuts"],
        Allergen::Shellfish => &["shellfish"],
        Allergen::Soy => &["soy"],
        Allergen::Wheat => &["wheat"],
    }
}

fn search_intolerances(allergen: Allergen) -> &'static [&'static str] {
    match allergen {
        Allergen::Dairy => &["dairy"],
        Allergen::Eggs => &["egg"],
        Allergen::Nuts => &["tree nut", "peanut"],
        Allergen::Shellfish => &["shellfish"],
        Allergen::Soy => &["soy"],
        Allergen::Wheat => &["wheat"],
    }
}
