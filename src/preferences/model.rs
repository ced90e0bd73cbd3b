use serde::Serialize;

/// Allergens a user can flag during onboarding, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allergen {
    Dairy,
    Eggs,
    Nuts,
    Shellfish,
    Soy,
    Wheat,
}

impl Allergen {
    pub const ALL: [Allergen; 6] = [
        Allergen::Dairy,
        Allergen::Eggs,
        Allergen::Nuts,
        Allergen::Shellfish,
        Allergen::Soy,
        Allergen::Wheat,
    ];

    /// Key used in the stored onboarding record.
    pub fn key(self) -> &'static str {
        match self {
            Allergen::Dairy => "dairy",
            Allergen::Eggs => "eggs",
            Allergen::Nuts => "nuts",
            Allergen::Shellfish => "shellfish",
            Allergen::Soy => "soy",
            Allergen::Wheat => "wheat",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Allergies {
    pub dairy: bool,
    pub eggs: bool,
    pub nuts: bool,
    pub shellfish: bool,
    pub soy: bool,
    pub wheat: bool,
}

impl Allergies {
    pub fn get(&self, allergen: Allergen) -> bool {
        match allergen {
            Allergen::Dairy => self.dairy,
            Allergen::Eggs => self.eggs,
            Allergen::Nuts => self.nuts,
            Allergen::Shellfish => self.shellfish,
            Allergen::Soy => self.soy,
            Allergen::Wheat => self.wheat,
        }
    }

    pub fn set(&mut self, allergen: Allergen, value: bool) {
        let slot = match allergen {
            Allergen::Dairy => &mut self.dairy,
            Allergen::Eggs => &mut self.eggs,
            Allergen::Nuts => &mut self.nuts,
            Allergen::Shellfish => &mut self.shellfish,
            Allergen::Soy => &mut self.soy,
            Allergen::Wheat => &mut self.wheat,
        };
        *slot = value;
    }

    /// Flagged allergens in canonical order.
    pub fn active(&self) -> Vec<Allergen> {
        Allergen::ALL
            .into_iter()
            .filter(|a| self.get(*a))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DietaryPreferences {
    pub gluten_free: bool,
    pub vegan: bool,
    pub vegetarian: bool,
}

/// Fully populated preferences derived from a user's onboarding record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub allergies: Allergies,
    pub dietary_preferences: DietaryPreferences,
    pub language: String,
}

pub const DEFAULT_LANGUAGE: &str = "en";

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            allergies: Allergies::default(),
            dietary_preferences: DietaryPreferences::default(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}
