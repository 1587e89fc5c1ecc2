use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
)]
pub enum MealCategory {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
}

/// A catalog entry. `id` is the identity used by every repeat check; `name`
/// only matters for display and for rebuilding stored plans.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MealOption {
    pub id: String,
    pub name: String,
    pub category: MealCategory,
    #[serde(default)]
    pub is_staple: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}
