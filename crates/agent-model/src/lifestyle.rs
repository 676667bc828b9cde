//! Preferences, routines and vices

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::fixed::{Band5, Fixed01k};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodPreferences {
    pub comfort_foods: Vec<String>,
    pub dislikes: Vec<String>,
    pub restrictions: Vec<String>,
    pub ritual_drink: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPreferences {
    /// Share of attention per platform; shares sum to roughly 1000.
    pub platform_diet: BTreeMap<String, Fixed01k>,
    pub genre_top_k: Vec<String>,
    pub attention_resilience: Fixed01k,
    pub doomscrolling_risk: Fixed01k,
    pub epistemic_hygiene: Fixed01k,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FashionPreferences {
    pub style_tags: Vec<String>,
    pub formality: Fixed01k,
    pub conformity: Fixed01k,
    pub status_signaling: Fixed01k,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub food: FoodPreferences,
    pub media: MediaPreferences,
    pub fashion: FashionPreferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routines {
    pub chronotype: String,
    pub sleep_window: String,
    pub recovery_rituals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vice {
    pub vice: String,
    pub severity: Band5,
    pub triggers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifestyle {
    pub preferences: Preferences,
    pub routines: Routines,
    pub vices: Vec<Vice>,
}
