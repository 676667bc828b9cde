//! Behavior lens and idiosyncratic details

use serde::{Deserialize, Serialize};

use crate::psychology::PressureResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorReadCategory {
    Situation,
    Equipment,
    Pressure,
    Objective,
    Team,
}

/// How the archetype reads one kind of situation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorRead {
    pub category: BehaviorReadCategory,
    pub item: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorLens {
    pub archetype: String,
    pub reads: Vec<BehaviorRead>,
    pub pressure_response: PressureResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailCategory {
    Physical,
    Routine,
    Social,
    Food,
    Psychological,
    History,
    Tradition,
    Speech,
    Environment,
    Relationship,
    Hidden,
}

impl DetailCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DetailCategory::Physical => "physical",
            DetailCategory::Routine => "routine",
            DetailCategory::Social => "social",
            DetailCategory::Food => "food",
            DetailCategory::Psychological => "psychological",
            DetailCategory::History => "history",
            DetailCategory::Tradition => "tradition",
            DetailCategory::Speech => "speech",
            DetailCategory::Environment => "environment",
            DetailCategory::Relationship => "relationship",
            DetailCategory::Hidden => "hidden",
        }
    }
}

/// One flavor detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailItem {
    pub category: DetailCategory,
    pub item: String,
}
