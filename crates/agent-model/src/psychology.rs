//! Psychology sub-records
//!
//! Ethics, internal tensions, hard limits, visibility, cover identities,
//! affect, self-concept, an inner-life snapshot and knowledge profile.

use serde::{Deserialize, Serialize};

use crate::fixed::{Fixed01k, SignedFixed01k};

/// What an agent is ultimately loyal to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyScope {
    Institution,
    People,
    Ideals,
    #[serde(rename = "self")]
    SelfInterest,
}

/// Decomposition of principled behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ethics {
    /// Follows rules vs bends them.
    pub rule_adherence: Fixed01k,
    pub harm_aversion: Fixed01k,
    /// Willingness to do dirty work for the mission.
    pub mission_utilitarianism: Fixed01k,
    pub loyalty_scope: LoyaltyScope,
}

/// A narrative-driving internal tension between two traits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContradictionPair {
    pub trait1: String,
    pub trait2: String,
    pub tension: String,
    pub narrative_hook: String,
}

/// How observable the agent is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visibility {
    pub public_visibility: Fixed01k,
    pub paper_trail: Fixed01k,
    pub digital_hygiene: Fixed01k,
}

/// Emotional baseline, regulation and repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Affect {
    pub baseline: String,
    pub regulation_style: String,
    pub stress_tells: Vec<String>,
    pub repair_style: String,
}

/// Internal narrative and social presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfConcept {
    pub self_story: String,
    pub impostor_risk: Fixed01k,
    pub social_mask: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Valence {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtEntry {
    pub item: String,
    pub valence: Valence,
    pub intensity01k: Fixed01k,
    pub recency_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionEntry {
    pub item: String,
    pub intensity01k: Fixed01k,
    pub duration_hours: u32,
    pub mood_impact01k: SignedFixed01k,
    pub behavior_tilt: String,
    pub valence: Valence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopingEntry {
    pub item: String,
    pub effectiveness01k: Fixed01k,
    pub recency_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thoughts {
    pub immediate_observations: Vec<ThoughtEntry>,
    pub reflections: Vec<ThoughtEntry>,
    pub memories: Vec<ThoughtEntry>,
    pub worries: Vec<ThoughtEntry>,
    pub desires: Vec<ThoughtEntry>,
    pub social_thoughts: Vec<ThoughtEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Emotions {
    pub primary: Vec<EmotionEntry>,
    pub complex: Vec<EmotionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coping {
    pub healthy: Vec<CopingEntry>,
    pub unhealthy: Vec<CopingEntry>,
}

/// A point-in-time snapshot of the agent's inner life.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThoughtsEmotions {
    pub thoughts: Thoughts,
    pub emotions: Emotions,
    pub coping: Coping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeAccuracy {
    Correct,
    Partial,
    Wrong,
    Unknown,
}

/// One known, missing or misbelieved item with recall metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeItem {
    pub item: String,
    pub accuracy: KnowledgeAccuracy,
    pub confidence01k: Fixed01k,
    pub last_used_days: u32,
    pub decay_rate01k: Fixed01k,
}

/// Per-category values shared by depths and item lists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeCategories<T> {
    pub strengths: T,
    pub gaps: T,
    pub false_beliefs: T,
    pub sources: T,
    pub barriers: T,
}

/// What the agent knows, misses or misbelieves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeIgnorance {
    pub knowledge_strengths: Vec<String>,
    pub knowledge_gaps: Vec<String>,
    pub false_beliefs: Vec<String>,
    pub information_sources: Vec<String>,
    pub information_barriers: Vec<String>,
    pub depths01k: KnowledgeCategories<Fixed01k>,
    pub items: KnowledgeCategories<Vec<KnowledgeItem>>,
}

/// Typical reaction when pressure peaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureResponse {
    Freezes,
    Deliberates,
    Delegates,
    Rushes,
    Thrives,
    Avoids,
}

impl PressureResponse {
    pub const ALL: [PressureResponse; 6] = [
        PressureResponse::Freezes,
        PressureResponse::Deliberates,
        PressureResponse::Delegates,
        PressureResponse::Rushes,
        PressureResponse::Thrives,
        PressureResponse::Avoids,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Psychology {
    pub ethics: Ethics,
    pub contradictions: Vec<ContradictionPair>,
    pub red_lines: Vec<String>,
    pub visibility: Visibility,
    pub cover_aptitude_tags: Vec<String>,
    pub affect: Affect,
    pub self_concept: SelfConcept,
    pub thoughts_emotions: ThoughtsEmotions,
    pub knowledge_ignorance: KnowledgeIgnorance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loyalty_scope_self_serializes_as_keyword() {
        let json = serde_json::to_string(&LoyaltyScope::SelfInterest).unwrap();
        assert_eq!(json, "\"self\"");
        let back: LoyaltyScope = serde_json::from_str("\"ideals\"").unwrap();
        assert_eq!(back, LoyaltyScope::Ideals);
    }

    #[test]
    fn test_knowledge_categories_keys() {
        let depths = KnowledgeCategories {
            strengths: Fixed01k::new(1),
            gaps: Fixed01k::new(2),
            false_beliefs: Fixed01k::new(3),
            sources: Fixed01k::new(4),
            barriers: Fixed01k::new(5),
        };
        let json = serde_json::to_value(&depths).unwrap();
        assert_eq!(json["falseBeliefs"], 3);
    }
}
