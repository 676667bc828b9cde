//! The complete generated attribute tree

use serde::{Deserialize, Serialize};

use crate::behavior::{BehaviorLens, DetailItem};
use crate::capabilities::{Capabilities, Latents};
use crate::identity::{Appearance, Identity};
use crate::lifestyle::Lifestyle;
use crate::logistics::Logistics;
use crate::narrative::Narrative;
use crate::psychology::Psychology;
use crate::trace::GenerationTrace;

pub const AGENT_VERSION: u32 = 1;

/// One synthetic persona.
///
/// Created once per generation call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAgent {
    pub version: u32,
    pub id: String,
    pub seed: String,
    pub identity: Identity,
    pub appearance: Appearance,
    pub latents: Latents,
    pub capabilities: Capabilities,
    pub psychology: Psychology,
    pub narrative: Narrative,
    pub behavior_lens: BehaviorLens,
    pub details: Vec<DetailItem>,
    pub lifestyle: Lifestyle,
    pub logistics: Logistics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_trace: Option<GenerationTrace>,
}

impl GeneratedAgent {
    /// Serializes to a single-line JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
