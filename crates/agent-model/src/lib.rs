//! Output types for the synthetic agent generator.
//!
//! This crate contains pure data structures with no generation logic.
//! Everything serializes to camelCase JSON so a generated agent can be
//! stored or rendered without further mapping.

pub mod agent;
pub mod behavior;
pub mod capabilities;
pub mod fixed;
pub mod identity;
pub mod lifestyle;
pub mod logistics;
pub mod narrative;
pub mod psychology;
pub mod trace;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

pub use agent::{GeneratedAgent, AGENT_VERSION};
pub use behavior::{BehaviorLens, BehaviorRead, BehaviorReadCategory, DetailCategory, DetailItem};
pub use capabilities::{
    AptitudeBias, AptitudeKey, Aptitudes, Capabilities, LatentKey, Latents, PsychTraits, SkillEntry,
};
pub use fixed::{Band5, Fixed01k, SignedFixed01k};
pub use identity::{
    Appearance, DiasporaStatus, Eyes, Hair, HeightBand, Identity, ParseTagError, TierBand,
};
pub use lifestyle::{
    FashionPreferences, FoodPreferences, Lifestyle, MediaPreferences, Preferences, Routines, Vice,
};
pub use logistics::{IdentityKitItem, Logistics};
pub use narrative::{Impact, MinorityStatus, Narrative, TimelineEvent, TimelineEventType};
pub use psychology::{
    Affect, ContradictionPair, Coping, CopingEntry, EmotionEntry, Emotions, Ethics,
    KnowledgeAccuracy, KnowledgeCategories, KnowledgeIgnorance, KnowledgeItem, LoyaltyScope,
    PressureResponse, Psychology, SelfConcept, ThoughtEntry, Thoughts, ThoughtsEmotions, Valence,
    Visibility,
};
pub use trace::{GenerationTrace, TraceEntry, TRACE_VERSION};
