//! Vocab, priors and country documents
//!
//! Typed schema for the shared value pools. Required pools are checked once
//! at load time by [`Vocab::validate`]; every other pool defaults to empty and
//! the facet that reads it falls back to a built-in list.

use agent_model::{Fixed01k, Impact, TimelineEventType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::VocabError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vocab {
    pub version: u32,
    pub identity: IdentityVocab,
    pub appearance: AppearanceVocab,
    pub capabilities: CapabilitiesVocab,
    pub psych: PsychVocab,
    pub covers: CoversVocab,
    pub affect: AffectVocab,
    pub self_concept: SelfConceptVocab,
    pub thoughts_emotions: ThoughtsEmotionsVocab,
    pub knowledge_ignorance: KnowledgeVocab,
    pub timeline: TimelineVocab,
    pub timeline_templates: TimelineTemplates,
    pub behavior_archetypes: BehaviorArchetypesVocab,
    pub detail_generation: DetailVocab,
    pub lifestyle: LifestyleVocab,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityVocab {
    pub role_seed_tags: Vec<String>,
    pub career_tracks: Vec<String>,
    pub education_tracks: Vec<String>,
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    pub languages: Vec<String>,
    pub spirituality_tags: Vec<String>,
    pub urbanicity_tags: Vec<String>,
    pub origin_regions: Vec<String>,
    pub adversity_tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppearanceVocab {
    pub build_tags: Vec<String>,
    pub voice_tags: Vec<String>,
    pub hair_colors: Vec<String>,
    pub hair_textures: Vec<String>,
    pub eye_colors: Vec<String>,
    pub distinguishing_marks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CapabilitiesVocab {
    pub skill_keys: Vec<String>,
    /// Role tag to per-skill value deltas.
    pub role_skill_bumps: BTreeMap<String, BTreeMap<String, i32>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PsychVocab {
    pub red_lines: Vec<String>,
    pub red_line_by_role: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoversVocab {
    pub cover_aptitude_tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AffectVocab {
    pub baseline_affects: Vec<String>,
    pub regulation_styles: Vec<String>,
    pub stress_tells: Vec<String>,
    pub repair_styles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelfConceptVocab {
    pub self_stories: Vec<String>,
    pub social_masks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThoughtPools {
    pub immediate_observations: Vec<String>,
    pub reflections: Vec<String>,
    pub memories: Vec<String>,
    pub worries: Vec<String>,
    pub desires: Vec<String>,
    pub social_thoughts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionPools {
    pub primary: Vec<String>,
    pub complex: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopingPools {
    pub healthy: Vec<String>,
    pub unhealthy: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThoughtsEmotionsVocab {
    pub thoughts: ThoughtPools,
    pub emotions: EmotionPools,
    pub coping: CopingPools,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KnowledgeVocab {
    pub knowledge_strengths: Vec<String>,
    pub knowledge_gaps: Vec<String>,
    pub false_beliefs: Vec<String>,
    pub information_sources: Vec<String>,
    pub information_barriers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineVocab {
    /// Sampleable event types. Empty means the built-in default set.
    pub event_types: Vec<TimelineEventType>,
}

/// A fixed life event offered for one life stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineTemplate {
    #[serde(rename = "type")]
    pub event_type: TimelineEventType,
    pub description: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineTemplates {
    pub childhood: Vec<TimelineTemplate>,
    pub young_adult: Vec<TimelineTemplate>,
    pub mid_age: Vec<TimelineTemplate>,
    pub later_life: Vec<TimelineTemplate>,
    pub any_age: Vec<TimelineTemplate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BehaviorArchetype {
    pub name: String,
    pub situation_reads: Vec<String>,
    pub equipment_reads: Vec<String>,
    pub pressure_reads: Vec<String>,
    pub objective_frames: Vec<String>,
    pub team_dynamics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorArchetypesVocab {
    pub archetypes: Vec<BehaviorArchetype>,
}

/// Flavor detail pools. Each detail category reads one primary pool and a
/// few secondary ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailVocab {
    pub physical_features: Vec<String>,
    pub body_language: Vec<String>,
    pub gait: Vec<String>,
    pub chronic_conditions: Vec<String>,
    pub medication_dependencies: Vec<String>,
    pub morning_rituals: Vec<String>,
    pub work_habits: Vec<String>,
    pub evening_routines: Vec<String>,
    pub communication_patterns: Vec<String>,
    pub interaction_styles: Vec<String>,
    pub eating_habits: Vec<String>,
    pub drinking_preferences: Vec<String>,
    pub specific_phobias: Vec<String>,
    pub abstract_fears: Vec<String>,
    pub stress_responses: Vec<String>,
    pub self_soothing_behaviors: Vec<String>,
    pub kept_objects: Vec<String>,
    pub lost_objects: Vec<String>,
    pub trauma_markers: Vec<String>,
    pub joy_markers: Vec<String>,
    pub family_rituals: Vec<String>,
    pub cultural_practices: Vec<String>,
    pub personal_superstitions: Vec<String>,
    pub acquired_superstitions: Vec<String>,
    pub filler_patterns: Vec<String>,
    pub language_mixing: Vec<String>,
    pub catchphrases_original: Vec<String>,
    pub catchphrases_inherited: Vec<String>,
    pub space_preferences: Vec<String>,
    pub territory_marking: Vec<String>,
    pub weather_responses: Vec<String>,
    pub attachment_methods: Vec<String>,
    pub conflict_patterns: Vec<String>,
    pub secret_skills: Vec<String>,
    pub secret_connections: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LifestyleVocab {
    pub comfort_foods: Vec<String>,
    pub food_dislikes: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub ritual_drinks: Vec<String>,
    pub media_genres: Vec<String>,
    pub media_platforms: Vec<String>,
    pub style_tags: Vec<String>,
    pub recovery_rituals: Vec<String>,
    pub vices: Vec<String>,
    pub vice_triggers: Vec<String>,
}

impl Vocab {
    /// Parses and validates a vocab document.
    pub fn from_json_str(json: &str) -> Result<Self, VocabError> {
        let vocab: Vocab = serde_json::from_str(json).map_err(|source| VocabError::Parse {
            document: "vocab",
            source,
        })?;
        vocab.validate()?;
        Ok(vocab)
    }

    pub fn from_file(path: &Path) -> Result<Self, VocabError> {
        let content = fs::read_to_string(path).map_err(|source| VocabError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Fails on the first required pool that is absent or empty.
    pub fn validate(&self) -> Result<(), VocabError> {
        let required: [(&str, &[String]); 8] = [
            ("capabilities.skillKeys", &self.capabilities.skill_keys),
            ("identity.roleSeedTags", &self.identity.role_seed_tags),
            ("identity.careerTracks", &self.identity.career_tracks),
            ("identity.educationTracks", &self.identity.education_tracks),
            ("identity.firstNames", &self.identity.first_names),
            ("identity.lastNames", &self.identity.last_names),
            ("appearance.buildTags", &self.appearance.build_tags),
            ("appearance.voiceTags", &self.appearance.voice_tags),
        ];
        match required.iter().find(|(_, pool)| pool.is_empty()) {
            Some((path, _)) => Err(VocabError::missing(*path)),
            None => Ok(()),
        }
    }

    /// The sampleable event types, falling back to the default set.
    pub fn event_types(&self) -> &[TimelineEventType] {
        if self.timeline.event_types.is_empty() {
            &TimelineEventType::DEFAULTS
        } else {
            &self.timeline.event_types
        }
    }
}

/// Armed-conflict and coercion levels of a country and decade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityEnv {
    pub conflict: Fixed01k,
    pub state_violence: Fixed01k,
    pub militarization: Fixed01k,
}

impl SecurityEnv {
    /// Overall safety, high when the environment is calm.
    pub fn security_score(&self) -> Fixed01k {
        Fixed01k::clamped(
            1000.0
                - (0.45 * self.conflict.as_f64()
                    + 0.35 * self.state_violence.as_f64()
                    + 0.20 * self.militarization.as_f64()),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriorBucket {
    pub career_track_weights: BTreeMap<String, f64>,
    pub education_track_weights: BTreeMap<String, f64>,
    pub security_env: Option<SecurityEnv>,
    /// Carried through untouched for downstream consumers.
    pub culture_profile: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryPriors {
    /// Keyed by decade label, e.g. `"1980s"`.
    pub buckets: BTreeMap<String, PriorBucket>,
}

/// Country and era weighting tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Priors {
    pub version: u32,
    pub countries: BTreeMap<String, CountryPriors>,
}

impl Priors {
    pub fn from_json_str(json: &str) -> Result<Self, VocabError> {
        serde_json::from_str(json).map_err(|source| VocabError::Parse {
            document: "priors",
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, VocabError> {
        let content = fs::read_to_string(path).map_err(|source| VocabError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Looks up the bucket for the decade containing `year`.
    ///
    /// Falls back to the nearest earlier decade, then the nearest later one.
    pub fn bucket(&self, iso3: &str, year: i32) -> Option<&PriorBucket> {
        let country = self.countries.get(iso3)?;
        let target = year.div_euclid(10) * 10;
        let mut earlier: Option<(i32, &PriorBucket)> = None;
        let mut later: Option<(i32, &PriorBucket)> = None;
        for (label, bucket) in &country.buckets {
            let Some(decade) = parse_decade(label) else {
                continue;
            };
            if decade <= target {
                if earlier.map_or(true, |(d, _)| decade > d) {
                    earlier = Some((decade, bucket));
                }
            } else if later.map_or(true, |(d, _)| decade < d) {
                later = Some((decade, bucket));
            }
        }
        earlier.or(later).map(|(_, bucket)| bucket)
    }
}

fn parse_decade(label: &str) -> Option<i32> {
    label.strip_suffix('s')?.parse().ok()
}

/// One entry of the country reference list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub iso3: String,
    pub continent: String,
    pub shadow_name: String,
}

impl Country {
    /// Placeholder used when the country list is empty.
    pub fn unknown() -> Self {
        Self {
            iso3: "UNK".to_string(),
            continent: "Global".to_string(),
            shadow_name: "Unknown".to_string(),
        }
    }
}

pub fn countries_from_json_str(json: &str) -> Result<Vec<Country>, VocabError> {
    serde_json::from_str(json).map_err(|source| VocabError::Parse {
        document: "countries",
        source,
    })
}

pub fn countries_from_file(path: &Path) -> Result<Vec<Country>, VocabError> {
    let content = fs::read_to_string(path).map_err(|source| VocabError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    countries_from_json_str(&content)
}
