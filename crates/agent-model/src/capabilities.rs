//! Latent traits, aptitudes, psychological traits and skills

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::fixed::Fixed01k;

/// Names of the hidden latent scalars, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LatentKey {
    Cosmopolitanism,
    Publicness,
    OpsecDiscipline,
    InstitutionalEmbeddedness,
    RiskAppetite,
    StressReactivity,
    ImpulseControl,
    TechFluency,
    SocialBattery,
    AestheticExpressiveness,
    Frugality,
    CuriosityBandwidth,
    Adaptability,
    PlanningHorizon,
    Principledness,
    PhysicalConditioning,
}

impl LatentKey {
    pub const ALL: [LatentKey; 16] = [
        LatentKey::Cosmopolitanism,
        LatentKey::Publicness,
        LatentKey::OpsecDiscipline,
        LatentKey::InstitutionalEmbeddedness,
        LatentKey::RiskAppetite,
        LatentKey::StressReactivity,
        LatentKey::ImpulseControl,
        LatentKey::TechFluency,
        LatentKey::SocialBattery,
        LatentKey::AestheticExpressiveness,
        LatentKey::Frugality,
        LatentKey::CuriosityBandwidth,
        LatentKey::Adaptability,
        LatentKey::PlanningHorizon,
        LatentKey::Principledness,
        LatentKey::PhysicalConditioning,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LatentKey::Cosmopolitanism => "cosmopolitanism",
            LatentKey::Publicness => "publicness",
            LatentKey::OpsecDiscipline => "opsecDiscipline",
            LatentKey::InstitutionalEmbeddedness => "institutionalEmbeddedness",
            LatentKey::RiskAppetite => "riskAppetite",
            LatentKey::StressReactivity => "stressReactivity",
            LatentKey::ImpulseControl => "impulseControl",
            LatentKey::TechFluency => "techFluency",
            LatentKey::SocialBattery => "socialBattery",
            LatentKey::AestheticExpressiveness => "aestheticExpressiveness",
            LatentKey::Frugality => "frugality",
            LatentKey::CuriosityBandwidth => "curiosityBandwidth",
            LatentKey::Adaptability => "adaptability",
            LatentKey::PlanningHorizon => "planningHorizon",
            LatentKey::Principledness => "principledness",
            LatentKey::PhysicalConditioning => "physicalConditioning",
        }
    }
}

impl fmt::Display for LatentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hidden behavioral scalars that drive most derived facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Latents {
    pub cosmopolitanism: Fixed01k,
    pub publicness: Fixed01k,
    pub opsec_discipline: Fixed01k,
    pub institutional_embeddedness: Fixed01k,
    pub risk_appetite: Fixed01k,
    pub stress_reactivity: Fixed01k,
    pub impulse_control: Fixed01k,
    pub tech_fluency: Fixed01k,
    pub social_battery: Fixed01k,
    pub aesthetic_expressiveness: Fixed01k,
    pub frugality: Fixed01k,
    pub curiosity_bandwidth: Fixed01k,
    pub adaptability: Fixed01k,
    pub planning_horizon: Fixed01k,
    pub principledness: Fixed01k,
    pub physical_conditioning: Fixed01k,
}

impl Latents {
    /// Builds a latent set by evaluating `f` once per key, in draw order.
    pub fn from_fn(mut f: impl FnMut(LatentKey) -> Fixed01k) -> Self {
        let mut latents = Latents::default();
        for key in LatentKey::ALL {
            *latents.get_mut(key) = f(key);
        }
        latents
    }

    pub fn get(&self, key: LatentKey) -> Fixed01k {
        match key {
            LatentKey::Cosmopolitanism => self.cosmopolitanism,
            LatentKey::Publicness => self.publicness,
            LatentKey::OpsecDiscipline => self.opsec_discipline,
            LatentKey::InstitutionalEmbeddedness => self.institutional_embeddedness,
            LatentKey::RiskAppetite => self.risk_appetite,
            LatentKey::StressReactivity => self.stress_reactivity,
            LatentKey::ImpulseControl => self.impulse_control,
            LatentKey::TechFluency => self.tech_fluency,
            LatentKey::SocialBattery => self.social_battery,
            LatentKey::AestheticExpressiveness => self.aesthetic_expressiveness,
            LatentKey::Frugality => self.frugality,
            LatentKey::CuriosityBandwidth => self.curiosity_bandwidth,
            LatentKey::Adaptability => self.adaptability,
            LatentKey::PlanningHorizon => self.planning_horizon,
            LatentKey::Principledness => self.principledness,
            LatentKey::PhysicalConditioning => self.physical_conditioning,
        }
    }

    pub fn get_mut(&mut self, key: LatentKey) -> &mut Fixed01k {
        match key {
            LatentKey::Cosmopolitanism => &mut self.cosmopolitanism,
            LatentKey::Publicness => &mut self.publicness,
            LatentKey::OpsecDiscipline => &mut self.opsec_discipline,
            LatentKey::InstitutionalEmbeddedness => &mut self.institutional_embeddedness,
            LatentKey::RiskAppetite => &mut self.risk_appetite,
            LatentKey::StressReactivity => &mut self.stress_reactivity,
            LatentKey::ImpulseControl => &mut self.impulse_control,
            LatentKey::TechFluency => &mut self.tech_fluency,
            LatentKey::SocialBattery => &mut self.social_battery,
            LatentKey::AestheticExpressiveness => &mut self.aesthetic_expressiveness,
            LatentKey::Frugality => &mut self.frugality,
            LatentKey::CuriosityBandwidth => &mut self.curiosity_bandwidth,
            LatentKey::Adaptability => &mut self.adaptability,
            LatentKey::PlanningHorizon => &mut self.planning_horizon,
            LatentKey::Principledness => &mut self.principledness,
            LatentKey::PhysicalConditioning => &mut self.physical_conditioning,
        }
    }

    /// Iterates `(key, value)` pairs in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (LatentKey, Fixed01k)> + '_ {
        LatentKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

/// Names of the thirteen aptitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AptitudeKey {
    Strength,
    Endurance,
    Dexterity,
    Reflexes,
    HandEyeCoordination,
    CognitiveSpeed,
    AttentionControl,
    WorkingMemory,
    RiskCalibration,
    Charisma,
    Empathy,
    Assertiveness,
    DeceptionAptitude,
}

/// Physical, cognitive and social ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aptitudes {
    // Physical
    pub strength: Fixed01k,
    pub endurance: Fixed01k,
    pub dexterity: Fixed01k,
    pub reflexes: Fixed01k,
    pub hand_eye_coordination: Fixed01k,
    // Cognitive
    pub cognitive_speed: Fixed01k,
    pub attention_control: Fixed01k,
    pub working_memory: Fixed01k,
    pub risk_calibration: Fixed01k,
    // Social
    pub charisma: Fixed01k,
    pub empathy: Fixed01k,
    pub assertiveness: Fixed01k,
    pub deception_aptitude: Fixed01k,
}

impl Aptitudes {
    pub fn get(&self, key: AptitudeKey) -> Fixed01k {
        match key {
            AptitudeKey::Strength => self.strength,
            AptitudeKey::Endurance => self.endurance,
            AptitudeKey::Dexterity => self.dexterity,
            AptitudeKey::Reflexes => self.reflexes,
            AptitudeKey::HandEyeCoordination => self.hand_eye_coordination,
            AptitudeKey::CognitiveSpeed => self.cognitive_speed,
            AptitudeKey::AttentionControl => self.attention_control,
            AptitudeKey::WorkingMemory => self.working_memory,
            AptitudeKey::RiskCalibration => self.risk_calibration,
            AptitudeKey::Charisma => self.charisma,
            AptitudeKey::Empathy => self.empathy,
            AptitudeKey::Assertiveness => self.assertiveness,
            AptitudeKey::DeceptionAptitude => self.deception_aptitude,
        }
    }

    pub fn get_mut(&mut self, key: AptitudeKey) -> &mut Fixed01k {
        match key {
            AptitudeKey::Strength => &mut self.strength,
            AptitudeKey::Endurance => &mut self.endurance,
            AptitudeKey::Dexterity => &mut self.dexterity,
            AptitudeKey::Reflexes => &mut self.reflexes,
            AptitudeKey::HandEyeCoordination => &mut self.hand_eye_coordination,
            AptitudeKey::CognitiveSpeed => &mut self.cognitive_speed,
            AptitudeKey::AttentionControl => &mut self.attention_control,
            AptitudeKey::WorkingMemory => &mut self.working_memory,
            AptitudeKey::RiskCalibration => &mut self.risk_calibration,
            AptitudeKey::Charisma => &mut self.charisma,
            AptitudeKey::Empathy => &mut self.empathy,
            AptitudeKey::Assertiveness => &mut self.assertiveness,
            AptitudeKey::DeceptionAptitude => &mut self.deception_aptitude,
        }
    }

    /// All values, in declaration order.
    pub fn values(&self) -> [Fixed01k; 13] {
        [
            self.strength,
            self.endurance,
            self.dexterity,
            self.reflexes,
            self.hand_eye_coordination,
            self.cognitive_speed,
            self.attention_control,
            self.working_memory,
            self.risk_calibration,
            self.charisma,
            self.empathy,
            self.assertiveness,
            self.deception_aptitude,
        ]
    }
}

/// One applied aptitude nudge, kept for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AptitudeBias {
    pub key: AptitudeKey,
    pub delta: i32,
    pub reason: String,
}

/// Big-Five-inspired traits derived from latents and aptitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychTraits {
    pub risk_tolerance: Fixed01k,
    pub conscientiousness: Fixed01k,
    pub novelty_seeking: Fixed01k,
    pub agreeableness: Fixed01k,
    pub authoritarianism: Fixed01k,
}

/// Competence in one named skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    pub value: Fixed01k,
    pub xp: Fixed01k,
    pub last_used_day: Option<u32>,
}

/// Ability scores, traits and skills of an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub aptitudes: Aptitudes,
    pub traits: PsychTraits,
    pub skills: BTreeMap<String, SkillEntry>,
}
