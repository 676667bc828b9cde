//! Skills
//!
//! One entry per vocab skill key. Values blend aptitudes, traits, latents,
//! career and security environment; experience grows with age. Role bumps,
//! voice biases and the ordered skill cap rules are applied afterwards.

use agent_model::{
    Aptitudes, DiasporaStatus, Fixed01k, Latents, PsychTraits, SkillEntry, TierBand,
};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::SkillConfig;
use crate::constraints::{ConstraintPipeline, Rule};
use crate::error::VocabError;
use crate::rng::FacetRng;
use crate::vocab::{SecurityEnv, Vocab};

pub type SkillMap = BTreeMap<String, SkillEntry>;

/// One voice-driven skill nudge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillBias {
    pub skill: String,
    pub delta: i32,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillsResult {
    pub skills: SkillMap,
    pub voice_biases: Vec<SkillBias>,
    pub caps_fired: Vec<&'static str>,
}

pub struct SkillInputs<'a> {
    pub vocab: &'a Vocab,
    pub aptitudes: &'a Aptitudes,
    pub traits: &'a PsychTraits,
    pub latents: &'a Latents,
    pub roles: &'a [String],
    pub tier: TierBand,
    pub career: &'a str,
    pub voice_tag: &'a str,
    pub security_env: Option<SecurityEnv>,
    pub travel_score: Fixed01k,
    pub age: u32,
}

/// Career tracks and the skills they train.
const CAREER_BONUS: [(&str, i32, &[&str]); 8] = [
    ("military", 120, &["shooting", "tradecraft", "surveillance", "driving"]),
    (
        "intelligence",
        140,
        &["tradecraft", "surveillance", "shooting", "driving", "legalOps"],
    ),
    (
        "foreign-service",
        120,
        &["negotiation", "bureaucracy", "mediaHandling", "driving"],
    ),
    ("journalism", 120, &["mediaHandling", "surveillance", "negotiation"]),
    ("law", 140, &["legalOps", "bureaucracy", "negotiation"]),
    ("public-health", 120, &["firstAid", "bureaucracy", "negotiation"]),
    ("finance", 120, &["financeOps", "bureaucracy", "negotiation"]),
    ("logistics", 120, &["driving", "tradecraft", "bureaucracy"]),
];

pub fn career_bonus(career: &str, skill: &str) -> i32 {
    CAREER_BONUS
        .iter()
        .filter(|(track, _, skills)| *track == career && skills.contains(&skill))
        .map(|(_, bonus, _)| *bonus)
        .sum()
}

/// How much an agent has moved between places and cultures.
pub fn travel_score(latents: &Latents, diaspora: DiasporaStatus) -> Fixed01k {
    let abroad = if diaspora.lives_abroad() { 150.0 } else { 0.0 };
    Fixed01k::clamped(
        0.65 * latents.cosmopolitanism.as_f64() + 0.20 * latents.adaptability.as_f64() + abroad,
    )
}

struct Environment {
    conflict: f64,
    state_violence: f64,
    pressure: f64,
}

impl Environment {
    fn from(env: Option<SecurityEnv>) -> Self {
        let (conflict, state_violence, militarization) = match env {
            Some(e) => (
                e.conflict.as_f64(),
                e.state_violence.as_f64(),
                e.militarization.as_f64(),
            ),
            None => (0.0, 0.0, 150.0),
        };
        let pressure = Fixed01k::clamped(0.45 * conflict + 0.35 * state_violence + 0.20 * militarization);
        Self {
            conflict,
            state_violence,
            pressure: pressure.as_f64(),
        }
    }
}

fn skill_value(
    key: &str,
    noise: f64,
    career: f64,
    tier: f64,
    inputs: &SkillInputs<'_>,
    env: &Environment,
) -> f64 {
    let a = inputs.aptitudes;
    let t = inputs.traits;
    let l = inputs.latents;
    let travel = inputs.travel_score.as_f64();
    let has_role = |role: &str| inputs.roles.iter().any(|r| r == role);

    match key {
        "driving" => {
            0.22 * a.dexterity.as_f64()
                + 0.22 * a.hand_eye_coordination.as_f64()
                + 0.20 * a.attention_control.as_f64()
                + 0.12 * t.risk_tolerance.as_f64()
                + 0.12 * travel
                + 0.12 * noise
                + career
                + tier
        }
        "shooting" => {
            0.26 * a.reflexes.as_f64()
                + 0.24 * a.hand_eye_coordination.as_f64()
                + 0.18 * a.attention_control.as_f64()
                + 0.12 * l.opsec_discipline.as_f64()
                + 0.08 * env.pressure
                + 0.20 * noise
                + career
                + tier
        }
        "surveillance" => {
            0.20 * a.cognitive_speed.as_f64()
                + 0.20 * a.attention_control.as_f64()
                + 0.16 * a.working_memory.as_f64()
                + 0.16 * l.opsec_discipline.as_f64()
                + 0.08 * l.tech_fluency.as_f64()
                + 0.06 * travel
                + 0.06 * env.state_violence
                + 0.16 * noise
                + career
        }
        "tradecraft" => {
            0.16 * l.opsec_discipline.as_f64()
                + 0.12 * a.deception_aptitude.as_f64()
                + 0.06 * l.risk_appetite.as_f64()
                + 0.10 * a.working_memory.as_f64()
                + 0.04 * l.tech_fluency.as_f64()
                + 0.22 * travel
                + 0.20 * l.cosmopolitanism.as_f64()
                + 0.04 * env.conflict
                + 0.10 * noise
                + career
                + if has_role("operative") { 90.0 } else { 0.0 }
        }
        "firstAid" => {
            0.25 * a.working_memory.as_f64()
                + 0.20 * a.attention_control.as_f64()
                + 0.25 * t.conscientiousness.as_f64()
                + 0.06 * env.state_violence
                + 0.30 * noise
                + career
                + tier
        }
        "negotiation" => {
            let base = Fixed01k::clamped(
                0.24 * a.charisma.as_f64()
                    + 0.16 * a.empathy.as_f64()
                    + 0.14 * a.working_memory.as_f64()
                    + 0.08 * l.publicness.as_f64()
                    + 0.12 * l.adaptability.as_f64()
                    + 0.10 * travel
                    + 0.16 * noise
                    + career
                    + tier,
            );
            let stress = l.stress_reactivity.as_f64();
            let penalty = if stress > 650.0 {
                1.0 - 0.15 * ((stress - 650.0) / 350.0)
            } else {
                1.0
            };
            base.as_f64() * penalty
        }
        "mediaHandling" => {
            0.30 * l.publicness.as_f64()
                + 0.20 * a.charisma.as_f64()
                + 0.18 * a.attention_control.as_f64()
                + 0.12 * l.opsec_discipline.inverted().as_f64()
                + 0.06 * l.tech_fluency.as_f64()
                + 0.20 * noise
                + career
                + if has_role("media") { 90.0 } else { 0.0 }
        }
        "bureaucracy" => {
            0.28 * l.institutional_embeddedness.as_f64()
                + 0.22 * a.working_memory.as_f64()
                + 0.18 * t.conscientiousness.as_f64()
                + 0.32 * noise
                + career
                + tier
        }
        "financeOps" => {
            0.24 * a.working_memory.as_f64()
                + 0.20 * a.cognitive_speed.as_f64()
                + 0.18 * t.conscientiousness.as_f64()
                + 0.38 * noise
                + career
                + tier
        }
        "legalOps" => {
            0.24 * a.working_memory.as_f64()
                + 0.20 * a.attention_control.as_f64()
                + 0.18 * l.institutional_embeddedness.as_f64()
                + 0.38 * noise
                + career
                + tier
        }
        _ => {
            0.22 * a.cognitive_speed.as_f64()
                + 0.22 * a.attention_control.as_f64()
                + 0.18 * a.working_memory.as_f64()
                + 0.38 * noise
                + career
        }
    }
}

/// Inputs read by the skill cap rules.
pub struct SkillCapInputs {
    pub aptitudes: Aptitudes,
    pub latents: Latents,
}

fn above(skills: &SkillMap, key: &str, limit: i32) -> bool {
    skills.get(key).is_some_and(|s| s.value > limit)
}

fn below(skills: &SkillMap, key: &str, limit: i32) -> bool {
    skills.get(key).is_some_and(|s| s.value < limit)
}

fn cap(skills: &mut SkillMap, key: &str, limit: i32) {
    if let Some(entry) = skills.get_mut(key) {
        entry.value = entry.value.capped_at(limit);
    }
}

fn floor(skills: &mut SkillMap, key: &str, limit: i32) {
    if let Some(entry) = skills.get_mut(key) {
        entry.value = entry.value.floored_at(limit);
    }
}

fn is_language_skill(key: &str) -> bool {
    key.starts_with("language_") || key == "languages"
}

const COMBAT_SKILLS: [&str; 5] = ["shooting", "handToHand", "combat", "melee", "unarmedCombat"];

pub static SKILL_CAPS: ConstraintPipeline<SkillMap, SkillCapInputs> = ConstraintPipeline::new(&[
    Rule {
        name: "impulse_limits_tradecraft",
        applies: |s, c| c.latents.impulse_control < 350 && above(s, "tradecraft", 500),
        apply: |s, _| cap(s, "tradecraft", 500),
    },
    Rule {
        name: "attention_limits_surveillance",
        applies: |s, c| c.aptitudes.attention_control < 300 && above(s, "surveillance", 450),
        apply: |s, _| cap(s, "surveillance", 450),
    },
    Rule {
        name: "memory_limits_bureaucracy",
        applies: |s, c| c.aptitudes.working_memory < 350 && above(s, "bureaucracy", 500),
        apply: |s, _| cap(s, "bureaucracy", 500),
    },
    Rule {
        name: "reflexes_limit_driving",
        applies: |s, c| c.aptitudes.reflexes < 300 && above(s, "driving", 550),
        apply: |s, _| cap(s, "driving", 550),
    },
    Rule {
        name: "stress_limits_shooting",
        applies: |s, c| c.latents.stress_reactivity > 700 && above(s, "shooting", 550),
        apply: |s, _| cap(s, "shooting", 550),
    },
    Rule {
        name: "charisma_limits_media",
        applies: |s, c| c.aptitudes.charisma < 300 && above(s, "mediaHandling", 450),
        apply: |s, _| cap(s, "mediaHandling", 450),
    },
    Rule {
        name: "tech_limits_digital_hygiene",
        applies: |s, c| c.latents.tech_fluency < 300 && above(s, "digitalHygiene", 400),
        apply: |s, _| cap(s, "digitalHygiene", 400),
    },
    Rule {
        name: "empathy_negotiation_floor",
        applies: |s, c| c.aptitudes.empathy > 700 && below(s, "negotiation", 350),
        apply: |s, _| floor(s, "negotiation", 350),
    },
    Rule {
        name: "opsec_surveillance_floor",
        applies: |s, c| c.latents.opsec_discipline > 700 && below(s, "surveillance", 300),
        apply: |s, _| floor(s, "surveillance", 300),
    },
    Rule {
        name: "stress_limits_first_aid",
        applies: |s, c| c.latents.stress_reactivity > 750 && above(s, "firstAid", 550),
        apply: |s, _| cap(s, "firstAid", 550),
    },
    Rule {
        name: "dexterity_lockpicking_floor",
        applies: |s, c| c.aptitudes.dexterity > 700 && below(s, "lockpicking", 300),
        apply: |s, _| floor(s, "lockpicking", 300),
    },
    Rule {
        name: "charisma_elicitation_floor",
        applies: |s, c| c.aptitudes.charisma > 700 && below(s, "elicitation", 350),
        apply: |s, _| floor(s, "elicitation", 350),
    },
    Rule {
        name: "attention_analysis_floor",
        applies: |s, c| c.aptitudes.attention_control > 750 && below(s, "analysis", 350),
        apply: |s, _| floor(s, "analysis", 350),
    },
    Rule {
        name: "reflexes_driving_floor",
        applies: |s, c| c.aptitudes.reflexes > 700 && below(s, "driving", 400),
        apply: |s, _| floor(s, "driving", 400),
    },
    Rule {
        name: "memory_language_floor",
        applies: |s, c| {
            c.aptitudes.working_memory > 750
                && s.iter().any(|(k, v)| is_language_skill(k) && v.value < 350)
        },
        apply: |s, _| {
            for (key, entry) in s.iter_mut() {
                if is_language_skill(key) {
                    entry.value = entry.value.floored_at(350);
                }
            }
        },
    },
    Rule {
        name: "stress_limits_combat",
        applies: |s, c| {
            c.latents.stress_reactivity > 800 && COMBAT_SKILLS.iter().any(|k| above(s, k, 500))
        },
        apply: |s, _| {
            for key in COMBAT_SKILLS {
                cap(s, key, 500);
            }
        },
    },
    Rule {
        name: "speed_research_floor",
        applies: |s, c| c.aptitudes.cognitive_speed > 700 && below(s, "research", 350),
        apply: |s, _| floor(s, "research", 350),
    },
]);

/// Computes skills from the `skills` stream.
pub fn compute_skills(
    rng: &mut FacetRng,
    inputs: &SkillInputs<'_>,
    config: &SkillConfig,
) -> Result<SkillsResult, VocabError> {
    let keys = &inputs.vocab.capabilities.skill_keys;
    if keys.is_empty() {
        return Err(VocabError::missing("capabilities.skillKeys"));
    }

    let age_multiplier =
        1.0 + ((f64::from(inputs.age) - 25.0) * config.xp_per_year).clamp(0.0, config.xp_age_cap);
    let env = Environment::from(inputs.security_env);
    let tier_bonus = match inputs.tier {
        TierBand::Elite => 60.0,
        TierBand::Middle => 0.0,
        TierBand::Mass => -20.0,
    };
    let bounded = |value: f64| {
        Fixed01k::new(Fixed01k::clamped(value).get().clamp(config.value_floor, config.value_ceiling))
    };

    let mut skills = SkillMap::new();
    for key in keys {
        let noise = f64::from(rng.int(0, 1000));
        let career = f64::from(career_bonus(inputs.career, key));
        let value = bounded(skill_value(key, noise, career, tier_bonus, inputs, &env));

        let base_xp = (value.unit() * 520.0).round() + f64::from(rng.int(0, 180));
        let xp = Fixed01k::new(((base_xp * age_multiplier).round() as i32).clamp(0, 500));
        skills.insert(
            key.clone(),
            SkillEntry {
                value,
                xp,
                last_used_day: None,
            },
        );
    }

    for role in inputs.roles {
        let Some(bumps) = inputs.vocab.capabilities.role_skill_bumps.get(role) else {
            continue;
        };
        for (skill, delta) in bumps {
            if let Some(entry) = skills.get_mut(skill) {
                entry.value = entry.value.offset(*delta);
            }
        }
    }

    let voice_biases = apply_voice_biases(rng, &mut skills, inputs.voice_tag);

    let cap_inputs = SkillCapInputs {
        aptitudes: *inputs.aptitudes,
        latents: *inputs.latents,
    };
    let caps_fired = SKILL_CAPS.run(&mut skills, &cap_inputs);

    for entry in skills.values_mut() {
        entry.value = bounded(entry.value.as_f64());
    }

    tracing::debug!(
        skills = skills.len(),
        caps = caps_fired.len(),
        voice_biases = voice_biases.len(),
        "skills computed"
    );

    Ok(SkillsResult {
        skills,
        voice_biases,
        caps_fired,
    })
}

/// Voice draws are taken even when the vocab lacks the skill, so the stream
/// position never depends on vocab contents.
fn apply_voice_biases(rng: &mut FacetRng, skills: &mut SkillMap, voice: &str) -> Vec<SkillBias> {
    let draws: Vec<(&str, i32)> = match voice {
        "commanding" => vec![("negotiation", rng.int(10, 40)), ("mediaHandling", rng.int(0, 20))],
        "warm" => vec![("negotiation", rng.int(0, 20))],
        "fast-talking" => vec![("mediaHandling", rng.int(5, 30))],
        _ => Vec::new(),
    };
    let mut biases = Vec::new();
    for (skill, delta) in draws {
        if let Some(entry) = skills.get_mut(skill) {
            entry.value = entry.value.offset(delta);
            biases.push(SkillBias {
                skill: skill.to_string(),
                delta,
                reason: format!("voice:{}", voice),
            });
        }
    }
    biases
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{Facet, Seed};

    fn vocab(keys: &[&str]) -> Vocab {
        let mut vocab = Vocab::default();
        vocab.capabilities.skill_keys = keys.iter().map(|k| k.to_string()).collect();
        vocab
    }

    fn run(vocab: &Vocab, latents: Latents, aptitudes: Aptitudes, voice: &str, age: u32) -> SkillsResult {
        let traits = PsychTraits::default();
        let roles = vec!["operative".to_string()];
        let inputs = SkillInputs {
            vocab,
            aptitudes: &aptitudes,
            traits: &traits,
            latents: &latents,
            roles: &roles,
            tier: TierBand::Middle,
            career: "intelligence",
            voice_tag: voice,
            security_env: None,
            travel_score: travel_score(&latents, DiasporaStatus::Native),
            age,
        };
        let mut rng = Seed::normalize("skills-test").rng(Facet::Skills);
        compute_skills(&mut rng, &inputs, &SkillConfig::default()).unwrap()
    }

    #[test]
    fn test_missing_skill_keys_fails() {
        let vocab = Vocab::default();
        let latents = Latents::default();
        let traits = PsychTraits::default();
        let aptitudes = Aptitudes::default();
        let inputs = SkillInputs {
            vocab: &vocab,
            aptitudes: &aptitudes,
            traits: &traits,
            latents: &latents,
            roles: &[],
            tier: TierBand::Middle,
            career: "",
            voice_tag: "",
            security_env: None,
            travel_score: Fixed01k::NEUTRAL,
            age: 30,
        };
        let mut rng = Seed::normalize("x").rng(Facet::Skills);
        let err = compute_skills(&mut rng, &inputs, &SkillConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "vocab missing: capabilities.skillKeys");
    }

    #[test]
    fn test_career_bonus_table() {
        assert_eq!(career_bonus("intelligence", "legalOps"), 140);
        assert_eq!(career_bonus("military", "legalOps"), 0);
        assert_eq!(career_bonus("unknown", "driving"), 0);
    }

    #[test]
    fn test_values_within_floor_and_ceiling() {
        let vocab = vocab(&["driving", "shooting", "tradecraft", "negotiation", "cooking"]);
        let result = run(&vocab, Latents::default(), Aptitudes::default(), "commanding", 40);
        for (key, entry) in &result.skills {
            assert!((90..=940).contains(&entry.value.get()), "{} = {}", key, entry.value);
            assert!((0..=500).contains(&entry.xp.get()), "{} xp = {}", key, entry.xp);
            assert!(entry.last_used_day.is_none());
        }
    }

    #[test]
    fn test_voice_bias_only_for_present_skills() {
        let vocab = vocab(&["negotiation"]);
        let result = run(&vocab, Latents::default(), Aptitudes::default(), "commanding", 30);
        assert_eq!(result.voice_biases.len(), 1);
        assert_eq!(result.voice_biases[0].skill, "negotiation");
        assert_eq!(result.voice_biases[0].reason, "voice:commanding");
    }

    #[test]
    fn test_low_impulse_caps_tradecraft() {
        let vocab = vocab(&["tradecraft"]);
        let mut latents = Latents::default();
        latents.impulse_control = Fixed01k::new(100);
        latents.cosmopolitanism = Fixed01k::new(1000);
        latents.opsec_discipline = Fixed01k::new(1000);
        let result = run(&vocab, latents, Aptitudes::default(), "", 30);
        assert!(result.skills["tradecraft"].value <= 500);
    }

    #[test]
    fn test_extreme_stress_caps_combat() {
        let vocab = vocab(&["shooting", "melee"]);
        let mut latents = Latents::default();
        latents.stress_reactivity = Fixed01k::new(900);
        let mut aptitudes = Aptitudes::default();
        aptitudes.reflexes = Fixed01k::new(1000);
        aptitudes.hand_eye_coordination = Fixed01k::new(1000);
        let result = run(&vocab, latents, aptitudes, "", 30);
        assert!(result.skills["shooting"].value <= 500);
        assert!(result.skills["melee"].value <= 500);
    }

    #[test]
    fn test_language_floor_with_strong_memory() {
        let vocab = vocab(&["language_french", "languages"]);
        let mut aptitudes = Aptitudes::default();
        aptitudes.working_memory = Fixed01k::new(800);
        aptitudes.cognitive_speed = Fixed01k::new(0);
        aptitudes.attention_control = Fixed01k::new(0);
        let result = run(&vocab, Latents::default(), aptitudes, "", 30);
        assert!(result.skills["language_french"].value >= 350);
        assert!(result.skills["languages"].value >= 350);
    }

    #[test]
    fn test_older_agents_gain_more_xp() {
        let vocab = vocab(&["bureaucracy", "financeOps", "legalOps"]);
        let young = run(&vocab, Latents::default(), Aptitudes::default(), "", 25);
        let old = run(&vocab, Latents::default(), Aptitudes::default(), "", 65);
        for key in ["bureaucracy", "financeOps", "legalOps"] {
            assert!(old.skills[key].xp >= young.skills[key].xp, "{}", key);
        }
    }

    #[test]
    fn test_travel_score_rewards_living_abroad() {
        let latents = Latents::default();
        let home = travel_score(&latents, DiasporaStatus::Native);
        let abroad = travel_score(&latents, DiasporaStatus::Expat);
        assert_eq!(abroad.get() - home.get(), 150);
    }
}
