//! Aptitudes
//!
//! Thirteen ability scores blended from four category bases, then nudged by
//! conditioning, stress, build, height, voice and education. Every non-zero
//! nudge is recorded with its reason.

use agent_model::{AptitudeBias, AptitudeKey, Aptitudes, Fixed01k, HeightBand, Latents, TierBand};

use crate::rng::FacetRng;

pub mod aptitude_constants {
    pub const MUSCULAR_BUILDS: [&str; 7] = [
        "muscular",
        "athletic",
        "broad-shouldered",
        "brawny",
        "barrel-chested",
        "sturdy",
        "solid",
    ];
    pub const WIRY_BUILDS: [&str; 7] = [
        "wiry",
        "lean",
        "lanky",
        "long-limbed",
        "runner's build",
        "graceful",
        "sinewy",
    ];
    pub const HEAVY_BUILDS: [&str; 4] = ["heavyset", "stocky", "compact", "curvy"];
    pub const DEFAULT_EDUCATION: &str = "secondary";
}

use aptitude_constants::*;

pub struct AptitudeInputs<'a> {
    pub latents: &'a Latents,
    pub tier: TierBand,
    pub build_tag: &'a str,
    pub height: HeightBand,
    pub voice_tag: &'a str,
    pub education: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AptitudesResult {
    pub aptitudes: Aptitudes,
    pub biases: Vec<AptitudeBias>,
}

struct Builder {
    aptitudes: Aptitudes,
    biases: Vec<AptitudeBias>,
}

impl Builder {
    fn bump(&mut self, key: AptitudeKey, delta: i32, reason: &str) {
        if delta == 0 {
            return;
        }
        let slot = self.aptitudes.get_mut(key);
        *slot = slot.offset(delta);
        self.biases.push(AptitudeBias {
            key,
            delta,
            reason: reason.to_string(),
        });
    }
}

/// Cognitive offset for an education track; unknown tracks are neutral.
pub fn education_bias(track: &str) -> i32 {
    match track {
        "doctorate" => 150,
        "graduate" => 100,
        "undergraduate" => 50,
        "military-academy" => 30,
        "civil-service-track" => 20,
        "trade-certification" => -10,
        "secondary" => -40,
        "self-taught" => -20,
        _ => 0,
    }
}

/// Computes aptitudes from the `capabilities` stream.
pub fn compute_aptitudes(rng: &mut FacetRng, inputs: &AptitudeInputs<'_>) -> AptitudesResult {
    let physical = f64::from(rng.int(200, 900));
    let coordination = f64::from(rng.int(200, 900));
    let cognitive = f64::from(rng.int(200, 900));
    let social = f64::from(rng.int(200, 900));

    let mut blend = |base: f64, weight: f64| weight * base + (1.0 - weight) * f64::from(rng.int(0, 1000));
    let elite_penalty = if inputs.tier == TierBand::Elite { 30.0 } else { 0.0 };

    let aptitudes = Aptitudes {
        strength: Fixed01k::clamped(blend(physical, 0.75) - elite_penalty),
        endurance: Fixed01k::clamped(blend(physical, 0.70)),
        dexterity: Fixed01k::clamped(blend(coordination, 0.60)),
        reflexes: Fixed01k::clamped(blend(coordination, 0.75)),
        hand_eye_coordination: Fixed01k::clamped(blend(coordination, 0.80)),
        cognitive_speed: Fixed01k::clamped(blend(cognitive, 0.70)),
        attention_control: Fixed01k::clamped(blend(cognitive, 0.55)),
        working_memory: Fixed01k::clamped(blend(cognitive, 0.65)),
        risk_calibration: Fixed01k::clamped(blend(cognitive, 0.45)),
        charisma: Fixed01k::clamped(blend(social, 0.75)),
        empathy: Fixed01k::clamped(blend(social, 0.55)),
        assertiveness: Fixed01k::clamped(blend(social, 0.50)),
        deception_aptitude: Fixed01k::clamped(blend(social, 0.40)),
    };

    let mut b = Builder {
        aptitudes,
        biases: Vec::new(),
    };

    let conditioning = inputs.latents.physical_conditioning.unit();
    b.bump(
        AptitudeKey::Strength,
        ((conditioning - 0.5) * 80.0).round() as i32,
        "physicalConditioning",
    );
    b.bump(
        AptitudeKey::Endurance,
        ((conditioning - 0.5) * 70.0).round() as i32,
        "physicalConditioning",
    );

    let stress = inputs.latents.stress_reactivity.unit();
    b.bump(
        AptitudeKey::Endurance,
        ((stress - 0.5) * -80.0).round() as i32,
        "stressReactivity",
    );

    let build = inputs.build_tag.to_lowercase();
    let build_reason = format!("build:{}", inputs.build_tag);
    if MUSCULAR_BUILDS.contains(&build.as_str()) {
        b.bump(AptitudeKey::Strength, rng.int(20, 60), &build_reason);
        b.bump(AptitudeKey::Endurance, rng.int(10, 40), &build_reason);
    } else if WIRY_BUILDS.contains(&build.as_str()) {
        b.bump(AptitudeKey::Dexterity, rng.int(10, 40), &build_reason);
        b.bump(AptitudeKey::HandEyeCoordination, rng.int(10, 30), &build_reason);
        b.bump(AptitudeKey::Endurance, rng.int(5, 25), &build_reason);
    } else if HEAVY_BUILDS.contains(&build.as_str()) {
        b.bump(AptitudeKey::Strength, rng.int(5, 30), &build_reason);
        b.bump(AptitudeKey::Endurance, -rng.int(0, 20), &build_reason);
    }

    let height_reason = format!("height:{}", inputs.height);
    match inputs.height {
        HeightBand::Tall | HeightBand::VeryTall => {
            b.bump(AptitudeKey::Strength, rng.int(0, 25), &height_reason)
        }
        HeightBand::VeryShort => b.bump(AptitudeKey::Strength, -rng.int(0, 15), &height_reason),
        HeightBand::Short | HeightBand::Average => {}
    }

    let voice_reason = format!("voice:{}", inputs.voice_tag);
    match inputs.voice_tag {
        "commanding" => {
            b.bump(AptitudeKey::Assertiveness, rng.int(20, 50), &voice_reason);
            b.bump(AptitudeKey::Charisma, rng.int(10, 30), &voice_reason);
        }
        "warm" => b.bump(AptitudeKey::Empathy, rng.int(10, 40), &voice_reason),
        "fast-talking" => {
            b.bump(AptitudeKey::Charisma, rng.int(10, 30), &voice_reason);
            b.bump(AptitudeKey::AttentionControl, -rng.int(0, 20), &voice_reason);
        }
        _ => {}
    }

    let education = if inputs.education.is_empty() {
        DEFAULT_EDUCATION
    } else {
        inputs.education
    };
    let edu = education_bias(education);
    let edu_reason = format!("education:{}", education);
    b.bump(AptitudeKey::CognitiveSpeed, edu, &edu_reason);
    b.bump(AptitudeKey::WorkingMemory, edu, &edu_reason);
    b.bump(
        AptitudeKey::AttentionControl,
        (f64::from(edu) * 0.6).round() as i32,
        &edu_reason,
    );

    AptitudesResult {
        aptitudes: b.aptitudes,
        biases: b.biases,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{Facet, Seed};

    fn compute(seed: &str, build: &str, voice: &str, education: &str) -> AptitudesResult {
        let latents = Latents::default();
        let inputs = AptitudeInputs {
            latents: &latents,
            tier: TierBand::Middle,
            build_tag: build,
            height: HeightBand::Average,
            voice_tag: voice,
            education,
        };
        let mut rng = Seed::normalize(seed).rng(Facet::Capabilities);
        compute_aptitudes(&mut rng, &inputs)
    }

    #[test]
    fn test_neutral_latents_add_no_bias() {
        let result = compute("neutral", "unusual", "measured", "unknown-track");
        assert!(result.biases.is_empty(), "{:?}", result.biases);
    }

    #[test]
    fn test_education_applies_to_cognition() {
        let result = compute("edu", "unusual", "measured", "doctorate");
        let reasons: Vec<_> = result
            .biases
            .iter()
            .filter(|b| b.reason == "education:doctorate")
            .map(|b| (b.key, b.delta))
            .collect();
        assert_eq!(
            reasons,
            vec![
                (AptitudeKey::CognitiveSpeed, 150),
                (AptitudeKey::WorkingMemory, 150),
                (AptitudeKey::AttentionControl, 90),
            ]
        );
    }

    #[test]
    fn test_build_lists_are_case_insensitive() {
        let result = compute("build", "Athletic", "measured", "unknown-track");
        assert!(result
            .biases
            .iter()
            .any(|b| b.key == AptitudeKey::Strength && b.reason == "build:Athletic"));
    }

    #[test]
    fn test_warm_voice_raises_empathy() {
        let plain = compute("voice", "unusual", "measured", "unknown-track");
        let warm = compute("voice", "unusual", "warm", "unknown-track");
        assert!(warm.aptitudes.empathy >= plain.aptitudes.empathy);
        assert_eq!(warm.biases.len(), 1);
    }

    #[test]
    fn test_values_stay_in_range() {
        for i in 0..200 {
            let result = compute(&format!("range-{}", i), "muscular", "commanding", "doctorate");
            assert!(result.aptitudes.values().iter().all(|v| (0..=1000).contains(&v.get())));
        }
    }
}
