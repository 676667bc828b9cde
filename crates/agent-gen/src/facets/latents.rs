//! Latent trait layer
//!
//! Sixteen hidden scalars built in fixed stages: raw draws, tier bias scaled
//! by a per-agent mediator, role bias, age bias, cross-latent corrections on
//! the pre-clamp sums, then an ordered list of hard caps.

use agent_model::{Fixed01k, LatentKey, Latents, TierBand};
use std::collections::BTreeMap;

use crate::constraints::{ConstraintPipeline, Rule};
use crate::rng::FacetRng;

/// Per-latent signed offsets, kept for audit.
pub type LatentOffsets = BTreeMap<LatentKey, i32>;

#[derive(Debug, Clone, PartialEq)]
pub struct LatentsResult {
    pub values: Latents,
    pub raw: Latents,
    pub tier_bias: LatentOffsets,
    pub role_bias: LatentOffsets,
    pub age_bias: LatentOffsets,
    pub caps_fired: Vec<&'static str>,
}

/// Read-only inputs of the latent cap rules.
#[derive(Debug, Clone, Copy)]
pub struct LatentCapContext {
    pub tier: TierBand,
    pub age: u32,
    /// Holds a media or diplomat role.
    pub public_facing: bool,
    /// Holds an operative or security role.
    pub covert: bool,
}

/// Tier offsets as (elite, mass); middle tier is unbiased.
/// Ages beyond this add no further stress bias.
pub const STRESS_BIAS_AGE_LIMIT: u32 = 400;

const TIER_BIAS: [(LatentKey, i32, i32); 10] = [
    (LatentKey::Cosmopolitanism, 250, -180),
    (LatentKey::Publicness, 120, -40),
    (LatentKey::InstitutionalEmbeddedness, 120, 0),
    (LatentKey::TechFluency, 40, -40),
    (LatentKey::CuriosityBandwidth, 40, -40),
    (LatentKey::AestheticExpressiveness, 80, -20),
    (LatentKey::Frugality, -120, 120),
    (LatentKey::PlanningHorizon, 60, -20),
    (LatentKey::StressReactivity, -60, 60),
    (LatentKey::RiskAppetite, -200, 80),
];

const ROLE_BIAS: &[(&str, &[(LatentKey, i32)])] = &[
    (
        "diplomat",
        &[
            (LatentKey::Cosmopolitanism, 220),
            (LatentKey::Publicness, 220),
            (LatentKey::InstitutionalEmbeddedness, 160),
            (LatentKey::RiskAppetite, -40),
            (LatentKey::StressReactivity, 40),
            (LatentKey::SocialBattery, 220),
            (LatentKey::AestheticExpressiveness, 60),
            (LatentKey::CuriosityBandwidth, 60),
            (LatentKey::Adaptability, 200),
            (LatentKey::Principledness, 40),
        ],
    ),
    (
        "media",
        &[
            (LatentKey::Cosmopolitanism, 80),
            (LatentKey::Publicness, 320),
            (LatentKey::OpsecDiscipline, -220),
            (LatentKey::StressReactivity, 80),
            (LatentKey::ImpulseControl, -60),
            (LatentKey::TechFluency, 40),
            (LatentKey::SocialBattery, 200),
            (LatentKey::AestheticExpressiveness, 200),
            (LatentKey::Frugality, -20),
            (LatentKey::CuriosityBandwidth, 100),
            (LatentKey::PlanningHorizon, -80),
            (LatentKey::Principledness, -20),
            (LatentKey::PhysicalConditioning, -40),
        ],
    ),
    (
        "operative",
        &[
            (LatentKey::Cosmopolitanism, 140),
            (LatentKey::Publicness, -240),
            (LatentKey::OpsecDiscipline, 320),
            (LatentKey::RiskAppetite, 180),
            (LatentKey::StressReactivity, 100),
            (LatentKey::ImpulseControl, -20),
            (LatentKey::TechFluency, 80),
            (LatentKey::SocialBattery, -40),
            (LatentKey::AestheticExpressiveness, -80),
            (LatentKey::Adaptability, 160),
            (LatentKey::PlanningHorizon, -20),
            (LatentKey::Principledness, -40),
            (LatentKey::PhysicalConditioning, 120),
        ],
    ),
    (
        "security",
        &[
            (LatentKey::Publicness, -120),
            (LatentKey::OpsecDiscipline, 220),
            (LatentKey::RiskAppetite, 120),
            (LatentKey::StressReactivity, 120),
            (LatentKey::TechFluency, 60),
            (LatentKey::AestheticExpressiveness, -140),
            (LatentKey::Adaptability, 80),
            (LatentKey::Principledness, 120),
            (LatentKey::PhysicalConditioning, 220),
        ],
    ),
    (
        "technocrat",
        &[
            (LatentKey::Cosmopolitanism, 60),
            (LatentKey::InstitutionalEmbeddedness, 200),
            (LatentKey::ImpulseControl, 80),
            (LatentKey::TechFluency, 220),
            (LatentKey::SocialBattery, -60),
            (LatentKey::CuriosityBandwidth, 120),
            (LatentKey::PlanningHorizon, 200),
            (LatentKey::PhysicalConditioning, -20),
        ],
    ),
    (
        "analyst",
        &[
            (LatentKey::InstitutionalEmbeddedness, 120),
            (LatentKey::ImpulseControl, 120),
            (LatentKey::TechFluency, 180),
            (LatentKey::SocialBattery, -140),
            (LatentKey::AestheticExpressiveness, -20),
            (LatentKey::Frugality, 20),
            (LatentKey::CuriosityBandwidth, 180),
            (LatentKey::Adaptability, -40),
            (LatentKey::PlanningHorizon, 180),
            (LatentKey::PhysicalConditioning, -60),
        ],
    ),
    (
        "organizer",
        &[
            (LatentKey::InstitutionalEmbeddedness, 80),
            (LatentKey::RiskAppetite, 80),
            (LatentKey::SocialBattery, 180),
            (LatentKey::AestheticExpressiveness, 80),
            (LatentKey::Frugality, 60),
            (LatentKey::Adaptability, 100),
            (LatentKey::PlanningHorizon, 100),
            (LatentKey::Principledness, 120),
        ],
    ),
];

fn age_conditioning_bias(age: u32) -> i32 {
    match age {
        0..=24 => 50,
        25..=34 => 0,
        35..=44 => -80,
        45..=54 => -180,
        55..=64 => -300,
        _ => -450,
    }
}

fn age_tech_bias(age: u32) -> i32 {
    match age {
        0..=24 => 120,
        25..=34 => 60,
        35..=44 => 0,
        45..=54 => -80,
        55..=64 => -160,
        _ => -240,
    }
}

fn age_public_bias(age: u32) -> i32 {
    match age {
        0..=24 => -60,
        25..=34 => 0,
        35..=44 => 40,
        45..=54 => 80,
        _ => 60,
    }
}

fn age_stress_bias(age: u32) -> i32 {
    // past this age the bias already saturates the latent range
    let age = age.min(STRESS_BIAS_AGE_LIMIT) as i32;
    (age - 30).max(0) * 3
}

fn tier_bias(tier: TierBand, mediator: f64) -> LatentOffsets {
    let scale = 0.3 + 1.4 * mediator;
    TIER_BIAS
        .iter()
        .map(|&(key, elite, mass)| {
            let raw = match tier {
                TierBand::Elite => elite,
                TierBand::Middle => 0,
                TierBand::Mass => mass,
            };
            (key, (f64::from(raw) * scale).round() as i32)
        })
        .collect()
}

fn role_bias(roles: &[String]) -> LatentOffsets {
    let mut bias = LatentOffsets::new();
    for (role, offsets) in ROLE_BIAS {
        if !roles.iter().any(|r| r == *role) {
            continue;
        }
        for &(key, delta) in offsets.iter() {
            *bias.entry(key).or_insert(0) += delta;
        }
    }
    bias
}

fn age_bias(age: u32) -> LatentOffsets {
    LatentOffsets::from([
        (LatentKey::PhysicalConditioning, age_conditioning_bias(age)),
        (LatentKey::StressReactivity, age_stress_bias(age)),
        (LatentKey::TechFluency, age_tech_bias(age)),
        (LatentKey::Publicness, age_public_bias(age)),
    ])
}

pub static LATENT_CAPS: ConstraintPipeline<Latents, LatentCapContext> = ConstraintPipeline::new(&[
    Rule {
        name: "stress_limits_impulse",
        applies: |l, _| l.stress_reactivity > 700 && l.impulse_control > 600,
        apply: |l, _| l.impulse_control = l.impulse_control.capped_at(600),
    },
    Rule {
        name: "risk_and_planning",
        applies: |l, _| l.risk_appetite > 700 && l.planning_horizon > 700,
        apply: |l, _| l.planning_horizon = Fixed01k::new(550),
    },
    Rule {
        name: "public_impulse_floor",
        applies: |l, _| l.publicness > 700 && l.impulse_control < 400,
        apply: |l, _| l.impulse_control = Fixed01k::new(450),
    },
    Rule {
        name: "adaptability_and_planning",
        applies: |l, _| l.adaptability > 750 && l.planning_horizon > 700,
        apply: |l, _| l.planning_horizon = Fixed01k::new(550),
    },
    Rule {
        name: "opsec_limits_social",
        applies: |l, _| l.opsec_discipline > 800 && l.social_battery > 650,
        apply: |l, _| l.social_battery = l.social_battery.capped_at(650),
    },
    Rule {
        name: "frugality_limits_expressiveness",
        applies: |l, _| l.frugality > 800 && l.aesthetic_expressiveness > 550,
        apply: |l, _| l.aesthetic_expressiveness = l.aesthetic_expressiveness.capped_at(550),
    },
    Rule {
        name: "stress_limits_opsec",
        applies: |l, _| l.stress_reactivity > 750 && l.opsec_discipline > 600,
        apply: |l, _| l.opsec_discipline = l.opsec_discipline.capped_at(600),
    },
    Rule {
        name: "curiosity_erodes_opsec",
        applies: |l, _| l.curiosity_bandwidth > 800 && l.opsec_discipline > 700,
        apply: |l, _| l.opsec_discipline = l.opsec_discipline.offset(-150),
    },
    Rule {
        name: "principles_limit_adaptability",
        applies: |l, _| l.principledness > 800 && l.adaptability > 600,
        apply: |l, _| l.adaptability = l.adaptability.capped_at(600),
    },
    Rule {
        name: "risk_limits_frugality",
        applies: |l, _| l.risk_appetite > 800 && l.frugality > 550,
        apply: |l, _| l.frugality = l.frugality.capped_at(550),
    },
    Rule {
        name: "frugality_limits_risk",
        applies: |l, _| l.frugality > 800 && l.risk_appetite > 550,
        apply: |l, _| l.risk_appetite = l.risk_appetite.capped_at(550),
    },
    Rule {
        name: "age_public_floor",
        applies: |l, c| c.age > 50 && l.publicness < 200,
        apply: |l, _| l.publicness = Fixed01k::new(200),
    },
    Rule {
        name: "opsec_limits_publicness",
        applies: |l, _| l.opsec_discipline > 850 && l.publicness > 400,
        apply: |l, _| l.publicness = l.publicness.capped_at(400),
    },
    Rule {
        name: "publicness_limits_opsec",
        applies: |l, _| l.publicness > 850 && l.opsec_discipline > 400,
        apply: |l, _| l.opsec_discipline = l.opsec_discipline.capped_at(400),
    },
    Rule {
        name: "public_role_floor",
        applies: |l, c| c.public_facing && l.publicness < 400,
        apply: |l, _| l.publicness = Fixed01k::new(400),
    },
    Rule {
        name: "covert_role_ceiling",
        applies: |l, c| c.covert && l.publicness > 500,
        apply: |l, _| l.publicness = l.publicness.capped_at(500),
    },
    Rule {
        name: "elite_public_floor",
        applies: |l, c| c.tier == TierBand::Elite && l.publicness < 300,
        apply: |l, _| l.publicness = Fixed01k::new(300),
    },
    Rule {
        name: "stress_limits_planning",
        applies: |l, _| l.stress_reactivity > 800 && l.planning_horizon > 500,
        apply: |l, _| l.planning_horizon = l.planning_horizon.capped_at(500),
    },
]);

/// Computes the latent layer from the `latents` stream.
pub fn compute_latents(rng: &mut FacetRng, tier: TierBand, roles: &[String], age: u32) -> LatentsResult {
    let mediator = rng.next01();
    let raw = Latents::from_fn(|_| Fixed01k::new(rng.int(0, 1000)));

    let tier_bias = tier_bias(tier, mediator);
    let role_bias = role_bias(roles);
    let age_bias = age_bias(age);

    let offset = |map: &LatentOffsets, key: LatentKey| map.get(&key).copied().unwrap_or(0);
    let sum = |key: LatentKey| {
        raw.get(key).get() + offset(&tier_bias, key) + offset(&role_bias, key) + offset(&age_bias, key)
    };

    let base_opsec = sum(LatentKey::OpsecDiscipline);
    let base_public = sum(LatentKey::Publicness);
    let opsec_suppression = (0.25 * f64::from((base_public - 500).max(0))).round() as i32;
    let public_suppression = (0.25 * f64::from((base_opsec - 500).max(0))).round() as i32;

    let embeddedness = sum(LatentKey::InstitutionalEmbeddedness);
    let embeddedness_risk = (-0.25 * f64::from((embeddedness - 350).max(0))).round() as i32;
    let curiosity_risk = (0.30 * f64::from(sum(LatentKey::CuriosityBandwidth) - 500)).round() as i32;
    let planning_impulse = (0.28 * f64::from(sum(LatentKey::PlanningHorizon) - 500)).round() as i32;
    let conditioning_stress =
        (-0.18 * f64::from(sum(LatentKey::PhysicalConditioning) - 500)).round() as i32;

    let mut values = Latents::from_fn(|key| {
        let corrected = match key {
            LatentKey::Publicness => base_public - public_suppression,
            LatentKey::OpsecDiscipline => base_opsec - opsec_suppression,
            LatentKey::RiskAppetite => sum(key) + embeddedness_risk + curiosity_risk,
            LatentKey::ImpulseControl => sum(key) + planning_impulse,
            LatentKey::StressReactivity => sum(key) + conditioning_stress,
            _ => sum(key),
        };
        Fixed01k::new(corrected)
    });

    let cap_ctx = LatentCapContext {
        tier,
        age,
        public_facing: roles.iter().any(|r| r == "media" || r == "diplomat"),
        covert: roles.iter().any(|r| r == "operative" || r == "security"),
    };
    let caps_fired = LATENT_CAPS.run(&mut values, &cap_ctx);

    tracing::debug!(mediator, caps = caps_fired.len(), "latents computed");

    LatentsResult {
        values,
        raw,
        tier_bias,
        role_bias,
        age_bias,
        caps_fired,
    }
}
