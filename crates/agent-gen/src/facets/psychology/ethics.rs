//! Ethics and internal tensions

use agent_model::{Aptitudes, ContradictionPair, Ethics, Fixed01k, Latents, LoyaltyScope, PsychTraits};

use crate::facets::has_role;
use crate::rng::FacetRng;
use crate::weighted::{weighted_pick, Weighted};

/// Both traits must exceed this for a tension to apply.
const TENSION_THRESHOLD: i32 = 550;
const MAX_CONTRADICTIONS: usize = 3;

pub fn compute_ethics(
    rng: &mut FacetRng,
    latents: &Latents,
    traits: &PsychTraits,
    aptitudes: &Aptitudes,
) -> Ethics {
    let l = latents;
    let rule_adherence = Fixed01k::clamped(
        0.45 * l.principledness.as_f64()
            + 0.30 * l.institutional_embeddedness.as_f64()
            + 0.15 * traits.conscientiousness.as_f64()
            + 0.10 * f64::from(rng.int(0, 1000)),
    );
    let harm_aversion = Fixed01k::clamped(
        0.50 * aptitudes.empathy.as_f64()
            + 0.25 * l.principledness.as_f64()
            + 0.15 * l.risk_appetite.inverted().as_f64()
            + 0.10 * f64::from(rng.int(0, 1000)),
    );
    let mission_utilitarianism = Fixed01k::clamped(
        0.40 * l.risk_appetite.as_f64()
            + 0.25 * l.principledness.inverted().as_f64()
            + 0.20 * l.opsec_discipline.as_f64()
            + 0.15 * f64::from(rng.int(0, 1000)),
    );

    let principled = l.principledness.unit();
    let scopes = [
        Weighted::new(
            LoyaltyScope::Institution,
            1.0 + 2.0 * l.institutional_embeddedness.unit(),
        ),
        Weighted::new(LoyaltyScope::People, 1.0 + 2.0 * aptitudes.empathy.unit()),
        Weighted::new(LoyaltyScope::Ideals, 1.0 + 2.0 * principled),
        Weighted::new(
            LoyaltyScope::SelfInterest,
            1.0 + 1.5 * (1.0 - principled) + 0.8 * l.risk_appetite.unit(),
        ),
    ];
    let loyalty_scope = weighted_pick(rng, &scopes).unwrap_or(LoyaltyScope::Institution);

    Ethics {
        rule_adherence,
        harm_aversion,
        mission_utilitarianism,
        loyalty_scope,
    }
}

struct TensionInputs<'a> {
    latents: &'a Latents,
    aptitudes: &'a Aptitudes,
    ethics: &'a Ethics,
    roles: &'a [String],
}

struct Tension {
    trait1: &'static str,
    trait2: &'static str,
    tension: &'static str,
    hook: &'static str,
    holds: fn(&TensionInputs<'_>) -> bool,
}

impl Tension {
    fn pair(&self) -> ContradictionPair {
        ContradictionPair {
            trait1: self.trait1.to_string(),
            trait2: self.trait2.to_string(),
            tension: self.tension.to_string(),
            narrative_hook: self.hook.to_string(),
        }
    }
}

fn both_high(a: Fixed01k, b: Fixed01k) -> bool {
    a > TENSION_THRESHOLD && b > TENSION_THRESHOLD
}

const TENSIONS: [Tension; 7] = [
    Tension {
        trait1: "harmAversion",
        trait2: "missionUtilitarianism",
        tension: "moral-injury-risk",
        hook: "Cares about people but can rationalize harm for mission success",
        holds: |t| both_high(t.ethics.harm_aversion, t.ethics.mission_utilitarianism),
    },
    Tension {
        trait1: "ruleAdherence",
        trait2: "riskAppetite",
        tension: "maverick-institutionalist",
        hook: "Respects the system but constantly pushes its boundaries",
        holds: |t| both_high(t.ethics.rule_adherence, t.latents.risk_appetite),
    },
    Tension {
        trait1: "publicness",
        trait2: "opsecDiscipline",
        tension: "spotlight-shadow",
        hook: "Craves attention but knows discretion is survival",
        holds: |t| both_high(t.latents.publicness, t.latents.opsec_discipline),
    },
    Tension {
        trait1: "empathy",
        trait2: "deceptionAptitude",
        tension: "compassionate-manipulator",
        hook: "Genuinely understands people and uses that for leverage",
        holds: |t| both_high(t.aptitudes.empathy, t.aptitudes.deception_aptitude),
    },
    Tension {
        trait1: "frugality",
        trait2: "aestheticExpressiveness",
        tension: "ascetic-aesthete",
        hook: "Values simplicity but has expensive taste",
        holds: |t| both_high(t.latents.frugality, t.latents.aesthetic_expressiveness),
    },
    Tension {
        trait1: "institutionalEmbeddedness",
        trait2: "adaptability",
        tension: "loyal-chameleon",
        hook: "Devoted to the organization but could thrive anywhere",
        holds: |t| both_high(t.latents.institutional_embeddedness, t.latents.adaptability),
    },
    Tension {
        trait1: "socialBattery",
        trait2: "opsecDiscipline",
        tension: "social-introvert",
        hook: "Excels at schmoozing but finds it exhausting",
        holds: |t| {
            both_high(t.latents.social_battery, t.latents.opsec_discipline)
                && has_role(t.roles, "operative")
        },
    },
];

/// Tensions nearly everyone lives with, used when no trait pair qualifies.
const UNIVERSAL: [(&str, &str, &str, &str); 5] = [
    (
        "security",
        "freedom",
        "safety-adventure",
        "Craves stability but feels trapped by routine",
    ),
    (
        "authenticity",
        "belonging",
        "self-vs-group",
        "Wants to be accepted but fears losing themselves",
    ),
    (
        "ambition",
        "contentment",
        "striving-settling",
        "Driven to achieve more but unsure what \"enough\" looks like",
    ),
    (
        "independence",
        "connection",
        "autonomy-intimacy",
        "Values self-reliance but needs close relationships",
    ),
    (
        "principle",
        "pragmatism",
        "idealist-realist",
        "Holds strong values but knows the world requires compromise",
    ),
];

fn universal(index: usize) -> ContradictionPair {
    let (trait1, trait2, tension, hook) = UNIVERSAL[index % UNIVERSAL.len()];
    ContradictionPair {
        trait1: trait1.to_string(),
        trait2: trait2.to_string(),
        tension: tension.to_string(),
        narrative_hook: hook.to_string(),
    }
}

/// Deterministic; draws nothing. Always returns between one and three pairs.
pub fn compute_contradictions(
    latents: &Latents,
    aptitudes: &Aptitudes,
    ethics: &Ethics,
    roles: &[String],
) -> Vec<ContradictionPair> {
    let inputs = TensionInputs {
        latents,
        aptitudes,
        ethics,
        roles,
    };
    let mut pairs: Vec<ContradictionPair> = TENSIONS
        .iter()
        .filter(|t| (t.holds)(&inputs))
        .map(Tension::pair)
        .collect();

    if pairs.is_empty() {
        let n = UNIVERSAL.len();
        let first = (latents.social_battery.get() + latents.risk_appetite.get()) as usize % n;
        pairs.push(universal(first));
        if latents.adaptability > 500 {
            let second = (first + 1 + latents.frugality.get() as usize % 3) % n;
            if second != first {
                pairs.push(universal(second));
            }
        }
    }

    pairs.truncate(MAX_CONTRADICTIONS);
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{Facet, Seed};

    fn ethics(harm: i32, mission: i32, rule: i32) -> Ethics {
        Ethics {
            rule_adherence: Fixed01k::new(rule),
            harm_aversion: Fixed01k::new(harm),
            mission_utilitarianism: Fixed01k::new(mission),
            loyalty_scope: LoyaltyScope::People,
        }
    }

    #[test]
    fn test_ethics_is_deterministic() {
        let latents = Latents::default();
        let traits = PsychTraits::default();
        let apt = Aptitudes::default();
        let seed = Seed::normalize("ethics");
        let a = compute_ethics(&mut seed.rng(Facet::Ethics), &latents, &traits, &apt);
        let b = compute_ethics(&mut seed.rng(Facet::Ethics), &latents, &traits, &apt);
        assert_eq!(a, b);
    }

    #[test]
    fn test_matching_tensions_are_collected_and_capped() {
        let mut latents = Latents::default();
        for key in agent_model::LatentKey::ALL {
            *latents.get_mut(key) = Fixed01k::new(900);
        }
        let mut apt = Aptitudes::default();
        apt.empathy = Fixed01k::new(900);
        apt.deception_aptitude = Fixed01k::new(900);
        let pairs = compute_contradictions(&latents, &apt, &ethics(900, 900, 900), &[]);
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].tension, "moral-injury-risk");
        assert_eq!(pairs[1].tension, "maverick-institutionalist");
    }

    #[test]
    fn test_universal_fallback_when_nothing_matches() {
        let mut latents = Latents::default();
        latents.social_battery = Fixed01k::new(300);
        latents.risk_appetite = Fixed01k::new(201);
        latents.adaptability = Fixed01k::new(400);
        let pairs = compute_contradictions(&latents, &Aptitudes::default(), &ethics(100, 100, 100), &[]);
        assert_eq!(pairs.len(), 1);
        // (300 + 201) % 5 == 1
        assert_eq!(pairs[0].tension, "self-vs-group");
    }

    #[test]
    fn test_adaptable_agents_get_a_second_universal_tension() {
        let mut latents = Latents::default();
        latents.social_battery = Fixed01k::new(300);
        latents.risk_appetite = Fixed01k::new(200);
        latents.adaptability = Fixed01k::new(520);
        latents.frugality = Fixed01k::new(4);
        let pairs = compute_contradictions(&latents, &Aptitudes::default(), &ethics(100, 100, 100), &[]);
        let tensions: Vec<_> = pairs.iter().map(|p| p.tension.as_str()).collect();
        assert_eq!(tensions, vec!["safety-adventure", "striving-settling"]);
    }

    #[test]
    fn test_social_introvert_needs_operative_role() {
        let mut latents = Latents::default();
        latents.social_battery = Fixed01k::new(800);
        latents.opsec_discipline = Fixed01k::new(800);
        latents.publicness = Fixed01k::new(100);
        let low = ethics(100, 100, 100);
        let apt = Aptitudes::default();
        let plain = compute_contradictions(&latents, &apt, &low, &[]);
        assert!(plain.iter().all(|p| p.tension != "social-introvert"));
        let roles = vec!["operative".to_string()];
        let operative = compute_contradictions(&latents, &apt, &low, &roles);
        assert_eq!(operative[0].tension, "social-introvert");
    }
}
