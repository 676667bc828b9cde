//! Affect and self-concept
//!
//! Every option starts at weight 1 and gains weight when the latents make it
//! fit. Options that the vocab lists but no rule mentions stay at 1.

use agent_model::{Affect, Aptitudes, Fixed01k, Latents, SelfConcept, TierBand};

use crate::facets::{has_role, pool_or};
use crate::rng::FacetRng;
use crate::vocab::Vocab;
use crate::weighted::{unique, weighted_pick, weighted_pick_k_unique, Weighted};

pub mod affect_constants {
    pub const BASELINE_AFFECTS: [&str; 8] = [
        "warm",
        "flat",
        "intense",
        "guarded",
        "mercurial",
        "melancholic",
        "anxious",
        "cheerful",
    ];
    pub const REGULATION_STYLES: [&str; 7] = [
        "ruminates",
        "suppresses",
        "externalizes",
        "reframes",
        "compartmentalizes",
        "avoids",
        "seeks-support",
    ];
    pub const STRESS_TELLS: [&str; 10] = [
        "overexplains",
        "goes-quiet",
        "snaps",
        "jokes-deflect",
        "micromanages",
        "withdraws",
        "overeats",
        "insomnia",
        "hyperactive",
        "cries-easily",
    ];
    pub const REPAIR_STYLES: [&str; 7] = [
        "apologizes-fast",
        "stonewalls",
        "buys-gifts",
        "explains-endlessly",
        "pretends-nothing-happened",
        "seeks-mediation",
        "writes-letters",
    ];
    pub const SELF_STORIES: [&str; 10] = [
        "self-made",
        "wronged",
        "caretaker",
        "chosen",
        "survivor",
        "reformer",
        "outsider",
        "loyalist",
        "pragmatist",
        "idealist",
    ];
    pub const SOCIAL_MASKS: [&str; 10] = [
        "bureaucrat",
        "charmer",
        "patriot",
        "cynic",
        "true-believer",
        "everyman",
        "intellectual",
        "tough-guy",
        "helper",
        "rebel",
    ];
    pub const IMPOSTOR_BASE: i32 = 400;
}

use affect_constants::*;

fn weigh(pool: &[String], weight: impl Fn(&str) -> f64) -> Vec<Weighted<String>> {
    pool.iter()
        .map(|item| Weighted::new(item.clone(), weight(item.as_str())))
        .collect()
}

fn pick_weighted(rng: &mut FacetRng, candidates: &[Weighted<String>]) -> String {
    weighted_pick(rng, candidates).unwrap_or_default()
}

fn bonus(condition: bool, amount: f64) -> f64 {
    if condition {
        amount
    } else {
        0.0
    }
}

fn baseline_weight(item: &str, l: &Latents, a: &Aptitudes) -> f64 {
    1.0 + match item {
        "warm" => bonus(a.empathy > 600, 2.0),
        "flat" => bonus(l.opsec_discipline > 650, 2.0),
        "intense" => bonus(l.risk_appetite > 600, 2.0),
        "guarded" => bonus(l.opsec_discipline > 550, 1.5),
        "anxious" => bonus(l.impulse_control < 400, 2.0),
        "cheerful" => bonus(l.social_battery > 650, 2.0),
        "mercurial" => bonus(l.adaptability > 600 && l.impulse_control < 500, 2.0),
        "melancholic" => bonus(l.social_battery < 400, 1.5),
        "numb" => bonus(l.opsec_discipline > 700 && l.stress_reactivity > 600, 2.0),
        "irritable" => bonus(l.stress_reactivity > 650, 2.0),
        "hopeful" => bonus(l.principledness > 650, 2.0),
        "restless" => bonus(l.impulse_control < 450, 2.0),
        _ => 0.0,
    }
}

fn regulation_weight(item: &str, l: &Latents, a: &Aptitudes) -> f64 {
    1.0 + match item {
        "suppresses" => bonus(l.opsec_discipline > 600, 2.0),
        "compartmentalizes" => bonus(a.attention_control > 600, 2.0),
        "seeks-support" => bonus(l.social_battery > 600, 2.0),
        "ruminates" => bonus(l.planning_horizon > 600, 1.5),
        "externalizes" => bonus(l.impulse_control < 400, 2.0),
        "reframes" => bonus(l.adaptability > 600, 2.0),
        "avoids" => bonus(l.risk_appetite < 400, 1.5),
        "meditates" => bonus(l.impulse_control > 600, 2.0),
        "exercises" => bonus(l.physical_conditioning > 600, 2.0),
        "isolates" => bonus(l.social_battery < 400, 2.0),
        "distracts" => bonus(l.impulse_control < 400, 2.0),
        _ => 0.0,
    }
}

fn tell_weight(item: &str, l: &Latents) -> f64 {
    1.0 + match item {
        "jaw-clench" => bonus(l.opsec_discipline > 600, 1.5),
        "pacing" => bonus(l.stress_reactivity > 600, 1.5),
        "fidgeting" => bonus(l.impulse_control < 450, 1.5),
        "tunnel-vision" => bonus(l.stress_reactivity > 700, 1.5),
        "cold-sweat" => bonus(l.stress_reactivity > 650, 1.5),
        _ => 0.0,
    }
}

fn repair_weight(item: &str, l: &Latents, a: &Aptitudes) -> f64 {
    1.0 + match item {
        "apologizes-fast" => bonus(a.empathy > 600, 2.0),
        "stonewalls" => bonus(l.opsec_discipline > 650, 2.0),
        "explains-endlessly" => bonus(l.planning_horizon > 600, 1.5),
        "pretends-nothing-happened" => bonus(l.adaptability > 600, 1.5),
        "seeks-mediation" => bonus(l.institutional_embeddedness > 600, 2.0),
        "gives-space" => bonus(l.opsec_discipline > 600, 1.5),
        "humor" => bonus(l.social_battery > 600, 1.5),
        "acts-of-service" => bonus(l.institutional_embeddedness > 600, 1.5),
        _ => 0.0,
    }
}

/// Tells that extreme latents make unavoidable, in this order.
fn forced_tells(pool: &[String], l: &Latents) -> Vec<String> {
    let mut forced = Vec::new();
    let triggers = [
        ("insomnia", l.stress_reactivity > 700),
        ("goes-quiet", l.opsec_discipline > 700),
        ("snaps", l.impulse_control < 350),
    ];
    for (tell, fires) in triggers {
        if fires && pool.iter().any(|p| p == tell) {
            forced.push(tell.to_string());
        }
    }
    forced
}

pub fn compute_affect(rng: &mut FacetRng, vocab: &Vocab, latents: &Latents, aptitudes: &Aptitudes) -> Affect {
    let l = latents;
    let a = aptitudes;

    let baselines = pool_or(&vocab.affect.baseline_affects, &BASELINE_AFFECTS);
    let baseline = pick_weighted(rng, &weigh(&baselines, |b| baseline_weight(b, l, a)));

    let styles = pool_or(&vocab.affect.regulation_styles, &REGULATION_STYLES);
    let regulation_style = pick_weighted(rng, &weigh(&styles, |r| regulation_weight(r, l, a)));

    let tells = pool_or(&vocab.affect.stress_tells, &STRESS_TELLS);
    let forced = forced_tells(&tells, l);
    let drawn_count = (1 + rng.int(0, 2)).clamp(1, 3) as usize;
    let count = drawn_count.max(forced.len());
    let remaining: Vec<Weighted<String>> = weigh(&tells, |t| tell_weight(t, l))
        .into_iter()
        .filter(|w| !forced.contains(&w.item))
        .collect();
    let fill_count = remaining.len().min(count - forced.len());
    let fill = weighted_pick_k_unique(rng, &remaining, fill_count);
    let mut stress_tells = unique(&[forced, fill].concat());
    stress_tells.truncate(count);

    let repairs = pool_or(&vocab.affect.repair_styles, &REPAIR_STYLES);
    let repair_style = pick_weighted(rng, &weigh(&repairs, |r| repair_weight(r, l, a)));

    tracing::debug!(%baseline, %regulation_style, tells = stress_tells.len(), "affect computed");

    Affect {
        baseline,
        regulation_style,
        stress_tells,
        repair_style,
    }
}

pub fn compute_self_concept(
    rng: &mut FacetRng,
    vocab: &Vocab,
    latents: &Latents,
    tier: TierBand,
    roles: &[String],
) -> SelfConcept {
    let l = latents;
    let elite = tier == TierBand::Elite;
    let mass = tier == TierBand::Mass;

    let stories = pool_or(&vocab.self_concept.self_stories, &SELF_STORIES);
    let self_story = pick_weighted(
        rng,
        &weigh(&stories, |s| {
            1.0 + match s {
                "self-made" => bonus(elite && l.risk_appetite > 500, 2.0),
                "survivor" => bonus(mass, 2.0),
                "loyalist" => bonus(l.institutional_embeddedness > 650, 2.0),
                "reformer" => bonus(l.principledness > 650, 2.0),
                "outsider" => bonus(l.social_battery < 400, 2.0),
                "caretaker" => bonus(has_role(roles, "organizer"), 2.0),
                "pragmatist" => bonus(l.adaptability > 600, 1.5),
                "idealist" => bonus(l.principledness > 600, 1.5),
                _ => 0.0,
            }
        }),
    );

    let mut impostor = IMPOSTOR_BASE;
    if elite {
        impostor += 150;
    }
    if l.social_battery < 450 {
        impostor += 100;
    }
    if l.principledness > 600 {
        impostor -= 80;
    }
    if has_role(roles, "analyst") {
        impostor += 50;
    }
    let impostor_risk = Fixed01k::new(impostor + rng.int(-150, 150));

    let masks = pool_or(&vocab.self_concept.social_masks, &SOCIAL_MASKS);
    let social_mask = pick_weighted(
        rng,
        &weigh(&masks, |m| {
            1.0 + match m {
                "bureaucrat" => bonus(l.institutional_embeddedness > 600, 2.0),
                "charmer" => bonus(l.social_battery > 650, 2.0),
                "intellectual" => bonus(has_role(roles, "analyst"), 2.0),
                "tough-guy" => bonus(has_role(roles, "security"), 2.0),
                "helper" => bonus(has_role(roles, "organizer"), 2.0),
                "rebel" => bonus(l.risk_appetite > 650, 1.5),
                "cynic" => bonus(l.principledness < 400, 2.0),
                "true-believer" => bonus(l.principledness > 700, 2.0),
                "everyman" => bonus(mass, 1.5),
                "patriot" => bonus(l.institutional_embeddedness > 650, 1.5),
                _ => 0.0,
            }
        }),
    );

    SelfConcept {
        self_story,
        impostor_risk,
        social_mask,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{Facet, Seed};

    #[test]
    fn test_affect_uses_builtin_pools() {
        let mut rng = Seed::normalize("affect").rng(Facet::Affect);
        let affect = compute_affect(&mut rng, &Vocab::default(), &Latents::default(), &Aptitudes::default());
        assert!(BASELINE_AFFECTS.contains(&affect.baseline.as_str()));
        assert!(REGULATION_STYLES.contains(&affect.regulation_style.as_str()));
        assert!(REPAIR_STYLES.contains(&affect.repair_style.as_str()));
        assert!((1..=3).contains(&affect.stress_tells.len()));
    }

    #[test]
    fn test_extreme_latents_force_tells() {
        let mut latents = Latents::default();
        latents.stress_reactivity = Fixed01k::new(900);
        latents.opsec_discipline = Fixed01k::new(900);
        latents.impulse_control = Fixed01k::new(100);
        for i in 0..20 {
            let mut rng = Seed::normalize(&format!("tells-{}", i)).rng(Facet::Affect);
            let affect = compute_affect(&mut rng, &Vocab::default(), &latents, &Aptitudes::default());
            assert_eq!(&affect.stress_tells[..3], &["insomnia", "goes-quiet", "snaps"]);
            assert_eq!(affect.stress_tells.len(), 3);
        }
    }

    #[test]
    fn test_forced_tells_respect_vocab_pool() {
        let mut vocab = Vocab::default();
        vocab.affect.stress_tells = vec!["pacing".into(), "fidgeting".into()];
        let mut latents = Latents::default();
        latents.stress_reactivity = Fixed01k::new(900);
        let mut rng = Seed::normalize("pool").rng(Facet::Affect);
        let affect = compute_affect(&mut rng, &vocab, &latents, &Aptitudes::default());
        assert!(affect.stress_tells.iter().all(|t| t == "pacing" || t == "fidgeting"));
    }

    #[test]
    fn test_impostor_risk_bounds() {
        let roles = vec!["analyst".to_string()];
        let mut latents = Latents::default();
        latents.social_battery = Fixed01k::new(100);
        for i in 0..50 {
            let mut rng = Seed::normalize(&format!("self-{}", i)).rng(Facet::SelfConcept);
            let concept = compute_self_concept(&mut rng, &Vocab::default(), &latents, TierBand::Elite, &roles);
            // 400 + 150 + 100 + 50 with jitter of 150
            assert!((550..=850).contains(&concept.impostor_risk.get()));
            assert!(SOCIAL_MASKS.contains(&concept.social_mask.as_str()));
        }
    }
}
