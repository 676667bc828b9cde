//! Behavior lens and pressure response
//!
//! An archetype is picked by weights keyed on words in its name, then three
//! to five reads are drawn from its pools. The pressure response comes from
//! its own stream so vocab changes to archetypes never move it.

use agent_model::{
    Aptitudes, BehaviorLens, BehaviorRead, BehaviorReadCategory, Ethics, Latents, PressureResponse,
    PsychTraits, TierBand,
};

use crate::facets::has_role;
use crate::rng::{Facet, FacetRng, Streams};
use crate::vocab::{BehaviorArchetype, Vocab};
use crate::weighted::{unique, weighted_pick, Weighted};

pub mod behavior_constants {
    pub const MIN_READS: i32 = 3;
    pub const MAX_READS: i32 = 5;
    pub const MIN_ARCHETYPE_WEIGHT: f64 = 0.15;
    /// Agents this old lean on delegation under pressure.
    pub const SENIOR_AGE: u32 = 45;
    /// Below this risk appetite an agent never rushes.
    pub const NEVER_RUSHES_AT_OR_BELOW: f64 = 0.2;
    /// At or above this risk appetite an agent never freezes.
    pub const NEVER_FREEZES_AT_OR_ABOVE: f64 = 0.85;
}

use behavior_constants::*;

pub struct BehaviorInputs<'a> {
    pub vocab: &'a Vocab,
    pub latents: &'a Latents,
    pub traits: &'a PsychTraits,
    pub aptitudes: &'a Aptitudes,
    pub ethics: &'a Ethics,
    pub roles: &'a [String],
    pub tier: TierBand,
    pub age: u32,
}

fn archetype(name: &str, reads: [&[&str]; 5]) -> BehaviorArchetype {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    BehaviorArchetype {
        name: name.to_string(),
        situation_reads: owned(reads[0]),
        equipment_reads: owned(reads[1]),
        pressure_reads: owned(reads[2]),
        objective_frames: owned(reads[3]),
        team_dynamics: owned(reads[4]),
    }
}

fn fallback_archetypes() -> Vec<BehaviorArchetype> {
    vec![
        archetype(
            "Psychopath",
            [
                &["Crisis equals control through fear", "Scandal is leverage for domination"],
                &["Medical kit becomes poison lab", "Cash funds permanent solutions"],
                &["Threats increase violence"],
                &["Stabilize means eliminate unstable elements"],
                &["Terrifies compassionate allies"],
            ],
        ),
        archetype(
            "Compassionate",
            [
                &["Crisis means people need help", "Uprising equals grievances to heal"],
                &["Medical kit treats everyone", "Cash goes to first sad story"],
                &["Threats trigger protective instincts"],
                &["Protect assets means protect people"],
                &["Beloved but exhausting"],
            ],
        ),
    ]
}

/// Named archetypes from the vocab with de-duplicated pools, or the
/// built-in pair when none are usable.
fn usable_archetypes(vocab: &Vocab) -> Vec<BehaviorArchetype> {
    let archetypes: Vec<BehaviorArchetype> = vocab
        .behavior_archetypes
        .archetypes
        .iter()
        .filter(|a| !a.name.is_empty())
        .map(|a| BehaviorArchetype {
            name: a.name.clone(),
            situation_reads: unique(&a.situation_reads),
            equipment_reads: unique(&a.equipment_reads),
            pressure_reads: unique(&a.pressure_reads),
            objective_frames: unique(&a.objective_frames),
            team_dynamics: unique(&a.team_dynamics),
        })
        .collect();
    if archetypes.is_empty() {
        fallback_archetypes()
    } else {
        archetypes
    }
}

/// Weight of an archetype from keywords in its name.
pub fn archetype_weight(name: &str, inputs: &BehaviorInputs<'_>) -> f64 {
    let empathy = inputs.aptitudes.empathy.unit();
    let agree = inputs.traits.agreeableness.unit();
    let cons = inputs.traits.conscientiousness.unit();
    let risk = inputs.traits.risk_tolerance.unit();
    let auth = inputs.traits.authoritarianism.unit();
    let latents = inputs.latents;
    let stress = latents.stress_reactivity.unit();
    let opsec = latents.opsec_discipline.unit();
    let frugal = latents.frugality.unit();
    let plan = latents.planning_horizon.unit();
    let tech = latents.tech_fluency.unit();
    let social = latents.social_battery.unit();
    let public = latents.publicness.unit();
    let harm = inputs.ethics.harm_aversion.unit();
    let util = inputs.ethics.mission_utilitarianism.unit();

    let lower = name.to_lowercase();
    let mut w = 1.0;
    if lower.contains("psychopath") {
        w += 1.2 * (1.0 - empathy) + 0.9 * (1.0 - agree) + 0.6 * util + 0.4 * risk;
    }
    if lower.contains("compassionate") {
        w += 1.3 * empathy + 1.0 * agree + 0.6 * harm;
    }
    if lower.contains("paranoid") {
        w += 1.0 * stress + 0.8 * opsec + 0.5 * (1.0 - agree) + 0.3 * (1.0 - social);
    }
    if lower.contains("greedy") {
        w += 1.1 * (1.0 - frugal) + 0.5 * public + 0.3 * util;
    }
    if lower.contains("incompetent") {
        w += 1.1 * (1.0 - cons) + 0.8 * (1.0 - plan) + 0.4 * (1.0 - tech);
    }
    if lower.contains("methodical") {
        w += 1.2 * cons + 0.9 * plan + 0.4 * tech;
    }
    if lower.contains("vengeful") {
        w += 1.0 * auth + 0.8 * stress + 0.7 * (1.0 - agree) + 0.3 * risk;
    }
    w.max(MIN_ARCHETYPE_WEIGHT)
}

/// One read per category first, then a random fill from what is left.
fn draw_reads(rng: &mut FacetRng, selected: &BehaviorArchetype) -> Vec<BehaviorRead> {
    let pools = [
        (BehaviorReadCategory::Situation, &selected.situation_reads),
        (BehaviorReadCategory::Equipment, &selected.equipment_reads),
        (BehaviorReadCategory::Pressure, &selected.pressure_reads),
        (BehaviorReadCategory::Objective, &selected.objective_frames),
        (BehaviorReadCategory::Team, &selected.team_dynamics),
    ];
    let target = rng.int(MIN_READS, MAX_READS) as usize;
    let mut reads: Vec<BehaviorRead> = Vec::new();
    let used = |reads: &[BehaviorRead], item: &str| reads.iter().any(|r| r.item == item);

    for (category, items) in pools {
        if reads.len() >= target {
            break;
        }
        let available: Vec<&String> = items.iter().filter(|i| !used(&reads, i)).collect();
        if let Some(item) = rng.pick(&available) {
            reads.push(BehaviorRead {
                category,
                item: (*item).clone(),
            });
        }
    }

    let mut remaining: Vec<BehaviorRead> = pools
        .iter()
        .flat_map(|(category, items)| {
            items.iter().map(move |item| BehaviorRead {
                category: *category,
                item: item.clone(),
            })
        })
        .filter(|r| !r.item.is_empty() && !used(&reads, &r.item))
        .collect();
    while reads.len() < target && !remaining.is_empty() {
        let index = rng.int(0, remaining.len() as i32 - 1) as usize;
        let entry = remaining.remove(index.min(remaining.len() - 1));
        if !used(&reads, &entry.item) {
            reads.push(entry);
        }
    }
    reads
}

/// Picks an archetype and its reads from the `behaviorLens` stream.
pub fn compute_reads(rng: &mut FacetRng, inputs: &BehaviorInputs<'_>) -> (String, Vec<BehaviorRead>) {
    let archetypes = usable_archetypes(inputs.vocab);
    let weights: Vec<Weighted<usize>> = archetypes
        .iter()
        .enumerate()
        .map(|(i, a)| Weighted::new(i, archetype_weight(&a.name, inputs)))
        .collect();
    let index = weighted_pick(rng, &weights).unwrap_or(0);
    let Some(selected) = archetypes.get(index) else {
        return (String::new(), Vec::new());
    };
    let reads = draw_reads(rng, selected);
    (selected.name.clone(), reads)
}

/// Weights over every pressure response, before the draw.
pub fn pressure_weights(inputs: &BehaviorInputs<'_>) -> Vec<Weighted<PressureResponse>> {
    let latents = inputs.latents;
    let risk = latents.risk_appetite.unit();
    let stress = latents.stress_reactivity.unit();
    let impulse = latents.impulse_control.unit();
    let senior = inputs.tier == TierBand::Elite || inputs.age >= SENIOR_AGE;
    let avoidant = latents.social_battery < 350 && inputs.traits.agreeableness > 600;

    PressureResponse::ALL
        .iter()
        .map(|&response| {
            let mut w = 1.0;
            match response {
                PressureResponse::Thrives => {
                    if has_role(inputs.roles, "operative") {
                        w += 3.0;
                    }
                    w += 1.6 * risk + 0.6 * (1.0 - stress);
                }
                PressureResponse::Deliberates => {
                    if has_role(inputs.roles, "analyst") {
                        w += 3.0;
                    }
                    w += 0.8 * (1.0 - (risk - 0.5).abs() * 2.0) + 0.5 * impulse;
                }
                PressureResponse::Freezes => {
                    if latents.stress_reactivity > 700 {
                        w += 3.0;
                    }
                    w += 1.4 * (1.0 - risk) + 1.4 * stress;
                }
                PressureResponse::Rushes => {
                    if latents.impulse_control < 400 {
                        w += 2.0;
                    }
                    w += 1.6 * risk + 0.6 * (1.0 - impulse);
                }
                PressureResponse::Delegates => {
                    if senior {
                        w += 2.0;
                    }
                }
                PressureResponse::Avoids => {
                    if avoidant {
                        w += 2.0;
                    }
                    w += 1.4 * (1.0 - risk) + 0.6 * stress;
                }
            }
            let never = match response {
                PressureResponse::Rushes => risk <= NEVER_RUSHES_AT_OR_BELOW,
                PressureResponse::Freezes => risk >= NEVER_FREEZES_AT_OR_ABOVE,
                _ => false,
            };
            Weighted::new(response, if never { 0.0 } else { f64::max(0.0, w) })
        })
        .collect()
}

/// Typical reaction under pressure, from the `pressureResponse` stream.
pub fn compute_pressure_response(rng: &mut FacetRng, inputs: &BehaviorInputs<'_>) -> PressureResponse {
    weighted_pick(rng, &pressure_weights(inputs)).unwrap_or(PressureResponse::Deliberates)
}

pub fn compute_behavior_lens(streams: &mut Streams, inputs: &BehaviorInputs<'_>) -> BehaviorLens {
    let (archetype, reads) = compute_reads(&mut streams.open(Facet::BehaviorLens), inputs);
    let pressure_response = compute_pressure_response(&mut streams.open(Facet::PressureResponse), inputs);
    tracing::debug!(
        archetype = %archetype,
        reads = reads.len(),
        pressure = ?pressure_response,
        "behavior lens computed"
    );
    BehaviorLens {
        archetype,
        reads,
        pressure_response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_model::{Fixed01k, LoyaltyScope};
    use crate::rng::Seed;

    fn ethics() -> Ethics {
        Ethics {
            rule_adherence: Fixed01k::NEUTRAL,
            harm_aversion: Fixed01k::NEUTRAL,
            mission_utilitarianism: Fixed01k::NEUTRAL,
            loyalty_scope: LoyaltyScope::Institution,
        }
    }

    struct Owned {
        vocab: Vocab,
        latents: Latents,
        traits: PsychTraits,
        aptitudes: Aptitudes,
        ethics: Ethics,
        roles: Vec<String>,
    }

    impl Owned {
        fn new() -> Self {
            Self {
                vocab: Vocab::default(),
                latents: Latents::from_fn(|_| Fixed01k::NEUTRAL),
                traits: PsychTraits::default(),
                aptitudes: Aptitudes::default(),
                ethics: ethics(),
                roles: Vec::new(),
            }
        }

        fn inputs(&self) -> BehaviorInputs<'_> {
            BehaviorInputs {
                vocab: &self.vocab,
                latents: &self.latents,
                traits: &self.traits,
                aptitudes: &self.aptitudes,
                ethics: &self.ethics,
                roles: &self.roles,
                tier: TierBand::Middle,
                age: 30,
            }
        }
    }

    #[test]
    fn test_fallback_archetypes_yield_distinct_reads() {
        let owned = Owned::new();
        for i in 0..40 {
            let mut streams = Streams::new(Seed::normalize(&format!("lens-{}", i)));
            let lens = compute_behavior_lens(&mut streams, &owned.inputs());
            assert!(["Psychopath", "Compassionate"].contains(&lens.archetype.as_str()));
            assert!((3..=5).contains(&lens.reads.len()));
            let mut items: Vec<_> = lens.reads.iter().map(|r| r.item.clone()).collect();
            items.sort();
            items.dedup();
            assert_eq!(items.len(), lens.reads.len());
        }
    }

    #[test]
    fn test_first_reads_cover_each_category() {
        let owned = Owned::new();
        let mut rng = Seed::normalize("cats").rng(Facet::BehaviorLens);
        let (_, reads) = compute_reads(&mut rng, &owned.inputs());
        let first: Vec<_> = reads.iter().take(3).map(|r| r.category).collect();
        assert_eq!(
            first,
            vec![
                BehaviorReadCategory::Situation,
                BehaviorReadCategory::Equipment,
                BehaviorReadCategory::Pressure
            ]
        );
    }

    #[test]
    fn test_empathy_favors_compassionate() {
        let mut owned = Owned::new();
        owned.aptitudes.empathy = Fixed01k::new(950);
        owned.traits.agreeableness = Fixed01k::new(950);
        let inputs = owned.inputs();
        assert!(archetype_weight("Compassionate", &inputs) > archetype_weight("Psychopath", &inputs));
        assert!(archetype_weight("Bystander", &inputs) >= MIN_ARCHETYPE_WEIGHT);
    }

    #[test]
    fn test_risk_bands_zero_out_responses() {
        let mut owned = Owned::new();
        owned.latents.risk_appetite = Fixed01k::new(150);
        let weights = pressure_weights(&owned.inputs());
        let rushes = weights.iter().find(|w| w.item == PressureResponse::Rushes).unwrap();
        assert_eq!(rushes.weight, 0.0);

        owned.latents.risk_appetite = Fixed01k::new(900);
        for i in 0..50 {
            let mut rng = Seed::normalize(&format!("bold-{}", i)).rng(Facet::PressureResponse);
            assert_ne!(compute_pressure_response(&mut rng, &owned.inputs()), PressureResponse::Freezes);
        }
    }

    #[test]
    fn test_operative_leans_toward_thriving() {
        let mut owned = Owned::new();
        owned.roles = vec!["operative".into()];
        let weights = pressure_weights(&owned.inputs());
        let thrives = weights.iter().find(|w| w.item == PressureResponse::Thrives).unwrap();
        assert!(weights.iter().all(|w| w.weight <= thrives.weight));
    }
}
