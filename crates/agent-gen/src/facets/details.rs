//! Idiosyncratic details
//!
//! Eleven category pools, each merged from one primary and a few secondary
//! vocab lists and weighted by latents and traits. A physical and a routine
//! detail are always taken first when available.

use agent_model::{Aptitudes, DetailCategory, DetailItem, Latents, PsychTraits};

use crate::rng::FacetRng;
use crate::vocab::Vocab;
use crate::weighted::{unique, weighted_pick, Weighted};

pub mod detail_constants {
    pub const MIN_DETAILS: i32 = 3;
    pub const MAX_DETAILS: i32 = 5;
}

use detail_constants::*;

struct DetailPool {
    category: DetailCategory,
    items: Vec<String>,
    weight: f64,
}

fn merged(lists: &[&Vec<String>]) -> Vec<String> {
    let all: Vec<String> = lists.iter().flat_map(|l| l.iter().cloned()).collect();
    unique(&all)
}

fn detail_pools(
    vocab: &Vocab,
    latents: &Latents,
    traits: &PsychTraits,
    aptitudes: &Aptitudes,
) -> Vec<DetailPool> {
    let d = &vocab.detail_generation;
    let cons = traits.conscientiousness.unit();
    let social = latents.social_battery.unit();
    let stress = latents.stress_reactivity.unit();
    let opsec = latents.opsec_discipline.unit();
    let empathy = aptitudes.empathy.unit();

    let pools = [
        (
            DetailCategory::Physical,
            merged(&[
                &d.physical_features,
                &d.body_language,
                &d.gait,
                &d.chronic_conditions,
                &d.medication_dependencies,
            ]),
            1.1 + 0.2 * (1.0 - stress),
        ),
        (
            DetailCategory::Routine,
            merged(&[&d.morning_rituals, &d.work_habits, &d.evening_routines]),
            0.9 + 0.5 * cons,
        ),
        (
            DetailCategory::Social,
            merged(&[&d.communication_patterns, &d.interaction_styles]),
            0.8 + 0.5 * social + 0.2 * empathy,
        ),
        (
            DetailCategory::Food,
            merged(&[&d.eating_habits, &d.drinking_preferences]),
            0.7 + 0.2 * (1.0 - cons),
        ),
        (
            DetailCategory::Psychological,
            merged(&[
                &d.specific_phobias,
                &d.abstract_fears,
                &d.stress_responses,
                &d.self_soothing_behaviors,
            ]),
            0.8 + 0.6 * stress,
        ),
        (
            DetailCategory::History,
            merged(&[&d.kept_objects, &d.lost_objects, &d.trauma_markers, &d.joy_markers]),
            0.8 + 0.2 * empathy,
        ),
        (
            DetailCategory::Tradition,
            merged(&[
                &d.family_rituals,
                &d.cultural_practices,
                &d.personal_superstitions,
                &d.acquired_superstitions,
            ]),
            0.75 + 0.2 * (1.0 - social),
        ),
        (
            DetailCategory::Speech,
            merged(&[
                &d.filler_patterns,
                &d.language_mixing,
                &d.catchphrases_original,
                &d.catchphrases_inherited,
            ]),
            0.7 + 0.3 * social,
        ),
        (
            DetailCategory::Environment,
            merged(&[&d.space_preferences, &d.territory_marking, &d.weather_responses]),
            0.7 + 0.2 * (1.0 - social),
        ),
        (
            DetailCategory::Relationship,
            merged(&[&d.attachment_methods, &d.conflict_patterns]),
            0.75 + 0.3 * empathy,
        ),
        (
            DetailCategory::Hidden,
            merged(&[&d.secret_skills, &d.secret_connections]),
            0.6 + 0.5 * opsec,
        ),
    ];

    pools
        .into_iter()
        .filter(|(_, items, _)| !items.is_empty())
        .map(|(category, items, weight)| DetailPool {
            category,
            items,
            weight,
        })
        .collect()
}

/// Draws three to five details from the `detailGeneration` stream.
pub fn compute_details(
    rng: &mut FacetRng,
    vocab: &Vocab,
    latents: &Latents,
    traits: &PsychTraits,
    aptitudes: &Aptitudes,
) -> Vec<DetailItem> {
    let pools = detail_pools(vocab, latents, traits, aptitudes);

    // Each item is offered once, under the first category that lists it.
    let mut remaining: Vec<Weighted<DetailItem>> = Vec::new();
    for pool in &pools {
        for item in pool.items.iter().filter(|i| !i.is_empty()) {
            if remaining.iter().any(|c| &c.item.item == item) {
                continue;
            }
            let detail = DetailItem {
                category: pool.category,
                item: item.clone(),
            };
            remaining.push(Weighted::new(detail, pool.weight));
        }
    }

    let target = rng.int(MIN_DETAILS, MAX_DETAILS) as usize;
    let mut picks: Vec<DetailItem> = Vec::new();

    for category in [DetailCategory::Physical, DetailCategory::Routine] {
        if picks.len() >= target {
            break;
        }
        let Some(pool) = pools.iter().find(|p| p.category == category) else {
            continue;
        };
        let available: Vec<&String> = pool
            .items
            .iter()
            .filter(|i| !picks.iter().any(|p| &p.item == *i))
            .collect();
        if let Some(item) = rng.pick(&available) {
            remaining.retain(|c| &c.item.item != *item);
            picks.push(DetailItem {
                category,
                item: (*item).clone(),
            });
        }
    }

    while picks.len() < target {
        let Some(detail) = weighted_pick(rng, &remaining) else {
            break;
        };
        remaining.retain(|c| c.item.item != detail.item);
        picks.push(detail);
    }

    tracing::debug!(
        pools = pools.len(),
        details = picks.len(),
        "details computed"
    );
    picks
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_model::Fixed01k;
    use crate::rng::{Facet, Seed};

    fn vocab() -> Vocab {
        let mut vocab = Vocab::default();
        let d = &mut vocab.detail_generation;
        d.physical_features = vec!["scar on chin".into(), "broken nose".into()];
        d.gait = vec!["limps slightly".into()];
        d.morning_rituals = vec!["cold shower".into()];
        d.work_habits = vec!["color-coded notes".into(), "scar on chin".into()];
        d.eating_habits = vec!["eats standing up".into()];
        d.secret_skills = vec!["reads lips".into()];
        d.family_rituals = vec!["sunday calls home".into()];
        vocab
    }

    fn run(seed: &str, vocab: &Vocab) -> Vec<DetailItem> {
        let latents = Latents::from_fn(|_| Fixed01k::NEUTRAL);
        let mut rng = Seed::normalize(seed).rng(Facet::DetailGeneration);
        compute_details(&mut rng, vocab, &latents, &PsychTraits::default(), &Aptitudes::default())
    }

    #[test]
    fn test_physical_then_routine_first() {
        let vocab = vocab();
        for i in 0..30 {
            let details = run(&format!("det-{}", i), &vocab);
            assert!((3..=5).contains(&details.len()));
            assert_eq!(details[0].category, DetailCategory::Physical);
            assert_eq!(details[1].category, DetailCategory::Routine);
        }
    }

    #[test]
    fn test_items_never_repeat() {
        let vocab = vocab();
        for i in 0..30 {
            let details = run(&format!("uniq-{}", i), &vocab);
            let mut items: Vec<_> = details.iter().map(|d| d.item.as_str()).collect();
            items.sort();
            items.dedup();
            assert_eq!(items.len(), details.len());
        }
    }

    #[test]
    fn test_empty_vocab_yields_no_details() {
        assert!(run("empty", &Vocab::default()).is_empty());
    }
}
