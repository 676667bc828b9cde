//! Narrative layer
//!
//! Three streams in order: `timeline` builds the foundational, template and
//! sampled events; `minorityStatus` draws the minority flags;
//! `timelineGuarantees` runs the guarantee rules and picks the mental-health
//! marker.

pub mod events;
pub mod guarantees;

use agent_model::{
    DiasporaStatus, Fixed01k, Impact, MinorityStatus, Narrative, TierBand, TimelineEvent,
    TimelineEventType,
};
use serde_json::{json, Value};
use std::cell::RefCell;

use crate::config::TimelineConfig;
use crate::facets::has_role;
use crate::rng::{Facet, FacetRng, Streams};
use crate::vocab::Vocab;
use crate::weighted::{weighted_pick, Weighted};
use events::{random_event, template_event, year_between, CHILDHOOD, LATER_LIFE, MID_AGE, YOUNG_ADULT};
use guarantees::{GuaranteeContext, TimelineDraft, TIMELINE_GUARANTEES};

pub mod narrative_constants {
    /// Foundational events added before any sampling.
    pub const FOUNDATIONAL_COUNT: usize = 3;
    /// Each fifteen years of age guarantees one more event.
    pub const YEARS_PER_EVENT: u32 = 15;
    pub const ANY_AGE_CHANCE: f64 = 0.4;
    /// More adversity tags than this make the upbringing negative.
    pub const HARD_UPBRINGING_TAGS: usize = 2;
    pub const NEGATIVE_WEIGHT_SCALE: f64 = 3.0;
    pub const LOCAL_MAJORITY_THRESHOLD: f64 = 0.15;
    pub const VISIBLE_ABROAD: f64 = 0.6;
    pub const VISIBLE_AT_HOME: f64 = 0.1;
    pub const VISIBLE_MAX: f64 = 0.95;
    pub const LINGUISTIC_MIGRANT: f64 = 0.75;
    pub const LINGUISTIC_LOCAL: f64 = 0.08;
    pub const RELIGIOUS_MINORITY: f64 = 0.25;
    /// Negative events needed before a mental-health marker appears.
    pub const MARKER_THRESHOLD: usize = 3;
    pub const MENTAL_HEALTH_MARKERS: [&str; 7] = [
        "anxiety-prone",
        "hypervigilant",
        "trust-issues",
        "emotional-guardedness",
        "resilience-through-adversity",
        "survivor-guilt",
        "chronic-stress",
    ];
    pub const COPING_MECHANISMS: [&str; 9] = [
        "compartmentalization",
        "emotional-suppression",
        "work-immersion",
        "social-withdrawal",
        "humor-deflection",
        "spiritual-faith",
        "physical-exercise",
        "creative-outlet",
        "therapy-engagement",
    ];
}

use narrative_constants::*;

pub struct NarrativeInputs<'a> {
    pub vocab: &'a Vocab,
    pub config: &'a TimelineConfig,
    pub age: u32,
    pub tier: TierBand,
    pub roles: &'a [String],
    pub career: &'a str,
    pub education: &'a str,
    pub home_iso3: &'a str,
    pub current_iso3: &'a str,
    pub diaspora: DiasporaStatus,
    pub adversity: &'a [String],
    pub spirituality: &'a str,
    pub urbanicity: &'a str,
    pub origin_region: Option<&'a str>,
    pub has_family: bool,
    pub security_score: Fixed01k,
    /// Grew up near active armed conflict.
    pub conflict_exposure: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeResult {
    pub narrative: Narrative,
    pub template_count: usize,
    pub negative_cap: usize,
    /// Negative events before the guarantee rules ran.
    pub negative_count: usize,
    pub linguistic_gate: bool,
    pub guarantees_fired: Vec<&'static str>,
    /// Audit notes from the guarantee rules.
    pub notes: Vec<(&'static str, Value)>,
}

/// Extra weight negative events get from living away from home.
pub fn diaspora_adversity_weight(status: DiasporaStatus) -> f64 {
    match status {
        DiasporaStatus::Native => 0.0,
        DiasporaStatus::InternalMigrant => 0.05,
        DiasporaStatus::Expat => 0.10,
        DiasporaStatus::DiasporaChild => 0.15,
        DiasporaStatus::Refugee => 0.25,
    }
}

fn visibility_boost(status: DiasporaStatus) -> f64 {
    match status {
        DiasporaStatus::Refugee => 0.35,
        DiasporaStatus::DiasporaChild => 0.25,
        DiasporaStatus::Expat => 0.15,
        DiasporaStatus::InternalMigrant => 0.05,
        DiasporaStatus::Native => 0.0,
    }
}

fn foundational_events(rng: &mut FacetRng, inputs: &NarrativeInputs<'_>) -> [TimelineEvent; 3] {
    let age = inputs.age;
    let upbringing = TimelineEvent::new(
        0,
        TimelineEventType::Upbringing,
        format!(
            "Grew up in {} {} of {}",
            inputs.urbanicity,
            inputs.origin_region.unwrap_or("region"),
            inputs.home_iso3
        ),
        if inputs.adversity.len() > HARD_UPBRINGING_TAGS {
            Impact::Negative
        } else {
            Impact::Neutral
        },
    );

    let education_year = year_between(rng, 18, 18u32.max(25u32.min(age)), age);
    let education = TimelineEvent::new(
        education_year,
        TimelineEventType::EducationMilestone,
        format!("Completed {} education", inputs.education),
        Impact::Positive,
    );

    let latest_start = 18u32.max(28u32.min(age));
    let job_year = year_between(rng, 22u32.min(latest_start), latest_start, age);
    let job_type = if has_role(inputs.roles, "operative") {
        TimelineEventType::FirstPosting
    } else {
        TimelineEventType::FirstJob
    };
    let first_job = TimelineEvent::new(
        job_year,
        job_type,
        format!("Entered {} career track", inputs.career),
        Impact::Positive,
    );

    [upbringing, education, first_job]
}

fn template_events(rng: &mut FacetRng, vocab: &Vocab, age: u32) -> Vec<TimelineEvent> {
    let pools = &vocab.timeline_templates;
    let mut picked: Vec<TimelineEvent> = [
        (CHILDHOOD, &pools.childhood),
        (YOUNG_ADULT, &pools.young_adult),
        (MID_AGE, &pools.mid_age),
        (LATER_LIFE, &pools.later_life),
    ]
    .into_iter()
    .filter_map(|(stage, templates)| template_event(rng, stage, templates, age))
    .collect();

    if !pools.any_age.is_empty() && age >= 18 && rng.chance(ANY_AGE_CHANCE) {
        if let Some(template) = rng.pick(&pools.any_age) {
            let year = year_between(rng, 18, 18u32.max(age), age);
            picked.push(TimelineEvent::new(
                year,
                template.event_type,
                template.description.clone(),
                template.impact,
            ));
        }
    }
    picked
}

fn negatives(events: &[TimelineEvent]) -> usize {
    events.iter().filter(|e| e.impact == Impact::Negative).count()
}

/// Builds the `timeline` stream part: foundational events, templates, the
/// weighted fill and the adversity guarantee.
fn build_timeline(
    rng: &mut FacetRng,
    inputs: &NarrativeInputs<'_>,
    available: &[TimelineEventType],
) -> (Vec<TimelineEvent>, usize, usize) {
    let config = inputs.config;
    let base = rng.int(config.min_events, config.max_events).max(0) as usize;
    let event_count = base.max((inputs.age / YEARS_PER_EVENT) as usize + FOUNDATIONAL_COUNT);
    let negative_cap = if inputs.tier == TierBand::Elite {
        config.elite_negative_cap
    } else {
        config.negative_cap
    };

    let mut timeline: Vec<TimelineEvent> = foundational_events(rng, inputs).into();
    let templates = template_events(rng, inputs.vocab, inputs.age);
    let template_count = templates.len();
    timeline.extend(templates);

    let adversity_weight = diaspora_adversity_weight(inputs.diaspora);
    let mut remaining_types = available.to_vec();
    let mut negative_count = negatives(&timeline);
    let remaining = event_count.saturating_sub(FOUNDATIONAL_COUNT + template_count);
    for _ in 0..remaining {
        let at_cap = negative_count >= negative_cap;
        let candidates: Vec<Weighted<TimelineEventType>> = remaining_types
            .iter()
            .filter(|t| !(at_cap && t.is_negative()))
            .map(|t| {
                let weight = if t.is_negative() {
                    1.0 + adversity_weight * NEGATIVE_WEIGHT_SCALE
                } else {
                    1.0
                };
                Weighted::new(*t, weight)
            })
            .collect();
        let Some(event_type) = weighted_pick(rng, &candidates) else {
            break;
        };
        remaining_types.retain(|t| *t != event_type);
        let event = random_event(rng, event_type, inputs.age);
        if event.impact == Impact::Negative {
            negative_count += 1;
        }
        timeline.push(event);
    }

    if !inputs.adversity.is_empty() && negative_count == 0 {
        let negative_types: Vec<TimelineEventType> =
            available.iter().copied().filter(|t| t.is_negative()).collect();
        let event_type = rng
            .pick(&negative_types)
            .copied()
            .unwrap_or(TimelineEventType::Failure);
        timeline.push(random_event(rng, event_type, inputs.age));
    }

    timeline.sort_by_key(|e| e.year_offset);
    (timeline, template_count, negative_cap)
}

/// Draws the four flags from the `minorityStatus` stream.
///
/// Returns the flags and whether the local-majority gate cleared the
/// linguistic flag.
fn compute_minority_status(rng: &mut FacetRng, inputs: &NarrativeInputs<'_>) -> (MinorityStatus, bool) {
    let diaspora = inputs.diaspora;
    let abroad = inputs.home_iso3 != inputs.current_iso3;

    let local_majority = diaspora == DiasporaStatus::Native && rng.next01() > LOCAL_MAJORITY_THRESHOLD;

    let base = if abroad { VISIBLE_ABROAD } else { VISIBLE_AT_HOME };
    let visible_minority = rng.next01() < (base + visibility_boost(diaspora)).min(VISIBLE_MAX);

    let native_or_local = matches!(diaspora, DiasporaStatus::Native | DiasporaStatus::InternalMigrant);
    let mut linguistic_minority = if native_or_local {
        abroad || rng.next01() < LINGUISTIC_LOCAL
    } else {
        rng.next01() < LINGUISTIC_MIGRANT
    };

    let gated = local_majority && linguistic_minority;
    if gated {
        linguistic_minority = false;
    }

    let religious_minority = inputs.spirituality != "secular" && rng.next01() < RELIGIOUS_MINORITY;

    (
        MinorityStatus {
            local_majority,
            visible_minority,
            linguistic_minority,
            religious_minority,
        },
        gated,
    )
}

pub fn compute_narrative(streams: &mut Streams, inputs: &NarrativeInputs<'_>) -> NarrativeResult {
    let available: Vec<TimelineEventType> = inputs
        .vocab
        .event_types()
        .iter()
        .copied()
        .filter(|t| events::is_sampleable(*t, inputs.career, inputs.age))
        .collect();

    let (timeline, template_count, negative_cap) =
        build_timeline(&mut streams.open(Facet::Timeline), inputs, &available);
    let negative_count = negatives(&timeline);

    let (minority_status, linguistic_gate) =
        compute_minority_status(&mut streams.open(Facet::MinorityStatus), inputs);

    let context = GuaranteeContext {
        age: inputs.age,
        tier: inputs.tier,
        diaspora: inputs.diaspora,
        career: inputs.career.to_string(),
        adversity: inputs.adversity.to_vec(),
        has_family: inputs.has_family,
        security_score: inputs.security_score,
        conflict_exposure: inputs.conflict_exposure,
        minority: minority_status,
        challenge_types: available
            .iter()
            .copied()
            .filter(|t| t.is_neutral_challenging() || t.is_negative())
            .collect(),
        rng: RefCell::new(streams.open(Facet::TimelineGuarantees)),
    };
    let mut draft = TimelineDraft {
        events: timeline,
        notes: Vec::new(),
    };
    let guarantees_fired = TIMELINE_GUARANTEES.run(&mut draft, &context);

    let (mental_health_marker, coping_mechanism) = if draft.negative_count() >= MARKER_THRESHOLD {
        let mut rng = context.rng.into_inner();
        let marker = rng.pick(&MENTAL_HEALTH_MARKERS).map(|m| m.to_string());
        let coping = rng.pick(&COPING_MECHANISMS).map(|c| c.to_string());
        (marker, coping)
    } else {
        (None, None)
    };

    tracing::debug!(
        events = draft.events.len(),
        templates = template_count,
        guarantees = guarantees_fired.len(),
        marker = mental_health_marker.as_deref().unwrap_or("none"),
        "narrative computed"
    );

    NarrativeResult {
        narrative: Narrative {
            timeline: draft.events,
            minority_status,
            mental_health_marker,
            coping_mechanism,
        },
        template_count,
        negative_cap,
        negative_count,
        linguistic_gate,
        guarantees_fired,
        notes: draft.notes,
    }
}

/// Summary recorded under the `timeline` trace key.
pub fn timeline_summary(result: &NarrativeResult) -> Value {
    json!({
        "eventCount": result.narrative.timeline.len(),
        "templateCount": result.template_count,
        "negativeEventCount": result.negative_count,
        "negativeEventCap": result.negative_cap,
    })
}
