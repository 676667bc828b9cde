//! Event builders and description tables

use agent_model::{Impact, TimelineEvent, TimelineEventType};

use crate::rng::FacetRng;
use crate::vocab::TimelineTemplate;

/// Career-dependent events are not sampled before this age.
pub const CAREER_START_AGE: u32 = 22;
/// Adult events are not sampled before this age.
pub const ADULT_AGE: u32 = 18;
const FALLBACK_DESCRIPTION: &str = "Significant event occurred";

/// Draws a year in `[min, max]`, never past the agent's current age.
pub fn year_between(rng: &mut FacetRng, min: u32, max: u32, age: u32) -> u32 {
    (rng.int(min as i32, max as i32).max(0) as u32).min(age)
}

/// Fixed impact for good and bad events; everything else is mostly neutral.
pub fn determine_impact(rng: &mut FacetRng, event_type: TimelineEventType) -> Impact {
    if event_type.is_positive() {
        Impact::Positive
    } else if event_type.is_negative() {
        Impact::Negative
    } else if rng.chance(0.3) {
        Impact::Mixed
    } else {
        Impact::Neutral
    }
}

pub fn descriptions(event_type: TimelineEventType) -> &'static [&'static str] {
    use TimelineEventType::*;
    match event_type {
        Promotion => &[
            "Advanced to senior role",
            "Recognized for exceptional work",
            "Given increased responsibilities",
        ],
        Success => &[
            "Key operation succeeded",
            "Major analysis proved correct",
            "Negotiation breakthrough",
        ],
        Mentorship => &[
            "Found a guiding figure",
            "Taken under experienced wing",
            "Critical guidance received",
        ],
        Scandal => &[
            "Narrowly avoided exposure",
            "Implicated in internal affair",
            "Reputation challenged",
        ],
        Injury => &["Sustained field injury", "Operational accident", "Health crisis"],
        Burnout => &[
            "Hit the wall professionally",
            "Needed extended leave",
            "Rebuilt from exhaustion",
        ],
        Betrayal => &[
            "Trusted colleague turned",
            "Discovered deception",
            "Asset compromised",
        ],
        MoralInjury => &[
            "Crossed a personal line",
            "Witnessed something unforgivable",
            "Questioned everything",
        ],
        Failure => &[
            "Operation went wrong",
            "Analysis proved faulty",
            "Missed critical signals",
        ],
        Loss => &["Lost someone close", "Witnessed tragedy", "Personal devastation"],
        Romantic => &[
            "Significant relationship began",
            "Found unexpected connection",
            "Personal life shifted",
        ],
        CareerBreak => &[
            "Took time away",
            "Reassessed priorities",
            "Stepped back temporarily",
        ],
        FamilyCrisis => &[
            "Family needed attention",
            "Personal obligations intervened",
            "Home front demanded focus",
        ],
        Recruitment => &[
            "Brought into sensitive program",
            "Selected for special assignment",
            "Noticed by key figures",
        ],
        SecurityIncident => &[
            "Security breach occurred",
            "Cover nearly blown",
            "Operational security compromised",
        ],
        DefectionAttempt => &[
            "Approached by other side",
            "Loyalty tested",
            "Turned away overture",
        ],
        _ => &[FALLBACK_DESCRIPTION],
    }
}

/// Flavored events per career track.
pub const CAREER_EVENTS: [(&str, &[(TimelineEventType, [&str; 3])]); 4] = [
    (
        "military",
        &[
            (
                TimelineEventType::Deployment,
                [
                    "Deployed to active zone",
                    "Served in peacekeeping mission",
                    "Combat tour completed",
                ],
            ),
            (
                TimelineEventType::Success,
                [
                    "Distinguished service recognized",
                    "Unit citation earned",
                    "Mission accomplished under fire",
                ],
            ),
            (
                TimelineEventType::Injury,
                ["Wounded in action", "Training accident", "Combat injury sustained"],
            ),
        ],
    ),
    (
        "intelligence",
        &[
            (
                TimelineEventType::Recruitment,
                [
                    "Recruited high-value asset",
                    "Turned key informant",
                    "Built critical network",
                ],
            ),
            (
                TimelineEventType::Success,
                [
                    "Operation yielded intelligence gold",
                    "Analysis prevented crisis",
                    "Cover operation succeeded",
                ],
            ),
            (
                TimelineEventType::Betrayal,
                ["Asset turned double", "Network compromised", "Trust was misplaced"],
            ),
        ],
    ),
    (
        "foreign-service",
        &[
            (
                TimelineEventType::Success,
                [
                    "Treaty negotiation breakthrough",
                    "Crisis mediation succeeded",
                    "Diplomatic incident defused",
                ],
            ),
            (
                TimelineEventType::CareerBreak,
                [
                    "Posted to hardship duty",
                    "Recall and reassignment",
                    "Medical evacuation",
                ],
            ),
        ],
    ),
    (
        "academia",
        &[
            (
                TimelineEventType::Success,
                ["Major publication accepted", "Research breakthrough", "Tenure achieved"],
            ),
            (
                TimelineEventType::Failure,
                ["Grant rejected", "Research disputed", "Publication retracted"],
            ),
            (
                TimelineEventType::Mentorship,
                [
                    "Found academic mentor",
                    "Joined research network",
                    "Thesis advisor guidance",
                ],
            ),
        ],
    ),
];

pub fn career_events(career: &str) -> Option<&'static [(TimelineEventType, [&'static str; 3])]> {
    CAREER_EVENTS
        .iter()
        .find(|(track, _)| *track == career)
        .map(|(_, events)| *events)
}

/// Event types that only careers listed here may sample.
const CAREER_RESTRICTED: [(&str, &[TimelineEventType]); 2] = [
    (
        "intelligence",
        &[
            TimelineEventType::Recruitment,
            TimelineEventType::DefectionAttempt,
            TimelineEventType::SecurityIncident,
        ],
    ),
    (
        "foreign-service",
        &[TimelineEventType::Recruitment, TimelineEventType::DefectionAttempt],
    ),
];

/// Whether an event type may be sampled for this career and age.
pub fn is_sampleable(event_type: TimelineEventType, career: &str, age: u32) -> bool {
    if event_type.is_foundational() {
        return false;
    }
    let restricted = CAREER_RESTRICTED
        .iter()
        .any(|(_, types)| types.contains(&event_type));
    if restricted {
        let allowed = CAREER_RESTRICTED
            .iter()
            .any(|(track, types)| *track == career && types.contains(&event_type));
        if !allowed {
            return false;
        }
    }
    event_type.min_age().map_or(true, |min| age >= min)
}

/// A sampled event: description, then year, then impact.
pub fn random_event(rng: &mut FacetRng, event_type: TimelineEventType, age: u32) -> TimelineEvent {
    let options = descriptions(event_type);
    let index = rng.int(0, options.len() as i32 - 1) as usize;
    let description = options.get(index).copied().unwrap_or(FALLBACK_DESCRIPTION);

    let min_age = if event_type.is_career_dependent() {
        CAREER_START_AGE.min(age)
    } else {
        ADULT_AGE.min(age)
    };
    let year_offset = year_between(rng, min_age, (min_age + 1).max(age), age);
    let impact = determine_impact(rng, event_type);
    TimelineEvent::new(year_offset, event_type, description, impact)
}

/// Age window of each template stage.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub min: u32,
    pub max: u32,
}

pub const CHILDHOOD: Stage = Stage { min: 4, max: 16 };
pub const YOUNG_ADULT: Stage = Stage { min: 18, max: 30 };
pub const MID_AGE: Stage = Stage { min: 31, max: 55 };
pub const LATER_LIFE: Stage = Stage { min: 56, max: 90 };

/// Picks a template for a stage the agent has reached.
pub fn template_event(
    rng: &mut FacetRng,
    stage: Stage,
    templates: &[TimelineTemplate],
    age: u32,
) -> Option<TimelineEvent> {
    if templates.is_empty() || age < stage.min {
        return None;
    }
    let max = age.min(stage.max);
    let min = stage.min.min(max);
    let year_offset = year_between(rng, min, max, age);
    let template = rng.pick(templates)?;
    Some(TimelineEvent::new(
        year_offset,
        template.event_type,
        template.description.clone(),
        template.impact,
    ))
}

pub fn mentions_any(event: &TimelineEvent, fragments: &[&str]) -> bool {
    crate::facets::mentions(&event.description, fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{Facet, Seed};

    #[test]
    fn test_restricted_events_follow_career() {
        let recruitment = TimelineEventType::Recruitment;
        assert!(is_sampleable(recruitment, "intelligence", 40));
        assert!(is_sampleable(recruitment, "foreign-service", 40));
        assert!(!is_sampleable(recruitment, "law", 40));
        assert!(!is_sampleable(TimelineEventType::SecurityIncident, "foreign-service", 40));
    }

    #[test]
    fn test_age_gates_and_foundational_types() {
        assert!(!is_sampleable(TimelineEventType::Promotion, "law", 24));
        assert!(is_sampleable(TimelineEventType::Promotion, "law", 25));
        assert!(!is_sampleable(TimelineEventType::Upbringing, "law", 50));
        assert!(is_sampleable(TimelineEventType::Failure, "law", 10));
    }

    #[test]
    fn test_random_events_never_pass_current_age() {
        for i in 0..200 {
            let mut rng = Seed::normalize(&format!("evt-{}", i)).rng(Facet::Timeline);
            let age = (i % 40) as u32;
            let event = random_event(&mut rng, TimelineEventType::Burnout, age);
            assert!(event.year_offset <= age);
            assert_eq!(event.impact, Impact::Negative);
        }
    }

    #[test]
    fn test_template_needs_stage_reached() {
        let templates = vec![TimelineTemplate {
            event_type: TimelineEventType::Success,
            description: "Won a regional prize".into(),
            impact: Impact::Positive,
        }];
        let mut rng = Seed::normalize("tpl").rng(Facet::Timeline);
        assert!(template_event(&mut rng, MID_AGE, &templates, 30).is_none());
        let event = template_event(&mut rng, MID_AGE, &templates, 40).unwrap();
        assert!((31..=40).contains(&event.year_offset));
    }
}
