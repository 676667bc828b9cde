//! Timeline guarantee rules
//!
//! Ordered rules that inject events so the timeline agrees with the other
//! facets. Each rule is independent and additive; every insertion keeps the
//! timeline sorted by year. All draws come from the `timelineGuarantees`
//! stream, which the rule predicates may also consume for chance checks.

use agent_model::{
    DiasporaStatus, Fixed01k, Impact, MinorityStatus, TierBand, TimelineEvent, TimelineEventType,
};
use serde_json::{json, Value};
use std::cell::RefCell;

use super::events::{career_events, determine_impact, mentions_any, random_event, year_between};
use crate::constraints::{ConstraintPipeline, Rule};
use crate::rng::FacetRng;

pub mod guarantee_constants {
    /// Below this security score the environment counts as insecure.
    pub const INSECURE_BELOW: i32 = 400;
    pub const PERSECUTION_CHANCE: f64 = 0.6;
    pub const YOUNG_ELITE_AGE: u32 = 35;
    pub const CAREER_EVENT_MIN_AGE: u32 = 25;
    pub const GRIEF_MIN_AGE: u32 = 40;
    pub const GRIEF_BASE_CHANCE: f64 = 0.3;
    pub const GRIEF_CHANCE_PER_YEAR: f64 = 0.01;
    /// Adversity tag that does not count as adversity for discrimination.
    pub const STABLE_UPBRINGING: &str = "stable-upbringing";
}

use guarantee_constants::*;

/// The timeline under construction plus notes for audit.
#[derive(Debug, Default)]
pub struct TimelineDraft {
    pub events: Vec<TimelineEvent>,
    pub notes: Vec<(&'static str, Value)>,
}

impl TimelineDraft {
    pub fn insert(&mut self, event: TimelineEvent) {
        self.events.push(event);
        self.events.sort_by_key(|e| e.year_offset);
    }

    fn any(&self, predicate: impl Fn(&TimelineEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }

    pub fn negative_count(&self) -> usize {
        self.events.iter().filter(|e| e.impact == Impact::Negative).count()
    }
}

/// Inputs of the guarantee rules. Owns its stream so predicates can draw.
pub struct GuaranteeContext {
    pub age: u32,
    pub tier: TierBand,
    pub diaspora: DiasporaStatus,
    pub career: String,
    pub adversity: Vec<String>,
    pub has_family: bool,
    pub security_score: Fixed01k,
    pub conflict_exposure: bool,
    pub minority: MinorityStatus,
    /// Sampleable neutral-challenging and negative event types.
    pub challenge_types: Vec<TimelineEventType>,
    pub rng: RefCell<FacetRng>,
}

impl GuaranteeContext {
    fn pick_line(&self, lines: &[&'static str]) -> &'static str {
        let index = self.rng.borrow_mut().int(0, lines.len() as i32 - 1) as usize;
        lines.get(index).copied().unwrap_or_default()
    }

    fn year(&self, min: u32, max: u32) -> u32 {
        year_between(&mut self.rng.borrow_mut(), min, max, self.age)
    }

    fn chance(&self, p: f64) -> bool {
        self.rng.borrow_mut().chance(p)
    }

    fn has_adversity(&self) -> bool {
        !self.adversity.is_empty() && !self.adversity.iter().all(|t| t == STABLE_UPBRINGING)
    }

    fn grief_chance(&self) -> f64 {
        GRIEF_BASE_CHANCE + f64::from(self.age.saturating_sub(GRIEF_MIN_AGE)) * GRIEF_CHANCE_PER_YEAR
    }
}

const REFUGEE_TRAUMA: [(TimelineEventType, [&str; 3]); 3] = [
    (
        TimelineEventType::Loss,
        [
            "Lost home and community to displacement",
            "Family separated during flight",
            "Witnessed tragedy during exodus",
        ],
    ),
    (
        TimelineEventType::Injury,
        [
            "Injured during displacement",
            "Health crisis during refugee journey",
            "Trauma from dangerous crossing",
        ],
    ),
    (
        TimelineEventType::MoralInjury,
        [
            "Witnessed violence during displacement",
            "Forced to make impossible choices",
            "Experienced persecution firsthand",
        ],
    ),
];

const ACHIEVEMENT_LINES: [&str; 4] = [
    "Early recognition for exceptional talent",
    "Fast-tracked through the ranks",
    "Distinguished achievement at young age",
    "Noticed by key decision-makers",
];

const CONFLICT_LINES: [&str; 4] = [
    "Lived through regional conflict",
    "Childhood shaped by nearby war",
    "Community affected by violence",
    "Witnessed effects of armed conflict",
];

const GRIEF_LINES: [&str; 4] = [
    "Lost a parent after long illness",
    "Mourned passing of elder family member",
    "Family crisis required extended leave",
    "Dealt with unexpected family loss",
];

const DISCRIMINATION_LINES: [&str; 4] = [
    "Faced systemic barriers due to background",
    "Experienced professional discrimination",
    "Overcame prejudice in advancement",
    "Navigated bias in institutional setting",
];

const CONFLICT_WORDS: [&str; 3] = ["conflict", "war", "displacement"];
const CONFLICT_EVENT_WORDS: [&str; 4] = ["conflict", "war", "displacement", "violence"];
const DISCRIMINATION_WORDS: [&str; 4] = ["discrimination", "persecution", "prejudice", "bias"];

fn has_career_flavor(draft: &TimelineDraft, career: &str) -> bool {
    let Some(pool) = career_events(career) else {
        return false;
    };
    draft.any(|e| {
        pool.iter()
            .filter(|(t, _)| *t == e.event_type)
            .flat_map(|(_, lines)| lines.iter())
            .any(|line| {
                let first = line.split(' ').next().unwrap_or_default();
                e.description.contains(first)
            })
    })
}

pub static TIMELINE_GUARANTEES: ConstraintPipeline<TimelineDraft, GuaranteeContext> =
    ConstraintPipeline::new(&[
        Rule {
            name: "visible_minority_challenge",
            applies: |d, c| {
                let mut rest = d.events.iter().filter(|e| !e.event_type.is_foundational()).peekable();
                let all_positive = rest.peek().is_some() && rest.all(|e| e.impact == Impact::Positive);
                c.minority.visible_minority && all_positive && !c.challenge_types.is_empty()
            },
            apply: |d, c| {
                let mut rng = c.rng.borrow_mut();
                let Some(&event_type) = rng.pick(&c.challenge_types) else {
                    return;
                };
                let mut event = random_event(&mut rng, event_type, c.age);
                drop(rng);
                if event.impact == Impact::Negative {
                    event.impact = Impact::Mixed;
                }
                d.insert(event);
            },
        },
        Rule {
            name: "religious_persecution",
            applies: |_, c| {
                c.minority.religious_minority
                    && c.security_score < INSECURE_BELOW
                    && c.chance(PERSECUTION_CHANCE)
            },
            apply: |d, c| {
                let year = c.year(c.age.saturating_sub(20).max(10), c.age);
                d.insert(TimelineEvent::new(
                    year,
                    TimelineEventType::MoralInjury,
                    "Faced religious persecution or discrimination",
                    Impact::Negative,
                ));
            },
        },
        Rule {
            name: "refugee_trauma",
            applies: |d, c| {
                c.diaspora == DiasporaStatus::Refugee && !d.any(|e| e.event_type.is_traumatic())
            },
            apply: |d, c| {
                let index = c.rng.borrow_mut().int(0, REFUGEE_TRAUMA.len() as i32 - 1) as usize;
                let (event_type, lines) = REFUGEE_TRAUMA[index.min(REFUGEE_TRAUMA.len() - 1)];
                let year = c.year(c.age.saturating_sub(25).max(5), c.age.saturating_sub(5).max(6));
                let line = c.pick_line(&lines);
                d.insert(TimelineEvent::new(year, event_type, line, Impact::Negative));
                d.notes.push(("refugeeTrauma", json!({ "added": true, "type": event_type })));
            },
        },
        Rule {
            name: "young_elite_achievement",
            applies: |d, c| {
                c.tier == TierBand::Elite
                    && c.age < YOUNG_ELITE_AGE
                    && !d.any(|e| e.event_type.is_achievement())
            },
            apply: |d, c| {
                let year = c.year(c.age.saturating_sub(10).max(20), c.age);
                let line = c.pick_line(&ACHIEVEMENT_LINES);
                d.insert(TimelineEvent::new(year, TimelineEventType::Success, line, Impact::Positive));
                d.notes.push(("youngEliteAchievement", json!({ "added": true })));
            },
        },
        Rule {
            name: "conflict_exposure",
            applies: |d, c| {
                let exposed = c.conflict_exposure
                    || c.adversity.iter().any(|t| CONFLICT_WORDS.iter().any(|w| t.contains(w)));
                exposed && !d.any(|e| mentions_any(e, &CONFLICT_EVENT_WORDS))
            },
            apply: |d, c| {
                let year = c.year(c.age.saturating_sub(30).max(5), c.age.saturating_sub(5).max(10));
                let line = c.pick_line(&CONFLICT_LINES);
                d.insert(TimelineEvent::new(year, TimelineEventType::MoralInjury, line, Impact::Negative));
                d.notes.push(("conflictExposure", json!({ "added": true })));
            },
        },
        Rule {
            name: "career_flavor",
            applies: |d, c| {
                career_events(&c.career).is_some()
                    && c.age >= CAREER_EVENT_MIN_AGE
                    && !has_career_flavor(d, &c.career)
            },
            apply: |d, c| {
                let Some(pool) = career_events(&c.career) else {
                    return;
                };
                let index = c.rng.borrow_mut().int(0, pool.len() as i32 - 1) as usize;
                let Some((event_type, lines)) = pool.get(index) else {
                    return;
                };
                let year = c.year(c.age.saturating_sub(15).max(23), c.age);
                let line = c.pick_line(lines);
                let impact = determine_impact(&mut c.rng.borrow_mut(), *event_type);
                d.insert(TimelineEvent::new(year, *event_type, line, impact));
                d.notes.push((
                    "careerEvent",
                    json!({ "added": true, "career": c.career, "type": event_type }),
                ));
            },
        },
        Rule {
            name: "family_grief",
            applies: |d, c| {
                c.has_family
                    && c.age > GRIEF_MIN_AGE
                    && !d.any(|e| e.event_type.is_grief())
                    && c.chance(c.grief_chance())
            },
            apply: |d, c| {
                let year = c.year(c.age.saturating_sub(15).max(30), c.age);
                let line = c.pick_line(&GRIEF_LINES);
                d.insert(TimelineEvent::new(year, TimelineEventType::Loss, line, Impact::Negative));
                d.notes.push((
                    "familyGrief",
                    json!({ "added": true, "probability": c.grief_chance() }),
                ));
            },
        },
        Rule {
            name: "minority_discrimination",
            applies: |d, c| {
                c.minority.any()
                    && c.has_adversity()
                    && !d.any(|e| mentions_any(e, &DISCRIMINATION_WORDS))
            },
            apply: |d, c| {
                let year = c.year(c.age.saturating_sub(20).max(18), c.age);
                let line = c.pick_line(&DISCRIMINATION_LINES);
                d.insert(TimelineEvent::new(year, TimelineEventType::MoralInjury, line, Impact::Negative));
                d.notes.push((
                    "minorityDiscrimination",
                    json!({ "added": true, "isMinority": true, "hasAdversityTag": true }),
                ));
            },
        },
    ]);
