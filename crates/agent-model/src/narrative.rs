//! Biographical timeline and minority-status flags
//!
//! Event types are grouped into overlapping sets (positive, negative,
//! foundational, traumatic, ...) that the narrative guarantee rules query.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of life event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimelineEventType {
    Upbringing,
    EducationMilestone,
    FirstJob,
    FirstPosting,
    Promotion,
    CareerBreak,
    Scandal,
    Injury,
    Burnout,
    FamilyCrisis,
    Mentorship,
    Betrayal,
    MoralInjury,
    Success,
    Failure,
    Recruitment,
    DefectionAttempt,
    SecurityIncident,
    Romantic,
    Loss,
    /// Only produced by career-flavored events.
    Deployment,
}

impl TimelineEventType {
    /// The default pool of randomly sampled event types.
    pub const DEFAULTS: [TimelineEventType; 20] = [
        TimelineEventType::Upbringing,
        TimelineEventType::EducationMilestone,
        TimelineEventType::FirstJob,
        TimelineEventType::FirstPosting,
        TimelineEventType::Promotion,
        TimelineEventType::CareerBreak,
        TimelineEventType::Scandal,
        TimelineEventType::Injury,
        TimelineEventType::Burnout,
        TimelineEventType::FamilyCrisis,
        TimelineEventType::Mentorship,
        TimelineEventType::Betrayal,
        TimelineEventType::MoralInjury,
        TimelineEventType::Success,
        TimelineEventType::Failure,
        TimelineEventType::Recruitment,
        TimelineEventType::DefectionAttempt,
        TimelineEventType::SecurityIncident,
        TimelineEventType::Romantic,
        TimelineEventType::Loss,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimelineEventType::Upbringing => "upbringing",
            TimelineEventType::EducationMilestone => "education-milestone",
            TimelineEventType::FirstJob => "first-job",
            TimelineEventType::FirstPosting => "first-posting",
            TimelineEventType::Promotion => "promotion",
            TimelineEventType::CareerBreak => "career-break",
            TimelineEventType::Scandal => "scandal",
            TimelineEventType::Injury => "injury",
            TimelineEventType::Burnout => "burnout",
            TimelineEventType::FamilyCrisis => "family-crisis",
            TimelineEventType::Mentorship => "mentorship",
            TimelineEventType::Betrayal => "betrayal",
            TimelineEventType::MoralInjury => "moral-injury",
            TimelineEventType::Success => "success",
            TimelineEventType::Failure => "failure",
            TimelineEventType::Recruitment => "recruitment",
            TimelineEventType::DefectionAttempt => "defection-attempt",
            TimelineEventType::SecurityIncident => "security-incident",
            TimelineEventType::Romantic => "romantic",
            TimelineEventType::Loss => "loss",
            TimelineEventType::Deployment => "deployment",
        }
    }

    pub fn is_positive(self) -> bool {
        use TimelineEventType::*;
        matches!(self, Success | Promotion | Mentorship | Recruitment | Romantic)
    }

    pub fn is_negative(self) -> bool {
        use TimelineEventType::*;
        matches!(
            self,
            Scandal | Injury | Burnout | Betrayal | MoralInjury | Failure | Loss | SecurityIncident
        )
    }

    /// Neither good nor bad, but hard going.
    pub fn is_neutral_challenging(self) -> bool {
        matches!(self, TimelineEventType::CareerBreak | TimelineEventType::FamilyCrisis)
    }

    pub fn is_foundational(self) -> bool {
        use TimelineEventType::*;
        matches!(self, Upbringing | EducationMilestone | FirstJob | FirstPosting)
    }

    pub fn is_traumatic(self) -> bool {
        use TimelineEventType::*;
        matches!(self, Loss | Injury | MoralInjury | Betrayal | SecurityIncident)
    }

    pub fn is_achievement(self) -> bool {
        use TimelineEventType::*;
        matches!(self, Success | Promotion | Recruitment | Mentorship)
    }

    pub fn is_grief(self) -> bool {
        matches!(self, TimelineEventType::Loss | TimelineEventType::FamilyCrisis)
    }

    /// Events that presuppose an employment context.
    pub fn is_career_dependent(self) -> bool {
        use TimelineEventType::*;
        matches!(
            self,
            Promotion
                | Burnout
                | Mentorship
                | Betrayal
                | MoralInjury
                | Recruitment
                | DefectionAttempt
                | SecurityIncident
        )
    }

    /// Minimum age at which the event may be sampled.
    pub fn min_age(self) -> Option<u32> {
        use TimelineEventType::*;
        match self {
            Promotion | CareerBreak | DefectionAttempt => Some(25),
            Romantic => Some(18),
            Loss => Some(16),
            Burnout | Recruitment | SecurityIncident => Some(22),
            Mentorship | Betrayal | MoralInjury => Some(20),
            _ => None,
        }
    }
}

impl fmt::Display for TimelineEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

/// One dated life event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// Years since birth.
    pub year_offset: u32,
    #[serde(rename = "type")]
    pub event_type: TimelineEventType,
    pub description: String,
    pub impact: Impact,
}

impl TimelineEvent {
    pub fn new(
        year_offset: u32,
        event_type: TimelineEventType,
        description: impl Into<String>,
        impact: Impact,
    ) -> Self {
        Self {
            year_offset,
            event_type,
            description: description.into(),
            impact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinorityStatus {
    /// Majority in their current location.
    pub local_majority: bool,
    pub visible_minority: bool,
    /// Primary language differs from the locale.
    pub linguistic_minority: bool,
    pub religious_minority: bool,
}

impl MinorityStatus {
    pub fn any(&self) -> bool {
        self.visible_minority || self.linguistic_minority || self.religious_minority
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    pub timeline: Vec<TimelineEvent>,
    pub minority_status: MinorityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mental_health_marker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coping_mechanism: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_sets_are_consistent() {
        for t in TimelineEventType::DEFAULTS {
            assert!(!(t.is_positive() && t.is_negative()), "{} in both sets", t);
            if t.is_traumatic() {
                assert!(t.is_negative(), "{} is traumatic but not negative", t);
            }
            if t.is_foundational() {
                assert!(t.min_age().is_none());
            }
        }
    }

    #[test]
    fn test_event_type_serde_names() {
        for t in TimelineEventType::DEFAULTS {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn test_event_serializes_type_key() {
        let event = TimelineEvent::new(12, TimelineEventType::Loss, "Lost someone close", Impact::Negative);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "loss");
        assert_eq!(json["yearOffset"], 12);
    }
}
