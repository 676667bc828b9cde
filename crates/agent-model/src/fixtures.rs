//! Sample data fixtures for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! ```ignore
//! // [dev-dependencies]
//! // agent-model = { path = "../agent-model", features = ["test-fixtures"] }
//!
//! let agent = agent_model::fixtures::sample_agent();
//! ```

use crate::GeneratedAgent;

/// Raw JSON of the sample agent, for schema-shape comparisons.
pub fn sample_agent_json() -> &'static str {
    include_str!("../tests/fixtures/sample_agent.json")
}

/// Returns a fully populated sample agent.
///
/// A middle-tier analyst from Portugal with one red line, a short
/// timeline and no trace.
pub fn sample_agent() -> GeneratedAgent {
    GeneratedAgent::from_json(sample_agent_json()).expect("Failed to parse sample_agent.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TierBand, TimelineEventType};

    #[test]
    fn test_sample_agent_loads() {
        let agent = sample_agent();
        assert_eq!(agent.identity.tier_band, TierBand::Middle);
        assert_eq!(agent.identity.home_country_iso3, "PRT");
        assert!(agent.generation_trace.is_none());
        assert_eq!(agent.logistics.identity_kit.len(), 5);
    }

    #[test]
    fn test_sample_timeline_is_sorted_with_foundations() {
        let agent = sample_agent();
        let timeline = &agent.narrative.timeline;
        assert!(timeline.windows(2).all(|w| w[0].year_offset <= w[1].year_offset));
        assert!(timeline.iter().any(|e| e.event_type == TimelineEventType::Upbringing));
        assert!(timeline.iter().any(|e| e.event_type == TimelineEventType::EducationMilestone));
        assert!(timeline.iter().any(|e| e.event_type == TimelineEventType::FirstJob));
    }

    #[test]
    fn test_sample_agent_reserializes() {
        let agent = sample_agent();
        let json = agent.to_json().unwrap();
        let again = GeneratedAgent::from_json(&json).unwrap();
        assert_eq!(agent, again);
    }
}
