//! Psychology layer
//!
//! Nine sub-facets, each on its own stream. Contradictions are the only one
//! that draws nothing.

pub mod affect;
pub mod ethics;
pub mod inner;
pub mod knowledge;
pub mod profile;

use agent_model::{Aptitudes, HeightBand, Latents, PsychTraits, Psychology, TierBand};

use crate::rng::{Facet, Streams};
use crate::vocab::Vocab;

pub struct PsychologyInputs<'a> {
    pub vocab: &'a Vocab,
    pub latents: &'a Latents,
    pub aptitudes: &'a Aptitudes,
    pub traits: &'a PsychTraits,
    pub tier: TierBand,
    pub roles: &'a [String],
    pub career: &'a str,
    pub height: HeightBand,
}

pub fn compute_psychology(streams: &mut Streams, inputs: &PsychologyInputs<'_>) -> Psychology {
    let PsychologyInputs {
        vocab,
        latents,
        aptitudes,
        traits,
        tier,
        roles,
        career,
        height,
    } = *inputs;

    let ethics = ethics::compute_ethics(&mut streams.open(Facet::Ethics), latents, traits, aptitudes);
    let contradictions = ethics::compute_contradictions(latents, aptitudes, &ethics, roles);
    let red_lines =
        profile::compute_red_lines(&mut streams.open(Facet::RedLines), vocab, latents, traits, roles);
    let visibility =
        profile::compute_visibility(&mut streams.open(Facet::Visibility), latents, aptitudes, height, career);
    let cover_aptitude_tags =
        profile::compute_covers(&mut streams.open(Facet::Covers), vocab, latents, career);
    let affect = affect::compute_affect(&mut streams.open(Facet::Affect), vocab, latents, aptitudes);
    let self_concept =
        affect::compute_self_concept(&mut streams.open(Facet::SelfConcept), vocab, latents, tier, roles);
    let thoughts_emotions =
        inner::compute_thoughts_emotions(&mut streams.open(Facet::ThoughtsEmotions), vocab, latents);
    let knowledge_ignorance = knowledge::compute_knowledge(
        &mut streams.open(Facet::KnowledgeIgnorance),
        vocab,
        latents,
        roles,
        tier,
    );

    tracing::debug!(
        loyalty = ?ethics.loyalty_scope,
        contradictions = contradictions.len(),
        red_lines = red_lines.len(),
        baseline = %affect.baseline,
        "psychology computed"
    );

    Psychology {
        ethics,
        contradictions,
        red_lines,
        visibility,
        cover_aptitude_tags,
        affect,
        self_concept,
        thoughts_emotions,
        knowledge_ignorance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Seed;

    #[test]
    fn test_opens_one_stream_per_drawing_sub_facet() {
        let vocab = Vocab::default();
        let latents = Latents::default();
        let aptitudes = Aptitudes::default();
        let traits = PsychTraits::default();
        let inputs = PsychologyInputs {
            vocab: &vocab,
            latents: &latents,
            aptitudes: &aptitudes,
            traits: &traits,
            tier: TierBand::Middle,
            roles: &[],
            career: "law",
            height: HeightBand::Average,
        };
        let mut streams = Streams::new(Seed::normalize("psych"));
        let psych = compute_psychology(&mut streams, &inputs);
        let opened: Vec<_> = streams.opened().iter().map(|s| s.facet()).collect();
        assert_eq!(
            opened,
            vec![
                Facet::Ethics,
                Facet::RedLines,
                Facet::Visibility,
                Facet::Covers,
                Facet::Affect,
                Facet::SelfConcept,
                Facet::ThoughtsEmotions,
                Facet::KnowledgeIgnorance,
            ]
        );
        assert!(!psych.contradictions.is_empty());
        assert_eq!(psych.cover_aptitude_tags.len(), 3);
    }
}
