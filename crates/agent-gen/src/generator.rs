//! Agent generation pipeline
//!
//! [`AgentGenerator`] owns the validated data set and configuration and runs
//! the facets in a fixed order. It holds no mutable state, so one generator
//! can serve any number of threads.

use agent_model::{Capabilities, GeneratedAgent, GenerationTrace, AGENT_VERSION};
use serde_json::{json, Value};

use crate::bundled::DataSet;
use crate::config::GeneratorConfig;
use crate::context::{GenerationContext, ResolvedContext};
use crate::error::GenerationError;
use crate::facets::aptitudes::{compute_aptitudes, AptitudeInputs, AptitudesResult};
use crate::facets::behavior::{compute_behavior_lens, BehaviorInputs};
use crate::facets::details::compute_details;
use crate::facets::identity::{
    agent_id, build_identity, compute_appearance, compute_languages, compute_name,
};
use crate::facets::latents::{compute_latents, LatentsResult};
use crate::facets::lifestyle::compute_lifestyle;
use crate::facets::logistics::compute_logistics;
use crate::facets::narrative::{compute_narrative, timeline_summary, NarrativeInputs, NarrativeResult};
use crate::facets::psychology::{compute_psychology, PsychologyInputs};
use crate::facets::skills::{compute_skills, travel_score, SkillInputs, SkillsResult};
use crate::facets::traits::compute_traits;
use crate::rng::{Facet, Streams};
use crate::vocab::{Country, Priors, Vocab};

/// Conflict level at which an agent counts as having grown up near war.
pub const CONFLICT_EXPOSURE_LEVEL: i32 = 600;

/// Deterministic generator over one data set.
#[derive(Debug, Clone)]
pub struct AgentGenerator {
    vocab: Vocab,
    priors: Priors,
    countries: Vec<Country>,
    config: GeneratorConfig,
}

impl AgentGenerator {
    /// Validates the vocab up front so a bad document fails before any agent
    /// is generated.
    pub fn new(
        vocab: Vocab,
        priors: Priors,
        countries: Vec<Country>,
        config: GeneratorConfig,
    ) -> Result<Self, GenerationError> {
        vocab.validate()?;
        Ok(Self {
            vocab,
            priors,
            countries,
            config,
        })
    }

    pub fn from_data(data: DataSet, config: GeneratorConfig) -> Result<Self, GenerationError> {
        Self::new(data.vocab, data.priors, data.countries, config)
    }

    /// Generator over the embedded documents with default settings.
    pub fn bundled() -> Result<Self, GenerationError> {
        Self::from_data(DataSet::bundled()?, GeneratorConfig::default())
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    /// Generates one agent. The same context always yields the same agent.
    pub fn generate(&self, ctx: &GenerationContext) -> Result<GeneratedAgent, GenerationError> {
        let resolved =
            ResolvedContext::resolve(ctx, &self.vocab, &self.priors, &self.countries, &self.config);
        let seed = resolved.seed.clone();
        let mut streams = Streams::new(seed.clone());
        tracing::debug!(seed = %seed, drawn = ?resolved.drawn, "context resolved");

        let name = compute_name(&mut streams.open(Facet::Name), &self.vocab);
        let languages = compute_languages(&mut streams.open(Facet::Languages), &self.vocab);
        let appearance = compute_appearance(&mut streams.open(Facet::Appearance), &self.vocab);
        let identity = build_identity(&resolved, name, languages);

        let latents_result = compute_latents(
            &mut streams.open(Facet::Latents),
            resolved.tier,
            &resolved.roles,
            resolved.age,
        );
        let latents = latents_result.values;

        let aptitudes_result = compute_aptitudes(
            &mut streams.open(Facet::Capabilities),
            &AptitudeInputs {
                latents: &latents,
                tier: resolved.tier,
                build_tag: &appearance.build_tag,
                height: appearance.height_band,
                voice_tag: &appearance.voice_tag,
                education: &resolved.education,
            },
        );
        let aptitudes = aptitudes_result.aptitudes;

        let traits = compute_traits(&mut streams.open(Facet::Traits), &latents, &aptitudes);

        let skills_result = compute_skills(
            &mut streams.open(Facet::Skills),
            &SkillInputs {
                vocab: &self.vocab,
                aptitudes: &aptitudes,
                traits: &traits,
                latents: &latents,
                roles: &resolved.roles,
                tier: resolved.tier,
                career: &resolved.career,
                voice_tag: &appearance.voice_tag,
                security_env: resolved.security_env,
                travel_score: travel_score(&latents, resolved.diaspora),
                age: resolved.age,
            },
            &self.config.skills,
        )?;

        let psychology = compute_psychology(
            &mut streams,
            &PsychologyInputs {
                vocab: &self.vocab,
                latents: &latents,
                aptitudes: &aptitudes,
                traits: &traits,
                tier: resolved.tier,
                roles: &resolved.roles,
                career: &resolved.career,
                height: appearance.height_band,
            },
        );

        let narrative_result = compute_narrative(
            &mut streams,
            &NarrativeInputs {
                vocab: &self.vocab,
                config: &self.config.timeline,
                age: resolved.age,
                tier: resolved.tier,
                roles: &resolved.roles,
                career: &resolved.career,
                education: &resolved.education,
                home_iso3: &resolved.home.iso3,
                current_iso3: &resolved.current_country_iso3,
                diaspora: resolved.diaspora,
                adversity: &resolved.adversity,
                spirituality: &resolved.spirituality,
                urbanicity: &resolved.urbanicity,
                origin_region: resolved.origin_region.as_deref(),
                has_family: resolved.has_family,
                security_score: resolved.security_score(),
                conflict_exposure: resolved
                    .security_env
                    .is_some_and(|env| env.conflict >= CONFLICT_EXPOSURE_LEVEL),
            },
        );

        let behavior_lens = compute_behavior_lens(
            &mut streams,
            &BehaviorInputs {
                vocab: &self.vocab,
                latents: &latents,
                traits: &traits,
                aptitudes: &aptitudes,
                ethics: &psychology.ethics,
                roles: &resolved.roles,
                tier: resolved.tier,
                age: resolved.age,
            },
        );

        let details = compute_details(
            &mut streams.open(Facet::DetailGeneration),
            &self.vocab,
            &latents,
            &traits,
            &aptitudes,
        );

        let lifestyle = compute_lifestyle(&mut streams, &self.vocab, &latents);
        let logistics = compute_logistics(&mut streams.open(Facet::Logistics));

        let id = agent_id(&seed, resolved.birth_year, &resolved.home.iso3, resolved.tier);

        let mut agent = GeneratedAgent {
            version: AGENT_VERSION,
            id,
            seed: seed.to_string(),
            identity,
            appearance,
            latents,
            capabilities: Capabilities {
                aptitudes,
                traits,
                skills: skills_result.skills.clone(),
            },
            psychology,
            narrative: narrative_result.narrative.clone(),
            behavior_lens,
            details,
            lifestyle,
            logistics,
            generation_trace: None,
        };

        if resolved.include_trace {
            let facets = FacetOutputs {
                latents: &latents_result,
                aptitudes: &aptitudes_result,
                skills: &skills_result,
                narrative: &narrative_result,
            };
            agent.generation_trace = Some(build_trace(&agent, &resolved, &streams, &facets)?);
        }

        tracing::info!(
            id = %agent.id,
            tier = %resolved.tier,
            age = resolved.age,
            "agent generated"
        );
        Ok(agent)
    }
}

/// Intermediate facet results the trace reports beyond the agent itself.
struct FacetOutputs<'a> {
    latents: &'a LatentsResult,
    aptitudes: &'a AptitudesResult,
    skills: &'a SkillsResult,
    narrative: &'a NarrativeResult,
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, GenerationError> {
    serde_json::to_value(value).map_err(GenerationError::Trace)
}

fn build_trace(
    agent: &GeneratedAgent,
    resolved: &ResolvedContext,
    streams: &Streams,
    facets: &FacetOutputs<'_>,
) -> Result<GenerationTrace, GenerationError> {
    let mut trace = GenerationTrace::new(resolved.seed.as_str());

    let base = resolved.seed.facet(Facet::Base);
    trace.record_facet(base.facet().as_str(), base.value());
    for facet_seed in streams.opened() {
        trace.record_facet(facet_seed.facet().as_str(), facet_seed.value());
    }

    trace.record_field(
        "context",
        json!({ "drawn": resolved.drawn }),
        "resolved",
        json!({ "facet": "base" }),
    );

    let latents = facets.latents;
    trace.record_field(
        "latents",
        json!({
            "values": latents.values,
            "raw": latents.raw,
            "tierBias": latents.tier_bias,
            "roleBias": latents.role_bias,
            "ageBias": latents.age_bias,
        }),
        "formula+caps",
        json!({ "tier": resolved.tier, "roles": resolved.roles, "age": resolved.age }),
    );
    trace.record_field(
        "aptitudes",
        json!({ "values": facets.aptitudes.aptitudes, "biases": facets.aptitudes.biases }),
        "formula",
        json!({ "latents": true, "appearance": true, "education": resolved.education }),
    );
    trace.record_field(
        "traits",
        to_value(&agent.capabilities.traits)?,
        "formula",
        json!({ "latents": true, "aptitudes": true }),
    );
    trace.record_field(
        "skills",
        json!({ "values": facets.skills.skills, "voiceBiases": facets.skills.voice_biases }),
        "formula+caps",
        json!({ "vocab": "capabilities.skillKeys", "career": resolved.career }),
    );

    let psych = &agent.psychology;
    let psych_fields: [(&str, Value, &str); 9] = [
        ("psych.ethics", to_value(&psych.ethics)?, "formula"),
        ("psych.contradictions", to_value(&psych.contradictions)?, "derived"),
        ("identity.redLines", to_value(&psych.red_lines)?, "pickKHybrid"),
        ("visibility", to_value(&psych.visibility)?, "formula"),
        ("covers.coverAptitudeTags", to_value(&psych.cover_aptitude_tags)?, "careerTable"),
        ("psych.affect", to_value(&psych.affect)?, "weightedPick"),
        ("psych.selfConcept", to_value(&psych.self_concept)?, "weightedPick"),
        ("psych.thoughtsEmotions", to_value(&psych.thoughts_emotions)?, "weightedPickKUnique"),
        ("psych.knowledgeIgnorance", to_value(&psych.knowledge_ignorance)?, "weightedPickKUnique"),
    ];
    for (key, value, method) in psych_fields {
        trace.record_field(key, value, method, Value::Null);
    }

    let narrative = facets.narrative;
    trace.record_field("timeline", timeline_summary(narrative), "generated", Value::Null);
    trace.record_field(
        "minorityStatus",
        to_value(&agent.narrative.minority_status)?,
        "derived",
        Value::Null,
    );
    if let (Some(marker), Some(coping)) = (
        &agent.narrative.mental_health_marker,
        &agent.narrative.coping_mechanism,
    ) {
        trace.record_field(
            "mentalHealthMarker",
            json!({
                "marker": marker,
                "coping": coping,
                "negativeEventCount": agent
                    .narrative
                    .timeline
                    .iter()
                    .filter(|e| e.impact == agent_model::Impact::Negative)
                    .count(),
            }),
            "negativeEventThreshold",
            Value::Null,
        );
    }

    let lens = &agent.behavior_lens;
    trace.record_field(
        "behaviorLens",
        json!({ "archetype": lens.archetype, "reads": lens.reads }),
        "weightedPick",
        json!({ "vocab": "behaviorArchetypes" }),
    );
    trace.record_field(
        "psych.pressureResponse",
        to_value(&lens.pressure_response)?,
        "weightedPick",
        json!({ "latents": ["riskAppetite", "stressReactivity", "impulseControl"] }),
    );
    trace.record_field(
        "detailGeneration",
        to_value(&agent.details)?,
        "weightedPick",
        json!({ "vocab": "detailGeneration" }),
    );
    trace.record_field("lifestyle", to_value(&agent.lifestyle)?, "pickK", Value::Null);
    trace.record_field("logistics", to_value(&agent.logistics)?, "pickK", Value::Null);

    if !latents.caps_fired.is_empty() {
        trace.record_derived("latentCaps", json!(latents.caps_fired));
    }
    if !facets.skills.caps_fired.is_empty() {
        trace.record_derived("skillCaps", json!(facets.skills.caps_fired));
    }
    if narrative.linguistic_gate {
        trace.record_derived(
            "linguisticMinorityGate",
            json!({
                "localMajority": true,
                "originalLinguisticMinority": true,
                "adjustedLinguisticMinority": false,
            }),
        );
    }
    if !narrative.guarantees_fired.is_empty() {
        trace.record_derived("timelineGuarantees", json!(narrative.guarantees_fired));
    }
    for (key, note) in &narrative.notes {
        trace.record_derived(key, note.clone());
    }
    Ok(trace)
}

/// Generates one agent with the default configuration.
pub fn generate_agent(
    ctx: &GenerationContext,
    vocab: &Vocab,
    priors: &Priors,
    countries: &[Country],
) -> Result<GeneratedAgent, GenerationError> {
    AgentGenerator::new(
        vocab.clone(),
        priors.clone(),
        countries.to_vec(),
        GeneratorConfig::default(),
    )?
    .generate(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VocabError;

    #[test]
    fn test_generator_is_send_and_sync() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<AgentGenerator>();
    }

    #[test]
    fn test_bad_vocab_fails_at_construction() {
        let mut data = DataSet::bundled().unwrap();
        data.vocab.capabilities.skill_keys.clear();
        let err = AgentGenerator::from_data(data, GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GenerationError::Vocab(VocabError::Missing { .. })));
        assert_eq!(err.to_string(), "vocab missing: capabilities.skillKeys");
    }

    #[test]
    fn test_trace_only_when_requested() {
        let generator = AgentGenerator::bundled().unwrap();
        let plain = generator.generate(&GenerationContext::new("plain")).unwrap();
        assert!(plain.generation_trace.is_none());

        let traced = generator
            .generate(&GenerationContext::new("plain").with_trace(true))
            .unwrap();
        let trace = traced.generation_trace.as_ref().unwrap();
        assert_eq!(trace.normalized_seed, "plain");
        assert!(trace.facet_seeds.contains_key("base"));
        assert!(trace.facet_seeds.contains_key("knowledge-ignorance"));
        assert!(trace.fields.contains_key("psych.pressureResponse"));
        assert!(trace.fields.contains_key("logistics"));

        let mut untraced = traced.clone();
        untraced.generation_trace = None;
        assert_eq!(untraced, plain);
    }

    #[test]
    fn test_every_drawing_facet_is_recorded() {
        let generator = AgentGenerator::bundled().unwrap();
        let agent = generator
            .generate(&GenerationContext::new("facets").with_trace(true))
            .unwrap();
        let trace = agent.generation_trace.unwrap();
        for facet in Facet::ALL {
            assert!(
                trace.facet_seeds.contains_key(facet.as_str()),
                "missing facet {}",
                facet
            );
        }
    }

    #[test]
    fn test_trace_serialization_failure_is_an_error() {
        let mut bad_keys = std::collections::BTreeMap::new();
        bad_keys.insert((1, 2), "tuple keys are not JSON object keys");
        let err = to_value(&bad_keys).unwrap_err();
        assert!(matches!(err, GenerationError::Trace(_)));
        assert!(err.to_string().starts_with("failed to serialize trace"));
    }

    #[test]
    fn test_free_function_matches_generator() {
        let data = DataSet::bundled().unwrap();
        let ctx = GenerationContext::new("free-fn");
        let a = generate_agent(&ctx, &data.vocab, &data.priors, &data.countries).unwrap();
        let b = AgentGenerator::from_data(data, GeneratorConfig::default())
            .unwrap()
            .generate(&ctx)
            .unwrap();
        assert_eq!(a, b);
    }
}
