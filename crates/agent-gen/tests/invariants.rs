//! Plausibility invariants sampled over many seeds
//!
//! Contexts vary tier, diaspora status, roles and country so the cap,
//! floor and guarantee layers all get exercised.

use agent_gen::facets::latents::compute_latents;
use agent_gen::{AgentGenerator, Facet, GenerationContext, Seed};
use agent_model::{DiasporaStatus, Fixed01k, GeneratedAgent, Impact, TierBand, TimelineEventType};

const SAMPLES: usize = 200;

fn context(i: usize) -> GenerationContext {
    let mut ctx = GenerationContext::new(format!("inv-{}", i));
    if i % 3 == 0 {
        ctx = ctx.with_tier(TierBand::ALL[i % TierBand::ALL.len()]);
    }
    if i % 4 == 0 {
        ctx = ctx.with_diaspora(DiasporaStatus::ALL[(i / 4) % DiasporaStatus::ALL.len()]);
    }
    if i % 5 == 0 {
        ctx = ctx.with_roles(["operative"]);
    }
    if i % 7 == 0 {
        ctx = ctx.with_home_country("SYR");
    }
    ctx
}

fn agents() -> Vec<GeneratedAgent> {
    let generator = AgentGenerator::bundled().unwrap();
    (0..SAMPLES)
        .map(|i| generator.generate(&context(i)).unwrap())
        .collect()
}

fn in_range(value: Fixed01k) -> bool {
    (0..=1000).contains(&value.get())
}

/// Test that every scored field stays within 0..=1000 and skills within the floor and ceiling
#[test]
fn test_ranges_hold() {
    for agent in agents() {
        assert!(agent.latents.iter().all(|(_, v)| in_range(v)), "{}", agent.seed);
        assert!(agent.capabilities.aptitudes.values().iter().all(|v| in_range(*v)));
        let traits = &agent.capabilities.traits;
        for v in [
            traits.risk_tolerance,
            traits.conscientiousness,
            traits.novelty_seeking,
            traits.agreeableness,
            traits.authoritarianism,
        ] {
            assert!(in_range(v));
        }
        for (key, skill) in &agent.capabilities.skills {
            assert!(
                (90..=940).contains(&skill.value.get()),
                "{} skill {} = {}",
                agent.seed,
                key,
                skill.value.get()
            );
            assert!(in_range(skill.xp));
        }
        let ethics = &agent.psychology.ethics;
        for v in [ethics.rule_adherence, ethics.harm_aversion, ethics.mission_utilitarianism] {
            assert!(in_range(v));
        }
        let vis = &agent.psychology.visibility;
        for v in [vis.public_visibility, vis.paper_trail, vis.digital_hygiene] {
            assert!(in_range(v));
        }
        assert!(in_range(agent.psychology.self_concept.impostor_risk));
    }
}

/// Test the cross-latent caps after every correction has run
#[test]
fn test_latent_caps_hold() {
    for agent in agents() {
        let l = &agent.latents;
        if l.stress_reactivity > 700 {
            assert!(l.impulse_control <= 600, "{}", agent.seed);
        }
        if l.opsec_discipline > 850 {
            assert!(l.publicness <= 400, "{}", agent.seed);
        }
        if l.publicness > 850 {
            assert!(l.opsec_discipline <= 400, "{}", agent.seed);
        }
        if agent.identity.tier_band == TierBand::Elite {
            assert!(l.publicness >= 300, "{}", agent.seed);
        }
        if agent.identity.age > 50 {
            assert!(l.publicness >= 200, "{}", agent.seed);
        }
    }
}

/// Test that a local majority is never a linguistic minority
#[test]
fn test_local_majority_excludes_linguistic_minority() {
    for agent in agents() {
        let status = &agent.narrative.minority_status;
        assert!(!(status.local_majority && status.linguistic_minority), "{}", agent.seed);
    }
}

/// Test timeline ordering, foundations and guarantees
#[test]
fn test_timeline_invariants() {
    for agent in agents() {
        let timeline = &agent.narrative.timeline;
        assert!(
            timeline.windows(2).all(|w| w[0].year_offset <= w[1].year_offset),
            "{} timeline unsorted",
            agent.seed
        );
        assert!(timeline.iter().all(|e| e.year_offset <= agent.identity.age));

        let has = |t: TimelineEventType| timeline.iter().any(|e| e.event_type == t);
        assert!(has(TimelineEventType::Upbringing), "{}", agent.seed);
        assert!(has(TimelineEventType::EducationMilestone), "{}", agent.seed);
        assert!(
            has(TimelineEventType::FirstJob) || has(TimelineEventType::FirstPosting),
            "{}",
            agent.seed
        );

        if agent.identity.diaspora_status == DiasporaStatus::Refugee {
            assert!(
                timeline.iter().any(|e| e.event_type.is_traumatic()),
                "{} refugee without trauma",
                agent.seed
            );
        }
        if !agent.identity.background_adversity_tags.is_empty() {
            assert!(
                timeline.iter().any(|e| e.impact == Impact::Negative),
                "{} adversity without a negative event",
                agent.seed
            );
        }
    }
}

/// Test the shape rules of the behavior lens, details and lifestyle
#[test]
fn test_output_shapes() {
    let skill_count = AgentGenerator::bundled().unwrap().vocab().capabilities.skill_keys.len();
    for agent in agents() {
        let lens = &agent.behavior_lens;
        assert!(!lens.archetype.is_empty());
        assert!((3..=5).contains(&lens.reads.len()), "{}", agent.seed);

        assert!((3..=5).contains(&agent.details.len()), "{}", agent.seed);
        let mut items: Vec<&str> = agent.details.iter().map(|d| d.item.as_str()).collect();
        items.sort_unstable();
        items.dedup();
        assert_eq!(items.len(), agent.details.len());

        assert!(agent.lifestyle.vices.len() <= 2);
        assert!(!agent.psychology.red_lines.is_empty());
        assert_eq!(agent.capabilities.skills.len(), skill_count);

        let mut kit: Vec<&str> = agent
            .logistics
            .identity_kit
            .iter()
            .map(|k| k.item.as_str())
            .collect();
        assert_eq!(kit.len(), 5, "{}", agent.seed);
        kit.sort_unstable();
        kit.dedup();
        assert_eq!(kit.len(), 5, "{} duplicate kit items", agent.seed);
        assert!(agent.logistics.identity_kit.iter().all(|k| !k.compromised));
    }
}

/// Test that mental health markers only appear alongside a coping mechanism
#[test]
fn test_marker_comes_with_coping() {
    for agent in agents() {
        let narrative = &agent.narrative;
        assert_eq!(
            narrative.mental_health_marker.is_some(),
            narrative.coping_mechanism.is_some(),
            "{}",
            agent.seed
        );
    }
}

fn pearson(pairs: &[(f64, f64)]) -> f64 {
    let n = pairs.len() as f64;
    let (mx, my) = pairs
        .iter()
        .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x / n, sy + y / n));
    let (mut cov, mut vx, mut vy) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        cov += (x - mx) * (y - my);
        vx += (x - mx).powi(2);
        vy += (y - my).powi(2);
    }
    cov / (vx.sqrt() * vy.sqrt())
}

/// Test the correlation signs the latent corrections are meant to produce
#[test]
fn test_latent_correlation_signs() {
    let latents: Vec<_> = (0..1000)
        .map(|i| {
            let mut rng = Seed::normalize(&format!("corr-{}", i)).rng(Facet::Latents);
            compute_latents(&mut rng, TierBand::Middle, &[], 35).values
        })
        .collect();

    let curiosity_risk: Vec<(f64, f64)> = latents
        .iter()
        .map(|l| (l.curiosity_bandwidth.as_f64(), l.risk_appetite.as_f64()))
        .collect();
    assert!(pearson(&curiosity_risk) > 0.05, "curiosity should raise risk appetite");

    let embedded_risk: Vec<(f64, f64)> = latents
        .iter()
        .map(|l| (l.institutional_embeddedness.as_f64(), l.risk_appetite.as_f64()))
        .collect();
    assert!(pearson(&embedded_risk) < -0.05, "embeddedness should lower risk appetite");
}
