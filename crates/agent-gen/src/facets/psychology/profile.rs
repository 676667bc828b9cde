//! Red lines, visibility and cover identities

use agent_model::{Aptitudes, Fixed01k, HeightBand, Latents, PsychTraits, Visibility};

use crate::rng::FacetRng;
use crate::vocab::Vocab;
use crate::weighted::{pick_k_hybrid, unique};

pub mod profile_constants {
    pub const FALLBACK_RED_LINES: [&str; 3] = ["harm-to-civilians", "torture", "personal-corruption"];
    pub const FALLBACK_COVERS: [&str; 3] = ["consultant", "ngo-worker", "tourist"];
    pub const MAX_ROLE_RED_LINES: usize = 2;
    pub const COVER_COUNT: usize = 3;
    pub const MAX_FORCED_COVERS: usize = 2;
}

use profile_constants::*;

/// Cover identities that fit each career track.
const COVER_BY_CAREER: [(&str, [&str; 3]); 15] = [
    ("foreign-service", ["diplomatic-staff", "trade-delegate", "consultant"]),
    ("intelligence", ["consultant", "freelancer", "business-development"]),
    ("military", ["logistics-contractor", "consultant", "trade-delegate"]),
    ("journalism", ["journalist", "freelancer", "consultant"]),
    ("engineering", ["engineer", "consultant", "business-development"]),
    ("academia", ["academic", "consultant", "freelancer"]),
    ("ngo", ["ngo-worker", "aid-worker", "freelancer"]),
    ("public-health", ["aid-worker", "ngo-worker", "consultant"]),
    ("logistics", ["logistics-contractor", "business-development", "consultant"]),
    ("politics", ["consultant", "business-development", "trade-delegate"]),
    ("law", ["consultant", "trade-delegate", "business-development"]),
    ("corporate-ops", ["business-development", "consultant", "freelancer"]),
    ("organized-labor", ["ngo-worker", "consultant", "freelancer"]),
    ("civil-service", ["consultant", "trade-delegate", "diplomatic-staff"]),
    ("finance", ["business-development", "consultant", "freelancer"]),
];

/// Number of hard limits, between one and three.
pub fn red_line_count(latents: &Latents, traits: &PsychTraits) -> usize {
    let sum = traits.agreeableness.as_f64()
        + traits.conscientiousness.as_f64()
        + 0.60 * latents.principledness.as_f64();
    (1 + (sum / 1000.0).round() as i64).clamp(1, 3) as usize
}

/// Role-specific limits come first, then the general pool fills the rest.
pub fn compute_red_lines(
    rng: &mut FacetRng,
    vocab: &Vocab,
    latents: &Latents,
    traits: &PsychTraits,
    roles: &[String],
) -> Vec<String> {
    let count = red_line_count(latents, traits);
    let pool = unique(&vocab.psych.red_lines);
    if pool.is_empty() {
        return rng
            .pick_k(&FALLBACK_RED_LINES, count)
            .into_iter()
            .map(String::from)
            .collect();
    }

    let role_pool: Vec<String> = roles
        .iter()
        .filter_map(|r| vocab.psych.red_line_by_role.get(r))
        .flatten()
        .cloned()
        .collect();
    pick_k_hybrid(rng, &role_pool, &pool, count, count.min(MAX_ROLE_RED_LINES))
}

pub fn compute_visibility(
    rng: &mut FacetRng,
    latents: &Latents,
    aptitudes: &Aptitudes,
    height: HeightBand,
    career: &str,
) -> Visibility {
    let l = latents;
    let height_bias = match height {
        HeightBand::VeryTall => 45.0,
        HeightBand::Tall => 25.0,
        HeightBand::VeryShort => -20.0,
        HeightBand::Short | HeightBand::Average => 0.0,
    };
    let express_bias = ((l.aesthetic_expressiveness.unit() - 0.5) * 40.0).round();

    let public_visibility = Fixed01k::clamped(
        0.64 * l.publicness.as_f64() + 0.30 * f64::from(rng.int(0, 1000)) + height_bias + express_bias,
    );

    let records_career = matches!(career, "civil-service" | "law");
    let paper_trail = Fixed01k::clamped(
        0.65 * l.institutional_embeddedness.as_f64()
            + 0.22 * l.planning_horizon.as_f64()
            + 0.13 * f64::from(rng.int(0, 1000))
            + if records_career { 80.0 } else { 0.0 },
    );

    let digital_hygiene = Fixed01k::clamped(
        0.50 * aptitudes.attention_control.as_f64()
            + 0.22 * l.opsec_discipline.as_f64()
            + 0.18 * l.tech_fluency.as_f64()
            + 0.10 * l.impulse_control.as_f64()
            + 0.20 * f64::from(rng.int(0, 1000)),
    );

    Visibility {
        public_visibility,
        paper_trail,
        digital_hygiene,
    }
}

/// Cover identities the agent could plausibly pass as.
///
/// Career covers and trait-driven covers are forced when the vocab lists
/// them; at most two forced entries are kept before random fill.
pub fn compute_covers(rng: &mut FacetRng, vocab: &Vocab, latents: &Latents, career: &str) -> Vec<String> {
    let pool = unique(&vocab.covers.cover_aptitude_tags);
    if pool.is_empty() {
        return rng
            .pick_k(&FALLBACK_COVERS, COVER_COUNT)
            .into_iter()
            .map(String::from)
            .collect();
    }

    let mut forced: Vec<String> = Vec::new();
    let mut force = |tag: &str| {
        if pool.iter().any(|p| p == tag) && !forced.iter().any(|f| f == tag) {
            forced.push(tag.to_string());
        }
    };
    if let Some((_, covers)) = COVER_BY_CAREER.iter().find(|(track, _)| *track == career) {
        for tag in covers {
            force(tag);
        }
    }
    if latents.publicness > 700 {
        force("journalist");
    }
    if latents.opsec_discipline > 700 {
        force("consultant");
    }

    let kept: Vec<String> = forced.iter().take(MAX_FORCED_COVERS).cloned().collect();
    let rest: Vec<String> = pool.into_iter().filter(|p| !forced.contains(p)).collect();
    let fill = rng.pick_k(&rest, COVER_COUNT - kept.len());

    let mut covers = unique(&[kept, fill].concat());
    covers.truncate(COVER_COUNT);
    covers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{Facet, Seed};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_red_line_count_range() {
        let mut traits = PsychTraits::default();
        let mut latents = Latents::default();
        traits.agreeableness = Fixed01k::new(0);
        traits.conscientiousness = Fixed01k::new(0);
        latents.principledness = Fixed01k::new(0);
        assert_eq!(red_line_count(&latents, &traits), 1);
        traits.agreeableness = Fixed01k::new(1000);
        traits.conscientiousness = Fixed01k::new(1000);
        latents.principledness = Fixed01k::new(1000);
        assert_eq!(red_line_count(&latents, &traits), 3);
    }

    #[test]
    fn test_red_lines_fall_back_without_pool() {
        let mut rng = Seed::normalize("red").rng(Facet::RedLines);
        let lines = compute_red_lines(
            &mut rng,
            &Vocab::default(),
            &Latents::default(),
            &PsychTraits::default(),
            &[],
        );
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|l| FALLBACK_RED_LINES.contains(&l.as_str())));
    }

    #[test]
    fn test_role_red_lines_come_first() {
        let mut vocab = Vocab::default();
        vocab.psych.red_lines = strings(&["g1", "g2", "g3", "g4"]);
        vocab
            .psych
            .red_line_by_role
            .insert("operative".into(), strings(&["never-burn-an-asset"]));
        let mut traits = PsychTraits::default();
        traits.agreeableness = Fixed01k::new(1000);
        traits.conscientiousness = Fixed01k::new(1000);
        let roles = strings(&["operative"]);
        let mut rng = Seed::normalize("role-red").rng(Facet::RedLines);
        let lines = compute_red_lines(&mut rng, &vocab, &Latents::default(), &traits, &roles);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "never-burn-an-asset");
    }

    #[test]
    fn test_paper_trail_rises_for_law() {
        let latents = Latents::default();
        let apt = Aptitudes::default();
        let seed = Seed::normalize("vis");
        let plain = compute_visibility(&mut seed.rng(Facet::Visibility), &latents, &apt, HeightBand::Average, "finance");
        let law = compute_visibility(&mut seed.rng(Facet::Visibility), &latents, &apt, HeightBand::Average, "law");
        assert_eq!(law.paper_trail.get() - plain.paper_trail.get(), 80);
        assert_eq!(law.public_visibility, plain.public_visibility);
    }

    #[test]
    fn test_covers_force_career_entries() {
        let mut vocab = Vocab::default();
        vocab.covers.cover_aptitude_tags =
            strings(&["journalist", "freelancer", "consultant", "tourist", "academic"]);
        let mut rng = Seed::normalize("covers").rng(Facet::Covers);
        let covers = compute_covers(&mut rng, &vocab, &Latents::default(), "journalism");
        assert_eq!(covers.len(), 3);
        assert_eq!(&covers[..2], &["journalist".to_string(), "freelancer".to_string()]);
        assert_ne!(covers[2], "consultant", "forced entries beyond two are not refilled");
    }

    #[test]
    fn test_covers_fallback_trio() {
        let mut rng = Seed::normalize("covers").rng(Facet::Covers);
        let mut covers = compute_covers(&mut rng, &Vocab::default(), &Latents::default(), "law");
        covers.sort();
        assert_eq!(covers, vec!["consultant", "ngo-worker", "tourist"]);
    }
}
