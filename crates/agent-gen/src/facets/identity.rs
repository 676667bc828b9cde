//! Identity and appearance
//!
//! Name, languages and appearance each come from their own stream. The rest
//! of the identity record is copied from the resolved context.

use agent_model::{Appearance, Eyes, Hair, HeightBand, Identity, TierBand};

use crate::context::ResolvedContext;
use crate::facets::pool_or;
use crate::rng::{fnv1a32, FacetRng, Seed};
use crate::vocab::Vocab;

pub mod identity_constants {
    pub const FALLBACK_FIRST_NAMES: [&str; 8] =
        ["Amina", "Ilya", "Noor", "Sofia", "Mateo", "Aya", "Jun", "Leila"];
    pub const FALLBACK_LAST_NAMES: [&str; 8] =
        ["Khan", "Novak", "Silva", "Haddad", "Kim", "Garcia", "Dubois", "Okoye"];
    pub const FALLBACK_LANGUAGES: [&str; 12] = [
        "English",
        "Spanish",
        "French",
        "Arabic",
        "Hindi",
        "Mandarin",
        "Russian",
        "Portuguese",
        "Japanese",
        "Swahili",
        "Turkish",
        "German",
    ];
    pub const FALLBACK_BUILDS: [&str; 5] = ["lean", "athletic", "stocky", "lanky", "compact"];
    pub const FALLBACK_HAIR_COLORS: [&str; 5] = ["black", "brown", "blonde", "auburn", "gray"];
    pub const FALLBACK_HAIR_TEXTURES: [&str; 4] = ["straight", "wavy", "curly", "coily"];
    pub const FALLBACK_EYE_COLORS: [&str; 5] = ["brown", "hazel", "green", "blue", "gray"];
    pub const FALLBACK_VOICES: [&str; 5] =
        ["soft-spoken", "measured", "fast-talking", "commanding", "warm"];
    pub const FALLBACK_MARKS: [&str; 6] =
        ["scar", "freckles", "tattoo", "piercing", "birthmark", "callused hands"];
    pub const MAX_LANGUAGES: i32 = 3;
    pub const MAX_MARKS: i32 = 2;
}

use identity_constants::*;

fn pick_from(rng: &mut FacetRng, pool: &[String], fallback: &[&str]) -> String {
    let pool = pool_or(pool, fallback);
    rng.pick(&pool).cloned().unwrap_or_default()
}

/// `"{first} {last}"` from the `name` stream.
pub fn compute_name(rng: &mut FacetRng, vocab: &Vocab) -> String {
    let first = pick_from(rng, &vocab.identity.first_names, &FALLBACK_FIRST_NAMES);
    let last = pick_from(rng, &vocab.identity.last_names, &FALLBACK_LAST_NAMES);
    format!("{} {}", first, last)
}

/// One to three languages from the `languages` stream.
pub fn compute_languages(rng: &mut FacetRng, vocab: &Vocab) -> Vec<String> {
    let pool = pool_or(&vocab.identity.languages, &FALLBACK_LANGUAGES);
    let count = rng.count(1, MAX_LANGUAGES as usize);
    rng.pick_k(&pool, count)
}

/// Draw order: height, build, hair color, hair texture, eyes, voice, marks.
pub fn compute_appearance(rng: &mut FacetRng, vocab: &Vocab) -> Appearance {
    let pools = &vocab.appearance;
    let height_band = rng.pick(&HeightBand::ALL).copied().unwrap_or(HeightBand::Average);
    let build_tag = pick_from(rng, &pools.build_tags, &FALLBACK_BUILDS);
    let color = pick_from(rng, &pools.hair_colors, &FALLBACK_HAIR_COLORS);
    let texture = pick_from(rng, &pools.hair_textures, &FALLBACK_HAIR_TEXTURES);
    let eyes = pick_from(rng, &pools.eye_colors, &FALLBACK_EYE_COLORS);
    let voice_tag = pick_from(rng, &pools.voice_tags, &FALLBACK_VOICES);

    let marks = pool_or(&pools.distinguishing_marks, &FALLBACK_MARKS);
    let count = rng.count(0, MAX_MARKS as usize);
    let distinguishing_marks = rng.pick_k(&marks, count);

    Appearance {
        height_band,
        build_tag,
        hair: Hair { color, texture },
        eyes: Eyes { color: eyes },
        voice_tag,
        distinguishing_marks,
    }
}

pub fn build_identity(ctx: &ResolvedContext, name: String, languages: Vec<String>) -> Identity {
    Identity {
        name,
        birth_year: ctx.birth_year,
        age: ctx.age,
        tier_band: ctx.tier,
        role_seed_tags: ctx.roles.clone(),
        career_track_tag: ctx.career.clone(),
        education_track_tag: ctx.education.clone(),
        home_country_iso3: ctx.home.iso3.clone(),
        current_country_iso3: ctx.current_country_iso3.clone(),
        home_culture: ctx.home.continent.clone(),
        languages,
        diaspora_status: ctx.diaspora,
        spirituality_affiliation_tag: ctx.spirituality.clone(),
        background_adversity_tags: ctx.adversity.clone(),
        urbanicity: ctx.urbanicity.clone(),
        origin_region: ctx.origin_region.clone(),
        has_family: ctx.has_family,
    }
}

/// Stable agent id: eight hex digits of a hash over the defining inputs.
pub fn agent_id(seed: &Seed, birth_year: i32, home_iso3: &str, tier: TierBand) -> String {
    format!(
        "{:08x}",
        fnv1a32(&format!("{}::{}::{}::{}", seed, birth_year, home_iso3, tier))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Facet;

    #[test]
    fn test_name_uses_vocab_pools() {
        let mut vocab = Vocab::default();
        vocab.identity.first_names = vec!["Ana".into()];
        vocab.identity.last_names = vec!["Lima".into()];
        let mut rng = Seed::normalize("name").rng(Facet::Name);
        assert_eq!(compute_name(&mut rng, &vocab), "Ana Lima");
    }

    #[test]
    fn test_languages_fall_back_and_stay_unique() {
        for i in 0..30 {
            let mut rng = Seed::normalize(&format!("lang-{}", i)).rng(Facet::Languages);
            let languages = compute_languages(&mut rng, &Vocab::default());
            assert!((1..=3).contains(&languages.len()));
            let mut sorted = languages.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), languages.len());
        }
    }

    #[test]
    fn test_appearance_marks_are_bounded() {
        let mut rng = Seed::normalize("looks").rng(Facet::Appearance);
        let appearance = compute_appearance(&mut rng, &Vocab::default());
        assert!(appearance.distinguishing_marks.len() <= 2);
        assert!(FALLBACK_VOICES.contains(&appearance.voice_tag.as_str()));
    }

    #[test]
    fn test_agent_id_is_stable_hex() {
        let seed = Seed::normalize("id-seed");
        let id = agent_id(&seed, 1990, "PRT", TierBand::Middle);
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(id, agent_id(&seed, 1990, "PRT", TierBand::Middle));
        assert_ne!(id, agent_id(&seed, 1991, "PRT", TierBand::Middle));
    }
}
