//! Preferences, routines and vices
//!
//! Three streams: `preferences` covers food, media and fashion; `routines`
//! the daily rhythm; `vices` the habits. Pools come from `vocab.lifestyle`
//! and fall back to the lists below.

use agent_model::{
    FashionPreferences, Fixed01k, FoodPreferences, Latents, Lifestyle, MediaPreferences,
    Preferences, Routines, Vice,
};
use std::collections::BTreeMap;

use crate::facets::pool_or;
use crate::rng::{Facet, FacetRng, Streams};
use crate::vocab::{LifestyleVocab, Vocab};

pub mod lifestyle_constants {
    pub const FALLBACK_COMFORT_FOODS: [&str; 8] = [
        "street food",
        "home cooking",
        "fine dining",
        "spicy food",
        "seafood",
        "grilled meats",
        "vegetarian dishes",
        "desserts",
    ];
    pub const FALLBACK_DISLIKES: [&str; 7] = [
        "bitter greens",
        "sweet drinks",
        "oily food",
        "raw fish",
        "very spicy",
        "dairy",
        "red meat",
    ];
    pub const FALLBACK_RESTRICTIONS: [&str; 5] =
        ["halal", "kosher", "vegetarian", "lactose-sensitive", "gluten-sensitive"];
    pub const FALLBACK_DRINKS: [&str; 5] = ["tea", "coffee", "mate", "sparkling water", "black espresso"];
    pub const FALLBACK_GENRES: [&str; 9] = [
        "political thriller",
        "hard sci-fi",
        "romance",
        "crime",
        "history",
        "tech podcasts",
        "sports",
        "strategy games",
        "documentaries",
    ];
    pub const FALLBACK_PLATFORMS: [&str; 5] = ["print", "radio", "tv", "social", "closed"];
    pub const FALLBACK_STYLES: [&str; 8] = [
        "minimalist",
        "formal",
        "utilitarian",
        "streetwear",
        "heritage",
        "avant-garde",
        "classic",
        "sporty",
    ];
    pub const FALLBACK_RECOVERY: [&str; 7] = [
        "long walk",
        "journaling",
        "quiet music",
        "gym session",
        "cook a meal",
        "call a friend",
        "meditation",
    ];
    pub const FALLBACK_VICES: [&str; 5] = ["alcohol", "stims", "doomscrolling", "gambling", "workaholism"];
    pub const FALLBACK_TRIGGERS: [&str; 6] = [
        "sleep debt",
        "humiliation",
        "loneliness",
        "mission failure",
        "public backlash",
        "moral injury",
    ];
    /// Chronotypes with their sleep windows.
    pub const CHRONOTYPES: [(&str, &str); 3] = [
        ("early", "22:00-06:00"),
        ("standard", "00:00-08:00"),
        ("night", "02:00-10:00"),
    ];
    pub const COMFORT_FOOD_COUNT: usize = 2;
    pub const GENRE_COUNT: usize = 5;
    pub const STYLE_COUNT: usize = 3;
    pub const RECOVERY_COUNT: usize = 2;
    pub const MAX_VICES: usize = 2;
    /// Share of a media or fashion score that comes from the draw; the rest
    /// follows latents.
    pub const DRAW_SHARE: f64 = 0.6;
}

use lifestyle_constants::*;

/// Draw blended with a latent so scores track the agent's temperament.
fn blended(rng: &mut FacetRng, latent: Fixed01k) -> Fixed01k {
    let draw = f64::from(rng.int(0, 1000));
    Fixed01k::clamped(DRAW_SHARE * draw + (1.0 - DRAW_SHARE) * latent.as_f64())
}

/// Splits 1000 across platforms in proportion to one draw each.
fn platform_diet(rng: &mut FacetRng, platforms: &[String]) -> BTreeMap<String, Fixed01k> {
    let raw: Vec<(String, i32)> = platforms.iter().map(|p| (p.clone(), rng.int(1, 100))).collect();
    let total: i32 = raw.iter().map(|(_, w)| w).sum();
    raw.into_iter()
        .map(|(platform, w)| {
            let share = f64::from(w) / f64::from(total.max(1)) * 1000.0;
            (platform, Fixed01k::clamped(share))
        })
        .collect()
}

pub fn compute_preferences(rng: &mut FacetRng, pools: &LifestyleVocab, latents: &Latents) -> Preferences {
    let comfort_foods = rng.pick_k(&pool_or(&pools.comfort_foods, &FALLBACK_COMFORT_FOODS), COMFORT_FOOD_COUNT);
    let dislike_pool = pool_or(&pools.food_dislikes, &FALLBACK_DISLIKES);
    let dislike_count = rng.count(1, 3);
    let dislikes = rng.pick_k(&dislike_pool, dislike_count);
    let restriction_pool = pool_or(&pools.dietary_restrictions, &FALLBACK_RESTRICTIONS);
    let restriction_count = rng.count(0, 1);
    let restrictions = rng.pick_k(&restriction_pool, restriction_count);
    let ritual_drink = rng
        .pick(&pool_or(&pools.ritual_drinks, &FALLBACK_DRINKS))
        .cloned()
        .unwrap_or_default();

    let genre_top_k = rng.pick_k(&pool_or(&pools.media_genres, &FALLBACK_GENRES), GENRE_COUNT);
    let diet = platform_diet(rng, &pool_or(&pools.media_platforms, &FALLBACK_PLATFORMS));
    let attention_resilience = blended(rng, latents.impulse_control);
    let doomscrolling_risk = blended(rng, latents.impulse_control.inverted());
    let epistemic_hygiene = blended(rng, latents.curiosity_bandwidth);

    let style_tags = rng.pick_k(&pool_or(&pools.style_tags, &FALLBACK_STYLES), STYLE_COUNT);
    let formality = blended(rng, latents.institutional_embeddedness);
    let conformity = blended(rng, latents.aesthetic_expressiveness.inverted());
    let status_signaling = blended(rng, latents.publicness);

    Preferences {
        food: FoodPreferences {
            comfort_foods,
            dislikes,
            restrictions,
            ritual_drink,
        },
        media: MediaPreferences {
            platform_diet: diet,
            genre_top_k,
            attention_resilience,
            doomscrolling_risk,
            epistemic_hygiene,
        },
        fashion: FashionPreferences {
            style_tags,
            formality,
            conformity,
            status_signaling,
        },
    }
}

pub fn compute_routines(rng: &mut FacetRng, pools: &LifestyleVocab) -> Routines {
    let (chronotype, sleep_window) = rng.pick(&CHRONOTYPES).copied().unwrap_or(CHRONOTYPES[1]);
    let recovery_rituals = rng.pick_k(&pool_or(&pools.recovery_rituals, &FALLBACK_RECOVERY), RECOVERY_COUNT);
    Routines {
        chronotype: chronotype.to_string(),
        sleep_window: sleep_window.to_string(),
        recovery_rituals,
    }
}

/// Zero to two vices, each with a severity band and one to three triggers.
pub fn compute_vices(rng: &mut FacetRng, pools: &LifestyleVocab) -> Vec<Vice> {
    let vice_pool = pool_or(&pools.vices, &FALLBACK_VICES);
    let trigger_pool = pool_or(&pools.vice_triggers, &FALLBACK_TRIGGERS);
    let count = rng.count(0, MAX_VICES);
    rng.pick_k(&vice_pool, count)
        .into_iter()
        .map(|vice| {
            let severity = Fixed01k::new(rng.int(100, 950)).band5();
            let trigger_count = rng.count(1, 3);
            let triggers = rng.pick_k(&trigger_pool, trigger_count);
            Vice {
                vice,
                severity,
                triggers,
            }
        })
        .collect()
}

pub fn compute_lifestyle(streams: &mut Streams, vocab: &Vocab, latents: &Latents) -> Lifestyle {
    let pools = &vocab.lifestyle;
    let preferences = compute_preferences(&mut streams.open(Facet::Preferences), pools, latents);
    let routines = compute_routines(&mut streams.open(Facet::Routines), pools);
    let vices = compute_vices(&mut streams.open(Facet::Vices), pools);
    tracing::debug!(
        chronotype = %routines.chronotype,
        vices = vices.len(),
        "lifestyle computed"
    );
    Lifestyle {
        preferences,
        routines,
        vices,
    }
}
