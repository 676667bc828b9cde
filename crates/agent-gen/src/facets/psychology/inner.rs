//! Thoughts, emotions and coping snapshot
//!
//! Valence is inferred from words in each item. Stress reactivity raises
//! the intensity of thoughts and emotions and lowers coping effectiveness.

use agent_model::{
    Coping, CopingEntry, EmotionEntry, Emotions, Fixed01k, Latents, SignedFixed01k, ThoughtEntry,
    Thoughts, ThoughtsEmotions, Valence,
};

use crate::rng::FacetRng;
use crate::vocab::Vocab;
use crate::weighted::unique;

const POSITIVE_HINTS: [&str; 10] = [
    "joy", "love", "pride", "hope", "relief", "warm", "comfort", "trust", "safe", "grateful",
];
const NEGATIVE_HINTS: [&str; 10] = [
    "sad", "anger", "fear", "guilt", "despair", "paranoia", "betray", "pain", "worry", "trauma",
];

const POSITIVE_TILTS: [&str; 4] = ["open", "engaged", "protective", "focused"];
const NEGATIVE_TILTS: [&str; 4] = ["withdrawn", "avoidant", "agitated", "hypervigilant"];
const NEUTRAL_TILTS: [&str; 3] = ["reflective", "guarded", "steady"];

pub fn infer_valence(item: &str) -> Valence {
    let lower = item.to_lowercase();
    if POSITIVE_HINTS.iter().any(|h| lower.contains(h)) {
        Valence::Positive
    } else if NEGATIVE_HINTS.iter().any(|h| lower.contains(h)) {
        Valence::Negative
    } else {
        Valence::Neutral
    }
}

/// Intensity base, jitter and recency ceiling of one list.
struct Shape {
    base: i32,
    jitter: i32,
    horizon: i32,
}

const OBSERVATIONS: Shape = Shape { base: 420, jitter: 180, horizon: 10 };
const REFLECTIONS: Shape = Shape { base: 460, jitter: 220, horizon: 18 };
const MEMORIES: Shape = Shape { base: 520, jitter: 240, horizon: 40 };
const WORRIES: Shape = Shape { base: 620, jitter: 240, horizon: 14 };
const DESIRES: Shape = Shape { base: 480, jitter: 220, horizon: 30 };
const SOCIAL: Shape = Shape { base: 440, jitter: 200, horizon: 21 };
const PRIMARY: Shape = Shape { base: 520, jitter: 220, horizon: 12 };
const COMPLEX: Shape = Shape { base: 620, jitter: 240, horizon: 24 };
const HEALTHY: Shape = Shape { base: 720, jitter: 160, horizon: 45 };
const UNHEALTHY: Shape = Shape { base: 520, jitter: 200, horizon: 30 };

/// One plus up to `extra` more, at most four.
fn list_len(rng: &mut FacetRng, extra: i32, bonus: i32) -> usize {
    (1 + rng.int(0, extra) + bonus).clamp(1, 4) as usize
}

fn recency(rng: &mut FacetRng, horizon: i32) -> u32 {
    rng.int(1, horizon).clamp(1, 365) as u32
}

fn thoughts(rng: &mut FacetRng, pool: &[String], count: usize, shape: &Shape, stress: f64) -> Vec<ThoughtEntry> {
    if pool.is_empty() {
        return Vec::new();
    }
    let stress_boost = (stress * 220.0).round() as i32;
    rng.pick_k(&unique(pool), count)
        .into_iter()
        .map(|item| {
            let valence = infer_valence(&item);
            let valence_boost = match valence {
                Valence::Negative => 140,
                Valence::Positive => -40,
                Valence::Neutral => 0,
            };
            let intensity01k =
                Fixed01k::new(shape.base + rng.int(-shape.jitter, shape.jitter) + stress_boost + valence_boost);
            ThoughtEntry {
                item,
                valence,
                intensity01k,
                recency_days: recency(rng, shape.horizon),
            }
        })
        .collect()
}

fn emotions(rng: &mut FacetRng, pool: &[String], count: usize, shape: &Shape, stress: f64) -> Vec<EmotionEntry> {
    if pool.is_empty() {
        return Vec::new();
    }
    let stress_boost = (stress * 200.0).round() as i32;
    rng.pick_k(&unique(pool), count)
        .into_iter()
        .map(|item| {
            let valence = infer_valence(&item);
            let intensity01k = Fixed01k::new(shape.base + rng.int(-shape.jitter, shape.jitter) + stress_boost);
            let duration_hours = rng.int(1, shape.horizon).clamp(1, 72) as u32;
            let mood = 140 + rng.int(0, 260);
            let mood_impact01k = SignedFixed01k::new(if valence == Valence::Negative { -mood } else { mood });
            let tilts: &[&str] = match valence {
                Valence::Positive => &POSITIVE_TILTS,
                Valence::Negative => &NEGATIVE_TILTS,
                Valence::Neutral => &NEUTRAL_TILTS,
            };
            let behavior_tilt = rng.pick(tilts).copied().unwrap_or("steady").to_string();
            EmotionEntry {
                item,
                intensity01k,
                duration_hours,
                mood_impact01k,
                behavior_tilt,
                valence,
            }
        })
        .collect()
}

fn coping(rng: &mut FacetRng, pool: &[String], count: usize, shape: &Shape, stress: f64) -> Vec<CopingEntry> {
    if pool.is_empty() {
        return Vec::new();
    }
    let stress_penalty = (stress * 180.0).round() as i32;
    rng.pick_k(&unique(pool), count)
        .into_iter()
        .map(|item| {
            let effectiveness01k =
                Fixed01k::new(shape.base + rng.int(-shape.jitter, shape.jitter) - stress_penalty);
            CopingEntry {
                item,
                effectiveness01k,
                recency_days: recency(rng, shape.horizon),
            }
        })
        .collect()
}

/// Builds the snapshot from the `thoughtsEmotions` stream. Empty pools give
/// empty lists, but their list length is still drawn.
pub fn compute_thoughts_emotions(rng: &mut FacetRng, vocab: &Vocab, latents: &Latents) -> ThoughtsEmotions {
    let stress = latents.stress_reactivity.unit();
    let pools = &vocab.thoughts_emotions;
    let t = &pools.thoughts;

    let n = list_len(rng, 2, 0);
    let immediate_observations = thoughts(rng, &t.immediate_observations, n, &OBSERVATIONS, stress);
    let n = list_len(rng, 2, 0);
    let reflections = thoughts(rng, &t.reflections, n, &REFLECTIONS, stress);
    let n = list_len(rng, 2, 0);
    let memories = thoughts(rng, &t.memories, n, &MEMORIES, stress);
    let n = list_len(rng, 2, i32::from(stress > 0.6));
    let worries = thoughts(rng, &t.worries, n, &WORRIES, stress);
    let n = list_len(rng, 2, 0);
    let desires = thoughts(rng, &t.desires, n, &DESIRES, stress);
    let n = list_len(rng, 2, 0);
    let social_thoughts = thoughts(rng, &t.social_thoughts, n, &SOCIAL, stress);

    let n = list_len(rng, 2, 0);
    let primary = emotions(rng, &pools.emotions.primary, n, &PRIMARY, stress);
    let n = list_len(rng, 1, 0);
    let complex = emotions(rng, &pools.emotions.complex, n, &COMPLEX, stress);

    let n = list_len(rng, 2, 0);
    let healthy = coping(rng, &pools.coping.healthy, n, &HEALTHY, stress);
    let n = list_len(rng, 1, 0);
    let unhealthy = coping(rng, &pools.coping.unhealthy, n, &UNHEALTHY, stress);

    ThoughtsEmotions {
        thoughts: Thoughts {
            immediate_observations,
            reflections,
            memories,
            worries,
            desires,
            social_thoughts,
        },
        emotions: Emotions { primary, complex },
        coping: Coping { healthy, unhealthy },
    }
}
