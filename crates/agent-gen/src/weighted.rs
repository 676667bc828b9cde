//! Weighted random choice
//!
//! All helpers draw from a [`FacetRng`] so selections stay reproducible.
//! Non-finite and non-positive weights never win against a positive one.

use crate::rng::FacetRng;

/// A candidate with a selection weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Weighted<T> {
    pub item: T,
    pub weight: f64,
}

impl<T> Weighted<T> {
    pub fn new(item: T, weight: f64) -> Self {
        Self { item, weight }
    }

    fn is_live(&self) -> bool {
        self.weight.is_finite() && self.weight > 0.0
    }
}

/// Picks one candidate with probability proportional to its weight.
///
/// Uses a single draw. When no weight is positive the choice is uniform over
/// all candidates. Returns `None` only for an empty candidate list.
pub fn weighted_pick<T: Clone>(rng: &mut FacetRng, candidates: &[Weighted<T>]) -> Option<T> {
    if candidates.is_empty() {
        return None;
    }

    let total: f64 = candidates.iter().filter(|c| c.is_live()).map(|c| c.weight).sum();
    if total <= 0.0 {
        return rng.pick(candidates).map(|c| c.item.clone());
    }

    let roll = rng.next01() * total;
    let mut cumulative = 0.0;
    let mut last_live = None;
    for candidate in candidates.iter().filter(|c| c.is_live()) {
        cumulative += candidate.weight;
        if roll < cumulative {
            return Some(candidate.item.clone());
        }
        last_live = Some(candidate);
    }
    last_live.map(|c| c.item.clone())
}

/// Picks up to `k` distinct items by repeated weighted draws without
/// replacement.
pub fn weighted_pick_k_unique<T: Clone + PartialEq>(
    rng: &mut FacetRng,
    candidates: &[Weighted<T>],
    k: usize,
) -> Vec<T> {
    let mut remaining = candidates.to_vec();
    let mut chosen = Vec::new();
    while chosen.len() < k {
        let Some(item) = weighted_pick(rng, &remaining) else {
            break;
        };
        remaining.retain(|c| c.item != item);
        chosen.push(item);
    }
    chosen
}

/// Takes up to `min(primary_max, k)` items from the contextual pool, then
/// fills the rest from the general pool without repeating a choice.
pub fn pick_k_hybrid<T: Clone + PartialEq>(
    rng: &mut FacetRng,
    primary: &[T],
    fallback: &[T],
    k: usize,
    primary_max: usize,
) -> Vec<T> {
    let primary = unique(primary);
    let mut chosen = rng.pick_k(&primary, primary_max.min(k));
    if chosen.len() < k {
        let rest: Vec<T> = unique(fallback)
            .into_iter()
            .filter(|item| !chosen.contains(item))
            .collect();
        let fill = rng.pick_k(&rest, k - chosen.len());
        chosen.extend(fill);
    }
    chosen
}

/// Order-preserving de-duplication.
pub fn unique<T: Clone + PartialEq>(items: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}
