//! Seed normalization and per-facet random streams
//!
//! Every facet draws from its own mulberry32 stream, seeded by hashing the
//! normalized seed together with the facet name. Streams never share state,
//! so adding draws to one facet cannot shift the values of another.

use rand::{RngCore, SeedableRng};
use std::fmt;

/// Default cap on the normalized seed length, in characters.
pub const MAX_SEED_CHARS: usize = 200;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the UTF-16 code units of `input`.
pub fn fnv1a32(input: &str) -> u32 {
    input.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Names of the independent random streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Base,
    Name,
    Languages,
    Appearance,
    Latents,
    Capabilities,
    Traits,
    Skills,
    Ethics,
    RedLines,
    Visibility,
    Covers,
    Affect,
    SelfConcept,
    ThoughtsEmotions,
    KnowledgeIgnorance,
    Timeline,
    MinorityStatus,
    TimelineGuarantees,
    BehaviorLens,
    PressureResponse,
    DetailGeneration,
    Preferences,
    Routines,
    Vices,
    Logistics,
}

impl Facet {
    pub const ALL: [Facet; 26] = [
        Facet::Base,
        Facet::Name,
        Facet::Languages,
        Facet::Appearance,
        Facet::Latents,
        Facet::Capabilities,
        Facet::Traits,
        Facet::Skills,
        Facet::Ethics,
        Facet::RedLines,
        Facet::Visibility,
        Facet::Covers,
        Facet::Affect,
        Facet::SelfConcept,
        Facet::ThoughtsEmotions,
        Facet::KnowledgeIgnorance,
        Facet::Timeline,
        Facet::MinorityStatus,
        Facet::TimelineGuarantees,
        Facet::BehaviorLens,
        Facet::PressureResponse,
        Facet::DetailGeneration,
        Facet::Preferences,
        Facet::Routines,
        Facet::Vices,
        Facet::Logistics,
    ];

    /// Stream name hashed into the facet seed.
    pub fn as_str(self) -> &'static str {
        match self {
            Facet::Base => "base",
            Facet::Name => "name",
            Facet::Languages => "languages",
            Facet::Appearance => "appearance",
            Facet::Latents => "latents",
            Facet::Capabilities => "capabilities",
            Facet::Traits => "traits",
            Facet::Skills => "skills",
            Facet::Ethics => "ethics",
            Facet::RedLines => "red_lines",
            Facet::Visibility => "visibility",
            Facet::Covers => "covers",
            Facet::Affect => "affect",
            Facet::SelfConcept => "selfConcept",
            Facet::ThoughtsEmotions => "thoughtsEmotions",
            Facet::KnowledgeIgnorance => "knowledge-ignorance",
            Facet::Timeline => "timeline",
            Facet::MinorityStatus => "minorityStatus",
            Facet::TimelineGuarantees => "timelineGuarantees",
            Facet::BehaviorLens => "behaviorLens",
            Facet::PressureResponse => "pressureResponse",
            Facet::DetailGeneration => "detailGeneration",
            Facet::Preferences => "preferences",
            Facet::Routines => "routines",
            Facet::Vices => "vices",
            Facet::Logistics => "logistics",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized seed string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seed(String);

impl Seed {
    /// Trims, collapses whitespace runs to one space and caps the length.
    pub fn normalize(raw: &str) -> Self {
        Self::normalize_with_limit(raw, MAX_SEED_CHARS)
    }

    pub fn normalize_with_limit(raw: &str, max_chars: usize) -> Self {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        Self(collapsed.chars().take(max_chars).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the 32-bit seed of one facet stream.
    pub fn facet(&self, facet: Facet) -> FacetSeed {
        FacetSeed {
            facet,
            value: fnv1a32(&format!("{}::{}", self.0, facet.as_str())),
        }
    }

    /// Shorthand for `FacetRng::new(self.facet(facet))`.
    pub fn rng(&self, facet: Facet) -> FacetRng {
        FacetRng::new(self.facet(facet))
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The derived seed of one facet stream.
///
/// Only obtainable through [`Seed::facet`], so a stream cannot be built from
/// an ad hoc string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FacetSeed {
    facet: Facet,
    value: u32,
}

impl FacetSeed {
    pub fn facet(self) -> Facet {
        self.facet
    }

    pub fn value(self) -> u32 {
        self.value
    }
}

/// mulberry32 generator bound to one facet.
#[derive(Debug, Clone)]
pub struct FacetRng {
    state: u32,
}

impl FacetRng {
    pub fn new(seed: FacetSeed) -> Self {
        Self { state: seed.value }
    }

    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut x = self.state;
        x = (x ^ (x >> 15)).wrapping_mul(x | 1);
        x ^= x.wrapping_add((x ^ (x >> 7)).wrapping_mul(x | 61));
        x ^ (x >> 14)
    }

    /// Uniform draw in `[0, 1)`.
    pub fn next01(&mut self) -> f64 {
        f64::from(self.step()) / 4_294_967_296.0
    }

    /// Uniform integer in `[min, max]`. Returns `min` without drawing when
    /// the range is empty or a single value.
    pub fn int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = f64::from(max) - f64::from(min) + 1.0;
        min + (self.next01() * span).floor() as i32
    }

    /// Uniform count in `[min, max]`.
    pub fn count(&mut self, min: usize, max: usize) -> usize {
        self.int(min as i32, max as i32).max(0) as usize
    }

    /// Uniform index into a collection of `len` items.
    pub fn index(&mut self, len: usize) -> usize {
        ((self.next01() * len as f64).floor() as usize).min(len.saturating_sub(1))
    }

    /// Uniform pick. `None` for an empty slice, without drawing.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let i = self.index(items.len());
        items.get(i)
    }

    /// Shuffles a copy from the end and keeps the first `min(k, len)` items.
    pub fn pick_k<T: Clone>(&mut self, items: &[T], k: usize) -> Vec<T> {
        let mut copy = items.to_vec();
        for i in (1..copy.len()).rev() {
            let j = self.index(i + 1);
            copy.swap(i, j);
        }
        copy.truncate(k.min(items.len()));
        copy
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next01() < p
    }
}

impl RngCore for FacetRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.step());
        let lo = u64::from(self.step());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for FacetRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self {
            state: u32::from_le_bytes(seed),
        }
    }
}

/// Opens facet streams for one agent and remembers which were opened.
#[derive(Debug, Clone)]
pub struct Streams {
    seed: Seed,
    opened: Vec<FacetSeed>,
}

impl Streams {
    pub fn new(seed: Seed) -> Self {
        Self {
            seed,
            opened: Vec::new(),
        }
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn open(&mut self, facet: Facet) -> FacetRng {
        let facet_seed = self.seed.facet(facet);
        if !self.opened.contains(&facet_seed) {
            self.opened.push(facet_seed);
        }
        FacetRng::new(facet_seed)
    }

    /// Stream seeds in first-opened order.
    pub fn opened(&self) -> &[FacetSeed] {
        &self.opened
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::collections::HashSet;

    #[test]
    fn test_fnv_known_vectors() {
        assert_eq!(fnv1a32(""), 0x811c_9dc5);
        assert_eq!(fnv1a32("a"), 0xe40c_292c);
        assert_eq!(fnv1a32("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn test_seed_normalization() {
        assert_eq!(Seed::normalize("  hello \t\n  world  ").as_str(), "hello world");
        let long = "x".repeat(500);
        assert_eq!(Seed::normalize(&long).as_str().chars().count(), MAX_SEED_CHARS);
        assert_eq!(Seed::normalize_with_limit("abcdef", 3).as_str(), "abc");
    }

    #[test]
    fn test_facet_names_are_unique() {
        let names: HashSet<_> = Facet::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(names.len(), Facet::ALL.len());
    }

    #[test]
    fn test_facet_seed_is_hash_of_joined_name() {
        let seed = Seed::normalize("trace-0");
        assert_eq!(seed.facet(Facet::Latents).value(), fnv1a32("trace-0::latents"));
        assert_ne!(seed.facet(Facet::Latents), seed.facet(Facet::Skills));
    }

    #[test]
    fn test_rng_determinism() {
        let seed = Seed::normalize("determinism");
        let mut rng1 = seed.rng(Facet::Base);
        let mut rng2 = seed.rng(Facet::Base);
        let values1: Vec<f64> = (0..100).map(|_| rng1.next01()).collect();
        let values2: Vec<f64> = (0..100).map(|_| rng2.next01()).collect();
        assert_eq!(values1, values2);
        assert!(values1.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_mulberry_first_output() {
        // Reference value of mulberry32 seeded with 0.
        let mut rng = FacetRng::from_seed(0u32.to_le_bytes());
        assert_eq!(rng.next_u32(), 1_144_304_738);
    }

    #[test]
    fn test_int_bounds_and_degenerate_range() {
        let mut rng = Seed::normalize("int").rng(Facet::Base);
        for _ in 0..1000 {
            let v = rng.int(-3, 7);
            assert!((-3..=7).contains(&v));
        }
        let mut a = rng.clone();
        assert_eq!(a.int(5, 5), 5);
        assert_eq!(a.int(9, 2), 9);
        assert_eq!(a.next_u32(), rng.next_u32(), "degenerate ranges must not draw");
    }

    #[test]
    fn test_pick_k_is_unique_and_bounded() {
        let mut rng = Seed::normalize("pick").rng(Facet::Base);
        let items = ["a", "b", "c", "d", "e"];
        let picked = rng.pick_k(&items, 3);
        assert_eq!(picked.len(), 3);
        let set: HashSet<_> = picked.iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(rng.pick_k(&items, 10).len(), 5);
        assert!(rng.pick::<u8>(&[]).is_none());
    }

    #[test]
    fn test_rand_traits_work_on_facet_rng() {
        let mut rng = FacetRng::from_seed([1, 2, 3, 4]);
        let roll: u8 = rng.gen_range(1..=6);
        assert!((1..=6).contains(&roll));
        let mut buf = [0u8; 7];
        rng.fill_bytes(&mut buf);
    }

    #[test]
    fn test_streams_record_each_facet_once() {
        let mut streams = Streams::new(Seed::normalize("streams"));
        let mut a = streams.open(Facet::Affect);
        let _ = streams.open(Facet::Latents);
        let mut b = streams.open(Facet::Affect);
        assert_eq!(a.next_u32(), b.next_u32());
        let facets: Vec<_> = streams.opened().iter().map(|s| s.facet()).collect();
        assert_eq!(facets, vec![Facet::Affect, Facet::Latents]);
    }
}
