//! Knowledge and ignorance
//!
//! Five categories of items, each picked by keyword-weighted sampling and
//! annotated with recall metadata, plus an overall depth per category.

use agent_model::{
    Fixed01k, KnowledgeAccuracy, KnowledgeCategories, KnowledgeIgnorance, KnowledgeItem, Latents,
    TierBand,
};

use crate::facets::{has_role, mentions};
use crate::rng::FacetRng;
use crate::vocab::Vocab;
use crate::weighted::{weighted_pick_k_unique, Weighted};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Strengths,
    Gaps,
    FalseBeliefs,
    Sources,
    Barriers,
}

impl Category {
    fn base_confidence(self) -> f64 {
        match self {
            Category::Strengths => 650.0,
            Category::Gaps => 350.0,
            Category::FalseBeliefs => 700.0,
            Category::Sources => 550.0,
            Category::Barriers => 450.0,
        }
    }

    fn base_decay(self) -> f64 {
        match self {
            Category::Strengths => 320.0,
            Category::Gaps => 180.0,
            Category::FalseBeliefs => 240.0,
            Category::Sources => 280.0,
            Category::Barriers => 210.0,
        }
    }

    /// Range of days since the item was last drawn on.
    fn last_used_range(self) -> (i32, i32) {
        match self {
            Category::Strengths => (10, 180),
            Category::Gaps => (120, 360),
            Category::FalseBeliefs => (90, 300),
            Category::Sources => (30, 200),
            Category::Barriers => (60, 260),
        }
    }
}

struct Profile<'a> {
    latents: &'a Latents,
    roles: &'a [String],
    tier: TierBand,
}

impl Profile<'_> {
    fn has_role(&self, role: &str) -> bool {
        has_role(self.roles, role)
    }

    fn weight(&self, category: Category, item: &str) -> f64 {
        let l = self.latents;
        let cosmo = l.cosmopolitanism.unit();
        let tech = l.tech_fluency.unit();
        let social = l.social_battery.unit();
        let adapt = l.adaptability.unit();
        let inst = l.institutional_embeddedness.unit();
        let mut w = 1.0;
        match category {
            Category::Strengths => {
                if mentions(item, &["tradecraft", "surveillance"]) && self.has_role("operative") {
                    w += 2.0;
                }
                if mentions(item, &["analysis"]) && self.has_role("analyst") {
                    w += 2.0;
                }
                if mentions(item, &["language"]) && cosmo > 0.6 {
                    w += 1.5;
                }
                if mentions(item, &["geopolitical"]) && self.has_role("diplomat") {
                    w += 2.0;
                }
                if mentions(item, &["technology", "security"]) && tech > 0.6 {
                    w += 1.5;
                }
            }
            Category::Gaps => {
                if mentions(item, &["cyber", "technology"]) && tech < 0.4 {
                    w += 2.0;
                }
                if mentions(item, &["cultural"]) && cosmo < 0.4 {
                    w += 1.5;
                }
                if mentions(item, &["language"]) && cosmo < 0.4 {
                    w += 1.5;
                }
            }
            Category::FalseBeliefs => {
                if mentions(item, &["outdated", "myths", "hollywood"]) {
                    w += 1.0;
                }
            }
            Category::Sources => {
                if mentions(item, &["official", "briefings", "classified", "training", "databases"]) {
                    w += 1.5 * inst + if self.tier == TierBand::Elite { 0.5 } else { 0.0 };
                }
                if mentions(item, &["colleague", "gossip", "veteran"]) {
                    w += social;
                }
                if mentions(item, &["criminal"]) {
                    w += if self.has_role("operative") { 1.5 } else { 0.5 };
                }
                if mentions(item, &["online", "research"]) {
                    w += 1.2 * tech;
                }
                if mentions(item, &["family"]) {
                    w += 0.6 * social;
                }
                if mentions(item, &["experience", "observation"]) {
                    w += 0.6 * adapt;
                }
            }
            Category::Barriers => {
                if mentions(item, &["need-to-know", "compartmentalization"]) {
                    w += 1.5 * inst;
                }
                if mentions(item, &["language", "context"]) {
                    w += 1.2 * (1.0 - cosmo);
                }
                if mentions(item, &["trauma"]) {
                    w += 1.2 * l.stress_reactivity.unit();
                }
                if mentions(item, &["pride", "fear"]) {
                    w += 0.8 * l.opsec_discipline.unit();
                }
                if mentions(item, &["confirmation", "cognitive"]) {
                    w += 0.8 * (1.0 - adapt);
                }
            }
        }
        w
    }

    fn last_used_days(&self, rng: &mut FacetRng, category: Category, item: &str) -> u32 {
        let l = self.latents;
        let (min, max) = category.last_used_range();
        let mut days = rng.int(min, max);
        if mentions(item, &["tradecraft", "surveillance"]) && self.has_role("operative") {
            days -= 40;
        }
        if mentions(item, &["analysis"]) && self.has_role("analyst") {
            days -= 30;
        }
        if mentions(item, &["language"]) && l.cosmopolitanism > 600 {
            days -= 30;
        }
        if mentions(item, &["technology", "cyber"]) && l.tech_fluency > 600 {
            days -= 30;
        }
        days.clamp(0, 365) as u32
    }

    fn decay(&self, rng: &mut FacetRng, category: Category) -> Fixed01k {
        let l = self.latents;
        let mut value = category.base_decay()
            - 90.0 * l.curiosity_bandwidth.unit()
            - 60.0 * l.adaptability.unit()
            - 50.0 * l.planning_horizon.unit();
        if category == Category::Strengths && l.tech_fluency < 400 {
            value += 80.0;
        }
        Fixed01k::clamped(value + f64::from(rng.int(-80, 80)))
    }

    fn confidence(&self, rng: &mut FacetRng, category: Category) -> Fixed01k {
        let l = self.latents;
        let curiosity = l.curiosity_bandwidth.unit();
        let mut value = category.base_confidence();
        match category {
            Category::Strengths => value += 80.0 * curiosity,
            Category::Sources => {
                value += 80.0 * curiosity;
                if self.tier == TierBand::Elite {
                    value += 40.0;
                }
            }
            Category::Gaps => value -= 60.0 * curiosity,
            Category::FalseBeliefs => {
                value -= 60.0 * curiosity + 40.0 * l.adaptability.unit();
                if l.publicness > 600 {
                    value += 60.0;
                }
            }
            Category::Barriers => {
                if l.opsec_discipline > 600 {
                    value += 60.0;
                }
            }
        }
        Fixed01k::clamped(value + f64::from(rng.int(-120, 120)))
    }

    fn item(&self, rng: &mut FacetRng, category: Category, item: String) -> KnowledgeItem {
        let last_used_days = self.last_used_days(rng, category, &item);
        let decay_rate01k = self.decay(rng, category);
        let accuracy = accuracy(category, &item, last_used_days, decay_rate01k);
        let confidence01k = self.confidence(rng, category);
        KnowledgeItem {
            item,
            accuracy,
            confidence01k,
            last_used_days,
            decay_rate01k,
        }
    }

    fn pick(&self, rng: &mut FacetRng, category: Category, pool: &[String]) -> Vec<KnowledgeItem> {
        if pool.is_empty() {
            return Vec::new();
        }
        let count = rng.count(2, 4);
        let candidates: Vec<Weighted<String>> = pool
            .iter()
            .map(|item| Weighted::new(item.clone(), self.weight(category, item)))
            .collect();
        weighted_pick_k_unique(rng, &candidates, count)
            .into_iter()
            .map(|item| self.item(rng, category, item))
            .collect()
    }
}

fn accuracy(category: Category, item: &str, last_used_days: u32, decay: Fixed01k) -> KnowledgeAccuracy {
    match category {
        Category::Gaps | Category::Barriers => KnowledgeAccuracy::Unknown,
        Category::FalseBeliefs => KnowledgeAccuracy::Wrong,
        Category::Sources => {
            if mentions(item, &["gossip", "embellished", "rabbit", "self-serving", "partially"]) {
                KnowledgeAccuracy::Partial
            } else {
                KnowledgeAccuracy::Correct
            }
        }
        Category::Strengths => {
            if decay > 650 && last_used_days > 180 {
                KnowledgeAccuracy::Partial
            } else {
                KnowledgeAccuracy::Correct
            }
        }
    }
}

fn depths(rng: &mut FacetRng, l: &Latents) -> KnowledgeCategories<Fixed01k> {
    let mut jitter = || f64::from(rng.int(-120, 120));
    let strengths = Fixed01k::clamped(
        0.4 * l.curiosity_bandwidth.as_f64()
            + 0.25 * l.adaptability.as_f64()
            + 0.2 * l.tech_fluency.as_f64()
            + 0.15 * l.planning_horizon.as_f64()
            + jitter(),
    );
    let gaps = Fixed01k::clamped(
        0.45 * l.curiosity_bandwidth.inverted().as_f64()
            + 0.25 * l.tech_fluency.inverted().as_f64()
            + 0.2 * l.cosmopolitanism.inverted().as_f64()
            + 0.1 * l.adaptability.inverted().as_f64()
            + jitter(),
    );
    let false_beliefs = Fixed01k::clamped(
        0.4 * l.curiosity_bandwidth.inverted().as_f64()
            + 0.3 * l.adaptability.inverted().as_f64()
            + 0.3 * l.planning_horizon.inverted().as_f64()
            + jitter(),
    );
    let sources = Fixed01k::clamped(
        0.35 * l.curiosity_bandwidth.as_f64()
            + 0.3 * l.institutional_embeddedness.as_f64()
            + 0.2 * l.social_battery.as_f64()
            + 0.15 * l.opsec_discipline.as_f64()
            + jitter(),
    );
    let barriers = Fixed01k::clamped(
        0.45 * l.opsec_discipline.as_f64()
            + 0.3 * l.institutional_embeddedness.as_f64()
            + 0.15 * l.publicness.inverted().as_f64()
            + 0.1 * l.cosmopolitanism.inverted().as_f64()
            + jitter(),
    );
    KnowledgeCategories {
        strengths,
        gaps,
        false_beliefs,
        sources,
        barriers,
    }
}

/// Computes the knowledge profile from the `knowledge-ignorance` stream.
pub fn compute_knowledge(
    rng: &mut FacetRng,
    vocab: &Vocab,
    latents: &Latents,
    roles: &[String],
    tier: TierBand,
) -> KnowledgeIgnorance {
    let pools = &vocab.knowledge_ignorance;
    let profile = Profile { latents, roles, tier };

    let items = KnowledgeCategories {
        strengths: profile.pick(rng, Category::Strengths, &pools.knowledge_strengths),
        gaps: profile.pick(rng, Category::Gaps, &pools.knowledge_gaps),
        false_beliefs: profile.pick(rng, Category::FalseBeliefs, &pools.false_beliefs),
        sources: profile.pick(rng, Category::Sources, &pools.information_sources),
        barriers: profile.pick(rng, Category::Barriers, &pools.information_barriers),
    };
    let depths01k = depths(rng, latents);
    let names = |list: &[KnowledgeItem]| list.iter().map(|k| k.item.clone()).collect::<Vec<_>>();

    KnowledgeIgnorance {
        knowledge_strengths: names(&items.strengths),
        knowledge_gaps: names(&items.gaps),
        false_beliefs: names(&items.false_beliefs),
        information_sources: names(&items.sources),
        information_barriers: names(&items.barriers),
        depths01k,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{Facet, Seed};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn vocab() -> Vocab {
        let mut vocab = Vocab::default();
        let k = &mut vocab.knowledge_ignorance;
        k.knowledge_strengths = strings(&["tradecraft basics", "regional analysis", "language drills", "cooking"]);
        k.knowledge_gaps = strings(&["cyber hygiene", "cultural nuance", "tax law"]);
        k.false_beliefs = strings(&["outdated maps", "hollywood hacking"]);
        k.information_sources = strings(&["office gossip", "official briefings", "online research"]);
        k.information_barriers = strings(&["need-to-know walls", "language gaps", "pride"]);
        vocab
    }

    #[test]
    fn test_accuracy_by_category() {
        let decay = Fixed01k::new(700);
        assert_eq!(accuracy(Category::Gaps, "x", 0, decay), KnowledgeAccuracy::Unknown);
        assert_eq!(accuracy(Category::FalseBeliefs, "x", 0, decay), KnowledgeAccuracy::Wrong);
        assert_eq!(accuracy(Category::Sources, "Office gossip", 0, decay), KnowledgeAccuracy::Partial);
        assert_eq!(accuracy(Category::Strengths, "x", 200, decay), KnowledgeAccuracy::Partial);
        assert_eq!(accuracy(Category::Strengths, "x", 100, decay), KnowledgeAccuracy::Correct);
    }

    #[test]
    fn test_items_mirror_name_lists() {
        let mut rng = Seed::normalize("knowledge").rng(Facet::KnowledgeIgnorance);
        let roles = strings(&["operative"]);
        let k = compute_knowledge(&mut rng, &vocab(), &Latents::default(), &roles, TierBand::Middle);
        assert!((2..=4).contains(&k.knowledge_strengths.len()));
        assert_eq!(k.false_beliefs.len(), 2);
        assert_eq!(
            k.knowledge_gaps,
            k.items.gaps.iter().map(|i| i.item.clone()).collect::<Vec<_>>()
        );
        assert!(k.items.false_beliefs.iter().all(|i| i.accuracy == KnowledgeAccuracy::Wrong));
        assert!(k.items.strengths.iter().all(|i| i.last_used_days <= 365));
    }

    #[test]
    fn test_empty_pools_still_give_depths() {
        let mut rng = Seed::normalize("empty").rng(Facet::KnowledgeIgnorance);
        let k = compute_knowledge(&mut rng, &Vocab::default(), &Latents::default(), &[], TierBand::Mass);
        assert!(k.knowledge_strengths.is_empty());
        assert!(k.items.sources.is_empty());
        // neutral latents put every depth near the middle
        assert!((380..=620).contains(&k.depths01k.strengths.get()));
    }
}
