//! Generation input and default resolution
//!
//! [`GenerationContext`] is what a caller asks for; every field but the seed
//! is optional. [`ResolvedContext::resolve`] fills each missing value from the
//! `base` stream in a fixed order, so facets never see an unset input and
//! never draw defaults of their own.

use agent_model::{DiasporaStatus, Fixed01k, TierBand};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::GeneratorConfig;
use crate::rng::{Facet, FacetRng, Seed};
use crate::vocab::{Country, Priors, SecurityEnv, Vocab};
use crate::weighted::{weighted_pick, Weighted};

pub mod context_constants {
    pub const BIRTH_YEAR_MIN: i32 = 1800;
    pub const BIRTH_YEAR_MAX: i32 = 2525;
    pub const AS_OF_YEAR_MIN: i32 = 1900;
    pub const AS_OF_YEAR_MAX: i32 = 2100;
    pub const MAX_AGE: u32 = 120;
    pub const MAX_ROLE_TAGS: usize = 4;
    pub const DEFAULT_ROLE_DRAWS: usize = 2;
    /// Priors are looked up for the decade an agent turns this old.
    pub const COMING_OF_AGE: i32 = 20;
    pub const FALLBACK_SPIRITUALITY: &str = "secular";
    pub const FALLBACK_URBANICITY: &str = "urban";
    pub const DISPLACEMENT_TAG: &str = "displacement";
    pub const FAMILY_BASE_CHANCE: f64 = 0.35;
    pub const FAMILY_CHANCE_PER_YEAR: f64 = 0.01;
}

use context_constants::*;

/// Caller-supplied generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationContext {
    pub seed: String,
    pub birth_year: Option<i32>,
    pub as_of_year: Option<i32>,
    pub tier_band: Option<TierBand>,
    pub role_seed_tags: Vec<String>,
    pub career_track_tag: Option<String>,
    pub education_track_tag: Option<String>,
    pub home_country_iso3: Option<String>,
    pub current_country_iso3: Option<String>,
    pub diaspora_status: Option<DiasporaStatus>,
    pub background_adversity_tags: Option<Vec<String>>,
    pub spirituality_affiliation_tag: Option<String>,
    pub has_family: Option<bool>,
    pub include_trace: bool,
}

impl GenerationContext {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            ..Self::default()
        }
    }

    pub fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    pub fn with_as_of_year(mut self, year: i32) -> Self {
        self.as_of_year = Some(year);
        self
    }

    pub fn with_tier(mut self, tier: TierBand) -> Self {
        self.tier_band = Some(tier);
        self
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.role_seed_tags = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_career(mut self, career: impl Into<String>) -> Self {
        self.career_track_tag = Some(career.into());
        self
    }

    pub fn with_education(mut self, education: impl Into<String>) -> Self {
        self.education_track_tag = Some(education.into());
        self
    }

    pub fn with_home_country(mut self, iso3: impl Into<String>) -> Self {
        self.home_country_iso3 = Some(iso3.into());
        self
    }

    pub fn with_current_country(mut self, iso3: impl Into<String>) -> Self {
        self.current_country_iso3 = Some(iso3.into());
        self
    }

    pub fn with_diaspora(mut self, status: DiasporaStatus) -> Self {
        self.diaspora_status = Some(status);
        self
    }

    pub fn with_adversity<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.background_adversity_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_spirituality(mut self, tag: impl Into<String>) -> Self {
        self.spirituality_affiliation_tag = Some(tag.into());
        self
    }

    pub fn with_family(mut self, has_family: bool) -> Self {
        self.has_family = Some(has_family);
        self
    }

    pub fn with_trace(mut self, include: bool) -> Self {
        self.include_trace = include;
        self
    }
}

/// A generation request with every input decided.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContext {
    pub seed: Seed,
    pub birth_year: i32,
    pub as_of_year: i32,
    pub age: u32,
    pub tier: TierBand,
    pub roles: Vec<String>,
    pub career: String,
    pub education: String,
    pub home: Country,
    pub current_country_iso3: String,
    pub diaspora: DiasporaStatus,
    pub adversity: Vec<String>,
    pub spirituality: String,
    pub urbanicity: String,
    pub origin_region: Option<String>,
    pub has_family: bool,
    pub security_env: Option<SecurityEnv>,
    pub include_trace: bool,
    /// Inputs that were drawn rather than given, in draw order.
    pub drawn: Vec<&'static str>,
}

impl ResolvedContext {
    pub fn resolve(
        ctx: &GenerationContext,
        vocab: &Vocab,
        priors: &Priors,
        countries: &[Country],
        config: &GeneratorConfig,
    ) -> Self {
        let seed = Seed::normalize_with_limit(&ctx.seed, config.generation.seed_max_chars);
        let mut rng = seed.rng(Facet::Base);
        let mut drawn = Vec::new();

        let birth_year = match ctx.birth_year {
            Some(year) => year,
            None => {
                drawn.push("birthYear");
                rng.int(config.generation.birth_year_min, config.generation.birth_year_max)
            }
        }
        .clamp(BIRTH_YEAR_MIN, BIRTH_YEAR_MAX);
        let as_of_year = ctx
            .as_of_year
            .unwrap_or(config.generation.as_of_year)
            .clamp(AS_OF_YEAR_MIN, AS_OF_YEAR_MAX);
        let age = (as_of_year.saturating_sub(birth_year).max(0) as u32).min(MAX_AGE);

        let tier = match ctx.tier_band {
            Some(tier) => tier,
            None => {
                drawn.push("tierBand");
                rng.pick(&TierBand::ALL).copied().unwrap_or(TierBand::Middle)
            }
        };

        let home = match &ctx.home_country_iso3 {
            Some(iso3) => find_country(countries, iso3),
            None => {
                drawn.push("homeCountryIso3");
                rng.pick(countries).cloned().unwrap_or_else(Country::unknown)
            }
        };

        let roles = if ctx.role_seed_tags.is_empty() {
            drawn.push("roleSeedTags");
            rng.pick_k(&vocab.identity.role_seed_tags, DEFAULT_ROLE_DRAWS)
        } else {
            ctx.role_seed_tags.iter().take(MAX_ROLE_TAGS).cloned().collect()
        };

        let diaspora = match ctx.diaspora_status {
            Some(status) => status,
            None => {
                drawn.push("diasporaStatus");
                draw_diaspora(&mut rng)
            }
        };

        let current_country_iso3 = match &ctx.current_country_iso3 {
            Some(iso3) => iso3.clone(),
            None if diaspora.lives_abroad() => {
                drawn.push("currentCountryIso3");
                let abroad: Vec<&Country> = countries.iter().filter(|c| c.iso3 != home.iso3).collect();
                rng.pick(&abroad)
                    .map(|c| c.iso3.clone())
                    .unwrap_or_else(|| home.iso3.clone())
            }
            None => home.iso3.clone(),
        };

        let bucket = priors.bucket(&home.iso3, birth_year + COMING_OF_AGE);
        if bucket.is_none() {
            tracing::warn!(
                country = %home.iso3,
                year = birth_year + COMING_OF_AGE,
                "no priors bucket, using uniform track weights"
            );
        }

        let career = match &ctx.career_track_tag {
            Some(tag) => tag.clone(),
            None => {
                drawn.push("careerTrackTag");
                draw_track(
                    &mut rng,
                    &vocab.identity.career_tracks,
                    bucket.map(|b| &b.career_track_weights),
                )
            }
        };

        let education = match &ctx.education_track_tag {
            Some(tag) => tag.clone(),
            None => {
                drawn.push("educationTrackTag");
                draw_track(
                    &mut rng,
                    &vocab.identity.education_tracks,
                    bucket.map(|b| &b.education_track_weights),
                )
            }
        };

        let mut adversity = match &ctx.background_adversity_tags {
            Some(tags) => tags.clone(),
            None => {
                drawn.push("backgroundAdversityTags");
                let max = if tier == TierBand::Mass { 3 } else { 2 };
                let count = rng.count(0, max);
                rng.pick_k(&vocab.identity.adversity_tags, count)
            }
        };
        if diaspora == DiasporaStatus::Refugee
            && vocab.identity.adversity_tags.iter().any(|t| t == DISPLACEMENT_TAG)
            && !adversity.iter().any(|t| t == DISPLACEMENT_TAG)
        {
            adversity.push(DISPLACEMENT_TAG.to_string());
        }

        let spirituality = match &ctx.spirituality_affiliation_tag {
            Some(tag) => tag.clone(),
            None => {
                drawn.push("spiritualityAffiliationTag");
                rng.pick(&vocab.identity.spirituality_tags)
                    .cloned()
                    .unwrap_or_else(|| FALLBACK_SPIRITUALITY.to_string())
            }
        };
        let urbanicity = rng
            .pick(&vocab.identity.urbanicity_tags)
            .cloned()
            .unwrap_or_else(|| FALLBACK_URBANICITY.to_string());
        let origin_region = rng.pick(&vocab.identity.origin_regions).cloned();

        let has_family = match ctx.has_family {
            Some(value) => value,
            None => {
                drawn.push("hasFamily");
                let years = (f64::from(age) - 25.0).clamp(0.0, 30.0);
                rng.chance(FAMILY_BASE_CHANCE + FAMILY_CHANCE_PER_YEAR * years)
            }
        };

        Self {
            seed,
            birth_year,
            as_of_year,
            age,
            tier,
            roles,
            career,
            education,
            home,
            current_country_iso3,
            diaspora,
            adversity,
            spirituality,
            urbanicity,
            origin_region,
            has_family,
            security_env: bucket.and_then(|b| b.security_env),
            include_trace: ctx.include_trace,
            drawn,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn lives_abroad(&self) -> bool {
        self.home.iso3 != self.current_country_iso3
    }

    /// Overall calm of the home environment; neutral when unknown.
    pub fn security_score(&self) -> Fixed01k {
        self.security_env
            .map(|env| env.security_score())
            .unwrap_or(Fixed01k::NEUTRAL)
    }
}

fn find_country(countries: &[Country], iso3: &str) -> Country {
    let wanted = iso3.trim().to_uppercase();
    countries
        .iter()
        .find(|c| c.iso3 == wanted)
        .cloned()
        .unwrap_or_else(|| Country {
            iso3: wanted.clone(),
            continent: Country::unknown().continent,
            shadow_name: wanted,
        })
}

fn draw_diaspora(rng: &mut FacetRng) -> DiasporaStatus {
    let weights = [
        Weighted::new(DiasporaStatus::Native, 70.0),
        Weighted::new(DiasporaStatus::InternalMigrant, 10.0),
        Weighted::new(DiasporaStatus::Expat, 8.0),
        Weighted::new(DiasporaStatus::DiasporaChild, 7.0),
        Weighted::new(DiasporaStatus::Refugee, 5.0),
    ];
    weighted_pick(rng, &weights).unwrap_or(DiasporaStatus::Native)
}

/// Picks a track by prior weight, restricted to tracks the vocab knows.
fn draw_track(
    rng: &mut FacetRng,
    tracks: &[String],
    weights: Option<&BTreeMap<String, f64>>,
) -> String {
    let weighted: Vec<Weighted<String>> = weights
        .map(|w| {
            tracks
                .iter()
                .filter_map(|t| w.get(t).map(|weight| Weighted::new(t.clone(), *weight)))
                .filter(|c| c.weight > 0.0)
                .collect()
        })
        .unwrap_or_default();
    if !weighted.is_empty() {
        if let Some(track) = weighted_pick(rng, &weighted) {
            return track;
        }
    }
    rng.pick(tracks).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundled::DataSet;

    fn resolve(ctx: &GenerationContext) -> ResolvedContext {
        let data = DataSet::bundled().unwrap();
        ResolvedContext::resolve(
            ctx,
            &data.vocab,
            &data.priors,
            &data.countries,
            &GeneratorConfig::default(),
        )
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let ctx = GenerationContext::new("resolve-me");
        assert_eq!(resolve(&ctx), resolve(&ctx));
    }

    #[test]
    fn test_given_values_are_kept() {
        let ctx = GenerationContext::new("given")
            .with_birth_year(1990)
            .with_tier(TierBand::Elite)
            .with_roles(["operative", "analyst", "media", "security", "diplomat"])
            .with_diaspora(DiasporaStatus::Native)
            .with_career("law");
        let resolved = resolve(&ctx);
        assert_eq!(resolved.birth_year, 1990);
        assert_eq!(resolved.age, 35);
        assert_eq!(resolved.tier, TierBand::Elite);
        assert_eq!(resolved.roles.len(), MAX_ROLE_TAGS);
        assert_eq!(resolved.career, "law");
        assert!(!resolved.drawn.contains(&"tierBand"));
        assert_eq!(resolved.current_country_iso3, resolved.home.iso3);
    }

    #[test]
    fn test_birth_year_is_clamped() {
        let resolved = resolve(&GenerationContext::new("old").with_birth_year(1200));
        assert_eq!(resolved.birth_year, BIRTH_YEAR_MIN);
        let unborn = resolve(&GenerationContext::new("young").with_birth_year(2400));
        assert_eq!(unborn.age, 0);
    }

    #[test]
    fn test_extreme_as_of_year_is_bounded() {
        let past = resolve(&GenerationContext::new("past").with_as_of_year(i32::MIN));
        assert_eq!(past.as_of_year, AS_OF_YEAR_MIN);

        let future = resolve(
            &GenerationContext::new("future")
                .with_birth_year(1800)
                .with_as_of_year(2_000_000_000),
        );
        assert_eq!(future.as_of_year, AS_OF_YEAR_MAX);
        assert_eq!(future.age, MAX_AGE);
    }

    #[test]
    fn test_refugee_lives_abroad_with_displacement() {
        let resolved = resolve(
            &GenerationContext::new("refugee")
                .with_diaspora(DiasporaStatus::Refugee)
                .with_home_country("SYR"),
        );
        assert_eq!(resolved.home.iso3, "SYR");
        assert_ne!(resolved.current_country_iso3, "SYR");
        assert!(resolved.adversity.iter().any(|t| t == DISPLACEMENT_TAG));
    }

    #[test]
    fn test_unknown_country_is_soft_gap() {
        let resolved = resolve(&GenerationContext::new("nowhere").with_home_country("xyz"));
        assert_eq!(resolved.home.iso3, "XYZ");
        assert_eq!(resolved.security_score(), Fixed01k::NEUTRAL);
    }
}
