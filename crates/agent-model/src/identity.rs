//! Identity and appearance records
//!
//! Categorical tags parse from and print to the same kebab/snake-case
//! strings used in vocab files and JSON output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a categorical tag string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTagError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseTagError {}

/// Coarse socioeconomic classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierBand {
    Elite,
    Middle,
    Mass,
}

impl TierBand {
    pub const ALL: [TierBand; 3] = [TierBand::Elite, TierBand::Middle, TierBand::Mass];

    pub fn as_str(self) -> &'static str {
        match self {
            TierBand::Elite => "elite",
            TierBand::Middle => "middle",
            TierBand::Mass => "mass",
        }
    }
}

impl fmt::Display for TierBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TierBand {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "elite" => Ok(TierBand::Elite),
            "middle" => Ok(TierBand::Middle),
            "mass" => Ok(TierBand::Mass),
            _ => Err(ParseTagError {
                kind: "tier band",
                value: s.to_string(),
            }),
        }
    }
}

/// Relationship between an agent and the country they live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiasporaStatus {
    Native,
    InternalMigrant,
    Expat,
    DiasporaChild,
    Refugee,
}

impl DiasporaStatus {
    pub const ALL: [DiasporaStatus; 5] = [
        DiasporaStatus::Native,
        DiasporaStatus::InternalMigrant,
        DiasporaStatus::Expat,
        DiasporaStatus::DiasporaChild,
        DiasporaStatus::Refugee,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DiasporaStatus::Native => "native",
            DiasporaStatus::InternalMigrant => "internal-migrant",
            DiasporaStatus::Expat => "expat",
            DiasporaStatus::DiasporaChild => "diaspora-child",
            DiasporaStatus::Refugee => "refugee",
        }
    }

    /// True when the agent lives outside their home country.
    pub fn lives_abroad(self) -> bool {
        matches!(
            self,
            DiasporaStatus::Expat | DiasporaStatus::DiasporaChild | DiasporaStatus::Refugee
        )
    }
}

impl fmt::Display for DiasporaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiasporaStatus {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        DiasporaStatus::ALL
            .into_iter()
            .find(|d| d.as_str() == lower)
            .ok_or_else(|| ParseTagError {
                kind: "diaspora status",
                value: s.to_string(),
            })
    }
}

/// Height band of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightBand {
    VeryShort,
    Short,
    Average,
    Tall,
    VeryTall,
}

impl HeightBand {
    pub const ALL: [HeightBand; 5] = [
        HeightBand::VeryShort,
        HeightBand::Short,
        HeightBand::Average,
        HeightBand::Tall,
        HeightBand::VeryTall,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HeightBand::VeryShort => "very_short",
            HeightBand::Short => "short",
            HeightBand::Average => "average",
            HeightBand::Tall => "tall",
            HeightBand::VeryTall => "very_tall",
        }
    }
}

impl fmt::Display for HeightBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeightBand {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase().replace('-', "_");
        HeightBand::ALL
            .into_iter()
            .find(|h| h.as_str() == lower)
            .ok_or_else(|| ParseTagError {
                kind: "height band",
                value: s.to_string(),
            })
    }
}

/// Who the agent is and where they come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub name: String,
    pub birth_year: i32,
    pub age: u32,
    pub tier_band: TierBand,
    pub role_seed_tags: Vec<String>,
    pub career_track_tag: String,
    pub education_track_tag: String,
    pub home_country_iso3: String,
    pub current_country_iso3: String,
    /// Continent of the home country.
    pub home_culture: String,
    pub languages: Vec<String>,
    pub diaspora_status: DiasporaStatus,
    pub spirituality_affiliation_tag: String,
    pub background_adversity_tags: Vec<String>,
    pub urbanicity: String,
    pub origin_region: Option<String>,
    pub has_family: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hair {
    pub color: String,
    pub texture: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eyes {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    pub height_band: HeightBand,
    pub build_tag: String,
    pub hair: Hair,
    pub eyes: Eyes,
    pub voice_tag: String,
    pub distinguishing_marks: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_roundtrip_strings() {
        for tier in TierBand::ALL {
            assert_eq!(tier.to_string().parse::<TierBand>().unwrap(), tier);
        }
        assert!("gentry".parse::<TierBand>().is_err());
    }

    #[test]
    fn test_diaspora_parse() {
        assert_eq!(
            "diaspora-child".parse::<DiasporaStatus>().unwrap(),
            DiasporaStatus::DiasporaChild
        );
        assert_eq!("Refugee".parse::<DiasporaStatus>().unwrap(), DiasporaStatus::Refugee);
        let err = "nomad".parse::<DiasporaStatus>().unwrap_err();
        assert_eq!(err.to_string(), "invalid diaspora status: 'nomad'");
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&DiasporaStatus::InternalMigrant).unwrap();
        assert_eq!(json, "\"internal-migrant\"");
        let json = serde_json::to_string(&HeightBand::VeryTall).unwrap();
        assert_eq!(json, format!("\"{}\"", HeightBand::VeryTall));
    }

    #[test]
    fn test_height_parse_accepts_dashes() {
        assert_eq!("very-tall".parse::<HeightBand>().unwrap(), HeightBand::VeryTall);
        assert_eq!("average".parse::<HeightBand>().unwrap(), HeightBand::Average);
        assert!("giant".parse::<HeightBand>().is_err());
    }

    #[test]
    fn test_lives_abroad() {
        assert!(DiasporaStatus::Refugee.lives_abroad());
        assert!(!DiasporaStatus::InternalMigrant.lives_abroad());
    }
}
