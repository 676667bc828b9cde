//! Generator configuration
//!
//! Tuning knobs loaded from a TOML file. Every section is optional and falls
//! back to the values below, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::rng::MAX_SEED_CHARS;

/// Default config file looked up by the binary.
pub const DEFAULT_CONFIG_PATH: &str = "agent-gen.toml";

/// Complete generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Context defaults
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Skill value and experience scaling
    #[serde(default)]
    pub skills: SkillConfig,
    /// Timeline sizing
    #[serde(default)]
    pub timeline: TimelineConfig,
}

impl GeneratorConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads from `path`, or uses defaults if it cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Self {
        Self::from_file(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "using default generator config");
            Self::default()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Reference year for ages when the context gives none
    pub as_of_year: i32,
    pub seed_max_chars: usize,
    /// Range sampled when the birth year is not given
    pub birth_year_min: i32,
    pub birth_year_max: i32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            as_of_year: 2025,
            seed_max_chars: MAX_SEED_CHARS,
            birth_year_min: 1960,
            birth_year_max: 2006,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    pub value_floor: i32,
    pub value_ceiling: i32,
    /// Extra experience multiplier per year of age above 25
    pub xp_per_year: f64,
    pub xp_age_cap: f64,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            value_floor: 90,
            value_ceiling: 940,
            xp_per_year: 0.015,
            xp_age_cap: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub min_events: i32,
    pub max_events: i32,
    /// Most negative events an elite agent accumulates
    pub elite_negative_cap: usize,
    pub negative_cap: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            min_events: 6,
            max_events: 10,
            elite_negative_cap: 2,
            negative_cap: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let config = GeneratorConfig::from_toml_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.generation.as_of_year, 2025);
        assert_eq!(config.skills.value_ceiling, 940);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            [timeline]
            elite_negative_cap = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.timeline.elite_negative_cap, 1);
        assert_eq!(config.timeline.negative_cap, 4);
        assert_eq!(config.generation.birth_year_min, 1960);
    }

    #[test]
    fn test_config_to_toml_parses_back() {
        let config = GeneratorConfig::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[skills]"));
        assert_eq!(GeneratorConfig::from_toml_str(&toml).unwrap(), config);
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = GeneratorConfig::from_toml_str("[generation\nas_of_year = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file_and_fallback() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[generation]\nas_of_year = 2030").unwrap();
        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.generation.as_of_year, 2030);

        let missing = GeneratorConfig::load_or_default(Path::new("/nonexistent/agent-gen.toml"));
        assert_eq!(missing, GeneratorConfig::default());
    }
}
