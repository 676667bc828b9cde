//! Bundled data documents
//!
//! The default vocab, priors and country list ship inside the binary. Any of
//! them can be replaced by a file on disk.

use std::path::Path;

use crate::error::VocabError;
use crate::vocab::{countries_from_file, countries_from_json_str, Country, Priors, Vocab};

pub const VOCAB_JSON: &str = include_str!("../data/agent-vocab.v1.json");
pub const PRIORS_JSON: &str = include_str!("../data/priors.json");
pub const COUNTRIES_JSON: &str = include_str!("../data/countries.json");

/// The three documents a generator needs.
#[derive(Debug, Clone)]
pub struct DataSet {
    pub vocab: Vocab,
    pub priors: Priors,
    pub countries: Vec<Country>,
}

impl DataSet {
    /// Parses the embedded documents.
    pub fn bundled() -> Result<Self, VocabError> {
        Ok(Self {
            vocab: Vocab::from_json_str(VOCAB_JSON)?,
            priors: Priors::from_json_str(PRIORS_JSON)?,
            countries: countries_from_json_str(COUNTRIES_JSON)?,
        })
    }

    /// Loads each document from its path, or the embedded copy when `None`.
    pub fn load(
        vocab: Option<&Path>,
        priors: Option<&Path>,
        countries: Option<&Path>,
    ) -> Result<Self, VocabError> {
        let vocab = match vocab {
            Some(path) => Vocab::from_file(path)?,
            None => Vocab::from_json_str(VOCAB_JSON)?,
        };
        let priors = match priors {
            Some(path) => Priors::from_file(path)?,
            None => Priors::from_json_str(PRIORS_JSON)?,
        };
        let countries = match countries {
            Some(path) => countries_from_file(path)?,
            None => countries_from_json_str(COUNTRIES_JSON)?,
        };
        tracing::debug!(
            vocab_version = vocab.version,
            countries = countries.len(),
            priors = priors.countries.len(),
            "data set loaded"
        );
        Ok(Self {
            vocab,
            priors,
            countries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_documents_parse() {
        let data = DataSet::bundled().unwrap();
        assert!(!data.vocab.capabilities.skill_keys.is_empty());
        assert!(data.countries.len() >= 10);
        assert!(data.priors.countries.contains_key("PRT"));
    }

    #[test]
    fn test_bundled_vocab_covers_optional_pools() {
        let vocab = DataSet::bundled().unwrap().vocab;
        assert!(!vocab.psych.red_lines.is_empty());
        assert!(!vocab.timeline_templates.childhood.is_empty());
        assert!(!vocab.behavior_archetypes.archetypes.is_empty());
        assert!(!vocab.detail_generation.physical_features.is_empty());
        assert!(!vocab.thoughts_emotions.emotions.primary.is_empty());
        assert!(!vocab.knowledge_ignorance.knowledge_strengths.is_empty());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = DataSet::load(Some(Path::new("/nonexistent/vocab.json")), None, None).unwrap_err();
        assert!(matches!(err, VocabError::Io { .. }));
    }

    #[test]
    fn test_load_overrides_countries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "iso3": "ISL", "continent": "Europe", "shadowName": "Frostmark" }}]"#
        )
        .unwrap();
        let data = DataSet::load(None, None, Some(file.path())).unwrap();
        assert_eq!(data.countries.len(), 1);
        assert_eq!(data.countries[0].shadow_name, "Frostmark");
    }
}
