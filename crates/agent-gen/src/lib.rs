//! Deterministic synthetic agent generation.
//!
//! A seed string plus optional context fields resolve to one fully
//! specified [`GeneratedAgent`]. Each facet draws from its own seeded stream,
//! so the output depends only on the inputs and the data documents.

pub mod bundled;
pub mod config;
pub mod constraints;
pub mod context;
pub mod error;
pub mod facets;
pub mod generator;
pub mod rng;
pub mod vocab;
pub mod weighted;

pub use agent_model::GeneratedAgent;
pub use bundled::DataSet;
pub use config::GeneratorConfig;
pub use context::{GenerationContext, ResolvedContext};
pub use error::{ConfigError, GenerationError, VocabError};
pub use generator::{generate_agent, AgentGenerator};
pub use rng::{Facet, Seed};
pub use vocab::{Country, Priors, Vocab};
