//! Facet computations
//!
//! Each facet reads earlier facets as plain inputs and draws only from its
//! own named stream. Nothing here records trace entries; the generator does
//! that from the returned values.

pub mod aptitudes;
pub mod behavior;
pub mod details;
pub mod identity;
pub mod latents;
pub mod lifestyle;
pub mod logistics;
pub mod narrative;
pub mod psychology;
pub mod skills;
pub mod traits;

use crate::weighted::unique;

/// The vocab pool de-duplicated, or the built-in list when it is empty.
pub(crate) fn pool_or(pool: &[String], fallback: &[&str]) -> Vec<String> {
    if pool.is_empty() {
        fallback.iter().map(|s| s.to_string()).collect()
    } else {
        unique(pool)
    }
}

/// Case-insensitive check for any of the given fragments.
pub(crate) fn mentions(item: &str, fragments: &[&str]) -> bool {
    let lower = item.to_lowercase();
    fragments.iter().any(|f| lower.contains(f))
}

pub(crate) fn has_role(roles: &[String], role: &str) -> bool {
    roles.iter().any(|r| r == role)
}
