//! Identity kit
//!
//! Drawn on the `logistics` stream: five of the seven kit items, each with a
//! banded security level. Nothing starts out compromised.

use agent_model::{Fixed01k, IdentityKitItem, Logistics};

use crate::rng::FacetRng;

pub mod logistics_constants {
    pub const KIT_ITEMS: [&str; 7] = [
        "passport set",
        "burner phone",
        "laptop",
        "cover documents",
        "keepsake",
        "cash stash",
        "keys",
    ];
    pub const KIT_SIZE: usize = 5;
    pub const SECURITY_MIN: i32 = 150;
    pub const SECURITY_MAX: i32 = 900;
}

use logistics_constants::*;

pub fn compute_logistics(rng: &mut FacetRng) -> Logistics {
    let identity_kit: Vec<IdentityKitItem> = rng
        .pick_k(&KIT_ITEMS, KIT_SIZE)
        .into_iter()
        .map(|item| IdentityKitItem {
            item: item.to_string(),
            security: Fixed01k::new(rng.int(SECURITY_MIN, SECURITY_MAX)).band5(),
            compromised: false,
        })
        .collect();
    tracing::debug!(items = identity_kit.len(), "identity kit drawn");
    Logistics { identity_kit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{Facet, Seed};
    use std::collections::HashSet;

    fn kit(seed: &str) -> Logistics {
        compute_logistics(&mut Seed::normalize(seed).rng(Facet::Logistics))
    }

    #[test]
    fn test_kit_has_five_unique_items() {
        for i in 0..50 {
            let logistics = kit(&format!("kit-{}", i));
            let mut items: Vec<&str> =
                logistics.identity_kit.iter().map(|k| k.item.as_str()).collect();
            assert_eq!(items.len(), KIT_SIZE);
            assert!(items.iter().all(|item| KIT_ITEMS.contains(item)));
            items.sort_unstable();
            items.dedup();
            assert_eq!(items.len(), KIT_SIZE);
        }
    }

    #[test]
    fn test_kit_is_deterministic_and_uncompromised() {
        assert_eq!(kit("kit-same"), kit("kit-same"));
        let mut bands = HashSet::new();
        for i in 0..50 {
            for entry in kit(&format!("secure-{}", i)).identity_kit {
                assert!(!entry.compromised);
                bands.insert(entry.security);
            }
        }
        assert!(bands.len() >= 3, "security bands {:?}", bands);
    }
}
