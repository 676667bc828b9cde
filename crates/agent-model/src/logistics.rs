//! Personal logistics

use serde::{Deserialize, Serialize};

use crate::fixed::Band5;

/// One item an agent carries or keeps stashed, with how well it is secured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityKitItem {
    pub item: String,
    pub security: Band5,
    pub compromised: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logistics {
    pub identity_kit: Vec<IdentityKitItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_kit_serializes_camel_case() {
        let logistics = Logistics {
            identity_kit: vec![IdentityKitItem {
                item: "burner phone".into(),
                security: Band5::VeryHigh,
                compromised: false,
            }],
        };
        let json = serde_json::to_string(&logistics).unwrap();
        assert_eq!(
            json,
            r#"{"identityKit":[{"item":"burner phone","security":"very_high","compromised":false}]}"#
        );
    }
}
