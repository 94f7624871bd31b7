use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Decimal};

/// An unminted token waiting in a collection's pool.
/// `property_keys`, `property_values` and `property_types` are parallel.
#[cw_serde]
pub struct TokenAsset {
    pub uri: String,
    pub property_keys: Vec<String>,
    pub property_values: Vec<Binary>,
    pub property_types: Vec<String>,
}

impl TokenAsset {
    pub fn new(
        uri: String,
        property_keys: Vec<String>,
        property_values: Vec<Binary>,
        property_types: Vec<String>,
    ) -> Self {
        TokenAsset {
            uri,
            property_keys,
            property_values,
            property_types,
        }
    }

    pub fn has_parallel_properties(&self) -> bool {
        self.property_keys.len() == self.property_values.len()
            && self.property_keys.len() == self.property_types.len()
    }

    pub fn properties(&self) -> Vec<Property> {
        self.property_keys
            .iter()
            .zip(self.property_values.iter())
            .zip(self.property_types.iter())
            .map(|((key, value), value_type)| Property {
                key: key.clone(),
                value: value.clone(),
                value_type: value_type.clone(),
            })
            .collect()
    }
}

#[cw_serde]
pub struct Property {
    pub key: String,
    pub value: Binary,
    pub value_type: String, // "u64", "string", "address", ...
}

#[cw_serde]
pub struct RoyaltyTerms {
    pub payee: String,
    pub points_numerator: u64,
    pub points_denominator: u64,
}

impl RoyaltyTerms {
    pub fn share(&self) -> Decimal {
        Decimal::from_ratio(self.points_numerator, self.points_denominator)
    }
}

/// Token extension stored by the asset collection for every minted token
#[cw_serde]
pub struct AssetMetadata {
    pub name: String,
    pub description: String,
    pub properties: Vec<Property>,
    pub royalty: RoyaltyTerms,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zips_properties() {
        let asset = TokenAsset::new(
            "ipfs://token".to_string(),
            vec!["level".to_string(), "class".to_string()],
            vec![Binary::from(vec![1u8]), Binary::from(b"mage".to_vec())],
            vec!["u8".to_string(), "string".to_string()],
        );
        assert!(asset.has_parallel_properties());

        let properties = asset.properties();
        assert_eq!(properties.len(), 2);
        assert_eq!(properties[1].key, "class");
        assert_eq!(properties[1].value, Binary::from(b"mage".to_vec()));
        assert_eq!(properties[1].value_type, "string");
    }

    #[test]
    fn uneven_properties() {
        let asset = TokenAsset::new(
            "ipfs://token".to_string(),
            vec!["level".to_string()],
            vec![],
            vec!["u8".to_string()],
        );
        assert!(!asset.has_parallel_properties());
    }

    #[test]
    fn royalty_share() {
        let royalty = RoyaltyTerms {
            payee: "payee".to_string(),
            points_numerator: 5,
            points_denominator: 100,
        };
        assert_eq!(royalty.share(), Decimal::percent(5));
    }
}
