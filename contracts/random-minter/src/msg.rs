use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Uint128};

pub use sg_random_minter::SgRandomMinterQueryMsg as QueryMsg;

#[cw_serde]
pub struct InstantiateMsg {
    /// Code id of the sg721-asset contract created by `SetCollectionConfigAndCreateCollection`
    pub collection_code_id: u64,
    /// Defaults to the sender
    pub admin: Option<String>,
    /// Defaults to the admin
    pub treasury: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    SetAdmin {
        new_admin: String,
    },
    SetTreasury {
        new_treasury: String,
    },
    /// One-time setup of the collection, also instantiates its sg721 contract
    SetCollectionConfigAndCreateCollection {
        collection_name: String,
        collection_description: String,
        collection_maximum: u64,
        collection_uri: String,
        /// description, uri, maximum
        collection_mutate_config: [bool; 3],
        token_name_base: String,
        royalty_payee_address: String,
        token_description: String,
        token_maximum: u64,
        /// maximum, uri, royalty, description, properties
        token_mutate_config: [bool; 5],
        royalty_points_den: u64,
        royalty_points_num: u64,
        public_mint_limit: u64,
    },
    /// Times are in seconds. A whitelist start of 0 means no whitelist phase.
    SetMintingTimeAndPrice {
        whitelist_start_time: u64,
        whitelist_end_time: u64,
        whitelist_price: Uint128,
        public_start_time: u64,
        public_end_time: u64,
        public_price: Uint128,
    },
    AddToWhitelist {
        addresses: Vec<String>,
        mint_limit: u64,
    },
    AddTokens {
        token_uris: Vec<String>,
        property_keys: Vec<Vec<String>>,
        property_values: Vec<Vec<Binary>>,
        property_types: Vec<Vec<String>>,
    },
    MintNft {
        amount: u64,
    },
}

#[cw_serde]
pub struct MigrateMsg {}
