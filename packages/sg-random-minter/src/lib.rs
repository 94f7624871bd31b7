use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_controllers::AdminResponse;
use sg_asset::RoyaltyTerms;

/// Number of tokens held by each bucket of the token pool
pub const TOKEN_POOL_BUCKET_SIZE: u64 = 128;
/// Initial bucket count of the URI set and allowance tables
pub const INITIAL_TABLE_BUCKETS: u64 = 4;

#[cw_serde]
pub struct CollectionMutability {
    pub description: bool,
    pub uri: bool,
    pub maximum: bool,
}

impl From<[bool; 3]> for CollectionMutability {
    fn from(flags: [bool; 3]) -> Self {
        let [description, uri, maximum] = flags;
        CollectionMutability {
            description,
            uri,
            maximum,
        }
    }
}

#[cw_serde]
pub struct TokenMutability {
    pub maximum: bool,
    pub uri: bool,
    pub royalty: bool,
    pub description: bool,
    pub properties: bool,
}

impl From<[bool; 5]> for TokenMutability {
    fn from(flags: [bool; 5]) -> Self {
        let [maximum, uri, royalty, description, properties] = flags;
        TokenMutability {
            maximum,
            uri,
            royalty,
            description,
            properties,
        }
    }
}

#[cw_serde]
pub struct CollectionConfig {
    pub collection_name: String,
    pub collection_description: String,
    /// 0 means no maximum
    pub collection_maximum: u64,
    pub collection_uri: String,
    pub collection_mutability: CollectionMutability,
    pub token_name_base: String,
    pub token_description: String,
    pub token_maximum: u64,
    pub token_mutability: TokenMutability,
    pub royalty: RoyaltyTerms,
    /// Per address cap during the public phase, 0 means unlimited
    pub public_mint_limit: u64,
    /// Sequence number of the next token to mint, starts at 1
    pub token_counter: u64,
}

impl CollectionConfig {
    pub fn minted_count(&self) -> u64 {
        self.token_counter.saturating_sub(1)
    }

    /// Display name of the next token to mint
    pub fn next_token_name(&self) -> String {
        format!("{}: {}", self.token_name_base, self.token_counter)
    }
}

/// A priced minting phase open during `[start_time, end_time)`
#[cw_serde]
pub struct MintWindow {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub price: Uint128,
}

impl MintWindow {
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.start_time <= now && now < self.end_time
    }

    pub fn has_started(&self, now: Timestamp) -> bool {
        self.start_time <= now
    }

    pub fn has_ended(&self, now: Timestamp) -> bool {
        self.end_time <= now
    }
}

pub type WhitelistMintConfig = MintWindow;
pub type PublicMintConfig = MintWindow;

#[cw_serde]
pub enum MintPhase {
    Whitelist,
    Public,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum SgRandomMinterQueryMsg {
    #[returns(AdminResponse)]
    Admin {},
    /// Address receiving mint payments
    #[returns(Addr)]
    Treasury {},
    /// Address of the sg721 collection
    #[returns(CollectionResponse)]
    Collection {},
    #[returns(CollectionConfig)]
    CollectionConfig {},
    #[returns(MintConfigsResponse)]
    MintConfigs {},
    /// Remaining whitelist allowance, `None` if not whitelisted
    #[returns(Option<u64>)]
    WhitelistAllowance { address: String },
    /// Remaining public allowance, `None` if unlimited
    #[returns(Option<u64>)]
    PublicAllowance { address: String },
    /// Number of tokens left in the pool
    #[returns(u64)]
    RemainingTokens {},
    /// Phase open at the current block time
    #[returns(ActivePhaseResponse)]
    ActivePhase {},
}

#[cw_serde]
pub struct CollectionResponse {
    pub collection: String,
}

#[cw_serde]
pub struct MintConfigsResponse {
    pub whitelist: Option<WhitelistMintConfig>,
    pub public: Option<PublicMintConfig>,
}

#[cw_serde]
pub struct ActivePhaseResponse {
    pub phase: Option<MintPhase>,
    pub price: Option<Uint128>,
}
