use cosmwasm_std::{Addr, Empty};
use cw_controllers::Admin;
use cw_storage_plus::Item;
use sg_asset::TokenAsset;
use sg_bucket_storage::{BigVector, BucketTable};
use sg_random_minter::{CollectionConfig, PublicMintConfig, WhitelistMintConfig};

pub const ADMIN: Admin = Admin::new("admin");

/// Receives every mint payment
pub const TREASURY: Item<Addr> = Item::new("treasury");

pub const COLLECTION_CODE_ID: Item<u64> = Item::new("collection-code-id");

/// Set by the reply to the collection instantiation
pub const COLLECTION_ADDR: Item<Addr> = Item::new("collection");

pub const COLLECTION_CONFIG: Item<CollectionConfig> = Item::new("collection-config");

/// Unminted tokens
pub const TOKEN_POOL: BigVector<TokenAsset> = BigVector::new("token-pool", "token-pool-buckets");

/// Every uri ever added to the pool, minted or not
pub const ADDED_URIS: BucketTable<String, Empty> =
    BucketTable::new("added-uris", "added-uris-buckets");

pub const WHITELIST_MINT_CONFIG: Item<WhitelistMintConfig> = Item::new("whitelist-mint-config");

/// Remaining whitelist allowance per address
pub const WHITELIST: BucketTable<Addr, u64> = BucketTable::new("whitelist", "whitelist-buckets");

pub const PUBLIC_MINT_CONFIG: Item<PublicMintConfig> = Item::new("public-mint-config");

/// Remaining public allowance of every address that minted with a capped public phase
pub const PUBLIC_MINTERS: BucketTable<Addr, u64> =
    BucketTable::new("public-minters", "public-minters-buckets");
