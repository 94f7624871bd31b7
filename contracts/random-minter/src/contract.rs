#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, Addr, Deps, DepsMut, Env, Event, MessageInfo, Reply, Timestamp, WasmMsg,
};
use cw2::set_contract_version;
use cw_utils::parse_reply_instantiate_data;
use sg721::{CollectionInfo, InstantiateMsg as Sg721InstantiateMsg, RoyaltyInfoResponse};
use sg_asset::RoyaltyTerms;
use sg_random_minter::{
    CollectionConfig, MintWindow, INITIAL_TABLE_BUCKETS, TOKEN_POOL_BUCKET_SIZE,
};
use sg_std::{Response, SubMsg};

use crate::error::ContractError;
use crate::mint::{execute_add_tokens, execute_mint_nft};
use crate::msg::{ExecuteMsg, InstantiateMsg};
use crate::state::{
    ADDED_URIS, ADMIN, COLLECTION_ADDR, COLLECTION_CODE_ID, COLLECTION_CONFIG, PUBLIC_MINTERS,
    PUBLIC_MINT_CONFIG, TOKEN_POOL, TREASURY, WHITELIST, WHITELIST_MINT_CONFIG,
};

// version info for migration info
pub const CONTRACT_NAME: &str = "crates.io:random-minter";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const INIT_COLLECTION_REPLY_ID: u64 = 1;
const COLLECTION_SYMBOL: &str = "ASSET";

/// Proof that the sender of the current message is the admin.
/// Every privileged handler takes one.
pub struct AdminCap {
    admin: Addr,
}

impl AdminCap {
    pub fn new(deps: Deps, info: &MessageInfo) -> Result<Self, ContractError> {
        ADMIN.assert_admin(deps, &info.sender)?;
        Ok(AdminCap {
            admin: info.sender.clone(),
        })
    }

    pub fn admin(&self) -> &Addr {
        &self.admin
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => info.sender.clone(),
    };
    let treasury = match msg.treasury {
        Some(treasury) => deps.api.addr_validate(&treasury)?,
        None => admin.clone(),
    };

    ADMIN.set(deps.branch(), Some(admin.clone()))?;
    TREASURY.save(deps.storage, &treasury)?;
    COLLECTION_CODE_ID.save(deps.storage, &msg.collection_code_id)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", admin)
        .add_attribute("treasury", treasury)
        .add_attribute("sender", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    if msg.id != INIT_COLLECTION_REPLY_ID {
        return Err(ContractError::InvalidReplyID {});
    }

    let reply = parse_reply_instantiate_data(msg);
    match reply {
        Ok(res) => {
            let collection_address = res.contract_address;

            COLLECTION_ADDR.save(deps.storage, &Addr::unchecked(collection_address.clone()))?;

            let event = Event::new("init-collection-reply")
                .add_attribute("collection", collection_address);
            Ok(Response::default().add_event(event))
        }
        Err(_) => Err(ContractError::ReplyOnSuccess {}),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let api = deps.api;

    match msg {
        ExecuteMsg::SetAdmin { new_admin } => {
            let cap = AdminCap::new(deps.as_ref(), &info)?;
            execute_set_admin(deps, cap, api.addr_validate(&new_admin)?)
        }
        ExecuteMsg::SetTreasury { new_treasury } => {
            let cap = AdminCap::new(deps.as_ref(), &info)?;
            execute_set_treasury(deps, cap, api.addr_validate(&new_treasury)?)
        }
        ExecuteMsg::SetCollectionConfigAndCreateCollection {
            collection_name,
            collection_description,
            collection_maximum,
            collection_uri,
            collection_mutate_config,
            token_name_base,
            royalty_payee_address,
            token_description,
            token_maximum,
            token_mutate_config,
            royalty_points_den,
            royalty_points_num,
            public_mint_limit,
        } => {
            let cap = AdminCap::new(deps.as_ref(), &info)?;
            let config = CollectionConfig {
                collection_name,
                collection_description,
                collection_maximum,
                collection_uri,
                collection_mutability: collection_mutate_config.into(),
                token_name_base,
                token_description,
                token_maximum,
                token_mutability: token_mutate_config.into(),
                royalty: RoyaltyTerms {
                    payee: api.addr_validate(&royalty_payee_address)?.to_string(),
                    points_numerator: royalty_points_num,
                    points_denominator: royalty_points_den,
                },
                public_mint_limit,
                token_counter: 1,
            };
            execute_set_collection_config(deps, env, cap, config)
        }
        ExecuteMsg::SetMintingTimeAndPrice {
            whitelist_start_time,
            whitelist_end_time,
            whitelist_price,
            public_start_time,
            public_end_time,
            public_price,
        } => {
            let cap = AdminCap::new(deps.as_ref(), &info)?;
            // a zero start means no whitelist phase
            let whitelist = (whitelist_start_time != 0).then(|| MintWindow {
                start_time: Timestamp::from_seconds(whitelist_start_time),
                end_time: Timestamp::from_seconds(whitelist_end_time),
                price: whitelist_price,
            });
            let public = MintWindow {
                start_time: Timestamp::from_seconds(public_start_time),
                end_time: Timestamp::from_seconds(public_end_time),
                price: public_price,
            };
            execute_set_minting_time_and_price(deps, cap, whitelist, public)
        }
        ExecuteMsg::AddToWhitelist {
            addresses,
            mint_limit,
        } => {
            let cap = AdminCap::new(deps.as_ref(), &info)?;
            execute_add_to_whitelist(deps, env, cap, addresses, mint_limit)
        }
        ExecuteMsg::AddTokens {
            token_uris,
            property_keys,
            property_values,
            property_types,
        } => {
            let cap = AdminCap::new(deps.as_ref(), &info)?;
            execute_add_tokens(
                deps,
                env,
                cap,
                token_uris,
                property_keys,
                property_values,
                property_types,
            )
        }
        ExecuteMsg::MintNft { amount } => execute_mint_nft(deps, env, info, amount),
    }
}

pub fn execute_set_admin(
    deps: DepsMut,
    cap: AdminCap,
    new_admin: Addr,
) -> Result<Response, ContractError> {
    ADMIN.set(deps, Some(new_admin.clone()))?;

    let event = Event::new("set-admin")
        .add_attribute("new_admin", new_admin)
        .add_attribute("sender", cap.admin());
    Ok(Response::new().add_event(event))
}

pub fn execute_set_treasury(
    deps: DepsMut,
    cap: AdminCap,
    new_treasury: Addr,
) -> Result<Response, ContractError> {
    TREASURY.save(deps.storage, &new_treasury)?;

    let event = Event::new("set-treasury")
        .add_attribute("treasury", new_treasury)
        .add_attribute("sender", cap.admin());
    Ok(Response::new().add_event(event))
}

/// Stores the collection config, creates the token pool and uri set,
/// then instantiates the sg721 collection with this contract as minter.
pub fn execute_set_collection_config(
    deps: DepsMut,
    env: Env,
    cap: AdminCap,
    config: CollectionConfig,
) -> Result<Response, ContractError> {
    if COLLECTION_CONFIG.may_load(deps.storage)?.is_some() {
        return Err(ContractError::CollectionAlreadyConfigured {});
    }
    let royalty = &config.royalty;
    if royalty.points_denominator == 0 || royalty.points_numerator > royalty.points_denominator {
        return Err(ContractError::InvalidRoyalty {
            numerator: royalty.points_numerator,
            denominator: royalty.points_denominator,
        });
    }

    TOKEN_POOL.init(deps.storage, TOKEN_POOL_BUCKET_SIZE)?;
    ADDED_URIS.init(deps.storage, INITIAL_TABLE_BUCKETS)?;
    COLLECTION_CONFIG.save(deps.storage, &config)?;

    let collection_msg = Sg721InstantiateMsg {
        name: config.collection_name.clone(),
        symbol: COLLECTION_SYMBOL.to_string(),
        minter: env.contract.address.to_string(),
        collection_info: CollectionInfo {
            creator: cap.admin().to_string(),
            description: config.collection_description.clone(),
            image: config.collection_uri.clone(),
            external_link: None,
            explicit_content: None,
            start_trading_time: None,
            royalty_info: Some(RoyaltyInfoResponse {
                payment_address: royalty.payee.clone(),
                share: royalty.share(),
            }),
        },
    };
    let wasm_msg = WasmMsg::Instantiate {
        code_id: COLLECTION_CODE_ID.load(deps.storage)?,
        msg: to_binary(&collection_msg)?,
        funds: vec![],
        admin: Some(cap.admin().to_string()),
        label: format!("{} Collection", config.collection_name),
    };
    let submsg = SubMsg::reply_on_success(wasm_msg, INIT_COLLECTION_REPLY_ID);

    let event = Event::new("set-collection-config")
        .add_attribute("collection_name", config.collection_name)
        .add_attribute("collection_maximum", config.collection_maximum.to_string())
        .add_attribute("token_name_base", config.token_name_base)
        .add_attribute("public_mint_limit", config.public_mint_limit.to_string())
        .add_attribute("sender", cap.admin());
    Ok(Response::new().add_submessage(submsg).add_event(event))
}

/// Creates or updates both phases. A whitelist phase, once set, can be moved but not removed.
pub fn execute_set_minting_time_and_price(
    deps: DepsMut,
    cap: AdminCap,
    whitelist: Option<MintWindow>,
    public: MintWindow,
) -> Result<Response, ContractError> {
    if COLLECTION_CONFIG.may_load(deps.storage)?.is_none() {
        return Err(ContractError::CollectionNotConfigured {});
    }
    if public.start_time >= public.end_time {
        return Err(ContractError::InvalidMintWindow {});
    }

    match &whitelist {
        Some(whitelist) => {
            if whitelist.start_time >= whitelist.end_time
                || whitelist.end_time > public.start_time
            {
                return Err(ContractError::InvalidMintWindow {});
            }
            if public.price < whitelist.price {
                return Err(ContractError::InvalidMintPrice {});
            }
        }
        None => {
            if WHITELIST_MINT_CONFIG.may_load(deps.storage)?.is_some() {
                return Err(ContractError::WhitelistCannotBeRemoved {});
            }
        }
    }

    let mut event = Event::new("set-minting-time-and-price")
        .add_attribute("public_start_time", public.start_time.to_string())
        .add_attribute("public_end_time", public.end_time.to_string())
        .add_attribute("public_price", public.price.to_string());

    if let Some(whitelist) = whitelist {
        if !WHITELIST.is_initialized(deps.storage)? {
            WHITELIST.init(deps.storage, INITIAL_TABLE_BUCKETS)?;
        }
        WHITELIST_MINT_CONFIG.save(deps.storage, &whitelist)?;
        event = event
            .add_attribute("whitelist_start_time", whitelist.start_time.to_string())
            .add_attribute("whitelist_end_time", whitelist.end_time.to_string())
            .add_attribute("whitelist_price", whitelist.price.to_string());
    }
    if !PUBLIC_MINTERS.is_initialized(deps.storage)? {
        PUBLIC_MINTERS.init(deps.storage, INITIAL_TABLE_BUCKETS)?;
    }
    PUBLIC_MINT_CONFIG.save(deps.storage, &public)?;

    Ok(Response::new().add_event(event.add_attribute("sender", cap.admin())))
}

/// Grants `mint_limit` whitelist mints to every new address.
/// Addresses already on the whitelist keep their remaining allowance.
pub fn execute_add_to_whitelist(
    deps: DepsMut,
    env: Env,
    cap: AdminCap,
    addresses: Vec<String>,
    mint_limit: u64,
) -> Result<Response, ContractError> {
    let whitelist = WHITELIST_MINT_CONFIG
        .may_load(deps.storage)?
        .ok_or(ContractError::WhitelistNotConfigured {})?;
    if whitelist.has_ended(env.block.time) {
        return Err(ContractError::WhitelistEnded {});
    }

    let mut addresses = addresses
        .iter()
        .map(|address| deps.api.addr_validate(address))
        .collect::<Result<Vec<_>, _>>()?;
    // dedupe
    addresses.sort_unstable();
    addresses.dedup();

    let mut added = 0u64;
    for addr in addresses {
        if !WHITELIST.contains(deps.storage, &addr)? {
            WHITELIST.add(deps.storage, addr, mint_limit)?;
            added += 1;
        }
    }

    let event = Event::new("add-to-whitelist")
        .add_attribute("added", added.to_string())
        .add_attribute("mint_limit", mint_limit.to_string())
        .add_attribute("sender", cap.admin());
    Ok(Response::new().add_event(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info};
    use cosmwasm_std::Uint128;

    const ADMIN_ADDR: &str = "admin";

    #[test]
    fn requires_collection_config() {
        let mut deps = mock_dependencies();
        let info = mock_info(ADMIN_ADDR, &[]);
        let msg = InstantiateMsg {
            collection_code_id: 1,
            admin: None,
            treasury: None,
        };
        instantiate(deps.as_mut(), mock_env(), info.clone(), msg).unwrap();

        let msg = ExecuteMsg::SetMintingTimeAndPrice {
            whitelist_start_time: 0,
            whitelist_end_time: 0,
            whitelist_price: Uint128::zero(),
            public_start_time: 200,
            public_end_time: 300,
            public_price: Uint128::new(2),
        };
        let err = execute(deps.as_mut(), mock_env(), info.clone(), msg).unwrap_err();
        assert_eq!(
            err.to_string(),
            ContractError::CollectionNotConfigured {}.to_string()
        );

        let msg = ExecuteMsg::AddTokens {
            token_uris: vec!["ipfs://heroes/1".to_string()],
            property_keys: vec![vec![]],
            property_values: vec![vec![]],
            property_types: vec![vec![]],
        };
        let err = execute(deps.as_mut(), mock_env(), info, msg).unwrap_err();
        assert_eq!(
            err.to_string(),
            ContractError::CollectionNotConfigured {}.to_string()
        );
    }
}
