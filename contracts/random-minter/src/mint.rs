use std::collections::BTreeSet;

use cosmwasm_std::{
    coins, Addr, BankMsg, Binary, DepsMut, Empty, Env, Event, MessageInfo, Storage, Timestamp,
    Uint128,
};
use cw_utils::{must_pay, nonpayable};
use sg721_asset::helpers::AssetCollectionContract;
use sg_asset::{AssetMetadata, TokenAsset};
use sg_random_minter::{
    CollectionConfig, MintPhase, MintWindow, PublicMintConfig, WhitelistMintConfig,
};
use sg_std::{CosmosMsg, Response, NATIVE_DENOM};

use crate::contract::AdminCap;
use crate::error::ContractError;
use crate::state::{
    ADDED_URIS, COLLECTION_ADDR, COLLECTION_CONFIG, PUBLIC_MINTERS, PUBLIC_MINT_CONFIG,
    TOKEN_POOL, TREASURY, WHITELIST, WHITELIST_MINT_CONFIG,
};

/// Phase open at `now`. The whitelist wins if both windows are open.
pub fn resolve_phase(
    whitelist: Option<&WhitelistMintConfig>,
    public: Option<&PublicMintConfig>,
    now: Timestamp,
) -> Option<(MintPhase, Uint128)> {
    if let Some(whitelist) = whitelist.filter(|w| w.is_active(now)) {
        return Some((MintPhase::Whitelist, whitelist.price));
    }
    public
        .filter(|p| p.is_active(now))
        .map(|public| (MintPhase::Public, public.price))
}

/// Earliest configured window, if minting times are set
fn first_window(storage: &dyn Storage) -> Result<Option<MintWindow>, ContractError> {
    if let Some(whitelist) = WHITELIST_MINT_CONFIG.may_load(storage)? {
        return Ok(Some(whitelist));
    }
    PUBLIC_MINT_CONFIG
        .may_load(storage)
        .map_err(ContractError::from)
}

pub fn total_price(price: Uint128, amount: u64) -> Result<Uint128, ContractError> {
    price
        .checked_mul(Uint128::from(amount))
        .map_err(|e| ContractError::Std(e.into()))
}

/// Appends a batch of tokens to the pool. The batch is stored entirely or not at all.
pub fn execute_add_tokens(
    deps: DepsMut,
    env: Env,
    cap: AdminCap,
    token_uris: Vec<String>,
    property_keys: Vec<Vec<String>>,
    property_values: Vec<Vec<Binary>>,
    property_types: Vec<Vec<String>>,
) -> Result<Response, ContractError> {
    let config = COLLECTION_CONFIG
        .may_load(deps.storage)?
        .ok_or(ContractError::CollectionNotConfigured {})?;

    if let Some(window) = first_window(deps.storage)? {
        if window.has_started(env.block.time) {
            return Err(ContractError::MintAlreadyStarted {});
        }
    }

    let count = token_uris.len();
    if property_keys.len() != count
        || property_values.len() != count
        || property_types.len() != count
    {
        return Err(ContractError::InputLengthMismatch {});
    }
    let tokens = token_uris
        .into_iter()
        .zip(property_keys)
        .zip(property_values)
        .zip(property_types)
        .map(|(((uri, keys), values), types)| TokenAsset::new(uri, keys, values, types))
        .collect::<Vec<_>>();
    if !tokens.iter().all(TokenAsset::has_parallel_properties) {
        return Err(ContractError::InputLengthMismatch {});
    }

    let pool_size = TOKEN_POOL.length(deps.storage)?;
    if config.collection_maximum != 0 {
        let requested = pool_size + config.minted_count() + count as u64;
        if requested > config.collection_maximum {
            return Err(ContractError::ExceedsCollectionMaximum {
                requested,
                maximum: config.collection_maximum,
            });
        }
    }

    let mut batch = BTreeSet::new();
    for token in tokens.iter() {
        if !batch.insert(token.uri.as_str()) || ADDED_URIS.contains(deps.storage, &token.uri)? {
            return Err(ContractError::DuplicateToken {
                uri: token.uri.clone(),
            });
        }
    }

    for token in tokens {
        ADDED_URIS.add(deps.storage, token.uri.clone(), Empty {})?;
        TOKEN_POOL.push_back(deps.storage, token)?;
    }

    let event = Event::new("add-tokens")
        .add_attribute("count", count.to_string())
        .add_attribute("pool_size", (pool_size + count as u64).to_string())
        .add_attribute("sender", cap.admin());
    Ok(Response::new().add_event(event))
}

/// Mints `amount` tokens picked from the pool to the sender, at the price of the open phase.
pub fn execute_mint_nft(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: u64,
) -> Result<Response, ContractError> {
    if amount == 0 {
        return Err(ContractError::InvalidMintAmount {});
    }
    let mut config = COLLECTION_CONFIG
        .may_load(deps.storage)?
        .ok_or(ContractError::CollectionNotConfigured {})?;
    let collection = COLLECTION_ADDR
        .may_load(deps.storage)?
        .ok_or(ContractError::CollectionNotConfigured {})?;

    let now = env.block.time;
    let whitelist = WHITELIST_MINT_CONFIG.may_load(deps.storage)?;
    let public = PUBLIC_MINT_CONFIG.may_load(deps.storage)?;
    let (phase, price) = resolve_phase(whitelist.as_ref(), public.as_ref(), now)
        .ok_or(ContractError::MintingNotEnabled {})?;

    let allowance = match phase {
        MintPhase::Whitelist => {
            let remaining = WHITELIST
                .may_load(deps.storage, &info.sender)?
                .ok_or(ContractError::NotWhitelisted {})?;
            Some((remaining, true))
        }
        MintPhase::Public if config.public_mint_limit != 0 => {
            match PUBLIC_MINTERS.may_load(deps.storage, &info.sender)? {
                Some(remaining) => Some((remaining, true)),
                None => Some((config.public_mint_limit, false)),
            }
        }
        MintPhase::Public => None,
    };
    if let Some((remaining, _)) = allowance {
        if amount > remaining {
            return Err(ContractError::AllowanceExceeded {
                requested: amount,
                remaining,
            });
        }
    }

    let pool_size = TOKEN_POOL.length(deps.storage)?;
    if amount > pool_size {
        return Err(ContractError::InsufficientSupply {
            requested: amount,
            remaining: pool_size,
        });
    }

    let total = total_price(price, amount)?;
    if total.is_zero() {
        nonpayable(&info)?;
    } else {
        let payment = must_pay(&info, NATIVE_DENOM)?;
        if payment != total {
            return Err(ContractError::IncorrectPayment {
                got: payment.u128(),
                expected: total.u128(),
            });
        }
    }

    // checks done, state changes follow
    if let Some((remaining, enrolled)) = allowance {
        debit_allowance(
            deps.storage,
            &phase,
            &info.sender,
            remaining - amount,
            enrolled,
        )?;
    }

    let mut res = Response::new();
    if !total.is_zero() {
        let treasury = TREASURY.load(deps.storage)?;
        res = res.add_message(BankMsg::Send {
            to_address: treasury.to_string(),
            amount: coins(total.u128(), NATIVE_DENOM),
        });
    }

    let collection = AssetCollectionContract(collection);
    for _ in 0..amount {
        let (mint_msg, event) =
            issue_token(deps.storage, &collection, &mut config, &info.sender, now)?;
        res = res.add_message(mint_msg).add_event(event);
    }
    COLLECTION_CONFIG.save(deps.storage, &config)?;

    Ok(res
        .add_attribute("action", "mint_nft")
        .add_attribute("phase", format!("{phase:?}"))
        .add_attribute("amount", amount.to_string())
        .add_attribute("price", price.to_string()))
}

fn debit_allowance(
    storage: &mut dyn Storage,
    phase: &MintPhase,
    minter: &Addr,
    remaining: u64,
    enrolled: bool,
) -> Result<(), ContractError> {
    let table = match phase {
        MintPhase::Whitelist => WHITELIST,
        MintPhase::Public => PUBLIC_MINTERS,
    };
    if enrolled {
        table.update(storage, minter, |_| Ok::<_, ContractError>(remaining))?;
    } else {
        table.add(storage, minter.clone(), remaining)?;
    }
    Ok(())
}

/// Draws one token from the pool and builds the message minting it to `recipient`
fn issue_token(
    storage: &mut dyn Storage,
    collection: &AssetCollectionContract,
    config: &mut CollectionConfig,
    recipient: &Addr,
    now: Timestamp,
) -> Result<(CosmosMsg, Event), ContractError> {
    let pool_size = TOKEN_POOL.length(storage)?;
    // block time is public, this only spreads picks over the pool
    let index = now.nanos() % pool_size;
    let asset = TOKEN_POOL.swap_remove(storage, index)?;

    let token_id = config.token_counter.to_string();
    let token_name = config.next_token_name();
    let metadata = AssetMetadata {
        name: token_name.clone(),
        description: config.token_description.clone(),
        properties: asset.properties(),
        royalty: config.royalty.clone(),
    };
    let mint_msg = collection.mint(
        token_id.clone(),
        recipient.to_string(),
        asset.uri.clone(),
        metadata,
    )?;
    config.token_counter += 1;

    let event = Event::new("mint-nft")
        .add_attribute("receiver", recipient)
        .add_attribute("token_id", token_id)
        .add_attribute("token_name", token_name)
        .add_attribute("token_uri", asset.uri);
    Ok((mint_msg, event))
}
