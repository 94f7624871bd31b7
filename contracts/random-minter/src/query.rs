#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_binary, Addr, Binary, Deps, Env, StdResult};
use sg_random_minter::{ActivePhaseResponse, CollectionResponse, MintConfigsResponse};

use crate::{
    mint::resolve_phase,
    msg::QueryMsg,
    state::{
        ADMIN, COLLECTION_ADDR, COLLECTION_CONFIG, PUBLIC_MINTERS, PUBLIC_MINT_CONFIG, TOKEN_POOL,
        TREASURY, WHITELIST, WHITELIST_MINT_CONFIG,
    },
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    let api = deps.api;

    match msg {
        QueryMsg::Admin {} => to_binary(&ADMIN.query_admin(deps)?),
        QueryMsg::Treasury {} => to_binary(&TREASURY.load(deps.storage)?),
        QueryMsg::Collection {} => to_binary(&query_collection(deps)?),
        QueryMsg::CollectionConfig {} => to_binary(&COLLECTION_CONFIG.load(deps.storage)?),
        QueryMsg::MintConfigs {} => to_binary(&query_mint_configs(deps)?),
        QueryMsg::WhitelistAllowance { address } => to_binary(&query_whitelist_allowance(
            deps,
            &api.addr_validate(&address)?,
        )?),
        QueryMsg::PublicAllowance { address } => to_binary(&query_public_allowance(
            deps,
            &api.addr_validate(&address)?,
        )?),
        QueryMsg::RemainingTokens {} => to_binary(&query_remaining_tokens(deps)?),
        QueryMsg::ActivePhase {} => to_binary(&query_active_phase(deps, env)?),
    }
}

fn query_collection(deps: Deps) -> StdResult<CollectionResponse> {
    let collection = COLLECTION_ADDR.load(deps.storage)?;
    Ok(CollectionResponse {
        collection: collection.to_string(),
    })
}

fn query_mint_configs(deps: Deps) -> StdResult<MintConfigsResponse> {
    Ok(MintConfigsResponse {
        whitelist: WHITELIST_MINT_CONFIG.may_load(deps.storage)?,
        public: PUBLIC_MINT_CONFIG.may_load(deps.storage)?,
    })
}

fn query_whitelist_allowance(deps: Deps, address: &Addr) -> StdResult<Option<u64>> {
    if !WHITELIST.is_initialized(deps.storage)? {
        return Ok(None);
    }
    Ok(WHITELIST.may_load(deps.storage, address)?)
}

/// `None` when the public phase is uncapped or not configured
fn query_public_allowance(deps: Deps, address: &Addr) -> StdResult<Option<u64>> {
    let limit = match COLLECTION_CONFIG.may_load(deps.storage)? {
        Some(config) if config.public_mint_limit != 0 => config.public_mint_limit,
        _ => return Ok(None),
    };
    if !PUBLIC_MINTERS.is_initialized(deps.storage)? {
        return Ok(None);
    }
    let remaining = PUBLIC_MINTERS.may_load(deps.storage, address)?;
    Ok(Some(remaining.unwrap_or(limit)))
}

fn query_remaining_tokens(deps: Deps) -> StdResult<u64> {
    if !TOKEN_POOL.is_initialized(deps.storage)? {
        return Ok(0);
    }
    Ok(TOKEN_POOL.length(deps.storage)?)
}

fn query_active_phase(deps: Deps, env: Env) -> StdResult<ActivePhaseResponse> {
    let whitelist = WHITELIST_MINT_CONFIG.may_load(deps.storage)?;
    let public = PUBLIC_MINT_CONFIG.may_load(deps.storage)?;

    let (phase, price) = match resolve_phase(whitelist.as_ref(), public.as_ref(), env.block.time) {
        Some((phase, price)) => (Some(phase), Some(price)),
        None => (None, None),
    };
    Ok(ActivePhaseResponse { phase, price })
}
