pub use crate::error::ContractError;
#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::Empty;
use semver::Version;
use sg_asset::AssetMetadata;

mod error;
pub mod helpers;


// version info for migration info
const CONTRACT_NAME: &str = "crates.io:sg721-asset";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub type Sg721AssetContract<'a> = sg721_base::Sg721Contract<'a, AssetMetadata>;
pub type ExecuteMsg = sg721::ExecuteMsg<AssetMetadata, Empty>;
pub type QueryMsg = sg721_base::msg::QueryMsg;

pub mod entry {
    use super::*;

    use cosmwasm_std::{
        ensure, Binary, Deps, DepsMut, Env, Event, MessageInfo, StdError, StdResult,
    };
    use cw2::set_contract_version;
    use sg721::InstantiateMsg;
    use sg721_base::ContractError as Sg721ContractError;
    use sg_std::Response;

    #[cfg_attr(not(feature = "library"), entry_point)]
    pub fn instantiate(
        mut deps: DepsMut,
        env: Env,
        info: MessageInfo,
        msg: InstantiateMsg,
    ) -> Result<Response, Sg721ContractError> {
        let res =
            Sg721AssetContract::default().instantiate(deps.branch(), env.clone(), info, msg)?;

        // sg721-base records its own name, replace it so migrations match this contract
        set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

        Ok(res
            .add_attribute("action", "instantiate")
            .add_attribute("sg721_asset_addr", env.contract.address.to_string()))
    }

    #[cfg_attr(not(feature = "library"), entry_point)]
    pub fn execute(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        msg: ExecuteMsg,
    ) -> Result<Response, ContractError> {
        // every asset token points at its metadata uri
        if let ExecuteMsg::Mint(mint_msg) = &msg {
            if mint_msg.token_uri.is_none() {
                return Err(ContractError::MissingTokenUri {});
            }
        }

        Sg721AssetContract::default()
            .execute(deps, env, info, msg)
            .map_err(|e| e.into())
    }

    #[cfg_attr(not(feature = "library"), entry_point)]
    pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
        Sg721AssetContract::default().query(deps, env, msg)
    }

    #[cfg_attr(not(feature = "library"), entry_point)]
    pub fn migrate(deps: DepsMut, _env: Env, _msg: Empty) -> Result<Response, ContractError> {
        let prev = cw2::get_contract_version(deps.storage)?;
        ensure!(
            prev.contract == CONTRACT_NAME,
            StdError::generic_err("Cannot upgrade to a different contract")
        );

        let prev_version: Version = prev
            .version
            .parse()
            .map_err(|_| StdError::generic_err("Invalid contract version"))?;
        let new_version: Version = CONTRACT_VERSION
            .parse()
            .map_err(|_| StdError::generic_err("Invalid contract version"))?;
        ensure!(
            prev_version <= new_version,
            StdError::generic_err("Cannot upgrade to a previous contract version")
        );

        set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

        Ok(Response::new().add_event(
            Event::new("migrate")
                .add_attribute("collection", "sg721-asset")
                .add_attribute("from_version", prev.version)
                .add_attribute("to_version", CONTRACT_VERSION),
        ))
    }
}
