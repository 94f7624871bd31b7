#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{ensure, DepsMut, Env, Event, StdError};
use semver::Version;
use sg_std::Response;

use crate::{
    contract::{CONTRACT_NAME, CONTRACT_VERSION},
    error::ContractError,
    msg::MigrateMsg,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let prev_contract_version = cw2::get_contract_version(deps.storage)?;

    ensure!(
        prev_contract_version.contract == CONTRACT_NAME,
        StdError::generic_err("Invalid contract name for migration")
    );

    let prev_version: Version = prev_contract_version
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

    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let response = Response::new().add_event(
        Event::new("migrate")
            .add_attribute("from_name", prev_contract_version.contract)
            .add_attribute("from_version", prev_contract_version.version)
            .add_attribute("to_name", CONTRACT_NAME)
            .add_attribute("to_version", CONTRACT_VERSION),
    );

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{mock_dependencies, mock_env};

    fn migrate_from(name: &str, version: &str) -> Result<Response, ContractError> {
        let mut deps = mock_dependencies();
        cw2::set_contract_version(deps.as_mut().storage, name, version).unwrap();
        migrate(deps.as_mut(), mock_env(), MigrateMsg {})
    }

    #[test]
    fn rejects_other_contract() {
        let err = migrate_from("crates.io:name-minter", "0.0.1").unwrap_err();
        assert_eq!(
            err.to_string(),
            StdError::generic_err("Invalid contract name for migration").to_string()
        );
    }

    #[test]
    fn refuses_downgrade() {
        let err = migrate_from(CONTRACT_NAME, "999.0.0").unwrap_err();
        assert_eq!(
            err.to_string(),
            StdError::generic_err("Cannot upgrade to a previous contract version").to_string()
        );
    }

    #[test]
    fn upgrade_records_new_version() {
        let mut deps = mock_dependencies();
        cw2::set_contract_version(deps.as_mut().storage, CONTRACT_NAME, "0.0.1").unwrap();

        let res = migrate(deps.as_mut(), mock_env(), MigrateMsg {}).unwrap();
        let event = &res.events[0];
        assert_eq!(event.ty, "migrate");
        assert!(event
            .attributes
            .iter()
            .any(|attr| attr.key == "from_version" && attr.value == "0.0.1"));

        let version = cw2::get_contract_version(&deps.storage).unwrap();
        assert_eq!(version.contract, CONTRACT_NAME);
        assert_eq!(version.version, CONTRACT_VERSION);
    }
}
