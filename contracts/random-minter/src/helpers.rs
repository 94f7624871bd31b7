use cosmwasm_schema::cw_serde;
use cosmwasm_std::{coins, to_binary, Addr, QuerierWrapper, StdResult, Uint128, WasmMsg};
use sg_random_minter::{ActivePhaseResponse, CollectionConfig, CollectionResponse};
use sg_std::{CosmosMsg, NATIVE_DENOM};

use crate::msg::{ExecuteMsg, QueryMsg};

/// RandomMinterContract is a wrapper around Addr that provides a lot of helpers
#[cw_serde]
pub struct RandomMinterContract(pub Addr);

impl RandomMinterContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    /// Mint message carrying `price` per token in the native denom
    pub fn mint_nft(&self, amount: u64, price: Uint128) -> StdResult<CosmosMsg> {
        let funds = price
            .checked_mul(Uint128::from(amount))
            .map(|total| {
                if total.is_zero() {
                    vec![]
                } else {
                    coins(total.u128(), NATIVE_DENOM)
                }
            })?;
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg: to_binary(&ExecuteMsg::MintNft { amount })?,
            funds,
        }
        .into())
    }

    pub fn collection(&self, querier: &QuerierWrapper) -> StdResult<Addr> {
        let res: CollectionResponse =
            querier.query_wasm_smart(self.addr(), &QueryMsg::Collection {})?;
        Ok(Addr::unchecked(res.collection))
    }

    pub fn collection_config(&self, querier: &QuerierWrapper) -> StdResult<CollectionConfig> {
        querier.query_wasm_smart(self.addr(), &QueryMsg::CollectionConfig {})
    }

    pub fn remaining_tokens(&self, querier: &QuerierWrapper) -> StdResult<u64> {
        querier.query_wasm_smart(self.addr(), &QueryMsg::RemainingTokens {})
    }

    pub fn active_phase(&self, querier: &QuerierWrapper) -> StdResult<ActivePhaseResponse> {
        querier.query_wasm_smart(self.addr(), &QueryMsg::ActivePhase {})
    }
}
