use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_binary, Addr, QuerierWrapper, StdResult, WasmMsg};
use cw721::{NftInfoResponse, NumTokensResponse};
use cw721_base::MintMsg;
use sg_asset::AssetMetadata;
use sg_std::CosmosMsg;

use crate::{ExecuteMsg, QueryMsg};

/// AssetCollectionContract is a wrapper around Addr that provides a lot of helpers
#[cw_serde]
pub struct AssetCollectionContract(pub Addr);

impl AssetCollectionContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call(&self, msg: ExecuteMsg) -> StdResult<CosmosMsg> {
        let msg = to_binary(&msg)?;
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg,
            funds: vec![],
        }
        .into())
    }

    /// Mint message, only accepted when sent by the collection minter
    pub fn mint(
        &self,
        token_id: String,
        owner: String,
        token_uri: String,
        extension: AssetMetadata,
    ) -> StdResult<CosmosMsg> {
        self.call(ExecuteMsg::Mint(MintMsg {
            token_id,
            owner,
            token_uri: Some(token_uri),
            extension,
        }))
    }

    pub fn nft_info(
        &self,
        querier: &QuerierWrapper,
        token_id: &str,
    ) -> StdResult<NftInfoResponse<AssetMetadata>> {
        querier.query_wasm_smart(
            self.addr(),
            &QueryMsg::NftInfo {
                token_id: token_id.to_string(),
            },
        )
    }

    pub fn num_tokens(&self, querier: &QuerierWrapper) -> StdResult<u64> {
        let res: NumTokensResponse =
            querier.query_wasm_smart(self.addr(), &QueryMsg::NumTokens {})?;
        Ok(res.count)
    }
}
