use cosmwasm_schema::{export_schema, remove_schemas, schema_for};
use cw721::{NftInfoResponse, NumTokensResponse, OwnerOfResponse};
use sg721::InstantiateMsg;
use sg721_asset::{ExecuteMsg, QueryMsg};
use sg_asset::AssetMetadata;
use std::env::current_dir;
use std::fs::create_dir_all;

fn main() {
    let mut out_dir = current_dir().unwrap();
    out_dir.push("schema");
    create_dir_all(&out_dir).unwrap();
    remove_schemas(&out_dir).unwrap();

    export_schema(&schema_for!(InstantiateMsg), &out_dir);
    export_schema(&schema_for!(ExecuteMsg), &out_dir);
    export_schema(&schema_for!(QueryMsg), &out_dir);
    export_schema(&schema_for!(AssetMetadata), &out_dir);
    export_schema(&schema_for!(NftInfoResponse<AssetMetadata>), &out_dir);
    export_schema(&schema_for!(NumTokensResponse), &out_dir);
    export_schema(&schema_for!(OwnerOfResponse), &out_dir);
}
