pub mod common;
pub mod hmi;
pub mod v1;
pub mod v2;

pub use common::*;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolVersion {
    #[serde(rename = "1")]
    V1,
    #[serde(rename = "2")]
    V2,
}

impl ProtocolVersion {
    pub fn number(self) -> u32 {
        match self {
            ProtocolVersion::V1 => 1,
            ProtocolVersion::V2 => 2,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub enum RpcRequest {
    V1(v1::V1Request),
    V2(v2::V2Request),
}

impl RpcRequest {
    pub fn version(&self) -> ProtocolVersion {
        match self {
            RpcRequest::V1(_) => ProtocolVersion::V1,
            RpcRequest::V2(_) => ProtocolVersion::V2,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub enum RpcResponse {
    V1(v1::V1Response),
    V2(v2::V2Response),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub enum RpcNotification {
    V1(v1::V1Notification),
    V2(v2::V2Notification),
}
