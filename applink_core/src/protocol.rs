use crate::connection::DeviceHandle;
use applink_protocol::{RpcNotification, RpcRequest, RpcResponse};
use serde::{Deserialize, Serialize};

pub const MOBILE_IN_CAP: usize = 256;
pub const HMI_IN_CAP: usize = 256;
pub const MOBILE_OUT_CAP: usize = 256;
pub const HMI_OUT_CAP: usize = 256;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum MobileInbound {
    Request {
        session_key: u32,
        correlation_id: u32,
        request: RpcRequest,
    },
    // The codec could not map the method id; answered with
    // GenericResponse(INVALID_DATA) in the sender's protocol version.
    UnknownRequest {
        session_key: u32,
        correlation_id: u32,
        version: applink_protocol::ProtocolVersion,
    },
    SessionOpened {
        session_key: u32,
        device: DeviceHandle,
    },
    SessionClosed {
        session_key: u32,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum MobileOutbound {
    Response {
        session_key: u32,
        correlation_id: u32,
        response: RpcResponse,
    },
    Notification {
        session_key: u32,
        notification: RpcNotification,
    },
}
