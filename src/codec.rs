//! JSON-RPC 2.0 envelope encoding and decoding.
//!
//! The codec knows nothing about individual API methods: params go in as any
//! `Serialize` value and the `result` member comes back as an untyped
//! [`Value`] for the caller to decode into its own type.

use serde::Serialize;
use serde_json::Value;

use crate::dto::rpc::{JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use crate::error::{ApiError, Result, ZabbixError};

/// Outcome carried by a well-formed response: exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Result(Value),
    Error(ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedResponse {
    pub id: Option<u64>,
    pub body: ResponseBody,
}

/// Build a request envelope. The `auth` member is left out entirely when
/// `auth_token` is `None`.
pub fn encode_request<P>(
    method: &str,
    params: &P,
    auth_token: Option<&str>,
    id: u64,
) -> Result<Vec<u8>>
where
    P: Serialize + ?Sized,
{
    let request = JsonRpcRequest {
        jsonrpc: JSONRPC_VERSION,
        method,
        params,
        id,
        auth: auth_token,
    };
    serde_json::to_vec(&request).map_err(ZabbixError::Encode)
}

pub fn decode_response(bytes: &[u8]) -> Result<DecodedResponse> {
    let envelope: JsonRpcResponse = serde_json::from_slice(bytes)
        .map_err(|e| ZabbixError::MalformedResponse(format!("invalid JSON-RPC envelope: {e}")))?;

    match envelope.jsonrpc.as_deref() {
        Some(JSONRPC_VERSION) => {}
        Some(other) => {
            return Err(ZabbixError::MalformedResponse(format!(
                "unsupported jsonrpc version {other:?}"
            )));
        }
        None => {
            return Err(ZabbixError::MalformedResponse("missing jsonrpc version".to_string()));
        }
    }

    let body = match (envelope.result, envelope.error) {
        (Some(result), None) => ResponseBody::Result(result),
        (None, Some(error)) => ResponseBody::Error(error),
        (Some(_), Some(_)) => {
            return Err(ZabbixError::MalformedResponse(
                "response carries both result and error".to_string(),
            ));
        }
        (None, None) => {
            return Err(ZabbixError::MalformedResponse(
                "response carries neither result nor error".to_string(),
            ));
        }
    };

    Ok(DecodedResponse {
        id: envelope.id,
        body,
    })
}
