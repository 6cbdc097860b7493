use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, value::RawValue};

use crate::{GasTriggerError, Result};

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub id: i64,
    pub jsonrpc: String,
    pub method: String,
    pub params: Vec<Value>,
}

/// A decoded reply. `result` is left as raw JSON; the caller decodes it for
/// the method it called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Echo of the request id. Nodes send `null` when they could not read the request.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub result: Option<Box<RawValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorField>,
}

/// Nodes disagree on the shape of `error`: some send a bare string, most
/// send the standard object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcErrorField {
    Message(String),
    Object(JsonRpcError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl fmt::Display for RpcErrorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcErrorField::Message(message) => f.write_str(message),
            RpcErrorField::Object(err) => write!(f, "{} (code {})", err.message, err.code),
        }
    }
}

impl RpcResponse {
    /// The remote error, if the reply carries a non-empty one.
    pub fn error_message(&self) -> Option<String> {
        match &self.error {
            Some(RpcErrorField::Message(message)) if message.is_empty() => None,
            Some(err) => Some(err.to_string()),
            None => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error_message().is_some()
    }

    /// Carries `jsonrpc` and exactly one of `result` or a non-empty `error`.
    /// Every field is optional on the wire, so any JSON object decodes; this
    /// is what tells a node's reply apart from `{}` or a proxy error page.
    pub fn is_envelope(&self) -> bool {
        !self.jsonrpc.is_empty() && (self.result.is_some() != self.is_error())
    }

    pub fn matches(&self, request: &RpcRequest) -> bool {
        self.id == Some(request.id)
    }

    /// Turns a reply carrying a remote error into `RpcProtocol`.
    pub fn into_result(self) -> Result<Self> {
        match self.error_message() {
            Some(message) => Err(GasTriggerError::RpcProtocol(message)),
            None => Ok(self),
        }
    }

    pub fn decode_result<T: DeserializeOwned>(&self) -> Result<T> {
        if let Some(message) = self.error_message() {
            return Err(GasTriggerError::RpcProtocol(message));
        }
        let raw = self.result.as_ref().map(|r| r.get()).unwrap_or("null");
        serde_json::from_str(raw).map_err(|source| GasTriggerError::ResultDecode {
            source,
            result: raw.to_string(),
        })
    }
}

/// One element of a batch reply. Each element is decoded on its own so a
/// single malformed entry does not discard the rest.
#[derive(Debug, Clone)]
pub enum BatchItem {
    Response(RpcResponse),
    Malformed { raw: String, reason: String },
}

impl BatchItem {
    pub fn response(&self) -> Option<&RpcResponse> {
        match self {
            BatchItem::Response(response) => Some(response),
            BatchItem::Malformed { .. } => None,
        }
    }
}

/// Batch replies are not positional, so responses are matched on `id`.
pub fn find_response(items: &[BatchItem], id: i64) -> Option<&RpcResponse> {
    items
        .iter()
        .filter_map(BatchItem::response)
        .find(|response| response.id == Some(id))
}
