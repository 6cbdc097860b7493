use std::sync::LazyLock;

use regex::Regex;

use crate::{GasTriggerError, Result, RpcRequest, RpcResponse};

static TX_HASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"0x[A-Fa-f0-9]{64}").expect("static tx hash pattern"));

/// The verbatim reply to a call alongside its decoded form, if any.
#[derive(Debug)]
pub struct RawReply {
    pub status: u16,
    pub url: String,
    pub body: String,
    decoded: Result<RpcResponse>,
}

impl RawReply {
    pub(crate) fn new(status: u16, url: String, body: String, decoded: Result<RpcResponse>) -> Self {
        Self {
            status,
            url,
            body,
            decoded,
        }
    }

    pub fn response(&self) -> Option<&RpcResponse> {
        self.decoded.as_ref().ok()
    }

    pub fn decode_error(&self) -> Option<&GasTriggerError> {
        self.decoded.as_ref().err()
    }

    pub fn into_response(self) -> Result<RpcResponse> {
        self.decoded
    }

    /// Fails unless the node answered `request` with a 2xx status and a
    /// JSON-RPC reply that carries its id and no remote error.
    pub fn accepted(self, request: &RpcRequest) -> Result<Self> {
        if !(200..300).contains(&self.status) {
            return Err(GasTriggerError::HttpStatus {
                status: self.status,
                url: self.url,
                body: self.body,
            });
        }

        let response = self.decoded?;
        if let Some(message) = response.error_message() {
            return Err(GasTriggerError::RpcProtocol(message));
        }
        if !response.is_envelope() {
            return Err(GasTriggerError::NotJsonRpc { body: self.body });
        }
        if !response.matches(request) {
            return Err(GasTriggerError::IdMismatch {
                expected: request.id,
                got: response.id,
            });
        }

        Ok(Self {
            status: self.status,
            url: self.url,
            body: self.body,
            decoded: Ok(response),
        })
    }

    /// First transaction hash found in the body, decodable or not.
    pub fn tx_hash(&self) -> Option<&str> {
        TX_HASH.find(&self.body).map(|m| m.as_str())
    }
}
