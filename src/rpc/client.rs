use std::{sync::Arc, time::Duration};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::{Value, value::RawValue};
use url::Url;

use crate::{
    BatchItem, GasTriggerError, Result, RpcRequest, RpcResponse,
    jsonrpc::JSONRPC_VERSION,
    rpc::{IdGenerator, RawReply},
};

/// JSON-RPC client bound to one node endpoint.
///
/// Exactly one HTTP request is made per call. Retrying is left to the caller.
#[derive(Debug, Clone)]
pub struct RpcClient {
    url: Url,
    client: reqwest::Client,
    ids: Arc<IdGenerator>,
    call_timeout: Duration,
}

impl RpcClient {
    pub fn new(url: Url, call_timeout: Duration) -> Self {
        Self::with_id_generator(url, call_timeout, IdGenerator::global())
    }

    pub fn with_id_generator(url: Url, call_timeout: Duration, ids: Arc<IdGenerator>) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
            ids,
            call_timeout,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn build_request(&self, id: i64, method: &str, params: Vec<Value>) -> RpcRequest {
        RpcRequest {
            id,
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params,
        }
    }

    pub fn build_unique_request(&self, method: &str, params: Vec<Value>) -> RpcRequest {
        self.build_request(self.ids.next_id(), method, params)
    }

    pub async fn call(&self, request: &RpcRequest) -> Result<RpcResponse> {
        self.call_raw(request).await?.into_response()
    }

    /// Like [`call`](Self::call), but hands back the verbatim body even when it
    /// does not decode. Only connection-level failures are returned as `Err`;
    /// use [`RawReply::accepted`] to check the status and envelope.
    pub async fn call_raw(&self, request: &RpcRequest) -> Result<RawReply> {
        let payload = encode(request)?;
        let (status, body) = self.post(&payload).await?;

        let decoded = serde_json::from_str::<RpcResponse>(&body)
            .map_err(|source| self.failed_decode(status, source, &payload, &body));

        Ok(RawReply::new(status.as_u16(), self.url.to_string(), body, decoded))
    }

    /// Sends all requests in one payload. Replies are not positional; match
    /// them with [`find_response`](crate::find_response).
    pub async fn call_batch(&self, requests: &[RpcRequest]) -> Result<Vec<BatchItem>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let payload = encode(requests)?;
        let (status, body) = self.post(&payload).await?;

        // A node that rejects the whole batch answers with a single object.
        if body.trim_start().starts_with('{') {
            let single = serde_json::from_str::<RpcResponse>(&body)
                .map_err(|source| self.failed_decode(status, source, &payload, &body))?;
            return Ok(vec![BatchItem::Response(single)]);
        }

        let entries = serde_json::from_str::<Vec<Box<RawValue>>>(&body)
            .map_err(|source| self.failed_decode(status, source, &payload, &body))?;

        Ok(entries
            .into_iter()
            .map(|entry| match serde_json::from_str::<RpcResponse>(entry.get()) {
                Ok(response) => BatchItem::Response(response),
                Err(e) => BatchItem::Malformed {
                    raw: entry.get().to_string(),
                    reason: e.to_string(),
                },
            })
            .collect())
    }

    async fn post(&self, payload: &str) -> Result<(reqwest::StatusCode, String)> {
        let exchange = async {
            let response = self
                .client
                .post(self.url.clone())
                .header(CONTENT_TYPE, "application/json")
                .header(ACCEPT, "application/json")
                .body(payload.to_owned())
                .send()
                .await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, GasTriggerError>((status, body))
        };

        tokio::time::timeout(self.call_timeout, exchange)
            .await
            .map_err(|_| GasTriggerError::Timeout {
                duration_ms: self.call_timeout.as_millis() as u64,
            })?
    }

    fn failed_decode(
        &self,
        status: reqwest::StatusCode,
        source: serde_json::Error,
        request: &str,
        body: &str,
    ) -> GasTriggerError {
        tracing::debug!(
            url = %self.url,
            status = status.as_u16(),
            request = %request,
            body = %body,
            "Undecodable JSON-RPC reply"
        );

        if status.is_success() {
            GasTriggerError::Decode {
                source,
                request: request.to_string(),
                body: body.to_string(),
            }
        } else {
            GasTriggerError::HttpStatus {
                status: status.as_u16(),
                url: self.url.to_string(),
                body: body.to_string(),
            }
        }
    }
}

fn encode<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| GasTriggerError::Serialization(e.to_string()))
}
