#[derive(Debug, thiserror::Error)]
pub enum GasTriggerError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String, body: String },

    /// The body could not be parsed into the expected shape. Both the raw
    /// request and the raw response are kept for diagnostics.
    #[error("Failed to decode response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        request: String,
        body: String,
    },

    /// The `result` of an otherwise valid reply has the wrong shape for the
    /// caller's method.
    #[error("Failed to decode result: {source}")]
    ResultDecode {
        #[source]
        source: serde_json::Error,
        result: String,
    },

    #[error("JSON-RPC error: {0}")]
    RpcProtocol(String),

    /// Parsed as JSON but is not a JSON-RPC reply, e.g. a proxy or rate-limit page.
    #[error("Not a JSON-RPC reply: {body}")]
    NotJsonRpc { body: String },

    #[error("Reply id {got:?} does not match request id {expected}")]
    IdMismatch { expected: i64, got: Option<i64> },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GasTriggerError {
    /// Connection, deadline and HTTP-level failures, as opposed to payload problems.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GasTriggerError::Transport(_)
                | GasTriggerError::Timeout { .. }
                | GasTriggerError::HttpStatus { .. }
        )
    }

    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            GasTriggerError::Decode { .. } | GasTriggerError::ResultDecode { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GasTriggerError>;
