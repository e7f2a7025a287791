//! Generic JSON-RPC 2.0 envelope, as the ERP speaks it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const RPC_VERSION: &str = "2.0";

/// An outgoing call. The ERP multiplexes everything through
/// `method: "call"`; the real operation lives inside `params`.
#[derive(Debug, Serialize)]
pub struct RpcRequest<P: Serialize> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: P,
    pub id: String,
}

impl<P: Serialize> RpcRequest<P> {
    pub fn call(params: P) -> Self {
        Self {
            jsonrpc: RPC_VERSION,
            method: "call",
            params,
            id: request_id(),
        }
    }
}

/// Request ids in the upstream client look like `r7`, `r43`; only
/// per-session uniqueness matters.
pub fn request_id() -> String {
    format!("r{}", rand::rng().random_range(1..1000))
}

/// An incoming response: exactly one of `result`/`error` is populated.
/// Some endpoints legitimately answer with neither (see the line-batch
/// tolerance in the fetcher), so both stay optional here.
#[derive(Debug, Deserialize)]
pub struct RpcEnvelope<T> {
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcFault>,
}

#[derive(Debug, Deserialize)]
pub struct RpcFault {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub data: Option<Value>,
}

impl RpcFault {
    pub fn describe(&self) -> String {
        let msg = self.message.as_deref().unwrap_or("unspecified RPC fault");
        match self.code {
            Some(code) => format!("{msg} (code {code})"),
            None => msg.to_string(),
        }
    }
}
