//! RPC Method Implementations
//!
//! JSON-RPC methods and the plain JSON endpoints share these handlers. They
//! are synchronous and stateless; the server only moves bytes.

use crate::address::{convert, convert_batch, convert_nsec, ConversionError};
use crate::constants::{DEFAULT_PORT, SEGWIT_HRP};
use crate::nostr::KeyKind;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

/// JSON-RPC error code for malformed key strings
pub const INVALID_KEY_FORMAT: i32 = -5;
/// JSON-RPC error code for keys that decode but cannot be converted
pub const ADDRESS_DERIVATION: i32 = -32603;
/// JSON-RPC error code for bad params
pub const INVALID_PARAMS: i32 = -32602;
/// JSON-RPC error code for unknown methods
pub const METHOD_NOT_FOUND: i32 = -32601;

/// JSON-RPC 2.0 Request
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Option<serde_json::Value>,
    pub id: serde_json::Value,
}

/// JSON-RPC 2.0 Response
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<JsonRpcError>,
    pub id: serde_json::Value,
}

/// JSON-RPC Error
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: serde_json::Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError { code, message }),
            id,
        }
    }

    fn conversion_error(id: serde_json::Value, err: &ConversionError) -> Self {
        let code = if err.is_format_error() {
            INVALID_KEY_FORMAT
        } else {
            ADDRESS_DERIVATION
        };
        Self::error(id, code, err.to_string())
    }
}

/// Body of `POST /convert`
#[derive(Debug, Default, Deserialize)]
pub struct ConvertRequest {
    pub npub: Option<String>,
}

/// `keys` may be a single string or a list
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum KeyList {
    One(String),
    Many(Vec<String>),
}

impl Default for KeyList {
    fn default() -> Self {
        KeyList::Many(Vec::new())
    }
}

impl KeyList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            KeyList::One(key) => vec![key],
            KeyList::Many(keys) => keys,
        }
    }
}

/// Body of `POST /convert/batch` and params of `convertbatch`
#[derive(Debug, Default, Deserialize)]
pub struct BatchRequest {
    #[serde(rename = "type", default)]
    pub kind: KeyKind,
    #[serde(default)]
    pub keys: KeyList,
}

/// Handle `POST /convert`; returns the HTTP status code and JSON body
pub fn handle_convert(request: ConvertRequest) -> (u16, serde_json::Value) {
    let Some(npub) = request.npub else {
        return (400, json!({ "error": "Missing npub in request" }));
    };

    match convert(&npub) {
        Ok(addresses) => (200, json!(addresses)),
        Err(e) => {
            warn!(error = %e, "conversion failed");
            (400, json!({ "error": e.to_string() }))
        }
    }
}

/// Handle `POST /convert/batch`
pub fn handle_batch(request: BatchRequest) -> serde_json::Value {
    let keys = request.keys.into_vec();
    if keys.is_empty() {
        return json!({ "success": false, "error": "No keys provided" });
    }

    let outcome = convert_batch(&keys, request.kind);
    if outcome.all_failed() {
        warn!(count = keys.len(), "every key in batch failed");
        return json!({
            "success": false,
            "error": "All conversions failed",
            "errors": outcome.errors,
        });
    }

    let errors = (!outcome.errors.is_empty()).then_some(outcome.errors);
    json!({
        "success": true,
        "results": outcome.results,
        "errors": errors,
    })
}

/// Process a JSON-RPC request and return a response
pub fn handle_request(request: JsonRpcRequest) -> JsonRpcResponse {
    match request.method.as_str() {
        "convert" => rpc_convert(request.id, request.params),
        "nsectowif" => rpc_nsec_to_wif(request.id, request.params),
        "convertbatch" => rpc_convert_batch(request.id, request.params),
        "getinfo" => get_info(request.id),
        _ => JsonRpcResponse::error(
            request.id,
            METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ),
    }
}

/// First string param, from either `["key"]` or `"key"`
fn string_param(params: Option<serde_json::Value>) -> Option<String> {
    match params {
        Some(serde_json::Value::Array(arr)) => arr.first()?.as_str().map(str::to_string),
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Params: [npub]
fn rpc_convert(id: serde_json::Value, params: Option<serde_json::Value>) -> JsonRpcResponse {
    let Some(npub) = string_param(params) else {
        return JsonRpcResponse::error(id, INVALID_PARAMS, "Invalid params: expected npub".into());
    };

    match convert(&npub) {
        Ok(addresses) => JsonRpcResponse::success(id, json!(addresses)),
        Err(e) => JsonRpcResponse::conversion_error(id, &e),
    }
}

/// Params: [nsec]
fn rpc_nsec_to_wif(id: serde_json::Value, params: Option<serde_json::Value>) -> JsonRpcResponse {
    let Some(nsec) = string_param(params) else {
        return JsonRpcResponse::error(id, INVALID_PARAMS, "Invalid params: expected nsec".into());
    };

    match convert_nsec(&nsec) {
        Ok(key) => JsonRpcResponse::success(id, json!(key)),
        Err(e) => JsonRpcResponse::conversion_error(id, &e),
    }
}

/// Params: {"type": "npub"|"nsec", "keys": [...]}
fn rpc_convert_batch(id: serde_json::Value, params: Option<serde_json::Value>) -> JsonRpcResponse {
    let request = match params.map(serde_json::from_value::<BatchRequest>) {
        Some(Ok(request)) => request,
        _ => {
            return JsonRpcResponse::error(
                id,
                INVALID_PARAMS,
                "Invalid params: expected {\"type\", \"keys\"}".into(),
            )
        }
    };
    JsonRpcResponse::success(id, handle_batch(request))
}

/// Service info
fn get_info(id: serde_json::Value) -> JsonRpcResponse {
    JsonRpcResponse::success(
        id,
        json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "network": SEGWIT_HRP,
            "default_port": DEFAULT_PORT,
            "methods": ["convert", "nsectowif", "convertbatch", "getinfo"],
        }),
    )
}
