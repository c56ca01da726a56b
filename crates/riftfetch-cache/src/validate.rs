//! Structural validation of cached payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How strictly cached payloads are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// `metadata` and `info` objects, plus `info.gameId` and `metadata.matchId`.
    #[default]
    Strict,
    /// `metadata` and `info` objects only. Accepts files written by older tools.
    Lenient,
}

/// Check a raw payload, returning the reason it is rejected.
pub fn validate_payload(value: &Value, mode: ValidationMode) -> Result<(), String> {
    let obj = value
        .as_object()
        .ok_or_else(|| "payload is not a JSON object".to_string())?;

    let metadata = obj
        .get("metadata")
        .and_then(Value::as_object)
        .ok_or_else(|| "missing \"metadata\" object".to_string())?;
    let info = obj
        .get("info")
        .and_then(Value::as_object)
        .ok_or_else(|| "missing \"info\" object".to_string())?;

    if mode == ValidationMode::Strict {
        if !info.contains_key("gameId") {
            return Err("missing \"info.gameId\"".to_string());
        }
        if !metadata.contains_key("matchId") {
            return Err("missing \"metadata.matchId\"".to_string());
        }
    }

    Ok(())
}
