//! Utility functions shared across the marketplace crate.

use crate::config::MAX_PAYLOAD_SIZE;
use crate::error::{MarketError, MarketResult};
use serde::de::DeserializeOwned;

/// Deserialize a JSON payload with a size limit to prevent oversized inputs.
pub fn json_from_limited_str<T: DeserializeOwned>(data: &str, max_bytes: usize) -> MarketResult<T> {
    if data.len() > max_bytes {
        return Err(MarketError::Validation(format!(
            "JSON payload too large: {} bytes (max {})",
            data.len(),
            max_bytes
        )));
    }
    serde_json::from_str(data)
        .map_err(|e| MarketError::Serialization(format!("JSON deserialization failed: {e}")))
}

/// Deserialize a JSON payload using the crate-wide size limit.
pub fn json_from_str<T: DeserializeOwned>(data: &str) -> MarketResult<T> {
    json_from_limited_str(data, MAX_PAYLOAD_SIZE)
}

/// Format a remaining-time value (milliseconds) for countdown display.
///
/// Non-positive remaining time renders as "ended". Presentation helper only;
/// the engine never stores a derived remaining time.
pub fn format_time_remaining(remaining_ms: u64) -> String {
    if remaining_ms == 0 {
        return "ended".to_string();
    }

    let total_secs = remaining_ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    format!("{hours}h {minutes}m {seconds}s")
}
