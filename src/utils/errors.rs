/// Fallback when an error body carries nothing readable
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Extract a human-readable message from an API error body
///
/// Looks at the JSON `message` field first, then `error`:
/// `{"message": "Category not found"}` -> "Category not found"
///
/// Bodies that are not JSON, or carry neither field as a non-empty string,
/// yield [`DEFAULT_ERROR_MESSAGE`].
pub fn extract_error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return DEFAULT_ERROR_MESSAGE.to_string();
    };

    ["message", "error"]
        .iter()
        .filter_map(|field| json.get(field).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .unwrap_or(DEFAULT_ERROR_MESSAGE)
        .to_string()
}
