use serde::de::DeserializeOwned;
use serde_json::Value;

/// Typed view of a request body used only for validation; the body itself
/// is forwarded unchanged. A body of the wrong shape reads as empty.
pub fn fields_of<T: DeserializeOwned + Default>(body: &Value) -> T {
    serde_json::from_value(body.clone()).unwrap_or_default()
}

/// Non-empty string field.
pub fn present(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.is_empty())
}
