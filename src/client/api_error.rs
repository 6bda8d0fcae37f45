use serde::Deserialize;
use serde_json::Value;

/// One entry of the `error` array a 200 response may carry
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorEntry {
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_instance: Option<Vec<ErrorInstance>>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInstance {
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl ErrorInstance {
    /// `<br>field message`, or empty unless both parts are present
    fn fragment(&self) -> String {
        match (non_empty(&self.field_name), non_empty(&self.error_message)) {
            (Some(field), Some(message)) => format!("<br>{} {}", field, message),
            _ => String::new(),
        }
    }
}

impl ApiErrorEntry {
    fn flatten(&self) -> String {
        let mut message = self.error_message.clone().unwrap_or_default();
        let instances = self
            .error_instance
            .iter()
            .flatten()
            .map(ErrorInstance::fragment)
            .collect::<Vec<_>>()
            .join(", ");
        message.push_str(&instances);
        message
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Join all entries into one message.
///
/// Instances missing a field name or message still take their slot in the
/// `", "` separated list, as an empty fragment.
pub fn flatten_api_errors(errors: &[ApiErrorEntry]) -> String {
    errors
        .iter()
        .map(ApiErrorEntry::flatten)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Message for a raw `error` payload. A lone object is treated as a
/// one-element list; a payload of any other shape is reported as JSON text.
pub fn parse_api_error(error: &Value) -> String {
    let entries = match error {
        Value::Array(_) => serde_json::from_value::<Vec<ApiErrorEntry>>(error.clone()),
        Value::Object(_) => serde_json::from_value::<ApiErrorEntry>(error.clone()).map(|e| vec![e]),
        Value::String(message) => return message.clone(),
        _ => return error.to_string(),
    };
    match entries {
        Ok(entries) => flatten_api_errors(&entries),
        Err(_) => error.to_string(),
    }
}

/// JSON counterpart of "is this field set to something"
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
