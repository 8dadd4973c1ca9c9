use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::schema::SummarizationResult;

/// Coerce raw model output into a fully typed result.
///
/// Never fails: anything unparseable or mistyped becomes the empty value for
/// that field.
pub fn coerce_response(raw: &str) -> SummarizationResult {
    let object = parse_object(raw);

    SummarizationResult {
        summary: string_field(&object, "summary"),
        action_items: list_field(&object, "action_items"),
        decisions: list_field(&object, "decisions"),
        follow_ups: list_field(&object, "follow_ups"),
        risks: list_field(&object, "risks"),
    }
}

fn parse_object(raw: &str) -> Map<String, Value> {
    let parsed = match serde_json::from_str::<Value>(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "Model output is not plain JSON, looking for an embedded object");
            embedded_object(raw).and_then(|candidate| serde_json::from_str::<Value>(candidate).ok())
        }
    };

    match parsed {
        Some(Value::Object(map)) => map,
        Some(_) => {
            warn!("Model output is JSON but not an object");
            Map::new()
        }
        None => {
            warn!(chars = raw.len(), "Model output contains no parseable JSON object");
            Map::new()
        }
    }
}

/// Substring from the first `{` to the last `}`, inclusive
fn embedded_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

// Non-string elements are dropped so the list stays `[string]`.
fn list_field(object: &Map<String, Value>, key: &str) -> Vec<String> {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
