//! Locating the JSON payload inside free-form model output.
//!
//! Some providers return clean JSON, others wrap it in prose or markdown
//! fences, or nest the array under a wrapper key. Parsing here is permissive;
//! strict checking happens in the validator.

use serde_json::Value;

use crate::ports::ProviderError;

/// Wrapper keys tried, in order, before falling back to the first array field.
const WRAPPER_KEYS: &[&str] = &["recommendations", "tools"];

/// Extracts and unwraps the recommendation payload from raw model text.
pub fn extract(text: &str) -> Result<Value, ProviderError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    let value = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => value,
        Err(_) => recover_value(trimmed).ok_or_else(|| {
            ProviderError::unparsable("no well-formed JSON array or object in response")
        })?,
    };

    Ok(unwrap_one_level(value))
}

/// Fallback for text that is not JSON as a whole: fenced content first,
/// then the first embedded value in the fence, then in the full text.
fn recover_value(text: &str) -> Option<Value> {
    let fenced = strip_code_fence(text);
    serde_json::from_str::<Value>(fenced)
        .ok()
        .or_else(|| first_embedded_value(fenced))
        .or_else(|| first_embedded_value(text))
}

/// Returns the contents of a surrounding ``` fence, or the input unchanged.
fn strip_code_fence(text: &str) -> &str {
    let Some(start) = text.find("```") else {
        return text;
    };
    let after = &text[start + 3..];
    // Skip an info string such as `json` up to the end of the line.
    let content_start = after.find('\n').map(|i| i + 1).unwrap_or(0);
    let content = &after[content_start..];
    match content.find("```") {
        Some(end) => content[..end].trim(),
        None => text,
    }
}

/// Finds the first `[` or `{` at which a complete JSON value starts.
///
/// Trailing text after the value is ignored.
fn first_embedded_value(text: &str) -> Option<Value> {
    text.char_indices()
        .filter(|(_, c)| *c == '[' || *c == '{')
        .find_map(|(i, _)| {
            serde_json::Deserializer::from_str(&text[i..])
                .into_iter::<Value>()
                .next()
                .and_then(Result::ok)
                .filter(|v| v.is_array() || v.is_object())
        })
}

/// Removes one level of object wrapping around the tool array.
fn unwrap_one_level(value: Value) -> Value {
    let Value::Object(mut map) = value else {
        return value;
    };

    for key in WRAPPER_KEYS {
        if map.get(*key).is_some_and(Value::is_array) {
            if let Some(inner) = map.remove(*key) {
                return inner;
            }
        }
    }

    let array_key = map
        .iter()
        .find(|(_, v)| v.is_array())
        .map(|(k, _)| k.clone());
    match array_key.and_then(|k| map.remove(&k)) {
        Some(inner) => inner,
        None => Value::Object(map),
    }
}
