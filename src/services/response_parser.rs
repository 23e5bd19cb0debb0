use serde_json::{Map, Value};

use crate::{
    errors::{AppError, AppResult},
    models::domain::stage_result::{FieldSpec, Shape, StageOutput},
};

/// Pulls the first JSON object out of free-form model output.
///
/// The span from the first `{` to the last `}` is tried first, then the whole
/// trimmed text. Anything that is not an object is rejected.
pub fn extract_object(text: &str) -> AppResult<Map<String, Value>> {
    let brace_span = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => Some(&text[start..=end]),
        _ => None,
    };

    let candidates = brace_span.into_iter().chain(std::iter::once(text.trim()));
    for candidate in candidates {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(candidate) {
            return Ok(map);
        }
    }

    let reason = if brace_span.is_some() {
        "malformed JSON object"
    } else {
        "no JSON object found"
    };
    Err(AppError::parse(reason, text))
}

/// Extracts, schema-checks and deserializes one stage's output.
pub fn parse_stage<T: StageOutput>(text: &str) -> AppResult<T> {
    let map = extract_object(text)?;

    if let Err(reason) = check_fields(&map, T::SCHEMA, "") {
        log::warn!("{} output failed schema check: {}", T::STAGE, reason);
        return Err(AppError::parse(reason, text));
    }

    serde_json::from_value(Value::Object(map))
        .map_err(|e| AppError::parse(format!("unexpected field type: {}", e), text))
}

fn check_fields(map: &Map<String, Value>, fields: &[FieldSpec], path: &str) -> Result<(), String> {
    for spec in fields {
        let key_path = if path.is_empty() {
            spec.key.to_string()
        } else {
            format!("{}.{}", path, spec.key)
        };

        let value = map
            .get(spec.key)
            .ok_or_else(|| format!("missing key '{}'", key_path))?;
        check_shape(value, spec.shape, &key_path)?;
    }
    Ok(())
}

fn check_shape(value: &Value, shape: Shape, path: &str) -> Result<(), String> {
    match (shape, value) {
        (Shape::Text, Value::String(_)) => Ok(()),
        (Shape::TextList, Value::Array(items)) => {
            match items.iter().position(|item| !item.is_string()) {
                Some(index) => Err(format!("'{}[{}]' is not a string", path, index)),
                None => Ok(()),
            }
        }
        (Shape::Object(fields), Value::Object(map)) => check_fields(map, fields, path),
        (Shape::ObjectList(fields), Value::Array(items)) => {
            items.iter().enumerate().try_for_each(|(index, item)| {
                let item_path = format!("{}[{}]", path, index);
                match item {
                    Value::Object(map) => check_fields(map, fields, &item_path),
                    _ => Err(format!("'{}' is not an object", item_path)),
                }
            })
        }
        (expected, _) => Err(format!("'{}' should be {}", path, describe(expected))),
    }
}

fn describe(shape: Shape) -> &'static str {
    match shape {
        Shape::Text => "a string",
        Shape::TextList => "a list of strings",
        Shape::Object(_) => "an object",
        Shape::ObjectList(_) => "a list of objects",
    }
}
