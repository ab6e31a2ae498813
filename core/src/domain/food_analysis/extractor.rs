//! Turns the raw text of a model answer into a validated [`NutritionRecord`].
//!
//! The model is asked for bare JSON but regularly answers with the JSON inside
//! a markdown code fence, with the schema envelope echoed around the record,
//! or with prose. Extraction runs in fixed order:
//!
//! 1. fenced block, if an opening and a closing fence are both present
//! 2. generic JSON parse of the candidate
//! 3. schema envelope unwrap (`{"properties": {...}}`)
//! 4. validation against [`NutritionSchema`]
//! 5. strict decode into [`NutritionRecord`]
//!
//! No field is ever defaulted or coerced.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::domain::food_analysis::{
    entities::{ExtractionError, NutritionRecord},
    schema::NutritionSchema,
};

/// Opening fence with an optional language tag, the body, the closing fence.
static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_+\-]*[ \t]*\r?\n?(.*?)```").expect("fence pattern is valid")
});

pub fn extract(raw_text: &str) -> Result<NutritionRecord, ExtractionError> {
    extract_with_schema(raw_text, &NutritionSchema::default())
}

pub fn extract_with_schema(
    raw_text: &str,
    schema: &NutritionSchema,
) -> Result<NutritionRecord, ExtractionError> {
    let candidate = json_candidate(raw_text);
    debug!(candidate_len = candidate.len(), "extracting nutrition record");

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| ExtractionError::MalformedJson(e.to_string()))?;

    let value = unwrap_schema_envelope(value);
    schema.validate(&value)?;

    let canonical = serde_json::to_vec(&value)
        .map_err(|e| ExtractionError::MalformedJson(e.to_string()))?;

    serde_json::from_slice::<NutritionRecord>(&canonical)
        .map_err(|e| ExtractionError::mismatch("$", e.to_string()))
}

/// The substring holding the JSON payload: the body of the first fenced
/// block, or the whole (trimmed) text when there is no complete fence.
pub fn json_candidate(raw_text: &str) -> &str {
    FENCED_BLOCK
        .captures(raw_text)
        .and_then(|captures| captures.get(1))
        .map(|body| body.as_str().trim())
        .unwrap_or_else(|| raw_text.trim())
}

/// Some answers echo the schema wrapper and put the record under
/// `properties`. Only objects without a `title` of their own are unwrapped.
fn unwrap_schema_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map)
            if !map.contains_key("title")
                && map.get("properties").is_some_and(Value::is_object) =>
        {
            map.remove("properties").unwrap_or(Value::Object(map))
        }
        other => other,
    }
}
