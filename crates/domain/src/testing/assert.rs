//! Response assertion helpers.
//!
//! Every helper is a pure predicate over a [`ResponseSpec`]: it returns
//! `Ok(())` or the first [`AssertionFailure`] found, and never performs I/O.

use std::time::Duration;

use serde_json::Value;

use super::{AssertionFailure, ShapeHint, ShapeSchema, StatusExpectation};
use crate::response::ResponseSpec;

/// Result of a single assertion.
pub type AssertionOutcome = Result<(), AssertionFailure>;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Fields that mark a body as an error payload, in lookup order.
const ERROR_FIELDS: &[&str] = &["error", "message"];

/// Fails unless the response status equals `expected`.
///
/// # Errors
///
/// Returns `AssertionFailure::StatusMismatch` carrying both codes.
pub fn assert_status(response: &ResponseSpec, expected: u16) -> AssertionOutcome {
    assert_status_in(response, &StatusExpectation::Exact(expected))
}

/// Fails unless the response status satisfies `expected`.
///
/// # Errors
///
/// Returns `AssertionFailure::StatusMismatch` carrying the expectation.
pub fn assert_status_in(response: &ResponseSpec, expected: &StatusExpectation) -> AssertionOutcome {
    if expected.matches(response.status()) {
        Ok(())
    } else {
        Err(AssertionFailure::StatusMismatch {
            expected: expected.clone(),
            actual: response.status(),
        })
    }
}

/// Fails unless the `Content-Type` header names `application/json`.
///
/// # Errors
///
/// Returns `AssertionFailure::ContentTypeMismatch` with the header value.
pub fn assert_json_content_type(response: &ResponseSpec) -> AssertionOutcome {
    match response.content_type() {
        Some(content_type) if is_json_media_type(content_type) => Ok(()),
        other => Err(AssertionFailure::ContentTypeMismatch {
            expected: JSON_MEDIA_TYPE.to_string(),
            actual: other.map(str::to_string),
        }),
    }
}

/// Substring match on the media type, so `application/json-patch+json` passes.
fn is_json_media_type(content_type: &str) -> bool {
    content_type.parse::<mime::Mime>().map_or_else(
        |_| content_type.to_ascii_lowercase().contains(JSON_MEDIA_TYPE),
        |m| m.essence_str().contains(JSON_MEDIA_TYPE),
    )
}

/// Checks the top-level fields of the body against `schema`.
///
/// # Errors
///
/// Returns `AssertionFailure::MissingField` for the first absent field, or
/// `AssertionFailure::TypeMismatch` when a field marked
/// [`ShapeHint::Object`] holds anything but a JSON object.
pub fn assert_shape(response: &ResponseSpec, schema: &ShapeSchema) -> AssertionOutcome {
    for (name, hint) in schema.iter() {
        let value = response
            .field(name)
            .ok_or_else(|| AssertionFailure::MissingField {
                field: name.to_string(),
            })?;

        if hint == ShapeHint::Object && !value.is_object() {
            return Err(AssertionFailure::TypeMismatch {
                field: name.to_string(),
                expected: hint,
                actual: json_type_name(value).to_string(),
            });
        }
    }
    Ok(())
}

/// Checks an error-shaped response.
///
/// The body must carry an `error` or `message` field. When
/// `expected_message` is given, the first such field must contain it.
///
/// # Errors
///
/// Returns `StatusMismatch`, `MissingField` (field `"error"`) or
/// `MessageMismatch`, in that order of precedence.
pub fn assert_error_shape(
    response: &ResponseSpec,
    expected_status: u16,
    expected_message: Option<&str>,
) -> AssertionOutcome {
    assert_status(response, expected_status)?;

    let message = ERROR_FIELDS
        .iter()
        .find_map(|name| response.field(name))
        .ok_or_else(|| AssertionFailure::MissingField {
            field: ERROR_FIELDS[0].to_string(),
        })?;

    if let Some(expected) = expected_message {
        let actual = match message {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        if !actual.contains(expected) {
            return Err(AssertionFailure::MessageMismatch {
                expected: expected.to_string(),
                actual,
            });
        }
    }
    Ok(())
}

/// Combined check: status, JSON content type, then the optional shape.
///
/// # Errors
///
/// Returns the first failing check's `AssertionFailure`.
pub fn assert_api_response(
    response: &ResponseSpec,
    expected_status: u16,
    schema: Option<&ShapeSchema>,
) -> AssertionOutcome {
    assert_status(response, expected_status)?;
    assert_json_content_type(response)?;
    schema.map_or(Ok(()), |schema| assert_shape(response, schema))
}

/// Fails when the response took longer than `max`.
///
/// # Errors
///
/// Returns `AssertionFailure::SlowResponse` with both durations in ms.
#[allow(clippy::cast_possible_truncation)]
pub fn assert_response_time(response: &ResponseSpec, max: Duration) -> AssertionOutcome {
    if response.duration() <= max {
        Ok(())
    } else {
        Err(AssertionFailure::SlowResponse {
            max_ms: max.as_millis() as u64,
            actual_ms: response.duration().as_millis() as u64,
        })
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
