//! Structured payload handed to consumers at the host boundary.
//!
//! The field names are the compatibility contract:
//!
//! ```json
//! { "code": 2, "message": "Watch id not found", "internalErrorCode": 104 }
//! ```
//!
//! `code` is the coarse [`PublicCode`], `internalErrorCode` the stable
//! [`InternalCode`](crate::InternalCode) of the variant.
//!
//! # Degraded Output
//!
//! [`to_json`] writes the object field by field. If the serializer rejects a
//! field, the fields written before it are returned and the failure is logged
//! at `warn` level instead of being propagated. Consumers must tolerate an
//! object with missing trailing fields.

use crate::catalog::LocationError;
use crate::codes::PublicCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use tracing::warn;

/// Wire field holding the coarse public code.
pub const FIELD_CODE: &str = "code";
/// Wire field holding the message.
pub const FIELD_MESSAGE: &str = "message";
/// Wire field holding the internal code.
pub const FIELD_INTERNAL_ERROR_CODE: &str = "internalErrorCode";

/// A rendered location error, as seen by consumers.
///
/// # Example
///
/// ```rust
/// use geolocation_errors::{LocationError, PublicCode, to_structured};
///
/// let payload = to_structured(LocationError::WatchIdNotFound);
/// assert_eq!(payload.code, PublicCode::PositionUnavailable);
/// assert_eq!(payload.message, "Watch id not found");
/// assert_eq!(payload.internal_error_code, 104);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredError {
    /// Coarse classification (`1` or `2` on the wire).
    pub code: PublicCode,
    /// Human-readable message.
    pub message: Cow<'static, str>,
    /// Fine-grained stable identifier.
    pub internal_error_code: u16,
}

impl StructuredError {
    /// The catalog variant named by `internal_error_code`, if it is a known code.
    ///
    /// Only the internal code is consulted; a payload produced by a newer
    /// catalog yields `None` rather than a wrong variant.
    pub fn kind(&self) -> Option<LocationError> {
        LocationError::from_internal_code(self.internal_error_code)
    }
}

impl From<LocationError> for StructuredError {
    fn from(variant: LocationError) -> Self {
        to_structured(variant)
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] (LOC-{})",
            self.message, self.code, self.internal_error_code
        )
    }
}

/// Render a variant into its structured payload.
///
/// Pure and infallible: the same variant always yields the same payload.
#[inline]
pub fn to_structured(variant: LocationError) -> StructuredError {
    let entry = variant.entry();
    StructuredError {
        code: variant.public_code(),
        message: Cow::Borrowed(entry.message),
        internal_error_code: entry.code.value(),
    }
}

/// Render a variant into a JSON object, recovering partial output on failure.
pub fn to_json(variant: LocationError) -> Map<String, Value> {
    let payload = to_structured(variant);
    render_partial(variant, |object| {
        object.put(FIELD_CODE, &payload.code)?;
        object.put(FIELD_MESSAGE, &payload.message)?;
        object.put(FIELD_INTERNAL_ERROR_CODE, &payload.internal_error_code)?;
        Ok(())
    })
}

/// Render a variant into a compact JSON string.
pub fn to_json_string(variant: LocationError) -> String {
    Value::Object(to_json(variant)).to_string()
}

// ============================================================================
// Field-by-field Object Builder
// ============================================================================

/// Accumulates object fields, keeping whatever was written before a failure.
#[derive(Debug, Default)]
pub(crate) struct JsonObject {
    fields: Map<String, Value>,
}

impl JsonObject {
    pub(crate) fn put<T>(&mut self, key: &str, value: &T) -> Result<&mut Self, serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value)?;
        self.fields.insert(key.to_owned(), value);
        Ok(self)
    }
}

pub(crate) fn render_partial<F>(variant: LocationError, fill: F) -> Map<String, Value>
where
    F: FnOnce(&mut JsonObject) -> Result<(), serde_json::Error>,
{
    let mut object = JsonObject::default();
    if let Err(err) = fill(&mut object) {
        warn!(
            internal_error_code = variant.internal_code().value(),
            fields_written = object.fields.len(),
            error = %err,
            "Location error payload rendered partially"
        );
    }
    object.fields
}

// ============================================================================
// Tests
// ============================================================================
