//! Location failure carrying a catalog variant plus call-site context.
//!
//! The catalog itself never fails. `LocationFailure` is what plugin code
//! returns through `Result` when a location operation goes wrong: it pins the
//! condition to one [`LocationError`] variant and keeps operation name, details,
//! metadata and the platform error for internal logs only.
//!
//! # Key Properties
//!
//! - `Display` shows the catalog message and internal code, nothing else
//! - Details and metadata values are zeroized on drop
//! - Rendering for consumers goes through the catalog, so the payload for a
//!   failure is always identical to the payload of its variant

use crate::convenience::sanitize;
use crate::logging::DiagnosticLog;
use crate::structured::{self, StructuredError};
use crate::LocationError;
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use zeroize::Zeroizing;

/// Operation name used when a failure is built straight from a variant.
const UNSPECIFIED_OPERATION: &str = "unspecified";

struct FailureContext {
    operation: Cow<'static, str>,
    details: Zeroizing<String>,
    metadata: SmallVec<[(&'static str, Zeroizing<String>); 4]>,
}

impl FailureContext {
    #[inline]
    fn new(operation: impl Into<Cow<'static, str>>, details: impl Into<Cow<'static, str>>) -> Self {
        Self {
            operation: operation.into(),
            details: Zeroizing::new(details.into().into_owned()),
            metadata: SmallVec::new(),
        }
    }
}

/// Error type returned by location operations.
///
/// # Example
///
/// ```rust
/// use geolocation_errors::{LocationError, LocationFailure, Result};
///
/// fn clear_watch(active: &[&str], id: &'static str) -> Result<()> {
///     if !active.contains(&id) {
///         return Err(LocationFailure::watch_id_not_found(id));
///     }
///     Ok(())
/// }
///
/// let err = clear_watch(&["a"], "b").unwrap_err();
/// assert_eq!(err.to_string(), "Watch id not found (LOC-104)");
/// assert_eq!(err.to_structured().internal_error_code, 104);
/// ```
#[must_use = "errors should be handled or logged"]
pub struct LocationFailure {
    kind: LocationError,
    context: FailureContext,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl LocationFailure {
    /// Create a failure with internal context.
    #[inline]
    pub fn new(
        kind: LocationError,
        operation: impl Into<Cow<'static, str>>,
        details: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            context: FailureContext::new(operation, details),
            source: None,
        }
    }

    /// The user denied the location permission request.
    pub fn permission_denied(operation: impl Into<Cow<'static, str>>) -> Self {
        Self::new(
            LocationError::LocationPermissionDenied,
            operation,
            "runtime permission request was denied",
        )
    }

    /// `clearWatch` was called for an id with no active watch.
    ///
    /// The id comes from the host application and is sanitized before storage.
    pub fn watch_id_not_found(watch_id: impl Into<Cow<'static, str>>) -> Self {
        let watch_id = watch_id.into();
        Self::new(
            LocationError::WatchIdNotFound,
            "clear_watch",
            "no active watch for id",
        )
        .with_metadata("watch_id", sanitize(&watch_id))
    }

    /// A location result could not be serialized for the host.
    pub fn serialization(operation: impl Into<Cow<'static, str>>, err: serde_json::Error) -> Self {
        Self::new(
            LocationError::SerializationError,
            operation,
            "location result could not be serialized",
        )
        .with_source(err)
    }

    /// The platform returned no location.
    pub fn location_null(operation: impl Into<Cow<'static, str>>) -> Self {
        Self::new(
            LocationError::LocationNull,
            operation,
            "platform returned no location",
        )
    }

    /// Attach the underlying platform error.
    #[inline]
    pub fn with_source(mut self, source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add tracking metadata (watch ids, request priority, status codes).
    #[inline]
    pub fn with_metadata(mut self, key: &'static str, value: impl Into<Cow<'static, str>>) -> Self {
        self.context
            .metadata
            .push((key, Zeroizing::new(value.into().into_owned())));
        self
    }

    /// The catalog variant.
    #[inline]
    pub const fn kind(&self) -> LocationError {
        self.kind
    }

    /// Render the consumer payload for this failure.
    #[inline]
    pub fn to_structured(&self) -> StructuredError {
        structured::to_structured(self.kind)
    }

    /// Render the consumer payload as a JSON object.
    #[inline]
    pub fn to_json(&self) -> Map<String, Value> {
        structured::to_json(self.kind)
    }

    /// Borrow a structured log of the internal context.
    #[inline]
    pub fn internal_log(&self) -> DiagnosticLog<'_> {
        DiagnosticLog {
            kind: self.kind,
            operation: self.context.operation.as_ref(),
            details: self.context.details.as_str(),
            source: self.source.as_deref(),
            metadata: &self.context.metadata,
        }
    }

    /// Run `f` with the internal log, keeping it scoped to the closure.
    #[inline]
    pub fn with_internal_log<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&DiagnosticLog<'_>) -> R,
    {
        let log = self.internal_log();
        f(&log)
    }

    /// Log the failure through `tracing` and hand back the consumer payload.
    pub fn report(&self) -> StructuredError {
        self.internal_log().emit();
        self.to_structured()
    }
}

impl From<LocationError> for LocationFailure {
    fn from(kind: LocationError) -> Self {
        Self::new(kind, UNSPECIFIED_OPERATION, "")
    }
}

impl fmt::Display for LocationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind.message(), self.kind.internal_code())
    }
}

impl fmt::Debug for LocationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationFailure")
            .field("kind", &self.kind)
            .field("code", &self.kind.internal_code().value())
            .field("has_source", &self.source.is_some())
            .finish_non_exhaustive()
    }
}

impl Error for LocationFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PublicCode;

    #[test]
    fn display_reveals_only_message_and_code() {
        let err = LocationFailure::new(
            LocationError::GoogleServicesError,
            "check_play_services",
            "SERVICE_MISSING on device model X",
        );
        let display = err.to_string();
        assert_eq!(display, "Google Play Services error (LOC-102)");
        assert!(!display.contains("check_play_services"));
        assert!(!display.contains("SERVICE_MISSING"));
    }

    #[test]
    fn debug_hides_context() {
        let err = LocationFailure::watch_id_not_found("secret-watch");
        let debug = format!("{err:?}");
        assert!(debug.contains("WatchIdNotFound"));
        assert!(!debug.contains("secret-watch"));
    }

    #[test]
    fn payload_matches_variant_payload() {
        for variant in LocationError::ALL {
            let err = LocationFailure::from(variant);
            assert_eq!(err.to_structured(), structured::to_structured(variant));
            assert_eq!(err.to_json(), structured::to_json(variant));
        }
    }

    #[test]
    fn permission_denied_is_public_code_one() {
        let err = LocationFailure::permission_denied("get_current_position");
        assert_eq!(err.kind(), LocationError::LocationPermissionDenied);
        assert_eq!(err.to_structured().code, PublicCode::PermissionDenied);
    }

    #[test]
    fn watch_id_is_sanitized() {
        let err = LocationFailure::watch_id_not_found(String::from("w\n1"));
        assert_eq!(err.internal_log().metadata_value("watch_id"), Some("w?1"));
    }

    #[test]
    fn watch_id_after_bare_escape_is_kept() {
        let err = LocationFailure::watch_id_not_found(String::from("\u{1b}watch-1234"));
        assert_eq!(err.internal_log().metadata_value("watch_id"), Some("?watch-1234"));
    }

    #[test]
    fn serialization_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let err = LocationFailure::serialization("encode_position", source);
        assert_eq!(err.kind(), LocationError::SerializationError);
        assert!(err.source().is_some());
    }

    #[test]
    fn from_variant_has_no_source() {
        let err = LocationFailure::from(LocationError::LocationSettingsError);
        assert!(err.source().is_none());
        assert_eq!(err.internal_log().operation(), UNSPECIFIED_OPERATION);
    }

    #[test]
    fn location_null_payload() {
        let err = LocationFailure::location_null("get_current_position");
        let payload = err.report();
        assert_eq!(payload.internal_error_code, 107);
        assert_eq!(payload.message, "Could not retrieve location");
    }

    #[test]
    fn with_source_accepts_string_errors() {
        let err = LocationFailure::new(LocationError::LocationSettingsError, "check_settings", "")
            .with_source("settings client unavailable");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some(String::from("settings client unavailable"))
        );
    }

    #[test]
    fn failure_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LocationFailure>();
    }
}
