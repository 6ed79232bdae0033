//! Structured internal log for location failures.
//!
//! A [`DiagnosticLog`] borrows from the [`LocationFailure`](crate::LocationFailure)
//! that created it and cannot outlive it. Call-site context (operation name,
//! details, watch ids, platform status text) only leaves the failure through
//! this type, never through `Display`.
//!
//! Each field is clipped to [`MAX_LOG_FIELD_BYTES`] on output. A clipped field
//! ends with `[+N bytes]`, the number of bytes dropped.

use crate::{InternalCode, LocationError, PublicCode};
use std::borrow::Cow;
use std::fmt;
use tracing::warn;
use zeroize::Zeroizing;

/// Longest field, in bytes, written to a log line before clipping.
pub const MAX_LOG_FIELD_BYTES: usize = 512;

/// Structured log entry borrowed from a `LocationFailure`.
///
/// # Example
///
/// ```rust
/// # use geolocation_errors::{LocationError, LocationFailure};
/// let err = LocationFailure::watch_id_not_found("watch-9");
/// err.with_internal_log(|log| {
///     let mut line = String::new();
///     log.write_to(&mut line).unwrap();
///     assert!(line.starts_with("[LOC-104]"));
/// });
/// ```
#[derive(Debug)]
pub struct DiagnosticLog<'a> {
    pub(crate) kind: LocationError,
    pub(crate) operation: &'a str,
    pub(crate) details: &'a str,
    pub(crate) source: Option<&'a (dyn std::error::Error + Send + Sync + 'static)>,
    pub(crate) metadata: &'a [(&'static str, Zeroizing<String>)],
}

impl<'a> DiagnosticLog<'a> {
    /// Format for human-readable logs in trusted debug contexts.
    ///
    /// Only available with the `trusted_debug` feature in debug builds, since it
    /// materializes watch ids and platform messages into a `String`.
    #[cfg(all(feature = "trusted_debug", debug_assertions))]
    pub fn format_for_trusted_debug(&self) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut output);
        output
    }

    /// Write the log line.
    ///
    /// Format: `[LOC-104] code=2 operation='...' details='...' source='...' key='value'`
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "[{}] code={} operation='{}' details='{}'",
            self.code(),
            self.public_code().value(),
            clip_field(self.operation),
            clip_field(self.details)
        )?;

        if let Some(source) = self.source {
            let rendered = source.to_string();
            write!(f, " source='{}'", clip_field(&rendered))?;
        }

        for (key, value) in self.metadata() {
            write!(f, " {}='{}'", key, clip_field(value))?;
        }

        Ok(())
    }

    /// Forward the record to `tracing` at `warn` level.
    ///
    /// The crate never installs a subscriber; the host application does.
    pub fn emit(&self) {
        let mut line = String::new();
        if self.write_to(&mut line).is_err() {
            return;
        }
        warn!(
            internal_error_code = self.code().value(),
            code = self.public_code().value(),
            operation = %clip_field(self.operation),
            "{}",
            line
        );
    }

    /// The catalog variant.
    #[inline]
    pub const fn kind(&self) -> LocationError {
        self.kind
    }

    /// Internal code of the variant.
    #[inline]
    pub const fn code(&self) -> InternalCode {
        self.kind.internal_code()
    }

    /// Coarse public code of the variant.
    #[inline]
    pub const fn public_code(&self) -> PublicCode {
        self.kind.public_code()
    }

    /// Name of the failing operation.
    #[inline]
    pub const fn operation(&self) -> &str {
        self.operation
    }

    /// Free-form internal details.
    #[inline]
    pub const fn details(&self) -> &str {
        self.details
    }

    /// The underlying platform error, if one was attached.
    #[inline]
    pub fn source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.source
    }

    /// Metadata pairs in insertion order.
    pub fn metadata(&self) -> impl Iterator<Item = (&'static str, &'a str)> + 'a {
        self.metadata.iter().map(|(key, value)| (*key, value.as_str()))
    }

    /// Find a metadata value by key.
    pub fn metadata_value(&self, key: &str) -> Option<&'a str> {
        self.metadata().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Clip `s` to at most [`MAX_LOG_FIELD_BYTES`] on a char boundary, noting how
/// many bytes were dropped.
fn clip_field(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_LOG_FIELD_BYTES {
        return Cow::Borrowed(s);
    }

    let cut = s
        .char_indices()
        .map(|(idx, _)| idx)
        .take_while(|&idx| idx <= MAX_LOG_FIELD_BYTES)
        .last()
        .unwrap_or(0);

    Cow::Owned(format!("{}[+{} bytes]", &s[..cut], s.len() - cut))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocationFailure;

    fn line_for(err: &LocationFailure) -> String {
        let mut line = String::new();
        err.internal_log().write_to(&mut line).unwrap();
        line
    }

    #[test]
    fn write_to_includes_codes_and_context() {
        let err = LocationFailure::new(LocationError::LocationSettingsError, "check_settings", "status 8502")
            .with_metadata("request", "high_accuracy");

        assert_eq!(
            line_for(&err),
            "[LOC-106] code=2 operation='check_settings' details='status 8502' request='high_accuracy'"
        );
    }

    #[test]
    fn write_to_includes_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LocationFailure::serialization("encode_position", source);

        let line = line_for(&err);
        assert!(line.starts_with("[LOC-103] code=2 operation='encode_position'"));
        assert!(line.contains(" source='EOF while parsing"));
    }

    #[test]
    fn short_details_are_written_whole() {
        let details = "x".repeat(MAX_LOG_FIELD_BYTES);
        let err = LocationFailure::new(LocationError::LocationNull, "get_current_position", details.clone());

        let line = line_for(&err);
        assert!(line.contains(&format!("details='{details}'")));
        assert!(!line.contains("bytes]"));
    }

    #[test]
    fn long_details_are_clipped_with_dropped_count() {
        let details = "x".repeat(MAX_LOG_FIELD_BYTES + 88);
        let err = LocationFailure::new(LocationError::LocationNull, "get_current_position", details);

        let line = line_for(&err);
        let expected = format!("details='{}[+88 bytes]'", "x".repeat(MAX_LOG_FIELD_BYTES));
        assert!(line.contains(&expected));
    }

    #[test]
    fn clipping_lands_on_char_boundary() {
        // 3-byte chars never line up with the limit
        let details = "位".repeat(MAX_LOG_FIELD_BYTES);
        let err = LocationFailure::new(LocationError::LocationSettingsError, "check_settings", details);

        let line = line_for(&err);
        let start = line.find("details='").unwrap() + "details='".len();
        let field = &line[start..line[start..].find('\'').unwrap() + start];
        let kept = field.split("[+").next().unwrap();
        assert!(kept.len() <= MAX_LOG_FIELD_BYTES);
        assert!(kept.chars().all(|c| c == '位'));
        assert!(field.ends_with(" bytes]"));
    }

    #[test]
    fn permission_denied_logs_public_code_one() {
        let err = LocationFailure::permission_denied("request_permissions");
        let log = err.internal_log();
        assert_eq!(log.public_code(), PublicCode::PermissionDenied);
        assert_eq!(log.code().value(), 100);
    }

    #[test]
    fn metadata_lookup() {
        let err = LocationFailure::watch_id_not_found("w-3")
            .with_metadata("priority", "balanced");
        let log = err.internal_log();
        assert_eq!(log.metadata_value("watch_id"), Some("w-3"));
        assert_eq!(log.metadata_value("missing"), None);
        assert_eq!(
            log.metadata().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["watch_id", "priority"]
        );
    }

    #[test]
    fn emit_forwards_structured_fields() {
        let err = LocationFailure::new(LocationError::LocationSettingsError, "check_settings", "status 8502");
        let output = capture::warnings(|| err.internal_log().emit());

        assert!(output.contains("WARN"));
        assert!(output.contains("[LOC-106] code=2 operation='check_settings' details='status 8502'"));
        assert!(output.contains("internal_error_code=106"));
        assert!(output.contains("operation=check_settings"));
    }

    #[test]
    fn report_emits_once_and_returns_payload() {
        let err = LocationFailure::permission_denied("request_permissions");
        let mut payload = None;
        let output = capture::warnings(|| payload = Some(err.report()));

        assert_eq!(output.matches("[LOC-100]").count(), 1);
        assert!(output.contains("internal_error_code=100 code=1"));
        assert_eq!(payload.map(|p| p.internal_error_code), Some(100));
    }

    #[cfg(all(feature = "trusted_debug", debug_assertions))]
    #[test]
    fn trusted_debug_matches_write_to() {
        let err = LocationFailure::watch_id_not_found("w-1");
        assert_eq!(err.internal_log().format_for_trusted_debug(), line_for(&err));
    }
}
