//! Convenience macros for defining codes and creating failures.
//!
//! # Rules
//!
//! 1. **Operation names MUST be string literals** so call sites stay greppable
//! 2. **Format strings MUST be string literals**
//! 3. **Format arguments must be wrapped in `sanitized!()`** since watch ids and
//!    platform messages arrive from the host application
//!
//! # Usage
//!
//! ```rust
//! # use geolocation_errors::{location_err, sanitized, LocationError};
//! let watch_id = "watch-7";
//! let err = location_err!(
//!     LocationError::WatchIdNotFound,
//!     "clear_watch",
//!     "no watch registered for id {}",
//!     sanitized!(watch_id)
//! );
//! assert_eq!(err.kind(), LocationError::WatchIdNotFound);
//! ```
//!
//! ```rust,compile_fail
//! # use geolocation_errors::{location_err, LocationError};
//! let operation = String::from("clear_watch");
//! // Operation must be a literal
//! let err = location_err!(LocationError::WatchIdNotFound, operation, "missing");
//! ```
//!
//! ```rust,compile_fail
//! # use geolocation_errors::{location_err, LocationError};
//! let raw = "watch-7";
//! // Args must be wrapped in sanitized!()
//! let err = location_err!(LocationError::WatchIdNotFound, "clear_watch", "{}", raw);
//! ```

// ============================================================================
// Sanitization Utilities
// ============================================================================

/// Maximum length in bytes for sanitized values in failure details.
pub const MAX_SANITIZED_LEN: usize = 256;

const SANITIZED_TRUNCATION: &str = "...[TRUNCATED]";
const INVALID_INPUT: &str = "[INVALID_INPUT]";
const ESC: char = '\u{1b}';
const CSI_FINAL: std::ops::RangeInclusive<char> = '\x40'..='\x7e';

/// Bound and neutralize an untrusted value before it enters failure details.
///
/// - Truncates to [`MAX_SANITIZED_LEN`] bytes on a UTF-8 boundary.
/// - Replaces control characters with `'?'`.
/// - Collapses an ANSI CSI sequence (`ESC [` up to its final byte in
///   `0x40..=0x7e`) into a single `'?'`. A bare ESC is just a control character.
/// - Inputs with no printable characters become `[INVALID_INPUT]`.
pub fn sanitize(original: &str) -> String {
    let mut s = String::with_capacity(MAX_SANITIZED_LEN.min(original.len()));
    let mut truncated = false;
    let mut saw_printable = false;
    let mut chars = original.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ESC && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if CSI_FINAL.contains(&c) {
                    break;
                }
            }
        }

        let replacement = if c.is_control() {
            '?'
        } else {
            saw_printable = true;
            c
        };

        if s.len() + replacement.len_utf8() > MAX_SANITIZED_LEN {
            truncated = true;
            break;
        }
        s.push(replacement);
    }

    if !saw_printable {
        return String::from(INVALID_INPUT);
    }

    if truncated {
        let mut cut = MAX_SANITIZED_LEN.saturating_sub(SANITIZED_TRUNCATION.len());
        while cut > 0 && !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str(SANITIZED_TRUNCATION);
    }

    s
}

/// Sanitize any `Display` value for use as a `location_err!` argument.
///
/// ```rust
/// # use geolocation_errors::sanitized;
/// let long = "A".repeat(300);
/// let san = sanitized!(long);
/// assert!(san.len() <= 256);
/// assert!(san.ends_with("[TRUNCATED]"));
/// ```
#[macro_export]
macro_rules! sanitized {
    ($expr:expr) => {
        $crate::convenience::sanitize(&$expr.to_string())
    };
}

// ============================================================================
// Failure Creation
// ============================================================================

/// Create a [`LocationFailure`](crate::LocationFailure) with literal
/// operation and format strings.
///
/// # Arguments
/// - `$kind`: a [`LocationError`](crate::LocationError) variant
/// - `$op`: operation name (string literal)
/// - `$details`: internal details (string literal or format literal)
/// - `$args`: optional arguments, each wrapped in `sanitized!()`
#[macro_export]
macro_rules! location_err {
    ($kind:expr, $op:literal, $details:literal) => {
        $crate::LocationFailure::new($kind, $op, $details)
    };
    ($kind:expr, $op:literal, $fmt:literal $(, sanitized!($arg:expr))+ $(,)?) => {
        $crate::LocationFailure::new($kind, $op, format!($fmt $(, $crate::sanitized!($arg))+))
    };
}

// ============================================================================
// Code Definition Macros
// ============================================================================

/// Define a single internal code as a const.
///
/// ```rust
/// # use geolocation_errors::define_internal_code;
/// define_internal_code!(WATCH_MISSING, 104);
/// assert_eq!(WATCH_MISSING.value(), 104);
/// ```
#[macro_export]
macro_rules! define_internal_code {
    ($name:ident, $code:expr) => {
        #[doc = concat!("Internal error code `", stringify!($code), "`.")]
        pub const $name: $crate::InternalCode = $crate::InternalCode::const_new($code);
    };
}

/// Define multiple internal codes at once.
///
/// ```rust
/// # use geolocation_errors::define_internal_codes;
/// define_internal_codes! {
///     PERMISSION = 100,
///     NO_FIX = 107,
/// }
/// assert_eq!(NO_FIX.to_string(), "LOC-107");
/// ```
#[macro_export]
macro_rules! define_internal_codes {
    ($( $name:ident = $code:expr ),+ $(,)?) => {
        $(
            $crate::define_internal_code!($name, $code);
        )+
    };
}

// ============================================================================
// Tests
// ============================================================================
