//! Error code namespace - two tiers of identity for every location failure.
//!
//! A consumer that only understands the W3C-style position error contract sees
//! the coarse [`PublicCode`]. A consumer that wants diagnostics reads the
//! [`InternalCode`], which is finer-grained and stable across releases.
//!
//! # Code Ranges
//!
//! Internal codes live in the reserved location range `100-199`. The range is
//! enforced at construction, at compile time for const definitions and at
//! runtime for codes parsed from payloads.
//!
//! # Stability
//!
//! Internal codes are append-only. Once a code is published it is never
//! reassigned to a different condition, since external consumers key on it.
//!
//! # Example Usage
//!
//! ```rust
//! use geolocation_errors::{InternalCode, PublicCode, define_internal_codes, public_code_for};
//!
//! define_internal_codes! {
//!     PERMISSION = 100,
//!     NO_FIX = 107,
//! }
//!
//! assert_eq!(PERMISSION.to_string(), "LOC-100");
//! assert_eq!(public_code_for(PERMISSION), PublicCode::PermissionDenied);
//! assert_eq!(public_code_for(NO_FIX), PublicCode::PositionUnavailable);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved numeric ranges for internal codes.
pub mod ranges {
    /// First code of the location namespace.
    pub const LOCATION_START: u16 = 100;
    /// Last code of the location namespace.
    pub const LOCATION_END: u16 = 199;
}

/// The only internal code that maps to [`PublicCode::PermissionDenied`].
pub const PERMISSION_DENIED_CODE: u16 = 100;

// ============================================================================
// Public Code (Coarse Classification)
// ============================================================================

/// Coarse, public classification of a location failure.
///
/// Exactly two values exist. Every failure other than a denied permission
/// request collapses into [`PublicCode::PositionUnavailable`]; consumers depend
/// on this two-value contract, so it is not refined further.
///
/// Serialized as its bare integer value (`1` or `2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum PublicCode {
    /// The user or platform refused location access.
    PermissionDenied = 1,
    /// Any other reason a position could not be produced.
    PositionUnavailable = 2,
}

impl PublicCode {
    /// Numeric value sent to consumers.
    #[inline]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Constant-style label, matching the names consumers use for the code.
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::PositionUnavailable => "POSITION_UNAVAILABLE",
        }
    }
}

impl fmt::Display for PublicCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<PublicCode> for u8 {
    fn from(code: PublicCode) -> Self {
        code.value()
    }
}

impl TryFrom<u8> for PublicCode {
    type Error = InternalCodeViolation;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::PermissionDenied),
            2 => Ok(Self::PositionUnavailable),
            other => Err(InternalCodeViolation::UnknownPublicCode { value: other }),
        }
    }
}

// ============================================================================
// Violation Type
// ============================================================================

/// A code value that does not belong to the catalog's numbering scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalCodeViolation {
    /// Internal code outside the reserved location range.
    CodeOutOfRange {
        /// The rejected code.
        value: u16,
    },
    /// Internal code inside the range but not assigned to any condition.
    Unassigned {
        /// The rejected code.
        value: u16,
    },
    /// Public code other than 1 or 2.
    UnknownPublicCode {
        /// The rejected code.
        value: u8,
    },
}

impl fmt::Display for InternalCodeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CodeOutOfRange { value } => write!(
                f,
                "Internal error code {} is out of range (must be {}-{})",
                value,
                ranges::LOCATION_START,
                ranges::LOCATION_END
            ),
            Self::Unassigned { value } => {
                write!(f, "Internal error code {} is not assigned", value)
            }
            Self::UnknownPublicCode { value } => {
                write!(f, "Public error code {} is not recognized", value)
            }
        }
    }
}

impl std::error::Error for InternalCodeViolation {}

// ============================================================================
// Internal Code (Stable Identity)
// ============================================================================

/// Fine-grained, stable identifier of a location failure.
///
/// Displayed as `LOC-<code>`. Construct named codes with
/// [`define_internal_code!`](crate::define_internal_code) so the range check
/// runs at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InternalCode(u16);

impl InternalCode {
    /// Create an internal code with compile-time validation.
    ///
    /// # Panics
    ///
    /// Panics if `code` is outside `100-199`. In const contexts this is a
    /// compile error.
    #[inline]
    pub const fn const_new(code: u16) -> Self {
        assert!(
            code >= ranges::LOCATION_START && code <= ranges::LOCATION_END,
            "Internal error code must be 100-199"
        );
        Self(code)
    }

    /// Create an internal code with runtime validation.
    ///
    /// # Errors
    ///
    /// Returns [`InternalCodeViolation::CodeOutOfRange`] if `code` is outside
    /// the location range.
    #[inline]
    pub fn checked_new(code: u16) -> Result<Self, InternalCodeViolation> {
        if (ranges::LOCATION_START..=ranges::LOCATION_END).contains(&code) {
            Ok(Self(code))
        } else {
            Err(InternalCodeViolation::CodeOutOfRange { value: code })
        }
    }

    /// Raw numeric value.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Coarse public classification of this code.
    #[inline]
    pub const fn public_code(self) -> PublicCode {
        public_code_for(self)
    }
}

impl fmt::Display for InternalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LOC-{}", self.0)
    }
}

/// Derive the coarse public code from an internal code.
///
/// Only [`PERMISSION_DENIED_CODE`] maps to [`PublicCode::PermissionDenied`];
/// every other code, including ones added later, maps to
/// [`PublicCode::PositionUnavailable`].
#[inline]
pub const fn public_code_for(code: InternalCode) -> PublicCode {
    if code.0 == PERMISSION_DENIED_CODE {
        PublicCode::PermissionDenied
    } else {
        PublicCode::PositionUnavailable
    }
}

// ============================================================================
// Tests
// ============================================================================
