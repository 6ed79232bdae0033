//! The location error catalog.
//!
//! Every condition the location service can report is a [`LocationError`]
//! variant. Each variant owns exactly one row of [`CATALOG`]: its stable
//! internal code and its fixed message. The table is constant data, shared by
//! every caller without synchronization.
//!
//! | code | variant | message |
//! |------|---------|---------|
//! | 100 | `LocationPermissionDenied` | Location permission request denied |
//! | 101 | `GoogleServicesErrorResolvable` | Google Play Services error user resolvable |
//! | 102 | `GoogleServicesError` | Google Play Services error |
//! | 103 | `SerializationError` | Location result serialization error |
//! | 104 | `WatchIdNotFound` | Watch id not found |
//! | 105 | `LocationSettingsErrorResolvable` | Current location settings can not satisfy this request |
//! | 106 | `LocationSettingsError` | Location settings error |
//! | 107 | `LocationNull` | Could not retrieve location |
//!
//! # Governance
//!
//! Codes are append-only. A new condition takes the next free code in the
//! `100-199` range; existing rows are never renumbered. Uniqueness is checked
//! at compile time.

use crate::codes::{InternalCode, InternalCodeViolation, PublicCode, public_code_for};
use std::fmt;

// -----------------------------------------------------------------------------
// Internal codes (100-199)
// -----------------------------------------------------------------------------
crate::define_internal_codes! {
    LOCATION_PERMISSION_DENIED         = 100,
    GOOGLE_SERVICES_ERROR_RESOLVABLE   = 101,
    GOOGLE_SERVICES_ERROR              = 102,
    SERIALIZATION_ERROR                = 103,
    WATCH_ID_NOT_FOUND                 = 104,
    LOCATION_SETTINGS_ERROR_RESOLVABLE = 105,
    LOCATION_SETTINGS_ERROR            = 106,
    LOCATION_NULL                      = 107,
}

/// A recognized location failure condition.
///
/// The set is closed: callers can only name one of these variants, and
/// matching on it is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationError {
    /// The user denied the runtime location permission request.
    LocationPermissionDenied,
    /// Play Services is unavailable but the user can fix it from a system dialog.
    GoogleServicesErrorResolvable,
    /// Play Services is unavailable and cannot be fixed by the user.
    GoogleServicesError,
    /// A location result could not be converted for the host application.
    SerializationError,
    /// `clearWatch` was called with an id that has no active watch.
    WatchIdNotFound,
    /// Device location settings do not satisfy the request, but can be changed by the user.
    LocationSettingsErrorResolvable,
    /// Device location settings could not be checked or changed.
    LocationSettingsError,
    /// The platform returned no location.
    LocationNull,
}

/// One row of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// The variant this row belongs to.
    pub variant: LocationError,
    /// Stable internal code.
    pub code: InternalCode,
    /// Fixed human-readable message.
    pub message: &'static str,
}

/// The catalog table, ordered by internal code and indexed by variant.
pub const CATALOG: [CatalogEntry; LocationError::COUNT] = [
    CatalogEntry {
        variant: LocationError::LocationPermissionDenied,
        code: LOCATION_PERMISSION_DENIED,
        message: "Location permission request denied",
    },
    CatalogEntry {
        variant: LocationError::GoogleServicesErrorResolvable,
        code: GOOGLE_SERVICES_ERROR_RESOLVABLE,
        message: "Google Play Services error user resolvable",
    },
    CatalogEntry {
        variant: LocationError::GoogleServicesError,
        code: GOOGLE_SERVICES_ERROR,
        message: "Google Play Services error",
    },
    CatalogEntry {
        variant: LocationError::SerializationError,
        code: SERIALIZATION_ERROR,
        message: "Location result serialization error",
    },
    CatalogEntry {
        variant: LocationError::WatchIdNotFound,
        code: WATCH_ID_NOT_FOUND,
        message: "Watch id not found",
    },
    CatalogEntry {
        variant: LocationError::LocationSettingsErrorResolvable,
        code: LOCATION_SETTINGS_ERROR_RESOLVABLE,
        message: "Current location settings can not satisfy this request",
    },
    CatalogEntry {
        variant: LocationError::LocationSettingsError,
        code: LOCATION_SETTINGS_ERROR,
        message: "Location settings error",
    },
    CatalogEntry {
        variant: LocationError::LocationNull,
        code: LOCATION_NULL,
        message: "Could not retrieve location",
    },
];

const fn codes_are_unique(table: &[CatalogEntry]) -> bool {
    let mut i = 0;
    while i < table.len() {
        let mut j = i + 1;
        while j < table.len() {
            if table[i].code.value() == table[j].code.value() {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const fn rows_match_variants(table: &[CatalogEntry]) -> bool {
    let mut i = 0;
    while i < table.len() {
        if table[i].variant as usize != i {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(codes_are_unique(&CATALOG), "internal codes must be unique");
const _: () = assert!(rows_match_variants(&CATALOG), "catalog rows must follow variant order");

impl LocationError {
    /// Number of variants.
    pub const COUNT: usize = 8;

    /// Every variant, in internal code order.
    pub const ALL: [LocationError; Self::COUNT] = [
        Self::LocationPermissionDenied,
        Self::GoogleServicesErrorResolvable,
        Self::GoogleServicesError,
        Self::SerializationError,
        Self::WatchIdNotFound,
        Self::LocationSettingsErrorResolvable,
        Self::LocationSettingsError,
        Self::LocationNull,
    ];

    /// The catalog row for this variant.
    #[inline]
    pub const fn entry(self) -> CatalogEntry {
        CATALOG[self as usize]
    }

    /// Stable internal code.
    #[inline]
    pub const fn internal_code(self) -> InternalCode {
        CATALOG[self as usize].code
    }

    /// Fixed message, returned verbatim to consumers.
    #[inline]
    pub const fn message(self) -> &'static str {
        CATALOG[self as usize].message
    }

    /// Coarse public classification.
    #[inline]
    pub const fn public_code(self) -> PublicCode {
        public_code_for(self.internal_code())
    }

    /// Whether the host can offer the user a system dialog to fix the condition.
    #[inline]
    pub const fn is_user_resolvable(self) -> bool {
        matches!(
            self,
            Self::GoogleServicesErrorResolvable | Self::LocationSettingsErrorResolvable
        )
    }

    /// Look up a variant by its internal code.
    pub fn from_internal_code(code: u16) -> Option<Self> {
        CATALOG
            .iter()
            .find(|entry| entry.code.value() == code)
            .map(|entry| entry.variant)
    }
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for LocationError {}

impl TryFrom<InternalCode> for LocationError {
    type Error = InternalCodeViolation;

    fn try_from(code: InternalCode) -> Result<Self, Self::Error> {
        Self::from_internal_code(code.value())
            .ok_or(InternalCodeViolation::Unassigned { value: code.value() })
    }
}

impl TryFrom<u16> for LocationError {
    type Error = InternalCodeViolation;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::try_from(InternalCode::checked_new(value)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::ranges;
    use std::collections::HashSet;

    #[test]
    fn codes_follow_table_order() {
        for (offset, variant) in LocationError::ALL.iter().enumerate() {
            assert_eq!(variant.internal_code().value(), 100 + offset as u16);
        }
    }

    #[test]
    fn codes_are_pairwise_distinct() {
        let codes: HashSet<u16> = CATALOG.iter().map(|e| e.code.value()).collect();
        assert_eq!(codes.len(), LocationError::COUNT);
    }

    #[test]
    fn codes_stay_in_location_range() {
        for entry in &CATALOG {
            let code = entry.code.value();
            assert!(
                (ranges::LOCATION_START..=ranges::LOCATION_END).contains(&code),
                "{} outside range",
                entry.code
            );
        }
    }

    #[test]
    fn messages_are_verbatim() {
        assert_eq!(
            LocationError::LocationPermissionDenied.message(),
            "Location permission request denied"
        );
        assert_eq!(
            LocationError::GoogleServicesErrorResolvable.message(),
            "Google Play Services error user resolvable"
        );
        assert_eq!(LocationError::GoogleServicesError.message(), "Google Play Services error");
        assert_eq!(
            LocationError::SerializationError.message(),
            "Location result serialization error"
        );
        assert_eq!(LocationError::WatchIdNotFound.message(), "Watch id not found");
        assert_eq!(
            LocationError::LocationSettingsErrorResolvable.message(),
            "Current location settings can not satisfy this request"
        );
        assert_eq!(LocationError::LocationSettingsError.message(), "Location settings error");
        assert_eq!(LocationError::LocationNull.message(), "Could not retrieve location");
    }

    #[test]
    fn only_permission_denied_is_public_code_one() {
        for variant in LocationError::ALL {
            let expected = if variant == LocationError::LocationPermissionDenied {
                PublicCode::PermissionDenied
            } else {
                PublicCode::PositionUnavailable
            };
            assert_eq!(variant.public_code(), expected, "{variant:?}");
        }
    }

    #[test]
    fn lookup_by_internal_code() {
        assert_eq!(
            LocationError::from_internal_code(104),
            Some(LocationError::WatchIdNotFound)
        );
        assert_eq!(LocationError::from_internal_code(108), None);
        assert_eq!(LocationError::from_internal_code(0), None);
    }

    #[test]
    fn try_from_reports_why_lookup_failed() {
        assert_eq!(LocationError::try_from(107u16), Ok(LocationError::LocationNull));
        assert_eq!(
            LocationError::try_from(150u16),
            Err(InternalCodeViolation::Unassigned { value: 150 })
        );
        assert_eq!(
            LocationError::try_from(42u16),
            Err(InternalCodeViolation::CodeOutOfRange { value: 42 })
        );
    }

    #[test]
    fn resolvable_variants() {
        let resolvable: Vec<_> = LocationError::ALL
            .into_iter()
            .filter(|v| v.is_user_resolvable())
            .map(|v| v.internal_code().value())
            .collect();
        assert_eq!(resolvable, vec![101, 105]);
    }

    #[test]
    fn display_is_message() {
        assert_eq!(LocationError::LocationNull.to_string(), "Could not retrieve location");
    }
}
