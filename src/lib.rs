//! # Geolocation Errors
//!
//! Stable error identity for location services.
//!
//! ## Design Philosophy
//!
//! 1. **The set of conditions is closed**: every failure is one [`LocationError`] variant
//! 2. **Two tiers of codes**: a coarse [`PublicCode`] for standard consumers and a
//!    fine [`InternalCode`] for diagnostics
//! 3. **Codes are permanent**: once published, an internal code keeps its meaning
//! 4. **Rendering never fails**: a variant always produces a payload
//! 5. **Call-site context stays internal**: watch ids and platform status text go
//!    to logs, never into the payload
//!
//! ## Wire Format
//!
//! ```json
//! { "code": 2, "message": "Watch id not found", "internalErrorCode": 104 }
//! ```
//!
//! `code` is `1` for a denied permission request and `2` for everything else.
//!
//! ## Quick Start
//!
//! ```rust
//! use geolocation_errors::{LocationError, PublicCode, to_json_string, to_structured};
//!
//! let payload = to_structured(LocationError::LocationPermissionDenied);
//! assert_eq!(payload.code, PublicCode::PermissionDenied);
//! assert_eq!(payload.internal_error_code, 100);
//!
//! assert_eq!(
//!     to_json_string(LocationError::LocationNull),
//!     r#"{"code":2,"internalErrorCode":107,"message":"Could not retrieve location"}"#
//! );
//! ```
//!
//! ## Returning Failures
//!
//! ```rust
//! use geolocation_errors::{LocationFailure, Result};
//!
//! fn last_known(position: Option<(f64, f64)>) -> Result<(f64, f64)> {
//!     position.ok_or_else(|| LocationFailure::location_null("get_last_known"))
//! }
//!
//! let err = last_known(None).unwrap_err();
//! let payload = err.report(); // logs through `tracing`, returns the payload
//! assert_eq!(payload.internal_error_code, 107);
//! ```
//!
//! ## Features
//!
//! - `trusted_debug`: Enable `DiagnosticLog::format_for_trusted_debug` (debug builds only)

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::result;

pub mod catalog;
pub mod codes;
pub mod convenience;
pub mod failure;
pub mod logging;
pub mod structured;

pub use catalog::*;
pub use codes::*;
pub use convenience::*;
pub use failure::*;
pub use logging::*;
pub use structured::*;

/// Type alias for Results using our error type.
pub type Result<T> = result::Result<T, LocationFailure>;
