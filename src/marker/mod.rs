//! Marker-delimited region patching.
//!
//! A region is a pair of comment lines embedded in otherwise opaque text:
//!
//! ```text
//!     // @http-status-codes-begin
//!     ...generated content...
//!     // @http-status-codes-end
//! ```
//!
//! Patching replaces everything between the markers. The markers, their
//! indentation and the line-break convention found after the begin marker
//! are preserved, which makes repeated patching with the same content
//! byte-for-byte idempotent.

pub mod errors;
pub mod patcher;
pub mod region;

pub use errors::MarkerError;
pub use patcher::{patch_region, render, splice, try_patch_region};
pub use region::{begin_marker, end_marker, scan, Located, MarkerBlock};
