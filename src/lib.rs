//! Status Sync: keeps generated HTTP status code blocks in sync with the
//! IANA registry.
//!
//! A hand-maintained source file carries two marker regions. Each run reads
//! the registry snapshot, derives one enumerator declaration and one reason
//! phrase per status code, and rewrites the interior of both regions.
//!
//! # Architecture
//!
//! - [`registry`]: CSV rows to [`StatusCodeRecord`]s, slug derivation, and
//!   the cache-or-fetch bootstrap of the registry snapshot.
//! - [`codegen`]: records to aligned declaration lines and phrase lines.
//! - [`marker`]: locating a `// @<id>-begin` / `// @<id>-end` region in
//!   arbitrary text and replacing its interior.
//! - [`sync`]: the pipeline tying these together for one target file.
//!
//! # Example
//!
//! ```
//! use status_sync::{generate, patch_region, StatusCodeRecord};
//!
//! let records = vec![
//!     StatusCodeRecord::new("200", "OK", "[RFC9110]"),
//!     StatusCodeRecord::new("404", "Not Found", "[RFC9110]"),
//! ];
//! let blocks = generate(&records);
//!
//! let source = "enum Code {\n  // @http-status-codes-begin\n  // @http-status-codes-end\n};\n";
//! let patched = patch_region(source, "http-status-codes", &blocks.declarations);
//!
//! assert!(patched.contains("  k404_Not_Found = 404,  // [RFC9110]\n"));
//! ```

pub mod codegen;
pub mod config;
pub mod marker;
pub mod registry;
pub mod sync;

// Re-exports
pub use codegen::{generate, generate_with, GeneratedBlocks};
pub use config::{load_from_path, load_from_str, ConfigError, SyncConfig};
pub use marker::{patch_region, try_patch_region, MarkerBlock, MarkerError};
pub use registry::{slugify, Fetcher, HttpFetcher, RegistryError, StatusCodeRecord};
pub use sync::{
    apply_blocks, run, RegionOutcome, RegionReport, SyncError, SyncOptions, SyncReport,
};
