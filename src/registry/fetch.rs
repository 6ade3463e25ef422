//! Registry snapshot retrieval.
//!
//! The registry CSV is cached on disk. A fetch happens only when the cached
//! copy is missing or empty; an existing snapshot is reused as-is with no
//! freshness check.

use crate::registry::errors::RegistryError;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Published location of the IANA HTTP status code registry.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://www.iana.org/assignments/http-status-codes/http-status-codes-1.csv";

/// Source of raw registry bytes.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, RegistryError>;
}

/// Blocking HTTP fetcher. No retries and no timeouts beyond the client defaults.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFetcher;

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, RegistryError> {
        let http_err = |source| RegistryError::Http {
            url: url.to_string(),
            source,
        };

        let response = reqwest::blocking::get(url).map_err(http_err)?;
        if !response.status().is_success() {
            return Err(RegistryError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().map_err(http_err)?;
        Ok(bytes.to_vec())
    }
}

/// Whether the cached snapshot at `cache` can be used without fetching.
pub fn is_cached(cache: &Path) -> bool {
    fs::metadata(cache).is_ok_and(|meta| meta.len() > 0)
}

/// Make sure a non-empty registry snapshot exists at `cache`.
///
/// Returns `true` when a fetch was performed.
pub fn ensure_cached(
    fetcher: &dyn Fetcher,
    url: &str,
    cache: &Path,
) -> Result<bool, RegistryError> {
    if is_cached(cache) {
        debug!("Using cached registry snapshot {}", cache.display());
        return Ok(false);
    }

    info!("Fetching registry from {}", url);
    let bytes = fetcher.fetch(url)?;

    let io_err = |source| RegistryError::Io {
        path: cache.to_path_buf(),
        source,
    };
    if let Some(parent) = cache.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(cache, &bytes).map_err(io_err)?;

    info!("Cached {} bytes at {}", bytes.len(), cache.display());
    Ok(true)
}
