//! The sync pipeline: registry snapshot -> records -> generated blocks ->
//! patched target file.
//!
//! A run is strictly sequential. The registry is fetched at most once (only
//! on a cache miss), the target is read once, patched in memory region by
//! region, and written back in full only when its text changed.

use crate::codegen::{generate_with, GeneratedBlocks};
use crate::config::SyncConfig;
use crate::marker::{scan, splice, Located, MarkerError};
use crate::registry::{ensure_cached, load_records, Fetcher, RegistryError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Marker(#[from] MarkerError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-run switches layered over the configuration.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Base directory for relative configured paths
    pub root: PathBuf,
    /// Compute the patched text without writing the target
    pub dry_run: bool,
    /// Treat a missing region as an error regardless of the config
    pub strict: bool,
}

/// What happened to one marker region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionOutcome {
    /// Interior was replaced with different content
    Patched,
    /// Interior already matched the generated content
    Unchanged,
    /// No complete marker pair was found; the text was left alone
    Missing,
}

impl fmt::Display for RegionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionOutcome::Patched => write!(f, "patched"),
            RegionOutcome::Unchanged => write!(f, "unchanged"),
            RegionOutcome::Missing => write!(f, "missing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionReport {
    pub id: String,
    /// Lines written into the region; zero when it was skipped
    pub lines: usize,
    pub outcome: RegionOutcome,
}

/// Result of applying the generated blocks to a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedText {
    pub text: String,
    pub regions: Vec<RegionReport>,
}

/// Result of a full run.
#[derive(Debug, Clone)]
#[must_use = "SyncReport should be checked for missing regions"]
pub struct SyncReport {
    pub target: PathBuf,
    /// Whether the registry was downloaded during this run
    pub fetched: bool,
    /// Rows read from the registry, placeholders included
    pub records: usize,
    pub regions: Vec<RegionReport>,
    pub original: String,
    pub patched: String,
    /// Whether the target file was overwritten
    pub written: bool,
}

impl SyncReport {
    pub fn changed(&self) -> bool {
        self.original != self.patched
    }

    pub fn missing_regions(&self) -> impl Iterator<Item = &RegionReport> {
        self.regions
            .iter()
            .filter(|r| r.outcome == RegionOutcome::Missing)
    }
}

/// Apply `blocks` to `source`: declarations into `codes_region`, then phrases
/// into `phrases_region`, each on the result of the previous step.
///
/// In strict mode a missing or unterminated region is an error; otherwise it
/// is reported as [`RegionOutcome::Missing`] and skipped.
pub fn apply_blocks(
    source: &str,
    blocks: &GeneratedBlocks,
    codes_region: &str,
    phrases_region: &str,
    strict: bool,
) -> Result<PatchedText, MarkerError> {
    let mut text = source.to_string();
    let mut regions = Vec::with_capacity(2);

    for (id, lines) in [
        (codes_region, &blocks.declarations),
        (phrases_region, &blocks.phrases),
    ] {
        let (outcome, written) = match scan(&text, id) {
            Located::Found(block) => {
                let patched = splice(&text, &block, lines);
                let outcome = if patched == text {
                    RegionOutcome::Unchanged
                } else {
                    RegionOutcome::Patched
                };
                text = patched;
                (outcome, lines.len())
            }
            Located::Unterminated if strict => {
                return Err(MarkerError::UnterminatedRegion { id: id.to_string() })
            }
            Located::Absent if strict => {
                return Err(MarkerError::RegionNotFound { id: id.to_string() })
            }
            Located::Unterminated | Located::Absent => {
                warn!("Marker region '{}' not found, skipping", id);
                (RegionOutcome::Missing, 0)
            }
        };

        regions.push(RegionReport {
            id: id.to_string(),
            lines: written,
            outcome,
        });
    }

    Ok(PatchedText { text, regions })
}

/// Run the whole pipeline against the filesystem.
pub fn run(
    config: &SyncConfig,
    options: &SyncOptions,
    fetcher: &dyn Fetcher,
) -> Result<SyncReport, SyncError> {
    let cache = SyncConfig::resolve(&options.root, &config.registry.cache);
    let target = SyncConfig::resolve(&options.root, &config.target.file);

    let fetched = ensure_cached(fetcher, &config.registry.url, &cache)?;
    let records = load_records(&cache)?;
    let blocks = generate_with(&records, &config.generator.placeholders);
    info!(
        "Generated {} declarations from {} registry rows",
        blocks.declarations.len(),
        records.len()
    );

    let original = read_target(&target)?;
    let patched = apply_blocks(
        &original,
        &blocks,
        &config.target.codes_region,
        &config.target.phrases_region,
        config.target.strict || options.strict,
    )?;

    let changed = patched.text != original;
    let written = changed && !options.dry_run;
    if written {
        fs::write(&target, &patched.text).map_err(|source| SyncError::Io {
            path: target.clone(),
            source,
        })?;
        info!("Wrote {}", target.display());
    }

    Ok(SyncReport {
        target,
        fetched,
        records: records.len(),
        regions: patched.regions,
        original,
        patched: patched.text,
        written,
    })
}

fn read_target(path: &Path) -> Result<String, SyncError> {
    fs::read_to_string(path).map_err(|source| SyncError::Io {
        path: path.to_path_buf(),
        source,
    })
}
