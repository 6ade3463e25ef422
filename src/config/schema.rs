use crate::codegen::DEFAULT_PLACEHOLDERS;
use crate::registry::DEFAULT_REGISTRY_URL;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_CACHE_PATH: &str = "references/http-status-codes.csv";
pub const DEFAULT_TARGET_PATH: &str = "include/hypp/status.hpp";
pub const DEFAULT_CODES_REGION: &str = "http-status-codes";
pub const DEFAULT_PHRASES_REGION: &str = "http-status-phrases";

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    #[serde(default)]
    pub registry: RegistrySection,
    #[serde(default)]
    pub target: TargetSection,
    #[serde(default)]
    pub generator: GeneratorSection,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrySection {
    /// Where the registry CSV is fetched from on a cache miss
    pub url: String,
    /// Cached snapshot, relative to the run root unless absolute
    pub cache: PathBuf,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.to_string(),
            cache: PathBuf::from(DEFAULT_CACHE_PATH),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TargetSection {
    /// Source file holding both marker regions
    pub file: PathBuf,
    pub codes_region: String,
    pub phrases_region: String,
    /// Fail the run when a region is missing instead of skipping it
    pub strict: bool,
}

impl Default for TargetSection {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_TARGET_PATH),
            codes_region: DEFAULT_CODES_REGION.to_string(),
            phrases_region: DEFAULT_PHRASES_REGION.to_string(),
            strict: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSection {
    /// Slugs of rows left out of the generated blocks
    pub placeholders: Vec<String>,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            placeholders: DEFAULT_PLACEHOLDERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SyncConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.registry.url.trim().is_empty() {
            issues.push(ValidationIssue::MissingField {
                field: "registry.url",
            });
        }
        if self.registry.cache.as_os_str().is_empty() {
            issues.push(ValidationIssue::MissingField {
                field: "registry.cache",
            });
        }
        if self.target.file.as_os_str().is_empty() {
            issues.push(ValidationIssue::MissingField {
                field: "target.file",
            });
        }

        for (field, id) in [
            ("target.codes_region", &self.target.codes_region),
            ("target.phrases_region", &self.target.phrases_region),
        ] {
            if id.is_empty() {
                issues.push(ValidationIssue::MissingField { field });
            } else if id.chars().any(char::is_whitespace) {
                issues.push(ValidationIssue::InvalidRegionId {
                    field,
                    id: id.clone(),
                });
            }
        }

        if !self.target.codes_region.is_empty()
            && self.target.codes_region == self.target.phrases_region
        {
            issues.push(ValidationIssue::DuplicateRegion {
                id: self.target.codes_region.clone(),
            });
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Resolve a configured path against `root` unless it is already absolute.
    pub fn resolve(root: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingField { field: &'static str },
    InvalidRegionId { field: &'static str, id: String },
    DuplicateRegion { id: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingField { field } => {
                write!(f, "missing required field '{field}'")
            }
            ValidationIssue::InvalidRegionId { field, id } => {
                write!(f, "'{field}' = {id:?} must not contain whitespace")
            }
            ValidationIssue::DuplicateRegion { id } => {
                write!(f, "codes and phrases regions both use id '{id}'")
            }
        }
    }
}
