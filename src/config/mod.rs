pub mod loader;
pub mod schema;

pub use loader::{load_from_path, load_from_str, ConfigError};
pub use schema::{
    GeneratorSection, RegistrySection, SyncConfig, TargetSection, ValidationError,
    ValidationIssue, DEFAULT_CACHE_PATH, DEFAULT_CODES_REGION, DEFAULT_PHRASES_REGION,
    DEFAULT_TARGET_PATH,
};
