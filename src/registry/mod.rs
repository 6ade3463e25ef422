pub mod errors;
pub mod fetch;
pub mod record;
pub mod slug;

pub use errors::RegistryError;
pub use fetch::{ensure_cached, is_cached, Fetcher, HttpFetcher, DEFAULT_REGISTRY_URL};
pub use record::{load_records, parse_records, StatusCodeRecord};
pub use slug::slugify;
