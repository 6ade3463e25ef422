use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("registry row {line} has {fields} fields, expected at least 3")]
    MalformedRow { line: u64, fields: usize },

    #[error("failed to read registry CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to fetch registry from {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("registry fetch from {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
