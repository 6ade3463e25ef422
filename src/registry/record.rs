use crate::registry::errors::RegistryError;
use crate::registry::slug::slugify;
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// First column of the registry header row.
const HEADER_VALUE: &str = "Value";

/// One row of the HTTP status code registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCodeRecord {
    /// Code as written in the registry (may be a range such as `104-199`)
    pub value: String,
    /// Reason phrase exactly as given
    pub description: String,
    /// Identifier derived from `description`
    pub slug: String,
    /// Citation text with adjacent bracket groups separated
    pub reference: String,
}

impl StatusCodeRecord {
    pub fn new(
        value: impl Into<String>,
        description: impl Into<String>,
        reference: impl AsRef<str>,
    ) -> Self {
        let description = description.into();
        Self {
            value: value.into(),
            slug: slugify(&description),
            description,
            reference: reference.as_ref().replace("][", "] ["),
        }
    }

    /// Enumerator text, e.g. `k404_Not_Found = 404,`.
    pub fn declaration_line(&self) -> String {
        format!("k{0}_{1} = {0},", self.value, self.slug)
    }

    fn from_row(row: &StringRecord, line: u64) -> Result<Self, RegistryError> {
        match (row.get(0), row.get(1), row.get(2)) {
            (Some(value), Some(description), Some(reference)) => {
                Ok(Self::new(value, description, reference))
            }
            _ => Err(RegistryError::MalformedRow {
                line,
                fields: row.len(),
            }),
        }
    }
}

/// Parse registry rows from any CSV source, preserving row order.
///
/// The header row (first field `Value`) is skipped wherever it appears. A
/// blank line is a row with no fields and is rejected like any other short
/// row; the CSV reader itself would drop it silently.
pub fn parse_records<R: Read>(mut reader: R) -> Result<Vec<StatusCodeRecord>, RegistryError> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(csv::Error::from)?;

    if let Some(line) = first_blank_line(&input) {
        return Err(RegistryError::MalformedRow { line, fields: 0 });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input.as_bytes());

    let mut records = Vec::new();
    let mut row = StringRecord::new();

    while reader.read_record(&mut row)? {
        if row.get(0) == Some(HEADER_VALUE) {
            continue;
        }
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        records.push(StatusCodeRecord::from_row(&row, line)?);
    }

    Ok(records)
}

/// 1-based number of the first empty line outside a quoted field.
///
/// A terminator at the very end of the input does not open a further line.
fn first_blank_line(input: &str) -> Option<u64> {
    let mut line = 1;
    let mut quoted = false;
    let mut empty = true;

    for ch in input.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                empty = false;
            }
            '\n' if quoted => line += 1,
            '\n' => {
                if empty {
                    return Some(line);
                }
                line += 1;
                empty = true;
            }
            '\r' if !quoted => {}
            _ => empty = false,
        }
    }

    None
}

/// Parse the cached registry file at `path`.
pub fn load_records(path: &Path) -> Result<Vec<StatusCodeRecord>, RegistryError> {
    let file = std::fs::File::open(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_records(file)?;
    debug!("Parsed {} registry rows from {}", records.len(), path.display());
    Ok(records)
}
