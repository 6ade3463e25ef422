use crate::registry::StatusCodeRecord;

/// Slugs of registry rows that describe unassigned ranges or unused codes.
pub const DEFAULT_PLACEHOLDERS: &[&str] = &["Unassigned", "Unused"];

/// The two generated line sequences, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedBlocks {
    /// Enumerator declarations with aligned reference comments
    pub declarations: Vec<String>,
    /// `case <value>: return "<description>";` lines
    pub phrases: Vec<String>,
}

/// Generate both blocks using the default placeholder slugs.
pub fn generate(records: &[StatusCodeRecord]) -> GeneratedBlocks {
    generate_with(records, DEFAULT_PLACEHOLDERS)
}

/// Generate both blocks, excluding rows whose slug is in `placeholders`.
///
/// The padding width is taken over *every* record, placeholders included,
/// so a long placeholder line still widens the emitted declarations.
pub fn generate_with<S: AsRef<str>>(
    records: &[StatusCodeRecord],
    placeholders: &[S],
) -> GeneratedBlocks {
    let lines: Vec<String> = records.iter().map(StatusCodeRecord::declaration_line).collect();
    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    let mut blocks = GeneratedBlocks::default();
    for (record, line) in records.iter().zip(&lines) {
        if placeholders.iter().any(|p| p.as_ref() == record.slug) {
            continue;
        }
        blocks
            .declarations
            .push(format!("{line:<width$}  // {}", record.reference));
        blocks.phrases.push(format!(
            "case {}: return \"{}\";",
            record.value, record.description
        ));
    }
    blocks
}
