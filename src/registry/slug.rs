/// Characters rewritten when deriving an identifier from a description.
///
/// Each entry maps a single input character to its replacement; an empty
/// replacement drops the character. Anything not listed passes through.
const SUBSTITUTIONS: &[(char, &str)] = &[('-', ""), ('(', ""), (')', ""), (' ', "_")];

/// Derive an identifier-safe slug from a registry description.
///
/// Applies the fixed substitution table once over the input. There is no
/// case folding and no collision detection: `"Non-Authoritative"` and
/// `"NonAuthoritative"` both yield `"NonAuthoritative"`.
///
/// ```
/// use status_sync::registry::slugify;
///
/// assert_eq!(slugify("Not Found"), "Not_Found");
/// assert_eq!(slugify("(Unused)"), "Unused");
/// ```
pub fn slugify(description: &str) -> String {
    let mut slug = String::with_capacity(description.len());
    for ch in description.chars() {
        match SUBSTITUTIONS.iter().find(|(from, _)| *from == ch) {
            Some((_, to)) => slug.push_str(to),
            None => slug.push(ch),
        }
    }
    slug
}
