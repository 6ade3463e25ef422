use crate::marker::errors::MarkerError;
use crate::marker::region::{begin_marker, end_marker, scan, Located, MarkerBlock};
use tracing::debug;

/// Render a full region (begin marker through end marker) for `block` with
/// `lines` as its interior.
///
/// Each content line is prefixed with the block's indentation and joined with
/// its captured line break. With no lines the two markers end up adjacent, so
/// an emptied region still locates the same way on the next pass.
pub fn render<S: AsRef<str>>(block: &MarkerBlock, lines: &[S]) -> String {
    let indent = block.indentation.as_str();
    let line_break = block.line_break.as_str();

    let mut out = String::new();
    out.push_str(indent);
    out.push_str(&begin_marker(&block.id));
    out.push_str(line_break);

    for line in lines {
        out.push_str(indent);
        out.push_str(line.as_ref());
        out.push_str(line_break);
    }

    out.push_str(indent);
    out.push_str(&end_marker(&block.id));
    out
}

/// Replace the interior of region `id` in `text` with `lines`.
///
/// Returns `text` unchanged if the region is absent or unterminated.
pub fn patch_region<S: AsRef<str>>(text: &str, id: &str, lines: &[S]) -> String {
    match try_patch_region(text, id, lines) {
        Ok(patched) => patched,
        Err(e) => {
            debug!("Skipping region: {}", e);
            text.to_string()
        }
    }
}

/// Like [`patch_region`], but reports a missing or unterminated region as an error.
pub fn try_patch_region<S: AsRef<str>>(
    text: &str,
    id: &str,
    lines: &[S],
) -> Result<String, MarkerError> {
    let block = match scan(text, id) {
        Located::Found(block) => block,
        Located::Unterminated => {
            return Err(MarkerError::UnterminatedRegion { id: id.to_string() })
        }
        Located::Absent => return Err(MarkerError::RegionNotFound { id: id.to_string() }),
    };

    Ok(splice(text, &block, lines))
}

/// Replace `block`'s span in `text` with a freshly rendered region.
///
/// `block` must have been scanned from `text`.
pub fn splice<S: AsRef<str>>(text: &str, block: &MarkerBlock, lines: &[S]) -> String {
    debug!(
        "Region '{}' at bytes {}..{} (indent {:?}, line break {:?})",
        block.id, block.span.start, block.span.end, block.indentation, block.line_break
    );

    let rendered = render(block, lines);
    let mut out = String::with_capacity(text.len() - block.span.len() + rendered.len());
    out.push_str(&text[..block.span.start]);
    out.push_str(&rendered);
    out.push_str(&text[block.span.end..]);
    out
}
