use std::ops::Range;

const INDENT_CHARS: &[char] = &[' ', '\t'];
const LINE_BREAK_CHARS: &[char] = &['\r', '\n'];

/// Begin marker text for region `id`, without indentation.
pub fn begin_marker(id: &str) -> String {
    format!("// @{id}-begin")
}

/// End marker text for region `id`, without indentation.
pub fn end_marker(id: &str) -> String {
    format!("// @{id}-end")
}

/// A located marker region.
///
/// Spans are byte offsets into the text the block was located in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerBlock {
    /// Region id shared by the begin/end pair
    pub id: String,
    /// Whitespace immediately preceding the begin marker
    pub indentation: String,
    /// Line-break run immediately following the begin marker
    pub line_break: String,
    /// From the begin marker's indentation through the end of the end marker
    pub span: Range<usize>,
}

/// Outcome of scanning for a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    Found(MarkerBlock),
    /// A begin marker exists but no end marker with the same indentation follows it.
    Unterminated,
    Absent,
}

/// Scan `text` for region `id`.
///
/// Begin markers are tried left to right. For each, the indentation is the
/// run of spaces/tabs right before it and the line break is the run of
/// `\r`/`\n` right after it; a begin marker not followed by a line break is
/// skipped. The region closes at the first later occurrence of
/// `<indentation>// @<id>-end`.
pub fn scan(text: &str, id: &str) -> Located {
    let begin = begin_marker(id);
    let end = end_marker(id);

    let mut seen_begin = false;
    let mut from = 0;

    while let Some(offset) = text[from..].find(&begin) {
        let begin_at = from + offset;
        let marker_end = begin_at + begin.len();
        from = marker_end;

        let after = &text[marker_end..];
        let line_break_len = after.len() - after.trim_start_matches(LINE_BREAK_CHARS).len();
        if line_break_len == 0 {
            continue;
        }
        seen_begin = true;

        let indent_start = text[..begin_at].trim_end_matches(INDENT_CHARS).len();
        let indentation = &text[indent_start..begin_at];
        let interior_start = marker_end + line_break_len;

        let closing = format!("{indentation}{end}");
        if let Some(rel) = text[interior_start..].find(&closing) {
            let closing_at = interior_start + rel;
            return Located::Found(MarkerBlock {
                id: id.to_string(),
                indentation: indentation.to_string(),
                line_break: after[..line_break_len].to_string(),
                span: indent_start..closing_at + closing.len(),
            });
        }
    }

    if seen_begin {
        Located::Unterminated
    } else {
        Located::Absent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(text: &str, id: &str) -> MarkerBlock {
        match scan(text, id) {
            Located::Found(block) => block,
            other => panic!("expected region '{id}', got {other:?}"),
        }
    }

    #[test]
    fn test_locate_captures_indent_and_line_break() {
        let text = "enum Code {\r\n  // @codes-begin\r\n  old,\r\n  // @codes-end\r\n};\r\n";
        let block = found(text, "codes");

        assert_eq!(block.indentation, "  ");
        assert_eq!(block.line_break, "\r\n");
        assert_eq!(
            &text[block.span.clone()],
            "  // @codes-begin\r\n  old,\r\n  // @codes-end"
        );
    }

    #[test]
    fn test_locate_empty_interior() {
        let text = "// @codes-begin\n// @codes-end\n";
        let block = found(text, "codes");
        assert_eq!(block.indentation, "");
        assert_eq!(block.span, 0..text.len() - 1);
    }

    #[test]
    fn test_end_marker_needs_same_indentation() {
        let text = "    // @codes-begin\n  // @codes-end\n";
        assert_eq!(scan(text, "codes"), Located::Unterminated);
    }

    #[test]
    fn test_first_end_marker_wins() {
        let text = "// @a-begin\nx\n// @a-end\ny\n// @a-end\n";
        let block = found(text, "a");
        assert_eq!(&text[block.span.clone()], "// @a-begin\nx\n// @a-end");
    }

    #[test]
    fn test_begin_without_line_break_skipped() {
        let text = "// @a-begin // @a-end";
        assert_eq!(scan(text, "a"), Located::Absent);
    }

    #[test]
    fn test_absent_region() {
        assert_eq!(scan("int main() {}\n", "codes"), Located::Absent);
    }

    #[test]
    fn test_ids_do_not_cross_match() {
        let text = "// @http-status-codes-begin\n// @http-status-codes-end\n";
        assert_eq!(scan(text, "http-status"), Located::Absent);
        assert!(matches!(scan(text, "http-status-codes"), Located::Found(_)));
    }

    #[test]
    fn test_multiple_line_breaks_captured() {
        let text = "\t// @a-begin\n\n\tx\n\t// @a-end";
        let block = found(text, "a");
        assert_eq!(block.indentation, "\t");
        assert_eq!(block.line_break, "\n\n");
    }
}
