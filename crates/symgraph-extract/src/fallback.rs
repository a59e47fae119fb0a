//! Regex/text fallback extraction for malformed trees.
//!
//! Nodes the grammar marks as parse errors still often contain a
//! recognizable declaration (`function Name(` and friends). Rather than
//! skip such nodes outright, the builder hands their raw text to this
//! module so one malformed statement does not blind the indexer to the rest
//! of a file. Recovered symbols carry `flags.from_fallback` so consumers can
//! rank or filter them.

use once_cell::sync::Lazy;
use regex::Regex;
use symgraph_core::{Span, SymbolKind};
use tree_sitter::Node;

use crate::frontend::SymbolDraft;
use crate::helpers::{first_line, node_text};

static FUNCTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:function|fn|def|func)\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(")
        .expect("function fallback pattern")
});

static TYPE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:class|struct|interface|trait|enum)\s+([A-Za-z_][A-Za-z0-9_]*)")
        .expect("type fallback pattern")
});

/// Attempt text-pattern recovery from an ERROR node.
pub fn recover(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let text = node_text(node, source);
    if text.is_empty() {
        return Vec::new();
    }

    let mut drafts = Vec::new();
    for (pattern, kind) in [
        (&*FUNCTION_PATTERN, SymbolKind::Function),
        (&*TYPE_PATTERN, SymbolKind::Class),
    ] {
        for captures in pattern.captures_iter(&text) {
            let Some(name) = captures.get(1) else { continue };
            let whole = captures.get(0).map_or(name.range(), |m| m.range());
            let span = offset_span(node, &text, whole.start, whole.end);
            let mut draft = SymbolDraft::new(name.as_str(), kind, span);
            draft.signature = Some(first_line(&text[whole.start..]).to_string());
            draft.flags.from_fallback = true;
            drafts.push(draft);
        }
    }
    drafts
}

/// Translate byte offsets inside an ERROR node's text into a file span.
fn offset_span(node: Node, text: &str, start: usize, end: usize) -> Span {
    let base = node.start_position();
    let (start_line, start_column) = relative_position(text, start, base.row, base.column);
    let (end_line, end_column) = relative_position(text, end, base.row, base.column);
    Span {
        start_line,
        start_column,
        end_line,
        end_column,
        start_byte: node.start_byte() + start,
        end_byte: node.start_byte() + end,
    }
}

fn relative_position(
    text: &str,
    offset: usize,
    base_row: usize,
    base_column: usize,
) -> (usize, usize) {
    let prefix = &text[..offset];
    let newlines = prefix.matches('\n').count();
    let column = match prefix.rfind('\n') {
        Some(pos) => offset - pos - 1,
        None => base_column + offset,
    };
    (base_row + newlines, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_pattern_captures_name() {
        let captures = FUNCTION_PATTERN.captures("function doThing(a, b) {").unwrap();
        assert_eq!(&captures[1], "doThing");
    }

    #[test]
    fn def_and_fn_keywords_match() {
        assert!(FUNCTION_PATTERN.is_match("def broken(x"));
        assert!(FUNCTION_PATTERN.is_match("fn broken(x"));
        assert!(FUNCTION_PATTERN.is_match("func broken(x"));
    }

    #[test]
    fn type_pattern_captures_name() {
        let captures = TYPE_PATTERN.captures("class Widget extends Base").unwrap();
        assert_eq!(&captures[1], "Widget");
    }

    #[test]
    fn relative_position_tracks_newlines() {
        let text = "junk\nfunction foo(";
        let offset = text.find("function").unwrap();
        assert_eq!(relative_position(text, offset, 10, 4), (11, 0));
        assert_eq!(relative_position(text, 2, 10, 4), (10, 6));
    }
}
