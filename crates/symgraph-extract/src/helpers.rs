//! Shared signature/visibility/type-inference helpers used by the language
//! front ends.

use symgraph_core::{Span, Visibility};
use tree_sitter::Node;

/// UTF-8 text of a node, empty on invalid slices.
pub fn node_text(node: Node, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or("").to_string()
}

/// Span of a node in core coordinates.
pub fn span_of(node: Node) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    Span {
        start_line: start.row,
        start_column: start.column,
        end_line: end.row,
        end_column: end.column,
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
    }
}

/// First line of a declaration, trimmed.
pub fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or(text).trim()
}

/// Node text up to (not including) the first occurrence of `stop`, trimmed.
/// Falls back to the first line when `stop` is absent.
pub fn text_before(node: Node, source: &[u8], stop: char) -> String {
    let text = node_text(node, source);
    match text.find(stop) {
        Some(pos) => text[..pos].trim().to_string(),
        None => first_line(&text).to_string(),
    }
}

/// Truncate on a char boundary.
pub fn truncate(mut text: String, max_len: usize) -> String {
    if text.len() <= max_len {
        return text;
    }
    let mut cut = max_len;
    while cut > 0 && !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
    text
}

/// Leading-underscore privacy convention (Python, Ruby).
pub fn underscore_visibility(name: &str) -> Visibility {
    if name.starts_with('_') {
        Visibility::Private
    } else {
        Visibility::Public
    }
}

/// Case-based export rule (Go): uppercase-first is public.
pub fn case_visibility(name: &str) -> Visibility {
    if name.chars().next().is_some_and(|c| c.is_uppercase()) {
        Visibility::Public
    } else {
        Visibility::Private
    }
}

/// Whether a name follows the SCREAMING_SNAKE constant convention.
pub fn is_upper_snake(name: &str) -> bool {
    name.len() >= 2
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c == '_' || c.is_ascii_digit())
}

/// Nearest ancestor whose kind is in `kinds`, excluding the node itself.
pub fn nearest_ancestor<'a>(node: Node<'a>, kinds: &[&str]) -> Option<Node<'a>> {
    let mut current = node.parent();
    while let Some(n) = current {
        if kinds.contains(&n.kind()) {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

/// Collect a contiguous run of comment siblings immediately preceding a
/// declaration, with `prefixes` stripped per line. Used for `///`, `//`,
/// `#`, and javadoc-style blocks alike.
pub fn preceding_comments(node: Node, source: &[u8], prefixes: &[&str]) -> Option<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut prev = node.prev_sibling();
    while let Some(sibling) = prev {
        if !sibling.kind().contains("comment") {
            break;
        }
        let raw = node_text(sibling, source);
        let mut block: Vec<String> = raw
            .lines()
            .map(|line| strip_comment_markers(line, prefixes))
            .collect();
        block.extend(lines);
        lines = block;
        prev = sibling.prev_sibling();
    }
    let text = lines.join("\n").trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn strip_comment_markers(line: &str, prefixes: &[&str]) -> String {
    let mut trimmed = line.trim();
    trimmed = trimmed.trim_start_matches("/**").trim_start_matches("/*");
    trimmed = trimmed.trim_end_matches("*/");
    for prefix in prefixes {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            trimmed = rest;
            break;
        }
    }
    trimmed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        let text = "sinal — très long".to_string();
        let cut = truncate(text, 8);
        assert!(cut.len() <= 8);
        assert!(cut.is_char_boundary(cut.len()));
    }

    #[test]
    fn underscore_convention() {
        assert_eq!(underscore_visibility("_hidden"), Visibility::Private);
        assert_eq!(underscore_visibility("__dunder__"), Visibility::Private);
        assert_eq!(underscore_visibility("open"), Visibility::Public);
    }

    #[test]
    fn case_convention() {
        assert_eq!(case_visibility("Exported"), Visibility::Public);
        assert_eq!(case_visibility("internal"), Visibility::Private);
    }

    #[test]
    fn upper_snake_detection() {
        assert!(is_upper_snake("MAX_SIZE"));
        assert!(is_upper_snake("HTTP2"));
        assert!(!is_upper_snake("MaxSize"));
        assert!(!is_upper_snake("x"));
    }

    #[test]
    fn comment_marker_stripping() {
        assert_eq!(strip_comment_markers("/// doc line", &["///"]), "doc line");
        assert_eq!(strip_comment_markers(" * javadoc", &["*"]), "javadoc");
        assert_eq!(strip_comment_markers("# ruby doc", &["#"]), "ruby doc");
    }
}
