//! Go front end using tree-sitter-go.
//!
//! Visibility follows Go's export rule (uppercase first letter). Grouped
//! `const`/`var`/`type`/`import` blocks flatten into one draft per spec.

use symgraph_core::{RelationshipKind, SymbolKind, SymgraphError, Visibility};
use tree_sitter::Node;

use crate::frontend::{LanguageFrontend, ReferenceDraft, SymbolDraft};
use crate::helpers::{
    case_visibility, first_line, nearest_ancestor, node_text, preceding_comments, span_of,
    text_before,
};

/// Go front end.
pub struct GoFrontend;

impl GoFrontend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GoFrontend {
    fn default() -> Self {
        Self::new()
    }
}

const FUNCTION_SCOPES: &[&str] = &["function_declaration", "method_declaration", "func_literal"];

impl LanguageFrontend for GoFrontend {
    fn language_name(&self) -> &str {
        "go"
    }

    fn file_extensions(&self) -> &[&str] {
        &["go"]
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_go::LANGUAGE.into()
    }

    fn classify(&self, node: Node, source: &[u8]) -> Result<Vec<SymbolDraft>, SymgraphError> {
        match node.kind() {
            "function_declaration" => Ok(classify_named(node, source, SymbolKind::Function)),
            "method_declaration" => Ok(classify_method(node, source)),
            "type_declaration" => Ok(classify_type_declaration(node, source)),
            "const_declaration" => Ok(classify_value_declaration(
                node,
                source,
                "const_spec",
                SymbolKind::Constant,
            )),
            "var_declaration" => Ok(classify_value_declaration(
                node,
                source,
                "var_spec",
                SymbolKind::Variable,
            )),
            "import_declaration" => Ok(classify_imports(node, source)),
            "field_declaration" => Ok(classify_struct_field(node, source)),
            _ => Ok(Vec::new()),
        }
    }

    fn signature(&self, node: Node, source: &[u8]) -> String {
        text_before(node, source, '{')
    }

    fn visibility(&self, name: &str, _node: Node, _source: &[u8]) -> Visibility {
        case_visibility(name)
    }

    fn type_hint(&self, node: Node, source: &[u8]) -> Option<String> {
        match node.kind() {
            "function_declaration" | "method_declaration" => {
                let result = node.child_by_field_name("result")?;
                Some(node_text(result, source))
            }
            _ => {
                let ty = node.child_by_field_name("type")?;
                Some(node_text(ty, source))
            }
        }
    }

    fn documentation(&self, node: Node, source: &[u8]) -> Option<String> {
        preceding_comments(node, source, &["//"])
    }

    fn references(&self, node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
        match node.kind() {
            "call_expression" => call_reference(node, source).into_iter().collect(),
            "type_declaration" => embedded_interface_references(node, source),
            "import_declaration" => import_references(node, source),
            _ => Vec::new(),
        }
    }
}

// ── Symbol Classification ─────────────────────────────────────────────────

fn classify_named(node: Node, source: &[u8], kind: SymbolKind) -> Vec<SymbolDraft> {
    let Some(name_node) = node.child_by_field_name("name") else {
        return Vec::new();
    };
    vec![SymbolDraft::new(
        node_text(name_node, source),
        kind,
        span_of(node),
    )]
}

fn classify_method(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let mut drafts = classify_named(node, source, SymbolKind::Method);
    if let Some(draft) = drafts.first_mut() {
        if let Some(receiver) = node.child_by_field_name("receiver") {
            let receiver_type = node_text(receiver, source)
                .trim_matches(|c| c == '(' || c == ')')
                .trim()
                .to_string();
            draft
                .metadata
                .insert("receiver".to_string(), receiver_type);
        }
    }
    drafts
}

/// `type (A struct{...}; B interface{...})` flattens into one draft per
/// spec; the underlying type decides the kind.
fn classify_type_declaration(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| child.kind() == "type_spec" || child.kind() == "type_alias")
        .filter_map(|spec| {
            let name_node = spec.child_by_field_name("name")?;
            let kind = match spec.child_by_field_name("type").map(|t| t.kind()) {
                Some("struct_type") => SymbolKind::Class,
                Some("interface_type") => SymbolKind::Interface,
                _ => SymbolKind::Type,
            };
            let mut draft =
                SymbolDraft::new(node_text(name_node, source), kind, span_of(spec));
            draft.signature = Some(first_line(&node_text(spec, source)).to_string());
            Some(draft)
        })
        .collect()
}

fn classify_value_declaration(
    node: Node,
    source: &[u8],
    spec_kind: &str,
    kind: SymbolKind,
) -> Vec<SymbolDraft> {
    // Function locals are not indexed declarations.
    if nearest_ancestor(node, FUNCTION_SCOPES).is_some() {
        return Vec::new();
    }
    let mut drafts = Vec::new();
    let mut cursor = node.walk();
    for spec in node
        .children(&mut cursor)
        .filter(|child| child.kind() == spec_kind)
    {
        let mut name_cursor = spec.walk();
        for name_node in spec.children_by_field_name("name", &mut name_cursor) {
            let mut draft =
                SymbolDraft::new(node_text(name_node, source), kind, span_of(spec));
            draft.signature = Some(first_line(&node_text(spec, source)).to_string());
            if let Some(ty) = spec.child_by_field_name("type") {
                draft.data_type = Some(node_text(ty, source));
            }
            drafts.push(draft);
        }
    }
    drafts
}

fn classify_imports(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let mut drafts = Vec::new();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if current.kind() == "import_spec" {
            if let Some(path) = current.child_by_field_name("path") {
                let module = node_text(path, source).trim_matches('"').to_string();
                if !module.is_empty() {
                    let mut draft =
                        SymbolDraft::new(module, SymbolKind::Import, span_of(current));
                    draft.signature =
                        Some(first_line(&node_text(current, source)).to_string());
                    drafts.push(draft);
                }
            }
            continue;
        }
        let mut cursor = current.walk();
        let mut children: Vec<Node> = current.children(&mut cursor).collect();
        children.reverse();
        stack.extend(children);
    }
    drafts
}

fn classify_struct_field(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let data_type = node
        .child_by_field_name("type")
        .map(|ty| node_text(ty, source));
    let mut drafts = Vec::new();
    let mut cursor = node.walk();
    for name_node in node.children_by_field_name("name", &mut cursor) {
        let mut draft = SymbolDraft::new(
            node_text(name_node, source),
            SymbolKind::Field,
            span_of(node),
        );
        draft.signature = Some(first_line(&node_text(node, source)).to_string());
        draft.data_type = data_type.clone();
        drafts.push(draft);
    }
    drafts
}

// ── References ────────────────────────────────────────────────────────────

fn call_reference(node: Node, source: &[u8]) -> Option<ReferenceDraft> {
    let function = node.child_by_field_name("function")?;
    let (target, confidence) = match function.kind() {
        "identifier" => (node_text(function, source), 0.9),
        "selector_expression" => (node_text(function, source), 0.75),
        _ => return None,
    };
    Some(ReferenceDraft::new(
        target,
        RelationshipKind::Calls,
        node,
        confidence,
    ))
}

/// An interface embedding another interface extends it.
fn embedded_interface_references(node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
    let mut drafts = Vec::new();
    let mut cursor = node.walk();
    for spec in node
        .children(&mut cursor)
        .filter(|child| child.kind() == "type_spec")
    {
        let Some(name_node) = spec.child_by_field_name("name") else {
            continue;
        };
        let Some(body) = spec.child_by_field_name("type") else {
            continue;
        };
        if body.kind() != "interface_type" {
            continue;
        }
        let interface_name = node_text(name_node, source);
        let mut body_cursor = body.walk();
        for element in body.children(&mut body_cursor) {
            let embedded = match element.kind() {
                "type_identifier" => Some(element),
                "type_elem" => element.child(0),
                _ => None,
            };
            if let Some(target) = embedded {
                if target.kind() == "type_identifier" || target.kind() == "qualified_type" {
                    drafts.push(
                        ReferenceDraft::new(
                            node_text(target, source),
                            RelationshipKind::Extends,
                            element,
                            0.95,
                        )
                        .from_name(interface_name.clone()),
                    );
                }
            }
        }
    }
    drafts
}

fn import_references(node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
    classify_imports(node, source)
        .into_iter()
        .map(|draft| {
            let line = draft.span.start_line;
            let mut reference = ReferenceDraft::new(
                draft.name.clone(),
                RelationshipKind::Imports,
                node,
                1.0,
            )
            .from_name(draft.name)
            .external();
            reference.line = line;
            reference
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SourceExtractor;
    use symgraph_core::{FileExtraction, RelationshipTarget};

    fn extract(source: &str) -> FileExtraction {
        SourceExtractor::new()
            .extract_file("main.go", source.as_bytes())
            .expect("go should be supported")
    }

    #[test]
    fn struct_and_methods() {
        let result = extract(
            r#"
package main

type Server struct {
	Addr string
	port int
}

func (s *Server) Start() error {
	return nil
}
"#,
        );
        let server = result.symbols.iter().find(|s| s.name == "Server").unwrap();
        assert_eq!(server.kind, SymbolKind::Class);
        assert_eq!(server.visibility, Visibility::Public);

        let addr = result.symbols.iter().find(|s| s.name == "Addr").unwrap();
        assert_eq!(addr.kind, SymbolKind::Field);
        assert_eq!(addr.parent_id.as_ref(), Some(&server.id));
        assert_eq!(addr.data_type.as_deref(), Some("string"));

        let port = result.symbols.iter().find(|s| s.name == "port").unwrap();
        assert_eq!(port.visibility, Visibility::Private);

        let start = result.symbols.iter().find(|s| s.name == "Start").unwrap();
        assert_eq!(start.kind, SymbolKind::Method);
        assert_eq!(
            start.metadata.get("receiver").map(String::as_str),
            Some("s *Server")
        );
    }

    #[test]
    fn export_rule_visibility() {
        let result = extract(
            r#"
package main

func Exported() {}
func internal() {}
"#,
        );
        let exported = result.symbols.iter().find(|s| s.name == "Exported").unwrap();
        assert_eq!(exported.visibility, Visibility::Public);
        let internal = result.symbols.iter().find(|s| s.name == "internal").unwrap();
        assert_eq!(internal.visibility, Visibility::Private);
    }

    #[test]
    fn grouped_const_block() {
        let result = extract(
            r#"
package main

const (
	MaxRetries = 3
	Timeout    = 30
)
"#,
        );
        let constants: Vec<_> = result
            .symbols
            .iter()
            .filter(|s| s.kind == SymbolKind::Constant)
            .collect();
        assert_eq!(constants.len(), 2);
        assert_eq!(constants[0].name, "MaxRetries");
        assert_eq!(constants[1].name, "Timeout");
    }

    #[test]
    fn interface_embedding_extends() {
        let result = extract(
            r#"
package main

type Reader interface {
	Read(p []byte) (int, error)
}

type ReadCloser interface {
	Reader
	Close() error
}
"#,
        );
        let reader = result.symbols.iter().find(|s| s.name == "Reader").unwrap();
        assert_eq!(reader.kind, SymbolKind::Interface);

        let read_closer = result
            .symbols
            .iter()
            .find(|s| s.name == "ReadCloser")
            .unwrap();

        let edge = result
            .relationships
            .iter()
            .find(|r| r.kind == RelationshipKind::Extends)
            .expect("extends edge");
        assert_eq!(edge.from, read_closer.id);
        assert_eq!(edge.to, RelationshipTarget::Symbol(reader.id.clone()));
    }

    #[test]
    fn imports_become_symbols_and_external_edges() {
        let result = extract(
            r#"
package main

import (
	"fmt"
	"net/http"
)
"#,
        );
        let imports: Vec<_> = result
            .symbols
            .iter()
            .filter(|s| s.kind == SymbolKind::Import)
            .collect();
        assert_eq!(imports.len(), 2);
        assert_eq!(imports[0].name, "fmt");
        assert_eq!(imports[1].name, "net/http");

        let edges: Vec<_> = result
            .relationships
            .iter()
            .filter(|r| r.kind == RelationshipKind::Imports)
            .collect();
        assert_eq!(edges.len(), 2);
        for edge in edges {
            assert!(matches!(edge.to, RelationshipTarget::External(_)));
        }
    }

    #[test]
    fn call_edges() {
        let result = extract(
            r#"
package main

func helper() {}

func main() {
	helper()
}
"#,
        );
        let main_fn = result.symbols.iter().find(|s| s.name == "main").unwrap();
        let helper = result.symbols.iter().find(|s| s.name == "helper").unwrap();
        let calls: Vec<_> = result
            .relationships
            .iter()
            .filter(|r| r.kind == RelationshipKind::Calls)
            .collect();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].from, main_fn.id);
        assert_eq!(calls[0].to, RelationshipTarget::Symbol(helper.id.clone()));
    }

    #[test]
    fn function_locals_are_skipped() {
        let result = extract(
            r#"
package main

func run() {
	var local = 1
	_ = local
}
"#,
        );
        assert!(result.symbols.iter().all(|s| s.name != "local"));
    }
}
