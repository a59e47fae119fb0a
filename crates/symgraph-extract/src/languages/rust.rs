//! Rust front end using tree-sitter-rust.
//!
//! Rust has no class inheritance; `impl Trait for Type` blocks become
//! `Implements` edges sourced from the type by name, since the impl block
//! does not lexically enclose the type's declaration.

use symgraph_core::{RelationshipKind, SymbolKind, SymgraphError, Visibility};
use tree_sitter::Node;

use crate::frontend::{LanguageFrontend, ReferenceDraft, SymbolDraft};
use crate::helpers::{
    first_line, nearest_ancestor, node_text, preceding_comments, span_of, text_before,
};

/// Rust front end.
pub struct RustFrontend;

impl RustFrontend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageFrontend for RustFrontend {
    fn language_name(&self) -> &str {
        "rust"
    }

    fn file_extensions(&self) -> &[&str] {
        &["rs"]
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_rust::LANGUAGE.into()
    }

    fn classify(&self, node: Node, source: &[u8]) -> Result<Vec<SymbolDraft>, SymgraphError> {
        match node.kind() {
            // Bodyless trait methods parse as signature items.
            "function_item" | "function_signature_item" => Ok(classify_function(node, source)),
            "struct_item" => Ok(classify_named(node, source, SymbolKind::Class)),
            "trait_item" => Ok(classify_named(node, source, SymbolKind::Interface)),
            "enum_item" => Ok(classify_named(node, source, SymbolKind::Enum)),
            "enum_variant" => Ok(classify_named(node, source, SymbolKind::EnumMember)),
            "const_item" | "static_item" => Ok(classify_constant(node, source)),
            "mod_item" => Ok(classify_named(node, source, SymbolKind::Module)),
            "type_item" => Ok(classify_named(node, source, SymbolKind::Type)),
            "field_declaration" => Ok(classify_field(node, source)),
            "use_declaration" => Ok(classify_use(node, source)),
            _ => Ok(Vec::new()),
        }
    }

    fn signature(&self, node: Node, source: &[u8]) -> String {
        let sig = text_before(node, source, '{');
        sig.trim_end_matches(';').trim().to_string()
    }

    fn visibility(&self, _name: &str, node: Node, source: &[u8]) -> Visibility {
        let mut cursor = node.walk();
        let modifier = node
            .children(&mut cursor)
            .find(|child| child.kind() == "visibility_modifier");
        match modifier {
            Some(vis) => {
                let text = node_text(vis, source);
                if text == "pub" {
                    Visibility::Public
                } else {
                    // pub(crate), pub(super), pub(in path)
                    Visibility::Protected
                }
            }
            None => Visibility::Private,
        }
    }

    fn type_hint(&self, node: Node, source: &[u8]) -> Option<String> {
        match node.kind() {
            "function_item" => {
                let ret = node.child_by_field_name("return_type")?;
                Some(node_text(ret, source))
            }
            _ => {
                let ty = node.child_by_field_name("type")?;
                Some(node_text(ty, source))
            }
        }
    }

    fn documentation(&self, node: Node, source: &[u8]) -> Option<String> {
        preceding_comments(node, source, &["///", "//"])
    }

    fn references(&self, node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
        match node.kind() {
            "call_expression" => call_reference(node, source).into_iter().collect(),
            "impl_item" => impl_references(node, source),
            "use_declaration" => use_reference(node, source).into_iter().collect(),
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

fn classify_function(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let kind = if nearest_ancestor(node, &["impl_item", "trait_item"]).is_some() {
        SymbolKind::Method
    } else {
        SymbolKind::Function
    };
    let mut drafts = classify_named(node, source, kind);
    if let Some(draft) = drafts.first_mut() {
        draft.flags.is_async = has_modifier(node, source, "async");
    }
    drafts
}

fn classify_constant(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    // Function-local consts are not indexed declarations.
    if nearest_ancestor(node, &["function_item"]).is_some() {
        return Vec::new();
    }
    classify_named(node, source, SymbolKind::Constant)
}

fn classify_field(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let mut drafts = classify_named(node, source, SymbolKind::Field);
    if let Some(draft) = drafts.first_mut() {
        draft.signature = Some(first_line(&node_text(node, source)).to_string());
    }
    drafts
}

/// `use std::collections::HashMap;` becomes one `Import` symbol named by
/// the full path.
fn classify_use(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let Some(argument) = node.child_by_field_name("argument") else {
        return Vec::new();
    };
    let path = node_text(argument, source);
    if path.is_empty() {
        return Vec::new();
    }
    let mut draft = SymbolDraft::new(path, SymbolKind::Import, span_of(node));
    draft.signature = Some(first_line(&node_text(node, source)).to_string());
    vec![draft]
}

fn has_modifier(node: Node, source: &[u8], keyword: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .filter(|child| child.kind() == "function_modifiers")
        .any(|mods| {
            node_text(mods, source)
                .split_whitespace()
                .any(|word| word == keyword)
        });
    found
}

// ── References ────────────────────────────────────────────────────────────

fn call_reference(node: Node, source: &[u8]) -> Option<ReferenceDraft> {
    let function = node.child_by_field_name("function")?;
    let (target, confidence) = match function.kind() {
        "identifier" => (node_text(function, source), 0.9),
        "scoped_identifier" => (node_text(function, source), 0.9),
        // Method call syntax; the receiver type is unknown here.
        "field_expression" => {
            let field = function.child_by_field_name("field")?;
            (node_text(field, source), 0.75)
        }
        _ => return None,
    };
    Some(ReferenceDraft::new(
        target,
        RelationshipKind::Calls,
        node,
        confidence,
    ))
}

/// `impl Trait for Type` yields `Type --Implements--> Trait`, sourced by
/// name since the type's declaration is elsewhere in the file.
fn impl_references(node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
    let Some(trait_node) = node.child_by_field_name("trait") else {
        return Vec::new();
    };
    let Some(type_node) = node.child_by_field_name("type") else {
        return Vec::new();
    };
    let trait_name = strip_generics(&node_text(trait_node, source));
    let type_name = strip_generics(&node_text(type_node, source));
    if trait_name.is_empty() || type_name.is_empty() {
        return Vec::new();
    }
    vec![
        ReferenceDraft::new(trait_name, RelationshipKind::Implements, node, 0.95)
            .from_name(type_name),
    ]
}

fn use_reference(node: Node, source: &[u8]) -> Option<ReferenceDraft> {
    let argument = node.child_by_field_name("argument")?;
    let path = node_text(argument, source);
    if path.is_empty() {
        return None;
    }
    Some(
        ReferenceDraft::new(path.clone(), RelationshipKind::Imports, node, 1.0)
            .from_name(path)
            .external(),
    )
}

fn strip_generics(name: &str) -> String {
    name.split('<').next().unwrap_or(name).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SourceExtractor;
    use symgraph_core::{FileExtraction, RelationshipTarget};

    fn extract(source: &str) -> FileExtraction {
        SourceExtractor::new()
            .extract_file("lib.rs", source.as_bytes())
            .expect("rust should be supported")
    }

    #[test]
    fn struct_with_fields() {
        let result = extract(
            r#"
pub struct Config {
    pub path: String,
    limit: usize,
}
"#,
        );
        let config = result
            .symbols
            .iter()
            .find(|s| s.name == "Config")
            .expect("struct");
        assert_eq!(config.kind, SymbolKind::Class);
        assert_eq!(config.visibility, Visibility::Public);

        let path = result.symbols.iter().find(|s| s.name == "path").unwrap();
        assert_eq!(path.kind, SymbolKind::Field);
        assert_eq!(path.parent_id.as_ref(), Some(&config.id));
        assert_eq!(path.data_type.as_deref(), Some("String"));

        let limit = result.symbols.iter().find(|s| s.name == "limit").unwrap();
        assert_eq!(limit.visibility, Visibility::Private);
    }

    #[test]
    fn visibility_modifiers() {
        let result = extract(
            r#"
pub fn open() {}
pub(crate) fn internal() {}
fn hidden() {}
"#,
        );
        let vis = |name: &str| {
            result
                .symbols
                .iter()
                .find(|s| s.name == name)
                .unwrap()
                .visibility
        };
        assert_eq!(vis("open"), Visibility::Public);
        assert_eq!(vis("internal"), Visibility::Protected);
        assert_eq!(vis("hidden"), Visibility::Private);
    }

    #[test]
    fn trait_impl_becomes_implements_edge() {
        let result = extract(
            r#"
pub trait Storage {
    fn put(&mut self, key: &str);
}

pub struct MemStorage;

impl Storage for MemStorage {
    fn put(&mut self, key: &str) {}
}
"#,
        );
        let storage = result.symbols.iter().find(|s| s.name == "Storage").unwrap();
        assert_eq!(storage.kind, SymbolKind::Interface);

        let mem = result
            .symbols
            .iter()
            .find(|s| s.name == "MemStorage")
            .unwrap();

        let edge = result
            .relationships
            .iter()
            .find(|r| r.kind == RelationshipKind::Implements)
            .expect("implements edge");
        assert_eq!(edge.from, mem.id);
        assert_eq!(edge.to, RelationshipTarget::Symbol(storage.id.clone()));
    }

    #[test]
    fn methods_in_impl_blocks() {
        let result = extract(
            r#"
struct Counter;

impl Counter {
    pub fn increment(&mut self) {}
}
"#,
        );
        let increment = result
            .symbols
            .iter()
            .find(|s| s.name == "increment")
            .unwrap();
        assert_eq!(increment.kind, SymbolKind::Method);
    }

    #[test]
    fn enum_with_variants() {
        let result = extract(
            r#"
pub enum Direction {
    North,
    South,
}
"#,
        );
        let direction = result
            .symbols
            .iter()
            .find(|s| s.kind == SymbolKind::Enum)
            .unwrap();
        let variants: Vec<_> = result
            .symbols
            .iter()
            .filter(|s| s.kind == SymbolKind::EnumMember)
            .collect();
        assert_eq!(variants.len(), 2);
        for variant in variants {
            assert_eq!(variant.parent_id.as_ref(), Some(&direction.id));
        }
    }

    #[test]
    fn use_declaration_yields_import_and_external_edge() {
        let result = extract("use std::collections::HashMap;\n");
        let import = result
            .symbols
            .iter()
            .find(|s| s.kind == SymbolKind::Import)
            .expect("import symbol");
        assert_eq!(import.name, "std::collections::HashMap");

        let edge = result
            .relationships
            .iter()
            .find(|r| r.kind == RelationshipKind::Imports)
            .expect("import edge");
        assert_eq!(edge.from, import.id);
        assert_eq!(
            edge.to,
            RelationshipTarget::External("std::collections::HashMap".to_string())
        );
    }

    #[test]
    fn doc_comments_are_captured() {
        let result = extract(
            r#"
/// Parses raw input.
/// Returns the normalized form.
pub fn parse() {}
"#,
        );
        let parse = result.symbols.iter().find(|s| s.name == "parse").unwrap();
        assert_eq!(
            parse.documentation.as_deref(),
            Some("Parses raw input.\nReturns the normalized form.")
        );
    }

    #[test]
    fn function_local_consts_are_skipped() {
        let result = extract(
            r#"
fn compute() {
    const LOCAL: usize = 8;
}
"#,
        );
        assert!(result.symbols.iter().all(|s| s.name != "LOCAL"));
    }

    #[test]
    fn async_flag() {
        let result = extract("pub async fn fetch() {}\n");
        let fetch = result.symbols.iter().find(|s| s.name == "fetch").unwrap();
        assert!(fetch.flags.is_async);
    }
}
