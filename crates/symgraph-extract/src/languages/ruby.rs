//! Ruby front end using tree-sitter-ruby.
//!
//! Ruby has no visibility syntax on the declaration itself (`private` is a
//! runtime method call), so visibility falls back to the leading-underscore
//! naming convention. `attr_accessor` and friends expand into one Property
//! draft per symbol argument.

use symgraph_core::{RelationshipKind, SymbolKind, SymgraphError, Visibility};
use tree_sitter::Node;

use crate::frontend::{LanguageFrontend, ReferenceDraft, SymbolDraft};
use crate::helpers::{
    first_line, nearest_ancestor, node_text, preceding_comments, span_of, text_before,
    underscore_visibility,
};

/// Ruby front end.
pub struct RubyFrontend;

impl RubyFrontend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RubyFrontend {
    fn default() -> Self {
        Self::new()
    }
}

const ATTR_METHODS: &[&str] = &["attr_accessor", "attr_reader", "attr_writer"];
const REQUIRE_METHODS: &[&str] = &["require", "require_relative"];

impl LanguageFrontend for RubyFrontend {
    fn language_name(&self) -> &str {
        "ruby"
    }

    fn file_extensions(&self) -> &[&str] {
        &["rb"]
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_ruby::LANGUAGE.into()
    }

    fn classify(&self, node: Node, source: &[u8]) -> Result<Vec<SymbolDraft>, SymgraphError> {
        match node.kind() {
            "class" => Ok(classify_class(node, source)),
            "module" => Ok(classify_named(node, source, SymbolKind::Module)),
            "method" => Ok(classify_named(node, source, SymbolKind::Method)),
            "singleton_method" => Ok(classify_singleton_method(node, source)),
            "assignment" => Ok(classify_constant(node, source)),
            "call" => Ok(classify_call(node, source)),
            _ => Ok(Vec::new()),
        }
    }

    fn signature(&self, node: Node, source: &[u8]) -> String {
        text_before(node, source, '\n')
    }

    fn visibility(&self, name: &str, _node: Node, _source: &[u8]) -> Visibility {
        underscore_visibility(name)
    }

    fn documentation(&self, node: Node, source: &[u8]) -> Option<String> {
        preceding_comments(node, source, &["#"])
    }

    fn references(&self, node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
        match node.kind() {
            "class" => superclass_reference(node, source).into_iter().collect(),
            "call" => call_references(node, source),
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

fn classify_class(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let mut drafts = classify_named(node, source, SymbolKind::Class);
    if let Some(draft) = drafts.first_mut() {
        draft.base_class = superclass_name(node, source);
    }
    drafts
}

/// `def self.build` defines a class-level method.
fn classify_singleton_method(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let mut drafts = classify_named(node, source, SymbolKind::Method);
    if let Some(draft) = drafts.first_mut() {
        draft.flags.is_static = true;
    }
    drafts
}

/// `NAME = value` with a constant left-hand side, outside method bodies.
fn classify_constant(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    if nearest_ancestor(node, &["method", "singleton_method", "block", "do_block"]).is_some() {
        return Vec::new();
    }
    let Some(left) = node.child_by_field_name("left") else {
        return Vec::new();
    };
    if left.kind() != "constant" {
        return Vec::new();
    }
    let mut draft = SymbolDraft::new(
        node_text(left, source),
        SymbolKind::Constant,
        span_of(node),
    );
    draft.signature = Some(first_line(&node_text(node, source)).to_string());
    vec![draft]
}

/// Declaration-like calls: `attr_accessor :a, :b` and `require "json"`.
fn classify_call(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let Some(method) = node.child_by_field_name("method") else {
        return Vec::new();
    };
    if node.child_by_field_name("receiver").is_some() {
        return Vec::new();
    }
    let method_name = node_text(method, source);

    if ATTR_METHODS.contains(&method_name.as_str()) {
        return attr_drafts(node, source);
    }
    if REQUIRE_METHODS.contains(&method_name.as_str()) {
        if let Some(module) = require_target(node, source) {
            let mut draft = SymbolDraft::new(module, SymbolKind::Import, span_of(node));
            draft.signature = Some(first_line(&node_text(node, source)).to_string());
            draft.visibility = Some(Visibility::Public);
            return vec![draft];
        }
    }
    Vec::new()
}

fn attr_drafts(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let Some(arguments) = node.child_by_field_name("arguments") else {
        return Vec::new();
    };
    let mut cursor = arguments.walk();
    arguments
        .children(&mut cursor)
        .filter(|child| child.kind() == "simple_symbol")
        .map(|symbol| {
            let name = node_text(symbol, source)
                .trim_start_matches(':')
                .to_string();
            let mut draft = SymbolDraft::new(name, SymbolKind::Property, span_of(symbol));
            draft.signature = Some(first_line(&node_text(node, source)).to_string());
            draft
        })
        .collect()
}

fn require_target(node: Node, source: &[u8]) -> Option<String> {
    let arguments = node.child_by_field_name("arguments")?;
    let mut cursor = arguments.walk();
    let string = arguments
        .children(&mut cursor)
        .find(|child| child.kind() == "string")?;
    let module = node_text(string, source)
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();
    if module.is_empty() {
        None
    } else {
        Some(module)
    }
}

fn superclass_name(node: Node, source: &[u8]) -> Option<String> {
    let superclass = node.child_by_field_name("superclass")?;
    let mut cursor = superclass.walk();
    let target = superclass
        .children(&mut cursor)
        .find(|child| child.is_named())?;
    Some(node_text(target, source))
}

// ── References ────────────────────────────────────────────────────────────

fn superclass_reference(node: Node, source: &[u8]) -> Option<ReferenceDraft> {
    let name_node = node.child_by_field_name("name")?;
    let base = superclass_name(node, source)?;
    Some(
        ReferenceDraft::new(base, RelationshipKind::Extends, node, 0.95)
            .from_name(node_text(name_node, source)),
    )
}

fn call_references(node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
    let Some(method) = node.child_by_field_name("method") else {
        return Vec::new();
    };
    let method_name = node_text(method, source);

    if node.child_by_field_name("receiver").is_none() {
        if ATTR_METHODS.contains(&method_name.as_str()) {
            return Vec::new();
        }
        if REQUIRE_METHODS.contains(&method_name.as_str()) {
            return require_target(node, source)
                .map(|module| {
                    vec![
                        ReferenceDraft::new(
                            module.clone(),
                            RelationshipKind::Imports,
                            node,
                            1.0,
                        )
                        .from_name(module)
                        .external(),
                    ]
                })
                .unwrap_or_default();
        }
        return vec![ReferenceDraft::new(
            method_name,
            RelationshipKind::Calls,
            node,
            0.9,
        )];
    }

    // Receiver present: the target method is known, the receiver type is not.
    vec![ReferenceDraft::new(
        method_name,
        RelationshipKind::Calls,
        node,
        0.75,
    )]
}
