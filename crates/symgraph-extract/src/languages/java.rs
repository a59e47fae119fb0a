//! Java front end using tree-sitter-java.
//!
//! Visibility, static, final, and abstract all come from the `modifiers`
//! node. A declaration with no access modifier is package-visible and maps
//! to `Protected`.

use symgraph_core::{RelationshipKind, SymbolKind, SymgraphError, Visibility};
use tree_sitter::Node;

use crate::frontend::{LanguageFrontend, ReferenceDraft, SymbolDraft};
use crate::helpers::{first_line, node_text, preceding_comments, span_of, text_before};

/// Java front end.
pub struct JavaFrontend;

impl JavaFrontend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageFrontend for JavaFrontend {
    fn language_name(&self) -> &str {
        "java"
    }

    fn file_extensions(&self) -> &[&str] {
        &["java"]
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_java::LANGUAGE.into()
    }

    fn classify(&self, node: Node, source: &[u8]) -> Result<Vec<SymbolDraft>, SymgraphError> {
        match node.kind() {
            "class_declaration" => Ok(classify_class(node, source)),
            "interface_declaration" => Ok(classify_named(node, source, SymbolKind::Interface)),
            "enum_declaration" => Ok(classify_named(node, source, SymbolKind::Enum)),
            "enum_constant" => Ok(classify_named(node, source, SymbolKind::EnumMember)),
            "method_declaration" => Ok(classify_callable(node, source, SymbolKind::Method)),
            "constructor_declaration" => {
                Ok(classify_callable(node, source, SymbolKind::Constructor))
            }
            "field_declaration" => Ok(classify_fields(node, source)),
            "package_declaration" => Ok(classify_package(node, source)),
            "import_declaration" => Ok(classify_import(node, source)),
            _ => Ok(Vec::new()),
        }
    }

    fn signature(&self, node: Node, source: &[u8]) -> String {
        let sig = text_before(node, source, '{');
        sig.trim_end_matches(';').trim().to_string()
    }

    fn visibility(&self, _name: &str, node: Node, source: &[u8]) -> Visibility {
        if has_modifier(node, source, "public") {
            Visibility::Public
        } else if has_modifier(node, source, "private") {
            Visibility::Private
        } else {
            Visibility::Protected
        }
    }

    fn type_hint(&self, node: Node, source: &[u8]) -> Option<String> {
        let ty = node.child_by_field_name("type")?;
        Some(node_text(ty, source))
    }

    fn documentation(&self, node: Node, source: &[u8]) -> Option<String> {
        preceding_comments(node, source, &["*", "//"])
    }

    fn references(&self, node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
        match node.kind() {
            "method_invocation" => call_reference(node, source).into_iter().collect(),
            "object_creation_expression" => new_reference(node, source).into_iter().collect(),
            "class_declaration" => class_heritage_references(node, source),
            "interface_declaration" => interface_heritage_references(node, source),
            "import_declaration" => import_reference(node, source).into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

// ── Symbol Classification ─────────────────────────────────────────────────

fn classify_named(node: Node, source: &[u8], kind: SymbolKind) -> Vec<SymbolDraft> {
    let Some(name_node) = node.child_by_field_name("name") else {
        return Vec::new();
    };
    let mut draft = SymbolDraft::new(node_text(name_node, source), kind, span_of(node));
    apply_modifier_flags(&mut draft, node, source);
    vec![draft]
}

fn classify_class(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let mut drafts = classify_named(node, source, SymbolKind::Class);
    if let Some(draft) = drafts.first_mut() {
        draft.base_class = superclass_name(node, source);
    }
    drafts
}

fn classify_callable(node: Node, source: &[u8], kind: SymbolKind) -> Vec<SymbolDraft> {
    classify_named(node, source, kind)
}

/// `private int x, y;` flattens into one draft per declarator.
fn classify_fields(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let data_type = node
        .child_by_field_name("type")
        .map(|ty| node_text(ty, source));
    let mut drafts = Vec::new();
    let mut cursor = node.walk();
    for declarator in node.children_by_field_name("declarator", &mut cursor) {
        let Some(name_node) = declarator.child_by_field_name("name") else {
            continue;
        };
        let mut draft = SymbolDraft::new(
            node_text(name_node, source),
            SymbolKind::Field,
            span_of(declarator),
        );
        draft.signature = Some(first_line(&node_text(node, source)).to_string());
        draft.data_type = data_type.clone();
        apply_modifier_flags(&mut draft, node, source);
        drafts.push(draft);
    }
    drafts
}

fn classify_package(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let Some(name) = first_named_path(node, source) else {
        return Vec::new();
    };
    let mut draft = SymbolDraft::new(name, SymbolKind::Namespace, span_of(node));
    draft.visibility = Some(Visibility::Public);
    draft.signature = Some(first_line(&node_text(node, source)).to_string());
    vec![draft]
}

fn classify_import(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let Some(name) = first_named_path(node, source) else {
        return Vec::new();
    };
    let mut draft = SymbolDraft::new(name, SymbolKind::Import, span_of(node));
    draft.visibility = Some(Visibility::Public);
    draft.signature = Some(first_line(&node_text(node, source)).to_string());
    vec![draft]
}

/// The dotted path inside a package or import declaration.
fn first_named_path(node: Node, source: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    let path = node
        .children(&mut cursor)
        .find(|child| child.kind() == "scoped_identifier" || child.kind() == "identifier")?;
    let text = node_text(path, source);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn apply_modifier_flags(draft: &mut SymbolDraft, node: Node, source: &[u8]) {
    draft.flags.is_static = has_modifier(node, source, "static");
    draft.flags.is_final = has_modifier(node, source, "final");
    draft.flags.is_abstract = has_modifier(node, source, "abstract");
}

fn has_modifier(node: Node, source: &[u8], keyword: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .filter(|child| child.kind() == "modifiers")
        .any(|mods| {
            node_text(mods, source)
                .split_whitespace()
                .any(|word| word == keyword)
        });
    found
}

// ── Heritage ──────────────────────────────────────────────────────────────

fn superclass_name(node: Node, source: &[u8]) -> Option<String> {
    let superclass = node.child_by_field_name("superclass")?;
    let mut cursor = superclass.walk();
    let ty = superclass
        .children(&mut cursor)
        .find(|child| child.is_named())?;
    Some(strip_generics(&node_text(ty, source)))
}

fn interface_names(clause: Node, source: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = clause.walk();
    for child in clause.children(&mut cursor) {
        if child.kind() == "type_list" {
            let mut list_cursor = child.walk();
            for ty in child.children(&mut list_cursor).filter(|c| c.is_named()) {
                let name = strip_generics(&node_text(ty, source));
                if !name.is_empty() {
                    names.push(name);
                }
            }
        }
    }
    names
}

fn strip_generics(name: &str) -> String {
    name.split('<').next().unwrap_or(name).trim().to_string()
}

// ── References ────────────────────────────────────────────────────────────

fn call_reference(node: Node, source: &[u8]) -> Option<ReferenceDraft> {
    let name = node.child_by_field_name("name")?;
    let confidence = if node.child_by_field_name("object").is_some() {
        0.75
    } else {
        0.9
    };
    Some(ReferenceDraft::new(
        node_text(name, source),
        RelationshipKind::Calls,
        node,
        confidence,
    ))
}

fn new_reference(node: Node, source: &[u8]) -> Option<ReferenceDraft> {
    let ty = node.child_by_field_name("type")?;
    Some(ReferenceDraft::new(
        strip_generics(&node_text(ty, source)),
        RelationshipKind::Uses,
        node,
        0.85,
    ))
}

fn class_heritage_references(node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
    let Some(name_node) = node.child_by_field_name("name") else {
        return Vec::new();
    };
    let class_name = node_text(name_node, source);

    let mut drafts = Vec::new();
    if let Some(base) = superclass_name(node, source) {
        drafts.push(
            ReferenceDraft::new(base, RelationshipKind::Extends, node, 0.95)
                .from_name(class_name.clone()),
        );
    }
    if let Some(interfaces) = node.child_by_field_name("interfaces") {
        for target in interface_names(interfaces, source) {
            drafts.push(
                ReferenceDraft::new(target, RelationshipKind::Implements, node, 0.95)
                    .from_name(class_name.clone()),
            );
        }
    }
    drafts
}

fn interface_heritage_references(node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
    let Some(name_node) = node.child_by_field_name("name") else {
        return Vec::new();
    };
    let interface_name = node_text(name_node, source);

    let mut drafts = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "extends_interfaces" {
            for target in interface_names(child, source) {
                drafts.push(
                    ReferenceDraft::new(target, RelationshipKind::Extends, node, 0.95)
                        .from_name(interface_name.clone()),
                );
            }
        }
    }
    drafts
}

fn import_reference(node: Node, source: &[u8]) -> Option<ReferenceDraft> {
    let name = first_named_path(node, source)?;
    Some(
        ReferenceDraft::new(name.clone(), RelationshipKind::Imports, node, 1.0)
            .from_name(name)
            .external(),
    )
}
