//! C# front end using tree-sitter-c-sharp.
//!
//! A C# base list mixes the base class and implemented interfaces without
//! marking which is which; every entry is emitted as `Extends` and the
//! resolver reclassifies entries whose target resolves to an interface.

use symgraph_core::{RelationshipKind, SymbolKind, SymgraphError, Visibility};
use tree_sitter::Node;

use crate::frontend::{LanguageFrontend, ReferenceDraft, SymbolDraft};
use crate::helpers::{first_line, node_text, preceding_comments, span_of, text_before};

/// C# front end.
pub struct CSharpFrontend;

impl CSharpFrontend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CSharpFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageFrontend for CSharpFrontend {
    fn language_name(&self) -> &str {
        "csharp"
    }

    fn file_extensions(&self) -> &[&str] {
        &["cs"]
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_c_sharp::LANGUAGE.into()
    }

    fn classify(&self, node: Node, source: &[u8]) -> Result<Vec<SymbolDraft>, SymgraphError> {
        match node.kind() {
            "class_declaration" | "struct_declaration" | "record_declaration" => {
                Ok(classify_type(node, source, SymbolKind::Class))
            }
            "interface_declaration" => Ok(classify_type(node, source, SymbolKind::Interface)),
            "enum_declaration" => Ok(classify_named(node, source, SymbolKind::Enum)),
            "enum_member_declaration" => {
                Ok(classify_named(node, source, SymbolKind::EnumMember))
            }
            "method_declaration" => Ok(classify_named(node, source, SymbolKind::Method)),
            "constructor_declaration" => {
                Ok(classify_named(node, source, SymbolKind::Constructor))
            }
            "property_declaration" => Ok(classify_property(node, source)),
            "field_declaration" => Ok(classify_fields(node, source, SymbolKind::Field)),
            "event_field_declaration" => Ok(classify_fields(node, source, SymbolKind::Event)),
            "namespace_declaration" | "file_scoped_namespace_declaration" => {
                Ok(classify_named(node, source, SymbolKind::Namespace))
            }
            "using_directive" => Ok(classify_using(node, source)),
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
        } else if has_modifier(node, source, "protected")
            || has_modifier(node, source, "internal")
        {
            Visibility::Protected
        } else {
            Visibility::Private
        }
    }

    fn type_hint(&self, node: Node, source: &[u8]) -> Option<String> {
        let ty = node.child_by_field_name("type")?;
        Some(node_text(ty, source))
    }

    fn documentation(&self, node: Node, source: &[u8]) -> Option<String> {
        let raw = preceding_comments(node, source, &["///", "//"])?;
        // XML doc markup stays as-is apart from the comment markers.
        Some(raw)
    }

    fn references(&self, node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
        match node.kind() {
            "invocation_expression" => call_reference(node, source).into_iter().collect(),
            "object_creation_expression" => new_reference(node, source).into_iter().collect(),
            "class_declaration" | "struct_declaration" | "record_declaration"
            | "interface_declaration" => base_list_references(node, source),
            "using_directive" => using_reference(node, source).into_iter().collect(),
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
    draft.flags.is_static = has_modifier(node, source, "static");
    draft.flags.is_abstract = has_modifier(node, source, "abstract");
    draft.flags.is_final = has_modifier(node, source, "sealed");
    vec![draft]
}

fn classify_type(node: Node, source: &[u8], kind: SymbolKind) -> Vec<SymbolDraft> {
    let mut drafts = classify_named(node, source, kind);
    if let Some(draft) = drafts.first_mut() {
        draft.base_class = base_names(node, source).into_iter().next();
    }
    drafts
}

fn classify_property(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    classify_named(node, source, SymbolKind::Property)
}

/// `private int x, y;` and `public event Handler Changed;` both nest
/// declarators inside a `variable_declaration`.
fn classify_fields(node: Node, source: &[u8], kind: SymbolKind) -> Vec<SymbolDraft> {
    let mut cursor = node.walk();
    let Some(declaration) = node
        .children(&mut cursor)
        .find(|child| child.kind() == "variable_declaration")
    else {
        return Vec::new();
    };
    let data_type = declaration
        .child_by_field_name("type")
        .map(|ty| node_text(ty, source));

    let mut drafts = Vec::new();
    let mut decl_cursor = declaration.walk();
    for declarator in declaration
        .children(&mut decl_cursor)
        .filter(|child| child.kind() == "variable_declarator")
    {
        let Some(name_node) = declarator.child_by_field_name("name") else {
            continue;
        };
        let mut draft =
            SymbolDraft::new(node_text(name_node, source), kind, span_of(declarator));
        draft.signature = Some(first_line(&node_text(node, source)).to_string());
        draft.data_type = data_type.clone();
        draft.flags.is_static = has_modifier(node, source, "static");
        drafts.push(draft);
    }
    drafts
}

fn classify_using(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let Some(name) = using_path(node, source) else {
        return Vec::new();
    };
    let mut draft = SymbolDraft::new(name, SymbolKind::Import, span_of(node));
    draft.visibility = Some(Visibility::Public);
    draft.signature = Some(first_line(&node_text(node, source)).to_string());
    vec![draft]
}

fn using_path(node: Node, source: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    let path = node.children(&mut cursor).find(|child| {
        matches!(child.kind(), "qualified_name" | "identifier" | "alias_qualified_name")
    })?;
    let text = node_text(path, source);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn has_modifier(node: Node, source: &[u8], keyword: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .filter(|child| child.kind() == "modifier")
        .any(|modifier| node_text(modifier, source) == keyword);
    found
}

fn base_names(node: Node, source: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "base_list" {
            continue;
        }
        let mut list_cursor = child.walk();
        for base in child.children(&mut list_cursor).filter(|c| c.is_named()) {
            let name = node_text(base, source);
            let name = name.split('<').next().unwrap_or(&name).trim().to_string();
            if !name.is_empty() {
                names.push(name);
            }
        }
    }
    names
}

// ── References ────────────────────────────────────────────────────────────

fn call_reference(node: Node, source: &[u8]) -> Option<ReferenceDraft> {
    let function = node.child_by_field_name("function")?;
    let (target, confidence) = match function.kind() {
        "identifier" => (node_text(function, source), 0.9),
        "member_access_expression" => (node_text(function, source), 0.75),
        _ => return None,
    };
    Some(ReferenceDraft::new(
        target,
        RelationshipKind::Calls,
        node,
        confidence,
    ))
}

fn new_reference(node: Node, source: &[u8]) -> Option<ReferenceDraft> {
    let ty = node.child_by_field_name("type")?;
    let name = node_text(ty, source);
    let name = name.split('<').next().unwrap_or(&name).trim().to_string();
    Some(ReferenceDraft::new(
        name,
        RelationshipKind::Uses,
        node,
        0.85,
    ))
}

fn base_list_references(node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
    let Some(name_node) = node.child_by_field_name("name") else {
        return Vec::new();
    };
    let type_name = node_text(name_node, source);
    base_names(node, source)
        .into_iter()
        .map(|base| {
            ReferenceDraft::new(base, RelationshipKind::Extends, node, 0.95)
                .from_name(type_name.clone())
        })
        .collect()
}

fn using_reference(node: Node, source: &[u8]) -> Option<ReferenceDraft> {
    let name = using_path(node, source)?;
    Some(
        ReferenceDraft::new(name.clone(), RelationshipKind::Imports, node, 1.0)
            .from_name(name)
            .external(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SourceExtractor;
    use symgraph_core::{FileExtraction, RelationshipTarget};

    fn extract(source: &str) -> FileExtraction {
        SourceExtractor::new()
            .extract_file("Program.cs", source.as_bytes())
            .expect("csharp should be supported")
    }

    #[test]
    fn class_with_base_and_interface() {
        let result = extract(
            r#"
class Animal {}

interface IPet {}

public class Dog : Animal, IPet {
    public void Bark() {}
}
"#,
        );
        let dog = result
            .symbols
            .iter()
            .find(|s| s.name == "Dog")
            .expect("Dog class");
        assert_eq!(dog.kind, SymbolKind::Class);
        assert_eq!(dog.base_class.as_deref(), Some("Animal"));

        let animal = result.symbols.iter().find(|s| s.name == "Animal").unwrap();
        let pet = result.symbols.iter().find(|s| s.name == "IPet").unwrap();
        // Both base entries start as Extends; the interface one is flipped.
        assert!(result.relationships.iter().any(|r| {
            r.kind == RelationshipKind::Extends
                && r.from == dog.id
                && r.to == RelationshipTarget::Symbol(animal.id.clone())
        }));
        assert!(result.relationships.iter().any(|r| {
            r.kind == RelationshipKind::Implements
                && r.from == dog.id
                && r.to == RelationshipTarget::Symbol(pet.id.clone())
        }));
    }

    #[test]
    fn properties_fields_and_events() {
        let result = extract(
            r#"
public class Account {
    private decimal balance, reserved;

    public string Owner { get; set; }

    public event System.Action Changed;
}
"#,
        );
        let fields: Vec<_> = result
            .symbols
            .iter()
            .filter(|s| s.kind == SymbolKind::Field)
            .collect();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "balance");
        assert_eq!(fields[0].visibility, Visibility::Private);
        assert_eq!(fields[0].data_type.as_deref(), Some("decimal"));

        let owner = result
            .symbols
            .iter()
            .find(|s| s.kind == SymbolKind::Property)
            .expect("property");
        assert_eq!(owner.name, "Owner");
        assert_eq!(owner.data_type.as_deref(), Some("string"));

        let changed = result
            .symbols
            .iter()
            .find(|s| s.kind == SymbolKind::Event)
            .expect("event");
        assert_eq!(changed.name, "Changed");
    }

    #[test]
    fn enum_members() {
        let result = extract(
            r#"
public enum Level {
    Low,
    High,
}
"#,
        );
        let level = result
            .symbols
            .iter()
            .find(|s| s.kind == SymbolKind::Enum)
            .unwrap();
        let members: Vec<_> = result
            .symbols
            .iter()
            .filter(|s| s.kind == SymbolKind::EnumMember)
            .collect();
        assert_eq!(members.len(), 2);
        for member in members {
            assert_eq!(member.parent_id.as_ref(), Some(&level.id));
        }
    }

    #[test]
    fn namespace_and_using() {
        let result = extract(
            r#"
using System.Collections.Generic;

namespace App.Core {
    class Engine {}
}
"#,
        );
        let namespace = result
            .symbols
            .iter()
            .find(|s| s.kind == SymbolKind::Namespace)
            .expect("namespace");
        assert_eq!(namespace.name, "App.Core");

        let engine = result.symbols.iter().find(|s| s.name == "Engine").unwrap();
        assert_eq!(engine.parent_id.as_ref(), Some(&namespace.id));

        let import = result
            .symbols
            .iter()
            .find(|s| s.kind == SymbolKind::Import)
            .expect("using symbol");
        assert_eq!(import.name, "System.Collections.Generic");

        let edge = result
            .relationships
            .iter()
            .find(|r| r.kind == RelationshipKind::Imports)
            .expect("import edge");
        assert_eq!(
            edge.to,
            RelationshipTarget::External("System.Collections.Generic".to_string())
        );
    }

    #[test]
    fn static_and_abstract_modifiers() {
        let result = extract(
            r#"
public abstract class Job {
    public static int Count;

    public abstract void Run();
}
"#,
        );
        let job = result.symbols.iter().find(|s| s.name == "Job").unwrap();
        assert!(job.flags.is_abstract);
        let count = result.symbols.iter().find(|s| s.name == "Count").unwrap();
        assert!(count.flags.is_static);
    }

    #[test]
    fn invocation_edges() {
        let result = extract(
            r#"
class Runner {
    void Step() {}

    void Run() {
        Step();
    }
}
"#,
        );
        let run = result.symbols.iter().find(|s| s.name == "Run").unwrap();
        let step = result.symbols.iter().find(|s| s.name == "Step").unwrap();
        assert!(result.relationships.iter().any(|r| {
            r.kind == RelationshipKind::Calls
                && r.from == run.id
                && r.to == RelationshipTarget::Symbol(step.id.clone())
        }));
    }
}
