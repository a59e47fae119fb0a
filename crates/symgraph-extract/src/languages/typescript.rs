//! TypeScript/JavaScript front end using tree-sitter-typescript.
//!
//! Uses the TSX grammar (a superset of TypeScript, which itself covers
//! JavaScript) so `.ts`, `.tsx`, `.js`, and `.jsx` files share one front
//! end. Also carries the association pre-pass for ES5 prototype
//! inheritance, where "declare constructor" and "declare base" are separate
//! sibling statements.

use symgraph_core::{RelationshipKind, SymbolKind, SymgraphError, Visibility};
use tree_sitter::Node;

use crate::frontend::{AssociationFact, LanguageFrontend, ReferenceDraft, SymbolDraft};
use crate::helpers::{first_line, node_text, preceding_comments, span_of, text_before};

/// TypeScript/JavaScript front end.
pub struct TypeScriptFrontend;

impl TypeScriptFrontend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TypeScriptFrontend {
    fn default() -> Self {
        Self::new()
    }
}

const FUNCTION_SCOPES: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "method_definition",
    "arrow_function",
    "function_expression",
];

impl LanguageFrontend for TypeScriptFrontend {
    fn language_name(&self) -> &str {
        "typescript"
    }

    fn file_extensions(&self) -> &[&str] {
        &["ts", "tsx", "js", "jsx"]
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_typescript::LANGUAGE_TSX.into()
    }

    fn classify(&self, node: Node, source: &[u8]) -> Result<Vec<SymbolDraft>, SymgraphError> {
        match node.kind() {
            "class_declaration" | "abstract_class_declaration" => {
                Ok(classify_class(node, source))
            }
            "interface_declaration" => Ok(classify_named(node, source, SymbolKind::Interface)),
            "enum_declaration" => Ok(classify_named(node, source, SymbolKind::Enum)),
            "enum_assignment" => Ok(classify_enum_member(node, source)),
            "property_identifier" if parent_kind(node) == Some("enum_body") => {
                Ok(vec![SymbolDraft::new(
                    node_text(node, source),
                    SymbolKind::EnumMember,
                    span_of(node),
                )])
            }
            "function_declaration" | "generator_function_declaration" => {
                Ok(classify_function(node, source))
            }
            "method_definition" => Ok(classify_method(node, source)),
            "public_field_definition" => Ok(classify_field(node, source)),
            "lexical_declaration" | "variable_declaration" => {
                Ok(classify_variable_statement(node, source))
            }
            "type_alias_declaration" => Ok(classify_named(node, source, SymbolKind::Type)),
            "internal_module" => Ok(classify_named(node, source, SymbolKind::Namespace)),
            "import_statement" => Ok(classify_import(node, source)),
            "export_statement" => Ok(classify_export_clause(node, source)),
            _ => Ok(Vec::new()),
        }
    }

    fn signature(&self, node: Node, source: &[u8]) -> String {
        text_before(node, source, '{')
    }

    fn visibility(&self, name: &str, node: Node, _source: &[u8]) -> Visibility {
        if name.starts_with('#') {
            return Visibility::Private;
        }
        match accessibility_modifier(node).as_deref() {
            Some("private") => Visibility::Private,
            Some("protected") => Visibility::Protected,
            _ => Visibility::Public,
        }
    }

    fn type_hint(&self, node: Node, source: &[u8]) -> Option<String> {
        let annotation = node.child_by_field_name("type")?;
        Some(
            node_text(annotation, source)
                .trim_start_matches(':')
                .trim()
                .to_string(),
        )
    }

    fn documentation(&self, node: Node, source: &[u8]) -> Option<String> {
        // Comments for exported declarations sit before the export statement.
        let doc_node = match node.parent() {
            Some(parent) if parent.kind() == "export_statement" => parent,
            _ => node,
        };
        preceding_comments(doc_node, source, &["///", "//", "*"])
    }

    fn association(&self, node: Node, source: &[u8]) -> Option<AssociationFact> {
        let expr = if node.kind() == "expression_statement" {
            node.child(0)?
        } else {
            node
        };
        match expr.kind() {
            "assignment_expression" => prototype_assignment(expr, source),
            "call_expression" => inherits_call(expr, source),
            _ => None,
        }
    }

    fn references(&self, node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
        match node.kind() {
            "call_expression" => call_reference(node, source).into_iter().collect(),
            "new_expression" => new_reference(node, source).into_iter().collect(),
            "member_expression" => member_reference(node, source).into_iter().collect(),
            "class_declaration" | "abstract_class_declaration" => {
                heritage_references(node, source)
            }
            "interface_declaration" => interface_extends_references(node, source),
            "import_statement" => import_reference(node, source).into_iter().collect(),
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
        draft.base_class = heritage_targets(node, source, "extends_clause")
            .into_iter()
            .next();
        draft.flags.is_abstract = node.kind() == "abstract_class_declaration";
    }
    drafts
}

fn classify_enum_member(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let Some(name_node) = node.child_by_field_name("name") else {
        return Vec::new();
    };
    let mut draft = SymbolDraft::new(
        node_text(name_node, source),
        SymbolKind::EnumMember,
        span_of(node),
    );
    draft.signature = Some(first_line(&node_text(node, source)).to_string());
    vec![draft]
}

fn classify_function(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let mut drafts = classify_named(node, source, SymbolKind::Function);
    if let Some(draft) = drafts.first_mut() {
        draft.flags.is_async = has_leading_keyword(node, "async");
        draft.data_type = return_type(node, source);
    }
    drafts
}

fn classify_method(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let Some(name_node) = node.child_by_field_name("name") else {
        return Vec::new();
    };
    let name = node_text(name_node, source);

    let kind = if name == "constructor" {
        SymbolKind::Constructor
    } else if has_leading_keyword(node, "get") || has_leading_keyword(node, "set") {
        SymbolKind::Property
    } else {
        SymbolKind::Method
    };

    let mut draft = SymbolDraft::new(name, kind, span_of(node));
    draft.flags.is_static = has_leading_keyword(node, "static");
    draft.flags.is_async = has_leading_keyword(node, "async");
    draft.data_type = return_type(node, source);
    vec![draft]
}

fn classify_field(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let Some(name_node) = node.child_by_field_name("name") else {
        return Vec::new();
    };
    let mut draft = SymbolDraft::new(
        node_text(name_node, source),
        SymbolKind::Field,
        span_of(node),
    );
    draft.signature = Some(first_line(&node_text(node, source)).to_string());
    draft.flags.is_static = has_leading_keyword(node, "static");
    vec![draft]
}

/// `const A = 1, B = 2` flattens into one draft per declarator, all sharing
/// the statement's parent. Declarators initialized with function values
/// become `Function` symbols.
fn classify_variable_statement(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    // Locals inside function bodies are not indexed declarations.
    if crate::helpers::nearest_ancestor(node, FUNCTION_SCOPES).is_some() {
        return Vec::new();
    }
    let is_const = node
        .child(0)
        .is_some_and(|first| first.kind() == "const");

    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| child.kind() == "variable_declarator")
        .filter_map(|declarator| {
            let name_node = declarator.child_by_field_name("name")?;
            if name_node.kind() != "identifier" {
                return None;
            }
            let value_kind = declarator
                .child_by_field_name("value")
                .map(|value| value.kind());
            let kind = match value_kind {
                Some("arrow_function") | Some("function_expression") => SymbolKind::Function,
                _ if is_const => SymbolKind::Constant,
                _ => SymbolKind::Variable,
            };
            let mut draft =
                SymbolDraft::new(node_text(name_node, source), kind, span_of(declarator));
            draft.signature = Some(first_line(&node_text(declarator, source)).to_string());
            if kind == SymbolKind::Function {
                draft.flags.is_async = declarator
                    .child_by_field_name("value")
                    .is_some_and(|value| has_leading_keyword(value, "async"));
            }
            Some(draft)
        })
        .collect()
}

fn classify_import(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let Some(module) = import_module(node, source) else {
        return Vec::new();
    };
    let mut draft = SymbolDraft::new(module, SymbolKind::Import, span_of(node));
    draft.signature = Some(first_line(&node_text(node, source)).to_string());
    draft.visibility = Some(Visibility::Public);
    vec![draft]
}

/// Bare re-export lists: `export { a, b }`.
fn classify_export_clause(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let mut cursor = node.walk();
    let Some(clause) = node
        .children(&mut cursor)
        .find(|child| child.kind() == "export_clause")
    else {
        return Vec::new();
    };
    let mut clause_cursor = clause.walk();
    clause
        .children(&mut clause_cursor)
        .filter(|child| child.kind() == "export_specifier")
        .filter_map(|specifier| {
            let name_node = specifier.child_by_field_name("name")?;
            Some(SymbolDraft::new(
                node_text(name_node, source),
                SymbolKind::Export,
                span_of(specifier),
            ))
        })
        .collect()
}

// ── ES5 Prototype Association ─────────────────────────────────────────────

/// `X.prototype = Object.create(Y.prototype)` or `X.prototype = new Y()`.
fn prototype_assignment(node: Node, source: &[u8]) -> Option<AssociationFact> {
    let left = node.child_by_field_name("left")?;
    if left.kind() != "member_expression" {
        return None;
    }
    let property = left.child_by_field_name("property")?;
    if node_text(property, source) != "prototype" {
        return None;
    }
    let object = left.child_by_field_name("object")?;
    if object.kind() != "identifier" {
        return None;
    }
    let name = node_text(object, source);

    let right = node.child_by_field_name("right")?;
    let base = match right.kind() {
        "call_expression" => {
            let function = right.child_by_field_name("function")?;
            if node_text(function, source) != "Object.create" {
                return None;
            }
            first_argument_base(right, source)?
        }
        "new_expression" => {
            let constructor = right.child_by_field_name("constructor")?;
            node_text(constructor, source)
        }
        _ => return None,
    };
    Some(AssociationFact::Pair { name, base })
}

/// `util.inherits(X, Y)` or `Object.setPrototypeOf(X.prototype, Y.prototype)`.
fn inherits_call(node: Node, source: &[u8]) -> Option<AssociationFact> {
    let function = node.child_by_field_name("function")?;
    let callee = node_text(function, source);
    let arguments = node.child_by_field_name("arguments")?;

    let mut cursor = arguments.walk();
    let args: Vec<Node> = arguments
        .children(&mut cursor)
        .filter(|child| child.is_named())
        .collect();
    if args.len() != 2 {
        return None;
    }

    match callee.as_str() {
        "util.inherits" | "inherits" => Some(AssociationFact::Pair {
            name: node_text(args[0], source),
            base: node_text(args[1], source),
        }),
        "Object.setPrototypeOf" => {
            let name = prototype_owner(args[0], source)?;
            let base = prototype_owner(args[1], source)?;
            Some(AssociationFact::Pair { name, base })
        }
        _ => None,
    }
}

/// The `Y` in `Y.prototype`.
fn prototype_owner(node: Node, source: &[u8]) -> Option<String> {
    if node.kind() != "member_expression" {
        return None;
    }
    let property = node.child_by_field_name("property")?;
    if node_text(property, source) != "prototype" {
        return None;
    }
    let object = node.child_by_field_name("object")?;
    Some(node_text(object, source))
}

fn first_argument_base(call: Node, source: &[u8]) -> Option<String> {
    let arguments = call.child_by_field_name("arguments")?;
    let mut cursor = arguments.walk();
    let first = arguments
        .children(&mut cursor)
        .find(|child| child.is_named())?;
    prototype_owner(first, source).or_else(|| {
        if first.kind() == "identifier" {
            Some(node_text(first, source))
        } else {
            None
        }
    })
}

// ── References ────────────────────────────────────────────────────────────

fn call_reference(node: Node, source: &[u8]) -> Option<ReferenceDraft> {
    let function = node.child_by_field_name("function")?;
    let (target, confidence) = match function.kind() {
        "identifier" => (node_text(function, source), 0.9),
        "member_expression" => (node_text(function, source), 0.75),
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
    let constructor = node.child_by_field_name("constructor")?;
    if constructor.kind() != "identifier" {
        return None;
    }
    Some(ReferenceDraft::new(
        node_text(constructor, source),
        RelationshipKind::Uses,
        node,
        0.85,
    ))
}

/// `obj.prop` marks a use of `obj`. Only the innermost link of a chain has
/// an identifier object, so `a.b.c` emits once.
fn member_reference(node: Node, source: &[u8]) -> Option<ReferenceDraft> {
    let object = node.child_by_field_name("object")?;
    if object.kind() != "identifier" {
        return None;
    }
    Some(ReferenceDraft::new(
        node_text(object, source),
        RelationshipKind::Uses,
        node,
        0.8,
    ))
}

fn heritage_references(node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
    let Some(name_node) = node.child_by_field_name("name") else {
        return Vec::new();
    };
    let class_name = node_text(name_node, source);

    let mut drafts = Vec::new();
    for target in heritage_targets(node, source, "extends_clause") {
        drafts.push(
            ReferenceDraft::new(target, RelationshipKind::Extends, node, 0.95)
                .from_name(class_name.clone()),
        );
    }
    for target in heritage_targets(node, source, "implements_clause") {
        drafts.push(
            ReferenceDraft::new(target, RelationshipKind::Implements, node, 0.95)
                .from_name(class_name.clone()),
        );
    }
    drafts
}

fn interface_extends_references(node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
    let Some(name_node) = node.child_by_field_name("name") else {
        return Vec::new();
    };
    let interface_name = node_text(name_node, source);
    heritage_targets(node, source, "extends_type_clause")
        .into_iter()
        .map(|target| {
            ReferenceDraft::new(target, RelationshipKind::Extends, node, 0.95)
                .from_name(interface_name.clone())
        })
        .collect()
}

fn import_reference(node: Node, source: &[u8]) -> Option<ReferenceDraft> {
    let module = import_module(node, source)?;
    Some(
        ReferenceDraft::new(module.clone(), RelationshipKind::Imports, node, 1.0)
            .from_name(module)
            .external(),
    )
}

// ── Helpers ───────────────────────────────────────────────────────────────

fn parent_kind(node: Node) -> Option<&'static str> {
    node.parent().map(|parent| parent.kind())
}

/// Identifier targets inside a heritage clause of the given kind.
fn heritage_targets(node: Node, source: &[u8], clause_kind: &str) -> Vec<String> {
    let mut targets = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let clauses: Vec<Node> = if child.kind() == "class_heritage" {
            let mut heritage_cursor = child.walk();
            child.children(&mut heritage_cursor).collect()
        } else {
            vec![child]
        };
        for clause in clauses {
            if clause.kind() != clause_kind {
                continue;
            }
            let mut clause_cursor = clause.walk();
            for part in clause.children(&mut clause_cursor) {
                match part.kind() {
                    "identifier" | "member_expression" | "type_identifier" | "generic_type" => {
                        let text = node_text(part, source);
                        let base = text.split('<').next().unwrap_or(&text).trim().to_string();
                        if !base.is_empty() {
                            targets.push(base);
                        }
                    }
                    _ => {}
                }
            }
        }
    }
    targets
}

fn import_module(node: Node, source: &[u8]) -> Option<String> {
    let source_node = node.child_by_field_name("source")?;
    let raw = node_text(source_node, source);
    let module = raw.trim_matches(|c| c == '"' || c == '\'' || c == '`');
    if module.is_empty() {
        None
    } else {
        Some(module.to_string())
    }
}

/// Whether a keyword token (`async`, `static`, `get`, …) precedes the name.
fn has_leading_keyword(node: Node, keyword: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .take_while(|child| child.kind() != "property_identifier" && child.kind() != "identifier")
        .any(|child| child.kind() == keyword);
    found
}

fn return_type(node: Node, source: &[u8]) -> Option<String> {
    let annotation = node.child_by_field_name("return_type")?;
    Some(
        node_text(annotation, source)
            .trim_start_matches(':')
            .trim()
            .to_string(),
    )
}

fn accessibility_modifier(node: Node) -> Option<String> {
    let mut cursor = node.walk();
    let modifier = node
        .children(&mut cursor)
        .find(|child| child.kind() == "accessibility_modifier")?;
    // The modifier node's text is one of public/private/protected; its first
    // child token carries the keyword kind.
    Some(modifier.child(0).map_or_else(
        || modifier.kind().to_string(),
        |token| token.kind().to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SourceExtractor;
    use symgraph_core::{FileExtraction, RelationshipTarget};

    fn extract(source: &str) -> FileExtraction {
        SourceExtractor::new()
            .extract_file("test.ts", source.as_bytes())
            .expect("typescript should be supported")
    }

    fn extract_js(source: &str) -> FileExtraction {
        SourceExtractor::new()
            .extract_file("test.js", source.as_bytes())
            .expect("javascript should be supported")
    }

    #[test]
    fn class_with_method_and_extends_edge() {
        let result = extract(
            r#"
class Bar {}

class Foo extends Bar {
    baz() {}
}
"#,
        );
        let foo = result
            .symbols
            .iter()
            .find(|s| s.name == "Foo" && s.kind == SymbolKind::Class)
            .expect("Foo class");
        assert_eq!(foo.base_class.as_deref(), Some("Bar"));

        let baz = result.symbols.iter().find(|s| s.name == "baz").expect("baz");
        assert_eq!(baz.kind, SymbolKind::Method);
        assert_eq!(baz.parent_id.as_ref(), Some(&foo.id));

        let bar = result.symbols.iter().find(|s| s.name == "Bar").unwrap();
        let extends: Vec<_> = result
            .relationships
            .iter()
            .filter(|r| r.kind == RelationshipKind::Extends)
            .collect();
        assert_eq!(extends.len(), 1);
        assert_eq!(extends[0].from, foo.id);
        assert_eq!(extends[0].to, RelationshipTarget::Symbol(bar.id.clone()));
    }

    #[test]
    fn extends_on_undeclared_base_yields_no_edge() {
        let result = extract("class Foo extends Missing {}\n");
        assert!(result
            .relationships
            .iter()
            .all(|r| r.kind != RelationshipKind::Extends));
    }

    #[test]
    fn implements_clause_targets_interface() {
        let result = extract(
            r#"
interface Runnable {
    run(): void;
}

class Task implements Runnable {
    run(): void {}
}
"#,
        );
        let implements: Vec<_> = result
            .relationships
            .iter()
            .filter(|r| r.kind == RelationshipKind::Implements)
            .collect();
        assert_eq!(implements.len(), 1);
    }

    #[test]
    fn extends_flips_to_implements_on_interface_target() {
        // `extends` against an interface resolves as implementation.
        let result = extract(
            r#"
interface Base {}

class Impl extends Base {}
"#,
        );
        let edge = result
            .relationships
            .iter()
            .find(|r| matches!(r.to, RelationshipTarget::Symbol(_)))
            .expect("resolved heritage edge");
        assert_eq!(edge.kind, RelationshipKind::Implements);
    }

    #[test]
    fn interface_extending_interface_stays_extends() {
        let result = extract(
            r#"
interface Shape {}

interface Polygon extends Shape {}
"#,
        );
        let shape = result.symbols.iter().find(|s| s.name == "Shape").unwrap();
        let polygon = result.symbols.iter().find(|s| s.name == "Polygon").unwrap();
        assert!(result.relationships.iter().any(|r| {
            r.kind == RelationshipKind::Extends
                && r.from == polygon.id
                && r.to == RelationshipTarget::Symbol(shape.id.clone())
        }));
    }

    #[test]
    fn grouped_const_declaration_yields_two_constants() {
        let result = extract("const A = 1, B = 2;\n");
        let constants: Vec<_> = result
            .symbols
            .iter()
            .filter(|s| s.kind == SymbolKind::Constant)
            .collect();
        assert_eq!(constants.len(), 2);
        assert_eq!(constants[0].name, "A");
        assert_eq!(constants[1].name, "B");
        assert_eq!(constants[0].parent_id, constants[1].parent_id);
        assert!(constants[0].span.start_byte < constants[1].span.start_byte);
    }

    #[test]
    fn arrow_function_const_is_a_function() {
        let result = extract("const handler = async (req: Request) => req;\n");
        let handler = result.symbols.iter().find(|s| s.name == "handler").unwrap();
        assert_eq!(handler.kind, SymbolKind::Function);
        assert!(handler.flags.is_async);
    }

    #[test]
    fn prototype_assignment_upgrades_constructor_function() {
        let result = extract_js(
            r#"
function Animal() {}

function Dog() {}
Dog.prototype = Object.create(Animal.prototype);
"#,
        );
        let dog = result.symbols.iter().find(|s| s.name == "Dog").expect("Dog");
        assert_eq!(dog.kind, SymbolKind::Class);
        assert_eq!(dog.base_class.as_deref(), Some("Animal"));
    }

    #[test]
    fn util_inherits_associates_base() {
        let result = extract_js(
            r#"
util.inherits(Duck, Bird);
function Duck() {}
function Bird() {}
"#,
        );
        let duck = result.symbols.iter().find(|s| s.name == "Duck").expect("Duck");
        assert_eq!(duck.kind, SymbolKind::Class);
        assert_eq!(duck.base_class.as_deref(), Some("Bird"));
    }

    #[test]
    fn interface_and_enum_members() {
        let result = extract(
            r#"
enum Color {
    Red,
    Green = 2,
}
"#,
        );
        let color = result
            .symbols
            .iter()
            .find(|s| s.kind == SymbolKind::Enum)
            .expect("enum");
        let members: Vec<_> = result
            .symbols
            .iter()
            .filter(|s| s.kind == SymbolKind::EnumMember)
            .collect();
        assert_eq!(members.len(), 2);
        for member in members {
            assert_eq!(member.parent_id.as_ref(), Some(&color.id));
        }
    }

    #[test]
    fn private_modifier_and_hash_names() {
        let result = extract(
            r#"
class Vault {
    private combination: string;
    #pin = "0000";
    protected hint: string;
}
"#,
        );
        let combination = result
            .symbols
            .iter()
            .find(|s| s.name == "combination")
            .unwrap();
        assert_eq!(combination.visibility, Visibility::Private);
        let pin = result.symbols.iter().find(|s| s.name == "#pin").unwrap();
        assert_eq!(pin.visibility, Visibility::Private);
        let hint = result.symbols.iter().find(|s| s.name == "hint").unwrap();
        assert_eq!(hint.visibility, Visibility::Protected);
    }

    #[test]
    fn imports_and_type_alias() {
        let result = extract(
            r#"
import { readFile } from "fs";

type Callback = (err: Error) => void;
"#,
        );
        let import = result
            .symbols
            .iter()
            .find(|s| s.kind == SymbolKind::Import)
            .expect("import symbol");
        assert_eq!(import.name, "fs");

        let edge = result
            .relationships
            .iter()
            .find(|r| r.kind == RelationshipKind::Imports)
            .expect("import edge");
        assert_eq!(edge.to, RelationshipTarget::External("fs".to_string()));

        assert!(result
            .symbols
            .iter()
            .any(|s| s.name == "Callback" && s.kind == SymbolKind::Type));
    }

    #[test]
    fn call_edges_resolve_to_functions() {
        let result = extract(
            r#"
function helper() {}

function caller() {
    helper();
}
"#,
        );
        let caller = result.symbols.iter().find(|s| s.name == "caller").unwrap();
        let helper = result.symbols.iter().find(|s| s.name == "helper").unwrap();
        let calls: Vec<_> = result
            .relationships
            .iter()
            .filter(|r| r.kind == RelationshipKind::Calls)
            .collect();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].from, caller.id);
        assert_eq!(calls[0].to, RelationshipTarget::Symbol(helper.id.clone()));
    }

    #[test]
    fn locals_inside_functions_are_skipped() {
        let result = extract(
            r#"
function outer() {
    const local = 1;
    return local;
}
"#,
        );
        assert!(result.symbols.iter().all(|s| s.name != "local"));
    }
}
