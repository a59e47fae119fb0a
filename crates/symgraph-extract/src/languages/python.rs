//! Python front end using tree-sitter-python.

use symgraph_core::{RelationshipKind, SymbolKind, SymgraphError, Visibility};
use tree_sitter::Node;

use crate::frontend::{LanguageFrontend, ReferenceDraft, SymbolDraft};
use crate::helpers::{
    first_line, is_upper_snake, nearest_ancestor, node_text, span_of, text_before,
    underscore_visibility,
};

/// Python front end.
pub struct PythonFrontend;

impl PythonFrontend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PythonFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageFrontend for PythonFrontend {
    fn language_name(&self) -> &str {
        "python"
    }

    fn file_extensions(&self) -> &[&str] {
        &["py"]
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_python::LANGUAGE.into()
    }

    fn classify(&self, node: Node, source: &[u8]) -> Result<Vec<SymbolDraft>, SymgraphError> {
        match node.kind() {
            "function_definition" => Ok(classify_function(node, source)),
            "class_definition" => Ok(classify_class(node, source)),
            "expression_statement" => Ok(classify_assignment(node, source)),
            "import_statement" | "import_from_statement" => Ok(classify_import(node, source)),
            _ => Ok(Vec::new()),
        }
    }

    fn signature(&self, node: Node, source: &[u8]) -> String {
        match node.kind() {
            "function_definition" | "class_definition" => text_before(node, source, ':'),
            _ => first_line(&node_text(node, source)).to_string(),
        }
    }

    fn visibility(&self, name: &str, _node: Node, _source: &[u8]) -> Visibility {
        underscore_visibility(name)
    }

    fn type_hint(&self, node: Node, source: &[u8]) -> Option<String> {
        match node.kind() {
            // def f(...) -> T:
            "function_definition" => node
                .child_by_field_name("return_type")
                .map(|n| node_text(n, source)),
            _ => None,
        }
    }

    fn documentation(&self, node: Node, source: &[u8]) -> Option<String> {
        extract_docstring(node, source)
    }

    fn references(&self, node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
        match node.kind() {
            "call" => call_reference(node, source).into_iter().collect(),
            "attribute" => attribute_reference(node, source).into_iter().collect(),
            "class_definition" => base_references(node, source),
            "import_statement" | "import_from_statement" => import_references(node, source),
            _ => Vec::new(),
        }
    }
}

// ── Symbol Classification ─────────────────────────────────────────────────

fn classify_function(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let Some(name_node) = node.child_by_field_name("name") else {
        return Vec::new();
    };
    let name = node_text(name_node, source);

    let in_class = matches!(
        nearest_ancestor(node, &["class_definition", "function_definition"]),
        Some(ancestor) if ancestor.kind() == "class_definition"
    );

    let mut kind = if !in_class {
        SymbolKind::Function
    } else if name == "__init__" {
        SymbolKind::Constructor
    } else {
        SymbolKind::Method
    };

    let mut draft = SymbolDraft::new(name, kind, span_of(node));
    for decorator in decorators(node, source) {
        match decorator.as_str() {
            "staticmethod" | "classmethod" => draft.flags.is_static = true,
            "property" if in_class => {
                kind = SymbolKind::Property;
                draft.kind = kind;
            }
            "abstractmethod" => draft.flags.is_abstract = true,
            _ => {}
        }
    }
    if node
        .child(0)
        .is_some_and(|first| first.kind() == "async")
    {
        draft.flags.is_async = true;
    }
    vec![draft]
}

fn classify_class(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let Some(name_node) = node.child_by_field_name("name") else {
        return Vec::new();
    };
    let mut draft = SymbolDraft::new(
        node_text(name_node, source),
        SymbolKind::Class,
        span_of(node),
    );
    draft.base_class = first_superclass(node, source);
    vec![draft]
}

/// Module-level `UPPER_CASE = …` assignments become constants; class-body
/// assignments become fields. Tuple targets (`A, B = 1, 2`) flatten into one
/// draft per name, in declaration order.
fn classify_assignment(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    let Some(assignment) = node.child(0).filter(|c| c.kind() == "assignment") else {
        return Vec::new();
    };
    let Some(left) = assignment.child_by_field_name("left") else {
        return Vec::new();
    };

    let scope = nearest_ancestor(node, &["class_definition", "function_definition"]);
    let in_class = matches!(&scope, Some(ancestor) if ancestor.kind() == "class_definition");
    // Assignments local to a function body are not declarations.
    if matches!(&scope, Some(ancestor) if ancestor.kind() == "function_definition") {
        return Vec::new();
    }

    let signature = first_line(&node_text(assignment, source)).to_string();
    let annotation = assignment
        .child_by_field_name("type")
        .map(|n| node_text(n, source));

    let mut targets: Vec<Node> = Vec::new();
    match left.kind() {
        "identifier" => targets.push(left),
        "pattern_list" | "tuple_pattern" => {
            let mut cursor = left.walk();
            targets.extend(
                left.children(&mut cursor)
                    .filter(|c| c.kind() == "identifier"),
            );
        }
        _ => return Vec::new(),
    }

    targets
        .into_iter()
        .filter_map(|target| {
            let name = node_text(target, source);
            let kind = if in_class {
                SymbolKind::Field
            } else if is_upper_snake(&name) {
                SymbolKind::Constant
            } else {
                return None;
            };
            let mut draft = SymbolDraft::new(name, kind, span_of(target));
            draft.signature = Some(signature.clone());
            draft.data_type = annotation.clone();
            Some(draft)
        })
        .collect()
}

fn classify_import(node: Node, source: &[u8]) -> Vec<SymbolDraft> {
    imported_modules(node, source)
        .into_iter()
        .map(|(name, module_node)| {
            let mut draft = SymbolDraft::new(name, SymbolKind::Import, span_of(module_node));
            draft.signature = Some(first_line(&node_text(node, source)).to_string());
            draft.visibility = Some(Visibility::Public);
            draft
        })
        .collect()
}

// ── References ────────────────────────────────────────────────────────────

fn call_reference(node: Node, source: &[u8]) -> Option<ReferenceDraft> {
    let function = node.child_by_field_name("function")?;
    let (target, confidence) = match function.kind() {
        "identifier" => (node_text(function, source), 0.9),
        // Attribute calls resolve on the final segment only.
        "attribute" => (node_text(function, source), 0.75),
        _ => return None,
    };
    Some(ReferenceDraft::new(
        target,
        RelationshipKind::Calls,
        node,
        confidence,
    ))
}

/// `obj.attr` marks a use of `obj`. Only the innermost link of a chain has
/// an identifier object, so `a.b.c` emits once.
fn attribute_reference(node: Node, source: &[u8]) -> Option<ReferenceDraft> {
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

fn base_references(node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
    let Some(name_node) = node.child_by_field_name("name") else {
        return Vec::new();
    };
    let class_name = node_text(name_node, source);

    let Some(superclasses) = node.child_by_field_name("superclasses") else {
        return Vec::new();
    };
    let mut cursor = superclasses.walk();
    superclasses
        .children(&mut cursor)
        .filter(|child| matches!(child.kind(), "identifier" | "attribute"))
        .map(|child| {
            ReferenceDraft::new(
                node_text(child, source),
                RelationshipKind::Extends,
                child,
                0.95,
            )
            .from_name(class_name.clone())
        })
        .collect()
}

fn import_references(node: Node, source: &[u8]) -> Vec<ReferenceDraft> {
    imported_modules(node, source)
        .into_iter()
        .map(|(name, module_node)| {
            ReferenceDraft::new(name.clone(), RelationshipKind::Imports, module_node, 1.0)
                .from_name(name)
                .external()
        })
        .collect()
}

// ── Helpers ───────────────────────────────────────────────────────────────

/// Module names introduced by an import statement.
///
/// `import a, b` yields both; `from m import x, y` yields only `m`, which is
/// what the file actually depends on.
fn imported_modules<'a>(node: Node<'a>, source: &[u8]) -> Vec<(String, Node<'a>)> {
    if node.kind() == "import_from_statement" {
        return node
            .child_by_field_name("module_name")
            .map(|module| vec![(node_text(module, source), module)])
            .unwrap_or_default();
    }

    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter_map(|child| match child.kind() {
            "dotted_name" => Some((node_text(child, source), child)),
            "aliased_import" => child
                .child_by_field_name("name")
                .map(|name| (node_text(name, source), child)),
            _ => None,
        })
        .collect()
}

fn first_superclass(node: Node, source: &[u8]) -> Option<String> {
    let superclasses = node.child_by_field_name("superclasses")?;
    let mut cursor = superclasses.walk();
    let base = superclasses
        .children(&mut cursor)
        .find(|child| matches!(child.kind(), "identifier" | "attribute"))
        .map(|child| node_text(child, source));
    base
}

/// Decorator names attached through a `decorated_definition` wrapper.
fn decorators(node: Node, source: &[u8]) -> Vec<String> {
    let Some(parent) = node.parent().filter(|p| p.kind() == "decorated_definition") else {
        return Vec::new();
    };
    let mut cursor = parent.walk();
    parent
        .children(&mut cursor)
        .filter(|child| child.kind() == "decorator")
        .map(|decorator| {
            node_text(decorator, source)
                .trim_start_matches('@')
                .split('(')
                .next()
                .unwrap_or("")
                .trim()
                .to_string()
        })
        .collect()
}

/// Python docstrings: first statement in the body that is a string literal.
fn extract_docstring(node: Node, source: &[u8]) -> Option<String> {
    if !matches!(node.kind(), "function_definition" | "class_definition") {
        return None;
    }
    let body = node.child_by_field_name("body")?;
    let first_stmt = body.child(0)?;
    if first_stmt.kind() != "expression_statement" {
        return None;
    }
    let expr = first_stmt.child(0)?;
    if expr.kind() != "string" {
        return None;
    }

    let raw = node_text(expr, source);
    let stripped = raw
        .trim_start_matches("\"\"\"")
        .trim_start_matches("'''")
        .trim_end_matches("\"\"\"")
        .trim_end_matches("'''")
        .trim();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}
