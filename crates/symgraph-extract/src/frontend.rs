//! The `LanguageFrontend` contract every language front end satisfies.
//!
//! A front end is data plus small pure functions: it maps one tree node to
//! zero or more symbol drafts and never recurses into children — traversal
//! belongs to the [`SymbolTableBuilder`](crate::builder::SymbolTableBuilder).

use std::collections::BTreeMap;

use symgraph_core::{RelationshipKind, Span, SymbolFlags, SymbolKind, SymgraphError, Visibility};
use tree_sitter::Node;

/// A candidate symbol produced by `classify`, before the builder assigns
/// identity, parent, and defaults.
#[derive(Debug, Clone)]
pub struct SymbolDraft {
    pub name: String,
    pub kind: SymbolKind,
    /// Span of this declaration. For grouped declarations each draft carries
    /// the span of its own declarator, not of the whole statement.
    pub span: Span,
    /// Rendered signature; `None` lets the builder fall back to
    /// `LanguageFrontend::signature` on the classified node.
    pub signature: Option<String>,
    /// Explicit visibility; `None` lets the builder consult
    /// `LanguageFrontend::visibility`.
    pub visibility: Option<Visibility>,
    pub documentation: Option<String>,
    /// Base type from explicit inheritance syntax nested in this node.
    /// Sibling-split grammars leave this `None` and rely on the pre-pass.
    pub base_class: Option<String>,
    pub data_type: Option<String>,
    pub flags: SymbolFlags,
    pub metadata: BTreeMap<String, String>,
}

impl SymbolDraft {
    pub fn new(name: impl Into<String>, kind: SymbolKind, span: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            span,
            signature: None,
            visibility: None,
            documentation: None,
            base_class: None,
            data_type: None,
            flags: SymbolFlags::default(),
            metadata: BTreeMap::new(),
        }
    }
}

/// An unresolved reference produced during the resolver's re-walk.
#[derive(Debug, Clone)]
pub struct ReferenceDraft {
    /// Referenced name, possibly qualified (`pkg.Foo`, `mod::foo`).
    pub target: String,
    pub kind: RelationshipKind,
    /// 0-based line of the reference.
    pub line: usize,
    /// Byte offset used to locate the lexically enclosing source symbol.
    pub byte: usize,
    /// How syntactically certain the reference is, in [0, 1].
    pub confidence: f64,
    /// Explicit source symbol name; takes precedence over span enclosure
    /// (used where the source symbol does not enclose the clause, e.g. Rust
    /// `impl Trait for Type`).
    pub from_name: Option<String>,
    /// Keep the edge with an opaque external target when the name does not
    /// resolve locally (import edges).
    pub keep_external: bool,
}

impl ReferenceDraft {
    pub fn new(target: impl Into<String>, kind: RelationshipKind, node: Node, confidence: f64) -> Self {
        Self {
            target: target.into(),
            kind,
            line: node.start_position().row,
            byte: node.start_byte(),
            confidence,
            from_name: None,
            keep_external: false,
        }
    }

    pub fn from_name(mut self, name: impl Into<String>) -> Self {
        self.from_name = Some(name.into());
        self
    }

    pub fn external(mut self) -> Self {
        self.keep_external = true;
        self
    }
}

/// A fact for the association pre-pass, used by grammars that split one
/// declaration across sibling statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssociationFact {
    /// This statement declares the name of the surrounding scope's symbol.
    DeclaresName(String),
    /// This statement declares a base type without naming the subject.
    DeclaresBase(String),
    /// This statement carries both ends (e.g. ES5
    /// `X.prototype = Object.create(Y.prototype)`).
    Pair { name: String, base: String },
}

/// Per-language classification logic.
///
/// Implementations must be pure with respect to global state; all context a
/// classification needs (parent node, preceding siblings) is reachable from
/// the node itself.
pub trait LanguageFrontend: Send + Sync {
    /// Human-readable language name (e.g. "python").
    fn language_name(&self) -> &str;

    /// File extensions this front end handles.
    fn file_extensions(&self) -> &[&str];

    /// Tree-sitter grammar for configuring the parser.
    fn grammar(&self) -> tree_sitter::Language;

    /// Map one node to zero or more symbol drafts, in declaration order.
    /// Grouped declarations (`const A = 1, B = 2`) yield one draft per
    /// declarator. Must not recurse into children. "Not applicable" is
    /// `Ok(vec![])`, never an error.
    fn classify(&self, node: Node, source: &[u8]) -> Result<Vec<SymbolDraft>, SymgraphError>;

    /// Canonical textual form of a declaration. Responsible for reassembling
    /// declarations split across sibling nodes by walking siblings.
    fn signature(&self, node: Node, source: &[u8]) -> String;

    /// Naming-convention or modifier-based visibility inference.
    fn visibility(&self, name: &str, node: Node, source: &[u8]) -> Visibility;

    /// Best-effort literal/annotation-based type inference. Absence is not
    /// an error.
    fn type_hint(&self, _node: Node, _source: &[u8]) -> Option<String> {
        None
    }

    /// Doc comment or docstring attached to a declaration node.
    fn documentation(&self, _node: Node, _source: &[u8]) -> Option<String> {
        None
    }

    /// Association fact for the pre-pass; `None` for languages whose
    /// grammars nest inheritance inside the declaration.
    fn association(&self, _node: Node, _source: &[u8]) -> Option<AssociationFact> {
        None
    }

    /// References (calls, imports, inheritance clauses, attribute access)
    /// found at one node. Non-recursive, like `classify`.
    fn references(&self, _node: Node, _source: &[u8]) -> Vec<ReferenceDraft> {
        Vec::new()
    }
}
