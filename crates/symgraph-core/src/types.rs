use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use crate::SymgraphError;

// ── Positions ───────────────────────────────────────────────────────────────

/// Source range of a symbol or reference.
///
/// Lines and columns are 0-based, matching tree-sitter points. Byte offsets
/// are used for containment checks and for slicing symbol text out of the
/// original source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub start_byte: usize,
    pub end_byte: usize,
}

impl Span {
    /// Whether `other` lies entirely inside this span (inclusive bounds).
    pub fn contains(&self, other: &Span) -> bool {
        self.start_byte <= other.start_byte && other.end_byte <= self.end_byte
    }

    /// Whether a byte offset falls inside this span.
    pub fn contains_byte(&self, byte: usize) -> bool {
        self.start_byte <= byte && byte < self.end_byte.max(self.start_byte + 1)
    }

    /// Byte length of the span.
    pub fn len(&self) -> usize {
        self.end_byte.saturating_sub(self.start_byte)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Symbol Identity ─────────────────────────────────────────────────────────

/// Stable identifier for a symbol.
///
/// Derived from `(file path, name, kind, start position)` only, so repeated
/// extraction of byte-identical input yields identical ids regardless of
/// traversal order. Downstream indexes diff old/new symbol sets by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(String);

impl SymbolId {
    /// Derive the id for a symbol declared at `span` in `file_path`.
    pub fn derive(file_path: &str, name: &str, kind: SymbolKind, span: &Span) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(file_path.as_bytes());
        hasher.update([0]);
        hasher.update(name.as_bytes());
        hasher.update([0]);
        hasher.update(kind.to_string().as_bytes());
        hasher.update([0]);
        hasher.update(format!("{}:{}", span.start_line, span.start_column).as_bytes());
        let digest = hasher.finalize();
        let mut hex = String::with_capacity(32);
        for byte in &digest[..16] {
            hex.push_str(&format!("{byte:02x}"));
        }
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Symbol Kinds ────────────────────────────────────────────────────────────

/// The kind of an extracted symbol. Closed enumeration shared by all
/// language front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Class,
    Interface,
    Enum,
    EnumMember,
    Function,
    Method,
    Constructor,
    Field,
    Property,
    Variable,
    Constant,
    Event,
    Module,
    Namespace,
    Import,
    Export,
    Type,
}

impl SymbolKind {
    /// Kinds that can serve as the target of an `Extends` edge.
    pub fn is_type_like(&self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Enum | Self::Type
        )
    }

    /// Kinds that can serve as a call target.
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Function | Self::Method | Self::Constructor)
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Interface => write!(f, "interface"),
            Self::Enum => write!(f, "enum"),
            Self::EnumMember => write!(f, "enum_member"),
            Self::Function => write!(f, "function"),
            Self::Method => write!(f, "method"),
            Self::Constructor => write!(f, "constructor"),
            Self::Field => write!(f, "field"),
            Self::Property => write!(f, "property"),
            Self::Variable => write!(f, "variable"),
            Self::Constant => write!(f, "constant"),
            Self::Event => write!(f, "event"),
            Self::Module => write!(f, "module"),
            Self::Namespace => write!(f, "namespace"),
            Self::Import => write!(f, "import"),
            Self::Export => write!(f, "export"),
            Self::Type => write!(f, "type"),
        }
    }
}

impl std::str::FromStr for SymbolKind {
    type Err = SymgraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "class" => Ok(Self::Class),
            "interface" => Ok(Self::Interface),
            "enum" => Ok(Self::Enum),
            "enum_member" => Ok(Self::EnumMember),
            "function" => Ok(Self::Function),
            "method" => Ok(Self::Method),
            "constructor" => Ok(Self::Constructor),
            "field" => Ok(Self::Field),
            "property" => Ok(Self::Property),
            "variable" => Ok(Self::Variable),
            "constant" => Ok(Self::Constant),
            "event" => Ok(Self::Event),
            "module" => Ok(Self::Module),
            "namespace" => Ok(Self::Namespace),
            "import" => Ok(Self::Import),
            "export" => Ok(Self::Export),
            "type" => Ok(Self::Type),
            _ => Err(SymgraphError::InvalidSymbolKind(s.to_string())),
        }
    }
}

// ── Visibility ──────────────────────────────────────────────────────────────

/// Visibility of a symbol. Never left ambiguous: languages without a privacy
/// concept default to `Public`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Private => write!(f, "private"),
            Self::Protected => write!(f, "protected"),
        }
    }
}

impl std::str::FromStr for Visibility {
    type Err = SymgraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "protected" => Ok(Self::Protected),
            _ => Err(SymgraphError::InvalidVisibility(s.to_string())),
        }
    }
}

// ── Symbol Flags ────────────────────────────────────────────────────────────

/// Closed attribute record for cross-language symbol facts.
///
/// Front-end-specific facts that do not need cross-language handling go in
/// `Symbol::metadata` instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolFlags {
    pub is_async: bool,
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    /// Set when the symbol was recovered from an ERROR node by the text
    /// fallback path; consumers should rank these lower.
    pub from_fallback: bool,
}

// ── Symbols ─────────────────────────────────────────────────────────────────

/// A declaration extracted from source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    /// Deterministic id derived from (file, name, kind, start position).
    pub id: SymbolId,
    /// Declared identifier; synthetic for anonymous constructs
    /// (e.g. `<lambda:12>`).
    pub name: String,
    pub kind: SymbolKind,
    /// Language-faithful rendering of the declaration, truncated for very
    /// long literals.
    pub signature: String,
    /// File path where the symbol is declared.
    pub file_path: String,
    pub span: Span,
    /// Immediately enclosing symbol, or `None` for file-level symbols.
    pub parent_id: Option<SymbolId>,
    pub visibility: Visibility,
    /// Doc comment or docstring, if any.
    pub documentation: Option<String>,
    /// Base type recorded by explicit inheritance syntax or by the
    /// association pre-pass.
    pub base_class: Option<String>,
    /// Best-effort inferred type, when the language exposes one.
    pub data_type: Option<String>,
    pub flags: SymbolFlags,
    /// Residual language-specific facts (receiver types, decorators, …).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

// ── Relationships ───────────────────────────────────────────────────────────

/// The kind of a relationship between symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    Extends,
    Implements,
    Uses,
    Calls,
    Imports,
    References,
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extends => write!(f, "extends"),
            Self::Implements => write!(f, "implements"),
            Self::Uses => write!(f, "uses"),
            Self::Calls => write!(f, "calls"),
            Self::Imports => write!(f, "imports"),
            Self::References => write!(f, "references"),
        }
    }
}

impl std::str::FromStr for RelationshipKind {
    type Err = SymgraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extends" => Ok(Self::Extends),
            "implements" => Ok(Self::Implements),
            "uses" => Ok(Self::Uses),
            "calls" => Ok(Self::Calls),
            "imports" => Ok(Self::Imports),
            "references" => Ok(Self::References),
            _ => Err(SymgraphError::InvalidRelationshipKind(s.to_string())),
        }
    }
}

/// Target end of a relationship: either a symbol from the same extraction
/// pass or an opaque external reference (module path, file, URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipTarget {
    Symbol(SymbolId),
    External(String),
}

/// A directed, typed edge between two symbols.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// Source symbol; always from the same extraction pass.
    pub from: SymbolId,
    pub to: RelationshipTarget,
    pub kind: RelationshipKind,
    /// 0-based line where the reference occurs.
    pub line: usize,
    /// How syntactically certain the match is, in [0, 1].
    pub confidence: f64,
}

// ── Per-File Output ─────────────────────────────────────────────────────────

/// Result of extracting one file: the flat symbol list and the resolved
/// relationships. Created fresh per extraction call and immutable afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileExtraction {
    pub file_path: String,
    pub language: String,
    pub symbols: Vec<Symbol>,
    pub relationships: Vec<Relationship>,
}

impl FileExtraction {
    /// An extraction that produced nothing (missing or unparsable root).
    pub fn empty(file_path: &str, language: &str) -> Self {
        Self {
            file_path: file_path.to_string(),
            language: language.to_string(),
            symbols: Vec::new(),
            relationships: Vec::new(),
        }
    }

    /// `(symbol id, code text)` pairs for the embedding pipeline, sliced
    /// from the original source by span.
    pub fn embedding_pairs(&self, source: &[u8]) -> Vec<(SymbolId, String)> {
        self.symbols
            .iter()
            .filter_map(|sym| {
                let start = sym.span.start_byte.min(source.len());
                let end = sym.span.end_byte.min(source.len());
                if start >= end {
                    return None;
                }
                let text = String::from_utf8_lossy(&source[start..end]).into_owned();
                Some((sym.id.clone(), text))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start_line: usize, start_byte: usize, end_byte: usize) -> Span {
        Span {
            start_line,
            start_column: 0,
            end_line: start_line,
            end_column: 0,
            start_byte,
            end_byte,
        }
    }

    #[test]
    fn symbol_kind_roundtrip() {
        for kind in [
            SymbolKind::Class,
            SymbolKind::Interface,
            SymbolKind::Enum,
            SymbolKind::EnumMember,
            SymbolKind::Function,
            SymbolKind::Method,
            SymbolKind::Constructor,
            SymbolKind::Field,
            SymbolKind::Property,
            SymbolKind::Variable,
            SymbolKind::Constant,
            SymbolKind::Event,
            SymbolKind::Module,
            SymbolKind::Namespace,
            SymbolKind::Import,
            SymbolKind::Export,
            SymbolKind::Type,
        ] {
            let s = kind.to_string();
            let parsed: SymbolKind = s.parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn relationship_kind_roundtrip() {
        for kind in [
            RelationshipKind::Extends,
            RelationshipKind::Implements,
            RelationshipKind::Uses,
            RelationshipKind::Calls,
            RelationshipKind::Imports,
            RelationshipKind::References,
        ] {
            let s = kind.to_string();
            let parsed: RelationshipKind = s.parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn visibility_roundtrip() {
        for vis in [Visibility::Public, Visibility::Private, Visibility::Protected] {
            let parsed: Visibility = vis.to_string().parse().unwrap();
            assert_eq!(vis, parsed);
        }
    }

    #[test]
    fn invalid_kind_is_an_error() {
        let parsed = "gizmo".parse::<SymbolKind>();
        assert!(parsed.is_err());
    }

    #[test]
    fn symbol_id_is_deterministic() {
        let sp = span(3, 40, 90);
        let a = SymbolId::derive("src/a.py", "Foo", SymbolKind::Class, &sp);
        let b = SymbolId::derive("src/a.py", "Foo", SymbolKind::Class, &sp);
        assert_eq!(a, b);
    }

    #[test]
    fn symbol_id_varies_with_inputs() {
        let sp = span(3, 40, 90);
        let base = SymbolId::derive("src/a.py", "Foo", SymbolKind::Class, &sp);
        assert_ne!(
            base,
            SymbolId::derive("src/b.py", "Foo", SymbolKind::Class, &sp)
        );
        assert_ne!(
            base,
            SymbolId::derive("src/a.py", "Bar", SymbolKind::Class, &sp)
        );
        assert_ne!(
            base,
            SymbolId::derive("src/a.py", "Foo", SymbolKind::Function, &sp)
        );
        let other = span(4, 40, 90);
        assert_ne!(
            base,
            SymbolId::derive("src/a.py", "Foo", SymbolKind::Class, &other)
        );
    }

    #[test]
    fn symbol_id_ignores_end_position() {
        let a = span(3, 40, 90);
        let b = span(3, 40, 120);
        assert_eq!(
            SymbolId::derive("f", "x", SymbolKind::Function, &a),
            SymbolId::derive("f", "x", SymbolKind::Function, &b)
        );
    }

    #[test]
    fn span_containment() {
        let outer = span(0, 0, 100);
        let inner = span(1, 10, 50);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.contains(&outer));
    }

    #[test]
    fn embedding_pairs_slice_source() {
        let source = b"def foo():\n    pass\n";
        let sp = span(0, 0, 19);
        let sym = Symbol {
            id: SymbolId::derive("t.py", "foo", SymbolKind::Function, &sp),
            name: "foo".to_string(),
            kind: SymbolKind::Function,
            signature: "def foo()".to_string(),
            file_path: "t.py".to_string(),
            span: sp,
            parent_id: None,
            visibility: Visibility::Public,
            documentation: None,
            base_class: None,
            data_type: None,
            flags: SymbolFlags::default(),
            metadata: BTreeMap::new(),
        };
        let extraction = FileExtraction {
            file_path: "t.py".to_string(),
            language: "python".to_string(),
            symbols: vec![sym],
            relationships: Vec::new(),
        };
        let pairs = extraction.embedding_pairs(source);
        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].1.starts_with("def foo()"));
    }

    #[test]
    fn symbol_serializes_without_empty_metadata() {
        let sp = span(0, 0, 5);
        let sym = Symbol {
            id: SymbolId::derive("t.rs", "x", SymbolKind::Constant, &sp),
            name: "x".to_string(),
            kind: SymbolKind::Constant,
            signature: "const x".to_string(),
            file_path: "t.rs".to_string(),
            span: sp,
            parent_id: None,
            visibility: Visibility::Private,
            documentation: None,
            base_class: None,
            data_type: None,
            flags: SymbolFlags::default(),
            metadata: BTreeMap::new(),
        };
        let json = serde_json::to_string(&sym).unwrap();
        assert!(!json.contains("\"metadata\""));
        let parsed: Symbol = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.kind, SymbolKind::Constant);
    }
}
