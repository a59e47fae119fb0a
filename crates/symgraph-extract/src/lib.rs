//! symgraph-extract: Multi-language symbol and relationship extraction.
//!
//! Turns tree-sitter syntax trees into a normalized, language-agnostic
//! semantic graph: a flat list of symbols (classes, functions, fields,
//! imports, …) and typed relationships (extends, implements, calls, uses)
//! between them. Downstream consumers — a search index, an embedding
//! pipeline, a file watcher — treat every language identically once this
//! graph exists.
//!
//! # Architecture
//!
//! - **frontend** — The per-language contract: pure node classification,
//!   signature rendering, visibility and type inference
//! - **builder** — The shared pre-order walk: parent threading, grouped
//!   declaration flattening, position dedup, node-boundary error capture
//! - **prepass** — Side-table pass for grammars that split one declaration
//!   across sibling statements
//! - **resolver** — Second pass turning references into typed, scored edges
//! - **fallback** — Regex recovery of declarations from ERROR nodes
//! - **parser** — Extension dispatch and per-file orchestration
//! - **languages** — Front ends: Python, TypeScript/JavaScript, Rust, Go,
//!   Java, C#, Ruby

pub mod builder;
pub mod fallback;
pub mod frontend;
pub mod helpers;
pub mod languages;
pub mod parser;
pub mod prepass;
pub mod resolver;

pub use builder::SymbolTableBuilder;
pub use frontend::{AssociationFact, LanguageFrontend, ReferenceDraft, SymbolDraft};
pub use parser::SourceExtractor;
pub use prepass::AssociationTable;
pub use resolver::RelationshipResolver;
