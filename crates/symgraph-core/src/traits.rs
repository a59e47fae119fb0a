//! Interfaces toward the external collaborators of the extraction core.
//!
//! The core itself has no network, file, or CLI surface; these traits are
//! the contact points the surrounding system (search index, embedding
//! worker pool, file watcher) implements.

use std::path::Path;

use crate::{FileExtraction, Relationship, Symbol, SymbolId, SymgraphError};

/// Search index consuming per-file symbol sets.
///
/// Re-extraction always replaces a file's symbols wholesale; the index is
/// expected to diff old vs. new sets by symbol id.
pub trait SearchIndexSink: Send + Sync {
    /// Replace all symbols previously stored for `file_path`.
    fn upsert_symbols(&mut self, file_path: &str, symbols: &[Symbol])
        -> Result<(), SymgraphError>;

    /// Replace all relationships previously stored for `file_path`.
    fn upsert_relationships(
        &mut self,
        file_path: &str,
        relationships: &[Relationship],
    ) -> Result<(), SymgraphError>;

    /// Drop everything stored for a deleted file.
    fn remove_file(&mut self, file_path: &str) -> Result<(), SymgraphError>;
}

/// Embedding pipeline consuming `(symbol id, code text)` pairs, typically
/// produced by [`FileExtraction::embedding_pairs`].
pub trait EmbeddingSink: Send + Sync {
    fn enqueue(&mut self, pairs: Vec<(SymbolId, String)>) -> Result<(), SymgraphError>;
}

/// Callback surface a file watcher drives.
///
/// `create`/`change` events trigger a fresh whole-file extraction;
/// `delete` events remove the file's symbols. No incremental update exists.
pub trait ChangeHandler: Send + Sync {
    fn file_changed(&mut self, path: &Path) -> Result<Option<FileExtraction>, SymgraphError>;

    fn file_removed(&mut self, path: &Path) -> Result<(), SymgraphError>;
}
