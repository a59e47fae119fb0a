//! Extraction coordinator.
//!
//! Detects the language from the file extension, parses with the matching
//! tree-sitter grammar, and runs the builder and resolver. Extraction of one
//! file is synchronous and keeps all state call-scoped, so an external
//! worker pool may run many extractions concurrently without locks.

use std::path::Path;

use symgraph_core::{ExtractConfig, FileExtraction};
use tree_sitter::Parser;

use crate::builder::SymbolTableBuilder;
use crate::frontend::LanguageFrontend;
use crate::languages;
use crate::resolver::RelationshipResolver;

/// Coordinates extraction across all registered language front ends.
pub struct SourceExtractor {
    frontends: Vec<Box<dyn LanguageFrontend>>,
    config: ExtractConfig,
}

impl SourceExtractor {
    /// Extractor with every registered front end and default configuration.
    pub fn new() -> Self {
        Self::with_config(ExtractConfig::default())
    }

    pub fn with_config(config: ExtractConfig) -> Self {
        Self {
            frontends: languages::all_frontends(),
            config,
        }
    }

    /// Extract symbols and relationships from a single file.
    ///
    /// Returns `None` when the extension is not supported. A file the
    /// provider cannot parse yields a successful-but-empty extraction, since
    /// a watcher may trigger this call while a file is mid-save.
    pub fn extract_file(&self, path: &str, content: &[u8]) -> Option<FileExtraction> {
        let extension = Path::new(path).extension().and_then(|ext| ext.to_str())?;
        let frontend = self.find_frontend(extension)?;

        let mut parser = Parser::new();
        parser.set_language(&frontend.grammar()).ok()?;

        let Some(tree) = parser.parse(content, None) else {
            return Some(FileExtraction::empty(path, frontend.language_name()));
        };

        let symbols = SymbolTableBuilder::build(frontend, &self.config, &tree, content, path);
        let relationships = RelationshipResolver::resolve(frontend, &tree, content, &symbols);

        Some(FileExtraction {
            file_path: path.to_string(),
            language: frontend.language_name().to_string(),
            symbols,
            relationships,
        })
    }

    /// All supported file extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.frontends
            .iter()
            .flat_map(|f| f.file_extensions().iter().copied())
            .collect()
    }

    pub fn supports_extension(&self, ext: &str) -> bool {
        self.frontends
            .iter()
            .any(|f| f.file_extensions().contains(&ext))
    }

    fn find_frontend(&self, ext: &str) -> Option<&dyn LanguageFrontend> {
        self.frontends
            .iter()
            .find(|f| f.file_extensions().contains(&ext))
            .map(|f| f.as_ref())
    }
}

impl Default for SourceExtractor {
    fn default() -> Self {
        Self::new()
    }
}
