/// Unified error type for symgraph.
#[derive(Debug, thiserror::Error)]
pub enum SymgraphError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Extraction error at {node_kind} ({line}:{column}): {message}")]
    Extraction {
        node_kind: String,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid symbol kind: {0}")]
    InvalidSymbolKind(String),

    #[error("Invalid relationship kind: {0}")]
    InvalidRelationshipKind(String),

    #[error("Invalid visibility: {0}")]
    InvalidVisibility(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SymgraphError {
    /// Build an extraction error pinned to a node kind and position.
    pub fn extraction(node_kind: &str, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Extraction {
            node_kind: node_kind.to_string(),
            line,
            column,
            message: message.into(),
        }
    }
}
