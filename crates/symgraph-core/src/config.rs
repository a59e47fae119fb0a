//! Extraction configuration.
//!
//! Plain data with serde defaults; callers load/save TOML at a path of their
//! choosing (configuration discovery belongs to the embedding application).

use crate::SymgraphError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable knobs for the extraction engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Maximum signature length before truncation.
    pub signature_max_len: usize,
    /// Whether ERROR nodes get the regex/text fallback extraction path.
    pub fallback_extraction: bool,
    /// How the association pre-pass treats two declarations with the same
    /// name in one file.
    pub association_collision: CollisionPolicy,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            signature_max_len: 256,
            fallback_extraction: true,
            association_collision: CollisionPolicy::LastWins,
        }
    }
}

impl ExtractConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SymgraphError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SymgraphError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), SymgraphError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| SymgraphError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Collision policy for the name-keyed association side table.
///
/// Same-named declarations in different nested scopes of one file cannot be
/// told apart by raw name; this picks which association survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Keep the association recorded last (the source behavior).
    LastWins,
    /// Keep the association recorded first.
    FirstWins,
    /// Drop both associations on collision.
    Drop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrips_through_toml() {
        let config = ExtractConfig::default();
        let toml_str =
            toml::to_string_pretty(&config).expect("default config should serialize to TOML");
        let parsed: ExtractConfig = toml::from_str(&toml_str).expect("TOML should parse back");
        assert_eq!(parsed.signature_max_len, 256);
        assert!(parsed.fallback_extraction);
        assert_eq!(parsed.association_collision, CollisionPolicy::LastWins);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_fields() {
        let partial = "signature_max_len = 64\n";
        let config: ExtractConfig = toml::from_str(partial).expect("partial TOML should parse");
        assert_eq!(config.signature_max_len, 64);
        assert!(config.fallback_extraction);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("extract.toml");

        let mut config = ExtractConfig::default();
        config.fallback_extraction = false;
        config.association_collision = CollisionPolicy::Drop;

        config.save(&path).expect("save should succeed");
        let loaded = ExtractConfig::load(&path).expect("load should succeed");

        assert!(!loaded.fallback_extraction);
        assert_eq!(loaded.association_collision, CollisionPolicy::Drop);
    }

    #[test]
    fn load_nonexistent_returns_error() {
        let result = ExtractConfig::load(Path::new("/tmp/nonexistent_symgraph_config.toml"));
        assert!(result.is_err());
    }
}
