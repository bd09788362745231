//! Configuration types for clados
//!
//! The taxonomy core is configured from a single static document holding
//! the recognized rank vocabulary and the deprecated-name list. The
//! document is loaded once at startup and shared read-only by every tree
//! operation; nothing here is process-global.

use crate::CladosError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// NCBI rank vocabulary, ordered from most general to most specific.
///
/// Used when a configuration document does not supply its own `ranks`
/// sequence. Index order is meaningful: a lower index is a more general
/// rank.
pub const DEFAULT_RANKS: &[&str] = &[
    "superkingdom",
    "kingdom",
    "subkingdom",
    "superphylum",
    "phylum",
    "subphylum",
    "superclass",
    "class",
    "subclass",
    "infraclass",
    "cohort",
    "superorder",
    "order",
    "suborder",
    "infraorder",
    "parvorder",
    "superfamily",
    "family",
    "subfamily",
    "tribe",
    "subtribe",
    "genus",
    "subgenus",
    "species group",
    "species subgroup",
    "species",
    "subspecies",
    "varietas",
    "forma",
];

/// Static configuration consumed by the taxonomy core.
///
/// Accepts both this crate's TOML layout and the legacy JSON document
/// shape (`oldTaxa`, `specialChars`) via field aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Recognized rank names, most general first
    #[serde(default = "default_ranks")]
    pub ranks: Vec<String>,
    /// Deprecated scientific names stripped during cleaning
    #[serde(default, alias = "oldTaxa")]
    pub old_taxa: HashSet<String>,
    /// Substring substitutions applied when normalizing taxon names
    #[serde(default, alias = "specialChars")]
    pub special_chars: HashMap<String, String>,
}

fn default_ranks() -> Vec<String> {
    DEFAULT_RANKS.iter().map(|rank| rank.to_string()).collect()
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            ranks: default_ranks(),
            old_taxa: HashSet::new(),
            special_chars: HashMap::new(),
        }
    }
}

impl TaxonomyConfig {
    /// Check whether a scientific name is on the deprecated list
    pub fn is_deprecated(&self, name: &str) -> bool {
        self.old_taxa.contains(name)
    }
}

/// Load a configuration document, picking the format by file extension:
/// `.json` is parsed as JSON, anything else as TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TaxonomyConfig, CladosError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;

    let config: TaxonomyConfig = if has_json_extension(path) {
        serde_json::from_str(&contents)
            .map_err(|e| CladosError::Configuration(format!("Failed to parse config: {}", e)))?
    } else {
        toml::from_str(&contents)
            .map_err(|e| CladosError::Configuration(format!("Failed to parse config: {}", e)))?
    };

    tracing::debug!(
        "Loaded taxonomy config from {}: {} ranks, {} deprecated taxa",
        path.display(),
        config.ranks.len(),
        config.old_taxa.len()
    );

    Ok(config)
}

/// Write a configuration document, picking the format by file extension
/// as [`load_config`] does.
pub fn save_config<P: AsRef<Path>>(path: P, config: &TaxonomyConfig) -> Result<(), CladosError> {
    let path = path.as_ref();

    let contents = if has_json_extension(path) {
        serde_json::to_string_pretty(config)
            .map_err(|e| CladosError::Serialization(format!("Failed to serialize config: {}", e)))?
    } else {
        toml::to_string_pretty(config)
            .map_err(|e| CladosError::Configuration(format!("Failed to serialize config: {}", e)))?
    };

    std::fs::write(path, contents)?;
    Ok(())
}

fn has_json_extension(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TaxonomyConfig::default();

        assert_eq!(config.ranks.len(), DEFAULT_RANKS.len());
        assert_eq!(config.ranks.first().map(String::as_str), Some("superkingdom"));
        assert_eq!(config.ranks.last().map(String::as_str), Some("forma"));
        assert!(config.old_taxa.is_empty());
        assert!(config.special_chars.is_empty());
    }

    #[test]
    fn test_load_toml_config() {
        let toml_content = r#"
ranks = ["kingdom", "phylum", "class", "order", "family", "genus", "species"]
old_taxa = ["Drosophila andina"]

[special_chars]
"_" = " "
"#;

        let mut temp_file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.ranks.len(), 7);
        assert!(config.is_deprecated("Drosophila andina"));
        assert_eq!(config.special_chars.get("_").map(String::as_str), Some(" "));
    }

    #[test]
    fn test_load_legacy_json_config() {
        // The legacy document uses camelCase keys; aliases must accept them.
        let json_content = r#"{
            "ranks": ["kingdom", "phylum", "genus", "species"],
            "oldTaxa": ["Cyanophora tetracyanea"],
            "specialChars": {"+": " "}
        }"#;

        let mut temp_file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap();
        write!(temp_file, "{}", json_content).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.ranks.len(), 4);
        assert!(config.is_deprecated("Cyanophora tetracyanea"));
        assert_eq!(config.special_chars.get("+").map(String::as_str), Some(" "));
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let mut temp_file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        write!(temp_file, "old_taxa = [\"Homo erectus\"]\n").unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.ranks.len(), DEFAULT_RANKS.len());
        assert!(config.is_deprecated("Homo erectus"));
    }

    #[test]
    fn test_load_invalid_config() {
        let mut temp_file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        write!(temp_file, "this is not valid TOML {{").unwrap();

        match load_config(temp_file.path()).unwrap_err() {
            CladosError::Configuration(msg) => assert!(msg.contains("Failed to parse config")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_config("/nonexistent/path/to/taxa.toml");
        assert!(matches!(result.unwrap_err(), CladosError::Io(_)));
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = TaxonomyConfig::default();
        config.old_taxa.insert("Raphus cucullatus".to_string());
        config
            .special_chars
            .insert("_".to_string(), " ".to_string());

        for suffix in [".toml", ".json"] {
            let temp_file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
            save_config(temp_file.path(), &config).unwrap();
            let loaded = load_config(temp_file.path()).unwrap();
            assert_eq!(config, loaded);
        }
    }
}
