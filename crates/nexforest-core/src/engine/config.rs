use crate::core::mapper::DuplicateIdPolicy;
use crate::core::models::document::Document;
use crate::core::models::length::LengthCoercion;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Document-wide policies.
///
/// ```toml
/// duplicate_ids = "reject"
/// length_coercion = "strict"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// What happens when an id-indexed collection already holds the incoming id.
    pub duplicate_ids: DuplicateIdPolicy,
    /// Whether numeric trees reject (`strict`) or zero (`lenient`) non-numeric text lengths.
    pub length_coercion: LengthCoercion,
}

impl DocumentConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[derive(Default)]
pub struct DocumentConfigBuilder {
    duplicate_ids: Option<DuplicateIdPolicy>,
    length_coercion: Option<LengthCoercion>,
}

impl DocumentConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duplicate_ids(mut self, policy: DuplicateIdPolicy) -> Self {
        self.duplicate_ids = Some(policy);
        self
    }

    pub fn length_coercion(mut self, mode: LengthCoercion) -> Self {
        self.length_coercion = Some(mode);
        self
    }

    pub fn build(self) -> DocumentConfig {
        DocumentConfig {
            duplicate_ids: self.duplicate_ids.unwrap_or_default(),
            length_coercion: self.length_coercion.unwrap_or_default(),
        }
    }
}

impl Document {
    /// Creates an empty document governed by `config`.
    pub fn with_config(config: DocumentConfig) -> Self {
        Self {
            duplicate_ids: config.duplicate_ids,
            length_coercion: config.length_coercion,
            ..Self::default()
        }
    }

    pub fn config(&self) -> DocumentConfig {
        DocumentConfig {
            duplicate_ids: self.duplicate_ids,
            length_coercion: self.length_coercion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_input_yields_defaults() {
        let config = DocumentConfig::from_toml_str("").unwrap();
        assert_eq!(config, DocumentConfig::default());
        assert_eq!(config.duplicate_ids, DuplicateIdPolicy::Overwrite);
        assert_eq!(config.length_coercion, LengthCoercion::Lenient);
    }

    #[test]
    fn parses_both_policies() {
        let config =
            DocumentConfig::from_toml_str("duplicate_ids = \"reject\"\nlength_coercion = \"strict\"\n")
                .unwrap();
        assert_eq!(config.duplicate_ids, DuplicateIdPolicy::Reject);
        assert_eq!(config.length_coercion, LengthCoercion::Strict);
    }

    #[test]
    fn rejects_unknown_policy_value() {
        assert!(DocumentConfig::from_toml_str("duplicate_ids = \"merge\"").is_err());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "duplicate_ids = \"reject\"").unwrap();

        let config = DocumentConfig::load(file.path()).unwrap();
        assert_eq!(config.duplicate_ids, DuplicateIdPolicy::Reject);
        assert_eq!(config.length_coercion, LengthCoercion::Lenient);
    }

    #[test]
    fn load_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        match DocumentConfig::load(&missing) {
            Err(ConfigError::Io { path, .. }) => assert!(path.ends_with("absent.toml")),
            other => panic!("expected an I/O error, got {:?}", other),
        }

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "duplicate_ids = [").unwrap();
        assert!(matches!(
            DocumentConfig::load(file.path()),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn builder_and_document_round_trip() {
        let config = DocumentConfigBuilder::new()
            .duplicate_ids(DuplicateIdPolicy::Reject)
            .length_coercion(LengthCoercion::Strict)
            .build();
        let document = Document::with_config(config);
        assert_eq!(document.config(), config);
        assert_eq!(DocumentConfigBuilder::new().build(), DocumentConfig::default());
    }
}
