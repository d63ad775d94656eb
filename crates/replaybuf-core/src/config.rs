//! Buffer tuning loaded from TOML.
//!
//! ```toml
//! text_capacity = 8192
//! log_capacity = 32
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Initial text accumulator capacity, in bytes.
pub const DEFAULT_TEXT_CAPACITY: usize = 4096;

/// Initial action log capacity, in entries.
pub const DEFAULT_LOG_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Bytes reserved when a `WriteText` entry is opened.
    pub text_capacity: usize,
    /// Entries reserved when a buffer is created.
    pub log_capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            text_capacity: DEFAULT_TEXT_CAPACITY,
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl BufferConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = BufferConfig::default();
        assert_eq!(config.text_capacity, 4096);
        assert_eq!(config.log_capacity, 16);
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = BufferConfig::from_toml_str("").unwrap();
        assert_eq!(config, BufferConfig::default());
    }

    #[test]
    fn test_parse_partial() {
        let config = BufferConfig::from_toml_str("text_capacity = 128\n").unwrap();
        assert_eq!(config.text_capacity, 128);
        assert_eq!(config.log_capacity, DEFAULT_LOG_CAPACITY);
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        assert!(BufferConfig::from_toml_str("text_capacity = \"big\"\n").is_err());
    }

    #[test]
    fn test_toml_roundtrip_through_file() {
        let config = BufferConfig {
            text_capacity: 512,
            log_capacity: 4,
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_toml_string().unwrap().as_bytes())
            .unwrap();

        let loaded = BufferConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(BufferConfig::from_file(&dir.path().join("absent.toml")).is_err());
    }
}
