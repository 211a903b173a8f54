use crate::error::{CvfsError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PROMPT: &str = "CVFS> ";
const DEFAULT_SNAPSHOT_EXT: &str = ".cvfs";

/// Configuration for cvfs, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CvfsConfig {
    /// Capacity of a disk created automatically at startup (none if unset)
    #[serde(default)]
    pub default_capacity: Option<u64>,

    /// Prompt shown by the interactive shell
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Extension appended to snapshot names that have none
    #[serde(default = "default_snapshot_ext")]
    pub snapshot_ext: String,
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

fn default_snapshot_ext() -> String {
    DEFAULT_SNAPSHOT_EXT.to_string()
}

impl Default for CvfsConfig {
    fn default() -> Self {
        Self {
            default_capacity: None,
            prompt: default_prompt(),
            snapshot_ext: default_snapshot_ext(),
        }
    }
}

impl CvfsConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CvfsError::Io)?;
        let config: CvfsConfig =
            serde_json::from_str(&content).map_err(CvfsError::Serialization)?;
        Ok(config)
    }

    pub fn snapshot_ext(&self) -> &str {
        &self.snapshot_ext
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CvfsConfig::default();
        assert_eq!(config.prompt, "CVFS> ");
        assert_eq!(config.snapshot_ext(), ".cvfs");
        assert_eq!(config.default_capacity, None);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CvfsConfig::load(temp_dir.path().join("absent")).unwrap();
        assert_eq!(config, CvfsConfig::default());
    }

    #[test]
    fn test_load_full_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"default_capacity": 4096, "prompt": "> ", "snapshot_ext": "img"}"#,
        )
        .unwrap();

        let loaded = CvfsConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.default_capacity, Some(4096));
        assert_eq!(loaded.prompt, "> ");
        assert_eq!(loaded.snapshot_ext(), "img");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"default_capacity": 300}"#,
        )
        .unwrap();

        let loaded = CvfsConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.default_capacity, Some(300));
        assert_eq!(loaded.prompt, "CVFS> ");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), "{ nope").unwrap();
        assert!(matches!(
            CvfsConfig::load(temp_dir.path()),
            Err(CvfsError::Serialization(_))
        ));
    }
}
