use crate::adapter::DEFAULT_COLLAPSE_THRESHOLD;
use crate::render::DEFAULT_HEADING_LABEL;
use crate::tree::DuplicatePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Sidebar settings, loaded from JSON; every field is optional
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarConfig {
    pub heading_label: String,
    pub poll_interval_ms: u64,
    /// `None` polls until cancelled
    pub max_poll_attempts: Option<u32>,
    pub duplicate_policy: DuplicatePolicy,
    /// Diff lines above which a section starts collapsed
    pub collapse_threshold: usize,
    pub tree_height_px: u32,
    /// Class of the sidebar item the tree is placed after
    pub sidebar_anchor: String,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            heading_label: DEFAULT_HEADING_LABEL.to_string(),
            poll_interval_ms: 1000,
            max_poll_attempts: Some(60),
            duplicate_policy: DuplicatePolicy::Reject,
            collapse_threshold: DEFAULT_COLLAPSE_THRESHOLD,
            tree_height_px: 475,
            sidebar_anchor: "shortcuts-merge_requests".to_string(),
        }
    }
}

impl SidebarConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SidebarConfig::default();
        assert_eq!(config.heading_label, "File List");
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.max_poll_attempts, Some(60));
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(config.tree_height_px, 475);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            SidebarConfig::from_json(r#"{"heading_label": "Changes", "duplicate_policy": "keep_first"}"#)
                .unwrap();
        assert_eq!(config.heading_label, "Changes");
        assert_eq!(config.duplicate_policy, DuplicatePolicy::KeepFirst);
        assert_eq!(config.poll_interval_ms, 1000);
    }

    #[test]
    fn test_null_attempts_means_unbounded() {
        let config = SidebarConfig::from_json(r#"{"max_poll_attempts": null}"#).unwrap();
        assert_eq!(config.max_poll_attempts, None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = SidebarConfig::from_json(r#"{"heading": "typo"}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"poll_interval_ms": 250, "tree_height_px": 600}}"#).unwrap();

        let config = SidebarConfig::load(file.path()).unwrap();
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.tree_height_px, 600);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SidebarConfig::load(&dir.path().join("missing.json"));
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
