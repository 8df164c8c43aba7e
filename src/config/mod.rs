//! Picker configuration — where the data lives and where the selection is kept.
//!
//! Project-level config: `.lobpick/config.yaml` (checked first)
//! User-level config: `~/.lobpick/config.yaml`
//!
//! Resolution: project file → user file → built-in defaults. CLI flags are
//! applied on top by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::Resources;
use crate::controller::DEFAULT_STORE_KEY;

/// Where the three JSON tables are fetched from. `base_url` wins over `data_dir`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// HTTP(S) base URL; resource paths are joined onto it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Local directory; resource paths are relative to it. Defaults to `.`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Resolved source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind<'a> {
    Http(&'a str),
    Dir(&'a Path),
}

impl SourceConfig {
    pub fn kind(&self) -> SourceKind<'_> {
        match (&self.base_url, &self.data_dir) {
            (Some(url), _) => SourceKind::Http(url),
            (None, Some(dir)) => SourceKind::Dir(dir),
            (None, None) => SourceKind::Dir(Path::new(".")),
        }
    }
}

/// Where the last selection is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding slot files. `None` = `~/.lobpick/state`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Slot name for the selection record.
    #[serde(default = "default_store_key")]
    pub key: String,
}

fn default_store_key() -> String {
    DEFAULT_STORE_KEY.into()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: default_store_key(),
        }
    }
}

/// Top-level picker configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub resources: Resources,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Path to `~/.lobpick/`.
fn dirs_path() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|p| PathBuf::from(p).join(".lobpick"))
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME")
            .ok()
            .map(|p| PathBuf::from(p).join(".lobpick"))
    }
}

impl PickerConfig {
    /// Load the first config file found: project, then user. Defaults otherwise.
    pub fn load() -> Self {
        let project = PathBuf::from(".lobpick/config.yaml");
        if let Some(config) = Self::load_file(&project) {
            return config;
        }
        dirs_path()
            .and_then(|dir| Self::load_file(&dir.join("config.yaml")))
            .unwrap_or_default()
    }

    /// Load one file. Missing → `None`; unparseable → defaults with a warning.
    pub fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match Self::from_yaml(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Some(Self::default())
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Directory for slot files, falling back to `~/.lobpick/state`, then `.lobpick/state`.
    pub fn state_dir(&self) -> PathBuf {
        self.store
            .dir
            .clone()
            .or_else(|| dirs_path().map(|p| p.join("state")))
            .unwrap_or_else(|| PathBuf::from(".lobpick/state"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = PickerConfig::default();
        assert_eq!(config.source.kind(), SourceKind::Dir(Path::new(".")));
        assert_eq!(config.resources.lob, "data/lobToApps.json");
        assert_eq!(config.store.key, "lobApp");
    }

    #[test]
    fn load_from_yaml_string() {
        let yaml = r#"
source:
  base_url: https://grs.example.test/picker
resources:
  lob: tables/lobs.json
store:
  dir: /tmp/lobpick
  key: picker
"#;
        let config = PickerConfig::from_yaml(yaml).unwrap();
        assert_eq!(
            config.source.kind(),
            SourceKind::Http("https://grs.example.test/picker")
        );
        assert_eq!(config.resources.lob, "tables/lobs.json");
        // Unspecified resources keep their defaults.
        assert_eq!(config.resources.package, "data/appToPackage.json");
        assert_eq!(config.store.dir, Some(PathBuf::from("/tmp/lobpick")));
        assert_eq!(config.store.key, "picker");
    }

    #[test]
    fn data_dir_source() {
        let config = PickerConfig::from_yaml("source:\n  data_dir: ./site\n").unwrap();
        assert_eq!(config.source.kind(), SourceKind::Dir(Path::new("./site")));
    }

    #[test]
    fn base_url_wins_over_data_dir() {
        let yaml = "source:\n  data_dir: ./site\n  base_url: http://localhost:8000\n";
        let config = PickerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.source.kind(), SourceKind::Http("http://localhost:8000"));
    }

    #[test]
    fn round_trip_yaml() {
        let mut config = PickerConfig::default();
        config.source.base_url = Some("http://localhost:8000".into());
        config.store.key = "other".into();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(PickerConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn load_file_missing_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(PickerConfig::load_file(&dir.path().join("config.yaml")).is_none());
    }

    #[test]
    fn load_file_invalid_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "source: 42\n").unwrap();
        assert_eq!(PickerConfig::load_file(&path), Some(PickerConfig::default()));
    }

    #[test]
    fn explicit_state_dir_wins() {
        let mut config = PickerConfig::default();
        config.store.dir = Some("/var/lib/lobpick".into());
        assert_eq!(config.state_dir(), PathBuf::from("/var/lib/lobpick"));
    }
}
