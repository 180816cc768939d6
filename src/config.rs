use std::path::{Path, PathBuf};

use serde::Deserialize;

/// The AqSolDB distribution filename, used when nothing else is configured.
pub const DEFAULT_DATASET_FILE: &str = "curated-solubility-dataset.csv";

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "aqsol-explorer.json";

/// Launch configuration.  There are no CLI flags; the dataset path comes
/// from (highest precedence first) the `AQSOL_DATASET` environment variable,
/// the config file, or the default filename.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            dataset_path: PathBuf::from(DEFAULT_DATASET_FILE),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        let mut config = Self::from_file(Path::new(CONFIG_FILE)).unwrap_or_default();
        if let Ok(path) = std::env::var("AQSOL_DATASET") {
            if !path.is_empty() {
                config.dataset_path = PathBuf::from(path);
            }
        }
        config
    }

    fn from_file(path: &Path) -> Option<Self> {
        let text = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&text) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("ignoring malformed {}: {e}", path.display());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_points_at_the_aqsoldb_file() {
        assert_eq!(
            AppConfig::default().dataset_path,
            PathBuf::from("curated-solubility-dataset.csv")
        );
    }

    #[test]
    fn config_file_overrides_the_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(br#"{"dataset_path": "subset.csv"}"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("subset.csv"));
    }

    #[test]
    fn malformed_config_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{not json").unwrap();

        assert!(AppConfig::from_file(&path).is_none());
    }
}
