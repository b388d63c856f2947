use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;

use comments::FirestoreConfig;
use datatable::RevealConfig;

const CONFIG_FILENAME: &str = "config.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Settings read from `config.ron`. Every field may be omitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub initial_rows: usize,
    pub rows_per_scroll: usize,
    pub scroll_debounce_ms: u64,
    /// Remote comment store. Comments stay in memory when absent.
    pub store: Option<FirestoreConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let reveal = RevealConfig::default();
        AppConfig {
            log_level: "info".to_string(),
            initial_rows: reveal.initial_count,
            rows_per_scroll: reveal.increase_per_scroll,
            scroll_debounce_ms: reveal.debounce.as_millis() as u64,
            store: None
        }
    }
}

impl AppConfig {
    /// Loads `config.ron` from `config_dir`; a missing file yields the defaults.
    pub fn load(config_dir: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
        let path = config_dir.as_ref().join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&path)?;
        Ok(ron::from_str(&content)?)
    }

    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn reveal(&self) -> RevealConfig {
        RevealConfig {
            initial_count: self.initial_rows.max(1),
            increase_per_scroll: self.rows_per_scroll.max(1),
            debounce: Duration::from_millis(self.scroll_debounce_ms)
        }
    }
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "movie-browser")
}

pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(AppConfig::load(dir.path()).unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "(initial_rows: 5, log_level: \"debug\")").unwrap();

        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.initial_rows, 5);
        assert_eq!(config.rows_per_scroll, 20);
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        assert_eq!(config.store, None);
    }

    #[test]
    fn store_section() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "(store: Some((project_id: \"movies-dev\", api_key: Some(\"k\"))))"
        ).unwrap();

        let store = AppConfig::load(dir.path()).unwrap().store.unwrap();
        assert_eq!(store.project_id, "movies-dev");
        assert_eq!(store.api_key.as_deref(), Some("k"));
        assert_eq!(store.collection, "comments");
        assert_eq!(store.timeout_secs, 10);
    }

    #[test]
    fn broken_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "(initial_rows: \"many\"").unwrap();

        assert!(matches!(AppConfig::load(dir.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn reveal_settings_are_clamped() {
        let config = AppConfig { initial_rows: 0, rows_per_scroll: 0, ..AppConfig::default() };
        let reveal = config.reveal();
        assert_eq!(reveal.initial_count, 1);
        assert_eq!(reveal.increase_per_scroll, 1);
        assert_eq!(reveal.debounce, Duration::from_millis(200));
    }
}
