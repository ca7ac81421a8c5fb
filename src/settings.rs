use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::Category;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_categories() -> Vec<Category> {
    vec![
        Category::new("food", "Alimentação", "\u{2668}"),
        Category::new("accommodation", "Hospedagem", "\u{2302}"),
        Category::new("services", "Serviços", "\u{2692}"),
        Category::new("transport", "Transporte", "\u{279c}"),
        Category::new("others", "Outros", "\u{2022}"),
    ]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("despesas")
        .to_string_lossy()
        .to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("despesas")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Load settings from `path`, or from `~/.config/despesas/settings.json`.
/// A missing or unreadable file yields the defaults.
pub fn load_settings(path: Option<&str>) -> Settings {
    let path = path
        .map(|p| PathBuf::from(shellexpand_path(p)))
        .unwrap_or_else(settings_path);
    load_settings_from(&path)
}

pub fn load_settings_from(path: &Path) -> Settings {
    if path.exists() {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            categories: vec![Category::new("pets", "Pets", "p")],
            log_level: "debug".to_string(),
            log_dir: "/tmp/despesas-test".to_string(),
        };
        std::fs::write(&path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();
        let loaded = load_settings_from(&path);
        assert_eq!(loaded.categories, vec![Category::new("pets", "Pets", "p")]);
        assert_eq!(loaded.log_level, "debug");
        assert_eq!(loaded.log_dir, "/tmp/despesas-test");
    }

    #[test]
    fn test_load_returns_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings_from(&dir.path().join("nope.json"));
        assert_eq!(s.categories.len(), 5);
        assert_eq!(s.categories[0].id, "food");
        assert_eq!(s.log_level, "info");
        assert!(!s.log_dir.is_empty());
    }

    #[test]
    fn test_load_returns_defaults_when_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let s = load_settings_from(&path);
        assert_eq!(s.categories, default_categories());
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"log_level": "warn"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.log_level, "warn");
        assert_eq!(s.categories, default_categories());
    }

    #[test]
    fn test_shellexpand_keeps_plain_paths() {
        assert_eq!(shellexpand_path("/etc/despesas.json"), "/etc/despesas.json");
    }
}
