use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::content::PracticeCategory;

pub const UI_LANGUAGES: &[&str] = &["zh-CN", "en"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_ui_language")]
    pub ui_language: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_mode")]
    pub default_mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chinese_texts: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_texts: Option<Vec<String>>,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

fn default_ui_language() -> String {
    "zh-CN".to_string()
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_mode() -> String {
    "chinese".to_string()
}
fn default_max_upload_bytes() -> u64 {
    64 * 1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui_language: default_ui_language(),
            theme: default_theme(),
            default_mode: default_mode(),
            chinese_texts: None,
            english_texts: None,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Config {
    /// Missing file means defaults. Values are normalized after parsing.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str::<Config>(&content)?
        } else {
            Config::default()
        };
        config.normalize();
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dazi")
            .join("config.toml")
    }

    pub fn default_category(&self) -> PracticeCategory {
        PracticeCategory::parse(&self.default_mode).unwrap_or(PracticeCategory::Chinese)
    }

    /// Reset stale or misspelled values to their defaults.
    pub fn normalize(&mut self) {
        if !UI_LANGUAGES.contains(&self.ui_language.as_str()) {
            // Accept the bare language tag for Chinese.
            self.ui_language = if self.ui_language.eq_ignore_ascii_case("zh") {
                "zh-CN".to_string()
            } else {
                default_ui_language()
            };
        }
        if PracticeCategory::parse(&self.default_mode).is_none() {
            self.default_mode = default_mode();
        }
    }

    pub fn toggle_ui_language(&mut self) {
        self.ui_language = if self.ui_language == "en" {
            "zh-CN".to_string()
        } else {
            "en".to_string()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.ui_language, "zh-CN");
        assert_eq!(config.default_mode, "chinese");
        assert_eq!(config.max_upload_bytes, 65536);
        assert!(config.chinese_texts.is_none());
        assert!(config.english_texts.is_none());
    }

    #[test]
    fn test_config_pool_lists() {
        let toml_str = r#"
theme = "terminal-default"
english_texts = ["first text", "second text"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "terminal-default");
        assert_eq!(
            config.english_texts.as_deref(),
            Some(&["first text".to_string(), "second text".to_string()][..])
        );
        assert!(config.chinese_texts.is_none());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.chinese_texts = Some(vec!["你好世界".to_string()]);
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.chinese_texts, deserialized.chinese_texts);
        assert_eq!(config.ui_language, deserialized.ui_language);
    }

    #[test]
    fn test_normalize_resets_unknown_values() {
        let mut config = Config::default();
        config.ui_language = "fr".to_string();
        config.default_mode = "cangjie".to_string();
        config.normalize();
        assert_eq!(config.ui_language, "zh-CN");
        assert_eq!(config.default_mode, "chinese");
    }

    #[test]
    fn test_normalize_keeps_valid_values() {
        let mut config = Config::default();
        config.ui_language = "en".to_string();
        config.default_mode = "wubi".to_string();
        config.normalize();
        assert_eq!(config.ui_language, "en");
        assert_eq!(config.default_category(), PracticeCategory::Wubi);
    }

    #[test]
    fn test_normalize_bare_zh() {
        let mut config = Config::default();
        config.ui_language = "ZH".to_string();
        config.normalize();
        assert_eq!(config.ui_language, "zh-CN");
    }

    #[test]
    fn test_toggle_ui_language() {
        let mut config = Config::default();
        config.toggle_ui_language();
        assert_eq!(config.ui_language, "en");
        config.toggle_ui_language();
        assert_eq!(config.ui_language, "zh-CN");
    }

    #[test]
    fn test_load_missing_and_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_mode, "chinese");

        let mut changed = config.clone();
        changed.ui_language = "en".to_string();
        changed.save_to(&path).unwrap();
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.ui_language, "en");
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "ui_language = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
