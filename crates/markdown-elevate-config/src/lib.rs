use markdown_elevate_engine::{BlockElevator, EngineError, InlineRule, TagSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid tag set: {source}")]
    InvalidTags { source: EngineError },

    #[error("Invalid inline rule {name:?}: {source}")]
    InvalidInlineRule { name: String, source: EngineError },
}

/// One delimiter-wrapped inline span, as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineRuleConfig {
    pub name: String,
    pub left: String,
    pub right: String,
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl InlineRuleConfig {
    pub fn build(&self) -> Result<InlineRule, ConfigError> {
        let rule = InlineRule::new(&self.left, &self.right, &self.tag).map_err(|source| {
            ConfigError::InvalidInlineRule {
                name: self.name.clone(),
                source,
            }
        })?;
        Ok(self
            .attributes
            .iter()
            .fold(rule, |rule, (name, value)| rule.with_attribute(name, value)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tags: TagSet,
    pub inline_rules: Vec<InlineRuleConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tags: TagSet::default(),
            inline_rules: vec![InlineRuleConfig {
                name: "emphasis".to_string(),
                left: "*".to_string(),
                right: "*".to_string(),
                tag: "em".to_string(),
                attributes: BTreeMap::new(),
            }],
        }
    }
}

impl Config {
    /// Reads `config_path`, expanding `~` and environment variables in it.
    /// A missing file is `Ok(None)`.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        let config_path = Self::expand_path(config_path).unwrap_or_else(|| config_path.into());
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.clone(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.clone(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-elevate");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// The standard descriptors built from the configured tags.
    pub fn elevator(&self) -> Result<BlockElevator, ConfigError> {
        BlockElevator::with_tags(&self.tags).map_err(|source| ConfigError::InvalidTags { source })
    }

    /// Builds every configured inline rule, failing on the first bad one.
    pub fn inline_rules(&self) -> Result<Vec<InlineRule>, ConfigError> {
        self.inline_rules.iter().map(InlineRuleConfig::build).collect()
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markdown-elevate/config.toml"));
    }

    #[test]
    fn test_default_has_emphasis_rule() {
        let config = Config::default();
        assert_eq!(config.tags, TagSet::default());
        let rules = config.inline_rules().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].tag(), "em");
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut original = Config::default();
        original.tags.list_item = "item".to_string();
        original.inline_rules[0]
            .attributes
            .insert("class".to_string(), "loud".to_string());

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config_content = r#"
[tags]
unordered_list = "bullets"
max_header_level = 3
"#;

        let config: Config = toml::from_str(config_content).unwrap();

        assert_eq!(config.tags.unordered_list, "bullets");
        assert_eq!(config.tags.max_header_level, 3);
        assert_eq!(config.tags.list_item, "li");
        assert_eq!(config.inline_rules, Config::default().inline_rules);
    }

    #[test]
    fn test_inline_rules_from_toml() {
        let config_content = r#"
[[inline_rules]]
name = "wikilink"
left = "[["
right = "]]"
tag = "a"
attributes = { class = "wikilink" }
"#;

        let config: Config = toml::from_str(config_content).unwrap();
        let rules = config.inline_rules().unwrap();

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].tag(), "a");
        assert_eq!(rules[0].pattern().as_str(), r"\[\[(.+?)\]\]");
    }

    #[test]
    fn test_invalid_inline_rule_is_named() {
        let config = Config {
            inline_rules: vec![InlineRuleConfig {
                name: "broken".to_string(),
                left: String::new(),
                right: "*".to_string(),
                tag: "em".to_string(),
                attributes: BTreeMap::new(),
            }],
            ..Config::default()
        };

        let err = config.inline_rules().unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::InvalidInlineRule { name, .. } if name == "broken"
        ));
        assert_eq!(
            err.to_string(),
            "Invalid inline rule \"broken\": Inline rule has an empty left delimiter"
        );
    }

    #[test]
    fn test_invalid_tags_rejected_by_elevator() {
        let mut config = Config::default();
        config.tags.blockquote = "block quote".to_string();

        assert!(matches!(
            config.elevator(),
            Err(ConfigError::InvalidTags { .. })
        ));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("MARKDOWN_ELEVATE_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$MARKDOWN_ELEVATE_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("MARKDOWN_ELEVATE_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_malformed_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "tags = 42").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let mut test_config = Config::default();
        test_config.tags.header_prefix = "title".to_string();

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
        let elevator = loaded_config.elevator().unwrap();
        assert_eq!(elevator.descriptors().len(), 5);
    }
}
