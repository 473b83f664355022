use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use intake_core::FieldName;
// Import ExtractorConfig from intake_extraction to avoid duplication
use intake_extraction::ExtractorConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub extraction: ExtractorConfig,
    #[serde(default)]
    pub extractor: ExtractorKind,
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Which extractor implementation the pipeline is built with.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    /// Local ordered-rule pattern matching (no network).
    #[default]
    Pattern,
    /// Model-backed extraction via an `OpenAI`-compatible API.
    Chat,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PipelineConfig {
    #[serde(default = "PipelineConfig::default_required_fields")]
    pub required_fields: Vec<FieldName>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            required_fields: Self::default_required_fields(),
        }
    }
}

impl PipelineConfig {
    fn default_required_fields() -> Vec<FieldName> {
        FieldName::ALL.to_vec()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "ProviderConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ProviderConfig::default_model")]
    pub model: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::default_base_url(),
            model: Self::default_model(),
        }
    }
}

impl ProviderConfig {
    fn default_base_url() -> String {
        "https://api.openai.com/v1".to_string()
    }

    fn default_model() -> String {
        "gpt-4o-mini".to_string()
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'intake init' to create config.",
                config_path.display()
            );
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Load the config file if present, otherwise fall back to defaults
    /// (pattern extractor, canonical required fields).
    pub fn load_or_default() -> anyhow::Result<Self> {
        if Self::config_path()?.exists() {
            Self::load()
        } else {
            Ok(Self::default())
        }
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("intake"))
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!("Config file already exists at: {}", config_path.display());
        }

        let config = Self::default();
        let content = serde_json::to_string_pretty(&config)?;
        std::fs::write(&config_path, content)?;

        println!("Created config at: {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_default_config_round_trips() {
        let config = Config::default();
        let json = serde_json::to_string(&config).expect("config should serialize");
        let parsed: Config = serde_json::from_str(&json).expect("config should deserialize");

        assert_eq!(parsed.extractor, ExtractorKind::Pattern);
        assert_eq!(parsed.pipeline.required_fields, FieldName::ALL.to_vec());
        assert!(!parsed.extraction.rules.is_empty());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_minimal_config_uses_defaults() {
        let parsed: Config = serde_json::from_str("{}").expect("empty object should parse");
        assert_eq!(parsed.extractor, ExtractorKind::Pattern);
        assert_eq!(parsed.provider.model, "gpt-4o-mini");
        assert_eq!(parsed.pipeline.required_fields.len(), 3);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_extractor_kind_parses_lowercase() {
        let parsed: Config = serde_json::from_str(r#"{"extractor": "chat"}"#)
            .expect("chat extractor should parse");
        assert_eq!(parsed.extractor, ExtractorKind::Chat);
    }
}
