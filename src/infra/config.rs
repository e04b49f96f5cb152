// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::paths;
use crate::therapist::tone::Tone;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub goals: GoalsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    pub id: String,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            id: "default".into(),
        }
    }
}

/// Knobs for context building and response selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub default_tone: Tone,
    /// Messages kept in the per-turn context window.
    pub context_window: usize,
    /// Messages quoted when framing a prompt for the external provider.
    pub framing_window: usize,
    /// Assistant replies checked when filtering repeated templates.
    pub repeat_lookback: usize,
    pub similarity_threshold: f32,
    pub long_message_chars: usize,
    /// Replies stay acknowledgments until the session is this old.
    pub rapport_minutes: i64,
    pub follow_up_after_minutes: i64,
    pub follow_up_probability: f64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_tone: Tone::Empathetic,
            context_window: 6,
            framing_window: 3,
            repeat_lookback: 5,
            similarity_threshold: 0.7,
            long_message_chars: 200,
            rapport_minutes: 5,
            follow_up_after_minutes: 3,
            follow_up_probability: 0.7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    pub timeout_seconds: u64,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Completions shorter than this are discarded in favour of templates.
    pub min_reply_chars: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            timeout_seconds: 10,
            temperature: 0.7,
            max_tokens: 200,
            min_reply_chars: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalsConfig {
    pub weekly: u32,
    pub monthly: u32,
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            weekly: 7,
            monthly: 30,
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reasonable() {
        let c = Config::default();
        assert_eq!(c.account.id, "default");
        assert_eq!(c.chat.default_tone, Tone::Empathetic);
        assert_eq!(c.chat.context_window, 6);
        assert_eq!(c.chat.framing_window, 3);
        assert_eq!(c.chat.repeat_lookback, 5);
        assert!((c.chat.similarity_threshold - 0.7).abs() < 0.001);
        assert!((c.chat.follow_up_probability - 0.7).abs() < 0.001);
        assert!(!c.provider.enabled);
        assert_eq!(c.provider.timeout_seconds, 10);
        assert_eq!(c.goals.weekly, 7);
        assert_eq!(c.goals.monthly, 30);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.chat.long_message_chars, 200);
        assert_eq!(config.provider.model, "gpt-4");
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[account]
id = "alice"

[chat]
default_tone = "solution"
context_window = 8
framing_window = 2
repeat_lookback = 4
similarity_threshold = 0.5
long_message_chars = 120
rapport_minutes = 2
follow_up_after_minutes = 1
follow_up_probability = 1.0

[provider]
enabled = true
base_url = "http://localhost:8080/v1"
model = "local-model"
api_key_env = "LOCAL_KEY"
timeout_seconds = 3
temperature = 0.2
max_tokens = 64
min_reply_chars = 10

[goals]
weekly = 5
monthly = 20
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.account.id, "alice");
        assert_eq!(config.chat.default_tone, Tone::Solution);
        assert_eq!(config.chat.context_window, 8);
        assert_eq!(config.chat.rapport_minutes, 2);
        assert!(config.provider.enabled);
        assert_eq!(config.provider.api_key_env, "LOCAL_KEY");
        assert_eq!(config.provider.timeout_seconds, 3);
        assert_eq!(config.goals.weekly, 5);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: Config = toml::from_str("[chat]\ndefault_tone = \"honest\"\n").unwrap();
        assert_eq!(config.chat.default_tone, Tone::Honest);
        assert_eq!(config.chat.context_window, 6);
        assert_eq!(config.chat.rapport_minutes, 5);
    }

    #[test]
    fn test_unknown_tone_rejected() {
        let result: Result<Config, _> = toml::from_str("[chat]\ndefault_tone = \"sarcastic\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.chat.context_window, config.chat.context_window);
        assert_eq!(deserialized.chat.default_tone, config.chat.default_tone);
        assert_eq!(deserialized.provider.base_url, config.provider.base_url);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[goals]\nweekly = 3\nmonthly = 12\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.goals.weekly, 3);
        assert_eq!(config.goals.monthly, 12);
        assert_eq!(config.chat.context_window, 6);
    }
}
