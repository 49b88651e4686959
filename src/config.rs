use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Deserialize, Debug)]
pub struct Environment {
    pub openai_api_key: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub openai: OpenAiSettings,
    pub pacing: Pacing,
    pub archive: ArchiveSettings,
}

impl Config {
    pub async fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        toml::from_str(
            &tokio::fs::read_to_string(path)
                .await
                .context("Failed to read config file")?,
        )
        .context("Failed to parse config TOML")
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OpenAiSettings {
    pub api_base: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    pub timeout_secs: u64,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 150,
            presence_penalty: 0.6,
            frequency_penalty: 0.3,
            timeout_secs: 30,
        }
    }
}

/// Delays before scripted interviewer lines appear. Purely cosmetic.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Pacing {
    pub greeting_delay_ms: u64,
    pub reply_delay_ms: u64,
}

impl Pacing {
    pub const IMMEDIATE: Pacing = Pacing {
        greeting_delay_ms: 0,
        reply_delay_ms: 0,
    };

    pub fn greeting_delay(&self) -> Duration {
        Duration::from_millis(self.greeting_delay_ms)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            greeting_delay_ms: 1000,
            reply_delay_ms: 1500,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ArchiveSettings {
    pub enabled: bool,
    pub directory: Option<PathBuf>,
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: None,
        }
    }
}
