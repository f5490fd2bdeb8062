use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_session_goal")]
    pub session_goal: usize,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_speech_enabled")]
    pub speech_enabled: bool,
    /// TTS command argv; the prompt text is appended as the final argument.
    #[serde(default = "default_speech_command")]
    pub speech_command: Vec<String>,
    /// Optional remote word-list URL (expects `{"words": [{"w":..,"s":..}]}`).
    #[serde(default)]
    pub words_url: Option<String>,
}

fn default_session_goal() -> usize {
    crate::session::DEFAULT_GOAL
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_speech_enabled() -> bool {
    true
}
fn default_speech_command() -> Vec<String> {
    if cfg!(target_os = "macos") {
        vec!["say".to_string()]
    } else {
        vec!["espeak".to_string()]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_goal: default_session_goal(),
            theme: default_theme(),
            speech_enabled: default_speech_enabled(),
            speech_command: default_speech_command(),
            words_url: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spellstr")
            .join("config.toml")
    }

    /// Clamp out-of-range values from hand-edited or stale config files.
    pub fn validate(&mut self) {
        self.session_goal = self.session_goal.clamp(1, 100);
        if self.speech_command.is_empty() {
            self.speech_command = default_speech_command();
        }
        if let Some(url) = &self.words_url {
            if url.trim().is_empty() {
                self.words_url = None;
            }
        }
    }
}
