use anyhow::Context;
use fairmove_game::{ExitPolicy, GameConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Colour the help table
    pub color: bool,
    /// Print the outcome as JSON instead of text
    pub json: bool,
    pub exit_policy: ExitPolicy,
    /// Show how to check the HMAC after a game
    pub show_verify_hint: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            color: true,
            json: false,
            exit_policy: ExitPolicy::Abstain,
            show_verify_hint: true,
        }
    }
}

impl CliConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fairmove")
            .join("config.json")
    }

    /// Load from `path`, or from the default location when no path is given.
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !path.exists() {
            if required {
                anyhow::bail!("config file not found: {}", path.display());
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("invalid config in {}", path.display()))?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new(self.exit_policy)
    }
}
