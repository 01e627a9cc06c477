//! Server configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use trivia_core::GameConfig;

const DEFAULT_BANK_PATH: &str = "data/questions.json";
const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub question_bank_path: PathBuf,
    /// Optional JSON `GameConfig`; the built-in constants apply when unset.
    pub game_config_path: Option<PathBuf>,
    /// Sessions untouched for this long are discarded.
    pub session_ttl: Duration,
}

impl ServerConfig {
    /// Read the configuration from environment variables.
    ///
    /// Env vars (all optional):
    /// - HOST: bind address, default 0.0.0.0
    /// - PORT: bind port, default 3000
    /// - QUESTION_BANK_PATH: JSON question bank, default data/questions.json
    /// - GAME_CONFIG_PATH: JSON game configuration
    /// - SESSION_TTL_SECS: idle session lifetime, default 1800
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match std::env::var("PORT") {
            Ok(port) => port.parse().context("PORT must be a port number")?,
            Err(_) => 3000,
        };

        let question_bank_path = std::env::var("QUESTION_BANK_PATH")
            .unwrap_or_else(|_| DEFAULT_BANK_PATH.to_string())
            .into();

        let game_config_path = std::env::var("GAME_CONFIG_PATH").ok().map(PathBuf::from);

        let ttl_secs = match std::env::var("SESSION_TTL_SECS") {
            Ok(secs) => secs
                .parse()
                .context("SESSION_TTL_SECS must be a whole number of seconds")?,
            Err(_) => DEFAULT_SESSION_TTL_SECS,
        };

        Ok(Self {
            host,
            port,
            question_bank_path,
            game_config_path,
            session_ttl: Duration::from_secs(ttl_secs),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load and validate the game configuration.
    pub fn load_game_config(&self) -> anyhow::Result<GameConfig> {
        let config = match &self.game_config_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading game config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing game config {}", path.display()))?
            }
            None => GameConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }
}
