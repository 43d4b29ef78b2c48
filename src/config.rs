use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::utils::letters::TileSet;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub dictionary_path: String,
    pub tile_set: &'static TileSet,
    /// Sessions untouched for longer than this are dropped
    pub session_idle_timeout: Duration,
}

/// Flat view of the environment, one field per variable
#[derive(Debug, Deserialize)]
struct RawConfig {
    host: String,
    port: u16,
    dictionary_path: String,
    tile_set: String,
    session_idle_timeout: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::build(::config::Environment::default().try_parsing(true))
    }

    fn build(env: ::config::Environment) -> Result<Self> {
        let raw: RawConfig = ::config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("dictionary_path", "./dictionary.txt")?
            .set_default("tile_set", "erudite")?
            .set_default("session_idle_timeout", 1800)?
            .add_source(env)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("PORT and SESSION_IDLE_TIMEOUT must be numbers")?;

        let tile_set = TileSet::by_name(&raw.tile_set)
            .with_context(|| format!("TILE_SET must be 'erudite' or 'english', got '{}'", raw.tile_set))?;

        Ok(Config {
            server: ServerConfig {
                host: raw.host,
                port: raw.port,
            },
            game: GameConfig {
                dictionary_path: raw.dictionary_path,
                tile_set,
                session_idle_timeout: Duration::from_secs(raw.session_idle_timeout),
            },
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
