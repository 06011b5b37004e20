//! Handles settings for the application.
//!
//! Values come from an optional `settings.toml` in the working directory,
//! then from `WALLET__`-prefixed environment variables
//! (`WALLET__SERVER__PORT=8080` sets `server.port`).
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
    Postgres(String),
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Self::Memory => "sqlite::memory:".to_string(),
            Self::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
            Self::Postgres(url) => url.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Option<Server>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("settings").required(false))
                .add_source(
                    Environment::with_prefix("WALLET")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder
            .set_default("app.level", "info")?
            .build()?
            .try_deserialize()
    }
}
