use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_IDLE_WAIT_MS, DEFAULT_PASSWORD,
    DEFAULT_RECEIVE_TIMEOUT_SECS, DEFAULT_USERNAME,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

/// Which host the data connection goes to after a PASV reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassiveAddressMode {
    /// Reconnect to the control host, ignoring the address in the reply.
    #[default]
    ControlHost,
    /// Connect to the address the server put in the reply.
    Reply,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    pub connect_timeout_secs: u64,
    pub receive_timeout_secs: u64,
    pub idle_wait_ms: u64,
    pub passive_address: PassiveAddressMode,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub client: ClientConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            receive_timeout_secs: DEFAULT_RECEIVE_TIMEOUT_SECS,
            idle_wait_ms: DEFAULT_IDLE_WAIT_MS,
            passive_address: PassiveAddressMode::default(),
            username: String::from(DEFAULT_USERNAME),
            password: String::from(DEFAULT_PASSWORD),
        }
    }
}

/// Socket-level settings handed to every control session.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub connect_timeout: Duration,
    pub receive_timeout: Duration,
    pub idle_wait: Duration,
    pub passive_address: PassiveAddressMode,
}

impl Default for SessionSettings {
    fn default() -> Self {
        ClientConfig::default().session_settings()
    }
}

impl ClientConfig {
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            receive_timeout: Duration::from_secs(self.receive_timeout_secs),
            idle_wait: Duration::from_millis(self.idle_wait_ms),
            passive_address: self.passive_address,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path))
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)?;
        Ok(config)
    }
}
