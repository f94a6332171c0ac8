use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 3000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: None }
    }
}

/// Where the movie collection lives. `None` means the built-in location
/// chosen by the server crate.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

pub fn config_path() -> PathBuf {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string()).into()
}

pub fn load_from_file(path: &std::path::Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)
        .with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

impl AppConfig {
    /// `config.toml` when present (defaults otherwise), then `PORT` /
    /// `SERVER_HOST` from the environment, then validation.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if path.exists() { load_from_file(&path)? } else { AppConfig::default() };
        cfg.apply_env_overrides(
            std::env::var("PORT").ok().as_deref(),
            std::env::var("SERVER_HOST").ok().as_deref(),
        )?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn apply_env_overrides(&mut self, port: Option<&str>, host: Option<&str>) -> Result<()> {
        if let Some(p) = port.filter(|p| !p.trim().is_empty()) {
            self.server.port = p
                .trim()
                .parse::<u16>()
                .map_err(|_| anyhow!("PORT must be an integer in 1..=65535, got {p:?}"))?;
        }
        if let Some(h) = host.filter(|h| !h.trim().is_empty()) {
            self.server.host = h.trim().to_string();
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        match &self.data_file {
            Some(p) if p.as_os_str().is_empty() => Err(anyhow!("storage.data_file is empty")),
            _ => Ok(()),
        }
    }
}
