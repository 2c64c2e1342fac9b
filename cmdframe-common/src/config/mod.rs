pub mod config;

static CONFIG_LOCATION: &str = "./config.toml";

use std::path::Path;

use anyhow::Context;
use lazy_static::lazy_static;
use toml::from_str;

use crate::config::config::FrameworkConfig;

lazy_static! {
    pub static ref CONFIG: FrameworkConfig = load_config(CONFIG_LOCATION).unwrap_or_default();
}

/// Reads and parses a config file. Missing sections fall back to their defaults.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<FrameworkConfig> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_config(&raw)
}

pub fn parse_config(raw: &str) -> anyhow::Result<FrameworkConfig> {
    from_str::<FrameworkConfig>(raw).context("failed to parse config")
}
