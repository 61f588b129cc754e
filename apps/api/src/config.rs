use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::layout::LayoutConfig;
use crate::quantity::QuantityPolicy;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON quantity policy; the built-in house tables are used when unset.
    pub policy_path: Option<PathBuf>,
    pub layout: LayoutConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = LayoutConfig::default();

        let config = Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            policy_path: lookup("POLICY_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            layout: LayoutConfig {
                first_page_budget: parse_or(&lookup, "FIRST_PAGE_BUDGET", defaults.first_page_budget)?,
                continuation_page_budget: parse_or(
                    &lookup,
                    "CONTINUATION_PAGE_BUDGET",
                    defaults.continuation_page_budget,
                )?,
                section_overhead_lines: parse_or(
                    &lookup,
                    "SECTION_OVERHEAD_LINES",
                    defaults.section_overhead_lines,
                )?,
            },
        };
        config
            .layout
            .validate()
            .context("Invalid page layout configuration")?;
        Ok(config)
    }

    /// Loads the quantity policy named by `POLICY_PATH`, or the default tables.
    pub fn load_policy(&self) -> Result<QuantityPolicy> {
        match &self.policy_path {
            Some(path) => QuantityPolicy::from_json_file(path),
            None => Ok(QuantityPolicy::default()),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}
