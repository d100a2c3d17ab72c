//! Runtime configuration read from the environment.
//!
//! Values can come from the process environment or a `.env` file loaded at
//! startup.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::presenter::charts::ChartSize;

pub const DEFAULT_LOG_FILE_PATH: &str = "logs/company_analyzer.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Daily-rolled JSON log file (`LOG_FILE_PATH`).
    pub log_file_path: PathBuf,
    /// Chart dimensions (`CHART_WIDTH`, `CHART_HEIGHT`).
    pub chart_size: ChartSize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file_path: PathBuf::from(DEFAULT_LOG_FILE_PATH),
            chart_size: ChartSize::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_file_path = lookup("LOG_FILE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file_path);
        let width = pixels(&lookup, "CHART_WIDTH")?.unwrap_or(defaults.chart_size.width);
        let height = pixels(&lookup, "CHART_HEIGHT")?.unwrap_or(defaults.chart_size.height);

        Ok(Self {
            log_file_path,
            chart_size: ChartSize { width, height },
        })
    }
}

fn pixels<F>(lookup: &F, key: &str) -> Result<Option<u32>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => {
            let value: u32 = raw
                .trim()
                .parse()
                .with_context(|| format!("{key} must be a positive integer, got '{raw}'"))?;
            if value == 0 {
                anyhow::bail!("{key} must be a positive integer, got '{raw}'");
            }
            Ok(Some(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.log_file_path,
            PathBuf::from("logs/company_analyzer.log")
        );
    }

    #[test]
    fn test_overrides() {
        let vars = env(&[
            ("LOG_FILE_PATH", "/var/log/companies.log"),
            ("CHART_WIDTH", "1200"),
            ("CHART_HEIGHT", " 800 "),
        ]);

        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(
            config.log_file_path,
            PathBuf::from("/var/log/companies.log")
        );
        assert_eq!(
            config.chart_size,
            ChartSize {
                width: 1200,
                height: 800
            }
        );
    }

    #[test]
    fn test_invalid_dimensions() {
        let vars = env(&[("CHART_WIDTH", "wide")]);
        assert!(Config::from_lookup(|k| vars.get(k).cloned()).is_err());

        let vars = env(&[("CHART_HEIGHT", "0")]);
        assert!(Config::from_lookup(|k| vars.get(k).cloned()).is_err());
    }

    // Helper functions for tests
    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}
