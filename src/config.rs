use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Dataset location when `CONFRANK_DATA_PATH` is unset.
pub const DEFAULT_DATA_PATH: &str = "./data/conferences.csv";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. CLI flags
/// override these values.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the conference CSV (CONFRANK_DATA_PATH)
    pub data_path: PathBuf,
    /// Days a deadline must lie beyond today to count as upcoming (CONFRANK_DAY_PAD)
    pub day_pad: i64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let data_path = env::var("CONFRANK_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH));

        let day_pad = match env::var("CONFRANK_DAY_PAD") {
            Ok(raw) => parse_day_pad(&raw)?,
            Err(_) => 0,
        };

        Ok(Self { data_path, day_pad })
    }

    /// Check that the dataset file exists.
    /// Call this before loading so the user gets a hint instead of an I/O error.
    pub fn require_dataset(&self) -> Result<()> {
        if !self.data_path.is_file() {
            anyhow::bail!(
                "Dataset not found at {}\n\
                 Set CONFRANK_DATA_PATH in your .env file or pass --data <PATH>.",
                self.data_path.display()
            );
        }
        Ok(())
    }
}

fn parse_day_pad(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .with_context(|| format!("CONFRANK_DAY_PAD must be a whole number of days, got `{raw}`"))
}
