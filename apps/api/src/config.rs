use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::layout::PaperSize;

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Question generation is disabled when unset.
    pub anthropic_api_key: Option<String>,
    pub paper_size: PaperSize,
    /// When set, every rendered paper is also written here.
    pub paper_archive_dir: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            paper_size: optional_env("PAPER_SIZE")
                .map(|s| s.parse::<PaperSize>().map_err(|e| anyhow!(e)))
                .transpose()
                .context("PAPER_SIZE must be a4 or letter")?
                .unwrap_or(PaperSize::A4),
            paper_archive_dir: optional_env("PAPER_ARCHIVE_DIR").map(PathBuf::from),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Unset and blank values are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
