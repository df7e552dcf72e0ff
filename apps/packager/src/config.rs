use std::path::PathBuf;

use anyhow::Result;

pub const FULL_OUTPUT_FILE: &str = "app_data_complete.json";
pub const COMPACT_OUTPUT_FILE: &str = "app_data_compact.json";

/// Run configuration loaded from environment variables.
/// Every setting is optional; an empty environment packages the current directory.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_dir: env_or("PACKAGER_DATA_DIR", ".").into(),
            output_dir: env_or("PACKAGER_OUTPUT_DIR", ".").into(),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn full_output_path(&self) -> PathBuf {
        self.output_dir.join(FULL_OUTPUT_FILE)
    }

    pub fn compact_output_path(&self) -> PathBuf {
        self.output_dir.join(COMPACT_OUTPUT_FILE)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
