mod assembly;
mod config;
mod errors;
mod i18n;
mod models;
mod output;
mod pipeline;
mod sources;

use anyhow::Result;
use chrono::Utc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting packager v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Packaging {} into {}",
        config.data_dir.display(),
        config.output_dir.display()
    );

    match pipeline::run(&config, Utc::now()) {
        Ok(outcome) => {
            if !outcome.validation.passed() {
                warn!(
                    "Job arrays disagree on length (languages: {:?}, codes: {}, features: {})",
                    outcome.validation.failed_languages(),
                    outcome.validation.job_codes,
                    outcome.validation.scaled_features
                );
            }
            info!(
                "All conversions complete ({} bytes full, {} compact)",
                outcome.full_bytes,
                outcome
                    .compact_bytes
                    .map_or_else(|| "no".to_string(), |bytes| format!("{bytes} bytes"))
            );
            Ok(())
        }
        Err(e) => {
            error!("Conversion failed: {e:?}");
            Err(e)
        }
    }
}
