use std::fs;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::assembly::{assemble, log_report, validate, ValidationReport};
use crate::config::Config;
use crate::output::{write_compact, write_full};
use crate::sources::{load_all, FsArrayLoader, SourceLayout};

/// What one run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub validation: ValidationReport,
    pub full_bytes: u64,
    /// `None` when the compact document could not be written.
    pub compact_bytes: Option<u64>,
}

/// Loads, assembles, validates and writes both documents.
///
/// Missing or malformed inputs and failed consistency checks never stop the
/// run. Failing to write the full document does, before the compact step.
pub fn run(config: &Config, created_at: DateTime<Utc>) -> Result<RunOutcome> {
    let layout = SourceLayout::new(&config.data_dir);
    let (bundle, loads) = load_all(&layout, &FsArrayLoader);

    info!("Building complete data structure");
    let document = assemble(bundle, created_at);
    let validation = validate(&document);

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let full_path = config.full_output_path();
    let full_bytes = write_full(&document, &full_path)
        .with_context(|| format!("Failed to write {}", full_path.display()))?;
    info!(
        "Saved {} ({:.2} MB)",
        full_path.display(),
        full_bytes as f64 / 1024.0 / 1024.0
    );

    log_report(&document, &validation, &loads);

    info!("Creating compact version");
    let compact_path = config.compact_output_path();
    let compact_bytes = match write_compact(&full_path, &compact_path) {
        Ok(bytes) => {
            info!(
                "Saved {} ({:.2} KB)",
                compact_path.display(),
                bytes as f64 / 1024.0
            );
            Some(bytes)
        }
        Err(e) => {
            error!("Failed to create compact version: {e}");
            None
        }
    };

    Ok(RunOutcome {
        validation,
        full_bytes,
        compact_bytes,
    })
}
