use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::models::{AssembledDocument, Language};
use crate::sources::LoadReport;

/// Consistency of the job arrays against the English job count.
///
/// The checks are independent; a failure in one does not imply anything
/// about the others, so no overall verdict is computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub n_jobs: usize,
    /// Per language: job list length equals `n_jobs`.
    pub translations: BTreeMap<Language, bool>,
    pub job_codes: bool,
    pub scaled_features: bool,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.job_codes && self.scaled_features && self.failed_languages().is_empty()
    }

    pub fn failed_languages(&self) -> Vec<Language> {
        self.translations
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(lang, _)| *lang)
            .collect()
    }
}

/// Re-derives the job count from the document and checks each job array against it.
pub fn validate(doc: &AssembledDocument) -> ValidationReport {
    let n_jobs = doc
        .job_translations
        .get(&Language::En)
        .map_or(0, Vec::len);

    ValidationReport {
        n_jobs,
        translations: doc
            .job_translations
            .iter()
            .map(|(lang, jobs)| (*lang, jobs.len() == n_jobs))
            .collect(),
        job_codes: doc.job_codes.len() == n_jobs,
        scaled_features: doc.scaled_features.len() == n_jobs,
    }
}

/// Logs the data summary, the validation results and every degraded source.
pub fn log_report(doc: &AssembledDocument, validation: &ValidationReport, loads: &LoadReport) {
    info!("Data summary:");
    info!("  total jobs: {}", validation.n_jobs);
    info!("  total questions: {}", doc.metadata.n_questions);
    info!("  languages available: {}", doc.job_translations.len());
    info!("  job feature rows: {}", doc.scaled_features.len());
    info!("  norm groups: {}", doc.norm_groups.len());
    info!(
        "  question languages: {:?}",
        doc.questions.keys().map(|lang| lang.code()).collect::<Vec<_>>()
    );

    info!("Data validation:");
    for (lang, ok) in &validation.translations {
        let jobs = doc.job_translations.get(lang).map_or(0, Vec::len);
        if *ok {
            info!("  job translations [{lang}]: true");
        } else {
            warn!(
                "  job translations [{lang}]: false ({jobs} names, expected {})",
                validation.n_jobs
            );
        }
    }
    log_check("job codes", validation.job_codes, doc.job_codes.len(), validation.n_jobs);
    log_check(
        "scaled features",
        validation.scaled_features,
        doc.scaled_features.len(),
        validation.n_jobs,
    );

    let degraded = loads.degraded().count();
    info!(
        "  sources loaded: {}/{}",
        loads.records().len() - degraded,
        loads.records().len()
    );
    if !loads.question_fallbacks().is_empty() {
        warn!(
            "  questions copied from English for: {:?}",
            loads
                .question_fallbacks()
                .iter()
                .map(|lang| lang.code())
                .collect::<Vec<_>>()
        );
    }
    for record in loads.degraded() {
        warn!("  degraded source {}: {:?}", record.name, record.status);
    }

    info!("Example data (first 3 jobs per language):");
    for (lang, jobs) in &doc.job_translations {
        info!("  {}: {:?}", lang.code().to_uppercase(), &jobs[..jobs.len().min(3)]);
    }
}

fn log_check(label: &str, ok: bool, actual: usize, expected: usize) {
    if ok {
        info!("  {label}: true");
    } else {
        warn!("  {label}: false ({actual} entries, expected {expected})");
    }
}
