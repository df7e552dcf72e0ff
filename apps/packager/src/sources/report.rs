use serde::Serialize;

use crate::models::Language;

/// Outcome of loading one source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    Loaded { entries: usize },
    Missing,
    Malformed { reason: String },
}

impl SourceStatus {
    /// True when the default value was substituted for this source.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, SourceStatus::Loaded { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceRecord {
    pub name: String,
    #[serde(flatten)]
    pub status: SourceStatus,
}

/// Per-source outcomes of one run, in load order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    records: Vec<SourceRecord>,
    /// Languages whose question column was missing and got the English text.
    question_fallbacks: Vec<Language>,
}

impl LoadReport {
    pub fn record(&mut self, name: impl Into<String>, status: SourceStatus) {
        self.records.push(SourceRecord {
            name: name.into(),
            status,
        });
    }

    pub fn set_question_fallbacks(&mut self, languages: Vec<Language>) {
        self.question_fallbacks = languages;
    }

    pub fn question_fallbacks(&self) -> &[Language] {
        &self.question_fallbacks
    }

    pub fn records(&self) -> &[SourceRecord] {
        &self.records
    }

    #[cfg(test)]
    pub fn status_of(&self, name: &str) -> Option<&SourceStatus> {
        self.records
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.status)
    }

    pub fn degraded(&self) -> impl Iterator<Item = &SourceRecord> {
        self.records.iter().filter(|r| r.status.is_degraded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_lists_missing_and_malformed() {
        let mut report = LoadReport::default();
        report.record("job_en.npy", SourceStatus::Loaded { entries: 263 });
        report.record("job_ar.npy", SourceStatus::Missing);
        report.record(
            "your_scaler.pkl",
            SourceStatus::Malformed {
                reason: "pickled".to_string(),
            },
        );

        let degraded: Vec<&str> = report.degraded().map(|r| r.name.as_str()).collect();
        assert_eq!(degraded, ["job_ar.npy", "your_scaler.pkl"]);
        assert_eq!(
            report.status_of("job_en.npy"),
            Some(&SourceStatus::Loaded { entries: 263 })
        );
        assert_eq!(report.status_of("weightsB5.tsv"), None);
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = SourceRecord {
            name: "meanNorms.tsv".to_string(),
            status: SourceStatus::Loaded { entries: 4 },
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"name":"meanNorms.tsv","status":"loaded","entries":4}"#
        );
    }
}
