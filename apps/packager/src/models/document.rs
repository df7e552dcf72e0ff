use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::i18n::TranslationRegistry;
use crate::models::language::Language;

/// Row-major matrix of floats as read from the array and table sources.
pub type Matrix = Vec<Vec<f64>>;

/// Labels of the five scaler input features, in model input order.
pub const TRAIT_NAMES: [&str; 5] = [
    "Neuroticism",
    "Extraversion",
    "Openness",
    "Agreeableness",
    "Conscientiousness",
];

// ────────────────────────────────────────────────────────────────────────────
// Source entities
// ────────────────────────────────────────────────────────────────────────────

/// Everything known about the job list. Lengths are expected to agree with
/// the English job list but are only checked after assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobCatalog {
    pub translations: BTreeMap<Language, Vec<String>>,
    /// Occupation codes, kept as read (string or integer codes).
    pub codes: Vec<Value>,
    pub pca_weights: Matrix,
    /// One row per job.
    pub scaled_features: Matrix,
}

impl JobCatalog {
    pub fn english(&self) -> &[String] {
        self.translations
            .get(&Language::En)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Job count: length of the English list, 0 when it is absent.
    pub fn n_jobs(&self) -> usize {
        self.english().len()
    }
}

/// Questionnaire items per language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionSet {
    pub by_language: BTreeMap<Language, Vec<String>>,
    /// Row count of the source table.
    pub n_rows: usize,
    /// Languages whose column was missing and got a copy of the English column.
    pub fallbacks: Vec<Language>,
}

/// Statistics per demographic group in table row order. Serializes as an
/// object keyed by group number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormTable {
    rows: Vec<(i64, Vec<f64>)>,
}

impl NormTable {
    /// A repeated group overwrites the earlier values but keeps its position.
    pub fn insert(&mut self, group: i64, values: Vec<f64>) {
        match self.rows.iter_mut().find(|(existing, _)| *existing == group) {
            Some((_, slot)) => *slot = values,
            None => self.rows.push((group, values)),
        }
    }

    pub fn get(&self, group: i64) -> Option<&[f64]> {
        self.rows
            .iter()
            .find(|(existing, _)| *existing == group)
            .map(|(_, values)| values.as_slice())
    }

    pub fn groups(&self) -> impl Iterator<Item = i64> + '_ {
        self.rows.iter().map(|(group, _)| *group)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<(i64, Vec<f64>)> for NormTable {
    fn from_iter<I: IntoIterator<Item = (i64, Vec<f64>)>>(iter: I) -> Self {
        let mut table = NormTable::default();
        for (group, values) in iter {
            table.insert(group, values);
        }
        table
    }
}

impl Serialize for NormTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (group, values) in &self.rows {
            map.serialize_entry(group, values)?;
        }
        map.end()
    }
}

/// Population statistics per demographic group, one value per trait.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormTables {
    pub mean_norms: NormTable,
    pub sd_norms: NormTable,
}

/// Fitted standardization object as exported from the training side.
/// Every attribute is optional; a scaler fitted with `with_mean=False`
/// carries a null mean, for example.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FittedScaler {
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
    #[serde(default)]
    pub var: Option<Vec<f64>>,
    #[serde(default)]
    pub n_samples_seen: Option<u64>,
}

/// Scaler parameters as shipped to the front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    pub var: Vec<f64>,
    pub n_samples_seen: u64,
    pub feature_names: Vec<String>,
}

impl From<FittedScaler> for ScalerParams {
    fn from(scaler: FittedScaler) -> Self {
        ScalerParams {
            mean: scaler.mean.unwrap_or_default(),
            scale: scaler.scale.unwrap_or_default(),
            var: scaler.var.unwrap_or_default(),
            n_samples_seen: scaler.n_samples_seen.unwrap_or(0),
            feature_names: TRAIT_NAMES.iter().map(|name| name.to_string()).collect(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Assembled document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub name: &'static str,
    pub input_dim: u32,
    pub hidden_dim: u32,
    pub output_dim: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormGroup {
    pub gender: &'static str,
    pub age_range: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub version: &'static str,
    pub created_at: DateTime<Utc>,
    pub data_sources: Vec<&'static str>,
    pub languages_supported: Vec<Language>,
    pub n_jobs: usize,
    pub model_info: ModelInfo,
    pub n_questions: usize,
    pub languages_available: Vec<Language>,
}

/// The root object written to the full output. Field order is the key order
/// of the serialized document.
#[derive(Debug, Clone, Serialize)]
pub struct AssembledDocument {
    pub job_translations: BTreeMap<Language, Vec<String>>,
    pub job_codes: Vec<Value>,
    pub pca_weights: Matrix,
    pub scaled_features: Matrix,
    /// English job names for consumers unaware of `job_translations`.
    pub job_names: Vec<String>,
    pub text_dict: Map<String, Value>,
    pub language_display: Map<String, Value>,
    pub questions: BTreeMap<Language, Vec<String>>,
    pub mean_norms: NormTable,
    pub sd_norms: NormTable,
    pub weights: Matrix,
    #[serde(serialize_with = "serialize_scaler_params")]
    pub scaler_params: Option<ScalerParams>,
    pub translations: &'static TranslationRegistry,
    pub metadata: Metadata,
    pub norm_groups: BTreeMap<u8, NormGroup>,
}

/// A missing scaler is written as `{}` rather than `null`.
fn serialize_scaler_params<S>(params: &Option<ScalerParams>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match params {
        Some(params) => params.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
