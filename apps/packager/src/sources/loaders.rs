use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::errors::PackError;
use crate::models::{
    FittedScaler, JobCatalog, Language, Matrix, NormTable, NormTables, QuestionSet, ScalerParams,
};
use crate::sources::table::{parse_float, parse_int, Table};
use crate::sources::{ArrayLoader, ArrayPayload, LoadReport, SourceLayout, SourceStatus};

/// Every input of a run, coerced to the data model. Absent or unreadable
/// inputs hold their empty default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceBundle {
    pub catalog: JobCatalog,
    pub text_dict: Map<String, Value>,
    pub language_display: Map<String, Value>,
    pub questions: QuestionSet,
    pub norms: NormTables,
    pub weights: Matrix,
    /// `None` when the scaler could not be loaded at all.
    pub scaler: Option<ScalerParams>,
}

/// Loads every input under `layout`. Never fails: each input that is missing
/// or malformed is defaulted and recorded in the returned report.
pub fn load_all(layout: &SourceLayout, loader: &dyn ArrayLoader) -> (SourceBundle, LoadReport) {
    info!("Loading sources from {}", layout.data_dir().display());
    let mut report = LoadReport::default();

    let translations = load_job_translations(layout, loader, &mut report);
    let catalog = load_job_catalog(translations, layout, loader, &mut report);

    let text_dict = load_mapping(&layout.text_dict(), loader, &mut report).unwrap_or_default();
    let language_display =
        load_mapping(&layout.language_display(), loader, &mut report).unwrap_or_default();

    let questions = load_questions(layout, &mut report);

    let norms = NormTables {
        mean_norms: load_norms(&layout.mean_norms(), &mut report),
        sd_norms: load_norms(&layout.sd_norms(), &mut report),
    };
    let weights = load_weights(&layout.weights(), &mut report);

    let scaler = load_scaler(&layout.scaler(), loader, &mut report);

    let bundle = SourceBundle {
        catalog,
        text_dict,
        language_display,
        questions,
        norms,
        weights,
        scaler,
    };
    (bundle, report)
}

// ────────────────────────────────────────────────────────────────────────────
// Array sources
// ────────────────────────────────────────────────────────────────────────────

fn load_job_translations(
    layout: &SourceLayout,
    loader: &dyn ArrayLoader,
    report: &mut LoadReport,
) -> BTreeMap<Language, Vec<String>> {
    let mut translations = BTreeMap::new();
    for lang in Language::ALL {
        let path = layout.job_names(lang);
        let jobs = load_sequence(&path, loader, report, to_strings, Vec::len).unwrap_or_default();
        if !jobs.is_empty() {
            info!("  {lang} examples: {:?}", &jobs[..jobs.len().min(3)]);
        }
        translations.insert(lang, jobs);
    }

    let lengths: Vec<usize> = translations.values().map(Vec::len).collect();
    if lengths.windows(2).any(|pair| pair[0] != pair[1]) {
        warn!("Job name lists differ in length across languages: {lengths:?}");
    }
    translations
}

fn load_job_catalog(
    translations: BTreeMap<Language, Vec<String>>,
    layout: &SourceLayout,
    loader: &dyn ArrayLoader,
    report: &mut LoadReport,
) -> JobCatalog {
    let codes = load_sequence(&layout.job_codes(), loader, report, to_scalars, Vec::len)
        .unwrap_or_default();
    if !codes.is_empty() {
        info!("  job code examples: {:?}", &codes[..codes.len().min(5)]);
    }

    let pca_weights = load_sequence(&layout.pca_weights(), loader, report, to_matrix, Vec::len)
        .unwrap_or_default();
    if let Some(first) = pca_weights.first() {
        info!("  pca weights shape: {} x {}", pca_weights.len(), first.len());
    }

    let scaled_features =
        load_sequence(&layout.scaled_features(), loader, report, to_matrix, Vec::len)
            .unwrap_or_default();

    JobCatalog {
        translations,
        codes,
        pca_weights,
        scaled_features,
    }
}

fn load_sequence<T>(
    path: &Path,
    loader: &dyn ArrayLoader,
    report: &mut LoadReport,
    coerce: impl FnOnce(Vec<Value>, &Path) -> Result<T, PackError>,
    entries: impl Fn(&T) -> usize,
) -> Option<T> {
    let outcome = loader.load(path).and_then(|payload| {
        payload
            .map(|p| p.into_sequence(path).and_then(|items| coerce(items, path)))
            .transpose()
    });
    record(report, path, outcome, entries)
}

fn load_mapping(
    path: &Path,
    loader: &dyn ArrayLoader,
    report: &mut LoadReport,
) -> Option<Map<String, Value>> {
    let outcome = loader
        .load(path)
        .and_then(|payload| payload.map(|p| p.into_mapping(path)).transpose());
    record(report, path, outcome, Map::len)
}

fn load_scaler(
    path: &Path,
    loader: &dyn ArrayLoader,
    report: &mut LoadReport,
) -> Option<ScalerParams> {
    let outcome = loader
        .load(path)
        .and_then(|payload| payload.map(|p| scaler_from_payload(p, path)).transpose());
    record(report, path, outcome, |params: &ScalerParams| params.scale.len())
}

fn scaler_from_payload(payload: ArrayPayload, path: &Path) -> Result<ScalerParams, PackError> {
    let fields = payload.into_mapping(path)?;
    let fitted: FittedScaler = serde_json::from_value(Value::Object(fields))
        .map_err(|e| PackError::malformed(path, e.to_string()))?;
    Ok(fitted.into())
}

// ────────────────────────────────────────────────────────────────────────────
// Table sources
// ────────────────────────────────────────────────────────────────────────────

fn load_questions(layout: &SourceLayout, report: &mut LoadReport) -> QuestionSet {
    let path = layout.questions();
    let outcome = Table::read(&path)
        .and_then(|table| table.map(|t| questions_from_table(&t, &path)).transpose());
    let questions = record(report, &path, outcome, |q: &QuestionSet| q.n_rows).unwrap_or_default();
    for (lang, items) in &questions.by_language {
        info!("  {lang}: {} questions", items.len());
    }
    report.set_question_fallbacks(questions.fallbacks.clone());
    questions
}

/// Builds one question list per language. A language without a column gets
/// a copy of the English column; without an English column that is an error.
pub(crate) fn questions_from_table(table: &Table, path: &Path) -> Result<QuestionSet, PackError> {
    if table.is_empty() {
        warn!("  question table has a header but no rows");
    }
    let english = table.column(Language::En.code());
    let mut questions = QuestionSet {
        n_rows: table.len(),
        ..QuestionSet::default()
    };

    for lang in Language::ALL {
        let column = match table.column(lang.code()) {
            Some(column) => column,
            None => {
                let english = english.clone().ok_or_else(|| {
                    PackError::malformed(
                        path,
                        format!("no '{lang}' column and no 'en' column to fall back to"),
                    )
                })?;
                warn!("  {lang} column not found in questions, using English");
                questions.fallbacks.push(lang);
                english
            }
        };
        questions
            .by_language
            .insert(lang, column.into_iter().map(str::to_string).collect());
    }
    Ok(questions)
}

fn load_norms(path: &Path, report: &mut LoadReport) -> NormTable {
    let outcome =
        Table::read(path).and_then(|table| table.map(|t| norms_from_table(&t, path)).transpose());
    record(report, path, outcome, NormTable::len).unwrap_or_default()
}

/// Rows keyed by their `group` cell; the remaining cells, in column order,
/// are the per-trait statistics.
pub(crate) fn norms_from_table(
    table: &Table,
    path: &Path,
) -> Result<NormTable, PackError> {
    let group_index = table
        .column_index("group")
        .ok_or_else(|| PackError::malformed(path, "no 'group' column"))?;

    let mut norms = NormTable::default();
    for (row_number, row) in (1..).zip(table.rows()) {
        let cell = &row[group_index];
        let group = parse_int(cell).ok_or_else(|| {
            PackError::malformed(path, format!("row {row_number}: group '{cell}' is not an integer"))
        })?;
        let values = row
            .iter()
            .enumerate()
            .filter(|(column, _)| *column != group_index)
            .map(|(column, cell)| {
                parse_float(cell).ok_or_else(|| {
                    PackError::malformed(
                        path,
                        format!(
                            "row {row_number}: '{cell}' in column '{}' is not a number",
                            table.headers()[column]
                        ),
                    )
                })
            })
            .collect::<Result<Vec<f64>, PackError>>()?;
        norms.insert(group, values);
    }
    Ok(norms)
}

fn load_weights(path: &Path, report: &mut LoadReport) -> Matrix {
    let outcome = Table::read(path)
        .and_then(|table| table.map(|t| matrix_from_table(&t, path)).transpose());
    record(report, path, outcome, Vec::len).unwrap_or_default()
}

pub(crate) fn matrix_from_table(table: &Table, path: &Path) -> Result<Matrix, PackError> {
    (1..)
        .zip(table.rows())
        .map(|(row_number, row)| {
            row.iter()
                .map(|cell| {
                    parse_float(cell).ok_or_else(|| {
                        PackError::malformed(path, format!("row {row_number}: '{cell}' is not a number"))
                    })
                })
                .collect::<Result<Vec<f64>, PackError>>()
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Coercions and bookkeeping
// ────────────────────────────────────────────────────────────────────────────

fn to_strings(items: Vec<Value>, path: &Path) -> Result<Vec<String>, PackError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(text) => Ok(text),
            Value::Number(number) => Ok(number.to_string()),
            other => Err(PackError::malformed(
                path,
                format!("element {index} is not text: {other}"),
            )),
        })
        .collect()
}

fn to_scalars(items: Vec<Value>, path: &Path) -> Result<Vec<Value>, PackError> {
    match items
        .iter()
        .position(|item| !(item.is_string() || item.is_number()))
    {
        Some(index) => Err(PackError::malformed(
            path,
            format!("element {index} is not a code: {}", items[index]),
        )),
        None => Ok(items),
    }
}

fn to_matrix(items: Vec<Value>, path: &Path) -> Result<Matrix, PackError> {
    items
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let cells = row
                .as_array()
                .ok_or_else(|| PackError::malformed(path, format!("row {index} is not a list")))?;
            // null is a NaN that already went through JSON once
            cells
                .iter()
                .map(|cell| match cell {
                    Value::Null => Some(f64::NAN),
                    other => other.as_f64(),
                })
                .collect::<Option<Vec<f64>>>()
                .ok_or_else(|| {
                    PackError::malformed(path, format!("row {index} has a non-numeric value"))
                })
        })
        .collect()
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Logs and records the outcome of one source, keeping the value if loaded.
fn record<T>(
    report: &mut LoadReport,
    path: &Path,
    outcome: Result<Option<T>, PackError>,
    entries: impl Fn(&T) -> usize,
) -> Option<T> {
    let name = source_name(path);
    match outcome {
        Ok(Some(value)) => {
            let entries = entries(&value);
            info!("Loaded {name} ({entries} entries)");
            report.record(name, SourceStatus::Loaded { entries });
            Some(value)
        }
        Ok(None) => {
            warn!("{name} not found, using empty default");
            report.record(name, SourceStatus::Missing);
            None
        }
        Err(e) => {
            warn!("{name} could not be read, using empty default: {e}");
            report.record(
                name,
                SourceStatus::Malformed {
                    reason: e.to_string(),
                },
            );
            None
        }
    }
}
