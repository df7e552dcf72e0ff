use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{json, Value};
use tempfile::Builder;

use crate::errors::PackError;
use crate::models::AssembledDocument;

/// Writes the full document, pretty-printed. Returns the file size in bytes.
pub fn write_full(doc: &AssembledDocument, path: &Path) -> Result<u64, PackError> {
    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(writer, doc)?;
        Ok(())
    })
}

/// Reads the full document back from `full_path` and writes its compact
/// form to `compact_path`. Returns the compact file size in bytes.
pub fn write_compact(full_path: &Path, compact_path: &Path) -> Result<u64, PackError> {
    let full: Value = serde_json::from_slice(&fs::read(full_path)?)?;
    let compact = build_compact(&full);
    write_atomic(compact_path, |writer| {
        serde_json::to_writer(writer, &compact)?;
        Ok(())
    })
}

/// Keeps the fields the front end needs at runtime and recomputes a minimal
/// metadata block. `n_questions` here is the English question count, not the
/// table row count the full document carries.
pub fn build_compact(full: &Value) -> Value {
    let translations = full.get("translations");
    let text_group = |key: &str| {
        translations
            .and_then(|t| t.get(key))
            .cloned()
            .unwrap_or_else(|| json!({}))
    };
    let languages: Vec<String> = full
        .get("job_translations")
        .and_then(Value::as_object)
        .map(|groups| groups.keys().cloned().collect())
        .unwrap_or_default();

    json!({
        "job_translations": field_or(full, "job_translations", json!({})),
        "job_codes": field_or(full, "job_codes", json!([])),
        "scaled_features": field_or(full, "scaled_features", json!([])),
        "pca_weights": field_or(full, "pca_weights", json!([])),
        "questions": field_or(full, "questions", json!({})),
        "mean_norms": field_or(full, "mean_norms", json!({})),
        "sd_norms": field_or(full, "sd_norms", json!({})),
        "weights": field_or(full, "weights", json!([])),
        "scaler_params": field_or(full, "scaler_params", json!({})),
        "translations": {
            "trait_names": text_group("trait_names"),
            "disclaimer": text_group("disclaimer"),
        },
        "metadata": {
            "n_jobs": english_len(full, "job_translations"),
            "n_questions": english_len(full, "questions"),
            "languages": languages,
        },
    })
}

fn field_or(full: &Value, key: &str, default: Value) -> Value {
    full.get(key).cloned().unwrap_or(default)
}

fn english_len(full: &Value, key: &str) -> usize {
    full.get(key)
        .and_then(|group| group.get("en"))
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

/// Writes through a temporary file in the destination directory, so the
/// target is either replaced whole or left untouched. The file is created
/// world-readable (subject to the umask) like a plain `File::create`.
fn write_atomic(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<&mut fs::File>) -> Result<(), PackError>,
) -> Result<u64, PackError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    let mut tmp = builder.prefix(".packager").tempfile_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write(&mut writer)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    let file = tmp.persist(path).map_err(|e| e.error)?;
    Ok(file.metadata()?.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    use crate::assembly::assemble;
    use crate::models::{JobCatalog, Language, NormTables, QuestionSet};
    use crate::sources::SourceBundle;

    fn sample_document() -> AssembledDocument {
        let translations = BTreeMap::from([
            (Language::En, vec!["Chemist".to_string(), "Pilot".to_string()]),
            (Language::Zh, vec!["化学家".to_string(), "飞行员".to_string()]),
            (Language::Ar, vec!["كيميائي".to_string(), "طيار".to_string()]),
        ]);
        let bundle = SourceBundle {
            catalog: JobCatalog {
                translations,
                codes: vec![json!("19-2031"), json!("53-2011")],
                pca_weights: vec![vec![0.25, -0.5], vec![0.125, 1.0]],
                scaled_features: vec![vec![0.1, 0.2], vec![0.3, 0.4]],
            },
            questions: QuestionSet {
                by_language: BTreeMap::from([
                    (Language::En, vec!["I am calm".to_string()]),
                    (Language::Zh, vec!["我很冷静".to_string()]),
                ]),
                n_rows: 1,
                fallbacks: Vec::new(),
            },
            norms: NormTables {
                mean_norms: [(1, vec![2.9, 3.2]), (2, vec![2.7, 3.1])].into_iter().collect(),
                sd_norms: [(1, vec![0.8, 0.7])].into_iter().collect(),
            },
            weights: vec![vec![1.0, 0.0, 0.0, 0.0, 0.0]],
            ..SourceBundle::default()
        };
        assemble(bundle, Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap())
    }

    #[test]
    fn test_full_output_is_pretty_and_keeps_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_data_complete.json");
        let size = write_full(&sample_document(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(size, text.len() as u64);
        assert!(text.starts_with("{\n  \"job_translations\": {\n    \"en\": ["));
        assert!(text.contains("化学家"));
        assert!(text.contains("طيار"));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_full_output_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_data_complete.json");
        fs::write(&path, "stale").unwrap();
        write_full(&sample_document(), &path).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["metadata"]["n_jobs"], 2);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_outputs_readable_like_plain_files() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.json");
        fs::write(&plain, "{}").unwrap();
        // 0o666 minus the umask; the outputs get 0o644 minus the same umask
        let plain_mode = fs::metadata(&plain).unwrap().permissions().mode() & 0o777;

        let full_path = dir.path().join("app_data_complete.json");
        let compact_path = dir.path().join("app_data_compact.json");
        write_full(&sample_document(), &full_path).unwrap();
        write_compact(&full_path, &compact_path).unwrap();

        for path in [&full_path, &compact_path] {
            let mode = fs::metadata(path).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o644 & plain_mode, "{}", path.display());
        }
    }

    #[test]
    fn test_compact_output_is_minified_whitelist() {
        let dir = tempfile::tempdir().unwrap();
        let full_path = dir.path().join("app_data_complete.json");
        let compact_path = dir.path().join("app_data_compact.json");
        write_full(&sample_document(), &full_path).unwrap();
        write_compact(&full_path, &compact_path).unwrap();

        let text = fs::read_to_string(&compact_path).unwrap();
        assert!(!text.contains('\n'));
        assert!(text.starts_with("{\"job_translations\":{\"en\":[\"Chemist\","));
        assert!(text.contains("飞行员"));

        let compact: Value = serde_json::from_str(&text).unwrap();
        let keys: Vec<&str> = compact
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            [
                "job_translations",
                "job_codes",
                "scaled_features",
                "pca_weights",
                "questions",
                "mean_norms",
                "sd_norms",
                "weights",
                "scaler_params",
                "translations",
                "metadata"
            ]
        );
        let translation_keys: Vec<&str> = compact["translations"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(translation_keys, ["trait_names", "disclaimer"]);
        assert_eq!(
            compact["metadata"],
            json!({"n_jobs": 2, "n_questions": 1, "languages": ["en", "zh", "ar"]})
        );
    }

    #[test]
    fn test_compact_fields_equal_full_fields() {
        let dir = tempfile::tempdir().unwrap();
        let full_path = dir.path().join("app_data_complete.json");
        let compact_path = dir.path().join("app_data_compact.json");
        write_full(&sample_document(), &full_path).unwrap();
        write_compact(&full_path, &compact_path).unwrap();

        let full: Value = serde_json::from_slice(&fs::read(&full_path).unwrap()).unwrap();
        let compact: Value = serde_json::from_slice(&fs::read(&compact_path).unwrap()).unwrap();
        for (key, value) in compact.as_object().unwrap() {
            if key == "metadata" || key == "translations" {
                continue;
            }
            assert_eq!(value, &full[key], "{key}");
        }
        for key in ["trait_names", "disclaimer"] {
            assert_eq!(compact["translations"][key], full["translations"][key]);
        }
        assert_eq!(compact["metadata"]["n_jobs"], full["metadata"]["n_jobs"]);
    }

    #[test]
    fn test_compact_from_sparse_document_uses_defaults() {
        let compact = build_compact(&json!({"job_codes": [1, 2]}));
        assert_eq!(compact["job_codes"], json!([1, 2]));
        assert_eq!(compact["job_translations"], json!({}));
        assert_eq!(compact["weights"], json!([]));
        assert_eq!(compact["translations"]["disclaimer"], json!({}));
        assert_eq!(
            compact["metadata"],
            json!({"n_jobs": 0, "n_questions": 0, "languages": []})
        );
    }

    #[test]
    fn test_compact_n_questions_counts_english_questions() {
        let full = json!({
            "questions": {"en": ["a", "b", "c"], "zh": ["甲"]},
            "metadata": {"n_questions": 7}
        });
        assert_eq!(build_compact(&full)["metadata"]["n_questions"], 3);
    }

    #[test]
    fn test_compact_fails_when_full_output_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_compact(
            &dir.path().join("app_data_complete.json"),
            &dir.path().join("app_data_compact.json"),
        )
        .unwrap_err();
        assert!(matches!(err, PackError::Io(_)));
        assert!(!dir.path().join("app_data_compact.json").exists());
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("app_data_complete.json");
        assert!(write_full(&sample_document(), &path).is_err());
    }
}
