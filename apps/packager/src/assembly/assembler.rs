use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::i18n::TRANSLATIONS;
use crate::models::{AssembledDocument, Language, Metadata, ModelInfo, NormGroup};
use crate::sources::SourceBundle;

pub const FORMAT_VERSION: &str = "2.0.0";

/// Provenance list written into every document.
pub const DATA_SOURCES: [&str; 9] = [
    "job_en.npy, job_zh.npy, job_es.npy, job_fr.npy, job_ru.npy, job_ar.npy",
    "job_codes.npy",
    "scaled_job_features.npy",
    "pca_weights.npy",
    "meanNorms.tsv",
    "sdNorms.tsv",
    "questions.tsv",
    "weightsB5.tsv",
    "your_scaler.pkl",
];

/// Shape of the recommender network the front end runs on this data.
pub fn model_info() -> ModelInfo {
    ModelInfo {
        name: "JobRecommenderMLP",
        input_dim: 5,
        hidden_dim: 128,
        output_dim: 263,
    }
}

/// Demographic groups of the norm tables (gender × age threshold 35).
pub fn norm_groups() -> BTreeMap<u8, NormGroup> {
    BTreeMap::from([
        (
            1,
            NormGroup {
                gender: "Female",
                age_range: "<35",
                description: "Female under 35",
            },
        ),
        (
            2,
            NormGroup {
                gender: "Female",
                age_range: ">=35",
                description: "Female 35 and over",
            },
        ),
        (
            3,
            NormGroup {
                gender: "Male",
                age_range: "<35",
                description: "Male under 35",
            },
        ),
        (
            4,
            NormGroup {
                gender: "Male",
                age_range: ">=35",
                description: "Male 35 and over",
            },
        ),
    ])
}

/// Builds the output document from loaded sources.
///
/// Counts and the available-language list are derived from the loaded data:
/// `n_jobs` is the English job list length, `n_questions` the question table
/// row count, `languages_available` the languages a job list was loaded for
/// (including empty lists).
pub fn assemble(bundle: SourceBundle, created_at: DateTime<Utc>) -> AssembledDocument {
    let SourceBundle {
        catalog,
        text_dict,
        language_display,
        questions,
        norms,
        weights,
        scaler,
    } = bundle;

    let job_names = catalog.english().to_vec();
    let metadata = Metadata {
        version: FORMAT_VERSION,
        created_at,
        data_sources: DATA_SOURCES.to_vec(),
        languages_supported: Language::ALL.to_vec(),
        n_jobs: catalog.n_jobs(),
        model_info: model_info(),
        n_questions: questions.n_rows,
        languages_available: catalog.translations.keys().copied().collect(),
    };

    AssembledDocument {
        job_translations: catalog.translations,
        job_codes: catalog.codes,
        pca_weights: catalog.pca_weights,
        scaled_features: catalog.scaled_features,
        job_names,
        text_dict,
        language_display,
        questions: questions.by_language,
        mean_norms: norms.mean_norms,
        sd_norms: norms.sd_norms,
        weights,
        scaler_params: scaler,
        translations: &TRANSLATIONS,
        metadata,
        norm_groups: norm_groups(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    use crate::models::{JobCatalog, QuestionSet};

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    fn jobs(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn bundle_with(translations: Vec<(Language, Vec<&str>)>) -> SourceBundle {
        SourceBundle {
            catalog: JobCatalog {
                translations: translations
                    .into_iter()
                    .map(|(lang, names)| (lang, jobs(&names)))
                    .collect(),
                ..JobCatalog::default()
            },
            ..SourceBundle::default()
        }
    }

    #[test]
    fn test_n_jobs_follows_english_list() {
        let bundle = bundle_with(vec![
            (Language::En, vec!["Chemist", "Baker"]),
            (Language::Zh, vec!["化学家", "面包师", "飞行员"]),
        ]);
        let doc = assemble(bundle, fixed_time());
        assert_eq!(doc.metadata.n_jobs, 2);
        assert_eq!(doc.job_names, jobs(&["Chemist", "Baker"]));
    }

    #[test]
    fn test_n_jobs_zero_without_english() {
        let doc = assemble(bundle_with(vec![(Language::Fr, vec!["Chimiste"])]), fixed_time());
        assert_eq!(doc.metadata.n_jobs, 0);
        assert!(doc.job_names.is_empty());
    }

    #[test]
    fn test_languages_available_matches_translation_keys() {
        let cases = vec![
            vec![],
            vec![(Language::Ar, vec![]), (Language::En, vec!["Pilot"])],
            vec![
                (Language::En, vec!["Pilot"]),
                (Language::Zh, vec!["飞行员"]),
                (Language::Es, vec!["Piloto"]),
                (Language::Fr, vec!["Pilote"]),
                (Language::Ru, vec!["Пилот"]),
                (Language::Ar, vec!["طيار"]),
            ],
        ];
        for case in cases {
            let doc = assemble(bundle_with(case), fixed_time());
            let keys: Vec<Language> = doc.job_translations.keys().copied().collect();
            assert_eq!(doc.metadata.languages_available, keys);
            assert_eq!(
                doc.metadata.n_jobs,
                doc.job_translations
                    .get(&Language::En)
                    .map_or(0, Vec::len)
            );
        }
    }

    #[test]
    fn test_n_questions_is_table_row_count() {
        let mut bundle = SourceBundle::default();
        bundle.questions = QuestionSet {
            by_language: BTreeMap::from([(Language::En, jobs(&["q1", "q2", "q3"]))]),
            n_rows: 3,
            fallbacks: Vec::new(),
        };
        let doc = assemble(bundle, fixed_time());
        assert_eq!(doc.metadata.n_questions, 3);
    }

    #[test]
    fn test_document_top_level_key_order() {
        let doc = assemble(SourceBundle::default(), fixed_time());
        let value = serde_json::to_value(&doc).unwrap();
        let keys: Vec<&str> = value
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
                "pca_weights",
                "scaled_features",
                "job_names",
                "text_dict",
                "language_display",
                "questions",
                "mean_norms",
                "sd_norms",
                "weights",
                "scaler_params",
                "translations",
                "metadata",
                "norm_groups"
            ]
        );
    }

    #[test]
    fn test_empty_sources_serialize_to_empty_defaults() {
        let doc = assemble(SourceBundle::default(), fixed_time());
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["job_translations"], json!({}));
        assert_eq!(value["job_codes"], json!([]));
        assert_eq!(value["questions"], json!({}));
        assert_eq!(value["mean_norms"], json!({}));
        assert_eq!(value["scaler_params"], json!({}));
        assert_eq!(value["text_dict"], json!({}));
    }

    #[test]
    fn test_metadata_shape() {
        let doc = assemble(SourceBundle::default(), fixed_time());
        let metadata = serde_json::to_value(&doc.metadata).unwrap();
        assert_eq!(metadata["version"], "2.0.0");
        assert_eq!(metadata["created_at"], "2026-03-14T09:30:00Z");
        assert_eq!(metadata["data_sources"].as_array().unwrap().len(), 9);
        assert_eq!(
            metadata["languages_supported"],
            json!(["en", "zh", "es", "fr", "ru", "ar"])
        );
        assert_eq!(
            metadata["model_info"],
            json!({"name": "JobRecommenderMLP", "input_dim": 5, "hidden_dim": 128, "output_dim": 263})
        );
        let keys: Vec<&str> = metadata
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            [
                "version",
                "created_at",
                "data_sources",
                "languages_supported",
                "n_jobs",
                "model_info",
                "n_questions",
                "languages_available"
            ]
        );
    }

    #[test]
    fn test_norm_groups_keyed_one_to_four() {
        let value = serde_json::to_value(norm_groups()).unwrap();
        assert_eq!(
            value["3"],
            json!({"gender": "Male", "age_range": "<35", "description": "Male under 35"})
        );
        assert_eq!(value.as_object().unwrap().len(), 4);
    }
}
