use std::path::{Path, PathBuf};

use crate::models::Language;

/// Where each input lives inside the data directory.
///
/// Array inputs may be present in more than one form (the `.npy` written by
/// the training side, or a JSON export of it); the first existing candidate
/// wins. When none exists the first candidate is reported as missing.
#[derive(Debug, Clone)]
pub struct SourceLayout {
    data_dir: PathBuf,
}

impl SourceLayout {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        SourceLayout {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn job_names(&self, lang: Language) -> PathBuf {
        self.resolve_stem(&format!("job_{lang}"), &["npy", "json"])
    }

    pub fn job_codes(&self) -> PathBuf {
        self.resolve_stem("job_codes", &["npy", "json"])
    }

    pub fn pca_weights(&self) -> PathBuf {
        self.resolve_stem("pca_weights", &["npy", "json"])
    }

    pub fn scaled_features(&self) -> PathBuf {
        self.resolve_stem("scaled_job_features", &["npy", "json"])
    }

    pub fn text_dict(&self) -> PathBuf {
        self.resolve_stem("text_dict", &["json", "npy"])
    }

    pub fn language_display(&self) -> PathBuf {
        self.resolve_stem("language_display", &["json", "npy"])
    }

    pub fn scaler(&self) -> PathBuf {
        self.resolve_stem("your_scaler", &["json", "pkl"])
    }

    pub fn questions(&self) -> PathBuf {
        self.data_dir.join("questions.tsv")
    }

    pub fn mean_norms(&self) -> PathBuf {
        self.data_dir.join("meanNorms.tsv")
    }

    pub fn sd_norms(&self) -> PathBuf {
        self.data_dir.join("sdNorms.tsv")
    }

    pub fn weights(&self) -> PathBuf {
        self.data_dir.join("weightsB5.tsv")
    }

    fn resolve_stem(&self, stem: &str, extensions: &[&str]) -> PathBuf {
        let candidates: Vec<PathBuf> = extensions
            .iter()
            .map(|ext| self.data_dir.join(format!("{stem}.{ext}")))
            .collect();
        candidates
            .iter()
            .find(|path| path.is_file())
            .or_else(|| candidates.first())
            .cloned()
            .unwrap_or_else(|| self.data_dir.join(stem))
    }
}
