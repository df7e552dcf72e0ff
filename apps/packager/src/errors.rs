use std::path::PathBuf;

use thiserror::Error;

/// Failure modes of a single source or output file.
///
/// Loaders recover from every variant by substituting the default value.
/// While writing output, any of them is fatal. An absent file is not an
/// error at all; loaders report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("Malformed input {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PackError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PackError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_path_and_reason() {
        let err = PackError::malformed("data/job_en.npy", "bad magic string");
        assert_eq!(
            err.to_string(),
            "Malformed input data/job_en.npy: bad magic string"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PackError = io.into();
        assert!(matches!(err, PackError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }
}
