// Data model of one packaging run: per-source entities and the assembled document.

pub mod document;
pub mod language;

pub use document::{
    AssembledDocument, FittedScaler, JobCatalog, Matrix, Metadata, ModelInfo, NormGroup,
    NormTable, NormTables, QuestionSet, ScalerParams,
};
pub use language::Language;
