// Assembly: merge loaded sources into the output document, then re-check
// the document for cross-source consistency.

pub mod assembler;
pub mod validator;

pub use assembler::assemble;
pub use validator::{log_report, validate, ValidationReport};
