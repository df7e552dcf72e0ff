// Serializer: full (pretty) and compact (pruned, minified) JSON documents.

pub mod serializer;

pub use serializer::{write_compact, write_full};
