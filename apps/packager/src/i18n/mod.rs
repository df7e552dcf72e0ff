// Static per-language texts shipped with the document. Pure data, no runtime state.

pub mod registry;
pub mod texts;

pub use registry::{Localized, TranslationRegistry};
pub use texts::TRANSLATIONS;
