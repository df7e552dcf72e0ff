use std::fmt;

use serde::{Deserialize, Serialize};

/// Languages the front end ships job names, questions and texts in.
///
/// The derived `Ord` follows declaration order, so a `BTreeMap<Language, _>`
/// serializes its keys as `en, zh, es, fr, ru, ar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Zh,
    Es,
    Fr,
    Ru,
    Ar,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::En,
        Language::Zh,
        Language::Es,
        Language::Fr,
        Language::Ru,
        Language::Ar,
    ];

    /// Column header / file suffix used for this language in the source data.
    pub const fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::Ru => "ru",
            Language::Ar => "ar",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
