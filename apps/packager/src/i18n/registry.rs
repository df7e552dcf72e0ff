use serde::Serialize;

use crate::models::Language;

/// One value per supported language. Serializes as an object keyed by
/// language code in the fixed language order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Localized<T> {
    pub en: T,
    pub zh: T,
    pub es: T,
    pub fr: T,
    pub ru: T,
    pub ar: T,
}

impl<T> Localized<T> {
    pub fn get(&self, lang: Language) -> &T {
        match lang {
            Language::En => &self.en,
            Language::Zh => &self.zh,
            Language::Es => &self.es,
            Language::Fr => &self.fr,
            Language::Ru => &self.ru,
            Language::Ar => &self.ar,
        }
    }
}

/// Semantic key → language → text. Field order is the serialized key order.
#[derive(Debug, Serialize)]
pub struct TranslationRegistry {
    pub titles: Localized<&'static str>,
    pub trait_names: Localized<[&'static str; 5]>,
    pub disclaimer: Localized<&'static str>,
    pub ideal_job_prompt: Localized<&'static str>,
    pub ideal_job_warning: Localized<&'static str>,
    /// Contains a single `{}` placeholder for the matched job name.
    pub ideal_job_result: Localized<&'static str>,
    pub closest_text: Localized<&'static str>,
    pub furthest_text: Localized<&'static str>,
}

impl TranslationRegistry {
    /// Fills the placeholder of the ideal-job result message.
    #[allow(dead_code)]
    pub fn format_ideal_job_result(&self, lang: Language, job_name: &str) -> String {
        self.ideal_job_result.get(lang).replacen("{}", job_name, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::TRANSLATIONS;

    #[test]
    fn test_get_returns_language_value() {
        assert_eq!(
            *TRANSLATIONS.closest_text.get(Language::En),
            "Your trait closest to the ideal career:"
        );
        assert_eq!(TRANSLATIONS.trait_names.get(Language::Zh)[0], "神经质");
    }

    #[test]
    fn test_format_ideal_job_result_fills_placeholder() {
        let text = TRANSLATIONS.format_ideal_job_result(Language::En, "Data Scientist");
        assert_eq!(text, "The career closest to your ideal is: **Data Scientist**");
        assert!(!text.contains("{}"));
    }

    #[test]
    fn test_format_ideal_job_result_keeps_braces_in_job_name() {
        let text = TRANSLATIONS.format_ideal_job_result(Language::Fr, "{}");
        assert_eq!(text, "Le métier le plus proche de votre idéal est : **{}**");
    }

    #[test]
    fn test_every_result_message_has_one_placeholder() {
        for lang in Language::ALL {
            assert_eq!(
                TRANSLATIONS.ideal_job_result.get(lang).matches("{}").count(),
                1,
                "{lang}"
            );
        }
    }

    #[test]
    fn test_serialized_key_order() {
        let value = serde_json::to_value(&TRANSLATIONS).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            [
                "titles",
                "trait_names",
                "disclaimer",
                "ideal_job_prompt",
                "ideal_job_warning",
                "ideal_job_result",
                "closest_text",
                "furthest_text"
            ]
        );
        let langs: Vec<&str> = value["titles"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(langs, ["en", "zh", "es", "fr", "ru", "ar"]);
    }
}
