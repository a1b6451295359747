use super::Language;
use crate::domain::minor_to_major;
use std::collections::HashMap;

const EN_TRANSLATIONS: &str = include_str!("locales/en.toml");
const SV_TRANSLATIONS: &str = include_str!("locales/sv.toml");

/// Dashboard labels and number formatting for one language.
#[derive(Debug, Clone)]
pub struct Translator {
    language: Language,
    translations: HashMap<String, String>,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        let catalog = match language {
            Language::En => EN_TRANSLATIONS,
            Language::Sv => SV_TRANSLATIONS,
        };

        Self {
            language,
            translations: parse_translations(catalog),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn get(&self, key: &str) -> String {
        self.translations
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.get(key), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }

    /// Minor-unit amount rendered as whole major units with the currency
    /// suffix, e.g. `1,500 kr` or `1 500 kr`.
    pub fn amount(&self, minor_units: i64) -> String {
        let major = minor_to_major(minor_units).round() as i64;
        format!("{} {}", self.count(major), self.get("today.currency"))
    }

    pub fn count(&self, value: i64) -> String {
        let separator = match self.language {
            Language::En => ',',
            Language::Sv => '\u{a0}',
        };
        group_thousands(value, separator)
    }

    pub fn percent(&self, value: f64) -> String {
        let formatted = format!("{:.1}", value);
        match self.language {
            Language::En => format!("{} %", formatted),
            Language::Sv => format!("{} %", formatted.replace('.', ",")),
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

fn group_thousands(value: i64, separator: char) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn parse_translations(content: &str) -> HashMap<String, String> {
    let Ok(toml::Value::Table(sections)) = toml::from_str::<toml::Value>(content) else {
        return HashMap::new();
    };

    sections
        .into_iter()
        .filter_map(|(section, values)| match values {
            toml::Value::Table(entries) => Some((section, entries)),
            _ => None,
        })
        .flat_map(|(section, entries)| {
            entries.into_iter().filter_map(move |(key, value)| match value {
                toml::Value::String(text) => Some((format!("{}.{}", section, key), text)),
                _ => None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translator_loads_english() {
        let translator = Translator::new(Language::En);

        assert_eq!(translator.get("today.header"), "Today's sales");
        assert_eq!(translator.get("today.orders"), "Orders");
    }

    #[test]
    fn translator_loads_swedish() {
        let translator = Translator::new(Language::Sv);

        assert_eq!(translator.get("today.header"), "Dagens försäljning");
        assert_eq!(translator.get("today.average_order"), "Snittköp");
    }

    #[test]
    fn translator_returns_key_for_missing_translation() {
        let translator = Translator::new(Language::En);

        assert_eq!(translator.get("nonexistent.key"), "nonexistent.key");
    }

    #[test]
    fn translator_formats_placeholders() {
        let translator = Translator::new(Language::En);

        let result = translator.format("today.scope_shop", &[("shop", "S1")]);
        assert_eq!(result, "shop S1");
    }

    #[test]
    fn english_amounts_use_comma_grouping() {
        let translator = Translator::new(Language::En);

        assert_eq!(translator.amount(150_000), "1,500 kr");
        assert_eq!(translator.amount(123_456_789), "1,234,568 kr");
        assert_eq!(translator.amount(0), "0 kr");
    }

    #[test]
    fn swedish_amounts_use_space_grouping() {
        let translator = Translator::new(Language::Sv);

        assert_eq!(translator.amount(2_500_000), "25\u{a0}000 kr");
        assert_eq!(translator.percent(7.5), "7,5 %");
    }

    #[test]
    fn counts_keep_sign() {
        let translator = Translator::new(Language::En);

        assert_eq!(translator.count(-1234), "-1,234");
        assert_eq!(translator.count(999), "999");
    }

    #[test]
    fn both_locales_define_the_same_keys() {
        let english = parse_translations(EN_TRANSLATIONS);
        let swedish = parse_translations(SV_TRANSLATIONS);

        let mut english_keys: Vec<_> = english.keys().collect();
        let mut swedish_keys: Vec<_> = swedish.keys().collect();
        english_keys.sort();
        swedish_keys.sort();

        assert_eq!(english_keys, swedish_keys);
    }
}
