use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Sv,
}

#[derive(Error, Debug)]
#[error("unsupported language: {0}. Available languages: en, sv")]
pub struct UnsupportedLanguageError(String);

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Sv => "sv",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Sv => "Svenska",
        }
    }

    fn english_name(&self) -> &'static str {
        match self {
            Language::En => "english",
            Language::Sv => "swedish",
        }
    }

    pub fn available_languages() -> &'static [Language] {
        &[Language::En, Language::Sv]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguageError;

    /// Matches codes and language names case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Language::available_languages()
            .iter()
            .copied()
            .find(|language| {
                language.code() == wanted
                    || language.english_name() == wanted
                    || language.display_name().to_lowercase() == wanted
            })
            .ok_or_else(|| UnsupportedLanguageError(s.to_string()))
    }
}
