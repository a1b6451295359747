mod language;
mod translations;

pub use language::{Language, UnsupportedLanguageError};
pub use translations::Translator;
