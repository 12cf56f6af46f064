//! Supported languages and their Sunbird service codes.
//!
//! Shared by the transcription client and the phrase translator. Names typed by the user are
//! title-cased before matching, so "luganda" and "LUGANDA" both resolve to [`Language::Luganda`].

use std::fmt;
use std::str::FromStr;

/// A language the tool understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    English,
    Luganda,
    Runyankole,
    Ateso,
    Lugbara,
    Acholi,
}

/// Returned when a name does not match any supported language.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Language '{0}' is not supported.")]
pub struct UnsupportedLanguage(pub String);

impl Language {
    /// Display name, as accepted from the user after title-casing
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Luganda => "Luganda",
            Language::Runyankole => "Runyankole",
            Language::Ateso => "Ateso",
            Language::Lugbara => "Lugbara",
            Language::Acholi => "Acholi",
        }
    }

    /// Three-letter code sent to the speech-to-text service
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "eng",
            Language::Luganda => "lug",
            Language::Runyankole => "nyn",
            Language::Ateso => "teo",
            Language::Lugbara => "lgg",
            Language::Acholi => "ach",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Language::English,
            Language::Luganda,
            Language::Runyankole,
            Language::Ateso,
            Language::Lugbara,
            Language::Acholi,
        ]
    }

    /// Comma-separated list of names for prompts and error messages
    pub fn choices() -> String {
        Self::all()
            .iter()
            .map(|l| l.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Resolves free-form user input by trimming and title-casing it first.
    pub fn from_user_input(input: &str) -> Result<Self, UnsupportedLanguage> {
        title_case(input.trim()).parse()
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    /// Exact, case-sensitive match on the display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|l| l.name() == s)
            .ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Upper-cases the first letter of every word and lower-cases the rest.
///
/// A "word" starts after any non-alphabetic character, so "new-york" becomes "New-York".
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("luganda"), "Luganda");
        assert_eq!(title_case("RUNYANKOLE"), "Runyankole");
        assert_eq!(title_case("aCHOLI"), "Acholi");
        assert_eq!(title_case("good morning"), "Good Morning");
        assert_eq!(title_case("awa'difo"), "Awa'Difo");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_user_input_is_normalized() {
        assert_eq!(Language::from_user_input("  luganda "), Ok(Language::Luganda));
        assert_eq!(Language::from_user_input("ATESO"), Ok(Language::Ateso));
    }

    #[test]
    fn test_from_str_is_exact() {
        assert_eq!("Lugbara".parse::<Language>(), Ok(Language::Lugbara));
        assert!("lugbara".parse::<Language>().is_err());
    }

    #[test]
    fn test_unsupported_names_are_rejected() {
        for name in ["Swahili", "French", "", "Lugandaa", "eng"] {
            let err = Language::from_user_input(name).unwrap_err();
            assert!(err.to_string().contains("is not supported"));
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<_> = Language::all().iter().map(|l| l.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), Language::all().len());
        assert!(codes.iter().all(|c| c.len() == 3));
    }

    #[test]
    fn test_choices_lists_every_language() {
        assert_eq!(
            Language::choices(),
            "English, Luganda, Runyankole, Ateso, Lugbara, Acholi"
        );
    }
}
