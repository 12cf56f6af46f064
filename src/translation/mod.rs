//! Fixed-phrase translation between English and Ugandan languages.
//!
//! The [`PhraseBook`] is built once from the authored table and never changes afterwards.
//! Lookups try the phrase verbatim first and fall back to a case-insensitive scan.

mod phrases;

use std::collections::HashMap;
use std::sync::OnceLock;

use thiserror::Error;

use crate::language::Language;

pub use phrases::{AuthoredTable, AUTHORED};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error("Source and target languages cannot be the same.")]
    SameLanguage,
    #[error("Sorry, translation not available for this text.")]
    NotAvailable,
}

/// How a lookup was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    CaseInsensitive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation<'a> {
    pub text: &'a str,
    pub matched: MatchKind,
}

/// Phrase pairs for one direction, in insertion order.
#[derive(Debug, Default)]
struct PhraseTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl PhraseTable {
    /// Overwrites the translation of an existing phrase in place, keeping its position.
    fn insert(&mut self, phrase: &str, translation: &str) {
        match self.index.get(phrase) {
            Some(&i) => self.entries[i].1 = translation.to_string(),
            None => {
                self.index.insert(phrase.to_string(), self.entries.len());
                self.entries
                    .push((phrase.to_string(), translation.to_string()));
            }
        }
    }

    fn lookup(&self, text: &str) -> Option<Translation<'_>> {
        if let Some(&i) = self.index.get(text) {
            return Some(Translation {
                text: &self.entries[i].1,
                matched: MatchKind::Exact,
            });
        }

        let wanted = text.to_lowercase();
        self.entries
            .iter()
            .find(|(phrase, _)| phrase.to_lowercase() == wanted)
            .map(|(_, translation)| Translation {
                text: translation,
                matched: MatchKind::CaseInsensitive,
            })
    }
}

/// Immutable bidirectional phrase dictionary
#[derive(Debug, Default)]
pub struct PhraseBook {
    tables: HashMap<(Language, Language), PhraseTable>,
}

impl PhraseBook {
    /// The book built from [`AUTHORED`], constructed on first use.
    pub fn global() -> &'static PhraseBook {
        static BOOK: OnceLock<PhraseBook> = OnceLock::new();
        BOOK.get_or_init(|| {
            let book = PhraseBook::from_authored(AUTHORED);
            tracing::debug!("Phrase book built with {} language pairs", book.tables.len());
            book
        })
    }

    /// Builds a book containing every authored pair plus its reverse.
    ///
    /// An authored phrase always wins over a derived one for the same key. When two authored
    /// phrases share a translation, the later one becomes the reverse mapping.
    pub fn from_authored(table: AuthoredTable) -> Self {
        let mut book = PhraseBook::default();

        for (src, tgt, pairs) in table {
            let forward = book.tables.entry((*src, *tgt)).or_default();
            for (phrase, translation) in pairs.iter() {
                forward.insert(phrase, translation);
            }
        }

        let mut derived: HashMap<(Language, Language), PhraseTable> = HashMap::new();
        for (src, tgt, pairs) in table {
            let reverse = derived.entry((*tgt, *src)).or_default();
            for (phrase, translation) in pairs.iter() {
                reverse.insert(translation, phrase);
            }
        }

        for (pair, reverse) in derived {
            let merged = book.tables.entry(pair).or_default();
            for (phrase, translation) in reverse.entries {
                if !merged.index.contains_key(&phrase) {
                    merged.insert(&phrase, &translation);
                }
            }
        }

        book
    }

    /// Looks up `text`, verbatim first, then ignoring case.
    pub fn translate(
        &self,
        source: Language,
        target: Language,
        text: &str,
    ) -> Result<Translation<'_>, TranslationError> {
        if source == target {
            return Err(TranslationError::SameLanguage);
        }

        self.tables
            .get(&(source, target))
            .and_then(|table| table.lookup(text))
            .ok_or(TranslationError::NotAvailable)
    }

    /// Phrases known for a direction, in authored order
    pub fn phrases(&self, source: Language, target: Language) -> impl Iterator<Item = &str> {
        self.tables
            .get(&(source, target))
            .into_iter()
            .flat_map(|table| table.entries.iter().map(|(phrase, _)| phrase.as_str()))
    }
}
