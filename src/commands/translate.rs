//! Phrase translation from the built-in phrase book.
//!
//! With source, target and text on the command line the lookup runs once. Otherwise an
//! interactive loop asks for each piece until the user is done.

use std::process;

use cliclack::{confirm, input, intro, log, outro};
use console::style;

use crate::language::Language;
use crate::translation::{MatchKind, PhraseBook, TranslationError};

/// Command-line inputs of `ugtt translate`
#[derive(Debug, Default)]
pub struct TranslateArgs {
    pub text: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

pub fn handle_translate(args: TranslateArgs) -> anyhow::Result<()> {
    tracing::info!("=== ugtt Translate Command ===");

    match args {
        TranslateArgs {
            text: Some(text),
            from: Some(from),
            to: Some(to),
        } => translate_once(&from, &to, &text),
        _ => run_interactive(),
    }
}

fn parse_language(name: &str) -> anyhow::Result<Language> {
    Language::from_user_input(name).map_err(|_| {
        anyhow::anyhow!(
            "Invalid language '{name}'. Please choose one of: {}",
            Language::choices()
        )
    })
}

fn translate_once(from: &str, to: &str, text: &str) -> anyhow::Result<()> {
    let source = parse_language(from)?;
    let target = parse_language(to)?;

    match PhraseBook::global().translate(source, target, text.trim()) {
        Ok(hit) => {
            tracing::debug!("Translated {source} -> {target} ({:?})", hit.matched);
            println!("{}", hit.text);
            Ok(())
        }
        Err(TranslationError::NotAvailable) => {
            tracing::info!("No translation for '{text}' ({source} -> {target})");
            eprintln!("{}", TranslationError::NotAvailable);
            process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn run_interactive() -> anyhow::Result<()> {
    intro(style(" translate ").on_white().black())?;
    log::info("Welcome to the Ugandan Language Translator!")?;

    let book = PhraseBook::global();
    let choices = Language::choices();

    loop {
        let source_name: String = input(format!("Source language ({choices}):")).interact()?;
        let Ok(source) = Language::from_user_input(&source_name) else {
            log::error(format!("Invalid language. Please choose one of: {choices}"))?;
            continue;
        };

        let target_name: String = input(format!("Target language ({choices}):")).interact()?;
        let Ok(target) = Language::from_user_input(&target_name) else {
            log::error(format!("Invalid language. Please choose one of: {choices}"))?;
            continue;
        };

        if source == target {
            log::error(TranslationError::SameLanguage)?;
            continue;
        }

        let text: String = input("Enter the text to translate:").interact()?;
        match book.translate(source, target, text.trim()) {
            Ok(hit) => {
                if hit.matched == MatchKind::CaseInsensitive {
                    tracing::debug!("Case-insensitive match for '{}'", text.trim());
                }
                log::success(hit.text)?;
            }
            Err(e) => {
                tracing::debug!(
                    "'{}' not among {} phrases for {source} -> {target}",
                    text.trim(),
                    book.phrases(source, target).count()
                );
                log::warning(e)?;
            }
        }

        let again = confirm("Would you like to translate something else?")
            .initial_value(true)
            .interact()?;
        if !again {
            break;
        }
    }

    outro("Thank you for using the Ugandan Language Translator. Goodbye!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_title_cases() {
        assert_eq!(parse_language("runyankole").unwrap(), Language::Runyankole);
        let err = parse_language("Dutch").unwrap_err();
        assert!(err.to_string().starts_with("Invalid language 'Dutch'"));
    }

    #[test]
    fn test_translate_once_prints_known_phrase() {
        translate_once("english", "ACHOLI", " Thank you ").unwrap();
    }

    #[test]
    fn test_translate_once_rejects_same_language() {
        let err = translate_once("Luganda", "luganda", "Weebale").unwrap_err();
        assert_eq!(err.to_string(), "Source and target languages cannot be the same.");
    }
}
