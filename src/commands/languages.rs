//! List the supported languages and their service codes.

use console::style;

use crate::language::Language;

pub fn handle_languages() {
    for language in Language::all() {
        println!("{:<12} {}", language.name(), style(language.code()).dim());
    }
}
