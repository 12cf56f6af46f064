//! Authored phrase table.
//!
//! Only the English -> X direction is written down; the reverse direction is derived when the
//! phrase book is built.

use crate::language::Language;

/// `(source, target, [(phrase, translation)])`
pub type AuthoredTable = &'static [(Language, Language, &'static [(&'static str, &'static str)])];

pub const AUTHORED: AuthoredTable = &[
    (
        Language::English,
        Language::Luganda,
        &[
            ("Hello", "Oli otya"),
            ("How are you?", "Oli otya?"),
            ("Good morning", "Wasuze otya"),
            ("Thank you", "Weebale"),
            ("Goodbye", "Weraba"),
            ("What is your name?", "Amanya go gwe ani?"),
            ("My name is", "Amanya gange"),
            ("I love you", "Nkwagala"),
            ("I am fine", "Ndi bulungi"),
            ("Welcome", "Tukusanyukidde"),
        ],
    ),
    (
        Language::English,
        Language::Runyankole,
        &[
            ("Hello", "Agandi"),
            ("How are you?", "Oli ota?"),
            ("Good morning", "Oraire ota"),
            ("Thank you", "Webale"),
            ("Goodbye", "Urabeho"),
            ("What is your name?", "Nibaiita oha?"),
            ("My name is", "Nibanyeta"),
            ("I love you", "Ninkukunda"),
            ("I am fine", "Ndi kurungi"),
            ("Welcome", "Tukushemereirwe"),
        ],
    ),
    (
        Language::English,
        Language::Ateso,
        &[
            ("Hello", "Yoga"),
            ("How are you?", "Ijok bo?"),
            ("Good morning", "Ejok akwar"),
            ("Thank you", "Eyalama"),
            ("Goodbye", "Awaio"),
            ("What is your name?", "Arai ekon bo?"),
            ("My name is", "Ekon ka"),
            ("I love you", "Amina jo"),
            ("I am fine", "Ajok"),
            ("Welcome", "Aiyalamikin"),
        ],
    ),
    (
        Language::English,
        Language::Lugbara,
        &[
            ("Hello", "Kzi"),
            ("How are you?", "Mi nga ya?"),
            ("Good morning", "Muke cua"),
            ("Thank you", "Awa'difo"),
            ("Goodbye", "Rua pee"),
            ("What is your name?", "Mi ru ngoni?"),
            ("My name is", "Ma ru"),
            ("I love you", "Ma mi nze"),
            ("I am fine", "Ma ovu woro"),
            ("Welcome", "Mu amvu"),
        ],
    ),
    (
        Language::English,
        Language::Acholi,
        &[
            ("Hello", "Kopango"),
            ("How are you?", "Itye nining?"),
            ("Good morning", "Iribedo maber"),
            ("Thank you", "Apwoyo"),
            ("Goodbye", "Orfoyo"),
            ("What is your name?", "Nyingi anga?"),
            ("My name is", "Nyinga en"),
            ("I love you", "Amari"),
            ("I am fine", "Atye maber"),
            ("Welcome", "Ibekwano"),
        ],
    ),
];
