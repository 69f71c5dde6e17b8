//! Per-locale grammar table for the clipboard export format.
//!
//! Each row carries the header labels, lookahead windows, positional rules and
//! rarity vocabulary for one locale. The detector picks a row once; every later
//! stage reads the row instead of branching on the language. A new locale is a
//! new row.

use crate::config::{HEADER_LOOKAHEAD, NAME_LOOKAHEAD, SEPARATORS};
use crate::models::{Language, Rarity};

/// How the item name is positioned relative to a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    /// The very next line, if it is plain text.
    Adjacent,
    /// The first plain-text line within the window, skipping headers, blanks
    /// and separators.
    ScanForward(usize),
}

impl NameRule {
    /// Whether headers past a separator may still introduce the name.
    pub fn crosses_separators(self) -> bool {
        matches!(self, Self::ScanForward(_))
    }
}

#[derive(Debug)]
pub struct Grammar {
    pub language: Language,
    pub rarity_label: &'static str,
    pub class_label: &'static str,
    pub header_lookahead: usize,
    pub name_rule: NameRule,
    /// Whether the class header value is reported on the parsed item.
    pub captures_class: bool,
    /// Whether a class header may sit between the name and the base type.
    pub base_type_skips_class: bool,
    /// Regex character class identifying this locale's script, if any.
    pub script: Option<&'static str>,
    /// Header value to canonical rarity name.
    pub rarities: &'static [(&'static str, &'static str)],
}

/// Rows in detection order; the first row is the fallback.
pub static GRAMMARS: [Grammar; 2] = [
    Grammar {
        language: Language::English,
        rarity_label: "Rarity: ",
        class_label: "Item Class: ",
        header_lookahead: HEADER_LOOKAHEAD,
        name_rule: NameRule::Adjacent,
        captures_class: false,
        base_type_skips_class: false,
        script: None,
        rarities: &[
            ("Normal", "Normal"),
            ("Magic", "Magic"),
            ("Rare", "Rare"),
            ("Unique", "Unique"),
            ("Currency", "Currency"),
            ("Gem", "Gem"),
            ("Divination Card", "Divination Card"),
        ],
    },
    Grammar {
        language: Language::Japanese,
        rarity_label: "レアリティ: ",
        class_label: "アイテムクラス: ",
        header_lookahead: HEADER_LOOKAHEAD,
        name_rule: NameRule::ScanForward(NAME_LOOKAHEAD),
        captures_class: true,
        base_type_skips_class: true,
        script: Some(r"[\u{3040}-\u{309F}\u{30A0}-\u{30FF}\u{4E00}-\u{9FAF}]"),
        rarities: &[
            ("ノーマル", "Normal"),
            ("マジック", "Magic"),
            ("レア", "Rare"),
            ("ユニーク", "Unique"),
            ("カレンシー", "Currency"),
            ("通貨", "Currency"),
            ("ジェム", "Gem"),
            ("占いカード", "Divination Card"),
        ],
    },
];

/// Structural role of a normalized line under a given grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Separator,
    RarityHeader,
    ClassHeader,
    Text,
}

impl LineKind {
    pub fn is_header(self) -> bool {
        matches!(self, Self::RarityHeader | Self::ClassHeader)
    }
}

pub fn is_separator(line: &str) -> bool {
    SEPARATORS.contains(&line)
}

impl Grammar {
    pub fn for_language(language: Language) -> &'static Grammar {
        GRAMMARS
            .iter()
            .find(|g| g.language == language)
            .unwrap_or(&GRAMMARS[0])
    }

    pub fn classify(&self, line: &str) -> LineKind {
        if line.is_empty() {
            LineKind::Blank
        } else if is_separator(line) {
            LineKind::Separator
        } else if line.starts_with(self.rarity_label) {
            LineKind::RarityHeader
        } else if line.starts_with(self.class_label) {
            LineKind::ClassHeader
        } else {
            LineKind::Text
        }
    }

    pub fn classify_all(&self, lines: &[String]) -> Vec<LineKind> {
        lines.iter().map(|l| self.classify(l)).collect()
    }

    pub fn rarity_value<'a>(&self, line: &'a str) -> Option<&'a str> {
        line.strip_prefix(self.rarity_label).map(str::trim)
    }

    pub fn class_value<'a>(&self, line: &'a str) -> Option<&'a str> {
        line.strip_prefix(self.class_label).map(str::trim)
    }

    /// Maps a header value to a rarity tag, passing unknown values through.
    pub fn rarity_from(&self, value: &str) -> Rarity {
        self.rarities
            .iter()
            .find(|(label, _)| *label == value)
            .and_then(|(_, canonical)| canonical_rarity(canonical))
            .unwrap_or_else(|| Rarity::Other(value.to_string()))
    }
}

fn canonical_rarity(name: &str) -> Option<Rarity> {
    match name {
        "Normal" => Some(Rarity::Normal),
        "Magic" => Some(Rarity::Magic),
        "Rare" => Some(Rarity::Rare),
        "Unique" => Some(Rarity::Unique),
        "Currency" => Some(Rarity::Currency),
        "Gem" => Some(Rarity::Gem),
        "Divination Card" => Some(Rarity::DivinationCard),
        _ => None,
    }
}
