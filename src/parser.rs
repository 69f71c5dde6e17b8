//! Clipboard item text parser.
//!
//! Four pure stages run in a fixed order over one immutable line buffer:
//! normalize, detect the locale, extract the header block, collect mods.
//! The parser is total: every input yields a [`ParseOutcome`].

use crate::config::HEADER_LOOKAHEAD;
use crate::grammar::Grammar;
use crate::models::{ParseFailure, ParseOutcome, ParsedItem};
use crate::{header, language, mods, normalize};
use tracing::debug;

pub fn parse_item(text: &str) -> ParseOutcome {
    debug!(length = text.len(), "Parsing item text");

    let lines = match normalize::normalize(text) {
        Some(lines) => lines,
        None => return ParseOutcome::invalid(ParseFailure::EmptyInput, text),
    };
    debug!(lines = lines.len(), "Split into lines");

    let language = language::detect(&lines, HEADER_LOOKAHEAD);
    let grammar = Grammar::for_language(language);
    debug!(language = %language, "Selected grammar");

    let header = match header::extract(&lines, grammar) {
        Ok(header) => header,
        Err(reason) => {
            debug!(reason = %reason, "Rejecting item text");
            return ParseOutcome::invalid(reason, text);
        }
    };

    let mods = mods::extract_mods(&lines);
    debug!(mods = mods.len(), "Collected mods");

    ParseOutcome::Valid(ParsedItem {
        rarity: header.rarity,
        item_name: header.item_name,
        base_type: header.base_type,
        item_class: header.item_class,
        mods,
        language,
        raw_text: text.to_string(),
    })
}

/// Entry point for clipboard reads, where the content may be absent or not text.
pub fn parse_clipboard(text: Option<&str>) -> ParseOutcome {
    match text {
        Some(text) => parse_item(text),
        None => ParseOutcome::invalid(ParseFailure::EmptyInput, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, Rarity};

    #[test]
    fn english_rare_belt() {
        let text = "Rarity: Rare\nHeavy Belt\nLeather Belt\n--------\n+40 to Strength";
        let outcome = parse_item(text);
        let item = outcome.item().unwrap();
        assert_eq!(item.rarity, Rarity::Rare);
        assert_eq!(item.item_name, "Heavy Belt");
        assert_eq!(item.base_type.as_deref(), Some("Leather Belt"));
        assert_eq!(item.item_class, None);
        assert_eq!(item.mods, vec!["+40 to Strength"]);
        assert_eq!(item.language, Language::English);
        assert_eq!(item.raw_text, text);
    }

    #[test]
    fn empty_text_is_empty_input() {
        assert_eq!(parse_item("").failure(), Some(ParseFailure::EmptyInput));
    }

    #[test]
    fn absent_clipboard_is_empty_input() {
        let outcome = parse_clipboard(None);
        assert_eq!(outcome.failure(), Some(ParseFailure::EmptyInput));
        assert_eq!(outcome.raw_text(), "");
    }

    #[test]
    fn clipboard_text_is_parsed() {
        let outcome = parse_clipboard(Some("Rarity: Unique\nEye of Chayula\nCryptic Ruby"));
        assert_eq!(outcome.item().unwrap().item_name, "Eye of Chayula");
    }

    #[test]
    fn whitespace_only_has_no_name() {
        let outcome = parse_item(" \n\t\n ");
        assert_eq!(outcome.failure(), Some(ParseFailure::NameNotFound));
        assert_eq!(outcome.raw_text(), " \n\t\n ");
    }

    #[test]
    fn name_not_found_keeps_raw_text() {
        let text = "Rarity: Rare\n--------\nno real name here";
        let outcome = parse_item(text);
        assert_eq!(outcome.failure(), Some(ParseFailure::NameNotFound));
        assert_eq!(outcome.raw_text(), text);
    }

    #[test]
    fn japanese_rare_belt() {
        let text = "レアリティ: レア\nアイテムクラス: ベルト\n重厚なベルト\n革のベルト\n---\n#c8c8c8 力+40";
        let item = parse_item(text).item().cloned().unwrap();
        assert_eq!(item.rarity, Rarity::Rare);
        assert_eq!(item.item_class.as_deref(), Some("ベルト"));
        assert_eq!(item.item_name, "重厚なベルト");
        assert_eq!(item.base_type.as_deref(), Some("革のベルト"));
        assert_eq!(item.mods, vec!["力+40"]);
        assert_eq!(item.language, Language::Japanese);
    }
}
