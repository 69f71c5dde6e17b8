//! Header block extraction: rarity, item name, base type and item class.
//!
//! Lines are classified once against the selected grammar, then a small
//! forward cursor walks the classified lines. What the cursor skips, takes or
//! stops on comes from the grammar row, so both locales share one control flow.

use crate::config::PLACEHOLDER_NAME;
use crate::grammar::{Grammar, LineKind, NameRule};
use crate::models::{ParseFailure, Rarity};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub rarity: Rarity,
    pub item_name: String,
    pub base_type: Option<String>,
    pub item_class: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Skip,
    Take,
    Stop,
}

/// Bounded forward scan over classified lines.
struct Cursor<'a> {
    kinds: &'a [LineKind],
    pos: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    fn new(kinds: &'a [LineKind], start: usize, window: usize) -> Self {
        Self {
            kinds,
            pos: start,
            end: start.saturating_add(window).min(kinds.len()),
        }
    }

    fn find(&mut self, step: impl Fn(LineKind) -> Step) -> Option<usize> {
        while self.pos < self.end {
            let idx = self.pos;
            self.pos += 1;
            match step(self.kinds[idx]) {
                Step::Take => return Some(idx),
                Step::Skip => {}
                Step::Stop => return None,
            }
        }
        None
    }
}

pub fn extract(lines: &[String], grammar: &Grammar) -> Result<Header, ParseFailure> {
    let kinds = grammar.classify_all(lines);
    let rarity = detect_rarity(lines, grammar);

    let name_idx = locate_name(&kinds, grammar).ok_or(ParseFailure::NameNotFound)?;
    let item_name = &lines[name_idx];
    if item_name == PLACEHOLDER_NAME {
        debug!("Located name is the placeholder");
        return Err(ParseFailure::NameNotFound);
    }
    debug!(line = name_idx, name = %item_name, "Found item name");

    let base_type = locate_base_type(&kinds, name_idx, grammar).map(|i| lines[i].clone());
    let item_class = extract_class(lines, grammar);

    Ok(Header {
        rarity,
        item_name: item_name.clone(),
        base_type,
        item_class,
    })
}

/// First rarity header inside the lookahead window, or `Rarity::Unknown`.
pub fn detect_rarity(lines: &[String], grammar: &Grammar) -> Rarity {
    let found = lines
        .iter()
        .take(grammar.header_lookahead)
        .find_map(|line| grammar.rarity_value(line));
    match found {
        Some(value) => {
            let rarity = grammar.rarity_from(value);
            debug!(rarity = %rarity, recognized = rarity.is_recognized(), "Found rarity");
            rarity
        }
        None => {
            debug!(window = grammar.header_lookahead, "No rarity header in window");
            Rarity::Unknown
        }
    }
}

fn locate_name(kinds: &[LineKind], grammar: &Grammar) -> Option<usize> {
    for (i, kind) in kinds.iter().enumerate() {
        match kind {
            LineKind::Separator if !grammar.name_rule.crosses_separators() => break,
            k if k.is_header() => {
                if let Some(idx) = name_after(kinds, i, grammar.name_rule) {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn name_after(kinds: &[LineKind], header: usize, rule: NameRule) -> Option<usize> {
    match rule {
        NameRule::Adjacent => Cursor::new(kinds, header + 1, 1).find(|kind| match kind {
            LineKind::Text => Step::Take,
            _ => Step::Stop,
        }),
        NameRule::ScanForward(window) => {
            Cursor::new(kinds, header + 1, window).find(|kind| match kind {
                LineKind::Text => Step::Take,
                LineKind::Blank
                | LineKind::Separator
                | LineKind::RarityHeader
                | LineKind::ClassHeader => Step::Skip,
            })
        }
    }
}

fn locate_base_type(kinds: &[LineKind], name_idx: usize, grammar: &Grammar) -> Option<usize> {
    let skips_class = grammar.base_type_skips_class;
    Cursor::new(kinds, name_idx + 1, usize::MAX).find(|kind| match kind {
        LineKind::Text => Step::Take,
        LineKind::ClassHeader if skips_class => Step::Skip,
        _ => Step::Stop,
    })
}

fn extract_class(lines: &[String], grammar: &Grammar) -> Option<String> {
    if !grammar.captures_class {
        return None;
    }
    lines
        .iter()
        .find_map(|line| grammar.class_value(line))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(|l| l.trim().to_string()).collect()
    }

    fn english(text: &str) -> Result<Header, ParseFailure> {
        extract(&lines(text), Grammar::for_language(Language::English))
    }

    fn japanese(text: &str) -> Result<Header, ParseFailure> {
        extract(&lines(text), Grammar::for_language(Language::Japanese))
    }

    #[test]
    fn cursor_respects_window() {
        let kinds = [LineKind::Blank, LineKind::Blank, LineKind::Text];
        assert_eq!(Cursor::new(&kinds, 0, 2).find(|_| Step::Skip), None);
        let take_text = |k: LineKind| if k == LineKind::Text { Step::Take } else { Step::Skip };
        assert_eq!(Cursor::new(&kinds, 0, 3).find(take_text), Some(2));
        assert_eq!(Cursor::new(&kinds, 0, usize::MAX).find(take_text), Some(2));
        assert_eq!(Cursor::new(&kinds, 5, 3).find(take_text), None);
    }

    #[test]
    fn english_name_and_base_type() {
        let header = english("Rarity: Rare\nHeavy Belt\nLeather Belt\n--------\n+40 to Strength")
            .unwrap();
        assert_eq!(header.rarity, Rarity::Rare);
        assert_eq!(header.item_name, "Heavy Belt");
        assert_eq!(header.base_type.as_deref(), Some("Leather Belt"));
        assert_eq!(header.item_class, None);
    }

    #[test]
    fn english_class_line_before_rarity() {
        let header =
            english("Item Class: Belts\nRarity: Magic\nStout Leather Belt of the Whale\n--------")
                .unwrap();
        assert_eq!(header.rarity, Rarity::Magic);
        assert_eq!(header.item_name, "Stout Leather Belt of the Whale");
        assert_eq!(header.base_type, None);
        // English class values are never reported
        assert_eq!(header.item_class, None);
    }

    #[test]
    fn english_name_must_be_adjacent() {
        assert_eq!(
            english("Rarity: Rare\n\nHeavy Belt"),
            Err(ParseFailure::NameNotFound)
        );
    }

    #[test]
    fn separator_is_never_a_name() {
        assert_eq!(
            english("Rarity: Rare\n--------\nno real name here"),
            Err(ParseFailure::NameNotFound)
        );
    }

    #[test]
    fn headers_after_separator_are_ignored() {
        assert_eq!(
            english("Some Text\n--------\nRarity: Rare\nHeavy Belt"),
            Err(ParseFailure::NameNotFound)
        );
    }

    #[test]
    fn placeholder_name_is_not_found() {
        assert_eq!(
            english("Rarity: Rare\nUnknown Item\nLeather Belt"),
            Err(ParseFailure::NameNotFound)
        );
    }

    #[test]
    fn base_type_stops_at_blank_or_separator() {
        assert_eq!(english("Rarity: Rare\nHeavy Belt\n\nLeather Belt").unwrap().base_type, None);
        assert_eq!(english("Rarity: Rare\nHeavy Belt\n---\nLeather Belt").unwrap().base_type, None);
        assert_eq!(english("Rarity: Rare\nHeavy Belt").unwrap().base_type, None);
    }

    #[test]
    fn missing_rarity_is_unknown() {
        let header = english("Item Class: Stackable Currency\nExalted Orb\n--------").unwrap();
        assert_eq!(header.rarity, Rarity::Unknown);
        assert_eq!(header.item_name, "Exalted Orb");
    }

    #[test]
    fn rarity_outside_window_is_unknown() {
        let mut text = "filler\n".repeat(10);
        text.push_str("Rarity: Rare\nHeavy Belt");
        let header = english(&text).unwrap();
        assert_eq!(header.rarity, Rarity::Unknown);
        assert_eq!(header.item_name, "Heavy Belt");
    }

    #[test]
    fn unrecognized_rarity_passes_through() {
        let header = english("Rarity: Exotic\nStrange Thing").unwrap();
        assert_eq!(header.rarity, Rarity::Other("Exotic".to_string()));
    }

    #[test]
    fn japanese_full_header() {
        let header = japanese(
            "レアリティ: レア\nアイテムクラス: ベルト\n重厚なベルト\n革のベルト\n---\n#c8c8c8 力+40",
        )
        .unwrap();
        assert_eq!(header.rarity, Rarity::Rare);
        assert_eq!(header.item_class.as_deref(), Some("ベルト"));
        assert_eq!(header.item_name, "重厚なベルト");
        assert_eq!(header.base_type.as_deref(), Some("革のベルト"));
    }

    #[test]
    fn japanese_name_skips_blanks() {
        let header = japanese("アイテムクラス: ベルト\n\nレアリティ: ユニーク\n\nチャユラの目").unwrap();
        assert_eq!(header.rarity, Rarity::Unique);
        assert_eq!(header.item_name, "チャユラの目");
    }

    #[test]
    fn japanese_name_window_is_four_lines() {
        assert!(japanese("レアリティ: レア\n\n\n\n重厚なベルト").is_ok());
        assert_eq!(
            japanese("レアリティ: レア\n\n\n\n\n重厚なベルト"),
            Err(ParseFailure::NameNotFound)
        );
    }

    #[test]
    fn japanese_name_scan_skips_separator() {
        let header = japanese("レアリティ: レア\n--------\n力+40").unwrap();
        assert_eq!(header.item_name, "力+40");

        let header = japanese("レアリティ: レア\n---\n重厚なベルト\n革のベルト").unwrap();
        assert_eq!(header.item_name, "重厚なベルト");
        assert_eq!(header.base_type.as_deref(), Some("革のベルト"));
    }

    #[test]
    fn japanese_separators_count_toward_name_window() {
        assert_eq!(
            japanese("レアリティ: レア\n---\n\n--------\n\n重厚なベルト"),
            Err(ParseFailure::NameNotFound)
        );
    }

    #[test]
    fn japanese_header_after_separator_introduces_name() {
        let header = japanese("付箋\n---\nレアリティ: ユニーク\nチャユラの目").unwrap();
        assert_eq!(header.rarity, Rarity::Unique);
        assert_eq!(header.item_name, "チャユラの目");
    }

    #[test]
    fn japanese_class_found_past_header_window() {
        let mut text = String::from("レアリティ: レア\n重厚なベルト\n---\n");
        text.push_str(&"力+1\n".repeat(12));
        text.push_str("アイテムクラス: ベルト");
        let header = japanese(&text).unwrap();
        assert_eq!(header.item_class.as_deref(), Some("ベルト"));
    }

    #[test]
    fn japanese_base_type_skips_class_line() {
        let header = japanese("レアリティ: レア\n重厚なベルト\nアイテムクラス: ベルト\n革のベルト\n---")
            .unwrap();
        assert_eq!(header.item_name, "重厚なベルト");
        assert_eq!(header.base_type.as_deref(), Some("革のベルト"));
        assert_eq!(header.item_class.as_deref(), Some("ベルト"));
    }

    #[test]
    fn japanese_unknown_rarity_kept_verbatim() {
        let header = japanese("レアリティ: 伝説\n重厚なベルト").unwrap();
        assert_eq!(header.rarity, Rarity::Other("伝説".to_string()));
    }
}
