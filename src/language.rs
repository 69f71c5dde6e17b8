use crate::grammar::GRAMMARS;
use crate::models::Language;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static SCRIPT_PATTERNS: Lazy<Vec<(Language, Regex)>> = Lazy::new(|| {
    GRAMMARS
        .iter()
        .filter_map(|g| g.script.map(|s| (g.language, Regex::new(s).unwrap())))
        .collect()
});

/// Picks the grammar locale from the script used in the leading lines.
///
/// Only the first `window` lines are inspected so that long mod lists do not
/// change the result. Falls back to the first grammar row.
pub fn detect(lines: &[String], window: usize) -> Language {
    let head = &lines[..lines.len().min(window)];
    for (language, pattern) in SCRIPT_PATTERNS.iter() {
        if let Some(pos) = head.iter().position(|line| pattern.is_match(line)) {
            debug!(language = %language, line = pos, "Locale script found");
            return *language;
        }
    }
    GRAMMARS[0].language
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HEADER_LOOKAHEAD;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    #[test]
    fn latin_text_is_english() {
        let l = lines("Rarity: Rare\nHeavy Belt\nLeather Belt");
        assert_eq!(detect(&l, HEADER_LOOKAHEAD), Language::English);
    }

    #[test]
    fn kana_and_kanji_are_japanese() {
        assert_eq!(detect(&lines("ひらがな"), HEADER_LOOKAHEAD), Language::Japanese);
        assert_eq!(detect(&lines("カタカナ"), HEADER_LOOKAHEAD), Language::Japanese);
        assert_eq!(detect(&lines("重厚"), HEADER_LOOKAHEAD), Language::Japanese);
    }

    #[test]
    fn script_on_last_window_line_counts() {
        let mut l = vec!["Heavy Belt".to_string(); 9];
        l.push("力".to_string());
        assert_eq!(detect(&l, 10), Language::Japanese);
    }

    #[test]
    fn script_past_window_is_ignored() {
        let mut l = vec!["Heavy Belt".to_string(); 10];
        l.push("力".to_string());
        assert_eq!(detect(&l, 10), Language::English);
    }

    #[test]
    fn empty_lines_are_english() {
        assert_eq!(detect(&[], HEADER_LOOKAHEAD), Language::English);
    }
}
