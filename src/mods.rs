use crate::grammar::is_separator;
use once_cell::sync::Lazy;
use regex::Regex;

static COLOR_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[0-9a-fA-F]{6}").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    OutsideMods,
    InsideMods,
}

/// Collects modifier lines in source order.
///
/// Everything after the first separator is a candidate; further separators
/// keep the section open. Independent of locale.
pub fn extract_mods(lines: &[String]) -> Vec<String> {
    let mut mods = Vec::new();
    let mut section = Section::OutsideMods;

    for line in lines {
        if is_separator(line) {
            section = Section::InsideMods;
            continue;
        }
        if section == Section::InsideMods && !line.is_empty() {
            let cleaned = strip_color_tags(line);
            if !cleaned.is_empty() {
                mods.push(cleaned);
            }
        }
    }

    mods
}

/// Removes `#RRGGBB` color markup and trims what is left.
pub fn strip_color_tags(line: &str) -> String {
    COLOR_TAG_REGEX.replace_all(line, "").trim().to_string()
}
