/// Splits raw export text into trimmed lines.
///
/// Blank lines are kept as empty strings; their positions matter to the
/// header and mod stages. Returns `None` when there is nothing to parse.
pub fn normalize(text: &str) -> Option<Vec<String>> {
    if text.is_empty() {
        return None;
    }
    Some(text.split('\n').map(|line| line.trim().to_string()).collect())
}
