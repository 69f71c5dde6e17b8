use crate::config::PROGRESS_INTERVAL;
use crate::models::ParseOutcome;
use crate::parser::parse_clipboard;
use crate::stats::ParseStats;
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

pub const REPORT_HEADER: [&str; 9] = [
    "file",
    "valid",
    "language",
    "rarity",
    "item_name",
    "base_type",
    "item_class",
    "mods",
    "failure",
];

/// Lists regular files in `dir`, sorted by file name.
fn list_dumps(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("Failed to list: {}", dir.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to stat: {}", entry.path().display()))?;
        if file_type.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Files that are not valid UTF-8 are treated like a non-text clipboard.
fn parse_file(path: &Path) -> Result<ParseOutcome> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read item dump: {}", path.display()))?;
    let text = std::str::from_utf8(&bytes).ok();
    if text.is_none() {
        debug!(path = %path.display(), "Item dump is not UTF-8");
    }
    Ok(parse_clipboard(text))
}

/// Parses every file in `dir` in parallel and optionally writes a CSV report.
pub fn run_batch(dir: &Path, report: Option<&Path>) -> Result<ParseStats> {
    let files = list_dumps(dir)?;
    info!(files = files.len(), dir = %dir.display(), "Parsing item dumps");

    let stats = ParseStats::new();
    let done = AtomicU64::new(0);
    let pb = ProgressBar::new(files.len() as u64);

    let outcomes = files
        .par_iter()
        .map(|path| -> Result<ParseOutcome> {
            let outcome = parse_file(path)?;
            stats.record(&outcome);
            let n = done.fetch_add(1, Ordering::Relaxed) + 1;
            if n % PROGRESS_INTERVAL == 0 {
                pb.set_position(n);
            }
            Ok(outcome)
        })
        .collect::<Result<Vec<_>>>()?;

    pb.finish_and_clear();

    if let Some(report) = report {
        write_report(report, &files, &outcomes)?;
    }

    info!(
        inputs = stats.inputs(),
        valid = stats.valid(),
        invalid = stats.invalid(),
        "Batch complete"
    );

    Ok(stats)
}

fn write_report(path: &Path, files: &[PathBuf], outcomes: &[ParseOutcome]) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create report: {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    writer.write_record(REPORT_HEADER)?;

    for (file, outcome) in files.iter().zip(outcomes) {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let row = match outcome {
            ParseOutcome::Valid(item) => [
                name,
                "true".to_string(),
                item.language.to_string(),
                item.rarity.to_string(),
                item.item_name.clone(),
                item.base_type.clone().unwrap_or_default(),
                item.item_class.clone().unwrap_or_default(),
                item.mods.len().to_string(),
                String::new(),
            ],
            ParseOutcome::Invalid { reason, .. } => [
                name,
                "false".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                "0".to_string(),
                reason.to_string(),
            ],
        };
        writer.write_record(&row)?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    info!(rows = outcomes.len(), path = %path.display(), "Report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &[u8]) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    #[test]
    fn list_dumps_sorted_and_files_only() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.txt", b"x");
        write(&dir, "a.txt", b"x");
        fs::create_dir(dir.path().join("nested")).unwrap();

        let files = list_dumps(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn non_utf8_file_is_empty_input() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bin", &[0xff, 0xfe, 0x00]);
        let outcome = parse_file(&dir.path().join("bin")).unwrap();
        assert_eq!(outcome.failure(), Some(crate::models::ParseFailure::EmptyInput));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(run_batch(&dir.path().join("missing"), None).is_err());
    }

    #[test]
    fn empty_directory_has_no_inputs() {
        let dir = TempDir::new().unwrap();
        let stats = run_batch(dir.path(), None).unwrap();
        assert_eq!(stats.inputs(), 0);
    }
}
