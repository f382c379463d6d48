//! Word lists and case-insensitive duplicate reports

use crate::error::{Error, Result};
use crate::models::HeadwordOnly;
use crate::source::{list_records, load_record, Loaded};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// A normalized word and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub frequency: usize,
}

/// Trim and lower-case a word; blank input yields `None`.
pub fn normalize(word: &str) -> Option<String> {
    let trimmed = word.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Count normalized occurrences of each word.
pub fn count_words<I, S>(words: I) -> HashMap<String, usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = HashMap::new();
    for word in words {
        if let Some(key) = normalize(word.as_ref()) {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    counts
}

/// All counts, highest frequency first, ties broken alphabetically.
pub fn rank(counts: &HashMap<String, usize>) -> Vec<WordFrequency> {
    let mut ranked: Vec<WordFrequency> = counts
        .iter()
        .map(|(word, &frequency)| WordFrequency {
            word: word.clone(),
            frequency,
        })
        .collect();
    ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.word.cmp(&b.word)));
    ranked
}

/// Only the words seen more than once, in ranked order.
pub fn find_duplicates(counts: &HashMap<String, usize>) -> Vec<WordFrequency> {
    rank(counts)
        .into_iter()
        .filter(|entry| entry.frequency > 1)
        .collect()
}

/// Read a word list, one word per line.
pub fn read_word_list(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(Error::InvalidPath(format!(
            "{}: file not found",
            path.display()
        )));
    }
    let content = fs::read_to_string(path)?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Write words one per line.
pub fn write_word_list(path: &Path, words: &[String]) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::OutputCreate {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    for word in words {
        writeln!(out, "{word}")?;
    }
    out.flush()?;
    Ok(())
}

/// Write a `word,frequency` CSV report with a header row.
pub fn write_frequency_csv(path: &Path, rows: &[WordFrequency]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Headwords of every readable record in `dir`, in file-name order.
/// Files that cannot be read or parsed, or lack a string `word`, are skipped.
pub fn collect_headwords(dir: &Path, extension: &str) -> Result<HeadwordScan> {
    let files = list_records(dir, extension)?;
    let mut scan = HeadwordScan {
        files_found: files.len(),
        ..Default::default()
    };

    for path in &files {
        match load_record::<HeadwordOnly>(path) {
            Ok(Loaded::Parsed(record)) => match record.word.as_ref().and_then(|w| w.as_str()) {
                Some(word) => scan.words.push(word.to_string()),
                None => debug!("No word in {}", path.display()),
            },
            Ok(Loaded::Malformed(reason)) => {
                warn!("Could not process file '{}': {}. Skipping.", path.display(), reason);
                scan.files_skipped += 1;
            }
            Err(e) => {
                warn!("Could not process file '{}': {}. Skipping.", path.display(), e);
                scan.files_skipped += 1;
            }
        }
    }

    info!(
        "Collected {} headwords from {} files",
        scan.words.len(),
        scan.files_found
    );
    Ok(scan)
}

/// Result of scanning a record directory for headwords
#[derive(Debug, Clone, Default)]
pub struct HeadwordScan {
    pub files_found: usize,
    pub files_skipped: usize,
    pub words: Vec<String>,
}
