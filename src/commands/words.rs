//! Word list and duplicate report commands

use crate::config::Config;
use crate::error::Result;
use crate::words::{
    collect_headwords, count_words, find_duplicates, read_word_list, write_frequency_csv,
    write_word_list, WordFrequency,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Duplicates found in a list of words
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DuplicateReport {
    pub words_read: usize,
    pub unique_words: usize,
    pub duplicates: Vec<WordFrequency>,
    /// Set only when duplicates were found and the CSV was written
    pub report_file: Option<PathBuf>,
}

/// Statistics from compiling the headword list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordsStats {
    pub files_found: usize,
    pub files_skipped: usize,
    pub word_list_file: Option<PathBuf>,
    pub report: DuplicateReport,
}

/// Command-line overrides for `lexdump words`
#[derive(Debug, Clone, Default)]
pub struct WordsOverrides {
    pub data_dir: Option<PathBuf>,
    pub word_list_file: Option<PathBuf>,
    pub duplicates_file: Option<PathBuf>,
}

/// Compile every headword into a list file and report duplicates
pub fn cmd_words(config: &Config, overrides: WordsOverrides) -> Result<WordsStats> {
    let data_dir = overrides
        .data_dir
        .unwrap_or_else(|| PathBuf::from(&config.dump.data_dir));
    let word_list_file = overrides
        .word_list_file
        .unwrap_or_else(|| PathBuf::from(&config.words.word_list_file));
    let duplicates_file = overrides
        .duplicates_file
        .unwrap_or_else(|| PathBuf::from(&config.words.duplicates_file));

    let scan = collect_headwords(&data_dir, &config.dump.extension)?;
    let mut stats = WordsStats {
        files_found: scan.files_found,
        files_skipped: scan.files_skipped,
        ..Default::default()
    };

    if scan.words.is_empty() {
        info!("No words found in {}", data_dir.display());
        return Ok(stats);
    }

    write_word_list(&word_list_file, &scan.words)?;
    info!(
        "Compiled {} words into {}",
        scan.words.len(),
        word_list_file.display()
    );
    stats.word_list_file = Some(word_list_file);
    stats.report = report_duplicates(&scan.words, &duplicates_file)?;

    Ok(stats)
}

/// Report case-insensitive duplicates in a plain-text word list
pub fn cmd_duplicates(input: &Path, output: &Path) -> Result<DuplicateReport> {
    let words = read_word_list(input)?;
    info!("Read {} lines from {}", words.len(), input.display());
    report_duplicates(&words, output)
}

fn report_duplicates(words: &[String], output: &Path) -> Result<DuplicateReport> {
    let counts = count_words(words);
    let duplicates = find_duplicates(&counts);

    let mut report = DuplicateReport {
        words_read: words.len(),
        unique_words: counts.len(),
        duplicates,
        report_file: None,
    };

    if report.duplicates.is_empty() {
        info!("No duplicate words found");
        return Ok(report);
    }

    write_frequency_csv(output, &report.duplicates)?;
    info!(
        "Found {} duplicate words, saved to {}",
        report.duplicates.len(),
        output.display()
    );
    report.report_file = Some(output.to_path_buf());
    Ok(report)
}

/// Print a duplicates report to console
pub fn print_duplicate_report(report: &DuplicateReport) {
    println!("\n🔁 Duplicate Words\n");
    println!("Words read: {}", report.words_read);
    println!("Unique words: {}", report.unique_words);

    if report.duplicates.is_empty() {
        println!("No duplicate words found.");
        return;
    }

    println!("Duplicates: {}", report.duplicates.len());
    for entry in report.duplicates.iter().take(10) {
        println!("  {} ({})", entry.word, entry.frequency);
    }
    if report.duplicates.len() > 10 {
        println!("  ... and {} more", report.duplicates.len() - 10);
    }
    if let Some(path) = &report.report_file {
        println!("\nReport saved to {}", path.display());
    }
}

/// Print headword list stats to console
pub fn print_words_stats(stats: &WordsStats) {
    println!("\n📖 Headword List\n");
    println!("Record files found: {}", stats.files_found);
    println!("Record files skipped: {}", stats.files_skipped);

    match &stats.word_list_file {
        Some(path) => println!("Word list: {}", path.display()),
        None => {
            println!("No words found in the data directory.");
            return;
        }
    }

    print_duplicate_report(&stats.report);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_duplicates_from_text_list() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("word.txt");
        let output = tmp.path().join("duplicated_words.csv");
        fs::write(&input, "Cat\ndog\ncat\n").unwrap();

        let report = cmd_duplicates(&input, &output).unwrap();
        assert_eq!(report.words_read, 3);
        assert_eq!(report.unique_words, 2);
        assert_eq!(report.report_file.as_deref(), Some(output.as_path()));
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "word,frequency\ncat,2\n"
        );
    }

    #[test]
    fn test_no_duplicates_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("word.txt");
        let output = tmp.path().join("duplicated_words.csv");
        fs::write(&input, "cat\ndog\n").unwrap();

        let report = cmd_duplicates(&input, &output).unwrap();
        assert!(report.duplicates.is_empty());
        assert!(report.report_file.is_none());
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_word_list() {
        let tmp = TempDir::new().unwrap();
        let result = cmd_duplicates(&tmp.path().join("word.txt"), &tmp.path().join("out.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_words_from_records() {
        let tmp = TempDir::new().unwrap();
        let data = tmp.path().join("data");
        fs::create_dir(&data).unwrap();
        fs::write(data.join("a.json"), r#"{"word": "Run"}"#).unwrap();
        fs::write(data.join("b.json"), r#"{"word": "walk"}"#).unwrap();
        fs::write(data.join("c.json"), r#"{"word": "run"}"#).unwrap();
        fs::write(data.join("d.json"), "not json").unwrap();

        let overrides = WordsOverrides {
            data_dir: Some(data),
            word_list_file: Some(tmp.path().join("word_list.txt")),
            duplicates_file: Some(tmp.path().join("dupes.csv")),
        };
        let stats = cmd_words(&Config::default(), overrides).unwrap();

        assert_eq!(stats.files_found, 4);
        assert_eq!(stats.files_skipped, 1);
        assert_eq!(
            fs::read_to_string(tmp.path().join("word_list.txt")).unwrap(),
            "Run\nwalk\nrun\n"
        );
        assert_eq!(stats.report.duplicates.len(), 1);
        assert_eq!(stats.report.duplicates[0].word, "run");
        assert_eq!(stats.report.duplicates[0].frequency, 2);
    }

    #[test]
    fn test_words_empty_dir() {
        let tmp = TempDir::new().unwrap();
        let overrides = WordsOverrides {
            data_dir: Some(tmp.path().to_path_buf()),
            word_list_file: Some(tmp.path().join("word_list.txt")),
            duplicates_file: None,
        };
        let stats = cmd_words(&Config::default(), overrides).unwrap();
        assert!(stats.word_list_file.is_none());
        assert!(!tmp.path().join("word_list.txt").exists());
    }
}
