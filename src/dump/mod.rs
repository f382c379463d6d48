//! SQL dump generation
//!
//! Turns a directory of per-word JSON records into numbered PostgreSQL dump
//! files. The pipeline is strictly sequential:
//!
//! ```text
//!   sorted record files ──► parse ──► assign id ──► RowBlock ──► DumpWriter
//!                             │                                   (rotates by size)
//!                             └─ malformed: warn + skip, no id
//! ```
//!
//! Headword ids are handed out only after a record parsed, so child rows
//! always point at the headword emitted in the same block.

mod block;
mod escape;
mod schema;
mod writer;

pub use block::RowBlock;
pub use escape::{quote, SqlLiteral, NULL};
pub use schema::{part_header, SCHEMA_SQL};
pub use writer::{DumpWriter, WrittenFiles};

use crate::config::DumpConfig;
use crate::error::Result;
use crate::models::WordEntry;
use crate::progress::{advance_progress, finish_progress, start_progress_bar};
use crate::source::{list_records, load_record, Loaded};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Inputs for one dump run
#[derive(Debug, Clone)]
pub struct DumpOptions {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub max_file_bytes: u64,
    pub extension: String,
}

impl From<&DumpConfig> for DumpOptions {
    fn from(config: &DumpConfig) -> Self {
        Self {
            data_dir: PathBuf::from(&config.data_dir),
            output_dir: PathBuf::from(&config.output_dir),
            file_prefix: config.file_prefix.clone(),
            max_file_bytes: config.max_file_bytes,
            extension: config.extension.clone(),
        }
    }
}

/// Statistics from a dump run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpStats {
    pub files_found: usize,
    pub files_skipped: usize,
    pub headwords: u64,
    pub definitions: usize,
    pub phrases: usize,
    pub examples: usize,
    pub bytes_written: u64,
    pub output_files: Vec<PathBuf>,
}

/// Generate the dump files described by `options`.
pub fn generate_dump(options: &DumpOptions) -> Result<DumpStats> {
    let files = list_records(&options.data_dir, &options.extension)?;
    info!(
        "Found {} record files in {}",
        files.len(),
        options.data_dir.display()
    );

    let mut stats = DumpStats {
        files_found: files.len(),
        ..Default::default()
    };

    let mut writer = DumpWriter::create(
        &options.output_dir,
        &options.file_prefix,
        options.max_file_bytes,
    )?;

    let progress = start_progress_bar(files.len(), "Converting records");
    let mut next_id: u64 = 0;

    for path in &files {
        debug!("Processing file: {}", path.display());

        let entry = match load_record::<WordEntry>(path)? {
            Loaded::Parsed(entry) => entry,
            Loaded::Malformed(reason) => {
                warn!("Skipping invalid JSON file: {}: {}", path.display(), reason);
                stats.files_skipped += 1;
                advance_progress(&progress);
                continue;
            }
        };

        next_id += 1;
        let block = RowBlock::build(next_id, &entry);
        debug!(id = next_id, bytes = block.byte_len(), "Row block for '{}'", entry.word);
        writer.write_block(block.as_str())?;

        stats.headwords += 1;
        stats.definitions += block.definitions;
        stats.phrases += block.phrases;
        stats.examples += block.examples;
        advance_progress(&progress);
    }

    finish_progress(progress, "Records converted");

    let written = writer.finish()?;
    stats.bytes_written = written.bytes_written;
    stats.output_files = written.files;

    info!(
        headwords = stats.headwords,
        skipped = stats.files_skipped,
        parts = stats.output_files.len(),
        "Dump complete"
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn options(tmp: &Path, max_file_bytes: u64) -> DumpOptions {
        DumpOptions {
            data_dir: tmp.join("data"),
            output_dir: tmp.join("sql_dumps"),
            file_prefix: "dump".to_string(),
            max_file_bytes,
            extension: "json".to_string(),
        }
    }

    fn write_records(tmp: &Path, records: &[(&str, &str)]) {
        let data = tmp.join("data");
        fs::create_dir_all(&data).unwrap();
        for (name, body) in records {
            fs::write(data.join(name), body).unwrap();
        }
    }

    fn all_statements(stats: &DumpStats) -> Vec<String> {
        stats
            .output_files
            .iter()
            .flat_map(|p| {
                fs::read_to_string(p)
                    .unwrap()
                    .lines()
                    .filter(|l| l.starts_with("INSERT INTO"))
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Split the VALUES list of a generated INSERT back into raw values,
    /// unescaping quoted literals. `None` stands for SQL NULL.
    fn parse_values(statement: &str) -> Vec<Option<String>> {
        let start = statement.find(" VALUES (").unwrap() + " VALUES (".len();
        let body = statement[start..].strip_suffix(");").unwrap();

        let mut values = Vec::new();
        let mut chars = body.chars().peekable();
        loop {
            while chars.peek() == Some(&' ') {
                chars.next();
            }
            let value = if chars.peek() == Some(&'\'') {
                chars.next();
                let mut text = String::new();
                while let Some(c) = chars.next() {
                    if c == '\'' {
                        if chars.peek() == Some(&'\'') {
                            chars.next();
                            text.push('\'');
                        } else {
                            break;
                        }
                    } else {
                        text.push(c);
                    }
                }
                Some(text)
            } else {
                let raw: String = std::iter::from_fn(|| chars.next_if(|c| *c != ',')).collect();
                (raw != "NULL").then_some(raw)
            };
            values.push(value);
            if chars.next().is_none() {
                break;
            }
        }
        values
    }

    #[test]
    fn test_malformed_record_does_not_consume_id() {
        let tmp = TempDir::new().unwrap();
        write_records(
            tmp.path(),
            &[
                ("a.json", r#"{"word": "apple", "definitions": [{"definition": "fruit"}]}"#),
                ("b.json", r#"{"word": "broken""#),
                ("c.json", r#"{"word": "cherry", "definitions": [{"definition": "red"}]}"#),
            ],
        );

        let stats = generate_dump(&options(tmp.path(), 1024 * 1024)).unwrap();
        assert_eq!(stats.files_found, 3);
        assert_eq!(stats.files_skipped, 1);
        assert_eq!(stats.headwords, 2);

        let statements = all_statements(&stats);
        assert!(statements[0].contains("VALUES (1, 'apple',"));
        assert!(statements[1].contains("VALUES (1, NULL, 'fruit',"));
        assert!(statements[2].contains("VALUES (2, 'cherry',"));
        assert!(statements[3].contains("VALUES (2, NULL, 'red',"));
    }

    #[test]
    fn test_positional_child_rows_are_skipped() {
        let tmp = TempDir::new().unwrap();
        write_records(
            tmp.path(),
            &[
                (
                    "a.json",
                    r#"{"word": "a", "definitions": [["noun", "a thing"]], "phonetics": ["/b/", "/a/"]}"#,
                ),
                ("b.json", r#"{"word": "b", "phonetics": ["/b/"]}"#),
                ("c.json", r#"{"word": "c", "definitions": [{"definition": "third"}]}"#),
            ],
        );

        let stats = generate_dump(&options(tmp.path(), 1024 * 1024)).unwrap();
        assert_eq!(stats.files_skipped, 2);
        assert_eq!(stats.headwords, 1);
        assert_eq!(stats.definitions, 1);

        let statements = all_statements(&stats);
        assert_eq!(statements.len(), 2);
        assert!(statements[0].contains("VALUES (1, 'c', NULL, NULL,"));
        assert!(statements[1].contains("VALUES (1, NULL, 'third',"));
        assert!(!statements.iter().any(|s| s.contains("'noun'") || s.contains("'/b/'")));
    }

    #[test]
    fn test_headword_count_matches_parsed_records() {
        let tmp = TempDir::new().unwrap();
        write_records(
            tmp.path(),
            &[
                ("01.json", r#"{"word": "one"}"#),
                ("02.json", r#"["not", "an", "object"]"#),
                ("03.json", r#"{"no_word": true}"#),
                ("04.json", r#"{"word": "four", "examples": [{}, {}]}"#),
                ("05.txt", r#"{"word": "ignored"}"#),
            ],
        );

        let stats = generate_dump(&options(tmp.path(), 1024 * 1024)).unwrap();
        let headword_inserts = all_statements(&stats)
            .iter()
            .filter(|s| s.starts_with("INSERT INTO headwords"))
            .count() as u64;

        assert_eq!(stats.files_found, 4);
        assert_eq!(stats.headwords, 2);
        assert_eq!(headword_inserts, stats.headwords);
        assert_eq!(stats.examples, 2);
    }

    #[test]
    fn test_rotation_across_records() {
        let tmp = TempDir::new().unwrap();
        write_records(
            tmp.path(),
            &[
                ("a.json", r#"{"word": "alpha", "phrases": [{"phrase": "alpha male"}]}"#),
                ("b.json", r#"{"word": "beta", "phrases": [{"phrase": "beta test"}]}"#),
            ],
        );
        // Room for the preamble and one block (the alpha block is 400 bytes)
        let limit = (part_header(1).len() + SCHEMA_SQL.len() + 500) as u64;

        let stats = generate_dump(&options(tmp.path(), limit)).unwrap();
        assert_eq!(stats.output_files.len(), 2);

        let part1 = fs::read_to_string(&stats.output_files[0]).unwrap();
        let part2 = fs::read_to_string(&stats.output_files[1]).unwrap();
        assert!(part1.contains("CREATE TABLE headwords"));
        assert!(part1.contains("'alpha'") && part1.contains("'alpha male'"));
        assert!(!part2.contains("CREATE TABLE"));
        assert!(part2.starts_with("--\n-- PostgreSQL database dump (Part 2)\n--\n\n"));
        assert!(part2.contains("VALUES (2, 'beta',"));
        assert!(part2.contains("VALUES (2, 'beta test',"));
    }

    #[test]
    fn test_round_trip_fields() {
        let tmp = TempDir::new().unwrap();
        let record = r#"{
            "word": "don't",
            "phonetics": {"british": "/dəʊnt/"},
            "definitions": [{
                "partOfSpeech": "contraction",
                "definition": "do not",
                "chineseTranslation": "不要",
                "frequency": 5
            }],
            "culturalContext": {"usage": "informal", "regions": ["UK", "US"]}
        }"#;
        write_records(tmp.path(), &[("dont.json", record)]);

        let stats = generate_dump(&options(tmp.path(), 1024 * 1024)).unwrap();
        let statements = all_statements(&stats);
        assert_eq!(statements.len(), 2);

        let headword = parse_values(&statements[0]);
        assert_eq!(headword.len(), 11);
        assert_eq!(headword[0].as_deref(), Some("1"));
        assert_eq!(headword[1].as_deref(), Some("don't"));
        assert_eq!(headword[2].as_deref(), Some("/dəʊnt/"));
        assert_eq!(headword[3], None);
        assert_eq!(headword[4], None);
        let context: serde_json::Value =
            serde_json::from_str(headword[7].as_deref().unwrap()).unwrap();
        assert_eq!(
            context,
            serde_json::json!({"usage": "informal", "regions": ["UK", "US"]})
        );
        assert_eq!(headword[10], None);

        let definition = parse_values(&statements[1]);
        assert_eq!(
            definition,
            vec![
                Some("1".to_string()),
                Some("contraction".to_string()),
                Some("do not".to_string()),
                Some("不要".to_string()),
                None,
                Some("5".to_string()),
                None,
            ]
        );
        assert!(statements[1].contains(", 5, NULL);"));
    }

    #[test]
    fn test_empty_data_dir_still_writes_schema() {
        let tmp = TempDir::new().unwrap();
        write_records(tmp.path(), &[]);

        let stats = generate_dump(&options(tmp.path(), 1024)).unwrap();
        assert_eq!(stats.headwords, 0);
        assert_eq!(stats.output_files.len(), 1);
        let text = fs::read_to_string(&stats.output_files[0]).unwrap();
        assert!(text.contains("DROP TABLE IF EXISTS headwords;"));
    }

    #[test]
    fn test_missing_data_dir_is_fatal() {
        let tmp = TempDir::new().unwrap();
        assert!(generate_dump(&options(tmp.path(), 1024)).is_err());
        assert!(!tmp.path().join("sql_dumps").exists());
    }
}
