//! Dump command implementation

use crate::config::Config;
use crate::dump::{generate_dump, DumpOptions, DumpStats};
use crate::error::Result;
use std::path::PathBuf;
use tracing::info;

/// Command-line overrides for the configured dump settings
#[derive(Debug, Clone, Default)]
pub struct DumpOverrides {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub file_prefix: Option<String>,
    pub max_file_bytes: Option<u64>,
}

/// Generate SQL dump files from the record directory
pub fn cmd_dump(config: &Config, overrides: DumpOverrides) -> Result<DumpStats> {
    let mut dump_config = config.dump.clone();
    if let Some(prefix) = overrides.file_prefix {
        dump_config.file_prefix = prefix;
    }
    if let Some(max) = overrides.max_file_bytes {
        dump_config.max_file_bytes = max;
    }

    // Re-check limits the overrides may have broken
    let checked = Config {
        dump: dump_config,
        ..config.clone()
    };
    checked.validate()?;

    let mut options = DumpOptions::from(&checked.dump);
    if let Some(dir) = overrides.data_dir {
        options.data_dir = dir;
    }
    if let Some(dir) = overrides.output_dir {
        options.output_dir = dir;
    }

    info!(
        data_dir = %options.data_dir.display(),
        output_dir = %options.output_dir.display(),
        max_file_bytes = options.max_file_bytes,
        "Starting dump"
    );

    generate_dump(&options)
}

/// Print dump stats to console
pub fn print_dump_stats(stats: &DumpStats) {
    println!("\n✓ SQL dump complete\n");
    println!("Record files found: {}", stats.files_found);
    println!("Record files skipped: {}", stats.files_skipped);
    println!("Headwords: {}", stats.headwords);
    println!("Definitions: {}", stats.definitions);
    println!("Phrases: {}", stats.phrases);
    println!("Examples: {}", stats.examples);
    println!("Bytes written: {}", stats.bytes_written);
    println!("\nOutput files:");
    for file in &stats.output_files {
        println!("  {}", file.display());
    }
}
