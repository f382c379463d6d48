//! Size-bounded, rotating dump file writer
//!
//! Blocks are appended to `<prefix>_<n>.sql`. When the next block would push
//! the current file past the size limit, the file is flushed and closed and
//! `<prefix>_<n+1>.sql` is opened. Only the first file carries the schema.

use super::schema::{part_header, SCHEMA_SQL};
use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Summary of what a finished writer produced
#[derive(Debug, Clone, Default)]
pub struct WrittenFiles {
    pub files: Vec<PathBuf>,
    pub bytes_written: u64,
}

/// Rotating writer. Callers only hand it complete blocks.
pub struct DumpWriter {
    output_dir: PathBuf,
    prefix: String,
    max_bytes: u64,
    index: usize,
    current_size: u64,
    blocks_in_file: usize,
    bytes_written: u64,
    out: BufWriter<File>,
    files: Vec<PathBuf>,
}

impl DumpWriter {
    /// Create the output directory and open part 1 with header and schema.
    pub fn create(output_dir: &Path, prefix: &str, max_bytes: u64) -> Result<Self> {
        fs::create_dir_all(output_dir).map_err(|source| Error::OutputCreate {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let path = Self::part_path(output_dir, prefix, 1);
        let out = open_part(&path)?;

        let mut writer = Self {
            output_dir: output_dir.to_path_buf(),
            prefix: prefix.to_string(),
            max_bytes,
            index: 1,
            current_size: 0,
            blocks_in_file: 0,
            bytes_written: 0,
            out,
            files: vec![path],
        };
        writer.write_preamble(true)?;
        Ok(writer)
    }

    /// Path of the `index`-th dump file
    pub fn part_path(output_dir: &Path, prefix: &str, index: usize) -> PathBuf {
        output_dir.join(format!("{prefix}_{index}.sql"))
    }

    /// Append one block, rotating first if it would overflow the current
    /// file. A file that holds no block yet always accepts the next one.
    pub fn write_block(&mut self, block: &str) -> Result<()> {
        let len = block.len() as u64;
        if self.blocks_in_file > 0 && self.current_size + len > self.max_bytes {
            self.rotate()?;
        }

        self.write_raw(block)?;
        self.blocks_in_file += 1;
        Ok(())
    }

    /// Flush and close the last file.
    pub fn finish(mut self) -> Result<WrittenFiles> {
        self.out.flush()?;
        debug!(parts = self.index, bytes = self.bytes_written, "Dump writer closed");
        Ok(WrittenFiles {
            files: self.files,
            bytes_written: self.bytes_written,
        })
    }

    fn rotate(&mut self) -> Result<()> {
        self.out.flush()?;

        let next = self.index + 1;
        let path = Self::part_path(&self.output_dir, &self.prefix, next);
        // Replacing the handle drops (and closes) the previous file
        self.out = open_part(&path)?;
        info!(
            part = next,
            previous_bytes = self.current_size,
            "Rotated to {}",
            path.display()
        );

        self.index = next;
        self.current_size = 0;
        self.blocks_in_file = 0;
        self.files.push(path);
        self.write_preamble(false)
    }

    fn write_preamble(&mut self, with_schema: bool) -> Result<()> {
        let header = part_header(self.index);
        self.write_raw(&header)?;
        if with_schema {
            self.write_raw(SCHEMA_SQL)?;
        }
        Ok(())
    }

    fn write_raw(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        let len = text.len() as u64;
        self.current_size += len;
        self.bytes_written += len;
        Ok(())
    }
}

fn open_part(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| Error::OutputCreate {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}
