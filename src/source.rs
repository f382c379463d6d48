//! Input record discovery and loading

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Outcome of loading one record file
#[derive(Debug)]
pub enum Loaded<T> {
    Parsed(T),
    /// The file was read but is not a usable record
    Malformed(String),
}

/// List record files directly inside `dir` whose name ends in `.<extension>`,
/// sorted by file name. A bare `.json` counts. Subdirectories are not
/// descended into.
pub fn list_records(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::InvalidPath(format!(
            "{}: not a directory",
            dir.display()
        )));
    }

    let suffix = format!(".{extension}");
    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(&suffix));
        if matches {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Read and parse one record. I/O failures are errors; content that is not
/// a JSON object deserializing into `T` is reported as [`Loaded::Malformed`].
pub fn load_record<T: DeserializeOwned>(path: &Path) -> Result<Loaded<T>> {
    let bytes = fs::read(path)?;
    let value: Value = match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(e) => return Ok(Loaded::Malformed(e.to_string())),
    };

    // Derived structs would also accept a JSON array positionally
    if !value.is_object() {
        return Ok(Loaded::Malformed("top-level value is not an object".to_string()));
    }

    Ok(match serde_json::from_value(value) {
        Ok(record) => Loaded::Parsed(record),
        Err(e) => Loaded::Malformed(e.to_string()),
    })
}
