//! Default values for configuration

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "lexdump.toml";

/// Default directory holding the per-word JSON records
pub fn default_data_dir() -> String {
    "data".to_string()
}

/// Default directory for generated SQL dump files
pub fn default_output_dir() -> String {
    "sql_dumps".to_string()
}

/// Default dump file prefix (`dump_1.sql`, `dump_2.sql`, ...)
pub fn default_file_prefix() -> String {
    "dump".to_string()
}

/// Default maximum size of a single dump file (10 MiB)
pub fn default_max_file_bytes() -> u64 {
    10 * 1024 * 1024
}

/// Default extension of input records
pub fn default_extension() -> String {
    "json".to_string()
}

/// Default compiled headword list
pub fn default_word_list_file() -> String {
    "word_list.txt".to_string()
}

/// Default duplicates report for the compiled headword list
pub fn default_duplicates_file() -> String {
    "word_list_duplicates.csv".to_string()
}

/// Default duplicates report for a plain-text word list
pub fn default_text_duplicates_file() -> String {
    "duplicated_words.csv".to_string()
}
