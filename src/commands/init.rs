//! Init command implementation

use crate::config::Config;
use crate::error::{Error, Result};
use std::path::Path;
use tracing::info;

/// Write a default configuration file to `config_path`
pub fn cmd_init(config_path: &Path, force: bool) -> Result<Config> {
    if config_path.exists() && !force {
        return Err(Error::AlreadyInitialized(
            config_path.display().to_string(),
        ));
    }

    let mut config = Config::default();
    config.validate()?;
    config.save(config_path)?;
    config.config_file = Some(config_path.to_path_buf());
    info!("Created config at {:?}", config_path);

    Ok(config)
}

/// Print next steps after init
pub fn print_init(config: &Config) {
    if let Some(path) = &config.config_file {
        println!("✓ Initialized lexdump config at {}", path.display());
    }
    println!("\nInput records: {}/*.{}", config.dump.data_dir, config.dump.extension);
    println!("Dump output:   {}/{}_N.sql", config.dump.output_dir, config.dump.file_prefix);
    println!("\nNext steps:");
    println!("  lexdump dump          # Generate the SQL dump files");
    println!("  lexdump words         # Compile the headword list and duplicates report");
}
