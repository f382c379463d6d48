//! lexdump CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use lexdump::{
    commands::{
        cmd_dump, cmd_duplicates, cmd_init, cmd_words, print_duplicate_report, print_dump_stats,
        print_init, print_words_stats, DumpOverrides, WordsOverrides,
    },
    config::Config,
    dump::SCHEMA_SQL,
    error::Result,
    progress::LogWriterFactory,
};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "lexdump")]
#[command(version, about = "Convert dictionary JSON records into PostgreSQL dump files", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "LEXDUMP_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Generate SQL dump files from the record directory
    Dump {
        /// Directory holding one JSON record per word
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Directory to write dump files into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Dump file name prefix (files are named <prefix>_<n>.sql)
        #[arg(short, long)]
        prefix: Option<String>,

        /// Size limit per dump file in bytes
        #[arg(long)]
        max_file_bytes: Option<u64>,
    },

    /// Print the table definitions
    Schema,

    /// Compile the headword list and report duplicate headwords
    Words {
        /// Directory holding one JSON record per word
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Where to write the headword list
        #[arg(long)]
        word_list: Option<PathBuf>,

        /// Where to write the duplicates CSV
        #[arg(long)]
        duplicates: Option<PathBuf>,
    },

    /// Report duplicate words in a plain-text word list
    Duplicates {
        /// Word list, one word per line
        input: PathBuf,

        /// Where to write the duplicates CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(LogWriterFactory::default()))
        .with(filter)
        .init();

    match cli.command {
        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(Config::default_config_path);
            let config = cmd_init(&path, force)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print_init(&config);
            }
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "lexdump", &mut std::io::stdout());
        }

        Commands::Schema => {
            print!("{}", SCHEMA_SQL);
        }

        Commands::Dump {
            data_dir,
            output_dir,
            prefix,
            max_file_bytes,
        } => {
            let config = Config::resolve(cli.config.as_deref())?;
            let overrides = DumpOverrides {
                data_dir,
                output_dir,
                file_prefix: prefix,
                max_file_bytes,
            };
            let stats = cmd_dump(&config, overrides)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_dump_stats(&stats);
            }
        }

        Commands::Words {
            data_dir,
            word_list,
            duplicates,
        } => {
            let config = Config::resolve(cli.config.as_deref())?;
            let overrides = WordsOverrides {
                data_dir,
                word_list_file: word_list,
                duplicates_file: duplicates,
            };
            let stats = cmd_words(&config, overrides)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_words_stats(&stats);
            }
        }

        Commands::Duplicates { input, output } => {
            let config = Config::resolve(cli.config.as_deref())?;
            let output =
                output.unwrap_or_else(|| PathBuf::from(&config.words.text_duplicates_file));
            let report = cmd_duplicates(&input, &output)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_duplicate_report(&report);
            }
        }
    }

    Ok(())
}
