//! lexdump - Convert per-word dictionary JSON records into PostgreSQL dumps
//!
//! This crate provides:
//! - A size-rotated SQL dump generator for headwords and their definitions,
//!   phrases and examples
//! - Word list compilation and case-insensitive duplicate reports
//! - CLI commands wiring both to a TOML configuration

pub mod commands;
pub mod config;
pub mod dump;
pub mod error;
pub mod models;
pub mod progress;
pub mod source;
pub mod words;

pub use config::Config;
pub use error::{Error, Result};
