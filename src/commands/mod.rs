//! CLI commands implementation

pub mod dump;
pub mod init;
pub mod words;

pub use dump::*;
pub use init::*;
pub use words::*;
