//! kmap library exports.
//!
//! This crate provides the `kmap` binary.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Settings, graph construction and view rendering
//! - `loader`: Daily log and notes file discovery

pub mod cli;
pub mod commands;
pub mod loader;

pub use cli::{Cli, Commands};
pub use commands::{render, report, run};
pub use loader::{load_corpus, load_daily_logs};
