//! kmap
//!
//! Topic map of a directory of dated markdown notes.
//!
//! # Usage
//!
//! ```bash
//! kmap [--root DIR] [--registry FILE] [--today YYYY-MM-DD] overview
//! kmap topic supabase
//! kmap connections --limit 10
//! kmap clusters
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/kmap/config.toml)
//! 3. Environment variables (KMAP_*)
//! 4. CLI flags

use anyhow::Result;

use kmap_cli::{run, Cli};

fn main() -> Result<()> {
    run(Cli::parse_args())
}
