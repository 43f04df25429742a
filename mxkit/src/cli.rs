//! # CLI
//!
//! This module defines the command-line interface of `mxkit` using `clap`.
//!
//! Every command takes one or more declaration files: JSON documents describing a managed
//! class (its public methods and their attribute/operation markers).
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mxkit", version, about = "Managed object declaration tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Describe the management interface built from a declaration file
    ///
    /// Builds the catalog of attributes and operations and prints it.
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// mxkit describe counter.json
    /// mxkit describe counter.json --json
    /// ```
    Describe {
        /// Path to the class declaration (.json)
        #[arg(value_parser = parse_declaration_path)]
        file: PathBuf,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that one or more declaration files build a valid catalog
    ///
    /// Exits with a non-zero status if any file fails.
    Validate {
        /// Paths to the class declarations (.json)
        #[arg(required = true, value_parser = parse_declaration_path)]
        files: Vec<PathBuf>,
    },
}

fn parse_declaration_path(value: &str) -> Result<PathBuf, String> {
    if value.trim().is_empty() {
        return Err("Declaration path cannot be empty".to_string());
    }

    Ok(PathBuf::from(value))
}
