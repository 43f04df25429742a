//! # mxkit CLI Entry Point
//!
//! The main executable for the mxkit tool. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and installs the
//!    log subscriber (filtered through `RUST_LOG`, written to stderr).
//! 2. **Loading**: Reads and deserializes the class declarations.
//! 3. **Building**: Runs each declaration through the `mxkit_core` catalog builder.
//! 4. **Presentation**: Formats and prints the resulting catalog or error to standard output/error.

mod cli;
mod formatter;

use clap::Parser;
use cli::{Cli, Commands};
use formatter::{FormattedString, GenericError, Validation, ValidationReport};
use mxkit_core::{CatalogBuilder, ClassDecl, ManagedObjectCatalog};
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    match args.command {
        Commands::Describe { file, json } => describe(&file, json),
        Commands::Validate { files } => validate(files),
    }
}

fn describe(path: &Path, json: bool) {
    let catalog = match load_catalog(path) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    if !json {
        println!("{}", FormattedString::from(catalog));
        return;
    }

    match serde_json::to_value(&catalog) {
        Ok(value) => println!("{}", FormattedString::from(value)),
        Err(err) => {
            eprintln!(
                "{}",
                FormattedString::from(GenericError("Failed to serialize catalog", err))
            );
            process::exit(1);
        }
    }
}

fn validate(files: Vec<PathBuf>) {
    let report = ValidationReport(
        files
            .into_iter()
            .map(|path| {
                let outcome = load_catalog(&path);
                Validation { path, outcome }
            })
            .collect(),
    );

    let failed = report.has_failures();
    println!("{}", FormattedString::from(report));

    if failed {
        process::exit(1);
    }
}

fn load_catalog(path: &Path) -> Result<ManagedObjectCatalog, FormattedString> {
    tracing::debug!(path = %path.display(), "loading class declaration");

    let contents = std::fs::read_to_string(path)?;
    let class: ClassDecl = serde_json::from_str(&contents)?;
    let catalog = CatalogBuilder::new(&class).build()?;

    Ok(catalog)
}
