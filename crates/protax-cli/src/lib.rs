//! Protax CLI Library
//!
//! Command-line tools for resolving protein identifiers against NCBI's
//! public taxonomy services.
//!
//! # Overview
//!
//! - **Identifier Resolution**: read protein accessions (one per line) and
//!   produce a TSV of `(ProteinID, ScientificName, TaxID)` rows via chained
//!   NCBI E-utilities lookups (`protax-resolve`)
//! - **Lineage Expansion**: read a TSV with a `TaxID` column and append full
//!   lineage columns fetched from the NCBI Datasets API (`protax-lineage`)
//!
//! Both tools write their per-item events to a fixed-name log file that is
//! truncated at the start of each run; the console only carries a completion
//! summary and fatal errors.

pub mod commands;
pub mod datasets;
pub mod error;
pub mod eutils;
pub mod lineage;
pub mod progress;
pub mod resolver;

// Re-export commonly used types
pub use error::{CliError, Result};

use clap::Parser;
use std::path::PathBuf;

/// Resolve protein accessions to scientific names and taxonomic IDs
#[derive(Parser, Debug)]
#[command(name = "protax-resolve")]
#[command(author, version)]
#[command(about = "Resolve protein accessions to scientific names and taxonomic IDs")]
pub struct ResolveArgs {
    /// Input file with one protein accession per line
    pub input: PathBuf,

    /// Output TSV path (defaults to the input path with its extension replaced by .tsv)
    pub output: Option<PathBuf>,

    /// NCBI E-utilities base URL
    #[arg(long, env = "PROTAX_EUTILS_URL", default_value = eutils::DEFAULT_EUTILS_URL)]
    pub eutils_url: String,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Expand TaxIDs into full lineage columns
#[derive(Parser, Debug)]
#[command(name = "protax-lineage")]
#[command(author, version)]
#[command(about = "Expand the TaxID column of a TSV into full lineage columns")]
pub struct LineageArgs {
    /// Input TSV containing a TaxID column
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output TSV path
    #[arg(short, long)]
    pub output: PathBuf,

    /// NCBI Datasets API base URL
    #[arg(long, env = "PROTAX_DATASETS_URL", default_value = datasets::DEFAULT_DATASETS_URL)]
    pub datasets_url: String,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
