//! `protax-lineage` command implementation
//!
//! Expands the TaxID column of a TSV into full lineage columns.

use crate::datasets::DatasetsClient;
use crate::error::Result;
use crate::lineage::{self, RetryPolicy};
use crate::LineageArgs;
use colored::Colorize;

/// Fixed log file name, truncated at the start of each run
pub const LOG_FILE: &str = "protax-lineage.log";

/// Append lineage columns to every row of the input table
pub async fn run(args: &LineageArgs) -> Result<()> {
    let client = DatasetsClient::new(args.datasets_url.clone())?;
    let summary =
        lineage::expand_file(&args.input, &args.output, &client, RetryPolicy::default()).await?;

    println!(
        "{} Expanded {} row(s): {} of {} TaxID(s) fetched ({} failed, {} non-numeric value(s) skipped)",
        "✓".green(),
        summary.rows,
        summary.fetched,
        summary.unique_taxids,
        summary.failed,
        summary.skipped_rows
    );
    println!("Results written to {}", args.output.display());
    println!("Log written to {}", LOG_FILE);

    Ok(())
}
