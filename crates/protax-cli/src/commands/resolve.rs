//! `protax-resolve` command implementation
//!
//! Resolves a list of protein accessions to taxonomy rows.

use crate::error::Result;
use crate::eutils::EutilsClient;
use crate::resolver;
use crate::ResolveArgs;
use colored::Colorize;

/// Fixed log file name, truncated at the start of each run
pub const LOG_FILE: &str = "protax-resolve.log";

/// Resolve identifiers from the input list into a TSV table
pub async fn run(args: &ResolveArgs) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| resolver::default_output_path(&args.input));

    let client = EutilsClient::new(args.eutils_url.clone())?;
    let summary = resolver::resolve_file(&args.input, &output, &client).await?;

    println!(
        "{} Resolved {} of {} identifier(s) ({} failed, {} blank line(s) skipped)",
        "✓".green(),
        summary.resolved,
        summary.total,
        summary.failed,
        summary.skipped
    );
    println!("Results written to {}", output.display());
    println!("Log written to {}", LOG_FILE);

    Ok(())
}
