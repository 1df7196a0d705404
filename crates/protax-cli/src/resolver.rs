//! Resolver loop: protein accessions to taxonomy rows
//!
//! Reads identifiers line by line, resolves each through a [`Resolve`]
//! capability, and appends exactly one TSV row per non-empty line. Failures
//! never abort the run; they degrade to a sentinel row so downstream
//! consumers can tell a failed lookup from a dropped identifier.

use crate::error::{CliError, Result};
use crate::progress;
use async_trait::async_trait;
use csv::WriterBuilder;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Sentinel written in place of both resolved fields when a lookup fails
pub const ERROR_SENTINEL: &str = "Error";

/// Output table header, in column order
pub const OUTPUT_HEADER: [&str; 3] = ["ProteinID", "ScientificName", "TaxID"];

/// Extracted taxonomy fields before completeness validation
///
/// Either field may be empty; [`TaxonomyRecord::is_complete`] decides whether
/// the record is usable or gets the sentinel treatment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyRecord {
    pub scientific_name: String,
    pub tax_id: String,
}

impl TaxonomyRecord {
    /// Both fields present and non-empty
    pub fn is_complete(&self) -> bool {
        !self.scientific_name.is_empty() && !self.tax_id.is_empty()
    }
}

/// Capability of resolving a protein accession to its taxonomy fields
///
/// `Ok(None)` means the lookup chain found nothing; `Err` means the lookup
/// machinery itself failed. The loop folds both into the sentinel row.
#[async_trait]
pub trait Resolve {
    async fn resolve(&self, accession: &str) -> Result<Option<TaxonomyRecord>>;
}

/// One row of the output table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupRow {
    #[serde(rename = "ProteinID")]
    pub protein_id: String,

    #[serde(rename = "ScientificName")]
    pub scientific_name: String,

    #[serde(rename = "TaxID")]
    pub tax_id: String,
}

impl LookupRow {
    /// Row for a complete, successful resolution
    pub fn resolved(protein_id: &str, record: TaxonomyRecord) -> Self {
        Self {
            protein_id: protein_id.to_string(),
            scientific_name: record.scientific_name,
            tax_id: record.tax_id,
        }
    }

    /// Sentinel row for a failed or incomplete resolution
    pub fn sentinel(protein_id: &str) -> Self {
        Self {
            protein_id: protein_id.to_string(),
            scientific_name: ERROR_SENTINEL.to_string(),
            tax_id: ERROR_SENTINEL.to_string(),
        }
    }
}

/// Counters reported back to the caller after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-empty identifiers processed
    pub total: usize,

    /// Identifiers resolved to a complete record
    pub resolved: usize,

    /// Identifiers written as sentinel rows
    pub failed: usize,

    /// Blank input lines skipped
    pub skipped: usize,
}

/// Derive the default output path: the input path with its final extension
/// replaced by `tsv` (`foo.bar.txt` becomes `foo.bar.tsv`)
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("tsv")
}

/// Resolve every identifier in `input`, writing one TSV row per non-empty
/// line to `output` in input order
///
/// The output file is recreated on every run, header first, and flushed
/// after each row so a partial run still leaves a readable table.
pub async fn resolve_file(
    input: &Path,
    output: &Path,
    resolver: &(impl Resolve + Sync),
) -> Result<RunSummary> {
    if !input.exists() {
        return Err(CliError::FileNotFound(input.display().to_string()));
    }
    let contents = std::fs::read_to_string(input)?;

    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(output)?;
    writer.write_record(OUTPUT_HEADER)?;
    writer.flush()?;

    let lines: Vec<&str> = contents.lines().collect();
    let pb = progress::create_progress_bar(lines.len() as u64, "Resolving identifiers");

    let mut summary = RunSummary::default();
    for raw in lines {
        let accession = raw.trim();
        if accession.is_empty() {
            info!("Skipping blank line");
            summary.skipped += 1;
            pb.inc(1);
            continue;
        }

        info!(protein_id = %accession, "Processing identifier");
        summary.total += 1;

        let row = match resolver.resolve(accession).await {
            Ok(Some(record)) if record.is_complete() => {
                info!(
                    protein_id = %accession,
                    scientific_name = %record.scientific_name,
                    tax_id = %record.tax_id,
                    "Resolved identifier"
                );
                summary.resolved += 1;
                LookupRow::resolved(accession, record)
            }
            Ok(Some(_)) => {
                warn!(protein_id = %accession, "Incomplete data returned for identifier");
                summary.failed += 1;
                LookupRow::sentinel(accession)
            }
            Ok(None) => {
                warn!(protein_id = %accession, "No data found for identifier");
                summary.failed += 1;
                LookupRow::sentinel(accession)
            }
            Err(e) => {
                warn!(protein_id = %accession, error = %e, "Lookup failed; no data found for identifier");
                summary.failed += 1;
                LookupRow::sentinel(accession)
            }
        };

        writer.serialize(&row)?;
        writer.flush()?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(summary)
}
