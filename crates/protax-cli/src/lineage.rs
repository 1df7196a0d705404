//! Lineage expansion: join NCBI rank classifications onto a TaxID table
//!
//! Reads a tab-separated table with a `TaxID` column, fetches the rank
//! classification for every distinct TaxID, and writes the table back out
//! with `<rank>_id` / `<rank>_name` columns appended. TaxIDs that cannot be
//! fetched (or are not numeric, like the resolver's `Error` sentinel) keep
//! their row and get `None` in every appended column.

use crate::datasets::{Classification, DatasetsClient, RANKS};
use crate::error::{CliError, Result};
use crate::progress;
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, warn};

/// Header name of the column holding taxonomic identifiers
pub const TAXID_COLUMN: &str = "TaxID";

/// Placeholder written for ranks that could not be resolved
pub const NONE_PLACEHOLDER: &str = "None";

/// Attempts per TaxID before giving up
pub const MAX_FETCH_ATTEMPTS: usize = 3;

/// Pause between fetch attempts
pub const FETCH_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Retry behavior for classification fetches
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: MAX_FETCH_ATTEMPTS,
            delay: FETCH_RETRY_DELAY,
        }
    }
}

/// An input table held in memory together with its TaxID column position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub taxid_index: usize,
}

/// Counters reported back to the caller after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineageSummary {
    /// Input rows written back out
    pub rows: usize,

    /// Distinct TaxIDs sent to the API
    pub unique_taxids: usize,

    /// TaxIDs with a fetched classification
    pub fetched: usize,

    /// TaxIDs given up on after exhausting retries
    pub failed: usize,

    /// Rows whose TaxID value was not numeric
    pub skipped_rows: usize,
}

/// Load a tab-separated table and locate its TaxID column
pub fn read_table(path: &Path) -> Result<LineageTable> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let taxid_index = headers
        .iter()
        .position(|header| header == TAXID_COLUMN)
        .ok_or_else(|| CliError::MissingColumn(TAXID_COLUMN.to_string()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(LineageTable {
        headers,
        rows,
        taxid_index,
    })
}

/// A usable TaxID is a non-empty string of ASCII digits
pub fn is_valid_taxid(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Distinct valid TaxIDs in first-seen order, plus the count of rows whose
/// value was skipped as non-numeric
pub fn unique_taxids(table: &LineageTable) -> (Vec<String>, usize) {
    let mut seen = HashSet::new();
    let mut warned = HashSet::new();
    let mut taxids = Vec::new();
    let mut skipped_rows = 0;

    for row in &table.rows {
        let value = row
            .get(table.taxid_index)
            .map(String::as_str)
            .unwrap_or_default();

        if is_valid_taxid(value) {
            if seen.insert(value.to_string()) {
                taxids.push(value.to_string());
            }
        } else {
            skipped_rows += 1;
            if warned.insert(value.to_string()) {
                warn!(value = %value, "Skipping value that is not a numeric TaxID");
            }
        }
    }

    (taxids, skipped_rows)
}

/// The output header: original columns plus id/name pairs per rank
pub fn extended_headers(headers: &[String]) -> Vec<String> {
    let mut extended = headers.to_vec();
    for rank in RANKS {
        extended.push(format!("{}_id", rank));
        extended.push(format!("{}_name", rank));
    }
    extended
}

/// The appended cells for one row, `None`-filled where a rank is absent
pub fn lineage_columns(classification: Option<&Classification>) -> Vec<String> {
    let mut columns = Vec::with_capacity(RANKS.len() * 2);
    for rank in RANKS {
        match classification.and_then(|c| c.get(rank)) {
            Some(taxon) => {
                columns.push(taxon.id.to_string());
                columns.push(taxon.name.clone());
            }
            None => {
                columns.push(NONE_PLACEHOLDER.to_string());
                columns.push(NONE_PLACEHOLDER.to_string());
            }
        }
    }
    columns
}

async fn fetch_with_retry(
    client: &DatasetsClient,
    taxid: &str,
    retry: RetryPolicy,
) -> Option<Classification> {
    for attempt in 1..=retry.attempts {
        match client.fetch_classification(taxid).await {
            Ok(classification) => return Some(classification),
            Err(e) => {
                warn!(tax_id = %taxid, attempt, error = %e, "Taxonomy report fetch failed");
                if attempt < retry.attempts && !retry.delay.is_zero() {
                    tokio::time::sleep(retry.delay).await;
                }
            }
        }
    }
    None
}

/// Expand every row of `input` with lineage columns and write the result to
/// `output`
///
/// Each distinct TaxID is fetched once; rows sharing a TaxID share its
/// classification.
pub async fn expand_file(
    input: &Path,
    output: &Path,
    client: &DatasetsClient,
    retry: RetryPolicy,
) -> Result<LineageSummary> {
    let table = read_table(input)?;
    let (taxids, skipped_rows) = unique_taxids(&table);

    let mut summary = LineageSummary {
        rows: table.rows.len(),
        unique_taxids: taxids.len(),
        skipped_rows,
        ..LineageSummary::default()
    };

    let pb = progress::create_progress_bar(taxids.len() as u64, "Fetching lineages");
    let mut lineages: HashMap<String, Classification> = HashMap::new();

    for taxid in &taxids {
        info!(tax_id = %taxid, "Fetching taxonomy report");
        match fetch_with_retry(client, taxid, retry).await {
            Some(classification) => {
                info!(tax_id = %taxid, "Fetched lineage");
                summary.fetched += 1;
                lineages.insert(taxid.clone(), classification);
            }
            None => {
                error!(tax_id = %taxid, attempts = retry.attempts, "Giving up on TaxID");
                summary.failed += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(output)?;
    writer.write_record(extended_headers(&table.headers))?;

    for row in &table.rows {
        let taxid = row
            .get(table.taxid_index)
            .map(String::as_str)
            .unwrap_or_default();

        let mut record = row.clone();
        record.extend(lineage_columns(lineages.get(taxid)));
        writer.write_record(&record)?;
    }
    writer.flush()?;

    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::datasets::RankedTaxon;
    use std::path::PathBuf;

    fn sample_classification() -> Classification {
        [
            ("superkingdom", 2759, "Eukaryota"),
            ("kingdom", 33208, "Metazoa"),
            ("phylum", 7711, "Chordata"),
            ("class", 40674, "Mammalia"),
            ("order", 9443, "Primates"),
            ("family", 9604, "Hominidae"),
            ("genus", 9605, "Homo"),
            ("species", 9606, "Homo sapiens"),
        ]
        .into_iter()
        .map(|(rank, id, name)| {
            (
                rank.to_string(),
                RankedTaxon {
                    id,
                    name: name.to_string(),
                },
            )
        })
        .collect()
    }

    fn write_table(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("table.tsv");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_is_valid_taxid() {
        assert!(is_valid_taxid("9606"));
        assert!(!is_valid_taxid(""));
        assert!(!is_valid_taxid("Error"));
        assert!(!is_valid_taxid("-1"));
        assert!(!is_valid_taxid("96 06"));
    }

    #[test]
    fn test_read_table_finds_taxid_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            &dir,
            "ProteinID\tScientificName\tTaxID\nP12345\tHomo sapiens\t9606\n",
        );

        let table = read_table(&path).unwrap();
        assert_eq!(table.taxid_index, 2);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][2], "9606");
    }

    #[test]
    fn test_read_table_without_taxid_column_is_err() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(&dir, "ProteinID\tScientificName\nP12345\tHomo sapiens\n");

        let result = read_table(&path);
        assert!(matches!(result, Err(CliError::MissingColumn(_))));
    }

    #[test]
    fn test_unique_taxids_dedupes_and_skips_sentinels() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            &dir,
            "ProteinID\tTaxID\nA\t9606\nB\tError\nC\t9606\nD\t10090\n",
        );

        let table = read_table(&path).unwrap();
        let (taxids, skipped) = unique_taxids(&table);
        assert_eq!(taxids, vec!["9606".to_string(), "10090".to_string()]);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_extended_headers_appends_rank_pairs() {
        let headers = vec!["ProteinID".to_string(), "TaxID".to_string()];
        let extended = extended_headers(&headers);

        assert_eq!(extended.len(), 2 + RANKS.len() * 2);
        assert_eq!(extended[2], "superkingdom_id");
        assert_eq!(extended[3], "superkingdom_name");
        assert_eq!(extended[extended.len() - 2], "species_id");
        assert_eq!(extended[extended.len() - 1], "species_name");
    }

    #[test]
    fn test_lineage_columns_in_rank_order() {
        let classification = sample_classification();
        let columns = lineage_columns(Some(&classification));

        assert_eq!(columns.len(), RANKS.len() * 2);
        assert_eq!(columns[0], "2759");
        assert_eq!(columns[1], "Eukaryota");
        assert_eq!(columns[14], "9606");
        assert_eq!(columns[15], "Homo sapiens");
    }

    #[test]
    fn test_lineage_columns_fill_missing_ranks_with_none() {
        let mut classification = sample_classification();
        classification.remove("kingdom");

        let columns = lineage_columns(Some(&classification));
        assert_eq!(columns[2], NONE_PLACEHOLDER);
        assert_eq!(columns[3], NONE_PLACEHOLDER);

        let all_none = lineage_columns(None);
        assert!(all_none.iter().all(|cell| cell == NONE_PLACEHOLDER));
    }
}
