//! NCBI Datasets taxonomy client
//!
//! Fetches the per-TaxID rank classification used by the lineage expansion.
//! The Datasets v2 API returns one `dataset_report` per requested taxon; the
//! `taxonomy.classification` object inside maps rank names to `{id, name}`
//! pairs.

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Default NCBI Datasets API base URL when not specified via flag or
/// environment variable.
pub const DEFAULT_DATASETS_URL: &str = "https://api.ncbi.nlm.nih.gov/datasets/v2alpha";

/// Default timeout for Datasets requests in seconds.
/// Can be overridden via the PROTAX_HTTP_TIMEOUT_SECS environment variable.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Taxonomic ranks of interest, in hierarchical order
pub const RANKS: [&str; 8] = [
    "superkingdom",
    "kingdom",
    "phylum",
    "class",
    "order",
    "family",
    "genus",
    "species",
];

/// One taxon of a rank classification
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RankedTaxon {
    pub id: i64,
    pub name: String,
}

/// Rank name to taxon map for one TaxID
pub type Classification = HashMap<String, RankedTaxon>;

#[derive(Debug, Deserialize)]
struct DatasetReports {
    #[serde(default)]
    reports: Vec<Report>,
}

#[derive(Debug, Deserialize)]
struct Report {
    taxonomy: Option<TaxonomyNode>,
}

#[derive(Debug, Deserialize)]
struct TaxonomyNode {
    #[serde(default)]
    classification: Classification,
}

/// Client for the NCBI Datasets taxonomy reports
pub struct DatasetsClient {
    client: Client,
    base_url: String,
}

impl DatasetsClient {
    /// Create a new Datasets client
    pub fn new(base_url: String) -> Result<Self> {
        let timeout_secs = std::env::var("PROTAX_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("PROTAX_DATASETS_URL")
            .unwrap_or_else(|_| DEFAULT_DATASETS_URL.to_string());

        Self::new(base_url)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the rank classification for one TaxID
    ///
    /// A missing report or a report without taxonomy data is an error so the
    /// caller's retry loop treats it the same as a transport failure.
    pub async fn fetch_classification(&self, taxid: &str) -> Result<Classification> {
        let url = format!("{}/taxonomy/taxon/{}/dataset_report", self.base_url, taxid);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!(
                "Taxonomy report request for TaxID {} failed: {}",
                taxid,
                response.status()
            );
        }

        let body: DatasetReports = response.json().await?;
        let classification = body
            .reports
            .into_iter()
            .next()
            .and_then(|report| report.taxonomy)
            .map(|taxonomy| taxonomy.classification);

        match classification {
            Some(classification) => {
                debug!(tax_id = %taxid, ranks = classification.len(), "Fetched classification");
                Ok(classification)
            }
            None => anyhow::bail!("No taxonomy report returned for TaxID {}", taxid),
        }
    }
}
