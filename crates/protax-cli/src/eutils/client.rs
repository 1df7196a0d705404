//! HTTP client for the NCBI E-utilities
//!
//! Provides the chained protein-to-taxonomy lookup used by the resolver
//! loop. Each stage that finds nothing collapses the chain to `None`;
//! transport and parse failures bubble up as errors for the caller to fold
//! into its own miss handling.

use crate::error::Result;
use crate::eutils::endpoints;
use crate::eutils::types::{ElinkResponse, EsearchResponse, EsummaryResponse};
use crate::resolver::{Resolve, TaxonomyRecord};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

// ============================================================================
// E-utilities Client Constants
// ============================================================================

/// Default timeout for E-utilities requests in seconds.
/// Can be overridden via the PROTAX_HTTP_TIMEOUT_SECS environment variable.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Default NCBI E-utilities base URL when not specified via flag or
/// environment variable.
pub const DEFAULT_EUTILS_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Client for the NCBI Entrez Programming Utilities
pub struct EutilsClient {
    client: Client,
    base_url: String,
}

impl EutilsClient {
    /// Create a new E-utilities client
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
        let base_url =
            std::env::var("PROTAX_EUTILS_URL").unwrap_or_else(|_| DEFAULT_EUTILS_URL.to_string());

        Self::new(base_url)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stage 1: find the protein record UID for an accession
    async fn search_protein(&self, accession: &str) -> Result<Option<String>> {
        let url = endpoints::esearch_url(&self.base_url, "protein", accession);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: EsearchResponse = response.json().await?;

        let uid = body.first_id().map(str::to_string);
        debug!(accession = %accession, uid = ?uid, "esearch completed");
        Ok(uid)
    }

    /// Stage 2: walk the link from the protein record to its taxonomy record
    async fn link_taxonomy(&self, protein_uid: &str) -> Result<Option<String>> {
        let url = endpoints::elink_url(&self.base_url, "protein", "taxonomy", protein_uid);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: ElinkResponse = response.json().await?;

        let uid = body.first_taxonomy_link().map(str::to_string);
        debug!(protein_uid = %protein_uid, tax_uid = ?uid, "elink completed");
        Ok(uid)
    }

    /// Stages 3 and 4: fetch the taxonomy document summary and extract the
    /// scientific name and TaxID from it
    async fn summarize_taxonomy(&self, tax_uid: &str) -> Result<Option<TaxonomyRecord>> {
        let url = endpoints::esummary_url(&self.base_url, "taxonomy", tax_uid);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: EsummaryResponse = response.json().await?;

        let record = body.extract_taxonomy(tax_uid);
        debug!(tax_uid = %tax_uid, record = ?record, "esummary completed");
        Ok(record)
    }
}

#[async_trait]
impl Resolve for EutilsClient {
    async fn resolve(&self, accession: &str) -> Result<Option<TaxonomyRecord>> {
        let Some(protein_uid) = self.search_protein(accession).await? else {
            return Ok(None);
        };

        let Some(tax_uid) = self.link_taxonomy(&protein_uid).await? else {
            return Ok(None);
        };

        self.summarize_taxonomy(&tax_uid).await
    }
}
