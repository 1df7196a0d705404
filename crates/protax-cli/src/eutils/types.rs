//! E-utilities response types
//!
//! Serde views of the JSON payloads returned with `retmode=json`. Only the
//! fields the lookup chain consumes are modeled; everything else is ignored.
//! Document summaries are kept as raw JSON because their shape varies by
//! database, and field extraction must degrade gracefully rather than fail
//! the whole response.

use crate::resolver::TaxonomyRecord;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Link name Entrez uses for the protein-to-taxonomy relation
pub const PROTEIN_TAXONOMY_LINK: &str = "protein_taxonomy";

/// Response envelope of `esearch.fcgi`
#[derive(Debug, Clone, Deserialize)]
pub struct EsearchResponse {
    #[serde(default)]
    pub esearchresult: Option<EsearchResult>,
}

/// The `esearchresult` object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EsearchResult {
    #[serde(default)]
    pub idlist: Vec<String>,
}

impl EsearchResponse {
    /// First UID of the result list, if any
    pub fn first_id(&self) -> Option<&str> {
        self.esearchresult
            .as_ref()
            .and_then(|result| result.idlist.first())
            .map(String::as_str)
    }
}

/// Response envelope of `elink.fcgi`
#[derive(Debug, Clone, Deserialize)]
pub struct ElinkResponse {
    #[serde(default)]
    pub linksets: Vec<LinkSet>,
}

/// One linkset of an elink response
#[derive(Debug, Clone, Deserialize)]
pub struct LinkSet {
    #[serde(default)]
    pub linksetdbs: Vec<LinkSetDb>,
}

/// One target-database block within a linkset
#[derive(Debug, Clone, Deserialize)]
pub struct LinkSetDb {
    #[serde(default)]
    pub dbto: String,

    #[serde(default)]
    pub linkname: String,

    #[serde(default)]
    pub links: Vec<String>,
}

impl ElinkResponse {
    /// First taxonomy UID linked from the source record, if any
    ///
    /// Prefers the canonical `protein_taxonomy` linkset but accepts any
    /// linkset targeting the taxonomy database.
    pub fn first_taxonomy_link(&self) -> Option<&str> {
        self.linksets
            .iter()
            .flat_map(|set| set.linksetdbs.iter())
            .find(|db| db.linkname == PROTEIN_TAXONOMY_LINK || db.dbto == "taxonomy")
            .and_then(|db| db.links.first())
            .map(String::as_str)
    }
}

/// Response envelope of `esummary.fcgi`
#[derive(Debug, Clone, Deserialize)]
pub struct EsummaryResponse {
    #[serde(default)]
    pub result: Option<EsummaryResult>,
}

/// The `result` object: a UID list plus one document summary per UID
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EsummaryResult {
    #[serde(default)]
    pub uids: Vec<String>,

    #[serde(flatten)]
    pub documents: HashMap<String, Value>,
}

impl EsummaryResponse {
    /// Extract the scientific name and TaxID from the summary document of `uid`
    ///
    /// Returns `None` when the document itself is missing. Missing fields, or
    /// fields with an unexpected shape, extract as empty strings so the
    /// caller can flag the record as incomplete instead of guessing.
    pub fn extract_taxonomy(&self, uid: &str) -> Option<TaxonomyRecord> {
        let document = self.result.as_ref()?.documents.get(uid)?;

        Some(TaxonomyRecord {
            scientific_name: text_field(document, "scientificname"),
            tax_id: text_field(document, "taxid"),
        })
    }
}

/// Read a document field as text; numbers are rendered, other shapes are empty
fn text_field(document: &Value, field: &str) -> String {
    match document.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const ESEARCH_HIT: &str = r#"{
        "header": {"type": "esearch", "version": "0.3"},
        "esearchresult": {
            "count": "1", "retmax": "1", "retstart": "0",
            "idlist": ["129369"],
            "translationset": [],
            "querytranslation": "P12345[All Fields]"
        }
    }"#;

    const ESEARCH_MISS: &str = r#"{
        "header": {"type": "esearch", "version": "0.3"},
        "esearchresult": {
            "count": "0", "retmax": "0", "retstart": "0",
            "idlist": [],
            "errorlist": {"phrasesnotfound": ["BADID"], "fieldsnotfound": []},
            "querytranslation": "(BADID[All Fields])"
        }
    }"#;

    const ELINK_HIT: &str = r#"{
        "header": {"type": "elink", "version": "0.3"},
        "linksets": [{
            "dbfrom": "protein",
            "ids": ["129369"],
            "linksetdbs": [{
                "dbto": "taxonomy",
                "linkname": "protein_taxonomy",
                "links": ["9913"]
            }]
        }]
    }"#;

    const ELINK_MISS: &str = r#"{
        "header": {"type": "elink", "version": "0.3"},
        "linksets": [{"dbfrom": "protein", "ids": ["129369"]}]
    }"#;

    const ESUMMARY_HIT: &str = r#"{
        "header": {"type": "esummary", "version": "0.3"},
        "result": {
            "uids": ["9913"],
            "9913": {
                "uid": "9913",
                "status": "active",
                "rank": "species",
                "division": "even-toed ungulates",
                "scientificname": "Bos taurus",
                "commonname": "cattle",
                "taxid": 9913,
                "genus": "Bos",
                "species": "taurus"
            }
        }
    }"#;

    #[test]
    fn test_esearch_first_id() {
        let response: EsearchResponse = serde_json::from_str(ESEARCH_HIT).unwrap();
        assert_eq!(response.first_id(), Some("129369"));
    }

    #[test]
    fn test_esearch_empty_idlist() {
        let response: EsearchResponse = serde_json::from_str(ESEARCH_MISS).unwrap();
        assert_eq!(response.first_id(), None);
    }

    #[test]
    fn test_elink_first_taxonomy_link() {
        let response: ElinkResponse = serde_json::from_str(ELINK_HIT).unwrap();
        assert_eq!(response.first_taxonomy_link(), Some("9913"));
    }

    #[test]
    fn test_elink_without_linksetdbs() {
        let response: ElinkResponse = serde_json::from_str(ELINK_MISS).unwrap();
        assert_eq!(response.first_taxonomy_link(), None);
    }

    #[test]
    fn test_elink_skips_unrelated_linksets() {
        let response: ElinkResponse = serde_json::from_str(
            r#"{"linksets": [{"linksetdbs": [
                {"dbto": "pubmed", "linkname": "protein_pubmed", "links": ["1"]},
                {"dbto": "taxonomy", "linkname": "protein_taxonomy", "links": ["9606"]}
            ]}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_taxonomy_link(), Some("9606"));
    }

    #[test]
    fn test_esummary_extracts_numeric_taxid() {
        let response: EsummaryResponse = serde_json::from_str(ESUMMARY_HIT).unwrap();
        let record = response.extract_taxonomy("9913").unwrap();
        assert_eq!(record.scientific_name, "Bos taurus");
        assert_eq!(record.tax_id, "9913");
    }

    #[test]
    fn test_esummary_missing_document() {
        let response: EsummaryResponse = serde_json::from_str(ESUMMARY_HIT).unwrap();
        assert!(response.extract_taxonomy("9606").is_none());
    }

    #[test]
    fn test_esummary_missing_fields_extract_empty() {
        let response: EsummaryResponse = serde_json::from_str(
            r#"{"result": {"uids": ["42"], "42": {"uid": "42", "rank": "species"}}}"#,
        )
        .unwrap();
        let record = response.extract_taxonomy("42").unwrap();
        assert!(record.scientific_name.is_empty());
        assert!(record.tax_id.is_empty());
        assert!(!record.is_complete());
    }

    #[test]
    fn test_esummary_unexpected_field_shape_extracts_empty() {
        let response: EsummaryResponse = serde_json::from_str(
            r#"{"result": {"uids": ["42"], "42": {"scientificname": ["not", "text"], "taxid": 42}}}"#,
        )
        .unwrap();
        let record = response.extract_taxonomy("42").unwrap();
        assert!(record.scientific_name.is_empty());
        assert_eq!(record.tax_id, "42");
        assert!(!record.is_complete());
    }
}
