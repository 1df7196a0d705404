//! E-utilities endpoint URL builders
//!
//! Helper functions to construct Entrez endpoint URLs. All requests ask for
//! `retmode=json`.

/// Build an esearch URL for a term lookup in the given database
pub fn esearch_url(base_url: &str, db: &str, term: &str) -> String {
    format!(
        "{}/esearch.fcgi?db={}&term={}&retmode=json",
        base_url,
        db,
        urlencoding::encode(term)
    )
}

/// Build an elink URL linking a record UID from one database to another
pub fn elink_url(base_url: &str, dbfrom: &str, db: &str, uid: &str) -> String {
    format!(
        "{}/elink.fcgi?dbfrom={}&db={}&id={}&retmode=json",
        base_url,
        dbfrom,
        db,
        urlencoding::encode(uid)
    )
}

/// Build an esummary URL for a record UID in the given database
pub fn esummary_url(base_url: &str, db: &str, uid: &str) -> String {
    format!(
        "{}/esummary.fcgi?db={}&id={}&retmode=json",
        base_url,
        db,
        urlencoding::encode(uid)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esearch_url() {
        let url = esearch_url("http://localhost:9000", "protein", "P12345");
        assert_eq!(
            url,
            "http://localhost:9000/esearch.fcgi?db=protein&term=P12345&retmode=json"
        );
    }

    #[test]
    fn test_esearch_url_encodes_term() {
        let url = esearch_url("http://localhost:9000", "protein", "P12345 [accn]");
        assert_eq!(
            url,
            "http://localhost:9000/esearch.fcgi?db=protein&term=P12345%20%5Baccn%5D&retmode=json"
        );
    }

    #[test]
    fn test_elink_url() {
        let url = elink_url("http://localhost:9000", "protein", "taxonomy", "129369");
        assert_eq!(
            url,
            "http://localhost:9000/elink.fcgi?dbfrom=protein&db=taxonomy&id=129369&retmode=json"
        );
    }

    #[test]
    fn test_esummary_url() {
        let url = esummary_url("http://localhost:9000", "taxonomy", "9913");
        assert_eq!(
            url,
            "http://localhost:9000/esummary.fcgi?db=taxonomy&id=9913&retmode=json"
        );
    }
}
