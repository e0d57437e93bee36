#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderMap, HeaderValue};

    use crate::pools::identify::drop_duplicates;
    use crate::pools::middleware::accept_language;
    use crate::pools::types::{IdentifyResponse, Pool, PoolAttribute, PoolSummary, RegistryRow};

    fn row(private_url: &str, public_url: &str, sequence: i32) -> RegistryRow {
        RegistryRow {
            id: 1,
            private_url: private_url.to_string(),
            public_url: public_url.to_string(),
            name: "registry name".to_string(),
            sequence,
        }
    }

    fn identity(id: &str, source: &str, name: &str) -> IdentifyResponse {
        IdentifyResponse {
            id: id.to_string(),
            source: source.to_string(),
            name: name.to_string(),
            description: String::new(),
            attributes: Vec::new(),
        }
    }

    fn pool(id: &str, public_url: &str, sequence: u32) -> Pool {
        Pool {
            id: id.to_string(),
            source: "solr".to_string(),
            private_url: format!("http://private/{}", id),
            public_url: public_url.to_string(),
            sequence,
            name: id.to_string(),
            description: String::new(),
            attributes: Vec::new(),
            external: false,
            language: "en-US".to_string(),
        }
    }

    // ============================================================
    // ACCEPT-LANGUAGE PARSING
    // ============================================================

    #[test]
    fn test_accept_language_first_tag_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("es-ES, en-US;q=0.8"),
        );

        assert_eq!(accept_language(&headers), "es-ES");
    }

    #[test]
    fn test_accept_language_missing_defaults() {
        let headers = HeaderMap::new();

        assert_eq!(accept_language(&headers), "en-US");
    }

    #[test]
    fn test_accept_language_empty_defaults() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(""));

        assert_eq!(accept_language(&headers), "en-US");
    }

    // ============================================================
    // IDENTITY CONSTRUCTION
    // ============================================================

    #[test]
    fn test_external_flag_from_attributes() {
        let mut id = identity("articles", "eds", "Articles");
        id.attributes = vec![
            PoolAttribute {
                name: "logo_url".to_string(),
                supported: false,
            },
            PoolAttribute {
                name: "external_hold".to_string(),
                supported: true,
            },
        ];

        let pool = Pool::from_identity(&row("http://priv", "https://pub", 3), id, "en-US");

        assert!(pool.external);
        assert_eq!(pool.sequence, 3);
        assert_eq!(pool.language, "en-US");
    }

    #[test]
    fn test_external_flag_requires_supported() {
        let mut id = identity("articles", "eds", "Articles");
        id.attributes = vec![PoolAttribute {
            name: "external_hold".to_string(),
            supported: false,
        }];

        let pool = Pool::from_identity(&row("http://priv", "https://pub", 1), id, "en-US");

        assert!(!pool.external);
    }

    #[test]
    fn test_identity_name_falls_back_to_registry() {
        let id = identity("catalog", "solr", "");

        let pool = Pool::from_identity(&row("http://priv", "https://pub", 1), id, "en-US");

        assert_eq!(pool.name, "registry name");
    }

    #[test]
    fn test_identify_response_parses_wire_shape() {
        let body = r#"{
            "id": "catalog",
            "source": "solr",
            "name": "Catalog",
            "description": "Books and more",
            "attributes": [{"name": "facets", "supported": true}]
        }"#;

        let parsed: IdentifyResponse = serde_json::from_str(body).expect("parse identity");

        assert_eq!(parsed.id, "catalog");
        assert_eq!(parsed.source, "solr");
        assert_eq!(parsed.attributes.len(), 1);
    }

    // ============================================================
    // POOL MATCHING AND SUMMARIES
    // ============================================================

    #[test]
    fn test_matches_by_id_and_url() {
        let p = pool("catalog", "https://catalog.example.edu", 1);

        assert!(p.matches("catalog"));
        assert!(p.matches("https://catalog.example.edu"));
        assert!(!p.matches("articles"));
        assert!(!p.matches(""));
    }

    #[test]
    fn test_summary_uses_public_url() {
        let p = pool("catalog", "https://catalog.example.edu", 1);

        let summary = PoolSummary::from(&p);

        assert_eq!(summary.url, "https://catalog.example.edu");
        assert_eq!(summary.id, "catalog");
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("private"));
    }

    // ============================================================
    // DUPLICATE SUPPRESSION
    // ============================================================

    #[test]
    fn test_duplicate_id_dropped_first_wins() {
        let mut pools = vec![
            pool("catalog", "https://a", 1),
            pool("catalog", "https://b", 2),
        ];

        drop_duplicates(&mut pools);

        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].public_url, "https://a");
    }

    #[test]
    fn test_duplicate_public_url_dropped() {
        let mut pools = vec![
            pool("catalog", "https://same", 1),
            pool("articles", "https://same", 2),
        ];

        drop_duplicates(&mut pools);

        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].id, "catalog");
    }

    #[test]
    fn test_distinct_pools_kept() {
        let mut pools = vec![
            pool("catalog", "https://a", 1),
            pool("articles", "https://b", 2),
            pool("images", "https://c", 3),
        ];

        drop_duplicates(&mut pools);

        assert_eq!(pools.len(), 3);
    }
}
