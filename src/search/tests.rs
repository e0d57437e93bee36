#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::pools::types::{Pool, PoolSummary};
    use crate::search::sort::ResultOrdering;
    use crate::search::suggest::SuggestionResponse;
    use crate::search::types::{
        FilterGroup, Pagination, PoolResult, PoolSort, SearchPreferences, SearchRequest,
        SearchResponse, SelectedFacet, SortOrder,
    };

    fn pool(id: &str, public_url: &str, sequence: u32) -> Pool {
        Pool {
            id: id.to_string(),
            source: "solr".to_string(),
            private_url: format!("http://internal/{}", id),
            public_url: public_url.to_string(),
            sequence,
            name: id.to_string(),
            description: String::new(),
            attributes: Vec::new(),
            external: false,
            language: "en-US".to_string(),
        }
    }

    fn result(pool_name: &str, service_url: &str, confidence: &str, total: usize) -> PoolResult {
        PoolResult {
            service_url: service_url.to_string(),
            pool_name: pool_name.to_string(),
            pagination: Pagination {
                start: 0,
                rows: 20,
                total,
            },
            confidence: confidence.to_string(),
            status_code: 200,
            ..PoolResult::default()
        }
    }

    fn request(query: &str) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            pagination: Pagination::default(),
            sort: None,
            filters: Vec::new(),
            pool_sorting: Vec::new(),
            preferences: SearchPreferences::default(),
        }
    }

    // ============================================================
    // CONFIDENCE AND DEBUG SCORES
    // ============================================================

    #[test]
    fn test_confidence_index_mapping() {
        let mut r = result("a", "https://a", "low", 0);
        assert_eq!(r.confidence_index(), 0);
        r.confidence = "medium".to_string();
        assert_eq!(r.confidence_index(), 1);
        r.confidence = "high".to_string();
        assert_eq!(r.confidence_index(), 2);
        r.confidence = "exact".to_string();
        assert_eq!(r.confidence_index(), 3);
    }

    #[test]
    fn test_unknown_confidence_ranks_lowest() {
        let mut r = result("a", "https://a", "banana", 0);
        assert_eq!(r.confidence_index(), 0);
        r.confidence = String::new();
        assert_eq!(r.confidence_index(), 0);
    }

    #[test]
    fn test_max_score_from_debug_map() {
        let mut r = result("a", "https://a", "high", 0);
        r.debug.insert("max_score".to_string(), json!(12.5));

        assert_eq!(r.max_score(), 12.5);
    }

    #[test]
    fn test_max_score_defaults_to_zero() {
        let r = result("a", "https://a", "high", 0);

        assert_eq!(r.max_score(), 0.0);
    }

    // ============================================================
    // REQUEST SHAPING
    // ============================================================

    #[test]
    fn test_shaping_keeps_only_matching_filter_group() {
        let mut req = request("keyword:{cats}");
        req.filters = vec![
            FilterGroup {
                pool_id: "catalog".to_string(),
                facets: vec![SelectedFacet {
                    facet_id: "FilterLibrary".to_string(),
                    value: "Main".to_string(),
                }],
            },
            FilterGroup {
                pool_id: "articles".to_string(),
                facets: Vec::new(),
            },
        ];

        let shaped = req.shaped_for("articles");

        assert_eq!(shaped.filters.len(), 1);
        assert_eq!(shaped.filters[0].pool_id, "articles");
    }

    #[test]
    fn test_shaping_applies_sort_override() {
        let mut req = request("keyword:{cats}");
        req.pool_sorting = vec![PoolSort {
            pool_id: "catalog".to_string(),
            sort_id: "SortDate".to_string(),
            order: "asc".to_string(),
        }];

        let shaped = req.shaped_for("catalog");

        assert_eq!(
            shaped.sort,
            Some(SortOrder {
                sort_id: "SortDate".to_string(),
                order: "asc".to_string(),
            })
        );
    }

    #[test]
    fn test_shaping_defaults_to_relevance() {
        let req = request("keyword:{cats}");

        let shaped = req.shaped_for("catalog");

        assert_eq!(shaped.sort, Some(SortOrder::default()));
        assert_eq!(shaped.sort.unwrap().sort_id, "SortRelevance");
    }

    #[test]
    fn test_shaped_body_omits_pool_sorting() {
        let mut req = request("keyword:{cats}");
        req.pool_sorting = vec![PoolSort {
            pool_id: "catalog".to_string(),
            sort_id: "SortDate".to_string(),
            order: "asc".to_string(),
        }];

        let shaped = req.shaped_for("catalog");
        let body = serde_json::to_string(&shaped).unwrap();

        assert!(!body.contains("pool_sorting"));
        assert!(body.contains("SortDate"));
    }

    // ============================================================
    // EXCLUSION PREFERENCES
    // ============================================================

    #[test]
    fn test_exclude_by_id_or_url() {
        let prefs = SearchPreferences {
            target_pool: String::new(),
            exclude_pool: vec!["https://b".to_string(), "images".to_string()],
        };
        let pools = vec![
            pool("catalog", "https://a", 1),
            pool("articles", "https://b", 2),
            pool("images", "https://c", 3),
        ];

        let queried: Vec<&Pool> = pools
            .iter()
            .filter(|p| !prefs.exclude_pool.iter().any(|entry| p.matches(entry)))
            .collect();

        assert_eq!(queried.len(), 1);
        assert_eq!(queried[0].id, "catalog");
    }

    #[test]
    fn test_empty_exclude_reference_never_matches() {
        let prefs = SearchPreferences {
            target_pool: String::new(),
            exclude_pool: vec![String::new()],
        };

        assert!(!prefs.is_excluded(""));
    }

    #[test]
    fn test_target_in_exclude_list_detected() {
        let prefs = SearchPreferences {
            target_pool: "https://b".to_string(),
            exclude_pool: vec!["https://b".to_string()],
        };

        assert!(prefs.is_excluded(&prefs.target_pool));
    }

    // ============================================================
    // RESULT COLLECTION (aggregate invariants)
    // ============================================================

    #[test]
    fn test_absorb_sums_hits_from_ok_results() {
        let mut out = SearchResponse::new(request("keyword:{cats}"));
        out.absorb(result("a", "https://a", "high", 5));
        out.absorb(result("b", "https://b", "low", 5));

        assert_eq!(out.total_hits, 10);
        assert_eq!(out.results.len(), 2);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_absorb_partial_failure_becomes_warning() {
        let mut out = SearchResponse::new(request("keyword:{cats}"));
        out.absorb(result("a", "https://a", "high", 7));
        out.absorb(PoolResult::failed(
            "https://b",
            "b",
            120,
            408,
            "B timed out".to_string(),
        ));

        assert_eq!(out.total_hits, 7);
        assert_eq!(out.results.len(), 2);
        assert_eq!(out.warnings, vec!["B timed out".to_string()]);
    }

    #[test]
    fn test_failed_result_keeps_identity() {
        let failed = PoolResult::failed("https://b", "b", 42, 503, "offline".to_string());

        assert_eq!(failed.service_url, "https://b");
        assert_eq!(failed.pool_name, "b");
        assert_eq!(failed.elapsed_ms, 42);
        assert_eq!(failed.status_code, 503);
        assert_eq!(failed.pagination.total, 0);
    }

    // ============================================================
    // ORDERING: BY SEQUENCE
    // ============================================================

    #[test]
    fn test_by_sequence_orders_results() {
        let pools = vec![pool("a", "https://a", 1), pool("b", "https://b", 2)];
        // arrival order reversed
        let mut results = vec![
            result("b", "https://b", "low", 5),
            result("a", "https://a", "low", 5),
        ];

        ResultOrdering::by_sequence(&pools).sort(&mut results);

        assert_eq!(results[0].pool_name, "a");
        assert_eq!(results[1].pool_name, "b");
    }

    #[test]
    fn test_by_sequence_unknown_pool_keeps_arrival_order() {
        let pools = vec![pool("a", "https://a", 1)];
        let mut results = vec![
            result("ghost", "https://ghost", "low", 5),
            result("a", "https://a", "low", 5),
        ];

        ResultOrdering::by_sequence(&pools).sort(&mut results);

        // ghost resolves to nothing, so the comparator treats the pair as
        // equal and the stable sort keeps arrival order
        assert_eq!(results[0].pool_name, "ghost");
        assert_eq!(results[1].pool_name, "a");
    }

    // ============================================================
    // ORDERING: BY NAME
    // ============================================================

    #[test]
    fn test_by_name_orders_lexicographically() {
        let mut results = vec![
            result("images", "https://c", "low", 1),
            result("articles", "https://b", "low", 2),
            result("catalog", "https://a", "low", 3),
        ];

        ResultOrdering::by_name().sort(&mut results);

        let names: Vec<&str> = results.iter().map(|r| r.pool_name.as_str()).collect();
        assert_eq!(names, vec!["articles", "catalog", "images"]);
    }

    // ============================================================
    // ORDERING: BY CONFIDENCE
    // ============================================================

    #[test]
    fn test_target_bubbles_to_top() {
        // confidences low/high/high with target Z expects Z, Y, X
        let mut results = vec![
            result("x", "https://x", "low", 1),
            result("y", "https://y", "high", 2),
            result("z", "https://z", "high", 1),
        ];

        ResultOrdering::by_confidence("https://z").sort(&mut results);

        let urls: Vec<&str> = results.iter().map(|r| r.service_url.as_str()).collect();
        assert_eq!(urls, vec!["https://z", "https://y", "https://x"]);
    }

    #[test]
    fn test_confidence_descends_without_target() {
        let mut results = vec![
            result("a", "https://a", "low", 10),
            result("b", "https://b", "exact", 1),
            result("c", "https://c", "medium", 5),
        ];

        ResultOrdering::by_confidence("").sort(&mut results);

        let confs: Vec<&str> = results.iter().map(|r| r.confidence.as_str()).collect();
        assert_eq!(confs, vec!["exact", "medium", "low"]);
    }

    #[test]
    fn test_equal_confidence_breaks_on_max_score() {
        let mut low_score = result("a", "https://a", "high", 50);
        low_score
            .debug
            .insert("max_score".to_string(), json!(1.25));
        let mut high_score = result("b", "https://b", "high", 5);
        high_score
            .debug
            .insert("max_score".to_string(), json!(7.75));
        let mut results = vec![low_score, high_score];

        ResultOrdering::by_confidence("").sort(&mut results);

        assert_eq!(results[0].pool_name, "b");
    }

    #[test]
    fn test_equal_score_breaks_on_hit_count() {
        let mut results = vec![
            result("a", "https://a", "high", 5),
            result("b", "https://b", "high", 50),
        ];

        ResultOrdering::by_confidence("").sort(&mut results);

        assert_eq!(results[0].pool_name, "b");
    }

    #[test]
    fn test_by_confidence_output_is_lexicographically_ordered() {
        let mut results = vec![
            result("a", "https://a", "medium", 9),
            result("b", "https://b", "exact", 2),
            result("c", "https://c", "low", 100),
            result("d", "https://d", "medium", 11),
            result("e", "https://e", "high", 3),
        ];

        ResultOrdering::by_confidence("").sort(&mut results);

        for pair in results.windows(2) {
            let left = (
                pair[0].confidence_index(),
                pair[0].max_score(),
                pair[0].pagination.total,
            );
            let right = (
                pair[1].confidence_index(),
                pair[1].max_score(),
                pair[1].pagination.total,
            );
            assert!(
                left >= right,
                "results out of order: {:?} < {:?}",
                left,
                right
            );
        }
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let pools = vec![
            pool("a", "https://a", 2),
            pool("b", "https://b", 1),
            pool("c", "https://c", 3),
        ];
        let mut results = vec![
            result("a", "https://a", "high", 5),
            result("b", "https://b", "low", 9),
            result("c", "https://c", "exact", 2),
        ];

        for ordering in [
            ResultOrdering::by_sequence(&pools),
            ResultOrdering::by_name(),
            ResultOrdering::by_confidence("https://b"),
        ] {
            ordering.sort(&mut results);
            let once: Vec<String> = results.iter().map(|r| r.pool_name.clone()).collect();
            ordering.sort(&mut results);
            let twice: Vec<String> = results.iter().map(|r| r.pool_name.clone()).collect();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_sources_param_selects_strategy() {
        let pools = vec![pool("a", "https://a", 1), pool("b", "https://b", 2)];
        // b has better confidence but later sequence
        let make_results = || {
            vec![
                result("b", "https://b", "exact", 1),
                result("a", "https://a", "low", 1),
            ]
        };

        let mut results = make_results();
        ResultOrdering::for_request(Some("default"), &pools, "").sort(&mut results);
        assert_eq!(results[0].pool_name, "b");

        let mut results = make_results();
        ResultOrdering::for_request(None, &pools, "").sort(&mut results);
        assert_eq!(results[0].pool_name, "a");

        let mut results = make_results();
        ResultOrdering::for_request(Some("all"), &pools, "").sort(&mut results);
        assert_eq!(results[0].pool_name, "a");
    }

    // ============================================================
    // SERIALIZATION
    // ============================================================

    #[test]
    fn test_pool_result_round_trip_preserves_comparator_fields() {
        let mut original = result("catalog", "https://catalog", "high", 42);
        original
            .debug
            .insert("max_score".to_string(), json!(3.5));
        original.elapsed_ms = 120;

        let encoded = serde_json::to_string(&original).unwrap();
        let restored: PoolResult = serde_json::from_str(&encoded).unwrap();

        assert_eq!(restored.pool_name, original.pool_name);
        assert_eq!(restored.service_url, original.service_url);
        assert_eq!(restored.confidence_index(), original.confidence_index());
        assert_eq!(restored.max_score(), original.max_score());
        assert_eq!(restored.pagination.total, original.pagination.total);
    }

    #[test]
    fn test_content_language_never_serialized() {
        let mut original = result("catalog", "https://catalog", "high", 1);
        original.content_language = "es-ES".to_string();

        let encoded = serde_json::to_string(&original).unwrap();
        let restored: PoolResult = serde_json::from_str(&encoded).unwrap();

        assert!(!encoded.contains("es-ES"));
        assert!(restored.content_language.is_empty());
    }

    #[test]
    fn test_pool_result_parses_wire_names() {
        let body = r#"{
            "pagination": {"start": 0, "rows": 20, "total": 6},
            "record_list": [{"fields": [{"name": "title", "label": "Title", "value": "Cats"}]}],
            "group_list": [{"value": "g1", "count": 2}],
            "facet_list": [{"id": "FilterLibrary", "name": "Library"}],
            "confidence": "high",
            "debug": {"max_score": 9.5},
            "warnings": []
        }"#;

        let parsed: PoolResult = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.groups.len(), 1);
        assert_eq!(parsed.facet_list[0].id, "FilterLibrary");
        assert_eq!(parsed.pagination.total, 6);
        assert_eq!(parsed.max_score(), 9.5);
    }

    #[test]
    fn test_search_response_lists_all_pools() {
        let pools = vec![pool("a", "https://a", 1), pool("b", "https://b", 2)];
        let mut out = SearchResponse::new(request("keyword:{cats}"));
        out.pools = pools.iter().map(PoolSummary::from).collect();
        // only pool a was queried
        out.absorb(result("a", "https://a", "high", 3));

        assert_eq!(out.pools.len(), 2);
        assert_eq!(out.results.len(), 1);
    }

    #[test]
    fn test_suggestion_response_parses_wire_shape() {
        let body = r#"{"Suggestions": [{"type": "Author", "value": "hemingway"}]}"#;

        let parsed: SuggestionResponse = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.suggestions.len(), 1);
        assert_eq!(parsed.suggestions[0].kind, "Author");
        assert_eq!(parsed.suggestions[0].value, "hemingway");
    }

    #[test]
    fn test_request_defaults_from_minimal_body() {
        let body = r#"{"query": "keyword:{cats}"}"#;

        let parsed: SearchRequest = serde_json::from_str(body).unwrap();

        assert!(parsed.filters.is_empty());
        assert!(parsed.pool_sorting.is_empty());
        assert!(parsed.preferences.target_pool.is_empty());
        assert!(parsed.preferences.exclude_pool.is_empty());
    }
}
