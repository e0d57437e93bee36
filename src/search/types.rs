use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pools::types::PoolSummary;

use super::suggest::Suggestion;

/// Client pagination window; `total` is filled by pools on the way back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub start: usize,
    #[serde(default)]
    pub rows: usize,
    #[serde(default)]
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub sort_id: String,
    pub order: String,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            sort_id: "SortRelevance".to_string(),
            order: "desc".to_string(),
        }
    }
}

/// Per-pool sort override requested by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSort {
    pub pool_id: String,
    pub sort_id: String,
    pub order: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedFacet {
    pub facet_id: String,
    pub value: String,
}

/// Filter group addressed to a single pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterGroup {
    pub pool_id: String,
    #[serde(default)]
    pub facets: Vec<SelectedFacet>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPreferences {
    #[serde(default)]
    pub target_pool: String,
    #[serde(default)]
    pub exclude_pool: Vec<String>,
}

impl SearchPreferences {
    /// True when the reference (pool id or public URL) is on the exclude
    /// list. Empty references never match.
    pub fn is_excluded(&self, reference: &str) -> bool {
        !reference.is_empty() && self.exclude_pool.iter().any(|entry| entry == reference)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
    #[serde(default)]
    pub filters: Vec<FilterGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pool_sorting: Vec<PoolSort>,
    #[serde(default)]
    pub preferences: SearchPreferences,
}

impl SearchRequest {
    /// Shape this request for one pool: only that pool's filter group
    /// survives (at most one) and the sort becomes the client's override for
    /// the pool, or relevance descending.
    pub fn shaped_for(&self, pool_id: &str) -> SearchRequest {
        let mut shaped = self.clone();
        shaped.filters = self
            .filters
            .iter()
            .filter(|group| group.pool_id == pool_id)
            .take(1)
            .cloned()
            .collect();
        let sort = self
            .pool_sorting
            .iter()
            .find(|entry| entry.pool_id == pool_id)
            .map(|entry| SortOrder {
                sort_id: entry.sort_id.clone(),
                order: entry.order.clone(),
            })
            .unwrap_or_default();
        shaped.sort = Some(sort);
        shaped.pool_sorting = Vec::new();
        shaped
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordField {
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub field_type: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub visibility: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display: String,
}

/// A single search hit, an ordered list of named fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub fields: Vec<RecordField>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub debug: HashMap<String, Value>,
}

/// Records collapsed under a shared group value (e.g. a work with multiple
/// holdings).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub value: String,
    pub count: usize,
    #[serde(default, rename = "record_list", skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facet {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buckets: Vec<FacetBucket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetBucket {
    pub value: String,
    pub count: usize,
}

/// Response envelope from a single pool, plus the metadata the aggregator
/// stamps on (service URL, pool id, elapsed, status). The content language
/// travels out-of-band and is never serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolResult {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_url: String,
    #[serde(default, rename = "pool_id", skip_serializing_if = "String::is_empty")]
    pub pool_name: String,
    #[serde(default)]
    pub elapsed_ms: i64,
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default, rename = "record_list", skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<Record>,
    #[serde(default, rename = "group_list", skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub available_facets: Vec<Facet>,
    #[serde(default, rename = "facet_list", skip_serializing_if = "Vec::is_empty")]
    pub facet_list: Vec<Facet>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub confidence: String,
    #[serde(default)]
    pub debug: HashMap<String, Value>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub status_code: u16,
    #[serde(default, rename = "status_msg", skip_serializing_if = "String::is_empty")]
    pub status_message: String,
    #[serde(skip)]
    pub content_language: String,
}

impl PoolResult {
    /// Numeric ranking for the self-reported confidence tag; `low` and
    /// anything unknown rank lowest.
    pub fn confidence_index(&self) -> usize {
        match self.confidence.as_str() {
            "medium" => 1,
            "high" => 2,
            "exact" => 3,
            _ => 0,
        }
    }

    /// The pool's reported max relevance score, dug out of the debug map.
    pub fn max_score(&self) -> f64 {
        self.debug
            .get("max_score")
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    /// Envelope for a pool that produced no usable result; carries only the
    /// status and a human-readable message.
    pub fn failed(
        service_url: &str,
        pool_name: &str,
        elapsed_ms: i64,
        status_code: u16,
        status_message: String,
    ) -> Self {
        Self {
            service_url: service_url.to_string(),
            pool_name: pool_name.to_string(),
            elapsed_ms,
            status_code,
            status_message,
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub request: SearchRequest,
    pub pools: Vec<PoolSummary>,
    pub total_time_ms: i64,
    pub total_hits: usize,
    #[serde(rename = "pool_results")]
    pub results: Vec<PoolResult>,
    pub suggestions: Vec<Suggestion>,
    pub warnings: Vec<String>,
}

impl SearchResponse {
    pub fn new(request: SearchRequest) -> Self {
        Self {
            request,
            pools: Vec::new(),
            total_time_ms: 0,
            total_hits: 0,
            results: Vec::new(),
            suggestions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Fold one arriving pool result into the aggregate. Every dispatched
    /// pool lands here exactly once; only 200s contribute hits, everything
    /// else contributes a warning.
    pub fn absorb(&mut self, result: PoolResult) {
        if result.status_code == 200 {
            self.total_hits += result.pagination.total;
        } else if !result.status_message.is_empty() {
            self.warnings.push(result.status_message.clone());
        }
        self.results.push(result);
    }
}
