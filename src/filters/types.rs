use serde::{Deserialize, Serialize};

use crate::search::types::FacetBucket;

/// Wire shape of a pool's filter listing (`/api/filters` for solr-family
/// pools, `/api/search/facets` for eds).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoolFilterList {
    #[serde(default)]
    pub facet_list: Vec<PoolFilter>,
}

/// One advanced-search filter as a single pool reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolFilter {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sort: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub buckets: Vec<FacetBucket>,
}

/// A merged advanced-search filter spanning every contributing source kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryFilter {
    pub id: String,
    pub label: String,
    pub sources: Vec<String>,
    #[serde(default)]
    pub hidden: bool,
    pub buckets: Vec<FacetBucket>,
}
