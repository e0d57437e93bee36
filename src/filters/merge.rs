use std::collections::HashMap;

use crate::search::types::FacetBucket;

use super::types::{PoolFilter, QueryFilter};

/// Filter ids worth merging from the eds facet endpoint; everything else it
/// returns is noise for advanced search.
pub const EDS_FILTER_IDS: &[&str] = &[
    "ContentProvider",
    "SubjectGeographic",
    "Language",
    "Publisher",
    "SourceType",
];

/// Merge per-source filter lists into the combined catalog. Source order is
/// the preference order: the first source to supply a label or a bucket-sort
/// hint wins, and filter order follows first appearance across sources.
pub fn merge_source_filters(source_filters: &[(String, Vec<PoolFilter>)]) -> Vec<QueryFilter> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<(&str, &PoolFilter)>> = HashMap::new();

    for (source, filters) in source_filters {
        for filter in filters {
            let entry = grouped.entry(filter.id.clone()).or_default();
            if entry.is_empty() {
                order.push(filter.id.clone());
            }
            entry.push((source.as_str(), filter));
        }
    }

    order.iter().map(|id| combine(id, &grouped[id])).collect()
}

fn combine(id: &str, contributions: &[(&str, &PoolFilter)]) -> QueryFilter {
    let mut label = String::new();
    let mut bucket_sort = String::new();
    let mut hidden = false;
    let mut sources = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for (source, filter) in contributions {
        sources.push((*source).to_string());
        if label.is_empty() && !filter.name.is_empty() {
            label = filter.name.clone();
        }
        if bucket_sort.is_empty() && !filter.sort.is_empty() {
            bucket_sort = filter.sort.clone();
        }
        hidden = hidden || filter.hidden;
        for bucket in &filter.buckets {
            *counts.entry(bucket.value.clone()).or_insert(0) += bucket.count;
        }
    }

    let mut buckets: Vec<FacetBucket> = counts
        .into_iter()
        .map(|(value, count)| FacetBucket { value, count })
        .collect();
    sort_buckets(&mut buckets, &bucket_sort);

    QueryFilter {
        id: id.to_string(),
        label,
        sources,
        hidden,
        buckets,
    }
}

/// `alpha` sorts by bucket value; anything else sorts by descending count
/// with ascending value as the deterministic tie break.
pub fn sort_buckets(buckets: &mut [FacetBucket], bucket_sort: &str) {
    match bucket_sort {
        "alpha" => buckets.sort_by(|a, b| a.value.cmp(&b.value)),
        _ => buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value))),
    }
}

/// Keep only the eds filters on the allow list.
pub fn apply_eds_allow_list(filters: &mut Vec<PoolFilter>) {
    filters.retain(|filter| EDS_FILTER_IDS.contains(&filter.id.as_str()));
}

/// Merged filter ids are uniform across sources: every id carries the
/// `Filter` prefix.
pub fn normalize_filter_ids(filters: &mut [PoolFilter]) {
    for filter in filters {
        if !filter.id.starts_with("Filter") {
            filter.id = format!("Filter{}", filter.id);
        }
    }
}
