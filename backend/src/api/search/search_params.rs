//! Backend request parameters for a faceted search.

use chrono::{DateTime, Utc};
use common::{
    facet_menu::FacetKind,
    facet_query::{RequestForm, SelectionQuery},
};

use crate::{
    config::FacetConfig,
    facets::{FacetDescriptors, FieldSelection, RangeBounds, SelectionState},
};

pub type SearchParams = Vec<(String, String)>;

fn solr_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Filter query restricting `field` to its current selection.
fn filter_query(field: &str, selection: &FieldSelection) -> String {
    match selection {
        FieldSelection::Values(values) => {
            let values = values.iter().map(|v| quote(v)).collect::<Vec<_>>().join(" OR ");
            format!("{field}:({values})")
        }
        FieldSelection::Range(RangeBounds::Min(from)) => {
            format!("{field}:[{} TO *]", solr_date(from))
        }
        FieldSelection::Range(RangeBounds::Max(to)) => format!("{field}:[* TO {}]", solr_date(to)),
        FieldSelection::Range(RangeBounds::MinMax(from, to)) => {
            format!("{field}:[{} TO {}]", solr_date(from), solr_date(to))
        }
    }
}

/// Replace the default value of `key` with the request's own.
fn override_param(params: &mut SearchParams, key: &str, value: &SelectionQuery) {
    params.retain(|(k, _)| k != key);
    for v in value.values() {
        params.push((key.to_string(), v.to_string()));
    }
}

/// The default facet query for `descriptors`, then the request's own parameters and filters.
///
/// Only paging overrides a default. Filters from the request are added next to the selection
/// filters, and `q` is sent once.
pub fn build_facet_params(
    descriptors: &FacetDescriptors,
    selection: &SelectionState,
    config: &FacetConfig,
    form: &RequestForm,
) -> SearchParams {
    let mut params: SearchParams = vec![
        ("facet".to_string(), "true".to_string()),
        ("rows".to_string(), config.batch_size.to_string()),
    ];
    for descriptor in descriptors.of_kind(FacetKind::Standard) {
        params.push(("facet.field".to_string(), descriptor.name.clone()));
    }
    let mut has_ranges = false;
    for descriptor in descriptors.of_kind(FacetKind::Range) {
        params.push(("facet.range".to_string(), descriptor.name.clone()));
        has_ranges = true;
    }
    if has_ranges {
        params.push(("facet.range.start".to_string(), config.range_start.clone()));
        params.push(("facet.range.end".to_string(), config.range_end.clone()));
        params.push(("facet.range.gap".to_string(), config.range_gap()));
        params.push(("facet.range.other".to_string(), config.range_other.clone()));
    }

    let mut query = None;
    let mut text = None;
    for (key, value) in form {
        if key.contains("facet") || key.contains("_usage") {
            continue;
        }
        if let Some(field_selection) = selection.get(key) {
            params.push(("fq".to_string(), filter_query(key, field_selection)));
            continue;
        }
        if descriptors.get(key).is_some() {
            continue;
        }
        let first = value.values().first().map(|v| v.to_string());
        match key.as_str() {
            "SearchableText" => text = first,
            "q" => query = first,
            "b_size" | "rows" => override_param(&mut params, "rows", value),
            "b_start" | "start" => override_param(&mut params, "start", value),
            other => {
                for v in value.values() {
                    params.push((other.to_string(), v.to_string()));
                }
            }
        }
    }
    let query = text.or(query).unwrap_or_else(|| "*:*".to_string());
    params.push(("q".to_string(), query));
    params
}
