//! Aggregate counts reported by the search backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RangeCounts {
    pub counts: BTreeMap<String, u64>,
    pub before: Option<i64>,
    pub after: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RawCounts {
    pub facet_fields: BTreeMap<String, BTreeMap<String, u64>>,
    pub facet_ranges: BTreeMap<String, RangeCounts>,
}

/// A count, or counts keyed by the next level of menu ids.
#[derive(Debug, Clone, PartialEq)]
pub enum CountNode {
    Count(u64),
    Nested(BTreeMap<String, CountNode>),
}

impl CountNode {
    pub fn child(&self, id: &str) -> Option<&CountNode> {
        match self {
            CountNode::Nested(children) => children.get(id),
            CountNode::Count(_) => None,
        }
    }

    /// The count of this node; nested counts have none and read as zero.
    pub fn count(&self) -> u64 {
        match self {
            CountNode::Count(count) => *count,
            CountNode::Nested(_) => 0,
        }
    }
}

impl RawCounts {
    /// Raw ids reported for `field`, standard facets first.
    pub fn values_for(&self, field: &str) -> Option<Vec<&str>> {
        if let Some(values) = self.facet_fields.get(field) {
            return Some(values.keys().map(|k| k.as_str()).collect());
        }
        self.facet_ranges
            .get(field)
            .map(|range| range.counts.keys().map(|k| k.as_str()).collect())
    }

    /// Per-field counts with range buckets merged in next to the standard fields.
    pub fn count_tree(&self) -> CountNode {
        let mut fields = BTreeMap::new();
        for (field, values) in &self.facet_fields {
            fields.insert(field.clone(), nested(values));
        }
        for (field, range) in &self.facet_ranges {
            fields.insert(field.clone(), nested(&range.counts));
        }
        CountNode::Nested(fields)
    }

    pub fn is_empty(&self) -> bool {
        self.facet_fields.is_empty() && self.facet_ranges.is_empty()
    }
}

fn nested(values: &BTreeMap<String, u64>) -> CountNode {
    CountNode::Nested(values.iter().map(|(k, v)| (k.clone(), CountNode::Count(*v))).collect())
}
