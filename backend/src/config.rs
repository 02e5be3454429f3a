//! Facet menu configuration with documented defaults.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{FacetError, FacetResult};

/// Far-past bucket id standing for "before the queried window".
pub const DATE_LOWER_BOUND: &str = "1000-01-01T00:00:00Z";
/// Far-future bucket id standing for "after the queried window".
pub const DATE_UPPER_BOUND: &str = "2499-12-31T23:59:59Z";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetConfig {
    pub solr_url: String,
    /// Width of one range bucket in days.
    pub range_gap_days: i64,
    pub range_start: String,
    pub range_end: String,
    pub range_other: String,
    pub date_lower_bound: String,
    pub date_upper_bound: String,
    pub batch_size: u64,
    /// Facet fields used when neither the request nor the content names any.
    pub default_facets: Vec<String>,
    pub default_ranges: Vec<String>,
    /// Field whose values are content type names.
    pub type_field: String,
    pub date_label_format: String,
}

impl Default for FacetConfig {
    fn default() -> Self {
        Self {
            solr_url: "http://127.0.0.1:8983/solr/plone".to_string(),
            range_gap_days: 7,
            range_start: "NOW/DAY-6MONTHS".to_string(),
            range_end: "NOW/DAY".to_string(),
            range_other: "all".to_string(),
            date_lower_bound: DATE_LOWER_BOUND.to_string(),
            date_upper_bound: DATE_UPPER_BOUND.to_string(),
            batch_size: 10,
            default_facets: vec![],
            default_ranges: vec![],
            type_field: "portal_type".to_string(),
            date_label_format: "%d.%m.%Y".to_string(),
        }
    }
}

impl FacetConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("SOLR_URL") {
            config.solr_url = url;
        }
        if let Ok(gap) = std::env::var("FACET_RANGE_GAP_DAYS") {
            match gap.parse::<i64>().ok().filter(|days| gap_delta(*days).is_ok()) {
                Some(days) => config.range_gap_days = days,
                None => tracing::warn!("ignoring invalid FACET_RANGE_GAP_DAYS={}", gap),
            }
        }
        config
    }

    /// Backend gap expression for one bucket, e.g. `+7DAYS`.
    pub fn range_gap(&self) -> String {
        format!("+{}DAYS", self.range_gap_days)
    }

    /// Width of one range bucket, rejected unless positive and representable.
    pub fn range_gap_delta(&self) -> FacetResult<TimeDelta> {
        gap_delta(self.range_gap_days)
    }
}

fn gap_delta(days: i64) -> FacetResult<TimeDelta> {
    TimeDelta::try_days(days)
        .filter(|gap| *gap > TimeDelta::zero())
        .ok_or(FacetError::InvalidRangeGap { days })
}
