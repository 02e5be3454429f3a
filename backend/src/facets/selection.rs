//! Selection state of facet values under the current request.
//!
//! Request parameters arrive in whatever shape the form serialization produced. They are
//! normalized once per request into a [`FieldSelection`] for each facet field; menu nodes are then
//! checked against the normalized selection of their parent field.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use common::{
    facet_menu::{FacetKind, ROOT_ID},
    facet_query::{RangeMode, RequestForm, SelectionQuery},
};

use crate::{
    config::FacetConfig,
    error::FacetResult,
    facets::{
        dates::{is_near, parse_date},
        descriptors::FacetDescriptors,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBounds {
    Min(DateTime<Utc>),
    Max(DateTime<Utc>),
    MinMax(DateTime<Utc>, DateTime<Utc>),
}

impl RangeBounds {
    pub fn mode(&self) -> RangeMode {
        match self {
            RangeBounds::Min(_) => RangeMode::Min,
            RangeBounds::Max(_) => RangeMode::Max,
            RangeBounds::MinMax(..) => RangeMode::MinMax,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldSelection {
    Values(Vec<String>),
    Range(RangeBounds),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub selected: bool,
    pub selected_from: bool,
    pub selected_to: bool,
}

fn default_window(config: &FacetConfig) -> FacetResult<RangeBounds> {
    Ok(RangeBounds::MinMax(
        parse_date(&config.date_lower_bound)?,
        parse_date(&config.date_upper_bound)?,
    ))
}

/// Interpret one request parameter for a facet of the given kind.
pub fn normalize(
    query: &SelectionQuery,
    kind: FacetKind,
    config: &FacetConfig,
) -> FacetResult<FieldSelection> {
    if kind == FacetKind::Standard {
        let values = query.values().into_iter().map(|v| v.to_string()).collect();
        return Ok(FieldSelection::Values(values));
    }

    let bounds = match query {
        SelectionQuery::Scalar(value) => RangeBounds::Min(parse_date(value)?),
        SelectionQuery::Sequence(values) => match values.as_slice() {
            [value] => RangeBounds::Min(parse_date(value)?),
            [from, to] => RangeBounds::MinMax(parse_date(from)?, parse_date(to)?),
            _ => default_window(config)?,
        },
        SelectionQuery::RangeSpec { values, mode } => match (values.as_slice(), mode) {
            ([value], RangeMode::Min) | ([value, _], RangeMode::Min) => {
                RangeBounds::Min(parse_date(value)?)
            }
            ([value], RangeMode::Max) | ([_, value], RangeMode::Max) => {
                RangeBounds::Max(parse_date(value)?)
            }
            ([from], RangeMode::MinMax) => {
                RangeBounds::MinMax(parse_date(from)?, parse_date(&config.date_upper_bound)?)
            }
            ([from, to], RangeMode::MinMax) => {
                RangeBounds::MinMax(parse_date(from)?, parse_date(to)?)
            }
            _ => default_window(config)?,
        },
    };
    Ok(FieldSelection::Range(bounds))
}

/// Normalized selection of every facet field present in the request.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    fields: BTreeMap<String, FieldSelection>,
    gap: TimeDelta,
}

impl SelectionState {
    /// Fails on a malformed range selection or an unusable configured bucket width.
    pub fn from_form(
        form: &RequestForm,
        descriptors: &FacetDescriptors,
        config: &FacetConfig,
    ) -> FacetResult<Self> {
        let gap = config.range_gap_delta()?;
        let mut fields = BTreeMap::new();
        for descriptor in &descriptors.fields {
            if let Some(query) = form.get(&descriptor.name) {
                fields.insert(descriptor.name.clone(), normalize(query, descriptor.kind, config)?);
            }
        }
        Ok(Self { fields, gap })
    }

    pub fn empty(config: &FacetConfig) -> FacetResult<Self> {
        Ok(Self { fields: BTreeMap::new(), gap: config.range_gap_delta()? })
    }

    pub fn get(&self, field: &str) -> Option<&FieldSelection> {
        self.fields.get(field)
    }

    /// Selection of `candidate` under `parent`, the field one level up in the menu.
    pub fn evaluate(
        &self,
        parent: Option<&str>,
        candidate: &str,
        kind: FacetKind,
    ) -> FacetResult<Selection> {
        let Some(parent) = parent.filter(|p| *p != ROOT_ID) else {
            return Ok(Selection::default());
        };
        let Some(selection) = self.fields.get(parent) else {
            return Ok(Selection::default());
        };

        match (kind, selection) {
            (FacetKind::Standard, FieldSelection::Values(values)) => Ok(Selection {
                selected: values.iter().any(|v| v == candidate),
                ..Selection::default()
            }),
            (FacetKind::Range, FieldSelection::Range(bounds)) => {
                let date = parse_date(candidate)?;
                let (selected_from, selected_to) = match *bounds {
                    RangeBounds::Min(from) => (is_near(date, from, self.gap), false),
                    RangeBounds::Max(to) => (false, is_near(date, to, self.gap)),
                    // each end is matched independently against the same bucket
                    RangeBounds::MinMax(from, to) => {
                        (is_near(date, from, self.gap), is_near(date, to, self.gap))
                    }
                };
                Ok(Selection { selected: selected_from || selected_to, selected_from, selected_to })
            }
            _ => Ok(Selection::default()),
        }
    }
}
