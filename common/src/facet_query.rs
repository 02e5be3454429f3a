//! Shared facet query models: the request's facet selection and facet field requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Comparison mode of a structured range query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeMode {
    #[serde(rename = "min")]
    Min,
    #[serde(rename = "max")]
    Max,
    #[serde(rename = "min:max")]
    MinMax,
}

/// One request parameter as the caller's form serialization supplied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionQuery {
    Scalar(String),
    Sequence(Vec<String>),
    RangeSpec {
        #[serde(rename = "query", default)]
        values: Vec<String>,
        #[serde(rename = "range")]
        mode: RangeMode,
    },
}

impl SelectionQuery {
    /// Every raw value carried by this parameter, regardless of shape.
    pub fn values(&self) -> Vec<&str> {
        match self {
            SelectionQuery::Scalar(value) => vec![value.as_str()],
            SelectionQuery::Sequence(values) | SelectionQuery::RangeSpec { values, .. } => {
                values.iter().map(|v| v.as_str()).collect()
            }
        }
    }
}

/// Incoming request parameters, keyed by parameter name.
pub type RequestForm = BTreeMap<String, SelectionQuery>;

/// Facet fields requested explicitly or configured on the searched content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FacetRequest {
    pub form: RequestForm,
    pub content_facet_fields: Option<Vec<String>>,
    pub content_facet_ranges: Option<Vec<String>>,
}

impl FacetRequest {
    /// Field names listed under the first present request parameter among `keys`.
    pub fn listed(&self, keys: &[&str]) -> Option<Vec<String>> {
        keys.iter()
            .find_map(|key| self.form.get(*key))
            .map(|query| query.values().into_iter().map(|v| v.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_shapes_deserialize_untagged() {
        let form: RequestForm = serde_json::from_str(
            r#"{
                "color": "red",
                "size": ["s", "m"],
                "created": {"query": ["2024-01-01"], "range": "min:max"}
            }"#,
        )
        .unwrap();

        assert_eq!(form["color"], SelectionQuery::Scalar("red".into()));
        assert_eq!(form["size"], SelectionQuery::Sequence(vec!["s".into(), "m".into()]));
        assert_eq!(
            form["created"],
            SelectionQuery::RangeSpec { values: vec!["2024-01-01".into()], mode: RangeMode::MinMax }
        );
    }

    #[test]
    fn listed_prefers_first_key() {
        let mut request = FacetRequest::default();
        request.form.insert("facet_field".into(), SelectionQuery::Scalar("b".into()));
        request.form.insert("facet.field".into(), SelectionQuery::Sequence(vec!["a".into()]));
        assert_eq!(request.listed(&["facet.field", "facet_field"]), Some(vec!["a".to_string()]));
        assert_eq!(request.listed(&["facet.range"]), None);
    }
}
