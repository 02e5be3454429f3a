//! Display labels for facet fields and values.
//!
//! A field uses its real vocabulary when the label source knows one. Otherwise a vocabulary is
//! synthesized from the backend counts, with "Before"/"After" sentinel buckets for ranges that
//! report results outside the queried window.

use std::{collections::BTreeMap, path::Path};

use anyhow::Context;
use common::{
    facet_counts::RawCounts,
    facet_menu::FacetKind,
    vocabulary::{FieldVocabulary, VocabularyTerm},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    config::FacetConfig,
    facets::{dates::format_date, descriptors::FacetDescriptors},
};

pub const BEFORE_LABEL: &str = "Before";
pub const AFTER_LABEL: &str = "After";

/// Where real vocabularies and friendly names come from. Every lookup may come back empty.
pub trait LabelSource {
    fn vocabulary(&self, _field: &str) -> Option<FieldVocabulary> {
        None
    }

    /// Friendly name of a catalog index.
    fn index_title(&self, _field: &str) -> Option<String> {
        None
    }

    /// Friendly name of a content type token.
    fn type_title(&self, _token: &str) -> Option<String> {
        None
    }
}

impl LabelSource for () {}

/// Label source backed by maps, usually loaded from a JSON file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticLabels {
    pub vocabularies: BTreeMap<String, FieldVocabulary>,
    pub index_titles: BTreeMap<String, String>,
    pub type_titles: BTreeMap<String, String>,
}

impl StaticLabels {
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read labels from {}", path.display()))?;
        let labels = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse labels from {}", path.display()))?;
        Ok(labels)
    }
}

impl LabelSource for StaticLabels {
    fn vocabulary(&self, field: &str) -> Option<FieldVocabulary> {
        self.vocabularies.get(field).cloned()
    }

    fn index_title(&self, field: &str) -> Option<String> {
        self.index_titles.get(field).cloned()
    }

    fn type_title(&self, token: &str) -> Option<String> {
        self.type_titles.get(token).cloned()
    }
}

pub struct LabelResolver<'a, L: LabelSource + ?Sized> {
    source: &'a L,
    descriptors: &'a FacetDescriptors,
    config: &'a FacetConfig,
}

impl<'a, L: LabelSource + ?Sized> LabelResolver<'a, L> {
    pub fn new(source: &'a L, descriptors: &'a FacetDescriptors, config: &'a FacetConfig) -> Self {
        Self { source, descriptors, config }
    }

    pub fn field_title(&self, field: &str) -> String {
        self.source.index_title(field).unwrap_or_else(|| field.to_string())
    }

    pub fn type_title(&self, token: &str) -> String {
        self.source.type_title(token).unwrap_or_else(|| token.to_string())
    }

    /// Date values render as `dd.mm.yyyy`, everything else unchanged.
    pub fn friendly_value(&self, field: &str, value: &str) -> String {
        let is_date = self.descriptors.get(field).is_some_and(|d| d.is_date());
        if !is_date {
            return value.to_string();
        }
        match format_date(value, &self.config.date_label_format) {
            Ok(label) => label,
            Err(e) => {
                warn!("facet {}: keeping raw label: {}", field, e);
                value.to_string()
            }
        }
    }

    fn value_label(&self, field: &str, value: &str) -> String {
        if field == self.config.type_field {
            self.type_title(value)
        } else {
            self.friendly_value(field, value)
        }
    }

    /// Display label of one `value` of `field`.
    ///
    /// A term of the real vocabulary keeps its title, range sentinels read "Before"/"After" and
    /// anything else gets its friendly name.
    pub fn label(&self, field: &str, value: &str) -> String {
        let vocabulary = self.source.vocabulary(field);
        if let Some(title) = vocabulary.as_ref().and_then(|v| find_title(&v.terms, value)) {
            return title.to_string();
        }
        if self.descriptors.kind_of(field) == Some(FacetKind::Range) {
            if value == self.config.date_lower_bound {
                return BEFORE_LABEL.to_string();
            }
            if value == self.config.date_upper_bound {
                return AFTER_LABEL.to_string();
            }
        }
        self.value_label(field, value)
    }

    /// The vocabulary of `field`, real or synthesized; `None` when neither is available.
    pub fn vocabulary(&self, field: &str, counts: Option<&RawCounts>) -> Option<FieldVocabulary> {
        if let Some(vocabulary) = self.source.vocabulary(field) {
            return Some(vocabulary);
        }
        let counts = counts.filter(|c| !c.is_empty())?;
        let Some(values) = counts.values_for(field) else {
            debug!("facet {}: no vocabulary and no counts, skipping", field);
            return None;
        };

        let range = if counts.facet_fields.contains_key(field) {
            None
        } else {
            counts.facet_ranges.get(field)
        };
        let mut terms = Vec::with_capacity(values.len() + 2);
        if range.and_then(|r| r.before).is_some_and(|n| n >= 0) {
            terms.push(VocabularyTerm::new(&self.config.date_lower_bound, BEFORE_LABEL));
        }
        for value in values {
            terms.push(VocabularyTerm::new(value, self.value_label(field, value)));
        }
        if range.and_then(|r| r.after).is_some_and(|n| n >= 0) {
            terms.push(VocabularyTerm::new(&self.config.date_upper_bound, AFTER_LABEL));
        }

        Some(FieldVocabulary { title: self.field_title(field), terms })
    }

    /// One menu term per facet field that has a vocabulary, in facet order.
    pub fn vocabularies(&self, counts: Option<&RawCounts>) -> Vec<VocabularyTerm> {
        self.descriptors
            .names()
            .filter_map(|field| self.vocabulary(field, counts).map(|v| v.into_term(field)))
            .collect()
    }
}

fn find_title<'t>(terms: &'t [VocabularyTerm], value: &str) -> Option<&'t str> {
    terms.iter().find_map(|term| {
        if term.value == value {
            Some(term.title.as_str())
        } else {
            find_title(&term.children, value)
        }
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use common::facet_counts::RangeCounts;

    use super::*;
    use crate::{
        config::{DATE_LOWER_BOUND, DATE_UPPER_BOUND},
        facets::descriptors::FacetDescriptor,
    };

    fn descriptors() -> FacetDescriptors {
        let field = |name: &str, kind, field_type: &str| FacetDescriptor {
            name: name.to_string(),
            kind,
            field_type: Some(field_type.to_string()),
            window: None,
        };
        FacetDescriptors {
            fields: vec![
                field("year", FacetKind::Standard, "string"),
                field("portal_type", FacetKind::Standard, "string"),
                field("created", FacetKind::Range, "date"),
            ],
            dependencies: BTreeMap::new(),
        }
    }

    fn range_counts(before: Option<i64>, after: Option<i64>) -> RawCounts {
        let mut counts = RawCounts::default();
        counts.facet_ranges.insert(
            "created".into(),
            RangeCounts {
                counts: BTreeMap::from([("2024-01-01T00:00:00Z".to_string(), 4)]),
                before,
                after,
            },
        );
        counts
    }

    fn values(vocabulary: &FieldVocabulary) -> Vec<&str> {
        vocabulary.terms.iter().map(|t| t.value.as_str()).collect()
    }

    #[test]
    fn synthesizes_from_counts_without_sentinels() {
        let mut counts = RawCounts::default();
        counts.facet_fields.insert(
            "year".into(),
            BTreeMap::from([("2020".to_string(), 5), ("2021".to_string(), 3)]),
        );
        let d = descriptors();
        let config = FacetConfig::default();
        let resolver = LabelResolver::new(&(), &d, &config);

        let vocabulary = resolver.vocabulary("year", Some(&counts)).unwrap();
        assert_eq!(vocabulary.title, "year");
        let found: BTreeSet<_> = values(&vocabulary).into_iter().collect();
        assert_eq!(found, BTreeSet::from(["2020", "2021"]));
        assert!(vocabulary.terms.iter().all(|t| t.title != BEFORE_LABEL && t.title != AFTER_LABEL));
    }

    #[test]
    fn sentinels_follow_before_and_after() {
        let d = descriptors();
        let config = FacetConfig::default();
        let resolver = LabelResolver::new(&(), &d, &config);

        let both = resolver.vocabulary("created", Some(&range_counts(Some(2), Some(3)))).unwrap();
        assert_eq!(values(&both), vec![DATE_LOWER_BOUND, "2024-01-01T00:00:00Z", DATE_UPPER_BOUND]);
        assert_eq!(both.terms[0].title, BEFORE_LABEL);
        assert_eq!(both.terms[1].title, "01.01.2024");
        assert_eq!(both.terms[2].title, AFTER_LABEL);

        let before = resolver.vocabulary("created", Some(&range_counts(Some(0), None))).unwrap();
        assert_eq!(values(&before), vec![DATE_LOWER_BOUND, "2024-01-01T00:00:00Z"]);

        let neither = resolver.vocabulary("created", Some(&range_counts(None, Some(-1)))).unwrap();
        assert_eq!(values(&neither), vec!["2024-01-01T00:00:00Z"]);
    }

    #[test]
    fn real_vocabulary_wins_verbatim() {
        let mut labels = StaticLabels::default();
        labels.vocabularies.insert(
            "year".into(),
            FieldVocabulary {
                title: "Publication year".into(),
                terms: vec![
                    VocabularyTerm::new("2021", "Twenty-one"),
                    VocabularyTerm::new("2020", "Twenty"),
                ],
            },
        );
        let d = descriptors();
        let config = FacetConfig::default();
        let resolver = LabelResolver::new(&labels, &d, &config);

        let vocabulary = resolver.vocabulary("year", None).unwrap();
        assert_eq!(vocabulary.title, "Publication year");
        assert_eq!(values(&vocabulary), vec!["2021", "2020"]);
    }

    #[test]
    fn fields_without_vocabulary_or_counts_are_skipped() {
        let d = descriptors();
        let config = FacetConfig::default();
        let resolver = LabelResolver::new(&(), &d, &config);
        assert!(resolver.vocabularies(None).is_empty());
        assert!(resolver.vocabularies(Some(&RawCounts::default())).is_empty());

        let terms = resolver.vocabularies(Some(&range_counts(None, None)));
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].value, "created");
    }

    #[test]
    fn static_labels_load_from_json() {
        let path = std::env::temp_dir().join(format!("facet-labels-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{
                "vocabularies": {
                    "year": {"title": "Year", "terms": [{"value": "2020", "title": "2020"}]}
                },
                "type_titles": {"Document": "Page"}
            }"#,
        )
        .unwrap();
        let labels = StaticLabels::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(labels.vocabulary("year").map(|v| v.terms.len()), Some(1));
        assert_eq!(labels.type_title("Document").as_deref(), Some("Page"));
        assert!(labels.index_titles.is_empty());
        assert!(StaticLabels::from_json_file(&path).is_err());
    }

    #[test]
    fn friendly_names_fall_back_to_raw() {
        let mut labels = StaticLabels::default();
        labels.index_titles.insert("created".into(), "Creation date".into());
        labels.type_titles.insert("Document".into(), "Page".into());
        let d = descriptors();
        let config = FacetConfig::default();
        let resolver = LabelResolver::new(&labels, &d, &config);

        assert_eq!(resolver.field_title("created"), "Creation date");
        assert_eq!(resolver.field_title("year"), "year");
        assert_eq!(resolver.type_title("Document"), "Page");
        assert_eq!(resolver.type_title("Folder"), "Folder");
        assert_eq!(resolver.friendly_value("year", "2020"), "2020");
        assert_eq!(resolver.friendly_value("created", "not a date"), "not a date");

        let mut counts = RawCounts::default();
        counts.facet_fields.insert(
            "portal_type".into(),
            BTreeMap::from([("Document".to_string(), 1), ("Folder".to_string(), 1)]),
        );
        let vocabulary = resolver.vocabulary("portal_type", Some(&counts)).unwrap();
        let titles: Vec<_> = vocabulary.terms.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Page", "Folder"]);
    }

    #[test]
    fn single_value_labels() {
        let mut labels = StaticLabels::default();
        let mut nested = VocabularyTerm::new("2020", "Twenty");
        nested.children = vec![VocabularyTerm::new("2020-q1", "First quarter")];
        labels.vocabularies.insert(
            "year".into(),
            FieldVocabulary { title: "Year".into(), terms: vec![nested] },
        );
        labels.type_titles.insert("Document".into(), "Page".into());
        let d = descriptors();
        let config = FacetConfig::default();
        let resolver = LabelResolver::new(&labels, &d, &config);

        assert_eq!(resolver.label("year", "2020"), "Twenty");
        assert_eq!(resolver.label("year", "2020-q1"), "First quarter");
        assert_eq!(resolver.label("year", "1999"), "1999");
        assert_eq!(resolver.label("portal_type", "Document"), "Page");
        assert_eq!(resolver.label("created", DATE_LOWER_BOUND), BEFORE_LABEL);
        assert_eq!(resolver.label("created", DATE_UPPER_BOUND), AFTER_LABEL);
        assert_eq!(resolver.label("created", "2024-03-09T00:00:00Z"), "09.03.2024");
        assert_eq!(resolver.label("year", DATE_LOWER_BOUND), DATE_LOWER_BOUND);
    }
}
