//! Vocabularies mapping raw facet values to display labels.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyTerm {
    pub value: String,
    pub title: String,
    #[serde(default)]
    pub children: Vec<VocabularyTerm>,
}

impl VocabularyTerm {
    pub fn new(value: impl Into<String>, title: impl Into<String>) -> Self {
        Self { value: value.into(), title: title.into(), children: vec![] }
    }
}

/// A field's display title and its ordered terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldVocabulary {
    pub title: String,
    pub terms: Vec<VocabularyTerm>,
}

impl FieldVocabulary {
    /// The vocabulary as the menu term of `field`, with its terms as children.
    pub fn into_term(self, field: impl Into<String>) -> VocabularyTerm {
        VocabularyTerm { value: field.into(), title: self.title, children: self.terms }
    }
}
