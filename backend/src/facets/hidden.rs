//! Request parameters a search form carries forward when facet links are followed.

use common::facet_query::RequestForm;

use crate::facets::descriptors::FacetDescriptors;

/// Every parameter that is neither a facet selection nor facet or usage bookkeeping.
pub fn hidden_fields(form: &RequestForm, descriptors: &FacetDescriptors) -> RequestForm {
    form.iter()
        .filter(|(key, _)| descriptors.get(key).is_none())
        .filter(|(key, _)| !key.contains("facet") && !key.contains("_usage"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use common::{facet_menu::FacetKind, facet_query::SelectionQuery};

    use super::*;
    use crate::facets::descriptors::FacetDescriptor;

    #[test]
    fn drops_facet_parameters() {
        let descriptors = FacetDescriptors {
            fields: vec![FacetDescriptor {
                name: "color".into(),
                kind: FacetKind::Standard,
                field_type: None,
                window: None,
            }],
            dependencies: BTreeMap::new(),
        };
        let scalar = |v: &str| SelectionQuery::Scalar(v.into());
        let form = RequestForm::from([
            ("SearchableText".to_string(), scalar("report")),
            ("color".to_string(), scalar("red")),
            ("facet.field".to_string(), scalar("color")),
            ("created_usage".to_string(), scalar("range:min")),
            ("b_start".to_string(), scalar("20")),
        ]);

        let hidden = hidden_fields(&form, &descriptors);
        assert_eq!(hidden.keys().collect::<Vec<_>>(), vec!["SearchableText", "b_start"]);
    }
}
