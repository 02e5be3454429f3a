//! Facet menu endpoint: one faceted backend query turned into a menu tree.

use std::collections::BTreeMap;

use common::{
    facet_menu::MenuNode,
    facet_query::{FacetRequest, RequestForm},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    api::search::search_params::build_facet_params,
    config::FacetConfig,
    db_utils::solr_utils::FacetBackend,
    facets::{
        FacetDescriptor, LabelResolver, LabelSource, MenuBuilder, SelectionState, hidden_fields,
        resolve_descriptors,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetMenuResponse {
    pub menu: MenuNode,
    pub fields: Vec<FacetDescriptor>,
    pub dependencies: BTreeMap<String, Vec<String>>,
    pub hidden_fields: RequestForm,
}

pub async fn search_facet_menu<B: FacetBackend, L: LabelSource + ?Sized>(
    backend: &B,
    labels: &L,
    config: &FacetConfig,
    request: FacetRequest,
) -> anyhow::Result<FacetMenuResponse> {
    let schema = match backend.field_types().await {
        Ok(schema) => schema,
        Err(e) => {
            warn!("search_facet_menu: schema lookup failed, no range facets promoted: {:#}", e);
            BTreeMap::new()
        }
    };
    let descriptors = resolve_descriptors(&request, config, &schema);
    let selection = SelectionState::from_form(&request.form, &descriptors, config)?;

    let raw_counts = if descriptors.is_empty() {
        None
    } else {
        let params = build_facet_params(&descriptors, &selection, config, &request.form);
        backend.facet_counts(&params).await?
    };

    let vocabularies =
        LabelResolver::new(labels, &descriptors, config).vocabularies(raw_counts.as_ref());
    let count_tree = raw_counts.as_ref().map(|counts| counts.count_tree());
    let menu = MenuBuilder::new(&descriptors, &selection)
        .with_form(&request.form)
        .build_menu(vocabularies, count_tree.as_ref())?;
    info!(
        "search_facet_menu: {} facet fields, {} in menu",
        descriptors.fields.len(),
        menu.content.len()
    );

    Ok(FacetMenuResponse {
        hidden_fields: hidden_fields(&request.form, &descriptors),
        menu,
        fields: descriptors.fields,
        dependencies: descriptors.dependencies,
    })
}
