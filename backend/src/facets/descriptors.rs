//! Resolves requested facet fields into standard and range facets.

use std::collections::BTreeMap;

use common::{facet_menu::FacetKind, facet_query::FacetRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FacetConfig;

/// Backend field types that are faceted as ranges instead of discrete values.
pub const RANGE_TYPES: [&str; 4] = ["float", "long", "double", "date"];

const FIELD_PARAMS: [&str; 2] = ["facet.field", "facet_field"];
const RANGE_PARAMS: [&str; 2] = ["facet.range", "facet_range"];

/// Backend schema: field name to backend type name.
pub trait SchemaLookup {
    fn field_type(&self, field: &str) -> Option<&str>;
}

impl SchemaLookup for BTreeMap<String, String> {
    fn field_type(&self, field: &str) -> Option<&str> {
        self.get(field).map(|t| t.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeWindow {
    pub start: String,
    pub end: String,
    pub gap: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetDescriptor {
    pub name: String,
    pub kind: FacetKind,
    pub field_type: Option<String>,
    pub window: Option<RangeWindow>,
}

impl FacetDescriptor {
    pub fn is_date(&self) -> bool {
        self.field_type.as_deref() == Some("date")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FacetDescriptors {
    /// Standard facets first, then ranges, each field once.
    pub fields: Vec<FacetDescriptor>,
    /// Facet name to the facets whose selection it depends on.
    pub dependencies: BTreeMap<String, Vec<String>>,
}

impl FacetDescriptors {
    pub fn get(&self, name: &str) -> Option<&FacetDescriptor> {
        self.fields.iter().find(|d| d.name == name)
    }

    pub fn kind_of(&self, name: &str) -> Option<FacetKind> {
        self.get(name).map(|d| d.kind)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|d| d.name.as_str())
    }

    pub fn of_kind(&self, kind: FacetKind) -> impl Iterator<Item = &FacetDescriptor> {
        self.fields.iter().filter(move |d| d.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

pub fn resolve_descriptors(
    request: &FacetRequest,
    config: &FacetConfig,
    schema: &impl SchemaLookup,
) -> FacetDescriptors {
    let requested_fields = request
        .listed(&FIELD_PARAMS)
        .or_else(|| request.content_facet_fields.clone())
        .unwrap_or_else(|| config.default_facets.clone());
    let requested_ranges = request
        .listed(&RANGE_PARAMS)
        .or_else(|| request.content_facet_ranges.clone())
        .unwrap_or_else(|| config.default_ranges.clone());

    let mut dependencies = BTreeMap::new();
    let mut standard: Vec<String> = Vec::new();
    let mut ranges: Vec<String> = Vec::new();

    for raw in requested_fields {
        let (name, deps) = split_dependencies(&raw);
        if name.is_empty() {
            continue;
        }
        if !deps.is_empty() {
            dependencies.insert(name.clone(), deps);
        }
        match schema.field_type(&name) {
            Some(field_type) if RANGE_TYPES.contains(&field_type) => {
                debug!("facet field {} has range type {}, faceting as range", name, field_type);
                push_unique(&mut ranges, name);
            }
            Some(_) => push_unique(&mut standard, name),
            None => {
                debug!("facet field {} is not in the schema", name);
                push_unique(&mut standard, name);
            }
        }
    }
    for raw in requested_ranges {
        let name = raw.trim().to_string();
        if !name.is_empty() {
            push_unique(&mut ranges, name);
        }
    }
    standard.retain(|name| !ranges.contains(name));

    let window = RangeWindow {
        start: config.range_start.clone(),
        end: config.range_end.clone(),
        gap: config.range_gap(),
    };
    let describe = |name: String, kind: FacetKind| FacetDescriptor {
        field_type: schema.field_type(&name).map(|t| t.to_string()),
        window: kind.is_range().then(|| window.clone()),
        name,
        kind,
    };

    let mut fields: Vec<FacetDescriptor> =
        standard.into_iter().map(|name| describe(name, FacetKind::Standard)).collect();
    fields.extend(ranges.into_iter().map(|name| describe(name, FacetKind::Range)));

    FacetDescriptors { fields, dependencies }
}

/// Split `name:dep1,dep2` into the facet name and the facets it depends on.
fn split_dependencies(raw: &str) -> (String, Vec<String>) {
    match raw.split_once(':') {
        Some((name, deps)) => (
            name.trim().to_string(),
            deps.split(',').map(|d| d.trim().to_string()).filter(|d| !d.is_empty()).collect(),
        ),
        None => (raw.trim().to_string(), vec![]),
    }
}

fn push_unique(names: &mut Vec<String>, name: String) {
    if !names.contains(&name) {
        names.push(name);
    }
}
