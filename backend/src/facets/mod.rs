//! Facet menu construction: descriptors, labels, selection state and the menu tree.

pub mod dates;
pub mod descriptors;
pub mod hidden;
pub mod labels;
pub mod menu;
pub mod selection;

pub use descriptors::{FacetDescriptor, FacetDescriptors, SchemaLookup, resolve_descriptors};
pub use hidden::hidden_fields;
pub use labels::{LabelResolver, LabelSource, StaticLabels};
pub use menu::MenuBuilder;
pub use selection::{FieldSelection, RangeBounds, Selection, SelectionState};
