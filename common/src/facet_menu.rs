//! Facet menu tree shared between the menu builder and its presentation layer.

use serde::{Deserialize, Serialize};

/// Id of the synthetic node at the top of every menu.
pub const ROOT_ID: &str = "ROOT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
    /// Discrete values, ordered by result count.
    #[default]
    Standard,
    /// Ordered buckets (usually dates), ordered by bucket id.
    Range,
}

impl FacetKind {
    pub fn is_range(self) -> bool {
        self == FacetKind::Range
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: String,
    pub title: String,
    pub kind: FacetKind,
    pub count: u64,
    pub selected: bool,
    pub selected_from: bool,
    pub selected_to: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_query: Option<String>,
    pub content: Vec<MenuNode>,
}

impl MenuNode {
    /// Attach the query string that clears this node's selection.
    pub fn with_clear_query(mut self, clear_query: impl Into<String>) -> Self {
        self.clear_query = Some(clear_query.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_ID
    }

    /// True if some child is selected or has results, i.e. the submenu is worth displaying.
    pub fn show_submenu(&self) -> bool {
        self.content.iter().any(|child| child.selected || child.count > 0)
    }

    /// True if some child carries a clear-query marker, i.e. the submenu renders expanded.
    pub fn expand_submenu(&self) -> bool {
        self.content.iter().any(|child| child.clear_query.is_some())
    }

    /// Depth-first lookup of a descendant by id.
    pub fn find(&self, id: &str) -> Option<&MenuNode> {
        if self.id == id {
            return Some(self);
        }
        self.content.iter().find_map(|child| child.find(id))
    }
}
