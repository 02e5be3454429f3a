//! Builds the facet menu tree from vocabularies, counts and the current selection.

use std::cmp::Ordering;

use common::{
    facet_counts::CountNode,
    facet_menu::{FacetKind, MenuNode, ROOT_ID},
    facet_query::RequestForm,
    vocabulary::VocabularyTerm,
};
use tracing::debug;

use crate::{
    error::FacetResult,
    facets::{descriptors::FacetDescriptors, selection::SelectionState},
};

type SortFn<'a> = Box<dyn Fn(&MenuNode, &MenuNode) -> Ordering + 'a>;

pub struct MenuBuilder<'a> {
    descriptors: &'a FacetDescriptors,
    selection: &'a SelectionState,
    form: Option<&'a RequestForm>,
    sort: Option<SortFn<'a>>,
}

impl<'a> MenuBuilder<'a> {
    pub fn new(descriptors: &'a FacetDescriptors, selection: &'a SelectionState) -> Self {
        Self { descriptors, selection, form: None, sort: None }
    }

    /// Let plain request parameters satisfy facet dependencies too.
    pub fn with_form(mut self, form: &'a RequestForm) -> Self {
        self.form = Some(form);
        self
    }

    /// Order every submenu with `compare` instead of the per-kind default.
    pub fn with_sort(mut self, compare: impl Fn(&MenuNode, &MenuNode) -> Ordering + 'a) -> Self {
        self.sort = Some(Box::new(compare));
        self
    }

    /// Build the whole menu below a synthetic `ROOT` node, one child per facet field.
    ///
    /// Fields that depend on other parameters are left out until one of those is present.
    pub fn build_menu(
        &self,
        vocabularies: Vec<VocabularyTerm>,
        counts: Option<&CountNode>,
    ) -> FacetResult<MenuNode> {
        let children = vocabularies
            .into_iter()
            .filter(|term| self.dependencies_met(&term.value))
            .collect();
        let root = VocabularyTerm { value: ROOT_ID.to_string(), title: String::new(), children };
        let menu = self.build(&root, counts, None, None)?;
        debug!("built facet menu with {} fields", menu.content.len());
        Ok(menu)
    }

    fn dependencies_met(&self, field: &str) -> bool {
        match self.descriptors.dependencies.get(field) {
            Some(deps) if !deps.is_empty() => deps.iter().any(|dep| self.is_present(dep)),
            _ => true,
        }
    }

    fn is_present(&self, param: &str) -> bool {
        self.selection.get(param).is_some() || self.form.is_some_and(|f| f.contains_key(param))
    }

    /// Build the node for `term` and, recursively, its children.
    ///
    /// A known facet field always uses its own kind; other nodes inherit `kind` from the caller.
    /// Selection is looked up under `parent`, the id one level up.
    pub fn build(
        &self,
        term: &VocabularyTerm,
        counts: Option<&CountNode>,
        parent: Option<&str>,
        kind: Option<FacetKind>,
    ) -> FacetResult<MenuNode> {
        let kind = self.descriptors.kind_of(&term.value).or(kind).unwrap_or_default();

        let mut content = term
            .children
            .iter()
            .map(|child| {
                let child_counts = counts.and_then(|c| c.child(&child.value));
                self.build(child, child_counts, Some(term.value.as_str()), Some(kind))
            })
            .collect::<FacetResult<Vec<_>>>()?;

        match (&self.sort, kind) {
            (Some(compare), _) => content.sort_by(|a, b| compare(a, b)),
            (None, FacetKind::Range) => content.sort_by(|a, b| a.id.cmp(&b.id)),
            (None, FacetKind::Standard) => content.sort_by(|a, b| b.count.cmp(&a.count)),
        }

        if kind.is_range() {
            anchor_default_window(&mut content);
        }

        let selection = self.selection.evaluate(parent, &term.value, kind)?;

        Ok(MenuNode {
            id: term.value.clone(),
            title: term.title.clone(),
            kind,
            count: counts.map(|c| c.count()).unwrap_or(0),
            selected: selection.selected,
            selected_from: selection.selected_from,
            selected_to: selection.selected_to,
            clear_query: None,
            content,
        })
    }
}

/// Without an explicit boundary the lowest bucket starts and the highest ends the interval.
fn anchor_default_window(content: &mut [MenuNode]) {
    if !content.iter().any(|node| node.selected_from) {
        if let Some(first) = content.first_mut() {
            first.selected_from = true;
        }
    }
    if !content.iter().any(|node| node.selected_to) {
        if let Some(last) = content.last_mut() {
            last.selected_to = true;
        }
    }
}
