//! Dirty Tracker
//!
//! Pending (not yet saved) orderings, held as a sparse overlay over the
//! last-known-good tree. Entries are replaced wholesale, never merged.

use std::collections::BTreeMap;

use crate::domain::{CategoryId, ItemId, OrderEntry};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyTracker {
    /// Full category permutation; empty means the category level is clean
    category_draft: Vec<OrderEntry<CategoryId>>,
    /// Full item permutation per touched category
    item_drafts: BTreeMap<CategoryId, Vec<OrderEntry<ItemId>>>,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_category_order(&mut self, entries: Vec<OrderEntry<CategoryId>>) {
        self.category_draft = entries;
    }

    pub fn mark_item_order(&mut self, category_id: CategoryId, entries: Vec<OrderEntry<ItemId>>) {
        self.item_drafts.insert(category_id, entries);
    }

    pub fn is_dirty(&self) -> bool {
        !self.category_draft.is_empty() || !self.item_drafts.is_empty()
    }

    /// Only called after the server confirmed a save.
    pub fn clear(&mut self) {
        self.category_draft.clear();
        self.item_drafts.clear();
    }

    pub fn category_draft(&self) -> &[OrderEntry<CategoryId>] {
        &self.category_draft
    }

    pub fn item_draft(&self, category_id: &CategoryId) -> Option<&[OrderEntry<ItemId>]> {
        self.item_drafts.get(category_id).map(Vec::as_slice)
    }

    pub fn item_drafts(&self) -> &BTreeMap<CategoryId, Vec<OrderEntry<ItemId>>> {
        &self.item_drafts
    }

    /// Number of categories whose item order is pending
    pub fn dirty_category_count(&self) -> usize {
        self.item_drafts.len()
    }

    pub(crate) fn discard_category_draft(&mut self) {
        self.category_draft.clear();
    }

    pub(crate) fn discard_item_draft(&mut self, category_id: &CategoryId) {
        self.item_drafts.remove(category_id);
    }
}
