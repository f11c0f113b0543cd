//! Menu Ordering Engine
//!
//! Top-level coordinator of the menu manager. It exclusively owns:
//! - the last-known-good snapshot, replaced wholesale on every fetch
//! - the visible tree (snapshot with pending drafts applied)
//! - the [`DirtyTracker`] and [`ExpansionState`]
//! - the save-in-flight guard
//!
//! Controllers only propose [`ReorderProposed`] events; [`MenuOrderingEngine::apply`]
//! is the single place the tree is mutated.

use crate::domain::{
    Category, CategoryId, DomainError, DomainResult, Item, ItemId, MenuId, OrderEntry,
};
use crate::ordering::{
    build_from_tracker, CategoryOrderPayload, CategoryReorderController, DirtyTracker,
    ExpansionState, ItemReorderController, OrderedCollection, ReorderProposed,
};
use crate::sync::{SaveOutcome, SaveTicket, SyncError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct MenuOrderingEngine {
    menu_id: MenuId,
    load_state: LoadState,
    snapshot: Vec<Category>,
    visible: Vec<Category>,
    tracker: DirtyTracker,
    expansion: ExpansionState,
    save_in_flight: bool,
}

impl MenuOrderingEngine {
    /// A new engine starts in `Loading`; nothing can be dragged until
    /// [`replace_tree`](Self::replace_tree) delivers the first snapshot.
    pub fn new(menu_id: MenuId) -> Self {
        Self {
            menu_id,
            load_state: LoadState::Loading,
            snapshot: Vec::new(),
            visible: Vec::new(),
            tracker: DirtyTracker::new(),
            expansion: ExpansionState::new(),
            save_in_flight: false,
        }
    }

    pub fn menu_id(&self) -> &MenuId {
        &self.menu_id
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_ready(&self) -> bool {
        self.load_state == LoadState::Ready
    }

    pub fn begin_load(&mut self) {
        if !self.is_ready() {
            self.load_state = LoadState::Loading;
        }
    }

    /// Keeps whatever tree was already shown; only a first load turns into `Failed`.
    pub fn load_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("Loading menu {} failed: {}", self.menu_id, message);
        if !self.is_ready() {
            self.load_state = LoadState::Failed(message);
        }
    }

    /// Replace the snapshot wholesale with a freshly fetched tree.
    ///
    /// Categories and items are normalized to dense order. Pending drafts
    /// that still cover their collection exactly are re-applied; drafts made
    /// stale by a delete are discarded.
    pub fn replace_tree(&mut self, categories: Vec<Category>) {
        let snapshot: Vec<Category> = OrderedCollection::from_unordered(categories)
            .into_iter()
            .map(|mut category| {
                category.items = OrderedCollection::from_unordered(category.items).into_vec();
                category
            })
            .collect();

        log::info!(
            "Menu {} loaded: {} categories, {} items",
            self.menu_id,
            snapshot.len(),
            snapshot.iter().map(|c| c.items.len()).sum::<usize>()
        );

        self.expansion.retain_known(snapshot.iter().map(|c| &c.id));
        self.snapshot = snapshot;
        self.visible = self.snapshot.clone();
        self.load_state = LoadState::Ready;
        self.reapply_drafts();
    }

    fn reapply_drafts(&mut self) {
        let category_draft = self.tracker.category_draft().to_vec();
        if !category_draft.is_empty() {
            if let Err(e) = self.apply_category_overlay(&category_draft) {
                log::warn!("Discarding stale category draft: {}", e);
                self.tracker.discard_category_draft();
            }
        }

        let item_drafts: Vec<(CategoryId, Vec<OrderEntry<ItemId>>)> = self
            .tracker
            .item_drafts()
            .iter()
            .map(|(id, entries)| (id.clone(), entries.clone()))
            .collect();
        for (category_id, entries) in item_drafts {
            if let Err(e) = self.apply_item_overlay(&category_id, &entries) {
                log::warn!("Discarding stale item draft for {}: {}", category_id, e);
                self.tracker.discard_item_draft(&category_id);
            }
        }
    }

    /// Categories as currently displayed (drafts applied)
    pub fn categories(&self) -> &[Category] {
        &self.visible
    }

    /// Last-known-good tree as confirmed by the server
    pub fn snapshot(&self) -> &[Category] {
        &self.snapshot
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.visible.iter().find(|c| &c.id == id)
    }

    pub fn items_of(&self, id: &CategoryId) -> &[Item] {
        self.category(id).map(|c| c.items.as_slice()).unwrap_or(&[])
    }

    pub fn item(&self, category_id: &CategoryId, item_id: &ItemId) -> Option<&Item> {
        self.items_of(category_id).iter().find(|i| &i.id == item_id)
    }

    pub fn category_controller(&self) -> CategoryReorderController {
        CategoryReorderController::for_categories()
    }

    pub fn item_controller(&self, category_id: &CategoryId) -> ItemReorderController {
        ItemReorderController::for_items(category_id.clone())
    }

    /// Apply a proposed reorder optimistically and record it as a draft.
    pub fn apply(&mut self, event: ReorderProposed) -> DomainResult<()> {
        if !self.is_ready() {
            return Err(DomainError::NotLoaded);
        }
        match event {
            ReorderProposed::Categories(entries) => {
                self.apply_category_overlay(&entries)?;
                self.tracker.mark_category_order(entries);
            }
            ReorderProposed::Items {
                category_id,
                entries,
            } => {
                self.apply_item_overlay(&category_id, &entries)?;
                self.tracker.mark_item_order(category_id, entries);
            }
        }
        Ok(())
    }

    fn apply_category_overlay(&mut self, entries: &[OrderEntry<CategoryId>]) -> DomainResult<()> {
        let reordered =
            OrderedCollection::from_positions(self.visible.clone()).with_overlay(entries)?;
        self.visible = reordered.into_vec();
        Ok(())
    }

    fn apply_item_overlay(
        &mut self,
        category_id: &CategoryId,
        entries: &[OrderEntry<ItemId>],
    ) -> DomainResult<()> {
        let category = self
            .visible
            .iter_mut()
            .find(|c| &c.id == category_id)
            .ok_or_else(|| DomainError::NotFound(format!("category {category_id}")))?;

        let reordered =
            OrderedCollection::from_positions(category.items.clone()).with_overlay(entries)?;
        category.items = reordered.into_vec();
        Ok(())
    }

    pub fn tracker(&self) -> &DirtyTracker {
        &self.tracker
    }

    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    pub fn is_saving(&self) -> bool {
        self.save_in_flight
    }

    /// "Save Order" is enabled iff there is something to save and no save is running
    pub fn can_save(&self) -> bool {
        self.is_ready() && self.is_dirty() && !self.save_in_flight
    }

    /// Nested payload over the last-known-good snapshot
    pub fn build_payload(&self) -> DomainResult<Vec<CategoryOrderPayload>> {
        if !self.is_ready() {
            return Err(DomainError::NotLoaded);
        }
        Ok(build_from_tracker(&self.snapshot, &self.tracker))
    }

    /// Start a save: checks the guards, builds the payload and marks the
    /// save in flight. Must be followed by [`complete_save`](Self::complete_save).
    pub fn begin_save(&mut self) -> Result<SaveTicket, SyncError> {
        if self.save_in_flight {
            return Err(SyncError::SaveInFlight);
        }
        if !self.is_ready() {
            return Err(SyncError::NotLoaded);
        }
        if !self.is_dirty() {
            return Err(SyncError::NothingToSave);
        }

        let payload = build_from_tracker(&self.snapshot, &self.tracker);
        self.save_in_flight = true;
        log::debug!("Save started for menu {}", self.menu_id);
        Ok(SaveTicket {
            menu_id: self.menu_id.clone(),
            payload,
        })
    }

    /// Reconcile local state with the result of a save.
    ///
    /// Drafts are cleared only when the server accepted the save. A failed
    /// save leaves every draft in place so it can be retried as is.
    pub fn complete_save(&mut self, outcome: SaveOutcome) -> Result<(), SyncError> {
        self.save_in_flight = false;
        match outcome {
            SaveOutcome::Failed(e) => {
                log::warn!("Save for menu {} failed: {}", self.menu_id, e);
                Err(SyncError::SaveFailed(e))
            }
            SaveOutcome::Saved { refreshed } => {
                self.tracker.clear();
                match refreshed {
                    Ok(tree) => {
                        self.replace_tree(tree);
                        log::info!("Ordering saved for menu {}", self.menu_id);
                        Ok(())
                    }
                    Err(e) => {
                        // server has what is displayed; promote it to the snapshot
                        self.snapshot = self.visible.clone();
                        log::warn!("Saved, but refreshing menu {} failed: {}", self.menu_id, e);
                        Err(SyncError::RefreshFailed(e))
                    }
                }
            }
        }
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn is_expanded(&self, id: &CategoryId) -> bool {
        self.expansion.is_expanded(id)
    }

    pub fn toggle_expanded(&mut self, id: &CategoryId) -> bool {
        self.expansion.toggle(id)
    }

    pub fn expand_all(&mut self) {
        self.expansion.expand_all(self.visible.iter().map(|c| &c.id));
    }

    pub fn collapse_all(&mut self) {
        self.expansion.collapse_all();
    }
}
