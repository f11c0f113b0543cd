//! Which categories are expanded in the menu tree. Keyed by category id, so
//! renames and duplicate names do not collide.

use std::collections::BTreeSet;

use crate::domain::CategoryId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: BTreeSet<CategoryId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &CategoryId) -> bool {
        self.expanded.contains(id)
    }

    pub fn set_expanded(&mut self, id: CategoryId, expanded: bool) {
        if expanded {
            self.expanded.insert(id);
        } else {
            self.expanded.remove(&id);
        }
    }

    /// Returns the new state
    pub fn toggle(&mut self, id: &CategoryId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    pub fn expand_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a CategoryId>) {
        self.expanded.extend(ids.into_iter().cloned());
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Drop ids that no longer exist after a tree refresh
    pub fn retain_known<'a>(&mut self, ids: impl IntoIterator<Item = &'a CategoryId>) {
        let known: BTreeSet<&CategoryId> = ids.into_iter().collect();
        self.expanded.retain(|id| known.contains(id));
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_bulk_operations() {
        let a = CategoryId::from("a");
        let b = CategoryId::from("b");
        let mut state = ExpansionState::new();

        assert!(state.toggle(&a));
        assert!(state.is_expanded(&a));
        assert!(!state.toggle(&a));

        state.expand_all([&a, &b]);
        assert_eq!(state.expanded_count(), 2);

        state.collapse_all();
        assert!(!state.is_expanded(&b));
    }

    #[test]
    fn test_retain_known_prunes_removed_categories() {
        let a = CategoryId::from("a");
        let b = CategoryId::from("b");
        let mut state = ExpansionState::new();
        state.expand_all([&a, &b]);

        state.retain_known([&b]);

        assert!(!state.is_expanded(&a));
        assert!(state.is_expanded(&b));
    }
}
