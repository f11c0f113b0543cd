//! Ordered Collection
//!
//! A sibling list whose `order` values always form a dense `0..n-1`
//! sequence matching list position.

use std::collections::BTreeMap;

use crate::domain::{DomainError, DomainResult, OrderEntry, Ordered};

/// Sibling list kept in dense order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedCollection<T> {
    items: Vec<T>,
}

impl<T: Ordered> OrderedCollection<T> {
    /// Build from server data: sort by existing `order` (stable, so ties keep
    /// arrival order) and renumber densely.
    pub fn from_unordered(mut items: Vec<T>) -> Self {
        items.sort_by_key(|item| item.order());
        let mut collection = Self { items };
        collection.renumber();
        collection
    }

    /// Take the list as displayed and renumber it by position.
    pub fn from_positions(items: Vec<T>) -> Self {
        let mut collection = Self { items };
        collection.renumber();
        collection
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn position_of(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Return a copy with the element at `from` relocated to `to`
    /// (array-move semantics) and every order rewritten to its new index.
    pub fn moved(&self, from: usize, to: usize) -> DomainResult<Self> {
        let len = self.items.len();
        debug_assert!(from < len && to < len, "move {from}->{to} out of range for {len}");
        if from >= len {
            return Err(DomainError::InvalidIndex { index: from, len });
        }
        if to >= len {
            return Err(DomainError::InvalidIndex { index: to, len });
        }

        let mut items = self.items.clone();
        let element = items.remove(from);
        items.insert(to, element);
        Ok(Self::from_positions(items))
    }

    /// Project to `{id, order}` pairs in display order
    pub fn entries(&self) -> Vec<OrderEntry<T::Id>> {
        self.items
            .iter()
            .map(|item| OrderEntry::new(item.id().clone(), item.order()))
            .collect()
    }

    /// Reorder according to a full overlay; the overlay must satisfy
    /// [`validate_overlay`] against this collection.
    pub fn with_overlay(&self, overlay: &[OrderEntry<T::Id>]) -> DomainResult<Self> {
        let ids: Vec<T::Id> = self.items.iter().map(|item| item.id().clone()).collect();
        validate_overlay(&ids, overlay)?;

        let target: BTreeMap<&T::Id, u32> =
            overlay.iter().map(|entry| (&entry.id, entry.order)).collect();
        let mut items = self.items.clone();
        items.sort_by_key(|item| target.get(item.id()).copied().unwrap_or(u32::MAX));
        Ok(Self::from_positions(items))
    }

    pub fn is_dense(&self) -> bool {
        is_dense_orders(self.items.iter().map(|item| item.order()))
    }

    fn renumber(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.set_order(index as u32);
        }
    }
}

impl<T> IntoIterator for OrderedCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// An overlay must name every id of the collection exactly once and carry
/// orders forming a permutation of `0..n-1`.
pub fn validate_overlay<Id>(ids: &[Id], overlay: &[OrderEntry<Id>]) -> DomainResult<()>
where
    Id: Ord + std::fmt::Debug,
{
    let known: std::collections::BTreeSet<&Id> = ids.iter().collect();
    let mut seen = std::collections::BTreeSet::new();

    for entry in overlay {
        if !known.contains(&entry.id) {
            return Err(DomainError::UnknownId(format!("{:?}", entry.id)));
        }
        if !seen.insert(&entry.id) {
            return Err(DomainError::DuplicateId(format!("{:?}", entry.id)));
        }
    }
    if seen.len() != known.len() {
        return Err(DomainError::PartialOverlay {
            covered: seen.len(),
            expected: known.len(),
        });
    }
    if !is_dense_orders(overlay.iter().map(|entry| entry.order)) {
        return Err(DomainError::NotDense);
    }
    Ok(())
}

fn is_dense_orders(orders: impl Iterator<Item = u32>) -> bool {
    let mut orders: Vec<u32> = orders.collect();
    orders.sort_unstable();
    orders.iter().enumerate().all(|(index, order)| *order == index as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;

    fn entries(ids: &[&str]) -> OrderedCollection<OrderEntry<ItemId>> {
        OrderedCollection::from_positions(
            ids.iter().map(|id| OrderEntry::new(ItemId::from(*id), 0)).collect(),
        )
    }

    fn ids(collection: &OrderedCollection<OrderEntry<ItemId>>) -> Vec<&str> {
        collection.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_from_unordered_sorts_and_renumbers() {
        let raw = vec![
            OrderEntry::new(ItemId::from("b"), 7),
            OrderEntry::new(ItemId::from("a"), 2),
            OrderEntry::new(ItemId::from("c"), 7),
        ];
        let collection = OrderedCollection::from_unordered(raw);
        assert_eq!(ids(&collection), vec!["a", "b", "c"]);
        assert!(collection.is_dense());
        assert_eq!(collection.as_slice()[2].order, 2);
    }

    #[test]
    fn test_move_forward_and_backward() {
        let list = entries(&["a", "b", "c", "d"]);

        let forward = list.moved(0, 2).unwrap();
        assert_eq!(ids(&forward), vec!["b", "c", "a", "d"]);
        assert!(forward.is_dense());

        let backward = list.moved(3, 1).unwrap();
        assert_eq!(ids(&backward), vec!["a", "d", "b", "c"]);
        assert!(backward.is_dense());

        // input untouched
        assert_eq!(ids(&list), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_permutation_holds_after_many_moves() {
        let mut list = entries(&["a", "b", "c", "d", "e"]);
        for (from, to) in [(4, 0), (1, 3), (2, 2), (0, 4), (3, 1)] {
            list = list.moved(from, to).unwrap();
            let mut orders: Vec<u32> = list.iter().map(|e| e.order).collect();
            orders.sort_unstable();
            assert_eq!(orders, vec![0, 1, 2, 3, 4]);
        }
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_out_of_range_move_is_invalid_index() {
        let list = entries(&["a", "b"]);
        assert_eq!(
            list.moved(0, 5),
            Err(DomainError::InvalidIndex { index: 5, len: 2 })
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_move_asserts_in_debug() {
        let list = entries(&["a", "b"]);
        let _ = list.moved(2, 0);
    }

    #[test]
    fn test_with_overlay_reorders() {
        let list = entries(&["a", "b", "c"]);
        let overlay = vec![
            OrderEntry::new(ItemId::from("c"), 0),
            OrderEntry::new(ItemId::from("a"), 1),
            OrderEntry::new(ItemId::from("b"), 2),
        ];
        let reordered = list.with_overlay(&overlay).unwrap();
        assert_eq!(ids(&reordered), vec!["c", "a", "b"]);
        assert_eq!(reordered.entries(), overlay);
    }

    #[test]
    fn test_validate_overlay_rejects_bad_overlays() {
        let known = vec![ItemId::from("a"), ItemId::from("b")];

        let partial = vec![OrderEntry::new(ItemId::from("a"), 0)];
        assert_eq!(
            validate_overlay(&known, &partial),
            Err(DomainError::PartialOverlay { covered: 1, expected: 2 })
        );

        let unknown = vec![
            OrderEntry::new(ItemId::from("a"), 0),
            OrderEntry::new(ItemId::from("z"), 1),
        ];
        assert!(matches!(
            validate_overlay(&known, &unknown),
            Err(DomainError::UnknownId(_))
        ));

        let duplicate = vec![
            OrderEntry::new(ItemId::from("a"), 0),
            OrderEntry::new(ItemId::from("a"), 1),
        ];
        assert!(matches!(
            validate_overlay(&known, &duplicate),
            Err(DomainError::DuplicateId(_))
        ));

        let gap = vec![
            OrderEntry::new(ItemId::from("a"), 0),
            OrderEntry::new(ItemId::from("b"), 2),
        ];
        assert_eq!(validate_overlay(&known, &gap), Err(DomainError::NotDense));
    }
}
