//! Ordered card-handle list shared by every zone.
//!
//! Zones store [`EntityId`] handles, never card values, so membership and
//! removal are by instance identity: two cards with the same name are
//! always distinct entries. Contents live in an `im::Vector`, which makes
//! [`CardList::snapshot`] an O(1) copy that later mutation cannot disturb.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, GameRng};

/// Ordered list of card handles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardList {
    cards: Vector<EntityId>,
}

impl CardList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.cards.contains(&id)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<EntityId> {
        self.cards.get(index).copied()
    }

    #[must_use]
    pub fn position(&self, id: EntityId) -> Option<usize> {
        self.cards.index_of(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.cards.iter().copied()
    }

    /// Copy of the current contents, unaffected by later mutation.
    #[must_use]
    pub fn snapshot(&self) -> Vector<EntityId> {
        self.cards.clone()
    }

    pub fn push_back(&mut self, id: EntityId) {
        self.cards.push_back(id);
    }

    /// Remove and return the first entry.
    pub fn pop_front(&mut self) -> Option<EntityId> {
        self.cards.pop_front()
    }

    /// Remove a specific instance. Returns whether it was present.
    pub fn remove(&mut self, id: EntityId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.cards.remove(index);
                true
            }
            None => false,
        }
    }

    /// Overwrite the entry at `index`, returning the previous handle.
    pub fn set(&mut self, index: usize, id: EntityId) -> Option<EntityId> {
        (index < self.cards.len()).then(|| self.cards.set(index, id))
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Remove everything, returning the old contents in order.
    pub fn drain(&mut self) -> Vector<EntityId> {
        std::mem::take(&mut self.cards)
    }

    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut order: Vec<EntityId> = self.cards.iter().copied().collect();
        rng.shuffle(&mut order);
        self.cards = order.into_iter().collect();
    }
}

impl FromIterator<EntityId> for CardList {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &CardList) -> Vec<u32> {
        list.iter().map(EntityId::raw).collect()
    }

    #[test]
    fn test_remove_by_identity() {
        let mut list: CardList = [1, 2, 3].into_iter().map(EntityId::new).collect();
        assert!(list.remove(EntityId::new(2)));
        assert!(!list.remove(EntityId::new(2)));
        assert_eq!(ids(&list), vec![1, 3]);
    }

    #[test]
    fn test_snapshot_is_isolated() {
        let mut list: CardList = [1, 2].into_iter().map(EntityId::new).collect();
        let snapshot = list.snapshot();
        list.push_back(EntityId::new(3));
        list.remove(EntityId::new(1));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(ids(&list), vec![2, 3]);
    }

    #[test]
    fn test_set_and_pop() {
        let mut list: CardList = [1, 2].into_iter().map(EntityId::new).collect();
        assert_eq!(list.set(1, EntityId::new(9)), Some(EntityId::new(2)));
        assert_eq!(list.set(5, EntityId::new(9)), None);
        assert_eq!(list.pop_front(), Some(EntityId::new(1)));
        assert_eq!(ids(&list), vec![9]);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut list: CardList = (0..20).map(EntityId::new).collect();
        list.shuffle(&mut GameRng::new(3));
        let mut sorted = ids(&list);
        assert_ne!(sorted, (0..20).collect::<Vec<_>>());
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}
