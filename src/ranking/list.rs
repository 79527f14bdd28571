//! Ranked list store - the ordered sequence that is the source of truth
//!
//! Index 0 is the top rank. Stored scores are never recomputed here:
//! removing or reordering items leaves every other item's score as it was.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::error::{CineError, Result};
use crate::core::types::{ItemId, RankedItem};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedList {
    items: Vec<RankedItem>,
}

impl RankedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from items in rank order, rejecting repeated ids
    pub fn from_items(items: Vec<RankedItem>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CineError::DuplicateItem(item.id));
            }
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RankedItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[RankedItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedItem> {
        self.items.iter()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    /// Insert at `index` (0..=len). The list is untouched on error.
    pub fn insert_at(&mut self, item: RankedItem, index: usize) -> Result<()> {
        if index > self.items.len() {
            return Err(CineError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        if self.contains(item.id) {
            return Err(CineError::DuplicateItem(item.id));
        }
        self.items.insert(index, item);
        Ok(())
    }

    /// Append at the bottom
    pub fn push(&mut self, item: RankedItem) -> Result<()> {
        let index = self.items.len();
        self.insert_at(item, index)
    }

    /// Remove by id. Absent ids are a no-op and return `None`.
    pub fn remove_by_id(&mut self, id: ItemId) -> Option<RankedItem> {
        let index = self.position_of(id)?;
        Some(self.items.remove(index))
    }

    /// Replace the order with `new_order`, which must be a permutation of the
    /// current ids
    pub fn reorder(&mut self, new_order: &[ItemId]) -> Result<()> {
        if new_order.len() != self.items.len() {
            return Err(CineError::InvalidReorder(format!(
                "expected {} ids, got {}",
                self.items.len(),
                new_order.len()
            )));
        }

        let mut remaining: Vec<Option<RankedItem>> =
            self.items.iter().cloned().map(Some).collect();
        let mut reordered = Vec::with_capacity(self.items.len());

        for id in new_order {
            let slot = self
                .position_of(*id)
                .ok_or_else(|| CineError::InvalidReorder(format!("unknown id {}", id)))?;
            let item = remaining[slot]
                .take()
                .ok_or_else(|| CineError::InvalidReorder(format!("id {} listed twice", id)))?;
            reordered.push(item);
        }

        self.items = reordered;
        Ok(())
    }

    /// Convert a 1-based rank as shown to the user into an index
    pub fn index_from_rank(&self, rank: usize) -> Result<usize> {
        match rank.checked_sub(1) {
            Some(index) if index < self.items.len() => Ok(index),
            _ => Err(CineError::RankOutOfRange {
                rank,
                len: self.items.len(),
            }),
        }
    }

    /// Move the item at `from` to `to`, shifting the items in between
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.items.len();
        for index in [from, to] {
            if index >= len {
                return Err(CineError::IndexOutOfRange { index, len });
            }
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a RankedList {
    type Item = &'a RankedItem;
    type IntoIter = std::slice::Iter<'a, RankedItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::tier::Tier;

    fn item(id: u64, score: f64) -> RankedItem {
        RankedItem::new(id, format!("Movie {}", id), Tier::Mid, score)
    }

    fn sample() -> RankedList {
        RankedList::from_items(vec![item(1, 9.0), item(2, 7.5), item(3, 6.0), item(4, 4.5)])
            .unwrap()
    }

    #[test]
    fn test_insert_at_bounds() {
        let mut list = sample();
        list.insert_at(item(5, 5.0), 4).unwrap();
        assert_eq!(list.position_of(ItemId(5)), Some(4));

        let result = list.insert_at(item(6, 5.0), 9);
        assert!(matches!(result, Err(CineError::IndexOutOfRange { index: 9, len: 5 })));
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut list = sample();
        let before = list.clone();
        assert!(matches!(
            list.insert_at(item(2, 1.0), 0),
            Err(CineError::DuplicateItem(ItemId(2)))
        ));
        assert_eq!(list, before);
    }

    #[test]
    fn test_from_items_rejects_duplicates() {
        assert!(RankedList::from_items(vec![item(1, 9.0), item(1, 8.0)]).is_err());
    }

    #[test]
    fn test_remove_keeps_other_scores() {
        let mut list = sample();
        let removed = list.remove_by_id(ItemId(2)).unwrap();
        assert_eq!(removed.score, 7.5);
        assert_eq!(list.ids(), vec![ItemId(1), ItemId(3), ItemId(4)]);
        let scores: Vec<f64> = list.iter().map(|i| i.score).collect();
        assert_eq!(scores, vec![9.0, 6.0, 4.5]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut list = sample();
        assert!(list.remove_by_id(ItemId(42)).is_none());
        assert_eq!(list, sample());
    }

    #[test]
    fn test_reorder_permutation() {
        let mut list = sample();
        list.reorder(&[ItemId(4), ItemId(3), ItemId(2), ItemId(1)]).unwrap();
        assert_eq!(list.ids(), vec![ItemId(4), ItemId(3), ItemId(2), ItemId(1)]);
        assert_eq!(list.get(0).unwrap().score, 4.5);
    }

    #[test]
    fn test_reorder_rejects_non_permutations() {
        let mut list = sample();
        assert!(list.reorder(&[ItemId(1), ItemId(2), ItemId(3)]).is_err());
        assert!(list.reorder(&[ItemId(1), ItemId(2), ItemId(3), ItemId(9)]).is_err());
        assert!(list.reorder(&[ItemId(1), ItemId(1), ItemId(3), ItemId(4)]).is_err());
        assert_eq!(list, sample());
    }

    #[test]
    fn test_move_item_down_and_up() {
        let mut list = sample();
        list.move_item(0, 2).unwrap();
        assert_eq!(list.ids(), vec![ItemId(2), ItemId(3), ItemId(1), ItemId(4)]);
        list.move_item(3, 0).unwrap();
        assert_eq!(list.ids(), vec![ItemId(4), ItemId(2), ItemId(3), ItemId(1)]);
        assert!(list.move_item(0, 4).is_err());
    }

    #[test]
    fn test_index_from_rank_reports_typed_rank() {
        let list = sample();
        assert_eq!(list.index_from_rank(1).unwrap(), 0);
        assert_eq!(list.index_from_rank(4).unwrap(), 3);
        assert!(matches!(
            list.index_from_rank(0),
            Err(CineError::RankOutOfRange { rank: 0, len: 4 })
        ));
        let err = list.index_from_rank(5).unwrap_err();
        assert_eq!(err.to_string(), "Rank 5 out of range, the list has 4 items");
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let list = RankedList::from_items(vec![item(1, 9.0)]).unwrap();
        let json = serde_json::to_value(&list).unwrap();
        assert!(json.is_array());
    }
}
