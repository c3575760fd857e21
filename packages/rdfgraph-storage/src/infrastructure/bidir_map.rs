//! Bidirectional interning map
//!
//! `forward[id - 1]` owns the entry for `id`. The backward index is a
//! [`HashTable`] of `(hash, id)` pairs; a probe view is compared against the
//! entry stored at the candidate id, so every value is stored exactly once.
//! Vacated ids are recycled through an [`IndexFreeList`].

use std::sync::Arc;

use ahash::RandomState;
use hashbrown::HashTable;

use super::free_list::IndexFreeList;
use crate::domain::{InternedEntry, NodeId};

pub struct BiDirMap<E: InternedEntry> {
    forward: Vec<Option<Arc<E>>>,
    backward: HashTable<(u64, u64)>,
    free_list: IndexFreeList,
    hasher: RandomState,
    max_id: u64,
    len: usize,
}

#[inline]
fn to_index(id: u64) -> usize {
    (id - 1) as usize
}

#[inline]
fn to_id(index: usize) -> u64 {
    index as u64 + 1
}

impl<E: InternedEntry> BiDirMap<E> {
    /// Map whose ids must stay at or below `max_id`.
    pub fn with_id_limit(max_id: u64) -> Self {
        Self {
            forward: Vec::new(),
            backward: HashTable::new(),
            free_list: IndexFreeList::new(),
            hasher: RandomState::new(),
            max_id,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Entry stored at `id`; `None` for the null id, out-of-range ids and
    /// vacant slots.
    pub fn lookup_value(&self, id: u64) -> Option<&Arc<E>> {
        if id == 0 {
            return None;
        }
        self.forward.get(to_index(id))?.as_ref()
    }

    /// Id of `view`, or `0` when absent.
    pub fn lookup_id(&self, view: E::View<'_>) -> u64 {
        let hash = self.hasher.hash_one(view);
        let forward = &self.forward;
        self.backward
            .find(hash, |&(candidate_hash, id)| {
                candidate_hash == hash
                    && forward[to_index(id)]
                        .as_deref()
                        .is_some_and(|entry| entry.matches(view))
            })
            .map_or(0, |&(_, id)| id)
    }

    /// Interns `view` at the smallest free id.
    ///
    /// The caller must have checked that `view` is absent.
    pub fn insert_assume_not_present(&mut self, view: E::View<'_>) -> u64 {
        debug_assert_eq!(self.lookup_id(view), 0);

        let index = self.free_list.occupy_next_available();
        let id = to_id(index);
        self.check_id_space(id);

        if index >= self.forward.len() {
            self.forward.resize_with(index + 1, || None);
        }
        self.place(index, view);
        id
    }

    /// Interns `view` at `id`. Used to seed well-known entries; the id must be
    /// vacant and `view` absent.
    pub fn insert_assume_not_present_at(&mut self, view: E::View<'_>, id: u64) {
        debug_assert_eq!(self.lookup_id(view), 0);
        debug_assert!(self.lookup_value(id).is_none());
        self.check_id_space(id);

        let index = to_index(id);
        self.free_list.occupy(index);
        if index >= self.forward.len() {
            self.forward.resize_with(index + 1, || None);
        }
        self.place(index, view);
    }

    fn place(&mut self, index: usize, view: E::View<'_>) {
        self.forward[index] = Some(Arc::new(E::from_view(view)));

        let hash = self.hasher.hash_one(view);
        self.backward
            .insert_unique(hash, (hash, to_id(index)), |&(stored, _)| stored);
        self.len += 1;
    }

    /// Removes the entry at `id`; the id must be live.
    pub fn erase_assume_present(&mut self, id: u64) {
        debug_assert!(self.lookup_value(id).is_some());

        let index = to_index(id);
        let Some(entry) = self.forward.get_mut(index).and_then(Option::take) else {
            return;
        };

        let hash = self.hasher.hash_one(entry.view());
        if let Ok(found) = self.backward.find_entry(hash, |&(_, candidate)| candidate == id) {
            found.remove();
        }
        self.free_list.vacate(index);
        self.len -= 1;
    }

    /// Marks ids `[1, min_id)` as taken so that the next fresh id is at least
    /// `min_id`. Reserved ids can still be filled with
    /// [`insert_assume_not_present_at`](Self::insert_assume_not_present_at).
    pub fn reserve_until(&mut self, min_id: u64) {
        let reserved = to_index(min_id.max(1));
        if reserved > self.forward.len() {
            self.forward.resize_with(reserved, || None);
        }
        self.free_list.occupy_until(reserved);
    }

    /// Capacity hint for `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.forward.reserve(additional);
        self.backward.reserve(additional, |&(hash, _)| hash);
    }

    /// Releases unused capacity. Reserved ids stay reserved.
    pub fn shrink_to_fit(&mut self) {
        let used = self
            .forward
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |last| last + 1);
        self.forward.truncate(used);
        self.forward.shrink_to_fit();
        self.backward.shrink_to_fit(|&(hash, _)| hash);
        self.free_list.shrink_to_fit();
    }

    /// Live `(id, entry)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Arc<E>)> + '_ {
        self.forward
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|entry| (to_id(index), entry)))
    }

    fn check_id_space(&self, id: u64) {
        if id > self.max_id {
            tracing::error!(id, max_id = self.max_id, "node id space exhausted");
            std::process::abort();
        }
    }
}

impl<E: InternedEntry> Default for BiDirMap<E> {
    fn default() -> Self {
        Self::with_id_limit(NodeId::MAX)
    }
}
