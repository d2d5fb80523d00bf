//! Insertion ordered set keyed by equivalence class.

use std::hash::{Hash, Hasher};
use std::ops::Index;

use siphasher::sip::SipHasher13;

/// Items that carry the key they are deduplicated by.
pub trait Classed {
    /// Class key; equal keys mean the same class.
    type Class: Hash + Eq;

    /// The key of this item.
    fn class(&self) -> &Self::Class;
}

const MIN_SLOTS: usize = 8;

/// Open addressing set with linear probing over class hashes.
///
/// Items keep their insertion index for the lifetime of the set, so the
/// index doubles as a stable identifier. The slot table is kept at most half
/// full.
#[derive(Debug, Clone)]
pub struct ClassSet<T> {
    items: Vec<T>,
    hashes: Vec<u64>,
    slots: Vec<Option<usize>>,
}

impl<T: Classed> ClassSet<T> {
    /// Empty set sized for about `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = (capacity.saturating_mul(2)).max(MIN_SLOTS).next_power_of_two();
        Self {
            items: Vec::with_capacity(capacity),
            hashes: Vec::with_capacity(capacity),
            slots: vec![None; slots],
        }
    }

    /// Inserts `item` unless its class is present. Returns whether it was
    /// inserted.
    pub fn insert(&mut self, item: T) -> bool {
        let hash = class_hash(item.class());
        if let Err(slot) = self.probe(item.class(), hash) {
            self.slots[slot] = Some(self.items.len());
            self.items.push(item);
            self.hashes.push(hash);
            if 2 * self.items.len() > self.slots.len() {
                self.grow();
            }
            true
        } else {
            false
        }
    }

    /// Insertion index of the item of the given class.
    pub fn index_of(&self, class: &T::Class) -> Option<usize> {
        self.probe(class, class_hash(class)).ok()
    }

    /// Whether an item of the given class is present.
    pub fn contains(&self, class: &T::Class) -> bool {
        self.index_of(class).is_some()
    }

    /// Item at an insertion index.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable item at an insertion index. Callers must not change its class.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Most recently inserted item.
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// `Ok(index)` when present, otherwise `Err(free slot)`.
    fn probe(&self, class: &T::Class, hash: u64) -> Result<usize, usize> {
        let mask = self.slots.len() - 1;
        let mut slot = (hash as usize) & mask;
        loop {
            match self.slots[slot] {
                None => return Err(slot),
                Some(index) if self.hashes[index] == hash && self.items[index].class() == class => {
                    return Ok(index)
                }
                Some(_) => slot = (slot + 1) & mask,
            }
        }
    }

    fn grow(&mut self) {
        let size = self.slots.len() * 2;
        let mask = size - 1;
        let mut slots = vec![None; size];
        for (index, &hash) in self.hashes.iter().enumerate() {
            let mut slot = (hash as usize) & mask;
            while slots[slot].is_some() {
                slot = (slot + 1) & mask;
            }
            slots[slot] = Some(index);
        }
        self.slots = slots;
    }
}

impl<T> Index<usize> for ClassSet<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a ClassSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn class_hash<C: Hash + ?Sized>(class: &C) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    class.hash(&mut hasher);
    hasher.finish()
}
