//! Fixed-size slot pool ordered by recency.
//!
//! Every slot is allocated once, when the list is built, and lives until the
//! list is dropped. Slots are linked through `u32` indices rather than
//! pointers, so moving a slot to either end of the list is a handful of
//! index writes and the key index can hold plain [`SlotId`]s.
//!
//! ```text
//!      head                                                 tail
//!        │                                                   │
//!        ▼                                                   ▼
//!     ┌─────┐ next ┌─────┐      ┌─────┐      ┌─────┐      ┌─────┐
//!     │ s3  │─────▶│ s0  │─────▶│ s2  │─────▶│ s1  │─────▶│ s4  │──▶ NIL
//!     │(k,v)│◀─────│(k,v)│◀─────│(k,v)│◀─────│empty│◀─────│empty│
//!     └─────┘ prev └─────┘      └─────┘      └─────┘      └─────┘
//!      most recent                           reusable slots
//! ```
//!
//! Occupancy is an explicit `Option` per slot, so a cached value equal to
//! `V::default()` is never mistaken for a free slot.

extern crate alloc;

use alloc::boxed::Box;
use core::fmt;

/// Link value meaning "no slot".
const NIL: u32 = u32::MAX;

/// Largest number of slots a [`SlotList`] can address. `NIL` is reserved, so
/// valid ids are `0..u32::MAX`.
pub(crate) const MAX_SLOTS: usize = NIL as usize;

/// Stable handle to one slot of a [`SlotList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId(u32);

impl SlotId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A storage cell: an optional pair plus its recency links.
struct Slot<K, V> {
    entry: Option<(K, V)>,
    prev: u32,
    next: u32,
}

/// Preallocated, doubly linked list of slots.
///
/// The list always spans every slot, occupied or not. The owner decides what
/// "front" and "back" mean; the LRU engine keeps the most recently used slot
/// at the front and the next victim at the back.
pub(crate) struct SlotList<K, V> {
    slots: Box<[Slot<K, V>]>,
    head: u32,
    tail: u32,
}

impl<K, V> SlotList<K, V> {
    /// Allocates `cap` empty slots linked in slot order (slot 0 at the front).
    ///
    /// The caller is responsible for keeping `cap <= MAX_SLOTS`.
    pub(crate) fn new(cap: usize) -> Self {
        debug_assert!(cap <= MAX_SLOTS);

        let slots: Box<[Slot<K, V>]> = (0..cap)
            .map(|i| Slot {
                entry: None,
                prev: if i == 0 { NIL } else { (i - 1) as u32 },
                next: if i + 1 < cap { (i + 1) as u32 } else { NIL },
            })
            .collect();

        let (head, tail) = if cap == 0 {
            (NIL, NIL)
        } else {
            (0, (cap - 1) as u32)
        };

        SlotList { slots, head, tail }
    }

    /// Number of slots, occupied or not. Never changes.
    #[inline]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The most recently touched slot.
    #[inline]
    pub(crate) fn front(&self) -> Option<SlotId> {
        (self.head != NIL).then_some(SlotId(self.head))
    }

    /// The slot the next insertion of a new key will reuse.
    #[inline]
    pub(crate) fn back(&self) -> Option<SlotId> {
        (self.tail != NIL).then_some(SlotId(self.tail))
    }

    #[inline]
    pub(crate) fn entry(&self, id: SlotId) -> Option<&(K, V)> {
        self.slots[id.index()].entry.as_ref()
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self, id: SlotId) -> Option<&mut (K, V)> {
        self.slots[id.index()].entry.as_mut()
    }

    /// Stores a pair in the slot, returning whatever it held before.
    #[inline]
    pub(crate) fn replace(&mut self, id: SlotId, key: K, value: V) -> Option<(K, V)> {
        self.slots[id.index()].entry.replace((key, value))
    }

    /// Empties the slot. Its position in the list is left alone.
    #[inline]
    pub(crate) fn take(&mut self, id: SlotId) -> Option<(K, V)> {
        self.slots[id.index()].entry.take()
    }

    pub(crate) fn move_to_front(&mut self, id: SlotId) {
        if self.head == id.0 {
            return;
        }
        self.unlink(id.0);
        self.link_front(id.0);
    }

    pub(crate) fn move_to_back(&mut self, id: SlotId) {
        if self.tail == id.0 {
            return;
        }
        self.unlink(id.0);
        self.link_back(id.0);
    }

    /// Empties every slot, keeping the allocation and the current order.
    pub(crate) fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.entry = None;
        }
    }

    fn unlink(&mut self, idx: u32) {
        let (prev, next) = {
            let slot = &self.slots[idx as usize];
            (slot.prev, slot.next)
        };

        if prev == NIL {
            self.head = next;
        } else {
            self.slots[prev as usize].next = next;
        }

        if next == NIL {
            self.tail = prev;
        } else {
            self.slots[next as usize].prev = prev;
        }
    }

    fn link_front(&mut self, idx: u32) {
        let old_head = self.head;
        {
            let slot = &mut self.slots[idx as usize];
            slot.prev = NIL;
            slot.next = old_head;
        }

        if old_head == NIL {
            self.tail = idx;
        } else {
            self.slots[old_head as usize].prev = idx;
        }
        self.head = idx;
    }

    fn link_back(&mut self, idx: u32) {
        let old_tail = self.tail;
        {
            let slot = &mut self.slots[idx as usize];
            slot.next = NIL;
            slot.prev = old_tail;
        }

        if old_tail == NIL {
            self.head = idx;
        } else {
            self.slots[old_tail as usize].next = idx;
        }
        self.tail = idx;
    }

    /// Slot handles from front to back.
    #[cfg(test)]
    pub(crate) fn order_ids(&self) -> alloc::vec::Vec<SlotId> {
        let mut out = alloc::vec::Vec::with_capacity(self.slots.len());
        let mut cur = self.head;
        while cur != NIL {
            out.push(SlotId(cur));
            cur = self.slots[cur as usize].next;
        }
        out
    }

    /// Slot indices from front to back.
    #[cfg(test)]
    pub(crate) fn order(&self) -> alloc::vec::Vec<usize> {
        self.order_ids().into_iter().map(SlotId::index).collect()
    }
}

impl<K, V> fmt::Debug for SlotList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotList")
            .field("slots", &self.slots.len())
            .field("head", &self.front())
            .field("tail", &self.back())
            .finish()
    }
}
