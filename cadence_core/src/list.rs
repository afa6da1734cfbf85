// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular intrusive membership lists.
//!
//! A list never allocates per-node storage: the `prev`/`next` link fields
//! live in a [`PhaseLinks`] pair of parallel arrays indexed by participant
//! slot, and an [`IntrusiveList`] is only the `head`/`count`/`cursor` bundle
//! that interprets them. Each execution group owns one list per dispatch
//! kind, and a participant can be a member of the Normal and Fixed lists
//! simultaneously and independently because each kind has its own
//! [`PhaseLinks`].
//!
//! # Invariants
//!
//! - Empty list: `head == INVALID`.
//! - Non-empty list: every member's links cycle back to the head, and for any
//!   member `m`, `next[prev[m]] == m` and `prev[next[m]] == m`. A lone member
//!   links to itself.
//! - A slot is a member of a given list at most once; since the list is
//!   circular, a non-`INVALID` link reliably signals membership.
//! - `count` equals the number of members reachable from the head.
//!
//! The cursor makes execution passes safe against mutation from inside a
//! callback: see [`IntrusiveList::remove`].

use alloc::vec::Vec;

use crate::participant::INVALID;

/// Per-kind `prev`/`next` link storage, indexed by participant slot.
///
/// Slots holding `INVALID` in both fields are not members of the list that
/// interprets this storage.
#[derive(Debug, Default)]
pub(crate) struct PhaseLinks {
    pub(crate) prev: Vec<u32>,
    pub(crate) next: Vec<u32>,
}

impl PhaseLinks {
    /// Appends an unlinked slot.
    pub(crate) fn push_slot(&mut self) {
        self.prev.push(INVALID);
        self.next.push(INVALID);
    }

    /// Whether `idx` is currently a member of the owning list.
    pub(crate) fn is_linked(&self, idx: u32) -> bool {
        self.next[idx as usize] != INVALID
    }

    #[cfg(test)]
    fn with_slots(n: usize) -> Self {
        let mut links = Self::default();
        for _ in 0..n {
            links.push_slot();
        }
        links
    }
}

/// Head, count, and traversal cursor for one circular membership list.
#[derive(Debug)]
pub(crate) struct IntrusiveList {
    pub(crate) head: u32,
    pub(crate) count: u32,
    cursor: u32,
    /// Set when the in-flight head removes itself: the stop point has moved
    /// to its successor, so the first arrival there must not end the pass.
    suppress_stop: bool,
}

impl IntrusiveList {
    pub(crate) const fn new() -> Self {
        Self {
            head: INVALID,
            count: 0,
            cursor: INVALID,
            suppress_stop: false,
        }
    }

    pub(crate) const fn count(&self) -> u32 {
        self.count
    }

    /// Appends `idx` before the head (i.e. at the tail).
    ///
    /// No-op if `idx` is already a member, so registration is idempotent.
    /// Returns whether membership changed.
    pub(crate) fn add_to_tail(&mut self, links: &mut PhaseLinks, idx: u32) -> bool {
        if links.is_linked(idx) {
            return false;
        }
        self.count += 1;

        if self.head == INVALID {
            self.head = idx;
            links.prev[idx as usize] = idx;
            links.next[idx as usize] = idx;
            return true;
        }

        let head = self.head;
        let tail = links.prev[head as usize];
        links.next[idx as usize] = head;
        links.prev[idx as usize] = tail;
        links.prev[head as usize] = idx;
        links.next[tail as usize] = idx;
        true
    }

    /// Unlinks `idx`.
    ///
    /// No-op if `idx` is not a member, so removal is idempotent. Returns
    /// whether membership changed.
    ///
    /// If `idx` is the node an in-flight pass is currently visiting, the
    /// cursor is rewound to the node's former `prev` so the next advance
    /// lands on the expected following node. The current node's callback is
    /// what brought us here, so there is no danger of it being visited a
    /// second time.
    pub(crate) fn remove(&mut self, links: &mut PhaseLinks, idx: u32) -> bool {
        if !links.is_linked(idx) {
            return false;
        }
        self.count -= 1;

        if self.count == 0 {
            // The cursor is intentionally left on the dead node: its links
            // are now INVALID, so the next advance reads INVALID, compares
            // equal to the cleared head, and the pass ends.
            links.prev[idx as usize] = INVALID;
            links.next[idx as usize] = INVALID;
            self.head = INVALID;
            return true;
        }

        let was_head = idx == self.head;
        if was_head {
            self.head = links.next[idx as usize];
        }

        let prev = links.prev[idx as usize];
        let next = links.next[idx as usize];
        links.prev[next as usize] = prev;
        links.next[prev as usize] = next;

        if self.cursor == idx {
            self.cursor = prev;
            // The head rewinds to the tail, and the stop point moves to the
            // new head; without the suppression the very next advance would
            // end the pass with every other member unvisited.
            if was_head {
                self.suppress_stop = true;
            }
        }

        links.prev[idx as usize] = INVALID;
        links.next[idx as usize] = INVALID;
        true
    }

    /// Starts an execution pass, placing the cursor on the head.
    ///
    /// Returns the first node to visit, or `None` for an empty list.
    ///
    /// # Panics
    ///
    /// Panics if a pass is already in flight on this list; the execution loop
    /// is not re-entrant per list.
    pub(crate) fn begin_pass(&mut self) -> Option<u32> {
        assert!(
            self.cursor == INVALID,
            "execution pass already in progress for this list"
        );
        debug_assert!(!self.suppress_stop, "stale stop suppression");
        if self.head == INVALID {
            return None;
        }
        self.cursor = self.head;
        Some(self.cursor)
    }

    /// Advances the cursor, returning the next node to visit or `None` once
    /// the walk has closed its cycle back to the head.
    ///
    /// The cursor may be sitting on a node that removed itself (links
    /// cleared, list possibly empty); advancing from there reads `INVALID`
    /// and ends the pass rather than chasing a dead link.
    pub(crate) fn advance_pass(&mut self, links: &PhaseLinks) -> Option<u32> {
        debug_assert!(self.cursor != INVALID, "advance without an in-flight pass");
        self.cursor = links.next[self.cursor as usize];
        if self.cursor == INVALID {
            self.suppress_stop = false;
            return None;
        }
        if self.cursor == self.head {
            if self.suppress_stop {
                self.suppress_stop = false;
                return Some(self.cursor);
            }
            self.cursor = INVALID;
            return None;
        }
        Some(self.cursor)
    }

    /// Read-only walk from the head back around to the head.
    ///
    /// Used by traversal and diagnostics; mutation while iterating is
    /// reserved to the pass machinery above.
    pub(crate) fn iter<'a>(&self, links: &'a PhaseLinks) -> ListIter<'a> {
        ListIter {
            links,
            head: self.head,
            current: self.head,
            started: false,
        }
    }
}

/// Iterator over the raw member slots of an [`IntrusiveList`].
#[derive(Debug)]
pub(crate) struct ListIter<'a> {
    links: &'a PhaseLinks,
    head: u32,
    current: u32,
    started: bool,
}

impl Iterator for ListIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.current == INVALID || (self.started && self.current == self.head) {
            return None;
        }
        self.started = true;
        let idx = self.current;
        self.current = self.links.next[idx as usize];
        Some(idx)
    }
}
