// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays participant storage with allocation and state tracking.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::list::PhaseLinks;
use crate::update_type::LIST_COUNT;

use super::behaviour::Behaviour;
use super::config::UpdateConfig;
use super::id::{INVALID, ParticipantId};

/// Struct-of-arrays storage for all participants.
///
/// Participants are addressed by [`ParticipantId`] handles. Each occupies a
/// slot in parallel arrays: activation state, configuration, the boxed
/// behaviour, and one pair of intrusive link fields per dispatch kind.
/// Despawned slots are recycled via a free list, and generation counters
/// prevent stale handle access.
pub struct ParticipantStore {
    // -- State --
    pub(crate) active: Vec<bool>,
    pub(crate) config: Vec<UpdateConfig>,
    pub(crate) behaviour: Vec<Option<Box<dyn Behaviour>>>,

    // -- Intrusive links, one pair per dispatch kind --
    pub(crate) links: [PhaseLinks; LIST_COUNT],

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    free_list: Vec<u32>,
    len: u32,
}

impl fmt::Debug for ParticipantStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParticipantStore")
            .field("len", &self.len)
            .field("free", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl Default for ParticipantStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticipantStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            config: Vec::new(),
            behaviour: Vec::new(),
            links: [PhaseLinks::default(), PhaseLinks::default()],
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Allocates a slot for a new, inactive participant.
    pub(crate) fn insert(
        &mut self,
        behaviour: Box<dyn Behaviour>,
        config: UpdateConfig,
    ) -> ParticipantId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.active[idx as usize] = false;
            self.config[idx as usize] = config;
            self.behaviour[idx as usize] = Some(behaviour);
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.active.push(false);
            self.config.push(config);
            self.behaviour.push(Some(behaviour));
            for links in &mut self.links {
                links.push_slot();
            }
            self.generation.push(0);
            idx
        };

        ParticipantId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Frees a slot, bumping the generation so old handles immediately fail
    /// validation.
    ///
    /// The caller must already have unlinked the slot from every list.
    pub(crate) fn free(&mut self, idx: u32) {
        debug_assert!(
            self.links.iter().all(|links| !links.is_linked(idx)),
            "freeing a slot that is still a list member"
        );
        self.behaviour[idx as usize] = None;
        self.active[idx as usize] = false;
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live participant.
    #[must_use]
    pub fn is_alive(&self, id: ParticipantId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the participant's host activation state.
    #[must_use]
    pub fn active(&self, id: ParticipantId) -> bool {
        self.validate(id);
        self.active[id.idx as usize]
    }

    /// Returns the participant's configuration.
    #[must_use]
    pub fn config(&self, id: ParticipantId) -> UpdateConfig {
        self.validate(id);
        self.config[id.idx as usize]
    }

    /// Whether the participant is currently eligible for Normal dispatch.
    #[must_use]
    pub fn should_update(&self, id: ParticipantId) -> bool {
        self.validate(id);
        self.should_run(id.idx, 0)
    }

    /// Whether the participant is currently eligible for Fixed dispatch.
    #[must_use]
    pub fn should_fixed_update(&self, id: ParticipantId) -> bool {
        self.validate(id);
        self.should_run(id.idx, 1)
    }

    /// Number of slots ever allocated (live or free).
    #[must_use]
    pub fn slot_count(&self) -> u32 {
        self.len
    }

    /// Eligibility for the given list slot: active and the kind flag set.
    pub(crate) fn should_run(&self, idx: u32, slot: usize) -> bool {
        self.active[idx as usize] && self.config[idx as usize].flag(slot)
    }

    /// Rebuilds a handle for a raw slot index.
    pub(crate) fn id_at(&self, idx: u32) -> ParticipantId {
        ParticipantId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: ParticipantId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ParticipantId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                INVALID
            }
        );
    }
}
