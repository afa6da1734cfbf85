// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered execution groups.
//!
//! A group owns one membership list per dispatch kind. The system dispatches
//! groups strictly in configuration order, so "everything in group A runs
//! before anything in group B" is a structural guarantee rather than a
//! per-participant priority comparison.

use crate::error::ScheduleError;
use crate::list::IntrusiveList;
use crate::participant::{GroupId, INVALID, ParticipantId, ParticipantStore};
use crate::update_type::{LIST_COUNT, UpdateType};

/// One priority tier of the update order.
///
/// Groups are created detached and handed to
/// [`UpdateSystem::set_execution_groups`](crate::system::UpdateSystem::set_execution_groups),
/// which assigns each its position. Participants name their group by that
/// position via [`GroupId`].
#[derive(Debug)]
pub struct ExecutionGroup {
    /// Position in the system's execution order; `INVALID` until the group is
    /// installed.
    index: u32,
    pub(crate) lists: [IntrusiveList; LIST_COUNT],
}

impl Default for ExecutionGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionGroup {
    /// Creates a detached group with empty membership lists.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            index: INVALID,
            lists: [IntrusiveList::new(), IntrusiveList::new()],
        }
    }

    /// The group's position in the execution order.
    ///
    /// # Panics
    ///
    /// Panics if the group has not been installed into a system.
    #[must_use]
    pub fn group_id(&self) -> GroupId {
        assert!(self.index != INVALID, "group is not installed in a system");
        GroupId::new(self.index)
    }

    /// Records the group's position. Called exactly once, at installation.
    pub(crate) fn assign_index(&mut self, index: u32) {
        debug_assert!(self.index == INVALID, "group installed twice");
        self.index = index;
    }

    pub(crate) fn index(&self) -> u32 {
        self.index
    }

    /// The membership list for the given kind.
    pub(crate) fn list_for_type(&self, kind: UpdateType) -> Result<&IntrusiveList, ScheduleError> {
        Ok(&self.lists[kind.list_slot()?])
    }

    /// Number of current members of the given kind's list.
    pub fn count_for_type(&self, kind: UpdateType) -> Result<u32, ScheduleError> {
        Ok(self.list_for_type(kind)?.count())
    }

    /// Visits every current member of the given kind's list, in execution
    /// order, without dispatching anything.
    pub fn traverse_for_type(
        &self,
        participants: &ParticipantStore,
        kind: UpdateType,
        mut visit: impl FnMut(ParticipantId),
    ) -> Result<(), ScheduleError> {
        let slot = kind.list_slot()?;
        for idx in self.list_for_type(kind)?.iter(&participants.links[slot]) {
            visit(participants.id_at(idx));
        }
        Ok(())
    }

    /// Adds the participant to every list its flags currently make it
    /// eligible for.
    ///
    /// Fails with [`ScheduleError::GroupMismatch`] if the participant's
    /// configuration names a different group. Already-present memberships are
    /// left untouched.
    pub fn try_register(
        &mut self,
        participants: &mut ParticipantStore,
        id: ParticipantId,
    ) -> Result<(), ScheduleError> {
        participants.validate(id);
        self.check_routing(participants, id)?;
        self.register_eligible(participants, id.idx);
        Ok(())
    }

    /// Removes the participant from every list its flags no longer make it
    /// eligible for.
    ///
    /// Fails with [`ScheduleError::GroupMismatch`] if the participant's
    /// configuration names a different group. Absent memberships are left
    /// untouched.
    pub fn try_unregister(
        &mut self,
        participants: &mut ParticipantStore,
        id: ParticipantId,
    ) -> Result<(), ScheduleError> {
        participants.validate(id);
        self.check_routing(participants, id)?;
        self.unregister_ineligible(participants, id.idx);
        Ok(())
    }

    fn check_routing(
        &self,
        participants: &ParticipantStore,
        id: ParticipantId,
    ) -> Result<(), ScheduleError> {
        let expected = participants.config(id).group().index();
        if expected != self.index {
            return Err(ScheduleError::GroupMismatch {
                participant: id,
                expected,
                actual: self.index,
            });
        }
        Ok(())
    }

    /// Syncs memberships upward: joins each list where the participant is
    /// eligible. Returns which lists changed.
    pub(crate) fn register_eligible(
        &mut self,
        participants: &mut ParticipantStore,
        idx: u32,
    ) -> [bool; LIST_COUNT] {
        let mut changed = [false; LIST_COUNT];
        for slot in 0..LIST_COUNT {
            if participants.should_run(idx, slot) {
                changed[slot] = self.lists[slot].add_to_tail(&mut participants.links[slot], idx);
            }
        }
        changed
    }

    /// Syncs memberships downward: leaves each list where the participant is
    /// no longer eligible. Returns which lists changed.
    pub(crate) fn unregister_ineligible(
        &mut self,
        participants: &mut ParticipantStore,
        idx: u32,
    ) -> [bool; LIST_COUNT] {
        let mut changed = [false; LIST_COUNT];
        for slot in 0..LIST_COUNT {
            if !participants.should_run(idx, slot) {
                changed[slot] = self.lists[slot].remove(&mut participants.links[slot], idx);
            }
        }
        changed
    }
}
