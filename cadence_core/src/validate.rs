// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural invariant checks over every membership list.
//!
//! These checks are exhaustive and allocate scratch space, so they belong in
//! tests and debug tooling rather than on the dispatch path. The first
//! violation found is returned; the scan does not attempt to continue past a
//! corrupted list, whose links may no longer terminate.

use alloc::vec;

use crate::error::ScheduleError;
use crate::group::ExecutionGroup;
use crate::participant::{INVALID, ParticipantStore};
use crate::update_type::{LIST_COUNT, UpdateType};

/// Checks every list of every group against the structural invariants.
pub(crate) fn check(
    groups: &[ExecutionGroup],
    participants: &ParticipantStore,
) -> Result<(), ScheduleError> {
    let mut seen = vec![false; participants.slot_count() as usize];
    for group in groups {
        for slot in 0..LIST_COUNT {
            for flag in &mut seen {
                *flag = false;
            }
            check_list(group, participants, slot, &mut seen)?;
        }
    }
    Ok(())
}

/// Walks exactly `count` links from the head and verifies that the cycle
/// closes, links are symmetric, no slot repeats, and every member's
/// configuration routes to this group.
fn check_list(
    group: &ExecutionGroup,
    participants: &ParticipantStore,
    slot: usize,
    seen: &mut [bool],
) -> Result<(), ScheduleError> {
    let kind = UpdateType::from_list_slot(slot);
    let list = &group.lists[slot];
    let links = &participants.links[slot];

    if list.count == 0 {
        if list.head != INVALID {
            return Err(ScheduleError::EmptyListWithHead {
                group: group.index(),
                kind,
            });
        }
        return Ok(());
    }
    if list.head == INVALID {
        return Err(ScheduleError::MissingHead {
            group: group.index(),
            kind,
        });
    }

    let mut current = list.head;
    for _ in 0..list.count {
        let next = links.next[current as usize];
        let prev = links.prev[current as usize];
        if next == INVALID
            || prev == INVALID
            || links.prev[next as usize] != current
            || links.next[prev as usize] != current
        {
            return Err(ScheduleError::BrokenLink {
                group: group.index(),
                kind,
                slot: current,
            });
        }
        if seen[current as usize] {
            return Err(ScheduleError::DuplicateReference {
                participant: participants.id_at(current),
                kind,
            });
        }
        seen[current as usize] = true;

        let configured = participants.config[current as usize].group().index();
        if configured != group.index() {
            return Err(ScheduleError::GroupMismatch {
                participant: participants.id_at(current),
                expected: configured,
                actual: group.index(),
            });
        }
        current = next;
    }

    if current != list.head {
        return Err(ScheduleError::CountMismatch {
            group: group.index(),
            kind,
            count: list.count,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use crate::participant::{Behaviour, GroupId, ParticipantId, UpdateConfig};

    use super::*;

    struct Inert;
    impl Behaviour for Inert {}

    fn populated() -> (alloc::vec::Vec<ExecutionGroup>, ParticipantStore) {
        let mut store = ParticipantStore::new();
        let mut group = ExecutionGroup::new();
        group.assign_index(0);
        for _ in 0..3 {
            let id = store.insert(
                Box::new(Inert),
                UpdateConfig::new(GroupId::new(0), true, false),
            );
            store.active[id.index() as usize] = true;
            group.register_eligible(&mut store, id.index());
        }
        (vec![group], store)
    }

    #[test]
    fn intact_lists_pass() {
        let (groups, store) = populated();
        check(&groups, &store).unwrap();
    }

    #[test]
    fn empty_system_passes() {
        let store = ParticipantStore::new();
        check(&[], &store).unwrap();
    }

    #[test]
    fn severed_link_is_reported() {
        let (groups, mut store) = populated();
        store.links[0].prev[2] = INVALID;
        assert_eq!(
            check(&groups, &store),
            Err(ScheduleError::BrokenLink {
                group: 0,
                kind: UpdateType::Normal,
                slot: 1,
            })
        );
    }

    #[test]
    fn revisited_slot_is_reported_as_duplicate() {
        let (groups, mut store) = populated();
        // Splice slot 1's next back to the head, stranding slot 2. The walk
        // revisits the head before exhausting the claimed count.
        store.links[0].next[1] = 0;
        store.links[0].prev[0] = 1;
        assert_eq!(
            check(&groups, &store),
            Err(ScheduleError::DuplicateReference {
                participant: store.id_at(0),
                kind: UpdateType::Normal,
            })
        );
    }

    #[test]
    fn understated_count_is_reported() {
        let (mut groups, store) = populated();
        groups[0].lists[0].count = 2;
        assert_eq!(
            check(&groups, &store),
            Err(ScheduleError::CountMismatch {
                group: 0,
                kind: UpdateType::Normal,
                count: 2,
            })
        );
    }

    #[test]
    fn misrouted_member_is_reported() {
        let (groups, mut store) = populated();
        store.config[1] = UpdateConfig::new(GroupId::new(5), true, false);
        assert_eq!(
            check(&groups, &store),
            Err(ScheduleError::GroupMismatch {
                participant: ParticipantId {
                    idx: 1,
                    generation: 0,
                },
                expected: 5,
                actual: 0,
            })
        );
    }
}
