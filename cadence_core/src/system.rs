// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The update system: group configuration, participant lifecycle, and the
//! execution loop.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::error::ScheduleError;
use crate::group::ExecutionGroup;
use crate::participant::{Behaviour, GroupId, ParticipantId, ParticipantStore, UpdateConfig};
use crate::trace::{
    DespawnEvent, DispatchEvent, PassBeginEvent, PassEndEvent, RegisterEvent, SpawnEvent, Tracer,
    UnregisterEvent,
};
use crate::update_type::{DISPATCHED, LIST_COUNT, UpdateType};

/// Which membership lists currently contain a participant.
///
/// Produced by [`UpdateSystem::check_system_for_participant`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Presence {
    /// Member of its group's Normal list.
    pub update: bool,
    /// Member of its group's Fixed list.
    pub fixed_update: bool,
}

/// Owns the execution groups and all participants, and runs the dispatch
/// loop.
///
/// Groups are configured exactly once via [`set_execution_groups`]; their
/// order is the execution order. The host drives the system by calling
/// [`run_update`] once per frame and [`run_fixed_update`] once per fixed
/// timestep.
///
/// [`set_execution_groups`]: Self::set_execution_groups
/// [`run_update`]: Self::run_update
/// [`run_fixed_update`]: Self::run_fixed_update
pub struct UpdateSystem {
    groups: Vec<ExecutionGroup>,
    participants: ParticipantStore,
    frames_run: u64,
    tracer: Tracer,
}

impl fmt::Debug for UpdateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateSystem")
            .field("groups", &self.groups.len())
            .field("participants", &self.participants)
            .field("frames_run", &self.frames_run)
            .finish_non_exhaustive()
    }
}

impl Default for UpdateSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateSystem {
    /// Creates a system with no groups configured.
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            participants: ParticipantStore::new(),
            frames_run: 0,
            tracer: Tracer::none(),
        }
    }

    // -- Configuration --

    /// Installs the execution groups, in execution order.
    ///
    /// This is a one-shot operation: once a non-empty set of groups is
    /// installed it can never be replaced, because participants capture
    /// group ordinals in their configuration. Installing an empty set is
    /// accepted and leaves the system unconfigured, so a later non-empty
    /// call still succeeds.
    pub fn set_execution_groups(
        &mut self,
        mut groups: Vec<ExecutionGroup>,
    ) -> Result<(), ScheduleError> {
        if !self.groups.is_empty() {
            return Err(ScheduleError::Reinitialization);
        }
        for (index, group) in (0_u32..).zip(groups.iter_mut()) {
            group.assign_index(index);
        }
        if !groups.is_empty() {
            log::debug!("configured {} execution group(s)", groups.len());
        }
        self.groups = groups;
        Ok(())
    }

    /// Whether a non-empty set of groups has been installed.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.groups.is_empty()
    }

    /// The installed groups, in execution order.
    #[must_use]
    pub fn groups(&self) -> &[ExecutionGroup] {
        &self.groups
    }

    /// The group with the given ordinal.
    ///
    /// # Panics
    ///
    /// Panics if no group has that ordinal.
    #[must_use]
    pub fn group(&self, id: GroupId) -> &ExecutionGroup {
        &self.groups[id.index() as usize]
    }

    /// The participant store.
    #[must_use]
    pub fn participants(&self) -> &ParticipantStore {
        &self.participants
    }

    /// Number of Normal update passes run so far.
    #[must_use]
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// Installs a trace sink receiving dispatch-loop events.
    #[cfg(feature = "trace")]
    pub fn set_trace_sink(&mut self, sink: Option<Box<dyn crate::trace::TraceSink>>) {
        self.tracer.set_sink(sink);
    }

    // -- Participant lifecycle --

    /// Allocates a participant with the given behaviour and configuration.
    ///
    /// The participant starts inactive and therefore unregistered; call
    /// [`set_active`](Self::set_active) to start receiving callbacks.
    ///
    /// # Panics
    ///
    /// Panics if groups are not configured, or if the configuration names a
    /// group ordinal outside the configured range.
    pub fn spawn(&mut self, behaviour: Box<dyn Behaviour>, config: UpdateConfig) -> ParticipantId {
        assert!(self.is_configured(), "execution groups are not configured");
        assert!(
            (config.group().index() as usize) < self.groups.len(),
            "config names group {:?} but only {} group(s) are configured",
            config.group(),
            self.groups.len()
        );
        let id = self.participants.insert(behaviour, config);
        log::trace!("spawned {id:?} in {:?}", config.group());
        self.tracer.spawn(&SpawnEvent {
            participant: id,
            group: config.group(),
        });
        id
    }

    /// Deactivates, unregisters, and frees the participant.
    ///
    /// Safe to call from inside the participant's own callback; the
    /// in-flight pass continues with the remaining members.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn despawn(&mut self, id: ParticipantId) {
        self.participants.validate(id);
        self.participants.active[id.idx as usize] = false;
        self.sync_membership(id);
        self.participants.free(id.idx);
        log::trace!("despawned {id:?}");
        self.tracer.despawn(&DespawnEvent { participant: id });
    }

    /// Sets the participant's host activation state, registering or
    /// unregistering it as its flags dictate.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_active(&mut self, id: ParticipantId, active: bool) {
        self.participants.validate(id);
        if self.participants.active[id.idx as usize] == active {
            return;
        }
        self.participants.active[id.idx as usize] = active;
        self.sync_membership(id);
    }

    /// Sets one of the participant's kind flags, registering or
    /// unregistering it immediately.
    ///
    /// Fails with [`ScheduleError::InvalidUpdateType`] for
    /// [`UpdateType::None`].
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_update_enabled(
        &mut self,
        id: ParticipantId,
        kind: UpdateType,
        enabled: bool,
    ) -> Result<(), ScheduleError> {
        self.participants.validate(id);
        let slot = kind.list_slot()?;
        let config = &mut self.participants.config[id.idx as usize];
        if config.flag(slot) == enabled {
            return Ok(());
        }
        config.set_flag(slot, enabled);
        self.sync_membership(id);
        Ok(())
    }

    /// Adds the participant to every list it is currently eligible for.
    ///
    /// Tolerant: memberships already present are untouched, and slots the
    /// participant is not eligible for are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn try_add(&mut self, id: ParticipantId) {
        self.participants.validate(id);
        self.add_eligible(id);
    }

    /// Removes the participant from every list it is no longer eligible
    /// for.
    ///
    /// Tolerant: absent memberships are untouched, and slots the
    /// participant remains eligible for are left alone.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn try_remove(&mut self, id: ParticipantId) {
        self.participants.validate(id);
        self.remove_ineligible(id);
    }

    fn add_eligible(&mut self, id: ParticipantId) {
        let group_index = self.participants.config[id.idx as usize].group().index();
        let joined = self.groups[group_index as usize]
            .register_eligible(&mut self.participants, id.idx);
        for slot in 0..LIST_COUNT {
            if joined[slot] {
                self.tracer.register(&RegisterEvent {
                    kind: UpdateType::from_list_slot(slot),
                    group: GroupId::new(group_index),
                    participant: id,
                });
            }
        }
    }

    fn remove_ineligible(&mut self, id: ParticipantId) {
        let group_index = self.participants.config[id.idx as usize].group().index();
        let left = self.groups[group_index as usize]
            .unregister_ineligible(&mut self.participants, id.idx);
        for slot in 0..LIST_COUNT {
            if left[slot] {
                self.tracer.unregister(&UnregisterEvent {
                    kind: UpdateType::from_list_slot(slot),
                    group: GroupId::new(group_index),
                    participant: id,
                });
            }
        }
    }

    /// Brings the participant's list memberships in line with its current
    /// eligibility, in both directions.
    ///
    /// `add_eligible` touches only slots the participant is eligible for
    /// and `remove_ineligible` only slots it is not, so together they
    /// perform a full sync.
    fn sync_membership(&mut self, id: ParticipantId) {
        self.add_eligible(id);
        self.remove_ineligible(id);
    }

    // -- Execution --

    /// Runs one Normal pass over every group, in order, and advances the
    /// frame counter.
    pub fn run_update(&mut self) {
        self.frames_run += 1;
        self.execute_all(0, UpdateType::Normal);
    }

    /// Runs one Fixed pass over every group, in order.
    pub fn run_fixed_update(&mut self) {
        self.execute_all(1, UpdateType::Fixed);
    }

    /// Runs one pass of the given kind over every group, in order.
    ///
    /// Fails with [`ScheduleError::InvalidUpdateType`] for
    /// [`UpdateType::None`].
    pub fn execute_all_for_type(&mut self, kind: UpdateType) -> Result<(), ScheduleError> {
        let slot = kind.list_slot()?;
        self.execute_all(slot, kind);
        Ok(())
    }

    fn execute_all(&mut self, slot: usize, kind: UpdateType) {
        let frame = self.frames_run;
        self.tracer.pass_begin(&PassBeginEvent { frame, kind });
        let mut dispatched = 0;
        for group_index in 0..self.groups.len() {
            dispatched += self.execute_group(group_index, slot, kind);
        }
        self.tracer.pass_end(&PassEndEvent {
            frame,
            kind,
            dispatched,
        });
    }

    /// Walks one group's list of the given kind, dispatching each member.
    ///
    /// The member's behaviour is moved out of its slot for the duration of
    /// the callback so the callback can borrow the whole system. It is put
    /// back only if the slot still holds the same generation and is still
    /// empty; a callback that despawned its own participant (or whose slot
    /// was freed and reused by a sibling) leaves the moved-out box to drop
    /// here.
    fn execute_group(&mut self, group_index: usize, slot: usize, kind: UpdateType) -> u64 {
        let mut dispatched = 0;
        let mut current = self.groups[group_index].lists[slot].begin_pass();
        while let Some(idx) = current {
            let generation = self.participants.generation[idx as usize];
            let id = ParticipantId { idx, generation };

            if let Some(mut behaviour) = self.participants.behaviour[idx as usize].take() {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "group ordinals are assigned from u32"
                )]
                self.tracer.dispatch(&DispatchEvent {
                    frame: self.frames_run,
                    kind,
                    group: GroupId::new(group_index as u32),
                    participant: id,
                });
                let mut cx = UpdateContext { system: self, id };
                if slot == 0 {
                    behaviour.managed_update(&mut cx);
                } else {
                    behaviour.managed_fixed_update(&mut cx);
                }
                dispatched += 1;

                if self.participants.generation[idx as usize] == generation
                    && self.participants.behaviour[idx as usize].is_none()
                {
                    self.participants.behaviour[idx as usize] = Some(behaviour);
                }
            }
            // A missing behaviour means this member is already in flight in
            // an enclosing pass of the other kind; it is skipped rather than
            // dispatched re-entrantly.

            current =
                self.groups[group_index].lists[slot].advance_pass(&self.participants.links[slot]);
        }
        dispatched
    }

    // -- Diagnostics --

    /// Scans every membership list for the participant and reports which
    /// lists contain it.
    ///
    /// A stale handle reports absent rather than panicking, so this is
    /// usable as a liveness probe. Fails with
    /// [`ScheduleError::DuplicateReference`] if any single list contains the
    /// participant's slot more than once, which indicates link corruption.
    pub fn check_system_for_participant(
        &self,
        id: ParticipantId,
    ) -> Result<Presence, ScheduleError> {
        let mut presence = Presence::default();
        let live = self.participants.is_alive(id);
        for group in &self.groups {
            for (slot, kind) in DISPATCHED.iter().enumerate() {
                let occurrences = group.lists[slot]
                    .iter(&self.participants.links[slot])
                    .filter(|&idx| idx == id.idx)
                    .count();
                if occurrences > 1 {
                    log::error!(
                        "{id:?} appears {occurrences} times in group {}'s {kind:?} list",
                        group.index()
                    );
                    return Err(ScheduleError::DuplicateReference {
                        participant: id,
                        kind: *kind,
                    });
                }
                if occurrences == 1 && live {
                    match slot {
                        0 => presence.update = true,
                        _ => presence.fixed_update = true,
                    }
                }
            }
        }
        Ok(presence)
    }

    /// Checks every structural invariant of every membership list.
    ///
    /// Intended for debug builds and tests; the dispatch path never calls
    /// this.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        crate::validate::check(&self.groups, &self.participants)
    }
}

/// Access to the owning system from inside a participant callback.
///
/// Everything reachable through [`system`](Self::system) is fair game during
/// a callback, including membership mutation and despawning; the shorthand
/// methods cover the participant acting on itself.
pub struct UpdateContext<'a> {
    pub(crate) system: &'a mut UpdateSystem,
    pub(crate) id: ParticipantId,
}

impl fmt::Debug for UpdateContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateContext")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl UpdateContext<'_> {
    /// The participant being dispatched.
    #[must_use]
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    /// The owning system.
    pub fn system(&mut self) -> &mut UpdateSystem {
        self.system
    }

    /// Number of Normal passes run so far, including the current one.
    #[must_use]
    pub fn frames_run(&self) -> u64 {
        self.system.frames_run
    }

    /// Despawns the participant being dispatched.
    pub fn despawn_self(&mut self) {
        self.system.despawn(self.id);
    }

    /// Deactivates the participant being dispatched.
    pub fn deactivate_self(&mut self) {
        self.system.set_active(self.id, false);
    }

    /// Toggles one of this participant's kind flags.
    pub fn set_self_update_enabled(
        &mut self,
        kind: UpdateType,
        enabled: bool,
    ) -> Result<(), ScheduleError> {
        self.system.set_update_enabled(self.id, kind, enabled)
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use super::*;

    /// Pushes a tag onto a shared log on every callback.
    struct Counting {
        tag: u32,
        normal: Rc<RefCell<Vec<u32>>>,
        fixed: Rc<RefCell<Vec<u32>>>,
    }

    impl Behaviour for Counting {
        fn managed_update(&mut self, _cx: &mut UpdateContext<'_>) {
            self.normal.borrow_mut().push(self.tag);
        }

        fn managed_fixed_update(&mut self, _cx: &mut UpdateContext<'_>) {
            self.fixed.borrow_mut().push(self.tag);
        }
    }

    struct Inert;
    impl Behaviour for Inert {}

    fn configured_system(group_count: usize) -> UpdateSystem {
        let mut system = UpdateSystem::new();
        let groups = (0..group_count).map(|_| ExecutionGroup::new()).collect();
        system.set_execution_groups(groups).unwrap();
        system
    }

    fn logs() -> (Rc<RefCell<Vec<u32>>>, Rc<RefCell<Vec<u32>>>) {
        (Rc::new(RefCell::new(Vec::new())), Rc::new(RefCell::new(Vec::new())))
    }

    fn spawn_counting(
        system: &mut UpdateSystem,
        tag: u32,
        group: u32,
        normal: &Rc<RefCell<Vec<u32>>>,
        fixed: &Rc<RefCell<Vec<u32>>>,
    ) -> ParticipantId {
        let id = system.spawn(
            Box::new(Counting {
                tag,
                normal: normal.clone(),
                fixed: fixed.clone(),
            }),
            UpdateConfig::new(GroupId::new(group), true, true),
        );
        system.set_active(id, true);
        id
    }

    #[test]
    fn reconfiguration_is_rejected() {
        let mut system = configured_system(1);
        assert_eq!(
            system.set_execution_groups(vec![ExecutionGroup::new()]),
            Err(ScheduleError::Reinitialization)
        );
    }

    #[test]
    fn empty_configuration_leaves_system_unconfigured() {
        let mut system = UpdateSystem::new();
        system.set_execution_groups(Vec::new()).unwrap();
        assert!(!system.is_configured());
        system
            .set_execution_groups(vec![ExecutionGroup::new()])
            .unwrap();
        assert!(system.is_configured());
    }

    #[test]
    fn spawned_participant_is_inactive_until_activated() {
        let mut system = configured_system(1);
        let (normal, fixed) = logs();
        let id = system.spawn(
            Box::new(Counting {
                tag: 7,
                normal: normal.clone(),
                fixed: fixed.clone(),
            }),
            UpdateConfig::new(GroupId::new(0), true, true),
        );

        system.run_update();
        assert!(normal.borrow().is_empty());

        system.set_active(id, true);
        system.run_update();
        assert_eq!(*normal.borrow(), [7]);
    }

    #[test]
    fn groups_dispatch_in_configured_order() {
        let mut system = configured_system(2);
        let (normal, fixed) = logs();
        // Spawn in reverse group order; dispatch must follow group order.
        spawn_counting(&mut system, 1, 1, &normal, &fixed);
        spawn_counting(&mut system, 0, 0, &normal, &fixed);

        system.run_update();
        assert_eq!(*normal.borrow(), [0, 1]);
    }

    #[test]
    fn normal_and_fixed_passes_are_independent() {
        let mut system = configured_system(1);
        let (normal, fixed) = logs();
        let id = system.spawn(
            Box::new(Counting {
                tag: 1,
                normal: normal.clone(),
                fixed: fixed.clone(),
            }),
            UpdateConfig::new(GroupId::new(0), true, false),
        );
        system.set_active(id, true);

        system.run_update();
        system.run_fixed_update();
        assert_eq!(*normal.borrow(), [1]);
        assert!(fixed.borrow().is_empty());
    }

    #[test]
    fn set_update_enabled_toggles_membership() {
        let mut system = configured_system(1);
        let (normal, fixed) = logs();
        let id = spawn_counting(&mut system, 1, 0, &normal, &fixed);

        system
            .set_update_enabled(id, UpdateType::Normal, false)
            .unwrap();
        system.run_update();
        system.run_fixed_update();
        assert!(normal.borrow().is_empty());
        assert_eq!(*fixed.borrow(), [1]);

        system
            .set_update_enabled(id, UpdateType::Normal, true)
            .unwrap();
        system.run_update();
        assert_eq!(*normal.borrow(), [1]);
    }

    #[test]
    fn set_update_enabled_rejects_the_unset_kind() {
        let mut system = configured_system(1);
        let id = system.spawn(
            Box::new(Inert),
            UpdateConfig::new(GroupId::new(0), true, true),
        );
        assert_eq!(
            system.set_update_enabled(id, UpdateType::None, true),
            Err(ScheduleError::InvalidUpdateType(UpdateType::None))
        );
    }

    #[test]
    fn execute_all_rejects_the_unset_kind() {
        let mut system = configured_system(1);
        assert_eq!(
            system.execute_all_for_type(UpdateType::None),
            Err(ScheduleError::InvalidUpdateType(UpdateType::None))
        );
    }

    #[test]
    fn frames_run_counts_normal_passes_only() {
        let mut system = configured_system(1);
        system.run_update();
        system.run_fixed_update();
        system.run_update();
        assert_eq!(system.frames_run(), 2);
    }

    #[test]
    fn presence_reflects_membership() {
        let mut system = configured_system(1);
        let id = system.spawn(
            Box::new(Inert),
            UpdateConfig::new(GroupId::new(0), true, false),
        );
        assert_eq!(
            system.check_system_for_participant(id),
            Ok(Presence::default())
        );

        system.set_active(id, true);
        assert_eq!(
            system.check_system_for_participant(id),
            Ok(Presence {
                update: true,
                fixed_update: false,
            })
        );

        system.despawn(id);
        assert_eq!(
            system.check_system_for_participant(id),
            Ok(Presence::default())
        );
    }

    struct SelfDestruct {
        despawned: Rc<RefCell<Vec<ParticipantId>>>,
    }

    impl Behaviour for SelfDestruct {
        fn managed_update(&mut self, cx: &mut UpdateContext<'_>) {
            self.despawned.borrow_mut().push(cx.id());
            cx.despawn_self();
        }
    }

    #[test]
    fn self_despawn_during_pass_keeps_dispatching_the_rest() {
        let mut system = configured_system(1);
        let despawned = Rc::new(RefCell::new(Vec::new()));
        let (normal, fixed) = logs();

        let doomed = system.spawn(
            Box::new(SelfDestruct {
                despawned: despawned.clone(),
            }),
            UpdateConfig::new(GroupId::new(0), true, false),
        );
        system.set_active(doomed, true);
        let survivor = spawn_counting(&mut system, 9, 0, &normal, &fixed);

        system.run_update();

        assert_eq!(*despawned.borrow(), [doomed]);
        assert_eq!(*normal.borrow(), [9]);
        assert!(!system.participants().is_alive(doomed));
        assert!(system.participants().is_alive(survivor));
        system.validate().unwrap();
    }

    #[test]
    fn despawned_slot_is_reused_with_a_new_generation() {
        let mut system = configured_system(1);
        let id1 = system.spawn(
            Box::new(Inert),
            UpdateConfig::new(GroupId::new(0), true, true),
        );
        system.set_active(id1, true);
        system.despawn(id1);

        let id2 = system.spawn(
            Box::new(Inert),
            UpdateConfig::new(GroupId::new(0), true, true),
        );
        assert_eq!(id1.index(), id2.index());
        assert_ne!(id1.generation(), id2.generation());
        assert!(!system.participants().is_alive(id1));
    }

    #[test]
    fn try_add_and_try_remove_follow_eligibility() {
        let mut system = configured_system(1);
        let id = system.spawn(
            Box::new(Inert),
            UpdateConfig::new(GroupId::new(0), true, false),
        );

        // Inactive, so nothing is eligible and try_add is a no-op.
        system.try_add(id);
        assert_eq!(
            system.check_system_for_participant(id),
            Ok(Presence::default())
        );

        system.participants.active[id.index() as usize] = true;
        system.try_add(id);
        system.try_add(id);
        assert_eq!(
            system.check_system_for_participant(id),
            Ok(Presence {
                update: true,
                fixed_update: false,
            })
        );
        system.validate().unwrap();

        // Still eligible, so try_remove leaves the membership alone.
        system.try_remove(id);
        assert_eq!(
            system.check_system_for_participant(id),
            Ok(Presence {
                update: true,
                fixed_update: false,
            })
        );

        system.participants.active[id.index() as usize] = false;
        system.try_remove(id);
        assert_eq!(
            system.check_system_for_participant(id),
            Ok(Presence::default())
        );
    }

    /// Despawns itself and immediately spawns a replacement, which reuses
    /// the freed slot within the same callback.
    struct Replacing {
        replacement_log: Rc<RefCell<Vec<u32>>>,
    }

    impl Behaviour for Replacing {
        fn managed_update(&mut self, cx: &mut UpdateContext<'_>) {
            cx.despawn_self();
            let log = self.replacement_log.clone();
            let system = cx.system();
            let replacement = system.spawn(
                Box::new(Counting {
                    tag: 42,
                    normal: log.clone(),
                    fixed: log,
                }),
                UpdateConfig::new(GroupId::new(0), true, false),
            );
            system.set_active(replacement, true);
        }
    }

    #[test]
    fn slot_reuse_during_callback_does_not_resurrect_the_old_behaviour() {
        let mut system = configured_system(1);
        let log = Rc::new(RefCell::new(Vec::new()));
        let doomed = system.spawn(
            Box::new(Replacing {
                replacement_log: log.clone(),
            }),
            UpdateConfig::new(GroupId::new(0), true, false),
        );
        system.set_active(doomed, true);

        system.run_update();
        assert!(!system.participants().is_alive(doomed));
        system.validate().unwrap();

        // The replacement occupies the recycled slot with its own
        // behaviour; the old box must not have been put back on top of it.
        system.run_update();
        assert_eq!(*log.borrow(), [42]);
    }

    #[test]
    #[should_panic(expected = "execution groups are not configured")]
    fn spawn_requires_configured_groups() {
        let mut system = UpdateSystem::new();
        let _ = system.spawn(
            Box::new(Inert),
            UpdateConfig::new(GroupId::new(0), true, true),
        );
    }

    #[test]
    fn context_exposes_frame_counter() {
        struct FrameCheck {
            seen: Rc<RefCell<Vec<u64>>>,
        }
        impl Behaviour for FrameCheck {
            fn managed_update(&mut self, cx: &mut UpdateContext<'_>) {
                self.seen.borrow_mut().push(cx.frames_run());
            }
        }

        let mut system = configured_system(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let id = system.spawn(
            Box::new(FrameCheck { seen: seen.clone() }),
            UpdateConfig::new(GroupId::new(0), true, false),
        );
        system.set_active(id, true);

        system.run_update();
        system.run_update();
        assert_eq!(*seen.borrow(), [1, 2]);
    }
}
