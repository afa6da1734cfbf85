// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable test environment and stock behaviours for system tests.
//!
//! [`TestEnvironment`] wraps an [`UpdateSystem`] with named groups and
//! host-style activation toggles, so tests read like the host-engine
//! scenarios they model: an object that is inactive, or whose behaviour
//! component is disabled, must not receive callbacks regardless of its kind
//! flags.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use cadence_core::error::ScheduleError;
use cadence_core::group::ExecutionGroup;
use cadence_core::participant::{Behaviour, GroupId, ParticipantId, UpdateConfig};
use cadence_core::system::{UpdateContext, UpdateSystem};
use cadence_core::update_type::UpdateType;

// ---------------------------------------------------------------------------
// ToggleConfig
// ---------------------------------------------------------------------------

/// Host-style activation state plus kind flags for one participant.
///
/// A participant receives callbacks of a kind only when all of
/// `object_active`, `behaviour_enabled`, and that kind's flag are true.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToggleConfig {
    /// The owning object is active in the scene.
    pub object_active: bool,
    /// The behaviour component itself is enabled.
    pub behaviour_enabled: bool,
    /// The Normal kind flag.
    pub update: bool,
    /// The Fixed kind flag.
    pub fixed_update: bool,
}

impl ToggleConfig {
    /// Fully active, both kinds enabled.
    pub const ALL_ACTIVE_AND_ENABLED: Self = Self::new(true, true, true, true);
    /// Fully active, Normal only.
    pub const UPDATE_ACTIVE_AND_ENABLED: Self = Self::new(true, true, true, false);
    /// Fully active, Fixed only.
    pub const FIXED_ACTIVE_AND_ENABLED: Self = Self::new(true, true, false, true);
    /// Fully active but wanting no callbacks at all.
    pub const NO_UPDATES_ACTIVE_AND_ENABLED: Self = Self::new(true, true, false, false);

    /// Creates a toggle configuration.
    #[must_use]
    pub const fn new(
        object_active: bool,
        behaviour_enabled: bool,
        update: bool,
        fixed_update: bool,
    ) -> Self {
        Self {
            object_active,
            behaviour_enabled,
            update,
            fixed_update,
        }
    }

    /// Whether these toggles should produce Normal list membership.
    #[must_use]
    pub const fn expect_in_update(self) -> bool {
        self.object_active && self.behaviour_enabled && self.update
    }

    /// Whether these toggles should produce Fixed list membership.
    #[must_use]
    pub const fn expect_in_fixed(self) -> bool {
        self.object_active && self.behaviour_enabled && self.fixed_update
    }

    /// Every combination of the four toggles.
    #[must_use]
    pub fn all_permutations() -> [Self; 16] {
        let mut out = [Self::default(); 16];
        for (bits, toggles) in out.iter_mut().enumerate() {
            *toggles = Self::new(
                bits & 0b0001 != 0,
                bits & 0b0010 != 0,
                bits & 0b0100 != 0,
                bits & 0b1000 != 0,
            );
        }
        out
    }
}

// ---------------------------------------------------------------------------
// TestEnvironment
// ---------------------------------------------------------------------------

/// An [`UpdateSystem`] with named groups and toggle-driven spawning.
#[derive(Debug)]
pub struct TestEnvironment {
    system: UpdateSystem,
    group_names: Vec<String>,
}

impl TestEnvironment {
    /// Creates an environment with one group per name, in the given order.
    ///
    /// # Panics
    ///
    /// Panics if `group_names` is empty.
    #[must_use]
    pub fn new(group_names: &[&str]) -> Self {
        assert!(!group_names.is_empty(), "at least one group name required");
        let mut system = UpdateSystem::new();
        let groups = group_names.iter().map(|_| ExecutionGroup::new()).collect();
        // Cannot fail: the system is freshly created.
        let _ = system.set_execution_groups(groups);
        Self {
            system,
            group_names: group_names.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// The wrapped system.
    pub fn system(&mut self) -> &mut UpdateSystem {
        &mut self.system
    }

    /// Resolves a group name to its id.
    ///
    /// # Panics
    ///
    /// Panics if the name is unknown.
    #[must_use]
    pub fn group_id(&self, name: &str) -> GroupId {
        let index = self
            .group_names
            .iter()
            .position(|candidate| candidate == name);
        match index {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "group counts are tiny"
            )]
            Some(index) => GroupId::new(index as u32),
            None => panic!("unknown group name: {name:?}"),
        }
    }

    /// Spawns a behaviour into the named group with the given toggles
    /// already applied.
    pub fn spawn(
        &mut self,
        group_name: &str,
        behaviour: Box<dyn Behaviour>,
        toggles: ToggleConfig,
    ) -> ParticipantId {
        let group = self.group_id(group_name);
        let config = UpdateConfig::new(group, toggles.update, toggles.fixed_update);
        let id = self.system.spawn(behaviour, config);
        self.system
            .set_active(id, toggles.object_active && toggles.behaviour_enabled);
        id
    }

    /// Re-applies a full set of toggles to an existing participant.
    pub fn set_toggles(
        &mut self,
        id: ParticipantId,
        toggles: ToggleConfig,
    ) -> Result<(), ScheduleError> {
        self.system
            .set_update_enabled(id, UpdateType::Normal, toggles.update)?;
        self.system
            .set_update_enabled(id, UpdateType::Fixed, toggles.fixed_update)?;
        self.system
            .set_active(id, toggles.object_active && toggles.behaviour_enabled);
        Ok(())
    }

    /// Current member count of the named group's list of the given kind.
    pub fn count_for_group(&self, name: &str, kind: UpdateType) -> Result<u32, ScheduleError> {
        self.system.group(self.group_id(name)).count_for_type(kind)
    }

    /// Runs `frames` simulated frames, each one Fixed pass followed by one
    /// Normal pass.
    pub fn run_frames(&mut self, frames: u32) {
        for _ in 0..frames {
            self.system.run_fixed_update();
            self.system.run_update();
        }
    }
}

// ---------------------------------------------------------------------------
// Stock behaviours
// ---------------------------------------------------------------------------

/// Shared record of which participants were dispatched, in order.
#[derive(Debug, Default)]
pub struct CallLog {
    /// Normal dispatches, in order.
    pub normal: Vec<ParticipantId>,
    /// Fixed dispatches, in order.
    pub fixed: Vec<ParticipantId>,
}

impl CallLog {
    /// Creates an empty shared log.
    #[must_use]
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }
}

/// Appends its own id to a shared [`CallLog`] on every callback.
#[derive(Debug)]
pub struct CountingBehaviour {
    log: Rc<RefCell<CallLog>>,
}

impl CountingBehaviour {
    /// Creates a counting behaviour writing into `log`.
    #[must_use]
    pub fn new(log: &Rc<RefCell<CallLog>>) -> Self {
        Self { log: log.clone() }
    }
}

impl Behaviour for CountingBehaviour {
    fn managed_update(&mut self, cx: &mut UpdateContext<'_>) {
        self.log.borrow_mut().normal.push(cx.id());
    }

    fn managed_fixed_update(&mut self, cx: &mut UpdateContext<'_>) {
        self.log.borrow_mut().fixed.push(cx.id());
    }
}

/// Despawns itself after a fixed number of Normal callbacks.
#[derive(Debug)]
pub struct SelfDestructBehaviour {
    ticks_remaining: u32,
    log: Rc<RefCell<CallLog>>,
}

impl SelfDestructBehaviour {
    /// Creates a behaviour that despawns itself on its `ticks`-th Normal
    /// callback.
    #[must_use]
    pub fn new(ticks: u32, log: &Rc<RefCell<CallLog>>) -> Self {
        Self {
            ticks_remaining: ticks,
            log: log.clone(),
        }
    }
}

impl Behaviour for SelfDestructBehaviour {
    fn managed_update(&mut self, cx: &mut UpdateContext<'_>) {
        self.log.borrow_mut().normal.push(cx.id());
        self.ticks_remaining -= 1;
        if self.ticks_remaining == 0 {
            cx.despawn_self();
        }
    }
}

/// Removes and re-adds itself once per frame by pulsing its Normal flag.
///
/// Exercises the pinned mutate-while-iterating behavior: a member that
/// rejoins mid-pass lands at the tail and is dispatched a second time in the
/// same pass.
#[derive(Debug)]
pub struct TogglingBehaviour {
    last_frame: u64,
    log: Rc<RefCell<CallLog>>,
}

impl TogglingBehaviour {
    /// Creates a toggling behaviour writing into `log`.
    #[must_use]
    pub fn new(log: &Rc<RefCell<CallLog>>) -> Self {
        Self {
            last_frame: 0,
            log: log.clone(),
        }
    }
}

impl Behaviour for TogglingBehaviour {
    fn managed_update(&mut self, cx: &mut UpdateContext<'_>) {
        self.log.borrow_mut().normal.push(cx.id());
        if cx.frames_run() != self.last_frame {
            self.last_frame = cx.frames_run();
            // Normal is always dispatchable, so neither call can fail.
            let _ = cx.set_self_update_enabled(UpdateType::Normal, false);
            let _ = cx.set_self_update_enabled(UpdateType::Normal, true);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const GROUP: &str = "default";

    fn env() -> TestEnvironment {
        TestEnvironment::new(&[GROUP])
    }

    fn counts(env: &TestEnvironment) -> (u32, u32) {
        (
            env.count_for_group(GROUP, UpdateType::Normal).unwrap(),
            env.count_for_group(GROUP, UpdateType::Fixed).unwrap(),
        )
    }

    #[test]
    fn every_spawn_permutation_lands_in_the_expected_lists() {
        for toggles in ToggleConfig::all_permutations() {
            let mut env = env();
            let log = CallLog::shared();
            env.spawn(GROUP, Box::new(CountingBehaviour::new(&log)), toggles);

            let (normal, fixed) = counts(&env);
            assert_eq!(normal, u32::from(toggles.expect_in_update()), "{toggles:?}");
            assert_eq!(fixed, u32::from(toggles.expect_in_fixed()), "{toggles:?}");
        }
    }

    #[test]
    fn every_toggle_transition_lands_in_the_expected_lists() {
        for from in ToggleConfig::all_permutations() {
            for to in ToggleConfig::all_permutations() {
                let mut env = env();
                let log = CallLog::shared();
                let id = env.spawn(GROUP, Box::new(CountingBehaviour::new(&log)), from);
                env.set_toggles(id, to).unwrap();

                let (normal, fixed) = counts(&env);
                assert_eq!(normal, u32::from(to.expect_in_update()), "{from:?} -> {to:?}");
                assert_eq!(fixed, u32::from(to.expect_in_fixed()), "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn reapplying_identical_toggles_changes_nothing() {
        let mut env = env();
        let log = CallLog::shared();
        let id = env.spawn(
            GROUP,
            Box::new(CountingBehaviour::new(&log)),
            ToggleConfig::ALL_ACTIVE_AND_ENABLED,
        );

        env.set_toggles(id, ToggleConfig::ALL_ACTIVE_AND_ENABLED).unwrap();
        env.set_toggles(id, ToggleConfig::ALL_ACTIVE_AND_ENABLED).unwrap();
        assert_eq!(counts(&env), (1, 1));
        env.system().validate().unwrap();
    }

    #[test]
    fn dispatch_log_respects_toggles() {
        let mut env = env();
        let log = CallLog::shared();
        let id = env.spawn(
            GROUP,
            Box::new(CountingBehaviour::new(&log)),
            ToggleConfig::UPDATE_ACTIVE_AND_ENABLED,
        );

        env.run_frames(3);
        assert_eq!(log.borrow().normal, [id, id, id]);
        assert!(log.borrow().fixed.is_empty());
    }

    #[test]
    fn groups_run_in_declaration_order() {
        let mut env = TestEnvironment::new(&["early", "late"]);
        let log = CallLog::shared();
        // Spawn in reverse order; dispatch order must follow the groups.
        let late = env.spawn(
            "late",
            Box::new(CountingBehaviour::new(&log)),
            ToggleConfig::ALL_ACTIVE_AND_ENABLED,
        );
        let early = env.spawn(
            "early",
            Box::new(CountingBehaviour::new(&log)),
            ToggleConfig::ALL_ACTIVE_AND_ENABLED,
        );

        env.run_frames(1);
        assert_eq!(log.borrow().normal, [early, late]);
        assert_eq!(log.borrow().fixed, [early, late]);
    }

    #[test]
    fn self_destruct_stops_after_the_final_tick() {
        let mut env = env();
        let log = CallLog::shared();
        let doomed = env.spawn(
            GROUP,
            Box::new(SelfDestructBehaviour::new(2, &log)),
            ToggleConfig::UPDATE_ACTIVE_AND_ENABLED,
        );

        env.run_frames(1);
        assert!(env.system().participants().is_alive(doomed));

        env.run_frames(3);
        assert_eq!(log.borrow().normal, [doomed, doomed]);
        assert!(!env.system().participants().is_alive(doomed));
        assert_eq!(counts(&env), (0, 0));
        env.system().validate().unwrap();
    }

    #[test]
    fn staggered_batch_self_destruct_leaves_a_clean_system() {
        let mut env = env();
        let log = CallLog::shared();
        let mut all = Vec::new();
        for ticks in 1..=5 {
            all.push(env.spawn(
                GROUP,
                Box::new(SelfDestructBehaviour::new(ticks, &log)),
                ToggleConfig::UPDATE_ACTIVE_AND_ENABLED,
            ));
        }

        for frame in 1..=5_u32 {
            env.run_frames(1);
            let expected_remaining = 5 - frame;
            assert_eq!(
                env.count_for_group(GROUP, UpdateType::Normal).unwrap(),
                expected_remaining
            );
            env.system().validate().unwrap();
        }

        // Participant with `ticks = n` was dispatched n times.
        let normal = &log.borrow().normal;
        for (n, id) in all.iter().enumerate() {
            let dispatches = normal.iter().filter(|&seen| seen == id).count();
            assert_eq!(dispatches, n + 1);
        }
        for id in &all {
            assert!(!env.system().participants().is_alive(*id));
        }
    }

    #[test]
    fn despawned_participant_reports_absent_everywhere() {
        let mut env = env();
        let log = CallLog::shared();
        let id = env.spawn(
            GROUP,
            Box::new(CountingBehaviour::new(&log)),
            ToggleConfig::ALL_ACTIVE_AND_ENABLED,
        );

        let presence = env.system().check_system_for_participant(id).unwrap();
        assert!(presence.update && presence.fixed_update);

        env.system().despawn(id);
        let presence = env.system().check_system_for_participant(id).unwrap();
        assert!(!presence.update && !presence.fixed_update);
    }

    #[test]
    fn rejoining_mid_pass_is_dispatched_again() {
        let mut env = env();
        let log = CallLog::shared();
        let anchor = env.spawn(
            GROUP,
            Box::new(CountingBehaviour::new(&log)),
            ToggleConfig::UPDATE_ACTIVE_AND_ENABLED,
        );
        let toggler = env.spawn(
            GROUP,
            Box::new(TogglingBehaviour::new(&log)),
            ToggleConfig::UPDATE_ACTIVE_AND_ENABLED,
        );

        env.system().run_update();
        // The toggler leaves and rejoins at the tail, so it is seen twice.
        assert_eq!(log.borrow().normal, [anchor, toggler, toggler]);
        env.system().validate().unwrap();
    }

    #[test]
    fn group_configuration_is_one_shot() {
        let mut env = env();
        assert_eq!(
            env.system()
                .set_execution_groups(alloc::vec![ExecutionGroup::new()]),
            Err(ScheduleError::Reinitialization)
        );
    }

    #[test]
    #[should_panic(expected = "unknown group name")]
    fn unknown_group_name_panics() {
        let env = env();
        let _ = env.group_id("nonexistent");
    }
}
