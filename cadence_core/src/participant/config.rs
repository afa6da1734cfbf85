// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-participant scheduling configuration.

use super::GroupId;

/// Which callbacks a participant wants, and from which execution group.
///
/// The group assignment is fixed for the participant's lifetime. The two
/// kind flags can change at runtime, but only through
/// [`UpdateSystem::set_update_enabled`](crate::system::UpdateSystem::set_update_enabled),
/// which applies the matching register/unregister immediately — there is no
/// deferred or batched apply step, and no silent setter side effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateConfig {
    group: GroupId,
    flags: [bool; crate::update_type::LIST_COUNT],
}

impl UpdateConfig {
    /// Creates a configuration for the given group and kind flags.
    #[must_use]
    pub const fn new(group: GroupId, update: bool, fixed_update: bool) -> Self {
        Self {
            group,
            flags: [update, fixed_update],
        }
    }

    /// The execution group this participant belongs to.
    #[inline]
    #[must_use]
    pub const fn group(self) -> GroupId {
        self.group
    }

    /// Whether the Normal callback is wanted.
    #[inline]
    #[must_use]
    pub const fn update(self) -> bool {
        self.flags[0]
    }

    /// Whether the Fixed callback is wanted.
    #[inline]
    #[must_use]
    pub const fn fixed_update(self) -> bool {
        self.flags[1]
    }

    pub(crate) const fn flag(self, slot: usize) -> bool {
        self.flags[slot]
    }

    pub(crate) const fn set_flag(&mut self, slot: usize, value: bool) {
        self.flags[slot] = value;
    }
}
