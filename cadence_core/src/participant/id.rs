// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Participant and group identity types.

use core::fmt;

/// Sentinel value indicating "no participant" in link and index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a participant in a
/// [`ParticipantStore`](super::ParticipantStore).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a participant is despawned and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticipantId {
    /// Slot index into the store's arrays.
    pub(crate) idx: u32,
    /// Generation counter — must match the store's generation for this slot.
    pub(crate) generation: u32,
}

impl ParticipantId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParticipantId({}@gen{})", self.idx, self.generation)
    }
}

/// Names an execution group by its position in the system's configured
/// ordering.
///
/// Group ordering is established exactly once by
/// [`UpdateSystem::set_execution_groups`](crate::system::UpdateSystem::set_execution_groups)
/// and never changes afterwards, so an ordinal is a stable identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub(crate) u32);

impl GroupId {
    /// Creates a group id from a configured ordinal.
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the configured ordinal.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupId({})", self.0)
    }
}
