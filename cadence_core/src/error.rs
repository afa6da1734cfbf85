// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The error taxonomy for scheduling-contract violations.
//!
//! Every variant here is a programming error, not a recoverable runtime
//! condition. Callers are expected to fail loudly (propagate or panic) rather
//! than attempt repair: the execution loop's safety argument depends on the
//! list invariants holding exactly, and continuing past a corrupted list
//! risks an unterminated walk.
//!
//! Ordinary "not currently registered" conditions are deliberately *not*
//! errors — add and remove are idempotent no-ops so host code never has to
//! know current membership state before calling them.

use thiserror::Error;

use crate::participant::ParticipantId;
use crate::update_type::UpdateType;

/// A scheduling-contract violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A dispatch routine was handed an update kind outside the dispatchable
    /// set.
    #[error("update type {0:?} cannot be dispatched")]
    InvalidUpdateType(UpdateType),

    /// A system whose execution groups were already configured was asked to
    /// configure them again. Group ordering is fixed for the system's whole
    /// lifetime once established, because participants capture group indices
    /// and rely on them staying valid.
    #[error("execution groups are already configured and cannot be replaced")]
    Reinitialization,

    /// A diagnostic scan found the same participant more than once in a
    /// single membership list. Indicates intrusive-link corruption.
    #[error("participant {participant:?} appears more than once in a {kind:?} list")]
    DuplicateReference {
        /// The participant that was found repeatedly.
        participant: ParticipantId,
        /// Which list kind contained the duplicate.
        kind: UpdateType,
    },

    /// A group operation was invoked for a participant whose configuration
    /// names a different group.
    #[error("participant {participant:?} is configured for group {expected}, not group {actual}")]
    GroupMismatch {
        /// The misrouted participant.
        participant: ParticipantId,
        /// The group index the participant's configuration names.
        expected: u32,
        /// The group index that actually received the operation.
        actual: u32,
    },

    /// An empty list still has a head reference.
    #[error("empty {kind:?} list in group {group} has a non-null head")]
    EmptyListWithHead {
        /// Index of the owning group.
        group: u32,
        /// Which list kind failed the check.
        kind: UpdateType,
    },

    /// A non-empty list has no head reference.
    #[error("non-empty {kind:?} list in group {group} has a null head")]
    MissingHead {
        /// Index of the owning group.
        group: u32,
        /// Which list kind failed the check.
        kind: UpdateType,
    },

    /// A member's neighbor links are asymmetric (`next.prev` or `prev.next`
    /// does not point back).
    #[error("{kind:?} list in group {group} has asymmetric links at slot {slot}")]
    BrokenLink {
        /// Index of the owning group.
        group: u32,
        /// Which list kind failed the check.
        kind: UpdateType,
        /// Raw slot index of the offending member.
        slot: u32,
    },

    /// Walking `count` links from the head did not arrive back at the head.
    #[error("{kind:?} list in group {group} does not close its cycle after {count} links")]
    CountMismatch {
        /// Index of the owning group.
        group: u32,
        /// Which list kind failed the check.
        kind: UpdateType,
        /// The member count the list claims.
        count: u32,
    },
}
