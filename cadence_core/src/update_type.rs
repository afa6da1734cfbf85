// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two periodic dispatch kinds and their list-slot mapping.

use crate::error::ScheduleError;

/// Which managed callback a dispatch routine targets.
///
/// `None` is the unset/default value and is never dispatchable; routines that
/// accept an `UpdateType` reject it with
/// [`ScheduleError::InvalidUpdateType`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UpdateType {
    /// No update kind. Present so the invalid-dispatch contract violation is
    /// representable; never a valid dispatch target.
    #[default]
    None,
    /// The variable-rate per-frame callback.
    Normal,
    /// The fixed-timestep callback.
    Fixed,
}

/// Number of membership lists each execution group owns (one per
/// dispatchable kind).
pub(crate) const LIST_COUNT: usize = 2;

/// The dispatchable kinds, in list-slot order.
pub const DISPATCHED: [UpdateType; LIST_COUNT] = [UpdateType::Normal, UpdateType::Fixed];

impl UpdateType {
    /// Maps this kind to its membership-list slot.
    pub(crate) const fn list_slot(self) -> Result<usize, ScheduleError> {
        match self {
            Self::Normal => Ok(0),
            Self::Fixed => Ok(1),
            Self::None => Err(ScheduleError::InvalidUpdateType(self)),
        }
    }

    /// Inverse of [`list_slot`](Self::list_slot); used when reporting errors
    /// found while scanning a numbered list.
    pub(crate) const fn from_list_slot(slot: usize) -> Self {
        match slot {
            0 => Self::Normal,
            1 => Self::Fixed,
            _ => Self::None,
        }
    }
}
