// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The participant contract.

use crate::system::UpdateContext;

/// A schedulable unit.
///
/// Host code implements this for anything that wants managed callbacks. Both
/// methods default to no-ops, so a participant that only cares about one kind
/// implements only that one.
///
/// Callbacks receive an [`UpdateContext`] granting full access to the owning
/// system, including the participant's own id. Mutating membership from
/// inside a callback is explicitly supported: a participant may deactivate,
/// toggle its kind flags, or despawn itself (and siblings) mid-pass without
/// corrupting the walk.
pub trait Behaviour {
    /// Called once per Normal pass while registered for Normal updates.
    fn managed_update(&mut self, cx: &mut UpdateContext<'_>) {
        let _ = cx;
    }

    /// Called once per Fixed pass while registered for Fixed updates.
    fn managed_fixed_update(&mut self, cx: &mut UpdateContext<'_>) {
        let _ = cx;
    }
}
