// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-synchronized update dispatch with ordered execution groups.
//!
//! `cadence_core` schedules per-frame callbacks for a dynamic population of
//! participants. It is `no_std` compatible (with `alloc`) and stores all
//! membership state in struct-of-arrays arrays addressed by generational
//! handles, so registration and removal are O(1) and traversal never chases
//! heap pointers.
//!
//! # Architecture
//!
//! The host drives a [`system::UpdateSystem`] once per frame and once per
//! fixed timestep; each call walks every execution group in configured
//! order:
//!
//! ```text
//!   host loop
//!       │ run_update() / run_fixed_update()
//!       ▼
//!   UpdateSystem ──► ExecutionGroup[0] ──► ExecutionGroup[1] ──► …
//!                         │ per dispatch kind
//!                         ▼
//!                   IntrusiveList walk ──► Behaviour callback
//!                         ▲                     │
//!                         └── membership mutation (safe mid-pass)
//! ```
//!
//! **[`system`]** — The [`UpdateSystem`](system::UpdateSystem) owning groups
//! and participants, the execution loop, and the
//! [`UpdateContext`](system::UpdateContext) handed to callbacks.
//!
//! **[`group`]** — Ordered [`ExecutionGroup`](group::ExecutionGroup) tiers,
//! each owning one membership list per dispatch kind.
//!
//! **[`participant`]** — The [`Behaviour`](participant::Behaviour) contract,
//! per-participant [`UpdateConfig`](participant::UpdateConfig), generational
//! [`ParticipantId`](participant::ParticipantId) handles, and the
//! struct-of-arrays [`ParticipantStore`](participant::ParticipantStore).
//!
//! **[`update_type`]** — The two dispatch kinds, Normal and Fixed.
//!
//! **[`error`]** — The [`ScheduleError`](error::ScheduleError) taxonomy for
//! contract violations and structural corruption.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! dispatch-loop instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod error;
pub mod group;
pub mod participant;
pub mod system;
pub mod trace;
pub mod update_type;

mod list;
mod validate;
