// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the dispatch loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! dispatch-loop instrumentation calls at each stage. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional boxed sink owned by the system. When the
//! `trace` feature is **off**, every `Tracer` method compiles to nothing
//! (zero overhead). When **on**, each method performs a single `Option`
//! branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use alloc::boxed::Box;

use crate::participant::{GroupId, ParticipantId};
use crate::update_type::UpdateType;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Marks the beginning of an execution pass over one dispatch kind.
#[derive(Clone, Copy, Debug)]
pub struct PassBeginEvent {
    /// Monotonic frame counter.
    pub frame: u64,
    /// Which dispatch kind this pass runs.
    pub kind: UpdateType,
}

/// Marks the end of an execution pass.
#[derive(Clone, Copy, Debug)]
pub struct PassEndEvent {
    /// Frame counter.
    pub frame: u64,
    /// Which dispatch kind this pass ran.
    pub kind: UpdateType,
    /// Number of callbacks dispatched during the pass.
    pub dispatched: u64,
}

/// Emitted for each participant callback the pass invokes.
#[derive(Clone, Copy, Debug)]
pub struct DispatchEvent {
    /// Frame counter.
    pub frame: u64,
    /// Which dispatch kind is running.
    pub kind: UpdateType,
    /// The group the participant belongs to.
    pub group: GroupId,
    /// The participant being dispatched.
    pub participant: ParticipantId,
}

/// Emitted when a participant joins a membership list.
#[derive(Clone, Copy, Debug)]
pub struct RegisterEvent {
    /// Which list kind was joined.
    pub kind: UpdateType,
    /// The owning group.
    pub group: GroupId,
    /// The participant that joined.
    pub participant: ParticipantId,
}

/// Emitted when a participant leaves a membership list.
#[derive(Clone, Copy, Debug)]
pub struct UnregisterEvent {
    /// Which list kind was left.
    pub kind: UpdateType,
    /// The owning group.
    pub group: GroupId,
    /// The participant that left.
    pub participant: ParticipantId,
}

/// Emitted when a participant slot is allocated.
#[derive(Clone, Copy, Debug)]
pub struct SpawnEvent {
    /// The new participant.
    pub participant: ParticipantId,
    /// The group its configuration names.
    pub group: GroupId,
}

/// Emitted when a participant slot is freed.
#[derive(Clone, Copy, Debug)]
pub struct DespawnEvent {
    /// The freed participant.
    pub participant: ParticipantId,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the dispatch loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when an execution pass begins.
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        _ = e;
    }

    /// Called when an execution pass ends.
    fn on_pass_end(&mut self, e: &PassEndEvent) {
        _ = e;
    }

    /// Called for each dispatched participant callback.
    fn on_dispatch(&mut self, e: &DispatchEvent) {
        _ = e;
    }

    /// Called when a participant joins a membership list.
    fn on_register(&mut self, e: &RegisterEvent) {
        _ = e;
    }

    /// Called when a participant leaves a membership list.
    fn on_unregister(&mut self, e: &UnregisterEvent) {
        _ = e;
    }

    /// Called when a participant slot is allocated.
    fn on_spawn(&mut self, e: &SpawnEvent) {
        _ = e;
    }

    /// Called when a participant slot is freed.
    fn on_despawn(&mut self, e: &DespawnEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// Forwarding impl so a sink can be shared with the system while the caller
/// keeps a handle for reading results back out.
impl<S: TraceSink> TraceSink for alloc::rc::Rc<core::cell::RefCell<S>> {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.borrow_mut().on_pass_begin(e);
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        self.borrow_mut().on_pass_end(e);
    }

    fn on_dispatch(&mut self, e: &DispatchEvent) {
        self.borrow_mut().on_dispatch(e);
    }

    fn on_register(&mut self, e: &RegisterEvent) {
        self.borrow_mut().on_register(e);
    }

    fn on_unregister(&mut self, e: &UnregisterEvent) {
        self.borrow_mut().on_unregister(e);
    }

    fn on_spawn(&mut self, e: &SpawnEvent) {
        self.borrow_mut().on_spawn(e);
    }

    fn on_despawn(&mut self, e: &DespawnEvent) {
        self.borrow_mut().on_despawn(e);
    }
}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional owned [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Replaces the sink.
    #[cfg(feature = "trace")]
    pub fn set_sink(&mut self, sink: Option<Box<dyn TraceSink>>) {
        self.sink = sink;
    }

    /// Emits a [`PassBeginEvent`].
    #[inline]
    pub fn pass_begin(&mut self, e: &PassBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PassEndEvent`].
    #[inline]
    pub fn pass_end(&mut self, e: &PassEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DispatchEvent`].
    #[inline]
    pub fn dispatch(&mut self, e: &DispatchEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_dispatch(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RegisterEvent`].
    #[inline]
    pub fn register(&mut self, e: &RegisterEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_register(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`UnregisterEvent`].
    #[inline]
    pub fn unregister(&mut self, e: &UnregisterEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_unregister(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SpawnEvent`].
    #[inline]
    pub fn spawn(&mut self, e: &SpawnEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_spawn(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DespawnEvent`].
    #[inline]
    pub fn despawn(&mut self, e: &DespawnEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_despawn(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
