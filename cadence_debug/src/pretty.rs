// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use cadence_core::trace::{
    DespawnEvent, DispatchEvent, PassBeginEvent, PassEndEvent, RegisterEvent, SpawnEvent,
    TraceSink, UnregisterEvent,
};
use cadence_core::update_type::UpdateType;

/// Writes human-readable trace lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

fn kind_name(kind: UpdateType) -> &'static str {
    match kind {
        UpdateType::None => "none",
        UpdateType::Normal => "normal",
        UpdateType::Fixed => "fixed",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:begin] frame={} {}",
            e.frame,
            kind_name(e.kind),
        );
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:end] frame={} {} dispatched={}",
            e.frame,
            kind_name(e.kind),
            e.dispatched,
        );
    }

    fn on_dispatch(&mut self, e: &DispatchEvent) {
        let _ = writeln!(
            self.writer,
            "[dispatch] frame={} {} group={} {:?}",
            e.frame,
            kind_name(e.kind),
            e.group.index(),
            e.participant,
        );
    }

    fn on_register(&mut self, e: &RegisterEvent) {
        let _ = writeln!(
            self.writer,
            "[register] {} group={} {:?}",
            kind_name(e.kind),
            e.group.index(),
            e.participant,
        );
    }

    fn on_unregister(&mut self, e: &UnregisterEvent) {
        let _ = writeln!(
            self.writer,
            "[unregister] {} group={} {:?}",
            kind_name(e.kind),
            e.group.index(),
            e.participant,
        );
    }

    fn on_spawn(&mut self, e: &SpawnEvent) {
        let _ = writeln!(
            self.writer,
            "[spawn] group={} {:?}",
            e.group.index(),
            e.participant,
        );
    }

    fn on_despawn(&mut self, e: &DespawnEvent) {
        let _ = writeln!(self.writer, "[despawn] {:?}", e.participant);
    }
}
