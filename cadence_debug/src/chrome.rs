// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes [Chrome Trace
//! Event Format][spec] JSON to the given writer.
//!
//! The dispatch loop carries no wall clock, so the frame counter stands in
//! for the timestamp axis: one microsecond per frame. Pass durations in the
//! viewer are therefore schematic, but nesting and ordering are exact.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::PassBegin { frame, kind } => {
                events.push(json!({
                    "ph": "B",
                    "name": format!("{kind:?}Pass"),
                    "cat": "Dispatch",
                    "ts": frame,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame": frame,
                    }
                }));
            }
            RecordedEvent::PassEnd {
                frame,
                kind,
                dispatched,
            } => {
                events.push(json!({
                    "ph": "E",
                    "name": format!("{kind:?}Pass"),
                    "cat": "Dispatch",
                    "ts": frame,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame": frame,
                        "dispatched": dispatched,
                    }
                }));
            }
            RecordedEvent::Dispatch {
                frame,
                kind,
                group,
                participant,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "Dispatch",
                    "cat": "Dispatch",
                    "ts": frame,
                    "pid": 0,
                    "tid": group,
                    "s": "t",
                    "args": {
                        "frame": frame,
                        "kind": format!("{kind:?}"),
                        "participant": participant.index,
                        "generation": participant.generation,
                    }
                }));
            }
            RecordedEvent::Register {
                kind,
                group,
                participant,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "Register",
                    "cat": "Membership",
                    "ts": 0,
                    "pid": 0,
                    "tid": group,
                    "s": "t",
                    "args": {
                        "kind": format!("{kind:?}"),
                        "participant": participant.index,
                    }
                }));
            }
            RecordedEvent::Unregister {
                kind,
                group,
                participant,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "Unregister",
                    "cat": "Membership",
                    "ts": 0,
                    "pid": 0,
                    "tid": group,
                    "s": "t",
                    "args": {
                        "kind": format!("{kind:?}"),
                        "participant": participant.index,
                    }
                }));
            }
            RecordedEvent::Spawn { group, participant } => {
                events.push(json!({
                    "ph": "i",
                    "name": "Spawn",
                    "cat": "Lifecycle",
                    "ts": 0,
                    "pid": 0,
                    "tid": group,
                    "s": "g",
                    "args": {
                        "participant": participant.index,
                        "generation": participant.generation,
                    }
                }));
            }
            RecordedEvent::Despawn { participant } => {
                events.push(json!({
                    "ph": "i",
                    "name": "Despawn",
                    "cat": "Lifecycle",
                    "ts": 0,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "participant": participant.index,
                        "generation": participant.generation,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}
