// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Participants are recorded as raw slot index plus generation, since a
//! recording outlives the system the handles came from.

use cadence_core::trace::{
    DespawnEvent, DispatchEvent, PassBeginEvent, PassEndEvent, RegisterEvent, SpawnEvent,
    TraceSink, UnregisterEvent,
};
use cadence_core::update_type::UpdateType;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_PASS_BEGIN: u8 = 1;
const TAG_PASS_END: u8 = 2;
const TAG_DISPATCH: u8 = 3;
const TAG_REGISTER: u8 = 4;
const TAG_UNREGISTER: u8 = 5;
const TAG_SPAWN: u8 = 6;
const TAG_DESPAWN: u8 = 7;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_kind(&mut self, kind: UpdateType) {
        self.write_u8(match kind {
            UpdateType::None => 0,
            UpdateType::Normal => 1,
            UpdateType::Fixed => 2,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.write_u8(TAG_PASS_BEGIN);
        self.write_u64(e.frame);
        self.write_kind(e.kind);
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        self.write_u8(TAG_PASS_END);
        self.write_u64(e.frame);
        self.write_kind(e.kind);
        self.write_u64(e.dispatched);
    }

    fn on_dispatch(&mut self, e: &DispatchEvent) {
        self.write_u8(TAG_DISPATCH);
        self.write_u64(e.frame);
        self.write_kind(e.kind);
        self.write_u32(e.group.index());
        self.write_u32(e.participant.index());
        self.write_u32(e.participant.generation());
    }

    fn on_register(&mut self, e: &RegisterEvent) {
        self.write_u8(TAG_REGISTER);
        self.write_kind(e.kind);
        self.write_u32(e.group.index());
        self.write_u32(e.participant.index());
        self.write_u32(e.participant.generation());
    }

    fn on_unregister(&mut self, e: &UnregisterEvent) {
        self.write_u8(TAG_UNREGISTER);
        self.write_kind(e.kind);
        self.write_u32(e.group.index());
        self.write_u32(e.participant.index());
        self.write_u32(e.participant.generation());
    }

    fn on_spawn(&mut self, e: &SpawnEvent) {
        self.write_u8(TAG_SPAWN);
        self.write_u32(e.group.index());
        self.write_u32(e.participant.index());
        self.write_u32(e.participant.generation());
    }

    fn on_despawn(&mut self, e: &DespawnEvent) {
        self.write_u8(TAG_DESPAWN);
        self.write_u32(e.participant.index());
        self.write_u32(e.participant.generation());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A participant handle flattened to raw numbers for recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordedParticipant {
    /// Raw slot index.
    pub index: u32,
    /// Generation counter at the time of the event.
    pub generation: u32,
}

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// An execution pass began.
    PassBegin {
        /// Frame counter.
        frame: u64,
        /// Which dispatch kind.
        kind: UpdateType,
    },
    /// An execution pass ended.
    PassEnd {
        /// Frame counter.
        frame: u64,
        /// Which dispatch kind.
        kind: UpdateType,
        /// Callbacks dispatched during the pass.
        dispatched: u64,
    },
    /// A participant callback was dispatched.
    Dispatch {
        /// Frame counter.
        frame: u64,
        /// Which dispatch kind.
        kind: UpdateType,
        /// Group ordinal.
        group: u32,
        /// The dispatched participant.
        participant: RecordedParticipant,
    },
    /// A participant joined a membership list.
    Register {
        /// Which list kind.
        kind: UpdateType,
        /// Group ordinal.
        group: u32,
        /// The participant that joined.
        participant: RecordedParticipant,
    },
    /// A participant left a membership list.
    Unregister {
        /// Which list kind.
        kind: UpdateType,
        /// Group ordinal.
        group: u32,
        /// The participant that left.
        participant: RecordedParticipant,
    },
    /// A participant slot was allocated.
    Spawn {
        /// Group ordinal its configuration names.
        group: u32,
        /// The new participant.
        participant: RecordedParticipant,
    },
    /// A participant slot was freed.
    Despawn {
        /// The freed participant.
        participant: RecordedParticipant,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_kind(&mut self) -> Option<UpdateType> {
        Some(match self.read_u8()? {
            1 => UpdateType::Normal,
            2 => UpdateType::Fixed,
            _ => UpdateType::None,
        })
    }

    fn read_participant(&mut self) -> Option<RecordedParticipant> {
        Some(RecordedParticipant {
            index: self.read_u32()?,
            generation: self.read_u32()?,
        })
    }

    fn decode_pass_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassBegin {
            frame: self.read_u64()?,
            kind: self.read_kind()?,
        })
    }

    fn decode_pass_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassEnd {
            frame: self.read_u64()?,
            kind: self.read_kind()?,
            dispatched: self.read_u64()?,
        })
    }

    fn decode_dispatch(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Dispatch {
            frame: self.read_u64()?,
            kind: self.read_kind()?,
            group: self.read_u32()?,
            participant: self.read_participant()?,
        })
    }

    fn decode_register(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Register {
            kind: self.read_kind()?,
            group: self.read_u32()?,
            participant: self.read_participant()?,
        })
    }

    fn decode_unregister(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Unregister {
            kind: self.read_kind()?,
            group: self.read_u32()?,
            participant: self.read_participant()?,
        })
    }

    fn decode_spawn(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Spawn {
            group: self.read_u32()?,
            participant: self.read_participant()?,
        })
    }

    fn decode_despawn(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Despawn {
            participant: self.read_participant()?,
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_PASS_BEGIN => self.decode_pass_begin(),
            TAG_PASS_END => self.decode_pass_end(),
            TAG_DISPATCH => self.decode_dispatch(),
            TAG_REGISTER => self.decode_register(),
            TAG_UNREGISTER => self.decode_unregister(),
            TAG_SPAWN => self.decode_spawn(),
            TAG_DESPAWN => self.decode_despawn(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use cadence_core::group::ExecutionGroup;
    use cadence_core::participant::{Behaviour, GroupId, UpdateConfig};
    use cadence_core::system::UpdateSystem;

    use super::*;

    struct Inert;
    impl Behaviour for Inert {}

    #[test]
    fn round_trip_pass_events() {
        let mut rec = RecorderSink::new();
        rec.on_pass_begin(&PassBeginEvent {
            frame: 4,
            kind: UpdateType::Normal,
        });
        rec.on_pass_end(&PassEndEvent {
            frame: 4,
            kind: UpdateType::Normal,
            dispatched: 3,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(
            events,
            [
                RecordedEvent::PassBegin {
                    frame: 4,
                    kind: UpdateType::Normal,
                },
                RecordedEvent::PassEnd {
                    frame: 4,
                    kind: UpdateType::Normal,
                    dispatched: 3,
                },
            ]
        );
    }

    #[test]
    fn recorded_scenario_decodes_in_order() {
        // Drive the sink directly with the event sequence a one-participant
        // frame produces.
        let mut system = UpdateSystem::new();
        system
            .set_execution_groups(vec![ExecutionGroup::new()])
            .unwrap();
        let id = system.spawn(
            Box::new(Inert),
            UpdateConfig::new(GroupId::new(0), true, false),
        );

        let mut rec = RecorderSink::new();
        rec.on_spawn(&SpawnEvent {
            participant: id,
            group: GroupId::new(0),
        });
        rec.on_register(&RegisterEvent {
            kind: UpdateType::Normal,
            group: GroupId::new(0),
            participant: id,
        });
        rec.on_dispatch(&DispatchEvent {
            frame: 1,
            kind: UpdateType::Normal,
            group: GroupId::new(0),
            participant: id,
        });
        rec.on_despawn(&DespawnEvent { participant: id });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        let recorded = RecordedParticipant {
            index: id.index(),
            generation: id.generation(),
        };
        assert_eq!(
            events,
            [
                RecordedEvent::Spawn {
                    group: 0,
                    participant: recorded,
                },
                RecordedEvent::Register {
                    kind: UpdateType::Normal,
                    group: 0,
                    participant: recorded,
                },
                RecordedEvent::Dispatch {
                    frame: 1,
                    kind: UpdateType::Normal,
                    group: 0,
                    participant: recorded,
                },
                RecordedEvent::Despawn {
                    participant: recorded,
                },
            ]
        );
    }

    #[test]
    fn live_system_recording_decodes_in_order() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut system = UpdateSystem::new();
        system
            .set_execution_groups(vec![ExecutionGroup::new()])
            .unwrap();
        let rec = Rc::new(RefCell::new(RecorderSink::new()));
        system.set_trace_sink(Some(Box::new(rec.clone())));

        let id = system.spawn(
            Box::new(Inert),
            UpdateConfig::new(GroupId::new(0), true, false),
        );
        system.set_active(id, true);
        system.run_update();
        system.despawn(id);

        let bytes = rec.borrow().as_bytes().to_vec();
        let participant = RecordedParticipant {
            index: id.index(),
            generation: id.generation(),
        };
        let events: Vec<_> = decode(&bytes).collect();
        assert_eq!(
            events,
            [
                RecordedEvent::Spawn {
                    group: 0,
                    participant,
                },
                RecordedEvent::Register {
                    kind: UpdateType::Normal,
                    group: 0,
                    participant,
                },
                RecordedEvent::PassBegin {
                    frame: 1,
                    kind: UpdateType::Normal,
                },
                RecordedEvent::Dispatch {
                    frame: 1,
                    kind: UpdateType::Normal,
                    group: 0,
                    participant,
                },
                RecordedEvent::PassEnd {
                    frame: 1,
                    kind: UpdateType::Normal,
                    dispatched: 1,
                },
                RecordedEvent::Unregister {
                    kind: UpdateType::Normal,
                    group: 0,
                    participant,
                },
                RecordedEvent::Despawn { participant },
            ]
        );
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_pass_end(&PassEndEvent {
            frame: 9,
            kind: UpdateType::Fixed,
            dispatched: 2,
        });
        let bytes = rec.into_bytes();

        let events: Vec<_> = decode(&bytes[..bytes.len() - 1]).collect();
        assert!(events.is_empty());
    }
}
