// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Participants: handles, configuration, behaviour hooks, and storage.

mod behaviour;
mod config;
mod id;
mod store;

pub use behaviour::Behaviour;
pub use config::UpdateConfig;
pub use id::{GroupId, INVALID, ParticipantId};
pub use store::ParticipantStore;
