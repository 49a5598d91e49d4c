// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pushbridge events: the closed set of bridge events, the constructors that
// reduce native SDK objects to event bodies, and the pending-event emitter
// the host runtime drains.

pub mod emitter;
pub mod event;
pub mod model;

pub use emitter::EventEmitter;
pub use event::{Event, EventType};
