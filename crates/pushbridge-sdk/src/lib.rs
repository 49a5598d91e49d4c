// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pushbridge SDK — the capability interfaces the native push/messaging SDK
// is consumed through, the raw value objects it hands back, and the applier
// that turns typed operations into editor mutations.
//
// Nothing in this crate talks to a platform directly: the host app injects
// an `Sdk` implementation that wraps the vendored Android or iOS SDK.

pub mod apply;
pub mod messages;
pub mod traits;

pub use apply::{ApplyTo, apply_all};
pub use messages::{InboxMessage, NotificationAction, NotificationResponse, PushMessage};
pub use traits::*;
