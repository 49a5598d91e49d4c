// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pushbridge Proxy — the JSON-facing facade hybrid app runtimes call into.
// Each capability proxy decodes its arguments, checks that take off has
// completed, and forwards to the injected SDK. Native callbacks come back
// through the event coordinator and wait in the shared emitter until the
// host drains them.

pub mod analytics;
pub mod bridge;
pub mod channel;
pub mod contact;
pub mod coordinator;
pub mod handlers;
pub mod live_activity;
pub mod logging;
pub mod message_center;
pub mod preference_center;
pub mod privacy;
pub mod provider;
pub mod push;
pub mod resources;
pub mod store;

#[cfg(test)]
mod testing;

pub use bridge::PushBridge;
pub use coordinator::EventCoordinator;
pub use handlers::{DeepLinkHandler, Handlers, Override, PresentationHandler};
pub use provider::Provider;
pub use store::ProxyStore;
