// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pushbridge — Core types, error definitions, configuration and the typed
// operation decoders shared across all crates.

pub mod analytics;
pub mod bridge_error;
pub mod config;
pub mod error;
pub mod json;
pub mod live_activity;
pub mod operations;
pub mod types;

pub use bridge_error::{BridgeError, to_bridge_error};
pub use config::ProxyConfig;
pub use error::{ProxyError, Result};
pub use json::{JsonObject, NamedEnum};
pub use types::*;
