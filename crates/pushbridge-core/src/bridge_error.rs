// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Structured errors handed back across the bridge.
//
// Every rejected bridge call carries a stable machine-readable code, the
// human-readable message from `ProxyError`, and whether retrying the same
// call could plausibly succeed. Host runtimes switch on `code`.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ProxyError, Result};

/// A rejection as seen by the host runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgeError {
    pub code: &'static str,
    pub message: String,
    pub retriable: bool,
}

impl BridgeError {
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Map a `ProxyError` onto its bridge representation.
pub fn to_bridge_error(err: &ProxyError) -> BridgeError {
    let (code, retriable) = match err {
        // Take off may still be in flight.
        ProxyError::NotReady => ("NOT_READY", true),
        ProxyError::Decode { .. } => ("DECODE_ERROR", false),
        ProxyError::InvalidEnumValue { .. } => ("INVALID_VALUE", false),
        ProxyError::NotFound { .. } => ("NOT_FOUND", false),
        ProxyError::OperationFailed { .. } => ("OPERATION_FAILED", true),
        ProxyError::PlatformUnavailable => ("UNAVAILABLE", false),
        ProxyError::Storage(_) => ("STORAGE_ERROR", true),
        ProxyError::Serialization(_) => ("DECODE_ERROR", false),
    };

    BridgeError {
        code,
        message: err.to_string(),
        retriable,
    }
}

impl From<&ProxyError> for BridgeError {
    fn from(err: &ProxyError) -> Self {
        to_bridge_error(err)
    }
}
