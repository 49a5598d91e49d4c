// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pushbridge.

use thiserror::Error;

/// Boxed cause carried by [`ProxyError::OperationFailed`].
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Pushbridge operations.
#[derive(Debug, Error)]
pub enum ProxyError {
    // -- Readiness --
    #[error("take off has not completed")]
    NotReady,

    // -- Decoding --
    #[error("invalid or missing field `{field}`: {value}")]
    Decode { field: String, value: String },

    #[error("invalid {field}: {value}")]
    InvalidEnumValue { field: String, value: String },

    // -- Lookup --
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    // -- Collaborator SDK --
    #[error("{context} failed: {source}")]
    OperationFailed {
        context: String,
        #[source]
        source: BoxedCause,
    },

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Storage / persistence --
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProxyError {
    /// Malformed or missing field. `value` is the raw JSON (or `null`).
    pub fn decode(field: impl Into<String>, value: impl std::fmt::Display) -> Self {
        Self::Decode {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Name that is not part of the field's fixed name table.
    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidEnumValue {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Wrap a collaborator failure, keeping the original cause.
    pub fn operation_failed<E>(context: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxedCause>,
    {
        Self::OperationFailed {
            context: context.into(),
            source: source.into(),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ProxyError>;
