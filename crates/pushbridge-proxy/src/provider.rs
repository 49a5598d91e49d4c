// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Readiness-gated access to SDK capabilities.
//
// Proxies are built before take off completes, so they never hold a
// capability directly. They hold a `Provider` instead, and every call goes
// through it. The readiness check runs on each `get()`; nothing is cached.

use std::sync::Arc;

use pushbridge_core::error::{ProxyError, Result};
use pushbridge_sdk::Sdk;

/// Deferred, readiness-checked accessor for a `T`.
pub struct Provider<T> {
    resolve: Arc<dyn Fn() -> Result<T> + Send + Sync>,
}

impl<T> Provider<T> {
    pub fn new(resolve: impl Fn() -> Result<T> + Send + Sync + 'static) -> Self {
        Self {
            resolve: Arc::new(resolve),
        }
    }

    /// Gate `project` on `sdk.is_flying()`.
    pub fn from_sdk<F>(sdk: Arc<dyn Sdk>, project: F) -> Self
    where
        F: Fn(&dyn Sdk) -> Result<T> + Send + Sync + 'static,
    {
        Self::new(move || {
            if !sdk.is_flying() {
                return Err(ProxyError::NotReady);
            }
            project(sdk.as_ref())
        })
    }

    /// Resolve now. Fails with `NotReady` until take off has completed.
    pub fn get(&self) -> Result<T> {
        (self.resolve)()
    }
}

impl<T> Clone for Provider<T> {
    fn clone(&self) -> Self {
        Self {
            resolve: Arc::clone(&self.resolve),
        }
    }
}
