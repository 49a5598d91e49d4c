// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preference center proxy.

use std::sync::Arc;

use serde_json::Value;

use pushbridge_core::error::{ProxyError, Result};
use pushbridge_sdk::PreferenceCenterCapability;

use crate::provider::Provider;
use crate::store::ProxyStore;

pub struct PreferenceCenterProxy {
    preference_center: Provider<Arc<dyn PreferenceCenterCapability>>,
    store: Arc<ProxyStore>,
}

impl PreferenceCenterProxy {
    pub fn new(
        preference_center: Provider<Arc<dyn PreferenceCenterCapability>>,
        store: Arc<ProxyStore>,
    ) -> Self {
        Self {
            preference_center,
            store,
        }
    }

    pub fn display(&self, preference_center_id: &str) -> Result<()> {
        self.preference_center.get()?.display(preference_center_id);
        Ok(())
    }

    /// Remote config for `preference_center_id`; `NotFound` when the SDK
    /// has none.
    pub async fn config(&self, preference_center_id: &str) -> Result<Value> {
        let preference_center = self.preference_center.get()?;
        preference_center
            .config(preference_center_id)
            .await?
            .ok_or_else(|| ProxyError::not_found("preference center", preference_center_id))
    }

    pub fn set_auto_launch(&self, preference_center_id: &str, enabled: bool) -> Result<()> {
        self.store
            .set_auto_launch_preference_center(preference_center_id, enabled)
    }

    pub fn auto_launch(&self, preference_center_id: &str) -> Result<bool> {
        self.store.auto_launch_preference_center(preference_center_id)
    }
}
