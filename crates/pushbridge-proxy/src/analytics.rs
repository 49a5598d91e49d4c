// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Analytics proxy: custom events, screen tracking, associated identifiers.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use pushbridge_core::analytics::CustomEvent;
use pushbridge_core::error::{ProxyError, Result};
use pushbridge_sdk::AnalyticsCapability;

use crate::provider::Provider;

pub struct AnalyticsProxy {
    analytics: Provider<Arc<dyn AnalyticsCapability>>,
}

impl AnalyticsProxy {
    pub fn new(analytics: Provider<Arc<dyn AnalyticsCapability>>) -> Self {
        Self { analytics }
    }

    #[instrument(skip_all)]
    pub fn add_custom_event(&self, event: &Value) -> Result<()> {
        let analytics = self.analytics.get()?;
        let event = CustomEvent::from_json(event)?;
        analytics.add_custom_event(&event)?;
        debug!(name = %event.name, "custom event added");
        Ok(())
    }

    /// `None` ends the current screen.
    pub fn track_screen(&self, screen: Option<&str>) -> Result<()> {
        self.analytics.get()?.track_screen(screen);
        Ok(())
    }

    /// Set, or with `None` remove, the identifier stored under `key`.
    pub fn set_associated_identifier(&self, key: &str, identifier: Option<&str>) -> Result<()> {
        let analytics = self.analytics.get()?;
        if key.trim().is_empty() {
            return Err(ProxyError::decode("key", Value::String(key.into())));
        }
        analytics.set_associated_identifier(key, identifier);
        Ok(())
    }
}
