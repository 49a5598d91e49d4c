// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Push proxy: user notification opt-in, token, permission status,
// delivered notifications and foreground presentation.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use pushbridge_core::error::Result;
use pushbridge_core::types::{AuthorizedSetting, NotificationStatus, PresentationOptions};
use pushbridge_events::model::notification_map;
use pushbridge_sdk::PushCapability;

use crate::provider::Provider;
use crate::store::ProxyStore;

pub struct PushProxy {
    push: Provider<Arc<dyn PushCapability>>,
    store: Arc<ProxyStore>,
}

impl PushProxy {
    pub fn new(push: Provider<Arc<dyn PushCapability>>, store: Arc<ProxyStore>) -> Self {
        Self { push, store }
    }

    pub fn set_user_notifications_enabled(&self, enabled: bool) -> Result<()> {
        self.push.get()?.set_user_notifications_enabled(enabled);
        info!(enabled, "user notifications toggled");
        Ok(())
    }

    pub fn is_user_notifications_enabled(&self) -> Result<bool> {
        Ok(self.push.get()?.is_user_notifications_enabled())
    }

    /// Enable user notifications, prompting if the OS has not been asked
    /// yet. Resolves to whether notifications are now allowed.
    pub async fn enable_user_notifications(&self) -> Result<bool> {
        let push = self.push.get()?;
        let allowed = push.enable_user_notifications().await?;
        info!(allowed, "user notifications enabled");
        Ok(allowed)
    }

    pub fn push_token(&self) -> Result<Option<String>> {
        Ok(self.push.get()?.push_token())
    }

    /// Fresh snapshot; never served from cache.
    pub fn notification_status(&self) -> Result<NotificationStatus> {
        Ok(self.push.get()?.notification_status())
    }

    pub fn authorized_settings(&self) -> Result<Vec<AuthorizedSetting>> {
        Ok(self.push.get()?.authorized_settings())
    }

    /// Notifications currently in the tray, as notification maps.
    pub fn active_notifications(&self) -> Result<Vec<Value>> {
        let messages = self.push.get()?.active_notifications()?;
        Ok(messages
            .iter()
            .map(|m| Value::Object(notification_map(m)))
            .collect())
    }

    pub fn clear_notifications(&self) -> Result<()> {
        self.push.get()?.clear_notifications();
        Ok(())
    }

    pub fn clear_notification(&self, identifier: &str) -> Result<()> {
        self.push.get()?.clear_notification(identifier)
    }

    /// Persist the default foreground presentation from a list of option
    /// names.
    #[instrument(skip_all)]
    pub fn set_foreground_presentation_options(&self, options: &Value) -> Result<()> {
        self.push.get()?;
        let options = PresentationOptions::from_names(options)?;
        self.store.set_foreground_presentation_options(options)?;
        debug!(options = ?options.names(), "foreground presentation stored");
        Ok(())
    }

    /// Stored default foreground presentation; empty when never set.
    pub fn foreground_presentation_options(&self) -> Result<PresentationOptions> {
        self.push.get()?;
        Ok(self
            .store
            .foreground_presentation_options()?
            .unwrap_or_default())
    }
}
