// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Live activity (iOS) and live update (Android) proxies.
//
// Each platform only provides one of the two managers; the other resolves
// to `PlatformUnavailable` through its provider.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use pushbridge_core::error::{ProxyError, Result};
use pushbridge_core::live_activity::{
    LiveActivityEnd, LiveActivityInfo, LiveActivityList, LiveActivityStart, LiveActivityUpdate,
    LiveUpdateEnd, LiveUpdateInfo, LiveUpdateList, LiveUpdateStart, LiveUpdateUpdate,
};
use pushbridge_sdk::{LiveActivityCapability, LiveUpdateCapability};

use crate::provider::Provider;

pub struct LiveActivityProxy {
    manager: Provider<Arc<dyn LiveActivityCapability>>,
}

impl LiveActivityProxy {
    pub fn new(manager: Provider<Arc<dyn LiveActivityCapability>>) -> Self {
        Self { manager }
    }

    /// `{attributesType}` to the activities of that type.
    pub async fn list(&self, request: &Value) -> Result<Vec<Value>> {
        let manager = self.manager.get()?;
        let request = LiveActivityList::from_json(request)?;
        let activities = manager.list(&request.attributes_type).await?;
        Ok(activities.iter().map(LiveActivityInfo::to_json).collect())
    }

    #[instrument(skip_all)]
    pub async fn start(&self, request: &Value) -> Result<Value> {
        let manager = self.manager.get()?;
        let request = LiveActivityStart::from_json(request)?;
        let info = manager
            .start(&request.attributes_type, &request.attributes, &request.content)
            .await?;
        info!(id = %info.id, attributes_type = %request.attributes_type, "live activity started");
        Ok(info.to_json())
    }

    #[instrument(skip_all)]
    pub async fn update(&self, request: &Value) -> Result<()> {
        let manager = self.manager.get()?;
        let request = LiveActivityUpdate::from_json(request)?;
        ensure_known(manager.as_ref(), &request.attributes_type, &request.activity_id).await?;
        manager.update(&request.activity_id, &request.content).await?;
        debug!(id = %request.activity_id, "live activity updated");
        Ok(())
    }

    #[instrument(skip_all)]
    pub async fn end(&self, request: &Value) -> Result<()> {
        let manager = self.manager.get()?;
        let request = LiveActivityEnd::from_json(request)?;
        ensure_known(manager.as_ref(), &request.attributes_type, &request.activity_id).await?;
        manager
            .end(
                &request.activity_id,
                request.content.as_ref(),
                request.dismissal_policy.as_ref(),
            )
            .await?;
        info!(id = %request.activity_id, "live activity ended");
        Ok(())
    }
}

/// Activity ids are only meaningful within their attributes type.
async fn ensure_known(
    manager: &dyn LiveActivityCapability,
    attributes_type: &str,
    activity_id: &str,
) -> Result<()> {
    let known = manager
        .list(attributes_type)
        .await?
        .iter()
        .any(|a| a.id == activity_id);
    if known {
        Ok(())
    } else {
        Err(ProxyError::not_found("live activity", activity_id))
    }
}

pub struct LiveUpdateProxy {
    manager: Provider<Arc<dyn LiveUpdateCapability>>,
}

impl LiveUpdateProxy {
    pub fn new(manager: Provider<Arc<dyn LiveUpdateCapability>>) -> Self {
        Self { manager }
    }

    /// `{type}` to the live updates of that type.
    pub fn list(&self, request: &Value) -> Result<Vec<Value>> {
        let manager = self.manager.get()?;
        let request = LiveUpdateList::from_json(request)?;
        let updates = manager.list(&request.update_type)?;
        Ok(updates.iter().map(LiveUpdateInfo::to_json).collect())
    }

    pub fn list_all(&self) -> Result<Vec<Value>> {
        let updates = self.manager.get()?.list_all()?;
        Ok(updates.iter().map(LiveUpdateInfo::to_json).collect())
    }

    #[instrument(skip_all)]
    pub fn start(&self, request: &Value) -> Result<()> {
        let manager = self.manager.get()?;
        let request = LiveUpdateStart::from_json(request)?;
        manager.start(
            &request.name,
            &request.update_type,
            &request.content,
            request.timestamp,
            request.dismissal_timestamp,
        )?;
        info!(name = %request.name, update_type = %request.update_type, "live update started");
        Ok(())
    }

    #[instrument(skip_all)]
    pub fn update(&self, request: &Value) -> Result<()> {
        let manager = self.manager.get()?;
        let request = LiveUpdateUpdate::from_json(request)?;
        manager.update(
            &request.name,
            &request.content,
            request.timestamp,
            request.dismissal_timestamp,
        )?;
        debug!(name = %request.name, "live update updated");
        Ok(())
    }

    #[instrument(skip_all)]
    pub fn end(&self, request: &Value) -> Result<()> {
        let manager = self.manager.get()?;
        let request = LiveUpdateEnd::from_json(request)?;
        manager.end(
            &request.name,
            request.content.as_ref(),
            request.timestamp,
            request.dismissal_timestamp,
        )?;
        info!(name = %request.name, "live update ended");
        Ok(())
    }

    pub fn clear_all(&self) -> Result<()> {
        self.manager.get()?.clear_all()?;
        info!("live updates cleared");
        Ok(())
    }
}
