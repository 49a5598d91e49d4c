// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Message center proxy: inbox listing, read state, deletion, display.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use pushbridge_core::error::{ProxyError, Result};
use pushbridge_core::types::InboxCounts;
use pushbridge_sdk::{InboxMessage, MessageCenterCapability};

use crate::provider::Provider;
use crate::store::ProxyStore;

pub struct MessageCenterProxy {
    message_center: Provider<Arc<dyn MessageCenterCapability>>,
    store: Arc<ProxyStore>,
}

impl MessageCenterProxy {
    pub fn new(
        message_center: Provider<Arc<dyn MessageCenterCapability>>,
        store: Arc<ProxyStore>,
    ) -> Self {
        Self {
            message_center,
            store,
        }
    }

    pub fn messages(&self) -> Result<Vec<Value>> {
        let messages = self.message_center.get()?.messages();
        Ok(messages.iter().map(InboxMessage::to_json).collect())
    }

    pub fn message(&self, message_id: &str) -> Result<Value> {
        let message_center = self.message_center.get()?;
        find(message_center.as_ref(), message_id).map(|m| m.to_json())
    }

    /// Unread and total counts from one snapshot.
    pub fn counts(&self) -> Result<InboxCounts> {
        Ok(self.message_center.get()?.counts())
    }

    pub fn unread_count(&self) -> Result<u32> {
        Ok(self.counts()?.unread)
    }

    #[instrument(skip(self))]
    pub fn mark_message_read(&self, message_id: &str) -> Result<()> {
        let message_center = self.message_center.get()?;
        find(message_center.as_ref(), message_id)?;
        message_center.mark_read(&[message_id.to_owned()]);
        debug!("message marked read");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn delete_message(&self, message_id: &str) -> Result<()> {
        let message_center = self.message_center.get()?;
        find(message_center.as_ref(), message_id)?;
        message_center.delete(&[message_id.to_owned()]);
        info!("message deleted");
        Ok(())
    }

    /// Show the inbox, or a single message when `message_id` is set.
    pub fn display(&self, message_id: Option<&str>) -> Result<()> {
        self.message_center.get()?.display(message_id);
        Ok(())
    }

    pub fn dismiss(&self) -> Result<()> {
        self.message_center.get()?.dismiss();
        Ok(())
    }

    pub async fn refresh(&self) -> Result<()> {
        let message_center = self.message_center.get()?;
        message_center.refresh().await
    }

    /// Whether the SDK shows its own inbox UI on display requests. Local
    /// setting; usable before take off.
    pub fn set_auto_launch_default(&self, enabled: bool) -> Result<()> {
        self.store.set_auto_launch_message_center(enabled)
    }

    pub fn auto_launch_default(&self) -> Result<bool> {
        self.store.auto_launch_message_center()
    }
}

fn find(message_center: &dyn MessageCenterCapability, message_id: &str) -> Result<InboxMessage> {
    message_center
        .messages()
        .into_iter()
        .find(|m| m.id == message_id)
        .ok_or_else(|| ProxyError::not_found("message", message_id))
}
