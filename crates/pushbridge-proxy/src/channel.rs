// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Channel proxy: device channel id, tags, attributes, subscription lists.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use pushbridge_core::error::Result;
use pushbridge_core::operations::{
    AttributeOperation, DecodeOperation, SubscriptionListOperation, TagGroupOperation,
    TagOperation,
};
use pushbridge_sdk::{ChannelCapability, apply_all};

use crate::provider::Provider;

pub struct ChannelProxy {
    channel: Provider<Arc<dyn ChannelCapability>>,
}

impl ChannelProxy {
    pub fn new(channel: Provider<Arc<dyn ChannelCapability>>) -> Self {
        Self { channel }
    }

    pub fn channel_id(&self) -> Result<Option<String>> {
        Ok(self.channel.get()?.channel_id())
    }

    /// Resolves once the channel is created. Dropping the returned future
    /// cancels the wait.
    pub async fn wait_for_channel_id(&self) -> Result<String> {
        let channel = self.channel.get()?;
        channel.wait_for_channel_id().await
    }

    pub fn tags(&self) -> Result<Vec<String>> {
        Ok(self.channel.get()?.tags().into_iter().collect())
    }

    /// Apply a batch of `TagOperation`s as one commit.
    #[instrument(skip_all)]
    pub fn edit_tags(&self, operations: &Value) -> Result<()> {
        let channel = self.channel.get()?;
        let operations = TagOperation::decode_batch(operations)?;
        let mut editor = channel.edit_tags();
        apply_all(&operations, editor.as_mut());
        editor.apply()?;
        debug!(count = operations.len(), "channel tags edited");
        Ok(())
    }

    #[instrument(skip_all)]
    pub fn edit_tag_groups(&self, operations: &Value) -> Result<()> {
        let channel = self.channel.get()?;
        let operations = TagGroupOperation::decode_batch(operations)?;
        let mut editor = channel.edit_tag_groups();
        apply_all(&operations, editor.as_mut());
        editor.apply()?;
        debug!(count = operations.len(), "channel tag groups edited");
        Ok(())
    }

    #[instrument(skip_all)]
    pub fn edit_attributes(&self, operations: &Value) -> Result<()> {
        let channel = self.channel.get()?;
        let operations = AttributeOperation::decode_batch(operations)?;
        let mut editor = channel.edit_attributes();
        apply_all(&operations, editor.as_mut());
        editor.apply()?;
        debug!(count = operations.len(), "channel attributes edited");
        Ok(())
    }

    #[instrument(skip_all)]
    pub fn edit_subscription_lists(&self, operations: &Value) -> Result<()> {
        let channel = self.channel.get()?;
        let operations = SubscriptionListOperation::decode_batch(operations)?;
        let mut editor = channel.edit_subscription_lists();
        apply_all(&operations, editor.as_mut());
        editor.apply()?;
        debug!(count = operations.len(), "channel subscription lists edited");
        Ok(())
    }

    pub async fn fetch_subscription_lists(&self) -> Result<Vec<String>> {
        let channel = self.channel.get()?;
        Ok(channel.fetch_subscription_lists().await?.into_iter().collect())
    }

    pub fn enable_channel_creation(&self) -> Result<()> {
        self.channel.get()?.enable_channel_creation();
        Ok(())
    }
}
