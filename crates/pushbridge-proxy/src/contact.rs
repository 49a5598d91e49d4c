// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contact proxy: named user identity plus contact-scoped edits.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use pushbridge_core::error::{ProxyError, Result};
use pushbridge_core::json::NamedEnum;
use pushbridge_core::operations::{
    AttributeOperation, DecodeOperation, ScopedSubscriptionListOperation, TagGroupOperation,
};
use pushbridge_sdk::{ContactCapability, apply_all};

use crate::provider::Provider;

pub struct ContactProxy {
    contact: Provider<Arc<dyn ContactCapability>>,
}

impl ContactProxy {
    pub fn new(contact: Provider<Arc<dyn ContactCapability>>) -> Self {
        Self { contact }
    }

    #[instrument(skip(self))]
    pub fn identify(&self, named_user_id: &str) -> Result<()> {
        let contact = self.contact.get()?;
        if named_user_id.trim().is_empty() {
            return Err(ProxyError::decode("namedUserId", Value::String(named_user_id.into())));
        }
        contact.identify(named_user_id);
        info!("contact identified");
        Ok(())
    }

    pub fn reset(&self) -> Result<()> {
        self.contact.get()?.reset();
        info!("contact reset");
        Ok(())
    }

    pub fn named_user_id(&self) -> Result<Option<String>> {
        Ok(self.contact.get()?.named_user_id())
    }

    #[instrument(skip_all)]
    pub fn edit_tag_groups(&self, operations: &Value) -> Result<()> {
        let contact = self.contact.get()?;
        let operations = TagGroupOperation::decode_batch(operations)?;
        let mut editor = contact.edit_tag_groups();
        apply_all(&operations, editor.as_mut());
        editor.apply()?;
        debug!(count = operations.len(), "contact tag groups edited");
        Ok(())
    }

    #[instrument(skip_all)]
    pub fn edit_attributes(&self, operations: &Value) -> Result<()> {
        let contact = self.contact.get()?;
        let operations = AttributeOperation::decode_batch(operations)?;
        let mut editor = contact.edit_attributes();
        apply_all(&operations, editor.as_mut());
        editor.apply()?;
        debug!(count = operations.len(), "contact attributes edited");
        Ok(())
    }

    #[instrument(skip_all)]
    pub fn edit_subscription_lists(&self, operations: &Value) -> Result<()> {
        let contact = self.contact.get()?;
        let operations = ScopedSubscriptionListOperation::decode_batch(operations)?;
        let mut editor = contact.edit_subscription_lists();
        apply_all(&operations, editor.as_mut());
        editor.apply()?;
        debug!(count = operations.len(), "contact subscription lists edited");
        Ok(())
    }

    /// `{"listId": ["app", "email"], ...}`
    pub async fn fetch_subscription_lists(&self) -> Result<Value> {
        let contact = self.contact.get()?;
        let lists = contact.fetch_subscription_lists().await?;
        let out: Map<String, Value> = lists
            .into_iter()
            .map(|(list_id, scopes)| {
                let names = scopes
                    .iter()
                    .map(|scope| Value::String(scope.name().to_owned()))
                    .collect();
                (list_id, Value::Array(names))
            })
            .collect();
        Ok(Value::Object(out))
    }
}
