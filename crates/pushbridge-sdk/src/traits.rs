// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic capability interfaces for the native push SDK.
//
// The vendored SDK is consumed through narrow traits, one per capability.
// Editors batch mutations and only write when `apply` is called.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use pushbridge_core::analytics::CustomEvent;
use pushbridge_core::config::{Environment, ProxyConfig};
use pushbridge_core::error::Result;
use pushbridge_core::live_activity::{
    DismissalPolicy, LiveActivityContent, LiveActivityInfo, LiveUpdateInfo,
};
use pushbridge_core::types::{
    AuthorizedSetting, FeatureSet, InboxCounts, NotificationStatus, SubscriptionScope,
};

use crate::messages::{InboxMessage, PushMessage};

/// Unified SDK handle that groups all native capabilities.
///
/// Capability accessors do not check readiness; the proxy layer gates every
/// call on `is_flying`.
pub trait Sdk: Send + Sync {
    /// One-time initialisation with resolved credentials.
    fn take_off(&self, config: &ProxyConfig, environment: &Environment) -> Result<()>;

    /// Whether take off has completed.
    fn is_flying(&self) -> bool;

    fn channel(&self) -> Arc<dyn ChannelCapability>;
    fn push(&self) -> Arc<dyn PushCapability>;
    fn contact(&self) -> Arc<dyn ContactCapability>;
    fn message_center(&self) -> Arc<dyn MessageCenterCapability>;
    fn preference_center(&self) -> Arc<dyn PreferenceCenterCapability>;
    fn analytics(&self) -> Arc<dyn AnalyticsCapability>;
    fn privacy(&self) -> Arc<dyn PrivacyCapability>;

    /// iOS only. Other platforms return `PlatformUnavailable`.
    fn live_activities(&self) -> Result<Arc<dyn LiveActivityCapability>>;

    /// Android only. Other platforms return `PlatformUnavailable`.
    fn live_updates(&self) -> Result<Arc<dyn LiveUpdateCapability>>;
}

// ---------------------------------------------------------------------------
// Editors
// ---------------------------------------------------------------------------

/// Device tag mutations.
pub trait TagEditor: Send {
    fn add_tags(&mut self, tags: &BTreeSet<String>);
    fn remove_tags(&mut self, tags: &BTreeSet<String>);
    /// Commit every queued mutation in one write.
    fn apply(self: Box<Self>) -> Result<()>;
}

/// Tag group mutations.
pub trait TagGroupEditor: Send {
    fn add_tags(&mut self, group: &str, tags: &BTreeSet<String>);
    fn remove_tags(&mut self, group: &str, tags: &BTreeSet<String>);
    fn set_tags(&mut self, group: &str, tags: &BTreeSet<String>);
    fn apply(self: Box<Self>) -> Result<()>;
}

/// Attribute mutations.
pub trait AttributeEditor: Send {
    fn set_string(&mut self, key: &str, value: &str);
    fn set_double(&mut self, key: &str, value: f64);
    fn set_date(&mut self, key: &str, value: DateTime<Utc>);
    fn remove(&mut self, key: &str);
    fn apply(self: Box<Self>) -> Result<()>;
}

/// Channel subscription list mutations.
pub trait SubscriptionListEditor: Send {
    fn subscribe(&mut self, list_id: &str);
    fn unsubscribe(&mut self, list_id: &str);
    fn apply(self: Box<Self>) -> Result<()>;
}

/// Contact subscription list mutations, qualified by scope.
pub trait ScopedSubscriptionListEditor: Send {
    fn subscribe(&mut self, list_id: &str, scope: SubscriptionScope);
    fn unsubscribe(&mut self, list_id: &str, scope: SubscriptionScope);
    fn apply(self: Box<Self>) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// The device channel.
#[async_trait]
pub trait ChannelCapability: Send + Sync {
    fn channel_id(&self) -> Option<String>;

    /// Resolves once the channel has an identifier. Dropping the future
    /// abandons the wait.
    async fn wait_for_channel_id(&self) -> Result<String>;

    fn tags(&self) -> BTreeSet<String>;
    fn edit_tags(&self) -> Box<dyn TagEditor>;
    fn edit_tag_groups(&self) -> Box<dyn TagGroupEditor>;
    fn edit_attributes(&self) -> Box<dyn AttributeEditor>;
    fn edit_subscription_lists(&self) -> Box<dyn SubscriptionListEditor>;

    async fn fetch_subscription_lists(&self) -> Result<BTreeSet<String>>;

    /// Lift the channel creation delay configured at take off.
    fn enable_channel_creation(&self);
}

/// Push registration and notification permission.
#[async_trait]
pub trait PushCapability: Send + Sync {
    fn set_user_notifications_enabled(&self, enabled: bool);
    fn is_user_notifications_enabled(&self) -> bool;

    /// Enable user notifications, prompting for permission if needed.
    /// Resolves to whether notifications ended up allowed.
    async fn enable_user_notifications(&self) -> Result<bool>;

    fn push_token(&self) -> Option<String>;
    fn notification_status(&self) -> NotificationStatus;

    /// iOS only; empty elsewhere.
    fn authorized_settings(&self) -> Vec<AuthorizedSetting>;

    fn active_notifications(&self) -> Result<Vec<PushMessage>>;
    fn clear_notifications(&self);
    fn clear_notification(&self, identifier: &str) -> Result<()>;
}

/// The named user / contact.
#[async_trait]
pub trait ContactCapability: Send + Sync {
    fn identify(&self, named_user_id: &str);
    fn reset(&self);
    fn named_user_id(&self) -> Option<String>;

    fn edit_tag_groups(&self) -> Box<dyn TagGroupEditor>;
    fn edit_attributes(&self) -> Box<dyn AttributeEditor>;
    fn edit_subscription_lists(&self) -> Box<dyn ScopedSubscriptionListEditor>;

    async fn fetch_subscription_lists(&self) -> Result<BTreeMap<String, Vec<SubscriptionScope>>>;
}

/// The message center inbox.
#[async_trait]
pub trait MessageCenterCapability: Send + Sync {
    fn messages(&self) -> Vec<InboxMessage>;

    /// Unread and total counts read in one snapshot.
    fn counts(&self) -> InboxCounts;

    fn mark_read(&self, message_ids: &[String]);
    fn delete(&self, message_ids: &[String]);

    fn display(&self, message_id: Option<&str>);
    fn dismiss(&self);

    async fn refresh(&self) -> Result<()>;
}

/// Preference centers.
#[async_trait]
pub trait PreferenceCenterCapability: Send + Sync {
    fn display(&self, preference_center_id: &str);

    /// Config JSON for the given id, `None` if it does not exist.
    async fn config(&self, preference_center_id: &str) -> Result<Option<Value>>;
}

/// Analytics submission.
pub trait AnalyticsCapability: Send + Sync {
    fn add_custom_event(&self, event: &CustomEvent) -> Result<()>;
    fn track_screen(&self, screen: Option<&str>);
    fn set_associated_identifier(&self, key: &str, identifier: Option<&str>);
}

/// Privacy manager feature flags.
pub trait PrivacyCapability: Send + Sync {
    fn enabled_features(&self) -> FeatureSet;
    fn set_enabled_features(&self, features: FeatureSet);

    fn enable_features(&self, features: FeatureSet) {
        self.set_enabled_features(self.enabled_features().union(features));
    }

    fn disable_features(&self, features: FeatureSet) {
        self.set_enabled_features(self.enabled_features().difference(features));
    }

    fn is_enabled(&self, features: FeatureSet) -> bool {
        self.enabled_features().contains(features)
    }
}

/// iOS live activities.
#[async_trait]
pub trait LiveActivityCapability: Send + Sync {
    async fn list(&self, attributes_type: &str) -> Result<Vec<LiveActivityInfo>>;

    async fn start(
        &self,
        attributes_type: &str,
        attributes: &Map<String, Value>,
        content: &LiveActivityContent,
    ) -> Result<LiveActivityInfo>;

    async fn update(&self, activity_id: &str, content: &LiveActivityContent) -> Result<()>;

    async fn end(
        &self,
        activity_id: &str,
        content: Option<&LiveActivityContent>,
        dismissal_policy: Option<&DismissalPolicy>,
    ) -> Result<()>;
}

/// Android live updates.
pub trait LiveUpdateCapability: Send + Sync {
    fn list(&self, update_type: &str) -> Result<Vec<LiveUpdateInfo>>;
    fn list_all(&self) -> Result<Vec<LiveUpdateInfo>>;

    fn start(
        &self,
        name: &str,
        update_type: &str,
        content: &Map<String, Value>,
        timestamp: Option<DateTime<Utc>>,
        dismissal_timestamp: Option<DateTime<Utc>>,
    ) -> Result<()>;

    fn update(
        &self,
        name: &str,
        content: &Map<String, Value>,
        timestamp: Option<DateTime<Utc>>,
        dismissal_timestamp: Option<DateTime<Utc>>,
    ) -> Result<()>;

    fn end(
        &self,
        name: &str,
        content: Option<&Map<String, Value>>,
        timestamp: Option<DateTime<Utc>>,
        dismissal_timestamp: Option<DateTime<Utc>>,
    ) -> Result<()>;

    fn clear_all(&self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Platform resources
// ---------------------------------------------------------------------------

/// Kind of packaged resource looked up by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Drawable,
    Mipmap,
    Color,
}

/// Opaque platform resource identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceHandle(pub u32);

/// Looks up a packaged resource by name.
pub trait ResourceResolver: Send + Sync {
    fn resolve(&self, name: &str, kind: ResourceKind) -> Option<ResourceHandle>;
}
