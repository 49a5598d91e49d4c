// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory SDK double used by the proxy tests. Every capability records
// what it was asked to do; editors record one entry per commit.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tokio::sync::watch;

use pushbridge_core::analytics::CustomEvent;
use pushbridge_core::config::{Environment, ProxyConfig};
use pushbridge_core::error::{ProxyError, Result};
use pushbridge_core::live_activity::{
    DismissalPolicy, LiveActivityContent, LiveActivityInfo, LiveUpdateInfo,
};
use pushbridge_core::types::{
    AuthorizedSetting, FeatureSet, InboxCounts, NotificationStatus, PermissionStatus,
    SubscriptionScope,
};
use pushbridge_sdk::*;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap()
}

pub(crate) type Commits = Arc<Mutex<Vec<Vec<String>>>>;

/// Queues every mutation and records them as one commit on `apply`.
pub(crate) struct RecordingEditor {
    queued: Vec<String>,
    commits: Commits,
}

impl RecordingEditor {
    fn boxed(commits: &Commits) -> Box<Self> {
        Box::new(Self {
            queued: Vec::new(),
            commits: Arc::clone(commits),
        })
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let this = *self;
        lock(&this.commits).push(this.queued);
        Ok(())
    }
}

impl TagEditor for RecordingEditor {
    fn add_tags(&mut self, tags: &BTreeSet<String>) {
        self.queued.push(format!("add_tags {tags:?}"));
    }
    fn remove_tags(&mut self, tags: &BTreeSet<String>) {
        self.queued.push(format!("remove_tags {tags:?}"));
    }
    fn apply(self: Box<Self>) -> Result<()> {
        self.commit()
    }
}

impl TagGroupEditor for RecordingEditor {
    fn add_tags(&mut self, group: &str, tags: &BTreeSet<String>) {
        self.queued.push(format!("add_group_tags {group} {tags:?}"));
    }
    fn remove_tags(&mut self, group: &str, tags: &BTreeSet<String>) {
        self.queued.push(format!("remove_group_tags {group} {tags:?}"));
    }
    fn set_tags(&mut self, group: &str, tags: &BTreeSet<String>) {
        self.queued.push(format!("set_group_tags {group} {tags:?}"));
    }
    fn apply(self: Box<Self>) -> Result<()> {
        self.commit()
    }
}

impl AttributeEditor for RecordingEditor {
    fn set_string(&mut self, key: &str, value: &str) {
        self.queued.push(format!("set_string {key} {value}"));
    }
    fn set_double(&mut self, key: &str, value: f64) {
        self.queued.push(format!("set_double {key} {value}"));
    }
    fn set_date(&mut self, key: &str, value: DateTime<Utc>) {
        self.queued
            .push(format!("set_date {key} {}", value.timestamp_millis()));
    }
    fn remove(&mut self, key: &str) {
        self.queued.push(format!("remove {key}"));
    }
    fn apply(self: Box<Self>) -> Result<()> {
        self.commit()
    }
}

impl SubscriptionListEditor for RecordingEditor {
    fn subscribe(&mut self, list_id: &str) {
        self.queued.push(format!("subscribe {list_id}"));
    }
    fn unsubscribe(&mut self, list_id: &str) {
        self.queued.push(format!("unsubscribe {list_id}"));
    }
    fn apply(self: Box<Self>) -> Result<()> {
        self.commit()
    }
}

impl ScopedSubscriptionListEditor for RecordingEditor {
    fn subscribe(&mut self, list_id: &str, scope: SubscriptionScope) {
        self.queued.push(format!("subscribe {list_id} {scope:?}"));
    }
    fn unsubscribe(&mut self, list_id: &str, scope: SubscriptionScope) {
        self.queued.push(format!("unsubscribe {list_id} {scope:?}"));
    }
    fn apply(self: Box<Self>) -> Result<()> {
        self.commit()
    }
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

pub(crate) struct FakeChannel {
    pub id: watch::Sender<Option<String>>,
    pub tags: Mutex<BTreeSet<String>>,
    pub subscription_lists: Mutex<BTreeSet<String>>,
    pub commits: Commits,
    pub creation_enabled: AtomicBool,
}

impl Default for FakeChannel {
    fn default() -> Self {
        Self {
            id: watch::Sender::new(None),
            tags: Mutex::default(),
            subscription_lists: Mutex::default(),
            commits: Commits::default(),
            creation_enabled: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl ChannelCapability for FakeChannel {
    fn channel_id(&self) -> Option<String> {
        self.id.borrow().clone()
    }

    async fn wait_for_channel_id(&self) -> Result<String> {
        let mut rx = self.id.subscribe();
        let id = rx
            .wait_for(Option::is_some)
            .await
            .map_err(|e| ProxyError::operation_failed("channel id", e))?;
        Ok(id.clone().unwrap_or_default())
    }

    fn tags(&self) -> BTreeSet<String> {
        lock(&self.tags).clone()
    }

    fn edit_tags(&self) -> Box<dyn TagEditor> {
        RecordingEditor::boxed(&self.commits)
    }

    fn edit_tag_groups(&self) -> Box<dyn TagGroupEditor> {
        RecordingEditor::boxed(&self.commits)
    }

    fn edit_attributes(&self) -> Box<dyn AttributeEditor> {
        RecordingEditor::boxed(&self.commits)
    }

    fn edit_subscription_lists(&self) -> Box<dyn SubscriptionListEditor> {
        RecordingEditor::boxed(&self.commits)
    }

    async fn fetch_subscription_lists(&self) -> Result<BTreeSet<String>> {
        Ok(lock(&self.subscription_lists).clone())
    }

    fn enable_channel_creation(&self) {
        self.creation_enabled.store(true, Ordering::SeqCst);
    }
}

pub(crate) struct FakePush {
    pub user_notifications_enabled: AtomicBool,
    pub prompt_allows: AtomicBool,
    pub token: Mutex<Option<String>>,
    pub status: Mutex<NotificationStatus>,
    pub authorized: Mutex<Vec<AuthorizedSetting>>,
    pub active: Mutex<Vec<PushMessage>>,
    pub cleared: Mutex<Vec<String>>,
}

impl Default for FakePush {
    fn default() -> Self {
        Self {
            user_notifications_enabled: AtomicBool::new(false),
            prompt_allows: AtomicBool::new(true),
            token: Mutex::default(),
            status: Mutex::new(status(false)),
            authorized: Mutex::default(),
            active: Mutex::default(),
            cleared: Mutex::default(),
        }
    }
}

/// A status snapshot with every flag following `enabled`.
pub(crate) fn status(enabled: bool) -> NotificationStatus {
    NotificationStatus {
        is_user_notifications_enabled: enabled,
        are_notifications_allowed: enabled,
        is_push_privacy_feature_enabled: true,
        is_push_token_registered: enabled,
        is_opted_in: enabled,
        is_user_opted_in: enabled,
        notification_permission_status: if enabled {
            PermissionStatus::Granted
        } else {
            PermissionStatus::NotDetermined
        },
    }
}

#[async_trait]
impl PushCapability for FakePush {
    fn set_user_notifications_enabled(&self, enabled: bool) {
        self.user_notifications_enabled
            .store(enabled, Ordering::SeqCst);
    }

    fn is_user_notifications_enabled(&self) -> bool {
        self.user_notifications_enabled.load(Ordering::SeqCst)
    }

    async fn enable_user_notifications(&self) -> Result<bool> {
        self.user_notifications_enabled.store(true, Ordering::SeqCst);
        Ok(self.prompt_allows.load(Ordering::SeqCst))
    }

    fn push_token(&self) -> Option<String> {
        lock(&self.token).clone()
    }

    fn notification_status(&self) -> NotificationStatus {
        *lock(&self.status)
    }

    fn authorized_settings(&self) -> Vec<AuthorizedSetting> {
        lock(&self.authorized).clone()
    }

    fn active_notifications(&self) -> Result<Vec<PushMessage>> {
        Ok(lock(&self.active).clone())
    }

    fn clear_notifications(&self) {
        lock(&self.active).clear();
        lock(&self.cleared).push("*".into());
    }

    fn clear_notification(&self, identifier: &str) -> Result<()> {
        lock(&self.cleared).push(identifier.to_owned());
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeContact {
    pub named_user: Mutex<Option<String>>,
    pub subscription_lists: Mutex<BTreeMap<String, Vec<SubscriptionScope>>>,
    pub commits: Commits,
}

#[async_trait]
impl ContactCapability for FakeContact {
    fn identify(&self, named_user_id: &str) {
        *lock(&self.named_user) = Some(named_user_id.to_owned());
    }

    fn reset(&self) {
        *lock(&self.named_user) = None;
    }

    fn named_user_id(&self) -> Option<String> {
        lock(&self.named_user).clone()
    }

    fn edit_tag_groups(&self) -> Box<dyn TagGroupEditor> {
        RecordingEditor::boxed(&self.commits)
    }

    fn edit_attributes(&self) -> Box<dyn AttributeEditor> {
        RecordingEditor::boxed(&self.commits)
    }

    fn edit_subscription_lists(&self) -> Box<dyn ScopedSubscriptionListEditor> {
        RecordingEditor::boxed(&self.commits)
    }

    async fn fetch_subscription_lists(&self) -> Result<BTreeMap<String, Vec<SubscriptionScope>>> {
        Ok(lock(&self.subscription_lists).clone())
    }
}

#[derive(Default)]
pub(crate) struct FakeMessageCenter {
    pub messages: Mutex<Vec<InboxMessage>>,
    pub calls: Mutex<Vec<String>>,
    pub refreshes: AtomicUsize,
}

#[async_trait]
impl MessageCenterCapability for FakeMessageCenter {
    fn messages(&self) -> Vec<InboxMessage> {
        lock(&self.messages).clone()
    }

    fn counts(&self) -> InboxCounts {
        let messages = lock(&self.messages);
        InboxCounts {
            unread: messages.iter().filter(|m| !m.is_read).count() as u32,
            total: messages.len() as u32,
        }
    }

    fn mark_read(&self, message_ids: &[String]) {
        for message in lock(&self.messages).iter_mut() {
            if message_ids.contains(&message.id) {
                message.is_read = true;
            }
        }
    }

    fn delete(&self, message_ids: &[String]) {
        lock(&self.messages).retain(|m| !message_ids.contains(&m.id));
    }

    fn display(&self, message_id: Option<&str>) {
        lock(&self.calls).push(format!("display {message_id:?}"));
    }

    fn dismiss(&self) {
        lock(&self.calls).push("dismiss".into());
    }

    async fn refresh(&self) -> Result<()> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakePreferenceCenter {
    pub configs: Mutex<HashMap<String, Value>>,
    pub displayed: Mutex<Vec<String>>,
}

#[async_trait]
impl PreferenceCenterCapability for FakePreferenceCenter {
    fn display(&self, preference_center_id: &str) {
        lock(&self.displayed).push(preference_center_id.to_owned());
    }

    async fn config(&self, preference_center_id: &str) -> Result<Option<Value>> {
        Ok(lock(&self.configs).get(preference_center_id).cloned())
    }
}

#[derive(Default)]
pub(crate) struct FakeAnalytics {
    pub events: Mutex<Vec<CustomEvent>>,
    pub screens: Mutex<Vec<Option<String>>>,
    pub identifiers: Mutex<BTreeMap<String, String>>,
}

impl AnalyticsCapability for FakeAnalytics {
    fn add_custom_event(&self, event: &CustomEvent) -> Result<()> {
        lock(&self.events).push(event.clone());
        Ok(())
    }

    fn track_screen(&self, screen: Option<&str>) {
        lock(&self.screens).push(screen.map(str::to_owned));
    }

    fn set_associated_identifier(&self, key: &str, identifier: Option<&str>) {
        let mut identifiers = lock(&self.identifiers);
        match identifier {
            Some(id) => identifiers.insert(key.to_owned(), id.to_owned()),
            None => identifiers.remove(key),
        };
    }
}

pub(crate) struct FakePrivacy {
    pub features: Mutex<FeatureSet>,
}

impl Default for FakePrivacy {
    fn default() -> Self {
        Self {
            features: Mutex::new(FeatureSet::all()),
        }
    }
}

impl PrivacyCapability for FakePrivacy {
    fn enabled_features(&self) -> FeatureSet {
        *lock(&self.features)
    }

    fn set_enabled_features(&self, features: FeatureSet) {
        *lock(&self.features) = features;
    }
}

#[derive(Default)]
pub(crate) struct FakeLiveActivities {
    pub activities: Mutex<Vec<LiveActivityInfo>>,
    pub next_id: AtomicUsize,
}

#[async_trait]
impl LiveActivityCapability for FakeLiveActivities {
    async fn list(&self, attributes_type: &str) -> Result<Vec<LiveActivityInfo>> {
        Ok(lock(&self.activities)
            .iter()
            .filter(|a| a.attributes_type == attributes_type)
            .cloned()
            .collect())
    }

    async fn start(
        &self,
        attributes_type: &str,
        attributes: &Map<String, Value>,
        content: &LiveActivityContent,
    ) -> Result<LiveActivityInfo> {
        let id = format!("activity-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let info = LiveActivityInfo {
            id,
            attributes_type: attributes_type.to_owned(),
            attributes: attributes.clone(),
            content: content.clone(),
            state: "active".into(),
        };
        lock(&self.activities).push(info.clone());
        Ok(info)
    }

    async fn update(&self, activity_id: &str, content: &LiveActivityContent) -> Result<()> {
        let mut activities = lock(&self.activities);
        let activity = activities
            .iter_mut()
            .find(|a| a.id == activity_id)
            .ok_or_else(|| ProxyError::not_found("live activity", activity_id))?;
        activity.content = content.clone();
        Ok(())
    }

    async fn end(
        &self,
        activity_id: &str,
        _content: Option<&LiveActivityContent>,
        _dismissal_policy: Option<&DismissalPolicy>,
    ) -> Result<()> {
        let mut activities = lock(&self.activities);
        let activity = activities
            .iter_mut()
            .find(|a| a.id == activity_id)
            .ok_or_else(|| ProxyError::not_found("live activity", activity_id))?;
        activity.state = "ended".into();
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeLiveUpdates {
    pub updates: Mutex<Vec<LiveUpdateInfo>>,
}

impl LiveUpdateCapability for FakeLiveUpdates {
    fn list(&self, update_type: &str) -> Result<Vec<LiveUpdateInfo>> {
        Ok(lock(&self.updates)
            .iter()
            .filter(|u| u.update_type == update_type)
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<LiveUpdateInfo>> {
        Ok(lock(&self.updates).clone())
    }

    fn start(
        &self,
        name: &str,
        update_type: &str,
        content: &Map<String, Value>,
        timestamp: Option<DateTime<Utc>>,
        dismissal_timestamp: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let now = timestamp.unwrap_or_else(Utc::now);
        lock(&self.updates).push(LiveUpdateInfo {
            name: name.to_owned(),
            update_type: update_type.to_owned(),
            content: content.clone(),
            last_content_update: now,
            last_state_change: now,
            dismissal_date: dismissal_timestamp,
        });
        Ok(())
    }

    fn update(
        &self,
        name: &str,
        content: &Map<String, Value>,
        timestamp: Option<DateTime<Utc>>,
        dismissal_timestamp: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let mut updates = lock(&self.updates);
        let update = updates
            .iter_mut()
            .find(|u| u.name == name)
            .ok_or_else(|| ProxyError::not_found("live update", name))?;
        update.content = content.clone();
        update.last_content_update = timestamp.unwrap_or_else(Utc::now);
        update.dismissal_date = dismissal_timestamp;
        Ok(())
    }

    fn end(
        &self,
        name: &str,
        _content: Option<&Map<String, Value>>,
        _timestamp: Option<DateTime<Utc>>,
        _dismissal_timestamp: Option<DateTime<Utc>>,
    ) -> Result<()> {
        lock(&self.updates).retain(|u| u.name != name);
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        lock(&self.updates).clear();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SDK
// ---------------------------------------------------------------------------

#[derive(Default)]
pub(crate) struct FakeSdk {
    pub flying: AtomicBool,
    pub take_offs: Mutex<Vec<String>>,
    pub channel: Arc<FakeChannel>,
    pub push: Arc<FakePush>,
    pub contact: Arc<FakeContact>,
    pub message_center: Arc<FakeMessageCenter>,
    pub preference_center: Arc<FakePreferenceCenter>,
    pub analytics: Arc<FakeAnalytics>,
    pub privacy: Arc<FakePrivacy>,
    pub live_activities: Arc<FakeLiveActivities>,
    pub live_updates: Arc<FakeLiveUpdates>,
}

impl FakeSdk {
    pub fn flying() -> Arc<Self> {
        let sdk = Self::default();
        sdk.flying.store(true, Ordering::SeqCst);
        Arc::new(sdk)
    }

    pub fn grounded() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl Sdk for FakeSdk {
    fn take_off(&self, config: &ProxyConfig, environment: &Environment) -> Result<()> {
        lock(&self.take_offs).push(environment.app_key.clone());
        self.privacy
            .set_enabled_features(config.enabled_feature_set());
        self.flying.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_flying(&self) -> bool {
        self.flying.load(Ordering::SeqCst)
    }

    fn channel(&self) -> Arc<dyn ChannelCapability> {
        self.channel.clone()
    }

    fn push(&self) -> Arc<dyn PushCapability> {
        self.push.clone()
    }

    fn contact(&self) -> Arc<dyn ContactCapability> {
        self.contact.clone()
    }

    fn message_center(&self) -> Arc<dyn MessageCenterCapability> {
        self.message_center.clone()
    }

    fn preference_center(&self) -> Arc<dyn PreferenceCenterCapability> {
        self.preference_center.clone()
    }

    fn analytics(&self) -> Arc<dyn AnalyticsCapability> {
        self.analytics.clone()
    }

    fn privacy(&self) -> Arc<dyn PrivacyCapability> {
        self.privacy.clone()
    }

    fn live_activities(&self) -> Result<Arc<dyn LiveActivityCapability>> {
        Ok(self.live_activities.clone())
    }

    fn live_updates(&self) -> Result<Arc<dyn LiveUpdateCapability>> {
        Ok(self.live_updates.clone())
    }
}

/// An inbox message with fixed dates.
pub(crate) fn inbox_message(id: &str, is_read: bool) -> InboxMessage {
    InboxMessage {
        id: id.to_owned(),
        title: format!("Message {id}"),
        sent_date: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
        expiration: None,
        is_read,
        list_icon: None,
        extras: BTreeMap::new(),
    }
}
