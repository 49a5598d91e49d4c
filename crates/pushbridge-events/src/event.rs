// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Event kinds and the event value itself.

use serde_json::{Map, Value, json};

use pushbridge_core::error::Result;
use pushbridge_core::json::{NamedEnum, decode_list};
use pushbridge_core::ProxyError;

/// Every kind of event the bridge can deliver. The set is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    ChannelCreated,
    DeepLinkReceived,
    DisplayMessageCenter,
    DisplayPreferenceCenter,
    MessageCenterUpdated,
    PushTokenReceived,
    ForegroundNotificationResponseReceived,
    BackgroundNotificationResponseReceived,
    PushReceived,
    NotificationStatusChanged,
    AuthorizedNotificationSettingsChanged,
    OverridePresentationOptions,
    PendingEmbeddedUpdated,
    LiveActivitiesUpdated,
}

impl NamedEnum for EventType {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("CHANNEL_CREATED", Self::ChannelCreated),
        ("DEEP_LINK_RECEIVED", Self::DeepLinkReceived),
        ("DISPLAY_MESSAGE_CENTER", Self::DisplayMessageCenter),
        ("DISPLAY_PREFERENCE_CENTER", Self::DisplayPreferenceCenter),
        ("MESSAGE_CENTER_UPDATED", Self::MessageCenterUpdated),
        ("PUSH_TOKEN_RECEIVED", Self::PushTokenReceived),
        (
            "FOREGROUND_NOTIFICATION_RESPONSE_RECEIVED",
            Self::ForegroundNotificationResponseReceived,
        ),
        (
            "BACKGROUND_NOTIFICATION_RESPONSE_RECEIVED",
            Self::BackgroundNotificationResponseReceived,
        ),
        ("PUSH_RECEIVED", Self::PushReceived),
        ("NOTIFICATION_STATUS_CHANGED", Self::NotificationStatusChanged),
        (
            "AUTHORIZED_NOTIFICATION_SETTINGS_CHANGED",
            Self::AuthorizedNotificationSettingsChanged,
        ),
        ("OVERRIDE_PRESENTATION_OPTIONS", Self::OverridePresentationOptions),
        ("PENDING_EMBEDDED_UPDATED", Self::PendingEmbeddedUpdated),
        ("LIVE_ACTIVITIES_UPDATED", Self::LiveActivitiesUpdated),
    ];
}

impl EventType {
    pub const ALL: [Self; 14] = [
        Self::ChannelCreated,
        Self::DeepLinkReceived,
        Self::DisplayMessageCenter,
        Self::DisplayPreferenceCenter,
        Self::MessageCenterUpdated,
        Self::PushTokenReceived,
        Self::ForegroundNotificationResponseReceived,
        Self::BackgroundNotificationResponseReceived,
        Self::PushReceived,
        Self::NotificationStatusChanged,
        Self::AuthorizedNotificationSettingsChanged,
        Self::OverridePresentationOptions,
        Self::PendingEmbeddedUpdated,
        Self::LiveActivitiesUpdated,
    ];

    /// Whether a new event of this type supersedes undelivered ones.
    ///
    /// Snapshot-style events only matter at their latest value; discrete
    /// occurrences must all be delivered.
    pub fn replaces_pending(self) -> bool {
        matches!(
            self,
            Self::PushTokenReceived
                | Self::AuthorizedNotificationSettingsChanged
                | Self::MessageCenterUpdated
                | Self::PendingEmbeddedUpdated
                | Self::LiveActivitiesUpdated
        )
    }

    /// Decode a JSON array of type names, as sent by the host when draining.
    pub fn list_from_json(value: &Value) -> Result<Vec<Self>> {
        decode_list(value, "eventTypes", |item| {
            let name = item
                .as_str()
                .ok_or_else(|| ProxyError::decode("eventTypes", item))?;
            Self::from_name("event type", name)
        })
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single event: its kind plus a JSON object body. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    event_type: EventType,
    body: Map<String, Value>,
}

impl Event {
    pub fn new(event_type: EventType, body: Map<String, Value>) -> Self {
        Self { event_type, body }
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    /// `{"type": "PUSH_RECEIVED", "body": {...}}`
    pub fn to_json(&self) -> Value {
        json!({
            "type": self.event_type.name(),
            "body": self.body,
        })
    }
}
