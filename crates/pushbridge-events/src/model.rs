// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Event constructors.
//
// Each constructor reduces native SDK objects to the documented JSON body.
// Platform objects never cross the bridge as-is.

use serde_json::{Map, Value, json};

use pushbridge_core::json::NamedEnum;
use pushbridge_core::live_activity::LiveActivityInfo;
use pushbridge_core::types::{AuthorizedSetting, InboxCounts, NotificationStatus};
use pushbridge_sdk::messages::{NotificationResponse, PushMessage};

use crate::event::{Event, EventType};

/// Platform keys that are internal to the OS or the SDK and never reach
/// the host.
pub const RESERVED_EXTRAS: [&str; 2] = ["android.support.content.wakelockid", "aps"];

/// Normalised notification map shared by push and response events.
///
/// `extras` copies every platform key except the reserved ones, with
/// non-string values rendered as strings.
pub fn notification_map(message: &PushMessage) -> Map<String, Value> {
    let extras: Map<String, Value> = message
        .extras
        .iter()
        .filter(|(key, _)| !RESERVED_EXTRAS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), Value::String(stringify(value))))
        .collect();

    let mut map = Map::new();
    insert_opt(&mut map, "title", message.title.as_deref());
    insert_opt(&mut map, "alert", message.alert.as_deref());
    insert_opt(&mut map, "summary", message.summary.as_deref());
    insert_opt(&mut map, "notificationId", message.notification_id.as_deref());
    map.insert("extras".into(), Value::Object(extras));
    map
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn insert_opt(map: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        map.insert(key.to_owned(), Value::String(value.to_owned()));
    }
}

fn body(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub fn channel_created(channel_id: &str) -> Event {
    Event::new(
        EventType::ChannelCreated,
        body(json!({ "channelId": channel_id })),
    )
}

pub fn deep_link_received(deep_link: &str) -> Event {
    Event::new(
        EventType::DeepLinkReceived,
        body(json!({ "deepLink": deep_link })),
    )
}

/// `message_id` is `None` when the whole inbox should be shown.
pub fn display_message_center(message_id: Option<&str>) -> Event {
    let mut map = Map::new();
    insert_opt(&mut map, "messageId", message_id);
    Event::new(EventType::DisplayMessageCenter, map)
}

pub fn display_preference_center(preference_center_id: &str) -> Event {
    Event::new(
        EventType::DisplayPreferenceCenter,
        body(json!({ "preferenceCenterId": preference_center_id })),
    )
}

/// Both counts come from one snapshot.
pub fn message_center_updated(counts: InboxCounts) -> Event {
    Event::new(
        EventType::MessageCenterUpdated,
        body(json!({
            "messageUnreadCount": counts.unread,
            "messageCount": counts.total,
        })),
    )
}

pub fn push_token_received(push_token: &str) -> Event {
    Event::new(
        EventType::PushTokenReceived,
        body(json!({ "pushToken": push_token })),
    )
}

/// Foreground or background depending on the tapped action. The default
/// tap counts as foreground.
pub fn notification_response(response: &NotificationResponse) -> Event {
    let is_foreground = response.is_foreground();
    let event_type = if is_foreground {
        EventType::ForegroundNotificationResponseReceived
    } else {
        EventType::BackgroundNotificationResponseReceived
    };

    let mut map = Map::new();
    map.insert(
        "pushPayload".into(),
        Value::Object(notification_map(&response.message)),
    );
    insert_opt(&mut map, "actionId", response.action_id());
    map.insert("isForeground".into(), Value::Bool(is_foreground));
    Event::new(event_type, map)
}

pub fn push_received(message: &PushMessage) -> Event {
    let mut map = Map::new();
    map.insert("pushPayload".into(), Value::Object(notification_map(message)));
    Event::new(EventType::PushReceived, map)
}

pub fn notification_status_changed(status: &NotificationStatus) -> Event {
    let mut map = Map::new();
    map.insert("status".into(), status.to_json());
    Event::new(EventType::NotificationStatusChanged, map)
}

pub fn authorized_settings_changed(settings: &[AuthorizedSetting]) -> Event {
    let names: Vec<&str> = settings.iter().map(|s| s.name()).collect();
    Event::new(
        EventType::AuthorizedNotificationSettingsChanged,
        body(json!({ "authorizedSettings": names })),
    )
}

/// Asks the host to decide foreground presentation for `message`. The host
/// answers by `request_id`.
pub fn override_presentation_options(message: &PushMessage, request_id: &str) -> Event {
    let mut map = Map::new();
    map.insert("pushPayload".into(), Value::Object(notification_map(message)));
    map.insert("requestId".into(), Value::String(request_id.to_owned()));
    Event::new(EventType::OverridePresentationOptions, map)
}

pub fn pending_embedded_updated(embedded_ids: &[String]) -> Event {
    let pending: Vec<Value> = embedded_ids
        .iter()
        .map(|id| json!({ "embeddedId": id }))
        .collect();
    Event::new(
        EventType::PendingEmbeddedUpdated,
        body(json!({ "pending": pending })),
    )
}

pub fn live_activities_updated(activities: &[LiveActivityInfo]) -> Event {
    let activities: Vec<Value> = activities.iter().map(LiveActivityInfo::to_json).collect();
    Event::new(
        EventType::LiveActivitiesUpdated,
        body(json!({ "activities": activities })),
    )
}
