// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raw value objects handed to the proxy by the native SDK.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

/// A delivered or displayed push as the platform reports it.
///
/// `extras` is the full platform bundle / user info, internal keys included.
/// Reducing it to a bridge-safe body is the event model's job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PushMessage {
    pub title: Option<String>,
    pub alert: Option<String>,
    pub summary: Option<String>,
    pub notification_id: Option<String>,
    pub extras: Map<String, Value>,
}

/// The action button a user tapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    pub id: String,
    /// Whether the action brings the app to the foreground.
    pub is_foreground: bool,
}

/// A user interaction with a notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationResponse {
    pub message: PushMessage,
    /// `None` for the default tap on the notification body.
    pub action: Option<NotificationAction>,
}

impl NotificationResponse {
    /// The default tap always opens the app.
    pub fn is_foreground(&self) -> bool {
        self.action.as_ref().is_none_or(|a| a.is_foreground)
    }

    pub fn action_id(&self) -> Option<&str> {
        self.action.as_ref().map(|a| a.id.as_str())
    }
}

/// A message center inbox message.
#[derive(Debug, Clone, PartialEq)]
pub struct InboxMessage {
    pub id: String,
    pub title: String,
    pub sent_date: DateTime<Utc>,
    pub expiration: Option<DateTime<Utc>>,
    pub is_read: bool,
    pub list_icon: Option<String>,
    pub extras: BTreeMap<String, String>,
}

impl InboxMessage {
    /// Bridge encoding. Dates are epoch milliseconds.
    pub fn to_json(&self) -> Value {
        let mut out = json!({
            "id": self.id,
            "title": self.title,
            "sentDate": self.sent_date.timestamp_millis(),
            "isRead": self.is_read,
            "extras": self.extras,
        });
        if let Value::Object(map) = &mut out {
            if let Some(expiration) = &self.expiration {
                map.insert("expirationDate".into(), json!(expiration.timestamp_millis()));
            }
            if let Some(icon) = &self.list_icon {
                map.insert("listIconUrl".into(), json!(icon));
            }
        }
        out
    }
}
