// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Live activity (iOS) and live update (Android) requests.
//
// Unlike attribute dates, every timestamp here travels as an ISO-8601
// string, both in requests and in the snapshots sent back to the host.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value, json};

use crate::error::{ProxyError, Result};
use crate::json::{JsonObject, NamedEnum};

/// Parse an ISO-8601 / RFC 3339 timestamp field.
pub fn parse_iso8601(field: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ProxyError::decode(field, Value::String(value.to_owned())))
}

/// Render a timestamp the way it was accepted.
pub fn format_iso8601(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn opt_date(obj: &JsonObject<'_>, key: &str) -> Result<Option<DateTime<Utc>>> {
    obj.opt_str(key)?.map(|s| parse_iso8601(key, s)).transpose()
}

fn require_map(obj: &JsonObject<'_>, key: &str) -> Result<Map<String, Value>> {
    Ok(obj.require_object(key)?.map().clone())
}

// ---------------------------------------------------------------------------
// iOS live activities
// ---------------------------------------------------------------------------

/// Content state pushed to a live activity.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveActivityContent {
    pub state: Map<String, Value>,
    pub relevance_date: Option<DateTime<Utc>>,
    pub stale_date: Option<DateTime<Utc>>,
}

impl LiveActivityContent {
    fn from_object(obj: JsonObject<'_>) -> Result<Self> {
        Ok(Self {
            state: require_map(&obj, "state")?,
            relevance_date: opt_date(&obj, "relevanceDate")?,
            stale_date: opt_date(&obj, "staleDate")?,
        })
    }

    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("state".into(), Value::Object(self.state.clone()));
        if let Some(date) = &self.relevance_date {
            out.insert("relevanceDate".into(), Value::String(format_iso8601(date)));
        }
        if let Some(date) = &self.stale_date {
            out.insert("staleDate".into(), Value::String(format_iso8601(date)));
        }
        Value::Object(out)
    }
}

/// When an ended activity leaves the lock screen.
#[derive(Debug, Clone, PartialEq)]
pub enum DismissalPolicy {
    Immediate,
    Default,
    After(DateTime<Utc>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DismissalKind {
    Immediate,
    Default,
    After,
}

impl NamedEnum for DismissalKind {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("immediate", Self::Immediate),
        ("default", Self::Default),
        ("after", Self::After),
    ];
}

impl DismissalPolicy {
    fn from_object(obj: JsonObject<'_>) -> Result<Self> {
        match obj.require_enum::<DismissalKind>("type")? {
            DismissalKind::Immediate => Ok(Self::Immediate),
            DismissalKind::Default => Ok(Self::Default),
            DismissalKind::After => Ok(Self::After(parse_iso8601(
                "date",
                obj.require_str("date")?,
            )?)),
        }
    }
}

/// `{attributesType}`: list the activities of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveActivityList {
    pub attributes_type: String,
}

impl LiveActivityList {
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = JsonObject::from_value(value, "listRequest")?;
        Ok(Self {
            attributes_type: obj.require_str("attributesType")?.to_owned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveActivityStart {
    pub attributes_type: String,
    pub attributes: Map<String, Value>,
    pub content: LiveActivityContent,
}

impl LiveActivityStart {
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = JsonObject::from_value(value, "startRequest")?;
        Ok(Self {
            attributes_type: obj.require_str("attributesType")?.to_owned(),
            attributes: require_map(&obj, "attributes")?,
            content: LiveActivityContent::from_object(obj.require_object("content")?)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveActivityUpdate {
    pub attributes_type: String,
    pub activity_id: String,
    pub content: LiveActivityContent,
}

impl LiveActivityUpdate {
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = JsonObject::from_value(value, "updateRequest")?;
        Ok(Self {
            attributes_type: obj.require_str("attributesType")?.to_owned(),
            activity_id: obj.require_str("activityId")?.to_owned(),
            content: LiveActivityContent::from_object(obj.require_object("content")?)?,
        })
    }
}

/// Ending an activity; without `content` the last state stays on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveActivityEnd {
    pub attributes_type: String,
    pub activity_id: String,
    pub content: Option<LiveActivityContent>,
    pub dismissal_policy: Option<DismissalPolicy>,
}

impl LiveActivityEnd {
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = JsonObject::from_value(value, "endRequest")?;
        Ok(Self {
            attributes_type: obj.require_str("attributesType")?.to_owned(),
            activity_id: obj.require_str("activityId")?.to_owned(),
            content: obj
                .opt_object("content")?
                .map(LiveActivityContent::from_object)
                .transpose()?,
            dismissal_policy: obj
                .opt_object("dismissalPolicy")?
                .map(DismissalPolicy::from_object)
                .transpose()?,
        })
    }
}

/// Snapshot of a running live activity.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveActivityInfo {
    pub id: String,
    pub attributes_type: String,
    pub attributes: Map<String, Value>,
    pub content: LiveActivityContent,
    pub state: String,
}

impl LiveActivityInfo {
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "attributesType": self.attributes_type,
            "attributes": self.attributes,
            "content": self.content.to_json(),
            "state": self.state,
        })
    }
}

// ---------------------------------------------------------------------------
// Android live updates
// ---------------------------------------------------------------------------

/// `{type}`: list the live updates of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveUpdateList {
    pub update_type: String,
}

impl LiveUpdateList {
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = JsonObject::from_value(value, "listRequest")?;
        Ok(Self {
            update_type: obj.require_str("type")?.to_owned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveUpdateStart {
    pub name: String,
    pub update_type: String,
    pub content: Map<String, Value>,
    pub timestamp: Option<DateTime<Utc>>,
    pub dismissal_timestamp: Option<DateTime<Utc>>,
}

impl LiveUpdateStart {
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = JsonObject::from_value(value, "startRequest")?;
        Ok(Self {
            name: obj.require_str("name")?.to_owned(),
            update_type: obj.require_str("type")?.to_owned(),
            content: require_map(&obj, "content")?,
            timestamp: opt_date(&obj, "timestamp")?,
            dismissal_timestamp: opt_date(&obj, "dismissalTimestamp")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveUpdateUpdate {
    pub name: String,
    pub content: Map<String, Value>,
    pub timestamp: Option<DateTime<Utc>>,
    pub dismissal_timestamp: Option<DateTime<Utc>>,
}

impl LiveUpdateUpdate {
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = JsonObject::from_value(value, "updateRequest")?;
        Ok(Self {
            name: obj.require_str("name")?.to_owned(),
            content: require_map(&obj, "content")?,
            timestamp: opt_date(&obj, "timestamp")?,
            dismissal_timestamp: opt_date(&obj, "dismissalTimestamp")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveUpdateEnd {
    pub name: String,
    pub content: Option<Map<String, Value>>,
    pub timestamp: Option<DateTime<Utc>>,
    pub dismissal_timestamp: Option<DateTime<Utc>>,
}

impl LiveUpdateEnd {
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = JsonObject::from_value(value, "endRequest")?;
        Ok(Self {
            name: obj.require_str("name")?.to_owned(),
            content: obj.opt_object("content")?.map(|c| c.map().clone()),
            timestamp: opt_date(&obj, "timestamp")?,
            dismissal_timestamp: opt_date(&obj, "dismissalTimestamp")?,
        })
    }
}

/// Snapshot of a running live update.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveUpdateInfo {
    pub name: String,
    pub update_type: String,
    pub content: Map<String, Value>,
    pub last_content_update: DateTime<Utc>,
    pub last_state_change: DateTime<Utc>,
    pub dismissal_date: Option<DateTime<Utc>>,
}

impl LiveUpdateInfo {
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("name".into(), Value::String(self.name.clone()));
        out.insert("type".into(), Value::String(self.update_type.clone()));
        out.insert("content".into(), Value::Object(self.content.clone()));
        out.insert(
            "lastContentUpdateTimestamp".into(),
            Value::String(format_iso8601(&self.last_content_update)),
        );
        out.insert(
            "lastStateChangeTimestamp".into(),
            Value::String(format_iso8601(&self.last_state_change)),
        );
        if let Some(date) = &self.dismissal_date {
            out.insert("dismissalTimestamp".into(), Value::String(format_iso8601(date)));
        }
        Value::Object(out)
    }
}
