// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed mutation operations decoded from bridge JSON.
//
// Each operation is a small immutable value: an action plus the fields that
// action needs. Operations arrive in batches (JSON arrays); a batch decodes
// all-or-nothing so that a single malformed element prevents any mutation.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{ProxyError, Result};
use crate::json::{JsonObject, NamedEnum, decode_list};
use crate::types::SubscriptionScope;

/// Decoding shared by every operation type.
pub trait DecodeOperation: Sized {
    /// Name used for the whole value in decode errors.
    const CONTEXT: &'static str;

    fn from_object(obj: JsonObject<'_>) -> Result<Self>;

    fn from_json(value: &Value) -> Result<Self> {
        Self::from_object(JsonObject::from_value(value, Self::CONTEXT)?)
    }

    /// Decode an array of operations. Fails on the first bad element.
    fn decode_batch(value: &Value) -> Result<Vec<Self>> {
        decode_list(value, Self::CONTEXT, Self::from_json)
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    Add,
    Remove,
}

impl NamedEnum for TagAction {
    const NAMES: &'static [(&'static str, Self)] = &[("add", Self::Add), ("remove", Self::Remove)];
}

/// Device tag edit: `{"operationType": "add", "tags": ["a", "b"]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOperation {
    pub action: TagAction,
    pub tags: BTreeSet<String>,
}

impl DecodeOperation for TagOperation {
    const CONTEXT: &'static str = "tagOperation";

    fn from_object(obj: JsonObject<'_>) -> Result<Self> {
        Ok(Self {
            action: obj.require_enum("operationType")?,
            tags: obj.require_string_list("tags")?.into_iter().collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tag groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagGroupAction {
    Add,
    Remove,
    Set,
}

impl NamedEnum for TagGroupAction {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("add", Self::Add),
        ("remove", Self::Remove),
        ("set", Self::Set),
    ];
}

/// Tag group edit: `{"operationType": "set", "group": "g", "tags": [..]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagGroupOperation {
    pub action: TagGroupAction,
    pub group: String,
    pub tags: BTreeSet<String>,
}

impl DecodeOperation for TagGroupOperation {
    const CONTEXT: &'static str = "tagGroupOperation";

    fn from_object(obj: JsonObject<'_>) -> Result<Self> {
        Ok(Self {
            action: obj.require_enum("operationType")?,
            group: obj.require_str("group")?.to_owned(),
            tags: obj.require_string_list("tags")?.into_iter().collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeAction {
    Set,
    Remove,
}

impl NamedEnum for AttributeAction {
    const NAMES: &'static [(&'static str, Self)] =
        &[("set", Self::Set), ("remove", Self::Remove)];
}

/// Declared representation of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Number,
    Date,
}

impl NamedEnum for AttributeType {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("string", Self::String),
        ("number", Self::Number),
        ("date", Self::Date),
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    Number(f64),
    /// Transmitted as epoch milliseconds.
    Date(DateTime<Utc>),
}

impl AttributeValue {
    /// Decode `raw` as the representation `kind` demands.
    pub fn decode(kind: AttributeType, raw: &Value) -> Result<Self> {
        match kind {
            AttributeType::String => raw
                .as_str()
                .map(|s| Self::String(s.to_owned()))
                .ok_or_else(|| ProxyError::decode("value", raw)),
            AttributeType::Number => raw
                .as_f64()
                .map(Self::Number)
                .ok_or_else(|| ProxyError::decode("value", raw)),
            AttributeType::Date => raw
                .as_f64()
                .filter(|ms| ms.is_finite())
                .and_then(|ms| DateTime::from_timestamp_millis(ms as i64))
                .map(Self::Date)
                .ok_or_else(|| ProxyError::decode("value", raw)),
        }
    }
}

/// Attribute edit: `{"action": "set", "key": "k", "value": 1.5, "type": "number"}`.
///
/// `Remove` carries no value; any `value`/`type` present is ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeOperation {
    Set { key: String, value: AttributeValue },
    Remove { key: String },
}

impl AttributeOperation {
    pub fn key(&self) -> &str {
        match self {
            Self::Set { key, .. } | Self::Remove { key } => key,
        }
    }
}

impl DecodeOperation for AttributeOperation {
    const CONTEXT: &'static str = "attributeOperation";

    fn from_object(obj: JsonObject<'_>) -> Result<Self> {
        let action: AttributeAction = obj.require_enum("action")?;
        let key = obj.require_str("key")?.to_owned();
        match action {
            AttributeAction::Remove => Ok(Self::Remove { key }),
            AttributeAction::Set => {
                let kind: AttributeType = obj.require_enum("type")?;
                let value = AttributeValue::decode(kind, obj.require("value")?)?;
                Ok(Self::Set { key, value })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Subscription lists
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionAction {
    Subscribe,
    Unsubscribe,
}

impl NamedEnum for SubscriptionAction {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("subscribe", Self::Subscribe),
        ("unsubscribe", Self::Unsubscribe),
    ];
}

/// Channel subscription list edit: `{"action": "subscribe", "listId": "l"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionListOperation {
    pub action: SubscriptionAction,
    pub list_id: String,
}

impl DecodeOperation for SubscriptionListOperation {
    const CONTEXT: &'static str = "subscriptionListOperation";

    fn from_object(obj: JsonObject<'_>) -> Result<Self> {
        Ok(Self {
            action: obj.require_enum("action")?,
            list_id: obj.require_str("listId")?.to_owned(),
        })
    }
}

/// Contact subscription list edit qualified by delivery scope:
/// `{"action": "unsubscribe", "listId": "l", "scope": "email"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedSubscriptionListOperation {
    pub action: SubscriptionAction,
    pub list_id: String,
    pub scope: SubscriptionScope,
}

impl DecodeOperation for ScopedSubscriptionListOperation {
    const CONTEXT: &'static str = "scopedSubscriptionListOperation";

    fn from_object(obj: JsonObject<'_>) -> Result<Self> {
        Ok(Self {
            action: obj.require_enum("action")?,
            list_id: obj.require_str("listId")?.to_owned(),
            scope: obj.require_enum("scope")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tag_operation_collapses_duplicates() {
        let op = TagOperation::from_json(&json!({
            "operationType": "ADD",
            "tags": ["a", "b", "a"]
        }))
        .unwrap();
        assert_eq!(op.action, TagAction::Add);
        assert_eq!(op.tags.len(), 2);
    }

    #[test]
    fn tag_operation_rejects_unknown_action() {
        let err = TagOperation::from_json(&json!({"tags": ["a"], "operationType": "bogus"}))
            .unwrap_err();
        assert!(matches!(err, ProxyError::InvalidEnumValue { .. }));
    }

    #[test]
    fn tag_operation_rejects_non_list_tags() {
        let err = TagOperation::from_json(&json!({"tags": "not-a-list", "operationType": "add"}))
            .unwrap_err();
        assert!(matches!(err, ProxyError::Decode { ref field, .. } if field == "tags"));
    }

    #[test]
    fn tag_group_requires_group() {
        let err = TagGroupOperation::from_json(&json!({"operationType": "set", "tags": []}))
            .unwrap_err();
        assert!(matches!(err, ProxyError::Decode { ref field, .. } if field == "group"));
    }

    #[test]
    fn number_attribute_decodes_as_double() {
        let op = AttributeOperation::from_json(&json!({
            "key": "k", "action": "set", "value": 10.4, "type": "number"
        }))
        .unwrap();
        assert_eq!(
            op,
            AttributeOperation::Set {
                key: "k".into(),
                value: AttributeValue::Number(10.4)
            }
        );
    }

    #[test]
    fn date_attribute_decodes_epoch_millis() {
        let op = AttributeOperation::from_json(&json!({
            "key": "birthday", "action": "set", "value": 1_700_000_000_123_i64, "type": "date"
        }))
        .unwrap();
        match op {
            AttributeOperation::Set { value: AttributeValue::Date(date), .. } => {
                assert_eq!(date.timestamp_millis(), 1_700_000_000_123);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn date_attribute_rejects_iso_string() {
        let err = AttributeOperation::from_json(&json!({
            "key": "birthday", "action": "set", "value": "2024-01-01T00:00:00Z", "type": "date"
        }))
        .unwrap_err();
        assert!(matches!(err, ProxyError::Decode { ref field, .. } if field == "value"));
    }

    #[test]
    fn set_attribute_requires_value_of_declared_type() {
        let missing = AttributeOperation::from_json(&json!({
            "key": "k", "action": "set", "type": "string"
        }));
        assert!(missing.is_err());

        let mismatched = AttributeOperation::from_json(&json!({
            "key": "k", "action": "set", "value": 3, "type": "string"
        }));
        assert!(mismatched.is_err());
    }

    #[test]
    fn remove_attribute_ignores_value() {
        let op = AttributeOperation::from_json(&json!({
            "key": "k", "action": "remove", "value": {"anything": true}, "type": "nonsense"
        }))
        .unwrap();
        assert_eq!(op, AttributeOperation::Remove { key: "k".into() });
    }

    #[test]
    fn batch_with_one_bad_element_fails() {
        let batch = json!([
            {"action": "subscribe", "listId": "weekly"},
            {"action": "subscribe"}
        ]);
        let err = SubscriptionListOperation::decode_batch(&batch).unwrap_err();
        assert!(matches!(err, ProxyError::Decode { ref field, .. } if field == "listId"));
    }

    #[test]
    fn scoped_operation_parses_scope() {
        let ops = ScopedSubscriptionListOperation::decode_batch(&json!([
            {"action": "unsubscribe", "listId": "news", "scope": "Email"}
        ]))
        .unwrap();
        assert_eq!(ops[0].scope, SubscriptionScope::Email);
        assert_eq!(ops[0].action, SubscriptionAction::Unsubscribe);
    }

    #[test]
    fn batch_must_be_an_array() {
        assert!(TagOperation::decode_batch(&json!({"operationType": "add"})).is_err());
    }
}
