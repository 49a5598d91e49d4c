// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Field access helpers for loosely-typed bridge JSON.
//
// Every value crossing the bridge arrives as `serde_json::Value`. Required
// lookups fail with `ProxyError::Decode` naming the field and the raw value;
// optional lookups treat a missing key and an explicit `null` the same way.
// Enum-like fields are matched case-insensitively against a fixed name table.

use serde_json::{Map, Value};

use crate::error::{ProxyError, Result};

/// Borrowed view over a JSON object.
#[derive(Debug, Clone, Copy)]
pub struct JsonObject<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> JsonObject<'a> {
    /// Interpret `value` as an object. `context` names the value in errors.
    pub fn from_value(value: &'a Value, context: &str) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self { map }),
            other => Err(ProxyError::decode(context, other)),
        }
    }

    pub fn map(&self) -> &'a Map<String, Value> {
        self.map
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Value for `key`, `None` when absent or `null`.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    pub fn require(&self, key: &str) -> Result<&'a Value> {
        self.get(key).ok_or_else(|| ProxyError::decode(key, Value::Null))
    }

    pub fn require_str(&self, key: &str) -> Result<&'a str> {
        let value = self.require(key)?;
        value.as_str().ok_or_else(|| ProxyError::decode(key, value))
    }

    pub fn opt_str(&self, key: &str) -> Result<Option<&'a str>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(ProxyError::decode(key, other)),
        }
    }

    pub fn opt_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self.opt_str(key)?.map(str::to_owned))
    }

    pub fn require_f64(&self, key: &str) -> Result<f64> {
        let value = self.require(key)?;
        value.as_f64().ok_or_else(|| ProxyError::decode(key, value))
    }

    pub fn opt_f64(&self, key: &str) -> Result<Option<f64>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| ProxyError::decode(key, value)),
        }
    }

    pub fn require_i64(&self, key: &str) -> Result<i64> {
        let value = self.require(key)?;
        as_whole_i64(value).ok_or_else(|| ProxyError::decode(key, value))
    }

    pub fn opt_i64(&self, key: &str) -> Result<Option<i64>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => as_whole_i64(value)
                .map(Some)
                .ok_or_else(|| ProxyError::decode(key, value)),
        }
    }

    pub fn require_bool(&self, key: &str) -> Result<bool> {
        let value = self.require(key)?;
        value.as_bool().ok_or_else(|| ProxyError::decode(key, value))
    }

    pub fn opt_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_bool()
                .map(Some)
                .ok_or_else(|| ProxyError::decode(key, value)),
        }
    }

    pub fn require_object(&self, key: &str) -> Result<JsonObject<'a>> {
        JsonObject::from_value(self.require(key)?, key)
    }

    pub fn opt_object(&self, key: &str) -> Result<Option<JsonObject<'a>>> {
        self.get(key)
            .map(|value| JsonObject::from_value(value, key))
            .transpose()
    }

    pub fn require_array(&self, key: &str) -> Result<&'a Vec<Value>> {
        let value = self.require(key)?;
        value.as_array().ok_or_else(|| ProxyError::decode(key, value))
    }

    pub fn opt_array(&self, key: &str) -> Result<Option<&'a Vec<Value>>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(other) => Err(ProxyError::decode(key, other)),
        }
    }

    /// Array whose every element must be a string.
    pub fn require_string_list(&self, key: &str) -> Result<Vec<String>> {
        string_list(self.require_array(key)?, key)
    }

    pub fn opt_string_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        self.opt_array(key)?
            .map(|items| string_list(items, key))
            .transpose()
    }

    /// Enum field looked up through `E`'s name table.
    pub fn require_enum<E: NamedEnum>(&self, key: &str) -> Result<E> {
        E::from_name(key, self.require_str(key)?)
    }

    pub fn opt_enum<E: NamedEnum>(&self, key: &str) -> Result<Option<E>> {
        self.opt_str(key)?
            .map(|name| E::from_name(key, name))
            .transpose()
    }
}

fn string_list(items: &[Value], key: &str) -> Result<Vec<String>> {
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_owned)
                .ok_or_else(|| ProxyError::decode(key, item))
        })
        .collect()
}

/// Integers may arrive as `10` or `10.0` from JavaScript hosts.
fn as_whole_i64(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.is_finite())
            .map(|f| f as i64)
    })
}

/// Decode a JSON array element-wise. One bad element fails the whole batch.
pub fn decode_list<T>(
    value: &Value,
    context: &str,
    decode: impl Fn(&Value) -> Result<T>,
) -> Result<Vec<T>> {
    let items = value
        .as_array()
        .ok_or_else(|| ProxyError::decode(context, value))?;
    items.iter().map(decode).collect()
}

/// A closed set of values with stable wire names.
///
/// Parsing is case-insensitive; an unknown name fails with
/// `ProxyError::InvalidEnumValue` rather than falling back to a default.
pub trait NamedEnum: Sized + Copy + PartialEq + 'static {
    /// Wire name ↔ value. The first entry for a value is its canonical name.
    const NAMES: &'static [(&'static str, Self)];

    fn from_name(field: &str, name: &str) -> Result<Self> {
        Self::NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
            .ok_or_else(|| ProxyError::invalid_value(field, name))
    }

    fn name(&self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(_, value)| value == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }
}

/// Implements `Serialize` for a [`NamedEnum`] as its canonical name.
#[macro_export]
macro_rules! serialize_by_name {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::json::NamedEnum::name(self))
            }
        }
    };
}
