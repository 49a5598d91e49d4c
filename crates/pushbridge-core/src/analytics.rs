// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Custom analytics events submitted from the host runtime.

use serde_json::{Map, Value};

use crate::error::{ProxyError, Result};
use crate::json::JsonObject;

/// A custom event: name, optional value, free-form properties and an
/// optional interaction the event is attributed to.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomEvent {
    pub name: String,
    pub value: Option<f64>,
    pub properties: Map<String, Value>,
    pub transaction_id: Option<String>,
    pub interaction_id: Option<String>,
    pub interaction_type: Option<String>,
}

impl CustomEvent {
    /// Decode `{eventName, eventValue?, properties?, transactionId?,
    /// interactionId?, interactionType?}`.
    ///
    /// `eventValue` may be a number or a numeric string.
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = JsonObject::from_value(value, "customEvent")?;

        let name = obj.require_str("eventName")?;
        if name.trim().is_empty() {
            return Err(ProxyError::decode("eventName", obj.require("eventName")?));
        }

        let event_value = match obj.get("eventValue") {
            None => None,
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => Some(
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| ProxyError::decode("eventValue", Value::String(s.clone())))?,
            ),
            Some(other) => return Err(ProxyError::decode("eventValue", other)),
        };

        let properties = obj
            .opt_object("properties")?
            .map(|p| p.map().clone())
            .unwrap_or_default();

        Ok(Self {
            name: name.to_owned(),
            value: event_value,
            properties,
            transaction_id: obj.opt_string("transactionId")?,
            interaction_id: obj.opt_string("interactionId")?,
            interaction_type: obj.opt_string("interactionType")?,
        })
    }
}
