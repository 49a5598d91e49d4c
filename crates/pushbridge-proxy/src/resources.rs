// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Notification config resolution.
//
// Icon names in the notification config are looked up against the app's
// packaged resources; the accent color is parsed from hex.

use tracing::warn;

use pushbridge_core::config::NotificationConfig;
use pushbridge_core::error::{ProxyError, Result};
use pushbridge_sdk::{ResourceHandle, ResourceKind, ResourceResolver};

/// A notification config with every name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationResources {
    pub icon: Option<ResourceHandle>,
    pub large_icon: Option<ResourceHandle>,
    pub default_channel_id: Option<String>,
    /// ARGB.
    pub accent_color: Option<u32>,
}

/// Resolve `config`. An icon that does not exist is logged and left unset;
/// a malformed accent color fails the whole config.
pub fn resolve_notification_config(
    config: &NotificationConfig,
    resolver: &dyn ResourceResolver,
) -> Result<NotificationResources> {
    Ok(NotificationResources {
        icon: config.icon.as_deref().and_then(|name| resolve_icon(resolver, name)),
        large_icon: config
            .large_icon
            .as_deref()
            .and_then(|name| resolve_icon(resolver, name)),
        default_channel_id: config.default_channel_id.clone(),
        accent_color: config
            .accent_color
            .as_deref()
            .map(parse_color)
            .transpose()?,
    })
}

fn resolve_icon(resolver: &dyn ResourceResolver, name: &str) -> Option<ResourceHandle> {
    let handle = resolver
        .resolve(name, ResourceKind::Drawable)
        .or_else(|| resolver.resolve(name, ResourceKind::Mipmap));
    if handle.is_none() {
        warn!(name, "notification icon not found");
    }
    handle
}

/// Parse `#RRGGBB` (opaque) or `#AARRGGBB` into ARGB.
pub fn parse_color(value: &str) -> Result<u32> {
    let invalid = || ProxyError::decode("accentColor", value);
    let hex = value.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
    match hex.len() {
        6 => Ok(0xFF00_0000 | rgb),
        8 => Ok(rgb),
        _ => Err(invalid()),
    }
}
