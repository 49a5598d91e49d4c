// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared domain types for the Pushbridge proxy layer.

use serde_json::{Value, json};

use crate::error::Result;
use crate::json::{JsonObject, NamedEnum};
use crate::serialize_by_name;

/// Cloud site the SDK talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Site {
    #[default]
    Us,
    Eu,
}

impl NamedEnum for Site {
    const NAMES: &'static [(&'static str, Self)] = &[("us", Self::Us), ("eu", Self::Eu)];
}

serialize_by_name!(Site);

/// SDK log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Verbose,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    None,
}

impl NamedEnum for LogLevel {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("verbose", Self::Verbose),
        ("debug", Self::Debug),
        ("info", Self::Info),
        ("warning", Self::Warning),
        ("error", Self::Error),
        ("none", Self::None),
    ];
}

serialize_by_name!(LogLevel);

/// Whether the SDK may log values that could identify the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogPrivacyLevel {
    #[default]
    Private,
    Public,
}

impl NamedEnum for LogPrivacyLevel {
    const NAMES: &'static [(&'static str, Self)] =
        &[("private", Self::Private), ("public", Self::Public)];
}

serialize_by_name!(LogPrivacyLevel);

// ---------------------------------------------------------------------------
// Privacy features
// ---------------------------------------------------------------------------

/// One named privacy feature (or one of the `all` / `none` shorthands).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivacyFeature {
    InAppAutomation,
    MessageCenter,
    Push,
    Analytics,
    TagsAndAttributes,
    Contacts,
    FeatureFlags,
    All,
    None,
}

impl NamedEnum for PrivacyFeature {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("in_app_automation", Self::InAppAutomation),
        ("message_center", Self::MessageCenter),
        ("push", Self::Push),
        ("analytics", Self::Analytics),
        ("tags_and_attributes", Self::TagsAndAttributes),
        ("contacts", Self::Contacts),
        ("feature_flags", Self::FeatureFlags),
        ("all", Self::All),
        ("none", Self::None),
    ];
}

serialize_by_name!(PrivacyFeature);

impl PrivacyFeature {
    /// Individual features in bit order (excludes the shorthands).
    pub const INDIVIDUAL: [Self; 7] = [
        Self::InAppAutomation,
        Self::MessageCenter,
        Self::Push,
        Self::Analytics,
        Self::TagsAndAttributes,
        Self::Contacts,
        Self::FeatureFlags,
    ];

    pub fn bits(self) -> u32 {
        match self {
            Self::InAppAutomation => 1,
            Self::MessageCenter => 1 << 1,
            Self::Push => 1 << 2,
            Self::Analytics => 1 << 4,
            Self::TagsAndAttributes => 1 << 5,
            Self::Contacts => 1 << 6,
            Self::FeatureFlags => 1 << 8,
            Self::All => Self::INDIVIDUAL.iter().fold(0, |acc, f| acc | f.bits()),
            Self::None => 0,
        }
    }
}

/// Bitmask of enabled privacy features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct FeatureSet(pub u32);

impl FeatureSet {
    pub const NONE: Self = Self(0);

    pub fn all() -> Self {
        Self(PrivacyFeature::All.bits())
    }

    pub fn from_features(features: &[PrivacyFeature]) -> Self {
        Self(features.iter().fold(0, |acc, f| acc | f.bits()))
    }

    /// Parse a JSON array of feature names.
    pub fn from_names(value: &Value) -> Result<Self> {
        let features = crate::json::decode_list(value, "features", |item| {
            let name = item
                .as_str()
                .ok_or_else(|| crate::ProxyError::decode("features", item))?;
            PrivacyFeature::from_name("feature", name)
        })?;
        Ok(Self::from_features(&features))
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Names of the individual features present, in bit order.
    pub fn names(self) -> Vec<&'static str> {
        PrivacyFeature::INDIVIDUAL
            .iter()
            .filter(|f| self.0 & f.bits() != 0)
            .map(|f| f.name())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Subscription scopes
// ---------------------------------------------------------------------------

/// Delivery channel type a scoped subscription applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionScope {
    App,
    Web,
    Sms,
    Email,
}

impl NamedEnum for SubscriptionScope {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("app", Self::App),
        ("web", Self::Web),
        ("sms", Self::Sms),
        ("email", Self::Email),
    ];
}

serialize_by_name!(SubscriptionScope);

// ---------------------------------------------------------------------------
// Notification permission state
// ---------------------------------------------------------------------------

/// OS-level notification permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    Granted,
    Denied,
    #[default]
    NotDetermined,
}

impl NamedEnum for PermissionStatus {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("granted", Self::Granted),
        ("denied", Self::Denied),
        ("not_determined", Self::NotDetermined),
    ];
}

serialize_by_name!(PermissionStatus);

/// Snapshot of push-permission state at the moment of the query.
///
/// `is_opted_in` and `is_user_opted_in` are separate facts: the first also
/// requires a registered push token, the second only reflects the user's
/// choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationStatus {
    pub is_user_notifications_enabled: bool,
    pub are_notifications_allowed: bool,
    pub is_push_privacy_feature_enabled: bool,
    pub is_push_token_registered: bool,
    pub is_opted_in: bool,
    pub is_user_opted_in: bool,
    pub notification_permission_status: PermissionStatus,
}

impl NotificationStatus {
    pub fn to_json(&self) -> Value {
        json!({
            "isUserNotificationsEnabled": self.is_user_notifications_enabled,
            "areNotificationsAllowed": self.are_notifications_allowed,
            "isPushPrivacyFeatureEnabled": self.is_push_privacy_feature_enabled,
            "isPushTokenRegistered": self.is_push_token_registered,
            "isOptedIn": self.is_opted_in,
            "isUserOptedIn": self.is_user_opted_in,
            "notificationPermissionStatus": self.notification_permission_status.name(),
        })
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = JsonObject::from_value(value, "notificationStatus")?;
        Ok(Self {
            is_user_notifications_enabled: obj.require_bool("isUserNotificationsEnabled")?,
            are_notifications_allowed: obj.require_bool("areNotificationsAllowed")?,
            is_push_privacy_feature_enabled: obj.require_bool("isPushPrivacyFeatureEnabled")?,
            is_push_token_registered: obj.require_bool("isPushTokenRegistered")?,
            is_opted_in: obj.require_bool("isOptedIn")?,
            is_user_opted_in: obj.require_bool("isUserOptedIn")?,
            notification_permission_status: obj
                .opt_enum("notificationPermissionStatus")?
                .unwrap_or_default(),
        })
    }
}

/// iOS authorized notification setting names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorizedSetting {
    Alert,
    Badge,
    Sound,
    Announcement,
    CarPlay,
    CriticalAlert,
    NotificationCenter,
    ScheduledDelivery,
    TimeSensitive,
    LockScreen,
}

impl NamedEnum for AuthorizedSetting {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("alert", Self::Alert),
        ("badge", Self::Badge),
        ("sound", Self::Sound),
        ("announcement", Self::Announcement),
        ("car_play", Self::CarPlay),
        ("critical_alert", Self::CriticalAlert),
        ("notification_center", Self::NotificationCenter),
        ("scheduled_delivery", Self::ScheduledDelivery),
        ("time_sensitive", Self::TimeSensitive),
        ("lock_screen", Self::LockScreen),
    ];
}

serialize_by_name!(AuthorizedSetting);

// ---------------------------------------------------------------------------
// Foreground presentation options
// ---------------------------------------------------------------------------

/// How a notification is presented while the app is in the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationOption {
    Alert,
    Badge,
    Sound,
    List,
    Banner,
}

impl NamedEnum for PresentationOption {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("alert", Self::Alert),
        ("badge", Self::Badge),
        ("sound", Self::Sound),
        ("list", Self::List),
        ("banner", Self::Banner),
    ];
}

serialize_by_name!(PresentationOption);

impl PresentationOption {
    pub const ALL: [Self; 5] = [Self::Alert, Self::Badge, Self::Sound, Self::List, Self::Banner];

    pub fn bits(self) -> u32 {
        match self {
            Self::Badge => 1,
            Self::Sound => 1 << 1,
            Self::Alert => 1 << 2,
            Self::List => 1 << 3,
            Self::Banner => 1 << 4,
        }
    }
}

/// Bitmask of presentation options, persisted between launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresentationOptions(pub u32);

impl PresentationOptions {
    pub fn from_names(value: &Value) -> Result<Self> {
        let options = crate::json::decode_list(value, "presentationOptions", |item| {
            let name = item
                .as_str()
                .ok_or_else(|| crate::ProxyError::decode("presentationOptions", item))?;
            PresentationOption::from_name("presentation option", name)
        })?;
        Ok(Self(options.iter().fold(0, |acc, o| acc | o.bits())))
    }

    pub fn contains(self, option: PresentationOption) -> bool {
        self.0 & option.bits() != 0
    }

    pub fn names(self) -> Vec<&'static str> {
        PresentationOption::ALL
            .iter()
            .filter(|o| self.contains(**o))
            .map(|o| o.name())
            .collect()
    }
}

/// Inbox counts read together so they can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InboxCounts {
    pub unread: u32,
    pub total: u32,
}
