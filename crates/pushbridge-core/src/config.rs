// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Proxy configuration.
//
// Decoded once from the JSON blob handed to `takeOff`, persisted between
// launches, and re-decoded on every initialisation attempt. Decoding is
// explicit so that every failure names its field; encoding goes through
// serde and skips absent optionals, so canonical input survives a
// decode/encode round trip unchanged.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ProxyError, Result};
use crate::json::{JsonObject, NamedEnum};
use crate::types::{FeatureSet, LogLevel, LogPrivacyLevel, PrivacyFeature, Site};

/// Credentials and logging for one environment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// App key issued for this environment.
    pub app_key: String,
    /// App secret paired with `app_key`.
    pub app_secret: String,
    /// SDK log verbosity; unset keeps the SDK default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
    /// iOS-only overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios: Option<EnvironmentPlatform>,
    /// Android-only overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<EnvironmentPlatform>,
}

/// Per-platform environment overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentPlatform {
    /// Whether logs may carry identifying values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_privacy_level: Option<LogPrivacyLevel>,
}

/// Android notification defaults. Icon names are resolved at runtime.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfig {
    /// Small icon resource name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Large icon resource name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_icon: Option<String>,
    /// Channel used when a push names none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_channel_id: Option<String>,
    /// `#RRGGBB` or `#AARRGGBB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidConfig {
    /// Store link opened by app rating prompts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_store_uri: Option<String>,
    /// Named Firebase app to register with, if not the default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fcm_firebase_app_name: Option<String>,
    /// Notification defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_config: Option<NotificationConfig>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IosConfig {
    /// App Store id used by rating prompts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itunes_id: Option<String>,
    /// Follow the user's preferred locale instead of the app's.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_user_preferred_locale: Option<bool>,
    /// Allow Safari inspection of SDK web views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_webview_inspection_enabled: Option<bool>,
}

/// Complete proxy configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfig {
    /// Credentials used when no matching environment is set.
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_environment: Option<Environment>,
    /// Credentials for production builds.
    #[serde(rename = "production", skip_serializing_if = "Option::is_none")]
    pub production_environment: Option<Environment>,
    /// Credentials for development builds.
    #[serde(rename = "development", skip_serializing_if = "Option::is_none")]
    pub development_environment: Option<Environment>,
    /// Selects production over development; unset means development.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_production: Option<bool>,
    /// Cloud site the SDK talks to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<Site>,
    /// Defer channel creation until the app allows it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_channel_creation_delay_enabled: Option<bool>,
    /// Enable the channel id capture tool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_channel_capture_enabled: Option<bool>,
    /// Remote config URL fetched on first launch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_config_url: Option<String>,
    /// URL patterns allowed for every scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_allow_list: Option<Vec<String>>,
    /// URL patterns the SDK may open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_allow_list_scope_open_url: Option<Vec<String>>,
    /// URL patterns granted the JavaScript interface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_allow_list_scope_java_script_interface: Option<Vec<String>>,
    /// Privacy features enabled at take off; unset enables all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_features: Option<Vec<PrivacyFeature>>,
    /// Silence the missing allow list warning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppress_allow_list_error: Option<bool>,
    /// Start with in-app automation paused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_pause_in_app_automation_on_launch: Option<bool>,
    /// Android platform settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidConfig>,
    /// iOS platform settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios: Option<IosConfig>,
}

impl ProxyConfig {
    /// Decode from the take-off JSON blob.
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = JsonObject::from_value(value, "config")?;

        let enabled_features = obj
            .opt_string_list("enabledFeatures")?
            .map(|names| {
                names
                    .iter()
                    .map(|name| PrivacyFeature::from_name("feature", name))
                    .collect::<Result<Vec<PrivacyFeature>>>()
            })
            .transpose()?;

        Ok(Self {
            default_environment: decode_environment(&obj, "default")?,
            production_environment: decode_environment(&obj, "production")?,
            development_environment: decode_environment(&obj, "development")?,
            in_production: obj.opt_bool("inProduction")?,
            site: obj.opt_enum("site")?,
            is_channel_creation_delay_enabled: obj.opt_bool("isChannelCreationDelayEnabled")?,
            is_channel_capture_enabled: obj.opt_bool("isChannelCaptureEnabled")?,
            initial_config_url: obj.opt_string("initialConfigUrl")?,
            url_allow_list: obj.opt_string_list("urlAllowList")?,
            url_allow_list_scope_open_url: obj.opt_string_list("urlAllowListScopeOpenUrl")?,
            url_allow_list_scope_java_script_interface: obj
                .opt_string_list("urlAllowListScopeJavaScriptInterface")?,
            enabled_features,
            suppress_allow_list_error: obj.opt_bool("suppressAllowListError")?,
            auto_pause_in_app_automation_on_launch: obj
                .opt_bool("autoPauseInAppAutomationOnLaunch")?,
            android: obj.opt_object("android")?.map(decode_android).transpose()?,
            ios: obj.opt_object("ios")?.map(decode_ios).transpose()?,
        })
    }

    /// Canonical JSON encoding.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Credentials to take off with. Production or development credentials
    /// win over the default environment depending on `in_production`.
    pub fn resolve_environment(&self, in_production: bool) -> Result<&Environment> {
        let specific = if in_production {
            self.production_environment.as_ref()
        } else {
            self.development_environment.as_ref()
        };
        specific
            .or(self.default_environment.as_ref())
            .ok_or_else(|| {
                let field = if in_production { "production" } else { "development" };
                ProxyError::decode(field, Value::Null)
            })
    }

    /// Features enabled at take off. Absent means every feature.
    pub fn enabled_feature_set(&self) -> FeatureSet {
        self.enabled_features
            .as_deref()
            .map(FeatureSet::from_features)
            .unwrap_or_else(FeatureSet::all)
    }

    pub fn notification_config(&self) -> Option<&NotificationConfig> {
        self.android.as_ref()?.notification_config.as_ref()
    }
}

fn decode_environment(obj: &JsonObject<'_>, key: &str) -> Result<Option<Environment>> {
    let Some(env) = obj.opt_object(key)? else {
        return Ok(None);
    };
    Ok(Some(Environment {
        app_key: env.require_str("appKey")?.to_owned(),
        app_secret: env.require_str("appSecret")?.to_owned(),
        log_level: env.opt_enum("logLevel")?,
        ios: env.opt_object("ios")?.map(decode_env_platform).transpose()?,
        android: env.opt_object("android")?.map(decode_env_platform).transpose()?,
    }))
}

fn decode_env_platform(obj: JsonObject<'_>) -> Result<EnvironmentPlatform> {
    Ok(EnvironmentPlatform {
        log_privacy_level: obj.opt_enum("logPrivacyLevel")?,
    })
}

fn decode_android(obj: JsonObject<'_>) -> Result<AndroidConfig> {
    Ok(AndroidConfig {
        app_store_uri: obj.opt_string("appStoreUri")?,
        fcm_firebase_app_name: obj.opt_string("fcmFirebaseAppName")?,
        notification_config: obj
            .opt_object("notificationConfig")?
            .map(decode_notification_config)
            .transpose()?,
    })
}

fn decode_notification_config(obj: JsonObject<'_>) -> Result<NotificationConfig> {
    Ok(NotificationConfig {
        icon: obj.opt_string("icon")?,
        large_icon: obj.opt_string("largeIcon")?,
        default_channel_id: obj.opt_string("defaultChannelId")?,
        accent_color: obj.opt_string("accentColor")?,
    })
}

fn decode_ios(obj: JsonObject<'_>) -> Result<IosConfig> {
    Ok(IosConfig {
        itunes_id: obj.opt_string("itunesId")?,
        use_user_preferred_locale: obj.opt_bool("useUserPreferredLocale")?,
        is_webview_inspection_enabled: obj.opt_bool("isWebviewInspectionEnabled")?,
    })
}

impl NotificationConfig {
    /// Decode the standalone notification-config blob.
    pub fn from_json(value: &Value) -> Result<Self> {
        decode_notification_config(JsonObject::from_value(value, "notificationConfig")?)
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_config() -> Value {
        json!({
            "default": {
                "appKey": "default-key",
                "appSecret": "default-secret",
                "logLevel": "debug",
                "ios": {"logPrivacyLevel": "public"},
                "android": {"logPrivacyLevel": "private"}
            },
            "production": {
                "appKey": "prod-key",
                "appSecret": "prod-secret",
                "logLevel": "error"
            },
            "development": {
                "appKey": "dev-key",
                "appSecret": "dev-secret",
                "logLevel": "verbose"
            },
            "inProduction": true,
            "site": "eu",
            "isChannelCreationDelayEnabled": true,
            "isChannelCaptureEnabled": false,
            "initialConfigUrl": "https://remote.example.com/config",
            "urlAllowList": ["*"],
            "urlAllowListScopeOpenUrl": ["https://*.example.com"],
            "urlAllowListScopeJavaScriptInterface": ["https://app.example.com"],
            "enabledFeatures": ["push", "analytics", "message_center"],
            "suppressAllowListError": true,
            "autoPauseInAppAutomationOnLaunch": false,
            "android": {
                "appStoreUri": "market://details?id=com.example",
                "fcmFirebaseAppName": "secondary",
                "notificationConfig": {
                    "icon": "ic_notification",
                    "largeIcon": "ic_large",
                    "defaultChannelId": "general",
                    "accentColor": "#FF0000"
                }
            },
            "ios": {
                "itunesId": "123456",
                "useUserPreferredLocale": true,
                "isWebviewInspectionEnabled": false
            }
        })
    }

    fn basic_config() -> Value {
        json!({
            "default": {"appKey": "default-key", "appSecret": "default-secret"}
        })
    }

    #[test]
    fn full_config_round_trips() {
        let input = full_config();
        let config = ProxyConfig::from_json(&input).expect("decode full config");
        assert_eq!(config.site, Some(Site::Eu));
        assert_eq!(config.to_json().expect("encode"), input);
    }

    #[test]
    fn basic_config_round_trips() {
        let input = basic_config();
        let config = ProxyConfig::from_json(&input).expect("decode basic config");
        assert_eq!(config.to_json().expect("encode"), input);
    }

    #[test]
    fn missing_app_secret_names_field() {
        let input = json!({"default": {"appKey": "k"}});
        match ProxyConfig::from_json(&input) {
            Err(ProxyError::Decode { field, .. }) => assert_eq!(field, "appSecret"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn log_level_names_are_canonical() {
        let input = json!({"default": {"appKey": "k", "appSecret": "s", "logLevel": "WARNING"}});
        let config = ProxyConfig::from_json(&input).unwrap();
        assert_eq!(
            config.to_json().unwrap(),
            json!({"default": {"appKey": "k", "appSecret": "s", "logLevel": "warning"}})
        );

        for alias in ["warn", "off"] {
            let input = json!({"default": {"appKey": "k", "appSecret": "s", "logLevel": alias}});
            assert!(matches!(
                ProxyConfig::from_json(&input),
                Err(ProxyError::InvalidEnumValue { .. })
            ));
        }
    }

    #[test]
    fn unknown_site_is_rejected() {
        let input = json!({"site": "mars"});
        match ProxyConfig::from_json(&input) {
            Err(err @ ProxyError::InvalidEnumValue { .. }) => {
                assert_eq!(err.to_string(), "invalid site: mars");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn production_credentials_win_over_default() {
        let config = ProxyConfig::from_json(&full_config()).unwrap();
        assert_eq!(config.resolve_environment(true).unwrap().app_key, "prod-key");
        assert_eq!(config.resolve_environment(false).unwrap().app_key, "dev-key");

        let basic = ProxyConfig::from_json(&basic_config()).unwrap();
        assert_eq!(basic.resolve_environment(true).unwrap().app_key, "default-key");
    }

    #[test]
    fn no_credentials_fails_resolution() {
        let config = ProxyConfig::from_json(&json!({})).unwrap();
        assert!(config.resolve_environment(false).is_err());
    }

    #[test]
    fn absent_enabled_features_means_all() {
        let basic = ProxyConfig::from_json(&basic_config()).unwrap();
        assert_eq!(basic.enabled_feature_set(), FeatureSet::all());

        let full = ProxyConfig::from_json(&full_config()).unwrap();
        assert_eq!(full.enabled_feature_set().names(), vec!["message_center", "push", "analytics"]);
    }
}
